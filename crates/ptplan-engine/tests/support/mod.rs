#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use ptplan_core::models::patient::{ActivityLevel, PatientIntake, PatientRecord};
use ptplan_engine::error::EngineError;
use ptplan_engine::provider::{CompletionRequest, ModelProvider, ProviderReply};

/// Provider that returns a canned reply and records what it was sent.
pub struct StubProvider {
    reply: Mutex<Option<Result<ProviderReply, EngineError>>>,
    delay: Option<Duration>,
    pub calls: AtomicUsize,
    pub last_request: Mutex<Option<CompletionRequest>>,
}

impl StubProvider {
    pub fn replying(reply: ProviderReply) -> Self {
        Self::with_result(Ok(reply))
    }

    pub fn failing(err: EngineError) -> Self {
        Self::with_result(Err(err))
    }

    pub fn with_result(result: Result<ProviderReply, EngineError>) -> Self {
        Self {
            reply: Mutex::new(Some(result)),
            delay: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<ProviderReply, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.reply
            .lock()
            .unwrap()
            .take()
            .expect("stub provider called more than once")
    }
}

pub fn knee_patient() -> PatientRecord {
    PatientRecord::from_intake(PatientIntake {
        name: "Jane Doe".to_string(),
        age: 34,
        injury_location: "left knee".to_string(),
        pain_level: 6,
        mobility_status: "limited flexion".to_string(),
        medical_history: "ACL reconstruction 3 months ago".to_string(),
        activity_level: ActivityLevel::Light,
        goals: "return to jogging".to_string(),
    })
    .unwrap()
}

pub const THREE_EXERCISES: &str = r#"{
  "exercises": [
    {
      "id": "ex1",
      "name": "Quad sets",
      "description": "Tighten the thigh with the knee straight.",
      "parameters": "3 sets of 10, daily",
      "progressionCriteria": "No pain for 3 sessions",
      "rationale": "Restores quadriceps activation after ACL reconstruction."
    },
    {
      "id": "ex2",
      "name": "Heel slides",
      "description": "Slide the heel toward the buttock.",
      "parameters": "2 sets of 15, twice daily",
      "progressionCriteria": "Flexion beyond 110 degrees",
      "rationale": "Improves knee flexion range."
    },
    {
      "id": "ex3",
      "name": "Mini squats",
      "description": "Partial squat to 45 degrees.",
      "parameters": "3 sets of 12, every other day",
      "progressionCriteria": "Good control without valgus",
      "rationale": "Closed-chain strengthening for return to running."
    }
  ],
  "notes": "Ice after sessions if swelling increases."
}"#;
