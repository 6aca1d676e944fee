#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use ptplan_core::directory::PatientDirectory;
use ptplan_engine::engine::{EngineSettings, RecommendationEngine};
use ptplan_engine::error::EngineError;
use ptplan_engine::provider::{CompletionRequest, ModelProvider, ProviderReply};
use ptplan_server::state::AppState;
use ptplan_storage::patients::PatientStore;

/// Provider that returns the same canned result on every call.
pub struct StubProvider {
    reply: Result<String, (ptplan_engine::error::TransportCause, String)>,
    pub calls: AtomicUsize,
}

impl StubProvider {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(cause: ptplan_engine::error::TransportCause) -> Arc<Self> {
        Arc::new(Self {
            reply: Err((cause, "stubbed failure".to_string())),
            calls: AtomicUsize::new(0),
        })
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

    async fn complete(&self, _request: &CompletionRequest) -> Result<ProviderReply, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(ProviderReply::text(text.clone())),
            Err((cause, message)) => Err(EngineError::transport(*cause, message.clone())),
        }
    }
}

pub fn test_app(provider: Arc<StubProvider>, data_file: &Path) -> Router {
    let engine = RecommendationEngine::new(provider, EngineSettings::default());
    let store = PatientStore::new(data_file);
    ptplan_server::app(AppState::new(engine, store, PatientDirectory::new()))
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn expect_status(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    status: StatusCode,
) -> Value {
    let response = send(app, method, uri, body).await;
    assert_eq!(response.status(), status, "{uri}");
    body_json(response).await
}

pub fn jane_intake() -> Value {
    json!({
        "name": "Jane Doe",
        "age": 34,
        "injury_location": "left knee",
        "pain_level": 6,
        "mobility_status": "limited flexion",
        "medical_history": "ACL reconstruction 3 months ago",
        "activity_level": "Very Active",
        "goals": "return to jogging"
    })
}

pub fn quad_sets() -> Value {
    json!({
        "id": "ex1",
        "name": "Quad sets",
        "description": "Tighten the thigh with the knee straight.",
        "parameters": "3 sets of 10, daily",
        "progressionCriteria": "No pain for 3 sessions",
        "rationale": "Restores quadriceps activation."
    })
}

pub const TWO_EXERCISES: &str = r#"{
  "exercises": [
    {
      "id": "ex1",
      "name": "Quad sets",
      "description": "Tighten the thigh with the knee straight.",
      "parameters": "3 sets of 10, daily",
      "progressionCriteria": "No pain for 3 sessions",
      "rationale": "Restores quadriceps activation."
    },
    {
      "id": "ex2",
      "name": "Heel slides",
      "description": "Slide the heel toward the buttock.",
      "parameters": "2 sets of 15, twice daily",
      "progressionCriteria": "Flexion beyond 110 degrees",
      "rationale": "Improves knee flexion range."
    }
  ],
  "notes": "Ice after sessions if swelling increases."
}"#;
