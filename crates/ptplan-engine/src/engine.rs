//! The recommendation engine: validate input, build the prompt, make one
//! provider call under a timeout, then normalize and validate the reply.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use uuid::Uuid;

use ptplan_core::models::exercise::RecommendationSet;
use ptplan_core::models::patient::{PatientRecord, MAX_PAIN_LEVEL};

use crate::error::{EngineError, TransportCause};
use crate::extract::reply_text;
use crate::prompt::build_prompt;
use crate::provider::{CompletionRequest, ModelProvider};
use crate::tokens;
use crate::validate::parse_recommendations;

pub const MIN_EXERCISES: u32 = 1;
pub const MAX_EXERCISES: u32 = 10;

/// Fixed decoding and transport settings for every call.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub model_id: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            model_id: "claude-3-5-sonnet-20241022".to_string(),
            max_tokens: 4096,
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Clone)]
pub struct RecommendationEngine {
    provider: Arc<dyn ModelProvider>,
    settings: EngineSettings,
}

impl RecommendationEngine {
    pub fn new(provider: Arc<dyn ModelProvider>, settings: EngineSettings) -> Self {
        Self { provider, settings }
    }

    /// Generate `count` exercises for `patient`.
    ///
    /// Makes a single attempt. The patient record is not modified; storing
    /// the result is up to the caller.
    pub async fn recommend(
        &self,
        patient: &PatientRecord,
        count: u32,
    ) -> Result<RecommendationSet, EngineError> {
        check_request(patient, count)?;

        let transaction_id = Uuid::new_v4();
        let prompt = build_prompt(patient, count);
        let request = CompletionRequest {
            model_id: self.settings.model_id.clone(),
            max_tokens: self.settings.max_tokens,
            temperature: 0.0,
            system: prompt.system,
            user: prompt.user,
        };

        info!(
            transaction_id = %transaction_id,
            provider = self.provider.name(),
            model = %request.model_id,
            count,
            "starting exercise generation"
        );

        let reply = tokio::time::timeout(self.settings.timeout, self.provider.complete(&request))
            .await
            .map_err(|_| {
                EngineError::transport(
                    TransportCause::Timeout,
                    format!("no reply within {}s", self.settings.timeout.as_secs()),
                )
            })??;

        if let Some(usage) = reply.usage {
            let cost_usd = tokens::get_pricing(&request.model_id)
                .map(|p| p.estimate_cost(usage))
                .unwrap_or(0.0);
            info!(
                transaction_id = %transaction_id,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                cost_usd,
                "token usage"
            );
        }

        let text = reply_text(reply)?;
        let set = parse_recommendations(&text).inspect_err(|e| {
            warn!(transaction_id = %transaction_id, error = %e, "model reply rejected");
        })?;

        info!(
            transaction_id = %transaction_id,
            exercises = set.exercises.len(),
            "exercise generation complete"
        );

        Ok(set)
    }
}

fn check_request(patient: &PatientRecord, count: u32) -> Result<(), EngineError> {
    if !(MIN_EXERCISES..=MAX_EXERCISES).contains(&count) {
        return Err(EngineError::InvalidRequest(format!(
            "exercise count {count} is outside {MIN_EXERCISES}..={MAX_EXERCISES}"
        )));
    }
    if patient.pain_level > MAX_PAIN_LEVEL {
        return Err(EngineError::InvalidRequest(format!(
            "pain level {} is outside 0..={MAX_PAIN_LEVEL}",
            patient.pain_level
        )));
    }
    Ok(())
}
