//! Anthropic Messages API transport.
//!
//! The HTTP client is blocking, so each call runs on tokio's blocking pool.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};
use ureq::Agent;

use crate::credentials::ApiKey;
use crate::error::{EngineError, TransportCause};
use crate::provider::{CompletionRequest, ModelProvider, ProviderReply};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    agent: Agent,
    api_key: ApiKey,
    base_url: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: [UserMessage<'a>; 1],
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl AnthropicProvider {
    /// `timeout` bounds the whole HTTP exchange.
    pub fn new(api_key: ApiKey, base_url: Option<String>, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        info!(base_url = %base_url, key = %api_key.hint(), "anthropic provider configured");

        Self {
            agent,
            api_key,
            base_url,
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

#[async_trait]
impl ModelProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<ProviderReply, EngineError> {
        let body = serde_json::to_string(&MessagesRequest {
            model: &request.model_id,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            system: &request.system,
            messages: [UserMessage {
                role: "user",
                content: &request.user,
            }],
        })
        .map_err(|e| EngineError::InvalidRequest(format!("failed to encode request: {e}")))?;

        let agent = self.agent.clone();
        let api_key = self.api_key.clone();
        let url = self.messages_url();

        let (status, text) =
            tokio::task::spawn_blocking(move || post_messages(&agent, &url, &api_key, body))
                .await
                .map_err(|e| EngineError::transport(TransportCause::Service, e.to_string()))??;

        debug!(status, bytes = text.len(), "anthropic response received");

        if !(200..300).contains(&status) {
            return Err(EngineError::transport(
                status_cause(status),
                format!("HTTP {status}: {}", truncate(&text, 500)),
            ));
        }

        serde_json::from_str::<ProviderReply>(&text).map_err(|e| {
            EngineError::UnexpectedResponseShape(format!("unrecognized messages response: {e}"))
        })
    }
}

fn post_messages(
    agent: &Agent,
    url: &str,
    api_key: &ApiKey,
    body: String,
) -> Result<(u16, String), EngineError> {
    let mut response = agent
        .post(url)
        .header("x-api-key", api_key.expose())
        .header("anthropic-version", API_VERSION)
        .header("content-type", "application/json")
        .send(body)
        .map_err(transport_error)?;

    let status = response.status().as_u16();
    let text = response
        .body_mut()
        .read_to_string()
        .map_err(transport_error)?;

    Ok((status, text))
}

fn transport_error(err: ureq::Error) -> EngineError {
    let cause = match &err {
        ureq::Error::Timeout(_) => TransportCause::Timeout,
        _ => TransportCause::Network,
    };
    EngineError::transport(cause, err.to_string())
}

/// Map an HTTP status to a transport cause.
pub fn status_cause(status: u16) -> TransportCause {
    match status {
        401 | 403 => TransportCause::Auth,
        429 => TransportCause::RateLimited,
        408 | 504 => TransportCause::Timeout,
        _ => TransportCause::Service,
    }
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
