//! AWS Bedrock Converse API transport.

use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_bedrockruntime::error::SdkError;
use aws_sdk_bedrockruntime::operation::converse::ConverseError;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message, SystemContentBlock,
};
use aws_sdk_bedrockruntime::Client;
use tracing::info;

use crate::error::{EngineError, TransportCause};
use crate::provider::{
    CompletionRequest, ContentSegment, ModelProvider, ProviderReply, ReplyContent, TokenCount,
};

pub struct BedrockProvider {
    client: Client,
}

impl BedrockProvider {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

/// Build an `SdkConfig` from a region and an optional named profile.
/// Without a profile the default credential chain is used.
pub async fn build_aws_config(region: &str, profile_name: Option<&str>) -> aws_config::SdkConfig {
    let mut builder = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()));

    if let Some(profile) = profile_name {
        builder = builder.profile_name(profile);
    }

    info!(region, profile = profile_name.unwrap_or("default chain"), "loading AWS config");
    builder.load().await
}

#[async_trait]
impl ModelProvider for BedrockProvider {
    fn name(&self) -> &'static str {
        "bedrock"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<ProviderReply, EngineError> {
        let message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(request.user.clone()))
            .build()
            .map_err(|e| EngineError::InvalidRequest(e.to_string()))?;

        let max_tokens = i32::try_from(request.max_tokens).unwrap_or(i32::MAX);

        let response = self
            .client
            .converse()
            .model_id(&request.model_id)
            .system(SystemContentBlock::Text(request.system.clone()))
            .messages(message)
            .inference_config(
                InferenceConfiguration::builder()
                    .max_tokens(max_tokens)
                    .temperature(request.temperature)
                    .build(),
            )
            .send()
            .await
            .map_err(classify_sdk_error)?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| {
                EngineError::UnexpectedResponseShape("no message in converse output".to_string())
            })?;

        // Non-text blocks become segments without text so the engine can
        // tell the caller what came back.
        let segments = output_message
            .content()
            .iter()
            .map(|block| match block {
                ContentBlock::Text(text) => ContentSegment::text(text.clone()),
                other => ContentSegment {
                    kind: Some(block_kind(other).to_string()),
                    text: None,
                },
            })
            .collect();

        let usage = response.usage().map(|u| TokenCount {
            input_tokens: u.input_tokens.max(0) as u64,
            output_tokens: u.output_tokens.max(0) as u64,
        });

        Ok(ProviderReply {
            content: ReplyContent::Segments(segments),
            usage,
        })
    }
}

fn classify_sdk_error<R>(err: SdkError<ConverseError, R>) -> EngineError
where
    R: Debug + Send + Sync + 'static,
{
    match &err {
        SdkError::TimeoutError(_) => {
            return EngineError::transport(TransportCause::Timeout, "bedrock request timed out");
        }
        SdkError::DispatchFailure(failure) => {
            let cause = if failure.is_timeout() {
                TransportCause::Timeout
            } else {
                TransportCause::Network
            };
            return EngineError::transport(cause, format!("{failure:?}"));
        }
        _ => {}
    }

    let service = err.into_service_error();
    let cause = match &service {
        ConverseError::AccessDeniedException(_) => TransportCause::Auth,
        ConverseError::ThrottlingException(_) => TransportCause::RateLimited,
        ConverseError::ModelTimeoutException(_) => TransportCause::Timeout,
        _ => TransportCause::Service,
    };
    EngineError::transport(cause, service.to_string())
}

fn block_kind(block: &ContentBlock) -> &'static str {
    match block {
        ContentBlock::Text(_) => "text",
        ContentBlock::Image(_) => "image",
        ContentBlock::Document(_) => "document",
        ContentBlock::ToolUse(_) => "tool_use",
        ContentBlock::ToolResult(_) => "tool_result",
        _ => "other",
    }
}
