//! The seam between the engine and a model transport.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One outbound generation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub system: String,
    pub user: String,
}

/// The provider's answer as received, before normalization.
///
/// Providers answer either with one text value or with a list of content
/// segments; anything else is kept as raw JSON so the engine can report it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderReply {
    pub content: ReplyContent,
    #[serde(default)]
    pub usage: Option<TokenCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplyContent {
    Text(String),
    Segments(Vec<ContentSegment>),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSegment {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl ContentSegment {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: Some("text".to_string()),
            text: Some(text.into()),
        }
    }
}

impl ProviderReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: ReplyContent::Text(text.into()),
            usage: None,
        }
    }

    pub fn segments(segments: Vec<ContentSegment>) -> Self {
        Self {
            content: ReplyContent::Segments(segments),
            usage: None,
        }
    }
}

/// Token counts reported by the provider, when it reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenCount {
    #[serde(alias = "inputTokens")]
    pub input_tokens: u64,
    #[serde(alias = "outputTokens")]
    pub output_tokens: u64,
}

/// A text-generation backend. Implementations make exactly one attempt.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    async fn complete(&self, request: &CompletionRequest) -> Result<ProviderReply, EngineError>;
}
