//! Reduce a provider reply to the single string that should hold the JSON.

use crate::error::EngineError;
use crate::provider::{ProviderReply, ReplyContent};

/// Plain text is used as-is; a segment list uses its first segment's text.
pub fn reply_text(reply: ProviderReply) -> Result<String, EngineError> {
    match reply.content {
        ReplyContent::Text(text) => Ok(text),
        ReplyContent::Segments(segments) => {
            let first = segments.into_iter().next().ok_or_else(|| {
                EngineError::UnexpectedResponseShape("content segment list is empty".to_string())
            })?;
            first.text.ok_or_else(|| {
                EngineError::UnexpectedResponseShape(format!(
                    "first content segment has no text (type: {})",
                    first.kind.as_deref().unwrap_or("unknown")
                ))
            })
        }
        ReplyContent::Other(value) => Err(EngineError::UnexpectedResponseShape(format!(
            "content is neither text nor a segment list: {}",
            json_kind(&value)
        ))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
