//! Structural validation of the model's JSON.
//!
//! The document must be an object with an `exercises` array. Individual
//! exercises are trusted loosely: a missing or non-string field becomes an
//! empty string instead of failing the whole set. Nothing here checks the
//! count or clinical content.

use serde_json::{Map, Value};
use tracing::warn;

use ptplan_core::models::exercise::{Exercise, RecommendationSet};

use crate::error::EngineError;

/// Parse and validate raw model output into a recommendation set.
pub fn parse_recommendations(raw: &str) -> Result<RecommendationSet, EngineError> {
    let body = strip_code_fence(raw);

    let value: Value = serde_json::from_str(body)
        .map_err(|e| EngineError::malformed(format!("invalid JSON: {e}"), raw))?;

    let Value::Object(mut root) = value else {
        return Err(EngineError::malformed("top-level value is not an object", raw));
    };

    let exercises = match root.remove("exercises") {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(EngineError::malformed("`exercises` is not an array", raw)),
        None => return Err(EngineError::malformed("`exercises` is missing", raw)),
    };

    let notes = match root.remove("notes") {
        Some(Value::String(notes)) => notes,
        None | Some(Value::Null) => String::new(),
        Some(_) => return Err(EngineError::malformed("`notes` is not a string", raw)),
    };

    let exercises = exercises
        .into_iter()
        .enumerate()
        .map(|(index, item)| exercise_from_value(index, item))
        .collect();

    Ok(RecommendationSet { exercises, notes })
}

fn exercise_from_value(index: usize, item: Value) -> Exercise {
    let Value::Object(mut fields) = item else {
        warn!(index, "exercise entry is not an object, filling with empty fields");
        return Exercise::default();
    };

    Exercise {
        id: take_string(&mut fields, index, "id"),
        name: take_string(&mut fields, index, "name"),
        description: take_string(&mut fields, index, "description"),
        parameters: take_string(&mut fields, index, "parameters"),
        progression_criteria: take_string(&mut fields, index, "progressionCriteria"),
        rationale: take_string(&mut fields, index, "rationale"),
    }
}

fn take_string(fields: &mut Map<String, Value>, index: usize, key: &'static str) -> String {
    match fields.remove(key) {
        Some(Value::String(s)) => s,
        Some(_) => {
            warn!(index, field = key, "exercise field has the wrong type, using empty string");
            String::new()
        }
        None => {
            warn!(index, field = key, "exercise field is missing, using empty string");
            String::new()
        }
    }
}

/// Remove one surrounding markdown code fence, if present.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`) on the opening line.
    match inner.split_once('\n') {
        Some((_, body)) => body.trim(),
        None => inner.trim(),
    }
}
