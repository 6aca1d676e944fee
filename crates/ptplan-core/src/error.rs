use thiserror::Error;

use crate::models::schedule::Weekday;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("invalid day: {0}")]
    InvalidDay(String),

    #[error("no exercise at index {index} on {day} ({len} scheduled)")]
    IndexOutOfRange {
        day: Weekday,
        index: usize,
        len: usize,
    },

    #[error("patient not found: {0}")]
    PatientNotFound(String),

    #[error("patient already exists: {0}")]
    PatientExists(String),
}
