pub mod exercise;
pub mod patient;
pub mod schedule;
