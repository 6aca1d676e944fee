//! ptplan-core
//!
//! Pure domain types for the PT exercise planner: patient records, exercises,
//! recommendation sets, the weekly schedule and the cross-patient roster.
//! No I/O and no model-provider dependency.

pub mod directory;
pub mod error;
pub mod models;
pub mod roster;
