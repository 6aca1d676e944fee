//! ptplan-storage
//!
//! Whole-document JSON persistence for the patient directory.

pub mod error;
pub mod patients;
pub mod state;
