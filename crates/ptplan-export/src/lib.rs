//! ptplan-export
//!
//! Plain-text treatment plan rendering from Tera templates.

pub mod error;
pub mod plan;
pub mod render;
