//! ptplan-engine
//!
//! Exercise recommendation: prompt construction, one model call, and
//! structural validation of the reply.

pub mod anthropic;
pub mod bedrock;
pub mod config;
pub mod credentials;
pub mod engine;
pub mod error;
pub mod extract;
pub mod prompt;
pub mod provider;
pub mod tokens;
pub mod validate;
