//! API credential acquisition.
//!
//! Keys come from the environment or from a secret file mounted by the
//! deployment. There is no inline variant: keys never live in config files
//! or code.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::CredentialError;

pub const DEFAULT_API_KEY_VARIABLE: &str = "ANTHROPIC_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialSource {
    Environment { variable: String },
    SecretFile { path: PathBuf },
}

impl Default for CredentialSource {
    fn default() -> Self {
        CredentialSource::Environment {
            variable: DEFAULT_API_KEY_VARIABLE.to_string(),
        }
    }
}

/// An API key. `Debug` never prints the value.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First and last four characters, for logs.
    pub fn hint(&self) -> String {
        redact(&self.0)
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey({})", self.hint())
    }
}

impl CredentialSource {
    /// Resolve the key. A credential is always required.
    pub fn resolve(&self) -> Result<ApiKey, CredentialError> {
        let (raw, origin) = match self {
            CredentialSource::Environment { variable } => {
                let value = std::env::var(variable)
                    .map_err(|_| CredentialError::MissingVariable(variable.clone()))?;
                (value, format!("${variable}"))
            }
            CredentialSource::SecretFile { path } => {
                let value =
                    std::fs::read_to_string(path).map_err(|e| CredentialError::Unreadable {
                        path: path.clone(),
                        reason: e.to_string(),
                    })?;
                (value, path.display().to_string())
            }
        };

        let key = raw.trim();
        if key.is_empty() {
            return Err(CredentialError::Empty(origin));
        }
        Ok(ApiKey(key.to_string()))
    }
}

fn redact(key: &str) -> String {
    if key.len() <= 8 || !key.is_ascii() {
        return "****".to_string();
    }
    let prefix = &key[..4];
    let suffix = &key[key.len() - 4..];
    format!("{prefix}...{suffix}")
}
