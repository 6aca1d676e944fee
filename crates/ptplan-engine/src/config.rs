//! Provider selection and construction.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::anthropic::AnthropicProvider;
use crate::bedrock::{build_aws_config, BedrockProvider};
use crate::credentials::CredentialSource;
use crate::error::CredentialError;
use crate::provider::ModelProvider;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    Anthropic {
        #[serde(default)]
        credentials: CredentialSource,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    },
    Bedrock {
        region: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        profile_name: Option<String>,
    },
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::Anthropic {
            credentials: CredentialSource::default(),
            base_url: None,
        }
    }
}

/// Construct the configured provider. Credentials are resolved here, so a
/// missing key fails at startup rather than on the first request.
pub async fn build_provider(
    config: &ProviderConfig,
    timeout: Duration,
) -> Result<Arc<dyn ModelProvider>, CredentialError> {
    match config {
        ProviderConfig::Anthropic {
            credentials,
            base_url,
        } => {
            let api_key = credentials.resolve()?;
            Ok(Arc::new(AnthropicProvider::new(api_key, base_url.clone(), timeout)))
        }
        ProviderConfig::Bedrock {
            region,
            profile_name,
        } => {
            let sdk_config = build_aws_config(region, profile_name.as_deref()).await;
            Ok(Arc::new(BedrockProvider::new(&sdk_config)))
        }
    }
}
