use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use ptplan_engine::config::ProviderConfig;
use ptplan_engine::engine::EngineSettings;

/// Current config version. Bump this when adding fields or changing shape.
const CURRENT_VERSION: u32 = 1;

pub const CONFIG_PATH_VARIABLE: &str = "PTPLAN_CONFIG";
pub const BIND_VARIABLE: &str = "PTPLAN_BIND";
pub const DATA_FILE_VARIABLE: &str = "PTPLAN_DATA_FILE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub config_version: u32,
    pub bind_address: String,
    pub data_file: PathBuf,
    pub provider: ProviderConfig,
    pub model_id: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        let engine = EngineSettings::default();
        Self {
            config_version: CURRENT_VERSION,
            bind_address: "127.0.0.1:8000".to_string(),
            data_file: default_data_file(),
            provider: ProviderConfig::default(),
            model_id: engine.model_id,
            max_tokens: engine.max_tokens,
            timeout_secs: engine.timeout.as_secs(),
        }
    }
}

impl PlannerConfig {
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            model_id: self.model_id.clone(),
            max_tokens: self.max_tokens,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// Apply `PTPLAN_BIND` / `PTPLAN_DATA_FILE` style overrides.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(bind) = lookup(BIND_VARIABLE).filter(|v| !v.trim().is_empty()) {
            self.bind_address = bind;
        }
        if let Some(path) = lookup(DATA_FILE_VARIABLE).filter(|v| !v.trim().is_empty()) {
            self.data_file = PathBuf::from(path);
        }
    }
}

fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("ptplan"))
        .unwrap_or_default()
        .join("patients.json")
}

fn config_path() -> eyre::Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_PATH_VARIABLE) {
        return Ok(PathBuf::from(path));
    }
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("ptplan").join("config.json"))
}

/// Load the config from its default location, then apply environment
/// overrides. A missing file yields the defaults.
pub fn load_config() -> eyre::Result<PlannerConfig> {
    let path = config_path()?;
    let mut config = if path.exists() {
        load_config_from(&path)?
    } else {
        tracing::info!(path = %path.display(), "no config file, using defaults");
        PlannerConfig::default()
    };
    config.apply_overrides(|name| env::var(name).ok());
    Ok(config)
}

pub fn load_config_from(path: &Path) -> eyre::Result<PlannerConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> eyre::Result<PlannerConfig> {
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);

    if on_disk_version > u64::from(CURRENT_VERSION) {
        return Err(eyre::eyre!(
            "config_version {on_disk_version} is newer than this build supports \
             ({CURRENT_VERSION}). Please update ptplan."
        ));
    }

    let mut config: PlannerConfig = serde_json::from_value(json)?;
    config.config_version = CURRENT_VERSION;
    Ok(config)
}
