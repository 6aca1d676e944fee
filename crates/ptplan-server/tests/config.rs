use std::time::Duration;

use ptplan_engine::config::ProviderConfig;
use ptplan_server::config::{load_config_from, parse_config, PlannerConfig};

#[test]
fn defaults_use_anthropic_on_localhost() {
    let config = PlannerConfig::default();
    assert_eq!(config.bind_address, "127.0.0.1:8000");
    assert!(config.data_file.ends_with("patients.json"));
    assert!(matches!(config.provider, ProviderConfig::Anthropic { .. }));

    let settings = config.engine_settings();
    assert_eq!(settings.model_id, "claude-3-5-sonnet-20241022");
    assert_eq!(settings.max_tokens, 4096);
    assert_eq!(settings.timeout, Duration::from_secs(60));
}

#[test]
fn partial_file_fills_in_defaults() {
    let config = parse_config(
        r#"{
            "data_file": "/srv/ptplan/patients.json",
            "provider": { "type": "bedrock", "region": "us-west-2" },
            "timeout_secs": 30
        }"#,
    )
    .unwrap();

    assert_eq!(config.data_file.to_str(), Some("/srv/ptplan/patients.json"));
    assert_eq!(
        config.provider,
        ProviderConfig::Bedrock {
            region: "us-west-2".to_string(),
            profile_name: None,
        }
    );
    assert_eq!(config.engine_settings().timeout, Duration::from_secs(30));
    assert_eq!(config.max_tokens, 4096);
    assert_eq!(config.bind_address, "127.0.0.1:8000");
}

#[test]
fn newer_config_version_is_rejected() {
    let err = parse_config(r#"{ "config_version": 99 }"#).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn environment_overrides_win() {
    let mut config = parse_config(r#"{ "bind_address": "0.0.0.0:9000" }"#).unwrap();
    config.apply_overrides(|name| match name {
        "PTPLAN_BIND" => Some("127.0.0.1:9100".to_string()),
        "PTPLAN_DATA_FILE" => Some("/tmp/other.json".to_string()),
        _ => None,
    });

    assert_eq!(config.bind_address, "127.0.0.1:9100");
    assert_eq!(config.data_file.to_str(), Some("/tmp/other.json"));
}

#[test]
fn blank_overrides_are_ignored() {
    let mut config = PlannerConfig::default();
    let before = config.clone();
    config.apply_overrides(|_| Some("  ".to_string()));
    assert_eq!(config, before);
}

#[test]
fn config_file_is_read_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "config_version": 1, "model_id": "claude-3-haiku-20240307" }"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.model_id, "claude-3-haiku-20240307");

    let missing = load_config_from(&dir.path().join("absent.json")).unwrap_err();
    assert!(missing.to_string().contains("failed to read config"));
}
