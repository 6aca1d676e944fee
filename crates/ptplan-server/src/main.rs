use std::env;
use std::time::Duration;

use eyre::WrapErr;
use tracing_subscriber::EnvFilter;

use ptplan_engine::config::build_provider;
use ptplan_engine::engine::RecommendationEngine;
use ptplan_server::config;
use ptplan_server::state::AppState;
use ptplan_storage::patients::PatientStore;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let config = config::load_config()?;
    let provider = build_provider(&config.provider, Duration::from_secs(config.timeout_secs))
        .await
        .wrap_err("failed to set up the model provider")?;
    let engine = RecommendationEngine::new(provider, config.engine_settings());

    let store = PatientStore::new(&config.data_file);
    let patients = store
        .load_all()
        .await
        .wrap_err("failed to load patient data")?;

    let state = AppState::new(engine, store, patients);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .wrap_err_with(|| format!("failed to bind {}", config.bind_address))?;
    tracing::info!(
        address = %config.bind_address,
        data_file = %config.data_file.display(),
        "ptplan server listening"
    );

    axum::serve(listener, ptplan_server::app(state))
        .await
        .wrap_err("server error")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("PTPLAN_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    // JSON lines for log shippers, human-readable otherwise
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
