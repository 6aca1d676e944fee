//! HTTP front end for the planner: patient records, exercise generation,
//! weekly scheduling and plan export.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware as axum_mw;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/patients",
            get(routes::patients::list_patients).post(routes::patients::create_patient),
        )
        .route(
            "/patients/{name}",
            get(routes::patients::get_patient)
                .put(routes::patients::update_patient)
                .delete(routes::patients::delete_patient),
        )
        .route(
            "/patients/{name}/recommendations",
            post(routes::recommendations::generate_recommendations),
        )
        .route(
            "/patients/{name}/schedule",
            get(routes::schedule::get_schedule),
        )
        .route(
            "/patients/{name}/schedule/{day}",
            post(routes::schedule::assign_exercise),
        )
        .route(
            "/patients/{name}/schedule/{day}/{index}",
            delete(routes::schedule::remove_exercise),
        )
        .route(
            "/patients/{name}/schedule/{day}/{index}/move",
            post(routes::schedule::move_exercise),
        )
        .route("/patients/{name}/export", get(routes::export::export_plan))
        .route("/schedule", get(routes::roster::get_roster))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
