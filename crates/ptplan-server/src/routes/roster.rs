use axum::extract::State;
use axum::Json;

use ptplan_core::roster::{self, Roster};

use crate::state::AppState;

/// Every patient's scheduled exercises grouped by weekday.
pub async fn get_roster(State(state): State<AppState>) -> Json<Roster> {
    let patients = state.patients.lock().await;
    Json(roster::aggregate(&patients))
}
