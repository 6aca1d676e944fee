use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use ptplan_core::models::exercise::RecommendationSet;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub count: u32,
}

/// Generate a fresh recommendation set and store it on the patient,
/// replacing any previous one.
///
/// The directory lock is released while the model call runs. If the patient
/// is deleted or renamed in the meantime the result is discarded.
pub async fn generate_recommendations(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<RecommendationSet>, ApiError> {
    let patient = {
        let patients = state.patients.lock().await;
        patients.get(&name)?.clone()
    };

    let set = state.engine.recommend(&patient, req.count).await?;

    let mut patients = state.patients.lock().await;
    let mut next = patients.clone();
    next.get_mut(&name)?.recommendations = Some(set.clone());
    state.commit(&mut patients, next).await?;

    Ok(Json(set))
}
