use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use ptplan_core::models::patient::{PatientIntake, PatientRecord, PatientUpdate};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_patients(State(state): State<AppState>) -> Json<Vec<String>> {
    let patients = state.patients.lock().await;
    Json(patients.names())
}

pub async fn get_patient(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PatientRecord>, ApiError> {
    let patients = state.patients.lock().await;
    Ok(Json(patients.get(&name)?.clone()))
}

pub async fn create_patient(
    State(state): State<AppState>,
    Json(intake): Json<PatientIntake>,
) -> Result<(StatusCode, Json<PatientRecord>), ApiError> {
    let mut patients = state.patients.lock().await;
    let mut next = patients.clone();
    let record = next.create(intake)?.clone();
    state.commit(&mut patients, next).await?;
    tracing::info!(patient = %record.name, "patient created");
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_patient(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(update): Json<PatientUpdate>,
) -> Result<Json<PatientRecord>, ApiError> {
    let mut patients = state.patients.lock().await;
    let mut next = patients.clone();
    let record = next.update(&name, &update)?.clone();
    state.commit(&mut patients, next).await?;
    if record.name != name {
        tracing::info!(from = %name, to = %record.name, "patient renamed");
    }
    Ok(Json(record))
}

pub async fn delete_patient(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut patients = state.patients.lock().await;
    let mut next = patients.clone();
    next.remove(&name)?;
    state.commit(&mut patients, next).await?;
    tracing::info!(patient = %name, "patient deleted");
    Ok(StatusCode::NO_CONTENT)
}
