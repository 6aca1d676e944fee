use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use ptplan_core::models::exercise::{Exercise, ExerciseAssignment};
use ptplan_core::models::schedule::{Weekday, WeeklySchedule};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub to: String,
}

pub async fn get_schedule(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<WeeklySchedule>, ApiError> {
    let patients = state.patients.lock().await;
    Ok(Json(patients.get(&name)?.weekly_schedule.clone()))
}

/// Schedule a copy of the posted exercise at the end of `day`.
pub async fn assign_exercise(
    State(state): State<AppState>,
    Path((name, day)): Path<(String, String)>,
    Json(exercise): Json<Exercise>,
) -> Result<(StatusCode, Json<ExerciseAssignment>), ApiError> {
    let day: Weekday = day.parse()?;

    let mut patients = state.patients.lock().await;
    let mut next = patients.clone();
    let assignment = next
        .get_mut(&name)?
        .weekly_schedule
        .assign(day, exercise)
        .clone();
    state.commit(&mut patients, next).await?;

    Ok((StatusCode::CREATED, Json(assignment)))
}

pub async fn remove_exercise(
    State(state): State<AppState>,
    Path((name, day, index)): Path<(String, String, usize)>,
) -> Result<Json<ExerciseAssignment>, ApiError> {
    let day: Weekday = day.parse()?;

    let mut patients = state.patients.lock().await;
    let mut next = patients.clone();
    let removed = next.get_mut(&name)?.weekly_schedule.remove(day, index)?;
    state.commit(&mut patients, next).await?;

    Ok(Json(removed))
}

pub async fn move_exercise(
    State(state): State<AppState>,
    Path((name, day, index)): Path<(String, String, usize)>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<WeeklySchedule>, ApiError> {
    let from: Weekday = day.parse()?;
    let to: Weekday = req.to.parse()?;

    let mut patients = state.patients.lock().await;
    let mut next = patients.clone();
    let schedule = &mut next.get_mut(&name)?.weekly_schedule;
    schedule.move_assignment(from, index, to)?;
    let schedule = schedule.clone();
    state.commit(&mut patients, next).await?;

    Ok(Json(schedule))
}
