use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;

use ptplan_export::plan::plan_filename;
use ptplan_export::render::render_treatment_plan;

use crate::error::ApiError;
use crate::state::AppState;

/// Download the patient's treatment plan as a text attachment.
pub async fn export_plan(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let record = {
        let patients = state.patients.lock().await;
        patients.get(&name)?.clone()
    };

    let now = jiff::Timestamp::now();
    let body = render_treatment_plan(&record, now)?;
    let disposition = format!("attachment; filename=\"{}\"", plan_filename(now));

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
