use serde::Serialize;

use ptplan_core::models::exercise::Exercise;
use ptplan_core::models::patient::PatientRecord;

/// Template context for a treatment plan. Every field is addressable by name
/// in a Tera template.
#[derive(Debug, Clone, Serialize)]
pub struct PlanView {
    pub name: String,
    pub age: u32,
    pub injury_location: String,
    pub pain_level: u8,
    pub mobility_status: String,
    pub medical_history: String,
    pub activity_level: String,
    pub goals: String,
    pub notes: String,
    pub generated_at: String,
    pub days: Vec<DayView>,
}

/// One weekday of the plan, in Monday..Sunday order.
#[derive(Debug, Clone, Serialize)]
pub struct DayView {
    pub day: String,
    pub exercises: Vec<Exercise>,
}

impl PlanView {
    pub fn from_record(record: &PatientRecord, generated_at: jiff::Timestamp) -> Self {
        let days = record
            .weekly_schedule
            .iter()
            .map(|(day, assignments)| DayView {
                day: day.to_string(),
                exercises: assignments.iter().map(|a| a.exercise.clone()).collect(),
            })
            .collect();

        Self {
            name: record.name.clone(),
            age: record.age,
            injury_location: record.injury_location.clone(),
            pain_level: record.pain_level,
            mobility_status: record.mobility_status.clone(),
            medical_history: record.medical_history.clone(),
            activity_level: record.activity_level.to_string(),
            goals: record.goals.clone(),
            notes: record
                .recommendations
                .as_ref()
                .map(|r| r.notes.clone())
                .unwrap_or_default(),
            generated_at: generated_at.to_string(),
            days,
        }
    }
}

/// `treatment_plan_YYYYMMDD_HHMMSS.txt`, in UTC.
pub fn plan_filename(generated_at: jiff::Timestamp) -> String {
    format!("treatment_plan_{}.txt", generated_at.strftime("%Y%m%d_%H%M%S"))
}
