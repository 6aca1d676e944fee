use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::exercise::RecommendationSet;
use super::schedule::WeeklySchedule;
use crate::error::CoreError;

pub const MAX_PAIN_LEVEL: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Light,
    Moderate,
    Active,
    #[serde(rename = "Very Active", alias = "VeryActive")]
    VeryActive,
}

impl ActivityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::Light => "Light",
            ActivityLevel::Moderate => "Moderate",
            ActivityLevel::Active => "Active",
            ActivityLevel::VeryActive => "Very Active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields collected by the intake form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientIntake {
    pub name: String,
    pub age: u32,
    pub injury_location: String,
    pub pain_level: u8,
    pub mobility_status: String,
    pub medical_history: String,
    pub activity_level: ActivityLevel,
    pub goals: String,
}

/// A stored patient: intake fields, the weekly schedule and the most recent
/// recommendation set.
///
/// `name` is the identity. In the patient document it is also the map key,
/// and the key wins on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientRecord {
    #[serde(default)]
    pub name: String,
    pub age: u32,
    pub injury_location: String,
    pub pain_level: u8,
    pub mobility_status: String,
    pub medical_history: String,
    pub activity_level: ActivityLevel,
    pub goals: String,
    #[serde(default)]
    pub weekly_schedule: WeeklySchedule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub recommendations: Option<RecommendationSet>,
}

impl PatientRecord {
    /// New record with an empty week and no recommendations.
    pub fn from_intake(intake: PatientIntake) -> Result<Self, CoreError> {
        let record = Self {
            name: intake.name,
            age: intake.age,
            injury_location: intake.injury_location,
            pain_level: intake.pain_level,
            mobility_status: intake.mobility_status,
            medical_history: intake.medical_history,
            activity_level: intake.activity_level,
            goals: intake.goals,
            weekly_schedule: WeeklySchedule::empty(),
            recommendations: None,
        };
        record.validate()?;
        Ok(record)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        validate_name(&self.name)?;
        validate_pain_level(self.pain_level)
    }

    /// Overwrite intake fields present in `update`. Renaming is handled by
    /// the directory, not here.
    pub fn apply(&mut self, update: &PatientUpdate) -> Result<(), CoreError> {
        if let Some(pain_level) = update.pain_level {
            validate_pain_level(pain_level)?;
            self.pain_level = pain_level;
        }
        if let Some(age) = update.age {
            self.age = age;
        }
        if let Some(v) = &update.injury_location {
            self.injury_location = v.clone();
        }
        if let Some(v) = &update.mobility_status {
            self.mobility_status = v.clone();
        }
        if let Some(v) = &update.medical_history {
            self.medical_history = v.clone();
        }
        if let Some(v) = update.activity_level {
            self.activity_level = v;
        }
        if let Some(v) = &update.goals {
            self.goals = v.clone();
        }
        Ok(())
    }
}

/// Partial edit of a patient. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PatientUpdate {
    #[ts(optional)]
    pub new_name: Option<String>,
    #[ts(optional)]
    pub age: Option<u32>,
    #[ts(optional)]
    pub injury_location: Option<String>,
    #[ts(optional)]
    pub pain_level: Option<u8>,
    #[ts(optional)]
    pub mobility_status: Option<String>,
    #[ts(optional)]
    pub medical_history: Option<String>,
    #[ts(optional)]
    pub activity_level: Option<ActivityLevel>,
    #[ts(optional)]
    pub goals: Option<String>,
}

pub(crate) fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::InvalidField {
            field: "name",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

fn validate_pain_level(pain_level: u8) -> Result<(), CoreError> {
    if pain_level > MAX_PAIN_LEVEL {
        return Err(CoreError::InvalidField {
            field: "pain_level",
            reason: format!("{pain_level} is outside 0..={MAX_PAIN_LEVEL}"),
        });
    }
    Ok(())
}
