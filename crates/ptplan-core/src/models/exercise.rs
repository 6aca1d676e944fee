use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// One recommended PT activity.
///
/// Field names follow the JSON the model is asked to emit, so the same type
/// serves as the wire format, the stored format and the validated output.
///
/// Absent fields read as empty, so older documents holding raw model output
/// still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct Exercise {
    /// Model-assigned id. Unique within one recommendation set at best.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Free-text sets/reps/frequency.
    pub parameters: String,
    pub progression_criteria: String,
    pub rationale: String,
}

/// The full output of one generation: exercises plus free-text notes.
///
/// A new set replaces the previous one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct RecommendationSet {
    pub exercises: Vec<Exercise>,
    pub notes: String,
}

/// An exercise copied by value into a weekday slot.
///
/// `assignment_id` is generated when the exercise is scheduled; the model's
/// `id` is carried along but never used as schedule identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExerciseAssignment {
    #[serde(default = "Uuid::new_v4")]
    pub assignment_id: Uuid,
    #[serde(flatten)]
    pub exercise: Exercise,
}

impl ExerciseAssignment {
    pub fn new(exercise: Exercise) -> Self {
        Self {
            assignment_id: Uuid::new_v4(),
            exercise,
        }
    }
}
