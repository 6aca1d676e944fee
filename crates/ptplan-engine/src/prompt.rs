//! Prompt construction for exercise generation.
//!
//! The system instruction fixes persona, exercise count and output shape.
//! The user message carries the patient's intake fields inside a
//! `<patient_data>` block.
//!
//! Patient free text (medical history, goals, ...) is inserted verbatim. A
//! field can contain text that reads as instructions to the model. This is
//! an accepted trust boundary: the output is only trusted structurally, and
//! nothing here attempts to neutralize such text.

use ptplan_core::models::patient::PatientRecord;

const PERSONA: &str = "\
You are an expert physical therapy assistant specialized in creating \
evidence-based exercise recommendations. Your role is to analyze patient data \
and suggest appropriate exercises based on their condition. Your \
recommendations must be formatted as structured data for easy integration into \
a PT planning system.

Each exercise recommendation must be evidence-based and include:
1. Clear name and brief description
2. Specific parameters (sets/reps/frequency)
3. Clear progression criteria
4. Scientific rationale";

const OUTPUT_SHAPE: &str = r#"{
  "exercises": [
    {
      "id": "string",
      "name": "string",
      "description": "string",
      "parameters": "string",
      "progressionCriteria": "string",
      "rationale": "string"
    }
  ],
  "notes": "string"
}"#;

/// The two parts sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Render the prompt for `count` exercises. Same inputs, same output.
pub fn build_prompt(patient: &PatientRecord, count: u32) -> Prompt {
    let mut system = String::from(PERSONA);
    system.push_str(&format!("\n\nGenerate exactly {count} exercises.\n\n"));
    system.push_str("Respond with a single JSON object in exactly this structure:\n");
    system.push_str(OUTPUT_SHAPE);
    system.push_str(
        "\n\nOutput only the JSON object. Do not include any text, explanations, \
         disclaimers or markdown before or after it.",
    );

    Prompt {
        system,
        user: patient_block(patient),
    }
}

fn patient_block(patient: &PatientRecord) -> String {
    format!(
        "Generate a set of targeted exercises for this patient:\n\
         \n\
         <patient_data>\n\
         Age: {}\n\
         Injury Location: {}\n\
         Pain Level: {}/10\n\
         Mobility Status: {}\n\
         Medical History: {}\n\
         Activity Level: {}\n\
         Goals: {}\n\
         </patient_data>",
        patient.age,
        patient.injury_location,
        patient.pain_level,
        patient.mobility_status,
        patient.medical_history,
        patient.activity_level,
        patient.goals,
    )
}
