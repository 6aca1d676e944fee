//! Cross-patient weekly roster for the therapist's overview.

use std::collections::BTreeMap;

use serde::Serialize;
use ts_rs::TS;

use crate::directory::PatientDirectory;
use crate::models::schedule::Weekday;

/// Weekday -> `"patientName: exerciseName"` entries, every day present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Roster(BTreeMap<Weekday, Vec<String>>);

impl Roster {
    pub fn day(&self, day: Weekday) -> &[String] {
        self.0.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[String])> {
        self.0.iter().map(|(day, entries)| (*day, entries.as_slice()))
    }
}

/// Collect every patient's schedule into one roster.
///
/// Patients are visited in name order, and each patient's entries keep
/// their order within the day.
pub fn aggregate(patients: &PatientDirectory) -> Roster {
    let mut days: BTreeMap<Weekday, Vec<String>> =
        Weekday::ALL.into_iter().map(|d| (d, Vec::new())).collect();

    for (patient_name, record) in patients.iter() {
        for (day, assignments) in record.weekly_schedule.iter() {
            let entries = days.entry(day).or_default();
            for assignment in assignments {
                entries.push(format!("{patient_name}: {}", assignment.exercise.name));
            }
        }
    }

    Roster(days)
}
