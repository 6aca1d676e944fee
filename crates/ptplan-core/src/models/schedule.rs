use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use super::exercise::{Exercise, ExerciseAssignment};
use crate::error::CoreError;

/// Canonical weekdays. Declaration order is the display and storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = CoreError;

    /// Case-insensitive English day name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Weekday::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::InvalidDay(s.to_string()))
    }
}

/// Seven-day assignment structure for one patient.
///
/// All seven days are always present, even when empty. Documents missing
/// some days are completed on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WeeklySchedule(
    #[serde(deserialize_with = "deserialize_complete_week")]
    BTreeMap<Weekday, Vec<ExerciseAssignment>>,
);

fn deserialize_complete_week<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<Weekday, Vec<ExerciseAssignment>>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut days = BTreeMap::<Weekday, Vec<ExerciseAssignment>>::deserialize(deserializer)?;
    for day in Weekday::ALL {
        days.entry(day).or_default();
    }
    Ok(days)
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self::empty()
    }
}

impl WeeklySchedule {
    /// Seven canonical days, each empty.
    pub fn empty() -> Self {
        Self(Weekday::ALL.into_iter().map(|d| (d, Vec::new())).collect())
    }

    pub fn day(&self, day: Weekday) -> &[ExerciseAssignment] {
        self.0.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days in Monday..Sunday order with their assignments.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[ExerciseAssignment])> {
        self.0.iter().map(|(day, list)| (*day, list.as_slice()))
    }

    /// Total number of scheduled exercises across the week.
    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a copy of `exercise` to `day`. No dedup: the same exercise may
    /// appear several times on one day.
    pub fn assign(&mut self, day: Weekday, exercise: Exercise) -> &ExerciseAssignment {
        let slot = self.0.entry(day).or_default();
        slot.push(ExerciseAssignment::new(exercise));
        &slot[slot.len() - 1]
    }

    /// Remove the assignment at `index` on `day`.
    pub fn remove(&mut self, day: Weekday, index: usize) -> Result<ExerciseAssignment, CoreError> {
        let slot = self.0.entry(day).or_default();
        if index >= slot.len() {
            return Err(CoreError::IndexOutOfRange {
                day,
                index,
                len: slot.len(),
            });
        }
        Ok(slot.remove(index))
    }

    /// Move an assignment to the end of another day, keeping its assignment id.
    pub fn move_assignment(
        &mut self,
        from: Weekday,
        index: usize,
        to: Weekday,
    ) -> Result<(), CoreError> {
        let assignment = self.remove(from, index)?;
        self.0.entry(to).or_default().push(assignment);
        Ok(())
    }
}
