//! The in-memory patient directory: every patient record keyed by name.
//!
//! This is the value the patient store loads and saves as a whole. Renames
//! are delete + reinsert under the new key.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::models::patient::{validate_name, PatientIntake, PatientRecord, PatientUpdate};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PatientDirectory(BTreeMap<String, PatientRecord>);

impl<'de> Deserialize<'de> for PatientDirectory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut patients = BTreeMap::<String, PatientRecord>::deserialize(deserializer)?;
        // The key is authoritative; older documents carry no name field at all.
        for (name, record) in patients.iter_mut() {
            record.name.clone_from(name);
        }
        Ok(Self(patients))
    }
}

impl PatientDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PatientRecord)> {
        self.0.iter().map(|(name, record)| (name.as_str(), record))
    }

    pub fn get(&self, name: &str) -> Result<&PatientRecord, CoreError> {
        self.0
            .get(name)
            .ok_or_else(|| CoreError::PatientNotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut PatientRecord, CoreError> {
        self.0
            .get_mut(name)
            .ok_or_else(|| CoreError::PatientNotFound(name.to_string()))
    }

    /// Insert a new patient from intake data. Fails if the name is taken.
    pub fn create(&mut self, intake: PatientIntake) -> Result<&PatientRecord, CoreError> {
        let record = PatientRecord::from_intake(intake)?;
        if self.0.contains_key(&record.name) {
            return Err(CoreError::PatientExists(record.name));
        }
        let name = record.name.clone();
        Ok(self.0.entry(name).or_insert(record))
    }

    /// Apply a partial update, renaming when `new_name` differs.
    ///
    /// Either the whole update applies or nothing changes.
    pub fn update(
        &mut self,
        name: &str,
        update: &PatientUpdate,
    ) -> Result<&PatientRecord, CoreError> {
        let mut record = self.get(name)?.clone();
        record.apply(update)?;

        let target = match update.new_name.as_deref() {
            Some(new_name) if new_name != name => {
                validate_name(new_name)?;
                if self.0.contains_key(new_name) {
                    return Err(CoreError::PatientExists(new_name.to_string()));
                }
                self.0.remove(name);
                new_name.to_string()
            }
            _ => name.to_string(),
        };

        record.name.clone_from(&target);
        self.0.insert(target.clone(), record);
        self.get(&target)
    }

    pub fn remove(&mut self, name: &str) -> Result<PatientRecord, CoreError> {
        self.0
            .remove(name)
            .ok_or_else(|| CoreError::PatientNotFound(name.to_string()))
    }
}
