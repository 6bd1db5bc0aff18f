//! Append-only mission log.

use std::collections::HashSet;

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{MissionAmendment, MissionCalculation, MissionRecord};

/// The list of saved mission rows.
///
/// Records are only ever appended. Amending a record appends a new record
/// that supersedes it; the superseded record stays in the log but is no
/// longer listed as current.
#[derive(Debug, Clone, Default)]
pub struct MissionLog {
    records: Vec<MissionRecord>,
}

impl MissionLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub fn append(&mut self, record: MissionRecord) {
        self.records.push(record);
    }

    /// Appends one record per calculated leg and returns the new records.
    pub fn record_calculation(&mut self, calculation: &MissionCalculation) -> Vec<MissionRecord> {
        let new_records: Vec<MissionRecord> = calculation
            .legs
            .iter()
            .map(|leg| {
                MissionRecord::from_result(&calculation.traveler, &calculation.ta_number, leg)
            })
            .collect();
        self.records.extend(new_records.iter().cloned());
        new_records
    }

    /// Amends a current record by appending a superseding one.
    ///
    /// # Errors
    ///
    /// * [`EngineError::RecordNotFound`] if no record has this id
    /// * [`EngineError::InvalidInput`] if the record was already superseded
    pub fn amend(&mut self, id: Uuid, amendment: &MissionAmendment) -> EngineResult<MissionRecord> {
        let original = self.get(id).ok_or(EngineError::RecordNotFound { id })?;

        if let Some(successor) = self.superseded_by(id) {
            return Err(EngineError::InvalidInput {
                field: "record_id".to_string(),
                message: format!("record {} was superseded by {}", id, successor),
            });
        }

        let amended = original.amended(amendment);
        self.records.push(amended.clone());
        Ok(amended)
    }

    /// Returns the record with this id, current or not.
    pub fn get(&self, id: Uuid) -> Option<&MissionRecord> {
        self.records.iter().find(|r| r.record_id == id)
    }

    fn superseded_by(&self, id: Uuid) -> Option<Uuid> {
        self.records
            .iter()
            .find(|r| r.supersedes == Some(id))
            .map(|r| r.record_id)
    }

    /// Returns the records that have not been superseded, in insertion order.
    pub fn current(&self) -> Vec<&MissionRecord> {
        let superseded: HashSet<Uuid> = self.records.iter().filter_map(|r| r.supersedes).collect();
        self.records
            .iter()
            .filter(|r| !superseded.contains(&r.record_id))
            .collect()
    }

    /// Returns every record ever appended, in insertion order.
    pub fn all(&self) -> &[MissionRecord] {
        &self.records
    }

    /// Returns the number of records ever appended.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
