//! In-memory record store.
//!
//! The store keeps every patient in insertion order plus a filter that decides which of them
//! are currently visible. Commands address records by their position in the visible list, so
//! everything index-based goes through [`RecordStore::filtered_view`].
//!
//! Records are held as `Arc<PatientRecord>`. Replacing or removing a record is done by
//! pointer identity, so a command that resolved a record from the view replaces exactly that
//! record even if another record happens to compare equal.

use crate::error::{ClinicError, ClinicResult};
use crate::patient::PatientRecord;
use crate::predicates::{RecordPredicate, ShowAll};
use std::sync::Arc;

/// Operations commands need from the patient list.
pub trait RecordStore {
    /// Visible records, in store order.
    fn filtered_view(&self) -> Vec<Arc<PatientRecord>>;

    /// Every record, in store order, regardless of the active filter.
    fn records(&self) -> &[Arc<PatientRecord>];

    /// Replaces the visible subset with all records matching `predicate`.
    fn apply_filter(&mut self, predicate: Box<dyn RecordPredicate>);

    /// True if a record for the same patient exists.
    fn has_patient(&self, record: &PatientRecord) -> bool;

    /// Appends a new record.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::DuplicatePatient`] if the same patient already exists.
    fn add(&mut self, record: PatientRecord) -> ClinicResult<()>;

    /// Swaps `old` for `new`, keeping its position.
    ///
    /// # Errors
    ///
    /// - [`ClinicError::PatientNotFound`] if `old` is not in the store.
    /// - [`ClinicError::DuplicatePatient`] if `new` is the same patient as some other record.
    fn replace(&mut self, old: &Arc<PatientRecord>, new: PatientRecord) -> ClinicResult<()>;

    /// Removes `record` from the store.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::PatientNotFound`] if `record` is not in the store.
    fn remove(&mut self, record: &Arc<PatientRecord>) -> ClinicResult<()>;

    /// Removes every record.
    fn clear(&mut self);
}

/// Vector-backed [`RecordStore`].
#[derive(Debug)]
pub struct PatientBook {
    records: Vec<Arc<PatientRecord>>,
    filter: Box<dyn RecordPredicate>,
}

impl Default for PatientBook {
    fn default() -> Self {
        Self::new()
    }
}

impl PatientBook {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            filter: Box::new(ShowAll),
        }
    }

    /// Builds a book from loaded records, rejecting duplicate patients.
    pub fn from_records(records: impl IntoIterator<Item = PatientRecord>) -> ClinicResult<Self> {
        let mut book = Self::new();
        for record in records {
            book.add(record)?;
        }
        Ok(book)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position_of(&self, record: &Arc<PatientRecord>) -> ClinicResult<usize> {
        self.records
            .iter()
            .position(|r| Arc::ptr_eq(r, record))
            .ok_or(ClinicError::PatientNotFound)
    }
}

impl RecordStore for PatientBook {
    fn filtered_view(&self) -> Vec<Arc<PatientRecord>> {
        self.records
            .iter()
            .filter(|r| self.filter.test(r))
            .cloned()
            .collect()
    }

    fn records(&self) -> &[Arc<PatientRecord>] {
        &self.records
    }

    fn apply_filter(&mut self, predicate: Box<dyn RecordPredicate>) {
        tracing::debug!(?predicate, "applying record filter");
        self.filter = predicate;
    }

    fn has_patient(&self, record: &PatientRecord) -> bool {
        self.records.iter().any(|r| r.is_same_patient(record))
    }

    fn add(&mut self, record: PatientRecord) -> ClinicResult<()> {
        if self.has_patient(&record) {
            return Err(ClinicError::DuplicatePatient);
        }
        self.records.push(Arc::new(record));
        Ok(())
    }

    fn replace(&mut self, old: &Arc<PatientRecord>, new: PatientRecord) -> ClinicResult<()> {
        let pos = self.position_of(old)?;
        let clashes = self
            .records
            .iter()
            .enumerate()
            .any(|(i, r)| i != pos && r.is_same_patient(&new));
        if clashes {
            return Err(ClinicError::DuplicatePatient);
        }
        self.records[pos] = Arc::new(new);
        Ok(())
    }

    fn remove(&mut self, record: &Arc<PatientRecord>) -> ClinicResult<()> {
        let pos = self.position_of(record)?;
        self.records.remove(pos);
        Ok(())
    }

    fn clear(&mut self) {
        self.records.clear();
    }
}
