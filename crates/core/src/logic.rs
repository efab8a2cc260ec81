//! Command dispatch for one clinic session.
//!
//! [`LogicManager`] owns the in-memory book, the storage it was loaded from, and the clock used
//! for visit logging. Each input line is parsed, executed, and, if the command changed the
//! records, written back to disk before the result is returned.

use crate::clock::Clock;
use crate::commands::CommandResult;
use crate::config::CoreConfig;
use crate::error::ClinicResult;
use crate::parser::parse_command;
use crate::patient::PatientRecord;
use crate::storage::JsonStorage;
use crate::store::{PatientBook, RecordStore};
use std::sync::Arc;

pub struct LogicManager {
    book: PatientBook,
    storage: JsonStorage,
    clock: Box<dyn Clock>,
}

impl LogicManager {
    /// Opens the data file named by `cfg`. A missing file starts an empty book.
    ///
    /// # Errors
    ///
    /// Any load error from [`JsonStorage::load`]; a corrupt file is never replaced silently.
    pub fn new(cfg: &CoreConfig, clock: Box<dyn Clock>) -> ClinicResult<Self> {
        let storage = JsonStorage::new(cfg.data_file());
        let book = storage.load()?.unwrap_or_default();
        Ok(Self {
            book,
            storage,
            clock,
        })
    }

    /// Parses and runs one line of user input.
    ///
    /// # Errors
    ///
    /// Parse and execution errors are returned unchanged. A failed save after a successful
    /// mutation is returned as the storage error; the in-memory change is kept.
    pub fn execute(&mut self, line: &str) -> ClinicResult<CommandResult> {
        let command = parse_command(line)?;
        tracing::debug!(?command, "executing command");

        let result = command.execute(&mut self.book, self.clock.as_ref())?;

        if command.is_mutating() {
            self.storage.save(&self.book)?;
        }
        Ok(result)
    }

    pub fn book(&self) -> &PatientBook {
        &self.book
    }

    /// Patients currently visible, in display order.
    pub fn filtered_view(&self) -> Vec<Arc<PatientRecord>> {
        self.book.filtered_view()
    }

    pub fn storage(&self) -> &JsonStorage {
        &self.storage
    }
}
