//! Visit history commands: `log` and `display`.

use super::CommandResult;
use crate::error::{ClinicError, ClinicResult};
use crate::index::DisplayIndex;
use crate::store::RecordStore;
use crate::visit::format_visit_date;
use chrono::NaiveDate;

/// Records today as a visit for one patient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogCommand {
    target: DisplayIndex,
}

impl LogCommand {
    pub const COMMAND_WORD: &'static str = "log";
    pub const MESSAGE_USAGE: &'static str = "log: Logs today's date as a visit for the patient \
        identified by the index number used in the displayed patient list.\n\
        Parameters: INDEX (must be a positive integer)\n\
        Example: log 1";

    pub fn new(target: DisplayIndex) -> Self {
        Self { target }
    }

    /// Logs `today` for the targeted patient.
    ///
    /// # Errors
    ///
    /// - [`ClinicError::IndexOutOfRange`] if the index is past the visible list.
    /// - [`ClinicError::DuplicateVisit`] if `today` is already logged; the store is untouched.
    pub fn execute(
        &self,
        store: &mut dyn RecordStore,
        today: NaiveDate,
    ) -> ClinicResult<CommandResult> {
        let target = self.target.resolve(&store.filtered_view())?;

        if target.visits().contains(today) {
            return Err(ClinicError::DuplicateVisit);
        }

        let updated = target.with_visits(target.visits().add(today));
        let feedback = format!(
            "Logged visit on {} for patient: {}",
            format_visit_date(today),
            updated
        );
        store.replace(&target, updated)?;

        Ok(CommandResult::new(feedback))
    }
}

/// Shows the visit history of one patient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayCommand {
    target: DisplayIndex,
}

impl DisplayCommand {
    pub const COMMAND_WORD: &'static str = "display";
    pub const MESSAGE_USAGE: &'static str = "display: Displays the visit dates for the patient \
        identified by the index number used in the displayed patient list.\n\
        Parameters: INDEX (must be a positive integer)\n\
        Example: display 1";

    pub fn new(target: DisplayIndex) -> Self {
        Self { target }
    }

    pub fn execute(&self, store: &dyn RecordStore) -> ClinicResult<CommandResult> {
        let target = self.target.resolve(&store.filtered_view())?;
        let visits = target.visits();

        if visits.is_empty() {
            return Ok(CommandResult::new(format!(
                "No visits recorded for {}",
                target.name()
            )));
        }

        let lines: Vec<String> = visits
            .dates()
            .iter()
            .map(|date| format!("• {}", format_visit_date(*date)))
            .collect();

        Ok(CommandResult::new(format!(
            "Visit dates for {}:\n{}",
            target.name(),
            lines.join("\n")
        )))
    }
}
