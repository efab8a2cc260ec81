//! Commands that change which patients are visible.

use super::{patients_listed, CommandResult};
use crate::error::ClinicResult;
use crate::predicates::{
    DoctorContainsKeywords, MedicineContainsKeywords, NameContainsKeywords, RecordPredicate,
    ShowAll,
};
use crate::store::RecordStore;

fn filter_and_count(
    store: &mut dyn RecordStore,
    predicate: Box<dyn RecordPredicate>,
) -> CommandResult {
    store.apply_filter(predicate);
    CommandResult::new(patients_listed(store.filtered_view().len()))
}

/// Shows every patient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListCommand;

impl ListCommand {
    pub const COMMAND_WORD: &'static str = "list";
    pub const MESSAGE_USAGE: &'static str = "list: Lists all patients.\nExample: list";
    pub const MESSAGE_SUCCESS: &'static str = "Listed all patients";

    pub fn execute(&self, store: &mut dyn RecordStore) -> ClinicResult<CommandResult> {
        store.apply_filter(Box::new(ShowAll));
        Ok(CommandResult::new(Self::MESSAGE_SUCCESS))
    }
}

/// Shows patients whose name contains any of the keywords.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FindCommand {
    predicate: NameContainsKeywords,
}

impl FindCommand {
    pub const COMMAND_WORD: &'static str = "find";
    pub const MESSAGE_USAGE: &'static str = "find: Finds all patients whose names contain any of \
        the specified keywords (case-insensitive) and displays them as a list with index numbers.\n\
        Parameters: KEYWORD [MORE_KEYWORDS]...\n\
        Example: find alice bob charlie";

    pub fn new(predicate: NameContainsKeywords) -> Self {
        Self { predicate }
    }

    pub fn execute(&self, store: &mut dyn RecordStore) -> ClinicResult<CommandResult> {
        tracing::debug!(keywords = ?self.predicate.keywords(), "find by name");
        Ok(filter_and_count(store, Box::new(self.predicate.clone())))
    }
}

/// Shows patients assigned to a doctor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterCommand {
    predicate: DoctorContainsKeywords,
}

impl FilterCommand {
    pub const COMMAND_WORD: &'static str = "filter";
    pub const MESSAGE_USAGE: &'static str = "filter: Filters patients by doctor.\n\
        Parameters: d/DOCTOR\n\
        Example: filter d/Alex Williams";

    pub fn new(predicate: DoctorContainsKeywords) -> Self {
        Self { predicate }
    }

    pub fn execute(&self, store: &mut dyn RecordStore) -> ClinicResult<CommandResult> {
        tracing::debug!(keywords = ?self.predicate.keywords(), "filter by doctor");
        Ok(filter_and_count(store, Box::new(self.predicate.clone())))
    }
}

/// Shows patients by prescribed medicine, or patients on no medication.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FindMedicineCommand {
    predicate: MedicineContainsKeywords,
}

impl FindMedicineCommand {
    pub const COMMAND_WORD: &'static str = "findmed";
    pub const MESSAGE_USAGE: &'static str = "findmed: Finds all patients whose medicines contain \
        any of the specified keywords (case-insensitive) and displays them as a list with index \
        numbers. Use 'none' to find patients with no medicines.\n\
        Parameters: KEYWORD [MORE_KEYWORDS]... | none\n\
        Example: findmed paracetamol ibuprofen";

    pub fn new(predicate: MedicineContainsKeywords) -> Self {
        Self { predicate }
    }

    pub fn execute(&self, store: &mut dyn RecordStore) -> ClinicResult<CommandResult> {
        tracing::debug!(keywords = ?self.predicate.keywords(), "find by medicine");
        Ok(filter_and_count(store, Box::new(self.predicate.clone())))
    }
}
