//! Commands that create, change, or remove patient records.

use super::CommandResult;
use crate::error::{ClinicError, ClinicResult};
use crate::index::DisplayIndex;
use crate::patient::PatientRecord;
use crate::predicates::ShowAll;
use crate::store::RecordStore;
use clinic_types::{Address, Doctor, Email, Medicine, Name, Phone, Tag};
use std::collections::BTreeSet;

/// Adds a new patient with an empty visit history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddCommand {
    record: PatientRecord,
}

impl AddCommand {
    pub const COMMAND_WORD: &'static str = "add";
    pub const MESSAGE_USAGE: &'static str = "add: Adds a patient to the clinic records.\n\
        Parameters: n/NAME p/PHONE e/EMAIL a/ADDRESS [d/DOCTOR] [t/TAG]... [m/MEDICINE]...\n\
        Example: add n/John Doe p/98765432 e/johnd@example.com a/311, Clementi Ave 2, #02-25 \
        d/Dr Alex Williams t/diabetic m/Metformin";

    pub fn new(record: PatientRecord) -> Self {
        Self { record }
    }

    pub fn execute(&self, store: &mut dyn RecordStore) -> ClinicResult<CommandResult> {
        store.add(self.record.clone())?;
        Ok(CommandResult::new(format!(
            "New patient added: {}",
            self.record
        )))
    }
}

/// Fields to overwrite on an existing patient. `None` leaves a field unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditPatientDescriptor {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub address: Option<Address>,
    pub doctor: Option<Doctor>,
    pub tags: Option<BTreeSet<Tag>>,
    pub medicines: Option<BTreeSet<Medicine>>,
}

impl EditPatientDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.phone.is_some()
            || self.email.is_some()
            || self.address.is_some()
            || self.doctor.is_some()
            || self.tags.is_some()
            || self.medicines.is_some()
    }

    /// Builds the edited copy of `record`. The visit history is carried over unchanged.
    pub fn apply(&self, record: &PatientRecord) -> PatientRecord {
        PatientRecord::new(
            self.name.clone().unwrap_or_else(|| record.name().clone()),
            self.phone.clone().unwrap_or_else(|| record.phone().clone()),
            self.email.clone().unwrap_or_else(|| record.email().clone()),
            self.address
                .clone()
                .unwrap_or_else(|| record.address().clone()),
            self.doctor.clone().unwrap_or_else(|| record.doctor().clone()),
            self.tags.clone().unwrap_or_else(|| record.tags().clone()),
            self.medicines
                .clone()
                .unwrap_or_else(|| record.medicines().clone()),
        )
        .with_visits(record.visits().clone())
    }
}

/// Edits the details of one patient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditCommand {
    target: DisplayIndex,
    descriptor: EditPatientDescriptor,
}

impl EditCommand {
    pub const COMMAND_WORD: &'static str = "edit";
    pub const MESSAGE_USAGE: &'static str = "edit: Edits the details of the patient identified \
        by the index number used in the displayed patient list. Existing values will be \
        overwritten by the input values; an empty t/ or m/ clears the tags or medicines.\n\
        Parameters: INDEX (must be a positive integer) [n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] \
        [d/DOCTOR] [t/TAG]... [m/MEDICINE]...\n\
        Example: edit 1 p/91234567 e/johndoe@example.com";

    pub fn new(target: DisplayIndex, descriptor: EditPatientDescriptor) -> Self {
        Self { target, descriptor }
    }

    pub fn execute(&self, store: &mut dyn RecordStore) -> ClinicResult<CommandResult> {
        if !self.descriptor.is_any_field_edited() {
            return Err(ClinicError::NoFieldsToEdit);
        }

        let target = self.target.resolve(&store.filtered_view())?;
        let edited = self.descriptor.apply(&target);
        let feedback = format!("Edited patient: {edited}");

        store.replace(&target, edited)?;
        store.apply_filter(Box::new(ShowAll));
        Ok(CommandResult::new(feedback))
    }
}

/// Removes one patient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteCommand {
    target: DisplayIndex,
}

impl DeleteCommand {
    pub const COMMAND_WORD: &'static str = "delete";
    pub const MESSAGE_USAGE: &'static str = "delete: Deletes the patient identified by the index \
        number used in the displayed patient list.\n\
        Parameters: INDEX (must be a positive integer)\n\
        Example: delete 1";

    pub fn new(target: DisplayIndex) -> Self {
        Self { target }
    }

    pub fn execute(&self, store: &mut dyn RecordStore) -> ClinicResult<CommandResult> {
        let target = self.target.resolve(&store.filtered_view())?;
        store.remove(&target)?;
        Ok(CommandResult::new(format!("Deleted patient: {target}")))
    }
}

/// Removes every patient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClearCommand;

impl ClearCommand {
    pub const COMMAND_WORD: &'static str = "clear";
    pub const MESSAGE_USAGE: &'static str = "clear: Clears all patient records.\nExample: clear";
    pub const MESSAGE_SUCCESS: &'static str = "Patient records have been cleared!";

    pub fn execute(&self, store: &mut dyn RecordStore) -> ClinicResult<CommandResult> {
        store.clear();
        store.apply_filter(Box::new(ShowAll));
        Ok(CommandResult::new(Self::MESSAGE_SUCCESS))
    }
}
