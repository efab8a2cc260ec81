//! Executable commands.
//!
//! A [`Command`] is the parsed form of one line of user input. Executing it against a
//! [`RecordStore`] yields a [`CommandResult`] whose feedback is shown to the user, or a
//! [`ClinicError`](crate::ClinicError) whose message is shown instead.

mod listing;
mod records;
mod visits;

pub use listing::{FilterCommand, FindCommand, FindMedicineCommand, ListCommand};
pub use records::{AddCommand, ClearCommand, DeleteCommand, EditCommand, EditPatientDescriptor};
pub use visits::{DisplayCommand, LogCommand};

use crate::clock::Clock;
use crate::error::ClinicResult;
use crate::store::RecordStore;

/// Shown when a listing command finishes, with the number of visible patients.
pub(crate) fn patients_listed(count: usize) -> String {
    format!("{count} patients listed!")
}

/// Outcome of a successful command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
    /// The front end should show [`usage_summary`] after the feedback.
    pub show_help: bool,
    pub exit: bool,
}

impl CommandResult {
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            show_help: false,
            exit: false,
        }
    }
}

/// Every command the clinic records understand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Add(AddCommand),
    Edit(EditCommand),
    Delete(DeleteCommand),
    Clear(ClearCommand),
    Find(FindCommand),
    Filter(FilterCommand),
    FindMedicine(FindMedicineCommand),
    List(ListCommand),
    Log(LogCommand),
    Display(DisplayCommand),
    Help,
    Exit,
}

pub const HELP_USAGE: &str = "help: Shows program usage instructions.\nExample: help";
pub const SHOWING_HELP_MESSAGE: &str = "Showing command usage.";
pub const EXIT_ACKNOWLEDGEMENT: &str = "Exiting clinic records as requested ...";

impl Command {
    /// Runs the command. `clock` supplies today's date to commands that need it.
    pub fn execute(
        &self,
        store: &mut dyn RecordStore,
        clock: &dyn Clock,
    ) -> ClinicResult<CommandResult> {
        match self {
            Command::Add(cmd) => cmd.execute(store),
            Command::Edit(cmd) => cmd.execute(store),
            Command::Delete(cmd) => cmd.execute(store),
            Command::Clear(cmd) => cmd.execute(store),
            Command::Find(cmd) => cmd.execute(store),
            Command::Filter(cmd) => cmd.execute(store),
            Command::FindMedicine(cmd) => cmd.execute(store),
            Command::List(cmd) => cmd.execute(store),
            Command::Log(cmd) => cmd.execute(store, clock.today()),
            Command::Display(cmd) => cmd.execute(store),
            Command::Help => Ok(CommandResult {
                feedback: SHOWING_HELP_MESSAGE.to_string(),
                show_help: true,
                exit: false,
            }),
            Command::Exit => Ok(CommandResult {
                feedback: EXIT_ACKNOWLEDGEMENT.to_string(),
                show_help: false,
                exit: true,
            }),
        }
    }

    /// True if a successful run changes the stored records.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Add(_)
                | Command::Edit(_)
                | Command::Delete(_)
                | Command::Clear(_)
                | Command::Log(_)
        )
    }
}

/// Usage text for every command, one block per command.
pub fn usage_summary() -> String {
    [
        AddCommand::MESSAGE_USAGE,
        EditCommand::MESSAGE_USAGE,
        DeleteCommand::MESSAGE_USAGE,
        ClearCommand::MESSAGE_USAGE,
        FindCommand::MESSAGE_USAGE,
        FilterCommand::MESSAGE_USAGE,
        FindMedicineCommand::MESSAGE_USAGE,
        ListCommand::MESSAGE_USAGE,
        LogCommand::MESSAGE_USAGE,
        DisplayCommand::MESSAGE_USAGE,
        HELP_USAGE,
        "exit: Exits the program.",
    ]
    .join("\n\n")
}
