//! # Clinic Core
//!
//! Core logic for the clinic patient records manager.
//!
//! This crate holds the in-memory patient book and everything that acts on it:
//! - Patient records with their visit history ([`VisitLog`])
//! - Keyword predicates for the filtered patient list
//! - Command parsing and execution, including `log` and `display` for visits
//! - JSON persistence of the whole book
//!
//! **No terminal concerns**: reading input, printing, and logging setup belong in `clinic-cli`.

pub mod clock;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod index;
pub mod logic;
pub mod parser;
pub mod patient;
pub mod predicates;
pub mod storage;
pub mod store;
pub mod visit;

pub use clinic_types::{Address, Doctor, Email, FieldError, Medicine, Name, Phone, Tag};
pub use clock::{Clock, FixedClock, SystemClock};
pub use commands::{Command, CommandResult};
pub use config::{resolve_data_file, CoreConfig};
pub use error::{ClinicError, ClinicResult};
pub use index::DisplayIndex;
pub use logic::LogicManager;
pub use parser::parse_command;
pub use patient::PatientRecord;
pub use predicates::{
    DoctorContainsKeywords, MedicineContainsKeywords, NameContainsKeywords, RecordPredicate,
    ShowAll,
};
pub use storage::JsonStorage;
pub use store::{PatientBook, RecordStore};
pub use visit::VisitLog;
