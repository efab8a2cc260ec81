//! JSON persistence for the patient book.
//!
//! Responsibilities:
//! - Define a strict wire model for the on-disk JSON file
//! - Translate between wire structs and validated domain records
//! - Read and write the data file
//!
//! Visit dates are stored as ISO-8601 calendar dates (`YYYY-MM-DD`). A record whose visit
//! dates cannot all be parsed is rejected as a whole rather than silently losing visits.
//!
//! ```text
//! {
//!   "patients": [
//!     {
//!       "name": "Alice Tan",
//!       "phone": "91234567",
//!       "email": "alice@example.com",
//!       "address": "1 Clinic Road",
//!       "doctor": "Dr Alex Williams",
//!       "tags": ["diabetic"],
//!       "medicines": ["Metformin"],
//!       "visit_dates": ["2024-01-01", "2024-01-03"]
//!     }
//!   ]
//! }
//! ```

use crate::error::{ClinicError, ClinicResult};
use crate::patient::PatientRecord;
use crate::store::{PatientBook, RecordStore};
use crate::visit::{VisitLog, VISIT_DATE_STORAGE_FORMAT};
use chrono::NaiveDate;
use clinic_types::{Address, Doctor, Email, Medicine, Name, Phone, Tag};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct PatientBookWire {
    #[serde(default)]
    patients: Vec<PatientWire>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct PatientWire {
    name: String,
    phone: String,
    email: String,
    address: String,
    #[serde(default)]
    doctor: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    medicines: Vec<String>,
    #[serde(default)]
    visit_dates: Option<Vec<String>>,
}

// ============================================================================
// Translation
// ============================================================================

/// Parses stored visit dates. Absent dates mean no visits.
fn visits_from_wire(dates: Option<Vec<String>>) -> ClinicResult<VisitLog> {
    let Some(dates) = dates else {
        return Ok(VisitLog::empty());
    };

    let parsed = dates
        .into_iter()
        .map(|value| {
            NaiveDate::parse_from_str(&value, VISIT_DATE_STORAGE_FORMAT)
                .map_err(|source| ClinicError::MalformedPersistedDate { value, source })
        })
        .collect::<ClinicResult<Vec<NaiveDate>>>()?;
    Ok(VisitLog::of(parsed))
}

fn visits_to_wire(visits: &VisitLog) -> Vec<String> {
    visits
        .dates()
        .iter()
        .map(|date| date.format(VISIT_DATE_STORAGE_FORMAT).to_string())
        .collect()
}

fn wire_to_domain(wire: PatientWire) -> ClinicResult<PatientRecord> {
    let tags: BTreeSet<Tag> = wire.tags.iter().map(Tag::new).collect::<Result<_, _>>()?;
    let medicines: BTreeSet<Medicine> = wire
        .medicines
        .iter()
        .map(Medicine::new)
        .collect::<Result<_, _>>()?;

    let record = PatientRecord::new(
        Name::new(&wire.name)?,
        Phone::new(&wire.phone)?,
        Email::new(&wire.email)?,
        Address::new(&wire.address)?,
        Doctor::new(&wire.doctor)?,
        tags,
        medicines,
    );
    Ok(record.with_visits(visits_from_wire(wire.visit_dates)?))
}

fn domain_to_wire(record: &PatientRecord) -> PatientWire {
    PatientWire {
        name: record.name().to_string(),
        phone: record.phone().to_string(),
        email: record.email().to_string(),
        address: record.address().to_string(),
        doctor: record.doctor().to_string(),
        tags: record.tags().iter().map(ToString::to_string).collect(),
        medicines: record.medicines().iter().map(ToString::to_string).collect(),
        visit_dates: Some(visits_to_wire(record.visits())),
    }
}

/// Rejects books and patients written as arrays.
///
/// Derived struct deserialization also accepts a JSON array of fields in declaration order;
/// the data file only ever holds objects.
fn require_object_layout(value: &serde_json::Value) -> ClinicResult<()> {
    let Some(book) = value.as_object() else {
        return Err(ClinicError::Deserialization(
            "schema mismatch at <root>: expected an object".into(),
        ));
    };

    if let Some(serde_json::Value::Array(patients)) = book.get("patients") {
        if let Some(index) = patients.iter().position(|p| !p.is_object()) {
            return Err(ClinicError::Deserialization(format!(
                "schema mismatch at patients[{index}]: expected an object"
            )));
        }
    }
    Ok(())
}

/// Parses the JSON text of a data file into a patient book.
///
/// # Errors
///
/// - [`ClinicError::Deserialization`] if the JSON does not match the wire schema; the message
///   names the failing path (for example `patients[2].phone`).
/// - [`ClinicError::MalformedPersistedDate`] if a visit date is not `YYYY-MM-DD`.
/// - [`ClinicError::InvalidField`] if a stored field fails validation.
/// - [`ClinicError::DuplicatePatient`] if the file holds the same patient twice.
pub fn parse_book(json_text: &str) -> ClinicResult<PatientBook> {
    let value: serde_json::Value = serde_json::from_str(json_text)
        .map_err(|e| ClinicError::Deserialization(format!("invalid JSON: {e}")))?;
    require_object_layout(&value)?;

    let wire: PatientBookWire = match serde_path_to_error::deserialize(value) {
        Ok(parsed) => parsed,
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>"
            } else {
                path.as_str()
            };
            return Err(ClinicError::Deserialization(format!(
                "schema mismatch at {path}: {source}"
            )));
        }
    };

    let records = wire
        .patients
        .into_iter()
        .map(wire_to_domain)
        .collect::<ClinicResult<Vec<_>>>()?;
    PatientBook::from_records(records)
}

/// Renders a patient book as pretty-printed JSON.
pub fn render_book(book: &PatientBook) -> ClinicResult<String> {
    let wire = PatientBookWire {
        patients: book.records().iter().map(|r| domain_to_wire(r)).collect(),
    };
    serde_json::to_string_pretty(&wire).map_err(ClinicError::Serialization)
}

// ============================================================================
// File storage
// ============================================================================

/// Reads and writes the patient book at a fixed path.
#[derive(Clone, Debug)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the book, or `None` if the data file does not exist yet.
    pub fn load(&self) -> ClinicResult<Option<PatientBook>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("data file {} not found", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(ClinicError::FileRead(e)),
        };

        let book = parse_book(&text)?;
        tracing::info!(
            "loaded {} patients from {}",
            book.len(),
            self.path.display()
        );
        Ok(Some(book))
    }

    /// Writes the book, creating parent directories as needed.
    pub fn save(&self, book: &PatientBook) -> ClinicResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(ClinicError::StorageDirCreation)?;
        }

        let json = render_book(book)?;
        fs::write(&self.path, json).map_err(ClinicError::FileWrite)?;
        tracing::debug!("saved {} patients to {}", book.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::test_support::RecordBuilder;
    use tempfile::TempDir;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    const SAMPLE: &str = r#"{
        "patients": [
            {
                "name": "Alice Tan",
                "phone": "91234567",
                "email": "alice@example.com",
                "address": "1 Clinic Road",
                "doctor": "Dr Alex Williams",
                "tags": ["diabetic"],
                "medicines": ["Metformin"],
                "visit_dates": ["2024-01-03", "2024-01-01", "2024-01-01"]
            },
            {
                "name": "Bob Lim",
                "phone": "98765432",
                "email": "bob@example.com",
                "address": "2 Clinic Road"
            }
        ]
    }"#;

    #[test]
    fn parse_sorts_and_deduplicates_visits() {
        let book = parse_book(SAMPLE).unwrap();
        let alice = &book.records()[0];

        assert_eq!(alice.visits().dates(), &[d(2024, 1, 1), d(2024, 1, 3)]);
        assert_eq!(alice.doctor().as_str(), "Dr Alex Williams");
        assert_eq!(alice.medicines().len(), 1);
    }

    #[test]
    fn missing_optional_fields_default() {
        let book = parse_book(SAMPLE).unwrap();
        let bob = &book.records()[1];

        assert!(bob.visits().is_empty());
        assert!(bob.doctor().is_empty());
        assert!(bob.tags().is_empty());
        assert!(bob.medicines().is_empty());
    }

    #[test]
    fn malformed_date_rejects_load() {
        let json = SAMPLE.replace("\"2024-01-03\"", "\"03/01/2024\"");
        let err = parse_book(&json).unwrap_err();
        assert!(
            matches!(err, ClinicError::MalformedPersistedDate { ref value, .. } if value == "03/01/2024")
        );
    }

    #[test]
    fn invalid_field_rejects_load() {
        let json = SAMPLE.replace("98765432", "not-a-phone");
        assert!(matches!(
            parse_book(&json),
            Err(ClinicError::InvalidField(_))
        ));
    }

    #[test]
    fn schema_mismatch_reports_path() {
        let json = SAMPLE.replace("\"tags\": [\"diabetic\"]", "\"tags\": \"diabetic\"");
        let err = parse_book(&json).unwrap_err();
        let ClinicError::Deserialization(message) = err else {
            panic!("expected deserialization error");
        };
        assert!(message.contains("patients[0].tags"), "{message}");
    }

    #[test]
    fn array_root_is_rejected() {
        for json in ["[]", r#"[[["Alice Tan","91234567","a@b.co","1 Road","",[],[],[]]]]"#] {
            let err = parse_book(json).unwrap_err();
            let ClinicError::Deserialization(message) = err else {
                panic!("expected deserialization error for {json}");
            };
            assert!(message.contains("<root>"), "{message}");
        }
    }

    #[test]
    fn positional_patient_is_rejected() {
        let json = r#"{"patients": [
            ["Alice Tan", "91234567", "a@b.co", "1 Road", "", [], [], ["2024-01-01"]]
        ]}"#;
        let err = parse_book(json).unwrap_err();
        let ClinicError::Deserialization(message) = err else {
            panic!("expected deserialization error");
        };
        assert!(message.contains("patients[0]"), "{message}");
    }

    #[test]
    fn duplicate_patients_rejected() {
        let json = SAMPLE.replace("Bob Lim", "Alice Tan");
        assert!(matches!(
            parse_book(&json),
            Err(ClinicError::DuplicatePatient)
        ));
    }

    #[test]
    fn render_then_parse_preserves_book() {
        let book = PatientBook::from_records([
            RecordBuilder::new("Alice Tan")
                .doctor("Dr Lee")
                .tags(&["diabetic", "elderly"])
                .medicines(&["Paracetamol"])
                .visits(VisitLog::of([d(2023, 12, 31), d(2024, 2, 29)]))
                .build(),
            RecordBuilder::new("Bob Lim").build(),
        ])
        .unwrap();

        let json = render_book(&book).unwrap();
        assert!(json.contains("\"2024-02-29\""));

        let reloaded = parse_book(&json).unwrap();
        let original: Vec<&PatientRecord> = book.records().iter().map(|r| r.as_ref()).collect();
        let restored: Vec<&PatientRecord> =
            reloaded.records().iter().map(|r| r.as_ref()).collect();
        assert_eq!(original, restored);
    }

    #[test]
    fn load_missing_file_returns_none() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage = JsonStorage::new(temp_dir.path().join("absent.json"));
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn save_creates_directories_and_load_reads_back() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("data").join("clinic.json");
        let storage = JsonStorage::new(&path);

        let book = PatientBook::from_records([RecordBuilder::new("Alice Tan")
            .visits(VisitLog::of([d(2024, 1, 1)]))
            .build()])
        .unwrap();
        storage.save(&book).unwrap();
        assert!(path.is_file());

        let loaded = storage.load().unwrap().expect("file should exist");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.records()[0].visits().dates(), &[d(2024, 1, 1)]);
    }

    #[test]
    fn load_rejects_invalid_json() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("clinic.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonStorage::new(&path).load().unwrap_err();
        assert!(matches!(err, ClinicError::Deserialization(_)));
    }
}
