//! Keyword predicates used to filter the visible patient list.
//!
//! Each predicate captures its keywords at construction and is otherwise stateless. Two
//! predicates of the same kind are equal when their keyword lists are equal, order included.

use crate::patient::PatientRecord;
use std::fmt;

/// A boolean test over a patient record.
///
/// Implementations are handed to [`RecordStore::apply_filter`](crate::store::RecordStore::apply_filter),
/// which keeps only the records for which `test` returns true.
pub trait RecordPredicate: fmt::Debug {
    fn test(&self, record: &PatientRecord) -> bool;
}

/// Returns true if `sentence` contains `word` as a whole whitespace-separated word,
/// ignoring case.
///
/// Blank keywords and keywords containing whitespace never match.
pub fn contains_word_ignore_case(sentence: &str, word: &str) -> bool {
    let word = word.trim();
    if word.is_empty() || word.contains(char::is_whitespace) {
        return false;
    }
    let word = word.to_lowercase();
    sentence
        .split_whitespace()
        .any(|candidate| candidate.to_lowercase() == word)
}

/// Matches every record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShowAll;

impl RecordPredicate for ShowAll {
    fn test(&self, _record: &PatientRecord) -> bool {
        true
    }
}

/// Matches records whose name contains any keyword as a whole word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameContainsKeywords {
    keywords: Vec<String>,
}

impl NameContainsKeywords {
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl RecordPredicate for NameContainsKeywords {
    fn test(&self, record: &PatientRecord) -> bool {
        let name = record.name().as_str();
        self.keywords
            .iter()
            .any(|keyword| contains_word_ignore_case(name, keyword))
    }
}

/// Matches records whose doctor field contains any keyword as a whole word.
///
/// An empty keyword list matches no one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoctorContainsKeywords {
    keywords: Vec<String>,
}

impl DoctorContainsKeywords {
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl RecordPredicate for DoctorContainsKeywords {
    fn test(&self, record: &PatientRecord) -> bool {
        let doctor = record.doctor().as_str();
        self.keywords
            .iter()
            .any(|keyword| contains_word_ignore_case(doctor, keyword))
    }
}

/// Matches records by prescribed medicine.
///
/// With keywords, a record matches when any of its medicine names contains any keyword as a
/// case-insensitive substring. With no keywords, a record matches only when it has no
/// medicines at all; this is how `findmed none` is expressed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MedicineContainsKeywords {
    keywords: Vec<String>,
}

impl MedicineContainsKeywords {
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    /// Predicate for patients with no medication.
    pub fn no_medicines() -> Self {
        Self::new(Vec::new())
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl RecordPredicate for MedicineContainsKeywords {
    fn test(&self, record: &PatientRecord) -> bool {
        if self.keywords.is_empty() {
            return record.medicines().is_empty();
        }

        let keywords: Vec<String> = self.keywords.iter().map(|k| k.to_lowercase()).collect();
        record.medicines().iter().any(|medicine| {
            let name = medicine.as_str().to_lowercase();
            keywords.iter().any(|keyword| name.contains(keyword.as_str()))
        })
    }
}
