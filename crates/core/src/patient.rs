//! Patient record entity.
//!
//! A [`PatientRecord`] is never edited in place once it is in the record store. Changing any
//! field, including logging a visit, builds a new record which the store swaps in for the old
//! one.

use crate::visit::VisitLog;
use clinic_types::{Address, Doctor, Email, Medicine, Name, Phone, Tag};
use std::collections::BTreeSet;
use std::fmt;

/// One patient in the clinic records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientRecord {
    name: Name,
    phone: Phone,
    email: Email,
    address: Address,
    doctor: Doctor,
    tags: BTreeSet<Tag>,
    medicines: BTreeSet<Medicine>,
    visits: VisitLog,
}

impl PatientRecord {
    /// Creates a record with no visits.
    pub fn new(
        name: Name,
        phone: Phone,
        email: Email,
        address: Address,
        doctor: Doctor,
        tags: BTreeSet<Tag>,
        medicines: BTreeSet<Medicine>,
    ) -> Self {
        Self {
            name,
            phone,
            email,
            address,
            doctor,
            tags,
            medicines,
            visits: VisitLog::empty(),
        }
    }

    /// Returns a copy of this record carrying `visits` instead of the current log.
    pub fn with_visits(&self, visits: VisitLog) -> Self {
        Self {
            visits,
            ..self.clone()
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn doctor(&self) -> &Doctor {
        &self.doctor
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn medicines(&self) -> &BTreeSet<Medicine> {
        &self.medicines
    }

    pub fn visits(&self) -> &VisitLog {
        &self.visits
    }

    /// True if both records describe the same patient.
    ///
    /// This is weaker than `==`: two records with the same name but different contact
    /// details are the same patient.
    pub fn is_same_patient(&self, other: &PatientRecord) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for PatientRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}; Phone: {}; Email: {}; Address: {}; Doctor: {}; Tags: ",
            self.name, self.phone, self.email, self.address, self.doctor
        )?;
        for tag in &self.tags {
            write!(f, "[{tag}]")?;
        }
        f.write_str("; Medicines: ")?;
        for medicine in &self.medicines {
            write!(f, "[{medicine}]")?;
        }
        Ok(())
    }
}

/// Builder for records in tests across the crate.
#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub(crate) struct RecordBuilder {
        name: &'static str,
        phone: &'static str,
        email: &'static str,
        address: &'static str,
        doctor: &'static str,
        tags: Vec<&'static str>,
        medicines: Vec<&'static str>,
        visits: VisitLog,
    }

    impl RecordBuilder {
        pub(crate) fn new(name: &'static str) -> Self {
            Self {
                name,
                phone: "91234567",
                email: "patient@example.com",
                address: "1 Clinic Road",
                doctor: "",
                tags: vec![],
                medicines: vec![],
                visits: VisitLog::empty(),
            }
        }

        pub(crate) fn phone(mut self, phone: &'static str) -> Self {
            self.phone = phone;
            self
        }

        pub(crate) fn doctor(mut self, doctor: &'static str) -> Self {
            self.doctor = doctor;
            self
        }

        pub(crate) fn tags(mut self, tags: &[&'static str]) -> Self {
            self.tags = tags.to_vec();
            self
        }

        pub(crate) fn medicines(mut self, medicines: &[&'static str]) -> Self {
            self.medicines = medicines.to_vec();
            self
        }

        pub(crate) fn visits(mut self, visits: VisitLog) -> Self {
            self.visits = visits;
            self
        }

        pub(crate) fn build(self) -> PatientRecord {
            PatientRecord::new(
                Name::new(self.name).unwrap(),
                Phone::new(self.phone).unwrap(),
                Email::new(self.email).unwrap(),
                Address::new(self.address).unwrap(),
                Doctor::new(self.doctor).unwrap(),
                self.tags.iter().map(|t| Tag::new(t).unwrap()).collect(),
                self.medicines
                    .iter()
                    .map(|m| Medicine::new(m).unwrap())
                    .collect(),
            )
            .with_visits(self.visits)
        }
    }
}
