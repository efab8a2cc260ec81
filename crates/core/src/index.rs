//! 1-based positions into the visible patient list.

use crate::error::{ClinicError, ClinicResult};
use crate::patient::PatientRecord;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Position of a record as shown to the user, starting at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayIndex(NonZeroUsize);

impl DisplayIndex {
    /// Returns `None` for 0.
    pub fn from_one_based(index: usize) -> Option<Self> {
        NonZeroUsize::new(index).map(Self)
    }

    pub fn one_based(self) -> usize {
        self.0.get()
    }

    pub fn zero_based(self) -> usize {
        self.0.get() - 1
    }

    /// Looks up the record this index points at in `view`.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::IndexOutOfRange`] if the index is past the end of `view`.
    pub fn resolve(self, view: &[Arc<PatientRecord>]) -> ClinicResult<Arc<PatientRecord>> {
        view.get(self.zero_based())
            .cloned()
            .ok_or(ClinicError::IndexOutOfRange)
    }
}

impl fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.one_based())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::test_support::RecordBuilder;

    #[test]
    fn zero_is_not_an_index() {
        assert!(DisplayIndex::from_one_based(0).is_none());
        let index = DisplayIndex::from_one_based(3).unwrap();
        assert_eq!(index.one_based(), 3);
        assert_eq!(index.zero_based(), 2);
        assert_eq!(index.to_string(), "3");
    }

    #[test]
    fn resolve_checks_bounds() {
        let view = vec![
            Arc::new(RecordBuilder::new("Alice").build()),
            Arc::new(RecordBuilder::new("Bob").build()),
        ];

        let second = DisplayIndex::from_one_based(2).unwrap().resolve(&view).unwrap();
        assert!(Arc::ptr_eq(&second, &view[1]));

        let past_end = DisplayIndex::from_one_based(3).unwrap().resolve(&view);
        assert!(matches!(past_end, Err(ClinicError::IndexOutOfRange)));
    }
}
