//! Visit history for a single patient.
//!
//! A [`VisitLog`] is an immutable, ascending, duplicate-free list of the calendar days a patient
//! came into the clinic. Every "mutation" returns a new value so records holding a log can be
//! replaced wholesale rather than edited in place.

use chrono::NaiveDate;

/// Display format for visit dates shown to users, e.g. `Jan 03, 2024`.
pub const VISIT_DATE_DISPLAY_FORMAT: &str = "%b %d, %Y";

/// Storage format for visit dates (ISO-8601 calendar date).
pub const VISIT_DATE_STORAGE_FORMAT: &str = "%Y-%m-%d";

/// Sorted, deduplicated set of visit dates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct VisitLog {
    dates: Vec<NaiveDate>,
}

impl VisitLog {
    /// Creates a log with no visits.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a log from any sequence of dates, sorting and removing duplicates.
    pub fn of(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        let mut dates: Vec<NaiveDate> = dates.into_iter().collect();
        dates.sort_unstable();
        dates.dedup();
        Self { dates }
    }

    /// Returns a log that also contains `date`.
    ///
    /// If `date` is already present the result is equal to `self`.
    pub fn add(&self, date: NaiveDate) -> Self {
        let mut dates = self.dates.clone();
        if let Err(pos) = dates.binary_search(&date) {
            dates.insert(pos, date);
        }
        Self { dates }
    }

    /// Returns a log without `date`. Removing an absent date yields an equal log.
    pub fn remove(&self, date: NaiveDate) -> Self {
        let mut dates = self.dates.clone();
        if let Ok(pos) = dates.binary_search(&date) {
            dates.remove(pos);
        }
        Self { dates }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.binary_search(&date).is_ok()
    }

    pub fn count(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// All visit dates, oldest first.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Most recent visit, if any.
    pub fn latest(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// First recorded visit, if any.
    pub fn earliest(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }
}

impl FromIterator<NaiveDate> for VisitLog {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self::of(iter)
    }
}

/// Formats a visit date for display to users.
pub fn format_visit_date(date: NaiveDate) -> String {
    date.format(VISIT_DATE_DISPLAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn empty_log_has_no_bounds() {
        let log = VisitLog::empty();
        assert_eq!(log.count(), 0);
        assert!(log.is_empty());
        assert_eq!(log.latest(), None);
        assert_eq!(log.earliest(), None);
    }

    #[test]
    fn of_sorts_and_deduplicates() {
        let input = vec![d(2024, 1, 3), d(2024, 1, 1), d(2023, 12, 31), d(2024, 1, 1)];
        let log = VisitLog::of(input.clone());

        assert_eq!(log.dates(), &[d(2023, 12, 31), d(2024, 1, 1), d(2024, 1, 3)]);
        assert!(log.dates().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(input.len(), 4, "caller's input must be untouched");
    }

    #[test]
    fn of_is_independent_of_input_order() {
        let a = VisitLog::of([d(2024, 3, 1), d(2024, 2, 1), d(2024, 1, 1)]);
        let b = VisitLog::of([d(2024, 1, 1), d(2024, 3, 1), d(2024, 2, 1), d(2024, 2, 1)]);
        assert_eq!(a, b);
    }

    #[test]
    fn add_inserts_in_order() {
        let log = VisitLog::of([d(2024, 1, 1), d(2024, 1, 10)]);
        let added = log.add(d(2024, 1, 5));

        assert_eq!(added.dates(), &[d(2024, 1, 1), d(2024, 1, 5), d(2024, 1, 10)]);
        assert_eq!(log.count(), 2, "original log is unchanged");
    }

    #[test]
    fn add_is_idempotent() {
        let log = VisitLog::of([d(2024, 1, 1)]);
        let once = log.add(d(2024, 2, 2));
        let twice = once.add(d(2024, 2, 2));

        assert_eq!(once, twice);
        assert!(once.contains(d(2024, 2, 2)));
        assert_eq!(log.add(d(2024, 1, 1)), log);
    }

    #[test]
    fn remove_absent_date_is_noop() {
        let log = VisitLog::of([d(2024, 1, 1), d(2024, 1, 2)]);
        assert_eq!(log.remove(d(2025, 1, 1)), log);
    }

    #[test]
    fn remove_present_date() {
        let log = VisitLog::of([d(2024, 1, 1), d(2024, 1, 2)]);
        let removed = log.remove(d(2024, 1, 1));

        assert_eq!(removed.dates(), &[d(2024, 1, 2)]);
        assert!(!removed.contains(d(2024, 1, 1)));
        assert!(log.contains(d(2024, 1, 1)));
    }

    #[test]
    fn latest_and_earliest() {
        let log = VisitLog::of([d(2024, 5, 1), d(2022, 1, 1), d(2023, 7, 4)]);
        assert_eq!(log.earliest(), Some(d(2022, 1, 1)));
        assert_eq!(log.latest(), Some(d(2024, 5, 1)));
    }

    #[test]
    fn iso_strings_round_trip() {
        let log = VisitLog::of([d(2024, 2, 29), d(1999, 12, 31), d(2024, 1, 1)]);
        let strings: Vec<String> = log
            .dates()
            .iter()
            .map(|date| date.format(VISIT_DATE_STORAGE_FORMAT).to_string())
            .collect();
        assert_eq!(strings, ["1999-12-31", "2024-01-01", "2024-02-29"]);

        let parsed = VisitLog::of(
            strings
                .iter()
                .map(|s| NaiveDate::parse_from_str(s, VISIT_DATE_STORAGE_FORMAT).unwrap()),
        );
        assert_eq!(parsed, log);
    }

    #[test]
    fn collects_from_iterator() {
        let log: VisitLog = [d(2024, 1, 2), d(2024, 1, 1)].into_iter().collect();
        assert_eq!(log.earliest(), Some(d(2024, 1, 1)));
    }

    #[test]
    fn display_format() {
        assert_eq!(format_visit_date(d(2024, 1, 3)), "Jan 03, 2024");
    }
}
