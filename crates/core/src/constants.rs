//! Constants used throughout the clinic core crate.

/// Data file used when neither `--data-file` nor the environment names one.
pub const DEFAULT_DATA_FILE: &str = "data/clinic.json";

/// Environment variable that overrides the data file location.
pub const DATA_FILE_ENV: &str = "CLINIC_DATA_FILE";

/// Log filter directive applied on top of `RUST_LOG`.
pub const DEFAULT_LOG_DIRECTIVE: &str = "clinic=info";
