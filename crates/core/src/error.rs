use clinic_types::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    #[error("The patient index provided is invalid")]
    IndexOutOfRange,
    #[error("Visit already logged for today")]
    DuplicateVisit,
    #[error("Invalid date format in visit dates: '{value}' ({source})")]
    MalformedPersistedDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid command format!\n{0}")]
    InvalidCommandFormat(&'static str),
    #[error("Unknown command")]
    UnknownCommand,
    #[error("Multiple values specified for the following single-valued field(s): {0}")]
    DuplicatePrefixes(String),
    #[error("At least one field to edit must be provided.")]
    NoFieldsToEdit,
    #[error("This patient already exists in the clinic records")]
    DuplicatePatient,
    #[error("The patient could not be found in the clinic records")]
    PatientNotFound,
    #[error("{0}")]
    InvalidField(#[from] FieldError),

    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to read data file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write data file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to serialize patient records: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize patient records: {0}")]
    Deserialization(String),
}

pub type ClinicResult<T> = std::result::Result<T, ClinicError>;
