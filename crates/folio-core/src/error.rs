use thiserror::Error;

/// All the ways things can go wrong in Folio
///
/// None of these should take the whole process down. Loaders drop the bad
/// record and keep going, the contact form turns submission errors into a
/// message the visitor can act on.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid project record #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Malformed timeline year '{year}' on entry '{title}'")]
    MalformedYear { year: String, title: String },

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Invalid contact form: {0}")]
    InvalidForm(String),

    #[error("Message could not be delivered: {0}")]
    SubmissionFailed(String),

    #[error("Submission was cancelled")]
    SubmissionCancelled,

    #[error("Export failed: {0}")]
    ExportError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
