use thiserror::Error;

/// Result type for draft operations
pub type Result<T> = std::result::Result<T, DraftError>;

#[derive(Error, Debug)]
pub enum DraftError {
    /// A required field is blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Not one of the standard form fields
    #[error("Unknown standard property: {0} (add it as a custom property instead)")]
    UnknownProperty(String),

    #[error("Custom property needs both a name and a value")]
    IncompleteCustomProperty,

    #[error("No custom property at index {0}")]
    NoSuchCustomProperty(usize),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
