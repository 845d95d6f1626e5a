use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Threshold must be within 0.0..=1.0, got {0}")]
    InvalidThreshold(f64),

    #[error("No search fields configured")]
    NoFields,
}
