mod approx;
mod error;
mod fuzzy;

pub use error::{Result, SearchError};
pub use fuzzy::{FuzzySearch, LiveSearch, SearchField, SearchHit, SearchOptions, DEFAULT_THRESHOLD};
