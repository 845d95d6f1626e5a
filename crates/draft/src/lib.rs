//! # Materials Draft
//!
//! Turns add-material form input into the canonical record shape and the
//! pretty-printed JSON artifact contributors paste into the dataset. Nothing
//! here writes anywhere; ids are left for the store to assign on next load.

mod error;
mod form;
mod input;

pub use error::{DraftError, Result};
pub use form::{custom_property_key, CustomProperty, DraftForm, TypeChoice, STANDARD_PROPERTIES};
pub use input::{CustomPropertyInput, DraftInput, NEW_TYPE_SENTINEL};

/// Manual pull-request workflow for submitting a generated record.
pub fn contribution_steps(repository_url: &str) -> Vec<String> {
    vec![
        "Copy the JSON code above".to_string(),
        format!("Go to the GitHub repository: {repository_url}"),
        "Fork the repository if you haven't already".to_string(),
        "Navigate to the data.json file".to_string(),
        "Click on Edit (pencil icon)".to_string(),
        "Find the closing ] before the last } and add a comma after the previous material's closing brace".to_string(),
        "Paste your new material JSON".to_string(),
        "Add a commit message explaining your addition".to_string(),
        "Create a pull request".to_string(),
    ]
}
