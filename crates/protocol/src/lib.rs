//! # Materials Protocol
//!
//! Record model shared by every crate of the materials catalog.
//!
//! A [`Material`] is one entry of the dataset document (`{"materials": [...]}`).
//! Its open-ended property bag keeps declaration order and parses the leading
//! numeric magnitude of each value once, at construction, so comparison code
//! never re-parses free text.
//!
//! ```rust
//! use materials_protocol::{format_label, PropertyValue};
//!
//! let value = PropertyValue::new("1.2 GPa");
//! assert_eq!(value.numeric(), Some(1.2));
//! assert_eq!(format_label("youngsModulus"), "Young's Modulus");
//! ```

use anyhow::Result;
use serde::Serialize;

pub mod deep_link;
mod label;
mod material;
mod summary;

pub use deep_link::{compare_href, parse_compare_param, COMPARE_PARAM, COMPARE_PATH};
pub use label::format_label;
pub use material::{leading_number, Dataset, Material, PropertyBag, PropertyValue, ABSENT_PLACEHOLDER};
pub use summary::summary_text;

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}

pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}
