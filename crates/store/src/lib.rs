//! # Materials Store
//!
//! One-shot loading of the static dataset document into an immutable,
//! shareable collection.
//!
//! ```no_run
//! use materials_store::{DatasetSource, MaterialStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = MaterialStore::load(&DatasetSource::parse("data.json")).await;
//!     for material_type in store.distinct_types() {
//!         println!("{material_type}");
//!     }
//! }
//! ```

mod error;
mod source;
mod store;

pub use error::{Result, StoreError};
pub use source::DatasetSource;
pub use store::{distinct_types, MaterialStore};
