//! # Materials Compare
//!
//! Side-by-side comparison of a small set of materials.
//!
//! ```text
//! Selection (≤ 3, FIFO eviction, toggle)
//!     │
//!     ├──> Schema: first-seen union of property keys
//!     │
//!     ├──> Classification per key
//!     │    ├─> polarity table (higher / lower / unclassified)
//!     │    ├─> leading numeric magnitudes only
//!     │    └─> best / worst / neutral per material
//!     │
//!     └──> ComparisonTable (columns, fixed rows, property rows)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use materials_compare::{Highlight, Selection};
//! use materials_protocol::Material;
//!
//! let mut selection = Selection::new();
//! selection.select(Material::new("A", "A", "Polymer").with_id("1").with_property("uts", "30 MPa"));
//! selection.select(Material::new("B", "B", "Polymer").with_id("2").with_property("uts", "45 MPa"));
//!
//! let table = selection.table();
//! let uts = table.row("uts").unwrap();
//! assert_eq!(uts.cells[1].highlight, Highlight::Best);
//! ```

mod classify;
mod picker;
mod polarity;
mod selection;
mod table;

pub use classify::{classify, compute_schema};
pub use picker::picker_candidates;
pub use polarity::{Highlight, Polarity};
pub use selection::{Selection, SelectionChange, DEFAULT_CAPACITY};
pub use table::{build_table, Cell, Column, ComparisonTable, Row};
