//! Core data structures for dsf-replay
//!
//! Sheet-qualified cell addressing, numeric cell values with an explicit
//! blank sentinel, result grids, and the shared error taxonomy. Everything
//! here is independent of any particular traced workbook slice.

pub mod address;
pub mod error;
pub mod value;

pub use address::{CellId, RangeRef, SheetRegistry};
pub use error::{Error, Result};
pub use value::{Grid, Value};
