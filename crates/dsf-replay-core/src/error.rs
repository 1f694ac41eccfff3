//! Error types for dsf-replay-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur anywhere in the replay engine.
///
/// Three tiers, mirroring how failures are handled:
///
/// - construction-time defects ([`CyclicDependency`](Error::CyclicDependency),
///   [`UnresolvedReference`](Error::UnresolvedReference),
///   [`MalformedFormula`](Error::MalformedFormula)) mean the traced formula
///   table itself is inconsistent; graph construction aborts and nothing is
///   retried,
/// - caller errors ([`ShapeMismatch`](Error::ShapeMismatch),
///   [`YearOutOfRange`](Error::YearOutOfRange),
///   [`NotAnInput`](Error::NotAnInput)) are reported at the setter call site
///   with no partial mutation,
/// - lookup errors ([`UnknownAddress`](Error::UnknownAddress)) mean the caller
///   asked for a cell outside the traced subgraph.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell or range address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Sheet name not part of the traced workbook slice
    #[error("Unknown sheet: {0}")]
    UnknownSheet(String),

    /// Address was never registered in the cell store
    #[error("Unknown address: {0}")]
    UnknownAddress(String),

    /// Attempt to write a derived cell through the input surface
    #[error("Cell {0} is not an input")]
    NotAnInput(String),

    /// A formula references a cell that is neither a formula nor a registered input
    #[error("{referenced_by} references {referenced}, which is neither a formula nor a registered input")]
    UnresolvedReference {
        referenced: String,
        referenced_by: String,
    },

    /// Cycle detected while tracing the dependency graph
    #[error("Cyclic dependency involving cell {0}")]
    CyclicDependency(String),

    /// Formula definition is internally inconsistent (e.g. wrong arity)
    #[error("Malformed formula at {cell}: {detail}")]
    MalformedFormula { cell: String, detail: String },

    /// Year falls outside an input's projection window
    #[error("Year {year} outside the window {first}..={last}")]
    YearOutOfRange { year: i32, first: i32, last: i32 },

    /// Provided data does not match the target range's shape
    #[error("Shape mismatch: target is {expected_rows}x{expected_cols}, got {actual}")]
    ShapeMismatch {
        expected_rows: u32,
        expected_cols: u16,
        actual: String,
    },

    /// Setter key not present in the input-spec table
    #[error("Unknown input group: {0}")]
    UnknownInputGroup(String),

    /// Workbook declares a template version this build was not traced from
    #[error("Unsupported workbook version {found:?}, expected {expected:?}")]
    UnsupportedWorkbookVersion {
        found: String,
        expected: &'static str,
    },

    /// A workbook source failed to produce a value for an input cell
    #[error("Failed to read {address} from workbook: {detail}")]
    WorkbookRead { address: String, detail: String },
}
