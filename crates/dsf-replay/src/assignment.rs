//! Setter payloads and the typed records setters return
//!
//! An assignment is a pure value object: it reports exactly which addresses
//! a setter wrote and with which values, after the write has fully happened.
//! Rejected calls return an error instead and write nothing.

use std::collections::BTreeMap;

use dsf_replay_core::CellId;

/// Values for a year-series or year-row setter.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesInput {
    /// Explicit year → value pairs, in any order
    ByYear(BTreeMap<i32, f64>),
    /// Consecutive yearly values; `start_year` of `None` means the first
    /// year of the input's window
    Contiguous {
        start_year: Option<i32>,
        values: Vec<f64>,
    },
}

impl SeriesInput {
    /// Consecutive values beginning at an explicit year
    pub fn starting_at(year: i32, values: impl Into<Vec<f64>>) -> Self {
        SeriesInput::Contiguous {
            start_year: Some(year),
            values: values.into(),
        }
    }
}

impl From<Vec<f64>> for SeriesInput {
    fn from(values: Vec<f64>) -> Self {
        SeriesInput::Contiguous {
            start_year: None,
            values,
        }
    }
}

impl<const N: usize> From<[f64; N]> for SeriesInput {
    fn from(values: [f64; N]) -> Self {
        SeriesInput::Contiguous {
            start_year: None,
            values: values.to_vec(),
        }
    }
}

impl From<BTreeMap<i32, f64>> for SeriesInput {
    fn from(values: BTreeMap<i32, f64>) -> Self {
        SeriesInput::ByYear(values)
    }
}

impl<const N: usize> From<[(i32, f64); N]> for SeriesInput {
    fn from(pairs: [(i32, f64); N]) -> Self {
        SeriesInput::ByYear(pairs.into_iter().collect())
    }
}

/// Values for a range setter.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeInput {
    /// A single value; the target must be a 1×1 range
    Scalar(f64),
    /// A flat vector matching either the row or the column extent of the
    /// target
    Vector(Vec<f64>),
    /// A rectangular table matching the target exactly, row-major
    Table(Vec<Vec<f64>>),
}

impl From<f64> for RangeInput {
    fn from(value: f64) -> Self {
        RangeInput::Scalar(value)
    }
}

impl From<Vec<f64>> for RangeInput {
    fn from(values: Vec<f64>) -> Self {
        RangeInput::Vector(values)
    }
}

impl<const N: usize> From<[f64; N]> for RangeInput {
    fn from(values: [f64; N]) -> Self {
        RangeInput::Vector(values.to_vec())
    }
}

impl From<Vec<Vec<f64>>> for RangeInput {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        RangeInput::Table(rows)
    }
}

impl<const R: usize, const C: usize> From<[[f64; C]; R]> for RangeInput {
    fn from(rows: [[f64; C]; R]) -> Self {
        RangeInput::Table(rows.iter().map(|row| row.to_vec()).collect())
    }
}

/// Record of a completed year-series write.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct YearSeriesAssignment {
    /// Input-group key the setter was generated from
    pub key: &'static str,
    /// Year → (written address, written value)
    pub applied: BTreeMap<i32, (CellId, f64)>,
}

impl YearSeriesAssignment {
    /// Years written, ascending
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.applied.keys().copied()
    }

    /// Number of cells written
    pub fn len(&self) -> usize {
        self.applied.len()
    }

    /// Whether the call wrote nothing (an empty payload)
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Record of a completed range write.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RangeAssignment {
    pub key: &'static str,
    /// Target extent
    pub rows: u32,
    pub cols: u16,
    /// (address, value) in row-major target order
    pub writes: Vec<(CellId, f64)>,
}

/// Record of a completed year-row write: one value per year, fanned out to
/// several rows at that year's column.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct YearRowAssignment {
    pub key: &'static str,
    /// Year → (written addresses, shared value)
    pub applied: BTreeMap<i32, (Vec<CellId>, f64)>,
}
