//! Convenience re-exports for typical callers

pub use crate::assignment::{
    RangeAssignment, RangeInput, SeriesInput, YearRowAssignment, YearSeriesAssignment,
};
pub use crate::context::Context;
pub use crate::workbook::{WorkbookSource, TEMPLATE_VERSION};
pub use dsf_replay_core::{CellId, Error, Grid, Result, Value};
pub use dsf_replay_model::{Indicator, StressFamily};
