//! Deterministic incremental replay of traced LIC-DSF workbook outputs
//!
//! Replays selected indicator rows of a sovereign debt-sustainability
//! workbook without a spreadsheet engine at runtime. The workbook's formulas
//! were traced once into a fixed table; at runtime a [`Context`] holds the
//! input cells (pre-populated with published defaults), setters overwrite
//! them with full up-front validation, and `compute_*` calls lazily
//! re-evaluate exactly the stale part of the dependency closure.
//!
//! ```
//! use dsf_replay::prelude::*;
//!
//! let mut context = Context::new()?;
//! context.set_ext_debt_data_nominal_value_pv_of_st_debt_locally_issued_debt(
//!     [(2023, 100.0)],
//! )?;
//! let results = context.compute_b1_pv_debt_to_gdp()?;
//! let row = &results["B1_GDP_ext!C35:X35"];
//! assert!((row.to_row_numbers()[0] - 70.3).abs() < 1e-9);
//! # Ok::<(), Error>(())
//! ```

pub mod assignment;
mod compute;
mod context;
pub mod prelude;
mod setters;
mod workbook;

pub use assignment::{
    RangeAssignment, RangeInput, SeriesInput, YearRowAssignment, YearSeriesAssignment,
};
pub use context::Context;
pub use workbook::{WorkbookSource, TEMPLATE_VERSION};

pub use dsf_replay_core::{CellId, Error, Grid, RangeRef, Result, SheetRegistry, Value};
pub use dsf_replay_model::{
    Indicator, StressFamily, FIRST_PROJECTION_YEAR, LAST_PROJECTION_YEAR, PROJECTION_YEARS,
};
