//! The traced LIC-DSF workbook slice
//!
//! Everything this crate exports is data about one fixed template trace:
//! which sheets exist, which cells are inputs (and their published default
//! values), which derived cells carry formulas, and which indicator rows are
//! the replayed outputs. The mechanics of storing, tracing, and evaluating
//! live in `dsf-replay-engine`; this crate only describes the model.

pub mod cells;
pub mod family;
pub mod formulas;
pub mod inputs;
pub mod sheets;
pub mod targets;

pub use family::{Indicator, StressFamily, SHOCK_YEARS};
pub use formulas::formula_table;
pub use inputs::{
    default_inputs, input_spec, spec_cells, InputShape, InputSpec, YearWindow, INPUT_SPECS,
    PROJECTION_WINDOW, STOCK_WINDOW,
};
pub use sheets::{
    projection_years, year_column, FIRST_PROJECTION_YEAR, LAST_PROJECTION_YEAR, PROJECTION_YEARS,
    SHEETS,
};
pub use targets::{family_targets, indicator_targets, range_label};
