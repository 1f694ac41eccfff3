//! Traced output targets: the indicator rows replayed per family

use dsf_replay_core::CellId;

use crate::cells;
use crate::family::{Indicator, StressFamily};
use crate::sheets::{projection_years, year_column, FIRST_PROJECTION_YEAR, LAST_PROJECTION_YEAR};

/// The 22 cells of one indicator row, first projection year to last
pub fn indicator_targets(family: StressFamily, indicator: Indicator) -> Vec<CellId> {
    projection_years()
        .map(|year| cells::indicator_cell(family, indicator, year))
        .collect()
}

/// All traced targets of one family: its four indicator rows
pub fn family_targets(family: StressFamily) -> Vec<CellId> {
    Indicator::ALL
        .iter()
        .flat_map(|&indicator| indicator_targets(family, indicator))
        .collect()
}

/// The A1-style range label of an indicator row, quoted where the sheet
/// name requires it (for example `'B4_other flows_ext'!C39:X39`)
pub fn range_label(family: StressFamily, indicator: Indicator) -> String {
    let first = cells::indicator_cell(family, indicator, FIRST_PROJECTION_YEAR);
    let last_col = CellId::column_to_letters(year_column(LAST_PROJECTION_YEAR));
    format!("{}:{}{}", first, last_col, indicator.row() + 1)
}
