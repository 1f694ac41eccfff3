//! Named accessors for every traced cell address
//!
//! One function per traced row or scalar keeps the row/column arithmetic in
//! a single place; the formula table, the input-spec table, and the tests
//! all address cells through these.

use dsf_replay_core::CellId;

use crate::family::{Indicator, StressFamily};
use crate::sheets::{
    year_column, EXT_DEBT_DATA, EXT_FINANCING, INPUT_BASICS, INPUT_MACRO, INPUT_STRESS,
    LOCAL_DEBT_FINANCING,
};

// Input_Basics
pub fn first_projection_year() -> CellId {
    CellId::new(INPUT_BASICS, 3, 2) // C4
}
pub fn discount_rate() -> CellId {
    CellId::new(INPUT_BASICS, 4, 2) // C5
}

// Input_Stress
pub fn gdp_shock_factor() -> CellId {
    CellId::new(INPUT_STRESS, 4, 2) // C5
}
pub fn export_shock_factor() -> CellId {
    CellId::new(INPUT_STRESS, 5, 2) // C6
}
pub fn other_flows_retention() -> CellId {
    CellId::new(INPUT_STRESS, 6, 2) // C7
}

// Input_Macro, rows 5..8
pub fn gdp(year: i32) -> CellId {
    CellId::new(INPUT_MACRO, 4, year_column(year))
}
pub fn exports(year: i32) -> CellId {
    CellId::new(INPUT_MACRO, 5, year_column(year))
}
pub fn revenue(year: i32) -> CellId {
    CellId::new(INPUT_MACRO, 6, year_column(year))
}
pub fn fdi(year: i32) -> CellId {
    CellId::new(INPUT_MACRO, 7, year_column(year))
}

// Ext_Debt_Data
pub fn debt_stock_2022() -> CellId {
    CellId::new(EXT_DEBT_DATA, 7, 1) // B8
}
pub fn ext_interest(year: i32) -> CellId {
    CellId::new(EXT_DEBT_DATA, 3, year_column(year)) // row 4
}
pub fn ext_principal(year: i32) -> CellId {
    CellId::new(EXT_DEBT_DATA, 4, year_column(year)) // row 5
}
/// Nominal value / PV of ST locally issued debt; window starts at 2022
pub fn st_debt(year: i32) -> CellId {
    CellId::new(EXT_DEBT_DATA, 5, year_column(year)) // row 6
}
pub fn st_rate(year: i32) -> CellId {
    CellId::new(EXT_DEBT_DATA, 6, year_column(year)) // row 7
}

// Local_Debt_Financing, rows 10..18
pub const LOCAL_ROWS: [u32; 9] = [9, 10, 11, 12, 13, 14, 15, 16, 17];
/// The four local-currency instrument rows (t-bills LC plus the LC bond buckets)
pub const LOCAL_LC_ROWS: [u32; 4] = [9, 11, 13, 15];

pub fn local_row(row: u32, year: i32) -> CellId {
    CellId::new(LOCAL_DEBT_FINANCING, row, year_column(year))
}
pub fn t_bills_lc(year: i32) -> CellId {
    local_row(9, year)
}
pub fn t_bills_fx(year: i32) -> CellId {
    local_row(10, year)
}
pub fn bonds_1_3_lc(year: i32) -> CellId {
    local_row(11, year)
}
pub fn bonds_1_3_fx(year: i32) -> CellId {
    local_row(12, year)
}
pub fn bonds_4_7_lc(year: i32) -> CellId {
    local_row(13, year)
}
pub fn bonds_4_7_fx(year: i32) -> CellId {
    local_row(14, year)
}
pub fn bonds_7p_lc(year: i32) -> CellId {
    local_row(15, year)
}
pub fn bonds_7p_fx(year: i32) -> CellId {
    local_row(16, year)
}
pub fn central_bank(year: i32) -> CellId {
    local_row(17, year)
}

// Ext_Financing
pub fn ida_regular(year: i32) -> CellId {
    CellId::new(EXT_FINANCING, 9, year_column(year)) // row 10
}
pub fn ida_blend(year: i32) -> CellId {
    CellId::new(EXT_FINANCING, 10, year_column(year)) // row 11
}
pub fn commercial(year: i32) -> CellId {
    CellId::new(EXT_FINANCING, 11, year_column(year)) // row 12
}
/// New-borrowing terms matrix C20:E22, creditor rows × (rate, maturity, grace)
pub fn terms(row: u32, col: u16) -> CellId {
    debug_assert!((19..=21).contains(&row) && (2..=4).contains(&col));
    CellId::new(EXT_FINANCING, row, col)
}
/// Derived: average interest rate on new external borrowing (C25)
pub fn avg_new_borrowing_rate() -> CellId {
    CellId::new(EXT_FINANCING, 24, 2)
}

// Family-sheet derived rows
pub fn stressed_gdp(family: StressFamily, year: i32) -> CellId {
    CellId::new(family.sheet(), 19, year_column(year)) // row 20
}
pub fn stressed_exports(family: StressFamily, year: i32) -> CellId {
    CellId::new(family.sheet(), 20, year_column(year)) // row 21
}
pub fn fx_financing(family: StressFamily, year: i32) -> CellId {
    CellId::new(family.sheet(), 23, year_column(year)) // row 24
}
/// B4 only: the FDI shortfall in shock years (row 25)
pub fn fdi_shortfall(year: i32) -> CellId {
    CellId::new(StressFamily::B4OtherFlows.sheet(), 24, year_column(year))
}
/// B4 only: shock multiplier `1 - retention factor` (B18)
pub fn shock_multiplier() -> CellId {
    CellId::new(StressFamily::B4OtherFlows.sheet(), 17, 1)
}
pub fn pv_debt(family: StressFamily, year: i32) -> CellId {
    CellId::new(family.sheet(), 27, year_column(year)) // row 28
}
pub fn new_debt_stock(family: StressFamily, year: i32) -> CellId {
    CellId::new(family.sheet(), 28, year_column(year)) // row 29
}
pub fn st_interest(family: StressFamily, year: i32) -> CellId {
    CellId::new(family.sheet(), 29, year_column(year)) // row 30
}
pub fn new_interest(family: StressFamily, year: i32) -> CellId {
    CellId::new(family.sheet(), 30, year_column(year)) // row 31
}
pub fn debt_service(family: StressFamily, year: i32) -> CellId {
    CellId::new(family.sheet(), 32, year_column(year)) // row 33
}
pub fn indicator_cell(family: StressFamily, indicator: Indicator, year: i32) -> CellId {
    CellId::new(family.sheet(), indicator.row(), year_column(year))
}
