//! Input groups: target shapes, year windows, and published defaults
//!
//! [`INPUT_SPECS`] is the fixed table the setter surface is generated from:
//! one entry per logical input group, naming its shape (year series, range,
//! or year row), its target addresses, and the window it validates against.
//! [`default_inputs`] is the published default value of every input cell; a
//! fresh Context starts from an independent copy of it.

use dsf_replay_core::CellId;

use crate::cells;
use crate::sheets::{
    year_column, EXT_DEBT_DATA, EXT_FINANCING, FIRST_PROJECTION_YEAR, INPUT_BASICS, INPUT_MACRO,
    INPUT_STRESS, LAST_PROJECTION_YEAR, LOCAL_DEBT_FINANCING,
};

/// Inclusive year window an input row accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    pub first: i32,
    pub last: i32,
}

impl YearWindow {
    pub fn contains(&self, year: i32) -> bool {
        (self.first..=self.last).contains(&year)
    }
}

/// The standard projection window, 2023..=2044
pub const PROJECTION_WINDOW: YearWindow = YearWindow {
    first: FIRST_PROJECTION_YEAR,
    last: LAST_PROJECTION_YEAR,
};

/// Stock rows that also carry an end-2022 value in column B
pub const STOCK_WINDOW: YearWindow = YearWindow {
    first: FIRST_PROJECTION_YEAR - 1,
    last: LAST_PROJECTION_YEAR,
};

/// Statically known shape of one input group's target cells
#[derive(Debug, Clone, Copy)]
pub enum InputShape {
    /// One value per year in a fixed row, year-to-column translated
    YearSeries {
        sheet: &'static str,
        row: u32,
        window: YearWindow,
    },
    /// A fixed rectangle: scalar (1x1), vector (1xN / Nx1), or table
    Range {
        sheet: &'static str,
        start_row: u32,
        start_col: u16,
        rows: u32,
        cols: u16,
    },
    /// One value per year fanned out to several rows at that year's column
    YearRow {
        sheet: &'static str,
        rows: &'static [u32],
        window: YearWindow,
    },
}

/// One logical input group, keyed by its role in the workbook
#[derive(Debug, Clone, Copy)]
pub struct InputSpec {
    pub key: &'static str,
    pub shape: InputShape,
}

const fn series(key: &'static str, sheet: &'static str, row: u32) -> InputSpec {
    InputSpec {
        key,
        shape: InputShape::YearSeries {
            sheet,
            row,
            window: PROJECTION_WINDOW,
        },
    }
}

const fn scalar(key: &'static str, sheet: &'static str, row: u32, col: u16) -> InputSpec {
    InputSpec {
        key,
        shape: InputShape::Range {
            sheet,
            start_row: row,
            start_col: col,
            rows: 1,
            cols: 1,
        },
    }
}

/// The fixed input-spec table the setter surface is generated from.
pub static INPUT_SPECS: &[InputSpec] = &[
    // External debt data
    series("ext_debt_data.interest", EXT_DEBT_DATA, 3),
    series("ext_debt_data.principal", EXT_DEBT_DATA, 4),
    InputSpec {
        key: "ext_debt_data.st_locally_issued_debt",
        shape: InputShape::YearSeries {
            sheet: EXT_DEBT_DATA,
            row: 5,
            window: STOCK_WINDOW,
        },
    },
    series("ext_debt_data.st_locally_issued_debt_interest_rate", EXT_DEBT_DATA, 6),
    scalar("ext_debt_data.ppg_external_debt_outstanding", EXT_DEBT_DATA, 7, 1),
    // Macro framework
    series("macro.gross_domestic_product_usd", INPUT_MACRO, 4),
    series("macro.exports_of_goods_and_services", INPUT_MACRO, 5),
    series("macro.government_revenue_and_grants", INPUT_MACRO, 6),
    series("macro.net_fdi_and_current_transfers", INPUT_MACRO, 7),
    // Local-debt financing
    series("local_debt_financing.t_bills_local_currency", LOCAL_DEBT_FINANCING, 9),
    series("local_debt_financing.t_bills_foreign_currency", LOCAL_DEBT_FINANCING, 10),
    series("local_debt_financing.bonds_1_to_3_years_lc", LOCAL_DEBT_FINANCING, 11),
    series("local_debt_financing.bonds_1_to_3_years_fx", LOCAL_DEBT_FINANCING, 12),
    series("local_debt_financing.bonds_4_to_7_years_lc", LOCAL_DEBT_FINANCING, 13),
    series("local_debt_financing.bonds_4_to_7_years_fx", LOCAL_DEBT_FINANCING, 14),
    series("local_debt_financing.bonds_beyond_7_years_lc", LOCAL_DEBT_FINANCING, 15),
    series("local_debt_financing.bonds_beyond_7_years_fx", LOCAL_DEBT_FINANCING, 16),
    series("local_debt_financing.central_bank_financing", LOCAL_DEBT_FINANCING, 17),
    InputSpec {
        key: "local_debt_financing.gross_rollover_by_year",
        shape: InputShape::YearRow {
            sheet: LOCAL_DEBT_FINANCING,
            rows: &cells::LOCAL_LC_ROWS,
            window: PROJECTION_WINDOW,
        },
    },
    // External financing
    series("ext_financing.ida_new_regular", EXT_FINANCING, 9),
    series("ext_financing.ida_new_blend", EXT_FINANCING, 10),
    series("ext_financing.commercial_bank", EXT_FINANCING, 11),
    InputSpec {
        key: "ext_financing.terms",
        shape: InputShape::Range {
            sheet: EXT_FINANCING,
            start_row: 19,
            start_col: 2,
            rows: 3,
            cols: 3,
        },
    },
    InputSpec {
        key: "ext_financing.new_borrowing_interest_rates",
        shape: InputShape::Range {
            sheet: EXT_FINANCING,
            start_row: 19,
            start_col: 2,
            rows: 3,
            cols: 1,
        },
    },
    // Basics and stress parameters
    scalar("basics.first_year_of_projections", INPUT_BASICS, 3, 2),
    scalar("basics.discount_rate", INPUT_BASICS, 4, 2),
    scalar("stress.real_gdp_shock_factor", INPUT_STRESS, 4, 2),
    scalar("stress.export_shock_factor", INPUT_STRESS, 5, 2),
    scalar("stress.other_flows_retention_factor", INPUT_STRESS, 6, 2),
];

/// Look up an input group by key
pub fn input_spec(key: &str) -> Option<&'static InputSpec> {
    INPUT_SPECS.iter().find(|spec| spec.key == key)
}

/// Every cell addressed by an input group's shape, in row-major order
pub fn spec_cells(spec: &InputSpec) -> Vec<CellId> {
    match spec.shape {
        InputShape::YearSeries { sheet, row, window } => (window.first..=window.last)
            .map(|year| CellId::new(sheet, row, year_column(year)))
            .collect(),
        InputShape::Range {
            sheet,
            start_row,
            start_col,
            rows,
            cols,
        } => (start_row..start_row + rows)
            .flat_map(|r| (start_col..start_col + cols).map(move |c| CellId::new(sheet, r, c)))
            .collect(),
        InputShape::YearRow { sheet, rows, window } => (window.first..=window.last)
            .flat_map(|year| {
                rows.iter()
                    .map(move |&r| CellId::new(sheet, r, year_column(year)))
            })
            .collect(),
    }
}

/// The published default value of every input cell.
///
/// Consumed once at Context creation; each Context owns an independent copy
/// of this snapshot, never a shared mutable table.
pub fn default_inputs() -> Vec<(CellId, f64)> {
    let mut defaults: Vec<(CellId, f64)> = vec![
        (cells::first_projection_year(), FIRST_PROJECTION_YEAR as f64),
        (cells::discount_rate(), 0.05),
        (cells::gdp_shock_factor(), 0.95),
        (cells::export_shock_factor(), 0.95),
        (cells::other_flows_retention(), 0.7),
        (cells::debt_stock_2022(), 250.0),
        (cells::st_debt(FIRST_PROJECTION_YEAR - 1), 0.0),
    ];

    for year in crate::sheets::projection_years() {
        defaults.push((cells::gdp(year), 500.0));
        defaults.push((cells::exports(year), 150.0));
        defaults.push((cells::revenue(year), 100.0));
        defaults.push((cells::fdi(year), 8.0));

        defaults.push((cells::ext_interest(year), 2.0));
        defaults.push((cells::ext_principal(year), 3.0));
        defaults.push((cells::st_debt(year), 0.0));
        defaults.push((cells::st_rate(year), 0.05));

        defaults.push((cells::t_bills_lc(year), 2.0));
        defaults.push((cells::t_bills_fx(year), 1.0));
        defaults.push((cells::bonds_1_3_lc(year), 1.0));
        defaults.push((cells::bonds_1_3_fx(year), 0.5));
        defaults.push((cells::bonds_4_7_lc(year), 1.0));
        defaults.push((cells::bonds_4_7_fx(year), 0.5));
        defaults.push((cells::bonds_7p_lc(year), 1.0));
        defaults.push((cells::bonds_7p_fx(year), 0.5));
        defaults.push((cells::central_bank(year), 0.5));

        defaults.push((cells::ida_regular(year), 1.0));
        defaults.push((cells::ida_blend(year), 0.5));
        defaults.push((cells::commercial(year), 0.5));
    }

    // New-borrowing terms matrix: creditor rows x (rate, maturity, grace)
    let (rates, maturities, graces) = ([0.02, 0.03, 0.06], [38.0, 24.0, 10.0], [6.0, 5.0, 1.0]);
    for (i, row) in (19..=21).enumerate() {
        defaults.push((cells::terms(row, 2), rates[i]));
        defaults.push((cells::terms(row, 3), maturities[i]));
        defaults.push((cells::terms(row, 4), graces[i]));
    }

    defaults
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_spec_cell_has_a_default() {
        let defaults: Vec<CellId> = default_inputs().iter().map(|(id, _)| *id).collect();
        for spec in INPUT_SPECS {
            for cell in spec_cells(spec) {
                assert!(
                    defaults.contains(&cell),
                    "{} of group {} has no default",
                    cell,
                    spec.key
                );
            }
        }
    }

    #[test]
    fn test_no_duplicate_defaults() {
        let mut ids: Vec<CellId> = default_inputs().iter().map(|(id, _)| *id).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn test_spec_lookup() {
        assert!(input_spec("ext_debt_data.interest").is_some());
        assert!(input_spec("no.such.group").is_none());
        let st = input_spec("ext_debt_data.st_locally_issued_debt").unwrap();
        match st.shape {
            InputShape::YearSeries { window, .. } => assert_eq!(window.first, 2022),
            _ => panic!("expected a year series"),
        }
    }

    #[test]
    fn test_year_series_cells_follow_columns() {
        let spec = input_spec("macro.gross_domestic_product_usd").unwrap();
        let cells = spec_cells(spec);
        assert_eq!(cells.len(), 22);
        assert_eq!(cells[0].to_string(), "Input_Macro!C5");
        assert_eq!(cells[21].to_string(), "Input_Macro!X5");
    }
}
