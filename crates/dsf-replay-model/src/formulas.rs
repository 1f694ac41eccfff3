//! The traced formula table
//!
//! Every derived cell of the three bound-test families, written out as data.
//! The table is built once and shared; graphs are traced from it per family.
//!
//! The replayed mechanics, per family sheet:
//!
//! * stressed GDP / exports (rows 20, 21): the input series, scaled by the
//!   shock factor in the shock years of the family that stresses it,
//!   passed through unchanged everywhere else
//! * FX-denominated gross financing (row 24): sum of the foreign-currency
//!   local instruments and the three external creditor lines
//! * PV of PPG external debt (row 28): recursion from the end-2022 stock,
//!   adding FX financing and short-term locally issued debt, netting out
//!   amortization; the B4 family also adds the FDI shortfall
//! * post-2022 borrowing stock (row 29): PV less the end-2022 stock
//! * short-term and new-borrowing interest (rows 30, 31): rate times the
//!   prior year's stock; new-borrowing interest is zero in the first year
//! * total debt service (row 33): existing interest and amortization plus
//!   the two interest rows
//! * the four indicator rows (35, 36, 39, 40): ratios scaled to percent
//!   against stressed GDP, stressed exports, or revenue

use dsf_replay_engine::{Formula, FormulaTable};
use once_cell::sync::Lazy;

use crate::cells;
use crate::family::{Indicator, StressFamily, SHOCK_YEARS};
use crate::sheets::{projection_years, FIRST_PROJECTION_YEAR};

static TABLE: Lazy<FormulaTable> = Lazy::new(build_table);

/// The formula definitions of every traced derived cell
pub fn formula_table() -> &'static FormulaTable {
    &TABLE
}

fn build_table() -> FormulaTable {
    let mut table = FormulaTable::new();

    // Average interest rate on new external borrowing, Ext_Financing!C25:
    // unweighted mean of the three creditor rates
    table.insert(
        cells::avg_new_borrowing_rate(),
        Formula::Linear {
            intercept: 0.0,
            coeffs: vec![1.0 / 3.0; 3],
        },
        vec![cells::terms(19, 2), cells::terms(20, 2), cells::terms(21, 2)],
    );

    // B4 shock multiplier, 'B4_other flows_ext'!B18: 1 - retention factor
    table.insert(
        cells::shock_multiplier(),
        Formula::Linear {
            intercept: 1.0,
            coeffs: vec![-1.0],
        },
        vec![cells::other_flows_retention()],
    );

    for family in StressFamily::ALL {
        insert_family(&mut table, family);
    }
    table
}

fn insert_family(table: &mut FormulaTable, family: StressFamily) {
    for year in projection_years() {
        let shocked = SHOCK_YEARS.contains(&year);

        // Row 20: stressed GDP
        if family == StressFamily::B1Gdp && shocked {
            table.insert(
                cells::stressed_gdp(family, year),
                Formula::Product,
                vec![cells::gdp(year), cells::gdp_shock_factor()],
            );
        } else {
            table.insert(
                cells::stressed_gdp(family, year),
                Formula::identity(),
                vec![cells::gdp(year)],
            );
        }

        // Row 21: stressed exports
        if family == StressFamily::B3Exports && shocked {
            table.insert(
                cells::stressed_exports(family, year),
                Formula::Product,
                vec![cells::exports(year), cells::export_shock_factor()],
            );
        } else {
            table.insert(
                cells::stressed_exports(family, year),
                Formula::identity(),
                vec![cells::exports(year)],
            );
        }

        // Row 24: FX-denominated gross financing
        table.insert(
            cells::fx_financing(family, year),
            Formula::Sum,
            vec![
                cells::t_bills_fx(year),
                cells::bonds_1_3_fx(year),
                cells::bonds_4_7_fx(year),
                cells::bonds_7p_fx(year),
                cells::ida_regular(year),
                cells::ida_blend(year),
                cells::commercial(year),
            ],
        );

        // Row 25, B4 only: FDI shortfall, present in the shock years alone
        let b4_shortfall = family == StressFamily::B4OtherFlows && shocked;
        if b4_shortfall {
            table.insert(
                cells::fdi_shortfall(year),
                Formula::Product,
                vec![cells::fdi(year), cells::shock_multiplier()],
            );
        }

        // Row 28: PV of PPG external debt recursion
        let prev_pv = if year == FIRST_PROJECTION_YEAR {
            cells::debt_stock_2022()
        } else {
            cells::pv_debt(family, year - 1)
        };
        let mut pv_deps = vec![
            prev_pv,
            cells::fx_financing(family, year),
            cells::ext_principal(year),
            cells::st_debt(year),
        ];
        let mut pv_coeffs = vec![1.0, 1.0, -1.0, 1.0];
        if b4_shortfall {
            pv_deps.push(cells::fdi_shortfall(year));
            pv_coeffs.push(1.0);
        }
        table.insert(
            cells::pv_debt(family, year),
            Formula::Linear {
                intercept: 0.0,
                coeffs: pv_coeffs,
            },
            pv_deps,
        );

        // Row 29: borrowing contracted after end-2022
        table.insert(
            cells::new_debt_stock(family, year),
            Formula::Linear {
                intercept: 0.0,
                coeffs: vec![1.0, -1.0],
            },
            vec![cells::pv_debt(family, year), cells::debt_stock_2022()],
        );

        // Row 30: interest on short-term locally issued debt
        table.insert(
            cells::st_interest(family, year),
            Formula::Product,
            vec![cells::st_rate(year), cells::st_debt(year - 1)],
        );

        // Row 31: interest on post-2022 borrowing; none accrues in year one
        if year == FIRST_PROJECTION_YEAR {
            table.insert(cells::new_interest(family, year), Formula::Const(0.0), vec![]);
        } else {
            table.insert(
                cells::new_interest(family, year),
                Formula::Product,
                vec![
                    cells::avg_new_borrowing_rate(),
                    cells::new_debt_stock(family, year - 1),
                ],
            );
        }

        // Row 33: total PPG external debt service
        table.insert(
            cells::debt_service(family, year),
            Formula::Sum,
            vec![
                cells::ext_interest(year),
                cells::ext_principal(year),
                cells::st_interest(family, year),
                cells::new_interest(family, year),
            ],
        );

        // Indicator rows, percent-scaled ratios
        table.insert(
            cells::indicator_cell(family, Indicator::PvDebtToGdp, year),
            Formula::Ratio { scale: 100.0 },
            vec![cells::pv_debt(family, year), cells::stressed_gdp(family, year)],
        );
        table.insert(
            cells::indicator_cell(family, Indicator::PvDebtToExports, year),
            Formula::Ratio { scale: 100.0 },
            vec![
                cells::pv_debt(family, year),
                cells::stressed_exports(family, year),
            ],
        );
        table.insert(
            cells::indicator_cell(family, Indicator::DebtServiceToExports, year),
            Formula::Ratio { scale: 100.0 },
            vec![
                cells::debt_service(family, year),
                cells::stressed_exports(family, year),
            ],
        );
        table.insert(
            cells::indicator_cell(family, Indicator::DebtServiceToRevenue, year),
            Formula::Ratio { scale: 100.0 },
            vec![cells::debt_service(family, year), cells::revenue(year)],
        );
    }
}
