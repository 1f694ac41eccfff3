//! The generated setter surface
//!
//! Three apply routines, one per input shape, plus one public method per
//! input group generated by `macro_rules!` from the model's input-spec
//! table. Every setter validates the whole payload before writing anything:
//! a rejected call leaves the context untouched.

use std::collections::BTreeMap;

use dsf_replay_core::{CellId, Error, Result};
use dsf_replay_model::{input_spec, year_column, InputShape, YearWindow};
use log::debug;

use crate::assignment::{
    RangeAssignment, RangeInput, SeriesInput, YearRowAssignment, YearSeriesAssignment,
};
use crate::context::Context;

/// Resolve a series payload to ascending (year, value) pairs within `window`
fn resolve_series(values: SeriesInput, window: YearWindow) -> Result<Vec<(i32, f64)>> {
    let out_of_range = |year| Error::YearOutOfRange {
        year,
        first: window.first,
        last: window.last,
    };
    match values {
        SeriesInput::ByYear(map) => {
            for &year in map.keys() {
                if !window.contains(year) {
                    return Err(out_of_range(year));
                }
            }
            Ok(map.into_iter().collect())
        }
        SeriesInput::Contiguous { start_year, values } => {
            let start = start_year.unwrap_or(window.first);
            values
                .into_iter()
                .enumerate()
                .map(|(i, value)| {
                    let year = start + i as i32;
                    if !window.contains(year) {
                        return Err(out_of_range(year));
                    }
                    Ok((year, value))
                })
                .collect()
        }
    }
}

impl Context {
    /// Check that every planned write hits a registered input cell. Runs
    /// before the first mutation so failures leave the context untouched.
    fn check_writable(&self, cells: impl IntoIterator<Item = CellId>) -> Result<()> {
        for cell in cells {
            if !self.store.contains(cell) {
                return Err(Error::UnknownAddress(cell.to_string()));
            }
            if !self.store.is_input(cell) {
                return Err(Error::NotAnInput(cell.to_string()));
            }
        }
        Ok(())
    }

    pub(crate) fn apply_year_series(
        &mut self,
        key: &'static str,
        values: SeriesInput,
    ) -> Result<YearSeriesAssignment> {
        let spec = input_spec(key).ok_or_else(|| Error::UnknownInputGroup(key.to_string()))?;
        let InputShape::YearSeries { sheet, row, window } = spec.shape else {
            return Err(Error::UnknownInputGroup(format!(
                "{key} is not a year-series input"
            )));
        };

        let pairs = resolve_series(values, window)?;
        let cells: Vec<CellId> = pairs
            .iter()
            .map(|&(year, _)| CellId::new(sheet, row, year_column(year)))
            .collect();
        self.check_writable(cells.iter().copied())?;

        let mut applied = BTreeMap::new();
        for (&(year, value), &cell) in pairs.iter().zip(&cells) {
            self.write_input(cell, value)?;
            applied.insert(year, (cell, value));
        }
        debug!("{key}: wrote {} year cells", applied.len());
        Ok(YearSeriesAssignment { key, applied })
    }

    pub(crate) fn apply_range(
        &mut self,
        key: &'static str,
        values: RangeInput,
    ) -> Result<RangeAssignment> {
        let spec = input_spec(key).ok_or_else(|| Error::UnknownInputGroup(key.to_string()))?;
        let InputShape::Range {
            sheet,
            start_row,
            start_col,
            rows,
            cols,
        } = spec.shape
        else {
            return Err(Error::UnknownInputGroup(format!(
                "{key} is not a range input"
            )));
        };
        let mismatch = |actual: String| Error::ShapeMismatch {
            expected_rows: rows,
            expected_cols: cols,
            actual,
        };

        // Flatten the payload to row-major target order
        let flat: Vec<f64> = match values {
            RangeInput::Scalar(value) => {
                if rows != 1 || cols != 1 {
                    return Err(mismatch("a scalar".to_string()));
                }
                vec![value]
            }
            RangeInput::Vector(values) => {
                let fits_row = rows == 1 && values.len() == cols as usize;
                let fits_col = cols == 1 && values.len() == rows as usize;
                if !fits_row && !fits_col {
                    return Err(mismatch(format!("a vector of {}", values.len())));
                }
                values
            }
            RangeInput::Table(table) => {
                if table.iter().any(|r| r.len() != table[0].len()) {
                    return Err(mismatch("ragged rows".to_string()));
                }
                if table.len() != rows as usize
                    || table.first().map_or(0, Vec::len) != cols as usize
                {
                    return Err(mismatch(format!(
                        "{}x{}",
                        table.len(),
                        table.first().map_or(0, Vec::len)
                    )));
                }
                table.into_iter().flatten().collect()
            }
        };

        let cells: Vec<CellId> = (start_row..start_row + rows)
            .flat_map(|r| (start_col..start_col + cols).map(move |c| CellId::new(sheet, r, c)))
            .collect();
        self.check_writable(cells.iter().copied())?;

        let mut writes = Vec::with_capacity(cells.len());
        for (&cell, &value) in cells.iter().zip(&flat) {
            self.write_input(cell, value)?;
            writes.push((cell, value));
        }
        debug!("{key}: wrote {rows}x{cols} range");
        Ok(RangeAssignment {
            key,
            rows,
            cols,
            writes,
        })
    }

    pub(crate) fn apply_year_row(
        &mut self,
        key: &'static str,
        values: SeriesInput,
    ) -> Result<YearRowAssignment> {
        let spec = input_spec(key).ok_or_else(|| Error::UnknownInputGroup(key.to_string()))?;
        let InputShape::YearRow { sheet, rows, window } = spec.shape else {
            return Err(Error::UnknownInputGroup(format!(
                "{key} is not a year-row input"
            )));
        };

        let pairs = resolve_series(values, window)?;
        let fan = |year| -> Vec<CellId> {
            rows.iter()
                .map(|&r| CellId::new(sheet, r, year_column(year)))
                .collect()
        };
        self.check_writable(pairs.iter().flat_map(|&(year, _)| fan(year)))?;

        let mut applied = BTreeMap::new();
        for &(year, value) in &pairs {
            let cells = fan(year);
            for &cell in &cells {
                self.write_input(cell, value)?;
            }
            applied.insert(year, (cells, value));
        }
        debug!(
            "{key}: wrote {} rows across {} years",
            rows.len(),
            applied.len()
        );
        Ok(YearRowAssignment { key, applied })
    }
}

macro_rules! year_series_setters {
    ($($(#[$meta:meta])* $name:ident => $key:literal;)+) => {
        impl Context {
            $(
                $(#[$meta])*
                pub fn $name(
                    &mut self,
                    values: impl Into<SeriesInput>,
                ) -> Result<YearSeriesAssignment> {
                    self.apply_year_series($key, values.into())
                }
            )+
        }
    };
}

macro_rules! range_setters {
    ($($(#[$meta:meta])* $name:ident => $key:literal;)+) => {
        impl Context {
            $(
                $(#[$meta])*
                pub fn $name(
                    &mut self,
                    values: impl Into<RangeInput>,
                ) -> Result<RangeAssignment> {
                    self.apply_range($key, values.into())
                }
            )+
        }
    };
}

macro_rules! year_row_setters {
    ($($(#[$meta:meta])* $name:ident => $key:literal;)+) => {
        impl Context {
            $(
                $(#[$meta])*
                pub fn $name(
                    &mut self,
                    values: impl Into<SeriesInput>,
                ) -> Result<YearRowAssignment> {
                    self.apply_year_row($key, values.into())
                }
            )+
        }
    };
}

year_series_setters! {
    /// Interest due on existing external debt, `Ext_Debt_Data` row 4
    set_ext_debt_data_interest => "ext_debt_data.interest";
    /// Principal due on existing external debt, `Ext_Debt_Data` row 5
    set_ext_debt_data_principal => "ext_debt_data.principal";
    /// Nominal value / PV of short-term locally issued debt,
    /// `Ext_Debt_Data` row 6. Accepts the end-2022 stock year as well.
    set_ext_debt_data_nominal_value_pv_of_st_debt_locally_issued_debt =>
        "ext_debt_data.st_locally_issued_debt";
    /// Interest rate on short-term locally issued debt, `Ext_Debt_Data` row 7
    set_ext_debt_data_st_locally_issued_debt_interest_rate =>
        "ext_debt_data.st_locally_issued_debt_interest_rate";
    /// Nominal GDP in US dollars, `Input_Macro` row 5
    set_macro_gross_domestic_product_usd => "macro.gross_domestic_product_usd";
    /// Exports of goods and services, `Input_Macro` row 6
    set_macro_exports_of_goods_and_services => "macro.exports_of_goods_and_services";
    /// Government revenue and grants, `Input_Macro` row 7
    set_macro_government_revenue_and_grants => "macro.government_revenue_and_grants";
    /// Net FDI and current transfers, `Input_Macro` row 8
    set_macro_net_fdi_and_current_transfers => "macro.net_fdi_and_current_transfers";
    set_local_debt_financing_t_bills_local_currency =>
        "local_debt_financing.t_bills_local_currency";
    set_local_debt_financing_t_bills_foreign_currency =>
        "local_debt_financing.t_bills_foreign_currency";
    set_local_debt_financing_bonds_1_to_3_years_lc =>
        "local_debt_financing.bonds_1_to_3_years_lc";
    set_local_debt_financing_bonds_1_to_3_years_fx =>
        "local_debt_financing.bonds_1_to_3_years_fx";
    set_local_debt_financing_bonds_4_to_7_years_lc =>
        "local_debt_financing.bonds_4_to_7_years_lc";
    set_local_debt_financing_bonds_4_to_7_years_fx =>
        "local_debt_financing.bonds_4_to_7_years_fx";
    set_local_debt_financing_bonds_beyond_7_years_lc =>
        "local_debt_financing.bonds_beyond_7_years_lc";
    set_local_debt_financing_bonds_beyond_7_years_fx =>
        "local_debt_financing.bonds_beyond_7_years_fx";
    set_local_debt_financing_central_bank_financing =>
        "local_debt_financing.central_bank_financing";
    /// IDA regular-terms disbursements, `Ext_Financing` row 10
    set_ext_financing_ida_new_regular => "ext_financing.ida_new_regular";
    /// IDA blend-terms disbursements, `Ext_Financing` row 11
    set_ext_financing_ida_new_blend => "ext_financing.ida_new_blend";
    /// Commercial-bank disbursements, `Ext_Financing` row 12
    set_ext_financing_commercial_bank => "ext_financing.commercial_bank";
}

range_setters! {
    /// First year of projections, `Input_Basics!C4`
    set_basics_first_year_of_projections => "basics.first_year_of_projections";
    /// Discount rate, `Input_Basics!C5`
    set_basics_discount_rate => "basics.discount_rate";
    /// B1 real-GDP shock factor, `Input_Stress!C5`
    set_stress_real_gdp_shock_factor => "stress.real_gdp_shock_factor";
    /// B3 export shock factor, `Input_Stress!C6`
    set_stress_export_shock_factor => "stress.export_shock_factor";
    /// B4 other-flows retention factor, `Input_Stress!C7`
    set_stress_other_flows_retention_factor => "stress.other_flows_retention_factor";
    /// PPG external debt outstanding at end-2022, `Ext_Debt_Data!B8`
    set_ext_debt_data_ppg_external_debt_outstanding =>
        "ext_debt_data.ppg_external_debt_outstanding";
    /// New-borrowing terms matrix `Ext_Financing!C20:E22`,
    /// creditor rows × (rate, maturity, grace)
    set_ext_financing_terms => "ext_financing.terms";
    /// Just the rate column of the terms matrix, `Ext_Financing!C20:C22`
    set_ext_financing_new_borrowing_interest_rates =>
        "ext_financing.new_borrowing_interest_rates";
}

year_row_setters! {
    /// One gross-rollover value per year, fanned out to the four
    /// local-currency instrument rows of `Local_Debt_Financing`
    set_local_debt_financing_gross_rollover_by_year =>
        "local_debt_financing.gross_rollover_by_year";
}
