//! Sheet names and the projection window of the traced template
//!
//! Sheet names match the source workbook exactly so every address printed by
//! this crate can be located in the original template. The projection window
//! is fixed at trace time: 22 years, 2023 through 2044, mapped to columns C
//! through X. Column B carries end-2022 stocks where a recursion needs a
//! pre-projection value.

use dsf_replay_core::SheetRegistry;

pub const INPUT_BASICS: &str = "Input_Basics";
pub const INPUT_STRESS: &str = "Input_Stress";
pub const INPUT_MACRO: &str = "Input_Macro";
pub const EXT_DEBT_DATA: &str = "Ext_Debt_Data";
pub const LOCAL_DEBT_FINANCING: &str = "Local_Debt_Financing";
pub const EXT_FINANCING: &str = "Ext_Financing";
pub const B1_GDP_EXT: &str = "B1_GDP_ext";
pub const B3_EXPORTS_EXT: &str = "B3_Exports_ext";
pub const B4_OTHER_FLOWS_EXT: &str = "B4_other flows_ext";

/// Every sheet a traced address may name
pub static SHEETS: SheetRegistry = SheetRegistry::new(&[
    INPUT_BASICS,
    INPUT_STRESS,
    INPUT_MACRO,
    EXT_DEBT_DATA,
    LOCAL_DEBT_FINANCING,
    EXT_FINANCING,
    B1_GDP_EXT,
    B3_EXPORTS_EXT,
    B4_OTHER_FLOWS_EXT,
]);

/// First projection year (column C)
pub const FIRST_PROJECTION_YEAR: i32 = 2023;
/// Last projection year (column X)
pub const LAST_PROJECTION_YEAR: i32 = 2044;
/// Length of the projection window
pub const PROJECTION_YEARS: usize =
    (LAST_PROJECTION_YEAR - FIRST_PROJECTION_YEAR + 1) as usize;
/// Column B: end-2022 stocks
pub const HISTORY_COL: u16 = 1;

/// Column index for a model year (2022 maps to column B, 2023 to C, ...).
/// Callers validate the year against the relevant window first.
pub fn year_column(year: i32) -> u16 {
    (HISTORY_COL as i32 + (year - (FIRST_PROJECTION_YEAR - 1))) as u16
}

/// The projection years in order
pub fn projection_years() -> impl Iterator<Item = i32> {
    FIRST_PROJECTION_YEAR..=LAST_PROJECTION_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsf_replay_core::CellId;

    #[test]
    fn test_year_column_mapping() {
        assert_eq!(year_column(2022), 1); // B
        assert_eq!(year_column(2023), 2); // C
        assert_eq!(year_column(2044), 23); // X
        assert_eq!(CellId::column_to_letters(year_column(2044)), "X");
        assert_eq!(PROJECTION_YEARS, 22);
    }

    #[test]
    fn test_registry_resolves_quoted_sheet() {
        assert_eq!(
            SHEETS.resolve("B4_other flows_ext").unwrap(),
            B4_OTHER_FLOWS_EXT
        );
        assert!(SHEETS.resolve("B2_GDP_ext").is_err());
    }
}
