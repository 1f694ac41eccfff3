//! Setter surface: payload shapes, validation, atomicity, and the returned
//! assignment records.

use dsf_replay::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn year_series_by_year_reports_written_cells() {
    let mut context = Context::new().unwrap();
    let assignment = context
        .set_ext_debt_data_interest([(2024, 2.5), (2030, 2.8)])
        .unwrap();

    assert_eq!(assignment.key, "ext_debt_data.interest");
    assert_eq!(assignment.len(), 2);
    assert_eq!(assignment.years().collect::<Vec<_>>(), vec![2024, 2030]);
    let (cell, value) = assignment.applied[&2024];
    assert_eq!(cell.to_string(), "Ext_Debt_Data!D4");
    assert_eq!(value, 2.5);
    assert_eq!(
        context.cell_value("Ext_Debt_Data!D4").unwrap(),
        Value::Number(2.5)
    );
}

#[test]
fn year_series_contiguous_starts_at_window_start() {
    let mut context = Context::new().unwrap();
    let assignment = context
        .set_macro_exports_of_goods_and_services(vec![151.0, 152.0, 153.0])
        .unwrap();
    assert_eq!(assignment.years().collect::<Vec<_>>(), vec![2023, 2024, 2025]);
    assert_eq!(
        context.cell_value("Input_Macro!E6").unwrap(),
        Value::Number(153.0)
    );
}

#[test]
fn year_series_contiguous_with_explicit_start() {
    let mut context = Context::new().unwrap();
    let assignment = context
        .set_macro_government_revenue_and_grants(SeriesInput::starting_at(2040, vec![110.0]))
        .unwrap();
    assert_eq!(assignment.years().collect::<Vec<_>>(), vec![2040]);
}

#[test]
fn st_debt_series_accepts_the_stock_year() {
    let mut context = Context::new().unwrap();
    context
        .set_ext_debt_data_nominal_value_pv_of_st_debt_locally_issued_debt([(2022, 50.0)])
        .unwrap();
    assert_eq!(
        context.cell_value("Ext_Debt_Data!B6").unwrap(),
        Value::Number(50.0)
    );
}

#[test]
fn out_of_window_year_rejects_the_whole_call() {
    let mut context = Context::new().unwrap();
    let err = context
        .set_ext_debt_data_principal([(2024, 9.0), (2099, 1.0)])
        .unwrap_err();
    match err {
        Error::YearOutOfRange { year, first, last } => {
            assert_eq!((year, first, last), (2099, 2023, 2044));
        }
        other => panic!("expected YearOutOfRange, got {other:?}"),
    }
    // The in-window year was not written either
    assert_eq!(
        context.cell_value("Ext_Debt_Data!D5").unwrap(),
        Value::Number(3.0)
    );
}

#[test]
fn contiguous_overflow_past_the_window_is_rejected() {
    let mut context = Context::new().unwrap();
    let err = context
        .set_macro_gross_domestic_product_usd(vec![500.0; 23])
        .unwrap_err();
    assert!(matches!(err, Error::YearOutOfRange { year: 2045, .. }));
}

#[test]
fn scalar_range_setters() {
    let mut context = Context::new().unwrap();
    let assignment = context.set_basics_discount_rate(0.06).unwrap();
    assert_eq!((assignment.rows, assignment.cols), (1, 1));
    assert_eq!(assignment.writes[0].0.to_string(), "Input_Basics!C5");
    assert_eq!(
        context.cell_value("Input_Basics!C5").unwrap(),
        Value::Number(0.06)
    );

    let assignment = context
        .set_ext_debt_data_ppg_external_debt_outstanding(260.0)
        .unwrap();
    assert_eq!(assignment.writes[0].0.to_string(), "Ext_Debt_Data!B8");
}

#[test]
fn terms_table_must_match_exactly() {
    let mut context = Context::new().unwrap();
    let assignment = context
        .set_ext_financing_terms([
            [0.02, 38.0, 6.0],
            [0.03, 24.0, 5.0],
            [0.05, 12.0, 2.0],
        ])
        .unwrap();
    assert_eq!((assignment.rows, assignment.cols), (3, 3));
    assert_eq!(assignment.writes.len(), 9);
    assert_eq!(assignment.writes[0].0.to_string(), "Ext_Financing!C20");
    assert_eq!(assignment.writes[8].0.to_string(), "Ext_Financing!E22");

    let err = context
        .set_ext_financing_terms([[0.02, 38.0, 6.0], [0.03, 24.0, 5.0]])
        .unwrap_err();
    assert!(matches!(
        err,
        Error::ShapeMismatch {
            expected_rows: 3,
            expected_cols: 3,
            ..
        }
    ));
}

#[test]
fn scalar_and_flat_vector_rejected_for_the_terms_table() {
    let mut context = Context::new().unwrap();
    assert!(matches!(
        context.set_ext_financing_terms(0.02),
        Err(Error::ShapeMismatch { .. })
    ));
    assert!(matches!(
        context.set_ext_financing_terms([0.02, 0.03, 0.06]),
        Err(Error::ShapeMismatch { .. })
    ));
}

#[test]
fn ragged_table_is_rejected() {
    let mut context = Context::new().unwrap();
    let err = context
        .set_ext_financing_terms(vec![
            vec![0.02, 38.0, 6.0],
            vec![0.03, 24.0],
            vec![0.06, 10.0, 1.0],
        ])
        .unwrap_err();
    match err {
        Error::ShapeMismatch { actual, .. } => assert_eq!(actual, "ragged rows"),
        other => panic!("expected ShapeMismatch, got {other:?}"),
    }
}

#[test]
fn rate_column_accepts_a_flat_vector() {
    let mut context = Context::new().unwrap();
    let assignment = context
        .set_ext_financing_new_borrowing_interest_rates([0.01, 0.02, 0.05])
        .unwrap();
    assert_eq!((assignment.rows, assignment.cols), (3, 1));
    assert_eq!(
        context.cell_value("Ext_Financing!C22").unwrap(),
        Value::Number(0.05)
    );
    // The maturity and grace columns are untouched
    assert_eq!(
        context.cell_value("Ext_Financing!D20").unwrap(),
        Value::Number(38.0)
    );
}

#[test]
fn year_row_fans_one_value_across_the_lc_rows() {
    let mut context = Context::new().unwrap();
    let assignment = context
        .set_local_debt_financing_gross_rollover_by_year([(2024, 9.0)])
        .unwrap();

    let (cells, value) = &assignment.applied[&2024];
    assert_eq!(*value, 9.0);
    let written: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
    assert_eq!(
        written,
        vec![
            "Local_Debt_Financing!D10",
            "Local_Debt_Financing!D12",
            "Local_Debt_Financing!D14",
            "Local_Debt_Financing!D16",
        ]
    );
    for address in &written {
        assert_eq!(context.cell_value(address).unwrap(), Value::Number(9.0));
    }
    // FX rows at the same column keep their defaults
    assert_eq!(
        context.cell_value("Local_Debt_Financing!D11").unwrap(),
        Value::Number(1.0)
    );
}

#[test]
fn set_input_address_escape_hatch() {
    let mut context = Context::new().unwrap();
    context.set_input_address("Input_Macro!C5", 510.0).unwrap();
    assert_eq!(
        context.cell_value("Input_Macro!C5").unwrap(),
        Value::Number(510.0)
    );

    assert!(matches!(
        context.set_input_address("B1_GDP_ext!C35", 1.0),
        Err(Error::NotAnInput(_))
    ));
    assert!(matches!(
        context.set_input_address("Input_Macro!A1", 1.0),
        Err(Error::UnknownAddress(_))
    ));
    assert!(matches!(
        context.set_input_address("NoSuchSheet!C5", 1.0),
        Err(Error::UnknownSheet(_))
    ));
    assert!(matches!(
        context.set_input_address("garbage", 1.0),
        Err(Error::InvalidAddress(_))
    ));
}

#[test]
fn derived_cells_are_blank_until_computed() {
    let mut context = Context::new().unwrap();
    assert_eq!(context.cell_value("B1_GDP_ext!C35").unwrap(), Value::Blank);
    assert!(!context.is_fresh("B1_GDP_ext!C35").unwrap());

    context.compute_b1_pv_debt_to_gdp().unwrap();
    assert!(context.is_fresh("B1_GDP_ext!C35").unwrap());
    assert!(context
        .cell_value("B1_GDP_ext!C35")
        .unwrap()
        .as_number()
        .is_some());
}
