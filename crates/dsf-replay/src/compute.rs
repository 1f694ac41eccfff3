//! Compute entry points: one per replayed indicator row, plus `compute_all`
//!
//! Results are keyed by the workbook's own range labels (for example
//! `B1_GDP_ext!C35:X35`) so they can be checked cell-for-cell against the
//! original template. Computing is read-only with respect to inputs; it only
//! refreshes derived cells.

use std::collections::BTreeMap;

use dsf_replay_core::{Grid, Result};
use dsf_replay_engine::Evaluator;
use dsf_replay_model::{indicator_targets, range_label, Indicator, StressFamily};

use crate::context::{family_graph, Context};

impl Context {
    /// One indicator row of one family as a 1×22 grid, first projection
    /// year to last. Recomputes only the stale part of the family's closure.
    pub fn compute_indicator(
        &mut self,
        family: StressFamily,
        indicator: Indicator,
    ) -> Result<Grid> {
        let graph = family_graph(&self.graphs, family);
        let targets = indicator_targets(family, indicator);
        Evaluator::new(&mut self.store, graph).evaluate_row(&targets)
    }

    /// Every replayed indicator row, keyed by range label.
    pub fn compute_all(&mut self) -> Result<BTreeMap<String, Grid>> {
        let mut results = BTreeMap::new();
        for family in StressFamily::ALL {
            for indicator in Indicator::ALL {
                results.insert(
                    range_label(family, indicator),
                    self.compute_indicator(family, indicator)?,
                );
            }
        }
        Ok(results)
    }

    fn compute_labeled(
        &mut self,
        family: StressFamily,
        indicator: Indicator,
    ) -> Result<BTreeMap<String, Grid>> {
        let grid = self.compute_indicator(family, indicator)?;
        Ok(BTreeMap::from([(range_label(family, indicator), grid)]))
    }
}

macro_rules! compute_entry_points {
    ($($(#[$meta:meta])* $name:ident => ($family:ident, $indicator:ident);)+) => {
        impl Context {
            $(
                $(#[$meta])*
                pub fn $name(&mut self) -> Result<BTreeMap<String, Grid>> {
                    self.compute_labeled(StressFamily::$family, Indicator::$indicator)
                }
            )+
        }
    };
}

compute_entry_points! {
    /// PV of PPG external debt to GDP under the B1 growth shock, row 35
    compute_b1_pv_debt_to_gdp => (B1Gdp, PvDebtToGdp);
    /// PV of PPG external debt to exports under the B1 growth shock, row 36
    compute_b1_pv_debt_to_exports => (B1Gdp, PvDebtToExports);
    /// PPG debt service to exports under the B1 growth shock, row 39
    compute_b1_debt_service_to_exports => (B1Gdp, DebtServiceToExports);
    /// PPG debt service to revenue under the B1 growth shock, row 40
    compute_b1_debt_service_to_revenue => (B1Gdp, DebtServiceToRevenue);
    /// PV of PPG external debt to GDP under the B3 export shock, row 35
    compute_b3_pv_debt_to_gdp => (B3Exports, PvDebtToGdp);
    /// PV of PPG external debt to exports under the B3 export shock, row 36
    compute_b3_pv_debt_to_exports => (B3Exports, PvDebtToExports);
    /// PPG debt service to exports under the B3 export shock, row 39
    compute_b3_debt_service_to_exports => (B3Exports, DebtServiceToExports);
    /// PPG debt service to revenue under the B3 export shock, row 40
    compute_b3_debt_service_to_revenue => (B3Exports, DebtServiceToRevenue);
    /// PV of PPG external debt to GDP under the B4 other-flows shock, row 35
    compute_b4_pv_debt_to_gdp => (B4OtherFlows, PvDebtToGdp);
    /// PV of PPG external debt to exports under the B4 other-flows shock, row 36
    compute_b4_pv_debt_to_exports => (B4OtherFlows, PvDebtToExports);
    /// PPG debt service to exports under the B4 other-flows shock, row 39
    compute_b4_debt_service_to_exports => (B4OtherFlows, DebtServiceToExports);
    /// PPG debt service to revenue under the B4 other-flows shock, row 40
    compute_b4_debt_service_to_revenue => (B4OtherFlows, DebtServiceToRevenue);
}
