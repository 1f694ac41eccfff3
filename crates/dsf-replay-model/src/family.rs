//! Stress-test families and traced indicators

use crate::sheets::{B1_GDP_EXT, B3_EXPORTS_EXT, B4_OTHER_FLOWS_EXT, FIRST_PROJECTION_YEAR};

/// Years the bound-test shocks apply: the second and third projection years
pub const SHOCK_YEARS: [i32; 2] = [FIRST_PROJECTION_YEAR + 1, FIRST_PROJECTION_YEAR + 2];

/// One of the three traced bound-test scenario tabs.
///
/// Each family applies a different shock to the baseline and carries the same
/// four indicator rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StressFamily {
    /// B1: real GDP growth shock in the second and third projection years
    B1Gdp,
    /// B3: export growth shock in the second and third projection years
    B3Exports,
    /// B4: non-debt-creating flows (FDI and transfers) shock
    B4OtherFlows,
}

impl StressFamily {
    pub const ALL: [StressFamily; 3] = [
        StressFamily::B1Gdp,
        StressFamily::B3Exports,
        StressFamily::B4OtherFlows,
    ];

    /// The scenario tab this family's derived cells live on
    pub fn sheet(self) -> &'static str {
        match self {
            StressFamily::B1Gdp => B1_GDP_EXT,
            StressFamily::B3Exports => B3_EXPORTS_EXT,
            StressFamily::B4OtherFlows => B4_OTHER_FLOWS_EXT,
        }
    }
}

/// One of the four debt-burden indicators traced per family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Indicator {
    /// PV of PPG external debt to GDP (row 35)
    PvDebtToGdp,
    /// PV of PPG external debt to exports (row 36)
    PvDebtToExports,
    /// PPG debt service to exports (row 39)
    DebtServiceToExports,
    /// PPG debt service to revenue (row 40)
    DebtServiceToRevenue,
}

impl Indicator {
    pub const ALL: [Indicator; 4] = [
        Indicator::PvDebtToGdp,
        Indicator::PvDebtToExports,
        Indicator::DebtServiceToExports,
        Indicator::DebtServiceToRevenue,
    ];

    /// Row index (0-based) of the indicator on each family sheet
    pub fn row(self) -> u32 {
        match self {
            Indicator::PvDebtToGdp => 34,          // row 35
            Indicator::PvDebtToExports => 35,      // row 36
            Indicator::DebtServiceToExports => 38, // row 39
            Indicator::DebtServiceToRevenue => 39, // row 40
        }
    }
}
