//! Workbook load boundary
//!
//! This crate never parses spreadsheet files. A caller that wants to start
//! from a filled workbook opens it with whatever tooling it likes and hands
//! the values over through [`WorkbookSource`].

use dsf_replay_core::{CellId, Error, Result};
use dsf_replay_model::default_inputs;

use crate::context::Context;

/// Template version the traced model slice was taken from. Sources
/// declaring any other version are rejected outright; the traced addresses
/// and formulas would not line up.
pub const TEMPLATE_VERSION: &str = "LIC-DSF-2023R1";

/// A filled workbook, already opened by the caller.
///
/// `input_value` answers per-address lookups for the traced input cells;
/// `Ok(None)` means the workbook leaves the cell empty and the published
/// default stands. Read failures surface as [`Error::WorkbookRead`].
pub trait WorkbookSource {
    /// The template version the workbook declares
    fn template_version(&self) -> String;

    /// Value of the input cell at `cell`, if the workbook carries one
    fn input_value(&self, cell: CellId) -> Result<Option<f64>>;
}

impl Context {
    /// Build a context from a filled workbook: defaults first, then every
    /// traced input cell the source provides a value for.
    pub fn from_workbook(source: &dyn WorkbookSource) -> Result<Self> {
        let found = source.template_version();
        if found != TEMPLATE_VERSION {
            return Err(Error::UnsupportedWorkbookVersion {
                found,
                expected: TEMPLATE_VERSION,
            });
        }

        let mut context = Context::new()?;
        for (cell, _) in default_inputs() {
            if let Some(value) = source.input_value(cell)? {
                // Derived cells are still stale from construction, so plain
                // input writes suffice; no invalidation walk is needed yet.
                context.store.set_input(cell, value)?;
            }
        }
        Ok(context)
    }
}
