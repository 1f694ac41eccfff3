//! The evaluation context: one cell store plus the three family graphs

use dsf_replay_core::{CellId, Result, Value};
use dsf_replay_engine::{invalidate, CellStore, DependencyGraph, Validity};
use dsf_replay_model::{default_inputs, family_targets, formula_table, StressFamily, SHEETS};

/// One independent replay of the traced workbook slice.
///
/// A fresh context holds every input cell at its published default and every
/// derived cell blank and stale; nothing is computed until a `compute_*`
/// call asks for it. A context is owned by exactly one caller at a time
/// (`&mut self` on every mutation); independent contexts share nothing.
#[derive(Debug)]
pub struct Context {
    pub(crate) store: CellStore,
    /// One graph per family, in [`StressFamily::ALL`] order
    pub(crate) graphs: [DependencyGraph; 3],
}

/// The graph of one family. Free function so callers can borrow one graph
/// while holding the store mutably.
pub(crate) fn family_graph(
    graphs: &[DependencyGraph; 3],
    family: StressFamily,
) -> &DependencyGraph {
    match family {
        StressFamily::B1Gdp => &graphs[0],
        StressFamily::B3Exports => &graphs[1],
        StressFamily::B4OtherFlows => &graphs[2],
    }
}

impl Context {
    /// Build a context over the published defaults.
    ///
    /// Traces the three family graphs against the fixed formula table; a
    /// construction error here means the traced model itself is inconsistent.
    pub fn new() -> Result<Self> {
        let mut store = CellStore::new();
        for (cell, value) in default_inputs() {
            store.register_input(cell, value);
        }

        let table = formula_table();
        let mut trace = |family| -> Result<DependencyGraph> {
            let graph =
                DependencyGraph::trace(&family_targets(family), table, |id| store.is_input(id))?;
            for cell in graph.derived_cells() {
                store.register_derived(cell);
            }
            Ok(graph)
        };
        let graphs = [
            trace(StressFamily::B1Gdp)?,
            trace(StressFamily::B3Exports)?,
            trace(StressFamily::B4OtherFlows)?,
        ];
        Ok(Self { store, graphs })
    }

    /// Write one input cell and mark its transitive dependents stale in
    /// every family graph.
    pub(crate) fn write_input(&mut self, cell: CellId, value: f64) -> Result<()> {
        self.store.set_input(cell, value)?;
        for graph in &self.graphs {
            invalidate(&mut self.store, graph, cell);
        }
        Ok(())
    }

    /// Escape hatch: write a single input cell by its workbook address,
    /// for example `"Ext_Debt_Data!C6"`.
    pub fn set_input_address(&mut self, address: &str, value: f64) -> Result<()> {
        let cell = CellId::parse(address, &SHEETS)?;
        self.write_input(cell, value)
    }

    /// Cached value at a workbook address, without evaluating anything.
    /// A derived cell that was never computed reads as [`Value::Blank`].
    pub fn cell_value(&self, address: &str) -> Result<Value> {
        let cell = CellId::parse(address, &SHEETS)?;
        self.store.get(cell)
    }

    /// Whether the cell at a workbook address is fresh, without evaluating
    pub fn is_fresh(&self, address: &str) -> Result<bool> {
        let cell = CellId::parse(address, &SHEETS)?;
        Ok(self.store.validity(cell)? == Validity::Fresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Context>();
    }

    #[test]
    fn test_new_traces_all_families() {
        let context = Context::new().unwrap();
        for graph in &context.graphs {
            // 4 indicator rows x 22 projection years
            assert_eq!(graph.targets().len(), 88);
        }
        // Inputs plus every traced derived cell are registered
        assert!(context.store.len() > context.graphs.iter().map(|g| g.len()).sum::<usize>());
    }
}
