//! Lazy, memoized evaluation and selective invalidation
//!
//! Evaluation is recursive and memoized through the store's fresh/stale
//! state: a fresh cell returns its cached value, a stale cell evaluates its
//! dependencies first, applies its formula, and is stored fresh. This is
//! equivalent to a topological evaluation order, computed lazily and only
//! over the reachable, currently-stale subgraph.

use dsf_replay_core::{CellId, Error, Grid, Result};
use log::{debug, trace};

use crate::graph::DependencyGraph;
use crate::store::{CellStore, Validity};

/// Evaluates cells of one family graph against a cell store.
pub struct Evaluator<'a> {
    store: &'a mut CellStore,
    graph: &'a DependencyGraph,
    recomputed: usize,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator over one store and one traced graph
    pub fn new(store: &'a mut CellStore, graph: &'a DependencyGraph) -> Self {
        Self {
            store,
            graph,
            recomputed: 0,
        }
    }

    /// Current value of `target`, recomputing stale dependencies first.
    pub fn evaluate(&mut self, target: CellId) -> Result<f64> {
        let before = self.recomputed;
        let value = self.eval_cell(target, target)?;
        debug!(
            "evaluate {target}: {} cells recomputed",
            self.recomputed - before
        );
        Ok(value)
    }

    /// Evaluate an ordered set of cells into a single-row grid.
    pub fn evaluate_row(&mut self, targets: &[CellId]) -> Result<Grid> {
        let before = self.recomputed;
        let mut values = Vec::with_capacity(targets.len());
        for &target in targets {
            values.push(self.eval_cell(target, target)?);
        }
        debug!(
            "evaluate_row of {} cells: {} recomputed",
            targets.len(),
            self.recomputed - before
        );
        Ok(Grid::from_row(values))
    }

    /// Cells recomputed by this evaluator so far
    pub fn recomputed(&self) -> usize {
        self.recomputed
    }

    fn eval_cell(&mut self, cell: CellId, referrer: CellId) -> Result<f64> {
        match self.store.validity(cell)? {
            Validity::Fresh => Ok(self.store.get(cell)?.number_or_zero()),
            Validity::Stale => {
                // A stale cell with no formula node would mean the graph was
                // built against a different formula set; fatal, not retried.
                let node = self.graph.node(cell).ok_or_else(|| Error::UnresolvedReference {
                    referenced: cell.to_string(),
                    referenced_by: referrer.to_string(),
                })?;
                let deps = node.deps.clone();
                let formula = node.formula.clone();
                let mut args = Vec::with_capacity(deps.len());
                for dep in deps {
                    args.push(self.eval_cell(dep, cell)?);
                }
                let value = formula.apply(&args);
                self.store.set_derived(cell, value);
                self.recomputed += 1;
                Ok(value)
            }
        }
    }
}

/// Mark every transitive dependent of `seed` stale within one graph.
///
/// Nothing is recomputed here; the next `evaluate` call recomputes exactly
/// the stale subset it needs. `seed` itself is flipped only if derived —
/// inputs are fresh by definition once set.
pub fn invalidate(store: &mut CellStore, graph: &DependencyGraph, seed: CellId) {
    let mut pending = vec![seed];
    let mut marked = 0usize;
    while let Some(cell) = pending.pop() {
        for &dependent in graph.dependents_of(cell) {
            if matches!(store.validity(dependent), Ok(Validity::Stale)) {
                continue;
            }
            store.mark_stale(dependent);
            marked += 1;
            pending.push(dependent);
        }
    }
    if graph.contains(seed) {
        store.mark_stale(seed);
        marked += 1;
    }
    trace!("invalidate {seed}: {marked} cells marked stale");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::Formula;
    use crate::graph::FormulaTable;
    use crate::store::Validity;

    fn cell(row: u32, col: u16) -> CellId {
        CellId::new("Sheet", row, col)
    }

    /// in0, in1 inputs; a = in0 + in1; b = in1 * 2; c = 100 * a / b
    fn fixture() -> (CellStore, DependencyGraph) {
        let mut table = FormulaTable::new();
        let (in0, in1) = (cell(0, 0), cell(1, 0));
        let (a, b, c) = (cell(2, 0), cell(3, 0), cell(4, 0));
        table.insert(a, Formula::Sum, vec![in0, in1]);
        table.insert(
            b,
            Formula::Linear {
                intercept: 0.0,
                coeffs: vec![2.0],
            },
            vec![in1],
        );
        table.insert(c, Formula::Ratio { scale: 100.0 }, vec![a, b]);

        let mut store = CellStore::new();
        store.register_input(in0, 30.0);
        store.register_input(in1, 10.0);
        let graph = DependencyGraph::trace(&[c], &table, |id| store.is_input(id)).unwrap();
        for id in graph.derived_cells() {
            store.register_derived(id);
        }
        (store, graph)
    }

    #[test]
    fn test_evaluate_computes_closure() {
        let (mut store, graph) = fixture();
        let mut eval = Evaluator::new(&mut store, &graph);
        // c = 100 * (30+10) / (10*2)
        assert_eq!(eval.evaluate(cell(4, 0)).unwrap(), 200.0);
        assert_eq!(eval.recomputed(), 3);
        // Everything in the closure is now fresh
        assert_eq!(store.validity(cell(2, 0)).unwrap(), Validity::Fresh);
        assert_eq!(store.validity(cell(3, 0)).unwrap(), Validity::Fresh);
    }

    #[test]
    fn test_memoized_no_recompute_when_fresh() {
        let (mut store, graph) = fixture();
        Evaluator::new(&mut store, &graph)
            .evaluate(cell(4, 0))
            .unwrap();
        let mut eval = Evaluator::new(&mut store, &graph);
        assert_eq!(eval.evaluate(cell(4, 0)).unwrap(), 200.0);
        assert_eq!(eval.recomputed(), 0);
    }

    #[test]
    fn test_invalidate_marks_exactly_transitive_dependents() {
        let (mut store, graph) = fixture();
        Evaluator::new(&mut store, &graph)
            .evaluate(cell(4, 0))
            .unwrap();

        // in0 feeds a and c, but not b
        store.set_input(cell(0, 0), 50.0).unwrap();
        invalidate(&mut store, &graph, cell(0, 0));
        assert_eq!(store.validity(cell(2, 0)).unwrap(), Validity::Stale);
        assert_eq!(store.validity(cell(4, 0)).unwrap(), Validity::Stale);
        assert_eq!(store.validity(cell(3, 0)).unwrap(), Validity::Fresh);

        let mut eval = Evaluator::new(&mut store, &graph);
        // c = 100 * (50+10) / 20; b untouched
        assert_eq!(eval.evaluate(cell(4, 0)).unwrap(), 300.0);
        assert_eq!(eval.recomputed(), 2);
    }

    #[test]
    fn test_evaluate_input_target() {
        let (mut store, graph) = fixture();
        let mut eval = Evaluator::new(&mut store, &graph);
        assert_eq!(eval.evaluate(cell(0, 0)).unwrap(), 30.0);
        assert_eq!(eval.recomputed(), 0);
    }

    #[test]
    fn test_evaluate_row_order() {
        let (mut store, graph) = fixture();
        let mut eval = Evaluator::new(&mut store, &graph);
        let grid = eval
            .evaluate_row(&[cell(2, 0), cell(3, 0), cell(4, 0)])
            .unwrap();
        assert_eq!(grid.to_row_numbers(), vec![40.0, 20.0, 200.0]);
    }

    #[test]
    fn test_unknown_address_reported() {
        let (mut store, graph) = fixture();
        let mut eval = Evaluator::new(&mut store, &graph);
        assert!(matches!(
            eval.evaluate(cell(9, 9)),
            Err(Error::UnknownAddress(_))
        ));
    }
}
