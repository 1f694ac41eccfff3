//! Dependency graph construction
//!
//! A [`FormulaTable`] is the fixed, traced formula set for one workbook
//! slice. [`DependencyGraph::trace`] walks backward from a set of target
//! cells over that table and produces the minimal subgraph needed to compute
//! them, verifying along the way that every reference resolves and that the
//! traced set is acyclic.

use ahash::{AHashMap, AHashSet};
use dsf_replay_core::{CellId, Error, Result};

use crate::formula::Formula;

/// One derived cell: its operation plus the ordered cells it reads.
#[derive(Debug, Clone)]
pub struct Node {
    pub formula: Formula,
    /// Dependency addresses in the exact order the formula reads them
    pub deps: Vec<CellId>,
}

/// The fixed formula set of a traced workbook slice.
#[derive(Debug, Default)]
pub struct FormulaTable {
    defs: AHashMap<CellId, Node>,
}

impl FormulaTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Define the formula for a derived cell. Each cell may be defined once;
    /// a second definition is a defect in the traced model.
    pub fn insert(&mut self, cell: CellId, formula: Formula, deps: Vec<CellId>) {
        let prev = self.defs.insert(cell, Node { formula, deps });
        debug_assert!(prev.is_none(), "duplicate formula for {cell}");
    }

    /// Look up a cell's formula definition
    pub fn get(&self, cell: CellId) -> Option<&Node> {
        self.defs.get(&cell)
    }

    /// Whether the table defines a formula for this cell
    pub fn contains(&self, cell: CellId) -> bool {
        self.defs.contains_key(&cell)
    }

    /// Number of defined formulas
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// The minimal dependency subgraph for one family of target cells.
///
/// Directed and acyclic: edges point from a derived cell to each cell it
/// reads. Built once per target set and append-only afterwards — input
/// mutations never restructure it.
#[derive(Debug)]
pub struct DependencyGraph {
    nodes: AHashMap<CellId, Node>,
    /// Reverse edges: cell → derived cells (within this graph) that read it
    dependents: AHashMap<CellId, Vec<CellId>>,
    targets: Vec<CellId>,
}

impl DependencyGraph {
    /// Trace the backward closure of `targets` over the formula table.
    ///
    /// `is_input` answers whether an address is a registered input cell.
    /// Fails with [`Error::UnresolvedReference`] when a formula reads an
    /// address that has neither a formula nor an input registration (a
    /// tracing gap), with [`Error::MalformedFormula`] on an arity mismatch,
    /// and with [`Error::CyclicDependency`] if the closure contains a cycle.
    pub fn trace(
        targets: &[CellId],
        table: &FormulaTable,
        is_input: impl Fn(CellId) -> bool,
    ) -> Result<Self> {
        let mut nodes: AHashMap<CellId, Node> = AHashMap::new();
        let mut dependents: AHashMap<CellId, Vec<CellId>> = AHashMap::new();
        let mut pending: Vec<CellId> = targets.to_vec();

        while let Some(cell) = pending.pop() {
            if nodes.contains_key(&cell) {
                continue;
            }
            let Some(def) = table.get(cell) else {
                // Only targets can reach here without a formula: dependency
                // pushes are filtered on table membership. An input target is
                // fine (the evaluator reads it directly); anything else is a
                // tracing gap.
                if is_input(cell) {
                    continue;
                }
                return Err(Error::UnresolvedReference {
                    referenced: cell.to_string(),
                    referenced_by: "target set".to_string(),
                });
            };
            if !def.formula.arity_ok(def.deps.len()) {
                return Err(Error::MalformedFormula {
                    cell: cell.to_string(),
                    detail: format!(
                        "{:?} applied to {} arguments",
                        def.formula,
                        def.deps.len()
                    ),
                });
            }
            for &dep in &def.deps {
                if !table.contains(dep) && !is_input(dep) {
                    return Err(Error::UnresolvedReference {
                        referenced: dep.to_string(),
                        referenced_by: cell.to_string(),
                    });
                }
                let entry = dependents.entry(dep).or_default();
                if !entry.contains(&cell) {
                    entry.push(cell);
                }
                if table.contains(dep) {
                    pending.push(dep);
                }
            }
            nodes.insert(cell, def.clone());
        }

        for list in dependents.values_mut() {
            list.sort();
        }

        let graph = Self {
            nodes,
            dependents,
            targets: targets.to_vec(),
        };
        graph.check_acyclic()?;
        Ok(graph)
    }

    /// The formula node for a derived cell in this graph
    pub fn node(&self, cell: CellId) -> Option<&Node> {
        self.nodes.get(&cell)
    }

    /// Whether the graph contains this derived cell
    pub fn contains(&self, cell: CellId) -> bool {
        self.nodes.contains_key(&cell)
    }

    /// Derived cells (within this graph) that read the given cell
    pub fn dependents_of(&self, cell: CellId) -> &[CellId] {
        self.dependents.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All derived cells in the graph
    pub fn derived_cells(&self) -> impl Iterator<Item = CellId> + '_ {
        self.nodes.keys().copied()
    }

    /// The target cells this graph was traced from
    pub fn targets(&self) -> &[CellId] {
        &self.targets
    }

    /// Number of derived cells in the graph
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no derived cells
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// DFS cycle check over the traced closure (visited / in-stack coloring)
    fn check_acyclic(&self) -> Result<()> {
        let mut visited: AHashSet<CellId> = AHashSet::new();
        let mut in_stack: AHashSet<CellId> = AHashSet::new();
        for &cell in self.nodes.keys() {
            self.visit(cell, &mut visited, &mut in_stack)?;
        }
        Ok(())
    }

    fn visit(
        &self,
        cell: CellId,
        visited: &mut AHashSet<CellId>,
        in_stack: &mut AHashSet<CellId>,
    ) -> Result<()> {
        if visited.contains(&cell) {
            return Ok(());
        }
        if !in_stack.insert(cell) {
            return Err(Error::CyclicDependency(cell.to_string()));
        }
        if let Some(node) = self.nodes.get(&cell) {
            for &dep in &node.deps {
                self.visit(dep, visited, in_stack)?;
            }
        }
        in_stack.remove(&cell);
        visited.insert(cell);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: u32, col: u16) -> CellId {
        CellId::new("Sheet", row, col)
    }

    /// in0, in1 inputs; d0 = in0 + in1; d1 = 100 * d0 / in1
    fn small_table() -> (FormulaTable, Vec<CellId>) {
        let mut table = FormulaTable::new();
        table.insert(cell(2, 0), Formula::Sum, vec![cell(0, 0), cell(1, 0)]);
        table.insert(
            cell(3, 0),
            Formula::Ratio { scale: 100.0 },
            vec![cell(2, 0), cell(1, 0)],
        );
        (table, vec![cell(0, 0), cell(1, 0)])
    }

    #[test]
    fn test_trace_backward_closure() {
        let (table, inputs) = small_table();
        let graph =
            DependencyGraph::trace(&[cell(3, 0)], &table, |id| inputs.contains(&id)).unwrap();

        assert_eq!(graph.len(), 2);
        assert!(graph.contains(cell(2, 0)));
        assert!(graph.contains(cell(3, 0)));
        assert_eq!(graph.dependents_of(cell(0, 0)), &[cell(2, 0)]);
        // in1 feeds both derived cells
        assert_eq!(graph.dependents_of(cell(1, 0)), &[cell(2, 0), cell(3, 0)]);
        assert_eq!(graph.node(cell(2, 0)).unwrap().deps.len(), 2);
    }

    #[test]
    fn test_trace_is_minimal() {
        let (mut table, inputs) = small_table();
        // An unrelated derived cell outside the closure of d0
        table.insert(cell(9, 0), Formula::identity(), vec![cell(0, 0)]);
        let graph =
            DependencyGraph::trace(&[cell(2, 0)], &table, |id| inputs.contains(&id)).unwrap();
        assert_eq!(graph.len(), 1);
        assert!(!graph.contains(cell(9, 0)));
    }

    #[test]
    fn test_unresolved_reference() {
        let mut table = FormulaTable::new();
        table.insert(cell(2, 0), Formula::Sum, vec![cell(0, 0), cell(7, 7)]);
        let err = DependencyGraph::trace(&[cell(2, 0)], &table, |id| id == cell(0, 0)).unwrap_err();
        match err {
            Error::UnresolvedReference { referenced, .. } => {
                assert!(referenced.contains("H8"));
            }
            other => panic!("expected UnresolvedReference, got {other:?}"),
        }
    }

    #[test]
    fn test_cycle_detection() {
        let mut table = FormulaTable::new();
        // d0 -> d1 -> d2 -> d0
        table.insert(cell(0, 0), Formula::identity(), vec![cell(1, 0)]);
        table.insert(cell(1, 0), Formula::identity(), vec![cell(2, 0)]);
        table.insert(cell(2, 0), Formula::identity(), vec![cell(0, 0)]);
        let err = DependencyGraph::trace(&[cell(0, 0)], &table, |_| false).unwrap_err();
        assert!(matches!(err, Error::CyclicDependency(_)));
    }

    #[test]
    fn test_arity_mismatch_is_fatal() {
        let mut table = FormulaTable::new();
        table.insert(
            cell(2, 0),
            Formula::Ratio { scale: 1.0 },
            vec![cell(0, 0)],
        );
        let err = DependencyGraph::trace(&[cell(2, 0)], &table, |id| id == cell(0, 0)).unwrap_err();
        assert!(matches!(err, Error::MalformedFormula { .. }));
    }
}
