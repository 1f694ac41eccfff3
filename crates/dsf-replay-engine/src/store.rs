//! Cell store: current value and validity of every traced cell
//!
//! The store holds state and nothing else. Staleness propagation is the
//! evaluator's job; `mark_stale` flips one cell and the evaluator walks the
//! dependent edges.

use ahash::AHashMap;
use dsf_replay_core::{CellId, Error, Result, Value};

/// Whether a cell is written by setters or computed by a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Set only by setters or workbook load
    Input,
    /// Computed by a formula from other cells
    Derived,
}

/// Whether a cell's cached value matches its current dependencies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Fresh,
    Stale,
}

#[derive(Debug, Clone)]
struct Slot {
    kind: CellKind,
    value: Value,
    validity: Validity,
}

/// Value and validity state for every registered cell.
#[derive(Debug, Default)]
pub struct CellStore {
    cells: AHashMap<CellId, Slot>,
}

impl CellStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an input cell with its initial value; fresh immediately
    pub fn register_input(&mut self, id: CellId, value: f64) {
        self.cells.insert(
            id,
            Slot {
                kind: CellKind::Input,
                value: Value::Number(value),
                validity: Validity::Fresh,
            },
        );
    }

    /// Register a derived cell; blank and stale until first evaluated.
    /// Idempotent, since a derived cell may appear in several family graphs.
    pub fn register_derived(&mut self, id: CellId) {
        self.cells.entry(id).or_insert(Slot {
            kind: CellKind::Derived,
            value: Value::Blank,
            validity: Validity::Stale,
        });
    }

    /// Number of registered cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the store has no registered cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the address is registered at all
    pub fn contains(&self, id: CellId) -> bool {
        self.cells.contains_key(&id)
    }

    /// Whether the address is a registered input cell
    pub fn is_input(&self, id: CellId) -> bool {
        matches!(
            self.cells.get(&id),
            Some(Slot {
                kind: CellKind::Input,
                ..
            })
        )
    }

    /// Current cached value of a registered cell
    pub fn get(&self, id: CellId) -> Result<Value> {
        self.slot(id).map(|s| s.value)
    }

    /// Kind of a registered cell
    pub fn kind(&self, id: CellId) -> Result<CellKind> {
        self.slot(id).map(|s| s.kind)
    }

    /// Validity of a registered cell
    pub fn validity(&self, id: CellId) -> Result<Validity> {
        self.slot(id).map(|s| s.validity)
    }

    /// Write an input cell. Fails with [`Error::NotAnInput`] for derived
    /// cells and [`Error::UnknownAddress`] for unregistered ones; an input is
    /// fresh immediately after being set.
    pub fn set_input(&mut self, id: CellId, value: f64) -> Result<()> {
        let slot = self
            .cells
            .get_mut(&id)
            .ok_or_else(|| Error::UnknownAddress(id.to_string()))?;
        if slot.kind != CellKind::Input {
            return Err(Error::NotAnInput(id.to_string()));
        }
        slot.value = Value::Number(value);
        slot.validity = Validity::Fresh;
        Ok(())
    }

    /// Store an evaluation result. Only the evaluator calls this.
    pub(crate) fn set_derived(&mut self, id: CellId, value: f64) {
        if let Some(slot) = self.cells.get_mut(&id) {
            debug_assert_eq!(slot.kind, CellKind::Derived);
            slot.value = Value::Number(value);
            slot.validity = Validity::Fresh;
        }
    }

    /// Transition one cell to stale. No propagation here.
    pub(crate) fn mark_stale(&mut self, id: CellId) {
        if let Some(slot) = self.cells.get_mut(&id) {
            slot.validity = Validity::Stale;
        }
    }

    fn slot(&self, id: CellId) -> Result<&Slot> {
        self.cells
            .get(&id)
            .ok_or_else(|| Error::UnknownAddress(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: u32, col: u16) -> CellId {
        CellId::new("Sheet", row, col)
    }

    #[test]
    fn test_register_and_get() {
        let mut store = CellStore::new();
        store.register_input(cell(0, 0), 5.0);
        store.register_derived(cell(0, 1));

        assert_eq!(store.get(cell(0, 0)).unwrap(), Value::Number(5.0));
        assert_eq!(store.get(cell(0, 1)).unwrap(), Value::Blank);
        assert_eq!(store.validity(cell(0, 0)).unwrap(), Validity::Fresh);
        assert_eq!(store.validity(cell(0, 1)).unwrap(), Validity::Stale);
        assert!(matches!(
            store.get(cell(9, 9)),
            Err(Error::UnknownAddress(_))
        ));
    }

    #[test]
    fn test_set_input_rejects_derived() {
        let mut store = CellStore::new();
        store.register_derived(cell(0, 1));
        assert!(matches!(
            store.set_input(cell(0, 1), 1.0),
            Err(Error::NotAnInput(_))
        ));
        assert!(matches!(
            store.set_input(cell(5, 5), 1.0),
            Err(Error::UnknownAddress(_))
        ));
    }

    #[test]
    fn test_input_fresh_after_set() {
        let mut store = CellStore::new();
        store.register_input(cell(0, 0), 1.0);
        store.mark_stale(cell(0, 0));
        assert_eq!(store.validity(cell(0, 0)).unwrap(), Validity::Stale);
        store.set_input(cell(0, 0), 2.0).unwrap();
        assert_eq!(store.validity(cell(0, 0)).unwrap(), Validity::Fresh);
        assert_eq!(store.get(cell(0, 0)).unwrap(), Value::Number(2.0));
    }

    #[test]
    fn test_register_derived_is_idempotent() {
        let mut store = CellStore::new();
        store.register_derived(cell(1, 1));
        store.set_derived(cell(1, 1), 3.0);
        store.register_derived(cell(1, 1));
        assert_eq!(store.get(cell(1, 1)).unwrap(), Value::Number(3.0));
    }
}
