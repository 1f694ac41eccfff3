//! Incremental evaluation engine for dsf-replay
//!
//! The three moving parts of the core, in dependency order:
//!
//! - [`CellStore`] — value and fresh/stale state per traced cell,
//! - [`DependencyGraph`] — minimal backward closure of a target set over a
//!   fixed [`FormulaTable`], verified acyclic at build time,
//! - [`Evaluator`] — recursive memoized evaluation plus [`invalidate`], which
//!   marks transitive dependents stale and recomputes nothing.
//!
//! Derived-cell writes (`set_derived`, `mark_stale`) are crate-private so the
//! evaluator is the only code path that can touch them.

pub mod eval;
pub mod formula;
pub mod graph;
pub mod store;

pub use eval::{invalidate, Evaluator};
pub use formula::Formula;
pub use graph::{DependencyGraph, FormulaTable, Node};
pub use store::{CellKind, CellStore, Validity};
