//! The closed set of formula operations used by traced workbook slices
//!
//! The original workbook's formulas are data, not a language: each traced
//! derived cell reduces to one pure operation over an ordered argument list.
//! Arguments arrive already evaluated; blanks have been coerced to 0.0 by the
//! evaluator, matching how the source workbook treats empty cells.

/// A pure operation applied to the ordered values of a cell's dependencies.
#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    /// A constant; takes no arguments
    Const(f64),
    /// Sum of all arguments
    Sum,
    /// `intercept + Σ coeffs[i] * args[i]`; arity equals `coeffs.len()`
    Linear { intercept: f64, coeffs: Vec<f64> },
    /// Product of all arguments
    Product,
    /// `scale * args[0] / args[1]`; exactly two arguments
    Ratio { scale: f64 },
    /// Smallest argument
    Min,
    /// Largest argument
    Max,
}

impl Formula {
    /// Identity pass-through of a single argument
    pub fn identity() -> Self {
        Formula::Linear {
            intercept: 0.0,
            coeffs: vec![1.0],
        }
    }

    /// Check the operation against a dependency count. Arity errors are
    /// construction-time model defects; the graph builder rejects them.
    pub fn arity_ok(&self, n: usize) -> bool {
        match self {
            Formula::Const(_) => n == 0,
            Formula::Linear { coeffs, .. } => coeffs.len() == n,
            Formula::Ratio { .. } => n == 2,
            Formula::Sum | Formula::Product | Formula::Min | Formula::Max => n >= 1,
        }
    }

    /// Apply the operation to the evaluated argument values.
    ///
    /// Division follows IEEE semantics; the traced slices keep denominators
    /// away from zero, so no workbook-style `#DIV/0!` mapping is needed.
    pub fn apply(&self, args: &[f64]) -> f64 {
        debug_assert!(self.arity_ok(args.len()));
        match self {
            Formula::Const(c) => *c,
            Formula::Sum => args.iter().sum(),
            Formula::Linear { intercept, coeffs } => coeffs
                .iter()
                .zip(args)
                .fold(*intercept, |acc, (c, a)| acc + c * a),
            Formula::Product => args.iter().product(),
            Formula::Ratio { scale } => scale * args[0] / args[1],
            Formula::Min => args.iter().copied().fold(f64::INFINITY, f64::min),
            Formula::Max => args.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_ops() {
        assert_eq!(Formula::Const(7.5).apply(&[]), 7.5);
        assert_eq!(Formula::Sum.apply(&[1.0, 2.0, 3.0]), 6.0);
        assert_eq!(Formula::Product.apply(&[2.0, 3.0, 4.0]), 24.0);
        assert_eq!(Formula::Ratio { scale: 100.0 }.apply(&[251.5, 500.0]), 50.3);
        assert_eq!(Formula::Min.apply(&[3.0, -1.0, 2.0]), -1.0);
        assert_eq!(Formula::Max.apply(&[3.0, -1.0, 2.0]), 3.0);
    }

    #[test]
    fn test_linear() {
        let f = Formula::Linear {
            intercept: 1.0,
            coeffs: vec![1.0, -1.0, 2.0],
        };
        assert_eq!(f.apply(&[10.0, 4.0, 0.5]), 8.0);
        assert_eq!(Formula::identity().apply(&[42.0]), 42.0);
    }

    #[test]
    fn test_arity() {
        assert!(Formula::Const(0.0).arity_ok(0));
        assert!(!Formula::Const(0.0).arity_ok(1));
        assert!(Formula::Ratio { scale: 1.0 }.arity_ok(2));
        assert!(!Formula::Ratio { scale: 1.0 }.arity_ok(3));
        assert!(Formula::identity().arity_ok(1));
        assert!(!Formula::identity().arity_ok(2));
        assert!(Formula::Sum.arity_ok(1));
        assert!(!Formula::Sum.arity_ok(0));
    }
}
