//! Numerator/denominator pairs and their simplification.

use std::fmt;

use super::expression::Expression;

/// A rational function `numerator / denominator` in `s`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferFunction {
    pub numerator: Expression,
    pub denominator: Expression,
}

impl TransferFunction {
    /// Pair two expressions.
    pub fn new(numerator: Expression, denominator: Expression) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// The constant pair `1 / 1`.
    pub fn unity() -> Self {
        Self::new(Expression::constant(1.0), Expression::constant(1.0))
    }

    /// Whether this is the open-circuit pair `0 / 1`.
    pub fn is_open(&self) -> bool {
        self.numerator.is_empty() && self.denominator == Expression::constant(1.0)
    }

    /// Whether this is the short-circuit pair `1 / 0`.
    pub fn is_short(&self) -> bool {
        self.denominator.is_empty() && self.numerator == Expression::constant(1.0)
    }

    /// Simplified copy. Simplifying twice changes nothing.
    pub fn simplified(&self) -> Self {
        let mut out = self.clone();
        out.simplify();
        out
    }

    /// Simplify in place.
    ///
    /// In order: drop zero terms; substitute the degenerate pairs
    /// (`1/1` when both sides are empty, `0/1` for an empty numerator,
    /// `1/0` for an empty denominator); cancel common powers of `s`;
    /// make an all-non-positive pair positive; divide by the common
    /// magnitude of the denominator's leading coefficients; cancel symbols
    /// shared by every term; collapse identical sides to `1/1`.
    pub fn simplify(&mut self) {
        self.numerator.prune();
        self.denominator.prune();

        match (self.numerator.is_empty(), self.denominator.is_empty()) {
            (true, true) => {
                *self = Self::unity();
                return;
            }
            (true, false) => {
                self.denominator = Expression::constant(1.0);
                return;
            }
            (false, true) => {
                self.numerator = Expression::constant(1.0);
                return;
            }
            (false, false) => {}
        }

        self.cancel_common_powers();
        self.normalize_sign();
        self.normalize_leading();
        self.cancel_common_symbols();

        if self.numerator == self.denominator {
            *self = Self::unity();
        }
    }

    fn sides(&self) -> [&Expression; 2] {
        [&self.numerator, &self.denominator]
    }

    fn cancel_common_powers(&mut self) {
        while let (Some(n), Some(d)) = (self.numerator.min_degree(), self.denominator.min_degree()) {
            if n == 0 || d == 0 {
                break;
            }
            self.numerator.shift_down();
            self.denominator.shift_down();
        }
    }

    fn normalize_sign(&mut self) {
        let all_non_positive = self
            .sides()
            .iter()
            .flat_map(|e| e.terms())
            .all(|(_, t)| t.coefficient <= 0.0);
        if all_non_positive {
            self.numerator.scale(-1.0);
            self.denominator.scale(-1.0);
        }
    }

    fn normalize_leading(&mut self) {
        let Some(top) = self.denominator.max_degree() else {
            return;
        };
        let leading = self.denominator.bucket(top);
        let Some(first) = leading.first().map(|t| t.coefficient.abs()) else {
            return;
        };
        if first == 0.0 || leading.iter().any(|t| t.coefficient.abs() != first) {
            return;
        }
        if first != 1.0 {
            self.numerator.divide(first);
            self.denominator.divide(first);
        }
    }

    fn cancel_common_symbols(&mut self) {
        while let Some(symbol) = self.common_symbol() {
            self.numerator.cancel_symbol(&symbol);
            self.denominator.cancel_symbol(&symbol);
        }
    }

    /// A symbol occurring in every term of both sides.
    fn common_symbol(&self) -> Option<String> {
        let mut terms = self.sides().into_iter().flat_map(|e| e.terms());
        let (_, first) = terms.next()?;
        let candidates = first.symbols.clone();
        let rest: Vec<_> = terms.collect();
        candidates
            .into_iter()
            .find(|symbol| rest.iter().all(|(_, t)| t.contains(symbol)))
    }

    /// Render as `N(s) / D(s)`.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }

    /// Evaluate `N(s) / D(s)` with symbols looked up through `value`.
    pub fn evaluate(&self, s: f64, value: impl Fn(&str) -> f64) -> f64 {
        self.numerator.evaluate(s, &value) / self.denominator.evaluate(s, &value)
    }
}

impl fmt::Display for TransferFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) / ({})", self.numerator, self.denominator)
    }
}
