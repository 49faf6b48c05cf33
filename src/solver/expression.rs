//! Sparse symbolic polynomials in `s`.

use std::collections::BTreeMap;
use std::fmt;

/// One product `coefficient · name1 · name2 · …`.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub coefficient: f64,
    /// Sorted multiset of symbol names
    pub symbols: Vec<String>,
}

impl Term {
    /// Create a term, sorting its symbols.
    pub fn new(coefficient: f64, mut symbols: Vec<String>) -> Self {
        symbols.sort_unstable();
        Self {
            coefficient,
            symbols,
        }
    }

    /// A purely numeric term.
    pub fn constant(coefficient: f64) -> Self {
        Self {
            coefficient,
            symbols: Vec::new(),
        }
    }

    /// Remove one occurrence of `symbol`, returning whether one was present.
    pub fn remove_symbol(&mut self, symbol: &str) -> bool {
        match self.symbols.binary_search_by(|s| s.as_str().cmp(symbol)) {
            Ok(i) => {
                self.symbols.remove(i);
                true
            }
            Err(_) => false,
        }
    }

    /// Whether `symbol` occurs in the term.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols
            .binary_search_by(|s| s.as_str().cmp(symbol))
            .is_ok()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.symbols.is_empty() {
            return write!(f, "{}", self.coefficient);
        }
        if self.coefficient != 1.0 {
            write!(f, "{} * ", self.coefficient)?;
        }
        write!(f, "{}", self.symbols.join(" * "))
    }
}

/// Degree → terms. Within a degree no two terms share a symbol multiset.
///
/// Terms in a bucket are kept ordered by their symbols, so two expressions
/// holding the same terms compare equal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    buckets: BTreeMap<u32, Vec<Term>>,
}

impl Expression {
    /// The empty expression (zero).
    pub fn new() -> Self {
        Self::default()
    }

    /// A single numeric term at degree 0.
    pub fn constant(coefficient: f64) -> Self {
        let mut expression = Self::new();
        expression.add_term(0, Term::constant(coefficient));
        expression
    }

    /// Add a term at `degree`, merging it with a term of identical symbols.
    pub fn add_term(&mut self, degree: u32, term: Term) {
        let bucket = self.buckets.entry(degree).or_default();
        match bucket.binary_search_by(|t| t.symbols.cmp(&term.symbols)) {
            Ok(i) => bucket[i].coefficient += term.coefficient,
            Err(i) => bucket.insert(i, term),
        }
    }

    /// Whether the expression has no terms.
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    /// Total number of terms.
    pub fn term_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Terms at one degree.
    pub fn bucket(&self, degree: u32) -> &[Term] {
        self.buckets.get(&degree).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Populated degrees in ascending order.
    pub fn degrees(&self) -> impl Iterator<Item = u32> + '_ {
        self.buckets
            .iter()
            .filter(|(_, terms)| !terms.is_empty())
            .map(|(&d, _)| d)
    }

    /// Lowest populated degree.
    pub fn min_degree(&self) -> Option<u32> {
        self.degrees().next()
    }

    /// Highest populated degree.
    pub fn max_degree(&self) -> Option<u32> {
        self.degrees().last()
    }

    /// Every `(degree, term)` in ascending degree order.
    pub fn terms(&self) -> impl Iterator<Item = (u32, &Term)> + '_ {
        self.buckets
            .iter()
            .flat_map(|(&d, terms)| terms.iter().map(move |t| (d, t)))
    }

    pub(crate) fn terms_mut(&mut self) -> impl Iterator<Item = &mut Term> + '_ {
        self.buckets.values_mut().flatten()
    }

    /// Drop zero terms and empty buckets.
    pub fn prune(&mut self) {
        for terms in self.buckets.values_mut() {
            terms.retain(|t| t.coefficient != 0.0);
        }
        self.buckets.retain(|_, terms| !terms.is_empty());
    }

    /// Lower every degree by one. The caller guarantees no degree-0 bucket.
    pub(crate) fn shift_down(&mut self) {
        self.buckets = std::mem::take(&mut self.buckets)
            .into_iter()
            .map(|(d, terms)| (d.saturating_sub(1), terms))
            .collect();
    }

    /// Multiply every coefficient by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for term in self.terms_mut() {
            term.coefficient *= factor;
        }
    }

    /// Divide every coefficient by `divisor`.
    pub fn divide(&mut self, divisor: f64) {
        for term in self.terms_mut() {
            term.coefficient /= divisor;
        }
    }

    /// Remove one occurrence of `symbol` from every term.
    ///
    /// Terms whose symbol sets coincide afterwards are merged.
    pub(crate) fn cancel_symbol(&mut self, symbol: &str) {
        let old = std::mem::take(&mut self.buckets);
        for (degree, terms) in old {
            for mut term in terms {
                term.remove_symbol(symbol);
                self.add_term(degree, term);
            }
        }
    }

    /// Evaluate at `s`, looking symbols up through `value`.
    pub fn evaluate(&self, s: f64, value: impl Fn(&str) -> f64) -> f64 {
        self.terms()
            .map(|(d, t)| {
                let product: f64 = t.symbols.iter().map(|n| value(n)).product();
                t.coefficient * product * s.powi(d as i32)
            })
            .sum()
    }

    /// Render highest degree first, e.g. `(C1 * R1 + 2)*s^1 + 1*s^0`.
    ///
    /// The empty expression renders as `0`.
    pub fn as_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("0");
        }
        let mut first = true;
        for (degree, terms) in self.buckets.iter().rev() {
            if terms.is_empty() {
                continue;
            }
            if !first {
                f.write_str(" + ")?;
            }
            first = false;

            let sum = terms
                .iter()
                .map(Term::to_string)
                .collect::<Vec<_>>()
                .join(" + ");
            if terms.len() > 1 {
                write!(f, "({sum})*s^{degree}")?;
            } else {
                write!(f, "{sum}*s^{degree}")?;
            }
        }
        Ok(())
    }
}
