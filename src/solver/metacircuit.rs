//! Symbolic accumulation of common trees into a transfer function.

use tracing::{debug, trace};

use super::enumerate::{enumerate_trees, EnumerationStats};
use super::expression::{Expression, Term};
use super::sign::tree_sign;
use super::simplify::TransferFunction;
use crate::circuit::{Circuit, EdgeIndex, EdgeKind};

/// Configuration for an analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Produce the simplified pair.
    pub simplify: bool,
    /// Accumulate the numeric (all weights multiplied in) pair.
    pub numeric: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            simplify: true,
            numeric: true,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable simplification.
    pub fn with_simplify(mut self, simplify: bool) -> Self {
        self.simplify = simplify;
        self
    }

    /// Enable or disable the numeric pair.
    pub fn with_numeric(mut self, numeric: bool) -> Self {
        self.numeric = numeric;
        self
    }
}

/// Which side of the transfer function a tree feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeClass {
    Numerator,
    Denominator,
    /// Holds both reference edges or neither
    Dropped,
}

/// The transfer function of a circuit between its output and reference.
///
/// Holds the unsimplified symbolic pair, the simplified pair and the
/// numeric pair (every weight multiplied in, simplified).
#[derive(Debug, Clone, Default)]
pub struct Metacircuit {
    raw: TransferFunction,
    simplified: Option<TransferFunction>,
    digit: Option<TransferFunction>,
    numerator_trees: usize,
    denominator_trees: usize,
    dropped_trees: usize,
    stats: EnumerationStats,
}

impl Metacircuit {
    /// Analyse a flushed circuit with the default configuration.
    pub fn analyse(circuit: &Circuit) -> Self {
        Self::analyse_with(circuit, &AnalysisConfig::default())
    }

    /// Analyse a flushed circuit.
    pub fn analyse_with(circuit: &Circuit, config: &AnalysisConfig) -> Self {
        let forced = circuit.forced_mask();
        let numerator_edge = circuit.find_kind(EdgeKind::GRef);
        let denominator_edge = circuit.find_kind(EdgeKind::YRef);

        let mut out = Self::default();
        let mut raw = TransferFunction::default();
        let mut digit = TransferFunction::default();
        let mut selected = Vec::with_capacity(circuit.vertex_count());

        let stats = enumerate_trees(
            circuit.current_graph(),
            circuit.voltage_graph(),
            &forced,
            |in_tree| {
                let class = classify(in_tree, numerator_edge, denominator_edge);
                let (symbolic, numeric) = match class {
                    TreeClass::Numerator => {
                        out.numerator_trees += 1;
                        (&mut raw.numerator, &mut digit.numerator)
                    }
                    TreeClass::Denominator => {
                        out.denominator_trees += 1;
                        (&mut raw.denominator, &mut digit.denominator)
                    }
                    TreeClass::Dropped => {
                        out.dropped_trees += 1;
                        trace!("tree holds both reference edges or neither, dropped");
                        return;
                    }
                };

                selected.clear();
                selected.extend(
                    in_tree
                        .iter()
                        .enumerate()
                        .filter(|(_, &t)| t)
                        .map(|(i, _)| EdgeIndex(i)),
                );
                let reference = circuit.reference();
                let sign = tree_sign(circuit.current_graph(), &selected, reference)
                    * tree_sign(circuit.voltage_graph(), &selected, reference);

                let monomial = Monomial::of_tree(circuit, in_tree);
                trace!(?class, sign, degree = monomial.degree, "tree");
                let sign = f64::from(sign);
                symbolic.add_term(
                    monomial.degree,
                    Term::new(sign * monomial.coefficient, monomial.symbols),
                );
                if config.numeric {
                    numeric.add_term(monomial.degree, Term::constant(sign * monomial.value));
                }
            },
        );

        out.stats = stats;
        if config.simplify {
            out.simplified = Some(raw.simplified());
        }
        if config.numeric {
            out.digit = Some(digit.simplified());
        }
        out.raw = raw;

        debug!(
            numerator = out.numerator_trees,
            denominator = out.denominator_trees,
            dropped = out.dropped_trees,
            "transfer function accumulated"
        );
        out
    }

    /// The unsimplified symbolic pair.
    pub fn raw(&self) -> &TransferFunction {
        &self.raw
    }

    /// The simplified symbolic pair, when requested.
    pub fn simplified(&self) -> Option<&TransferFunction> {
        self.simplified.as_ref()
    }

    /// The numeric pair, when requested.
    pub fn digit(&self) -> Option<&TransferFunction> {
        self.digit.as_ref()
    }

    /// The simplified pair if there is one, the raw pair otherwise.
    pub fn transfer_function(&self) -> &TransferFunction {
        self.simplified.as_ref().unwrap_or(&self.raw)
    }

    pub fn numerator(&self) -> &Expression {
        &self.transfer_function().numerator
    }

    pub fn denominator(&self) -> &Expression {
        &self.transfer_function().denominator
    }

    pub fn numerator_trees(&self) -> usize {
        self.numerator_trees
    }

    pub fn denominator_trees(&self) -> usize {
        self.denominator_trees
    }

    pub fn dropped_trees(&self) -> usize {
        self.dropped_trees
    }

    /// Enumeration counters.
    pub fn stats(&self) -> EnumerationStats {
        self.stats
    }

    /// Render as `Y(s) = N(s) / D(s)`.
    pub fn to_display_string(&self) -> String {
        let tf = self.transfer_function();
        format!("Y(s) = {} / {}", tf.numerator, tf.denominator)
    }
}

fn classify(
    in_tree: &[bool],
    numerator_edge: Option<EdgeIndex>,
    denominator_edge: Option<EdgeIndex>,
) -> TreeClass {
    let holds = |e: Option<EdgeIndex>| e.is_some_and(|e| in_tree[e.0]);
    match (holds(numerator_edge), holds(denominator_edge)) {
        (true, false) => TreeClass::Numerator,
        (false, true) => TreeClass::Denominator,
        _ => TreeClass::Dropped,
    }
}

/// What one tree contributes: `coefficient · symbols · s^degree`, and its
/// fully numeric `value`.
struct Monomial {
    coefficient: f64,
    value: f64,
    symbols: Vec<String>,
    degree: u32,
}

impl Monomial {
    /// Admittances count when selected, impedances when left out.
    fn of_tree(circuit: &Circuit, in_tree: &[bool]) -> Self {
        let mut monomial = Monomial {
            coefficient: 1.0,
            value: 1.0,
            symbols: Vec::new(),
            degree: 0,
        };
        for (edge, &selected) in circuit.edges().iter().zip(in_tree) {
            let counts = match edge.kind {
                EdgeKind::Admittance => selected,
                EdgeKind::Impedance => !selected,
                _ => false,
            };
            if !counts {
                continue;
            }
            monomial.value *= edge.weight;
            monomial.degree += edge.degree;
            match &edge.name {
                Some(name) if !name.is_empty() => monomial.symbols.push(name.clone()),
                _ => monomial.coefficient *= edge.weight,
            }
        }
        monomial
    }
}
