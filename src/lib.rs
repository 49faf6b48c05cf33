//! # Symcirc Core
//!
//! Symbolic transfer functions of lumped networks.
//!
//! This library provides:
//! - A netlist builder that encodes every element as a small gadget of
//!   edges in two parallel graphs (current graph and voltage graph)
//! - An exhaustive enumerator of the common spanning trees of those graphs
//! - An accumulator that turns each tree into a signed monomial and sorts it
//!   into the numerator or denominator of the driving-point admittance
//! - A SPICE-inspired netlist DSL and a small CLI
//!
//! ## Architecture
//!
//! - [`dsl`] - Parser for the netlist language
//! - [`circuit`] - Two-graph circuit representation and the builder
//! - [`components`] - Element gadgets (passives, sources, controlled sources, coupled elements)
//! - [`solver`] - Tree enumeration, signs, expressions and simplification
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! symcirc filter.net --numeric
//! ```
//!
//! ### Library
//!
//! ```no_run
//! use symcirc_core::{analyse_netlist, AnalysisConfig};
//!
//! let meta = analyse_netlist(".interface 1\nR1 1 2 1k\nC1 2 0 1u\n", &AnalysisConfig::default())?;
//! println!("{}", meta.to_display_string());
//! # Ok::<(), symcirc_core::SymcircError>(())
//! ```
//!
//! ## Method
//!
//! For a circuit with `n` vertices every common spanning tree of the two
//! graphs contributes one product of edge symbols (admittances selected,
//! impedances left out) times a sign, the product of the determinant signs
//! of both reduced incidence matrices. A bookkeeping gadget attached to the
//! observation vertex decides whether a tree belongs to the numerator or the
//! denominator. The result is exact; the cost is exponential in the number
//! of edges.

pub mod circuit;
pub mod components;
pub mod dsl;
pub mod error;
pub mod solver;

// Re-export main types for convenience
pub use circuit::{Circuit, CircuitBuilder, NetlistBuilder};
pub use error::{Result, SymcircError};
pub use solver::{AnalysisConfig, Expression, Metacircuit, TransferFunction};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmTransferFunction;

/// Build a [`Circuit`] from netlist text.
pub fn build_netlist(input: &str) -> Result<Circuit> {
    let ast = dsl::parse(input)?;
    let mut builder = CircuitBuilder::new();
    ast.replay(&mut builder);
    Ok(builder.finish())
}

/// Parse, build and analyse netlist text.
pub fn analyse_netlist(input: &str, config: &AnalysisConfig) -> Result<Metacircuit> {
    let circuit = build_netlist(input)?;
    Ok(Metacircuit::analyse_with(&circuit, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_voltage_divider_end_to_end() {
        let meta = analyse_netlist(
            "# divider seen from the middle\n.interface 1\nR1 1 0 1k\nR2 1 0 2k\n",
            &AnalysisConfig::default(),
        )
        .unwrap();
        // Y = 1/R1 + 1/R2 = (R1 + R2) / (R1 R2)
        let value = |n: &str| if n == "R1" { 1e3 } else { 2e3 };
        assert_relative_eq!(
            meta.transfer_function().evaluate(0.0, value),
            1.5e-3,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            meta.digit().unwrap().evaluate(0.0, |_| 1.0),
            1.5e-3,
            max_relative = 1e-12
        );
        assert_eq!(meta.dropped_trees(), 0);
    }

    #[test]
    fn test_series_rc_end_to_end() {
        let meta = analyse_netlist(".interface 1\nR1 1 2 1k\nC1 2 0 1u", &AnalysisConfig::default()).unwrap();
        let value = |n: &str| if n == "R1" { 1e3 } else { 1e-6 };
        let s = 1e3;
        let expected = s * 1e-6 / (1.0 + s * 1e3 * 1e-6);
        assert_relative_eq!(meta.transfer_function().evaluate(s, value), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_parse_errors_propagate() {
        let err = analyse_netlist("Q1 1 2 3", &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, SymcircError::UnknownComponentType { .. }));
    }

    #[test]
    fn test_empty_netlist_is_unity() {
        let meta = analyse_netlist("# nothing here\n", &AnalysisConfig::default()).unwrap();
        assert_eq!(meta.transfer_function(), &TransferFunction::unity());
    }
}
