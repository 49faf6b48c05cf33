//! Dual-graph circuit representation and construction.
//!
//! A [`Circuit`] is a pair of multigraphs sharing one vertex set and one
//! dense edge index space. It is assembled by [`CircuitBuilder`] through the
//! [`NetlistBuilder`] interface, one call per netlist element, and handed
//! read-only to the solver afterwards.

mod builder;
mod graph;
mod netlist;
mod types;
mod validate;

pub use builder::{CircuitBuilder, PrescribedPressure};
pub use graph::{Circuit, Graph};
pub use netlist::NetlistBuilder;
pub use types::*;
pub use validate::{check_graph_pair, check_pairing, PairingDefect};
