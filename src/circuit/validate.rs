//! Dual-graph consistency check.

use thiserror::Error;

use super::{Circuit, EdgeIndex, Graph, VertexId};

/// Ways in which the two graphs of a circuit can fail to line up.
///
/// These are never surfaced as errors of the solver; the enumerator logs
/// them and produces no trees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PairingDefect {
    #[error("vertex counts differ: current graph has {current}, voltage graph has {voltage}")]
    VertexCount { current: usize, voltage: usize },

    #[error("edge counts differ: current graph has {current}, voltage graph has {voltage}, metadata has {metadata}")]
    EdgeCount {
        current: usize,
        voltage: usize,
        metadata: usize,
    },

    #[error("edge {edge} references vertex {vertex} which does not exist")]
    DanglingEndpoint { edge: EdgeIndex, vertex: VertexId },
}

/// Check that both graphs of a circuit share a vertex set and a dense edge
/// index space, and that the metadata covers every index.
pub fn check_pairing(circuit: &Circuit) -> Result<(), PairingDefect> {
    check_graph_pair(
        circuit.current_graph(),
        circuit.voltage_graph(),
        circuit.edges().len(),
    )
}

/// Check a graph pair against each other and against `edges` indices of
/// per-edge data.
pub fn check_graph_pair(current: &Graph, voltage: &Graph, edges: usize) -> Result<(), PairingDefect> {
    if current.vertex_count() != voltage.vertex_count() {
        return Err(PairingDefect::VertexCount {
            current: current.vertex_count(),
            voltage: voltage.vertex_count(),
        });
    }

    if current.edge_count() != voltage.edge_count() || current.edge_count() != edges {
        return Err(PairingDefect::EdgeCount {
            current: current.edge_count(),
            voltage: voltage.edge_count(),
            metadata: edges,
        });
    }

    let n = current.vertex_count();
    for graph in [current, voltage] {
        for (i, &(a, b)) in graph.edges().iter().enumerate() {
            for vertex in [a, b] {
                if vertex.0 >= n {
                    return Err(PairingDefect::DanglingEndpoint {
                        edge: EdgeIndex(i),
                        vertex,
                    });
                }
            }
        }
    }

    Ok(())
}
