//! Depth-first traversal over a filtered view of a multigraph.

use crate::circuit::{EdgeIndex, Graph, VertexId};

/// Everything one depth-first pass learns about a graph view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Traversal {
    /// Discovery time per vertex
    pub discovery: Vec<usize>,
    /// Lowest discovery time reachable through one back edge
    pub low: Vec<usize>,
    /// Edges whose removal disconnects the view
    pub bridges: Vec<EdgeIndex>,
    /// Whether any back edge (cycle) was seen
    pub has_cycle: bool,
    /// Connected components of the view, isolated vertices included
    pub components: usize,
}

impl Traversal {
    /// Whether the view spans every vertex in one piece.
    pub fn is_connected(&self) -> bool {
        self.components <= 1
    }
}

struct Frame {
    vertex: VertexId,
    parent: Option<EdgeIndex>,
    cursor: usize,
}

/// Traverse the edges of `graph` for which `view` holds.
///
/// Multigraph aware: the tree edge back to the parent is skipped by index,
/// so a parallel edge is a back edge and a self-loop is a cycle.
pub fn traverse(graph: &Graph, view: impl Fn(EdgeIndex) -> bool) -> Traversal {
    let n = graph.vertex_count();
    let mut discovered = vec![false; n];
    let mut out = Traversal {
        discovery: vec![0; n],
        low: vec![0; n],
        ..Traversal::default()
    };
    let mut time = 0;
    let mut stack: Vec<Frame> = Vec::new();

    for root in 0..n {
        if discovered[root] {
            continue;
        }
        out.components += 1;
        discovered[root] = true;
        out.discovery[root] = time;
        out.low[root] = time;
        time += 1;
        stack.push(Frame {
            vertex: VertexId(root),
            parent: None,
            cursor: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let v = frame.vertex.0;
            let incident = graph.incident(frame.vertex);

            if frame.cursor < incident.len() {
                let (edge, other) = incident[frame.cursor];
                frame.cursor += 1;
                if !view(edge) || frame.parent == Some(edge) {
                    continue;
                }
                let w = other.0;
                if discovered[w] {
                    out.has_cycle = true;
                    out.low[v] = out.low[v].min(out.discovery[w]);
                } else {
                    discovered[w] = true;
                    out.discovery[w] = time;
                    out.low[w] = time;
                    time += 1;
                    stack.push(Frame {
                        vertex: other,
                        parent: Some(edge),
                        cursor: 0,
                    });
                }
                continue;
            }

            let parent = frame.parent;
            stack.pop();
            if let (Some(edge), Some(up)) = (parent, stack.last()) {
                let u = up.vertex.0;
                out.low[u] = out.low[u].min(out.low[v]);
                if out.low[v] > out.discovery[u] {
                    out.bridges.push(edge);
                }
            }
        }
    }

    out
}

/// Whether the edges selected by `view` contain a cycle.
pub fn has_cycle(graph: &Graph, view: impl Fn(EdgeIndex) -> bool) -> bool {
    traverse(graph, view).has_cycle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Circuit, EdgeData};

    fn circuit(vertices: usize, edges: &[(usize, usize)]) -> Circuit {
        let mut circuit = Circuit::new();
        for _ in 1..vertices {
            circuit.add_vertex();
        }
        for &(a, b) in edges {
            let ends = (VertexId(a), VertexId(b));
            circuit.push_edge(EdgeData::unit(), ends, ends);
        }
        circuit
    }

    #[test]
    fn test_path_is_all_bridges() {
        let c = circuit(4, &[(0, 1), (1, 2), (2, 3)]);
        let t = traverse(c.current_graph(), |_| true);
        assert!(!t.has_cycle);
        assert_eq!(t.components, 1);
        let mut bridges = t.bridges.clone();
        bridges.sort();
        assert_eq!(bridges, vec![EdgeIndex(0), EdgeIndex(1), EdgeIndex(2)]);
    }

    #[test]
    fn test_parallel_edges_are_not_bridges() {
        let c = circuit(3, &[(0, 1), (0, 1), (1, 2)]);
        let t = traverse(c.current_graph(), |_| true);
        assert!(t.has_cycle);
        assert_eq!(t.bridges, vec![EdgeIndex(2)]);
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let c = circuit(2, &[(0, 1), (1, 1)]);
        let t = traverse(c.current_graph(), |_| true);
        assert!(t.has_cycle);
        assert_eq!(t.bridges, vec![EdgeIndex(0)]);
        // the loop alone is still a cycle
        assert!(has_cycle(c.current_graph(), |e| e == EdgeIndex(1)));
    }

    #[test]
    fn test_view_filters_edges() {
        let c = circuit(3, &[(0, 1), (1, 2), (2, 0)]);
        assert!(has_cycle(c.current_graph(), |_| true));
        let t = traverse(c.current_graph(), |e| e != EdgeIndex(1));
        assert!(!t.has_cycle);
        assert_eq!(t.bridges.len(), 2);

        let t = traverse(c.current_graph(), |e| e == EdgeIndex(0));
        assert_eq!(t.components, 2);
        assert!(!t.is_connected());
    }

    #[test]
    fn test_cycle_with_tail() {
        // triangle 0-1-2 with a tail 2-3
        let c = circuit(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]);
        let t = traverse(c.current_graph(), |_| true);
        assert_eq!(t.bridges, vec![EdgeIndex(3)]);
        assert!(t.is_connected());
    }
}
