//! Dual multigraph storage.
//!
//! A [`Circuit`] owns two arena multigraphs over the same vertex set. Every
//! edge index exists in both arenas at once: `current` holds the current-branch
//! view of a relationship and `voltage` holds its voltage-branch view. All
//! mutation goes through `Circuit` so the two arenas never drift apart.

use super::types::{EdgeData, EdgeIndex, EdgeKind, PropertyBag, VertexId};

/// One of the two parallel multigraphs.
///
/// Edges are stored as ordered `(source, target)` pairs; the order is the
/// orientation used for incidence signs. Parallel edges and self-loops are
/// allowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    vertex_count: usize,
    ends: Vec<(VertexId, VertexId)>,
    /// Incident `(edge, opposite vertex)` pairs per vertex
    adjacency: Vec<Vec<(EdgeIndex, VertexId)>>,
}

impl Graph {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.ends.len()
    }

    /// Endpoints of an edge.
    pub fn ends(&self, edge: EdgeIndex) -> (VertexId, VertexId) {
        self.ends[edge.0]
    }

    /// All edge endpoints in index order.
    pub fn edges(&self) -> &[(VertexId, VertexId)] {
        &self.ends
    }

    /// Edges incident to a vertex, with the vertex at their other end.
    ///
    /// A self-loop appears twice in its vertex's list, like any other edge
    /// seen from both of its ends.
    pub fn incident(&self, vertex: VertexId) -> &[(EdgeIndex, VertexId)] {
        &self.adjacency[vertex.0]
    }

    fn add_vertex(&mut self) -> VertexId {
        self.vertex_count += 1;
        self.adjacency.push(Vec::new());
        VertexId(self.vertex_count - 1)
    }

    fn push(&mut self, ends: (VertexId, VertexId)) -> EdgeIndex {
        let edge = EdgeIndex(self.ends.len());
        self.ends.push(ends);
        self.link(edge, ends);
        edge
    }

    fn link(&mut self, edge: EdgeIndex, (a, b): (VertexId, VertexId)) {
        // Out-of-range endpoints are kept in `ends` so the pairing check can
        // report them; they simply never show up in adjacency.
        if a.0 < self.vertex_count && b.0 < self.vertex_count {
            self.adjacency[a.0].push((edge, b));
            self.adjacency[b.0].push((edge, a));
        }
    }

    fn swap_remove_edge(&mut self, edge: EdgeIndex) {
        self.ends.swap_remove(edge.0);
    }

    fn rebuild_adjacency(&mut self) {
        for list in self.adjacency.iter_mut() {
            list.clear();
        }
        let ends = std::mem::take(&mut self.ends);
        for (i, &pair) in ends.iter().enumerate() {
            self.link(EdgeIndex(i), pair);
        }
        self.ends = ends;
    }
}

/// A circuit expressed as a current graph / voltage graph pair.
#[derive(Debug, Clone)]
pub struct Circuit {
    current: Graph,
    voltage: Graph,
    /// Per-index metadata, shared by both views of the pair
    edges: Vec<EdgeData>,
    reference: VertexId,
    output: VertexId,
    properties: PropertyBag,
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

impl Circuit {
    /// Create a circuit holding only the reference vertex.
    ///
    /// The output vertex starts out equal to the reference.
    pub fn new() -> Self {
        let mut circuit = Self {
            current: Graph::default(),
            voltage: Graph::default(),
            edges: Vec::new(),
            reference: VertexId::REFERENCE,
            output: VertexId::REFERENCE,
            properties: PropertyBag::new(),
        };
        circuit.add_vertex();
        circuit
    }

    /// Allocate a vertex in both graphs.
    pub fn add_vertex(&mut self) -> VertexId {
        let v = self.current.add_vertex();
        let w = self.voltage.add_vertex();
        debug_assert_eq!(v, w);
        v
    }

    /// Append an edge pair.
    ///
    /// `current` and `voltage` are the `(source, target)` endpoints of the
    /// edge in each graph. Both arenas receive the edge at the same index.
    pub fn push_edge(
        &mut self,
        data: EdgeData,
        current: (VertexId, VertexId),
        voltage: (VertexId, VertexId),
    ) -> EdgeIndex {
        let e = self.current.push(current);
        let f = self.voltage.push(voltage);
        debug_assert_eq!(e, f);
        self.edges.push(data);
        e
    }

    /// Remove the pair at `edge` from both graphs.
    ///
    /// The last pair moves into the vacated index, in both graphs at once.
    pub fn remove_edge(&mut self, edge: EdgeIndex) -> EdgeData {
        self.current.swap_remove_edge(edge);
        self.voltage.swap_remove_edge(edge);
        self.current.rebuild_adjacency();
        self.voltage.rebuild_adjacency();
        self.edges.swap_remove(edge.0)
    }

    /// Number of vertices (identical in both graphs after construction).
    pub fn vertex_count(&self) -> usize {
        self.current.vertex_count()
    }

    /// Number of edge pairs.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The current graph.
    pub fn current_graph(&self) -> &Graph {
        &self.current
    }

    /// The voltage graph.
    pub fn voltage_graph(&self) -> &Graph {
        &self.voltage
    }

    /// Metadata of an edge pair.
    pub fn edge(&self, edge: EdgeIndex) -> &EdgeData {
        &self.edges[edge.0]
    }

    /// Metadata of every edge pair in index order.
    pub fn edges(&self) -> &[EdgeData] {
        &self.edges
    }

    /// First edge of the given kind.
    pub fn find_kind(&self, kind: EdgeKind) -> Option<EdgeIndex> {
        self.edges.iter().position(|e| e.kind == kind).map(EdgeIndex)
    }

    /// `true` at every `Forced` edge.
    pub fn forced_mask(&self) -> Vec<bool> {
        self.edges.iter().map(|e| e.kind == EdgeKind::Forced).collect()
    }

    /// The reference (ground) vertex.
    pub fn reference(&self) -> VertexId {
        self.reference
    }

    /// The observation vertex.
    pub fn output(&self) -> VertexId {
        self.output
    }

    /// Designate the observation vertex.
    pub fn set_output(&mut self, vertex: VertexId) {
        self.output = vertex;
    }

    /// Circuit-level properties.
    pub fn properties(&self) -> &PropertyBag {
        &self.properties
    }

    /// Mutable circuit-level properties.
    pub fn properties_mut(&mut self) -> &mut PropertyBag {
        &mut self.properties
    }

    #[cfg(test)]
    pub(crate) fn graphs_mut(&mut self) -> (&mut Graph, &mut Graph) {
        (&mut self.current, &mut self.voltage)
    }
}

#[cfg(test)]
impl Graph {
    pub(crate) fn push_unpaired(&mut self, ends: (VertexId, VertexId)) {
        self.push(ends);
    }

    pub(crate) fn add_unpaired_vertex(&mut self) {
        self.add_vertex();
    }
}
