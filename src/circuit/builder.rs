//! Gadget-stamping circuit builder.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::{Circuit, EdgeData, EdgeIndex, NetlistBuilder, PropertyBag, VertexId};
use crate::components::{
    stamp_reference, DualComponent, DualKind, Gadget, QuadComponent, QuadKind, Stamp,
};

/// A prescribed-pressure node. Recorded, never solved for.
#[derive(Debug, Clone, PartialEq)]
pub struct PrescribedPressure {
    pub name: String,
    pub value: f64,
    pub vertex: usize,
    pub properties: PropertyBag,
}

/// Builds a [`Circuit`] from netlist calls.
///
/// Netlist vertices are created on first reference. Netlist vertex `0` is
/// the reference vertex. No call ever fails; a reference to a vertex that
/// was never mentioned before simply creates it.
#[derive(Debug, Default)]
pub struct CircuitBuilder {
    circuit: Circuit,
    /// Netlist vertex to circuit vertex
    vertices: HashMap<usize, VertexId>,
    /// Requested vertices and their sentinel self-loops
    requested: HashMap<VertexId, EdgeIndex>,
    pressures: Vec<PrescribedPressure>,
    components: usize,
    wires: usize,
    unknown: usize,
    flushed: bool,
}

impl CircuitBuilder {
    /// Create a builder holding an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// The circuit built so far.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Flush and hand over the circuit.
    pub fn finish(mut self) -> Circuit {
        self.flush();
        self.circuit
    }

    /// Prescribed-pressure nodes, in call order.
    pub fn pressure_nodes(&self) -> &[PrescribedPressure] {
        &self.pressures
    }

    /// Number of components that stamped a gadget.
    pub fn component_count(&self) -> usize {
        self.components
    }

    /// Number of wires seen.
    pub fn wire_count(&self) -> usize {
        self.wires
    }

    /// Number of components the builder ignored.
    pub fn unknown_count(&self) -> usize {
        self.unknown
    }

    /// Whether `flush` has run.
    pub fn is_flushed(&self) -> bool {
        self.flushed
    }

    /// Circuit vertex for a netlist vertex, created on first use.
    fn vertex(&mut self, netlist: usize) -> VertexId {
        if netlist == 0 {
            return self.circuit.reference();
        }
        if let Some(&v) = self.vertices.get(&netlist) {
            return v;
        }
        let v = self.circuit.add_vertex();
        self.vertices.insert(netlist, v);
        v
    }

    /// Circuit vertex for a netlist vertex about to receive a gadget.
    ///
    /// A requested vertex loses its sentinel loop, so the gadget attaches to
    /// a vertex that carries only real edges. Vertex ids are dense and the
    /// vertex keeps its id, so removing the sentinel is the whole split.
    fn terminal(&mut self, netlist: usize) -> VertexId {
        let v = self.vertex(netlist);
        let Some(sentinel) = self.requested.remove(&v) else {
            return v;
        };

        let moved = EdgeIndex(self.circuit.edge_count() - 1);
        self.circuit.remove_edge(sentinel);
        // the last pair now lives at the sentinel's index
        for index in self.requested.values_mut() {
            if *index == moved {
                *index = sentinel;
            }
        }

        debug!(vertex = netlist, "split requested vertex");
        v
    }

    fn has_edges(&self, v: VertexId) -> bool {
        !self.circuit.current_graph().incident(v).is_empty()
            || !self.circuit.voltage_graph().incident(v).is_empty()
    }

    fn stamp_with(
        &mut self,
        properties: &PropertyBag,
        stamp_fn: impl FnOnce(&mut Stamp<'_>),
    ) -> Gadget {
        let mut stamp = Stamp::new(&mut self.circuit, properties);
        stamp_fn(&mut stamp);
        let gadget = stamp.finish();
        if !gadget.edges.is_empty() {
            self.components += 1;
        }
        gadget
    }
}

impl NetlistBuilder for CircuitBuilder {
    fn add_circuit_property(&mut self, name: &str, value: &str) {
        self.circuit
            .properties_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn add_wire_component(&mut self, _properties: &PropertyBag) {
        self.wires += 1;
    }

    fn add_three_d_interface_node(&mut self, vertex: usize, _properties: &PropertyBag) {
        let v = self.vertex(vertex);
        if v != self.circuit.reference() && !self.has_edges(v) && !self.requested.contains_key(&v) {
            let sentinel = self.circuit.push_edge(EdgeData::unit(), (v, v), (v, v));
            self.requested.insert(v, sentinel);
            debug!(vertex, "requested interface vertex");
        }
        self.circuit.set_output(v);
    }

    fn add_prescribed_pressure_node(
        &mut self,
        name: &str,
        value: f64,
        vertex: usize,
        properties: &PropertyBag,
    ) {
        self.pressures.push(PrescribedPressure {
            name: name.to_string(),
            value,
            vertex,
            properties: properties.clone(),
        });
    }

    fn add_dual_component(
        &mut self,
        kind: DualKind,
        name: &str,
        parameters: &[f64],
        va: usize,
        vb: usize,
        properties: &PropertyBag,
    ) {
        let component = DualComponent {
            kind,
            name: name.to_string(),
            parameters: parameters.to_vec(),
            terminals: [self.terminal(va), self.terminal(vb)],
        };
        let gadget = self.stamp_with(properties, |stamp| component.stamp(stamp));
        debug!(%kind, name, edges = gadget.edges.len(), aux = gadget.aux_vertices, "stamped");
    }

    fn add_quad_component(
        &mut self,
        kind: QuadKind,
        name: &str,
        parameters: &[f64],
        has_control: bool,
        va: usize,
        vb: usize,
        vac: usize,
        vbc: usize,
        properties: &PropertyBag,
    ) {
        let (vac, vbc) = if has_control { (vac, vbc) } else { (va, vb) };
        let component = QuadComponent {
            kind,
            name: name.to_string(),
            parameters: parameters.to_vec(),
            terminals: [
                self.terminal(va),
                self.terminal(vb),
                self.terminal(vac),
                self.terminal(vbc),
            ],
        };
        let gadget = self.stamp_with(properties, |stamp| component.stamp(stamp));
        debug!(%kind, name, edges = gadget.edges.len(), aux = gadget.aux_vertices, "stamped");
    }

    fn add_unknown_component(&mut self, _properties: &PropertyBag) {
        self.unknown += 1;
    }

    fn flush(&mut self) {
        if self.flushed {
            return;
        }
        self.flushed = true;

        if self.components == 0 {
            debug!("no components, skipping reference gadget");
            return;
        }
        if self.circuit.output() == self.circuit.reference() {
            warn!("no interface vertex designated, output is the reference");
        }
        stamp_reference(&mut self.circuit);
        debug!(
            vertices = self.circuit.vertex_count(),
            edges = self.circuit.edge_count(),
            "circuit flushed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{check_pairing, EdgeKind};

    fn props() -> PropertyBag {
        PropertyBag::new()
    }

    fn resistor(builder: &mut CircuitBuilder, name: &str, a: usize, b: usize) {
        builder.add_dual_component(DualKind::Resistor, name, &[1e3], a, b, &props());
    }

    #[test]
    fn test_vertices_created_lazily() {
        let mut builder = CircuitBuilder::new();
        resistor(&mut builder, "R1", 7, 0);
        resistor(&mut builder, "R2", 7, 42);

        let circuit = builder.circuit();
        assert_eq!(circuit.vertex_count(), 3);
        let (a, _) = circuit.current_graph().ends(EdgeIndex(0));
        let (b, _) = circuit.current_graph().ends(EdgeIndex(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_flush_is_idempotent() {
        let mut builder = CircuitBuilder::new();
        builder.add_three_d_interface_node(1, &props());
        resistor(&mut builder, "R1", 1, 0);
        builder.flush();
        let edges = builder.circuit().edge_count();
        builder.flush();

        assert!(builder.is_flushed());
        assert_eq!(builder.circuit().edge_count(), edges);
        let circuit = builder.finish();
        assert_eq!(circuit.edge_count(), edges);
        assert_eq!(
            circuit.edges().iter().filter(|e| e.kind == EdgeKind::GRef).count(),
            1
        );
        assert_eq!(
            circuit.edges().iter().filter(|e| e.kind == EdgeKind::YRef).count(),
            1
        );
        assert_eq!(check_pairing(&circuit), Ok(()));
    }

    #[test]
    fn test_empty_circuit_has_no_bookkeeping() {
        let circuit = CircuitBuilder::new().finish();
        assert_eq!(circuit.edge_count(), 0);
        assert_eq!(circuit.vertex_count(), 1);
    }

    #[test]
    fn test_requested_vertex_is_split_on_first_use() {
        let mut builder = CircuitBuilder::new();
        builder.add_three_d_interface_node(2, &props());
        // sentinel loop in place
        assert_eq!(builder.circuit().edge_count(), 1);
        let requested = builder.circuit().output();

        resistor(&mut builder, "R1", 2, 0);
        let circuit = builder.circuit();
        assert_eq!(circuit.edge_count(), 1);
        assert_eq!(circuit.edge(EdgeIndex(0)).name.as_deref(), Some("R1"));
        assert_eq!(circuit.current_graph().ends(EdgeIndex(0)).0, circuit.output());
        assert_eq!(circuit.output(), requested);
        assert_eq!(check_pairing(circuit), Ok(()));
    }

    #[test]
    fn test_two_requests_track_moved_sentinel() {
        let mut builder = CircuitBuilder::new();
        builder.add_three_d_interface_node(1, &props());
        builder.add_three_d_interface_node(2, &props());
        // the first sentinel is removed and the second moves into its slot
        resistor(&mut builder, "R1", 1, 0);
        resistor(&mut builder, "R2", 2, 0);

        let circuit = builder.finish();
        let loops = (0..circuit.edge_count())
            .map(EdgeIndex)
            .filter(|&e| {
                let (a, b) = circuit.current_graph().ends(e);
                a == b
            })
            .count();
        assert_eq!(loops, 0);
        assert_eq!(check_pairing(&circuit), Ok(()));
    }

    #[test]
    fn test_interface_on_connected_vertex_is_not_requested() {
        let mut builder = CircuitBuilder::new();
        resistor(&mut builder, "R1", 3, 0);
        builder.add_three_d_interface_node(3, &props());
        assert_eq!(builder.circuit().edge_count(), 1);
        let (a, _) = builder.circuit().current_graph().ends(EdgeIndex(0));
        assert_eq!(builder.circuit().output(), a);
    }

    #[test]
    fn test_bookkeeping_calls_add_no_edges() {
        let mut builder = CircuitBuilder::new();
        builder.add_circuit_property("title", "demo");
        builder.add_wire_component(&props());
        builder.add_unknown_component(&props());
        builder.add_prescribed_pressure_node("P1", 101_325.0, 4, &props());

        assert_eq!(builder.circuit().edge_count(), 0);
        assert_eq!(builder.wire_count(), 1);
        assert_eq!(builder.unknown_count(), 1);
        assert_eq!(builder.pressure_nodes()[0].value, 101_325.0);
        assert_eq!(builder.circuit().properties()["title"], "demo");
    }

    #[test]
    fn test_circuit_properties_bulk() {
        let mut builder = CircuitBuilder::new();
        let mut bag = PropertyBag::new();
        bag.insert("a".into(), "1".into());
        bag.insert("b".into(), "2".into());
        builder.add_circuit_properties(&bag);
        assert_eq!(builder.circuit().properties(), &bag);
    }

    #[test]
    fn test_quad_without_control_uses_output_port() {
        let mut builder = CircuitBuilder::new();
        builder.add_quad_component(QuadKind::Vccs, "G1", &[2.0], false, 1, 0, 5, 6, &props());

        let circuit = builder.circuit();
        assert_eq!(circuit.vertex_count(), 2);
        assert_eq!(
            circuit.current_graph().ends(EdgeIndex(0)),
            circuit.voltage_graph().ends(EdgeIndex(0))
        );
    }
}
