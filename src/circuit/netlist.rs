//! The netlist builder interface.

use super::PropertyBag;
use crate::components::{DualKind, QuadKind};

/// Receiver of a netlist, one call per element.
///
/// Netlist vertices are plain non-negative integers; `0` is the reference.
/// Implementations must accept calls in any order and must tolerate
/// `flush` being called more than once.
pub trait NetlistBuilder {
    /// Record a circuit-level property.
    fn add_circuit_property(&mut self, name: &str, value: &str);

    /// Record several circuit-level properties.
    fn add_circuit_properties(&mut self, properties: &PropertyBag) {
        for (name, value) in properties {
            self.add_circuit_property(name, value);
        }
    }

    /// A wire. Topology only.
    fn add_wire_component(&mut self, properties: &PropertyBag);

    /// Designate the observation (3D interface) vertex.
    fn add_three_d_interface_node(&mut self, vertex: usize, properties: &PropertyBag);

    /// A prescribed-pressure boundary node.
    fn add_prescribed_pressure_node(
        &mut self,
        name: &str,
        value: f64,
        vertex: usize,
        properties: &PropertyBag,
    );

    /// A two-terminal element between `va` and `vb`.
    fn add_dual_component(
        &mut self,
        kind: DualKind,
        name: &str,
        parameters: &[f64],
        va: usize,
        vb: usize,
        properties: &PropertyBag,
    );

    /// A four-terminal element with output port `va→vb` and controlling
    /// port `vac→vbc`. Without `has_control` the controlling port is
    /// ignored and the output port controls itself.
    #[allow(clippy::too_many_arguments)]
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
    );

    /// An element the receiver does not understand.
    fn add_unknown_component(&mut self, properties: &PropertyBag);

    /// Finalise the construction.
    fn flush(&mut self);
}
