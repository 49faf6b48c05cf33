//! Independent sources.
//!
//! A transfer function is taken with every independent source zeroed, so the
//! gadgets below encode a short (voltage source) and an open (current
//! source) that still occupy their terminals in both graphs.

use super::{DualComponent, Stamp};
use crate::circuit::{EdgeData, EdgeKind};

/// Zeroed voltage source between `a` and `b`.
///
/// The aux vertex carries the branch current. Its row states `v(a) = v(b)`,
/// the forced pair routes the branch current into `a` and out of `b`.
pub(super) fn stamp_voltage_source(component: &DualComponent, stamp: &mut Stamp<'_>) {
    let [a, b] = component.terminals;
    let reference = stamp.reference();
    let m = stamp.aux();

    stamp.branch(EdgeData::unit(), (m, reference));
    stamp.edge(EdgeData::forced(), (a, b), (m, reference));
    stamp.edge(EdgeData::forced(), (m, reference), (b, a));
}

/// Zeroed current source between `a` and `b`: a zero admittance.
pub(super) fn stamp_current_source(component: &DualComponent, stamp: &mut Stamp<'_>) {
    let [a, b] = component.terminals;
    stamp.branch(EdgeData::new(EdgeKind::Admittance, None, 0.0, 0), (a, b));
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{circuit_with, stamp_dual};
    use super::super::DualKind;
    use super::*;
    use crate::circuit::{EdgeIndex, VertexId};

    #[test]
    fn test_voltage_source_gadget() {
        let (mut circuit, v) = circuit_with(2);
        let source = DualComponent {
            kind: DualKind::VoltageSource,
            name: "V1".into(),
            parameters: vec![5.0],
            terminals: [v[1], v[2]],
        };
        let gadget = stamp_dual(&mut circuit, &source);

        assert_eq!(gadget.aux_vertices, 1);
        assert_eq!(gadget.edges.len(), 3);
        assert_eq!(circuit.vertex_count(), 4);
        let m = VertexId(3);
        assert_eq!(circuit.forced_mask(), vec![false, true, true]);
        assert_eq!(circuit.current_graph().ends(EdgeIndex(1)), (v[1], v[2]));
        assert_eq!(circuit.voltage_graph().ends(EdgeIndex(1)), (m, v[0]));
        assert_eq!(circuit.voltage_graph().ends(EdgeIndex(2)), (v[2], v[1]));
        // the source value never enters the graph
        assert!(circuit.edges().iter().all(|e| !e.is_symbolic()));
    }

    #[test]
    fn test_current_source_is_open() {
        let (mut circuit, v) = circuit_with(1);
        let source = DualComponent {
            kind: DualKind::CurrentSource,
            name: "I1".into(),
            parameters: vec![1e-3],
            terminals: [v[1], v[0]],
        };
        let gadget = stamp_dual(&mut circuit, &source);

        assert_eq!(gadget.edges.len(), 1);
        let edge = circuit.edge(EdgeIndex(0));
        assert_eq!(edge.kind, EdgeKind::Admittance);
        assert_eq!(edge.weight, 0.0);
        assert!(!edge.is_symbolic());
    }
}
