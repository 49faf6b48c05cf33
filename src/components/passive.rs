//! Single-edge passive gadgets: Resistor, Conductance, Inductor, Capacitor,
//! Diode and Volume-tracking chamber.

use super::{symbol, DualComponent, DualKind, Stamp};
use crate::circuit::{EdgeData, EdgeKind};

/// Stamp a one-edge passive gadget between the component's terminals.
///
/// Resistors and inductors are impedances (they count when left out of a
/// tree); everything else is an admittance.
pub(super) fn stamp_passive(component: &DualComponent, stamp: &mut Stamp<'_>) {
    let kind = match component.kind {
        DualKind::Resistor | DualKind::Inductor => EdgeKind::Impedance,
        _ => EdgeKind::Admittance,
    };
    let value = component.parameters.first().copied().unwrap_or(1.0);
    let [a, b] = component.terminals;

    stamp.branch(
        EdgeData::new(kind, symbol(&component.name), value, component.kind.degree()),
        (a, b),
    );
}
