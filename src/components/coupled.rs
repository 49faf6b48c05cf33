//! Magnetically coupled elements.
//!
//! The transformer needs one aux vertex and four edges, the coupled pair two
//! aux vertices and eight edges: one aux row per winding current, a unit
//! pair tying each row to its port, and one admittance per entry of the
//! coupling matrix. That is the smallest pattern whose tree expansion
//! reproduces the nodal stamp. Layouts assembled from separate inductor
//! gadgets need more aux vertices (3 and 4) and only six edges each.

use super::{named_admittance, QuadComponent, Stamp};
use crate::circuit::{EdgeData, EdgeKind};

/// Ideal transformer with ratio `n`: `v(a, b) = n · v(c, d)` and
/// `i(c→d) = -n · i(a→b)`.
pub(super) fn stamp_transformer(component: &QuadComponent, stamp: &mut Stamp<'_>) {
    let [a, b, c, d] = component.terminals;
    let n = component.parameter(0);
    let reference = stamp.reference();
    let m = stamp.aux();

    stamp.edge(EdgeData::unit(), (a, b), (m, reference));
    stamp.edge(named_admittance(&component.name, n, 0), (d, c), (m, reference));
    stamp.edge(EdgeData::unit(), (m, reference), (a, b));
    stamp.edge(named_admittance(&component.name, n, 0), (reference, m), (c, d));
}

/// Coupled inductor pair with self inductances `L1`, `L2` and mutual `M`.
///
/// Each winding gets an aux vertex carrying its current; the inductance
/// matrix appears as degree-one admittances between the two aux rows.
/// Parameters are `[L1, L2, M]` and the symbols are `<name>_L1`,
/// `<name>_L2` and `<name>_M`.
pub(super) fn stamp_mutual_inductance(component: &QuadComponent, stamp: &mut Stamp<'_>) {
    let [a, b, c, d] = component.terminals;
    let reference = stamp.reference();
    let first = stamp.aux();
    let second = stamp.aux();

    let inductance = |suffix: &str, value: f64| {
        let name = (!component.name.is_empty()).then(|| format!("{}_{suffix}", component.name));
        EdgeData::new(EdgeKind::Admittance, name, value, 1)
    };

    stamp.edge(EdgeData::unit(), (a, b), (first, reference));
    stamp.edge(EdgeData::unit(), (c, d), (second, reference));
    stamp.edge(EdgeData::unit(), (first, reference), (a, b));
    stamp.edge(EdgeData::unit(), (second, reference), (c, d));

    let (l1, l2, m) = (
        component.parameter(0),
        component.parameter(1),
        component.parameter(2),
    );
    stamp.edge(inductance("L1", l1), (reference, first), (first, reference));
    stamp.edge(inductance("M", m), (reference, first), (second, reference));
    stamp.edge(inductance("L2", l2), (reference, second), (second, reference));
    stamp.edge(inductance("M", m), (reference, second), (first, reference));
}
