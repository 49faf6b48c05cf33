//! Dependent sources and the ideal op-amp.
//!
//! Port convention: `[a, b, c, d]` with the output port `a→b` and the
//! controlling port `c→d`. Gains are symbolic under the component name.

use super::{named_admittance, QuadComponent, Stamp};
use crate::circuit::EdgeData;

/// Voltage-controlled current source: `i(a→b) = g · v(c, d)`.
pub(super) fn stamp_vccs(component: &QuadComponent, stamp: &mut Stamp<'_>) {
    let [a, b, c, d] = component.terminals;
    stamp.edge(
        named_admittance(&component.name, component.parameter(0), 0),
        (a, b),
        (c, d),
    );
}

/// Voltage-controlled voltage source: `v(a, b) = μ · v(c, d)`.
pub(super) fn stamp_vcvs(component: &QuadComponent, stamp: &mut Stamp<'_>) {
    let [a, b, c, d] = component.terminals;
    let reference = stamp.reference();
    let m = stamp.aux();

    stamp.edge(EdgeData::forced(), (a, b), (m, reference));
    stamp.edge(EdgeData::unit(), (m, reference), (a, b));
    stamp.edge(
        named_admittance(&component.name, component.parameter(0), 0),
        (reference, m),
        (c, d),
    );
}

/// Current-controlled current source: `i(a→b) = β · i(c→d)`.
///
/// The controlling port is shorted through the aux branch current.
pub(super) fn stamp_cccs(component: &QuadComponent, stamp: &mut Stamp<'_>) {
    let [a, b, c, d] = component.terminals;
    let reference = stamp.reference();
    let m = stamp.aux();

    stamp.edge(EdgeData::unit(), (c, d), (m, reference));
    stamp.edge(EdgeData::forced(), (m, reference), (c, d));
    stamp.edge(
        named_admittance(&component.name, component.parameter(0), 0),
        (a, b),
        (m, reference),
    );
}

/// Current-controlled voltage source: `v(a, b) = r · i(c→d)`.
pub(super) fn stamp_ccvs(component: &QuadComponent, stamp: &mut Stamp<'_>) {
    let [a, b, c, d] = component.terminals;
    let reference = stamp.reference();
    let control = stamp.aux();
    let output = stamp.aux();

    stamp.edge(EdgeData::unit(), (c, d), (control, reference));
    stamp.edge(EdgeData::forced(), (control, reference), (c, d));
    stamp.edge(EdgeData::forced(), (a, b), (output, reference));
    stamp.edge(EdgeData::unit(), (output, reference), (a, b));
    stamp.edge(
        named_admittance(&component.name, component.parameter(0), 0),
        (reference, output),
        (control, reference),
    );
}

/// Ideal op-amp as a nullor: output current `a→b` free, input `v(c, d) = 0`.
pub(super) fn stamp_opamp(component: &QuadComponent, stamp: &mut Stamp<'_>) {
    let [a, b, c, d] = component.terminals;
    stamp.edge(EdgeData::forced(), (a, b), (c, d));
}
