//! Reference bookkeeping gadget.
//!
//! Closes the observation port so that every common tree is either a
//! numerator tree or a denominator tree. With aux vertex `x`:
//!
//! - `GRef[x→ref | x→ref]`
//! - `YRef[x→ref | ref→out]`
//! - unit `[ref→out | ref→x]`
//!
//! A tree holding `GRef` alone spans the network itself and yields the
//! nodal determinant. A tree holding `YRef` must also hold the unit edge,
//! and spans the network with `out` merged into `ref`, yielding the cofactor
//! at `out`. Their ratio is the driving-point admittance seen at `out`.

use super::{Gadget, Stamp};
use crate::circuit::{Circuit, EdgeData, EdgeKind, PropertyBag};

/// Stamp the bookkeeping gadget between the reference and output vertices.
pub fn stamp_reference(circuit: &mut Circuit) -> Gadget {
    let properties = PropertyBag::new();
    let mut stamp = Stamp::new(circuit, &properties);
    let reference = stamp.reference();
    let output = stamp.output();
    let x = stamp.aux();

    stamp.branch(EdgeData::new(EdgeKind::GRef, None, 1.0, 0), (x, reference));
    stamp.edge(
        EdgeData::new(EdgeKind::YRef, None, 1.0, 0),
        (x, reference),
        (reference, output),
    );
    stamp.edge(EdgeData::unit(), (reference, output), (reference, x));
    stamp.finish()
}
