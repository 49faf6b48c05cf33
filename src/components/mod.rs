//! Component gadgets.
//!
//! Every netlist element is encoded as a small fixed pattern of edges (and,
//! for elements with internal state such as controlled sources, auxiliary
//! vertices) stamped into both graphs of a [`Circuit`] at once:
//! - Passive: Resistor, Conductance, Inductor, Capacitor, Diode, Volume-tracking chamber
//! - Sources: Voltage Source, Current Source (both zeroed)
//! - Controlled: VCCS, VCVS, CCCS, CCVS, ideal Op-Amp
//! - Coupled: Ideal Transformer, Mutual Inductance
//! - Reference: the bookkeeping gadget closing the observation port
//!
//! An edge with current-graph ends `(p, q)`, voltage-graph ends `(r, t)` and
//! admittance `y` contributes `y` to rows `p, q` and columns `r, t` of the
//! generalised nodal matrix, with signs taken from the orientation. Rows and
//! columns of an auxiliary vertex hold a branch current and its constraint.

mod controlled;
mod coupled;
mod passive;
mod reference;
mod sources;

pub use reference::stamp_reference;

use std::fmt;

use crate::circuit::{Circuit, EdgeData, EdgeIndex, EdgeKind, PropertyBag, VertexId};

/// Two-terminal component kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DualKind {
    Resistor,
    Conductance,
    Inductor,
    Capacitor,
    Diode,
    VolumeTrackingChamber,
    VoltageSource,
    CurrentSource,
}

impl DualKind {
    /// Parse a component kind from its netlist prefix.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix.to_ascii_uppercase() {
            'R' => Some(Self::Resistor),
            'Y' => Some(Self::Conductance),
            'L' => Some(Self::Inductor),
            'C' => Some(Self::Capacitor),
            'D' => Some(Self::Diode),
            'V' => Some(Self::VoltageSource),
            'I' => Some(Self::CurrentSource),
            _ => None,
        }
    }

    /// Parse a component kind from a keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "CHAMBER" | "VTC" => Some(Self::VolumeTrackingChamber),
            _ => None,
        }
    }

    /// Power of `s` carried by the branch. Sources carry none.
    pub fn degree(&self) -> u32 {
        match self {
            Self::Inductor | Self::Capacitor | Self::Diode | Self::VolumeTrackingChamber => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for DualKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Four-terminal component kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuadKind {
    Vccs,
    Vcvs,
    Cccs,
    Ccvs,
    OpAmp,
    Transformer,
    MutualInductance,
}

impl QuadKind {
    /// Parse a component kind from its netlist prefix.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix.to_ascii_uppercase() {
            'G' => Some(Self::Vccs),
            'E' => Some(Self::Vcvs),
            'F' => Some(Self::Cccs),
            'H' => Some(Self::Ccvs),
            'K' => Some(Self::MutualInductance),
            _ => None,
        }
    }

    /// Parse a component kind from a keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "OP" | "OPAMP" => Some(Self::OpAmp),
            "XFMR" | "TRANSFORMER" => Some(Self::Transformer),
            _ => None,
        }
    }
}

impl fmt::Display for QuadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Write access to a circuit while one gadget is being stamped.
///
/// Every edge stamped through it carries the component's property bag.
pub struct Stamp<'a> {
    circuit: &'a mut Circuit,
    properties: &'a PropertyBag,
    edges: Vec<EdgeIndex>,
    aux: usize,
}

impl<'a> Stamp<'a> {
    /// Start stamping a gadget into `circuit`.
    pub fn new(circuit: &'a mut Circuit, properties: &'a PropertyBag) -> Self {
        Self {
            circuit,
            properties,
            edges: Vec::new(),
            aux: 0,
        }
    }

    /// The reference vertex.
    pub fn reference(&self) -> VertexId {
        self.circuit.reference()
    }

    /// The observation vertex.
    pub fn output(&self) -> VertexId {
        self.circuit.output()
    }

    /// Allocate an auxiliary vertex owned by this gadget.
    pub fn aux(&mut self) -> VertexId {
        self.aux += 1;
        self.circuit.add_vertex()
    }

    /// Stamp one edge pair.
    pub fn edge(
        &mut self,
        data: EdgeData,
        current: (VertexId, VertexId),
        voltage: (VertexId, VertexId),
    ) -> EdgeIndex {
        let data = data.with_properties(self.properties.clone());
        let e = self.circuit.push_edge(data, current, voltage);
        self.edges.push(e);
        e
    }

    /// Stamp a branch whose two views coincide.
    pub fn branch(&mut self, data: EdgeData, ends: (VertexId, VertexId)) -> EdgeIndex {
        self.edge(data, ends, ends)
    }

    /// Finish the gadget, returning what it added.
    pub fn finish(self) -> Gadget {
        Gadget {
            edges: self.edges,
            aux_vertices: self.aux,
        }
    }
}

/// What one stamped gadget added to the circuit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gadget {
    pub edges: Vec<EdgeIndex>,
    pub aux_vertices: usize,
}

/// A resolved two-terminal component ready to stamp.
#[derive(Debug, Clone, PartialEq)]
pub struct DualComponent {
    pub kind: DualKind,
    pub name: String,
    pub parameters: Vec<f64>,
    /// `[a, b]`
    pub terminals: [VertexId; 2],
}

impl DualComponent {
    /// Stamp the component's gadget.
    pub fn stamp(&self, stamp: &mut Stamp<'_>) {
        match self.kind {
            DualKind::VoltageSource => sources::stamp_voltage_source(self, stamp),
            DualKind::CurrentSource => sources::stamp_current_source(self, stamp),
            _ => passive::stamp_passive(self, stamp),
        }
    }
}

/// A resolved four-terminal component ready to stamp.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadComponent {
    pub kind: QuadKind,
    pub name: String,
    pub parameters: Vec<f64>,
    /// `[a, b, c, d]`: output port `a→b`, controlling port `c→d`
    pub terminals: [VertexId; 4],
}

impl QuadComponent {
    /// Stamp the component's gadget.
    pub fn stamp(&self, stamp: &mut Stamp<'_>) {
        match self.kind {
            QuadKind::Vccs => controlled::stamp_vccs(self, stamp),
            QuadKind::Vcvs => controlled::stamp_vcvs(self, stamp),
            QuadKind::Cccs => controlled::stamp_cccs(self, stamp),
            QuadKind::Ccvs => controlled::stamp_ccvs(self, stamp),
            QuadKind::OpAmp => controlled::stamp_opamp(self, stamp),
            QuadKind::Transformer => coupled::stamp_transformer(self, stamp),
            QuadKind::MutualInductance => coupled::stamp_mutual_inductance(self, stamp),
        }
    }

    /// Parameter `i`, defaulting to 1.
    fn parameter(&self, i: usize) -> f64 {
        self.parameters.get(i).copied().unwrap_or(1.0)
    }
}

/// Symbolic name for a component edge, `None` when the name is empty.
fn symbol(name: &str) -> Option<String> {
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// A named admittance branch.
fn named_admittance(name: &str, weight: f64, degree: u32) -> EdgeData {
    EdgeData::new(EdgeKind::Admittance, symbol(name), weight, degree)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// A circuit with `n` extra vertices besides the reference.
    pub fn circuit_with(n: usize) -> (Circuit, Vec<VertexId>) {
        let mut circuit = Circuit::new();
        let mut vertices = vec![circuit.reference()];
        for _ in 0..n {
            vertices.push(circuit.add_vertex());
        }
        (circuit, vertices)
    }

    pub fn stamp_dual(circuit: &mut Circuit, component: &DualComponent) -> Gadget {
        let properties = PropertyBag::new();
        let mut stamp = Stamp::new(circuit, &properties);
        component.stamp(&mut stamp);
        stamp.finish()
    }

    pub fn stamp_quad(circuit: &mut Circuit, component: &QuadComponent) -> Gadget {
        let properties = PropertyBag::new();
        let mut stamp = Stamp::new(circuit, &properties);
        component.stamp(&mut stamp);
        stamp.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_prefixes() {
        assert_eq!(DualKind::from_prefix('r'), Some(DualKind::Resistor));
        assert_eq!(DualKind::from_prefix('Y'), Some(DualKind::Conductance));
        assert_eq!(QuadKind::from_prefix('E'), Some(QuadKind::Vcvs));
        assert_eq!(QuadKind::from_prefix('K'), Some(QuadKind::MutualInductance));
        assert_eq!(QuadKind::from_keyword("opamp"), Some(QuadKind::OpAmp));
        assert_eq!(DualKind::from_keyword("Chamber"), Some(DualKind::VolumeTrackingChamber));
        assert_eq!(DualKind::from_prefix('Q'), None);
    }

    #[test]
    fn test_stamp_attaches_properties() {
        let mut circuit = Circuit::new();
        let a = circuit.add_vertex();
        let mut properties = PropertyBag::new();
        properties.insert("colour".into(), "red".into());

        let mut stamp = Stamp::new(&mut circuit, &properties);
        let reference = stamp.reference();
        stamp.branch(EdgeData::unit(), (a, reference));
        let gadget = stamp.finish();

        assert_eq!(gadget.edges, vec![EdgeIndex(0)]);
        assert_eq!(circuit.edge(EdgeIndex(0)).properties["colour"], "red");
    }
}
