//! Core types for the dual-graph circuit representation.

use std::collections::HashMap;
use std::fmt;

/// Free-form string properties attached to components and circuits.
///
/// The solver never reads these; they travel through unchanged for the
/// collaborators that produced them.
pub type PropertyBag = HashMap<String, String>;

/// A vertex shared by the current graph and the voltage graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

impl VertexId {
    /// The reference vertex allocated by every new circuit.
    pub const REFERENCE: VertexId = VertexId(0);

    /// Raw arena index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Dense index of an edge pair.
///
/// The same index addresses the current-graph edge and its voltage-graph twin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIndex(pub usize);

impl EdgeIndex {
    /// Raw arena index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Role of an edge pair in the two-graph model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Bookkeeping edge whose presence marks a denominator tree
    YRef,
    /// Bookkeeping edge whose presence marks a numerator tree
    GRef,
    /// Branch contributing its weight when left out of the tree
    Impedance,
    /// Branch contributing its weight when selected in the tree
    Admittance,
    /// Branch that every tree must contain
    Forced,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EdgeKind::YRef => "YRef",
            EdgeKind::GRef => "GRef",
            EdgeKind::Impedance => "Z",
            EdgeKind::Admittance => "Y",
            EdgeKind::Forced => "F",
        };
        f.write_str(label)
    }
}

/// Metadata carried by an edge pair.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeData {
    pub kind: EdgeKind,
    /// Symbolic parameter name; `None` means the edge is purely numeric
    pub name: Option<String>,
    pub weight: f64,
    /// Power of `s` contributed when the edge enters a monomial
    pub degree: u32,
    pub properties: PropertyBag,
}

impl EdgeData {
    /// Create edge metadata with no properties.
    pub fn new(kind: EdgeKind, name: Option<String>, weight: f64, degree: u32) -> Self {
        Self {
            kind,
            name,
            weight,
            degree,
            properties: PropertyBag::new(),
        }
    }

    /// An unnamed unit admittance. It is neutral in every monomial.
    pub fn unit() -> Self {
        Self::new(EdgeKind::Admittance, None, 1.0, 0)
    }

    /// A forced coupling edge.
    pub fn forced() -> Self {
        Self::new(EdgeKind::Forced, None, 1.0, 0)
    }

    /// Attach a property bag.
    pub fn with_properties(mut self, properties: PropertyBag) -> Self {
        self.properties = properties;
        self
    }

    /// Whether the edge is carried into monomials by name rather than by value.
    pub fn is_symbolic(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_edge_is_neutral_admittance() {
        let unit = EdgeData::unit();
        assert_eq!(unit.kind, EdgeKind::Admittance);
        assert_eq!(unit.weight, 1.0);
        assert_eq!(unit.degree, 0);
        assert!(!unit.is_symbolic());
    }

    #[test]
    fn test_empty_name_is_numeric() {
        let edge = EdgeData::new(EdgeKind::Impedance, Some(String::new()), 4.0, 0);
        assert!(!edge.is_symbolic());
        let edge = EdgeData::new(EdgeKind::Impedance, Some("R1".into()), 4.0, 0);
        assert!(edge.is_symbolic());
    }
}
