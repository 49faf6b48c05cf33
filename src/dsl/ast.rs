//! Abstract Syntax Tree types for the netlist DSL.

use tracing::warn;

use crate::circuit::{NetlistBuilder, PropertyBag};
use crate::components::{DualKind, QuadKind};

/// A parsed netlist, statements in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetlistAst {
    pub statements: Vec<Statement>,
}

impl NetlistAst {
    /// Create a new empty netlist AST.
    pub fn new() -> Self {
        Self::default()
    }

    /// Component definitions in file order.
    pub fn components(&self) -> impl Iterator<Item = &ComponentDef> + '_ {
        self.statements.iter().filter_map(|s| match s {
            Statement::Component(def) => Some(def),
            _ => None,
        })
    }

    /// The last `.interface` node, if any.
    pub fn interface_node(&self) -> Option<usize> {
        self.statements.iter().rev().find_map(|s| match s {
            Statement::Interface { node, .. } => Some(*node),
            _ => None,
        })
    }

    /// Issue one builder call per statement, in file order, then `flush`.
    pub fn replay(&self, builder: &mut impl NetlistBuilder) {
        for statement in &self.statements {
            statement.replay(builder);
        }
        builder.flush();
    }
}

/// One line of a netlist.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `.property <key> <value>`
    Property {
        name: String,
        value: String,
        line: usize,
    },
    /// `.interface <node>`
    Interface { node: usize, line: usize },
    /// `.pressure <name> <node> <value>`
    Pressure {
        name: String,
        node: usize,
        value: f64,
        line: usize,
    },
    Component(ComponentDef),
}

impl Statement {
    fn replay(&self, builder: &mut impl NetlistBuilder) {
        match self {
            Statement::Property { name, value, .. } => builder.add_circuit_property(name, value),
            Statement::Interface { node, .. } => {
                builder.add_three_d_interface_node(*node, &PropertyBag::new())
            }
            Statement::Pressure {
                name, node, value, ..
            } => builder.add_prescribed_pressure_node(name, *value, *node, &PropertyBag::new()),
            Statement::Component(def) => def.replay(builder),
        }
    }
}

/// A component line.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDef {
    pub kind: ComponentKind,
    pub name: String,
    /// Netlist nodes, `0` being the reference
    pub nodes: Vec<usize>,
    /// Parameter values after the nodes
    pub values: Vec<f64>,
    /// `key=value` pairs
    pub properties: PropertyBag,
    /// Source line number for error reporting
    pub line: usize,
}

impl ComponentDef {
    /// A definition with the wrong number of nodes for its kind is skipped.
    fn replay(&self, builder: &mut impl NetlistBuilder) {
        match self.kind {
            ComponentKind::Dual(kind) => {
                let [a, b] = self.nodes[..] else {
                    return self.skip();
                };
                builder.add_dual_component(kind, &self.name, &self.values, a, b, &self.properties)
            }
            ComponentKind::Quad(kind) => {
                let [a, b, ac, bc] = self.nodes[..] else {
                    return self.skip();
                };
                builder.add_quad_component(
                    kind,
                    &self.name,
                    &self.values,
                    true,
                    a,
                    b,
                    ac,
                    bc,
                    &self.properties,
                )
            }
            ComponentKind::Wire => builder.add_wire_component(&self.named_properties()),
            ComponentKind::Unknown => builder.add_unknown_component(&self.named_properties()),
        }
    }

    fn skip(&self) {
        warn!(
            name = %self.name,
            nodes = self.nodes.len(),
            expected = self.kind.expected_node_count(),
            line = self.line,
            "wrong node count, component skipped"
        );
    }

    /// Properties with the component name under `name`.
    fn named_properties(&self) -> PropertyBag {
        let mut properties = self.properties.clone();
        properties
            .entry("name".to_string())
            .or_insert_with(|| self.name.clone());
        properties
    }
}

/// Component kinds the DSL knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Dual(DualKind),
    Quad(QuadKind),
    /// Connection with no electrical effect
    Wire,
    /// Subcircuit instance (`X…`), passed through unsolved
    Unknown,
}

impl ComponentKind {
    /// Parse a component kind from its DSL prefix.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        if let Some(kind) = DualKind::from_prefix(prefix) {
            return Some(Self::Dual(kind));
        }
        if let Some(kind) = QuadKind::from_prefix(prefix) {
            return Some(Self::Quad(kind));
        }
        (prefix.to_ascii_uppercase() == 'X').then_some(Self::Unknown)
    }

    /// Parse a component kind from a keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        if keyword.eq_ignore_ascii_case("WIRE") {
            return Some(Self::Wire);
        }
        DualKind::from_keyword(keyword)
            .map(Self::Dual)
            .or_else(|| QuadKind::from_keyword(keyword).map(Self::Quad))
    }

    /// Get the expected number of nodes for this component kind.
    pub fn expected_node_count(&self) -> usize {
        match self {
            Self::Dual(_) | Self::Wire => 2,
            Self::Quad(_) => 4,
            Self::Unknown => 0,
        }
    }
}
