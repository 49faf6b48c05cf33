//! DSL (Domain Specific Language) parser for netlists.
//!
//! This module provides a SPICE-inspired, line-oriented text format for
//! lumped networks. A parsed [`NetlistAst`] is replayed into any
//! [`NetlistBuilder`](crate::circuit::NetlistBuilder).
//!
//! # Grammar Overview
//!
//! ```text
//! netlist     = { line }
//! line        = comment | directive | component | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = ".interface" node
//!             | ".pressure" identifier node value
//!             | ".property" word word
//! component   = [keyword] name { node } { value } { identifier '=' word }
//!
//! keyword     = "OPAMP" | "OP" | "XFMR" | "TRANSFORMER" | "CHAMBER" | "VTC" | "WIRE"
//! node        = digit+ | "GND"
//! value       = number [unit_suffix]
//!
//! number      = ['-'|'+'] digit+ ['.' digit*] [('e'|'E') ['-'|'+'] digit+]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! identifier  = (letter | '_') { letter | digit | '_' }
//! ```
//!
//! # Component Types
//!
//! | Prefix / keyword | Description | Syntax |
//! |------|-------------|--------|
//! | R | Resistor | `R<name> <a> <b> [value]` |
//! | Y | Conductance | `Y<name> <a> <b> [value]` |
//! | L | Inductor | `L<name> <a> <b> [value]` |
//! | C | Capacitor | `C<name> <a> <b> [value]` |
//! | D | Diode (small-signal) | `D<name> <a> <b> [value]` |
//! | CHAMBER | Volume-tracking chamber | `CHAMBER <name> <a> <b> [value]` |
//! | V | Voltage source (zeroed) | `V<name> <a> <b>` |
//! | I | Current source (zeroed) | `I<name> <a> <b>` |
//! | G | VCCS | `G<name> <a> <b> <ac> <bc> [gain]` |
//! | E | VCVS | `E<name> <a> <b> <ac> <bc> [gain]` |
//! | F | CCCS | `F<name> <a> <b> <ac> <bc> [gain]` |
//! | H | CCVS | `H<name> <a> <b> <ac> <bc> [gain]` |
//! | OPAMP | Ideal op-amp | `OPAMP <name> <out> <ref> <in+> <in->` |
//! | XFMR | Ideal transformer | `XFMR <name> <a> <b> <ac> <bc> [ratio]` |
//! | K | Mutual inductance | `K<name> <a> <b> <ac> <bc> [L1] [L2] [M]` |
//! | WIRE | Wire | `WIRE <name> <a> <b>` |
//! | X | Unknown, passed through | `X<name> ...` |
//!
//! # Directives
//!
//! | Directive | Description | Syntax |
//! |-----------|-------------|--------|
//! | .interface | Observation vertex | `.interface <node>` |
//! | .pressure | Prescribed-pressure node | `.pressure <name> <node> <value>` |
//! | .property | Circuit property | `.property <key> <value>` |
//!
//! # Example
//!
//! ```text
//! # Series RC seen from node 1
//! .interface 1
//!
//! R1   1   2   10k
//! C1   2   0   100n
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a netlist string into an AST.
pub fn parse(input: &str) -> Result<NetlistAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a netlist file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<NetlistAst> {
    let content =
        std::fs::read_to_string(path).map_err(|e| crate::error::SymcircError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
    parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{CircuitBuilder, EdgeKind};

    #[test]
    fn test_replay_builds_series_rc() {
        let ast = parse(".interface 1\nR1 1 2 10k\nC1 2 0 100n\n").unwrap();
        let mut builder = CircuitBuilder::new();
        ast.replay(&mut builder);
        assert!(builder.is_flushed());
        assert_eq!(builder.component_count(), 2);

        let circuit = builder.finish();
        let count = |kind| circuit.edges().iter().filter(|e| e.kind == kind).count();
        assert_eq!(count(EdgeKind::Impedance), 1);
        // C1 and the bookkeeping unit edge
        assert_eq!(count(EdgeKind::Admittance), 2);
        assert_eq!(count(EdgeKind::GRef), 1);
        assert_eq!(count(EdgeKind::YRef), 1);
    }

    #[test]
    fn test_replay_records_pass_through_statements() {
        let ast = parse(".pressure P0 2 1.5\nWIRE W1 1 2\nX1 3 4\n.interface 1\nR1 1 0 1k").unwrap();
        let mut builder = CircuitBuilder::new();
        ast.replay(&mut builder);
        assert_eq!(builder.wire_count(), 1);
        assert_eq!(builder.unknown_count(), 1);
        assert_eq!(builder.pressure_nodes()[0].name, "P0");
        assert_eq!(builder.pressure_nodes()[0].vertex, 2);
    }

    #[test]
    fn test_parse_empty_input() {
        let ast = parse("").unwrap();
        assert!(ast.statements.is_empty());
        assert_eq!(ast.interface_node(), None);
    }
}
