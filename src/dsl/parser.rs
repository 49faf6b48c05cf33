//! Parser for the netlist DSL.

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::circuit::PropertyBag;
use crate::error::{Result, SymcircError};

/// Parser for netlist DSL.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire netlist.
    pub fn parse(&mut self) -> Result<NetlistAst> {
        let mut ast = NetlistAst::new();

        loop {
            match self.current.kind {
                TokenKind::Eof => break,
                // Skip empty lines
                TokenKind::Newline => {
                    self.advance()?;
                    continue;
                }
                TokenKind::Directive => {
                    let statement = self.parse_directive()?;
                    ast.statements.push(statement);
                }
                TokenKind::Identifier => {
                    let component = self.parse_component()?;
                    ast.statements.push(Statement::Component(component));
                }
                _ => {
                    return Err(SymcircError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            self.end_of_line()?;
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    /// Take the current token, which must be of `kind`.
    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(SymcircError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn end_of_line(&mut self) -> Result<()> {
        match self.current.kind {
            TokenKind::Newline => self.advance(),
            TokenKind::Eof => Ok(()),
            _ => Err(SymcircError::parse(
                self.current.line,
                format!("unexpected trailing token: {:?}", self.current.text),
            )),
        }
    }

    /// A node: a non-negative integer or `GND`.
    fn parse_node(&mut self) -> Result<usize> {
        let tok = self.current.clone();
        let node = match tok.kind {
            TokenKind::Identifier if tok.text.eq_ignore_ascii_case("GND") => Some(0),
            TokenKind::Number => tok.text.parse::<usize>().ok(),
            _ => None,
        };
        let node = node.ok_or_else(|| {
            SymcircError::parse(tok.line, format!("expected node, got {:?}", tok.text))
        })?;
        self.advance()?;
        Ok(node)
    }

    fn parse_number(&mut self) -> Result<f64> {
        let tok = self.expect(TokenKind::Number)?;
        parse_value(&tok.text)
            .ok_or_else(|| SymcircError::parse(tok.line, format!("invalid number: {}", tok.text)))
    }

    /// A bare word: identifier or number text.
    fn parse_word(&mut self) -> Result<String> {
        match self.current.kind {
            TokenKind::Identifier | TokenKind::Number => {
                let text = self.current.text.clone();
                self.advance()?;
                Ok(text)
            }
            _ => Err(SymcircError::parse(
                self.current.line,
                format!("expected a value, got {:?}", self.current.kind),
            )),
        }
    }

    fn parse_directive(&mut self) -> Result<Statement> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        match directive.to_lowercase().as_str() {
            ".interface" => {
                let node = self.parse_node()?;
                Ok(Statement::Interface { node, line })
            }
            ".pressure" => {
                let name = self.expect(TokenKind::Identifier)?.text;
                let node = self.parse_node()?;
                let value = self.parse_number()?;
                Ok(Statement::Pressure {
                    name,
                    node,
                    value,
                    line,
                })
            }
            ".property" => {
                let name = self.parse_word()?;
                let value = self.parse_word()?;
                Ok(Statement::Property { name, value, line })
            }
            _ => Err(SymcircError::parse(
                line,
                format!("unknown directive: {}", directive),
            )),
        }
    }

    fn parse_component(&mut self) -> Result<ComponentDef> {
        let first_token = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        // Keywords first, so that e.g. CHAMBER is not taken for a capacitor
        let (kind, name) = if let Some(kind) = ComponentKind::from_keyword(&first_token) {
            let name = self.expect(TokenKind::Identifier)?.text;
            (kind, name)
        } else {
            let prefix = first_token.chars().next().unwrap_or('?');
            let kind = ComponentKind::from_prefix(prefix).ok_or_else(|| {
                SymcircError::UnknownComponentType {
                    component_type: first_token.clone(),
                    line,
                }
            })?;
            (kind, first_token)
        };

        let expected_nodes = kind.expected_node_count();
        let mut nodes = Vec::with_capacity(expected_nodes);
        while nodes.len() < expected_nodes {
            if matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof) {
                return Err(SymcircError::invalid_component(
                    &name,
                    line,
                    format!("expected {} nodes, got {}", expected_nodes, nodes.len()),
                ));
            }
            let node = self
                .parse_node()
                .map_err(|_| SymcircError::invalid_component(&name, line, "invalid node"))?;
            nodes.push(node);
        }

        let mut values = Vec::new();
        let mut properties = PropertyBag::new();
        while !matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof) {
            match self.current.kind {
                TokenKind::Number => {
                    let text = self.current.text.clone();
                    let value = parse_value(&text).ok_or_else(|| {
                        SymcircError::invalid_parameter(
                            &name,
                            format!("value {}", values.len() + 1),
                            format!("invalid number: {}", text),
                        )
                    })?;
                    values.push(value);
                    self.advance()?;
                }
                TokenKind::Identifier => {
                    let key = self.current.text.clone();
                    self.advance()?;
                    self.expect(TokenKind::Equals)?;
                    let value = self.parse_word()?;
                    properties.insert(key, value);
                }
                _ => {
                    return Err(SymcircError::parse(
                        line,
                        format!("unexpected token in component {}: {:?}", name, self.current.text),
                    ));
                }
            }
        }

        Ok(ComponentDef {
            kind,
            name,
            nodes,
            values,
            properties,
            line,
        })
    }
}
