//! Mel source code parser
//!
//! This module transforms Mel source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`literal`]: Decoding literal token text into typed values
//! - [`parse`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions and the [`ast::NodeRef`] query view
//!
//! # Supported Language
//!
//! - Types: `int`, `char`, `string`, `boolean`, `double`, `void`, arrays (`int[]`)
//!   and delegates (`delegate<int, char: boolean>`)
//! - Declarations: C-style lists (`int a, b = 2;`) and BASIC-style `Dim x As int = 1`
//! - Statements: assignment, call, `if … then … else … end if`, `for … To … Next`,
//!   `while … end while` (with `AndAlso`), `do while … Loop`, nested blocks
//! - Expressions: arithmetic, comparison, bitwise, logical, calls, array elements
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! The whole input is tokenized before parsing starts, so a lexical error anywhere
//! is reported ahead of any syntax error. Parsing stops at the first error.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod literal;
pub mod parse;
mod statements;

use std::fmt;
use std::str::FromStr;

use ast::{Expr, NodeRef, Program, SourceLocation, StmtList};
use lexer::LexError;
use literal::LiteralError;
use parse::{ParseError, Parser};
use thiserror::Error as ThisError;

/// Any failure while turning source text into a tree
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Literal(#[from] LiteralError),
}

/// Which stage rejected the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Literal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Lex(_) => ErrorKind::Lexical,
            Error::Parse(_) => ErrorKind::Syntax,
            Error::Literal(_) => ErrorKind::Literal,
        }
    }

    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            Error::Lex(e) => Some(e.location),
            Error::Parse(e) => Some(e.location),
            Error::Literal(e) => e.location,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Grammar rule a parse starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartSymbol {
    /// Functions and global declarations
    #[default]
    Program,
    /// A bare statement sequence, as in scripts
    Statements,
    /// One expression
    Expression,
}

impl StartSymbol {
    pub fn name(self) -> &'static str {
        match self {
            StartSymbol::Program => "program",
            StartSymbol::Statements => "stmts",
            StartSymbol::Expression => "expr",
        }
    }
}

impl fmt::Display for StartSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("unknown start symbol '{0}' (expected program, stmts or expr)")]
pub struct UnknownStartSymbol(pub String);

impl FromStr for StartSymbol {
    type Err = UnknownStartSymbol;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "program" => Ok(StartSymbol::Program),
            "stmts" | "statements" => Ok(StartSymbol::Statements),
            "expr" | "expression" => Ok(StartSymbol::Expression),
            other => Err(UnknownStartSymbol(other.to_string())),
        }
    }
}

/// Result of a successful parse, shaped by the start symbol
#[derive(Debug, Clone, PartialEq)]
pub enum Root {
    Program(Program),
    Statements(StmtList),
    Expression(Expr),
}

impl Root {
    pub fn node(&self) -> NodeRef<'_> {
        self.into()
    }
}

impl<'a> From<&'a Root> for NodeRef<'a> {
    fn from(root: &'a Root) -> Self {
        match root {
            Root::Program(program) => NodeRef::Program(program),
            Root::Statements(list) => NodeRef::StmtList(list),
            Root::Expression(expr) => expr.into(),
        }
    }
}

/// Parse `source` starting from `start`.
pub fn parse(source: &str, start: StartSymbol) -> Result<Root> {
    let mut parser = Parser::new(source)?;
    match start {
        StartSymbol::Program => parser.parse_program().map(Root::Program),
        StartSymbol::Statements => parser.parse_statements().map(Root::Statements),
        StartSymbol::Expression => parser.parse_standalone_expression().map(Root::Expression),
    }
}

/// Parse a complete program.
pub fn parse_program(source: &str) -> Result<Program> {
    Parser::new(source)?.parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_symbol_from_str() {
        assert_eq!("program".parse(), Ok(StartSymbol::Program));
        assert_eq!("stmts".parse(), Ok(StartSymbol::Statements));
        assert_eq!("expression".parse(), Ok(StartSymbol::Expression));
        assert_eq!(
            "block".parse::<StartSymbol>(),
            Err(UnknownStartSymbol("block".to_string()))
        );
    }

    #[test]
    fn test_lexical_errors_come_first() {
        // syntax error on line 1, lexical error on line 2
        let err = parse_program("int int\n#").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lexical);
        assert_eq!(err.location(), Some(SourceLocation::new(2, 1)));
    }

    #[test]
    fn test_root_node_kind() {
        let root = parse("x = 1", StartSymbol::Statements).unwrap();
        assert_eq!(root.node().kind(), ast::NodeKind::StmtList);

        let root = parse("x", StartSymbol::Expression).unwrap();
        assert_eq!(root.node().kind(), ast::NodeKind::Ident);
    }

    #[test]
    fn test_syntax_error_kind_and_location() {
        let err = parse("if (x) then", StartSymbol::Statements).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.location(), Some(SourceLocation::new(1, 12)));
    }
}
