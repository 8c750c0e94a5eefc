//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the parse error type, token helpers, and the entry points for each
//! start symbol.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: types, declaration lists, functions and parameters
//! - `statements`: statement dispatch and control flow
//! - `expressions`: binary operators by precedence climbing, and operands
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state. Each grammar rule has its own
//! builder method, picked by ordinary `match` on the upcoming token kinds.

use super::ast::*;
use super::declarations::TopLevelItem;
use super::lexer::{describe_token, Lexer, Token, TokenKind};
use super::{Error, Result};
use thiserror::Error as ThisError;

/// Parser error type
#[derive(Debug, Clone, PartialEq, ThisError)]
#[error(
    "Parse error at line {}, column {}: expected {}, found {}",
    .location.line,
    .location.column,
    .expected,
    describe_token(.found, .text)
)]
pub struct ParseError {
    /// What the grammar could have accepted at this point
    pub expected: String,
    /// Class of the token that could not be consumed
    pub found: TokenKind,
    /// Source text of that token (empty at end of file)
    pub text: String,
    pub location: SourceLocation,
}

/// Recursive descent parser for Mel
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
}

impl Parser {
    /// Tokenize `source` up front; lexical errors surface here.
    pub fn new(source: &str) -> Result<Self> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
        })
    }

    /// Parse the entire program: functions and global declarations.
    /// Runs of consecutive global declarations are grouped into one [`VarsDeclList`].
    pub fn parse_program(&mut self) -> Result<Program> {
        let mut program = Program::new();
        let mut globals = Vec::new();

        while !self.is_at_end() {
            match self.parse_top_level_item()? {
                TopLevelItem::Vars(decl) => globals.push(decl),
                TopLevelItem::Func(func) => {
                    if !globals.is_empty() {
                        let decls = std::mem::take(&mut globals);
                        program.items.push(Item::Vars(VarsDeclList { decls }));
                    }
                    program.items.push(Item::Func(func));
                }
            }
        }

        if !globals.is_empty() {
            program.items.push(Item::Vars(VarsDeclList { decls: globals }));
        }

        Ok(program)
    }

    /// Parse a bare statement sequence up to end of file (script form).
    pub fn parse_statements(&mut self) -> Result<StmtList> {
        let statements = self.parse_stmt_list(&[TokenKind::Eof], "statement")?;
        self.expect(TokenKind::Eof, "after statements")?;
        Ok(statements)
    }

    /// Parse a single expression that must span the whole input.
    pub fn parse_standalone_expression(&mut self) -> Result<Expr> {
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Eof, "after expression")?;
        Ok(expr)
    }

    // ===== Helper methods =====

    /// A type keyword or `delegate`, i.e. the start of a type.
    pub(crate) fn is_type_start(&self) -> bool {
        let kind = self.peek_kind();
        kind.is_type_keyword() || kind == TokenKind::Delegate
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Consume the current token and return it. Never moves past `Eof`.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub(crate) fn peek_ahead_kind(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.position + n)
            .map_or(TokenKind::Eof, |token| token.kind)
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    /// Error describing the current token as unexpected.
    pub(crate) fn unexpected(&self, expected: impl Into<String>) -> Error {
        let token = self.peek();
        ParseError {
            expected: expected.into(),
            found: token.kind,
            text: token.text.clone(),
            location: token.location,
        }
        .into()
    }

    /// Consume a token of `kind` or fail with "expected <kind> <context>".
    pub(crate) fn expect(&mut self, kind: TokenKind, context: &str) -> Result<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(format!("{} {}", kind, context)))
        }
    }

    pub(crate) fn expect_identifier(&mut self, context: &str) -> Result<Ident> {
        if self.check(TokenKind::Ident) {
            let token = self.advance();
            Ok(Ident {
                name: token.text,
                location: token.location,
            })
        } else {
            Err(self.unexpected(format!("identifier {}", context)))
        }
    }
}
