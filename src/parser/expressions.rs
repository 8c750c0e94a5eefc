//! Expression parsing implementation
//!
//! This module handles parsing of Mel expressions using precedence climbing
//! for binary operators and recursive descent for operands.
//!
//! # Supported Expressions
//!
//! - Literals: numbers, strings, characters, `True`/`False`
//! - Identifiers
//! - Array elements: `xs[i + 1]`
//! - Calls: `f(a, b)`
//! - Parenthesized expressions
//! - Binary operators: arithmetic, comparison, bitwise, logical
//!
//! # Precedence
//!
//! From loosest to tightest, every level left-associative:
//!
//! | Level | Operators |
//! |-------|-----------|
//! | 1 | `\|\|` |
//! | 2 | `&&` |
//! | 3 | `\|` |
//! | 4 | `&` |
//! | 5 | `==` `<>` |
//! | 6 | `>` `<` `>=` `<=` |
//! | 7 | `+` `-` |
//! | 8 | `*` `/` `%` |
//!
//! Comparisons chain like any other level, so `a < b < c` is `(a < b) < c`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::literal::{self, LiteralKind};
use crate::parser::parse::Parser;
use crate::parser::Result;

/// Binary operator for a token, with its precedence level
fn binary_operator(kind: TokenKind) -> Option<(BinOp, u8)> {
    let entry = match kind {
        TokenKind::OrOr => (BinOp::Or, 1),
        TokenKind::AndAnd => (BinOp::And, 2),
        TokenKind::Pipe => (BinOp::BitOr, 3),
        TokenKind::Amp => (BinOp::BitAnd, 4),
        TokenKind::EqEq => (BinOp::Eq, 5),
        TokenKind::NotEq => (BinOp::NotEq, 5),
        TokenKind::Gt => (BinOp::Gt, 6),
        TokenKind::Lt => (BinOp::Lt, 6),
        TokenKind::Ge => (BinOp::Ge, 6),
        TokenKind::Le => (BinOp::Le, 6),
        TokenKind::Plus => (BinOp::Add, 7),
        TokenKind::Minus => (BinOp::Sub, 7),
        TokenKind::Star => (BinOp::Mul, 8),
        TokenKind::Slash => (BinOp::Div, 8),
        TokenKind::Percent => (BinOp::Mod, 8),
        _ => return None,
    };
    Some(entry)
}

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr> {
        self.parse_binary(1)
    }

    /// Precedence climbing: fold operators of level `min_level` or tighter.
    /// The right operand only takes tighter operators, which makes every level
    /// left-associative.
    fn parse_binary(&mut self, min_level: u8) -> Result<Expr> {
        let mut left = self.parse_group()?;

        loop {
            let (op, level) = match binary_operator(self.peek_kind()) {
                Some((op, level)) if level >= min_level => (op, level),
                _ => break,
            };

            let location = self.advance().location;
            let right = self.parse_binary(level + 1)?;

            left = Expr::Binary(BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location,
            });
        }

        Ok(left)
    }

    /// Parse an operand: literal, name, array element, call or `( expr )`
    fn parse_group(&mut self) -> Result<Expr> {
        let kind = self.peek_kind();

        if let Some(literal_kind) = LiteralKind::from_token(kind) {
            return self.parse_literal(literal_kind);
        }

        match kind {
            TokenKind::Ident => {
                let ident = self.expect_identifier("in expression")?;
                match self.peek_kind() {
                    TokenKind::LParen => Ok(Expr::Call(self.parse_call_rest(ident)?)),
                    TokenKind::LBracket => Ok(Expr::ArrayElem(self.parse_index_rest(ident)?)),
                    _ => Ok(Expr::Ident(ident)),
                }
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen, "to close parenthesized expression")?;
                Ok(expr)
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    fn parse_literal(&mut self, kind: LiteralKind) -> Result<Expr> {
        let token = self.advance();
        let value = literal::decode(kind, &token.text).map_err(|e| e.at(token.location))?;

        Ok(Expr::Literal(Literal {
            text: token.text,
            value,
            location: token.location,
        }))
    }

    /// Parse `( args )` after an already consumed callee name
    pub(crate) fn parse_call_rest(&mut self, callee: Ident) -> Result<Call> {
        self.expect(TokenKind::LParen, "before call arguments")?;

        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::RParen, "after call arguments")?;

        Ok(Call {
            location: callee.location,
            callee,
            args,
        })
    }

    /// Parse `[ index ]` after an already consumed array name
    pub(crate) fn parse_index_rest(&mut self, array: Ident) -> Result<ComplexIdent> {
        self.expect(TokenKind::LBracket, "before array index")?;
        let index = self.parse_expression()?;
        self.expect(TokenKind::RBracket, "after array index")?;

        Ok(ComplexIdent {
            location: array.location,
            array,
            index: Box::new(index),
        })
    }
}
