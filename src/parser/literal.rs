//! Literal evaluation
//!
//! Decodes the source text of a literal token into a typed [`LiteralValue`], one
//! explicit routine per literal kind. The lexer has already checked the shape of the
//! text, so a [`LiteralError`] here means the two disagree; the only case reachable
//! from user input is an integer that does not fit in `i64`.

use super::ast::SourceLocation;
use super::lexer::TokenKind;
use std::fmt;
use thiserror::Error;

/// Lexical class of a literal token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Number,
    String,
    Char,
    Bool,
}

impl LiteralKind {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Number => Some(LiteralKind::Number),
            TokenKind::StringLiteral => Some(LiteralKind::String),
            TokenKind::CharLiteral => Some(LiteralKind::Char),
            TokenKind::True | TokenKind::False => Some(LiteralKind::Bool),
            _ => None,
        }
    }
}

/// Decoded literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Int(i64),
    Double(f64),
    Bool(bool),
    Char(char),
    Str(String),
}

impl LiteralValue {
    /// Name of the Mel type this value belongs to.
    pub fn type_name(&self) -> &'static str {
        match self {
            LiteralValue::Int(_) => "int",
            LiteralValue::Double(_) => "double",
            LiteralValue::Bool(_) => "boolean",
            LiteralValue::Char(_) => "char",
            LiteralValue::Str(_) => "string",
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Int(n) => write!(f, "{}", n),
            LiteralValue::Double(d) => write!(f, "{}", d),
            LiteralValue::Bool(true) => f.write_str("True"),
            LiteralValue::Bool(false) => f.write_str("False"),
            LiteralValue::Char(c) => write!(f, "{:?}", c),
            LiteralValue::Str(s) => write!(f, "{:?}", s),
        }
    }
}

/// Failure to decode a literal the lexer accepted
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Literal error{}: {} in `{}`", at_suffix(.location), .message, .text)]
pub struct LiteralError {
    pub message: String,
    pub text: String,
    pub location: Option<SourceLocation>,
}

fn at_suffix(location: &Option<SourceLocation>) -> String {
    match location {
        Some(loc) => format!(" at line {}, column {}", loc.line, loc.column),
        None => String::new(),
    }
}

impl LiteralError {
    pub fn new(message: impl Into<String>, text: &str) -> Self {
        Self {
            message: message.into(),
            text: text.to_string(),
            location: None,
        }
    }

    /// Attach the position of the offending token.
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

/// Decode literal `text` of the given lexical class.
pub fn decode(kind: LiteralKind, text: &str) -> Result<LiteralValue, LiteralError> {
    match kind {
        LiteralKind::Number => decode_number(text),
        LiteralKind::String => {
            let inner = strip_quotes(text, '"')?;
            unescape(inner, text).map(LiteralValue::Str)
        }
        LiteralKind::Char => {
            let inner = strip_quotes(text, '\'')?;
            let decoded = unescape(inner, text)?;
            let mut chars = decoded.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(LiteralValue::Char(c)),
                _ => Err(LiteralError::new(
                    "character literal must hold exactly one character",
                    text,
                )),
            }
        }
        LiteralKind::Bool => match text {
            "True" => Ok(LiteralValue::Bool(true)),
            "False" => Ok(LiteralValue::Bool(false)),
            _ => Err(LiteralError::new("expected True or False", text)),
        },
    }
}

fn decode_number(text: &str) -> Result<LiteralValue, LiteralError> {
    if text.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
        text.parse::<f64>()
            .map(LiteralValue::Double)
            .map_err(|e| LiteralError::new(format!("invalid double: {}", e), text))
    } else {
        text.parse::<i64>()
            .map(LiteralValue::Int)
            .map_err(|e| LiteralError::new(format!("invalid integer: {}", e), text))
    }
}

fn strip_quotes(text: &str, quote: char) -> Result<&str, LiteralError> {
    text.strip_prefix(quote)
        .and_then(|rest| rest.strip_suffix(quote))
        .ok_or_else(|| LiteralError::new(format!("expected text quoted with {}", quote), text))
}

fn unescape(inner: &str, text: &str) -> Result<String, LiteralError> {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        let unescaped = match chars.next() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('\\') => '\\',
            Some('"') => '"',
            Some('\'') => '\'',
            Some('0') => '\0',
            Some(other) => {
                return Err(LiteralError::new(
                    format!("unknown escape sequence \\{}", other),
                    text,
                ))
            }
            None => return Err(LiteralError::new("dangling backslash", text)),
        };
        out.push(unescaped);
    }

    Ok(out)
}
