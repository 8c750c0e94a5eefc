//! Lexer (tokenizer) for Mel source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Whitespace, `//` line comments and `/* ... */` block comments are dropped here,
//! so the parser never has to skip trivia.
//!
//! Two keywords span two words: `end if` and `end while`. The word `end` on its own
//! (or followed by anything else) is an ordinary identifier.

use super::ast::SourceLocation;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Token classes produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Number,
    StringLiteral,
    CharLiteral,

    // Identifiers
    Ident,

    // Keywords
    Dim,
    As,
    If,
    Then,
    Else,
    EndIf,
    For,
    To,
    Next,
    While,
    EndWhile,
    AndAlso,
    Do,
    Loop,
    Delegate,
    True,
    False,

    // Type keywords
    Int,
    Char,
    Str,
    Boolean,
    Double,
    Void,

    // Arithmetic
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %

    // Comparison
    EqEq,  // ==
    NotEq, // <> (also spelled !=)
    Lt,    // <
    Le,    // <=
    Gt,    // >
    Ge,    // >=

    // Logical and bitwise
    AndAnd, // &&
    OrOr,   // ||
    Amp,    // &
    Pipe,   // |

    // Assignment
    Eq, // =

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    Semicolon, // ;
    Comma,     // ,
    Colon,     // :

    // End of file
    Eof,
}

impl TokenKind {
    /// `int`, `char`, `string`, `boolean`, `double` or `void`.
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Int
                | TokenKind::Char
                | TokenKind::Str
                | TokenKind::Boolean
                | TokenKind::Double
                | TokenKind::Void
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Number => "number literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::CharLiteral => "char literal",
            TokenKind::Ident => "identifier",
            TokenKind::Dim => "'Dim'",
            TokenKind::As => "'As'",
            TokenKind::If => "'if'",
            TokenKind::Then => "'then'",
            TokenKind::Else => "'else'",
            TokenKind::EndIf => "'end if'",
            TokenKind::For => "'for'",
            TokenKind::To => "'To'",
            TokenKind::Next => "'Next'",
            TokenKind::While => "'while'",
            TokenKind::EndWhile => "'end while'",
            TokenKind::AndAlso => "'AndAlso'",
            TokenKind::Do => "'do'",
            TokenKind::Loop => "'Loop'",
            TokenKind::Delegate => "'delegate'",
            TokenKind::True => "'True'",
            TokenKind::False => "'False'",
            TokenKind::Int => "'int'",
            TokenKind::Char => "'char'",
            TokenKind::Str => "'string'",
            TokenKind::Boolean => "'boolean'",
            TokenKind::Double => "'double'",
            TokenKind::Void => "'void'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'<>'",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::AndAnd => "'&&'",
            TokenKind::OrOr => "'||'",
            TokenKind::Amp => "'&'",
            TokenKind::Pipe => "'|'",
            TokenKind::Eq => "'='",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Eof => "end of file",
        };
        f.write_str(text)
    }
}

static KEYWORDS: LazyLock<FxHashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    let mut map = FxHashMap::default();
    for (word, kind) in [
        ("Dim", TokenKind::Dim),
        ("As", TokenKind::As),
        ("if", TokenKind::If),
        ("then", TokenKind::Then),
        ("else", TokenKind::Else),
        ("for", TokenKind::For),
        ("To", TokenKind::To),
        ("Next", TokenKind::Next),
        ("while", TokenKind::While),
        ("AndAlso", TokenKind::AndAlso),
        ("do", TokenKind::Do),
        ("Loop", TokenKind::Loop),
        ("delegate", TokenKind::Delegate),
        ("True", TokenKind::True),
        ("False", TokenKind::False),
        ("int", TokenKind::Int),
        ("char", TokenKind::Char),
        ("string", TokenKind::Str),
        ("boolean", TokenKind::Boolean),
        ("double", TokenKind::Double),
        ("void", TokenKind::Void),
    ] {
        map.insert(word, kind);
    }
    map
});

/// Looks up a single-word keyword. `end if` / `end while` are not in the table
/// because they are assembled from two words by the lexer.
pub fn keyword_kind(word: &str) -> Option<TokenKind> {
    KEYWORDS.get(word).copied()
}

/// A classified lexical unit with its source text and start position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&describe_token(&self.kind, &self.text))
    }
}

/// Human-readable description used in error messages, e.g. `identifier 'x'`.
pub fn describe_token(kind: &TokenKind, text: &str) -> String {
    match kind {
        TokenKind::Ident => format!("identifier '{}'", text),
        TokenKind::Number => format!("number literal {}", text),
        TokenKind::StringLiteral | TokenKind::CharLiteral => format!("{} {}", kind, text),
        _ => kind.to_string(),
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "Lexer error at line {}, column {}: {}",
    .location.line,
    .location.column,
    .message
)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl LexError {
    fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

const ESCAPABLE: [char; 7] = ['n', 't', 'r', '\\', '"', '\'', '0'];

/// Lexer for Mel source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input. The result always ends with an [`TokenKind::Eof`] token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_at_end() {
                tokens.push(Token::new(TokenKind::Eof, "", self.current_location()));
                break;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let loc = self.current_location();
        let ch = self
            .advance()
            .ok_or_else(|| LexError::new("Unexpected end of file", loc))?;

        let kind = match ch {
            '"' => return self.string_literal(start, loc),
            '\'' => return self.char_literal(start, loc),
            '0'..='9' => return self.number_literal(start, loc),
            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => {
                return self.number_literal(start, loc)
            }
            'a'..='z' | 'A'..='Z' | '_' => return Ok(self.identifier_or_keyword(start, loc)),

            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '=' => {
                if self.match_char('=') {
                    TokenKind::EqEq
                } else {
                    TokenKind::Eq
                }
            }
            '<' => {
                if self.match_char('=') {
                    TokenKind::Le
                } else if self.match_char('>') {
                    TokenKind::NotEq
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.match_char('=') {
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            '!' if self.match_char('=') => TokenKind::NotEq,
            '&' => {
                if self.match_char('&') {
                    TokenKind::AndAnd
                } else {
                    TokenKind::Amp
                }
            }
            '|' => {
                if self.match_char('|') {
                    TokenKind::OrOr
                } else {
                    TokenKind::Pipe
                }
            }
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,

            _ => {
                return Err(LexError::new(
                    format!("Unexpected character: '{}'", ch),
                    loc,
                ))
            }
        };

        Ok(Token::new(kind, self.text_from(start), loc))
    }

    /// Parse string literal. The token text keeps the quotes and escapes as written.
    fn string_literal(&mut self, start: usize, loc: SourceLocation) -> Result<Token, LexError> {
        while let Some(ch) = self.peek() {
            match ch {
                '"' => {
                    self.advance(); // consume closing quote
                    return Ok(Token::new(
                        TokenKind::StringLiteral,
                        self.text_from(start),
                        loc,
                    ));
                }
                '\n' => break,
                '\\' => self.escape_sequence()?,
                _ => {
                    self.advance();
                }
            }
        }

        Err(LexError::new("Unterminated string literal", loc))
    }

    /// Parse character literal: exactly one character or escape between single quotes
    fn char_literal(&mut self, start: usize, loc: SourceLocation) -> Result<Token, LexError> {
        match self.peek() {
            None | Some('\n') => {
                return Err(LexError::new("Unterminated character literal", loc));
            }
            Some('\'') => {
                return Err(LexError::new("Empty character literal", loc));
            }
            Some('\\') => self.escape_sequence()?,
            Some(_) => {
                self.advance();
            }
        }

        match self.peek() {
            Some('\'') => {
                self.advance();
                Ok(Token::new(TokenKind::CharLiteral, self.text_from(start), loc))
            }
            None | Some('\n') => Err(LexError::new("Unterminated character literal", loc)),
            Some(_) => Err(LexError::new(
                "Character literal must contain a single character",
                loc,
            )),
        }
    }

    /// Consume and validate a backslash escape. Decoding happens in the literal evaluator.
    fn escape_sequence(&mut self) -> Result<(), LexError> {
        let loc = self.current_location();
        self.advance(); // skip '\'

        match self.advance() {
            Some(escaped) if ESCAPABLE.contains(&escaped) => Ok(()),
            Some(escaped) => Err(LexError::new(
                format!("Unknown escape sequence: \\{}", escaped),
                loc,
            )),
            None => Err(LexError::new("Unexpected end of file in escape sequence", loc)),
        }
    }

    /// Parse numeric literal: `(digits ('.' digits?)? | '.' digits) ([eE] [+-]? digits)?`.
    /// The first character is already consumed.
    fn number_literal(&mut self, start: usize, loc: SourceLocation) -> Result<Token, LexError> {
        self.skip_digits();

        if self.input[start] != '.' && self.peek() == Some('.') {
            self.advance(); // skip '.'
            self.skip_digits();
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            let sign = matches!(self.peek_ahead(1), Some('+') | Some('-'));
            let digit_at = if sign { 2 } else { 1 };

            if self.peek_ahead(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digit_at {
                    self.advance();
                }
                self.skip_digits();
            } else if sign {
                return Err(LexError::new(
                    format!("Malformed exponent in number literal: {}", self.text_from(start)),
                    loc,
                ));
            }
        }

        Ok(Token::new(TokenKind::Number, self.text_from(start), loc))
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Parse identifier or keyword, folding `end if` / `end while` into one token
    fn identifier_or_keyword(&mut self, start: usize, loc: SourceLocation) -> Token {
        self.skip_word();
        let word = self.text_from(start);

        if word == "end" {
            if let Some(kind) = self.closing_keyword() {
                let text = if kind == TokenKind::EndIf {
                    "end if"
                } else {
                    "end while"
                };
                return Token::new(kind, text, loc);
            }
        }

        let kind = keyword_kind(&word).unwrap_or(TokenKind::Ident);
        Token::new(kind, word, loc)
    }

    /// After the word `end`: consume `if`/`while` on the same line and report which,
    /// or leave the input untouched.
    fn closing_keyword(&mut self) -> Option<TokenKind> {
        let saved = (self.position, self.line, self.column);

        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.advance();
        }

        let word_start = self.position;
        if self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.skip_word();
        }

        let kind = match self.text_from(word_start).as_str() {
            "if" => Some(TokenKind::EndIf),
            "while" => Some(TokenKind::EndWhile),
            _ => None,
        };

        if kind.is_none() {
            (self.position, self.line, self.column) = saved;
        }
        kind
    }

    fn skip_word(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */), ending at the first `*/`
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return Ok(());
            }
            self.advance();
        }

        Err(LexError::new("Unterminated block comment", start_loc))
    }

    fn text_from(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = Lexer::new("void main() { x = 0; }").tokenize().unwrap();

        assert_eq!(tokens[0].kind, TokenKind::Void);
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].text, "main");
        assert_eq!(tokens[2].kind, TokenKind::LParen);
        assert_eq!(tokens[3].kind, TokenKind::RParen);
        assert_eq!(tokens[4].kind, TokenKind::LBrace);
        assert_eq!(tokens[5].kind, TokenKind::Ident);
        assert_eq!(tokens[6].kind, TokenKind::Eq);
        assert_eq!(tokens[7].kind, TokenKind::Number);
        assert_eq!(tokens[8].kind, TokenKind::Semicolon);
        assert_eq!(tokens[9].kind, TokenKind::RBrace);
        assert_eq!(tokens[10].kind, TokenKind::Eof);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("&& || & | >= <= <> != == > < = %"),
            vec![
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Amp,
                TokenKind::Pipe,
                TokenKind::Ge,
                TokenKind::Le,
                TokenKind::NotEq,
                TokenKind::NotEq,
                TokenKind::EqEq,
                TokenKind::Gt,
                TokenKind::Lt,
                TokenKind::Eq,
                TokenKind::Percent,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments() {
        let source = "int x; // comment\nint y; /* block\ncomment */ int z;";
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::Int,
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::Int,
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::Int,
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_block_comment_stops_at_first_close() {
        // "*/ b */" leaves `b`, `*` and `/` behind
        assert_eq!(
            kinds("a /* x */ b */"),
            vec![
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_two_word_keywords() {
        let tokens = Lexer::new("end if end\t while end x").tokenize().unwrap();

        assert_eq!(tokens[0].kind, TokenKind::EndIf);
        assert_eq!(tokens[0].text, "end if");
        assert_eq!(tokens[1].kind, TokenKind::EndWhile);
        assert_eq!(tokens[1].location, SourceLocation::new(1, 8));
        assert_eq!(tokens[2].kind, TokenKind::Ident);
        assert_eq!(tokens[2].text, "end");
        assert_eq!(tokens[3].kind, TokenKind::Ident);
        assert_eq!(tokens[3].text, "x");
        assert_eq!(tokens[3].location, SourceLocation::new(1, 23));
    }

    #[test]
    fn test_end_at_line_end_stays_identifier() {
        let tokens = Lexer::new("y = end\nif (x)").tokenize().unwrap();

        assert_eq!(tokens[2].kind, TokenKind::Ident);
        assert_eq!(tokens[2].text, "end");
        assert_eq!(tokens[3].kind, TokenKind::If);
        assert_eq!(tokens[3].location, SourceLocation::new(2, 1));
    }

    #[test]
    fn test_end_followed_by_longer_word_is_identifier() {
        assert_eq!(
            kinds("end iffy"),
            vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(
            kinds("Dim dim As as True true"),
            vec![
                TokenKind::Dim,
                TokenKind::Ident,
                TokenKind::As,
                TokenKind::Ident,
                TokenKind::True,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_number_forms() {
        let tokens = Lexer::new("42 3.14 1e10 2.5E-3 9else").tokenize().unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();

        assert_eq!(texts, vec!["42", "3.14", "1e10", "2.5E-3", "9", "else", ""]);
        assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Number));
        assert_eq!(tokens[5].kind, TokenKind::Else);
    }

    #[test]
    fn test_number_with_bare_point() {
        let tokens = Lexer::new("x = .5 + 1. * 2.e3").tokenize().unwrap();
        let numbers: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Number)
            .map(|t| t.text.as_str())
            .collect();

        assert_eq!(numbers, vec![".5", "1.", "2.e3"]);
        assert_eq!(tokens[2].location, SourceLocation::new(1, 5));
    }

    #[test]
    fn test_lone_point_is_rejected() {
        let err = Lexer::new("x = .").tokenize().unwrap_err();
        assert_eq!(err.message, "Unexpected character: '.'");
    }

    #[test]
    fn test_malformed_exponent() {
        let err = Lexer::new("1e+x").tokenize().unwrap_err();
        assert!(err.message.starts_with("Malformed exponent"));
    }

    #[test]
    fn test_string_literal_keeps_source_text() {
        let tokens = Lexer::new(r#""hello\nworld""#).tokenize().unwrap();

        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].text, r#""hello\nworld""#);
    }

    #[test]
    fn test_char_literal() {
        let tokens = Lexer::new(r"'a' '\n'").tokenize().unwrap();

        assert_eq!(tokens[0].kind, TokenKind::CharLiteral);
        assert_eq!(tokens[0].text, "'a'");
        assert_eq!(tokens[1].text, r"'\n'");
    }

    #[test]
    fn test_locations() {
        let tokens = Lexer::new("Dim s\n  As int").tokenize().unwrap();

        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location, SourceLocation::new(1, 5));
        assert_eq!(tokens[2].location, SourceLocation::new(2, 3));
        assert_eq!(tokens[3].location, SourceLocation::new(2, 6));
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("x = \"abc").tokenize().unwrap_err();
        assert_eq!(err.message, "Unterminated string literal");
        assert_eq!(err.location, SourceLocation::new(1, 5));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = Lexer::new("a\n /* never closed").tokenize().unwrap_err();
        assert_eq!(err.message, "Unterminated block comment");
        assert_eq!(err.location, SourceLocation::new(2, 2));
    }

    #[test]
    fn test_invalid_character() {
        let err = Lexer::new("a = 1 $ 2").tokenize().unwrap_err();
        assert_eq!(err.location, SourceLocation::new(1, 7));
        assert!(err.to_string().contains("'$'"));
    }

    #[test]
    fn test_bad_char_literals() {
        assert!(Lexer::new("'ab'").tokenize().is_err());
        assert!(Lexer::new("''").tokenize().is_err());
        assert!(Lexer::new("'a").tokenize().is_err());
        assert!(Lexer::new(r"'\q'").tokenize().is_err());
    }
}
