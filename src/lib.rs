//! # Introduction
//!
//! Mel is a small imperative teaching language mixing C-style declarations with
//! BASIC-style `Dim`, `for … To … Next` and `end if` forms. This crate is its
//! front end: it turns source text into a typed AST and renders that tree as an
//! ASCII diagram, either on stdout or in a terminal inspector built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser (+ literal decoding) → AST → Tree renderer → stdout / TUI
//! ```
//!
//! 1. [`parser`]: tokenizes the source, decodes literals and builds the AST.
//! 2. [`tree`]: renders any node and its descendants as `├─`/`└─` diagram lines.
//! 3. [`ui`]: ratatui-based inspector; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use mel::parser::{parse, StartSymbol};
//! use mel::tree::render_tree;
//!
//! let root = parse("1 + 2 * 3", StartSymbol::Expression).unwrap();
//! assert_eq!(render_tree(&root), ["+", "├─1", "└─*", "  ├─2", "  └─3"]);
//! ```

pub mod parser;
pub mod tree;
pub mod ui;
