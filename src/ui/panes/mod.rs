//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with syntax highlighting and the selected node's line
//! - [`tree`]: The rendered AST with a selection cursor, or the parse error
//! - [`status`]: Status bar with keybindings and the selection position
//! - `utils`: Scrolling helpers shared by the panes
//!
//! # Architecture
//!
//! Each pane module exports:
//! - A primary `render_*_pane()` function
//! - Associated state types (e.g., `SourceScrollState`, `TreeRenderData`)

mod utils;

pub mod source;
pub mod status;
pub mod tree;

pub use source::{render_source_pane, SourceRenderData, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use tree::{render_tree_pane, TreeRenderData, TreeScrollState};
