//! Main TUI application state and logic

use crate::parser::{self, Root, StartSymbol};
use crate::tree::{render_lines, TreeLine};
use crate::ui::panes::{
    render_source_pane, render_status_bar, render_tree_pane, SourceRenderData,
    SourceScrollState, StatusRenderData, TreeRenderData, TreeScrollState,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;

/// Rows moved by PgUp/PgDn
const PAGE_SIZE: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tree,
    Source,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Tree => FocusedPane::Source,
            FocusedPane::Source => FocusedPane::Tree,
        }
    }
}

/// The main application state
pub struct App {
    /// The source code being inspected
    pub source_code: String,

    /// Shown in the source pane title
    pub file_name: String,

    /// Rendered tree, one entry per node (empty when parsing failed)
    pub tree_lines: Vec<TreeLine>,

    /// Parse failure, if any
    pub error: Option<parser::Error>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Index into `tree_lines`
    pub selected: usize,

    pub source_scroll: SourceScrollState,
    pub tree_scroll: TreeScrollState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Parse `source_code` from `start` and build the inspector state
    pub fn new(source_code: String, file_name: impl Into<String>, start: StartSymbol) -> Self {
        let (tree_lines, error, status_message) = match parser::parse(&source_code, start) {
            Ok(root) => {
                let lines = render_lines(&root);
                let message = match &root {
                    Root::Program(program) => format!(
                        "Parsed as {}, {} function(s)",
                        start,
                        program.functions().count()
                    ),
                    _ => format!("Parsed as {}", start),
                };
                (lines, None, message)
            }
            Err(e) => {
                let message = format!("{:?} error", e.kind());
                (Vec::new(), Some(e), message)
            }
        };

        App {
            source_code,
            file_name: file_name.into(),
            tree_lines,
            error,
            focused_pane: FocusedPane::Tree,
            selected: 0,
            source_scroll: SourceScrollState {
                offset: 0,
                follow: true,
            },
            tree_scroll: TreeScrollState::default(),
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    /// 1-based source line to highlight: the error line, or the selected node's line
    pub fn highlighted_line(&self) -> Option<usize> {
        match &self.error {
            Some(e) => e.location().map(|loc| loc.line),
            None => self
                .tree_lines
                .get(self.selected)
                .and_then(|line| line.location)
                .map(|loc| loc.line),
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        let highlight_line = self.highlighted_line();
        let error_text = self.error.as_ref().map(ToString::to_string);

        render_source_pane(
            frame,
            columns[0],
            &SourceRenderData {
                source_code: &self.source_code,
                file_name: &self.file_name,
                highlight_line,
                is_error: self.error.is_some(),
            },
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        render_tree_pane(
            frame,
            columns[1],
            &TreeRenderData {
                lines: &self.tree_lines,
                selected: self.selected,
                error: error_text,
            },
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        render_status_bar(
            frame,
            main_chunks[1],
            &StatusRenderData {
                message: &self.status_message,
                selected: self.selected,
                total_rows: self.tree_lines.len(),
                is_error: self.error.is_some(),
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => self.move_by(-1),
            KeyCode::Down => self.move_by(1),
            KeyCode::PageUp => self.move_by(-(PAGE_SIZE as isize)),
            KeyCode::PageDown => self.move_by(PAGE_SIZE as isize),
            KeyCode::Home => match self.focused_pane {
                FocusedPane::Tree => self.select(0),
                FocusedPane::Source => self.scroll_source_to(0),
            },
            KeyCode::End => match self.focused_pane {
                FocusedPane::Tree => self.select(self.tree_lines.len().saturating_sub(1)),
                FocusedPane::Source => self.scroll_source_to(usize::MAX),
            },
            _ => {}
        }
    }

    /// Move the selection (tree focus) or scroll the source (source focus)
    fn move_by(&mut self, delta: isize) {
        match self.focused_pane {
            FocusedPane::Tree => self.select(self.selected.saturating_add_signed(delta)),
            FocusedPane::Source => {
                let offset = self.source_scroll.offset.saturating_add_signed(delta);
                self.scroll_source_to(offset);
            }
        }
    }

    fn select(&mut self, index: usize) {
        if self.tree_lines.is_empty() {
            return;
        }
        self.selected = index.min(self.tree_lines.len() - 1);
        self.source_scroll.follow = true;

        if let Some(line) = self.tree_lines.get(self.selected) {
            let what = match line.literal_type {
                Some(ty) => format!("{:?} {}", line.kind, ty),
                None => format!("{:?}", line.kind),
            };
            self.status_message = match line.location {
                Some(loc) => format!("{} at {}", what, loc),
                None => what,
            };
        }
    }

    /// Manual scrolling stops the source pane from following the selection.
    /// The offset is clamped when the pane is next drawn.
    fn scroll_source_to(&mut self, offset: usize) {
        let max = self.source_code.lines().count().saturating_sub(1);
        self.source_scroll.offset = offset.min(max);
        self.source_scroll.follow = false;
    }
}
