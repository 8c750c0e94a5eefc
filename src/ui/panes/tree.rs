//! AST pane rendering
//!
//! Shows the rendered tree with one row per node and a selection cursor. When
//! parsing failed, the pane shows the error instead.

use super::utils::{border_style, clamp_offset, inner_height, scroll_to_show};
use crate::parser::ast::NodeKind;
use crate::tree::TreeLine;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Scroll state for the tree pane
#[derive(Debug, Clone, Default)]
pub struct TreeScrollState {
    pub offset: usize,
}

/// What the tree pane shows
pub struct TreeRenderData<'a> {
    pub lines: &'a [TreeLine],
    pub selected: usize,
    /// Parse failure to show in place of the tree
    pub error: Option<String>,
}

fn label_style(kind: NodeKind) -> Style {
    let style = Style::default();
    match kind {
        NodeKind::Literal => style.fg(DEFAULT_THEME.number),
        NodeKind::Ident => style.fg(DEFAULT_THEME.fg),
        NodeKind::VarType | NodeKind::ArrayType | NodeKind::Delegate | NodeKind::TypeList => {
            style.fg(DEFAULT_THEME.type_name)
        }
        NodeKind::BinaryOp | NodeKind::Assign | NodeKind::Declarator => {
            style.fg(DEFAULT_THEME.operator)
        }
        NodeKind::If | NodeKind::For | NodeKind::While | NodeKind::DoWhile => style
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        NodeKind::Func | NodeKind::Call => style.fg(DEFAULT_THEME.function),
        NodeKind::Program => style.fg(DEFAULT_THEME.success).add_modifier(Modifier::BOLD),
        _ => style.fg(DEFAULT_THEME.secondary),
    }
}

/// Split a rendered line into its branch prefix and its label.
/// Every nesting level contributes two characters of prefix.
pub fn split_prefix(line: &TreeLine) -> (&str, &str) {
    let split = line
        .text
        .char_indices()
        .nth(line.depth * 2)
        .map_or(line.text.len(), |(i, _)| i);
    line.text.split_at(split)
}

/// Render the tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    data: &TreeRenderData,
    is_focused: bool,
    scroll_state: &mut TreeScrollState,
) {
    let title = if data.error.is_some() {
        " AST (parse failed) ".to_string()
    } else {
        format!(" AST ({} nodes) ", data.lines.len())
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if let Some(error) = &data.error {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            error.clone(),
            Style::default()
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::BOLD),
        )))
        .wrap(Wrap { trim: false })
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = inner_height(area.height);
    scroll_state.offset = scroll_to_show(scroll_state.offset, data.selected, visible_height);
    scroll_state.offset = clamp_offset(scroll_state.offset, data.lines.len(), visible_height);

    let visible_lines: Vec<Line> = data
        .lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let (prefix, label) = split_prefix(line);
            let mut spans = vec![
                Span::styled(prefix.to_string(), Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(label.to_string(), label_style(line.kind)),
            ];

            if idx == data.selected {
                let selection = Style::default().bg(DEFAULT_THEME.selection_bg);
                for span in &mut spans {
                    span.style = span.style.patch(selection);
                }
                if let Some(location) = line.location {
                    spans.push(Span::styled(
                        format!("  @{}", location),
                        Style::default()
                            .fg(DEFAULT_THEME.comment)
                            .bg(DEFAULT_THEME.selection_bg),
                    ));
                }
            }

            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
