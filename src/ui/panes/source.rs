//! Source code pane rendering with syntax highlighting
//!
//! This module renders the source code pane, which displays the Mel program
//! being inspected with basic syntax highlighting.
//!
//! # Features
//!
//! - Keyword, type, string, number and comment highlighting, using the lexer's
//!   keyword table so the pane never disagrees with the parser
//! - Highlight of the line holding the selected tree node (or the error)
//! - Scroll state that follows the highlighted line until the user scrolls
//! - Line numbering
//!
//! # Rendering
//!
//! Highlighting works line by line with a small character scanner, so a block
//! comment spanning several lines is only colored on its first line.

use super::utils::{border_style, clamp_offset, inner_height, scroll_to_show};
use crate::parser::lexer::{keyword_kind, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Syntax highlighting for one line of Mel code
fn highlight_source_code(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Comments run to the end of the line
        if c == '/' && matches!(chars.get(i + 1), Some('/') | Some('*')) {
            flush_word(&mut spans, &mut current_word, false);
            spans.push(Span::styled(
                chars[i..].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            break;
        }

        // String and char literals
        if c == '"' || c == '\'' {
            flush_word(&mut spans, &mut current_word, false);
            let mut end = i + 1;
            while end < chars.len() && chars[end] != c {
                end += if chars[end] == '\\' { 2 } else { 1 };
            }
            let end = (end + 1).min(chars.len());
            spans.push(Span::styled(
                chars[i..end].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end;
            continue;
        }

        // Delimiters end the current word
        if !c.is_alphanumeric() && c != '_' && !(c == '.' && starts_with_digit(&current_word)) {
            flush_word(&mut spans, &mut current_word, c == '(');

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };

            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    flush_word(&mut spans, &mut current_word, false);

    Line::from(spans)
}

fn starts_with_digit(word: &str) -> bool {
    word.starts_with(|c: char| c.is_ascii_digit())
}

fn flush_word(spans: &mut Vec<Span<'static>>, word: &mut String, is_function: bool) {
    if !word.is_empty() {
        let style = get_keyword_style(word, is_function);
        spans.push(Span::styled(std::mem::take(word), style));
    }
}

fn get_keyword_style(word: &str, is_function: bool) -> Style {
    if starts_with_digit(word) {
        return Style::default().fg(DEFAULT_THEME.number);
    }

    match keyword_kind(word) {
        Some(kind) if kind.is_type_keyword() => Style::default().fg(DEFAULT_THEME.type_name),
        Some(TokenKind::True | TokenKind::False) => Style::default().fg(DEFAULT_THEME.number),
        Some(_) => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        // first half of `end if` / `end while`
        None if word == "end" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        None if is_function => Style::default().fg(DEFAULT_THEME.function),
        None => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Scroll state for the source pane
#[derive(Debug, Clone, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    /// Keep the highlighted line in view; cleared when the user scrolls by hand
    pub follow: bool,
}

/// What the source pane shows
pub struct SourceRenderData<'a> {
    pub source_code: &'a str,
    pub file_name: &'a str,
    /// 1-based line to highlight
    pub highlight_line: Option<usize>,
    pub is_error: bool,
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    data: &SourceRenderData,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let block = Block::default()
        .title(format!(" Source: {} ", data.file_name))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let lines: Vec<&str> = data.source_code.lines().collect();
    let visible_height = inner_height(area.height);

    if scroll_state.follow {
        if let Some(line) = data.highlight_line {
            scroll_state.offset =
                scroll_to_show(scroll_state.offset, line.saturating_sub(1), visible_height);
        }
    }
    scroll_state.offset = clamp_offset(scroll_state.offset, lines.len(), visible_height);

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_highlighted = data.highlight_line == Some(line_num);
            let line_num_str = format!("{:4} ", line_num);

            let mut content_line = highlight_source_code(line);

            let num_style = if is_highlighted && data.is_error {
                // Error line: red background, white text
                let error_style = Style::default()
                    .bg(DEFAULT_THEME.error)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD);
                for span in &mut content_line.spans {
                    span.style = error_style;
                }
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if is_highlighted {
                let background = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content_line.spans {
                    span.style = span.style.patch(background);
                }
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut final_spans = vec![Span::styled(line_num_str, num_style)];
            final_spans.extend(content_line.spans);

            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
