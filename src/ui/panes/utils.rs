//! Scrolling helpers shared by the panes

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

/// Smallest change to `offset` that keeps row `index` inside a window of `height` rows.
pub fn scroll_to_show(offset: usize, index: usize, height: usize) -> usize {
    let height = height.max(1);
    if index < offset {
        index
    } else if index >= offset + height {
        index + 1 - height
    } else {
        offset
    }
}

/// Clamp `offset` so the window never scrolls past the last of `total` rows.
pub fn clamp_offset(offset: usize, total: usize, height: usize) -> usize {
    offset.min(total.saturating_sub(height.max(1)))
}

/// Rows available inside a bordered block of the given outer height
pub fn inner_height(outer: u16) -> usize {
    outer.saturating_sub(2).max(1) as usize
}

pub fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}
