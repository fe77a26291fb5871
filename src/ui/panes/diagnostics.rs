//! Diagnostics pane rendering

use crate::semantic::{Diagnostic, Severity};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the diagnostics reached so far (those on or before `current_line`)
pub fn render_diagnostics_pane(
    frame: &mut Frame,
    area: Rect,
    diagnostics: &[Diagnostic],
    current_line: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Diagnostics ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let reached: Vec<&Diagnostic> = diagnostics
        .iter()
        .filter(|d| d.line <= current_line)
        .collect();

    if reached.is_empty() {
        let paragraph = Paragraph::new("(no diagnostics)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let total_items = reached.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let items: Vec<ListItem> = reached
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|diag| {
            let color = match diag.severity {
                Severity::Error => DEFAULT_THEME.error,
                Severity::Warning => DEFAULT_THEME.warning,
                Severity::Info => DEFAULT_THEME.primary,
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<8}", diag.severity.to_string()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{:>4}  ", diag.line), Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(diag.kind.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
            ]))
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
