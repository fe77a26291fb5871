//! Token list pane rendering
//!
//! Shows every token produced so far as a `# / TYPE / LEXEME / LINE:COL` row.
//! The current token is highlighted and kept in view.

use crate::lexer::Token;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::source::token_style;

/// Render the token list, showing tokens `0..=position`.
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token<'_>],
    position: usize,
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
        .title(format!(" Tokens ({}/{}) ", (position + 1).min(tokens.len()), tokens.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    if tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let shown = &tokens[..=position.min(tokens.len() - 1)];
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Keep the current (last shown) token on screen
    let last = shown.len() - 1;
    if last < *scroll_offset {
        *scroll_offset = last;
    } else if last >= *scroll_offset + visible_height {
        *scroll_offset = last + 1 - visible_height;
    }

    let items: Vec<ListItem> = shown
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, token)| {
            let row_style = if idx == last {
                Style::default()
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let lexeme = if token.is_eof() {
                "<EOF>".to_string()
            } else {
                token.lexeme.escape_default().to_string()
            };
            let line = Line::from(vec![
                Span::styled(format!("{:4} ", idx + 1), Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(format!("{:<12} ", token.kind.name()), token_style(token.kind)),
                Span::styled(format!("{:<16} ", lexeme), Style::default().fg(DEFAULT_THEME.fg)),
                Span::styled(token.location.to_string(), Style::default().fg(DEFAULT_THEME.comment)),
            ]);
            ListItem::new(line).style(row_style)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
