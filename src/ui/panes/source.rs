//! Source code pane rendering with token-based highlighting
//!
//! Highlighting reuses the real token stream rather than a separate
//! highlighter, so what is coloured is exactly what the lexer produced. Text
//! between tokens (whitespace and comments) is drawn in the comment colour and
//! the token under the cursor gets a highlighted background.

use crate::lexer::{Span, Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span as TextSpan},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Style for a token of the given kind
pub(super) fn token_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::KwInt | TokenKind::KwReturn => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        TokenKind::Identifier => Style::default().fg(DEFAULT_THEME.identifier),
        TokenKind::IntLiteral => Style::default().fg(DEFAULT_THEME.number),
        TokenKind::Plus | TokenKind::Minus | TokenKind::Star | TokenKind::Slash | TokenKind::Assign => {
            Style::default().fg(DEFAULT_THEME.operator)
        }
        TokenKind::LParen | TokenKind::RParen | TokenKind::LBrace | TokenKind::RBrace => {
            Style::default().fg(DEFAULT_THEME.primary)
        }
        TokenKind::Semicolon | TokenKind::Eof => Style::default().fg(DEFAULT_THEME.fg),
        TokenKind::Error => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    }
}

/// Build one display line from the tokens that start on it.
///
/// `line_start` is the byte offset of `text` within the source.
fn highlight_line<'a>(
    text: &'a str,
    line_start: usize,
    tokens: &[&Token<'_>],
    current: Option<Span>,
) -> Line<'a> {
    let gap_style = Style::default().fg(DEFAULT_THEME.comment);
    let mut spans = Vec::new();
    let mut cursor = 0;

    for token in tokens {
        let start = token.span.start.saturating_sub(line_start).min(text.len());
        let end = token.span.end.saturating_sub(line_start).min(text.len());
        if start < cursor {
            continue;
        }
        if start > cursor {
            spans.push(TextSpan::styled(&text[cursor..start], gap_style));
        }

        let mut style = token_style(token.kind);
        if current == Some(token.span) {
            style = style
                .bg(DEFAULT_THEME.current_token_bg)
                .add_modifier(Modifier::BOLD);
        }
        spans.push(TextSpan::styled(&text[start..end], style));
        cursor = end;
    }

    if cursor < text.len() {
        spans.push(TextSpan::styled(&text[cursor..], gap_style));
    }

    Line::from(spans)
}

/// Scroll state for the source pane
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

impl SourceScrollState {
    pub fn new() -> Self {
        SourceScrollState {
            offset: 0,
            target_line_row: None,
        }
    }
}

impl Default for SourceScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    tokens: &[Token<'_>],
    current: Option<&Token<'_>>,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style);

    // Split on '\n' only so byte offsets line up with token spans
    let mut line_starts = Vec::new();
    let mut offset = 0;
    let lines: Vec<&str> = source_code
        .split('\n')
        .map(|line| {
            line_starts.push(offset);
            offset += line.len() + 1;
            line.strip_suffix('\r').unwrap_or(line)
        })
        .collect();
    let total_lines = lines.len();
    let current_line = current.map(|t| t.location.line).unwrap_or(1);

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    // Keep the current line at a fixed visual row, centred on first render
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    if current_line > 0 && current_line <= total_lines {
        let target_line_idx = current_line - 1;
        scroll_state.offset = target_line_idx.saturating_sub(target_row);

        if total_lines > visible_height {
            let max_scroll = total_lines - visible_height;
            scroll_state.offset = scroll_state.offset.min(max_scroll);
        } else {
            scroll_state.offset = 0;
        }
    }

    let current_span = current.map(|t| t.span);

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;

            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let on_line: Vec<&Token> = tokens
                .iter()
                .filter(|t| t.location.line == line_num && !t.is_eof())
                .collect();
            let mut content = highlight_line(line, line_starts[idx], &on_line, current_span);

            if is_current {
                let bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content.spans {
                    span.style = bg.patch(span.style);
                }
            }

            let mut final_spans = vec![TextSpan::styled(format!("{:4} ", line_num), num_style)];
            final_spans.extend(content.spans);
            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
