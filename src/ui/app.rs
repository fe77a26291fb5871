//! Token explorer application state and event loop

use crate::lexer::Token;
use crate::semantic::Diagnostic;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

use super::panes::{self, SourceScrollState};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Diagnostics,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> tokens -> diagnostics)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Diagnostics,
            FocusedPane::Diagnostics => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Diagnostics,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Diagnostics => FocusedPane::Tokens,
        }
    }
}

/// The token explorer
pub struct App<'src> {
    source_code: &'src str,
    tokens: Vec<Token<'src>>,
    diagnostics: Vec<Diagnostic>,

    /// Index of the current token
    pub position: usize,

    pub focused_pane: FocusedPane,

    pub source_scroll: SourceScrollState,
    pub tokens_scroll: usize,
    pub diagnostics_scroll: usize,

    pub should_quit: bool,
    pub status_message: String,

    pub is_playing: bool,
    pub last_play_time: Instant,
    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl<'src> App<'src> {
    /// Create an explorer over a complete token stream (ending in `Eof`)
    pub fn new(source_code: &'src str, tokens: Vec<Token<'src>>, diagnostics: Vec<Diagnostic>) -> Self {
        let now = Instant::now();
        App {
            source_code,
            tokens,
            diagnostics,
            position: 0,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::new(),
            tokens_scroll: 0,
            diagnostics_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: now,
            last_space_press: now.checked_sub(Duration::from_secs(1)).unwrap_or(now),
        }
    }

    pub fn current_token(&self) -> Option<&Token<'src>> {
        self.tokens.get(self.position)
    }

    pub fn total_tokens(&self) -> usize {
        self.tokens.len()
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= Duration::from_millis(500) {
                if self.step_forward() {
                    self.status_message = "Playing...".to_string();
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Poll with a timeout so auto-play keeps ticking
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Diagnostics (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        let current = self.tokens.get(self.position);
        let current_line = current.map(|t| t.location.line).unwrap_or(1);

        panes::render_source_pane(
            frame,
            left_rows[0],
            self.source_code,
            &self.tokens[..(self.position + 1).min(self.tokens.len())],
            current,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_diagnostics_pane(
            frame,
            left_rows[1],
            &self.diagnostics,
            current_line,
            self.focused_pane == FocusedPane::Diagnostics,
            &mut self.diagnostics_scroll,
        );

        panes::render_tokens_pane(
            frame,
            columns[1],
            &self.tokens,
            self.position,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        let error_count = self
            .diagnostics
            .iter()
            .filter(|d| d.is_error() && d.line <= current_line)
            .count();
        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.position,
            self.tokens.len(),
            error_count,
            self.is_playing,
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let stepped = (0..n).take_while(|_| self.step_forward()).count();
                self.status_message = format!("Stepped forward {} token(s)", stepped);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.status_message = if self.step_backward() {
                    "Stepped backward".to_string()
                } else {
                    "Cannot step backward: at first token".to_string()
                };
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.status_message = if self.step_forward() {
                    "Stepped forward".to_string()
                } else {
                    "Cannot step forward: at end of input".to_string()
                };
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Tokens => {
                    self.tokens_scroll = self.tokens_scroll.saturating_sub(1);
                }
                FocusedPane::Diagnostics => {
                    self.diagnostics_scroll = self.diagnostics_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Tokens => {
                    self.tokens_scroll = self.tokens_scroll.saturating_add(1);
                }
                FocusedPane::Diagnostics => {
                    self.diagnostics_scroll = self.diagnostics_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play (200ms debounce against key repeat)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    self.status_message = if self.is_playing {
                        "Playing...".to_string()
                    } else {
                        "Paused".to_string()
                    };
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.position = self.tokens.len().saturating_sub(1);
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.position = 0;
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    /// Advance to the next token. Returns `false` at the last token.
    pub fn step_forward(&mut self) -> bool {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Go back one token. Returns `false` at the first token.
    pub fn step_backward(&mut self) -> bool {
        if self.position > 0 {
            self.position -= 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    #[test]
    fn test_stepping_is_bounded() {
        let source = "int x;";
        let tokens = Lexer::new(source).tokenize();
        let mut app = App::new(source, tokens, Vec::new());

        assert!(!app.step_backward());
        assert!(app.step_forward());
        assert!(app.step_forward());
        assert!(app.step_forward());
        assert!(!app.step_forward());
        assert!(app.current_token().is_some_and(|t| t.is_eof()));
        assert_eq!(app.total_tokens(), 4);
    }

    #[test]
    fn test_keys_jump_and_step() {
        let source = "a b c d";
        let tokens = Lexer::new(source).tokenize();
        let mut app = App::new(source, tokens, Vec::new());

        app.handle_key_event(KeyEvent::from(KeyCode::Char('3')));
        assert_eq!(app.position, 3);
        app.handle_key_event(KeyEvent::from(KeyCode::Char('9')));
        assert_eq!(app.position, 4);
        assert_eq!(app.status_message, "Stepped forward 1 token(s)");
        app.handle_key_event(KeyEvent::from(KeyCode::Backspace));
        assert_eq!(app.position, 0);
        app.handle_key_event(KeyEvent::from(KeyCode::Enter));
        assert_eq!(app.position, 4);
        app.handle_key_event(KeyEvent::from(KeyCode::Tab));
        assert_eq!(app.focused_pane, FocusedPane::Tokens);
        app.handle_key_event(KeyEvent::from(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
