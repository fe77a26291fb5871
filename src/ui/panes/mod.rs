//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display, highlighted from the token stream, with
//!   the current token marked
//! - [`tokens`]: Table of the tokens produced so far
//! - [`diagnostics`]: Lexical diagnostics reached so far
//! - [`status`]: Status bar with keybindings and position
//!
//! Each pane module exports a stateless `render_*` function; scroll state is
//! owned by the [`App`](crate::ui::App) and passed in by reference.

pub mod diagnostics;
pub mod source;
pub mod status;
pub mod tokens;

pub use diagnostics::render_diagnostics_pane;
pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
