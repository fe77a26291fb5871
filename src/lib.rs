//! # Introduction
//!
//! cfront is a miniature C front end: a hand-written tokenizer for a tiny C
//! subset, a scoped symbol table, and an assignment type checker. A terminal
//! explorer built with [ratatui](https://docs.rs/ratatui) steps through the
//! token stream of a file alongside its source and diagnostics.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → (parser, not included) → Analyzer → Diagnostics
//! ```
//!
//! 1. [`lexer`]: turns source text into [`lexer::Token`]s with positions.
//!    Never fails; bad characters become error tokens.
//! 2. [`semantic`]: [`semantic::SymbolTable`] scopes and bindings, the
//!    [`semantic::check_assignment_compatibility`] table, and the
//!    [`semantic::Analyzer`] driver that collects [`semantic::Diagnostic`]s.
//! 3. [`ui`]: ratatui-based token explorer; not part of the stable library API.
//!
//! ## Supported C subset
//!
//! Keywords `int` and `return`, identifiers, decimal integer literals, the
//! operators `+ - * =`, and `; ( ) { }`. Types known to the checker: `int`,
//! `float`, `char`, pointers to each, and `void`.

pub mod lexer;
pub mod semantic;
pub mod ui;
