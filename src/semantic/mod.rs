//! Semantic analysis: scopes, declarations and assignment type checking
//!
//! This module checks the meaning of a token stream once a driver knows which
//! identifiers are declared, read and assigned:
//! - [`types`]: the closed [`VarType`] set and the assignment compatibility table
//! - [`symbols`]: scoped [`SymbolTable`] with shadowing and redeclaration checks
//! - [`errors`]: hard failures of table operations
//! - [`diagnostics`]: structured findings with severity and source line
//! - [`analyzer`]: the [`Analyzer`] driver that collects diagnostics in one pass
//!
//! # Scoping Rules
//!
//! Scope level 0 is the global scope and always exists. Names are unique per
//! level; an inner declaration of an outer name shadows it (a warning) until
//! the inner scope is popped, at which point the outer binding is visible
//! again.

pub mod analyzer;
pub mod diagnostics;
pub mod errors;
pub mod symbols;
pub mod types;

pub use analyzer::{Analyzer, AnalyzerOptions};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use errors::{DeclError, ScopeError};
pub use symbols::{
    AssignmentReport, Declaration, Shadowing, Symbol, SymbolId, SymbolTable, UseReport,
    DEFAULT_MAX_SCOPE_DEPTH,
};
pub use types::{check_assignment_compatibility, CompatibilityVerdict, Severity, VarType};
