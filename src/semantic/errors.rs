//! Error types for symbol table operations
//!
//! Only hard failures live here. Warnings such as shadowing or use of an
//! uninitialized variable are ordinary return values of the table operations,
//! never errors.

use std::fmt;

/// Declaration failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclError {
    /// The name is already declared at the current scope level
    DuplicateInCurrentScope {
        name: String,
        line: usize,
        previous_line: usize,
    },
}

impl DeclError {
    pub fn line(&self) -> usize {
        match self {
            DeclError::DuplicateInCurrentScope { line, .. } => *line,
        }
    }
}

impl fmt::Display for DeclError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclError::DuplicateInCurrentScope {
                name,
                line,
                previous_line,
            } => {
                write!(
                    f,
                    "'{}' already declared in this scope at line {} (redeclared at line {})",
                    name, previous_line, line
                )
            }
        }
    }
}

impl std::error::Error for DeclError {}

/// Scope management failures. Both indicate a driver bug rather than a
/// problem in the analysed program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// `pop_scope` was called at the global scope
    PopGlobalScope,

    /// `push_scope` would nest deeper than the configured limit
    DepthExceeded { limit: usize },
}

impl fmt::Display for ScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeError::PopGlobalScope => write!(f, "Cannot pop the global scope"),
            ScopeError::DepthExceeded { limit } => {
                write!(f, "Scope nesting exceeds the limit of {} levels", limit)
            }
        }
    }
}

impl std::error::Error for ScopeError {}
