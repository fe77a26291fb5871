//! Structured diagnostics
//!
//! The symbol table and type checker return plain report values. The
//! [`Analyzer`](super::analyzer::Analyzer) turns those into [`Diagnostic`]s that
//! carry a severity, what happened and the source line, so a front end can
//! format them however it likes.

use super::errors::ScopeError;
use super::types::{CompatibilityVerdict, Severity, VarType};
use std::fmt;

/// What a diagnostic is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Character the lexer could not classify
    UnexpectedCharacter { lexeme: String, column: usize },

    /// Block comment still open at end of input
    UnterminatedComment { column: usize },

    Redeclaration { name: String, previous_line: usize },

    Shadowing {
        name: String,
        outer_level: usize,
        outer_line: usize,
    },

    UndeclaredIdentifier { name: String },

    UninitializedUse { name: String, declared_at_line: usize },

    /// Any assignment verdict other than an exact match
    Conversion {
        name: String,
        target: VarType,
        source: VarType,
        verdict: CompatibilityVerdict,
    },

    /// The driver mismanaged scopes
    Scope(ScopeError),
}

/// A single finding with its severity and source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub line: usize,
}

impl Diagnostic {
    pub fn new(severity: Severity, kind: DiagnosticKind, line: usize) -> Self {
        Diagnostic {
            severity,
            kind,
            line,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnexpectedCharacter { lexeme, column } => {
                write!(
                    f,
                    "unexpected character '{}' at column {}",
                    lexeme.escape_default(),
                    column
                )
            }
            DiagnosticKind::UnterminatedComment { column } => {
                write!(f, "unterminated block comment starting at column {}", column)
            }
            DiagnosticKind::Redeclaration {
                name,
                previous_line,
            } => {
                write!(
                    f,
                    "'{}' already declared in this scope (line {})",
                    name, previous_line
                )
            }
            DiagnosticKind::Shadowing {
                name,
                outer_level,
                outer_line,
            } => {
                write!(
                    f,
                    "'{}' shadows declaration from scope {} (line {})",
                    name, outer_level, outer_line
                )
            }
            DiagnosticKind::UndeclaredIdentifier { name } => {
                write!(f, "use of undeclared identifier '{}'", name)
            }
            DiagnosticKind::UninitializedUse {
                name,
                declared_at_line,
            } => {
                write!(
                    f,
                    "'{}' is used uninitialized (declared at line {})",
                    name, declared_at_line
                )
            }
            DiagnosticKind::Conversion {
                name,
                target,
                source,
                verdict,
            } => match verdict {
                CompatibilityVerdict::Exact => write!(f, "'{}': {} = {}", name, target, source),
                CompatibilityVerdict::IncompatiblePointerTypes => {
                    write!(f, "incompatible pointer types assigning {} to '{}' ({})", source, name, target)
                }
                CompatibilityVerdict::PointerNumericMismatch => {
                    write!(f, "cannot assign {} to '{}' ({}) without a cast", source, name, target)
                }
                CompatibilityVerdict::NarrowingFloatToInt => {
                    write!(f, "implicit {} -> {} conversion of '{}' may lose data", source, target, name)
                }
                CompatibilityVerdict::WideningIntToFloat => {
                    write!(f, "implicit {} -> {} conversion of '{}' may lose precision", source, target, name)
                }
                CompatibilityVerdict::CharIntConversion => {
                    write!(f, "implicit {} -> {} conversion of '{}'", source, target, name)
                }
                CompatibilityVerdict::ImplicitNumericConversion => {
                    write!(f, "implicit numeric conversion {} -> {} for '{}'", source, target, name)
                }
                CompatibilityVerdict::IncompatibleTypes => {
                    write!(f, "incompatible types assigning {} to '{}' ({})", source, name, target)
                }
            },
            DiagnosticKind::Scope(err) => write!(f, "{}", err),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}: {}", self.severity, self.line, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let diag = Diagnostic::new(
            Severity::Warning,
            DiagnosticKind::Shadowing {
                name: "x".to_string(),
                outer_level: 0,
                outer_line: 1,
            },
            4,
        );
        assert_eq!(
            diag.to_string(),
            "warning at line 4: 'x' shadows declaration from scope 0 (line 1)"
        );

        let diag = Diagnostic::new(
            Severity::Error,
            DiagnosticKind::Conversion {
                name: "iptr".to_string(),
                target: VarType::IntPtr,
                source: VarType::Int,
                verdict: CompatibilityVerdict::PointerNumericMismatch,
            },
            15,
        );
        assert!(diag.is_error());
        assert_eq!(
            diag.to_string(),
            "error at line 15: cannot assign int to 'iptr' (int*) without a cast"
        );
    }
}
