//! Diagnostic-collecting semantic driver
//!
//! [`Analyzer`] plays the part of the semantic pass that would walk a parse
//! tree: the caller feeds it scope entries and exits, declarations, reads and
//! assignments in source order, and it records every finding as a
//! [`Diagnostic`] instead of stopping at the first one.
//!
//! Escalation policy lives here and only here. With
//! [`AnalyzerOptions::warnings_as_errors`] every warning is recorded as an
//! error; the symbol table itself never changes behaviour.

use super::diagnostics::{Diagnostic, DiagnosticKind};
use super::errors::DeclError;
use super::symbols::{AssignmentReport, SymbolId, SymbolTable, UseReport, DEFAULT_MAX_SCOPE_DEPTH};
use super::types::{CompatibilityVerdict, Severity, VarType};
use crate::lexer::{SourceLocation, Token};

/// Driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerOptions {
    pub warnings_as_errors: bool,
    pub max_scope_depth: usize,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        AnalyzerOptions {
            warnings_as_errors: false,
            max_scope_depth: DEFAULT_MAX_SCOPE_DEPTH,
        }
    }
}

/// Semantic analysis session over one translation unit
#[derive(Debug, Clone)]
pub struct Analyzer {
    table: SymbolTable,
    diagnostics: Vec<Diagnostic>,
    options: AnalyzerOptions,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::with_options(AnalyzerOptions::default())
    }

    pub fn with_options(options: AnalyzerOptions) -> Self {
        Analyzer {
            table: SymbolTable::with_max_depth(options.max_scope_depth),
            diagnostics: Vec::new(),
            options,
        }
    }

    /// Enter a block. Returns the new scope level.
    pub fn enter_scope(&mut self, line: usize) -> Option<usize> {
        match self.table.push_scope() {
            Ok(level) => Some(level),
            Err(err) => {
                self.report(Severity::Error, DiagnosticKind::Scope(err), line);
                None
            }
        }
    }

    /// Leave a block. Returns how many symbols went out of scope.
    pub fn exit_scope(&mut self, line: usize) -> Option<usize> {
        match self.table.pop_scope() {
            Ok(dropped) => Some(dropped.len()),
            Err(err) => {
                self.report(Severity::Error, DiagnosticKind::Scope(err), line);
                None
            }
        }
    }

    /// Declare a variable. Returns `None` on redeclaration.
    pub fn declare(
        &mut self,
        name: &str,
        ty: VarType,
        initialized: bool,
        line: usize,
    ) -> Option<SymbolId> {
        match self.table.declare(name, ty, initialized, line) {
            Ok(decl) => {
                if let Some(shadow) = decl.shadowed {
                    self.report(
                        Severity::Warning,
                        DiagnosticKind::Shadowing {
                            name: name.to_string(),
                            outer_level: shadow.outer_level,
                            outer_line: shadow.outer_line,
                        },
                        line,
                    );
                }
                Some(decl.id)
            }
            Err(DeclError::DuplicateInCurrentScope {
                name,
                line,
                previous_line,
            }) => {
                self.report(
                    Severity::Error,
                    DiagnosticKind::Redeclaration {
                        name,
                        previous_line,
                    },
                    line,
                );
                None
            }
        }
    }

    /// Read of a variable
    pub fn use_var(&mut self, name: &str, line: usize) -> UseReport {
        let report = self.table.check_use(name, line);
        match &report {
            UseReport::Ok(_) => {}
            UseReport::Undeclared { name, line } => {
                self.report(
                    Severity::Error,
                    DiagnosticKind::UndeclaredIdentifier { name: name.clone() },
                    *line,
                );
            }
            UseReport::Uninitialized {
                name,
                line,
                declared_at_line,
            } => {
                self.report(
                    Severity::Warning,
                    DiagnosticKind::UninitializedUse {
                        name: name.clone(),
                        declared_at_line: *declared_at_line,
                    },
                    *line,
                );
            }
        }
        report
    }

    /// Assignment `name = <expr of type source>`. An allowed assignment marks
    /// the target initialized. Returns `None` if `name` is undeclared.
    pub fn assign(&mut self, name: &str, source: VarType, line: usize) -> Option<CompatibilityVerdict> {
        match self.table.check_assignment(name, source, line) {
            AssignmentReport::Undeclared { name, line } => {
                self.report(
                    Severity::Error,
                    DiagnosticKind::UndeclaredIdentifier { name },
                    line,
                );
                None
            }
            AssignmentReport::Checked {
                target,
                target_type,
                source_type,
                verdict,
                line,
            } => {
                if let Some(severity) = verdict.severity() {
                    self.report(
                        severity,
                        DiagnosticKind::Conversion {
                            name: name.to_string(),
                            target: target_type,
                            source: source_type,
                            verdict,
                        },
                        line,
                    );
                }
                if verdict.is_allowed() {
                    if let Some(sym) = self.table.get_mut(target) {
                        sym.initialized = true;
                    }
                }
                Some(verdict)
            }
        }
    }

    /// Record lexical errors: one per error token, plus the start of an
    /// unterminated block comment if the lexer saw one.
    pub fn lexical_errors(&mut self, tokens: &[Token<'_>], unterminated_comment: Option<SourceLocation>) {
        for token in tokens.iter().filter(|t| t.is_error()) {
            self.report(
                Severity::Error,
                DiagnosticKind::UnexpectedCharacter {
                    lexeme: token.lexeme.to_string(),
                    column: token.location.column,
                },
                token.location.line,
            );
        }
        if let Some(loc) = unterminated_comment {
            self.report(
                Severity::Warning,
                DiagnosticKind::UnterminatedComment { column: loc.column },
                loc.line,
            );
        }
    }

    fn report(&mut self, severity: Severity, kind: DiagnosticKind, line: usize) {
        let severity = if self.options.warnings_as_errors && severity == Severity::Warning {
            Severity::Error
        } else {
            severity
        };
        self.diagnostics.push(Diagnostic::new(severity, kind, line));
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::errors::ScopeError;

    #[test]
    fn test_redeclaration_is_error() {
        let mut analyzer = Analyzer::new();
        assert!(analyzer.declare("x", VarType::Int, true, 1).is_some());
        assert!(analyzer.declare("x", VarType::Float, true, 2).is_none());

        assert_eq!(analyzer.error_count(), 1);
        assert_eq!(
            analyzer.diagnostics()[0].kind,
            DiagnosticKind::Redeclaration {
                name: "x".to_string(),
                previous_line: 1
            }
        );
        assert_eq!(analyzer.diagnostics()[0].line, 2);
    }

    #[test]
    fn test_exit_global_scope_is_reported() {
        let mut analyzer = Analyzer::new();
        assert_eq!(analyzer.exit_scope(3), None);
        assert_eq!(
            analyzer.diagnostics()[0].kind,
            DiagnosticKind::Scope(ScopeError::PopGlobalScope)
        );
    }

    #[test]
    fn test_scope_depth_limit_is_reported() {
        let mut analyzer = Analyzer::with_options(AnalyzerOptions {
            max_scope_depth: 1,
            ..AnalyzerOptions::default()
        });
        assert_eq!(analyzer.enter_scope(1), Some(1));
        assert_eq!(analyzer.enter_scope(2), None);

        assert_eq!(analyzer.error_count(), 1);
        assert_eq!(
            analyzer.diagnostics()[0].kind,
            DiagnosticKind::Scope(ScopeError::DepthExceeded { limit: 1 })
        );
        assert_eq!(analyzer.diagnostics()[0].line, 2);
        assert_eq!(analyzer.table().current_level(), 1);
    }

    #[test]
    fn test_assignment_initializes_target() {
        let mut analyzer = Analyzer::new();
        analyzer.declare("f", VarType::Float, false, 1);

        assert_eq!(
            analyzer.assign("f", VarType::Int, 2),
            Some(CompatibilityVerdict::WideningIntToFloat)
        );
        assert!(matches!(analyzer.use_var("f", 3), UseReport::Ok(_)));
        assert_eq!(analyzer.warning_count(), 1);
    }

    #[test]
    fn test_rejected_assignment_leaves_target_uninitialized() {
        let mut analyzer = Analyzer::new();
        analyzer.declare("p", VarType::IntPtr, false, 1);

        assert_eq!(
            analyzer.assign("p", VarType::CharPtr, 2),
            Some(CompatibilityVerdict::IncompatiblePointerTypes)
        );
        assert!(matches!(analyzer.use_var("p", 3), UseReport::Uninitialized { .. }));
        assert_eq!(analyzer.error_count(), 1);
        assert_eq!(analyzer.warning_count(), 1);
    }

    #[test]
    fn test_info_is_neither_error_nor_warning() {
        let mut analyzer = Analyzer::new();
        analyzer.declare("c", VarType::Char, true, 1);
        analyzer.assign("c", VarType::Float, 2);

        assert_eq!(analyzer.diagnostics().len(), 1);
        assert_eq!(analyzer.diagnostics()[0].severity, Severity::Info);
        assert_eq!(analyzer.error_count() + analyzer.warning_count(), 0);
    }

    #[test]
    fn test_warnings_as_errors() {
        let mut analyzer = Analyzer::with_options(AnalyzerOptions {
            warnings_as_errors: true,
            ..AnalyzerOptions::default()
        });
        analyzer.declare("x", VarType::Int, false, 1);
        analyzer.use_var("x", 2);

        assert_eq!(analyzer.warning_count(), 0);
        assert_eq!(analyzer.error_count(), 1);
        assert!(analyzer.has_errors());
    }
}
