//! Scoped symbol table
//!
//! This module provides the declaration bookkeeping for semantic analysis:
//! - [`SymbolTable`]: all live declarations plus the scope stack
//! - [`Symbol`]: one declared identifier with its type and initialization state
//! - [`SymbolId`]: a stable handle returned by [`SymbolTable::declare`]
//!
//! # Storage
//!
//! Each live scope level owns an arena (`Vec<Symbol>`). A name index maps every
//! name to the handles of its live bindings, outermost first. Since a new
//! declaration always lands on the innermost level, each per-name list is
//! sorted by scope level and the visible binding is simply its last element.
//!
//! Leaving a scope drops that level's arena in one go and trims the name
//! index for exactly the names it declared.

use super::errors::{DeclError, ScopeError};
use super::types::{check_assignment_compatibility, CompatibilityVerdict, Severity, VarType};
use rustc_hash::FxHashMap;

/// Nesting limit used by [`SymbolTable::new`]
pub const DEFAULT_MAX_SCOPE_DEPTH: usize = 256;

/// A declared identifier
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub ty: VarType,
    scope_level: usize,
    pub initialized: bool,
    pub declared_at_line: usize,
}

impl Symbol {
    /// Depth of the scope the symbol was declared in (0 = global).
    pub fn scope_level(&self) -> usize {
        self.scope_level
    }
}

/// Handle to a symbol. Stays valid until the symbol's scope is popped; after
/// that it resolves to `None` even if a new scope reuses the same depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId {
    level: usize,
    serial: u64,
    slot: usize,
}

impl SymbolId {
    pub fn scope_level(&self) -> usize {
        self.level
    }
}

/// A declaration hid a binding from an enclosing scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shadowing {
    pub outer_level: usize,
    pub outer_line: usize,
}

/// Successful declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration {
    pub id: SymbolId,
    /// Set when the new symbol hides an outer one; non-fatal
    pub shadowed: Option<Shadowing>,
}

/// Outcome of checking a read of a variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UseReport {
    Ok(SymbolId),
    Undeclared {
        name: String,
        line: usize,
    },
    Uninitialized {
        name: String,
        line: usize,
        declared_at_line: usize,
    },
}

impl UseReport {
    /// `None` when the use is fine.
    pub fn severity(&self) -> Option<Severity> {
        match self {
            UseReport::Ok(_) => None,
            UseReport::Undeclared { .. } => Some(Severity::Error),
            UseReport::Uninitialized { .. } => Some(Severity::Warning),
        }
    }
}

/// Outcome of checking `name = <expr of type source>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentReport {
    Undeclared {
        name: String,
        line: usize,
    },
    Checked {
        target: SymbolId,
        target_type: VarType,
        source_type: VarType,
        verdict: CompatibilityVerdict,
        line: usize,
    },
}

#[derive(Debug, Clone)]
struct ScopeData {
    serial: u64,
    symbols: Vec<Symbol>,
}

impl ScopeData {
    fn new(serial: u64) -> Self {
        ScopeData {
            serial,
            symbols: Vec::new(),
        }
    }
}

/// Symbol table with lexical scoping
#[derive(Debug, Clone)]
pub struct SymbolTable {
    scopes: Vec<ScopeData>,
    index: FxHashMap<String, Vec<SymbolId>>,
    next_serial: u64,
    max_depth: usize,
}

impl SymbolTable {
    /// Create a table containing only the (empty) global scope.
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_SCOPE_DEPTH)
    }

    /// Create a table that refuses to nest deeper than `max_depth` levels
    /// below the global scope.
    pub fn with_max_depth(max_depth: usize) -> Self {
        SymbolTable {
            scopes: vec![ScopeData::new(0)],
            index: FxHashMap::default(),
            next_serial: 1,
            max_depth,
        }
    }

    /// Current scope depth (0 = global)
    pub fn current_level(&self) -> usize {
        self.scopes.len() - 1
    }

    /// Enter a new scope, returning its level
    pub fn push_scope(&mut self) -> Result<usize, ScopeError> {
        if self.current_level() >= self.max_depth {
            return Err(ScopeError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        let serial = self.next_serial;
        self.next_serial += 1;
        self.scopes.push(ScopeData::new(serial));
        Ok(self.current_level())
    }

    /// Exit the current scope, handing back every symbol declared in it
    pub fn pop_scope(&mut self) -> Result<Vec<Symbol>, ScopeError> {
        if self.scopes.len() == 1 {
            return Err(ScopeError::PopGlobalScope);
        }
        let scope = self.scopes.pop().ok_or(ScopeError::PopGlobalScope)?;

        // Each name declared here is the innermost entry of its index list
        for sym in &scope.symbols {
            if let Some(ids) = self.index.get_mut(&sym.name) {
                ids.pop();
                if ids.is_empty() {
                    self.index.remove(&sym.name);
                }
            }
        }

        Ok(scope.symbols)
    }

    /// Declare a symbol in the current scope
    pub fn declare(
        &mut self,
        name: &str,
        ty: VarType,
        initialized: bool,
        line: usize,
    ) -> Result<Declaration, DeclError> {
        if let Some(existing) = self.lookup_current_scope(name) {
            return Err(DeclError::DuplicateInCurrentScope {
                name: name.to_string(),
                line,
                previous_line: existing.declared_at_line,
            });
        }

        let shadowed = self.lookup(name).map(|outer| Shadowing {
            outer_level: outer.scope_level,
            outer_line: outer.declared_at_line,
        });

        let level = self.current_level();
        let scope = &mut self.scopes[level];
        let id = SymbolId {
            level,
            serial: scope.serial,
            slot: scope.symbols.len(),
        };
        scope.symbols.push(Symbol {
            name: name.to_string(),
            ty,
            scope_level: level,
            initialized,
            declared_at_line: line,
        });
        self.index.entry(name.to_string()).or_default().push(id);

        Ok(Declaration { id, shadowed })
    }

    /// Handle of the innermost live binding of `name`
    pub fn lookup_id(&self, name: &str) -> Option<SymbolId> {
        self.index.get(name).and_then(|ids| ids.last()).copied()
    }

    /// Innermost live binding of `name`
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.lookup_id(name).and_then(|id| self.get(id))
    }

    /// Binding of `name` in the current scope only
    pub fn lookup_current_scope(&self, name: &str) -> Option<&Symbol> {
        self.lookup(name)
            .filter(|sym| sym.scope_level == self.current_level())
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.scopes
            .get(id.level)
            .filter(|scope| scope.serial == id.serial)
            .and_then(|scope| scope.symbols.get(id.slot))
    }

    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.scopes
            .get_mut(id.level)
            .filter(|scope| scope.serial == id.serial)
            .and_then(|scope| scope.symbols.get_mut(id.slot))
    }

    /// Mark the visible binding of `name` as initialized. Returns `false` if
    /// no such binding exists.
    pub fn mark_initialized(&mut self, name: &str) -> bool {
        match self.lookup_id(name).and_then(|id| self.get_mut(id)) {
            Some(sym) => {
                sym.initialized = true;
                true
            }
            None => false,
        }
    }

    /// Check a read of `name` at `line`
    pub fn check_use(&self, name: &str, line: usize) -> UseReport {
        let Some(id) = self.lookup_id(name) else {
            return UseReport::Undeclared {
                name: name.to_string(),
                line,
            };
        };
        match self.get(id) {
            Some(sym) if !sym.initialized => UseReport::Uninitialized {
                name: name.to_string(),
                line,
                declared_at_line: sym.declared_at_line,
            },
            Some(_) => UseReport::Ok(id),
            None => UseReport::Undeclared {
                name: name.to_string(),
                line,
            },
        }
    }

    /// Check `name = <expr of type source>` at `line`
    pub fn check_assignment(&self, name: &str, source: VarType, line: usize) -> AssignmentReport {
        match self.lookup_id(name).and_then(|id| Some((id, self.get(id)?))) {
            Some((id, sym)) => AssignmentReport::Checked {
                target: id,
                target_type: sym.ty,
                source_type: source,
                verdict: check_assignment_compatibility(sym.ty, source),
                line,
            },
            None => AssignmentReport::Undeclared {
                name: name.to_string(),
                line,
            },
        }
    }

    /// Number of live symbols across all scopes
    pub fn len(&self) -> usize {
        self.scopes.iter().map(|scope| scope.symbols.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All live symbols, outermost scope first, in declaration order
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.scopes.iter().flat_map(|scope| scope.symbols.iter())
    }

    /// Live symbols not hidden by an inner declaration
    pub fn visible(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols()
            .filter(move |sym| self.lookup(&sym.name).is_some_and(|v| std::ptr::eq(v, *sym)))
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_lookup() {
        let mut table = SymbolTable::new();
        table.declare("x", VarType::Int, true, 1).unwrap();
        table.declare("y", VarType::Float, true, 2).unwrap();
        table.declare("ch", VarType::Char, false, 3).unwrap();
        table.declare("ptr", VarType::IntPtr, true, 4).unwrap();

        assert_eq!(table.lookup("x").map(|s| s.ty), Some(VarType::Int));
        assert_eq!(table.lookup("y").map(|s| s.ty), Some(VarType::Float));
        assert!(table.lookup("z").is_none());
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_nested_shadowing() {
        let mut table = SymbolTable::new();
        table.declare("x", VarType::Int, true, 1).unwrap();
        table.declare("y", VarType::Int, true, 2).unwrap();

        assert_eq!(table.push_scope(), Ok(1));
        let decl = table.declare("x", VarType::Float, true, 4).unwrap();
        assert_eq!(
            decl.shadowed,
            Some(Shadowing {
                outer_level: 0,
                outer_line: 1
            })
        );
        table.declare("z", VarType::Int, true, 5).unwrap();

        assert_eq!(table.push_scope(), Ok(2));
        let decl = table.declare("x", VarType::Char, true, 7).unwrap();
        assert_eq!(decl.shadowed.map(|s| s.outer_level), Some(1));
        assert_eq!(table.lookup("x").map(|s| (s.ty, s.scope_level())), Some((VarType::Char, 2)));

        table.pop_scope().unwrap();
        assert_eq!(table.lookup("x").map(|s| (s.ty, s.scope_level())), Some((VarType::Float, 1)));

        let dropped = table.pop_scope().unwrap();
        assert_eq!(dropped.len(), 2);
        assert_eq!(table.lookup("x").map(|s| (s.ty, s.scope_level())), Some((VarType::Int, 0)));
        assert!(table.lookup("z").is_none());
        assert_eq!(table.current_level(), 0);
    }

    #[test]
    fn test_duplicate_in_same_scope() {
        let mut table = SymbolTable::new();
        table.declare("x", VarType::Int, true, 1).unwrap();
        let err = table.declare("x", VarType::Float, true, 2).unwrap_err();

        assert_eq!(
            err,
            DeclError::DuplicateInCurrentScope {
                name: "x".to_string(),
                line: 2,
                previous_line: 1
            }
        );
        assert_eq!(table.lookup("x").map(|s| s.ty), Some(VarType::Int));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_pop_global_scope_fails() {
        let mut table = SymbolTable::new();
        assert_eq!(table.pop_scope(), Err(ScopeError::PopGlobalScope));
        assert_eq!(table.current_level(), 0);
    }

    #[test]
    fn test_depth_limit() {
        let mut table = SymbolTable::with_max_depth(2);
        assert_eq!(table.push_scope(), Ok(1));
        assert_eq!(table.push_scope(), Ok(2));
        assert_eq!(table.push_scope(), Err(ScopeError::DepthExceeded { limit: 2 }));
        assert_eq!(table.current_level(), 2);
    }

    #[test]
    fn test_stale_handle_after_pop() {
        let mut table = SymbolTable::new();
        table.push_scope().unwrap();
        let old = table.declare("tmp", VarType::Int, true, 1).unwrap().id;
        table.pop_scope().unwrap();

        table.push_scope().unwrap();
        let new = table.declare("other", VarType::Char, true, 2).unwrap().id;

        assert!(table.get(old).is_none());
        assert_eq!(table.get(new).map(|s| s.name.as_str()), Some("other"));
    }

    #[test]
    fn test_check_use() {
        let mut table = SymbolTable::new();
        table.declare("y", VarType::Char, false, 1).unwrap();

        assert_eq!(
            table.check_use("y", 3),
            UseReport::Uninitialized {
                name: "y".to_string(),
                line: 3,
                declared_at_line: 1
            }
        );
        assert!(table.mark_initialized("y"));
        assert!(matches!(table.check_use("y", 4), UseReport::Ok(_)));
        assert_eq!(table.check_use("nope", 5).severity(), Some(Severity::Error));
        assert!(!table.mark_initialized("nope"));
    }

    #[test]
    fn test_check_assignment() {
        let mut table = SymbolTable::new();
        table.declare("iptr", VarType::IntPtr, true, 1).unwrap();

        match table.check_assignment("iptr", VarType::FloatPtr, 2) {
            AssignmentReport::Checked { verdict, target_type, .. } => {
                assert_eq!(target_type, VarType::IntPtr);
                assert_eq!(verdict, CompatibilityVerdict::IncompatiblePointerTypes);
            }
            other => panic!("Expected checked assignment, got {:?}", other),
        }
        assert!(matches!(
            table.check_assignment("missing", VarType::Int, 3),
            AssignmentReport::Undeclared { line: 3, .. }
        ));
    }

    #[test]
    fn test_visible_hides_shadowed() {
        let mut table = SymbolTable::new();
        table.declare("x", VarType::Int, true, 1).unwrap();
        table.declare("y", VarType::Int, true, 2).unwrap();
        table.push_scope().unwrap();
        table.declare("x", VarType::Float, true, 3).unwrap();

        let visible: Vec<(&str, VarType)> = table.visible().map(|s| (s.name.as_str(), s.ty)).collect();
        assert_eq!(visible, vec![("y", VarType::Int), ("x", VarType::Float)]);
        assert_eq!(table.symbols().count(), 3);
    }
}
