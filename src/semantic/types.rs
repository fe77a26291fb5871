//! Mini type system and assignment compatibility
//!
//! The type system is a closed set of eight types: three numeric scalars,
//! a pointer to each of them, `void` and an `unknown` placeholder. There are no
//! structural or function types; the only question it answers is whether a
//! value of one type may be assigned to a variable of another.
//!
//! # Compatibility rules
//!
//! [`check_assignment_compatibility`] walks the rules below in order and stops
//! at the first match:
//!
//! | # | target ← source                  | verdict                      | severity |
//! |---|----------------------------------|------------------------------|----------|
//! | 1 | same type                        | `Exact`                      | —        |
//! | 2 | pointer ← different pointer      | `IncompatiblePointerTypes`   | error    |
//! | 3 | pointer ↔ numeric                | `PointerNumericMismatch`     | error    |
//! | 4 | `int` ← `float`                  | `NarrowingFloatToInt`        | warning  |
//! | 5 | `float` ← `int`                  | `WideningIntToFloat`         | warning  |
//! | 6 | `int` ↔ `char`                   | `CharIntConversion`          | warning  |
//! | 7 | any other numeric pair           | `ImplicitNumericConversion`  | info     |
//! | 8 | anything else                    | `IncompatibleTypes`          | error    |

use crate::lexer::{Token, TokenKind};
use std::fmt;

/// Types known to the semantic checker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarType {
    Int,
    Float,
    Char,
    IntPtr,
    FloatPtr,
    CharPtr,
    Void,
    Unknown,
}

impl VarType {
    pub fn is_pointer(self) -> bool {
        matches!(self, VarType::IntPtr | VarType::FloatPtr | VarType::CharPtr)
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, VarType::Int | VarType::Float | VarType::Char)
    }

    /// Type of `&x` for an `x` of this type
    pub fn pointer_to(self) -> Option<VarType> {
        match self {
            VarType::Int => Some(VarType::IntPtr),
            VarType::Float => Some(VarType::FloatPtr),
            VarType::Char => Some(VarType::CharPtr),
            _ => None,
        }
    }

    /// Type of `*p` for a `p` of this type
    pub fn pointee(self) -> Option<VarType> {
        match self {
            VarType::IntPtr => Some(VarType::Int),
            VarType::FloatPtr => Some(VarType::Float),
            VarType::CharPtr => Some(VarType::Char),
            _ => None,
        }
    }

    /// Type of a literal token. Only integer literals exist in the token set.
    pub fn of_literal(token: &Token<'_>) -> Option<VarType> {
        match token.kind {
            TokenKind::IntLiteral => Some(VarType::Int),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VarType::Int => "int",
            VarType::Float => "float",
            VarType::Char => "char",
            VarType::IntPtr => "int*",
            VarType::FloatPtr => "float*",
            VarType::CharPtr => "char*",
            VarType::Void => "void",
            VarType::Unknown => "<unknown>",
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How serious a finding is. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Result of classifying an assignment `target = source` by type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompatibilityVerdict {
    Exact,
    IncompatiblePointerTypes,
    PointerNumericMismatch,
    NarrowingFloatToInt,
    WideningIntToFloat,
    CharIntConversion,
    ImplicitNumericConversion,
    IncompatibleTypes,
}

impl CompatibilityVerdict {
    /// `None` for an exact match, otherwise the severity of the finding.
    pub fn severity(self) -> Option<Severity> {
        match self {
            CompatibilityVerdict::Exact => None,
            CompatibilityVerdict::ImplicitNumericConversion => Some(Severity::Info),
            CompatibilityVerdict::NarrowingFloatToInt
            | CompatibilityVerdict::WideningIntToFloat
            | CompatibilityVerdict::CharIntConversion => Some(Severity::Warning),
            CompatibilityVerdict::IncompatiblePointerTypes
            | CompatibilityVerdict::PointerNumericMismatch
            | CompatibilityVerdict::IncompatibleTypes => Some(Severity::Error),
        }
    }

    /// Whether the assignment is legal without a cast (possibly with a warning).
    pub fn is_allowed(self) -> bool {
        self.severity() != Some(Severity::Error)
    }
}

/// Classify assigning a value of type `source` to a variable of type `target`.
pub fn check_assignment_compatibility(target: VarType, source: VarType) -> CompatibilityVerdict {
    use CompatibilityVerdict::*;

    if target == source {
        return Exact;
    }

    if target.is_pointer() && source.is_pointer() {
        return IncompatiblePointerTypes;
    }

    if (target.is_pointer() && source.is_numeric()) || (target.is_numeric() && source.is_pointer()) {
        return PointerNumericMismatch;
    }

    match (target, source) {
        (VarType::Int, VarType::Float) => NarrowingFloatToInt,
        (VarType::Float, VarType::Int) => WideningIntToFloat,
        (VarType::Int, VarType::Char) | (VarType::Char, VarType::Int) => CharIntConversion,
        _ if target.is_numeric() && source.is_numeric() => ImplicitNumericConversion,
        _ => IncompatibleTypes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{SourceLocation, Span};
    use CompatibilityVerdict::*;

    #[test]
    fn test_same_type_is_exact() {
        for ty in [VarType::Int, VarType::CharPtr, VarType::Void, VarType::Unknown] {
            assert_eq!(check_assignment_compatibility(ty, ty), Exact);
        }
    }

    #[test]
    fn test_pointer_rules() {
        assert_eq!(check_assignment_compatibility(VarType::IntPtr, VarType::FloatPtr), IncompatiblePointerTypes);
        assert_eq!(check_assignment_compatibility(VarType::CharPtr, VarType::IntPtr), IncompatiblePointerTypes);
        assert_eq!(check_assignment_compatibility(VarType::IntPtr, VarType::Int), PointerNumericMismatch);
        assert_eq!(check_assignment_compatibility(VarType::Char, VarType::FloatPtr), PointerNumericMismatch);
    }

    #[test]
    fn test_numeric_conversions() {
        assert_eq!(check_assignment_compatibility(VarType::Int, VarType::Float), NarrowingFloatToInt);
        assert_eq!(check_assignment_compatibility(VarType::Float, VarType::Int), WideningIntToFloat);
        assert_eq!(check_assignment_compatibility(VarType::Int, VarType::Char), CharIntConversion);
        assert_eq!(check_assignment_compatibility(VarType::Char, VarType::Int), CharIntConversion);
        assert_eq!(check_assignment_compatibility(VarType::Float, VarType::Char), ImplicitNumericConversion);
        assert_eq!(check_assignment_compatibility(VarType::Char, VarType::Float), ImplicitNumericConversion);
    }

    #[test]
    fn test_void_and_unknown_are_incompatible() {
        assert_eq!(check_assignment_compatibility(VarType::Int, VarType::Void), IncompatibleTypes);
        assert_eq!(check_assignment_compatibility(VarType::Void, VarType::IntPtr), IncompatibleTypes);
        assert_eq!(check_assignment_compatibility(VarType::Unknown, VarType::Float), IncompatibleTypes);
    }

    #[test]
    fn test_verdict_severity() {
        assert_eq!(Exact.severity(), None);
        assert_eq!(ImplicitNumericConversion.severity(), Some(Severity::Info));
        assert_eq!(CharIntConversion.severity(), Some(Severity::Warning));
        assert_eq!(PointerNumericMismatch.severity(), Some(Severity::Error));
        assert!(WideningIntToFloat.is_allowed());
        assert!(!IncompatibleTypes.is_allowed());
    }

    #[test]
    fn test_pointer_helpers() {
        assert_eq!(VarType::Float.pointer_to(), Some(VarType::FloatPtr));
        assert_eq!(VarType::IntPtr.pointer_to(), None);
        assert_eq!(VarType::CharPtr.pointee(), Some(VarType::Char));
        assert_eq!(VarType::FloatPtr.to_string(), "float*");
    }

    #[test]
    fn test_literal_type() {
        let lit = Token::new(TokenKind::IntLiteral, "42", Span::new(0, 2), SourceLocation::new(1, 1));
        let ident = Token::new(TokenKind::Identifier, "x", Span::new(0, 1), SourceLocation::new(1, 1));
        assert_eq!(VarType::of_literal(&lit), Some(VarType::Int));
        assert_eq!(VarType::of_literal(&ident), None);
    }
}
