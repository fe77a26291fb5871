//! Token definitions for the C-subset lexer
//!
//! Tokens borrow their lexeme straight out of the source buffer, so there is
//! no length limit on identifiers or literals and no copying while scanning.

use std::fmt;

/// Source location information for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Byte range of a lexeme within the source (`start..end`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    KwInt,
    KwReturn,

    Identifier,
    IntLiteral,

    // Operators
    Plus,   // +
    Minus,  // -
    Star,   // *
    Slash,  // / (never produced: a lone `/` lexes as Error)
    Assign, // =

    // Punctuation
    Semicolon, // ;
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }

    Eof,
    Error,
}

impl TokenKind {
    /// Upper-case name used in token tables (`KW_INT`, `IDENTIFIER`, ...).
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::KwInt => "KW_INT",
            TokenKind::KwReturn => "KW_RETURN",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::IntLiteral => "INT_LITERAL",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Eof => "EOF",
            TokenKind::Error => "ERROR",
        }
    }

    pub fn is_keyword(self) -> bool {
        matches!(self, TokenKind::KwInt | TokenKind::KwReturn)
    }

    pub fn is_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Assign
        )
    }

    pub fn is_punctuation(self) -> bool {
        matches!(
            self,
            TokenKind::Semicolon
                | TokenKind::LParen
                | TokenKind::RParen
                | TokenKind::LBrace
                | TokenKind::RBrace
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keyword table. Identifiers are scanned first and then looked up here, so
/// adding a keyword is a one-line change.
const KEYWORDS: &[(&str, TokenKind)] = &[("int", TokenKind::KwInt), ("return", TokenKind::KwReturn)];

/// Classify a scanned identifier as a keyword, if it is one.
pub fn keyword(ident: &str) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|(text, _)| *text == ident)
        .map(|(_, kind)| *kind)
}

/// A single lexical unit.
///
/// Tokens are immutable once produced; the lexeme is a slice of the source the
/// lexer was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    pub span: Span,
    pub location: SourceLocation,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, lexeme: &'src str, span: Span, location: SourceLocation) -> Self {
        Token {
            kind,
            lexeme,
            span,
            location,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::IntLiteral => write!(f, "int literal {}", self.lexeme),
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::Error => write!(f, "unexpected character '{}'", self.lexeme.escape_default()),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}
