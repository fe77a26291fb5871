// Integration tests for the tokenizer

use cfront::lexer::{Lexer, SourceLocation, Token, TokenKind};
use std::fs;
use std::path::Path;

fn kinds(tokens: &[Token<'_>]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn test_tokenization_is_deterministic() {
    let source = "int add(int a, int b) {\n    return a + b;\n} /* tail */";

    let first = Lexer::new(source).tokenize();
    let second = Lexer::new(source).tokenize();

    assert_eq!(first, second);
}

#[test]
fn test_maximal_munch_identifier() {
    let tokens = Lexer::new("return123abc").tokenize();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].lexeme, "return123abc");
    assert_eq!(tokens[1].kind, TokenKind::Eof);
}

#[test]
fn test_number_then_identifier() {
    let tokens = Lexer::new("123abc").tokenize();

    assert!(matches!(tokens[0], Token { kind: TokenKind::IntLiteral, lexeme: "123", .. }));
    assert!(matches!(tokens[1], Token { kind: TokenKind::Identifier, lexeme: "abc", .. }));
}

#[test]
fn test_positions_are_monotonic() {
    let source = "int x = 1;\n\n  // skip\n  return x /* c */ ;\n@";
    let tokens = Lexer::new(source).tokenize();

    for pair in tokens.windows(2) {
        assert!(
            pair[0].location <= pair[1].location,
            "{} at {} comes after {} at {}",
            pair[0],
            pair[0].location,
            pair[1],
            pair[1].location
        );
        assert!(pair[0].span.end <= pair[1].span.start);
    }
    assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1);
    assert!(tokens.last().is_some_and(|t| t.is_eof()));
}

#[test]
fn test_comment_stripping() {
    let with_comment = Lexer::new("int x; // comment\n return x;").tokenize();
    let without_comment = Lexer::new("int x;\n return x;").tokenize();

    assert_eq!(kinds(&with_comment), kinds(&without_comment));
    assert!(with_comment.iter().all(|t| t.lexeme != "comment"));
}

#[test]
fn test_float_is_not_a_keyword() {
    let tokens = Lexer::new("int x = 42; float y = x;").tokenize();

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::KwInt,
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::IntLiteral,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
    assert_eq!(tokens[5].lexeme, "float");
    assert_eq!(tokens[6].lexeme, "y");
    assert_eq!(tokens[8].lexeme, "x");
}

#[test]
fn test_expression_with_all_operators() {
    let tokens = Lexer::new("result = 3 + 4 * 2 - z;").tokenize();
    let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme).collect();

    assert_eq!(
        lexemes,
        vec!["result", "=", "3", "+", "4", "*", "2", "-", "z", ";", ""]
    );
    assert!(tokens.iter().all(|t| !t.is_error()));
}

#[test]
fn test_division_is_not_in_the_subset() {
    let tokens = Lexer::new("q = a / b; // halve\n").tokenize();

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Identifier,
            TokenKind::Error,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
    assert_eq!(tokens[3].lexeme, "/");
    assert!(tokens.iter().all(|t| t.kind != TokenKind::Slash));
}

#[test]
fn test_unknown_characters_become_error_tokens() {
    let tokens = Lexer::new("int a, b;").tokenize();

    assert_eq!(tokens[2].kind, TokenKind::Error);
    assert_eq!(tokens[2].lexeme, ",");
    assert_eq!(tokens[2].location, SourceLocation::new(1, 6));
    // Lexing continues after the error
    assert!(matches!(tokens[3], Token { kind: TokenKind::Identifier, lexeme: "b", .. }));
}

#[test]
fn test_demo_file_tokenizes_cleanly() {
    let path = Path::new("demos/scopes.c");
    let source = fs::read_to_string(path).expect("Failed to read demo file");

    let mut lexer = Lexer::new(&source);
    let tokens = lexer.tokenize();

    assert!(tokens.iter().all(|t| !t.is_error()), "unexpected error token");
    assert!(lexer.unterminated_comment().is_none());
    assert_eq!(
        tokens.iter().filter(|t| t.kind == TokenKind::LBrace).count(),
        tokens.iter().filter(|t| t.kind == TokenKind::RBrace).count()
    );
}
