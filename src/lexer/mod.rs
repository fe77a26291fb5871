//! Lexer (tokenizer) for the C subset
//!
//! Converts raw source text into a flat [`Token`] stream terminated by a single
//! [`TokenKind::Eof`] token. Scanning is single-pass with one character of
//! lookahead and maximal munch for identifiers and integer literals.
//!
//! # Token set
//!
//! - Keywords: `int`, `return`
//! - Identifiers: `[a-zA-Z_][a-zA-Z0-9_]*`
//! - Integer literals: `[0-9]+`
//! - Operators: `+ - * =`
//! - Punctuation: `; ( ) { }`
//!
//! Whitespace, `//` line comments and `/* */` block comments are skipped. A
//! `/` that opens neither is not an operator of this subset.
//! Lexing never fails: any other character comes out as a one-character
//! [`TokenKind::Error`] token so the caller decides whether to stop or keep
//! collecting errors.

pub mod token;

pub use token::{keyword, SourceLocation, Span, Token, TokenKind};

/// Lexer for C-subset source code.
///
/// The lexer borrows the source for its whole lifetime; every token it hands
/// out borrows the same buffer.
pub struct Lexer<'src> {
    source: &'src str,
    position: usize,
    line: usize,
    column: usize,
    unterminated_comment: Option<SourceLocation>,
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source string.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
            unterminated_comment: None,
            finished: false,
        }
    }

    /// Tokenize the rest of the input, up to and including the `Eof` token.
    pub fn tokenize(&mut self) -> Vec<Token<'src>> {
        self.by_ref().collect()
    }

    /// Produce the next token.
    ///
    /// Once the input is exhausted every call returns an `Eof` token at the
    /// end position.
    pub fn next_token(&mut self) -> Token<'src> {
        self.skip_whitespace_and_comments();

        let start = self.position;
        let loc = self.current_location();
        let ch = match self.advance() {
            Some(ch) => ch,
            None => return Token::new(TokenKind::Eof, "", Span::new(start, start), loc),
        };

        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '=' => TokenKind::Assign,
            ';' => TokenKind::Semicolon,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,

            '0'..='9' => {
                self.consume_while(|c| c.is_ascii_digit());
                TokenKind::IntLiteral
            }

            'a'..='z' | 'A'..='Z' | '_' => {
                self.consume_while(|c| c.is_ascii_alphanumeric() || c == '_');
                keyword(&self.source[start..self.position]).unwrap_or(TokenKind::Identifier)
            }

            _ => TokenKind::Error,
        };

        let span = Span::new(start, self.position);
        Token::new(kind, &self.source[start..self.position], span, loc)
    }

    /// Start of a block comment that ran off the end of the input, if any.
    ///
    /// The comment body is still consumed silently; drivers that want to treat
    /// this as a lexical error can check here after tokenizing.
    pub fn unterminated_comment(&self) -> Option<SourceLocation> {
        self.unterminated_comment
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') => match self.peek_ahead(1) {
                    Some('/') => self.skip_line_comment(),
                    Some('*') => self.skip_block_comment(),
                    _ => break,
                },
                _ => break,
            }
        }
    }

    /// Skip single-line comment (// ...), leaving the newline in place
    fn skip_line_comment(&mut self) {
        self.consume_while(|c| c != '\n');
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return;
            }
            self.advance();
        }

        self.unterminated_comment = Some(start_loc);
    }

    fn consume_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.source[self.position..].chars().nth(n)
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Yields every token including the final `Eof`, then `None`.
impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Token<'src>> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.is_eof() {
            self.finished = true;
        }
        Some(token)
    }
}
