//! The scanner: source text in, tokens out.
//!
//! One token per [`Scanner::next_token`] call. Dispatch is greedy on
//! the token's first character, with one byte of lookahead for the
//! two-character operators. Specialized lexing lives in the sibling
//! modules (`identifier`, `number`, `string`, `operator`).

use nupy_util::Handler;

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

mod identifier;
mod number;
mod operator;
mod string;

/// Streaming tokenizer for nuPy source.
///
/// # Example
///
/// ```
/// use nupy_lex::{Scanner, TokenKind};
/// use nupy_util::Handler;
///
/// let mut handler = Handler::silent();
/// let mut scanner = Scanner::new("while i < 3:", &mut handler);
///
/// assert_eq!(scanner.next_token().kind, TokenKind::While);
/// assert_eq!(scanner.next_token().kind, TokenKind::Identifier);
/// assert_eq!(scanner.next_token().kind, TokenKind::Less);
/// ```
pub struct Scanner<'a> {
    /// Character cursor over the source.
    pub(crate) cursor: Cursor<'a>,

    /// Diagnostic handler for lexical warnings.
    pub(crate) handler: &'a mut Handler,

    /// Line where the current token starts (1-based).
    pub(crate) token_line: u32,

    /// Column where the current token starts (1-based).
    pub(crate) token_col: u32,

    /// Latched once the end sentinel has been emitted.
    done: bool,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned at (line 1, column 1) with an
    /// empty lexeme buffer.
    pub fn new(source: &'a str, handler: &'a mut Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_line: 1,
            token_col: 1,
            done: false,
        }
    }

    /// Consumes input and returns exactly one token.
    ///
    /// The end sentinel `Eos` is emitted at physical end of input and
    /// for a literal `$` byte; once emitted, every later call returns
    /// `Eos` again.
    pub fn next_token(&mut self) -> Token {
        if self.done {
            return self.eos();
        }

        self.skip_whitespace_and_comments();

        self.token_line = self.cursor.line();
        self.token_col = self.cursor.column();

        if self.cursor.is_at_end() || self.cursor.current_char() == '$' {
            self.done = true;
            return self.eos();
        }

        match self.cursor.current_char() {
            '(' => self.punct(TokenKind::LeftParen),
            ')' => self.punct(TokenKind::RightParen),
            '[' => self.punct(TokenKind::LeftBracket),
            ']' => self.punct(TokenKind::RightBracket),
            '{' => self.punct(TokenKind::LeftBrace),
            '}' => self.punct(TokenKind::RightBrace),
            ':' => self.punct(TokenKind::Colon),
            '&' => self.punct(TokenKind::Ampersand),
            '+' => self.punct(TokenKind::Plus),
            '-' => self.punct(TokenKind::Minus),
            '%' => self.punct(TokenKind::Percent),
            '/' => self.punct(TokenKind::Slash),

            // One byte of lookahead: **, ==, !=, <=, >=
            '*' => self.lex_star(),
            '=' => self.lex_equals(),
            '!' => self.lex_bang(),
            '<' => self.lex_less(),
            '>' => self.lex_greater(),

            '\'' | '"' => self.lex_string(),

            c if c.is_ascii_digit() || c == '.' => self.lex_number(),

            c if c == '_' || c.is_ascii_alphabetic() => self.lex_identifier(),

            c => {
                self.cursor.advance();
                self.token(TokenKind::Unknown, c.to_string())
            }
        }
    }

    /// Skips whitespace and line comments.
    ///
    /// A `#` discards everything up to, but not including, the
    /// newline; the newline is then consumed by the whitespace rule,
    /// which is where line/column bookkeeping happens.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            let c = self.cursor.current_char();
            if c == '#' {
                while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                    self.cursor.advance();
                }
            } else if !self.cursor.is_at_end() && c.is_whitespace() {
                self.cursor.advance();
            } else {
                break;
            }
        }
    }

    /// Emits a single-character punctuation token.
    fn punct(&mut self, kind: TokenKind) -> Token {
        let c = self.cursor.current_char();
        self.cursor.advance();
        self.token(kind, c.to_string())
    }

    /// Builds a token at the recorded start position.
    pub(crate) fn token(&self, kind: TokenKind, lexeme: impl Into<String>) -> Token {
        Token::new(kind, self.token_line, self.token_col, lexeme)
    }

    fn eos(&self) -> Token {
        self.token(TokenKind::Eos, "$")
    }
}

/// Iterates tokens up to and including the end sentinel.
impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            None
        } else {
            Some(self.next_token())
        }
    }
}
