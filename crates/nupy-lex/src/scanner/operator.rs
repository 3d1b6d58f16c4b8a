//! Operator lexing.
//!
//! The compound operators `**`, `==`, `!=`, `<=`, `>=` are recognized
//! with a single byte of lookahead.

use crate::scanner::Scanner;
use crate::token::{Token, TokenKind};

impl Scanner<'_> {
    /// Lexes `*` or `**`.
    pub(crate) fn lex_star(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('*') {
            self.token(TokenKind::Power, "**")
        } else {
            self.token(TokenKind::Asterisk, "*")
        }
    }

    /// Lexes `=` or `==`.
    pub(crate) fn lex_equals(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.token(TokenKind::EqualEqual, "==")
        } else {
            self.token(TokenKind::Equal, "=")
        }
    }

    /// Lexes `!=`; a bare `!` is not part of the language.
    pub(crate) fn lex_bang(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.token(TokenKind::NotEqual, "!=")
        } else {
            self.token(TokenKind::Unknown, "!")
        }
    }

    /// Lexes `<` or `<=`.
    pub(crate) fn lex_less(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.token(TokenKind::LessEqual, "<=")
        } else {
            self.token(TokenKind::Less, "<")
        }
    }

    /// Lexes `>` or `>=`.
    pub(crate) fn lex_greater(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.token(TokenKind::GreaterEqual, ">=")
        } else {
            self.token(TokenKind::Greater, ">")
        }
    }
}
