//! Integer and real literal lexing.

use crate::scanner::Scanner;
use crate::token::{Token, TokenKind};

impl Scanner<'_> {
    /// Lexes an integer or real literal.
    ///
    /// Grammar: `digits ('.' digits)?` or `'.' digits`. A dot is only
    /// consumed when a digit follows it, so a trailing dot is left for
    /// the next token and a bare `.` scans as `Unknown`. A second dot
    /// terminates the literal.
    pub(crate) fn lex_number(&mut self) -> Token {
        let start = self.cursor.position();

        if self.cursor.current_char() == '.' {
            if !self.cursor.peek_char(1).is_ascii_digit() {
                self.cursor.advance();
                return self.token(TokenKind::Unknown, ".");
            }
            self.cursor.advance();
            self.consume_digits();
            return self.token(TokenKind::RealLit, self.cursor.slice_from(start));
        }

        self.consume_digits();

        if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            self.cursor.advance();
            self.consume_digits();
            return self.token(TokenKind::RealLit, self.cursor.slice_from(start));
        }

        self.token(TokenKind::IntLit, self.cursor.slice_from(start))
    }

    fn consume_digits(&mut self) {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }
    }
}
