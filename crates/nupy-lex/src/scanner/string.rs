//! String literal lexing.

use nupy_util::Diag;

use crate::scanner::Scanner;
use crate::token::{Token, TokenKind};

impl Scanner<'_> {
    /// Lexes a string literal.
    ///
    /// The literal opens with `'` or `"` and closes with the same
    /// quote; the lexeme is the content without the quotes. There are
    /// no escape sequences.
    ///
    /// If a newline or end of input arrives before the closing quote,
    /// a warning positioned at the opening quote is reported, the
    /// terminating byte is left unconsumed, and the partial content is
    /// still emitted as a `StrLit`.
    pub(crate) fn lex_string(&mut self) -> Token {
        let quote = self.cursor.current_char();
        self.cursor.advance();

        let start = self.cursor.position();
        loop {
            if self.cursor.is_at_end() || self.cursor.current_char() == '\n' {
                self.handler.emit(Diag::UnterminatedString {
                    line: self.token_line,
                    col: self.token_col,
                });
                return self.token(TokenKind::StrLit, self.cursor.slice_from(start));
            }
            if self.cursor.current_char() == quote {
                break;
            }
            self.cursor.advance();
        }

        let content = self.cursor.slice_from(start);
        self.cursor.advance();
        self.token(TokenKind::StrLit, content)
    }
}
