//! Identifier and keyword lexing.

use crate::scanner::Scanner;
use crate::token::{keyword_from_lexeme, Token, TokenKind};

/// Characters that may continue an identifier.
fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

impl Scanner<'_> {
    /// Lexes an identifier or keyword.
    ///
    /// Identifiers match `[A-Za-z_][A-Za-z0-9_]*`. Once collected, the
    /// lexeme is matched case-sensitively against the keyword table;
    /// on a hit the keyword kind is emitted instead of `Identifier`.
    pub(crate) fn lex_identifier(&mut self) -> Token {
        let start = self.cursor.position();

        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(start);
        match keyword_from_lexeme(text) {
            Some(kind) => self.token(kind, text),
            None => self.token(TokenKind::Identifier, text),
        }
    }
}
