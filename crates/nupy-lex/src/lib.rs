//! nupy-lex - Lexical Scanner
//!
//! The first phase of the nuPy interpreter: a streaming tokenizer that
//! classifies source bytes into a fixed token vocabulary while
//! tracking 1-based line/column positions.
//!
//! The scanner is direct-coded: a single dispatch on the first
//! character of each token, with one-byte lookahead for the
//! two-character operators and no further backtracking. Malformed
//! string literals are recovered from: a warning is reported through
//! the shared diagnostic [`Handler`](nupy_util::Handler) and the
//! partial content is still emitted as a token.
//!
//! # Example
//!
//! ```
//! use nupy_lex::{Scanner, TokenKind};
//! use nupy_util::Handler;
//!
//! let mut handler = Handler::silent();
//! let mut scanner = Scanner::new("x = 42", &mut handler);
//!
//! assert_eq!(scanner.next_token().kind, TokenKind::Identifier);
//! assert_eq!(scanner.next_token().kind, TokenKind::Equal);
//! assert_eq!(scanner.next_token().kind, TokenKind::IntLit);
//! assert_eq!(scanner.next_token().kind, TokenKind::Eos);
//! ```

pub mod cursor;
pub mod scanner;
pub mod token;

mod edge_cases;

pub use cursor::Cursor;
pub use scanner::Scanner;
pub use token::{keyword_from_lexeme, Token, TokenKind, KEYWORDS};
