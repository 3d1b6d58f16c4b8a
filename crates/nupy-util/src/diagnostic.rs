//! Diagnostic reporting infrastructure.
//!
//! Every user-visible message the scanner or the executor can produce
//! is a variant of [`Diag`]. The rendered text is part of the external
//! interface and must not drift, so each variant carries its exact
//! message as a `#[error]` attribute and `Display` is derived from it.

use std::fmt;

use thiserror::Error;

/// Diagnostic severity level.
///
/// # Examples
///
/// ```
/// use nupy_util::Level;
///
/// assert_eq!(format!("{}", Level::Error), "error");
/// assert_eq!(format!("{}", Level::Warning), "warning");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Non-fatal; processing continues.
    Warning,
    /// Fatal to the current execution; processing stops.
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Warning => write!(f, "warning"),
            Level::Error => write!(f, "error"),
        }
    }
}

/// A user-visible diagnostic with its exact rendered text.
///
/// The strings below are the interpreter's external interface; tests
/// pin them byte-for-byte. Positions are 1-based.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Diag {
    /// A string literal ran into a newline or end of input before its
    /// closing quote. Position is the opening quote.
    #[error("**WARNING: string literal @ ({line}, {col}) not terminated properly")]
    UnterminatedString { line: u32, col: u32 },

    /// An identifier was read before ever being written.
    #[error("**SEMANTIC ERROR: name '{name}' is not defined (line {line})")]
    NameNotDefined { name: String, line: u32 },

    /// No row of the binary dispatch table matched the operand kinds.
    #[error("**SEMANTIC ERROR: invalid operand types (line {line})")]
    InvalidOperands { line: u32 },

    /// A dereferenced variable is not a pointer, or points outside the
    /// store.
    #[error("**SEMANTIC ERROR: '{name}' contains invalid address (line {line})")]
    InvalidAddress { name: String, line: u32 },

    #[error("**SEMANTIC ERROR: invalid string for int() (line {line})")]
    InvalidStringForInt { line: u32 },

    #[error("**SEMANTIC ERROR: invalid string for float() (line {line})")]
    InvalidStringForFloat { line: u32 },

    #[error("**EXECUTION ERROR: division by zero (line {line})")]
    DivisionByZero { line: u32 },

    /// `if` statements are rejected with a three-line banner.
    #[error("**EXECUTION ERROR\n**EXECUTION ERROR: if statements are not supported.\n**EXECUTION ERROR")]
    IfNotSupported,

    /// A function call other than the supported built-ins.
    #[error("**EXECUTION ERROR: Unknown function call: {name} (line {line})")]
    UnknownFunction { name: String, line: u32 },
}

impl Diag {
    /// Returns the severity of this diagnostic.
    pub fn level(&self) -> Level {
        match self {
            Diag::UnterminatedString { .. } => Level::Warning,
            _ => Level::Error,
        }
    }
}

/// Collects diagnostics as they are reported.
///
/// By default every emitted diagnostic is printed to standard output
/// at the moment it is emitted, which is how the scanner's lexical
/// warnings reach the user. Tests construct a silent handler and
/// inspect the recorded list instead.
///
/// # Examples
///
/// ```
/// use nupy_util::{Diag, Handler};
///
/// let mut handler = Handler::silent();
/// handler.emit(Diag::DivisionByZero { line: 3 });
/// assert!(handler.has_errors());
/// ```
pub struct Handler {
    diagnostics: Vec<Diag>,
    print: bool,
}

impl Handler {
    /// Creates a handler that prints each diagnostic to stdout.
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
            print: true,
        }
    }

    /// Creates a handler that only records diagnostics.
    pub fn silent() -> Self {
        Self {
            diagnostics: Vec::new(),
            print: false,
        }
    }

    /// Reports a diagnostic, printing it if the handler is not silent.
    pub fn emit(&mut self, diag: Diag) {
        if self.print {
            println!("{diag}");
        }
        self.diagnostics.push(diag);
    }

    /// All diagnostics reported so far, in emission order.
    pub fn diagnostics(&self) -> &[Diag] {
        &self.diagnostics
    }

    /// Returns true if any error-level diagnostic was reported.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level() == Level::Error)
    }

    /// Number of warning-level diagnostics reported.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level() == Level::Warning)
            .count()
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}
