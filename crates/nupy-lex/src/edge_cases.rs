//! Edge case tests for nupy-lex
