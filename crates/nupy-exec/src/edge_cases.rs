//! Edge case tests for nupy-exec: every diagnostic path.
