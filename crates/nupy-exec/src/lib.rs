//! nupy-exec - Tree-walking Executor
//!
//! Executes a pre-built statement graph against a value store,
//! producing printed output and, on semantic failure, one of the fixed
//! diagnostics.
//!
//! Execution is single-threaded and synchronous. Statements run in
//! chain order; expression evaluation always produces a fresh owned
//! [`Value`](nupy_ram::Value), so operator inputs are consumed or
//! cloned and string payloads are never shared.
//!
//! The first fatal diagnostic halts the walk: it is printed to the
//! output sink and [`execute`] returns [`Outcome::Halted`]. Reaching
//! the end of the chain returns [`Outcome::Completed`]. There is no
//! error object; the diagnostic text is the contract.
//!
//! # Example
//!
//! ```
//! use nupy_exec::{execute, Outcome};
//! use nupy_graph::{Element, Expr, ProgramBuilder};
//! use nupy_ram::{Ram, Value};
//!
//! let mut b = ProgramBuilder::new();
//! b.assign(1, "x", Expr::element(Element::IntLit(5)));
//! let program = b.finish();
//!
//! let mut ram = Ram::new();
//! assert_eq!(execute(&program, &mut ram), Outcome::Completed);
//! assert_eq!(ram.read_by_id("x"), Some(Value::Int(5)));
//! ```

pub mod executor;

mod builtins;
mod eval;

mod edge_cases;
#[cfg(test)]
mod tests;

pub use executor::{execute, Executor, Outcome};
