//! nupy-graph - Statement Graph
//!
//! The forward-linked statement graph the executor walks. The parser
//! (an external collaborator) produces this structure; the executor
//! consumes it. It is defined here exactly to the extent execution
//! depends on it.
//!
//! Statements live in an arena owned by a [`Program`] and refer to one
//! another by [`StmtId`]; a statement's `next` link names its
//! successor, and a `while` loop's body is the linked region from its
//! body head up to, but not including, the loop's own successor.
//!
//! [`ProgramBuilder`] assembles chains without exposing the arena
//! wiring:
//!
//! ```
//! use nupy_graph::{Element, Expr, ProgramBuilder};
//!
//! let mut b = ProgramBuilder::new();
//! b.assign(1, "x", Expr::element(Element::IntLit(5)));
//! b.print(2, Some(Element::Identifier("x".to_string())));
//! let program = b.finish();
//!
//! assert_eq!(program.len(), 2);
//! ```

pub mod builder;
pub mod expr;
pub mod stmt;

pub use builder::ProgramBuilder;
pub use expr::{BinOp, Element, Expr, UnaryExpr};
pub use stmt::{
    AssignRhs, Assignment, FunctionCall, IfThenElse, Program, Stmt, StmtId, StmtKind, WhileLoop,
};
