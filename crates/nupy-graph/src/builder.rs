//! Program construction.
//!
//! The builder owns the statement arena while a program is being
//! assembled: each appended statement is linked onto the current
//! chain, and loop bodies are built in a nested chain of their own.

use nupy_util::IndexVec;

use crate::expr::{Element, Expr};
use crate::stmt::{
    AssignRhs, Assignment, FunctionCall, IfThenElse, Program, Stmt, StmtId, StmtKind, WhileLoop,
};

/// Head and tail of a chain under construction.
#[derive(Clone, Copy, Default)]
struct Chain {
    head: Option<StmtId>,
    tail: Option<StmtId>,
}

/// Assembles a [`Program`] one statement at a time.
///
/// # Examples
///
/// ```
/// use nupy_graph::{BinOp, Element, Expr, ProgramBuilder};
///
/// let mut b = ProgramBuilder::new();
/// b.assign(1, "i", Expr::element(Element::IntLit(0)));
/// b.while_loop(
///     2,
///     Expr::binary(Element::ident("i"), BinOp::Lt, Element::IntLit(3)),
///     |body| {
///         body.assign(
///             2,
///             "i",
///             Expr::binary(Element::ident("i"), BinOp::Add, Element::IntLit(1)),
///         );
///     },
/// );
/// b.print(3, Some(Element::ident("i")));
/// let program = b.finish();
/// assert_eq!(program.len(), 4);
/// ```
pub struct ProgramBuilder {
    stmts: IndexVec<StmtId, Stmt>,
    current: Chain,
    suspended: Vec<Chain>,
}

impl ProgramBuilder {
    /// Creates a builder with an empty program.
    pub fn new() -> Self {
        Self {
            stmts: IndexVec::new(),
            current: Chain::default(),
            suspended: Vec::new(),
        }
    }

    /// Appends a statement to the current chain and returns its id.
    pub fn stmt(&mut self, line: u32, kind: StmtKind) -> StmtId {
        let id = self.stmts.push(Stmt {
            line,
            kind,
            next: None,
        });

        if let Some(tail) = self.current.tail {
            self.stmts[tail].next = Some(id);
        } else {
            self.current.head = Some(id);
        }
        self.current.tail = Some(id);

        id
    }

    /// Appends `var_name = rhs`.
    pub fn assign(&mut self, line: u32, var_name: &str, rhs: Expr) -> StmtId {
        self.stmt(
            line,
            StmtKind::Assignment(Assignment {
                var_name: var_name.to_string(),
                is_ptr_deref: false,
                rhs: AssignRhs::Expr(rhs),
            }),
        )
    }

    /// Appends `var_name = call(...)` for the built-in call RHS form.
    pub fn assign_call(&mut self, line: u32, var_name: &str, call: FunctionCall) -> StmtId {
        self.stmt(
            line,
            StmtKind::Assignment(Assignment {
                var_name: var_name.to_string(),
                is_ptr_deref: false,
                rhs: AssignRhs::Call(call),
            }),
        )
    }

    /// Appends `*var_name = rhs`.
    pub fn deref_assign(&mut self, line: u32, var_name: &str, rhs: Expr) -> StmtId {
        self.stmt(
            line,
            StmtKind::Assignment(Assignment {
                var_name: var_name.to_string(),
                is_ptr_deref: true,
                rhs: AssignRhs::Expr(rhs),
            }),
        )
    }

    /// Appends a `print(...)` statement.
    pub fn print(&mut self, line: u32, parameter: Option<Element>) -> StmtId {
        self.stmt(
            line,
            StmtKind::FunctionCall(FunctionCall {
                name: "print".to_string(),
                parameter,
            }),
        )
    }

    /// Appends a `pass` statement.
    pub fn pass(&mut self, line: u32) -> StmtId {
        self.stmt(line, StmtKind::Pass)
    }

    /// Appends a `while` loop whose body is built by `build_body` on a
    /// fresh chain. The body region ends where its chain ends.
    pub fn while_loop(
        &mut self,
        line: u32,
        condition: Expr,
        build_body: impl FnOnce(&mut Self),
    ) -> StmtId {
        let id = self.stmt(
            line,
            StmtKind::WhileLoop(WhileLoop {
                condition,
                body: None,
            }),
        );

        self.suspended.push(std::mem::take(&mut self.current));
        build_body(self);
        let body = std::mem::replace(
            &mut self.current,
            self.suspended.pop().unwrap_or_default(),
        );

        if let StmtKind::WhileLoop(w) = &mut self.stmts[id].kind {
            w.body = body.head;
        }

        id
    }

    /// Appends an `if` statement node (the executor rejects it).
    pub fn if_then_else(&mut self, line: u32, condition: Expr) -> StmtId {
        self.stmt(
            line,
            StmtKind::IfThenElse(IfThenElse {
                condition,
                then_branch: None,
                else_branch: None,
            }),
        )
    }

    /// Finalizes the program.
    pub fn finish(self) -> Program {
        Program::new(self.stmts, self.current.head)
    }
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}
