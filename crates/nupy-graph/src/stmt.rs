//! Statement nodes and the program arena.

use nupy_util::{define_idx, IndexVec};

use crate::expr::{Element, Expr};

define_idx!(
    /// Arena index of a statement within a [`Program`].
    StmtId
);

/// A complete statement graph.
///
/// Execution starts at [`Program::head`] and follows each statement's
/// `next` link until it runs out.
pub struct Program {
    stmts: IndexVec<StmtId, Stmt>,
    head: Option<StmtId>,
}

impl Program {
    pub(crate) fn new(stmts: IndexVec<StmtId, Stmt>, head: Option<StmtId>) -> Self {
        Self { stmts, head }
    }

    /// First statement of the program, or `None` for an empty program.
    pub fn head(&self) -> Option<StmtId> {
        self.head
    }

    /// Looks up a statement by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this program.
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id]
    }

    /// Number of statements in the arena.
    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    /// Returns true if the program has no statements.
    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

/// One statement node.
#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    /// Source line the statement came from (1-based), used in
    /// diagnostics.
    pub line: u32,
    pub kind: StmtKind,
    /// Successor in the chain; `None` ends the chain.
    pub next: Option<StmtId>,
}

/// The statement variants the executor understands.
#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    Assignment(Assignment),
    FunctionCall(FunctionCall),
    Pass,
    WhileLoop(WhileLoop),
    /// Present in the data model solely so the executor can reject it.
    IfThenElse(IfThenElse),
}

/// `x = RHS` or `*x = RHS`.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub var_name: String,
    /// True for `*x = RHS`: `x` must hold a valid pointer and the cell
    /// it points at is updated instead of `x` itself.
    pub is_ptr_deref: bool,
    pub rhs: AssignRhs,
}

/// Right-hand side of an assignment.
#[derive(Clone, Debug, PartialEq)]
pub enum AssignRhs {
    Expr(Expr),
    /// A built-in call: `input(...)`, `int(...)`, `float(...)`.
    Call(FunctionCall),
}

/// A function call with at most one parameter.
///
/// As a statement only `print` is meaningful; as an assignment RHS the
/// built-ins `input`, `int`, and `float` are. The executor validates
/// the name at run time.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub parameter: Option<Element>,
}

/// `while condition:` with a linked body region.
#[derive(Clone, Debug, PartialEq)]
pub struct WhileLoop {
    pub condition: Expr,
    /// Head of the body chain. The body is the linked region from here
    /// up to, but not including, the loop statement's `next`.
    pub body: Option<StmtId>,
}

/// `if`/`elif`/`else`. Never executed; the executor emits a fixed
/// error when it encounters one.
#[derive(Clone, Debug, PartialEq)]
pub struct IfThenElse {
    pub condition: Expr,
    pub then_branch: Option<StmtId>,
    pub else_branch: Option<StmtId>,
}
