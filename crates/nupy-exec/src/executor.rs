//! The statement-dispatch loop.

use std::io::{self, BufRead, Write};

use nupy_graph::{AssignRhs, Assignment, Program, Stmt, StmtId, StmtKind, WhileLoop};
use nupy_ram::{Ram, Value};
use nupy_util::Diag;

/// Terminal state of one [`Executor::run`] invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Reached the end of the statement chain.
    Completed,
    /// A diagnostic was printed and execution stopped early.
    Halted,
}

/// Internal failure channel. A `Diag` is a pending diagnostic that the
/// top of the loop prints exactly once; an I/O fault just stops the
/// walk.
pub(crate) enum Fault {
    Diag(Diag),
    Io(io::Error),
}

impl From<Diag> for Fault {
    fn from(diag: Diag) -> Self {
        Fault::Diag(diag)
    }
}

impl From<io::Error> for Fault {
    fn from(err: io::Error) -> Self {
        Fault::Io(err)
    }
}

pub(crate) type Exec<T> = Result<T, Fault>;

/// Walks a statement graph against a value store.
///
/// `input` feeds the `input()` built-in; `out` receives program output
/// and diagnostics, interleaved in emission order. [`execute`] wires
/// these to stdin/stdout; tests substitute in-memory buffers.
pub struct Executor<'a, R, W> {
    pub(crate) memory: &'a mut Ram,
    pub(crate) input: R,
    pub(crate) out: W,
}

impl<'a, R: BufRead, W: Write> Executor<'a, R, W> {
    /// Creates an executor over the given store and I/O endpoints.
    pub fn new(memory: &'a mut Ram, input: R, out: W) -> Self {
        Self { memory, input, out }
    }

    /// Executes the program from its head statement.
    ///
    /// Runs until the chain ends or the first fatal diagnostic. The
    /// diagnostic, if any, is printed to the output sink before this
    /// returns; the caller receives only the terminal state.
    pub fn run(&mut self, program: &Program) -> Outcome {
        match self.run_chain(program, program.head(), None) {
            Ok(()) => {
                let _ = self.out.flush();
                Outcome::Completed
            }
            Err(Fault::Diag(diag)) => {
                let _ = writeln!(self.out, "{diag}");
                let _ = self.out.flush();
                Outcome::Halted
            }
            Err(Fault::Io(_)) => Outcome::Halted,
        }
    }

    /// Runs the chain starting at `cur`, stopping at the end of the
    /// chain or on reaching `stop` (exclusive). `stop` is how a while
    /// loop's body region is bounded when the parser links the body
    /// tail back to the loop's successor.
    fn run_chain(
        &mut self,
        program: &Program,
        mut cur: Option<StmtId>,
        stop: Option<StmtId>,
    ) -> Exec<()> {
        while let Some(id) = cur {
            if stop == Some(id) {
                break;
            }

            let stmt = program.stmt(id);
            match &stmt.kind {
                StmtKind::Pass => {}
                StmtKind::Assignment(assign) => self.exec_assignment(assign, stmt.line)?,
                StmtKind::FunctionCall(call) => self.exec_function_call(call, stmt.line)?,
                StmtKind::WhileLoop(w) => self.exec_while(program, stmt, w)?,
                StmtKind::IfThenElse(_) => return Err(Diag::IfNotSupported.into()),
            }

            cur = stmt.next;
        }
        Ok(())
    }

    /// Evaluates the condition and runs the body region until the
    /// condition turns false. The condition must yield a `Bool` and is
    /// re-evaluated after every pass over the body. Nested loops
    /// recurse.
    fn exec_while(&mut self, program: &Program, stmt: &Stmt, w: &WhileLoop) -> Exec<()> {
        loop {
            let condition = self.eval_expr(&w.condition, stmt.line)?;
            let proceed = match condition {
                Value::Bool(b) => b,
                _ => return Err(Diag::InvalidOperands { line: stmt.line }.into()),
            };
            if !proceed {
                return Ok(());
            }

            self.run_chain(program, w.body, stmt.next)?;
        }
    }

    /// Executes `x = RHS` or `*x = RHS`.
    ///
    /// For the dereferencing form the checks run in a fixed priority
    /// before the RHS is evaluated: the variable must exist, must hold
    /// a `Ptr`, and the address must be in range. The fresh RHS value
    /// then replaces the pointed-at cell's value; the cell keeps its
    /// identifier.
    fn exec_assignment(&mut self, assign: &Assignment, line: u32) -> Exec<()> {
        if assign.is_ptr_deref {
            let current = self.memory.read_by_id(&assign.var_name).ok_or_else(|| {
                Fault::from(Diag::NameNotDefined {
                    name: assign.var_name.clone(),
                    line,
                })
            })?;

            let addr = match current {
                Value::Ptr(addr) => usize::try_from(addr)
                    .ok()
                    .filter(|&a| a < self.memory.len())
                    .ok_or_else(|| {
                        Fault::from(Diag::InvalidAddress {
                            name: assign.var_name.clone(),
                            line,
                        })
                    })?,
                _ => return Err(Diag::InvalidOperands { line }.into()),
            };

            let value = self.eval_rhs(&assign.rhs, line)?;
            self.memory.write_by_addr(addr, value).map_err(|_| {
                Diag::InvalidAddress {
                    name: assign.var_name.clone(),
                    line,
                }
                .into()
            })
        } else {
            let value = self.eval_rhs(&assign.rhs, line)?;
            self.memory.write_by_id(&assign.var_name, value);
            Ok(())
        }
    }

    fn eval_rhs(&mut self, rhs: &AssignRhs, line: u32) -> Exec<Value> {
        match rhs {
            AssignRhs::Expr(expr) => self.eval_expr(expr, line),
            AssignRhs::Call(call) => self.eval_builtin_call(call, line),
        }
    }
}

/// Executes the program against `memory`, reading `input()` from stdin
/// and writing output and diagnostics to stdout.
pub fn execute(program: &Program, memory: &mut Ram) -> Outcome {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Executor::new(memory, stdin.lock(), stdout.lock()).run(program)
}
