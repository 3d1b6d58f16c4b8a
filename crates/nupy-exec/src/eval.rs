//! Expression evaluation.
//!
//! Every operator produces a fresh owned [`Value`]; inputs are
//! consumed or cloned, never aliased. Binary evaluation dispatches on
//! the operand kind pair, first matching rule wins, and anything
//! unmatched is an invalid-operand-types error.

use std::io::{BufRead, Write};

use nupy_graph::{BinOp, Element, Expr, UnaryExpr};
use nupy_ram::Value;
use nupy_util::Diag;

use crate::executor::{Exec, Executor, Fault};

/// Absolute tolerance for `Real` equality.
pub(crate) const REAL_EQ_TOLERANCE: f64 = 1e-3;

impl<R: BufRead, W: Write> Executor<'_, R, W> {
    /// Evaluates an expression to a fresh value.
    pub(crate) fn eval_expr(&mut self, expr: &Expr, line: u32) -> Exec<Value> {
        match expr {
            Expr::Unary(unary) => self.eval_unary(unary, line),
            Expr::Binary { lhs, op, rhs } => {
                let lhs = self.eval_unary(lhs, line)?;
                let rhs = self.eval_unary(rhs, line)?;
                self.apply_binary(lhs, *op, rhs, line)
            }
        }
    }

    /// Evaluates a unary expression.
    pub(crate) fn eval_unary(&mut self, unary: &UnaryExpr, line: u32) -> Exec<Value> {
        match unary {
            UnaryExpr::Element(element) => self.eval_element(element, line),

            UnaryExpr::AddressOf(name) => match self.memory.address_of(name) {
                Some(addr) => Ok(Value::Ptr(addr as i64)),
                None => Err(Diag::NameNotDefined {
                    name: name.clone(),
                    line,
                }
                .into()),
            },

            UnaryExpr::PtrDeref(name) => self.deref(name, line),

            UnaryExpr::Positive(element) => match self.eval_element(element, line)? {
                v @ (Value::Int(_) | Value::Real(_)) => Ok(v),
                _ => Err(Diag::InvalidOperands { line }.into()),
            },

            UnaryExpr::Negative(element) => match self.eval_element(element, line)? {
                Value::Int(n) => Ok(Value::Int(n.wrapping_neg())),
                Value::Real(d) => Ok(Value::Real(-d)),
                _ => Err(Diag::InvalidOperands { line }.into()),
            },
        }
    }

    /// Resolves a literal to its value, or an identifier to a copy of
    /// its stored value.
    pub(crate) fn eval_element(&mut self, element: &Element, line: u32) -> Exec<Value> {
        match element {
            Element::Identifier(name) => {
                self.memory.read_by_id(name).ok_or_else(|| {
                    Fault::from(Diag::NameNotDefined {
                        name: name.clone(),
                        line,
                    })
                })
            }
            Element::IntLit(n) => Ok(Value::Int(*n)),
            Element::RealLit(d) => Ok(Value::Real(*d)),
            Element::StrLit(s) => Ok(Value::Str(s.clone())),
            Element::True => Ok(Value::Bool(true)),
            Element::False => Ok(Value::Bool(false)),
            Element::None => Ok(Value::None),
        }
    }

    /// Reads the cell `name` points at. The variable must exist, hold
    /// a `Ptr`, and the address must be in range; anything else is the
    /// invalid-address error (undefined names keep their own error).
    fn deref(&mut self, name: &str, line: u32) -> Exec<Value> {
        let value = self.memory.read_by_id(name).ok_or_else(|| {
            Fault::from(Diag::NameNotDefined {
                name: name.to_string(),
                line,
            })
        })?;

        match value {
            Value::Ptr(addr) => usize::try_from(addr)
                .ok()
                .and_then(|a| self.memory.read_by_addr(a))
                .ok_or_else(|| {
                    Fault::from(Diag::InvalidAddress {
                        name: name.to_string(),
                        line,
                    })
                }),
            _ => Err(Diag::InvalidAddress {
                name: name.to_string(),
                line,
            }
            .into()),
        }
    }

    /// Applies a binary operator per the type-dispatch rules:
    ///
    /// - `Int x Int`: integer arithmetic and comparisons
    /// - `Real x Real`: double arithmetic and comparisons
    /// - mixed `Int`/`Real`: the `Int` side promotes to `Real`
    /// - `Str x Str`: `+` concatenates; comparisons are byte order
    /// - `Ptr x Int` / `Int x Ptr`: address arithmetic, `+`/`-` only
    /// - `Ptr x Ptr`: both sides dereference and dispatch re-runs on
    ///   the stored values
    pub(crate) fn apply_binary(
        &mut self,
        lhs: Value,
        op: BinOp,
        rhs: Value,
        line: u32,
    ) -> Exec<Value> {
        let (mut lhs, mut rhs) = (lhs, rhs);

        // Cycle guard: a chain of Ptr/Ptr dereferences longer than the
        // store itself must be revisiting cells.
        let mut guard = self.memory.len() + 1;
        while let (Value::Ptr(a), Value::Ptr(b)) = (&lhs, &rhs) {
            if guard == 0 {
                return Err(Diag::InvalidOperands { line }.into());
            }
            guard -= 1;

            let left = self.load_ptr(*a, line)?;
            let right = self.load_ptr(*b, line)?;
            lhs = left;
            rhs = right;
        }

        match (lhs, rhs) {
            (Value::Int(a), Value::Int(b)) => int_op(a, op, b, line),
            (Value::Real(a), Value::Real(b)) => real_op(a, op, b, line),
            (Value::Int(a), Value::Real(b)) => real_op(a as f64, op, b, line),
            (Value::Real(a), Value::Int(b)) => real_op(a, op, b as f64, line),
            (Value::Str(a), Value::Str(b)) => str_op(&a, op, &b, line),
            (Value::Ptr(a), Value::Int(b)) => ptr_arith(a, op, b, line),
            (Value::Int(a), Value::Ptr(b)) => ptr_arith(a, op, b, line),
            _ => Err(Diag::InvalidOperands { line }.into()),
        }
    }

    /// Loads the value at a pointer operand's address for `Ptr x Ptr`
    /// dispatch. Out-of-range operands have no identifier to blame, so
    /// they raise the operand-type error.
    fn load_ptr(&mut self, addr: i64, line: u32) -> Exec<Value> {
        usize::try_from(addr)
            .ok()
            .and_then(|a| self.memory.read_by_addr(a))
            .ok_or_else(|| Fault::from(Diag::InvalidOperands { line }))
    }
}

/// Integer arithmetic and comparisons. Arithmetic wraps on overflow
/// (two's-complement `i64` semantics).
fn int_op(lhs: i64, op: BinOp, rhs: i64, line: u32) -> Exec<Value> {
    let value = match op {
        BinOp::Add => Value::Int(lhs.wrapping_add(rhs)),
        BinOp::Sub => Value::Int(lhs.wrapping_sub(rhs)),
        BinOp::Mul => Value::Int(lhs.wrapping_mul(rhs)),
        BinOp::Pow => Value::Int(int_pow(lhs, rhs)),
        BinOp::Div => {
            if rhs == 0 {
                return Err(Diag::DivisionByZero { line }.into());
            }
            Value::Int(lhs.wrapping_div(rhs))
        }
        BinOp::Mod => {
            if rhs == 0 {
                return Err(Diag::DivisionByZero { line }.into());
            }
            Value::Int(lhs.wrapping_rem(rhs))
        }
        BinOp::Eq => Value::Bool(lhs == rhs),
        BinOp::NotEq => Value::Bool(lhs != rhs),
        BinOp::Lt => Value::Bool(lhs < rhs),
        BinOp::LtEq => Value::Bool(lhs <= rhs),
        BinOp::Gt => Value::Bool(lhs > rhs),
        BinOp::GtEq => Value::Bool(lhs >= rhs),
    };
    Ok(value)
}

/// Exact integer exponentiation by squaring, wrapping on overflow.
///
/// A negative exponent truncates the real result toward zero: base `1`
/// stays `1`, base `-1` alternates sign, every other base gives `0`.
fn int_pow(base: i64, exp: i64) -> i64 {
    if exp < 0 {
        return match base {
            1 => 1,
            -1 => {
                if exp % 2 == 0 {
                    1
                } else {
                    -1
                }
            }
            _ => 0,
        };
    }

    let mut result: i64 = 1;
    let mut base = base;
    let mut exp = exp as u64;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.wrapping_mul(base);
        }
        base = base.wrapping_mul(base);
        exp >>= 1;
    }
    result
}

/// Double arithmetic and comparisons. Equality uses the absolute
/// tolerance; the orderings are exact.
fn real_op(lhs: f64, op: BinOp, rhs: f64, line: u32) -> Exec<Value> {
    let value = match op {
        BinOp::Add => Value::Real(lhs + rhs),
        BinOp::Sub => Value::Real(lhs - rhs),
        BinOp::Mul => Value::Real(lhs * rhs),
        BinOp::Pow => Value::Real(lhs.powf(rhs)),
        BinOp::Div => {
            if rhs == 0.0 {
                return Err(Diag::DivisionByZero { line }.into());
            }
            Value::Real(lhs / rhs)
        }
        BinOp::Mod => {
            if rhs == 0.0 {
                return Err(Diag::DivisionByZero { line }.into());
            }
            Value::Real(lhs % rhs)
        }
        BinOp::Eq => Value::Bool(real_eq(lhs, rhs)),
        BinOp::NotEq => Value::Bool(!real_eq(lhs, rhs)),
        BinOp::Lt => Value::Bool(lhs < rhs),
        BinOp::LtEq => Value::Bool(lhs <= rhs),
        BinOp::Gt => Value::Bool(lhs > rhs),
        BinOp::GtEq => Value::Bool(lhs >= rhs),
    };
    Ok(value)
}

fn real_eq(lhs: f64, rhs: f64) -> bool {
    (lhs - rhs).abs() < REAL_EQ_TOLERANCE
}

/// String concatenation and lexicographic byte-order comparisons. The
/// remaining operators have no string meaning.
fn str_op(lhs: &str, op: BinOp, rhs: &str, line: u32) -> Exec<Value> {
    let value = match op {
        BinOp::Add => Value::Str(format!("{lhs}{rhs}")),
        BinOp::Eq => Value::Bool(lhs == rhs),
        BinOp::NotEq => Value::Bool(lhs != rhs),
        BinOp::Lt => Value::Bool(lhs < rhs),
        BinOp::LtEq => Value::Bool(lhs <= rhs),
        BinOp::Gt => Value::Bool(lhs > rhs),
        BinOp::GtEq => Value::Bool(lhs >= rhs),
        _ => return Err(Diag::InvalidOperands { line }.into()),
    };
    Ok(value)
}

/// Pointer arithmetic: address ± integer, yielding a `Ptr`. The result
/// may be out of range; that is only checked when it is dereferenced.
fn ptr_arith(lhs: i64, op: BinOp, rhs: i64, line: u32) -> Exec<Value> {
    match op {
        BinOp::Add => Ok(Value::Ptr(lhs.wrapping_add(rhs))),
        BinOp::Sub => Ok(Value::Ptr(lhs.wrapping_sub(rhs))),
        _ => Err(Diag::InvalidOperands { line }.into()),
    }
}
