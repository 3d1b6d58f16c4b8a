//! Built-in calls: the `print` statement and the `input`/`int`/`float`
//! assignment forms.

use std::io::{self, BufRead, Write};

use nupy_graph::{Element, FunctionCall};
use nupy_ram::Value;
use nupy_util::Diag;

use crate::executor::{Exec, Executor, Fault};

impl<R: BufRead, W: Write> Executor<'_, R, W> {
    /// Executes a function-call statement. `print` is the only one the
    /// language defines.
    ///
    /// With no parameter, prints a bare newline. With one parameter,
    /// resolves the element and prints its value kind-directed.
    pub(crate) fn exec_function_call(&mut self, call: &FunctionCall, line: u32) -> Exec<()> {
        if call.name != "print" {
            return Err(Diag::UnknownFunction {
                name: call.name.clone(),
                line,
            }
            .into());
        }

        match &call.parameter {
            None => writeln!(self.out)?,
            Some(element) => {
                let value = self.eval_element(element, line)?;
                self.print_value(&value)?;
            }
        }

        Ok(())
    }

    /// Output form per value kind. `Real` prints with fixed six
    /// decimal digits and a locale-independent decimal point.
    fn print_value(&mut self, value: &Value) -> io::Result<()> {
        match value {
            Value::Int(i) => writeln!(self.out, "{i}"),
            Value::Real(d) => writeln!(self.out, "{d:.6}"),
            Value::Str(s) => writeln!(self.out, "{s}"),
            Value::Bool(b) => writeln!(self.out, "{}", if *b { "True" } else { "False" }),
            Value::Ptr(addr) => writeln!(self.out, "{addr}"),
            Value::None => writeln!(self.out, "None"),
        }
    }

    /// Evaluates a built-in call on the right-hand side of an
    /// assignment: `input(prompt)`, `int(x)`, or `float(x)`.
    pub(crate) fn eval_builtin_call(&mut self, call: &FunctionCall, line: u32) -> Exec<Value> {
        match call.name.as_str() {
            "input" => self.builtin_input(call, line),
            "int" => self.builtin_int(call, line),
            "float" => self.builtin_float(call, line),
            _ => Err(Diag::UnknownFunction {
                name: call.name.clone(),
                line,
            }
            .into()),
        }
    }

    /// `input(prompt)`: prints the string-literal prompt without a
    /// newline, reads one line, and yields it as a `Str` with the
    /// trailing line ending stripped.
    fn builtin_input(&mut self, call: &FunctionCall, line: u32) -> Exec<Value> {
        let prompt = match &call.parameter {
            Some(Element::StrLit(prompt)) => prompt,
            _ => return Err(Diag::InvalidOperands { line }.into()),
        };

        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut buf = String::new();
        self.input.read_line(&mut buf)?;
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }

        Ok(Value::Str(buf))
    }

    /// `int(x)`: `x` must name a `Str` variable; the payload parses as
    /// a base-10 integer or the conversion fails with its fixed error.
    fn builtin_int(&mut self, call: &FunctionCall, line: u32) -> Exec<Value> {
        let text = self.str_argument(call, line)?;
        text.trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| Diag::InvalidStringForInt { line }.into())
    }

    /// `float(x)`: as `int(x)`, parsing a double.
    fn builtin_float(&mut self, call: &FunctionCall, line: u32) -> Exec<Value> {
        let text = self.str_argument(call, line)?;
        text.trim()
            .parse::<f64>()
            .map(Value::Real)
            .map_err(|_| Diag::InvalidStringForFloat { line }.into())
    }

    /// Resolves the identifier argument of `int()`/`float()` to its
    /// `Str` payload.
    fn str_argument(&mut self, call: &FunctionCall, line: u32) -> Exec<String> {
        let name = match &call.parameter {
            Some(Element::Identifier(name)) => name,
            _ => return Err(Diag::InvalidOperands { line }.into()),
        };

        let value = self.memory.read_by_id(name).ok_or_else(|| {
            Fault::from(Diag::NameNotDefined {
                name: name.clone(),
                line,
            })
        })?;

        match value {
            Value::Str(s) => Ok(s),
            _ => Err(Diag::InvalidOperands { line }.into()),
        }
    }
}
