//! Executor scenario tests: programs that run to completion.

use nupy_graph::{BinOp, Element, Expr, FunctionCall, Program, ProgramBuilder, UnaryExpr};
use nupy_ram::{Ram, Value};

use crate::{Executor, Outcome};

fn run(program: &Program) -> (String, Ram, Outcome) {
    run_with_input(program, "")
}

fn run_with_input(program: &Program, input: &str) -> (String, Ram, Outcome) {
    let mut ram = Ram::new();
    let mut out = Vec::new();
    let outcome = Executor::new(&mut ram, input.as_bytes(), &mut out).run(program);
    (String::from_utf8(out).expect("output is UTF-8"), ram, outcome)
}

#[test]
fn test_integer_arithmetic_chain() {
    // x = 4 * 2
    // x = 3 + x
    // print(x)
    let mut b = ProgramBuilder::new();
    b.assign(
        1,
        "x",
        Expr::binary(Element::IntLit(4), BinOp::Mul, Element::IntLit(2)),
    );
    b.assign(
        2,
        "x",
        Expr::binary(Element::IntLit(3), BinOp::Add, Element::ident("x")),
    );
    b.print(3, Some(Element::ident("x")));
    let (out, ram, outcome) = run(&b.finish());

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(out, "11\n");
    assert_eq!(ram.read_by_id("x"), Some(Value::Int(11)));
    assert_eq!(ram.len(), 1);
}

#[test]
fn test_string_concatenation() {
    // s = 'hi '
    // t = s + 'there'
    // print(t)
    let mut b = ProgramBuilder::new();
    b.assign(1, "s", Expr::element(Element::str_lit("hi ")));
    b.assign(
        2,
        "t",
        Expr::binary(Element::ident("s"), BinOp::Add, Element::str_lit("there")),
    );
    b.print(3, Some(Element::ident("t")));
    let (out, ram, outcome) = run(&b.finish());

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(out, "hi there\n");
    assert_eq!(ram.read_by_id("t"), Some(Value::Str("hi there".to_string())));
    // The source operand is untouched.
    assert_eq!(ram.read_by_id("s"), Some(Value::Str("hi ".to_string())));
}

#[test]
fn test_while_counts_to_three() {
    // i = 0
    // while i < 3:
    //     i = i + 1
    // print(i)
    let mut b = ProgramBuilder::new();
    b.assign(1, "i", Expr::element(Element::IntLit(0)));
    b.while_loop(
        2,
        Expr::binary(Element::ident("i"), BinOp::Lt, Element::IntLit(3)),
        |body| {
            body.assign(
                3,
                "i",
                Expr::binary(Element::ident("i"), BinOp::Add, Element::IntLit(1)),
            );
        },
    );
    b.print(4, Some(Element::ident("i")));
    let (out, ram, outcome) = run(&b.finish());

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(out, "3\n");
    assert_eq!(ram.read_by_id("i"), Some(Value::Int(3)));
}

#[test]
fn test_pointer_write_through() {
    // x = 5
    // p = &x
    // *p = 7
    // print(x)
    let mut b = ProgramBuilder::new();
    b.assign(1, "x", Expr::element(Element::IntLit(5)));
    b.assign(2, "p", Expr::Unary(UnaryExpr::AddressOf("x".to_string())));
    b.deref_assign(3, "p", Expr::element(Element::IntLit(7)));
    b.print(4, Some(Element::ident("x")));
    let (out, ram, outcome) = run(&b.finish());

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(out, "7\n");
    assert_eq!(ram.read_by_id("x"), Some(Value::Int(7)));

    let x_addr = ram.address_of("x").expect("x exists") as i64;
    assert_eq!(ram.read_by_id("p"), Some(Value::Ptr(x_addr)));
}

#[test]
fn test_mixed_int_real_promotes() {
    // y = 1 + 2.5
    // print(y)
    let mut b = ProgramBuilder::new();
    b.assign(
        1,
        "y",
        Expr::binary(Element::IntLit(1), BinOp::Add, Element::RealLit(2.5)),
    );
    b.print(2, Some(Element::ident("y")));
    let (out, ram, _) = run(&b.finish());

    assert_eq!(out, "3.500000\n");
    assert_eq!(ram.read_by_id("y"), Some(Value::Real(3.5)));
}

#[test]
fn test_real_prints_six_decimals() {
    let mut b = ProgramBuilder::new();
    b.print(1, Some(Element::RealLit(3.14)));
    b.print(2, Some(Element::RealLit(2.0)));
    let (out, _, _) = run(&b.finish());

    assert_eq!(out, "3.140000\n2.000000\n");
}

#[test]
fn test_integer_power() {
    let mut b = ProgramBuilder::new();
    b.assign(
        1,
        "x",
        Expr::binary(Element::IntLit(2), BinOp::Pow, Element::IntLit(10)),
    );
    b.print(2, Some(Element::ident("x")));
    let (out, _, _) = run(&b.finish());
    assert_eq!(out, "1024\n");
}

#[test]
fn test_real_power_and_mod() {
    let mut b = ProgramBuilder::new();
    b.assign(
        1,
        "a",
        Expr::binary(Element::RealLit(2.0), BinOp::Pow, Element::RealLit(3.0)),
    );
    b.assign(
        2,
        "m",
        Expr::binary(Element::RealLit(7.5), BinOp::Mod, Element::RealLit(2.0)),
    );
    let (_, ram, outcome) = run(&b.finish());

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(ram.read_by_id("a"), Some(Value::Real(8.0)));
    assert_eq!(ram.read_by_id("m"), Some(Value::Real(1.5)));
}

#[test]
fn test_real_equality_uses_tolerance() {
    // a = 0.1 + 0.2
    // ok = a == 0.3
    // print(ok)
    let mut b = ProgramBuilder::new();
    b.assign(
        1,
        "a",
        Expr::binary(Element::RealLit(0.1), BinOp::Add, Element::RealLit(0.2)),
    );
    b.assign(
        2,
        "ok",
        Expr::binary(Element::ident("a"), BinOp::Eq, Element::RealLit(0.3)),
    );
    b.print(3, Some(Element::ident("ok")));
    let (out, _, _) = run(&b.finish());
    assert_eq!(out, "True\n");
}

#[test]
fn test_string_comparisons_are_byte_order() {
    let mut b = ProgramBuilder::new();
    b.assign(
        1,
        "lt",
        Expr::binary(Element::str_lit("abc"), BinOp::Lt, Element::str_lit("abd")),
    );
    b.assign(
        2,
        "ne",
        Expr::binary(Element::str_lit("Zoo"), BinOp::NotEq, Element::str_lit("zoo")),
    );
    let (_, ram, _) = run(&b.finish());

    assert_eq!(ram.read_by_id("lt"), Some(Value::Bool(true)));
    assert_eq!(ram.read_by_id("ne"), Some(Value::Bool(true)));
}

#[test]
fn test_print_variants() {
    let mut b = ProgramBuilder::new();
    b.print(1, None);
    b.print(2, Some(Element::str_lit("text")));
    b.print(3, Some(Element::True));
    b.print(4, Some(Element::False));
    b.print(5, Some(Element::None));
    b.print(6, Some(Element::IntLit(-3)));
    let (out, _, outcome) = run(&b.finish());

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(out, "\ntext\nTrue\nFalse\nNone\n-3\n");
}

#[test]
fn test_print_pointer_shows_address() {
    let mut b = ProgramBuilder::new();
    b.assign(1, "x", Expr::element(Element::IntLit(1)));
    b.assign(2, "y", Expr::element(Element::IntLit(2)));
    b.assign(3, "p", Expr::Unary(UnaryExpr::AddressOf("y".to_string())));
    b.print(4, Some(Element::ident("p")));
    let (out, _, _) = run(&b.finish());
    assert_eq!(out, "1\n");
}

#[test]
fn test_pointer_arithmetic_walks_cells() {
    // x = 5, y = 6 occupy addresses 0 and 1.
    // p = &x ; p = p + 1 ; z = *p
    let mut b = ProgramBuilder::new();
    b.assign(1, "x", Expr::element(Element::IntLit(5)));
    b.assign(2, "y", Expr::element(Element::IntLit(6)));
    b.assign(3, "p", Expr::Unary(UnaryExpr::AddressOf("x".to_string())));
    b.assign(
        4,
        "p",
        Expr::binary(
            UnaryExpr::Element(Element::ident("p")),
            BinOp::Add,
            UnaryExpr::Element(Element::IntLit(1)),
        ),
    );
    b.assign(5, "z", Expr::Unary(UnaryExpr::PtrDeref("p".to_string())));
    let (_, ram, outcome) = run(&b.finish());

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(ram.read_by_id("p"), Some(Value::Ptr(1)));
    assert_eq!(ram.read_by_id("z"), Some(Value::Int(6)));
}

#[test]
fn test_ptr_ptr_combines_pointed_values() {
    let mut b = ProgramBuilder::new();
    b.assign(1, "x", Expr::element(Element::IntLit(5)));
    b.assign(2, "y", Expr::element(Element::IntLit(6)));
    b.assign(3, "p", Expr::Unary(UnaryExpr::AddressOf("x".to_string())));
    b.assign(4, "q", Expr::Unary(UnaryExpr::AddressOf("y".to_string())));
    b.assign(
        5,
        "sum",
        Expr::binary(Element::ident("p"), BinOp::Add, Element::ident("q")),
    );
    let (_, ram, _) = run(&b.finish());

    assert_eq!(ram.read_by_id("sum"), Some(Value::Int(11)));
}

#[test]
fn test_int_plus_ptr_is_address_arithmetic() {
    let mut b = ProgramBuilder::new();
    b.assign(1, "x", Expr::element(Element::IntLit(9)));
    b.assign(2, "p", Expr::Unary(UnaryExpr::AddressOf("x".to_string())));
    b.assign(
        3,
        "q",
        Expr::binary(Element::IntLit(2), BinOp::Add, Element::ident("p")),
    );
    let (_, ram, _) = run(&b.finish());
    assert_eq!(ram.read_by_id("q"), Some(Value::Ptr(2)));
}

#[test]
fn test_unary_signs() {
    let mut b = ProgramBuilder::new();
    b.assign(1, "n", Expr::Unary(UnaryExpr::Negative(Element::IntLit(5))));
    b.assign(2, "p", Expr::Unary(UnaryExpr::Positive(Element::RealLit(1.5))));
    b.assign(3, "m", Expr::Unary(UnaryExpr::Negative(Element::ident("n"))));
    let (_, ram, _) = run(&b.finish());

    assert_eq!(ram.read_by_id("n"), Some(Value::Int(-5)));
    assert_eq!(ram.read_by_id("p"), Some(Value::Real(1.5)));
    assert_eq!(ram.read_by_id("m"), Some(Value::Int(5)));
}

#[test]
fn test_nested_while_loops() {
    // i = 0 ; total = 0
    // while i < 2:
    //     j = 0
    //     while j < 3:
    //         total = total + 1
    //         j = j + 1
    //     i = i + 1
    let mut b = ProgramBuilder::new();
    b.assign(1, "i", Expr::element(Element::IntLit(0)));
    b.assign(2, "total", Expr::element(Element::IntLit(0)));
    b.while_loop(
        3,
        Expr::binary(Element::ident("i"), BinOp::Lt, Element::IntLit(2)),
        |outer| {
            outer.assign(4, "j", Expr::element(Element::IntLit(0)));
            outer.while_loop(
                5,
                Expr::binary(Element::ident("j"), BinOp::Lt, Element::IntLit(3)),
                |inner| {
                    inner.assign(
                        6,
                        "total",
                        Expr::binary(Element::ident("total"), BinOp::Add, Element::IntLit(1)),
                    );
                    inner.assign(
                        7,
                        "j",
                        Expr::binary(Element::ident("j"), BinOp::Add, Element::IntLit(1)),
                    );
                },
            );
            outer.assign(
                8,
                "i",
                Expr::binary(Element::ident("i"), BinOp::Add, Element::IntLit(1)),
            );
        },
    );
    let (_, ram, outcome) = run(&b.finish());

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(ram.read_by_id("total"), Some(Value::Int(6)));
}

#[test]
fn test_while_false_skips_body() {
    let mut b = ProgramBuilder::new();
    b.while_loop(1, Expr::element(Element::False), |body| {
        body.print(2, Some(Element::str_lit("never")));
    });
    b.print(3, Some(Element::str_lit("after")));
    let (out, _, _) = run(&b.finish());
    assert_eq!(out, "after\n");
}

#[test]
fn test_while_body_with_pointer_deref() {
    // Pointers and loops compose: count down through a pointer.
    // n = 3 ; p = &n
    // while n > 0:
    //     *p = n - 1
    let mut b = ProgramBuilder::new();
    b.assign(1, "n", Expr::element(Element::IntLit(3)));
    b.assign(2, "p", Expr::Unary(UnaryExpr::AddressOf("n".to_string())));
    b.while_loop(
        3,
        Expr::binary(Element::ident("n"), BinOp::Gt, Element::IntLit(0)),
        |body| {
            body.deref_assign(
                4,
                "p",
                Expr::binary(Element::ident("n"), BinOp::Sub, Element::IntLit(1)),
            );
        },
    );
    let (_, ram, outcome) = run(&b.finish());

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(ram.read_by_id("n"), Some(Value::Int(0)));
}

#[test]
fn test_pass_statements_do_nothing() {
    let mut b = ProgramBuilder::new();
    b.pass(1);
    b.assign(2, "x", Expr::element(Element::IntLit(1)));
    b.pass(3);
    let (out, ram, outcome) = run(&b.finish());

    assert_eq!(outcome, Outcome::Completed);
    assert!(out.is_empty());
    assert_eq!(ram.len(), 1);
}

#[test]
fn test_input_builtin() {
    // name = input('Name? ')
    // print(name)
    let mut b = ProgramBuilder::new();
    b.assign_call(
        1,
        "name",
        FunctionCall {
            name: "input".to_string(),
            parameter: Some(Element::str_lit("Name? ")),
        },
    );
    b.print(2, Some(Element::ident("name")));
    let (out, ram, outcome) = run_with_input(&b.finish(), "Jay\n");

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(out, "Name? Jay\n");
    assert_eq!(ram.read_by_id("name"), Some(Value::Str("Jay".to_string())));
}

#[test]
fn test_input_strips_crlf() {
    let mut b = ProgramBuilder::new();
    b.assign_call(
        1,
        "s",
        FunctionCall {
            name: "input".to_string(),
            parameter: Some(Element::str_lit("")),
        },
    );
    let (_, ram, _) = run_with_input(&b.finish(), "hello\r\n");
    assert_eq!(ram.read_by_id("s"), Some(Value::Str("hello".to_string())));
}

#[test]
fn test_input_without_trailing_newline() {
    let mut b = ProgramBuilder::new();
    b.assign_call(
        1,
        "s",
        FunctionCall {
            name: "input".to_string(),
            parameter: Some(Element::str_lit("")),
        },
    );
    let (_, ram, _) = run_with_input(&b.finish(), "partial");
    assert_eq!(ram.read_by_id("s"), Some(Value::Str("partial".to_string())));
}

#[test]
fn test_int_builtin_parses_string() {
    // s = '123' ; n = int(s) ; print(n)
    let mut b = ProgramBuilder::new();
    b.assign(1, "s", Expr::element(Element::str_lit("123")));
    b.assign_call(
        2,
        "n",
        FunctionCall {
            name: "int".to_string(),
            parameter: Some(Element::ident("s")),
        },
    );
    b.print(3, Some(Element::ident("n")));
    let (out, ram, outcome) = run(&b.finish());

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(out, "123\n");
    assert_eq!(ram.read_by_id("n"), Some(Value::Int(123)));
}

#[test]
fn test_int_builtin_accepts_negative_and_spaces() {
    let mut b = ProgramBuilder::new();
    b.assign(1, "s", Expr::element(Element::str_lit(" -40 ")));
    b.assign_call(
        2,
        "n",
        FunctionCall {
            name: "int".to_string(),
            parameter: Some(Element::ident("s")),
        },
    );
    let (_, ram, _) = run(&b.finish());
    assert_eq!(ram.read_by_id("n"), Some(Value::Int(-40)));
}

#[test]
fn test_float_builtin_parses_string() {
    let mut b = ProgramBuilder::new();
    b.assign(1, "s", Expr::element(Element::str_lit("3.5")));
    b.assign_call(
        2,
        "f",
        FunctionCall {
            name: "float".to_string(),
            parameter: Some(Element::ident("s")),
        },
    );
    b.print(3, Some(Element::ident("f")));
    let (out, ram, _) = run(&b.finish());

    assert_eq!(out, "3.500000\n");
    assert_eq!(ram.read_by_id("f"), Some(Value::Real(3.5)));
}

#[test]
fn test_deref_assignment_with_builtin_rhs() {
    // x = 0 ; s = '42' ; p = &x ; *p = int(s)
    let mut b = ProgramBuilder::new();
    b.assign(1, "x", Expr::element(Element::IntLit(0)));
    b.assign(2, "s", Expr::element(Element::str_lit("42")));
    b.assign(3, "p", Expr::Unary(UnaryExpr::AddressOf("x".to_string())));
    b.stmt(
        4,
        nupy_graph::StmtKind::Assignment(nupy_graph::Assignment {
            var_name: "p".to_string(),
            is_ptr_deref: true,
            rhs: nupy_graph::AssignRhs::Call(FunctionCall {
                name: "int".to_string(),
                parameter: Some(Element::ident("s")),
            }),
        }),
    );
    let (_, ram, outcome) = run(&b.finish());

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(ram.read_by_id("x"), Some(Value::Int(42)));
}

#[test]
fn test_address_stays_stable_across_overwrites() {
    let mut b = ProgramBuilder::new();
    b.assign(1, "x", Expr::element(Element::IntLit(1)));
    b.assign(2, "p", Expr::Unary(UnaryExpr::AddressOf("x".to_string())));
    b.assign(3, "x", Expr::element(Element::str_lit("rebound")));
    b.assign(4, "z", Expr::Unary(UnaryExpr::PtrDeref("p".to_string())));
    let (_, ram, _) = run(&b.finish());

    assert_eq!(ram.read_by_id("z"), Some(Value::Str("rebound".to_string())));
}

#[test]
fn test_integer_division_truncates() {
    let mut b = ProgramBuilder::new();
    b.assign(
        1,
        "q",
        Expr::binary(Element::IntLit(7), BinOp::Div, Element::IntLit(2)),
    );
    b.assign(
        2,
        "m",
        Expr::binary(Element::IntLit(7), BinOp::Mod, Element::IntLit(2)),
    );
    let (_, ram, _) = run(&b.finish());

    assert_eq!(ram.read_by_id("q"), Some(Value::Int(3)));
    assert_eq!(ram.read_by_id("m"), Some(Value::Int(1)));
}

#[test]
fn test_empty_program_completes() {
    let program = ProgramBuilder::new().finish();
    let (out, ram, outcome) = run(&program);

    assert_eq!(outcome, Outcome::Completed);
    assert!(out.is_empty());
    assert!(ram.is_empty());
}
