//! Expression trees.
//!
//! Expressions are deliberately shallow: a binary node combines two
//! unary operands, never nested subtrees. Elements are identifiers or
//! literals.

use std::fmt;

/// A basic element: an identifier or a literal.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Identifier(String),
    IntLit(i64),
    RealLit(f64),
    StrLit(String),
    True,
    False,
    None,
}

impl Element {
    /// Convenience constructor for identifier elements.
    pub fn ident(name: &str) -> Self {
        Element::Identifier(name.to_string())
    }

    /// Convenience constructor for string literal elements.
    pub fn str_lit(text: &str) -> Self {
        Element::StrLit(text.to_string())
    }
}

/// A unary expression: a bare element, an address-of, a pointer
/// dereference, or a signed element.
#[derive(Clone, Debug, PartialEq)]
pub enum UnaryExpr {
    Element(Element),
    /// `&x` - the address of the cell holding `x`.
    AddressOf(String),
    /// `*p` - the value of the cell `p` points at.
    PtrDeref(String),
    /// `+e` - numeric identity.
    Positive(Element),
    /// `-e` - numeric negation.
    Negative(Element),
}

impl From<Element> for UnaryExpr {
    fn from(element: Element) -> Self {
        UnaryExpr::Element(element)
    }
}

/// Binary operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Pow,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinOp {
    /// Returns true for `==`, `!=`, `<`, `<=`, `>`, `>=`.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::NotEq | BinOp::Lt | BinOp::LtEq | BinOp::Gt | BinOp::GtEq
        )
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Pow => "**",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Lt => "<",
            BinOp::LtEq => "<=",
            BinOp::Gt => ">",
            BinOp::GtEq => ">=",
        };
        write!(f, "{symbol}")
    }
}

/// An expression: a single unary operand, or two combined by a binary
/// operator.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Unary(UnaryExpr),
    Binary {
        lhs: UnaryExpr,
        op: BinOp,
        rhs: UnaryExpr,
    },
}

impl Expr {
    /// Wraps an element as a unary expression.
    pub fn element(element: Element) -> Self {
        Expr::Unary(UnaryExpr::Element(element))
    }

    /// Builds a binary expression from two unary operands.
    pub fn binary(lhs: impl Into<UnaryExpr>, op: BinOp, rhs: impl Into<UnaryExpr>) -> Self {
        Expr::Binary {
            lhs: lhs.into(),
            op,
            rhs: rhs.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_constructors() {
        assert_eq!(
            Element::ident("x"),
            Element::Identifier("x".to_string())
        );
        assert_eq!(Element::str_lit("hi"), Element::StrLit("hi".to_string()));
    }

    #[test]
    fn test_binary_constructor() {
        let e = Expr::binary(Element::IntLit(3), BinOp::Add, Element::IntLit(4));
        match e {
            Expr::Binary { op, .. } => assert_eq!(op, BinOp::Add),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_comparison_classification() {
        assert!(BinOp::Eq.is_comparison());
        assert!(BinOp::GtEq.is_comparison());
        assert!(!BinOp::Add.is_comparison());
        assert!(!BinOp::Pow.is_comparison());
    }

    #[test]
    fn test_op_display() {
        assert_eq!(BinOp::Pow.to_string(), "**");
        assert_eq!(BinOp::NotEq.to_string(), "!=");
    }
}
