//! Expression AST shared between the parser and the evaluator.
//!
//! The tree is finite, immutable, and acyclic: built once by the parser,
//! walked read-only by the evaluator, so one `Program` can be evaluated any
//! number of times against different contexts.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Unary operators.
pub enum UnaryOp {
    /// Logical negation (`!x`).
    Not,
    /// Numeric identity (`+x`, coerces toward a number).
    Plus,
    /// Numeric negation (`-x`).
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Binary operators. Precedence is fixed by the grammar, not stored here.
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `??`
    Coalesce,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Expression AST node.
pub enum Expr {
    /// Number literal.
    Number(f64),
    /// String literal with the quotes stripped; escape sequences are kept
    /// as written, never decoded.
    String(String),
    /// Boolean literal.
    Bool(bool),
    /// Null literal.
    Null,
    /// Identifier, resolved at evaluation time against context then
    /// builtins.
    Ident(String),
    /// Unary operation.
    Unary {
        /// Unary operator.
        op: UnaryOp,
        /// Operand expression.
        operand: Box<Expr>,
    },
    /// Binary operation.
    Binary {
        /// Binary operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
    /// Parenthesized expression. Kept as its own node so AST equality and
    /// pretty-printing can tell `(a)` from `a`; evaluation sees through it.
    Paren(Box<Expr>),
    /// Member access (`a.b`, `a?.b`, `a[b]`).
    Member {
        /// The object being accessed.
        object: Box<Expr>,
        /// An `Ident` node for dot access, or an arbitrary expression for
        /// bracket access.
        property: Box<Expr>,
        /// `?.` access: short-circuits to undefined on a nullish object.
        optional: bool,
    },
    /// Function call.
    Call {
        /// The callee expression.
        callee: Box<Expr>,
        /// Argument expressions, evaluated left to right.
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// AST root. The language has no sequencing; a program is one expression.
pub struct Program {
    /// The root expression.
    pub expression: Expr,
}
