// File: src/ast.rs
//
// Abstract syntax tree for definition expressions.
// Defines the structure of parsed definitions.
//
// A definition is a single expression; there are no statements. Every
// shape the parser can produce is listed here, so the translator's match
// is exhaustive by construction.

/// A parsed definition expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A bare name: `balance`, `owners`
    Identifier(String),
    /// A 64-bit integer literal
    Int(i64),
    /// A double-quoted string literal, stored unescaped
    String(String),
    /// `true` or `false`
    Bool(bool),
    /// An ordered element list: `[1, 2, 3]`
    Array(Vec<Expr>),
    /// A unary operator applied to its operand: `!ready`, `-1`
    Prefix { op: String, right: Box<Expr> },
    /// A binary operator with ordered operands: `1 + 2`
    Infix {
        op: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// A call of a named function: `any(2, owners)`.
    /// The callee is always a plain identifier.
    Call { function: String, args: Vec<Expr> },
}
