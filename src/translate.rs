// File: src/translate.rs
//
// The expression-to-graph translator.
// Walks a parsed definition and renders it into a GraphContext, producing
// one labeled node per meaningful element and directed edges from parents
// to children.

use crate::ast::Expr;
use crate::errors::DefGraphError;
use crate::graph::{GraphContext, NodeColor, NodeId};

/// Renders `expr` into `ctx` and returns the node that represents the
/// whole expression, so an enclosing expression can attach an edge to it.
///
/// Identifiers and literals become single default-colored nodes labeled
/// with their value. Composite expressions add a structural parent node
/// (`array` in red, the operator text in blue, `call` in green) and wire
/// children in source order, left to right; primitive creation order
/// follows the same walk, so equal definitions always yield identical
/// contexts. Every label is the canonical text form: `true`/`false` for
/// booleans, base-10 for integers, the unquoted value for strings.
///
/// The first factory failure aborts the walk immediately with its error;
/// no further primitives are created and the partially filled context is
/// the caller's to discard.
pub fn translate(expr: &Expr, ctx: &mut GraphContext) -> Result<NodeId, DefGraphError> {
    match expr {
        Expr::Identifier(name) => ctx.create_node(name.clone()),
        Expr::Int(value) => ctx.create_node(value.to_string()),
        Expr::String(value) => ctx.create_node(value.clone()),
        Expr::Bool(value) => ctx.create_node(value.to_string()),
        Expr::Array(elements) => {
            let array = ctx.create_node("array")?;
            ctx.set_node_color(array, NodeColor::Red)?;
            for element in elements {
                let child = translate(element, ctx)?;
                ctx.create_edge("", array, child)?;
            }
            Ok(array)
        }
        Expr::Prefix { op, right } => {
            let right = translate(right, ctx)?;
            let operator = ctx.create_node(op.clone())?;
            ctx.set_node_color(operator, NodeColor::Blue)?;
            ctx.create_edge("", operator, right)?;
            Ok(operator)
        }
        Expr::Infix { op, left, right } => {
            let left = translate(left, ctx)?;
            let right = translate(right, ctx)?;
            let operator = ctx.create_node(op.clone())?;
            ctx.set_node_color(operator, NodeColor::Blue)?;
            ctx.create_edge("", operator, left)?;
            ctx.create_edge("", operator, right)?;
            Ok(operator)
        }
        Expr::Call { function, args } => {
            let call = ctx.create_node("call")?;
            ctx.set_node_color(call, NodeColor::Green)?;
            let callee = ctx.create_node(function.clone())?;
            ctx.create_edge("fn", call, callee)?;
            let arg_list = ctx.create_node("args")?;
            ctx.create_edge("", call, arg_list)?;
            for arg in args {
                let child = translate(arg, ctx)?;
                ctx.create_edge("", arg_list, child)?;
            }
            Ok(call)
        }
    }
}
