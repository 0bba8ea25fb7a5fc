// File: src/dot.rs
//
// Graphviz DOT serialization for a populated graph context.
// The output carries structure and colors only; layout is left entirely
// to the consumer (`dot`, viz.js, and friends).

use crate::graph::{GraphContext, NodeColor};
use std::fmt::Write as FmtWrite;

/// Renders `ctx` as Graphviz DOT source.
///
/// Nodes are written in id order as `n0`, `n1`, ... followed by edges in
/// creation order, so the same context always serializes to the same
/// text. The color attribute is only emitted for non-default colors.
pub fn to_dot(ctx: &GraphContext) -> String {
    let mut output = String::from("digraph definition {\n");

    for (i, node) in ctx.nodes().iter().enumerate() {
        let _ = write!(output, "    n{} [label=\"{}\"", i, escape_label(&node.label));
        if let Some(color) = color_name(node.color) {
            let _ = write!(output, ", color={}", color);
        }
        output.push_str("];\n");
    }

    for edge in ctx.edges() {
        let _ = write!(output, "    n{} -> n{}", edge.from.index(), edge.to.index());
        if let Some(label) = &edge.label {
            let _ = write!(output, " [label=\"{}\"]", escape_label(label));
        }
        output.push_str(";\n");
    }

    output.push_str("}\n");
    output
}

fn color_name(color: NodeColor) -> Option<&'static str> {
    match color {
        NodeColor::Default => None,
        NodeColor::Red => Some("red"),
        NodeColor::Blue => Some("blue"),
        NodeColor::Green => Some("green"),
    }
}

/// Escapes a label for use inside a double-quoted DOT string.
/// Backslashes first, then quotes and newlines.
fn escape_label(label: &str) -> String {
    label
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphContext;

    #[test]
    fn test_renders_nodes_then_edges() {
        let mut ctx = GraphContext::new();
        let one = ctx.create_node("1").unwrap();
        let two = ctx.create_node("2").unwrap();
        let plus = ctx.create_node("+").unwrap();
        ctx.set_node_color(plus, NodeColor::Blue).unwrap();
        ctx.create_edge("", plus, one).unwrap();
        ctx.create_edge("", plus, two).unwrap();

        let dot = to_dot(&ctx);
        let lines: Vec<&str> = dot.lines().collect();
        assert_eq!(
            lines,
            vec![
                "digraph definition {",
                "    n0 [label=\"1\"];",
                "    n1 [label=\"2\"];",
                "    n2 [label=\"+\", color=blue];",
                "    n2 -> n0;",
                "    n2 -> n1;",
                "}",
            ]
        );
    }

    #[test]
    fn test_edge_labels_are_emitted() {
        let mut ctx = GraphContext::new();
        let call = ctx.create_node("call").unwrap();
        let callee = ctx.create_node("foo").unwrap();
        ctx.create_edge("fn", call, callee).unwrap();

        let dot = to_dot(&ctx);
        assert!(dot.contains("n0 -> n1 [label=\"fn\"];"));
    }

    #[test]
    fn test_labels_are_escaped() {
        let mut ctx = GraphContext::new();
        ctx.create_node("say \"hi\"\nnow").unwrap();

        let dot = to_dot(&ctx);
        assert!(dot.contains(r#"n0 [label="say \"hi\"\nnow"];"#));
    }

    #[test]
    fn test_backslash_escaped_before_quote() {
        assert_eq!(escape_label(r#"a\"b"#), r#"a\\\"b"#);
    }

    #[test]
    fn test_empty_context_is_valid_dot() {
        let ctx = GraphContext::new();
        assert_eq!(to_dot(&ctx), "digraph definition {\n}\n");
    }
}
