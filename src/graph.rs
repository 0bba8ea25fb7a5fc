// File: src/graph.rs
//
// Graph primitives for rendered definitions.
// A GraphContext owns the nodes and edges produced by one translation and
// hands out opaque ids for them. Ids come from a per-context monotonic
// counter, so two translations of the same definition produce identical
// graphs and nothing is shared between contexts.

use crate::errors::DefGraphError;
use serde::Serialize;

/// Handle to a node registered in one [`GraphContext`].
///
/// Handles are only meaningful to the context that issued them. A handle
/// whose id falls outside the issuing context is rejected by the factory
/// methods; a handle from another context that happens to be in range is
/// indistinguishable from a local one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Handle to an edge registered in one [`GraphContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EdgeId(usize);

/// Display color of a node. `Default` leaves the choice to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeColor {
    #[default]
    Default,
    Red,
    Blue,
    Green,
}

/// A labeled node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub label: String,
    pub color: NodeColor,
}

/// A directed edge. `label` is `None` for plain structural edges.
/// Parallel edges between the same pair of nodes are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Accumulates the nodes and edges of one rendered definition.
///
/// All allocation goes through [`create_node`](GraphContext::create_node)
/// and [`create_edge`](GraphContext::create_edge), which keep insertion
/// order. Serializers walk nodes in id order and edges in creation order,
/// so output is deterministic for a given definition.
#[derive(Debug, Default, Serialize)]
pub struct GraphContext {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    #[serde(skip)]
    limit: Option<usize>,
}

impl GraphContext {
    /// Creates an empty context with no capacity limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context that accepts at most `limit` primitives (nodes
    /// plus edges), modeling a renderer-imposed capacity. The allocation
    /// that would exceed the limit fails with a graph error and leaves
    /// the context unchanged.
    pub fn with_primitive_limit(limit: usize) -> Self {
        GraphContext {
            nodes: Vec::new(),
            edges: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Registers a node with the given display label and returns its
    /// handle. Every call yields a fresh id; labels are free text and may
    /// repeat.
    pub fn create_node(&mut self, label: impl Into<String>) -> Result<NodeId, DefGraphError> {
        self.check_capacity("node")?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(GraphNode {
            label: label.into(),
            color: NodeColor::Default,
        });
        Ok(id)
    }

    /// Registers a directed edge from `from` to `to` and returns its
    /// handle. An empty `label` produces an unlabeled edge. Both
    /// endpoints must have been issued by this context.
    pub fn create_edge(
        &mut self,
        label: &str,
        from: NodeId,
        to: NodeId,
    ) -> Result<EdgeId, DefGraphError> {
        self.check_capacity("edge")?;
        self.check_member(from)?;
        self.check_member(to)?;
        let id = EdgeId(self.edges.len());
        let label = if label.is_empty() {
            None
        } else {
            Some(label.to_string())
        };
        self.edges.push(GraphEdge { from, to, label });
        Ok(id)
    }

    /// Sets the display color of an existing node
    pub fn set_node_color(&mut self, node: NodeId, color: NodeColor) -> Result<(), DefGraphError> {
        self.check_member(node)?;
        self.nodes[node.index()].color = color;
        Ok(())
    }

    /// The node behind a handle, if the handle belongs to this context
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.index())
    }

    /// All nodes in id order
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// All edges in creation order
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Total primitives allocated so far (nodes plus edges)
    pub fn primitive_count(&self) -> usize {
        self.nodes.len() + self.edges.len()
    }

    fn check_capacity(&self, what: &str) -> Result<(), DefGraphError> {
        match self.limit {
            Some(limit) if self.primitive_count() >= limit => Err(DefGraphError::primitive(
                format!("cannot allocate {}: primitive limit of {} reached", what, limit),
            )),
            _ => Ok(()),
        }
    }

    fn check_member(&self, node: NodeId) -> Result<(), DefGraphError> {
        if node.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(DefGraphError::primitive(format!(
                "node id {} does not belong to this graph context",
                node.index()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ids_are_monotonic_and_unique() {
        let mut ctx = GraphContext::new();
        let a = ctx.create_node("a").unwrap();
        let b = ctx.create_node("b").unwrap();
        let c = ctx.create_node("c").unwrap();
        assert!(a < b && b < c);
        assert_eq!(ctx.node_count(), 3);
        assert_eq!(ctx.node(b).unwrap().label, "b");
    }

    #[test]
    fn test_new_nodes_are_default_colored() {
        let mut ctx = GraphContext::new();
        let id = ctx.create_node("x").unwrap();
        assert_eq!(ctx.node(id).unwrap().color, NodeColor::Default);
        ctx.set_node_color(id, NodeColor::Red).unwrap();
        assert_eq!(ctx.node(id).unwrap().color, NodeColor::Red);
    }

    #[test]
    fn test_empty_edge_label_means_unlabeled() {
        let mut ctx = GraphContext::new();
        let a = ctx.create_node("a").unwrap();
        let b = ctx.create_node("b").unwrap();
        ctx.create_edge("", a, b).unwrap();
        ctx.create_edge("fn", a, b).unwrap();
        assert_eq!(ctx.edges()[0].label, None);
        assert_eq!(ctx.edges()[1].label, Some("fn".to_string()));
    }

    #[test]
    fn test_parallel_edges_are_allowed() {
        let mut ctx = GraphContext::new();
        let a = ctx.create_node("a").unwrap();
        let b = ctx.create_node("b").unwrap();
        ctx.create_edge("", a, b).unwrap();
        ctx.create_edge("", a, b).unwrap();
        assert_eq!(ctx.edge_count(), 2);
    }

    #[test]
    fn test_primitive_limit_is_enforced() {
        let mut ctx = GraphContext::with_primitive_limit(3);
        let a = ctx.create_node("a").unwrap();
        let b = ctx.create_node("b").unwrap();
        ctx.create_edge("", a, b).unwrap();
        let err = ctx.create_node("c").unwrap_err();
        assert!(matches!(err, DefGraphError::Primitive(_)));
        // the failed allocation left nothing behind
        assert_eq!(ctx.primitive_count(), 3);
    }

    #[test]
    fn test_zero_limit_rejects_first_allocation() {
        let mut ctx = GraphContext::with_primitive_limit(0);
        assert!(ctx.create_node("a").is_err());
        assert_eq!(ctx.primitive_count(), 0);
    }

    #[test]
    fn test_out_of_range_handle_is_rejected() {
        let mut ctx = GraphContext::new();
        let a = ctx.create_node("a").unwrap();

        let mut other = GraphContext::new();
        other.create_node("x").unwrap();
        let foreign = other.create_node("y").unwrap();

        let err = ctx.create_edge("", a, foreign).unwrap_err();
        assert!(matches!(err, DefGraphError::Primitive(_)));
        assert_eq!(ctx.edge_count(), 0);
    }

    #[test]
    fn test_color_change_does_not_consume_capacity() {
        let mut ctx = GraphContext::with_primitive_limit(1);
        let a = ctx.create_node("a").unwrap();
        ctx.set_node_color(a, NodeColor::Green).unwrap();
        assert_eq!(ctx.primitive_count(), 1);
    }
}
