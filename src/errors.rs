// File: src/errors.rs
//
// Error types for defgraph.
// Everything that can go wrong while turning a definition into a graph
// description is reported through one enum so the CLI, REPL, and web
// wrapper can surface a single message string.

use std::fmt;

/// An error produced while parsing a definition or building its graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefGraphError {
    /// The definition text could not be tokenized or parsed.
    /// The message carries line/column information where known.
    Parse(String),
    /// The graph context rejected a primitive operation: allocation past
    /// the context's capacity, or a node handle that does not belong to
    /// the context.
    Primitive(String),
}

impl DefGraphError {
    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        DefGraphError::Parse(message.into())
    }

    /// Create a graph-primitive error
    pub fn primitive(message: impl Into<String>) -> Self {
        DefGraphError::Primitive(message.into())
    }
}

impl fmt::Display for DefGraphError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DefGraphError::Parse(message) => write!(f, "parse error: {}", message),
            DefGraphError::Primitive(message) => write!(f, "graph error: {}", message),
        }
    }
}

impl std::error::Error for DefGraphError {}
