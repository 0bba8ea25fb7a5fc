// File: src/lib.rs
//
// Library interface for defgraph.
// Exposes modules for integration testing and external use.

pub mod ast;
pub mod dot;
pub mod errors;
pub mod graph;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod server;
pub mod translate;
