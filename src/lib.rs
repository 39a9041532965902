//! `pyrite` library crate.
//!
//! High-level layout:
//! - frontend: `lexer` turns source text into a token stream with synthetic
//!   Indent/Dedent/Newline markers; the parser consuming it lives outside
//!   this crate and hands back an `ast::Statement` tree
//! - shared runtime value/object model: `runtime`
//! - tree-walking evaluation over parser-produced statements: `ast`
pub mod ast;
pub mod lexer;
pub mod runtime;
