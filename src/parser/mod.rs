//! Parser module
//!
//! This module handles parsing tokens into an Abstract Syntax Tree (AST).

pub mod ast;
pub mod parser;
pub mod printer;

pub use ast::{Ast, Decl, Expr, Node, Stmt};
pub use parser::Parser;
pub use printer::render_ast;
