//! # Rill Programming Language
//!
//! The front end of Rill, a small imperative language with:
//! - C-style blocks and control flow (`if`/`elif`/`else`, `while`, `for`)
//! - Explicit primitive types (`int`, `float`, `string`, `bool`, `void`)
//! - Function declarations with typed parameters and return types
//!
//! ## Architecture
//!
//! The front end is organized into three modules:
//! - `lexer`: Tokenization of source code
//! - `parser`: Parsing tokens into an Abstract Syntax Tree (AST)
//! - `error`: Error handling and diagnostics
//!
//! Lexing runs to completion before parsing begins; the parser borrows the
//! finalized token sequence and walks it once. Later stages (type checking,
//! execution) consume the AST produced here.

pub mod error;
pub mod lexer;
pub mod parser;

// Re-export commonly used types
pub use error::{RillError, RillResult, SourceLocation};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{Ast, Parser};

/// Version of the Rill language
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse a Rill program from source code
///
/// This is the main entry point of the front end. It performs lexical
/// analysis followed by parsing and returns the program AST.
///
/// # Arguments
///
/// * `source` - The source code to parse
/// * `filename` - Optional filename for error reporting
///
/// # Returns
///
/// Returns the parsed [`Ast`] on success, or the first `RillError`
/// encountered in left-to-right token order. No partial AST is produced
/// after a failure.
pub fn parse(source: &str, filename: Option<&str>) -> RillResult<Ast> {
    // Phase 1: Lexical Analysis
    let mut lexer = Lexer::new(source, filename);
    lexer.tokenize();

    // Phase 2: Parsing
    Parser::new(lexer.tokens()).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_parse_pipeline() {
        let ast = parse("func main(): void { print(\"hello\"); }", Some("hello.rill")).unwrap();
        assert_eq!(ast.len(), 1);
    }

    #[test]
    fn test_parse_error_carries_filename() {
        let err = parse("x: int = ;", Some("bad.rill")).unwrap_err();
        let location = err.location().expect("parse error should have a location");
        assert_eq!(location.filename.as_deref(), Some("bad.rill"));
    }
}
