//! Rill Language CLI
//!
//! Command-line interface for the Rill front end: parses a source file and
//! prints the resulting AST, or dumps the token stream with `--tokens`.

use std::env;
use std::fs;
use std::process;

use rill_lang::error::Diagnostic;
use rill_lang::parser::render_ast;
use rill_lang::{parse, Lexer, RillError, RillResult, VERSION};

fn main() {
    let args: Vec<String> = env::args().collect();

    // Check for flags
    let mut show_tokens = false;
    let mut show_help = false;
    let mut filename: Option<&String> = None;

    for arg in &args[1..] {
        match arg.as_str() {
            "--tokens" | "-t" => show_tokens = true,
            "--help" | "-h" => show_help = true,
            _ if arg.starts_with('-') => {
                eprintln!("Unknown flag: {}", arg);
                print_usage();
                process::exit(1);
            }
            _ => filename = Some(arg),
        }
    }

    if show_help {
        print_help();
        return;
    }

    let Some(file) = filename else {
        eprintln!("Error: No input file specified");
        print_usage();
        process::exit(1);
    };

    let result = if show_tokens {
        show_file_tokens(file)
    } else {
        parse_file(file)
    };

    // Single fatal handler: the first error reported wins and the process
    // terminates with a non-zero status.
    if let Err(e) = result {
        match fs::read_to_string(file) {
            Ok(source) => eprintln!("{}", Diagnostic::with_source(e, &source)),
            Err(_) => eprintln!("{}", Diagnostic::new(e)),
        }
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: rill [OPTIONS] <script>");
    eprintln!("       rill --help");
}

fn print_help() {
    println!("Rill v{} - language front end", VERSION);
    println!();
    println!("USAGE:");
    println!("    rill [OPTIONS] <script>");
    println!();
    println!("OPTIONS:");
    println!("    -t, --tokens    Show tokenization output (lexer only)");
    println!("    -h, --help      Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("    rill script.rill           Parse a script and print its AST");
    println!("    rill --tokens script.rill  Show tokens from the lexer");
}

/// Parse a Rill script and print the AST tree
fn parse_file(filename: &str) -> RillResult<()> {
    let source = read_source(filename)?;
    let ast = parse(&source, Some(filename))?;
    print!("{}", render_ast(&ast));
    Ok(())
}

/// Show tokens from lexing a file
fn show_file_tokens(filename: &str) -> RillResult<()> {
    let source = read_source(filename)?;

    let mut lexer = Lexer::new(&source, Some(filename));
    lexer.tokenize();

    println!("Tokens for '{}':", filename);
    for token in lexer.tokens() {
        println!(
            "({:2}:{:<2} | {:16} | {} )",
            token.location.line, token.location.column, token.kind, token.text
        );
    }
    println!("Total tokens: {}", lexer.tokens().len());

    Ok(())
}

fn read_source(filename: &str) -> RillResult<String> {
    fs::read_to_string(filename)
        .map_err(|e| RillError::io_error(format!("Failed to read file '{}': {}", filename, e)))
}
