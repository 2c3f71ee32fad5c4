//! Token definitions for the Rill language
//!
//! This module defines all token kinds used in lexical analysis.

use crate::error::SourceLocation;
use std::fmt;

/// A token in the Rill language
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }
}

/// Token kinds in the Rill language
///
/// `Unknown` belongs to the closed enumeration but is never produced by the
/// scanner; malformed input is reified as `Invalid` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords
    Func,
    If,
    Elif,
    Else,
    Return,
    Print,
    For,
    While,
    Break,
    Continue,
    Null,
    True,
    False,

    // Identifiers and literals
    Identifier,
    IntLiteral,
    FloatLiteral,
    StringLiteral,

    // Type names
    TypeInt,
    TypeFloat,
    TypeString,
    TypeBool,
    TypeVoid,

    // Operators
    Equal,        // =
    EqualEqual,   // ==
    NotEqual,     // !=
    Plus,         // +
    Minus,        // -
    Asterisk,     // *
    Slash,        // /
    Greater,      // >
    GreaterEqual, // >=
    Less,         // <
    LessEqual,    // <=
    Percent,      // %
    And,          // &&
    Or,           // ||
    Not,          // !

    // Punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Semicolon,
    Colon,
    Comma,

    // Special
    Eof,
    Unknown,
    Invalid,
}

impl TokenKind {
    /// Reclassify an identifier lexeme as a keyword or type name
    pub fn keyword_from_str(s: &str) -> Option<Self> {
        match s {
            "func" => Some(Self::Func),
            "if" => Some(Self::If),
            "elif" => Some(Self::Elif),
            "else" => Some(Self::Else),
            "return" => Some(Self::Return),
            "print" => Some(Self::Print),
            "for" => Some(Self::For),
            "while" => Some(Self::While),
            "break" => Some(Self::Break),
            "continue" => Some(Self::Continue),
            "null" => Some(Self::Null),
            "true" => Some(Self::True),
            "false" => Some(Self::False),
            "int" => Some(Self::TypeInt),
            "float" => Some(Self::TypeFloat),
            "string" => Some(Self::TypeString),
            "bool" => Some(Self::TypeBool),
            "void" => Some(Self::TypeVoid),
            _ => None,
        }
    }

    /// Diagnostic name of this kind, as printed inside `<...>` in error text
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Func => "FUNC",
            Self::If => "IF",
            Self::Elif => "ELIF",
            Self::Else => "ELSE",
            Self::Return => "RETURN",
            Self::Print => "PRINT",
            Self::For => "FOR",
            Self::While => "WHILE",
            Self::Break => "BREAK",
            Self::Continue => "CONTINUE",
            Self::Null => "NULL",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Identifier => "IDENTIFIER",
            Self::IntLiteral => "INT LITERAL",
            Self::FloatLiteral => "FLOAT LITERAL",
            Self::StringLiteral => "STRING LITERAL",
            Self::TypeInt => "TYPE INT",
            Self::TypeFloat => "TYPE FLOAT",
            Self::TypeString => "TYPE STRING",
            Self::TypeBool => "TYPE BOOL",
            Self::TypeVoid => "TYPE VOID",
            Self::Equal => "EQUAL (=)",
            Self::EqualEqual => "EQUAL EQUAL (==)",
            Self::NotEqual => "NOT EQUAL (!=)",
            Self::Plus => "PLUS (+)",
            Self::Minus => "MINUS (-)",
            Self::Asterisk => "ASTERISK (*)",
            Self::Slash => "SLASH (/)",
            Self::Greater => "GREATER THAN (>)",
            Self::GreaterEqual => "GREATER EQUAL (>=)",
            Self::Less => "LESS THAN (<)",
            Self::LessEqual => "LESS EQUAL (<=)",
            Self::Percent => "MODULO (%)",
            Self::And => "AND (&&)",
            Self::Or => "OR (||)",
            Self::Not => "NOT (!)",
            Self::LeftParen => "LEFT PAREN",
            Self::RightParen => "RIGHT PAREN",
            Self::LeftBrace => "LEFT BRACE",
            Self::RightBrace => "RIGHT BRACE",
            Self::Semicolon => "SEMICOLON",
            Self::Colon => "COLON",
            Self::Comma => "COMMA",
            Self::Eof => "EOF",
            Self::Unknown => "UNKNOWN",
            Self::Invalid => "INVALID",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(TokenKind::keyword_from_str("func"), Some(TokenKind::Func));
        assert_eq!(TokenKind::keyword_from_str("elif"), Some(TokenKind::Elif));
        assert_eq!(
            TokenKind::keyword_from_str("continue"),
            Some(TokenKind::Continue)
        );
        assert_eq!(TokenKind::keyword_from_str("void"), Some(TokenKind::TypeVoid));
        assert_eq!(TokenKind::keyword_from_str("funcs"), None);
        assert_eq!(TokenKind::keyword_from_str("Int"), None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TokenKind::IntLiteral.to_string(), "INT LITERAL");
        assert_eq!(TokenKind::EqualEqual.to_string(), "EQUAL EQUAL (==)");
        assert_eq!(TokenKind::Percent.to_string(), "MODULO (%)");
        assert_eq!(TokenKind::Eof.to_string(), "EOF");
    }

    #[test]
    fn test_token_new() {
        let token = Token::new(TokenKind::Identifier, "counter", SourceLocation::at(3, 7));
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.text, "counter");
        assert_eq!(token.location.line, 3);
    }
}
