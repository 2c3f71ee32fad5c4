//! Lexer/Scanner implementation for the Rill language
//!
//! This module implements lexical analysis, converting source code into
//! tokens. The scanner never fails: malformed input (an unknown character or
//! an unterminated string) is reified as an `Invalid` token and left for the
//! parser to reject.

use super::token::{Token, TokenKind};
use crate::error::SourceLocation;

/// Lexer for Rill source code
///
/// Owns the source buffer and the token sequence it produces. The parser
/// borrows the finalized sequence via [`Lexer::tokens`].
pub struct Lexer {
    source: Vec<char>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    column: usize,
    filename: Option<String>,
}

impl Lexer {
    /// Create a new lexer
    pub fn new(source: &str, filename: Option<&str>) -> Self {
        Self {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            column: 0,
            filename: filename.map(|s| s.to_string()),
        }
    }

    /// Tokenize the entire source, ending with a terminal `Eof` token
    pub fn tokenize(&mut self) {
        loop {
            self.skip_whitespace();
            if self.is_at_end() {
                break;
            }
            self.start = self.current;
            self.scan_token();
        }

        let location = SourceLocation::new(self.line, self.column, self.filename.clone());
        self.tokens.push(Token::new(TokenKind::Eof, "EOF", location));
    }

    /// The finalized token sequence, terminated by exactly one `Eof` token
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Scan a single token
    fn scan_token(&mut self) {
        let location = SourceLocation::new(self.line, self.column + 1, self.filename.clone());
        let c = self.advance();

        match c {
            c if c.is_ascii_alphabetic() || c == '_' => self.scan_identifier(location),

            c if c.is_ascii_digit() => self.scan_number(location),

            // A sign belongs to a numeric literal only where a binary
            // operator cannot appear.
            '+' | '-' if self.peek().is_ascii_digit() && self.sign_starts_literal() => {
                self.scan_number(location)
            }

            '"' => self.scan_string(),

            // Two-character operators before their one-character prefixes
            '=' => {
                if self.match_char('=') {
                    self.add_token(TokenKind::EqualEqual, location)
                } else {
                    self.add_token(TokenKind::Equal, location)
                }
            }

            '!' => {
                if self.match_char('=') {
                    self.add_token(TokenKind::NotEqual, location)
                } else {
                    self.add_token(TokenKind::Not, location)
                }
            }

            '<' => {
                if self.match_char('=') {
                    self.add_token(TokenKind::LessEqual, location)
                } else {
                    self.add_token(TokenKind::Less, location)
                }
            }

            '>' => {
                if self.match_char('=') {
                    self.add_token(TokenKind::GreaterEqual, location)
                } else {
                    self.add_token(TokenKind::Greater, location)
                }
            }

            '&' => {
                if self.match_char('&') {
                    self.add_token(TokenKind::And, location)
                } else {
                    self.add_token(TokenKind::Invalid, location)
                }
            }

            '|' => {
                if self.match_char('|') {
                    self.add_token(TokenKind::Or, location)
                } else {
                    self.add_token(TokenKind::Invalid, location)
                }
            }

            // Single-character tokens
            '+' => self.add_token(TokenKind::Plus, location),
            '-' => self.add_token(TokenKind::Minus, location),
            '*' => self.add_token(TokenKind::Asterisk, location),
            '/' => self.add_token(TokenKind::Slash, location),
            '%' => self.add_token(TokenKind::Percent, location),
            '(' => self.add_token(TokenKind::LeftParen, location),
            ')' => self.add_token(TokenKind::RightParen, location),
            '{' => self.add_token(TokenKind::LeftBrace, location),
            '}' => self.add_token(TokenKind::RightBrace, location),
            ';' => self.add_token(TokenKind::Semicolon, location),
            ':' => self.add_token(TokenKind::Colon, location),
            ',' => self.add_token(TokenKind::Comma, location),

            // Anything unrecognized becomes an Invalid token carrying the
            // offending character.
            _ => self.add_token(TokenKind::Invalid, location),
        }
    }

    /// Scan an identifier, reclassifying keywords and type names
    fn scan_identifier(&mut self, location: SourceLocation) {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let lexeme: String = self.source[self.start..self.current].iter().collect();
        let kind = TokenKind::keyword_from_str(&lexeme).unwrap_or(TokenKind::Identifier);
        self.tokens.push(Token::new(kind, lexeme, location));
    }

    /// Scan a numeric literal (integer or float); any leading sign has
    /// already been consumed
    fn scan_number(&mut self, location: SourceLocation) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        // A decimal point only belongs to the literal when a digit follows
        let is_float = if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
            true
        } else {
            false
        };

        let kind = if is_float {
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntLiteral
        };
        self.add_token(kind, location);
    }

    /// Scan a string literal; the opening quote has been consumed
    ///
    /// The token text is the raw text between the quotes. A backslash skips
    /// the following character without interpreting it, so escape sequences
    /// survive verbatim.
    fn scan_string(&mut self) {
        let location = SourceLocation::new(self.line, self.column + 1, self.filename.clone());
        let content_start = self.current;

        while !self.is_at_end() && self.peek() != '"' {
            if self.peek() == '\\' {
                self.advance();
                if self.is_at_end() {
                    break;
                }
            }
            self.advance();
        }

        if self.is_at_end() {
            self.tokens
                .push(Token::new(TokenKind::Invalid, "Unterminated string", location));
            return;
        }

        let text: String = self.source[content_start..self.current].iter().collect();
        self.advance(); // closing quote
        self.tokens
            .push(Token::new(TokenKind::StringLiteral, text, location));
    }

    /// Whether a `+`/`-` at the current position can start a signed literal
    ///
    /// True unless the previously emitted token can end an expression, in
    /// which case the sign must be a binary operator: `1+2` stays
    /// `1`, `+`, `2` while `x = -5` keeps `-5` whole.
    fn sign_starts_literal(&self) -> bool {
        match self.tokens.last() {
            Some(token) => !matches!(
                token.kind,
                TokenKind::Identifier
                    | TokenKind::IntLiteral
                    | TokenKind::FloatLiteral
                    | TokenKind::StringLiteral
                    | TokenKind::RightParen
                    | TokenKind::True
                    | TokenKind::False
                    | TokenKind::Null
            ),
            None => true,
        }
    }

    /// Add a token whose text is the current lexeme
    fn add_token(&mut self, kind: TokenKind, location: SourceLocation) {
        let text: String = self.source[self.start..self.current].iter().collect();
        self.tokens.push(Token::new(kind, text, location));
    }

    /// Advance to the next character
    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        c
    }

    /// Check if the next character matches and consume it if so
    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.source[self.current] != expected {
            false
        } else {
            self.advance();
            true
        }
    }

    /// Peek at the current character without consuming it
    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    /// Peek at the next character without consuming it
    fn peek_next(&self) -> char {
        if self.current + 1 >= self.source.len() {
            '\0'
        } else {
            self.source[self.current + 1]
        }
    }

    /// Skip spaces, tabs, carriage returns, and newlines
    fn skip_whitespace(&mut self) {
        while !self.is_at_end() {
            match self.peek() {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                _ => break,
            }
        }
    }

    /// Check if we've reached the end of the source
    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source, None);
        lexer.tokenize();
        lexer.tokens().to_vec()
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_source() {
        let tokens = lex("");
        assert_eq!(tokens.len(), 1); // Just EOF
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(tokens[0].text, "EOF");
    }

    #[test]
    fn test_single_character_tokens() {
        assert_eq!(
            kinds("( ) { } ; : , * / %"),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::Semicolon,
                TokenKind::Colon,
                TokenKind::Comma,
                TokenKind::Asterisk,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_two_character_tokens() {
        assert_eq!(
            kinds("== != <= >= && ||"),
            vec![
                TokenKind::EqualEqual,
                TokenKind::NotEqual,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_bang_alone_is_not() {
        let tokens = lex("!x");
        assert_eq!(tokens[0].kind, TokenKind::Not);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_lone_ampersand_and_pipe_are_invalid() {
        let tokens = lex("& |");
        assert_eq!(tokens[0].kind, TokenKind::Invalid);
        assert_eq!(tokens[0].text, "&");
        assert_eq!(tokens[1].kind, TokenKind::Invalid);
        assert_eq!(tokens[1].text, "|");
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("func if elif else return print for while break continue null true false"),
            vec![
                TokenKind::Func,
                TokenKind::If,
                TokenKind::Elif,
                TokenKind::Else,
                TokenKind::Return,
                TokenKind::Print,
                TokenKind::For,
                TokenKind::While,
                TokenKind::Break,
                TokenKind::Continue,
                TokenKind::Null,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_type_names() {
        assert_eq!(
            kinds("int float string bool void"),
            vec![
                TokenKind::TypeInt,
                TokenKind::TypeFloat,
                TokenKind::TypeString,
                TokenKind::TypeBool,
                TokenKind::TypeVoid,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers() {
        let tokens = lex("foo bar_baz _private myVar123 iffy");
        for token in &tokens[..5] {
            assert_eq!(token.kind, TokenKind::Identifier);
        }
        assert_eq!(tokens[0].text, "foo");
        assert_eq!(tokens[2].text, "_private");
        assert_eq!(tokens[4].text, "iffy");
    }

    #[test]
    fn test_integer_literals() {
        let tokens = lex("0 42 123456");
        assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[0].text, "0");
        assert_eq!(tokens[1].text, "42");
        assert_eq!(tokens[2].text, "123456");
    }

    #[test]
    fn test_float_literals() {
        let tokens = lex("3.14 0.5 123.456");
        for token in &tokens[..3] {
            assert_eq!(token.kind, TokenKind::FloatLiteral);
        }
        assert_eq!(tokens[0].text, "3.14");
        assert_eq!(tokens[2].text, "123.456");
    }

    #[test]
    fn test_trailing_dot_is_not_a_float() {
        let tokens = lex("7.");
        assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[0].text, "7");
        assert_eq!(tokens[1].kind, TokenKind::Invalid);
        assert_eq!(tokens[1].text, ".");
    }

    #[test]
    fn test_arithmetic_stays_binary() {
        // The `+` before `2` must remain an operator, not a literal sign
        let tokens = lex("1+2*3");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::IntLiteral,
                TokenKind::Plus,
                TokenKind::IntLiteral,
                TokenKind::Asterisk,
                TokenKind::IntLiteral,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[0].text, "1");
        assert_eq!(tokens[2].text, "2");
        assert_eq!(tokens[4].text, "3");
    }

    #[test]
    fn test_signed_literal_after_assignment() {
        let tokens = lex("x = -5;");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].kind, TokenKind::Equal);
        assert_eq!(tokens[2].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[2].text, "-5");
        assert_eq!(tokens[3].kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_signed_literal_in_arg_list() {
        let tokens = lex("f(1, -2)");
        assert_eq!(tokens[4].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[4].text, "-2");
    }

    #[test]
    fn test_minus_after_identifier_is_binary() {
        let tokens = lex("a -5");
        assert_eq!(tokens[1].kind, TokenKind::Minus);
        assert_eq!(tokens[2].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[2].text, "5");
    }

    #[test]
    fn test_string_literals() {
        let tokens = lex(r#""hello" "foo bar""#);
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].text, "foo bar");
    }

    #[test]
    fn test_string_escapes_kept_raw() {
        // Escapes are skipped, not interpreted: the raw text survives
        let tokens = lex(r#""say \"hi\"" "tab\there""#);
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].text, r#"say \"hi\""#);
        assert_eq!(tokens[1].text, r"tab\there");
    }

    #[test]
    fn test_unterminated_string() {
        let tokens = lex("\"abc");
        assert_eq!(tokens[0].kind, TokenKind::Invalid);
        assert_eq!(tokens[0].text, "Unterminated string");
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn test_unknown_character() {
        let tokens = lex("x = @;");
        assert_eq!(tokens[2].kind, TokenKind::Invalid);
        assert_eq!(tokens[2].text, "@");
    }

    #[test]
    fn test_line_and_column_tracking() {
        let tokens = lex("x\n  y");
        assert_eq!(tokens[0].location.line, 1);
        assert_eq!(tokens[0].location.column, 1);
        assert_eq!(tokens[1].location.line, 2);
        assert_eq!(tokens[1].location.column, 3);
    }

    #[test]
    fn test_var_decl_statement() {
        let tokens = lex("count: int = 42;");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "count");
        assert_eq!(tokens[1].kind, TokenKind::Colon);
        assert_eq!(tokens[2].kind, TokenKind::TypeInt);
        assert_eq!(tokens[3].kind, TokenKind::Equal);
        assert_eq!(tokens[4].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[5].kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_function_header() {
        let tokens = lex("func add(a: int, b: int): int {");
        assert_eq!(tokens[0].kind, TokenKind::Func);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].text, "add");
        assert_eq!(tokens[2].kind, TokenKind::LeftParen);
        assert_eq!(tokens[6].kind, TokenKind::Comma);
        assert_eq!(tokens[10].kind, TokenKind::RightParen);
        assert_eq!(tokens[11].kind, TokenKind::Colon);
        assert_eq!(tokens[12].kind, TokenKind::TypeInt);
        assert_eq!(tokens[13].kind, TokenKind::LeftBrace);
    }

    #[test]
    fn test_eof_is_always_last() {
        let tokens = lex("return 0;   \n\t ");
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }
}
