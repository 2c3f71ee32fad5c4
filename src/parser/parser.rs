//! Parser implementation
//!
//! This module implements the recursive-descent parser for the Rill
//! language. The parser borrows the lexer's finalized token sequence and
//! walks it exactly once, left to right, with single-token lookahead (plus a
//! bounds-checked peek for the two-token dispatch cases). The first grammar
//! violation is returned as an error; no partial AST escapes.

use super::ast::*;
use crate::error::{RillError, RillResult, SourceLocation};
use crate::lexer::{Token, TokenKind};

/// Parser for Rill token streams
pub struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
    end_of_input: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser over a borrowed token sequence
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            current: 0,
            end_of_input: Token::new(TokenKind::Eof, "EOF", SourceLocation::at(0, 0)),
        }
    }

    /// Parse the token sequence into a program AST
    pub fn parse(&mut self) -> RillResult<Ast> {
        let mut ast = Ast::new();

        while !self.is_at_end() {
            let node = self.declaration()?;
            ast.push(node);
        }

        Ok(ast)
    }

    // ===== Declarations =====

    fn declaration(&mut self) -> RillResult<Node> {
        let kind = self.peek().kind;
        match kind {
            TokenKind::Func => Ok(Node::Decl(self.function_declaration()?)),
            TokenKind::Identifier => {
                let decl = self.var_declaration()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(Node::Stmt(Stmt::VarDecl(decl)))
            }
            _ => {
                let token = self.peek();
                Err(RillError::parse_error(
                    format!(
                        "Expected function or variable declaration but got {}",
                        token.text
                    ),
                    token.location.clone(),
                ))
            }
        }
    }

    fn function_declaration(&mut self) -> RillResult<Decl> {
        let location = self.peek().location.clone();
        self.expect(TokenKind::Func)?;
        let name = self.expect(TokenKind::Identifier)?.text.clone();

        self.expect(TokenKind::LeftParen)?;
        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                params.push(self.param()?);
                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen)?;

        self.expect(TokenKind::Colon)?;
        let return_type = self.parse_type()?;

        self.expect(TokenKind::LeftBrace)?;
        let body = self.block_statements()?;

        Ok(Decl::Function {
            name,
            return_type,
            params,
            body,
            location,
        })
    }

    fn param(&mut self) -> RillResult<Param> {
        let location = self.peek().location.clone();
        let name = self.expect(TokenKind::Identifier)?.text.clone();
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        Ok(Param { name, ty, location })
    }

    fn parse_type(&mut self) -> RillResult<DataType> {
        let kind = self.peek().kind;
        let ty = match kind {
            TokenKind::TypeInt => DataType::Int,
            TokenKind::TypeFloat => DataType::Float,
            TokenKind::TypeString => DataType::String,
            TokenKind::TypeBool => DataType::Bool,
            TokenKind::TypeVoid => DataType::Void,
            kind => {
                return Err(RillError::parse_error(
                    format!("Expected type but got <{}>", kind),
                    self.peek().location.clone(),
                ));
            }
        };
        self.advance();
        Ok(ty)
    }

    fn var_declaration(&mut self) -> RillResult<VarDecl> {
        let location = self.peek().location.clone();
        let name = self.expect(TokenKind::Identifier)?.text.clone();
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        self.expect(TokenKind::Equal)?;
        let initializer = Some(self.expression()?);

        Ok(VarDecl {
            name,
            ty,
            initializer,
            location,
        })
    }

    // ===== Statements =====

    fn statement(&mut self) -> RillResult<Stmt> {
        let kind = self.peek().kind;
        match kind {
            // An identifier opens a var decl, an assignment, or a bare
            // expression; one extra token decides which.
            TokenKind::Identifier => match self.peek_at(1).kind {
                TokenKind::Colon => {
                    let decl = self.var_declaration()?;
                    self.expect(TokenKind::Semicolon)?;
                    Ok(Stmt::VarDecl(decl))
                }
                TokenKind::Equal => {
                    let assign = self.assign()?;
                    self.expect(TokenKind::Semicolon)?;
                    Ok(Stmt::Assign(assign))
                }
                _ => self.expression_statement(),
            },
            TokenKind::Print => self.print_statement(),
            TokenKind::Return => self.return_statement(),
            TokenKind::Break => {
                let location = self.peek().location.clone();
                self.advance();
                self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::Break { location })
            }
            TokenKind::Continue => {
                let location = self.peek().location.clone();
                self.advance();
                self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::Continue { location })
            }
            TokenKind::If => self.if_statement(),
            TokenKind::For => self.for_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::LeftBrace => self.block(),
            _ => self.expression_statement(),
        }
    }

    fn print_statement(&mut self) -> RillResult<Stmt> {
        let location = self.peek().location.clone();
        self.expect(TokenKind::Print)?;
        self.expect(TokenKind::LeftParen)?;
        let args = self.arg_list()?;
        self.expect(TokenKind::RightParen)?;
        self.expect(TokenKind::Semicolon)?;

        Ok(Stmt::Print { args, location })
    }

    fn return_statement(&mut self) -> RillResult<Stmt> {
        let location = self.peek().location.clone();
        self.expect(TokenKind::Return)?;

        let value = if !self.check(TokenKind::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon)?;

        Ok(Stmt::Return { value, location })
    }

    fn if_statement(&mut self) -> RillResult<Stmt> {
        let location = self.peek().location.clone();
        self.expect(TokenKind::If)?;
        self.expect(TokenKind::LeftParen)?;
        let condition = self.expression()?;
        self.expect(TokenKind::RightParen)?;
        let then_block = Box::new(self.block()?);

        let mut elif_branches = Vec::new();
        while self.match_kind(TokenKind::Elif) {
            self.expect(TokenKind::LeftParen)?;
            let elif_condition = self.expression()?;
            self.expect(TokenKind::RightParen)?;
            let elif_block = self.block()?;
            elif_branches.push((elif_condition, elif_block));
        }

        let else_block = if self.match_kind(TokenKind::Else) {
            Some(Box::new(self.block()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_block,
            elif_branches,
            else_block,
            location,
        })
    }

    fn while_statement(&mut self) -> RillResult<Stmt> {
        let location = self.peek().location.clone();
        self.expect(TokenKind::While)?;
        self.expect(TokenKind::LeftParen)?;
        let condition = self.expression()?;
        self.expect(TokenKind::RightParen)?;
        let body = Box::new(self.block()?);

        Ok(Stmt::While {
            condition,
            body,
            location,
        })
    }

    fn for_statement(&mut self) -> RillResult<Stmt> {
        let location = self.peek().location.clone();
        self.expect(TokenKind::For)?;
        self.expect(TokenKind::LeftParen)?;

        // The init clause mirrors statement dispatch, restricted to the
        // three forms legal in a for header.
        let init = if self.check(TokenKind::Semicolon) {
            ForInit::None
        } else if self.check(TokenKind::Identifier) {
            match self.peek_at(1).kind {
                TokenKind::Colon => ForInit::VarDecl(self.var_declaration()?),
                TokenKind::Equal => ForInit::Assign(self.assign()?),
                _ => ForInit::Expr(self.expression()?),
            }
        } else {
            ForInit::Expr(self.expression()?)
        };
        self.expect(TokenKind::Semicolon)?;

        let condition = if !self.check(TokenKind::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon)?;

        let increment = if !self.check(TokenKind::RightParen) {
            Some(self.assign()?)
        } else {
            None
        };
        self.expect(TokenKind::RightParen)?;

        let body = Box::new(self.block()?);

        Ok(Stmt::For {
            init,
            condition,
            increment,
            body,
            location,
        })
    }

    fn expression_statement(&mut self) -> RillResult<Stmt> {
        let expr = self.expression()?;
        let location = expr.location().clone();
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Expression { expr, location })
    }

    fn block(&mut self) -> RillResult<Stmt> {
        let location = self.peek().location.clone();
        self.expect(TokenKind::LeftBrace)?;
        let statements = self.block_statements()?;
        Ok(Stmt::Block {
            statements,
            location,
        })
    }

    /// Parse statements up to (and including) the closing brace
    ///
    /// Lone semicolons are consumed and discarded.
    fn block_statements(&mut self) -> RillResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if self.match_kind(TokenKind::Semicolon) {
                continue;
            }
            statements.push(self.statement()?);
        }

        self.expect(TokenKind::RightBrace)?;
        Ok(statements)
    }

    /// Parse `name = value` into an assignment statement payload
    fn assign(&mut self) -> RillResult<Assign> {
        let location = self.peek().location.clone();
        let name = self.expect(TokenKind::Identifier)?.text.clone();
        self.expect(TokenKind::Equal)?;
        let value = self.expression()?;

        Ok(Assign {
            name,
            value,
            location,
        })
    }

    // ===== Expressions =====

    fn expression(&mut self) -> RillResult<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> RillResult<Expr> {
        if self.check(TokenKind::Identifier) && self.peek_at(1).kind == TokenKind::Equal {
            let location = self.peek().location.clone();
            let name = self.expect(TokenKind::Identifier)?.text.clone();
            self.expect(TokenKind::Equal)?;
            let value = Box::new(self.expression()?);
            return Ok(Expr::Assignment {
                name,
                value,
                location,
            });
        }

        self.logical_or()
    }

    fn logical_or(&mut self) -> RillResult<Expr> {
        let mut expr = self.logical_and()?;

        while self.match_kind(TokenKind::Or) {
            let location = self.previous().location.clone();
            let right = Box::new(self.logical_and()?);
            expr = Expr::Binary {
                left: Box::new(expr),
                op: BinaryOp::Or,
                right,
                location,
            };
        }

        Ok(expr)
    }

    fn logical_and(&mut self) -> RillResult<Expr> {
        let mut expr = self.equality()?;

        while self.match_kind(TokenKind::And) {
            let location = self.previous().location.clone();
            let right = Box::new(self.equality()?);
            expr = Expr::Binary {
                left: Box::new(expr),
                op: BinaryOp::And,
                right,
                location,
            };
        }

        Ok(expr)
    }

    fn equality(&mut self) -> RillResult<Expr> {
        let mut expr = self.comparison()?;

        while self.match_kinds(&[TokenKind::EqualEqual, TokenKind::NotEqual]) {
            let location = self.previous().location.clone();
            let op = match self.previous().kind {
                TokenKind::EqualEqual => BinaryOp::Equal,
                TokenKind::NotEqual => BinaryOp::NotEqual,
                _ => unreachable!(),
            };
            let right = Box::new(self.comparison()?);
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right,
                location,
            };
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> RillResult<Expr> {
        let mut expr = self.term()?;

        while self.match_kinds(&[
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
        ]) {
            let location = self.previous().location.clone();
            let op = match self.previous().kind {
                TokenKind::Greater => BinaryOp::Greater,
                TokenKind::GreaterEqual => BinaryOp::GreaterEqual,
                TokenKind::Less => BinaryOp::Less,
                TokenKind::LessEqual => BinaryOp::LessEqual,
                _ => unreachable!(),
            };
            let right = Box::new(self.term()?);
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right,
                location,
            };
        }

        Ok(expr)
    }

    fn term(&mut self) -> RillResult<Expr> {
        let mut expr = self.factor()?;

        while self.match_kinds(&[TokenKind::Plus, TokenKind::Minus]) {
            let location = self.previous().location.clone();
            let op = match self.previous().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => unreachable!(),
            };
            let right = Box::new(self.factor()?);
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right,
                location,
            };
        }

        Ok(expr)
    }

    fn factor(&mut self) -> RillResult<Expr> {
        let mut expr = self.unary()?;

        while self.match_kinds(&[TokenKind::Asterisk, TokenKind::Slash, TokenKind::Percent]) {
            let location = self.previous().location.clone();
            let op = match self.previous().kind {
                TokenKind::Asterisk => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => unreachable!(),
            };
            let right = Box::new(self.unary()?);
            expr = Expr::Binary {
                left: Box::new(expr),
                op,
                right,
                location,
            };
        }

        Ok(expr)
    }

    fn unary(&mut self) -> RillResult<Expr> {
        if self.match_kinds(&[TokenKind::Not, TokenKind::Minus, TokenKind::Plus]) {
            let location = self.previous().location.clone();
            let op = match self.previous().kind {
                TokenKind::Not => UnaryOp::Not,
                TokenKind::Minus => UnaryOp::Negate,
                TokenKind::Plus => UnaryOp::Plus,
                _ => unreachable!(),
            };
            let operand = Box::new(self.unary()?);
            return Ok(Expr::Unary {
                op,
                operand,
                location,
            });
        }

        self.primary()
    }

    fn primary(&mut self) -> RillResult<Expr> {
        let location = self.peek().location.clone();
        let kind = self.peek().kind;

        match kind {
            TokenKind::IntLiteral => {
                let text = self.advance().text.clone();
                let value = text.parse::<i32>().map_err(|_| {
                    RillError::parse_error(
                        format!("Invalid integer literal '{}'", text),
                        location.clone(),
                    )
                })?;
                Ok(Expr::Literal {
                    value: Literal::Int(value),
                    location,
                })
            }

            TokenKind::FloatLiteral => {
                let text = self.advance().text.clone();
                let value = text.parse::<f32>().map_err(|_| {
                    RillError::parse_error(
                        format!("Invalid float literal '{}'", text),
                        location.clone(),
                    )
                })?;
                Ok(Expr::Literal {
                    value: Literal::Float(value),
                    location,
                })
            }

            TokenKind::StringLiteral => {
                let text = self.advance().text.clone();
                Ok(Expr::Literal {
                    value: Literal::Str(text),
                    location,
                })
            }

            TokenKind::True => {
                self.advance();
                Ok(Expr::Literal {
                    value: Literal::Bool(true),
                    location,
                })
            }

            TokenKind::False => {
                self.advance();
                Ok(Expr::Literal {
                    value: Literal::Bool(false),
                    location,
                })
            }

            TokenKind::Null => {
                self.advance();
                Ok(Expr::Literal {
                    value: Literal::Null,
                    location,
                })
            }

            TokenKind::Identifier if self.peek_at(1).kind == TokenKind::LeftParen => {
                let name = self.advance().text.clone();
                self.expect(TokenKind::LeftParen)?;
                let args = if !self.check(TokenKind::RightParen) {
                    self.arg_list()?
                } else {
                    Vec::new()
                };
                self.expect(TokenKind::RightParen)?;
                Ok(Expr::Call {
                    name,
                    args,
                    location,
                })
            }

            TokenKind::Identifier => {
                let name = self.advance().text.clone();
                Ok(Expr::Identifier { name, location })
            }

            // Grouping returns the inner node unwrapped
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.expression()?;
                self.expect(TokenKind::RightParen)?;
                Ok(expr)
            }

            _ => Err(RillError::parse_error(
                format!(
                    "Expected primary expression but got {}",
                    self.peek().text
                ),
                location,
            )),
        }
    }

    fn arg_list(&mut self) -> RillResult<Vec<Expr>> {
        let mut args = vec![self.expression()?];

        while self.match_kind(TokenKind::Comma) {
            args.push(self.expression()?);
        }

        Ok(args)
    }

    // ===== Helper Methods =====

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_kinds(&mut self, kinds: &[TokenKind]) -> bool {
        for kind in kinds {
            if self.check(*kind) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// The current token; past the stored `Eof` this still observes `Eof`
    fn peek(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or(&self.end_of_input)
    }

    /// Bounds-checked lookahead that never mutates cursor state
    fn peek_at(&self, dist: usize) -> &Token {
        self.tokens
            .get(self.current + dist)
            .unwrap_or(&self.end_of_input)
    }

    fn previous(&self) -> &Token {
        self.tokens
            .get(self.current.saturating_sub(1))
            .unwrap_or(&self.end_of_input)
    }

    /// Consume a token of the given kind or fail with the positional
    /// expectation diagnostic
    fn expect(&mut self, kind: TokenKind) -> RillResult<&Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let token = self.peek();
            Err(RillError::parse_error(
                format!(
                    "Expected token type <{}> but got <{}>",
                    kind, token.kind
                ),
                token.location.clone(),
            ))
        }
    }
}
