//! Human-readable AST tree printer
//!
//! Renders a parsed program as an indented tree, one label per node kind.
//! Read-only over the AST; used by the CLI after a successful parse.

use super::ast::{Ast, Decl, Expr, ForInit, Literal, Node, Stmt};

/// Render the whole program as an indented tree
pub fn render_ast(ast: &Ast) -> String {
    let mut out = String::new();
    out.push_str(&format!("AST with {} nodes:\n", ast.len()));
    for node in &ast.nodes {
        render_node(node, 1, &mut out);
    }
    out
}

fn render_node(node: &Node, indent: usize, out: &mut String) {
    match node {
        Node::Expr(expr) => render_expr(expr, indent, out),
        Node::Stmt(stmt) => render_stmt(stmt, indent, out),
        Node::Decl(decl) => render_decl(decl, indent, out),
    }
}

fn render_expr(expr: &Expr, indent: usize, out: &mut String) {
    push_indent(indent, out);
    match expr {
        Expr::Literal { value, .. } => match value {
            Literal::Int(v) => out.push_str(&format!("Literal Int: {}\n", v)),
            Literal::Float(v) => out.push_str(&format!("Literal Float: {}\n", v)),
            Literal::Str(v) => out.push_str(&format!("Literal String: \"{}\"\n", v)),
            Literal::Bool(v) => out.push_str(&format!("Literal Bool: {}\n", v)),
            Literal::Null => out.push_str("Literal Null\n"),
        },

        Expr::Identifier { name, .. } => {
            out.push_str(&format!("Identifier: {}\n", name));
        }

        Expr::Assignment { name, value, .. } => {
            out.push_str(&format!("Assignment to {}:\n", name));
            render_expr(value, indent + 1, out);
        }

        Expr::Binary {
            left, op, right, ..
        } => {
            out.push_str(&format!("Binary Expression ({}):\n", op));
            render_expr(left, indent + 1, out);
            render_expr(right, indent + 1, out);
        }

        Expr::Unary { op, operand, .. } => {
            out.push_str(&format!("Unary Expression ({}):\n", op));
            render_expr(operand, indent + 1, out);
        }

        Expr::Call { name, args, .. } => {
            out.push_str(&format!("Function Call: {} with {} args\n", name, args.len()));
            for arg in args {
                render_expr(arg, indent + 1, out);
            }
        }
    }
}

fn render_stmt(stmt: &Stmt, indent: usize, out: &mut String) {
    push_indent(indent, out);
    match stmt {
        Stmt::VarDecl(decl) => {
            out.push_str(&format!(
                "Variable Declaration: {} (type {})\n",
                decl.name, decl.ty
            ));
            if let Some(initializer) = &decl.initializer {
                render_expr(initializer, indent + 1, out);
            }
        }

        Stmt::Assign(assign) => {
            out.push_str(&format!("Assignment Statement: {}\n", assign.name));
            render_expr(&assign.value, indent + 1, out);
        }

        Stmt::Return { value, .. } => {
            out.push_str("Return Statement:\n");
            if let Some(value) = value {
                render_expr(value, indent + 1, out);
            }
        }

        Stmt::Print { args, .. } => {
            out.push_str("Print Statement:\n");
            for arg in args {
                render_expr(arg, indent + 1, out);
            }
        }

        Stmt::Break { .. } => out.push_str("Break Statement\n"),

        Stmt::Continue { .. } => out.push_str("Continue Statement\n"),

        Stmt::Expression { expr, .. } => {
            out.push_str("Expression Statement:\n");
            render_expr(expr, indent + 1, out);
        }

        Stmt::Block { statements, .. } => {
            out.push_str("Block:\n");
            for statement in statements {
                render_stmt(statement, indent + 1, out);
            }
        }

        Stmt::If {
            condition,
            then_block,
            elif_branches,
            else_block,
            ..
        } => {
            out.push_str("If Statement:\n");
            push_indent(indent + 1, out);
            out.push_str("If condition:\n");
            render_expr(condition, indent + 2, out);
            render_stmt(then_block, indent + 1, out);
            for (i, (elif_condition, elif_block)) in elif_branches.iter().enumerate() {
                push_indent(indent + 1, out);
                out.push_str(&format!("Elif condition {}:\n", i));
                render_expr(elif_condition, indent + 2, out);
                render_stmt(elif_block, indent + 1, out);
            }
            if let Some(else_block) = else_block {
                render_stmt(else_block, indent + 1, out);
            }
        }

        Stmt::While {
            condition, body, ..
        } => {
            out.push_str("While Statement:\n");
            render_expr(condition, indent + 1, out);
            render_stmt(body, indent + 1, out);
        }

        Stmt::For {
            init,
            condition,
            increment,
            body,
            ..
        } => {
            out.push_str("For Statement:\n");
            match init {
                ForInit::None => {}
                ForInit::VarDecl(decl) => {
                    push_indent(indent + 1, out);
                    out.push_str("Initializer:\n");
                    push_indent(indent + 2, out);
                    out.push_str(&format!(
                        "Variable Declaration: {} (type {})\n",
                        decl.name, decl.ty
                    ));
                    if let Some(initializer) = &decl.initializer {
                        render_expr(initializer, indent + 3, out);
                    }
                }
                ForInit::Assign(assign) => {
                    push_indent(indent + 1, out);
                    out.push_str("Initializer:\n");
                    push_indent(indent + 2, out);
                    out.push_str(&format!("Assignment: {} =\n", assign.name));
                    render_expr(&assign.value, indent + 3, out);
                }
                ForInit::Expr(expr) => {
                    push_indent(indent + 1, out);
                    out.push_str("Initializer:\n");
                    render_expr(expr, indent + 2, out);
                }
            }

            if let Some(condition) = condition {
                push_indent(indent + 1, out);
                out.push_str("Condition:\n");
                render_expr(condition, indent + 2, out);
            }

            if let Some(increment) = increment {
                push_indent(indent + 1, out);
                out.push_str("Increment:\n");
                push_indent(indent + 2, out);
                out.push_str(&format!("{} =\n", increment.name));
                render_expr(&increment.value, indent + 3, out);
            }

            render_stmt(body, indent + 1, out);
        }
    }
}

fn render_decl(decl: &Decl, indent: usize, out: &mut String) {
    push_indent(indent, out);
    match decl {
        Decl::Function {
            name,
            return_type,
            params,
            body,
            ..
        } => {
            out.push_str(&format!(
                "Function Declaration: {} (return type {})\n",
                name, return_type
            ));
            push_indent(indent + 1, out);
            out.push_str("Parameters:\n");
            for param in params {
                push_indent(indent + 2, out);
                out.push_str(&format!("Param: {} (type {})\n", param.name, param.ty));
            }
            push_indent(indent + 1, out);
            out.push_str("Body:\n");
            for statement in body {
                render_stmt(statement, indent + 2, out);
            }
        }
    }
}

fn push_indent(indent: usize, out: &mut String) {
    for _ in 0..indent {
        out.push_str("  ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn render_source(source: &str) -> String {
        let mut lexer = Lexer::new(source, None);
        lexer.tokenize();
        let ast = Parser::new(lexer.tokens()).parse().unwrap();
        render_ast(&ast)
    }

    #[test]
    fn test_render_function() {
        let output = render_source("func add(a: int, b: int): int { return a + b; }");
        assert!(output.starts_with("AST with 1 nodes:\n"));
        assert!(output.contains("  Function Declaration: add (return type int)\n"));
        assert!(output.contains("      Param: a (type int)\n"));
        assert!(output.contains("    Body:\n"));
        assert!(output.contains("      Return Statement:\n"));
        assert!(output.contains("        Binary Expression (PLUS (+)):\n"));
    }

    #[test]
    fn test_render_var_decl() {
        let output = render_source("x: int = 1 + 2 * 3;");
        assert!(output.contains("  Variable Declaration: x (type int)\n"));
        assert!(output.contains("    Binary Expression (PLUS (+)):\n"));
        assert!(output.contains("      Literal Int: 1\n"));
        assert!(output.contains("      Binary Expression (ASTERISK (*)):\n"));
        assert!(output.contains("        Literal Int: 2\n"));
    }

    #[test]
    fn test_render_if_chain() {
        let output = render_source(
            "func f(): void { if (a) { return; } elif (b) { return; } else { return; } }",
        );
        assert!(output.contains("If Statement:\n"));
        assert!(output.contains("If condition:\n"));
        assert!(output.contains("Elif condition 0:\n"));
    }

    #[test]
    fn test_render_for_loop() {
        let output =
            render_source("func f(): void { for (i: int = 0; i < 3; i = i + 1) { print(i); } }");
        assert!(output.contains("For Statement:\n"));
        assert!(output.contains("Initializer:\n"));
        assert!(output.contains("Variable Declaration: i (type int)\n"));
        assert!(output.contains("Condition:\n"));
        assert!(output.contains("Increment:\n"));
        assert!(output.contains("i =\n"));
        assert!(output.contains("Print Statement:\n"));
    }
}
