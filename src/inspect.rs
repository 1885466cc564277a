//! Read-only text views of the token stream and the syntax tree, for
//! debugging programs from the command line or the REPL.

use std::fmt::Write;

use crate::expr::Expr;
use crate::statement::Stmt;
use crate::token::Token;

pub fn render_tokens(tokens: &[Token]) -> String {
    let mut res = String::new();
    for tok in tokens {
        // Writing to string can't fail.
        let _ = writeln!(res, "{:<12} | {:<12} | line {}", tok.kind(), tok.data.to_string(), tok.line);
    }
    res
}

pub fn render_ast(program: &[Stmt]) -> String {
    let mut res = String::new();
    for stmt in program {
        write_stmt(&mut res, stmt, 0);
    }
    res
}

fn line(res: &mut String, depth: usize, text: std::fmt::Arguments) {
    let _ = writeln!(res, "{:indent$}{}", "", text, indent = depth * 2);
}

fn write_block(res: &mut String, label: &str, stmts: &[Stmt], depth: usize) {
    line(res, depth, format_args!("{label}"));
    for stmt in stmts {
        write_stmt(res, stmt, depth + 1);
    }
}

fn write_stmt(res: &mut String, stmt: &Stmt, depth: usize) {
    match stmt {
        Stmt::Assign(id, val, _) => {
            line(res, depth, format_args!("{} {id}", stmt.name()));
            write_expr(res, val, depth + 1);
        }
        Stmt::Print(val) | Stmt::Expr(val) => {
            line(res, depth, format_args!("{}", stmt.name()));
            write_expr(res, val, depth + 1);
        }
        Stmt::If(cond, then, other) => {
            line(res, depth, format_args!("{}", stmt.name()));
            write_expr(res, cond, depth + 1);
            write_block(res, "then", then, depth + 1);
            if let Some(other) = other {
                write_block(res, "else", other, depth + 1);
            }
        }
        Stmt::While(cond, body, _) => {
            line(res, depth, format_args!("{}", stmt.name()));
            write_expr(res, cond, depth + 1);
            write_block(res, "body", body, depth + 1);
        }
        Stmt::Block(stmts) => write_block(res, stmt.name(), stmts, depth),
    }
}

fn write_expr(res: &mut String, expr: &Expr, depth: usize) {
    match expr {
        Expr::Number(x) => line(res, depth, format_args!("NumberLiteral {x}")),
        Expr::Variable(id, _) => line(res, depth, format_args!("Variable {id}")),
        Expr::Binary(op, l, r, _) => {
            line(res, depth, format_args!("BinaryOp {op}"));
            write_expr(res, l, depth + 1);
            write_expr(res, r, depth + 1);
        }
        Expr::Unary(op, x, _) => {
            line(res, depth, format_args!("UnaryOp {op}"));
            write_expr(res, x, depth + 1);
        }
        Expr::Grouping(x) => {
            line(res, depth, format_args!("Grouping"));
            write_expr(res, x, depth + 1);
        }
    }
}
