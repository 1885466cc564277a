use crate::expr::*;
use crate::statement::{Program, Stmt};
use crate::token::*;

use thiserror::Error;
use tracing::debug;

type ExprResult = Result<ExprRef, ParseErr>;

// An expression with the height of its tree.
type Node = (ExprRef, usize);
type NodeResult = Result<Node, ParseErr>;

/// How deep parentheses, blocks and prefix operators may nest.
pub const MAX_NESTING: usize = 256;
/// Tallest expression tree the parser will build, which bounds evaluation depth.
pub const MAX_EXPR_HEIGHT: usize = 1024;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErr {
    #[error("[line {line}] Expected {expected} but got '{found}'.")]
    Expected {
        expected: &'static str,
        found: String,
        line: usize,
    },
    #[error("[line {line}] Expected '{close}' to close '{open}' from line {open_line} but got '{found}'.")]
    Unclosed {
        open: TokenType,
        close: TokenType,
        open_line: usize,
        found: String,
        line: usize,
    },
    #[error("[line {line}] Unmatched '{close}'.")]
    UnmatchedClose { close: TokenType, line: usize },
    #[error("[line {line}] Nesting exceeds {limit} levels.")]
    TooDeep { limit: usize, line: usize },
}

impl ParseErr {
    pub fn line(&self) -> usize {
        match self {
            Self::Expected { line, .. }
            | Self::Unclosed { line, .. }
            | Self::UnmatchedClose { line, .. }
            | Self::TooDeep { line, .. } => *line,
        }
    }

    fn expected(expected: &'static str, found: &Token) -> Self {
        ParseErr::Expected {
            expected,
            found: found.data.to_string(),
            line: found.line,
        }
    }
}

pub struct Parser<'a> {
    tokens: &'a [Token],
    index: usize,
    depth: usize,
    // Stands in for a missing trailing Eof so lookahead never runs off the end.
    eof: Token,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Parser<'a> {
        let line = tokens.last().map_or(1, |t| t.line);
        Parser {
            index: 0,
            depth: 0,
            tokens,
            eof: Token::new(TokenType::Eof, line),
        }
    }

    fn at_end(&self) -> bool {
        self.peek().data == TokenType::Eof
    }

    fn match_next_lits<const N: usize>(&mut self, ttypes: [TokenType; N]) -> bool {
        if self.at_end() {
            return false;
        }

        let res = ttypes.iter().any(|x| *x == self.peek().data);
        if res {
            self.index += 1;
        }

        res
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.index).unwrap_or(&self.eof)
    }

    fn peek_next(&self) -> &Token {
        self.tokens.get(self.index + 1).unwrap_or(&self.eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if !self.at_end() {
            self.index += 1;
        }
        tok
    }

    fn check(&self, tok: &TokenType) -> bool {
        self.peek().data == *tok
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.index - 1]
    }

    fn consume(&mut self, tok: &TokenType, expected: &'static str) -> Result<Token, ParseErr> {
        if !self.check(tok) {
            return Err(ParseErr::expected(expected, self.peek()));
        }
        Ok(self.advance())
    }

    // Closes a `(` or `{` opened by `other`, naming the opener on failure.
    fn consume_pair(&mut self, tok: &TokenType, other: &Token) -> Result<(), ParseErr> {
        if !self.check(tok) {
            let found = self.peek();
            return Err(ParseErr::Unclosed {
                open: other.data.clone(),
                close: tok.clone(),
                open_line: other.line,
                found: found.data.to_string(),
                line: found.line,
            });
        }
        self.index += 1;
        Ok(())
    }

    // Runs `f` one nesting level deeper, failing once the limit is reached.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, ParseErr>) -> Result<T, ParseErr> {
        if self.depth >= MAX_NESTING {
            return Err(ParseErr::TooDeep {
                limit: MAX_NESTING,
                line: self.peek().line,
            });
        }
        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }

    fn node(&self, expr: Expr, height: usize, line: usize) -> NodeResult {
        if height > MAX_EXPR_HEIGHT {
            return Err(ParseErr::TooDeep {
                limit: MAX_EXPR_HEIGHT,
                line,
            });
        }
        Ok((Box::new(expr), height))
    }

    fn binary(&self, op: BinOp, (left, lh): Node, (right, rh): Node, line: usize) -> NodeResult {
        self.node(Expr::Binary(op, left, right, line), lh.max(rh) + 1, line)
    }

    // Consumes the next token if it is one of `ops`.
    fn match_op<const N: usize>(&mut self, ops: [BinOp; N]) -> Option<(BinOp, usize)> {
        let tok = self.peek();
        let op = bin_op(&tok.data)?;
        if !ops.contains(&op) {
            return None;
        }
        let line = tok.line;
        self.index += 1;
        Some((op, line))
    }

    fn skip_semicolon(&mut self) {
        self.match_next_lits([TokenType::Semicolon]);
    }

    // Parsing the actual grammar.
    pub fn parse(&mut self) -> Result<Program, ParseErr> {
        self.depth = 0;
        let mut res = vec![];
        while !self.at_end() {
            res.push(self.statement()?);
        }
        debug!(statements = res.len(), "parsed program");
        Ok(res)
    }

    fn statement(&mut self) -> Result<Stmt, ParseErr> {
        let stmt = if self.match_next_lits([TokenType::Print]) {
            self.print_statement()?
        } else if self.match_next_lits([TokenType::If]) {
            return self.if_statement();
        } else if self.match_next_lits([TokenType::While]) {
            return self.while_statement();
        } else if self.check(&TokenType::LeftBrace) {
            return Ok(Stmt::Block(self.block()?));
        } else if let TokenType::RightBrace | TokenType::RightParen = self.peek().data {
            let tok = self.peek();
            return Err(ParseErr::UnmatchedClose {
                close: tok.data.clone(),
                line: tok.line,
            });
        } else if matches!(self.peek().data, TokenType::Identifier(_)) && self.peek_next().data == TokenType::Equal {
            self.assignment()?
        } else {
            Stmt::Expr(self.expression()?)
        };

        self.skip_semicolon();
        Ok(stmt)
    }

    fn assignment(&mut self) -> Result<Stmt, ParseErr> {
        let tok = self.advance();
        let TokenType::Identifier(id) = &tok.data else {
            return Err(ParseErr::expected("identifier", &tok));
        };
        let id = id.clone();
        self.consume(&TokenType::Equal, "'='")?;
        let value = self.expression()?;
        Ok(Stmt::Assign(id, value, tok.line))
    }

    fn print_statement(&mut self) -> Result<Stmt, ParseErr> {
        let left_paren = self.consume(&TokenType::LeftParen, "'(' after 'print'")?;
        let expr = self.expression()?;
        self.consume_pair(&TokenType::RightParen, &left_paren)?;
        Ok(Stmt::Print(expr))
    }

    fn condition(&mut self, keyword: &'static str) -> ExprResult {
        let left_paren = self.consume(&TokenType::LeftParen, keyword)?;
        let cond = self.expression()?;
        self.consume_pair(&TokenType::RightParen, &left_paren)?;
        Ok(cond)
    }

    fn if_statement(&mut self) -> Result<Stmt, ParseErr> {
        let cond = self.condition("'(' after 'if'")?;
        let then = self.block()?;
        if self.match_next_lits([TokenType::Else]) {
            let other = if self.match_next_lits([TokenType::If]) {
                vec![self.nested(Self::if_statement)?]
            } else {
                self.block()?
            };
            Ok(Stmt::If(cond, then, Some(other)))
        } else {
            Ok(Stmt::If(cond, then, None))
        }
    }

    fn while_statement(&mut self) -> Result<Stmt, ParseErr> {
        let line = self.previous().line;
        let cond = self.condition("'(' after 'while'")?;
        let body = self.block()?;
        Ok(Stmt::While(cond, body, line))
    }

    fn block(&mut self) -> Result<Vec<Stmt>, ParseErr> {
        self.nested(Self::block_body)
    }

    fn block_body(&mut self) -> Result<Vec<Stmt>, ParseErr> {
        let left_brace = self.consume(&TokenType::LeftBrace, "'{'")?;
        let mut res = vec![];
        while !self.at_end() && !self.check(&TokenType::RightBrace) {
            res.push(self.statement()?);
        }
        self.consume_pair(&TokenType::RightBrace, &left_brace)?;
        Ok(res)
    }

    fn expression(&mut self) -> ExprResult {
        Ok(self.nested(Self::comparison)?.0)
    }

    fn comparison(&mut self) -> NodeResult {
        let mut expr = self.additive()?;
        while let Some((op, line)) = self.match_op([
            BinOp::Greater,
            BinOp::GreaterEqual,
            BinOp::Less,
            BinOp::LessEqual,
            BinOp::Equal,
            BinOp::NotEqual,
        ]) {
            let right = self.additive()?;
            expr = self.binary(op, expr, right, line)?;
        }

        Ok(expr)
    }

    fn additive(&mut self) -> NodeResult {
        let mut expr = self.multiplicative()?;

        while let Some((op, line)) = self.match_op([BinOp::Add, BinOp::Sub]) {
            let right = self.multiplicative()?;
            expr = self.binary(op, expr, right, line)?;
        }

        Ok(expr)
    }

    fn multiplicative(&mut self) -> NodeResult {
        let mut expr = self.power()?;

        while let Some((op, line)) = self.match_op([BinOp::Mul, BinOp::Div, BinOp::Rem]) {
            let right = self.power()?;
            expr = self.binary(op, expr, right, line)?;
        }

        Ok(expr)
    }

    // Right associative: the exponent recurses into `power` itself.
    fn power(&mut self) -> NodeResult {
        let base = self.unary()?;
        if let Some((op, line)) = self.match_op([BinOp::Pow]) {
            let exponent = self.nested(Self::power)?;
            self.binary(op, base, exponent, line)
        } else {
            Ok(base)
        }
    }

    fn unary(&mut self) -> NodeResult {
        if self.match_next_lits([TokenType::Minus]) {
            let line = self.previous().line;
            let (operand, height) = self.nested(Self::unary)?;
            self.node(Expr::Unary(UnOp::Neg, operand, line), height + 1, line)
        } else {
            self.primary()
        }
    }

    fn primary(&mut self) -> NodeResult {
        let tok = self.peek().clone();
        let res = match &tok.data {
            TokenType::Number(x) => Expr::Number(*x),
            TokenType::Identifier(x) => Expr::Variable(x.clone(), tok.line),
            TokenType::LeftParen => {
                self.advance();
                let (expr, height) = self.nested(Self::comparison)?;
                self.consume_pair(&TokenType::RightParen, &tok)?;
                return self.node(Expr::Grouping(expr), height + 1, tok.line);
            }
            _ => return Err(ParseErr::expected("expression", &tok)),
        };
        self.advance();

        self.node(res, 1, tok.line)
    }
}

fn bin_op(tok: &TokenType) -> Option<BinOp> {
    let op = match tok {
        TokenType::Plus => BinOp::Add,
        TokenType::Minus => BinOp::Sub,
        TokenType::Star => BinOp::Mul,
        TokenType::Slash => BinOp::Div,
        TokenType::Percent => BinOp::Rem,
        TokenType::StarStar => BinOp::Pow,
        TokenType::Less => BinOp::Less,
        TokenType::LessEqual => BinOp::LessEqual,
        TokenType::Greater => BinOp::Greater,
        TokenType::GreaterEqual => BinOp::GreaterEqual,
        TokenType::EqualEqual => BinOp::Equal,
        TokenType::BangEqual => BinOp::NotEqual,
        _ => return None,
    };
    Some(op)
}
