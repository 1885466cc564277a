use std::{fmt, rc::Rc};

use thiserror::Error;

use crate::environment::Environment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Pow => "**",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        };
        write!(f, "{sym}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Neg => write!(f, "-"),
        }
    }
}

pub type ExprRef = Box<Expr>;

/// Expression nodes. Variables and operators keep the line they were
/// written on so runtime errors can point back at the source.
#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    Number(f64),
    Variable(Rc<str>, usize),
    Binary(BinOp, ExprRef, ExprRef, usize),
    Unary(UnOp, ExprRef, usize),
    Grouping(ExprRef),
}

fn truth(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Nonzero is true. NaN never reaches here since producing it is an error.
pub fn truthy(x: f64) -> bool {
    x != 0.0
}

impl Expr {
    pub fn eval(&self, env: &Environment) -> Result<f64, EvalErr> {
        match self {
            Self::Number(x) => Ok(*x),
            Self::Grouping(inner) => inner.eval(env),
            Self::Variable(id, line) => env.get(id).ok_or_else(|| EvalErr::UndefinedVariable {
                name: id.to_string(),
                line: *line,
            }),
            Self::Unary(UnOp::Neg, x, _) => Ok(-x.eval(env)?),
            Self::Binary(op, x, y, line) => {
                let a = x.eval(env)?;
                let b = y.eval(env)?;
                let line = *line;
                let res = match op {
                    BinOp::Add => a + b,
                    BinOp::Sub => a - b,
                    BinOp::Mul => a * b,
                    BinOp::Div if b == 0.0 => return Err(EvalErr::DivisionByZero { line }),
                    BinOp::Div => a / b,
                    // Truncated remainder: the result has the sign of the dividend.
                    BinOp::Rem if b == 0.0 => return Err(EvalErr::ModuloByZero { line }),
                    BinOp::Rem => a % b,
                    BinOp::Pow => a.powf(b),
                    BinOp::Less => truth(a < b),
                    BinOp::LessEqual => truth(a <= b),
                    BinOp::Greater => truth(a > b),
                    BinOp::GreaterEqual => truth(a >= b),
                    BinOp::Equal => truth(a == b),
                    BinOp::NotEqual => truth(a != b),
                };

                if res.is_nan() {
                    return Err(EvalErr::InvalidOperand { op: *op, left: a, right: b, line });
                }
                Ok(res)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalErr {
    #[error("[line {line}] Undefined variable '{name}'.")]
    UndefinedVariable { name: String, line: usize },
    #[error("[line {line}] Division by zero.")]
    DivisionByZero { line: usize },
    #[error("[line {line}] Modulo by zero.")]
    ModuloByZero { line: usize },
    #[error("[line {line}] Invalid operands for '{op}': {left} and {right}.")]
    InvalidOperand { op: BinOp, left: f64, right: f64, line: usize },
    #[error("[line {line}] Loop exceeded {limit} iterations.")]
    LoopLimit { limit: usize, line: usize },
}

impl EvalErr {
    pub fn line(&self) -> usize {
        match self {
            Self::UndefinedVariable { line, .. }
            | Self::DivisionByZero { line }
            | Self::ModuloByZero { line }
            | Self::InvalidOperand { line, .. }
            | Self::LoopLimit { line, .. } => *line,
        }
    }
}
