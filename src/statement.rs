use crate::environment::Environment;
use crate::expr::{truthy, EvalErr, ExprRef};
use crate::interpreter::Config;
use std::rc::Rc;
use tracing::{trace, warn};

#[derive(Debug, PartialEq, Clone)]
pub enum Stmt {
    Assign(Rc<str>, ExprRef, usize),
    Print(ExprRef),
    If(ExprRef, Vec<Stmt>, Option<Vec<Stmt>>),
    While(ExprRef, Vec<Stmt>, usize),
    Block(Vec<Stmt>),
    Expr(ExprRef),
}

pub type Program = Vec<Stmt>;

/// Everything a statement may touch while it runs.
pub struct Context<'a> {
    pub env: &'a mut Environment,
    pub out: &'a mut Vec<String>,
    pub config: &'a Config,
}

impl Stmt {
    pub fn exec(&self, ctx: &mut Context<'_>) -> Result<(), EvalErr> {
        trace!(stmt = self.name(), "exec");
        match self {
            Self::Assign(id, expr, _) => {
                let val = expr.eval(ctx.env)?;
                ctx.env.set(id.clone(), val);
            }
            Self::Print(expr) => {
                let val = expr.eval(ctx.env)?;
                // -0 prints as 0.
                let val = if val == 0.0 { 0.0 } else { val };
                ctx.out.push(val.to_string());
            }
            Self::Expr(expr) => {
                expr.eval(ctx.env)?;
            }
            Self::Block(stmts) => exec_all(stmts, ctx)?,
            Self::If(cond, then, other) => {
                if truthy(cond.eval(ctx.env)?) {
                    exec_all(then, ctx)?;
                } else if let Some(other) = other {
                    exec_all(other, ctx)?;
                }
            }
            Self::While(cond, body, line) => {
                let limit = ctx.config.max_loop_iterations;
                let mut iterations = 0usize;
                while truthy(cond.eval(ctx.env)?) {
                    iterations += 1;
                    if iterations > limit {
                        warn!(line, limit, "loop iteration limit exceeded");
                        return Err(EvalErr::LoopLimit { limit, line: *line });
                    }
                    exec_all(body, ctx)?;
                }
            }
        }
        Ok(())
    }

    /// Node kind, as shown by the AST inspector.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Assign(..) => "Assignment",
            Self::Print(_) => "PrintStatement",
            Self::If(..) => "IfStatement",
            Self::While(..) => "WhileStatement",
            Self::Block(_) => "Block",
            Self::Expr(_) => "ExpressionStatement",
        }
    }
}

pub fn exec_all(stmts: &[Stmt], ctx: &mut Context<'_>) -> Result<(), EvalErr> {
    for stmt in stmts {
        stmt.exec(ctx)?;
    }
    Ok(())
}
