use crate::environment::Environment;
use crate::expr::EvalErr;
use crate::parser::{ParseErr, Parser};
use crate::scanner::{scan, LexErr};
use crate::statement::{exec_all, Context, Stmt};
use thiserror::Error;
use tracing::debug;

/// Iterations a single `while` may run before it is treated as runaway.
pub const DEFAULT_LOOP_LIMIT: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub max_loop_iterations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_loop_iterations: DEFAULT_LOOP_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpretErr {
    #[error(transparent)]
    Lex(#[from] LexErr),
    #[error(transparent)]
    Parse(#[from] ParseErr),
    #[error(transparent)]
    Eval(#[from] EvalErr),
}

impl InterpretErr {
    pub fn line(&self) -> usize {
        match self {
            Self::Lex(e) => e.line(),
            Self::Parse(e) => e.line(),
            Self::Eval(e) => e.line(),
        }
    }
}

/// Executes `program` against `env`, appending printed lines to `out`.
/// Output and bindings produced before a failure are kept.
pub fn run_with(program: &[Stmt], env: &mut Environment, config: &Config, out: &mut Vec<String>) -> Result<(), EvalErr> {
    let mut ctx = Context { env, out, config };
    exec_all(program, &mut ctx)
}

/// A session that keeps its variables between inputs.
#[derive(Debug, Default)]
pub struct Interpreter {
    env: Environment,
    config: Config,
}

impl Interpreter {
    pub fn new() -> Interpreter {
        Self::default()
    }

    pub fn with_config(config: Config) -> Interpreter {
        Interpreter {
            env: Environment::new(),
            config,
        }
    }

    pub fn run(&mut self, code: &str) -> Result<Vec<String>, InterpretErr> {
        let mut out = vec![];
        self.run_into(code, &mut out)?;
        Ok(out)
    }

    /// Like [`Interpreter::run`], but leaves whatever was printed in `out`
    /// even when evaluation fails partway.
    pub fn run_into(&mut self, code: &str, out: &mut Vec<String>) -> Result<(), InterpretErr> {
        let tokens = scan(code)?;
        let program = Parser::new(&tokens).parse()?;
        let before = out.len();
        let res = run_with(&program, &mut self.env, &self.config, out);
        debug!(printed = out.len() - before, ok = res.is_ok(), "evaluated program");
        Ok(res?)
    }

    pub fn get_global(&self, id: &str) -> Option<f64> {
        self.env.get(id)
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn reset(&mut self) {
        self.env.clear();
    }
}
