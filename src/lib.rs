pub mod environment;
pub mod expr;
pub mod inspect;
pub mod interpreter;
pub mod parser;
pub mod samples;
pub mod scanner;
pub mod statement;
pub mod token;

use environment::Environment;
use expr::EvalErr;
use interpreter::Config;
use parser::{ParseErr, Parser};
use scanner::LexErr;
use statement::Program;
use token::Token;

pub use interpreter::run_with;

pub fn tokenize(code: &str) -> Result<Vec<Token>, LexErr> {
    scanner::scan(code)
}

pub fn parse(tokens: &[Token]) -> Result<Program, ParseErr> {
    Parser::new(tokens).parse()
}

/// Runs `program` with the default loop limit and returns what it printed.
pub fn run(program: &[statement::Stmt], env: &mut Environment) -> Result<Vec<String>, EvalErr> {
    let mut out = vec![];
    run_with(program, env, &Config::default(), &mut out)?;
    Ok(out)
}
