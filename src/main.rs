use std::{
    fs,
    io::{self, stdin, IsTerminal},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser as ClapParser;
use kiesel::inspect::{render_ast, render_tokens};
use kiesel::interpreter::{Config, Interpreter, DEFAULT_LOOP_LIMIT};
use kiesel::{parse, samples, tokenize};
use rustyline::validate::MatchingBracketValidator;
use rustyline::{error::ReadlineError, Cmd, ConditionalEventHandler, Event, EventContext, EventHandler, KeyEvent, Movement, RepeatCount};
use rustyline::{Completer, Helper, Highlighter, Hinter, Validator};
use rustyline::Editor;
use std::error::Error;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "kiesel")]
#[command(about = "Tiny numeric language: lexer, parser and tree-walk interpreter")]
#[command(version)]
struct Cli {
    /// Program to run. Reads stdin when it is piped, otherwise starts a REPL.
    file: Option<PathBuf>,
    /// Run a bundled sample program instead of a file
    #[arg(long, conflicts_with = "file")]
    sample: Option<String>,
    /// List the bundled sample programs
    #[arg(long)]
    list_samples: bool,
    /// Print the token stream instead of running
    #[arg(long)]
    tokens: bool,
    /// Print the syntax tree instead of running
    #[arg(long)]
    ast: bool,
    /// Iterations a single while loop may run before it is aborted
    #[arg(long, default_value_t = DEFAULT_LOOP_LIMIT)]
    max_iterations: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let config = Config {
        max_loop_iterations: cli.max_iterations,
    };

    if cli.list_samples {
        for sample in samples::SAMPLES {
            println!("{:<12} {}", sample.name, sample.title);
        }
        return ExitCode::SUCCESS;
    }

    let source = if let Some(name) = &cli.sample {
        match samples::find(name) {
            Some(sample) => sample.source.to_string(),
            None => {
                eprintln!("unknown sample '{name}', try --list-samples");
                return ExitCode::FAILURE;
            }
        }
    } else if let Some(path) = &cli.file {
        match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                eprintln!("error reading {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        }
    } else if !stdin().is_terminal() {
        match io::read_to_string(stdin().lock()) {
            Ok(program) => program,
            Err(err) => {
                eprintln!("error reading stdin: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        return match run_prompt(config) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
        };
    };

    let ok = if cli.tokens || cli.ast {
        inspect(&source, cli.tokens, cli.ast)
    } else {
        run_source(&mut Interpreter::with_config(config), &source)
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run_source(interpreter: &mut Interpreter, code: &str) -> bool {
    let mut out = vec![];
    let res = interpreter.run_into(code, &mut out);
    for line in out {
        println!("{line}");
    }
    if let Err(err) = res {
        println!("error: {}", err);
        return false;
    }
    true
}

fn inspect(code: &str, tokens: bool, ast: bool) -> bool {
    let scanned = match tokenize(code) {
        Ok(scanned) => scanned,
        Err(err) => {
            println!("error: {}", err);
            return false;
        }
    };
    if tokens {
        print!("{}", render_tokens(&scanned));
    }
    if ast {
        match parse(&scanned) {
            Ok(program) => print!("{}", render_ast(&program)),
            Err(err) => {
                println!("error: {}", err);
                return false;
            }
        }
    }
    true
}

struct TabEventHandler;
impl ConditionalEventHandler for TabEventHandler {
    fn handle(&self, _: &Event, _n: RepeatCount, _: bool, _: &EventContext) -> Option<Cmd> {
        Some(Cmd::Indent(Movement::WholeLine))
    }
}

#[derive(Helper, Completer, Hinter, Highlighter, Validator)]
struct ReplHelper {
    #[rustyline(Completer)]
    completer: (),
    #[rustyline(Validator)]
    validator: MatchingBracketValidator,
}

fn run_prompt(config: Config) -> Result<(), Box<dyn Error>> {
    let mut interpreter = Interpreter::with_config(config);
    let h = ReplHelper {
        completer: (),
        validator: MatchingBracketValidator::new(),
    };
    let mut rl = Editor::new()?;
    rl.set_helper(Some(h));
    rl.bind_sequence(
        KeyEvent::from('\t'),
        EventHandler::Conditional(Box::new(TabEventHandler)),
    );

    loop {
        let readline = rl.readline("> ");
        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                let line = line.trim();
                match line {
                    "" => {}
                    "exit" => return Ok(()),
                    "reset" => {
                        interpreter.reset();
                        println!("Variables cleared.");
                    }
                    "vars" => {
                        for (name, val) in interpreter.environment().iter_sorted() {
                            println!("{name} = {val}");
                        }
                    }
                    _ => {
                        if let Some(code) = line.strip_prefix(":tokens") {
                            inspect(code, true, false);
                        } else if let Some(code) = line.strip_prefix(":ast") {
                            inspect(code, false, true);
                        } else {
                            run_source(&mut interpreter, line);
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
            Err(err) => {
                break Err(Box::new(err));
            }
        }
    }
}
