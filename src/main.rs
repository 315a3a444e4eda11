//! Command line driver for the mini-lang front-end.
//!
//! Lexes a source file and dumps its tokens, or runs an interactive prompt
//! that does the same for every entered line.
use clap::{Parser, Subcommand};
use itertools::Itertools;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use mini_lang::minilang::errors::EngineError;
use mini_lang::minilang::token::lexer::{self, Lexer};

use std::io::{BufRead, Write};
use std::process::{ExitCode, Termination};

/// Load a file and print every token in it, one per line.
fn run_file(file: &str) -> Result<(), EngineError> {
    info!(file, "tokenizing source file");
    let mut lexer = Lexer::open(file)?;

    let mut stdout = std::io::stdout().lock();
    while lexer.peek(1)?.is_some() {
        let token = lexer.next()?;
        writeln!(stdout, "{token}").map_err(EngineError::OutputError)?;
    }
    Ok(())
}

/// Run the REPL Prompt until standard input is exhausted.
fn run_prompt() -> Result<(), EngineError> {
    let mut line = String::new();
    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout();
    loop {
        write!(stdout, "> ")
            .and_then(|()| stdout.flush())
            .map_err(EngineError::OutputError)?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            debug!("end of input, leaving the prompt");
            writeln!(stdout).map_err(EngineError::OutputError)?;
            return Ok(());
        }

        match lexer::tokenize(&line, "<stdin>") {
            Ok(tokens) => writeln!(stdout, "{}", tokens.iter().join("  "))
                .map_err(EngineError::OutputError)?,
            Err(err) => eprintln!("{err}"),
        }
    }
}

/// Outcome of a whole command. Errors are printed to standard error and
/// turned into the exit status chosen by [`EngineError::exit_status`].
/// Only `main` returns it, so `T` defaults to `()`.
#[derive(Debug)]
enum EngineResult<T = ()> {
    /// Ok variant.
    Ok(T),
    /// Error variant
    Err(EngineError),
}

impl Termination for EngineResult {
    fn report(self) -> ExitCode {
        if let EngineResult::Err(err) = self {
            eprintln!("{err}");
            err.into()
        } else {
            ExitCode::SUCCESS
        }
    }
}

impl<T, E> From<Result<T, E>> for EngineResult<T>
where
    EngineError: From<E>,
{
    fn from(value: Result<T, E>) -> Self {
        match value {
            Ok(value) => EngineResult::Ok(value),
            Err(err) => EngineResult::Err(err.into()),
        }
    }
}

/// mini-lang lexes programs of a small expression and statement language
/// and prints their tokens, either from a file or interactively.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Subcommands, either this or [`source_file`] needs to be specified.
    #[command(subcommand)]
    command: Option<Commands>,

    /// Source File for the program
    #[arg(required = true)]
    source_file: Option<String>,

    /// Which log events to show, in `tracing` `EnvFilter` syntax.
    #[arg(long, env = "MINI_LANG_LOG", default_value = "warn", global = true)]
    log_filter: String,
}

/// Available commands in mini-lang
#[derive(Subcommand, Debug)]
#[command(subcommand_negates_reqs = true)]
enum Commands {
    /// run the interactive prompt, printing the tokens of each line.
    Repl,
    /// tokenize the given file and print its tokens.
    Tokenize {
        /// File to tokenize.
        source_file: String,
    },
}

/// Installs the global log subscriber, writing to standard error.
fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("Ignoring invalid log filter {filter:?}: {err}");
        EnvFilter::new("warn")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn main() -> EngineResult {
    let Args {
        command,
        source_file,
        log_filter,
    } = Args::parse();
    init_logging(&log_filter);

    match (command, source_file) {
        (None, Some(source_file))
        | (Some(Commands::Tokenize { source_file }), None) => run_file(&source_file).into(),

        (Some(Commands::Repl), None) => run_prompt().into(),

        (Some(_), Some(_))
        | (None, None) => unreachable!("clap verifies this cannot happen."),
    }
}
