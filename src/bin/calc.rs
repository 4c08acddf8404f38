//! Pocket calculator.
//!
//! Evaluates the expressions given on the command line, or else
//! every non-blank line of standard input.

use std::io::{self, BufRead};

use clap::ArgAction::SetTrue;
use clap::Parser;
use thiserror::Error;
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

use monparse::{ast, grammar, ParseError};

/// Parse and evaluate sums and products of integers
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Cli {
    /// Expressions to evaluate; if none are given, they are read from standard input.
    expressions: Vec<String>,

    /// Use the loop-based grammar, which copes with long operator chains.
    #[clap(action = SetTrue, long)]
    flat: bool,

    /// Also print the syntax tree of every expression.
    #[clap(action = SetTrue, long)]
    tree: bool,

    /// Accept (and warn about) input left over after an expression.
    #[clap(action = SetTrue, long)]
    allow_trailing: bool,
}

#[derive(Debug, Error)]
enum Fail {
    /// We were not able to set up logging.
    #[error("failed to initialise tracing filter (perhaps there is a problem with environment variables): {0}")]
    InitialisationFailure(String),
    #[error("failed to read standard input: {0}")]
    Io(#[from] io::Error),
    #[error("{input:?}: {error}")]
    Parse { input: String, error: ParseError },
    #[error("{input:?}: unexpected input at offset {offset}")]
    Trailing { input: String, offset: usize },
}

fn init_tracing() -> Result<(), Fail> {
    // RUST_LOG selects which trace messages get printed.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(io::stderr);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("warn"))
        .map_err(|e| Fail::InitialisationFailure(e.to_string()))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
    Ok(())
}

/// Leftover input, up to the ASCII whitespace that the grammar also skips.
fn trailing(rest: &str) -> &str {
    rest.trim_start_matches(|c: char| c.is_ascii_whitespace())
}

fn calculate(cli: &Cli, input: &str) -> Result<(), Fail> {
    let outcome = if cli.flat {
        grammar::parse_flat(input)
    } else {
        grammar::parse(input)
    };
    let (node, rest) = outcome.into_result().map_err(|failure| Fail::Parse {
        input: input.to_string(),
        error: ParseError::new(input, failure),
    })?;

    let rest = trailing(rest);
    if !rest.is_empty() {
        if !cli.allow_trailing {
            return Err(Fail::Trailing {
                input: input.to_string(),
                offset: input.len() - rest.len(),
            });
        }
        event!(Level::WARN, trailing = rest, "ignoring trailing input");
    }

    if cli.tree {
        println!("{node:?}");
    }
    println!("{node} = {}", ast::evaluate(&node));
    Ok(())
}

fn run() -> Result<bool, Fail> {
    let cli = Cli::parse();
    init_tracing()?;

    let span = span!(Level::INFO, "calc", flat = cli.flat);
    let _enter = span.enter();

    let inputs: Vec<String> = if cli.expressions.is_empty() {
        io::stdin().lock().lines().collect::<Result<_, _>>()?
    } else {
        cli.expressions.clone()
    };

    let mut all_ok = true;
    for input in inputs.iter().filter(|line| !line.trim().is_empty()) {
        if let Err(e) = calculate(&cli, input) {
            event!(Level::DEBUG, "calculation failed: {:?}", e);
            eprintln!("{e}");
            all_ok = false;
        }
    }
    Ok(all_ok)
}

fn main() {
    match run() {
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Ok(all_ok) => {
            std::process::exit(if all_ok { 0 } else { 1 });
        }
    }
}
