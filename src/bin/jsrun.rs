//! Command-line entry point.
//!
//! Usage: `jsrun --files=a.js,b.js [--output-tokens|--output-ast]`
//!
//! Multiple files are concatenated in argument order before lexing; there
//! is no module system. A program that throws still exits 0 after the
//! error is printed; exit 1 is reserved for missing/unreadable files and
//! lex/parse failures.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as CliParser;
use tracing_subscriber::EnvFilter;

use jsrun::error::Error;
use jsrun::lexer::Lexer;
use jsrun::parser::Parser;
use jsrun::Interpreter;

#[derive(CliParser)]
#[command(name = "jsrun", about = "Tree-walking interpreter for an ECMAScript subset")]
struct Cli {
    /// Comma-separated list of source files, concatenated in order.
    #[arg(long, value_delimiter = ',')]
    files: Vec<PathBuf>,

    /// Dump the token stream as pretty-printed JSON and exit.
    #[arg(long)]
    output_tokens: bool,

    /// Dump the AST as pretty-printed JSON and exit.
    #[arg(long)]
    output_ast: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.files.is_empty() {
        eprintln!("jsrun: no input files (use --files=a.js,b.js)");
        return ExitCode::from(1);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let mut source = String::new();
    for path in &cli.files {
        tracing::debug!(path = %path.display(), "reading source file");
        let text = fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.clone(),
            source: e,
        })?;
        source.push_str(&text);
        source.push('\n');
    }

    let tokens = Lexer::tokenize(&source)?;
    tracing::debug!(count = tokens.len(), "lexed tokens");

    if cli.output_tokens {
        let dump: Vec<serde_json::Value> = tokens.iter().map(|t| t.to_json()).collect();
        println!("{:#}", serde_json::Value::Array(dump));
        return Ok(());
    }

    let program = Parser::new(tokens).parse_program()?;
    tracing::debug!(statements = program.body.len(), "parsed program");

    if cli.output_ast {
        println!("{:#}", program.to_json());
        return Ok(());
    }

    let mut interp = Interpreter::new();
    if let Ok(threshold) = std::env::var("JSRUN_GC_THRESHOLD") {
        if let Ok(threshold) = threshold.parse::<usize>() {
            interp.set_gc_threshold(threshold);
        }
    }

    interp.run(&program);
    Ok(())
}
