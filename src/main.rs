//! Monkey interpreter CLI
//!
//! Main entry point for the `monkey` command.

use clap::{Parser, Subcommand};
use miette::Result;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use monkey::lexer::{Lexer, TokenKind};
use monkey::{Environment, Object, Reporter, SourceFile};

#[derive(Parser)]
#[command(name = "monkey")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tree-walking interpreter for the Monkey language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a Monkey source file
    Run {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Evaluate a source string given on the command line
    Eval {
        /// Monkey source code
        #[arg(value_name = "SOURCE")]
        source: String,
    },

    /// Start the interactive REPL
    Repl,

    /// Parse a file and print the program back as source
    Parse {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the AST as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Print the token stream of a file
    Tokens {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show information about the interpreter
    Info,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Run { input } => {
            let source = read_source(&input)?;
            execute(&input.to_string_lossy(), &source)
        }
        Commands::Eval { source } => execute("<eval>", &source),
        Commands::Repl => monkey::repl::run(),
        Commands::Parse { input, json } => parse(&input, json),
        Commands::Tokens { input } => tokens(&input),
        Commands::Info => info(),
    }
}

fn read_source(input: &Path) -> Result<String> {
    std::fs::read_to_string(input)
        .map_err(|e| miette::miette!("Failed to read input file {}: {}", input.display(), e))
}

/// Parse, report syntax errors, evaluate, and print a non-null result
fn execute(name: &str, source: &str) -> Result<()> {
    tracing::info!("Running {}", name);

    let (program, errors) = monkey::parse(source);
    if !errors.is_empty() {
        let mut reporter = Reporter::new(SourceFile::new(name, source));
        reporter.extend(errors);
        reporter.emit_all();
        return Err(miette::miette!(
            "{} parse errors found",
            reporter.error_count()
        ));
    }

    let env = Environment::new();
    let result = monkey::evaluate(&program, &env);
    match &*result {
        Object::Error(message) => Err(miette::miette!("runtime error: {}", message)),
        Object::Null => Ok(()),
        _ => {
            println!("{}", result.inspect());
            Ok(())
        }
    }
}

fn parse(input: &Path, json: bool) -> Result<()> {
    let source = read_source(input)?;
    let (program, errors) = monkey::parse(&source);

    if !errors.is_empty() {
        let mut reporter = Reporter::new(SourceFile::new(input.to_string_lossy(), source.clone()));
        reporter.extend(errors);
        reporter.emit_all();
        return Err(miette::miette!(
            "{} parse errors found",
            reporter.error_count()
        ));
    }

    if json {
        let json = serde_json::to_string_pretty(&program)
            .map_err(|e| miette::miette!("Failed to serialize AST: {}", e))?;
        println!("{}", json);
    } else {
        println!("{}", program);
    }
    Ok(())
}

fn tokens(input: &Path) -> Result<()> {
    let source = read_source(input)?;
    let mut lexer = Lexer::new(&source);
    loop {
        let token = lexer.next_token();
        println!("{:<8} {:?}", token.kind.as_str(), token.literal);
        if token.kind == TokenKind::Eof {
            break;
        }
    }
    Ok(())
}

fn info() -> Result<()> {
    println!("Monkey Interpreter");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Language:");
    println!("  - Integers, booleans, strings");
    println!("  - let / return statements, if / else expressions");
    println!("  - First-class functions with closures");
    println!();
    println!("Builtins:");
    for name in monkey::interp::builtins::names() {
        println!("  - {}", name);
    }
    Ok(())
}
