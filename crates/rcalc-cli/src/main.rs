//! rcalc - terminal RPN calculator.
//!
//! Usage:
//!   rcalc                       Read lines from stdin, one submission each
//!   rcalc -e "3 4 add" -e "2 *"  Evaluate lines in order
//!   rcalc --list-operators      Print the operator catalog
//!   rcalc --list-units          Print the unit families
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=rcalc=debug`) to see engine tracing.

mod terminal;

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rcalc::{Engine, EngineConfig, OperatorRegistry};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use terminal::{TerminalRenderer, print_operators, print_units};

#[derive(Parser)]
#[command(name = "rcalc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Typed-value RPN calculator", long_about = None)]
struct Args {
    /// Evaluate LINE instead of reading stdin (repeatable)
    #[arg(short, long = "eval", value_name = "LINE")]
    eval: Vec<String>,

    /// Engine configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print every operator by category and exit
    #[arg(long)]
    list_operators: bool,

    /// Print every unit family and exit
    #[arg(long)]
    list_units: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rcalc=warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode, String> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path).map_err(|e| e.to_string())?,
        None => EngineConfig::default(),
    };
    let registry = OperatorRegistry::standard().map_err(|e| e.to_string())?;
    let mut engine = Engine::with_registry(registry, config, TerminalRenderer::new(registry))
        .map_err(|e| e.to_string())?;

    if args.list_operators {
        print_operators(engine.registry());
        return Ok(ExitCode::SUCCESS);
    }
    if args.list_units {
        print_units();
        return Ok(ExitCode::SUCCESS);
    }

    if !args.eval.is_empty() {
        let mut failed = false;
        for line in &args.eval {
            failed |= engine.submit_text(line).is_err();
        }
        engine.renderer().print_stack();
        return Ok(if failed {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    for line in io::stdin().lock().lines() {
        let line = line.map_err(|e| format!("error reading stdin: {e}"))?;
        if let Err(err) = engine.submit_text(&line) {
            // Already shown by the renderer.
            debug!(%err, "line rejected");
        }
        if engine.renderer().quit_requested() {
            break;
        }
        engine.renderer().print_stack();
    }
    Ok(ExitCode::SUCCESS)
}
