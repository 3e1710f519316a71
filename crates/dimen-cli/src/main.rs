//! dimen - unit-checked calculator
//!
//! Usage:
//!   dimen "60_mph to m/s"           # Single expression
//!   echo "3_km + 2_km" | dimen      # Pipe mode
//!   dimen -f physics.txt            # File mode
//!   dimen -i                        # Interactive REPL
//!   dimen --units                   # List built-in units

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dimen_core::{catalog, Engine, Value};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dimen")]
#[command(about = "A calculator that keeps track of physical units", long_about = None)]
struct Args {
    /// Expression to evaluate
    expression: Option<String>,

    /// Read expressions from file
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Interactive REPL mode
    #[arg(short, long)]
    interactive: bool,

    /// Show only results (no input echo)
    #[arg(short, long)]
    quiet: bool,

    /// Print one JSON object per line
    #[arg(long)]
    json: bool,

    /// List built-in units and exit
    #[arg(long)]
    units: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy)]
enum Output {
    Aligned,
    Quiet,
    Json,
}

#[derive(Serialize)]
struct JsonLine<'a> {
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    tracing::debug!(?args, "parsed arguments");

    if args.units {
        print_units();
        return Ok(());
    }

    let output = if args.json {
        Output::Json
    } else if args.quiet {
        Output::Quiet
    } else {
        Output::Aligned
    };

    let mut engine = Engine::new();
    let mut ok = true;

    // Determine input source
    if let Some(expr) = &args.expression {
        ok &= eval_and_print(&mut engine, expr, output)?;
    } else if let Some(path) = &args.file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        for line in content.lines() {
            ok &= eval_and_print(&mut engine, line, output)?;
        }
    } else if args.interactive {
        run_repl(&mut engine, output)?;
    } else if !io::stdin().is_terminal() {
        // Pipe mode
        for line in io::stdin().lock().lines() {
            ok &= eval_and_print(&mut engine, &line?, output)?;
        }
    } else {
        eprintln!("Usage: dimen <expression>");
        eprintln!("       dimen -f <file>");
        eprintln!("       dimen -i");
        eprintln!("       echo \"3_km + 2_km\" | dimen");
        std::process::exit(2);
    }

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Prints one line's result; returns whether it evaluated without error.
fn eval_and_print(engine: &mut Engine, input: &str, output: Output) -> Result<bool> {
    let result = engine.eval(input);

    match output {
        Output::Json => {
            let (value, error) = match &result {
                Ok(value) => (value.as_ref(), None),
                Err(e) => (None, Some(e.to_string())),
            };
            if value.is_some() || error.is_some() {
                let line = JsonLine {
                    input,
                    value,
                    error,
                };
                println!("{}", serde_json::to_string(&line)?);
            }
        }
        Output::Quiet => match &result {
            Ok(Some(value)) => println!("{value}"),
            Ok(None) => {}
            Err(e) => eprintln!("error: {e}"),
        },
        Output::Aligned => {
            let shown = match &result {
                Ok(Some(value)) => value.to_string(),
                Ok(None) => String::new(),
                Err(e) => format!("error: {e}"),
            };
            if shown.is_empty() {
                println!("{input}");
            } else {
                // Pad input to align results
                let padding = 40usize.saturating_sub(input.len());
                println!("{}{:>width$} = {}", input, "", shown, width = padding);
            }
        }
    }

    Ok(result.is_ok())
}

fn run_repl(engine: &mut Engine, output: Output) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("dimen - unit-checked calculator");
    println!("Type expressions to calculate. Press Ctrl+D to exit.\n");

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            println!();
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // Special commands
        match line {
            "quit" | "exit" => break,
            "clear" => {
                engine.clear();
                println!("Cleared.");
                continue;
            }
            "units" => {
                print_units();
                continue;
            }
            "help" => {
                print_help();
                continue;
            }
            _ => {}
        }

        eval_and_print(engine, line, output)?;
    }

    Ok(())
}

fn print_units() {
    let mut entries: Vec<_> = catalog().entries().collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    for entry in entries {
        println!("{:<28} {:<12} {}", entry.name, entry.literal, entry.unit);
    }
}

fn print_help() {
    println!(
        r#"
Commands:
  help     Show this help
  clear    Clear all variables and history
  units    List built-in units
  quit     Exit the REPL

Examples:
  3_km + 2_km              Same-unit arithmetic
  d = 100_m                Variable assignment
  d / 9.58_s               Units compose
  60_mph to m/s            Unit conversion
  sin(30_deg)              Trigonometry on angles
  (2_m) ^ 3                Integer powers
"#
    );
}
