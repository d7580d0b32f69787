#[cfg(all(feature = "line", not(feature = "tui")))]
mod line_mode;
#[cfg(feature = "tui")]
mod render_help;
#[cfg(feature = "tui")]
mod tui_mode;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use rpncalc::calc_engine::{line_to_rpn, Session};

/// Infix / RPN calculator over scalars and vectors.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluate a single line (expression or `name = expr`) and print the result.
    #[arg(short, long, conflicts_with = "file")]
    expr: Option<String>,

    /// Run every line of a program file and print the final variables.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// With --expr, print the RPN form instead of evaluating it.
    #[arg(long, requires = "expr")]
    rpn: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(expr) = args.expr {
        env_logger::init();
        return run_expr(&expr, args.rpn);
    }
    if let Some(path) = args.file {
        env_logger::init();
        return run_file(&path);
    }
    run_interactive()
}

fn run_expr(expr: &str, rpn_only: bool) -> Result<()> {
    if rpn_only {
        match line_to_rpn(expr)? {
            Some(rpn) => println!("{}", rpn),
            None => bail!("nothing to convert"),
        }
        return Ok(());
    }
    let mut session = Session::new();
    match session.eval_line(expr)? {
        Some(outcome) => match outcome.target {
            Some(name) => println!("{} = {}", name, outcome.value),
            None => println!("{}", outcome.value),
        },
        None => bail!("nothing to evaluate"),
    }
    Ok(())
}

fn run_file(path: &Path) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read program file '{}'", path.display()))?;

    let mut session = Session::new();
    for (i, line) in source.lines().enumerate() {
        let outcome = session
            .eval_line(line)
            .with_context(|| format!("line {}: {}", i + 1, line.trim()))?;
        if let Some(outcome) = outcome {
            if outcome.target.is_none() {
                println!("{}", outcome.value);
            }
        }
    }
    for (name, value) in session.variables() {
        println!("{} = {}", name, value);
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn run_interactive() -> Result<()> {
    tui_mode::run_tui()
}

#[cfg(all(feature = "line", not(feature = "tui")))]
fn run_interactive() -> Result<()> {
    env_logger::init();
    line_mode::run_line()
}

#[cfg(not(any(feature = "tui", feature = "line")))]
fn run_interactive() -> Result<()> {
    bail!("no interactive front end compiled in; use --expr or --file")
}
