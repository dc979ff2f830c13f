//! # Riddle Demo
//!
//! Runs every strategy of every puzzle on a set of example inputs and prints
//! the results side by side.
//!
//! ```sh
//! cargo run -p riddle-demo
//! cargo run -p riddle-demo -- riddle-demo/scenarios.json
//! ```
//!
//! Set `RUST_LOG=debug` (or `trace`) to see solver iterations.

mod scenarios;

use std::{env, error::Error as _, path::PathBuf, process::ExitCode};

use riddle_problems::{boxes, matrix, squares};
use thiserror::Error;
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scenarios::{LoadError, Scenarios};

#[derive(Debug, Error)]
enum DemoError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("box counting failed")]
    Boxes(#[from] boxes::Error),

    #[error("line search failed")]
    Squares(#[from] squares::Error),

    #[error("matrix sum failed")]
    Matrix(#[from] matrix::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(env::args_os().nth(1).map(PathBuf::from)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mut message = err.to_string();
            let mut source = err.source();
            while let Some(cause) = source {
                message.push_str(": ");
                message.push_str(&cause.to_string());
                source = cause.source();
            }
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: Option<PathBuf>) -> Result<(), DemoError> {
    let scenarios = match path {
        Some(path) => Scenarios::load(&path)?,
        None => Scenarios::builtin()?,
    };

    println!("Minimum boxes");
    for (i, case) in scenarios.boxes.iter().enumerate() {
        println!("  #{}: apple = {:?}, capacity = {:?}", i + 1, case.apple, case.capacity);
        for method in boxes::Method::ALL {
            let used = method.solve(&case.apple, &case.capacity)?;
            println!("    {:<24} {used}", method.name());
        }
    }

    println!();
    println!("Separate squares");
    let config = squares::Config::default();
    for (i, input) in scenarios.squares.iter().enumerate() {
        let triples: Vec<[i64; 3]> = input.iter().copied().map(Into::into).collect();
        println!("  #{}: squares = {triples:?}", i + 1);
        for method in squares::Method::ALL {
            let y = method.solve(input, &config)?;
            println!("    {:<24} {y:.5}", method.name());
        }
    }

    println!();
    println!("Maximum matrix sum");
    for (i, input) in scenarios.matrices.iter().enumerate() {
        let sum = matrix::max_matrix_sum(input)?;
        println!("  #{}: matrix = {input:?} -> {sum}", i + 1);
    }

    Ok(())
}
