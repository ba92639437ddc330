use std::io;

use tracing_subscriber::{fmt, EnvFilter};

mod calculator;

use calculator::Calculator;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut calculator = Calculator::new(stdin.lock(), stdout.lock());

    if let Err(msg) = calculator.run() {
        eprintln!("Error: {}", msg);
        std::process::exit(1);
    }
}
