//! Thin binary entry point: the CLI lives in `cli.rs`, this file only
//! installs logging, invokes [`cli::run`] and turns the result into a
//! process exit code. Everything from the `attrformapp` API inward is UI
//! agnostic; this crate owns all terminal concerns.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

mod cli;
mod render;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", console::style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}
