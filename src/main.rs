#![warn(clippy::all, rust_2018_idioms)]

use std::process::ExitCode;

use clap::Parser;

mod cli;

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    cli::run(cli::CliArgs::parse())
}
