//! ifsresc CLI entrypoint.
//!
//! Thin wrapper over the `cli` module: parse args, run the synthetic IFS
//! alignment check, and exit with appropriate status. For programmatic use,
//! prefer the library API (`ifsresc::api`).

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
