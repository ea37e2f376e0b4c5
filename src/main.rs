use std::process::ExitCode;

use clap::Parser;
use dunit_versions::cli::{Cli, run};

fn main() -> anyhow::Result<ExitCode> {
    run(Cli::parse())
}
