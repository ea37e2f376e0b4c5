//! Command line front end for querying the version registry from scripts

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use crate::config::{self, CLASSPATHS_ENV};
use crate::log::{self, LogFormat};
use crate::version::VersionRegistry;

#[derive(Debug, Parser)]
#[command(
    name = "dunit-versions",
    version,
    about = "Query class-paths of old releases configured for compatibility tests"
)]
pub struct Cli {
    /// Generated class-path file (defaults to the build output locations)
    #[arg(long, global = true, env = CLASSPATHS_ENV)]
    pub file: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// List known versions in file order
    List {
        /// Leave out the version under development
        #[arg(long)]
        without_current: bool,
    },
    /// Print the class-path of a version
    Classpath { version: String },
    /// Print the oldest configured version
    Oldest,
    /// Exit successfully if the version is known
    Check { version: String },
}

#[derive(Debug, Serialize)]
struct ClasspathEntry<'a> {
    version: &'a str,
    classpath: &'a str,
}

#[derive(Debug, Serialize)]
struct CheckResult<'a> {
    version: &'a str,
    valid: bool,
    current: bool,
}

#[derive(Debug, Serialize)]
struct OldestVersion<'a> {
    oldest: &'a str,
}

pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    log::init(format)?;

    let path = cli
        .file
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(config::classpaths_file);
    debug!("Using version class-path file {:?}", path);

    let registry = VersionRegistry::load(&path)
        .with_context(|| format!("Failed to load version registry from {:?}", path))?;

    let succeeded = execute(
        &cli.command,
        cli.json,
        &registry,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )?;

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Runs a command against a loaded registry.
///
/// Returns `false` when the command reports a negative answer, such as an
/// unknown version.
pub fn execute(
    command: &Command,
    json: bool,
    registry: &VersionRegistry,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<bool> {
    match command {
        Command::List { without_current } => {
            let entries = registry.entries().filter(|(version, _)| {
                !(*without_current && VersionRegistry::is_current_version(version))
            });

            if json {
                let entries: Vec<ClasspathEntry> = entries
                    .map(|(version, classpath)| ClasspathEntry { version, classpath })
                    .collect();
                writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
            } else {
                for (version, _) in entries {
                    writeln!(out, "{}", version)?;
                }
            }
            Ok(true)
        }
        Command::Classpath { version } => {
            let Some(classpath) = registry.classpath(version) else {
                writeln!(err, "Unknown version: {}", version)?;
                return Ok(false);
            };

            if json {
                let entry = ClasspathEntry { version, classpath };
                writeln!(out, "{}", serde_json::to_string(&entry)?)?;
            } else {
                writeln!(out, "{}", classpath)?;
            }
            Ok(true)
        }
        Command::Oldest => {
            let oldest = registry.oldest_version();
            if json {
                writeln!(out, "{}", serde_json::to_string(&OldestVersion { oldest })?)?;
            } else {
                writeln!(out, "{}", oldest)?;
            }
            Ok(true)
        }
        Command::Check { version } => {
            let valid = registry.is_valid_version(version);
            if json {
                let result = CheckResult {
                    version,
                    valid,
                    current: VersionRegistry::is_current_version(version),
                };
                writeln!(out, "{}", serde_json::to_string(&result)?)?;
            } else {
                writeln!(out, "{}", if valid { "valid" } else { "invalid" })?;
            }
            Ok(valid)
        }
    }
}
