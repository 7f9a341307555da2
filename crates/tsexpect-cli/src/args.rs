use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::OutputFormat;

/// CLI arguments for the tsexpect binary.
#[derive(Parser, Debug)]
#[command(
    name = "tsexpect",
    version,
    about = "Structural type assertions over JSON type fixtures"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Output format. Overrides `format` in tsexpect.json.
    #[arg(long, value_enum, ignore_case = true, global = true)]
    pub format: Option<OutputFormat>,

    /// Path to a tsexpect.json file. Defaults to the one beside the fixture.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every assertion in a fixture.
    Check {
        fixture: PathBuf,

        /// Stop at the first failing assertion.
        #[arg(long = "fail-fast")]
        fail_fast: bool,
    },
    /// Print the flattened prop map of a type.
    Props {
        fixture: PathBuf,

        /// A declared name, a keyword, or a JSON type expression.
        #[arg(value_name = "TYPE")]
        type_expr: String,
    },
    /// Compare two types and show where they differ.
    Explain {
        fixture: PathBuf,

        #[arg(value_name = "ACTUAL")]
        actual: String,

        #[arg(value_name = "EXPECTED")]
        expected: String,
    },
}

impl Command {
    pub fn fixture(&self) -> &Path {
        match self {
            Command::Check { fixture, .. }
            | Command::Props { fixture, .. }
            | Command::Explain { fixture, .. } => fixture,
        }
    }

    pub fn fail_fast(&self) -> bool {
        matches!(self, Command::Check { fail_fast: true, .. })
    }
}

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod tests;
