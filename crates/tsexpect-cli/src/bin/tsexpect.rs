use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use tsexpect_cli::args::{CliArgs, Command};
use tsexpect_cli::config::{TsExpectConfig, find_config, load_config, resolve_options};
use tsexpect_cli::driver;
use tsexpect_cli::fixture::load_fixture;
use tsexpect_cli::reporter::Reporter;

const EXIT_SUCCESS: i32 = 0;
const EXIT_ASSERTIONS_FAILED: i32 = 1;

fn main() -> Result<()> {
    // Only installed when TSEXPECT_LOG or RUST_LOG is set.
    tsexpect_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let fixture_path = args.command.fixture();

    let config = match find_config(args.config.as_deref(), fixture_path) {
        Some(path) => load_config(&path)?,
        None => TsExpectConfig::default(),
    };
    let options = resolve_options(
        &config,
        args.format,
        args.no_color,
        args.command.fail_fast(),
        std::io::stdout().is_terminal(),
    );
    let reporter = Reporter::new(options.format, options.color);
    let fixture = load_fixture(fixture_path)?;
    let context = || format!("failed to build types from {}", fixture_path.display());

    let exit_code = match &args.command {
        Command::Check { .. } => {
            let report = driver::run_fixture(&fixture, options.fail_fast).with_context(context)?;
            print!("{}", reporter.render_check(&report)?);
            if report.success() {
                EXIT_SUCCESS
            } else {
                EXIT_ASSERTIONS_FAILED
            }
        }
        Command::Props { type_expr, .. } => {
            let props = driver::props(&fixture, type_expr).with_context(context)?;
            print!("{}", reporter.render_props(&props)?);
            EXIT_SUCCESS
        }
        Command::Explain {
            actual, expected, ..
        } => {
            let explanation = driver::explain(&fixture, actual, expected).with_context(context)?;
            print!("{}", reporter.render_explain(&explanation)?);
            if explanation.identical {
                EXIT_SUCCESS
            } else {
                EXIT_ASSERTIONS_FAILED
            }
        }
    };

    if exit_code != EXIT_SUCCESS {
        std::process::exit(exit_code);
    }
    Ok(())
}
