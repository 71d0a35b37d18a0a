//! bondcalc CLI - Command-line interface for fixed-coupon bond analytics.
//!
//! # Usage
//!
//! ```bash
//! # Reprice the demonstration bond across the default yield shocks
//! bondcalc scenario
//!
//! # Same, from a scenario file with overridden shocks
//! bondcalc scenario --config config/scenario.toml --shocks=-2,0,2
//!
//! # Price a bond and report duration and convexity
//! bondcalc price --coupon 6.0 --maturity 5 --yield 3.0
//!
//! # Solve for yield to maturity
//! bondcalc ytm --coupon 8.0 --maturity 10 --price 875.38 --method bisection
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::RunContext;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let ctx = RunContext {
        format: cli.format,
        quiet: cli.quiet,
        period_policy: cli.period_policy.into(),
    };

    match cli.command {
        Commands::Scenario(args) => commands::scenario::execute(args, &ctx)?,
        Commands::Price(args) => commands::price::execute(args, &ctx)?,
        Commands::Ytm(args) => commands::ytm::execute(args, &ctx)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays parseable for json/csv output.
fn init_logging(verbose: bool) {
    let default_directive = if verbose { "bondcalc=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // Fails only when a global subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init();
}
