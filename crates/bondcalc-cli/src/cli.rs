//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use bondcalc_bonds::{PeriodPolicy, YtmMethod};

use crate::commands::{PriceArgs, ScenarioArgs, YtmArgs};

/// bondcalc - Textbook bond analytics from the command line
#[derive(Parser)]
#[command(name = "bondcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// How to treat a maturity that is not a whole number of periods
    #[arg(long, value_enum, default_value = "reject", global = true)]
    pub period_policy: PeriodPolicyArg,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Reprice a bond across a set of yield shocks
    Scenario(ScenarioArgs),

    /// Price a bond at a yield and report duration and convexity
    Price(PriceArgs),

    /// Solve for the yield to maturity implied by a price
    Ytm(YtmArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the values)
    Minimal,
}

/// Fractional period count handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PeriodPolicyArg {
    /// Refuse maturities that are not a whole number of periods
    #[default]
    Reject,
    /// Drop the trailing partial period
    Truncate,
    /// Round to the nearest whole period
    Round,
}

impl From<PeriodPolicyArg> for PeriodPolicy {
    fn from(arg: PeriodPolicyArg) -> Self {
        match arg {
            PeriodPolicyArg::Reject => PeriodPolicy::Reject,
            PeriodPolicyArg::Truncate => PeriodPolicy::Truncate,
            PeriodPolicyArg::Round => PeriodPolicy::Round,
        }
    }
}

/// Root-finding method for the YTM search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MethodArg {
    /// Brent's method
    #[default]
    Brent,
    /// Interval halving
    Bisection,
}

impl From<MethodArg> for YtmMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Brent => YtmMethod::Brent,
            MethodArg::Bisection => YtmMethod::Bisection,
        }
    }
}
