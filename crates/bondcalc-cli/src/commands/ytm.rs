//! YTM command implementation.
//!
//! Solves for the annual yield that reproduces a market price.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::{debug, info};

use bondcalc_bonds::ytm::{DEFAULT_YTM_MAX_ITERATIONS, DEFAULT_YTM_TOLERANCE};
use bondcalc_bonds::{YtmMethod, YtmSolver};

use crate::cli::{MethodArg, OutputFormat};
use crate::commands::{percent_to_rate, validate_price, validate_yield, BondArgs, RunContext};
use crate::output::{print_header, print_output, print_single, KeyValue};

/// Arguments for the ytm command.
#[derive(Args, Debug)]
pub struct YtmArgs {
    #[command(flatten)]
    pub bond: BondArgs,

    /// Market price of the bond, in the same units as the face value
    #[arg(short, long)]
    pub price: f64,

    /// Root-finding method
    #[arg(long, value_enum, default_value = "brent")]
    pub method: MethodArg,

    /// Convergence tolerance on relative price error
    #[arg(long, default_value_t = DEFAULT_YTM_TOLERANCE)]
    pub tolerance: f64,

    /// Iteration budget
    #[arg(long, default_value_t = DEFAULT_YTM_MAX_ITERATIONS)]
    pub max_iterations: u32,

    /// Lower end of the yield search bracket (as percentage)
    #[arg(long, default_value = "-99", allow_negative_numbers = true)]
    pub low: f64,

    /// Upper end of the yield search bracket (as percentage)
    #[arg(long, default_value = "100", allow_negative_numbers = true)]
    pub high: f64,
}

/// Solved yield report.
#[derive(Debug, Serialize)]
pub struct YtmReport {
    pub market_price: f64,
    pub yield_rate: f64,
    pub method: YtmMethod,
    pub iterations: u32,
    pub residual: f64,
}

/// Execute the ytm command.
pub fn execute(args: YtmArgs, ctx: &RunContext) -> Result<()> {
    let market_price = validate_price(args.price)?;
    let low = percent_to_rate(validate_yield(args.low)?);
    let high = percent_to_rate(validate_yield(args.high)?);

    let model = args.bond.to_model(ctx.period_policy, None)?;

    let method: YtmMethod = args.method.into();
    let solver = YtmSolver::new()
        .with_method(method)
        .with_bracket(low, high)
        .with_tolerance(args.tolerance)
        .with_max_iterations(args.max_iterations);
    debug!(?solver, market_price, "solving for yield");

    let result = model.ytm_with(market_price, &solver)?;
    info!(
        yield_rate = result.yield_rate,
        iterations = result.iterations,
        "{} converged",
        method
    );

    let report = YtmReport {
        market_price,
        yield_rate: result.yield_rate,
        method,
        iterations: result.iterations,
        residual: result.residual,
    };

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header("Yield to Maturity");
            }
            let rows = vec![
                KeyValue::from_f64("Market Price", report.market_price, 4),
                KeyValue::from_percent("Yield", report.yield_rate),
                KeyValue::new("Method", report.method.to_string()),
                KeyValue::new("Iterations", report.iterations.to_string()),
                KeyValue::new("Residual", format!("{:.2e}", report.residual)),
            ];
            print_output(&rows, OutputFormat::Table)?;
        }
        format => print_single(&report, format)?,
    }

    Ok(())
}
