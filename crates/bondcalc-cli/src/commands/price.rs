//! Price command implementation.
//!
//! Prices a bond at one yield and reports its duration and convexity.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::{debug, warn};

use crate::cli::OutputFormat;
use crate::commands::{percent_to_rate, validate_yield, BondArgs, RunContext};
use crate::output::{
    format_percent, print_header, print_output, print_single, print_warning, KeyValue,
};

/// Arguments for the price command.
#[derive(Args, Debug)]
pub struct PriceArgs {
    #[command(flatten)]
    pub bond: BondArgs,

    /// Annual yield to maturity (as percentage)
    #[arg(short = 'y', long = "yield", allow_negative_numbers = true)]
    pub yield_value: f64,

    /// Yield move in basis points for the duration/convexity estimate
    #[arg(long, default_value = "100")]
    pub shift_bp: f64,

    /// Also print the cash flow schedule
    #[arg(long)]
    pub cash_flows: bool,
}

/// Full price report.
#[derive(Debug, Serialize)]
pub struct PriceReport {
    pub yield_rate: f64,
    pub price: f64,
    pub macaulay_duration: f64,
    pub modified_duration: f64,
    pub convexity: f64,
    pub shift_bp: f64,
    pub estimated_change_up: f64,
    pub estimated_change_down: f64,
    pub repriced_change_up: Option<f64>,
    pub repriced_change_down: Option<f64>,
}

/// One row of the cash flow schedule.
#[derive(Debug, Serialize, Tabled)]
struct CashFlowRow {
    #[tabled(rename = "Period")]
    period: u32,
    #[tabled(rename = "Time (y)")]
    time: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Execute the price command.
pub fn execute(args: PriceArgs, ctx: &RunContext) -> Result<()> {
    let yield_rate = percent_to_rate(validate_yield(args.yield_value)?);
    let model = args.bond.to_model(ctx.period_policy, Some(yield_rate))?;

    let analytics = model.analyze()?;
    let dy = args.shift_bp / 10_000.0;

    // Actual relative moves, for comparison with the Taylor estimate.
    let repriced_change = |shifted: f64| match model.price(shifted) {
        Ok(p) => Some(p / analytics.price - 1.0),
        Err(e) => {
            warn!(yield_rate = shifted, error = %e, "repricing comparison failed");
            print_warning(&format!(
                "cannot reprice at {}: {}",
                format_percent(shifted, 2),
                e
            ));
            None
        }
    };
    let repriced_change_up = repriced_change(yield_rate + dy);
    let repriced_change_down = repriced_change(yield_rate - dy);

    let report = PriceReport {
        yield_rate: analytics.yield_rate,
        price: analytics.price,
        macaulay_duration: analytics.macaulay_duration,
        modified_duration: analytics.modified_duration,
        convexity: analytics.convexity,
        shift_bp: args.shift_bp,
        estimated_change_up: analytics.estimated_price_change(dy),
        estimated_change_down: analytics.estimated_price_change(-dy),
        repriced_change_up,
        repriced_change_down,
    };
    debug!(?report, "priced bond");

    match ctx.format {
        OutputFormat::Table => print_table_report(&report, ctx.quiet)?,
        format => print_single(&report, format)?,
    }

    if args.cash_flows {
        let rows: Vec<CashFlowRow> = model
            .cash_flows()
            .into_iter()
            .map(|cf| CashFlowRow {
                period: cf.period,
                time: format!("{:.4}", cf.time),
                amount: format!("{:.2}", cf.amount),
            })
            .collect();

        if ctx.format == OutputFormat::Table && !ctx.quiet {
            print_header("Cash Flows");
        }
        print_output(&rows, ctx.format)?;
    }

    Ok(())
}

fn print_table_report(report: &PriceReport, quiet: bool) -> Result<()> {
    let shift = report.shift_bp;

    if !quiet {
        print_header("Bond Analytics");
    }

    let rows = vec![
        KeyValue::from_percent("Yield", report.yield_rate),
        KeyValue::from_f64("Price", report.price, 4),
        KeyValue::from_f64("Macaulay Duration", report.macaulay_duration, 4),
        KeyValue::from_f64("Modified Duration", report.modified_duration, 4),
        KeyValue::from_f64("Convexity", report.convexity, 4),
        KeyValue::new(
            format!("Est. change +{shift}bp"),
            format_percent(report.estimated_change_up, 4),
        ),
        KeyValue::new(
            format!("Repriced change +{shift}bp"),
            optional_percent(report.repriced_change_up),
        ),
        KeyValue::new(
            format!("Est. change -{shift}bp"),
            format_percent(report.estimated_change_down, 4),
        ),
        KeyValue::new(
            format!("Repriced change -{shift}bp"),
            optional_percent(report.repriced_change_down),
        ),
    ];

    print_output(&rows, OutputFormat::Table)
}

fn optional_percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format_percent(v, 4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_percent() {
        assert_eq!(optional_percent(Some(-0.0412)), "-4.1200%");
        assert_eq!(optional_percent(None), "n/a");
    }
}
