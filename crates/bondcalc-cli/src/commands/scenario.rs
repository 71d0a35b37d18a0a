//! Scenario command implementation.
//!
//! Reprices one bond at a base yield shifted by each of a list of parallel
//! shocks. A shock whose yield cannot be evaluated is reported as a failed
//! row and the run continues.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::{debug, warn};

use bondcalc_bonds::{BondModel, BondTerms};

use crate::cli::OutputFormat;
use crate::commands::{percent_to_rate, validate_coupon, validate_yield, RunContext};
use crate::config::ScenarioConfig;
use crate::output::{format_percent, format_shock, print_header, print_output, print_warning};

/// Arguments for the scenario command.
///
/// Flags override values from `--config`, which override the built-in
/// demonstration bond.
#[derive(Args, Debug, Default)]
pub struct ScenarioArgs {
    /// TOML scenario file (rates as fractions)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Face value
    #[arg(long)]
    pub face: Option<f64>,

    /// Annual coupon rate (as percentage)
    #[arg(short, long)]
    pub coupon: Option<f64>,

    /// Years to maturity
    #[arg(short, long)]
    pub maturity: Option<f64>,

    /// Coupon payments per year
    #[arg(long)]
    pub frequency: Option<u32>,

    /// Base annual yield (as percentage)
    #[arg(short, long, allow_negative_numbers = true)]
    pub base_yield: Option<f64>,

    /// Comma-separated yield shocks (as percentages), e.g. -1,-0.5,0,0.5,1
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    pub shocks: Option<Vec<f64>>,
}

/// One evaluated scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioRecord {
    pub shock: f64,
    pub yield_rate: f64,
    pub price: Option<f64>,
    pub macaulay_duration: Option<f64>,
    pub modified_duration: Option<f64>,
    pub convexity: Option<f64>,
    pub error: Option<String>,
}

/// Table rendering of a [`ScenarioRecord`].
#[derive(Debug, Serialize, Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Shock")]
    shock: String,
    #[tabled(rename = "Yield")]
    yield_rate: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Macaulay Dur.")]
    macaulay: String,
    #[tabled(rename = "Modified Dur.")]
    modified: String,
    #[tabled(rename = "Convexity")]
    convexity: String,
}

impl From<&ScenarioRecord> for ScenarioRow {
    fn from(r: &ScenarioRecord) -> Self {
        let cell = |v: Option<f64>, precision: usize| {
            v.map_or_else(|| "error".to_string(), |x| format!("{:.prec$}", x, prec = precision))
        };
        Self {
            shock: format_shock(r.shock),
            yield_rate: format_percent(r.yield_rate, 2),
            price: cell(r.price, 2),
            macaulay: cell(r.macaulay_duration, 3),
            modified: cell(r.modified_duration, 3),
            convexity: cell(r.convexity, 4),
        }
    }
}

impl ScenarioArgs {
    /// Resolves the run configuration: defaults, then file, then flags.
    pub fn resolve(&self) -> Result<ScenarioConfig> {
        let mut config = match &self.config {
            Some(path) => ScenarioConfig::from_file(path)?,
            None => ScenarioConfig::default(),
        };

        if let Some(face) = self.face {
            config.bond.face_value = face;
        }
        if let Some(coupon) = self.coupon {
            config.bond.coupon_rate = percent_to_rate(validate_coupon(coupon)?);
        }
        if let Some(maturity) = self.maturity {
            config.bond.years_to_maturity = maturity;
        }
        if let Some(frequency) = self.frequency {
            config.bond.periods_per_year = frequency;
        }
        if let Some(base) = self.base_yield {
            config.base_yield = percent_to_rate(validate_yield(base)?);
        }
        if let Some(shocks) = &self.shocks {
            config.shocks = shocks.iter().copied().map(percent_to_rate).collect();
        }

        Ok(config)
    }
}

/// Evaluates every shock in the configuration.
pub fn run_scenarios(model: &BondModel, config: &ScenarioConfig) -> Vec<ScenarioRecord> {
    config
        .scenario_yields()
        .into_iter()
        .map(|(shock, yield_rate)| match model.analytics(yield_rate) {
            Ok(a) => ScenarioRecord {
                shock,
                yield_rate,
                price: Some(a.price),
                macaulay_duration: Some(a.macaulay_duration),
                modified_duration: Some(a.modified_duration),
                convexity: Some(a.convexity),
                error: None,
            },
            Err(e) => {
                warn!(shock, yield_rate, error = %e, "scenario failed");
                ScenarioRecord {
                    shock,
                    yield_rate,
                    price: None,
                    macaulay_duration: None,
                    modified_duration: None,
                    convexity: None,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect()
}

/// Execute the scenario command.
pub fn execute(args: ScenarioArgs, ctx: &RunContext) -> Result<()> {
    let config = args.resolve()?;
    debug!(?config, "resolved scenario configuration");

    let terms = BondTerms::builder()
        .face_value(config.bond.face_value)
        .coupon_rate(config.bond.coupon_rate)
        .years_to_maturity(config.bond.years_to_maturity)
        .periods_per_year(config.bond.periods_per_year)
        .quoted_yield(config.base_yield)
        .period_policy(ctx.period_policy)
        .build()?;
    let model = BondModel::new(terms);

    let records = run_scenarios(&model, &config);

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header("Repricing the bond for different yield scenarios");
                println!("Base yield = {}\n", format_percent(config.base_yield, 2));
            }
            let rows: Vec<ScenarioRow> = records.iter().map(ScenarioRow::from).collect();
            print_output(&rows, OutputFormat::Table)?;

            for r in &records {
                if let Some(err) = &r.error {
                    print_warning(&format!("shock {}: {}", format_shock(r.shock), err));
                }
            }
        }
        format => print_records(&records, format)?,
    }

    Ok(())
}

fn print_records(records: &[ScenarioRecord], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for r in records {
                wtr.serialize(r)?;
            }
            wtr.flush()?;
        }
        _ => {
            for r in records {
                println!("{}", serde_json::to_string(r)?);
            }
        }
    }
    Ok(())
}
