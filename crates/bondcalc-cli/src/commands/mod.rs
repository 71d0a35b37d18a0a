//! CLI command implementations.

pub mod price;
pub mod scenario;
pub mod ytm;

pub use price::PriceArgs;
pub use scenario::ScenarioArgs;
pub use ytm::YtmArgs;

use clap::Args;

use bondcalc_bonds::{BondModel, BondTerms, PeriodPolicy};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Settings shared by every command, taken from the global flags.
#[derive(Debug, Clone, Copy)]
pub struct RunContext {
    pub format: OutputFormat,
    pub quiet: bool,
    pub period_policy: PeriodPolicy,
}

/// Bond description flags shared by `price` and `ytm`.
#[derive(Args, Debug, Clone)]
pub struct BondArgs {
    /// Annual coupon rate (as percentage, e.g., 6.0 for 6%)
    #[arg(short, long)]
    pub coupon: f64,

    /// Years to maturity
    #[arg(short, long)]
    pub maturity: f64,

    /// Face value
    #[arg(long, default_value = "1000")]
    pub face: f64,

    /// Coupon payments per year: 1=Annual, 2=SemiAnnual, 4=Quarterly, 12=Monthly
    #[arg(long, default_value = "2")]
    pub frequency: u32,
}

impl BondArgs {
    /// Builds the bond model described by these flags.
    pub fn to_model(
        &self,
        period_policy: PeriodPolicy,
        quoted_yield: Option<f64>,
    ) -> anyhow::Result<BondModel> {
        let coupon = validate_coupon(self.coupon)?;

        let mut builder = BondTerms::builder()
            .face_value(self.face)
            .coupon_percent(coupon)
            .years_to_maturity(self.maturity)
            .periods_per_year(self.frequency)
            .period_policy(period_policy);
        if let Some(y) = quoted_yield {
            builder = builder.quoted_yield(y);
        }

        Ok(BondModel::new(builder.build()?))
    }
}

/// Converts a percentage flag into a fraction.
pub fn percent_to_rate(percent: f64) -> f64 {
    percent / 100.0
}

/// Validates a coupon rate.
pub fn validate_coupon(coupon: f64) -> CliResult<f64> {
    if !(0.0..=100.0).contains(&coupon) {
        return Err(CliError::InvalidCoupon(coupon));
    }
    Ok(coupon)
}

/// Validates a yield value.
pub fn validate_yield(yield_value: f64) -> CliResult<f64> {
    if !(-100.0..=100.0).contains(&yield_value) {
        return Err(CliError::InvalidYield(yield_value));
    }
    Ok(yield_value)
}

/// Validates a price value.
pub fn validate_price(price: f64) -> CliResult<f64> {
    if !(price.is_finite() && price > 0.0) {
        return Err(CliError::InvalidPrice(price));
    }
    Ok(price)
}
