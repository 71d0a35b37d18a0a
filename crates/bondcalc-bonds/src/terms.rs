//! Validated static terms of a vanilla fixed-coupon bond.
//!
//! Terms are assembled with [`BondTermsBuilder`] and validated once, at
//! [`BondTermsBuilder::build`]. A [`BondTerms`] value therefore always
//! satisfies:
//!
//! - `face_value > 0`
//! - `coupon_rate >= 0`
//! - `years_to_maturity > 0`
//! - `periods_per_year >= 1`
//! - `num_periods >= 1`, resolved from `years_to_maturity * periods_per_year`
//!   under the chosen [`PeriodPolicy`]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BondError, BondResult};

/// Distance from an integer within which a period count counts as whole.
const WHOLE_PERIOD_EPSILON: f64 = 1e-9;

/// How a fractional `years_to_maturity * periods_per_year` is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodPolicy {
    /// Refuse terms whose period count is not a whole number.
    #[default]
    Reject,
    /// Drop the fractional period (floor).
    Truncate,
    /// Round to the nearest whole period.
    Round,
}

impl PeriodPolicy {
    /// Resolves a raw period count into a whole number of periods.
    pub fn resolve(self, raw_periods: f64) -> BondResult<u32> {
        if !raw_periods.is_finite() || raw_periods <= 0.0 {
            return Err(BondError::invalid_terms(format!(
                "period count must be positive, got {raw_periods}"
            )));
        }

        let nearest = raw_periods.round();
        let resolved = if (raw_periods - nearest).abs() <= WHOLE_PERIOD_EPSILON * nearest.max(1.0)
        {
            nearest
        } else {
            match self {
                Self::Reject => {
                    return Err(BondError::invalid_terms(format!(
                        "maturity spans {raw_periods} periods, which is not a whole number"
                    )))
                }
                Self::Truncate => raw_periods.floor(),
                Self::Round => nearest,
            }
        };

        if resolved < 1.0 {
            return Err(BondError::invalid_terms(format!(
                "maturity spans {raw_periods} periods, which leaves no cash flow under the {self} policy"
            )));
        }
        if resolved > f64::from(i32::MAX) {
            return Err(BondError::invalid_terms(format!(
                "maturity spans {raw_periods} periods, which is too many to discount"
            )));
        }

        Ok(resolved as u32)
    }
}

impl fmt::Display for PeriodPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PeriodPolicy::Reject => "reject",
            PeriodPolicy::Truncate => "truncate",
            PeriodPolicy::Round => "round",
        };
        write!(f, "{name}")
    }
}

/// Static terms of one vanilla bond.
///
/// Immutable once built; reprice at another yield by passing the yield to
/// the analytics instead of rebuilding the terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BondTerms {
    face_value: f64,
    coupon_rate: f64,
    years_to_maturity: f64,
    periods_per_year: u32,
    quoted_yield: Option<f64>,
    num_periods: u32,
}

impl BondTerms {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> BondTermsBuilder {
        BondTermsBuilder::new()
    }

    /// Redemption amount paid at maturity.
    #[must_use]
    pub fn face_value(&self) -> f64 {
        self.face_value
    }

    /// Annual nominal coupon rate as a fraction.
    #[must_use]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Years to maturity as supplied.
    #[must_use]
    pub fn years_to_maturity(&self) -> f64 {
        self.years_to_maturity
    }

    /// Coupon and compounding periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        self.periods_per_year
    }

    /// Stored annual yield, if one was quoted.
    #[must_use]
    pub fn quoted_yield(&self) -> Option<f64> {
        self.quoted_yield
    }

    /// Number of cash-flow dates after applying the period policy.
    #[must_use]
    pub fn num_periods(&self) -> u32 {
        self.num_periods
    }

    /// Coupon paid each period.
    #[must_use]
    pub fn period_coupon(&self) -> f64 {
        self.face_value * self.coupon_rate / f64::from(self.periods_per_year)
    }
}

/// Builder for [`BondTerms`].
///
/// # Example
///
/// ```rust
/// use bondcalc_bonds::BondTerms;
///
/// let terms = BondTerms::builder()
///     .face_value(1000.0)
///     .coupon_rate(0.08)
///     .years_to_maturity(10.0)
///     .periods_per_year(2)
///     .build()
///     .unwrap();
///
/// assert_eq!(terms.num_periods(), 20);
/// assert_eq!(terms.period_coupon(), 40.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BondTermsBuilder {
    face_value: Option<f64>,
    coupon_rate: Option<f64>,
    years_to_maturity: Option<f64>,
    periods_per_year: Option<u32>,
    quoted_yield: Option<f64>,
    period_policy: PeriodPolicy,
}

impl BondTermsBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the face (redemption) value.
    #[must_use]
    pub fn face_value(mut self, face_value: f64) -> Self {
        self.face_value = Some(face_value);
        self
    }

    /// Sets the annual coupon rate as a decimal (0.05 for 5%).
    #[must_use]
    pub fn coupon_rate(mut self, rate: f64) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Sets the annual coupon rate as a percentage (5.0 for 5%).
    #[must_use]
    pub fn coupon_percent(mut self, percent: f64) -> Self {
        self.coupon_rate = Some(percent / 100.0);
        self
    }

    /// Sets the time to maturity in years.
    #[must_use]
    pub fn years_to_maturity(mut self, years: f64) -> Self {
        self.years_to_maturity = Some(years);
        self
    }

    /// Sets the number of coupon periods per year. Defaults to 1.
    #[must_use]
    pub fn periods_per_year(mut self, periods: u32) -> Self {
        self.periods_per_year = Some(periods);
        self
    }

    /// Stores a quoted annual yield alongside the terms.
    #[must_use]
    pub fn quoted_yield(mut self, yield_rate: f64) -> Self {
        self.quoted_yield = Some(yield_rate);
        self
    }

    /// Sets how a fractional period count is resolved.
    #[must_use]
    pub fn period_policy(mut self, policy: PeriodPolicy) -> Self {
        self.period_policy = policy;
        self
    }

    /// Validates the fields and builds the terms.
    pub fn build(self) -> BondResult<BondTerms> {
        let face_value = self
            .face_value
            .ok_or_else(|| BondError::invalid_terms("face_value is required"))?;
        let coupon_rate = self
            .coupon_rate
            .ok_or_else(|| BondError::invalid_terms("coupon_rate is required"))?;
        let years_to_maturity = self
            .years_to_maturity
            .ok_or_else(|| BondError::invalid_terms("years_to_maturity is required"))?;
        let periods_per_year = self.periods_per_year.unwrap_or(1);

        if !(face_value.is_finite() && face_value > 0.0) {
            return Err(BondError::invalid_terms(format!(
                "face_value must be positive, got {face_value}"
            )));
        }
        if !(coupon_rate.is_finite() && coupon_rate >= 0.0) {
            return Err(BondError::invalid_terms(format!(
                "coupon_rate must be non-negative, got {coupon_rate}"
            )));
        }
        if !(years_to_maturity.is_finite() && years_to_maturity > 0.0) {
            return Err(BondError::invalid_terms(format!(
                "years_to_maturity must be positive, got {years_to_maturity}"
            )));
        }
        if periods_per_year == 0 {
            return Err(BondError::invalid_terms(
                "periods_per_year must be a positive integer",
            ));
        }

        if let Some(y) = self.quoted_yield {
            if !y.is_finite() {
                return Err(BondError::invalid_terms(format!(
                    "quoted yield must be finite, got {y}"
                )));
            }
            if 1.0 + y / f64::from(periods_per_year) == 0.0 {
                return Err(BondError::invalid_terms(format!(
                    "quoted yield {y} gives a per-period rate of exactly -1"
                )));
            }
        }

        let num_periods = self
            .period_policy
            .resolve(years_to_maturity * f64::from(periods_per_year))?;

        Ok(BondTerms {
            face_value,
            coupon_rate,
            years_to_maturity,
            periods_per_year,
            quoted_yield: self.quoted_yield,
            num_periods,
        })
    }
}
