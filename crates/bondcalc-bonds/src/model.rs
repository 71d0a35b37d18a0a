//! Bond valuation model.
//!
//! All analytics discount the schedule at a flat per-period rate `y/m`:
//!
//! ```text
//! P     = Σ CF_t / (1 + y/m)^t
//! D_mac = Σ (t/m) · PV_t / P
//! D_mod = D_mac / (1 + y/m)
//! C     = Σ PV_t · t(t+1) / m² / (P · (1 + y/m)²)
//! ```
//!
//! where `t = 1..N` counts periods and `m` is the number of periods per year.

use bondcalc_math::solvers::{BisectionSolver, BracketSolver, BrentSolver};

use crate::analytics::BondAnalytics;
use crate::cashflows::{self, CashFlow};
use crate::error::{BondError, BondResult};
use crate::terms::BondTerms;
use crate::ytm::{YtmMethod, YtmResult, YtmSolver};

/// Sums over the discounted schedule that every analytic is built from.
#[derive(Debug, Clone, Copy)]
struct Discounted {
    /// `1 + y/m`.
    base: f64,
    /// `Σ PV_t`.
    pv: f64,
    /// `Σ (t/m) · PV_t`.
    time_weighted: f64,
    /// `Σ PV_t · t(t+1) / m²`.
    curvature_weighted: f64,
}

/// Valuation model for one vanilla fixed-coupon bond.
///
/// Holds validated [`BondTerms`] and evaluates pure analytics over them.
/// Each call takes the yield (or market price) it needs, so one model can
/// be reused across any number of scenarios and shared between threads.
///
/// # Example
///
/// ```rust
/// use bondcalc_bonds::{BondModel, BondTerms};
///
/// let terms = BondTerms::builder()
///     .face_value(1000.0)
///     .coupon_rate(0.08)
///     .years_to_maturity(10.0)
///     .periods_per_year(2)
///     .build()
///     .unwrap();
/// let model = BondModel::new(terms);
///
/// let price = model.price(0.10).unwrap();
/// assert!((price - 875.38).abs() < 0.5);
///
/// let ytm = model.ytm_from_price(price).unwrap();
/// assert!((ytm - 0.10).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondModel {
    terms: BondTerms,
}

impl BondModel {
    /// Creates a model over validated terms.
    #[must_use]
    pub fn new(terms: BondTerms) -> Self {
        Self { terms }
    }

    /// The bond's static terms.
    #[must_use]
    pub fn terms(&self) -> &BondTerms {
        &self.terms
    }

    /// Number of cash-flow dates.
    #[must_use]
    pub fn num_periods(&self) -> u32 {
        self.terms.num_periods()
    }

    /// Coupon paid each period.
    #[must_use]
    pub fn period_coupon(&self) -> f64 {
        self.terms.period_coupon()
    }

    /// Per-period discount rate for an annual yield.
    #[must_use]
    pub fn period_yield(&self, yield_rate: f64) -> f64 {
        yield_rate / f64::from(self.terms.periods_per_year())
    }

    /// Full cash-flow schedule.
    #[must_use]
    pub fn cash_flows(&self) -> Vec<CashFlow> {
        cashflows::schedule(&self.terms)
    }

    /// Present value of all cash flows at an annual yield.
    ///
    /// # Errors
    ///
    /// [`BondError::Domain`] if `yield_rate / periods_per_year` is exactly
    /// `-1`, if the yield is not finite, or if discounting overflows.
    pub fn price(&self, yield_rate: f64) -> BondResult<f64> {
        self.discount(yield_rate).map(|d| d.pv)
    }

    /// Macaulay duration in years.
    ///
    /// # Errors
    ///
    /// Fails like [`BondModel::price`], and with [`BondError::Domain`] when
    /// the price is zero.
    pub fn macaulay_duration(&self, yield_rate: f64) -> BondResult<f64> {
        let d = self.discount(yield_rate)?;
        Self::macaulay(&d)
    }

    /// Modified duration: Macaulay duration over `1 + y/m`.
    ///
    /// # Errors
    ///
    /// Fails like [`BondModel::macaulay_duration`].
    pub fn modified_duration(&self, yield_rate: f64) -> BondResult<f64> {
        let d = self.discount(yield_rate)?;
        Self::modified(&d, Self::macaulay(&d)?)
    }

    /// Convexity in years squared.
    ///
    /// # Errors
    ///
    /// Fails like [`BondModel::macaulay_duration`].
    pub fn convexity(&self, yield_rate: f64) -> BondResult<f64> {
        let d = self.discount(yield_rate)?;
        Self::convexity_of(&d)
    }

    /// Price, durations and convexity at one yield, from a single pass over
    /// the schedule.
    pub fn analytics(&self, yield_rate: f64) -> BondResult<BondAnalytics> {
        let d = self.discount(yield_rate)?;
        let macaulay_duration = Self::macaulay(&d)?;

        Ok(BondAnalytics {
            yield_rate,
            price: d.pv,
            macaulay_duration,
            modified_duration: Self::modified(&d, macaulay_duration)?,
            convexity: Self::convexity_of(&d)?,
        })
    }

    /// Analytics at the yield quoted on the terms.
    ///
    /// # Errors
    ///
    /// [`BondError::InvalidTerms`] when the terms carry no quoted yield.
    pub fn analyze(&self) -> BondResult<BondAnalytics> {
        let yield_rate = self
            .terms
            .quoted_yield()
            .ok_or_else(|| BondError::invalid_terms("no quoted yield stored on the terms"))?;
        self.analytics(yield_rate)
    }

    /// Yield to maturity implied by a market price, using the default
    /// [`YtmSolver`] (Brent over `[-0.99, 1.0]`).
    ///
    /// # Errors
    ///
    /// [`BondError::RootFind`] if the price is not positive, is not reached
    /// inside the bracket, or the solver runs out of iterations.
    pub fn ytm_from_price(&self, market_price: f64) -> BondResult<f64> {
        self.ytm_with(market_price, &YtmSolver::default())
            .map(|r| r.yield_rate)
    }

    /// Yield to maturity with explicit solver settings.
    ///
    /// The solver drives the relative pricing error `P(y) / market - 1` to
    /// zero, so its tolerance is independent of the bond's notional.
    pub fn ytm_with(&self, market_price: f64, solver: &YtmSolver) -> BondResult<YtmResult> {
        if !(market_price.is_finite() && market_price > 0.0) {
            return Err(BondError::root_find(format!(
                "market price must be positive, got {market_price}"
            )));
        }

        let (lo, hi) = solver.bracket();
        for end in [lo, hi] {
            if !end.is_finite() || 1.0 + self.period_yield(end) <= 0.0 {
                return Err(BondError::root_find(format!(
                    "bracket end {end} does not give a per-period rate above -1"
                )));
            }
        }

        let objective = |y: f64| self.present_value(1.0 + self.period_yield(y)) / market_price - 1.0;
        let config = solver.config();

        let result = match solver.method() {
            YtmMethod::Brent => BrentSolver.solve(objective, lo, hi, config),
            YtmMethod::Bisection => BisectionSolver.solve(objective, lo, hi, config),
        }
        .map_err(|e| {
            log::debug!("ytm solve failed for price {}: {}", market_price, e);
            BondError::from(e)
        })?;

        log::debug!(
            "ytm {:.10} for price {} ({} iterations, method {})",
            result.root,
            market_price,
            result.iterations,
            solver.method()
        );

        Ok(YtmResult {
            yield_rate: result.root,
            iterations: result.iterations,
            residual: result.residual,
        })
    }

    /// Checks the yield and accumulates the discounted sums.
    ///
    /// Only the present value must be finite here; the weighted sums are
    /// checked by the analytics that read them.
    fn discount(&self, yield_rate: f64) -> BondResult<Discounted> {
        if !yield_rate.is_finite() {
            return Err(BondError::domain(format!(
                "yield must be finite, got {yield_rate}"
            )));
        }

        let base = 1.0 + self.period_yield(yield_rate);
        if base == 0.0 {
            return Err(BondError::domain(format!(
                "yield {yield_rate} gives a per-period rate of exactly -1"
            )));
        }

        let d = self.accumulate(base);
        if !d.pv.is_finite() {
            return Err(BondError::domain(format!(
                "discounting at yield {yield_rate} overflows"
            )));
        }
        Ok(d)
    }

    /// Raw present value at a per-period discount base; may be infinite.
    fn present_value(&self, base: f64) -> f64 {
        self.accumulate(base).pv
    }

    /// Single pass over periods `1..=N` without materialising the schedule.
    fn accumulate(&self, base: f64) -> Discounted {
        let n = self.terms.num_periods();
        let coupon = self.terms.period_coupon();
        let face = self.terms.face_value();
        let m = f64::from(self.terms.periods_per_year());

        let mut d = Discounted {
            base,
            pv: 0.0,
            time_weighted: 0.0,
            curvature_weighted: 0.0,
        };
        for period in 1..=n {
            let t = f64::from(period);
            let amount = if period == n { coupon + face } else { coupon };
            let pv_t = amount / base.powi(period as i32);
            d.pv += pv_t;
            d.time_weighted += t / m * pv_t;
            d.curvature_weighted += pv_t * t * (t + 1.0) / (m * m);
        }
        d
    }

    fn macaulay(d: &Discounted) -> BondResult<f64> {
        if d.pv == 0.0 {
            return Err(BondError::domain("price is zero, duration is undefined"));
        }
        if !d.time_weighted.is_finite() {
            return Err(BondError::domain("time-weighted present value overflows"));
        }
        Ok(d.time_weighted / d.pv)
    }

    fn modified(d: &Discounted, macaulay: f64) -> BondResult<f64> {
        if d.base == 0.0 {
            return Err(BondError::domain(
                "1 + y/m is zero, modified duration is undefined",
            ));
        }
        Ok(macaulay / d.base)
    }

    fn convexity_of(d: &Discounted) -> BondResult<f64> {
        let denominator = d.pv * d.base * d.base;
        if denominator == 0.0 || !denominator.is_finite() {
            return Err(BondError::domain("price is zero, convexity is undefined"));
        }
        if !d.curvature_weighted.is_finite() {
            return Err(BondError::domain("curvature-weighted present value overflows"));
        }
        Ok(d.curvature_weighted / denominator)
    }
}
