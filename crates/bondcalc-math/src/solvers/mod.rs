//! Root-finding algorithms.
//!
//! Both solvers here are *bracketing* methods: the caller supplies an
//! interval `[a, b]` over which the function changes sign, and the solver
//! narrows it until the root is pinned down.
//!
//! - [`brent`]: Inverse quadratic interpolation and secant steps guarded by bisection
//! - [`bisection`]: Plain interval halving
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Brent | Fast (superlinear) | Guaranteed | Bracket |
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//!
//! # Example: YTM Calculation
//!
//! ```rust
//! use bondcalc_math::solvers::{brent, SolverConfig};
//!
//! // Bond: 5% annual coupon, 5 years, price 95
//! let price_fn = |y: f64| {
//!     let mut pv = 0.0;
//!     for t in 1..=5 {
//!         pv += 5.0 / (1.0 + y).powi(t);
//!     }
//!     pv += 100.0 / (1.0 + y).powi(5);
//!     pv - 95.0
//! };
//!
//! let result = brent(price_fn, 0.0, 0.20, &SolverConfig::default()).unwrap();
//! assert!(result.root > 0.05); // YTM > coupon rate for discount bond
//! ```

mod bisection;
mod brent;

pub use bisection::bisection;
pub use brent::brent;

use crate::error::{MathError, MathResult};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
///
/// `tolerance` is applied both to the residual `|f(x)|` and to the width of
/// the remaining bracket; whichever is met first stops the iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Checks that the configuration can terminate.
    pub fn validate(&self) -> MathResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(MathError::invalid_input(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(MathError::invalid_input("max_iterations must be at least 1"));
        }
        Ok(())
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

/// A root finder that works on a sign-changing bracket.
///
/// # Example
///
/// ```rust
/// use bondcalc_math::solvers::{BracketSolver, BrentSolver, SolverConfig};
///
/// let solver = BrentSolver;
/// let result = solver
///     .solve(|x: f64| x * x - 2.0, 1.0, 2.0, &SolverConfig::default())
///     .unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub trait BracketSolver: Send + Sync {
    /// Finds a root of `f` inside `[a, b]`.
    fn solve<F>(&self, f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64;

    /// Returns the name of the solver.
    fn name(&self) -> &'static str;
}

/// Brent's method solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrentSolver;

impl BracketSolver for BrentSolver {
    fn solve<F>(&self, f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
    {
        brent(f, a, b, config)
    }

    fn name(&self) -> &'static str {
        "Brent"
    }
}

/// Bisection solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BisectionSolver;

impl BracketSolver for BisectionSolver {
    fn solve<F>(&self, f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
    {
        bisection(f, a, b, config)
    }

    fn name(&self) -> &'static str {
        "Bisection"
    }
}

/// Outcome of evaluating both bracket endpoints.
enum Bracket {
    /// One endpoint is already an exact root.
    Root(SolverResult),
    /// A genuine sign change with the function values at each end.
    SignChange { fa: f64, fb: f64 },
}

/// Validates inputs shared by every bracketing solver.
fn check_bracket<F>(f: &F, a: f64, b: f64, config: &SolverConfig) -> MathResult<Bracket>
where
    F: Fn(f64) -> f64,
{
    config.validate()?;

    if !(a.is_finite() && b.is_finite()) {
        return Err(MathError::invalid_input(format!(
            "bracket endpoints must be finite, got [{a}, {b}]"
        )));
    }

    let fa = f(a);
    let fb = f(b);

    if fa.is_nan() || fb.is_nan() {
        return Err(MathError::invalid_input(format!(
            "function is undefined at the bracket: f({a}) = {fa}, f({b}) = {fb}"
        )));
    }

    if fa == 0.0 {
        return Ok(Bracket::Root(SolverResult {
            root: a,
            iterations: 0,
            residual: fa,
        }));
    }
    if fb == 0.0 {
        return Ok(Bracket::Root(SolverResult {
            root: b,
            iterations: 0,
            residual: fb,
        }));
    }

    if fa.signum() == fb.signum() {
        return Err(MathError::InvalidBracket { a, b, fa, fb });
    }

    Ok(Bracket::SignChange { fa, fb })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50);

        assert!((config.tolerance - 1e-8).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 50);
    }

    #[test]
    fn test_config_validation() {
        assert!(SolverConfig::default().validate().is_ok());
        assert!(SolverConfig::new(0.0, 10).validate().is_err());
        assert!(SolverConfig::new(f64::NAN, 10).validate().is_err());
        assert!(SolverConfig::new(1e-8, 0).validate().is_err());
    }

    #[test]
    fn test_solver_trait_brent() {
        let solver = BrentSolver;
        let result = solver
            .solve(|x: f64| x * x - 2.0, 1.0, 2.0, &SolverConfig::default())
            .unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert_eq!(solver.name(), "Brent");
    }

    #[test]
    fn test_solver_trait_bisection() {
        let solver = BisectionSolver;
        let result = solver
            .solve(|x: f64| x * x - 2.0, 1.0, 2.0, &SolverConfig::default())
            .unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-9);
        assert_eq!(solver.name(), "Bisection");
    }

    // ============ YTM-like Financial Tests ============

    /// Helper to calculate bond price from yield
    fn bond_price(yield_rate: f64, coupon: f64, face: f64, years: i32, freq: i32) -> f64 {
        let periods = years * freq;
        let coupon_per_period = coupon / f64::from(freq);
        let discount_rate = yield_rate / f64::from(freq);

        let mut pv = 0.0;
        for t in 1..=periods {
            pv += coupon_per_period / (1.0 + discount_rate).powi(t);
        }
        pv += face / (1.0 + discount_rate).powi(periods);
        pv
    }

    #[test]
    fn test_ytm_par_bond() {
        let f = |y: f64| bond_price(y, 5.0, 100.0, 10, 2) - 100.0;

        let result = brent(f, 0.0, 0.20, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_ytm_solvers_agree() {
        let f = |y: f64| bond_price(y, 6.0, 100.0, 7, 2) - 98.0;
        let config = SolverConfig::default();

        let brent_result = brent(f, 0.0, 0.20, &config).unwrap();
        let bisection_result = bisection(f, 0.0, 0.20, &config).unwrap();

        assert!(brent_result.root > 0.06);
        assert_relative_eq!(brent_result.root, bisection_result.root, epsilon = 1e-8);
        assert!(brent_result.iterations < bisection_result.iterations);
    }

    #[test]
    fn test_endpoint_root_short_circuits() {
        let result = brent(|x: f64| x - 1.0, 1.0, 3.0, &SolverConfig::default()).unwrap();

        assert_eq!(result.root, 1.0);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_nan_endpoint_rejected() {
        let result = brent(|x: f64| x.ln(), -1.0, 2.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::InvalidInput { .. })));
    }
}
