//! Yield-to-maturity solver settings.

use std::fmt;

use bondcalc_math::solvers::SolverConfig;
use serde::{Deserialize, Serialize};

/// Default search bracket for annual yields.
pub const DEFAULT_YTM_BRACKET: (f64, f64) = (-0.99, 1.0);

/// Default tolerance on relative price error and bracket width.
pub const DEFAULT_YTM_TOLERANCE: f64 = 1e-10;

/// Default iteration budget.
pub const DEFAULT_YTM_MAX_ITERATIONS: u32 = 100;

/// Bracketing algorithm used for the YTM search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YtmMethod {
    /// Brent's method.
    #[default]
    Brent,
    /// Interval halving.
    Bisection,
}

impl fmt::Display for YtmMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            YtmMethod::Brent => "Brent",
            YtmMethod::Bisection => "Bisection",
        };
        write!(f, "{name}")
    }
}

/// Result of a yield calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YtmResult {
    /// The calculated annual yield (as a decimal, e.g., 0.05 for 5%).
    pub yield_rate: f64,
    /// Number of iterations to converge.
    pub iterations: u32,
    /// Final relative pricing error.
    pub residual: f64,
}

/// Yield-to-maturity solver settings.
///
/// Default tolerance: 1e-10
/// Default max iterations: 100
/// Default bracket: [-0.99, 1.0]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YtmSolver {
    method: YtmMethod,
    bracket: (f64, f64),
    config: SolverConfig,
}

impl Default for YtmSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl YtmSolver {
    /// Creates a solver with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            method: YtmMethod::default(),
            bracket: DEFAULT_YTM_BRACKET,
            config: SolverConfig::new(DEFAULT_YTM_TOLERANCE, DEFAULT_YTM_MAX_ITERATIONS),
        }
    }

    /// Sets the bracketing algorithm.
    #[must_use]
    pub fn with_method(mut self, method: YtmMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the annual-yield search bracket.
    #[must_use]
    pub fn with_bracket(mut self, lo: f64, hi: f64) -> Self {
        self.bracket = (lo, hi);
        self
    }

    /// Sets the solver tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config = self.config.with_tolerance(tolerance);
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.config = self.config.with_max_iterations(max_iterations);
        self
    }

    /// Bracketing algorithm.
    #[must_use]
    pub fn method(&self) -> YtmMethod {
        self.method
    }

    /// Annual-yield search bracket.
    #[must_use]
    pub fn bracket(&self) -> (f64, f64) {
        self.bracket
    }

    /// Underlying root-finder configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}
