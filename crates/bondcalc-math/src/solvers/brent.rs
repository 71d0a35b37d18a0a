//! Brent's root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{check_bracket, Bracket, SolverConfig, SolverResult};

/// Brent's root-finding algorithm.
///
/// Combines the reliability of bisection with the speed of the secant method
/// and inverse quadratic interpolation. An interpolated step is only taken
/// when it lands between `(3a + b) / 4` and `b` and shrinks faster than the
/// previous steps; otherwise the interval is bisected.
///
/// Requires: `f(a) * f(b) <= 0` (opposite signs at endpoints). An endpoint
/// that is an exact root is returned without iterating. Infinite endpoint
/// values are tolerated and simply force bisection steps.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `a` - One end of the bracket
/// * `b` - The other end of the bracket
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use bondcalc_math::solvers::{brent, SolverConfig};
///
/// // Find root of x^3 - x - 2
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((f(result.root)).abs() < 1e-10);
/// ```
pub fn brent<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let (mut fa, mut fb) = match check_bracket(&f, a, b, config)? {
        Bracket::Root(result) => return Ok(result),
        Bracket::SignChange { fa, fb } => (fa, fb),
    };
    let mut a = a;
    let mut b = b;
    let tol = config.tolerance;

    // b is always the best estimate so far
    if fa.abs() < fb.abs() {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut fa, &mut fb);
    }

    let mut c = a;
    let mut fc = fa;
    let mut d = c;
    let mut bisected = true;

    for iteration in 0..config.max_iterations {
        if fb.abs() < tol || (b - a).abs() < tol {
            log::trace!(
                "brent converged to {} after {} iterations (residual {:.2e})",
                b,
                iteration,
                fb
            );
            return Ok(SolverResult {
                root: b,
                iterations: iteration,
                residual: fb,
            });
        }

        let mut s = if fa != fc && fb != fc {
            // Inverse quadratic interpolation
            a * fb * fc / ((fa - fb) * (fa - fc))
                + b * fa * fc / ((fb - fa) * (fb - fc))
                + c * fa * fb / ((fc - fa) * (fc - fb))
        } else {
            // Secant
            b - fb * (b - a) / (fb - fa)
        };

        let quarter = (3.0 * a + b) / 4.0;
        let outside = !(s > quarter.min(b) && s < quarter.max(b));
        let (last_step, stalled) = if bisected {
            ((b - c).abs(), (b - c).abs() < tol)
        } else {
            ((c - d).abs(), (c - d).abs() < tol)
        };
        let too_slow = (s - b).abs() >= last_step / 2.0;

        if outside || too_slow || stalled {
            s = (a + b) / 2.0;
            bisected = true;
        } else {
            bisected = false;
        }

        let fs = f(s);
        if fs.is_nan() {
            return Err(MathError::invalid_input(format!(
                "function is undefined at {s} inside the bracket"
            )));
        }

        d = c;
        c = b;
        fc = fb;

        if fa * fs < 0.0 {
            b = s;
            fb = fs;
        } else {
            a = s;
            fa = fs;
        }

        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        fb.abs(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_cubic() {
        // x^3 - x - 2 has a root near 1.52
        let f = |x: f64| x * x * x - x - 2.0;

        let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert!(f(result.root).abs() < 1e-10);
        assert_relative_eq!(result.root, 1.521_379_706_804_568, epsilon = 1e-10);
    }

    #[test]
    fn test_sin() {
        let f = |x: f64| x.sin();

        let result = brent(f, 3.0, 4.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::PI, epsilon = 1e-10);
    }

    #[test]
    fn test_reversed_bracket() {
        let f = |x: f64| x * x - 2.0;

        let result = brent(f, 2.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x - 2.0;

        let result = brent(f, 2.0, 3.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }

    #[test]
    fn test_infinite_endpoint() {
        // Steep pole-like shape: infinite at the left end, root at 0.5
        let f = |x: f64| if x <= 0.0 { f64::INFINITY } else { 0.5 - x };

        let result = brent(f, 0.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 0.5, epsilon = 1e-10);
    }

    #[test]
    fn test_iteration_budget_exhausted() {
        let f = |x: f64| x * x * x - x - 2.0;
        let config = SolverConfig::new(1e-15, 2);

        let result = brent(f, 1.0, 2.0, &config);

        assert!(matches!(
            result,
            Err(MathError::ConvergenceFailed { iterations: 2, .. })
        ));
    }

    #[test]
    fn test_faster_than_bisection() {
        let f = |x: f64| x * x - 2.0;

        let brent_result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        // Bisection needs ~34 iterations for 1e-10 tolerance
        assert!(brent_result.iterations < 20);
    }
}
