//! Analytics bundle evaluated at a single yield.

use serde::Serialize;

/// Price and risk measures of one bond at one yield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BondAnalytics {
    /// Annual yield the measures were evaluated at.
    pub yield_rate: f64,
    /// Present value of all cash flows.
    pub price: f64,
    /// PV-weighted average time to cash flows, in years.
    pub macaulay_duration: f64,
    /// Macaulay duration divided by `1 + y/m`.
    pub modified_duration: f64,
    /// Second-order price sensitivity normalised by price.
    pub convexity: f64,
}

impl BondAnalytics {
    /// First- plus second-order estimate of the relative price change for a
    /// yield move of `dy`.
    ///
    /// ```text
    /// ΔP/P ≈ -D_mod · Δy + ½ · C · Δy²
    /// ```
    #[must_use]
    pub fn estimated_price_change(&self, dy: f64) -> f64 {
        -self.modified_duration * dy + 0.5 * self.convexity * dy * dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_estimated_price_change() {
        let analytics = BondAnalytics {
            yield_rate: 0.05,
            price: 100.0,
            macaulay_duration: 7.0,
            modified_duration: 6.8,
            convexity: 60.0,
        };

        // -6.8 * 0.01 + 0.5 * 60 * 0.0001 = -0.068 + 0.003
        assert_relative_eq!(analytics.estimated_price_change(0.01), -0.065, epsilon = 1e-12);
    }
}
