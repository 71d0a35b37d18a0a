//! Scenario configuration.
//!
//! A scenario file is TOML. Rates are fractions (0.06 = 6%), unlike the
//! command-line flags which take percentages. Every field is optional and
//! falls back to the built-in demonstration bond.
//!
//! ```toml
//! base_yield = 0.03
//! shocks = [-0.01, -0.005, 0.0, 0.005, 0.01]
//!
//! [bond]
//! face_value = 1000.0
//! coupon_rate = 0.06
//! years_to_maturity = 5.0
//! periods_per_year = 2
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Bond terms as written in a scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BondConfig {
    /// Redemption amount
    #[serde(default = "default_face_value")]
    pub face_value: f64,

    /// Annual coupon rate as a fraction
    #[serde(default = "default_coupon_rate")]
    pub coupon_rate: f64,

    /// Years to maturity
    #[serde(default = "default_years_to_maturity")]
    pub years_to_maturity: f64,

    /// Coupon periods per year
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u32,
}

/// Scenario run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Bond to reprice
    #[serde(default)]
    pub bond: BondConfig,

    /// Annual yield the shocks are applied to
    #[serde(default = "default_base_yield")]
    pub base_yield: f64,

    /// Parallel yield shocks, as fractions
    #[serde(default = "default_shocks")]
    pub shocks: Vec<f64>,
}

fn default_face_value() -> f64 {
    1000.0
}

fn default_coupon_rate() -> f64 {
    0.06
}

fn default_years_to_maturity() -> f64 {
    5.0
}

fn default_periods_per_year() -> u32 {
    2
}

fn default_base_yield() -> f64 {
    0.03
}

fn default_shocks() -> Vec<f64> {
    vec![-0.01, -0.005, 0.0, 0.005, 0.01]
}

impl Default for BondConfig {
    fn default() -> Self {
        Self {
            face_value: default_face_value(),
            coupon_rate: default_coupon_rate(),
            years_to_maturity: default_years_to_maturity(),
            periods_per_year: default_periods_per_year(),
        }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            bond: BondConfig::default(),
            base_yield: default_base_yield(),
            shocks: default_shocks(),
        }
    }
}

impl ScenarioConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CliResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| match e {
            CliError::Config(msg) => CliError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> CliResult<Self> {
        toml::from_str(content).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Yields to evaluate, one per shock, in file order.
    pub fn scenario_yields(&self) -> Vec<(f64, f64)> {
        self.shocks
            .iter()
            .map(|&shock| (shock, self.base_yield + shock))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_demo_defaults() {
        let config = ScenarioConfig::from_toml("").unwrap();
        assert_eq!(config, ScenarioConfig::default());
        assert_eq!(config.bond.face_value, 1000.0);
        assert_eq!(config.shocks.len(), 5);
    }

    #[test]
    fn test_partial_file() {
        let config = ScenarioConfig::from_toml(
            r#"
            base_yield = 0.10
            shocks = [0.0]

            [bond]
            coupon_rate = 0.08
            years_to_maturity = 10.0
            "#,
        )
        .unwrap();

        assert_eq!(config.base_yield, 0.10);
        assert_eq!(config.bond.coupon_rate, 0.08);
        assert_eq!(config.bond.face_value, 1000.0);
        assert_eq!(config.bond.periods_per_year, 2);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ScenarioConfig::from_toml("coupon = 5.0").unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_scenario_yields() {
        let config = ScenarioConfig::default();
        let yields = config.scenario_yields();

        assert_eq!(yields.len(), 5);
        assert_eq!(yields[2], (0.0, 0.03));
        assert!((yields[0].1 - 0.02).abs() < 1e-15);
    }
}
