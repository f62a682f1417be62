use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::confidence::{MAX_DECIMALS, MIN_CONFIDENCE, QUOTED_CONFIDENCE};
use crate::models::term_interp::MIN_SPLINE_POINTS;

/// Constants of the confidence score given to synthesized points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceConfig {
    /// Score for horizons outside the known span
    #[serde(default = "default_extrapolation_penalty")]
    pub extrapolation_penalty: f64,

    /// Lowest score an interior horizon can receive
    #[serde(default = "default_interior_floor")]
    pub interior_floor: f64,

    /// Highest score an interior horizon can receive.
    ///
    /// Kept below 1.0 so that only directly quoted points carry full confidence.
    #[serde(default = "default_interior_ceiling")]
    pub interior_ceiling: f64,

    /// Decimal places the interior score is rounded to
    #[serde(default = "default_decimals")]
    pub decimals: u32,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            extrapolation_penalty: default_extrapolation_penalty(),
            interior_floor: default_interior_floor(),
            interior_ceiling: default_interior_ceiling(),
            decimals: default_decimals(),
        }
    }
}

/// Tier selection thresholds for term interpolation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpConfig {
    /// Minimum number of known horizons before the cubic tier is attempted
    #[serde(default = "default_min_cubic_points")]
    pub min_cubic_points: usize,
}

impl Default for InterpConfig {
    fn default() -> Self {
        Self {
            min_cubic_points: default_min_cubic_points(),
        }
    }
}

impl InterpConfig {
    /// Threshold no grid reaches. Bounded by `u32` rather than `usize` so the
    /// setting still round-trips through TOML integers.
    pub const NEVER_CUBIC: usize = u32::MAX as usize;

    /// Never attempt the cubic tier
    pub fn linear_only() -> Self {
        Self {
            min_cubic_points: Self::NEVER_CUBIC,
        }
    }
}

/// Main configuration struct for grid mutation
///
/// Every field has a default, so an empty TOML document is a valid config.
///
/// ```toml
/// history_limit = 128
///
/// [confidence]
/// extrapolation_penalty = 0.2
/// interior_floor = 0.3
///
/// [interpolation]
/// min_cubic_points = 4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default)]
    pub confidence: ConfidenceConfig,

    #[serde(default)]
    pub interpolation: InterpConfig,

    /// Number of committed changes each book keeps in its change log
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            confidence: ConfidenceConfig::default(),
            interpolation: InterpConfig::default(),
            history_limit: default_history_limit(),
        }
    }
}

impl GridConfig {
    /// Standard desk settings: cubic tier from four horizons, 0.2 extrapolation
    /// penalty, 0.3 interior floor
    pub fn standard() -> Self {
        Self::default()
    }

    /// Standard settings with the cubic tier disabled
    pub fn linear_only() -> Self {
        Self {
            interpolation: InterpConfig::linear_only(),
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).context("Failed to parse grid config")?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read grid config {}", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("Invalid grid config {}", path.display()))
    }

    /// Check that the confidence constants stay inside [0.2, 1.0], that an
    /// interior score stays below the quoted 1.0, and that the cubic threshold
    /// can build a spline
    pub fn validate(&self) -> Result<()> {
        let c = &self.confidence;
        for (name, value) in [
            ("extrapolation_penalty", c.extrapolation_penalty),
            ("interior_floor", c.interior_floor),
            ("interior_ceiling", c.interior_ceiling),
        ] {
            ensure!(
                (MIN_CONFIDENCE..=QUOTED_CONFIDENCE).contains(&value),
                "confidence.{} must lie in [{}, {}], got {}",
                name,
                MIN_CONFIDENCE,
                QUOTED_CONFIDENCE,
                value
            );
        }
        ensure!(
            c.interior_ceiling < QUOTED_CONFIDENCE,
            "confidence.interior_ceiling must stay below {}, got {}",
            QUOTED_CONFIDENCE,
            c.interior_ceiling
        );
        ensure!(
            c.decimals <= MAX_DECIMALS,
            "confidence.decimals must be at most {}, got {}",
            MAX_DECIMALS,
            c.decimals
        );
        ensure!(
            c.interior_floor <= c.interior_ceiling,
            "confidence.interior_floor ({}) exceeds interior_ceiling ({})",
            c.interior_floor,
            c.interior_ceiling
        );
        ensure!(
            self.interpolation.min_cubic_points >= MIN_SPLINE_POINTS,
            "interpolation.min_cubic_points must be at least {}, got {}",
            MIN_SPLINE_POINTS,
            self.interpolation.min_cubic_points
        );
        Ok(())
    }
}

fn default_extrapolation_penalty() -> f64 {
    0.2
}

fn default_interior_floor() -> f64 {
    0.3
}

fn default_interior_ceiling() -> f64 {
    0.99
}

fn default_decimals() -> u32 {
    2
}

fn default_min_cubic_points() -> usize {
    4
}

fn default_history_limit() -> usize {
    64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = GridConfig::from_toml_str("").unwrap();
        assert_eq!(config, GridConfig::standard());
        assert_eq!(config.confidence.extrapolation_penalty, 0.2);
        assert_eq!(config.confidence.interior_floor, 0.3);
        assert_eq!(config.interpolation.min_cubic_points, 4);
    }

    #[test]
    fn test_partial_document() {
        let config = GridConfig::from_toml_str(
            r#"
            history_limit = 8

            [confidence]
            interior_floor = 0.4
            "#,
        )
        .unwrap();
        assert_eq!(config.history_limit, 8);
        assert_eq!(config.confidence.interior_floor, 0.4);
        assert_eq!(config.confidence.extrapolation_penalty, 0.2);
    }

    #[test]
    fn test_validation_rejects_bad_constants() {
        assert!(GridConfig::from_toml_str("[confidence]\nextrapolation_penalty = 0.1").is_err());
        assert!(GridConfig::from_toml_str("[confidence]\ninterior_ceiling = 1.5").is_err());
        assert!(GridConfig::from_toml_str("[confidence]\ninterior_ceiling = 1.0").is_err());
        assert!(GridConfig::from_toml_str("[confidence]\ndecimals = 400").is_err());
        assert!(GridConfig::from_toml_str("[confidence]\ndecimals = 15").is_ok());
        assert!(GridConfig::from_toml_str(
            "[confidence]\ninterior_floor = 0.9\ninterior_ceiling = 0.8"
        )
        .is_err());
        assert!(GridConfig::from_toml_str("[interpolation]\nmin_cubic_points = 2").is_err());
        assert!(GridConfig::from_toml_str("history_limit = \"many\"").is_err());
    }

    #[test]
    fn test_presets_validate() {
        assert!(GridConfig::standard().validate().is_ok());
        assert!(GridConfig::linear_only().validate().is_ok());
    }

    #[test]
    fn test_linear_only_survives_toml() {
        let config = GridConfig::linear_only();
        let source = toml::to_string(&config).unwrap();
        let reloaded = GridConfig::from_toml_str(&source).unwrap();
        assert_eq!(reloaded.interpolation.min_cubic_points, InterpConfig::NEVER_CUBIC);
        assert_eq!(reloaded, config);
    }
}
