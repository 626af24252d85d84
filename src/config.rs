//! Configuration loader - YAML case table + .env settings

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::roots::{Precision, SqrtError, Variant};

/// Main configuration loaded from sqrt.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub precision: Precision,
    /// Roots whose squares every variant must reproduce
    pub perfect_roots: Vec<u32>,
    /// Inputs with a known expected root
    pub cases: Vec<Case>,
}

/// A single input, optionally with its expected root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub input: f64,
    /// Falls back to the reference oracle when absent
    #[serde(default)]
    pub expected: Option<f64>,
}

/// Settings loaded from the environment (.env honoured)
#[derive(Debug, Clone)]
pub struct Settings {
    pub log_dir: String,
    /// Raw SQRT_DEFAULT_VARIANT, resolved by [`Settings::default_variant`]
    pub default_variant_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            perfect_roots: vec![2, 3, 4, 5, 1000, 1337, 42, 21398],
            cases: vec![
                Case { input: 2.0, expected: Some(1.41421356237) },
                Case { input: 3.0, expected: Some(1.73205081) },
                Case { input: 105.0, expected: Some(10.246950766) },
                Case { input: 1337.0, expected: Some(36.5650106) },
                Case { input: 1337.0 * 1337.0 * 1337.0 + 1337.0, expected: Some(48887.4328432) },
            ],
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SqrtError> {
        self.precision.validate()?;
        for case in &self.cases {
            if !case.input.is_finite() {
                return Err(SqrtError::NonFiniteInput(case.input));
            }
            if case.input < 0.0 {
                return Err(SqrtError::NegativeInput(case.input));
            }
        }
        Ok(())
    }

    /// Every input the verifier runs, with its expected root when one is known
    pub fn inputs(&self) -> Vec<(f64, Option<f64>)> {
        let perfect = self.perfect_roots.iter().map(|&root| {
            let root = root as f64;
            (root * root, Some(root))
        });
        let cases = self.cases.iter().map(|c| (c.input, c.expected));
        perfect.chain(cases).collect()
    }
}

impl Settings {
    /// Load settings from the environment, reading .env first
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        Settings {
            log_dir: std::env::var("SQRT_LOG_DIR").unwrap_or_else(|_| "./logs".to_string()),
            default_variant_name: std::env::var("SQRT_DEFAULT_VARIANT").ok(),
        }
    }

    /// Variant used when none is named on the command line.
    /// Call after logging is up so an unknown name is not lost.
    pub fn default_variant(&self) -> Variant {
        let Some(name) = &self.default_variant_name else {
            return Variant::LittleSquaresFloat;
        };
        Variant::from_name(name).unwrap_or_else(|| {
            tracing::warn!("Unknown SQRT_DEFAULT_VARIANT {:?}, using little-squares-float", name);
            Variant::LittleSquaresFloat
        })
    }
}
