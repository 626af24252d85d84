//! Cross-validation of every variant against a reference oracle

use serde::Serialize;

use crate::config::Config;
use crate::oracle::ReferenceOracle;
use crate::roots::Variant;

/// One (variant, input) evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Check {
    pub variant: Variant,
    pub input: f64,
    pub expected: f64,
    /// None when the variant rejected the input
    pub actual: Option<f64>,
    pub error: Option<String>,
    pub passed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated: String,
    pub oracle: String,
    pub epsilon: f64,
    pub checks: Vec<Check>,
}

impl Report {
    pub fn failures(&self) -> Vec<&Check> {
        self.checks.iter().filter(|c| !c.passed).collect()
    }

    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

/// Run every configured input through every variant
pub fn run(config: &Config, oracle: &dyn ReferenceOracle) -> Report {
    let precision = &config.precision;
    let mut checks = Vec::new();

    for (input, expected) in config.inputs() {
        let expected = expected.unwrap_or_else(|| oracle.sqrt(input));

        for variant in Variant::ALL {
            let check = match variant.evaluate(input, precision) {
                Ok(actual) => Check {
                    variant,
                    input,
                    expected,
                    actual: Some(actual),
                    error: None,
                    passed: precision.accepts(actual, expected),
                },
                Err(e) => Check {
                    variant,
                    input,
                    expected,
                    actual: None,
                    error: Some(e.to_string()),
                    passed: false,
                },
            };

            if !check.passed {
                tracing::warn!(variant = %variant, input, actual = ?check.actual, expected, "check failed");
            }
            checks.push(check);
        }
    }

    tracing::info!("Verified {} checks against {} oracle", checks.len(), oracle.name());

    Report {
        generated: chrono::Local::now().to_rfc3339(),
        oracle: oracle.name().to_string(),
        epsilon: precision.epsilon,
        checks,
    }
}
