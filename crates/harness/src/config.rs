//! Harness configuration, read from the environment.

use serde::Serialize;

use rolegate_core::{RbacError, RbacResult};

pub const PERF_ITERATIONS_ENV: &str = "ROLEGATE_PERF_ITERATIONS";
pub const PERF_BUDGET_MS_ENV: &str = "ROLEGATE_PERF_BUDGET_MS";

pub const DEFAULT_PERF_ITERATIONS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HarnessConfig {
    /// Calls per operation in each performance timing.
    pub perf_iterations: usize,
    /// Optional ceiling on average latency per call, in milliseconds.
    pub perf_budget_ms: Option<f64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            perf_iterations: DEFAULT_PERF_ITERATIONS,
            perf_budget_ms: None,
        }
    }
}

impl HarnessConfig {
    pub fn from_env() -> RbacResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> RbacResult<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(PERF_ITERATIONS_ENV) {
            let iterations: usize = raw.trim().parse().map_err(|e| {
                RbacError::validation(format!("{PERF_ITERATIONS_ENV}='{raw}': {e}"))
            })?;
            if iterations == 0 {
                return Err(RbacError::validation(format!(
                    "{PERF_ITERATIONS_ENV} must be greater than 0"
                )));
            }
            config.perf_iterations = iterations;
        }

        if let Some(raw) = lookup(PERF_BUDGET_MS_ENV) {
            let budget: f64 = raw
                .trim()
                .parse()
                .map_err(|e| RbacError::validation(format!("{PERF_BUDGET_MS_ENV}='{raw}': {e}")))?;
            if !budget.is_finite() || budget <= 0.0 {
                return Err(RbacError::validation(format!(
                    "{PERF_BUDGET_MS_ENV} must be a positive number"
                )));
            }
            config.perf_budget_ms = Some(budget);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = HarnessConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, HarnessConfig::default());
        assert_eq!(config.perf_iterations, 1000);
    }

    #[test]
    fn reads_both_settings() {
        let config = HarnessConfig::from_lookup(lookup(&[
            (PERF_ITERATIONS_ENV, " 250 "),
            (PERF_BUDGET_MS_ENV, "0.5"),
        ]))
        .unwrap();
        assert_eq!(config.perf_iterations, 250);
        assert_eq!(config.perf_budget_ms, Some(0.5));
    }

    #[test]
    fn rejects_invalid_values() {
        for pairs in [
            [(PERF_ITERATIONS_ENV, "0")],
            [(PERF_ITERATIONS_ENV, "many")],
            [(PERF_BUDGET_MS_ENV, "-1")],
            [(PERF_BUDGET_MS_ENV, "NaN")],
        ] {
            let err = HarnessConfig::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(matches!(err, RbacError::Validation(_)), "{pairs:?}");
        }
    }
}
