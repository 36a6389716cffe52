//! Benchmark Configuration Options
//!
//! A benchmark kind declares named, typed options with defaults. Before a run
//! the scheduler resolves them against caller overrides into concrete values.

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Option value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Numeric value
    Number,
}

/// A user-adjustable benchmark input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchOption {
    /// Name used in overrides
    pub name: String,
    /// Value type
    pub kind: OptionType,
    /// Value used when not overridden
    pub default: f64,
    /// Smallest accepted value
    pub min: Option<f64>,
    /// Largest accepted value
    pub max: Option<f64>,
    /// Only whole numbers are accepted
    pub integer: bool,
    /// Help text
    pub description: String,
}

impl BenchOption {
    /// Numeric option with a default
    pub fn number(name: impl Into<String>, default: f64) -> Self {
        Self {
            name: name.into(),
            kind: OptionType::Number,
            default,
            min: None,
            max: None,
            integer: false,
            description: String::new(),
        }
    }

    /// Reject values below `min`
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Reject values above `max`
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Accept whole numbers only, for counts and sizes
    pub fn integer(mut self) -> Self {
        self.integer = true;
        self
    }

    /// Attach a help text
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn check(&self, value: f64) -> Result<f64, OptionError> {
        let invalid = |reason: String| OptionError::InvalidValue {
            name: self.name.clone(),
            value,
            reason,
        };

        if !value.is_finite() {
            return Err(invalid("must be finite".to_string()));
        }
        if self.integer && value.fract() != 0.0 {
            return Err(invalid("must be a whole number".to_string()));
        }
        if let Some(min) = self.min.filter(|&min| value < min) {
            return Err(invalid(format!("must be at least {min}")));
        }
        if let Some(max) = self.max.filter(|&max| value > max) {
            return Err(invalid(format!("must be at most {max}")));
        }
        Ok(value)
    }
}

/// Errors from option resolution
#[derive(Debug, Error, PartialEq)]
pub enum OptionError {
    /// The benchmark declares no option with this name
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    /// The value violates the option's constraints
    #[error("invalid value {value} for option '{name}': {reason}")]
    InvalidValue {
        /// Option name
        name: String,
        /// Rejected value
        value: f64,
        /// Violated constraint
        reason: String,
    },
}

/// Concrete option values for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedOptions {
    values: FxHashMap<String, f64>,
}

impl ResolvedOptions {
    /// Resolve `declared` options, applying `overrides` by name
    pub fn resolve(
        declared: &[BenchOption],
        overrides: &[(&str, f64)],
    ) -> Result<Self, OptionError> {
        let mut values: FxHashMap<String, f64> = declared
            .iter()
            .map(|o| (o.name.clone(), o.default))
            .collect();

        for &(name, value) in overrides {
            let option = declared
                .iter()
                .find(|o| o.name == name)
                .ok_or_else(|| OptionError::UnknownOption(name.to_string()))?;
            values.insert(option.name.clone(), option.check(value)?);
        }

        Ok(Self { values })
    }

    /// Value of `name`, if declared
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Value of `name` as a count, or `fallback` if undeclared.
    ///
    /// Declare count options with [`BenchOption::integer`] and a bound so the
    /// conversion is exact.
    pub fn count(&self, name: &str, fallback: usize) -> usize {
        self.get(name).map(|v| v.max(0.0) as usize).unwrap_or(fallback)
    }

    /// All resolved values
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared() -> Vec<BenchOption> {
        vec![
            BenchOption::number("size", 500.0).with_min(0.0),
            BenchOption::number("iterations", 50.0)
                .integer()
                .with_min(1.0)
                .with_max(1000.0),
        ]
    }

    #[test]
    fn test_defaults_without_overrides() {
        let resolved = ResolvedOptions::resolve(&declared(), &[]).unwrap();
        assert_eq!(resolved.get("size"), Some(500.0));
        assert_eq!(resolved.count("iterations", 0), 50);
    }

    #[test]
    fn test_override_applies() {
        let resolved = ResolvedOptions::resolve(&declared(), &[("size", 100.0)]).unwrap();
        assert_eq!(resolved.count("size", 0), 100);
        assert_eq!(resolved.count("iterations", 0), 50);
    }

    #[test]
    fn test_unknown_override_rejected() {
        let err = ResolvedOptions::resolve(&declared(), &[("speed", 1.0)]).unwrap_err();
        assert_eq!(err, OptionError::UnknownOption("speed".to_string()));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = ResolvedOptions::resolve(&declared(), &[("iterations", 0.0)]).unwrap_err();
        assert!(matches!(err, OptionError::InvalidValue { ref name, .. } if name == "iterations"));

        let err = ResolvedOptions::resolve(&declared(), &[("size", f64::NAN)]).unwrap_err();
        assert!(err.to_string().contains("must be finite"));
    }

    #[test]
    fn test_fractional_count_rejected() {
        let err = ResolvedOptions::resolve(&declared(), &[("iterations", 1.9)]).unwrap_err();
        assert_eq!(
            err,
            OptionError::InvalidValue {
                name: "iterations".to_string(),
                value: 1.9,
                reason: "must be a whole number".to_string(),
            }
        );

        // Options not declared as integers keep fractional values
        let resolved = ResolvedOptions::resolve(&declared(), &[("size", 2.5)]).unwrap();
        assert_eq!(resolved.get("size"), Some(2.5));
    }

    #[test]
    fn test_oversized_value_rejected() {
        let err = ResolvedOptions::resolve(&declared(), &[("iterations", 1e15)]).unwrap_err();
        assert!(err.to_string().contains("must be at most 1000"));

        let resolved = ResolvedOptions::resolve(&declared(), &[("iterations", 1000.0)]).unwrap();
        assert_eq!(resolved.count("iterations", 0), 1000);
    }

    #[test]
    fn test_count_fallback() {
        let resolved = ResolvedOptions::default();
        assert_eq!(resolved.count("missing", 9), 9);
    }
}
