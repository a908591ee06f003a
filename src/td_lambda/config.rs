//! Learning parameters for the TD(λ) agent.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Value credited to the player who completes a line
pub const WIN_VALUE: f64 = 1.0;
/// Value credited to both players on a full board without a line
pub const TIE_VALUE: f64 = 0.0;

/// Probability of an exploratory move
pub const DEFAULT_EPSILON: f64 = 0.1;
/// Learning rate α
pub const DEFAULT_ALPHA: f64 = 0.1;
/// Discount factor γ
pub const DEFAULT_GAMMA: f64 = 0.95;
/// Trace-decay parameter λ
pub const DEFAULT_LAMBDA: f64 = 0.3;

/// Configuration of the value update and the move policy.
///
/// # Examples
///
/// ```
/// use ttt_td::td_lambda::TdConfig;
///
/// let config = TdConfig::default().with_epsilon(0.2).with_alpha(0.05);
/// assert!(config.validate().is_ok());
/// assert!((config.initial_value() - 0.2).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TdConfig {
    /// Learning rate α
    pub alpha: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Trace-decay parameter λ
    pub lambda: f64,
    /// Exploration probability ε
    pub epsilon: f64,
    /// Reward for the player who completes a line
    pub win_value: f64,
    /// Reward for a tie
    pub tie_value: f64,
}

impl TdConfig {
    /// Default value of a state seen for the first time.
    ///
    /// A fifth of the way from the tie value to the win value.
    pub fn initial_value(&self) -> f64 {
        self.tie_value + (self.win_value - self.tie_value) / 5.0
    }

    /// Per-step trace multiplier, `-λγ`.
    ///
    /// Successive plies belong to alternating players that share one table,
    /// so the credit changes sign at every step back through the game.
    pub fn trace_decay(&self) -> f64 {
        -self.lambda * self.gamma
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Check parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidConfiguration { message });

        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return invalid(format!("alpha must be positive, got {}", self.alpha));
        }
        if !(self.gamma > 0.0 && self.gamma <= 1.0) {
            return invalid(format!("gamma must be in (0, 1], got {}", self.gamma));
        }
        if !(0.0..=1.0).contains(&self.lambda) {
            return invalid(format!("lambda must be in [0, 1], got {}", self.lambda));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return invalid(format!("epsilon must be in [0, 1], got {}", self.epsilon));
        }
        if !(self.win_value.is_finite() && self.tie_value.is_finite())
            || self.win_value <= self.tie_value
        {
            return invalid(format!(
                "win value ({}) must be finite and above the tie value ({})",
                self.win_value, self.tie_value
            ));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file. Missing fields keep their
    /// defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            operation: format!("open config file {path:?}"),
            source,
        })?;
        let config: TdConfig = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for TdConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            gamma: DEFAULT_GAMMA,
            lambda: DEFAULT_LAMBDA,
            epsilon: DEFAULT_EPSILON,
            win_value: WIN_VALUE,
            tie_value: TIE_VALUE,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = TdConfig::default();
        assert_eq!(config.alpha, 0.1);
        assert_eq!(config.gamma, 0.95);
        assert_eq!(config.lambda, 0.3);
        assert_eq!(config.epsilon, 0.1);
        assert!((config.initial_value() - 0.2).abs() < 1e-12);
        assert!((config.trace_decay() + 0.285).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(TdConfig::default().with_epsilon(1.5).validate().is_err());
        assert!(TdConfig::default().with_alpha(0.0).validate().is_err());
        assert!(TdConfig::default().with_gamma(0.0).validate().is_err());
        assert!(TdConfig::default().with_lambda(-0.1).validate().is_err());
        assert!(TdConfig::default().with_alpha(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "epsilon": 0.25, "lambda": 0.5 }}"#).unwrap();

        let config = TdConfig::load(file.path()).unwrap();
        assert_eq!(config.epsilon, 0.25);
        assert_eq!(config.lambda, 0.5);
        assert_eq!(config.alpha, DEFAULT_ALPHA);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "gamma": 2.0 }}"#).unwrap();

        let err = TdConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
    }
}
