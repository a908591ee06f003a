//! Learning-parameter options shared by the CLI commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::td_lambda::TdConfig;

/// TD(λ) parameters: an optional JSON file, then flag overrides
#[derive(Args, Debug, Clone, Default)]
pub struct LearningArgs {
    /// JSON file with TD(λ) parameters (alpha, gamma, lambda, epsilon, win_value, tie_value)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Learning rate α
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Discount factor γ
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Trace-decay parameter λ
    #[arg(long)]
    pub lambda: Option<f64>,

    /// Exploration probability ε
    #[arg(long)]
    pub epsilon: Option<f64>,
}

impl LearningArgs {
    /// Build the effective configuration. Flags win over the file, the file
    /// over the defaults.
    pub fn resolve(&self) -> Result<TdConfig> {
        let mut config = match &self.config {
            Some(path) => TdConfig::load(path)
                .with_context(|| format!("failed to load TD(λ) config from {}", path.display()))?,
            None => TdConfig::default(),
        };

        if let Some(alpha) = self.alpha {
            config = config.with_alpha(alpha);
        }
        if let Some(gamma) = self.gamma {
            config = config.with_gamma(gamma);
        }
        if let Some(lambda) = self.lambda {
            config = config.with_lambda(lambda);
        }
        if let Some(epsilon) = self.epsilon {
            config = config.with_epsilon(epsilon);
        }

        config.validate()?;
        Ok(config)
    }
}
