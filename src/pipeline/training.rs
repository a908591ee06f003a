//! Training pipeline for the self-play agent

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::Observer,
    td_lambda::{TdConfig, Trainer, ValueStore},
    tictactoe::{GameOutcome, Player},
};

/// Number of self-play episodes in a default run
pub const DEFAULT_EPOCHS: usize = 50_000;

/// Default spacing of the diagnostic episode printout
pub const DEFAULT_SHOW_EVERY: usize = 10_000;

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of self-play episodes
    pub epochs: usize,

    /// Print a diagnostic episode every this many epochs
    pub show_every: usize,

    /// Random seed; `None` draws one from the thread RNG
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: DEFAULT_EPOCHS,
            show_every: DEFAULT_SHOW_EVERY,
            seed: None,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(Error::InvalidConfiguration {
                message: "epochs must be at least 1".to_string(),
            });
        }
        if self.show_every == 0 {
            return Err(Error::InvalidConfiguration {
                message: "show frequency must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// A trainer for `td`, seeded when this configuration carries a seed
    pub fn build_trainer(&self, td: TdConfig) -> Trainer {
        let trainer = Trainer::new(td);
        match self.seed {
            Some(seed) => trainer.with_seed(seed),
            None => trainer,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    pub total_episodes: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub ties: usize,

    /// Mean number of plies per episode
    pub average_length: f64,

    /// Number of states in the value table after training
    pub table_size: usize,

    pub elapsed_seconds: f64,
}

impl TrainingResult {
    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Runs self-play episodes and reports each one to the registered observers
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Play `epochs` exploratory episodes against `store`.
    ///
    /// Each episode's TD(λ) update is applied before the next one starts,
    /// and before observers see it.
    pub fn run(&mut self, trainer: &mut Trainer, store: &mut ValueStore) -> Result<TrainingResult> {
        self.config.validate()?;
        let started = Instant::now();

        for observer in &mut self.observers {
            observer.on_training_start(self.config.epochs)?;
        }

        let mut x_wins = 0;
        let mut o_wins = 0;
        let mut ties = 0;
        let mut total_plies = 0;

        for epoch in 1..=self.config.epochs {
            let episode = trainer.play_episode(store)?;

            match episode.outcome {
                GameOutcome::Win(Player::X) => x_wins += 1,
                GameOutcome::Win(Player::O) => o_wins += 1,
                GameOutcome::Draw => ties += 1,
            }
            total_plies += episode.plies();

            for observer in &mut self.observers {
                observer.on_episode_end(epoch, &episode, store)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult {
            total_episodes: self.config.epochs,
            x_wins,
            o_wins,
            ties,
            average_length: total_plies as f64 / self.config.epochs as f64,
            table_size: store.len(),
            elapsed_seconds: started.elapsed().as_secs_f64(),
        })
    }
}
