//! Observer implementations for the training pipeline
//!
//! Observers allow composable reporting during training without coupling
//! the episode loop to specific output formats.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::Observer,
    td_lambda::{CompletedEpisode, ValueStore},
    tictactoe::{GameOutcome, Player},
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    o_wins: usize,
    ties: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            o_wins: 0,
            ties: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} 0:{} T:{}", self.x_wins, self.o_wins, self.ties)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (X:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        epoch: usize,
        episode: &CompletedEpisode,
        _store: &ValueStore,
    ) -> Result<()> {
        match episode.outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.ties += 1,
        }

        // Redraw every 100 episodes
        if epoch.is_multiple_of(100) {
            if let Some(pb) = &self.progress_bar {
                pb.set_position(epoch as u64);
                pb.set_message(self.message());
            }
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(pb.length().unwrap_or(0));
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Diagnostic observer - Prints a whole episode every `frequency` epochs
///
/// Each board of the episode, starting with the empty board, is printed as
/// three rows followed by its current estimate. A line-marked terminal board
/// reports the win value; every other board reports its table value.
pub struct DiagnosticObserver<W: Write + Send> {
    writer: W,
    frequency: usize,
    win_value: f64,
}

impl DiagnosticObserver<io::Stdout> {
    /// Print to standard output
    pub fn stdout(frequency: usize, win_value: f64) -> Self {
        Self::new(io::stdout(), frequency, win_value)
    }
}

impl<W: Write + Send> DiagnosticObserver<W> {
    pub fn new(writer: W, frequency: usize, win_value: f64) -> Self {
        Self {
            writer,
            frequency: frequency.max(1),
            win_value,
        }
    }

    /// Whether the 1-based `epoch` is reported; the first episode always is
    pub fn shows(&self, epoch: usize) -> bool {
        epoch.saturating_sub(1).is_multiple_of(self.frequency)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_episode(&mut self, episode: &CompletedEpisode, store: &ValueStore) -> io::Result<()> {
        writeln!(self.writer, "-----------------------")?;
        writeln!(self.writer)?;
        for state in &episode.history {
            writeln!(self.writer, "{state}")?;
            let estimate = if state.has_winner_marker() {
                self.win_value
            } else {
                store.value(state).unwrap_or(store.initial_value())
            };
            writeln!(self.writer, "Prob of winning for player: {estimate}")?;
            writeln!(self.writer, " ")?;
        }
        self.writer.flush()
    }
}

impl<W: Write + Send> Observer for DiagnosticObserver<W> {
    fn on_episode_end(
        &mut self,
        epoch: usize,
        episode: &CompletedEpisode,
        store: &ValueStore,
    ) -> Result<()> {
        if self.shows(epoch) {
            self.write_episode(episode, store)?;
        }
        Ok(())
    }
}

/// Metrics observer - Tracks outcome counts and episode lengths
#[derive(Debug, Default)]
pub struct MetricsObserver {
    x_wins: usize,
    o_wins: usize,
    ties: usize,
    total_plies: usize,
    total_episodes: usize,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of episodes ending in a tie
    pub fn tie_rate(&self) -> f64 {
        rate(self.ties, self.total_episodes)
    }

    /// Get average episode length in plies
    pub fn avg_episode_length(&self) -> f64 {
        rate(self.total_plies, self.total_episodes)
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.total_episodes,
            x_wins: self.x_wins,
            o_wins: self.o_wins,
            ties: self.ties,
            x_win_rate: rate(self.x_wins, self.total_episodes),
            o_win_rate: rate(self.o_wins, self.total_episodes),
            tie_rate: self.tie_rate(),
            avg_episode_length: self.avg_episode_length(),
        }
    }
}

fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub ties: usize,
    pub x_win_rate: f64,
    pub o_win_rate: f64,
    pub tie_rate: f64,
    pub avg_episode_length: f64,
}

impl Observer for MetricsObserver {
    fn on_episode_end(
        &mut self,
        _epoch: usize,
        episode: &CompletedEpisode,
        _store: &ValueStore,
    ) -> Result<()> {
        self.total_episodes += 1;
        self.total_plies += episode.plies();
        match episode.outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.ties += 1,
        }
        Ok(())
    }
}

/// One line of the episode log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub epoch: usize,
    pub outcome: GameOutcome,
    pub plies: usize,
    /// State keys from the empty board to the terminal board
    pub history: Vec<String>,
}

/// JSONL observer - Writes every episode as one JSON object per line
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_end(
        &mut self,
        epoch: usize,
        episode: &CompletedEpisode,
        _store: &ValueStore,
    ) -> Result<()> {
        let record = EpisodeRecord {
            epoch,
            outcome: episode.outcome,
            plies: episode.plies(),
            history: episode.history.iter().map(|state| state.key()).collect(),
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
