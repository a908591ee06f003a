//! Observer port - abstraction for training observation
//!
//! Training reports progress through this trait so the driver loop stays
//! free of any output format.

use crate::{
    Result,
    td_lambda::{CompletedEpisode, ValueStore},
};

/// Observer trait for monitoring training
///
/// Observers can be composed; the pipeline calls every registered observer
/// in registration order.
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. `on_episode_end(epoch, episode, store)` - After each episode's update
/// 3. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use ttt_td::{
///     ports::Observer,
///     td_lambda::{CompletedEpisode, ValueStore},
/// };
///
/// struct LongestGame {
///     plies: usize,
/// }
///
/// impl Observer for LongestGame {
///     fn on_episode_end(
///         &mut self,
///         _epoch: usize,
///         episode: &CompletedEpisode,
///         _store: &ValueStore,
///     ) -> ttt_td::Result<()> {
///         self.plies = self.plies.max(episode.plies());
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after an episode has finished and its TD(λ) update has been
    /// applied.
    ///
    /// `epoch` is 1-based. `store` already holds the updated values.
    fn on_episode_end(
        &mut self,
        _epoch: usize,
        _episode: &CompletedEpisode,
        _store: &ValueStore,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode. Use this to finish progress
    /// output or print summaries.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
