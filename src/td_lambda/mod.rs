//! Tabular TD(λ) self-play learning
//!
//! One value table is shared by both players. An entry scores a board for the
//! player who just moved into it, so the policy simply moves to the
//! successor with the highest value, whichever symbol it plays.
//!
//! ## Components
//!
//! - [`ValueStore`]: state values and eligibility traces, lazily defaulted
//! - [`Policy`]: ε-greedy choice among successor boards, seedable
//! - [`Trainer`]: plays episodes and runs [`apply_episode_update`] at the end
//!   of each one
//!
//! ## Usage Example
//!
//! ```no_run
//! use ttt_td::td_lambda::{TdConfig, Trainer};
//!
//! let mut trainer = Trainer::new(TdConfig::default()).with_seed(42);
//! let mut store = trainer.new_store();
//! for _ in 0..50_000 {
//!     trainer.play_episode(&mut store)?;
//! }
//! # Ok::<(), ttt_td::Error>(())
//! ```

pub mod config;
pub mod episode;
pub mod policy;
pub mod trainer;
pub mod update;
pub mod value_store;

pub use config::{TIE_VALUE, TdConfig, WIN_VALUE};
pub use episode::{CompletedEpisode, Episode};
pub use policy::Policy;
pub use trainer::Trainer;
pub use update::apply_episode_update;
pub use value_store::ValueStore;
