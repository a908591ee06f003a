//! Training pipeline
//!
//! This module provides:
//! - The self-play training loop with outcome statistics
//! - Observer implementations for progress, diagnostics, metrics and episode logs

pub mod observers;
pub mod training;

pub use observers::{
    DiagnosticObserver, EpisodeRecord, JsonlObserver, MetricsObserver, MetricsSummary,
    ProgressObserver,
};
pub use training::{
    DEFAULT_EPOCHS, DEFAULT_SHOW_EVERY, TrainingConfig, TrainingPipeline, TrainingResult,
};

pub use crate::ports::Observer;
