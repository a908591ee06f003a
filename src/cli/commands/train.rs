//! Train command - Learn the value table by self-play

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::TableFormat,
    cli::{
        config::LearningArgs,
        output::{print_kv, print_section, print_training_result},
    },
    pipeline::{
        DEFAULT_EPOCHS, DEFAULT_SHOW_EVERY, DiagnosticObserver, JsonlObserver, ProgressObserver,
        TrainingConfig, TrainingPipeline, TrainingResult,
    },
    ports::ValueTableRepository,
    td_lambda::{TdConfig, ValueStore},
};

/// Default location of the persisted value table
pub const DEFAULT_TABLE_PATH: &str = "TicTacToe_parameters";

#[derive(Parser, Debug)]
#[command(about = "Train the agent by self-play")]
pub struct TrainArgs {
    /// Number of self-play episodes
    #[arg(long, short = 'e', default_value_t = DEFAULT_EPOCHS)]
    pub epochs: usize,

    /// Output file for the value table (`.msgpack` selects MessagePack, otherwise CSV)
    #[arg(long, short = 'O', default_value = DEFAULT_TABLE_PATH)]
    pub output: PathBuf,

    /// Continue from the table at the output path when it exists
    #[arg(long)]
    pub resume: bool,

    /// Print a diagnostic episode every this many epochs
    #[arg(long, default_value_t = DEFAULT_SHOW_EVERY)]
    pub show_every: usize,

    /// Do not print diagnostic episodes
    #[arg(long)]
    pub quiet: bool,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional file for JSONL episode records
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,

    #[command(flatten)]
    pub learning: LearningArgs,
}

/// Which reporters a training run attaches
#[derive(Debug, Clone, Default)]
pub(crate) struct Reporting {
    pub progress: bool,
    pub diagnostics: bool,
    pub observations: Option<PathBuf>,
}

/// Run self-play training on `store` with the requested reporters.
pub(crate) fn run_training(
    td: TdConfig,
    training: TrainingConfig,
    store: &mut ValueStore,
    reporting: &Reporting,
) -> Result<TrainingResult> {
    training.validate()?;
    let mut trainer = training.build_trainer(td);
    let mut pipeline = TrainingPipeline::new(training);
    if reporting.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if reporting.diagnostics {
        let observer = DiagnosticObserver::stdout(
            pipeline.config().show_every,
            trainer.config().win_value,
        );
        pipeline = pipeline.with_observer(Box::new(observer));
    }
    if let Some(path) = &reporting.observations {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    pipeline
        .run(&mut trainer, store)
        .context("self-play training failed")
}

/// Load the table at `path`, or `None` when there is nothing to load.
pub(crate) fn load_table(path: &Path, td: &TdConfig) -> Result<Option<ValueStore>> {
    TableFormat::from_path(path)
        .load(path, td.initial_value())
        .with_context(|| format!("failed to load value table from {}", path.display()))
}

pub(crate) fn save_table(store: &ValueStore, path: &Path) -> Result<()> {
    TableFormat::from_path(path)
        .save(store, path)
        .with_context(|| format!("failed to save value table to {}", path.display()))
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let td = args.learning.resolve()?;
    let training = TrainingConfig {
        epochs: args.epochs,
        show_every: args.show_every,
        seed: args.seed,
    };
    training.validate().context("invalid training options")?;

    let mut store = if args.resume {
        match load_table(&args.output, &td)? {
            Some(store) => {
                println!(
                    "Resuming from {} ({} states)",
                    args.output.display(),
                    store.len()
                );
                store
            }
            None => ValueStore::new(td.initial_value(), td.tie_value),
        }
    } else {
        ValueStore::new(td.initial_value(), td.tie_value)
    };

    print_section("Self-Play Training");
    print_kv("Episodes", &args.epochs.to_string());
    print_kv(
        "Parameters",
        &format!(
            "α={} γ={} λ={} ε={}",
            td.alpha, td.gamma, td.lambda, td.epsilon
        ),
    );
    if let Some(seed) = args.seed {
        print_kv("Seed", &seed.to_string());
    }
    println!("Working out state-value function ...");

    let reporting = Reporting {
        progress: !args.no_progress,
        diagnostics: !args.quiet,
        observations: args.observations.clone(),
    };
    let result = run_training(td, training, &mut store, &reporting)?;

    print_section("Training Complete");
    print_training_result(&result);

    save_table(&store, &args.output)?;
    println!("\n✓ Value table saved to: {}", args.output.display());

    if let Some(path) = &args.summary {
        result
            .save(path)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        println!("✓ Summary written to: {}", path.display());
    }

    Ok(())
}
