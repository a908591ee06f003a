//! ttt-td - Self-play TD(λ) Tic-Tac-Toe
//!
//! - `train`: learn a value table by self-play and save it
//! - `play`: play against the agent in the terminal

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ttt-td")]
#[command(version, about = "Self-play TD(λ) Tic-Tac-Toe agent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the value table by self-play
    Train(ttt_td::cli::commands::train::TrainArgs),

    /// Play against the trained agent
    Play(ttt_td::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => ttt_td::cli::commands::train::execute(args),
        Commands::Play(args) => ttt_td::cli::commands::play::execute(args),
    }
}
