//! Play command - Human against the trained agent in the terminal
//!
//! Cells are addressed 1-9, row by row from the top left. `q` quits.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    Error,
    cli::{
        commands::train::{DEFAULT_TABLE_PATH, Reporting, load_table, run_training, save_table},
        config::LearningArgs,
        output::{print_section, print_training_result},
    },
    pipeline::{DEFAULT_EPOCHS, DEFAULT_SHOW_EVERY, TrainingConfig},
    session::{MatchResult, MatchSession},
    td_lambda::{Trainer, ValueStore},
    tictactoe::{BoardState, CELL_COUNT, Cell, Participant},
};

#[derive(Parser, Debug)]
#[command(about = "Play against the agent in the terminal")]
pub struct PlayArgs {
    /// Value table to load; trained from scratch and saved on exit when missing
    #[arg(long, short = 't', default_value = DEFAULT_TABLE_PATH)]
    pub table: PathBuf,

    /// Move first (skips the menu)
    #[arg(long, conflicts_with = "agent_first")]
    pub human_first: bool,

    /// Let the agent move first (skips the menu)
    #[arg(long)]
    pub agent_first: bool,

    /// Self-play episodes when no table exists yet
    #[arg(long, default_value_t = DEFAULT_EPOCHS)]
    pub epochs: usize,

    /// Diagnostic episode spacing when training from scratch
    #[arg(long, default_value_t = DEFAULT_SHOW_EVERY)]
    pub show_every: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Save the table on exit even when it was loaded
    #[arg(long)]
    pub save: bool,

    /// Disable the progress bar while training from scratch
    #[arg(long)]
    pub no_progress: bool,

    #[command(flatten)]
    pub learning: LearningArgs,
}

/// Results of the games finished in one play session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub human_wins: usize,
    pub agent_wins: usize,
    pub ties: usize,
}

impl SessionStats {
    pub fn games(&self) -> usize {
        self.human_wins + self.agent_wins + self.ties
    }

    fn record(&mut self, result: MatchResult) {
        match result {
            MatchResult::HumanWin => self.human_wins += 1,
            MatchResult::AgentWin => self.agent_wins += 1,
            MatchResult::Tie => self.ties += 1,
        }
    }
}

/// A line of player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Cell(usize),
    Quit,
}

/// Parse `1`-`9` into a cell index or `q` into a quit request
fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
        return Some(Command::Quit);
    }
    match line.parse::<usize>() {
        Ok(n) if (1..=CELL_COUNT).contains(&n) => Some(Command::Cell(n - 1)),
        _ => None,
    }
}

/// Text front end over any input and output stream
pub struct TerminalUi<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl TerminalUi<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalUi<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Next input line, or `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()
    }

    /// The y/n menu. `None` means the player quit.
    fn ask_human_first(&mut self) -> io::Result<Option<bool>> {
        loop {
            self.prompt("Would you like to go first? (y/n) ")?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                "q" | "quit" => return Ok(None),
                _ => writeln!(self.output, "Please press 'y' or 'n'.")?,
            }
        }
    }

    /// Read the next cell choice. End of input counts as quitting.
    fn read_command(&mut self) -> io::Result<Command> {
        loop {
            self.prompt("Your move (1-9, q to quit): ")?;
            let Some(line) = self.read_line()? else {
                return Ok(Command::Quit);
            };
            match parse_command(&line) {
                Some(command) => return Ok(command),
                None => writeln!(self.output, "Enter a cell number from 1 to 9.")?,
            }
        }
    }

    /// Draw the grid. Free cells show their number and winning-line cells
    /// show `*`.
    fn render(
        &mut self,
        board: &BoardState,
        human: Participant,
        agent: Participant,
    ) -> io::Result<()> {
        writeln!(self.output)?;
        for row in 0..3 {
            let cells: Vec<String> = (0..3)
                .map(|col| {
                    let pos = row * 3 + col;
                    match board.get(pos) {
                        Cell::Empty => (pos + 1).to_string(),
                        Cell::Winner => "*".to_string(),
                        cell => cell.to_char().to_string(),
                    }
                })
                .collect();
            writeln!(self.output, " {} ", cells.join(" | "))?;
            if row < 2 {
                writeln!(self.output, "---+---+---")?;
            }
        }
        writeln!(
            self.output,
            "You: {}   Agent: {}",
            human.symbol.symbol(),
            agent.symbol.symbol()
        )
    }

    fn announce(&mut self, result: MatchResult) -> io::Result<()> {
        let message = match result {
            MatchResult::HumanWin => "You win!",
            MatchResult::AgentWin => "The agent wins.",
            MatchResult::Tie => "It's a tie.",
        };
        writeln!(self.output, "{message}")?;
        writeln!(self.output, "-----------------------")
    }
}

/// Play games until the player quits. Every finished game updates `store`.
pub fn play_games<R: BufRead, W: Write>(
    ui: &mut TerminalUi<R, W>,
    trainer: &mut Trainer,
    store: &mut ValueStore,
    human_first: Option<bool>,
) -> Result<SessionStats> {
    let mut stats = SessionStats::default();
    let human_first = match human_first {
        Some(choice) => choice,
        None => match ui.ask_human_first()? {
            Some(choice) => choice,
            None => return Ok(stats),
        },
    };

    loop {
        let mut session = MatchSession::start(trainer, store, human_first)?;
        ui.render(&session.board(), session.human(), session.agent())?;

        while !session.is_over() {
            let cell = match ui.read_command()? {
                Command::Quit => return Ok(stats),
                Command::Cell(cell) => cell,
            };

            let report = match session.human_move(trainer, store, cell) {
                Ok(report) => report,
                Err(Error::InvalidMove { .. }) => {
                    writeln!(ui.output, "Cell {} is not free.", cell + 1)?;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            if let Some(agent_cell) = report.agent_cell {
                writeln!(ui.output, "Agent plays {}.", agent_cell + 1)?;
            }
            ui.render(&session.board(), session.human(), session.agent())?;
        }

        if let Some(result) = session.result() {
            stats.record(result);
            ui.announce(result)?;
        }
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let td = args.learning.resolve()?;
    let training = TrainingConfig {
        epochs: args.epochs,
        show_every: args.show_every,
        seed: args.seed,
    };

    let (mut store, trained) = match load_table(&args.table, &td)? {
        Some(store) => {
            println!(
                "Loaded {} states from {}",
                store.len(),
                args.table.display()
            );
            (store, false)
        }
        None => {
            print_section("Self-Play Training");
            println!("Working out state-value function ...");
            let mut store = ValueStore::new(td.initial_value(), td.tie_value);
            let reporting = Reporting {
                progress: !args.no_progress,
                diagnostics: true,
                observations: None,
            };
            let result = run_training(td, training.clone(), &mut store, &reporting)?;
            print_training_result(&result);
            (store, true)
        }
    };

    let human_first = if args.human_first {
        Some(true)
    } else if args.agent_first {
        Some(false)
    } else {
        None
    };

    let mut trainer = training.build_trainer(td);
    let mut ui = TerminalUi::stdio();
    let stats = play_games(&mut ui, &mut trainer, &mut store, human_first)
        .context("play session failed")?;

    if stats.games() > 0 {
        println!(
            "\nYou won {}, the agent won {}, {} tied.",
            stats.human_wins, stats.agent_wins, stats.ties
        );
    }

    if trained || args.save {
        save_table(&store, &args.table)?;
        println!("✓ Value table saved to: {}", args.table.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::td_lambda::TdConfig;

    fn run(input: &str, human_first: Option<bool>) -> (SessionStats, String) {
        let mut trainer = Trainer::new(TdConfig::default()).with_seed(5);
        let mut store = trainer.new_store();
        let mut ui = TerminalUi::new(input.as_bytes(), Vec::new());

        let stats = play_games(&mut ui, &mut trainer, &mut store, human_first).unwrap();
        let output = String::from_utf8(ui.into_output()).unwrap();
        (stats, output)
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("1\n"), Some(Command::Cell(0)));
        assert_eq!(parse_command(" 9 "), Some(Command::Cell(8)));
        assert_eq!(parse_command("Q"), Some(Command::Quit));
        assert_eq!(parse_command("0"), None);
        assert_eq!(parse_command("10"), None);
        assert_eq!(parse_command("x"), None);
    }

    #[test]
    fn test_quit_from_menu() {
        let (stats, output) = run("q\n", None);
        assert_eq!(stats.games(), 0);
        assert!(output.contains("Would you like to go first?"));
    }

    #[test]
    fn test_menu_repeats_until_answered() {
        let (_, output) = run("maybe\ny\nq\n", None);
        assert!(output.contains("Please press 'y' or 'n'."));
        assert!(output.contains("You: X   Agent: 0"));
    }

    #[test]
    fn test_bad_input_is_reprompted() {
        let (stats, output) = run("0\nabc\nq\n", Some(true));
        assert_eq!(stats.games(), 0);
        assert_eq!(output.matches("Enter a cell number from 1 to 9.").count(), 2);
    }

    #[test]
    fn test_agent_first_opens_the_game() {
        let (_, output) = run("q\n", Some(false));
        assert!(output.contains("You: 0   Agent: X"));
        assert_eq!(output.matches('X').count(), 2);
    }

    #[test]
    fn test_sweeping_cells_finishes_a_game() {
        let input = "1\n2\n3\n4\n5\n6\n7\n8\n9\nq\n";
        let (stats, output) = run(input, Some(true));

        assert!(stats.games() >= 1);
        assert!(
            output.contains("You win!")
                || output.contains("The agent wins.")
                || output.contains("It's a tie.")
        );
    }
}
