//! Human-versus-agent matches
//!
//! The session holds the rules of a match; rendering and input belong to the
//! caller. The agent always plays greedily, and a finished match runs the
//! same TD(λ) update as a training episode, so the table keeps learning from
//! human games.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    td_lambda::{CompletedEpisode, Episode, Trainer, ValueStore},
    tictactoe::{BoardState, CELL_COUNT, GameOutcome, Participant, Player, Role},
};

/// Final result of a match from the human's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    HumanWin,
    AgentWin,
    Tie,
}

/// What happened after a human move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    /// Cell the agent answered with, if the game was still on
    pub agent_cell: Option<usize>,
    /// Set once the match has ended
    pub result: Option<MatchResult>,
}

/// One game between a human and the agent.
#[derive(Debug, Clone)]
pub struct MatchSession {
    human: Participant,
    agent: Participant,
    episode: Episode,
    finished: Option<CompletedEpisode>,
}

impl MatchSession {
    /// Start a match. The first mover plays X; when that is the agent, its
    /// opening move is made immediately.
    pub fn start(
        trainer: &mut Trainer,
        store: &mut ValueStore,
        human_first: bool,
    ) -> Result<Self> {
        let (human_symbol, agent_symbol) = if human_first {
            (Player::X, Player::O)
        } else {
            (Player::O, Player::X)
        };

        let mut session = Self {
            human: Participant::new(human_symbol, Role::Human),
            agent: Participant::new(agent_symbol, Role::Agent),
            episode: Episode::new(),
            finished: None,
        };
        store.ensure(&session.episode.current());

        if !human_first {
            session.agent_turn(trainer, store)?;
        }
        Ok(session)
    }

    pub fn human(&self) -> Participant {
        self.human
    }

    pub fn agent(&self) -> Participant {
        self.agent
    }

    /// The board to display: the live board, or the marked terminal board
    /// once the match is over
    pub fn board(&self) -> BoardState {
        match &self.finished {
            Some(completed) => completed.terminal_state(),
            None => self.episode.current(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.finished.is_some()
    }

    pub fn result(&self) -> Option<MatchResult> {
        self.finished
            .as_ref()
            .map(|completed| self.result_for(completed.outcome))
    }

    /// Play the human's symbol on `cell` and let the agent reply.
    ///
    /// # Errors
    ///
    /// [`Error::GameOver`] after the match has ended and
    /// [`Error::InvalidMove`] for an occupied or out-of-range cell; neither
    /// changes the board.
    pub fn human_move(
        &mut self,
        trainer: &mut Trainer,
        store: &mut ValueStore,
        cell: usize,
    ) -> Result<TurnReport> {
        if self.is_over() {
            return Err(Error::GameOver);
        }

        let current = self.episode.current();
        if cell >= CELL_COUNT || !current.is_empty(cell) {
            return Err(Error::InvalidMove { position: cell });
        }
        let next = current.make_move(cell)?;

        if let Some(completed) = trainer.advance(store, &mut self.episode, next)? {
            self.finished = Some(completed);
            return Ok(TurnReport {
                agent_cell: None,
                result: self.result(),
            });
        }

        let agent_cell = self.agent_turn(trainer, store)?;
        Ok(TurnReport {
            agent_cell,
            result: self.result(),
        })
    }

    fn agent_turn(
        &mut self,
        trainer: &mut Trainer,
        store: &mut ValueStore,
    ) -> Result<Option<usize>> {
        let current = self.episode.current();
        let next = trainer.choose(store, &current, true)?;
        let cell = current.find_changed_position(&next);

        if let Some(completed) = trainer.advance(store, &mut self.episode, next)? {
            self.finished = Some(completed);
        }
        Ok(cell)
    }

    fn result_for(&self, outcome: GameOutcome) -> MatchResult {
        match outcome {
            GameOutcome::Win(winner) if winner == self.human.symbol => MatchResult::HumanWin,
            GameOutcome::Win(_) => MatchResult::AgentWin,
            GameOutcome::Draw => MatchResult::Tie,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::td_lambda::TdConfig;

    fn setup() -> (Trainer, ValueStore) {
        let trainer = Trainer::new(TdConfig::default()).with_seed(17);
        let store = trainer.new_store();
        (trainer, store)
    }

    #[test]
    fn test_human_first_plays_x() {
        let (mut trainer, mut store) = setup();
        let session = MatchSession::start(&mut trainer, &mut store, true).unwrap();

        assert_eq!(session.human().symbol, Player::X);
        assert_eq!(session.agent().symbol, Player::O);
        assert_eq!(session.board(), BoardState::new());
    }

    #[test]
    fn test_agent_first_opens_immediately() {
        let (mut trainer, mut store) = setup();
        let session = MatchSession::start(&mut trainer, &mut store, false).unwrap();

        assert_eq!(session.agent().symbol, Player::X);
        assert_eq!(session.board().ply_count(), 1);
    }

    #[test]
    fn test_agent_replies_with_greedy_move() {
        let (mut trainer, mut store) = setup();
        let best_reply = BoardState::from_key("0---X----").unwrap();
        store.set_value(&best_reply, 0.9);

        let mut session = MatchSession::start(&mut trainer, &mut store, true).unwrap();
        let report = session.human_move(&mut trainer, &mut store, 4).unwrap();

        assert_eq!(report.agent_cell, Some(0));
        assert_eq!(report.result, None);
        assert_eq!(session.board(), best_reply);
    }

    #[test]
    fn test_occupied_cell_is_rejected() {
        let (mut trainer, mut store) = setup();
        let mut session = MatchSession::start(&mut trainer, &mut store, true).unwrap();
        session.human_move(&mut trainer, &mut store, 4).unwrap();
        let before = session.board();

        let err = session.human_move(&mut trainer, &mut store, 4).unwrap_err();
        assert!(matches!(err, Error::InvalidMove { position: 4 }));
        assert_eq!(session.board(), before);

        let err = session.human_move(&mut trainer, &mut store, 9).unwrap_err();
        assert!(matches!(err, Error::InvalidMove { position: 9 }));
    }

    #[test]
    fn test_match_reaches_a_result() {
        let (mut trainer, mut store) = setup();
        let mut session = MatchSession::start(&mut trainer, &mut store, true).unwrap();

        while !session.is_over() {
            let cell = session.board().empty_positions()[0];
            session.human_move(&mut trainer, &mut store, cell).unwrap();
        }

        assert!(session.result().is_some());
        let err = session.human_move(&mut trainer, &mut store, 0).unwrap_err();
        assert!(matches!(err, Error::GameOver));
        for state in [BoardState::new(), session.board()] {
            assert_eq!(store.trace(&state), Some(0.0));
        }
    }
}
