//! Human-versus-agent matches through the public session API

use ttt_td::{
    Error, MatchResult, MatchSession,
    tictactoe::{Cell, Player},
};

mod common;

#[test]
fn human_moves_are_applied_then_answered() {
    let (mut trainer, mut store) = common::trained(12, 200);
    let mut session = MatchSession::start(&mut trainer, &mut store, true).unwrap();

    let report = session.human_move(&mut trainer, &mut store, 0).unwrap();
    let board = session.board();

    assert_eq!(board.get(0), Cell::X);
    let agent_cell = report.agent_cell.expect("agent replies");
    assert_ne!(agent_cell, 0);
    assert_eq!(board.get(agent_cell), Cell::O);
    assert_eq!(board.ply_count(), 2);
}

#[test]
fn agent_follows_its_learned_values() {
    let (mut trainer, mut store) = common::trained(5, 0);
    store.set_value(&common::boards(&["----X----"])[0], 0.9);
    store.set_value(&common::boards(&["X---X---0"])[0], 0.9);
    store.set_value(&common::boards(&["X0-XX---0"])[0], 0.95);

    // Agent plays X and opens in the centre
    let mut session = MatchSession::start(&mut trainer, &mut store, false).unwrap();
    assert_eq!(session.agent().symbol, Player::X);
    assert_eq!(session.board().get(4), Cell::X);

    let report = session.human_move(&mut trainer, &mut store, 8).unwrap();
    assert_eq!(report.agent_cell, Some(0));

    let report = session.human_move(&mut trainer, &mut store, 1).unwrap();
    assert_eq!(report.agent_cell, Some(3));
    assert_eq!(report.result, None);
    assert_eq!(session.board().key(), "X0-XX---0");
}

#[test]
fn finished_match_rejects_further_moves() {
    let (mut trainer, mut store) = common::trained(6, 100);
    let mut session = MatchSession::start(&mut trainer, &mut store, false).unwrap();

    while !session.is_over() {
        let cell = session.board().empty_positions()[0];
        session.human_move(&mut trainer, &mut store, cell).unwrap();
    }

    let result = session.result().unwrap();
    assert!(matches!(
        result,
        MatchResult::HumanWin | MatchResult::AgentWin | MatchResult::Tie
    ));
    assert!(matches!(
        session.human_move(&mut trainer, &mut store, 0),
        Err(Error::GameOver)
    ));
}

#[test]
fn human_games_update_the_table() {
    let (mut trainer, mut store) = common::trained(9, 0);
    let before = store.len();
    let mut session = MatchSession::start(&mut trainer, &mut store, true).unwrap();

    while !session.is_over() {
        let cell = session.board().empty_positions()[0];
        session.human_move(&mut trainer, &mut store, cell).unwrap();
    }

    let terminal = session.board();
    assert!(store.len() > before);
    assert_ne!(store.value(&terminal), Some(store.initial_value()));
}
