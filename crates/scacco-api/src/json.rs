//! JSON shapes consumed by the HTTP layer.
//!
//! The server itself lives elsewhere; these are the typed bodies it
//! serializes, plus the glue that applies an external move string.

use serde::Serialize;
use tracing::debug;

use scacco_core::{Board, GameState, Move};
use scacco_engine::{MATE, MATE_THRESHOLD};

use crate::notation::parse_long_move;

/// A move in the `{"long", "from", "to", "promo"}` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveJson {
    pub long: String,
    pub from: String,
    pub to: String,
    pub promo: Option<char>,
}

/// Convert a move for the wire.
pub fn move_to_json(mv: Move) -> MoveJson {
    MoveJson {
        long: mv.to_string(),
        from: mv.source().to_string(),
        to: mv.dest().to_string(),
        promo: mv.promotion_kind().map(|kind| kind.fen_char()),
    }
}

/// An evaluation: either centipawns or a signed "mate in N" in moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreJson {
    pub cp: Option<i32>,
    pub mate: Option<i32>,
}

/// Convert a search score. Scores beyond the mate threshold carry their
/// distance in plies; halving (rounded up) turns that into full moves,
/// signed toward the winning side.
pub fn score_to_json(score: i32) -> ScoreJson {
    if score.abs() > MATE_THRESHOLD {
        let mate = if score > 0 {
            (MATE - score + 1) / 2
        } else {
            -((MATE + score + 1) / 2)
        };
        ScoreJson {
            cp: None,
            mate: Some(mate),
        }
    } else {
        ScoreJson {
            cp: Some(score),
            mate: None,
        }
    }
}

/// Game status strings on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Ongoing,
    Mate,
    Draw,
}

impl From<GameState> for GameStatus {
    fn from(state: GameState) -> GameStatus {
        match state {
            GameState::InProgress => GameStatus::Ongoing,
            GameState::Mate(_) => GameStatus::Mate,
            GameState::Draw => GameStatus::Draw,
        }
    }
}

/// The `{"legal", "fen", "status", "lastMove"}` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStatus {
    pub legal: bool,
    pub fen: Option<String>,
    pub status: GameStatus,
    pub last_move: String,
}

/// Snapshot the position after `last_move` was applied.
pub fn board_status(board: &mut Board, last_move: &str) -> BoardStatus {
    BoardStatus {
        legal: true,
        fen: Some(board.to_string()),
        status: board.game_state().into(),
        last_move: last_move.to_string(),
    }
}

/// Apply an external move string.
///
/// A string that does not resolve to a legal move leaves the board
/// untouched and reports `legal: false` with no FEN.
pub fn apply_move(board: &mut Board, move_str: &str) -> BoardStatus {
    match parse_long_move(board, move_str) {
        Ok(mv) => {
            board.make_move(mv);
            board_status(board, move_str)
        }
        Err(err) => {
            debug!(move_str, %err, "rejected external move");
            BoardStatus {
                legal: false,
                fen: None,
                status: GameStatus::Ongoing,
                last_move: move_str.to_string(),
            }
        }
    }
}
