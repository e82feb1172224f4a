//! External interfaces for scacco: long-algebraic move strings and the
//! JSON contracts the HTTP host serializes.

pub mod error;
pub mod json;
pub mod notation;

pub use error::NotationError;
pub use json::{
    BoardStatus, GameStatus, MoveJson, ScoreJson, apply_move, board_status, move_to_json,
    score_to_json,
};
pub use notation::parse_long_move;
