//! Root search: score every legal move, then pick uniformly at random
//! among the moves tied at the best score.

pub mod negamax;
pub mod ordering;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::debug;

use scacco_core::{Board, Move};

use self::negamax::{MATE, negamax};
use self::ordering::MovePicker;

/// Outcome of a completed root search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The chosen move; `None` when the position has no legal moves.
    /// Callers that need to distinguish mate from stalemate should ask
    /// [`Board::game_state`] first.
    pub best_move: Option<Move>,
    /// Score in centipawns from the side to move; beyond
    /// [`MATE_THRESHOLD`](negamax::MATE_THRESHOLD) it is a mate distance.
    pub score: i32,
    /// Positions visited, root included.
    pub nodes: u64,
}

/// The searcher. Owns the RNG used to break ties between equal root
/// moves, so a seeded engine plays a reproducible game.
pub struct Engine {
    rng: SmallRng,
}

impl Engine {
    /// An engine seeded from OS entropy.
    pub fn new() -> Engine {
        Engine {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// An engine with a fixed seed. Tie-breaks become deterministic,
    /// which the test suite relies on.
    pub fn with_seed(seed: u64) -> Engine {
        Engine {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Search `depth` plies (at least 1) and pick a best move.
    pub fn search(&mut self, board: &mut Board, depth: u32) -> SearchResult {
        let moves = board.legal_moves();
        if moves.is_empty() {
            let score = if board.in_check() { -MATE } else { 0 };
            return SearchResult {
                best_move: None,
                score,
                nodes: 0,
            };
        }

        let mut nodes = 0u64;
        let mut best_score = -MATE;
        let mut tied: Vec<Move> = Vec::new();

        let danger = board.attacked_squares(board.side_to_move().flip(), board.occupied());
        let mut picker = MovePicker::new(&moves, board, danger);
        while let Some(mv) = picker.pick_next() {
            board.make_move(mv);
            // Every root move gets the full window. Narrowing it here would
            // make later fail-hard children return the clipped bound itself,
            // and those would masquerade as ties of the best score.
            let score = -negamax(board, depth.saturating_sub(1), 1, -MATE, MATE, &mut nodes);
            board.undo_move();
            debug!(%mv, score, "root move");

            if score > best_score {
                best_score = score;
                tied.clear();
                tied.push(mv);
            } else if score == best_score {
                tied.push(mv);
            }
        }

        let best_move = if tied.len() == 1 {
            tied[0]
        } else {
            tied[self.rng.random_range(0..tied.len())]
        };

        SearchResult {
            best_move: Some(best_move),
            score: best_score,
            nodes,
        }
    }

    /// [`search`](Self::search), returning only the move.
    pub fn best_move(&mut self, board: &mut Board, depth: u32) -> Option<Move> {
        self.search(board, depth).best_move
    }
}

impl Default for Engine {
    fn default() -> Engine {
        Engine::new()
    }
}
