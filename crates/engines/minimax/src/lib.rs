//! Minimax Chess Engine
//!
//! Fixed-depth minimax with alpha-beta pruning over the `chess_core` move
//! generator. White maximizes and Black minimizes a White-positive
//! material plus piece-square evaluation.
//!
//! Difficulty tiers pick the depth and, for the easiest tier, a chance of
//! playing a random legal move instead of searching.

mod config;
mod eval;
mod ordering;
mod search;

use chess_core::{Board, CastlingRights, Color, Coord, Move, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

pub use config::{ConfigError, Difficulty, EngineConfig, SearchConfig, Tier, TierTable};
pub use eval::{evaluate, piece_value, PIECE_VALUES};
pub use ordering::{move_score, order_moves};
pub use search::MATE_SCORE;

use search::SearchOptions;

/// Outcome of one engine decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` only when the side to move has no legal move.
    pub best_move: Option<Move>,
    /// White-positive score of `best_move`; 0 when none or random.
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
    /// The move was drawn at random rather than searched.
    pub randomized: bool,
}

/// Chess engine using minimax with alpha-beta pruning.
///
/// Each call searches from scratch on snapshot copies; nothing but the
/// random generator and the diagnostics of the last call carries over.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    config: EngineConfig,
    rng: StdRng,
    /// Node counter for statistics
    nodes: u64,
    last_score: i32,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl SearchEngine {
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.search.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng,
            nodes: 0,
            last_score: 0,
        }
    }

    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self::new(EngineConfig::default().with_difficulty(difficulty))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
    }

    /// Nodes visited by the most recent search.
    pub fn nodes_visited(&self) -> u64 {
        self.nodes
    }

    /// Score reported by the most recent search.
    pub fn last_score(&self) -> i32 {
        self.last_score
    }

    fn options(&self) -> SearchOptions {
        SearchOptions {
            underpromotions: self.config.search.underpromotions,
        }
    }

    /// Best move for `side` on a raw board, searched `depth` plies deep.
    pub fn choose_move(
        &mut self,
        board: &Board,
        side: Color,
        castling: CastlingRights,
        en_passant: Option<Coord>,
        depth: u8,
    ) -> Option<Move> {
        let pos = Position {
            board: board.clone(),
            side_to_move: side,
            castling,
            en_passant,
            rules: self.config.rules,
        };
        self.search(&pos, depth).best_move
    }

    /// Deterministic fixed-depth search. Depth 0 is searched as 1.
    pub fn search(&mut self, pos: &Position, depth: u8) -> SearchResult {
        self.nodes = 0;
        let depth = depth.max(1);

        let outcome = search::pick_best_move(pos, depth, self.options(), &mut self.nodes);
        let score = outcome.map_or(0, |(_, s)| s);
        self.last_score = score;
        debug!(nodes = self.nodes, score, depth, "search finished");

        SearchResult {
            best_move: outcome.map(|(mv, _)| mv),
            score,
            depth,
            nodes: self.nodes,
            randomized: false,
        }
    }

    /// Decides a move at the configured difficulty.
    pub fn play(&mut self, pos: &Position) -> SearchResult {
        let tier = self.config.tier();
        if tier.random_move_probability > 0.0
            && self.rng.gen::<f64>() < tier.random_move_probability
        {
            let moves = search::candidate_moves(pos, self.options());
            if let Some(&mv) = moves.choose(&mut self.rng) {
                self.nodes = 0;
                self.last_score = 0;
                info!(mv = %mv, difficulty = %self.config.difficulty, "random move");
                return SearchResult {
                    best_move: Some(mv),
                    score: 0,
                    depth: 0,
                    nodes: 0,
                    randomized: true,
                };
            }
        }
        self.search(pos, tier.depth)
    }
}
