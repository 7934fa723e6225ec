use std::cmp::{max, min};
use std::fmt::Display;
use std::ops::Range;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, error, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::error::SearchError;
use crate::evaluation::{Evaluation, Score};
use crate::move_generator::generate;
use crate::piece::Color;
use crate::r#move::Move;

pub const DEFAULT_DEPTH: u8 = 4;
// Added once to every root move so that equal moves get picked in turn
const ROOT_JITTER: Range<Score> = -5..5;

/// What a search is allowed to do.
/// A fixed seed makes the whole search reproducible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    pub depth: u8,
    pub seed: Option<u64>,
}
impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            depth: DEFAULT_DEPTH,
            seed: None,
        }
    }
}
impl SearchOptions {
    pub fn set_depth(&mut self, value: u8) -> &mut Self {
        self.depth = value;
        self
    }
    pub fn set_seed(&mut self, value: Option<u64>) -> &mut Self {
        self.seed = value;
        self
    }
}

/// The outcome of a finished search
#[derive(Clone, Debug, PartialEq)]
pub struct Search {
    pub best_move: Option<Move>,
    pub score: Option<Score>,
    pub root_moves: usize,
    pub nodes_searched: u64,
    pub depth: u8,
    pub time: Duration,
}
impl Display for Search {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mate_score = self
            .score
            .map_or(false, |s| s.abs() >= Evaluation::MATE_SCORE - 10);
        write!(
            f,
            "depth {} time {} nodes {} nps {} moves {} score {} {} bestmove {}",
            self.depth,
            self.time.as_millis(),
            self.nodes_searched,
            ((self.nodes_searched as f64) / self.time.as_secs_f64().max(1e-9)) as u64,
            self.root_moves,
            if mate_score { "mate" } else { "cp" },
            self.score.map_or_else(|| String::from("-"), |s| s.to_string()),
            self.best_move
                .map_or_else(|| String::from("(none)"), |m| m.to_string()),
        )
    }
}

/// Fixed depth minimax with alpha-beta pruning.
/// White maximizes the evaluation, Black minimizes it.
pub struct Searcher<R: Rng> {
    rng: R,
    depth: u8,
    nodes_searched: u64,
}
impl Searcher<StdRng> {
    pub fn new(options: &SearchOptions) -> Searcher<StdRng> {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Searcher::with_rng(options.depth, rng)
    }
}
impl<R: Rng> Searcher<R> {
    pub fn with_rng(depth: u8, rng: R) -> Searcher<R> {
        Searcher {
            rng,
            depth,
            nodes_searched: 0,
        }
    }

    /// Searches `board` and reports the move to play, if there is any.
    /// The given board is never modified, the search works on its own copy.
    pub fn search(&mut self, board: &Board) -> Search {
        let start = Instant::now();
        self.nodes_searched = 0;

        let mut position = board.clone();
        let side = position.side_to_move();
        let mut root_moves = generate(&position);
        root_moves.shuffle(&mut self.rng);

        let mut best: Option<(Move, Score)> = None;
        for mv in &root_moves {
            position.make(*mv);
            let maximizing = position.side_to_move() == Color::White;
            let value = self.minimax(
                &mut position,
                self.depth.saturating_sub(1),
                Score::MIN,
                Score::MAX,
                maximizing,
            );
            position.unmake();

            let score = value + self.rng.gen_range(ROOT_JITTER);
            trace!("{} scores {} ({} before jitter)", mv, score, value);
            let improves = match best {
                None => true,
                Some((_, best_score)) if side == Color::White => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if improves {
                best = Some((*mv, score));
            }
        }

        let result = Search {
            best_move: best.map(|(m, _)| m),
            score: best.map(|(_, s)| s),
            root_moves: root_moves.len(),
            nodes_searched: self.nodes_searched,
            depth: self.depth,
            time: start.elapsed(),
        };
        debug!("{} -> {}", board.fen(), result);
        result
    }

    fn minimax(
        &mut self,
        position: &mut Board,
        depth: u8,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> Score {
        self.nodes_searched += 1;
        if depth == 0 {
            return Evaluation::score(position);
        }
        let mut moves = generate(position);
        if moves.is_empty() || position.is_draw() {
            return Evaluation::score(position);
        }
        moves.shuffle(&mut self.rng);

        if maximizing {
            let mut max_eval = Score::MIN;
            for mv in &moves {
                position.make(*mv);
                let eval = self.minimax(position, depth - 1, alpha, beta, false);
                position.unmake();
                max_eval = max(max_eval, eval);
                alpha = max(alpha, eval);
                if beta <= alpha {
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = Score::MAX;
            for mv in &moves {
                position.make(*mv);
                let eval = self.minimax(position, depth - 1, alpha, beta, true);
                position.unmake();
                min_eval = min(min_eval, eval);
                beta = min(beta, eval);
                if beta <= alpha {
                    break;
                }
            }
            min_eval
        }
    }
}

/// Picks a move for the side to move, None when the game is over
pub fn best_move(board: &Board, options: &SearchOptions) -> Option<Move> {
    Searcher::new(options).search(board).best_move
}

/// Runs at most one search at a time on a background thread
#[derive(Default)]
pub struct SearchFramework {
    worker: Option<JoinHandle<Search>>,
}
impl SearchFramework {
    pub fn new() -> SearchFramework {
        SearchFramework { worker: None }
    }

    /// True from `run_search` until its result has been collected
    pub fn is_searching(&self) -> bool {
        self.worker.is_some()
    }

    pub fn run_search(&mut self, position: &Board, options: &SearchOptions) -> Result<(), SearchError> {
        if self.worker.is_some() {
            return Err(SearchError::AlreadyRunning);
        }

        let internal_position = position.clone();
        let internal_options = options.clone();
        self.worker = Some(thread::spawn(move || {
            Searcher::new(&internal_options).search(&internal_position)
        }));
        Ok(())
    }

    /// Returns a result if and only if the current search
    /// is finished
    pub fn probe_search(&mut self) -> Option<Search> {
        let is_finished = self.worker.as_ref().map_or(false, |w| w.is_finished());
        if is_finished {
            self.wait_search()
        } else {
            None
        }
    }

    /// Blocks until the current search is over
    pub fn wait_search(&mut self) -> Option<Search> {
        let worker = self.worker.take()?;
        match worker.join() {
            Ok(search) => Some(search),
            Err(_) => {
                error!("search thread panicked");
                None
            }
        }
    }
}
