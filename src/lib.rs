use std::time::Instant;

use crate::board::Board;
use crate::error::FenError;
use crate::move_generator::generate;

pub mod board;
pub mod console;
pub mod error;
pub mod evaluation;
pub mod game;
pub mod history;
pub mod move_generator;
pub mod movelist;
pub mod piece;
pub mod search;
pub mod square;
mod r#move;

pub use crate::r#move::Move;

pub fn perft(depth: u32, fen: Option<&str>) -> Result<(), FenError> {
    let mut board = match fen {
        None => Board::new(),
        Some(f) => Board::from_fen(f)?,
    };
    print_perft(&mut board, depth);
    Ok(())
}

/// Prints the node count of every depth up to `depth`, the board ends up as it started
pub fn print_perft(board: &mut Board, depth: u32) {
    println!("{}\n", board);
    println!("depth nodes\n--------");
    for d in 0..depth + 1 {
        let start = Instant::now();
        let nodes = perft_nodes(board, d);
        let elapsed = start.elapsed();
        println!(
            "{}     {} ({}s, {} nps)",
            d,
            nodes,
            elapsed.as_secs_f32(),
            nodes as f32 / elapsed.as_secs_f32()
        );
    }
}

/// Leaf count of the legal move tree
pub fn perft_nodes(board: &mut Board, depth: u32) -> u128 {
    if depth == 0 {
        return 1;
    }
    let moves = generate(board);
    if depth == 1 {
        return moves.len() as u128;
    }
    let mut nodes: u128 = 0u128;
    for mv in &moves {
        board.make(*mv);
        nodes += perft_nodes(board, depth - 1);
        board.unmake();
    }
    nodes
}
