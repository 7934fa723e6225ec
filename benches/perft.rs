use criterion::{criterion_group, criterion_main, Criterion};
use pawnstorm::board::Board;
use pawnstorm::move_generator::generate;
use pawnstorm::search::{SearchOptions, Searcher};

// A pure perft function, with no node counting, simply make/unmake and
// move generation
fn perft(board: &mut Board, depth: u64) {
    if depth == 0 {
        return;
    }
    for m in &generate(board) {
        board.make(*m);
        perft(board, depth - 1);
        board.unmake();
    }
}

fn perft_bench(c: &mut Criterion) {
    let mut board = Board::new();
    c.bench_function("perft initial 3", |b| b.iter(|| perft(&mut board, 3)));
    board = Board::from_fen("r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10")
        .unwrap();
    c.bench_function("perft alternative 2", |b| b.iter(|| perft(&mut board, 2)));
}

fn search_bench(c: &mut Criterion) {
    let board = Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w - - 2 3")
        .unwrap();
    let mut options = SearchOptions::default();
    options.set_depth(3).set_seed(Some(0));
    c.bench_function("search italian 3", |b| {
        b.iter(|| Searcher::new(&options).search(&board))
    });
}

criterion_group!(benches, perft_bench, search_bench);
criterion_main!(benches);
