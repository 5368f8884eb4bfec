use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use plum_board::game_state::chess_types::Square;
use plum_board::game_state::game_state::GameState;
use plum_board::move_generation::legal_move_generator::{evaluate_status, legal_destinations, legal_moves};
use plum_board::move_generation::perft::perft;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "start",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    },
    BenchCase {
        name: "castling_middlegame",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    },
    BenchCase {
        name: "rook_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    },
    BenchCase {
        name: "back_rank_mate",
        fen: "3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1",
    },
];

fn bench_legality(c: &mut Criterion) {
    let mut group = c.benchmark_group("legality");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));
    group.sample_size(30);

    for case in CASES {
        let game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");
        let board = game.board.clone();
        let side = game.side_to_move;

        group.bench_with_input(
            BenchmarkId::new("legal_destinations_all", case.name),
            &board,
            |b, board| {
                b.iter(|| {
                    let total: usize = Square::all()
                        .map(|square| legal_destinations(black_box(board), square).len())
                        .sum();
                    black_box(total)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("legal_moves", case.name), &board, |b, board| {
            b.iter(|| black_box(legal_moves(black_box(board), side).len()));
        });

        group.bench_with_input(BenchmarkId::new("evaluate_status", case.name), &board, |b, board| {
            b.iter(|| black_box(evaluate_status(black_box(board), side)));
        });
    }

    group.finish();
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(10);

    let game = GameState::new_game();
    for depth in 1..=3u8 {
        group.bench_with_input(BenchmarkId::new("start", depth), &depth, |b, &depth| {
            b.iter(|| {
                let counts = perft(black_box(&game), depth).expect("perft benchmark run should succeed");
                black_box(counts.nodes)
            });
        });
    }

    group.finish();
}

criterion_group!(legality_benches, bench_legality, bench_perft);
criterion_main!(legality_benches);
