//! Criterion benchmarks measure time of the clearly separated pieces of code.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use skirmish::chess::board::Board;
use skirmish::chess::core::Color;
use skirmish::policy::{OneStepAheadPolicy, Policy};

const BOARDS: [(&str, &str); 3] = [
    (
        "standard",
        "rnbqkbnr\npppppppp\n........\n........\n........\n........\nPPPPPPPP\nRNBQKBNR\n",
    ),
    (
        "open middlegame",
        "r...k..r\np.p..ppp\n.pnq.n..\n...pp...\n..BP.B..\n..N.PN..\nPP...PPP\nR..QK..R\n",
    ),
    (
        "wide",
        "rnbqkbnrrnbqkbnr\npppppppppppppppp\n................\n................\n\
         ................\n................\nPPPPPPPPPPPPPPPP\nRNBQKBNRRNBQKBNR\n",
    ),
];

fn parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("Board parsing");
    for (name, input) in BOARDS {
        let _ = group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, input| {
            b.iter(|| Board::from_text(black_box(input)));
        });
    }
    group.finish();
}

fn generate_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("Move generation");
    for (name, input) in BOARDS {
        let board = Board::from_text(input).expect("benchmark boards are valid");
        let _ = group.bench_with_input(BenchmarkId::from_parameter(name), &board, |b, board| {
            b.iter(|| {
                let _ = black_box(board.generate_moves(Color::White));
                let _ = black_box(board.generate_moves(Color::Black));
            });
        });
    }
    group.finish();
}

fn one_step_ahead(c: &mut Criterion) {
    let mut group = c.benchmark_group("One step ahead policy");
    for (name, input) in BOARDS {
        let board = Board::from_text(input).expect("benchmark boards are valid");
        let mut policy = OneStepAheadPolicy::new(Some(0));
        let _ = group.bench_with_input(BenchmarkId::from_parameter(name), &board, |b, board| {
            b.iter(|| black_box(policy.select_move(board, Color::White)));
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(50);
    targets = parse, generate_moves, one_step_ahead
}
criterion_main!(benches);
