// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate criterion;

use criterion::black_box;
use criterion::Criterion;
use hermes::{Armies, Board, Color, PieceId, Square};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("board clone", |b| {
        let board = Board::starting_position();
        b.iter(|| black_box(&board).clone())
    });

    c.bench_function("control refresh start", |b| {
        let armies = Armies::starting();
        b.iter(|| Board::from_armies(black_box(&armies).clone()))
    });

    c.bench_function("possible moves queen", |b| {
        let board = Board::from_layout("4k4/9/9/9/4Q4/9/9/9/9/4K4").unwrap();
        let queen = board.piece_at(Square::of(4, 4)).unwrap().0;
        b.iter(|| board.possible_moves(black_box(queen)))
    });

    c.bench_function("legal move count start", |b| {
        let board = Board::starting_position();
        b.iter(|| board.legal_move_count(black_box(Color::White)))
    });

    c.bench_function("execute pawn double step", |b| {
        let board = Board::starting_position();
        let pawn = PieceId::new(Color::White, 4);
        b.iter(|| {
            let mut board = board.clone();
            board.execute_move(black_box(pawn), Square::of(5, 4))
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
