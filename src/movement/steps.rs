// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use super::landing;
use super::rays::ORTHOGONAL;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::grid::MoveGrid;
use crate::marker::Marker;
use crate::types::{Color, Square, SQUARE_COUNT};

const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Squares reachable from each square of the board with one of a fixed set
/// of offsets.
struct StepTable {
    table: [Bitboard; SQUARE_COUNT],
}

impl StepTable {
    fn new(offsets: &[(i32, i32)]) -> StepTable {
        let mut st = StepTable {
            table: [Bitboard::none(); SQUARE_COUNT],
        };

        for sq in Square::all() {
            st.table[sq.index()] = offsets
                .iter()
                .filter_map(|&(dr, dc)| sq.offset(dr, dc))
                .collect();
        }

        st
    }

    fn targets(&self, sq: Square) -> Bitboard {
        self.table[sq.index()]
    }
}

lazy_static! {
    static ref NEIGHBOR_TABLE: StepTable = StepTable::new(&NEIGHBOR_OFFSETS);
    static ref KNIGHT_TABLE: StepTable = StepTable::new(&KNIGHT_OFFSETS);
}

fn leap(grid: &mut MoveGrid, targets: Bitboard, color: Color, board: &Board) {
    for sq in targets {
        grid.set(sq, landing(board.occupant(sq), color));
    }
}

/// King-style movement over the surrounding 3x3 block.
pub fn neighborhood(grid: &mut MoveGrid, from: Square, color: Color, board: &Board) {
    leap(grid, NEIGHBOR_TABLE.targets(from), color, board);
}

pub fn knight(grid: &mut MoveGrid, from: Square, color: Color, board: &Board) {
    leap(grid, KNIGHT_TABLE.targets(from), color, board);
}

/// Up to three squares in each orthogonal direction. Each square is judged
/// on its own; nearer pieces do not block farther squares.
pub fn restricted_teleportation(grid: &mut MoveGrid, from: Square, color: Color, board: &Board) {
    let targets: Bitboard = ORTHOGONAL
        .iter()
        .flat_map(|&(dr, dc)| (1..=3).filter_map(move |dist| from.offset(dr * dist, dc * dist)))
        .collect();
    leap(grid, targets, color, board);
}

/// Every empty square on the board. Never captures.
pub fn teleportation(grid: &mut MoveGrid, board: &Board) {
    for sq in Square::all() {
        if board.occupant(sq).is_empty() {
            grid.set(sq, Marker::Move);
        }
    }
}

/// Captures without moving, two rows ahead: straight on and two columns to
/// either side.
pub fn range_capture(grid: &mut MoveGrid, from: Square, color: Color, board: &Board) {
    let rows = 2 * color.forward();
    for &cols in [-2, 0, 2].iter() {
        if let Some(sq) = from.offset(rows, cols) {
            if board.occupant(sq).is_enemy(color) {
                grid.set(sq, Marker::Capture);
            }
        }
    }
}
