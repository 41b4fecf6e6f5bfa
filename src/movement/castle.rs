// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::board::Board;
use crate::grid::MoveGrid;
use crate::marker::Marker;
use crate::types::{Color, PieceKind, Square, COLS};

/// Column the king starts on.
pub const KING_COLUMN: usize = 4;

/// Corner rook column and the columns that must be empty to castle with it.
const SIDES: [(usize, [usize; 3]); 2] = [(0, [1, 2, 3]), (COLS - 1, [5, 6, 7])];

/// Marks the square of each rook the king can castle with. The `Castle`
/// marker lives on the rook's square, which is how the move is located
/// when it is executed.
pub fn castle(grid: &mut MoveGrid, from: Square, color: Color, has_moved: bool, board: &Board) {
    let home = color.home_row();
    if has_moved || from != Square::of(home, KING_COLUMN) || board.is_in_check(color) {
        return;
    }

    for &(rook_col, path) in SIDES.iter() {
        let clear = path
            .iter()
            .all(|&col| board.occupant(Square::of(home, col)).is_empty());
        if !clear {
            continue;
        }

        let rook_sq = Square::of(home, rook_col);
        let rook_ready = board.piece_at(rook_sq).map_or(false, |(id, piece)| {
            id.color == color && piece.kind == PieceKind::Rook && !piece.has_moved
        });
        if rook_ready {
            grid.set(rook_sq, Marker::Castle);
        }
    }
}
