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
use crate::types::{Color, PieceKind, Square};

pub fn advance(grid: &mut MoveGrid, from: Square, color: Color, board: &Board) {
    if let Some(sq) = from.offset(color.forward(), 0) {
        if board.occupant(sq).is_empty() {
            grid.set(sq, Marker::Move);
        }
    }
}

/// Diagonal captures. An empty diagonal is not a destination.
pub fn left_right_capture(grid: &mut MoveGrid, from: Square, color: Color, board: &Board) {
    for &cols in [-1, 1].iter() {
        if let Some(sq) = from.offset(color.forward(), cols) {
            if board.occupant(sq).is_enemy(color) {
                grid.set(sq, Marker::MoveAndCapture);
            }
        }
    }
}

pub fn double_step(grid: &mut MoveGrid, from: Square, color: Color, has_moved: bool, board: &Board) {
    if has_moved {
        return;
    }

    let forward = color.forward();
    let path = from
        .offset(forward, 0)
        .and_then(|mid| from.offset(2 * forward, 0).map(|dest| (mid, dest)));
    if let Some((mid, dest)) = path {
        if board.occupant(mid).is_empty() && board.occupant(dest).is_empty() {
            grid.set(dest, Marker::DoubleStep);
        }
    }
}

/// Captures an enemy pawn that double-stepped to a square beside this one
/// on its previous turn, by moving to the square behind it.
pub fn en_passant(grid: &mut MoveGrid, from: Square, color: Color, board: &Board) {
    for &cols in [-1, 1].iter() {
        let beside = match from.offset(0, cols) {
            Some(sq) => sq,
            None => continue,
        };

        let vulnerable = board.piece_at(beside).map_or(false, |(id, piece)| {
            id.color != color && piece.kind == PieceKind::Pawn && piece.moved_two_units_up
        });
        if !vulnerable {
            continue;
        }

        if let Some(behind) = from.offset(color.forward(), cols) {
            if board.occupant(behind).is_empty() {
                grid.set(behind, Marker::EnPassant);
            }
        }
    }
}
