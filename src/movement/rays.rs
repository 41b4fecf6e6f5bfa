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
use crate::types::{Color, Square};

pub const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Iterates the squares along a ray, not including the starting square.
fn ray(from: Square, (dr, dc): (i32, i32)) -> impl Iterator<Item = Square> {
    let mut cursor = Some(from);
    std::iter::from_fn(move || {
        cursor = cursor.and_then(|sq| sq.offset(dr, dc));
        cursor
    })
}

/// Slides along each direction until the first occupied square. An enemy on
/// that square is marked `MoveAndCapture` only if `captures` is set; an ally
/// is never marked.
pub fn slide(
    grid: &mut MoveGrid,
    from: Square,
    color: Color,
    board: &Board,
    directions: &[(i32, i32)],
    captures: bool,
) {
    for &dir in directions {
        for sq in ray(from, dir) {
            let occupant = board.occupant(sq);
            if occupant.is_empty() {
                grid.set(sq, Marker::Move);
                continue;
            }

            if captures && occupant.is_enemy(color) {
                grid.set(sq, Marker::MoveAndCapture);
            }

            break;
        }
    }
}

/// Cannon-style capture: along each orthogonal ray the first piece is the
/// screen, and the first piece past the screen may be captured.
pub fn hop_capture(grid: &mut MoveGrid, from: Square, color: Color, board: &Board) {
    for &dir in ORTHOGONAL.iter() {
        let mut beyond_screen = ray(from, dir).skip_while(|&sq| board.occupant(sq).is_empty());

        // the screen itself
        if beyond_screen.next().is_none() {
            continue;
        }

        let target = beyond_screen.find(|&sq| !board.occupant(sq).is_empty());
        if let Some(sq) = target {
            if board.occupant(sq).is_enemy(color) {
                grid.set(sq, Marker::MoveAndCapture);
            }
        }
    }
}
