// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::army::Army;
use crate::marker::Marker;
use crate::types::{Color, PieceId, PieceKind, Square};

/// What an executed move did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub piece: PieceId,
    pub kind: PieceKind,
    pub from: Square,
    pub to: Square,
    pub marker: Marker,
    pub captured: Option<PieceKind>,
}

impl fmt::Display for MoveReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let color = self.piece.color;
        match self.marker {
            Marker::Castle => write!(f, "{} {} castles with the rook at {}", color, self.kind, self.to)?,
            Marker::Capture => write!(f, "{} {} at {} fires on {}", color, self.kind, self.from, self.to)?,
            _ => write!(f, "{} {} moves from {} to {}", color, self.kind, self.from, self.to)?,
        }

        if let Some(captured) = self.captured {
            write!(f, ", capturing a {}", captured)?;
        }

        Ok(())
    }
}

/// The square whose occupant a move with `marker` to `dest` captures, if any.
pub fn capture_square(color: Color, dest: Square, marker: Marker) -> Option<Square> {
    match marker {
        Marker::Capture | Marker::MoveAndCapture => Some(dest),
        Marker::EnPassant => dest.offset(-color.forward(), 0),
        _ => None,
    }
}

/// Applies a move of `allies[index]` to `dest` as described by `marker`.
/// Returns false, leaving both armies untouched, if nothing was moved.
pub fn apply_move(
    index: usize,
    dest: Square,
    marker: Marker,
    allies: &mut Army,
    enemies: &mut Army,
) -> bool {
    let (from, color) = match allies.get(index) {
        Some(piece) => match piece.square {
            Some(sq) => (sq, piece.color),
            None => return false,
        },
        None => return false,
    };

    match marker {
        Marker::Move => {
            allies[index].relocate(dest);
        }
        Marker::MoveAndCapture => {
            enemies.capture_at(dest);
            allies[index].relocate(dest);
        }
        Marker::Capture => {
            if enemies.capture_at(dest).is_none() {
                return false;
            }
        }
        Marker::DoubleStep => {
            let piece = &mut allies[index];
            piece.relocate(dest);
            piece.moved_two_units_up = true;
        }
        Marker::EnPassant => {
            allies[index].relocate(dest);
            if let Some(sq) = capture_square(color, dest, marker) {
                enemies.capture_at(sq);
            }
        }
        Marker::Castle => return castle(index, from, dest, allies),
        Marker::Empty | Marker::Current => return false,
    }

    true
}

/// The king jumps three columns toward the rook and the rook two columns
/// toward the king's old square.
fn castle(king: usize, from: Square, rook_sq: Square, allies: &mut Army) -> bool {
    let rook = match allies.index_at(rook_sq) {
        Some(idx) if idx != king => idx,
        _ => return false,
    };

    let (king_cols, rook_cols) = if rook_sq.col() < from.col() {
        (-3, 2)
    } else {
        (3, -2)
    };

    let targets = from
        .offset(0, king_cols)
        .and_then(|k| rook_sq.offset(0, rook_cols).map(|r| (k, r)));
    match targets {
        Some((king_dest, rook_dest)) => {
            allies[king].relocate(king_dest);
            allies[rook].relocate(rook_dest);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::army::starting_army;
    use crate::piece::Piece;

    #[test]
    fn en_passant_captures_behind() {
        assert_eq!(
            Some(Square::of(3, 2)),
            capture_square(Color::White, Square::of(2, 2), Marker::EnPassant)
        );
        assert_eq!(
            Some(Square::of(6, 2)),
            capture_square(Color::Black, Square::of(7, 2), Marker::EnPassant)
        );
        assert_eq!(None, capture_square(Color::White, Square::of(2, 2), Marker::Move));
    }

    #[test]
    fn capture_without_moving() {
        let mut allies = Army::new(Color::White);
        let archer = allies.push(Piece::new(PieceKind::Archer, Color::White, Square::of(6, 4)));
        let mut enemies = Army::new(Color::Black);
        enemies.push(Piece::new(PieceKind::Pawn, Color::Black, Square::of(4, 4)));

        assert!(apply_move(archer, Square::of(4, 4), Marker::Capture, &mut allies, &mut enemies));
        assert_eq!(Some(Square::of(6, 4)), allies[archer].square);
        assert!(!allies[archer].has_moved);
        assert!(enemies[0].is_captured());
    }

    #[test]
    fn capture_of_nothing_is_refused() {
        let mut allies = Army::new(Color::White);
        let archer = allies.push(Piece::new(PieceKind::Archer, Color::White, Square::of(6, 4)));
        let mut enemies = Army::new(Color::Black);

        assert!(!apply_move(archer, Square::of(4, 4), Marker::Capture, &mut allies, &mut enemies));
    }

    #[test]
    fn castle_both_sides() {
        let mut allies = starting_army(Color::White);
        let mut enemies = Army::new(Color::Black);
        let king = allies.index_at(Square::of(9, 4)).unwrap();

        assert!(apply_move(king, Square::of(9, 0), Marker::Castle, &mut allies, &mut enemies));
        assert_eq!(Some(Square::of(9, 1)), allies[king].square);
        assert_eq!(Some(Square::of(9, 2)), allies[18].square);
        assert!(allies[king].has_moved);
        assert!(allies[18].has_moved);

        let mut allies = starting_army(Color::Black);
        let king = allies.index_at(Square::of(0, 4)).unwrap();
        assert!(apply_move(king, Square::of(0, 8), Marker::Castle, &mut allies, &mut enemies));
        assert_eq!(Some(Square::of(0, 7)), allies[king].square);
        assert_eq!(Some(Square::of(0, 6)), allies[26].square);
    }

    #[test]
    fn empty_marker_is_not_a_move() {
        let mut allies = starting_army(Color::White);
        let mut enemies = starting_army(Color::Black);
        let before = allies.clone();
        assert!(!apply_move(0, Square::of(6, 0), Marker::Empty, &mut allies, &mut enemies));
        assert!(!apply_move(0, Square::of(7, 0), Marker::Current, &mut allies, &mut enemies));
        assert_eq!(before, allies);
    }

    #[test]
    fn report_message() {
        let report = MoveReport {
            piece: PieceId::new(Color::White, 3),
            kind: PieceKind::Pawn,
            from: Square::of(7, 3),
            to: Square::of(6, 4),
            marker: Marker::MoveAndCapture,
            captured: Some(PieceKind::Bishop),
        };
        assert_eq!(
            "White Pawn moves from (7, 3) to (6, 4), capturing a Bishop",
            report.to_string()
        );
    }
}
