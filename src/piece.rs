// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use arrayvec::ArrayVec;
use std::fmt;

use crate::board::Board;
use crate::grid::MoveGrid;
use crate::marker::Marker;
use crate::movement::Movement;
use crate::types::{Color, PieceKind, Square};

/// Enough room for every movement a piece could ever own at once.
pub type MovementList = ArrayVec<[Movement; 16]>;

/// A single piece. Captured pieces stay in their army with no square so that
/// piece indices remain stable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Option<Square>,
    pub has_moved: bool,
    /// Set for a pawn that advanced two squares on its owner's last turn.
    pub moved_two_units_up: bool,
    pub movements: MovementList,
    pub upgrades: MovementList,
}

impl Piece {
    /// A never-moved piece with its kind's starting movements and upgrades.
    pub fn new(kind: PieceKind, color: Color, square: Square) -> Piece {
        Piece {
            kind,
            color,
            square: Some(square),
            has_moved: false,
            moved_two_units_up: false,
            movements: kind.starting_movements().iter().cloned().collect(),
            upgrades: kind.upgrades().iter().cloned().collect(),
        }
    }

    /// A fresh piece of another kind standing where this one stands.
    pub fn promoted(&self, kind: PieceKind) -> Option<Piece> {
        self.square.map(|sq| Piece::new(kind, self.color, sq))
    }

    pub fn is_live(&self) -> bool {
        self.square.is_some()
    }

    pub fn is_captured(&self) -> bool {
        self.square.is_none()
    }

    pub fn worth(&self) -> u32 {
        self.kind.worth()
    }

    /// Moves the piece and records that it has moved.
    pub fn relocate(&mut self, square: Square) {
        self.square = Some(square);
        self.has_moved = true;
    }

    /// Puts the piece on a square without touching its move history.
    pub fn place(&mut self, square: Square) {
        self.square = Some(square);
    }

    pub fn capture(&mut self) {
        self.square = None;
        self.moved_two_units_up = false;
    }

    /// Price of the `idx`-th available upgrade.
    pub fn upgrade_price(&self, idx: usize) -> Option<u32> {
        self.upgrades
            .get(idx)
            .map(|movement| movement.cost() * self.worth())
    }

    /// Activates the `idx`-th available upgrade, returning it.
    pub fn upgrade(&mut self, idx: usize) -> Option<Movement> {
        if idx >= self.upgrades.len() || self.movements.is_full() {
            return None;
        }

        let movement = self.upgrades.remove(idx);
        self.movements.push(movement);
        Some(movement)
    }

    /// Every square this piece's active movements reach, before the check
    /// filter. Captured pieces reach nothing.
    pub fn potential_moves(&self, board: &Board) -> MoveGrid {
        self.aggregate(board, |_| true)
    }

    /// This piece's contribution to its color's control grid.
    pub fn control(&self, board: &Board) -> MoveGrid {
        let mut grid = self.aggregate(board, Movement::projects_control);
        for sq in Square::all() {
            grid[sq] = grid[sq].as_control();
        }

        grid
    }

    fn aggregate<F>(&self, board: &Board, include: F) -> MoveGrid
    where
        F: Fn(Movement) -> bool,
    {
        let mut grid = MoveGrid::new();
        let square = match self.square {
            Some(sq) => sq,
            None => return grid,
        };

        for &movement in self.movements.iter().filter(|&&m| include(m)) {
            grid.merge(&movement.generate(square, self.color, self.has_moved, board));
        }

        grid.set(square, Marker::Current);
        grid
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)?;
        match self.square {
            Some(sq) => write!(f, " at {}", sq),
            None => write!(f, " (captured)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_piece_has_starting_kit() {
        let pawn = Piece::new(PieceKind::Pawn, Color::White, Square::of(7, 0));
        assert_eq!(4, pawn.movements.len());
        assert_eq!(8, pawn.upgrades.len());
        assert!(!pawn.has_moved);
        assert!(pawn.is_live());
    }

    #[test]
    fn upgrade_moves_between_lists() {
        let mut bishop = Piece::new(PieceKind::Bishop, Color::Black, Square::of(0, 2));
        assert_eq!(Some(300 * 3), bishop.upgrade_price(0));
        assert_eq!(Some(Movement::Square), bishop.upgrade(0));
        assert_eq!(
            &[Movement::Diagonal, Movement::Square][..],
            &bishop.movements[..]
        );
        assert!(!bishop.upgrades.contains(&Movement::Square));
        assert_eq!(None, bishop.upgrade(42));
        assert_eq!(None, bishop.upgrade_price(42));
    }

    #[test]
    fn capture_clears_square() {
        let mut pawn = Piece::new(PieceKind::Pawn, Color::White, Square::of(7, 0));
        pawn.moved_two_units_up = true;
        pawn.capture();
        assert!(pawn.is_captured());
        assert!(!pawn.moved_two_units_up);
        assert_eq!(None, pawn.promoted(PieceKind::Queen));
    }

    #[test]
    fn relocate_versus_place() {
        let mut rook = Piece::new(PieceKind::Rook, Color::White, Square::of(9, 0));
        rook.place(Square::of(5, 0));
        assert!(!rook.has_moved);
        rook.relocate(Square::of(4, 0));
        assert!(rook.has_moved);
        assert_eq!(Some(Square::of(4, 0)), rook.square);
    }
}
