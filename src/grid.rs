// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Full-board grids. A `MoveGrid` is the result of a move computation; an
//! occupancy grid records who stands where.
use std::fmt::{self, Write};
use std::ops::{Index, IndexMut};

use crate::bitboard::Bitboard;
use crate::marker::Marker;
use crate::types::{Color, Square, COLS, ROWS};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    cells: [[T; COLS]; ROWS],
}

impl<T: Copy + Default> Default for Grid<T> {
    fn default() -> Grid<T> {
        Grid {
            cells: [[T::default(); COLS]; ROWS],
        }
    }
}

impl<T: Copy + Default> Grid<T> {
    pub fn new() -> Grid<T> {
        Default::default()
    }
}

impl<T: Copy> Grid<T> {
    pub fn get(&self, square: Square) -> T {
        self.cells[square.row()][square.col()]
    }

    pub fn set(&mut self, square: Square, value: T) {
        self.cells[square.row()][square.col()] = value;
    }

    /// All cells with their squares, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, T)> + '_ {
        Square::all().map(move |sq| (sq, self.get(sq)))
    }
}

impl<T> Index<Square> for Grid<T> {
    type Output = T;

    fn index(&self, square: Square) -> &T {
        &self.cells[square.row()][square.col()]
    }
}

impl<T> IndexMut<Square> for Grid<T> {
    fn index_mut(&mut self, square: Square) -> &mut T {
        &mut self.cells[square.row()][square.col()]
    }
}

pub type MoveGrid = Grid<Marker>;

impl Grid<Marker> {
    /// Folds another grid into this one, square by square, keeping the
    /// higher-precedence marker.
    pub fn merge(&mut self, other: &MoveGrid) {
        for (sq, marker) in other.iter() {
            self[sq] = self[sq].merge(marker);
        }
    }

    /// Squares a piece can be sent to.
    pub fn destinations(&self) -> Bitboard {
        self.iter()
            .filter(|&(_, marker)| marker.is_destination())
            .map(|(sq, _)| sq)
            .collect()
    }

    pub fn count(&self) -> usize {
        self.destinations().count() as usize
    }
}

impl fmt::Display for Grid<Marker> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..COLS {
            write!(f, " {}", col)?;
        }

        writeln!(f)?;
        for row in 0..ROWS {
            write!(f, "{} ", row)?;
            for col in 0..COLS {
                f.write_char(' ')?;
                f.write_char(self.cells[row][col].as_char())?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

/// Occupancy of a single square. Kings are recorded apart from the rest of
/// their army.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Occupant {
    Empty,
    Piece(Color),
    King(Color),
}

impl Default for Occupant {
    fn default() -> Occupant {
        Occupant::Empty
    }
}

impl Occupant {
    pub fn color(self) -> Option<Color> {
        match self {
            Occupant::Empty => None,
            Occupant::Piece(color) | Occupant::King(color) => Some(color),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Occupant::Empty
    }

    pub fn is_ally(self, color: Color) -> bool {
        self.color() == Some(color)
    }

    pub fn is_enemy(self, color: Color) -> bool {
        self.color() == Some(color.toggle())
    }
}

pub type OccupancyGrid = Grid<Occupant>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_precedence() {
        let mut one = MoveGrid::new();
        let mut two = MoveGrid::new();
        let sq = Square::of(4, 4);
        one.set(sq, Marker::Move);
        two.set(sq, Marker::MoveAndCapture);
        two.set(Square::of(0, 0), Marker::Capture);

        one.merge(&two);
        assert_eq!(Marker::MoveAndCapture, one[sq]);
        assert_eq!(Marker::Capture, one[Square::of(0, 0)]);

        two.merge(&one);
        assert_eq!(Marker::MoveAndCapture, two[sq]);
    }

    #[test]
    fn destinations_skip_current() {
        let mut grid = MoveGrid::new();
        grid.set(Square::of(5, 5), Marker::Current);
        grid.set(Square::of(4, 5), Marker::Move);
        grid.set(Square::of(3, 5), Marker::Capture);

        assert_eq!(2, grid.count());
        assert!(grid.destinations().test(Square::of(3, 5)));
        assert!(!grid.destinations().test(Square::of(5, 5)));
    }

    #[test]
    fn occupant_sides() {
        let king = Occupant::King(Color::Black);
        assert!(king.is_ally(Color::Black));
        assert!(king.is_enemy(Color::White));
        assert!(!Occupant::Empty.is_ally(Color::White));
        assert!(!Occupant::Empty.is_enemy(Color::White));
    }
}
