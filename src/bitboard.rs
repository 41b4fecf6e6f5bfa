// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Definitions of the `Bitboard` type, which is conceptually a set of
//! squares on the board. The board has 90 squares, so a bitboard is a
//! single 128-bit integer with the top 38 bits always clear.
//!
//! Bitboards are used to summarize move grids ("which squares can this
//! piece reach?") and to precompute step tables.
use std::default::Default;
use std::fmt;
use std::iter::Iterator;

use crate::types::Square;

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Bitboard {
    bits: u128,
}

impl Default for Bitboard {
    fn default() -> Bitboard {
        Bitboard::none()
    }
}

impl Bitboard {
    /// Constructs a new bitboard with all bits zeroed, representing
    /// the empty set.
    pub const fn none() -> Bitboard {
        Bitboard { bits: 0 }
    }

    pub const fn test(self, square: Square) -> bool {
        (self.bits & (1u128 << square.index())) != 0
    }

    pub fn set(&mut self, square: Square) {
        self.bits |= 1u128 << square.index();
    }

    /// Produces an iterator over the squares contained in this bitboard,
    /// in row-major order.
    pub fn iter(self) -> BitboardIterator {
        BitboardIterator::new(self.bits)
    }

    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Bitboard").field(&self.bits).finish()
    }
}

/// BitboardIterator is an iterator over squares that are set in a
/// given bitboard.
pub struct BitboardIterator {
    bits: u128,
}

impl BitboardIterator {
    fn new(bits: u128) -> BitboardIterator {
        BitboardIterator { bits }
    }
}

impl Iterator for BitboardIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.bits == 0 {
            return None;
        }

        let next = self.bits.trailing_zeros();
        self.bits &= self.bits - 1;
        Square::from_index(next as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.bits.count_ones() as usize;
        (count, Some(count))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIterator;

    fn into_iter(self) -> BitboardIterator {
        self.iter()
    }
}

impl std::iter::FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Bitboard {
        let mut board = Bitboard::none();
        for sq in iter {
            board.set(sq);
        }

        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test() {
        let mut board = Bitboard::default();
        assert!(!board.test(Square::of(0, 0)));

        board.set(Square::of(0, 0));
        assert!(board.test(Square::of(0, 0)));
    }

    #[test]
    fn last_square_fits() {
        let mut board = Bitboard::none();
        board.set(Square::of(9, 8));
        assert!(board.test(Square::of(9, 8)));
        assert_eq!(1, board.count());
        assert_eq!(Some(Square::of(9, 8)), board.iter().next());
    }

    #[test]
    fn enumerating_is_row_major() {
        let mut one = Bitboard::default();
        one.set(Square::of(4, 7));
        one.set(Square::of(2, 3));
        one.set(Square::of(2, 1));

        let squares: Vec<_> = one.iter().collect();
        assert_eq!(
            vec![Square::of(2, 1), Square::of(2, 3), Square::of(4, 7)],
            squares
        );
    }

    #[test]
    fn collects_squares() {
        let board: Bitboard = Square::all().filter(|sq| sq.row() == 7).collect();
        assert_eq!(9, board.count());
        assert!(board.iter().all(|sq| sq.row() == 7));
        assert_eq!((9, Some(9)), board.iter().size_hint());
    }
}
