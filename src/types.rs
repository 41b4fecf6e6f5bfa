// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::{FromPrimitive, ToPrimitive};
use std::convert::TryFrom;
use std::fmt::{self, Display, Write};

use crate::movement::Movement;

/// Number of rows on the board. Row 0 is Black's back row.
pub const ROWS: usize = 10;

/// Number of columns on the board.
pub const COLS: usize = 9;

/// Total number of squares on the board.
pub const SQUARE_COUNT: usize = ROWS * COLS;

// TableIndex is a trait for all types that can serve as an index into a table.
// It is common to use these types as indices into tables, so this trait allows
// any type implementing To and FromPrimitive to be used as table indices.
pub trait TableIndex {
    fn as_index(self) -> usize;
    fn from_index(idx: usize) -> Self;
}

impl<T> TableIndex for T
where
    T: FromPrimitive + ToPrimitive,
{
    fn as_index(self) -> usize {
        self.to_u32().unwrap() as usize
    }

    fn from_index(idx: usize) -> T {
        <T as FromPrimitive>::from_u64(idx as u64).unwrap()
    }
}

/// A square on the 10x9 board, stored as `row * COLS + col`. Deserializing
/// an index past the last square is an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct Square(u8);

impl Square {
    /// Constructs a square from a row and column that are known to be on the board.
    pub fn of(row: usize, col: usize) -> Square {
        assert!(row < ROWS && col < COLS, "square ({}, {}) is off the board", row, col);
        Square((row * COLS + col) as u8)
    }

    /// Constructs a square from signed coordinates, returning `None` if the
    /// coordinates fall outside of the board.
    pub fn new(row: i32, col: i32) -> Option<Square> {
        if row < 0 || col < 0 || row >= ROWS as i32 || col >= COLS as i32 {
            return None;
        }

        Some(Square::of(row as usize, col as usize))
    }

    pub fn from_index(idx: usize) -> Option<Square> {
        if idx < SQUARE_COUNT {
            Some(Square(idx as u8))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn row(self) -> usize {
        self.index() / COLS
    }

    pub fn col(self) -> usize {
        self.index() % COLS
    }

    /// The square `rows` rows and `cols` columns away from this one, if it is
    /// still on the board.
    pub fn offset(self, rows: i32, cols: i32) -> Option<Square> {
        Square::new(self.row() as i32 + rows, self.col() as i32 + cols)
    }

    /// Iterates over every square of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SQUARE_COUNT).map(|idx| Square(idx as u8))
    }
}

impl TryFrom<u8> for Square {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Square::from_index(value as usize)
            .ok_or_else(|| format!("square index {} is off the board", value))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize, Deserialize,
)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a single step "forward". White starts at the bottom of the
    /// board and advances toward row 0.
    pub fn forward(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// The row on which this color's king and rooks start.
    pub fn home_row(self) -> usize {
        match self {
            Color::White => ROWS - 1,
            Color::Black => 0,
        }
    }

    /// The row on which this color's pawns are promoted.
    pub fn promotion_row(self) -> usize {
        self.toggle().home_row()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

impl TryFrom<&str> for Color {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Color::White),
            "black" | "b" => Ok(Color::Black),
            _ => Err(()),
        }
    }
}

pub static COLORS: [Color; 2] = [Color::White, Color::Black];

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize, Deserialize,
)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
    Archer,
    Cannon,
    Ninja,
    Wizard,
}

impl PieceKind {
    /// Material worth of the piece. Upgrade prices scale with it.
    pub fn worth(self) -> u32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Archer | PieceKind::Bishop | PieceKind::Knight => 3,
            PieceKind::Rook | PieceKind::Cannon => 5,
            PieceKind::Ninja => 7,
            PieceKind::Queen | PieceKind::Wizard => 9,
            PieceKind::King => 10,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Rook => "Rook",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
            PieceKind::Archer => "Archer",
            PieceKind::Cannon => "Cannon",
            PieceKind::Ninja => "Ninja",
            PieceKind::Wizard => "Wizard",
        }
    }

    /// Movements a freshly created piece of this kind has active.
    pub fn starting_movements(self) -> &'static [Movement] {
        match self {
            PieceKind::Pawn => &[
                Movement::Advance,
                Movement::LeftRightCapture,
                Movement::DoubleStep,
                Movement::EnPassant,
            ],
            PieceKind::Rook => &[Movement::Orthogonal],
            PieceKind::Knight => &[Movement::LShape],
            PieceKind::Bishop => &[Movement::Diagonal],
            PieceKind::Queen => &[Movement::Diagonal, Movement::Orthogonal],
            PieceKind::King => &[Movement::Square, Movement::Castle],
            PieceKind::Archer => &[Movement::Advance, Movement::RangeCapture],
            PieceKind::Cannon => &[Movement::HopCapture, Movement::OrthogonalNonCapture],
            PieceKind::Ninja => &[Movement::RestrictedTeleportation],
            PieceKind::Wizard => &[Movement::Square, Movement::Teleportation],
        }
    }

    /// Movements a freshly created piece of this kind may purchase.
    pub fn upgrades(self) -> &'static [Movement] {
        match self {
            PieceKind::Pawn => &[
                Movement::Square,
                Movement::Diagonal,
                Movement::Orthogonal,
                Movement::LShape,
                Movement::HopCapture,
                Movement::RangeCapture,
                Movement::Teleportation,
                Movement::RestrictedTeleportation,
            ],
            PieceKind::Rook => &[
                Movement::Square,
                Movement::Diagonal,
                Movement::LShape,
                Movement::HopCapture,
                Movement::RangeCapture,
                Movement::Teleportation,
                Movement::RestrictedTeleportation,
                Movement::LeftRightCapture,
            ],
            PieceKind::Knight => &[
                Movement::Square,
                Movement::Diagonal,
                Movement::Orthogonal,
                Movement::HopCapture,
                Movement::RangeCapture,
                Movement::Teleportation,
                Movement::RestrictedTeleportation,
                Movement::LeftRightCapture,
            ],
            PieceKind::Bishop => &[
                Movement::Square,
                Movement::Orthogonal,
                Movement::LShape,
                Movement::HopCapture,
                Movement::RangeCapture,
                Movement::Teleportation,
                Movement::RestrictedTeleportation,
            ],
            PieceKind::Queen => &[
                Movement::HopCapture,
                Movement::LShape,
                Movement::RangeCapture,
                Movement::RestrictedTeleportation,
                Movement::Teleportation,
            ],
            PieceKind::King => &[],
            PieceKind::Archer => &[
                Movement::Square,
                Movement::Diagonal,
                Movement::Orthogonal,
                Movement::LShape,
                Movement::HopCapture,
                Movement::Teleportation,
                Movement::RestrictedTeleportation,
                Movement::LeftRightCapture,
            ],
            PieceKind::Cannon => &[
                Movement::Square,
                Movement::Diagonal,
                Movement::Orthogonal,
                Movement::LShape,
                Movement::RangeCapture,
                Movement::Teleportation,
                Movement::RestrictedTeleportation,
                Movement::LeftRightCapture,
            ],
            PieceKind::Ninja => &[
                Movement::Square,
                Movement::Diagonal,
                Movement::Orthogonal,
                Movement::LShape,
                Movement::HopCapture,
                Movement::RangeCapture,
                Movement::Teleportation,
                Movement::LeftRightCapture,
            ],
            PieceKind::Wizard => &[Movement::HopCapture, Movement::RangeCapture],
        }
    }

    pub fn is_promotion_target(self) -> bool {
        PROMOTION_KINDS.contains(&self)
    }

    pub fn as_char(self, color: Color) -> char {
        let chr = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Knight => 'h',
            PieceKind::Bishop => 'b',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
            PieceKind::Archer => 'a',
            PieceKind::Cannon => 'c',
            PieceKind::Ninja => 'n',
            PieceKind::Wizard => 'w',
        };

        match color {
            Color::White => chr.to_ascii_uppercase(),
            Color::Black => chr,
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<char> for PieceKind {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let res = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'r' => PieceKind::Rook,
            'h' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            'a' => PieceKind::Archer,
            'c' => PieceKind::Cannon,
            'n' => PieceKind::Ninja,
            'w' => PieceKind::Wizard,
            _ => return Err(()),
        };
        Ok(res)
    }
}

pub static PIECE_KINDS: [PieceKind; 10] = [
    PieceKind::Pawn,
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Archer,
    PieceKind::Cannon,
    PieceKind::Ninja,
    PieceKind::Wizard,
];

/// Kinds a pawn may be promoted to, in the order the promotion menu lists them.
pub static PROMOTION_KINDS: [PieceKind; 7] = [
    PieceKind::Queen,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
    PieceKind::Cannon,
    PieceKind::Ninja,
    PieceKind::Wizard,
];

bitflags! {
    #[derive(Default)]
    pub struct KindSet: u16 {
        const PAWN = 1 << 0;
        const ROOK = 1 << 1;
        const KNIGHT = 1 << 2;
        const BISHOP = 1 << 3;
        const QUEEN = 1 << 4;
        const KING = 1 << 5;
        const ARCHER = 1 << 6;
        const CANNON = 1 << 7;
        const NINJA = 1 << 8;
        const WIZARD = 1 << 9;
        const UNIQUE = Self::ARCHER.bits | Self::CANNON.bits | Self::NINJA.bits | Self::WIZARD.bits;
    }
}

impl KindSet {
    pub fn has(self, kind: PieceKind) -> bool {
        self.contains(KindSet::from(kind))
    }
}

impl From<PieceKind> for KindSet {
    fn from(kind: PieceKind) -> KindSet {
        KindSet::from_bits_truncate(1 << kind.as_index())
    }
}

/// Handle to a piece: its color and its index within that color's army.
/// Indices are stable across moves and captures.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceId {
    pub color: Color,
    pub index: usize,
}

impl PieceId {
    pub fn new(color: Color, index: usize) -> PieceId {
        PieceId { color, index }
    }
}

impl Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.color)?;
        f.write_char('#')?;
        write!(f, "{}", self.index)
    }
}
