// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Piece collections. An `Army` is an index-stable arena of one color's
//! pieces; captured pieces keep their slot. `Armies` holds both colors and
//! is the only source of truth a `Board` derives its grids from.
use std::ops::{Index, IndexMut};

use crate::piece::Piece;
use crate::types::{Color, PieceId, PieceKind, Square, COLS};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Army {
    color: Color,
    pieces: Vec<Piece>,
}

impl Army {
    pub fn new(color: Color) -> Army {
        Army {
            color,
            pieces: Vec::new(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Piece> {
        self.pieces.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Piece> {
        self.pieces.get_mut(idx)
    }

    /// Adds a piece, returning its index. The piece takes this army's color.
    pub fn push(&mut self, mut piece: Piece) -> usize {
        piece.color = self.color;
        self.pieces.push(piece);
        self.pieces.len() - 1
    }

    /// Removes every piece at or beyond `len`.
    pub fn truncate(&mut self, len: usize) {
        self.pieces.truncate(len);
    }

    /// Swaps the piece at `idx` for another, keeping its index.
    pub fn replace(&mut self, idx: usize, mut piece: Piece) -> Option<Piece> {
        let slot = self.pieces.get_mut(idx)?;
        piece.color = self.color;
        Some(std::mem::replace(slot, piece))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Piece> {
        self.pieces.iter_mut()
    }

    /// Live pieces with their indices.
    pub fn live(&self) -> impl Iterator<Item = (usize, &Piece)> {
        self.pieces.iter().enumerate().filter(|(_, p)| p.is_live())
    }

    /// Indices of live pieces of a given kind.
    pub fn live_of_kind(&self, kind: PieceKind) -> Vec<usize> {
        self.live()
            .filter(|(_, p)| p.kind == kind)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Index of the live piece standing on `square`.
    pub fn index_at(&self, square: Square) -> Option<usize> {
        self.live()
            .find(|(_, p)| p.square == Some(square))
            .map(|(idx, _)| idx)
    }

    /// Captures the live piece on `square`, returning its kind.
    pub fn capture_at(&mut self, square: Square) -> Option<PieceKind> {
        let idx = self.index_at(square)?;
        let piece = &mut self.pieces[idx];
        piece.capture();
        Some(piece.kind)
    }

    /// Squares of all live kings.
    pub fn kings(&self) -> impl Iterator<Item = Square> + '_ {
        self.live()
            .filter(|(_, p)| p.kind == PieceKind::King)
            .filter_map(|(_, p)| p.square)
    }

    pub fn material_worth(&self) -> u32 {
        self.live().map(|(_, p)| p.worth()).sum()
    }

    /// Forgets which pawns double-stepped last turn.
    pub fn clear_double_steps(&mut self) {
        for piece in self.pieces.iter_mut() {
            piece.moved_two_units_up = false;
        }
    }
}

impl Index<usize> for Army {
    type Output = Piece;

    fn index(&self, idx: usize) -> &Piece {
        &self.pieces[idx]
    }
}

impl IndexMut<usize> for Army {
    fn index_mut(&mut self, idx: usize) -> &mut Piece {
        &mut self.pieces[idx]
    }
}

/// Back-row and second-row piece order, by column.
const BACK_ROW: [PieceKind; COLS] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Wizard,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

const SECOND_ROW: [PieceKind; COLS] = [
    PieceKind::Archer,
    PieceKind::Cannon,
    PieceKind::Bishop,
    PieceKind::Ninja,
    PieceKind::Archer,
    PieceKind::Ninja,
    PieceKind::Bishop,
    PieceKind::Cannon,
    PieceKind::Archer,
];

/// The starting army of a color: pawns first, then the second row, then the
/// back row, each from column 0 to column 8.
pub fn starting_army(color: Color) -> Army {
    let home = color.home_row() as i32;
    let forward = color.forward();
    let second = (home + forward) as usize;
    let pawns = (home + 2 * forward) as usize;

    let mut army = Army::new(color);
    for col in 0..COLS {
        army.push(Piece::new(PieceKind::Pawn, color, Square::of(pawns, col)));
    }

    for (col, &kind) in SECOND_ROW.iter().enumerate() {
        army.push(Piece::new(kind, color, Square::of(second, col)));
    }

    for (col, &kind) in BACK_ROW.iter().enumerate() {
        army.push(Piece::new(kind, color, Square::of(home as usize, col)));
    }

    army
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armies {
    pub white: Army,
    pub black: Army,
}

impl Armies {
    pub fn new() -> Armies {
        Armies {
            white: Army::new(Color::White),
            black: Army::new(Color::Black),
        }
    }

    pub fn starting() -> Armies {
        Armies {
            white: starting_army(Color::White),
            black: starting_army(Color::Black),
        }
    }

    pub fn get(&self, color: Color) -> &Army {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    pub fn get_mut(&mut self, color: Color) -> &mut Army {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// Mutable access to both armies at once, `color`'s first.
    pub fn split_mut(&mut self, color: Color) -> (&mut Army, &mut Army) {
        match color {
            Color::White => (&mut self.white, &mut self.black),
            Color::Black => (&mut self.black, &mut self.white),
        }
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.get(id.color).get(id.index)
    }

    pub fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.get_mut(id.color).get_mut(id.index)
    }

    /// The live piece on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<(PieceId, &Piece)> {
        [Color::White, Color::Black].iter().find_map(|&color| {
            let army = self.get(color);
            army.index_at(square)
                .map(|idx| (PieceId::new(color, idx), &army[idx]))
        })
    }

    /// Live pieces of both colors with their ids.
    pub fn live(&self) -> impl Iterator<Item = (PieceId, &Piece)> {
        let white = self
            .white
            .live()
            .map(|(idx, p)| (PieceId::new(Color::White, idx), p));
        let black = self
            .black
            .live()
            .map(|(idx, p)| (PieceId::new(Color::Black, idx), p));
        white.chain(black)
    }
}

impl Default for Armies {
    fn default() -> Armies {
        Armies::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_white_layout() {
        let army = starting_army(Color::White);
        assert_eq!(27, army.len());
        assert_eq!(Some(Square::of(7, 0)), army[0].square);
        assert_eq!(PieceKind::Archer, army[9].kind);
        assert_eq!(Some(Square::of(8, 0)), army[9].square);
        assert_eq!(PieceKind::King, army[22].kind);
        assert_eq!(Some(Square::of(9, 4)), army[22].square);
        assert_eq!(vec![Square::of(9, 4)], army.kings().collect::<Vec<_>>());
    }

    #[test]
    fn starting_black_mirrors() {
        let army = starting_army(Color::Black);
        assert_eq!(Some(Square::of(2, 5)), army[5].square);
        assert_eq!(PieceKind::Cannon, army[10].kind);
        assert_eq!(Some(Square::of(1, 1)), army[10].square);
        assert_eq!(Some(Square::of(0, 3)), army[21].square);
        assert_eq!(PieceKind::Queen, army[21].kind);
    }

    #[test]
    fn starting_worth() {
        // 9 pawns, 3 archers, 2 cannons, 4 bishops, 2 ninjas, 2 rooks,
        // 2 knights, queen, king, wizard
        let expected = 9 + 3 * 3 + 2 * 5 + 4 * 3 + 2 * 7 + 2 * 5 + 2 * 3 + 9 + 10 + 9;
        assert_eq!(expected, starting_army(Color::White).material_worth());
    }

    #[test]
    fn capture_keeps_index() {
        let mut army = starting_army(Color::Black);
        assert_eq!(Some(PieceKind::Pawn), army.capture_at(Square::of(2, 3)));
        assert_eq!(27, army.len());
        assert!(army[3].is_captured());
        assert_eq!(None, army.index_at(Square::of(2, 3)));
        assert_eq!(None, army.capture_at(Square::of(2, 3)));
        assert_eq!(26, army.live().count());
    }

    #[test]
    fn piece_at_finds_either_color() {
        let armies = Armies::starting();
        let (id, piece) = armies.piece_at(Square::of(0, 4)).unwrap();
        assert_eq!(Color::Black, id.color);
        assert_eq!(PieceKind::King, piece.kind);
        assert!(armies.piece_at(Square::of(5, 4)).is_none());
    }

    #[test]
    fn off_board_square_is_refused() {
        let mut value = serde_json::to_value(&Armies::starting()).unwrap();
        assert_eq!(
            Armies::starting(),
            serde_json::from_value::<Armies>(value.clone()).unwrap()
        );

        value["white"]["pieces"][0]["square"] = serde_json::Value::from(200);
        assert!(serde_json::from_value::<Armies>(value).is_err());
    }
}
