// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rules engine for a 10x9 chess variant with upgradable movements and
//! board-altering items. The engine computes every piece's potential and
//! legal moves, executes moves, detects check, checkmate and stalemate, and
//! validates board-wide effects against the check rule.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod army;
mod bitboard;
mod board;
mod effect;
mod grid;
pub mod items;
mod marker;
pub mod movement;
mod moves;
mod piece;
mod types;

pub use army::{starting_army, Armies, Army};
pub use bitboard::{Bitboard, BitboardIterator};
pub use board::{Board, GameStatus, LayoutParseError};
pub use effect::{EffectOutcome, RANDOM_EFFECT_ATTEMPTS};
pub use grid::{Grid, MoveGrid, OccupancyGrid, Occupant};
pub use items::Item;
pub use marker::Marker;
pub use movement::Movement;
pub use moves::{apply_move, capture_square, MoveReport};
pub use piece::{MovementList, Piece};
pub use types::{
    Color, KindSet, PieceId, PieceKind, Square, TableIndex, COLORS, COLS, PIECE_KINDS,
    PROMOTION_KINDS, ROWS, SQUARE_COUNT,
};
