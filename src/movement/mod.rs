// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Movement strategies. Every movement is a pure function from a piece's
//! square, color and move history, plus the board, to a full-board grid of
//! outcome markers for that single pattern. A piece combines the grids of
//! all of its active movements into its potential moves.
//!
//! The generators are split by shape:
//!   * `rays` for sliding movements that stop at the first blocker,
//!   * `steps` for fixed-offset and whole-board movements,
//!   * `pawn` for the forward-only pawn movements,
//!   * `castle` for castling, which reads the king's check state.
mod castle;
mod pawn;
mod rays;
mod steps;

use std::fmt;

use crate::board::Board;
use crate::grid::{MoveGrid, Occupant};
use crate::marker::Marker;
use crate::types::{Color, Square};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Movement {
    Advance,
    LeftRightCapture,
    DoubleStep,
    EnPassant,
    Diagonal,
    Orthogonal,
    Square,
    LShape,
    HopCapture,
    RangeCapture,
    OrthogonalNonCapture,
    RestrictedTeleportation,
    Teleportation,
    Castle,
}

pub static MOVEMENTS: [Movement; 14] = [
    Movement::Advance,
    Movement::LeftRightCapture,
    Movement::DoubleStep,
    Movement::EnPassant,
    Movement::Diagonal,
    Movement::Orthogonal,
    Movement::Square,
    Movement::LShape,
    Movement::HopCapture,
    Movement::RangeCapture,
    Movement::OrthogonalNonCapture,
    Movement::RestrictedTeleportation,
    Movement::Teleportation,
    Movement::Castle,
];

impl Movement {
    pub fn name(self) -> &'static str {
        match self {
            Movement::Advance => "Advance",
            Movement::LeftRightCapture => "Left Right Capture",
            Movement::DoubleStep => "Double Step",
            Movement::EnPassant => "En Passant",
            Movement::Diagonal => "Diagonal",
            Movement::Orthogonal => "Orthogonal",
            Movement::Square => "Square",
            Movement::LShape => "L Movement",
            Movement::HopCapture => "Hop Capture",
            Movement::RangeCapture => "Range Capture",
            Movement::OrthogonalNonCapture => "Orthogonal Non Capture",
            Movement::RestrictedTeleportation => "Restricted Teleportation",
            Movement::Teleportation => "Teleportation",
            Movement::Castle => "Castle",
        }
    }

    /// Price multiplier of the movement, applied to a piece's worth when the
    /// movement is bought as an upgrade.
    pub fn cost(self) -> u32 {
        match self {
            Movement::Advance => 100,
            Movement::LeftRightCapture => 200,
            Movement::Square | Movement::RangeCapture => 300,
            Movement::Diagonal | Movement::Orthogonal | Movement::LShape => 500,
            Movement::HopCapture => 800,
            Movement::RestrictedTeleportation => 1200,
            Movement::Teleportation => 1500,
            Movement::DoubleStep
            | Movement::EnPassant
            | Movement::OrthogonalNonCapture
            | Movement::Castle => 0,
        }
    }

    /// Whether this movement contributes to its color's control grid.
    /// Castling never attacks anything, and evaluating it requires the
    /// control grids to already exist.
    pub fn projects_control(self) -> bool {
        self != Movement::Castle
    }

    /// Computes the outcome grid of this movement for a piece of `color`
    /// standing on `from`. The piece's own square is always `Current`.
    pub fn generate(self, from: Square, color: Color, has_moved: bool, board: &Board) -> MoveGrid {
        let mut grid = MoveGrid::new();
        match self {
            Movement::Advance => pawn::advance(&mut grid, from, color, board),
            Movement::LeftRightCapture => pawn::left_right_capture(&mut grid, from, color, board),
            Movement::DoubleStep => pawn::double_step(&mut grid, from, color, has_moved, board),
            Movement::EnPassant => pawn::en_passant(&mut grid, from, color, board),
            Movement::Diagonal => rays::slide(&mut grid, from, color, board, &rays::DIAGONAL, true),
            Movement::Orthogonal => {
                rays::slide(&mut grid, from, color, board, &rays::ORTHOGONAL, true)
            }
            Movement::OrthogonalNonCapture => {
                rays::slide(&mut grid, from, color, board, &rays::ORTHOGONAL, false)
            }
            Movement::HopCapture => rays::hop_capture(&mut grid, from, color, board),
            Movement::Square => steps::neighborhood(&mut grid, from, color, board),
            Movement::LShape => steps::knight(&mut grid, from, color, board),
            Movement::RangeCapture => steps::range_capture(&mut grid, from, color, board),
            Movement::RestrictedTeleportation => {
                steps::restricted_teleportation(&mut grid, from, color, board)
            }
            Movement::Teleportation => steps::teleportation(&mut grid, board),
            Movement::Castle => castle::castle(&mut grid, from, color, has_moved, board),
        }

        grid.set(from, Marker::Current);
        grid
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The marker a landing on an occupied-or-empty square earns for the
/// common "move to empty, capture enemy, blocked by ally" rule.
fn landing(occupant: Occupant, color: Color) -> Marker {
    match occupant {
        Occupant::Empty => Marker::Move,
        _ if occupant.is_enemy(color) => Marker::MoveAndCapture,
        _ => Marker::Empty,
    }
}
