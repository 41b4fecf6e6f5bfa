// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Outcome markers: the per-square vocabulary of a move grid.
use std::fmt::{self, Write};

/// What a piece can do on a given square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    Empty,
    Move,
    Capture,
    MoveAndCapture,
    EnPassant,
    DoubleStep,
    Castle,
    /// The square the piece itself stands on.
    Current,
}

impl Default for Marker {
    fn default() -> Marker {
        Marker::Empty
    }
}

impl Marker {
    /// Rank used when several movements mark the same square. `Current`
    /// ranks with `Empty`; it is always written last, over everything else.
    pub fn precedence(self) -> u8 {
        match self {
            Marker::Empty | Marker::Current => 0,
            Marker::Move => 1,
            Marker::Capture => 2,
            Marker::MoveAndCapture => 3,
            Marker::EnPassant => 4,
            Marker::DoubleStep => 5,
            Marker::Castle => 6,
        }
    }

    /// The stronger of the two markers.
    pub fn merge(self, other: Marker) -> Marker {
        if other.precedence() > self.precedence() {
            other
        } else {
            self
        }
    }

    /// Whether a piece can be sent to this square.
    pub fn is_destination(self) -> bool {
        match self {
            Marker::Empty | Marker::Current => false,
            _ => true,
        }
    }

    /// Whether this marker takes the piece standing on the destination.
    pub fn is_capture(self) -> bool {
        match self {
            Marker::Capture | Marker::MoveAndCapture => true,
            _ => false,
        }
    }

    /// Whether this marker relocates the moving piece.
    pub fn relocates(self) -> bool {
        match self {
            Marker::Move
            | Marker::MoveAndCapture
            | Marker::EnPassant
            | Marker::DoubleStep
            | Marker::Castle => true,
            _ => false,
        }
    }

    /// The marker as it contributes to a control grid. Only plain moves and
    /// captures project control over a square.
    pub fn as_control(self) -> Marker {
        match self {
            Marker::Move | Marker::Capture | Marker::MoveAndCapture => self,
            _ => Marker::Empty,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Marker::Empty => '.',
            Marker::Move => 'O',
            Marker::Capture => 'x',
            Marker::MoveAndCapture => 'X',
            Marker::EnPassant => 'E',
            Marker::DoubleStep => 'T',
            Marker::Castle => 'C',
            Marker::Current => '@',
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_order() {
        let ordered = [
            Marker::Empty,
            Marker::Move,
            Marker::Capture,
            Marker::MoveAndCapture,
            Marker::EnPassant,
            Marker::DoubleStep,
            Marker::Castle,
        ];

        for window in ordered.windows(2) {
            assert!(window[0].precedence() < window[1].precedence());
            assert_eq!(window[1], window[0].merge(window[1]));
            assert_eq!(window[1], window[1].merge(window[0]));
        }
    }

    #[test]
    fn current_never_wins_a_merge() {
        assert_eq!(Marker::Move, Marker::Current.merge(Marker::Move));
        assert_eq!(Marker::Empty, Marker::Empty.merge(Marker::Current));
    }

    #[test]
    fn control_projection() {
        assert_eq!(Marker::Move, Marker::Move.as_control());
        assert_eq!(Marker::Capture, Marker::Capture.as_control());
        assert_eq!(Marker::MoveAndCapture, Marker::MoveAndCapture.as_control());
        assert_eq!(Marker::Empty, Marker::Castle.as_control());
        assert_eq!(Marker::Empty, Marker::DoubleStep.as_control());
        assert_eq!(Marker::Empty, Marker::EnPassant.as_control());
        assert_eq!(Marker::Empty, Marker::Current.as_control());
    }

    #[test]
    fn capture_does_not_relocate() {
        assert!(Marker::Capture.is_capture());
        assert!(!Marker::Capture.relocates());
        assert!(Marker::MoveAndCapture.is_capture());
        assert!(Marker::MoveAndCapture.relocates());
        assert!(!Marker::Current.is_destination());
    }
}
