// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Simulate-then-commit for board-wide effects. An effect runs against a
//! copy of the board; the copy replaces the live board only if neither king
//! is in check afterward.
use std::fmt;

use crate::board::Board;
use crate::types::COLORS;

/// Number of times a randomized effect is re-rolled before it is burned.
pub const RANDOM_EFFECT_ATTEMPTS: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectOutcome {
    pub committed: bool,
    pub message: String,
}

impl EffectOutcome {
    fn committed(message: String) -> EffectOutcome {
        EffectOutcome {
            committed: true,
            message,
        }
    }

    fn burned(message: String) -> EffectOutcome {
        EffectOutcome {
            committed: false,
            message,
        }
    }
}

impl fmt::Display for EffectOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)
    }
}

const CHECK_BURN: &str = "The effect would leave a king in check and was burned.";
const NO_TARGET_BURN: &str = "The effect found nothing to act on and was burned.";

impl Board {
    /// Whether either color is in check.
    pub fn any_king_in_check(&self) -> bool {
        COLORS.iter().any(|&color| self.is_in_check(color))
    }

    /// Runs `effect` once on a copy of the board and commits the copy if no
    /// king ends up in check. An effect returns `None` when it has nothing to
    /// act on; otherwise it returns a message describing what it did.
    pub fn apply_validated_effect<F>(&mut self, effect: F) -> EffectOutcome
    where
        F: FnOnce(&mut Board) -> Option<String>,
    {
        let mut sim = self.clone();
        let message = match effect(&mut sim) {
            Some(message) => message,
            None => return EffectOutcome::burned(NO_TARGET_BURN.to_owned()),
        };

        if sim.any_king_in_check() {
            debug!("effect burned: {}", message);
            return EffectOutcome::burned(CHECK_BURN.to_owned());
        }

        debug!("effect committed: {}", message);
        *self = sim;
        EffectOutcome::committed(message)
    }

    /// Like `apply_validated_effect`, but re-runs the effect on a fresh copy
    /// up to `attempts` times until one outcome leaves both kings safe.
    pub fn apply_validated_random_effect<F>(&mut self, attempts: usize, mut effect: F) -> EffectOutcome
    where
        F: FnMut(&mut Board) -> Option<String>,
    {
        for attempt in 0..attempts {
            let mut sim = self.clone();
            let message = match effect(&mut sim) {
                Some(message) => message,
                None => return EffectOutcome::burned(NO_TARGET_BURN.to_owned()),
            };

            if sim.any_king_in_check() {
                trace!("random effect attempt {} rejected: {}", attempt, message);
                continue;
            }

            debug!("random effect committed after {} attempts: {}", attempt + 1, message);
            *self = sim;
            return EffectOutcome::committed(message);
        }

        debug!("random effect burned after {} attempts", attempts);
        EffectOutcome::burned(CHECK_BURN.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceKind, Square};

    const QUIET: &str = "4k4/9/9/9/9/9/9/9/r8/4K4";

    #[test]
    fn committed_effect_replaces_board() {
        let mut board = Board::from_layout("4k4/9/9/9/9/9/9/9/9/4K3r").unwrap();
        let outcome = board.apply_validated_effect(|sim| {
            sim.edit(|armies| armies.black.capture_at(Square::of(9, 8)))
                .map(|kind| format!("removed a {}", kind))
        });
        assert!(outcome.committed);
        assert_eq!("removed a Rook", outcome.message);
        assert!(board.piece_at(Square::of(9, 8)).is_none());
    }

    #[test]
    fn check_burns_effect() {
        let mut board = Board::from_layout(QUIET).unwrap();
        let before = board.clone();
        // sliding the white king onto the rook's row
        let outcome = board.apply_validated_effect(|sim| {
            sim.edit(|armies| {
                let idx = armies.white.index_at(Square::of(9, 4))?;
                armies.white[idx].place(Square::of(8, 5));
                Some("moved".to_owned())
            })
        });
        assert!(!outcome.committed);
        assert_eq!(before, board);
        assert_eq!(before.occupancy(), board.occupancy());
    }

    #[test]
    fn nothing_to_act_on() {
        let mut board = Board::from_layout(QUIET).unwrap();
        let outcome = board.apply_validated_effect(|_| None);
        assert!(!outcome.committed);
        assert_eq!(NO_TARGET_BURN, outcome.message);
    }

    #[test]
    fn random_effect_retries() {
        let mut board = Board::from_layout(QUIET).unwrap();
        let mut calls = 0;
        let outcome = board.apply_validated_random_effect(RANDOM_EFFECT_ATTEMPTS, |sim| {
            calls += 1;
            // the first two attempts walk onto the rook's row
            let target = if calls < 3 {
                Square::of(8, 3)
            } else {
                Square::of(5, 5)
            };
            sim.edit(|armies| {
                let idx = armies.white.index_at(Square::of(9, 4))?;
                armies.white[idx].place(target);
                Some(format!("king to {}", target))
            })
        });
        assert!(outcome.committed);
        assert_eq!(3, calls);
        assert_eq!(
            Some(PieceKind::King),
            board.piece_at(Square::of(5, 5)).map(|(_, p)| p.kind)
        );
    }

    #[test]
    fn random_effect_gives_up() {
        let mut board = Board::from_layout(QUIET).unwrap();
        let before = board.clone();
        let mut calls = 0;
        let outcome = board.apply_validated_random_effect(5, |sim| {
            calls += 1;
            sim.edit(|armies| {
                let idx = armies.white.index_at(Square::of(9, 4))?;
                armies.white[idx].place(Square::of(8, 6));
                Some("king slides".to_owned())
            })
        });
        assert!(!outcome.committed);
        assert_eq!(5, calls);
        assert_eq!(before, board);
        assert!(!board.is_in_check(Color::White));
    }
}
