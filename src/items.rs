// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Board-altering items. Every item is a mutation of the armies that goes
//! through the effect validator: defined items get one attempt, random
//! items are re-rolled until an outcome leaves both kings out of check.
use rand::seq::SliceRandom;
use rand::Rng;
use std::convert::TryFrom;
use std::fmt;

use crate::army::starting_army;
use crate::board::Board;
use crate::effect::{EffectOutcome, RANDOM_EFFECT_ATTEMPTS};
use crate::piece::Piece;
use crate::types::{Color, KindSet, PieceKind, Square, COLORS, COLS};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Item {
    QueenGambitOverthrow,
    UniqueSlayer,
    Reinforcement,
    Reset,
    InstantPromotion,
    KingTeleport,
    Plague,
    Scrambler,
    Swapper,
}

pub static ITEMS: [Item; 9] = [
    Item::QueenGambitOverthrow,
    Item::UniqueSlayer,
    Item::Reinforcement,
    Item::Reset,
    Item::InstantPromotion,
    Item::KingTeleport,
    Item::Plague,
    Item::Scrambler,
    Item::Swapper,
];

impl Item {
    pub fn name(self) -> &'static str {
        match self {
            Item::QueenGambitOverthrow => "Queen Gambit Overthrow",
            Item::UniqueSlayer => "Unique Slayer",
            Item::Reinforcement => "Reinforcement",
            Item::Reset => "Reset",
            Item::InstantPromotion => "Instant Promotion",
            Item::KingTeleport => "King Teleport",
            Item::Plague => "Plague",
            Item::Scrambler => "Scrambler",
            Item::Swapper => "Swapper",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Item::QueenGambitOverthrow => "Eliminates all of the opponent's queens.",
            Item::UniqueSlayer => "Eliminates every archer, cannon, ninja and wizard on the board.",
            Item::Reinforcement => "Summons a line of pawns on every empty square of your pawn row.",
            Item::Reset => "Returns every piece to its starting square.",
            Item::InstantPromotion => "Promotes one of your pawns, chosen at random, to a queen.",
            Item::KingTeleport => "Teleports both kings to random empty squares.",
            Item::Plague => "Eliminates every piece of a kind picked at random from your pieces.",
            Item::Scrambler => "Places every piece on a random square.",
            Item::Swapper => "Swaps a random piece of yours with a random piece of the opponent.",
        }
    }

    /// Whether the item's outcome is rolled at random.
    pub fn is_random(self) -> bool {
        match self {
            Item::QueenGambitOverthrow | Item::UniqueSlayer | Item::Reinforcement | Item::Reset => {
                false
            }
            _ => true,
        }
    }

    /// Uses the item for `color`, committing its effect only if it leaves
    /// both kings out of check.
    pub fn use_on<R: Rng + ?Sized>(self, color: Color, board: &mut Board, rng: &mut R) -> EffectOutcome {
        debug!("{} uses {}", color, self);
        if self.is_random() {
            board.apply_validated_random_effect(RANDOM_EFFECT_ATTEMPTS, |sim| {
                self.apply(color, sim, rng)
            })
        } else {
            board.apply_validated_effect(|sim| self.apply(color, sim, rng))
        }
    }

    /// Runs the item's mutation on `board` without any validation.
    fn apply<R: Rng + ?Sized>(self, color: Color, board: &mut Board, rng: &mut R) -> Option<String> {
        match self {
            Item::QueenGambitOverthrow => queen_gambit_overthrow(color, board),
            Item::UniqueSlayer => unique_slayer(board),
            Item::Reinforcement => reinforcement(color, board),
            Item::Reset => reset(board),
            Item::InstantPromotion => instant_promotion(color, board, rng),
            Item::KingTeleport => king_teleport(board, rng),
            Item::Plague => plague(color, board, rng),
            Item::Scrambler => scrambler(board, rng),
            Item::Swapper => swapper(color, board, rng),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<&str> for Item {
    type Error = ();

    /// Matches item names case-insensitively, ignoring spaces, dashes and
    /// underscores.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        fn normalize(s: &str) -> String {
            s.chars()
                .filter(|c| c.is_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .collect()
        }

        let wanted = normalize(value);
        ITEMS
            .iter()
            .cloned()
            .find(|item| normalize(item.name()) == wanted)
            .ok_or(())
    }
}

/// Captures every live piece of the given kinds belonging to `color`,
/// returning how many were taken.
fn eliminate(board: &mut Board, color: Color, kinds: KindSet) -> usize {
    board.edit(|armies| {
        let mut count = 0;
        for piece in armies.get_mut(color).iter_mut() {
            if piece.is_live() && kinds.has(piece.kind) {
                piece.capture();
                count += 1;
            }
        }

        count
    })
}

fn queen_gambit_overthrow(color: Color, board: &mut Board) -> Option<String> {
    let enemy = color.toggle();
    let count = eliminate(board, enemy, KindSet::QUEEN);
    Some(format!("{} of {}'s queens were eliminated.", count, enemy))
}

fn unique_slayer(board: &mut Board) -> Option<String> {
    let count: usize = COLORS
        .iter()
        .map(|&color| eliminate(board, color, KindSet::UNIQUE))
        .sum();
    Some(format!(
        "{} archers, cannons, ninjas and wizards have been eliminated.",
        count
    ))
}

fn reinforcement(color: Color, board: &mut Board) -> Option<String> {
    let row = (color.home_row() as i32 + 2 * color.forward()) as usize;
    let empty: Vec<Square> = (0..COLS)
        .map(|col| Square::of(row, col))
        .filter(|&sq| board.occupant(sq).is_empty())
        .collect();
    if empty.is_empty() {
        return None;
    }

    board.edit(|armies| {
        for &sq in &empty {
            armies
                .get_mut(color)
                .push(Piece::new(PieceKind::Pawn, color, sq));
        }
    });

    Some(format!("{} new pawns were summoned for {}.", empty.len(), color))
}

fn reset(board: &mut Board) -> Option<String> {
    board.edit(|armies| {
        for &color in COLORS.iter() {
            let start = starting_army(color);
            let army = armies.get_mut(color);
            army.truncate(start.len());
            for (piece, home) in army.iter_mut().zip(start.iter()) {
                if piece.is_captured() {
                    continue;
                }

                if let Some(sq) = home.square {
                    piece.place(sq);
                    piece.has_moved = false;
                    piece.moved_two_units_up = false;
                }
            }
        }
    });

    Some("The board has been reset.".to_owned())
}

fn instant_promotion<R: Rng + ?Sized>(color: Color, board: &mut Board, rng: &mut R) -> Option<String> {
    let pawns = board.army(color).live_of_kind(PieceKind::Pawn);
    let &idx = pawns.choose(rng)?;
    let queen = board.army(color)[idx].promoted(PieceKind::Queen)?;
    let sq = queen.square?;
    board.edit(|armies| armies.get_mut(color).replace(idx, queen));
    Some(format!("The pawn at {} was promoted to a queen.", sq))
}

fn king_teleport<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> Option<String> {
    let kings: Vec<(Color, usize)> = COLORS
        .iter()
        .flat_map(|&color| {
            board
                .army(color)
                .live_of_kind(PieceKind::King)
                .into_iter()
                .map(move |idx| (color, idx))
        })
        .collect();
    if kings.is_empty() {
        return None;
    }

    let empty: Vec<Square> = Square::all()
        .filter(|&sq| board.occupant(sq).is_empty())
        .collect();
    let targets: Vec<Square> = empty.choose_multiple(rng, kings.len()).cloned().collect();
    if targets.len() < kings.len() {
        return None;
    }

    board.edit(|armies| {
        for (&(color, idx), &sq) in kings.iter().zip(targets.iter()) {
            armies.get_mut(color)[idx].relocate(sq);
        }
    });

    Some("Both kings were teleported.".to_owned())
}

fn plague<R: Rng + ?Sized>(color: Color, board: &mut Board, rng: &mut R) -> Option<String> {
    let candidates: Vec<PieceKind> = board
        .army(color)
        .live()
        .map(|(_, p)| p.kind)
        .filter(|&kind| kind != PieceKind::King)
        .collect();
    let &kind = candidates.choose(rng)?;
    let count: usize = COLORS
        .iter()
        .map(|&c| eliminate(board, c, KindSet::from(kind)))
        .sum();
    Some(format!("The plague struck {} pieces of kind {}.", count, kind))
}

fn scrambler<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> Option<String> {
    let mut squares: Vec<Square> = Square::all().collect();
    squares.shuffle(rng);
    board.edit(|armies| {
        let mut squares = squares.into_iter();
        for &color in COLORS.iter() {
            for piece in armies.get_mut(color).iter_mut() {
                piece.has_moved = true;
                if piece.is_live() {
                    if let Some(sq) = squares.next() {
                        piece.place(sq);
                    }
                }
            }
        }
    });

    Some("The board has been scrambled.".to_owned())
}

fn swapper<R: Rng + ?Sized>(color: Color, board: &mut Board, rng: &mut R) -> Option<String> {
    fn candidates(board: &Board, color: Color) -> (Vec<usize>, Vec<usize>) {
        board
            .army(color)
            .live()
            .map(|(idx, p)| (idx, p.kind == PieceKind::King))
            .fold((Vec::new(), Vec::new()), |(mut others, mut kings), (idx, is_king)| {
                if is_king {
                    kings.push(idx);
                } else {
                    others.push(idx);
                }

                (others, kings)
            })
    }

    let enemy = color.toggle();
    let (mut ours, our_kings) = candidates(board, color);
    let (mut theirs, their_kings) = candidates(board, enemy);
    if ours.is_empty() || theirs.is_empty() {
        ours = our_kings;
        theirs = their_kings;
    }

    let &a = ours.choose(rng)?;
    let &b = theirs.choose(rng)?;
    let (a_piece, b_piece) = (&board.army(color)[a], &board.army(enemy)[b]);
    let (a_kind, b_kind) = (a_piece.kind, b_piece.kind);
    let (a_sq, b_sq) = (a_piece.square?, b_piece.square?);

    board.edit(|armies| {
        armies.get_mut(color)[a].relocate(b_sq);
        armies.get_mut(enemy)[b].relocate(a_sq);
    });

    Some(format!(
        "Swapped the {} at {} with the {} at {}.",
        a_kind, a_sq, b_kind, b_sq
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse() {
        for &item in ITEMS.iter() {
            assert_eq!(Ok(item), Item::try_from(item.name()));
        }

        assert_eq!(Ok(Item::KingTeleport), Item::try_from("king-teleport"));
        assert_eq!(Ok(Item::QueenGambitOverthrow), Item::try_from("QUEEN_GAMBIT_OVERTHROW"));
        assert_eq!(Err(()), Item::try_from("fireball"));
    }

    #[test]
    fn random_items() {
        let random: Vec<_> = ITEMS.iter().filter(|item| item.is_random()).collect();
        assert_eq!(5, random.len());
        assert!(!Item::Reset.is_random());
    }
}
