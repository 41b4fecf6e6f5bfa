// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;
use std::fmt::{self, Write};

use crate::army::{Armies, Army};
use crate::grid::{MoveGrid, OccupancyGrid, Occupant};
use crate::marker::Marker;
use crate::movement::Movement;
use crate::moves::{self, MoveReport};
use crate::piece::Piece;
use crate::types::{Color, PieceId, PieceKind, Square, TableIndex, COLORS, COLS, ROWS};

/// Possible errors that can arise when parsing a setup diagram into a `Board`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidDigit,
    RowDoesNotSumToNine,
    UnknownPiece,
    TrailingInput,
}

impl fmt::Display for LayoutParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LayoutParseError::UnexpectedChar(c) => write!(f, "unexpected character '{}'", c),
            LayoutParseError::UnexpectedEnd => write!(f, "unexpected end of layout"),
            LayoutParseError::InvalidDigit => write!(f, "empty runs must be between 1 and 9"),
            LayoutParseError::RowDoesNotSumToNine => write!(f, "row does not sum to nine columns"),
            LayoutParseError::UnknownPiece => write!(f, "unknown piece letter"),
            LayoutParseError::TrailingInput => write!(f, "trailing input after the last row"),
        }
    }
}

/// Outcome of the game from the point of view of the side to move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
}

lazy_static! {
    static ref STARTING_BOARD: Board = Board::from_armies(Armies::starting());
}

/// The board: both armies plus grids derived from them. The grids are caches
/// that are rebuilt whenever the armies change and are never edited on their
/// own. Cloning a board yields a fully independent copy that can be used for
/// what-if simulation.
#[derive(Clone, Debug)]
pub struct Board {
    armies: Armies,
    occupancy: OccupancyGrid,
    control: [MoveGrid; 2],
}

impl Board {
    /// Constructs a new, empty board.
    pub fn new() -> Board {
        Board::from_armies(Armies::new())
    }

    /// Constructs a board from two armies, deriving all grids.
    pub fn from_armies(armies: Armies) -> Board {
        let mut board = Board {
            armies,
            occupancy: OccupancyGrid::new(),
            control: [MoveGrid::new(), MoveGrid::new()],
        };

        board.refresh();
        board
    }

    /// The standard starting position.
    pub fn starting_position() -> Board {
        STARTING_BOARD.clone()
    }

    /// Parses a setup diagram: ten rows separated by `/`, row 0 first, with
    /// digits for runs of empty squares. Uppercase letters are White.
    pub fn from_layout<S: AsRef<str>>(layout: S) -> Result<Board, LayoutParseError> {
        use std::iter::Peekable;
        use std::str::Chars;

        type Stream<'a> = Peekable<Chars<'a>>;

        fn eat<'a>(iter: &mut Stream<'a>, expected: char) -> Result<(), LayoutParseError> {
            match iter.next() {
                Some(c) if c == expected => Ok(()),
                Some(c) => Err(LayoutParseError::UnexpectedChar(c)),
                None => Err(LayoutParseError::UnexpectedEnd),
            }
        }

        fn peek<'a>(iter: &mut Stream<'a>) -> Result<char, LayoutParseError> {
            iter.peek().cloned().ok_or(LayoutParseError::UnexpectedEnd)
        }

        let mut armies = Armies::new();
        let iter = &mut layout.as_ref().trim().chars().peekable();
        for row in 0..ROWS {
            let mut col = 0;
            while col < COLS {
                let c = peek(iter)?;
                // digits 1 through 9 indicate empty squares.
                if let Some(value) = c.to_digit(10) {
                    if value == 0 {
                        return Err(LayoutParseError::InvalidDigit);
                    }

                    col += value as usize;
                    if col > COLS {
                        return Err(LayoutParseError::RowDoesNotSumToNine);
                    }

                    iter.next();
                    continue;
                }

                if c == '/' {
                    return Err(LayoutParseError::RowDoesNotSumToNine);
                }

                let kind = PieceKind::try_from(c).map_err(|_| LayoutParseError::UnknownPiece)?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };

                armies
                    .get_mut(color)
                    .push(Piece::new(kind, color, Square::of(row, col)));
                iter.next();
                col += 1;
            }

            if row != ROWS - 1 {
                eat(iter, '/')?;
            }
        }

        if iter.next().is_some() {
            return Err(LayoutParseError::TrailingInput);
        }

        Ok(Board::from_armies(armies))
    }

    /// Renders the board as a setup diagram.
    pub fn as_layout(&self) -> String {
        let mut buf = String::new();
        for row in 0..ROWS {
            let mut empty = 0;
            for col in 0..COLS {
                match self.piece_at(Square::of(row, col)) {
                    Some((id, piece)) => {
                        if empty != 0 {
                            buf.push_str(&empty.to_string());
                            empty = 0;
                        }

                        buf.push(piece.kind.as_char(id.color));
                    }
                    None => empty += 1,
                }
            }

            if empty != 0 {
                buf.push_str(&empty.to_string());
            }

            if row != ROWS - 1 {
                buf.push('/');
            }
        }

        buf
    }

    //
    // Board state getters
    //

    pub fn armies(&self) -> &Armies {
        &self.armies
    }

    pub fn army(&self, color: Color) -> &Army {
        self.armies.get(color)
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.armies.piece(id)
    }

    /// The live piece standing on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<(PieceId, &Piece)> {
        self.armies.piece_at(square)
    }

    pub fn occupancy(&self) -> &OccupancyGrid {
        &self.occupancy
    }

    pub fn occupant(&self, square: Square) -> Occupant {
        self.occupancy[square]
    }

    /// Every square a live piece of `color` moves to or captures on.
    pub fn control(&self, color: Color) -> &MoveGrid {
        &self.control[color.as_index()]
    }

    /// Ids of every live piece of `color`.
    pub fn live_pieces(&self, color: Color) -> Vec<PieceId> {
        self.army(color)
            .live()
            .map(|(idx, _)| PieceId::new(color, idx))
            .collect()
    }

    //
    // Board mutation
    //

    /// Runs `f` against the armies and rebuilds every derived grid.
    pub fn edit<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Armies) -> R,
    {
        let result = f(&mut self.armies);
        self.refresh();
        result
    }

    /// Rebuilds the occupancy grid and then both control grids.
    fn refresh(&mut self) {
        let mut occupancy = OccupancyGrid::new();
        for (id, piece) in self.armies.live() {
            if let Some(sq) = piece.square {
                occupancy[sq] = match piece.kind {
                    PieceKind::King => Occupant::King(id.color),
                    _ => Occupant::Piece(id.color),
                };
            }
        }

        self.occupancy = occupancy;
        let white = self.compute_control(Color::White);
        let black = self.compute_control(Color::Black);
        self.control = [white, black];
    }

    fn compute_control(&self, color: Color) -> MoveGrid {
        let mut grid = MoveGrid::new();
        for (_, piece) in self.army(color).live() {
            grid.merge(&piece.control(self));
        }

        grid
    }

    //
    // Move generation and legality
    //

    /// The union of a piece's movements, before the check filter. `None` for
    /// unknown or captured pieces.
    pub fn potential_moves(&self, id: PieceId) -> Option<MoveGrid> {
        let piece = self.piece(id).filter(|p| p.is_live())?;
        Some(piece.potential_moves(self))
    }

    /// A piece's potential moves with every destination that would leave its
    /// own king in check turned back into `Empty`.
    pub fn possible_moves(&self, id: PieceId) -> Option<MoveGrid> {
        let mut grid = self.potential_moves(id)?;
        for dest in grid.destinations() {
            let legal = self
                .simulate(id, dest, grid[dest])
                .map_or(false, |sim| !sim.is_in_check(id.color));
            if !legal {
                trace!("{} to {} leaves its king in check", id, dest);
                grid[dest] = Marker::Empty;
            }
        }

        Some(grid)
    }

    /// Plays the move out on a copy of this board.
    fn simulate(&self, id: PieceId, dest: Square, marker: Marker) -> Option<Board> {
        let mut sim = self.clone();
        let (allies, enemies) = sim.armies.split_mut(id.color);
        if !moves::apply_move(id.index, dest, marker, allies, enemies) {
            return None;
        }

        sim.refresh();
        Some(sim)
    }

    /// Moves a piece to `dest` if that is one of its possible moves. A refused
    /// move leaves the board untouched.
    pub fn execute_move(&mut self, id: PieceId, dest: Square) -> Option<MoveReport> {
        let (kind, from) = match self.piece(id) {
            Some(piece) => (piece.kind, piece.square?),
            None => return None,
        };

        let marker = self.possible_moves(id)?[dest];
        if !marker.is_destination() {
            debug!("refusing to move {} {} from {} to {}", id, kind, from, dest);
            return None;
        }

        let captured = moves::capture_square(id.color, dest, marker)
            .and_then(|sq| self.piece_at(sq))
            .filter(|(victim, _)| victim.color != id.color)
            .map(|(_, piece)| piece.kind);

        let (allies, enemies) = self.armies.split_mut(id.color);
        if !moves::apply_move(id.index, dest, marker, allies, enemies) {
            return None;
        }

        self.refresh();
        let report = MoveReport {
            piece: id,
            kind,
            from,
            to: dest,
            marker,
            captured,
        };

        debug!("{}", report);
        Some(report)
    }

    //
    // Check and terminal states
    //

    /// Whether any live king of `color` stands on a square the other color
    /// captures on. A side with no king is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        let enemy_control = self.control(color.toggle());
        self.army(color)
            .kings()
            .any(|sq| enemy_control[sq].is_capture())
    }

    /// Number of legal destinations summed over every live piece of `color`.
    pub fn legal_move_count(&self, color: Color) -> usize {
        self.live_pieces(color)
            .into_iter()
            .filter_map(|id| self.possible_moves(id))
            .map(|grid| grid.count())
            .sum()
    }

    pub fn status(&self, color: Color) -> GameStatus {
        if self.legal_move_count(color) != 0 {
            GameStatus::Ongoing
        } else if self.is_in_check(color) {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        }
    }

    //
    // Turn helpers
    //

    /// Called at the start of `color`'s turn: its pawns can no longer be
    /// taken en passant.
    pub fn begin_turn(&mut self, color: Color) {
        self.edit(|armies| armies.get_mut(color).clear_double_steps());
    }

    /// The first live pawn of `color` standing on its promotion row.
    pub fn pawn_ready_to_promote(&self, color: Color) -> Option<PieceId> {
        let row = color.promotion_row();
        self.army(color)
            .live()
            .find(|(_, p)| p.kind == PieceKind::Pawn && p.square.map(Square::row) == Some(row))
            .map(|(idx, _)| PieceId::new(color, idx))
    }

    /// Replaces a pawn on its promotion row with a fresh piece of `kind`,
    /// keeping its index.
    pub fn promote(&mut self, id: PieceId, kind: PieceKind) -> bool {
        if !kind.is_promotion_target() {
            return false;
        }

        let replacement = match self.piece(id) {
            Some(piece)
                if piece.kind == PieceKind::Pawn
                    && piece.square.map(Square::row) == Some(id.color.promotion_row()) =>
            {
                piece.promoted(kind)
            }
            _ => None,
        };

        match replacement {
            Some(piece) => {
                debug!("promoting {} to {}", id, kind);
                self.edit(|armies| armies.get_mut(id.color).replace(id.index, piece));
                true
            }
            None => false,
        }
    }

    /// Activates the `idx`-th available upgrade of a live piece.
    pub fn upgrade(&mut self, id: PieceId, idx: usize) -> Option<Movement> {
        if !self.piece(id)?.is_live() {
            return None;
        }

        let movement = self.edit(|armies| armies.piece_mut(id).and_then(|p| p.upgrade(idx)))?;
        debug!("{} gained {}", id, movement);
        Some(movement)
    }

    pub fn material_worth(&self, color: Color) -> u32 {
        self.army(color).material_worth()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Board) -> bool {
        self.armies == other.armies
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..ROWS {
            for col in 0..COLS {
                match self.piece_at(Square::of(row, col)) {
                    Some((id, piece)) => {
                        f.write_char(' ')?;
                        f.write_char(piece.kind.as_char(id.color))?;
                        f.write_char(' ')?;
                    }
                    None => write!(f, " . ")?,
                }
            }

            writeln!(f, "| {}", row)?;
        }

        for _ in 0..COLS {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for col in 0..COLS {
            write!(f, " {} ", col)?;
        }

        writeln!(f)?;
        for &color in COLORS.iter() {
            if self.is_in_check(color) {
                writeln!(f, "{} is in check", color)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rhbqkwbhr/acbnanbca/ppppppppp/9/9/9/9/PPPPPPPPP/ACBNANBCA/RHBQKWBHR";

    #[test]
    fn starting_layout() {
        let board = Board::starting_position();
        assert_eq!(START, board.as_layout());
        assert_eq!(Occupant::King(Color::White), board.occupant(Square::of(9, 4)));
        assert_eq!(Occupant::Piece(Color::Black), board.occupant(Square::of(2, 0)));
        assert_eq!(Occupant::Empty, board.occupant(Square::of(5, 5)));
    }

    #[test]
    fn layout_round_trip() {
        let layout = "4k4/9/9/3P5/9/9/1c7/9/9/R3K3R";
        assert_eq!(layout, Board::from_layout(layout).unwrap().as_layout());
    }

    #[test]
    fn layout_errors() {
        assert_eq!(
            Err(LayoutParseError::RowDoesNotSumToNine),
            Board::from_layout("8/9/9/9/9/9/9/9/9/9").map(|b| b.as_layout())
        );
        assert_eq!(
            Err(LayoutParseError::RowDoesNotSumToNine),
            Board::from_layout("55/9/9/9/9/9/9/9/9/9").map(|b| b.as_layout())
        );
        assert_eq!(
            Err(LayoutParseError::UnknownPiece),
            Board::from_layout("x8/9/9/9/9/9/9/9/9/9").map(|b| b.as_layout())
        );
        assert_eq!(
            Err(LayoutParseError::InvalidDigit),
            Board::from_layout("09/9/9/9/9/9/9/9/9/9").map(|b| b.as_layout())
        );
        assert_eq!(
            Err(LayoutParseError::UnexpectedEnd),
            Board::from_layout("9/9/9").map(|b| b.as_layout())
        );
        assert_eq!(
            Err(LayoutParseError::TrailingInput),
            Board::from_layout("9/9/9/9/9/9/9/9/9/9/9").map(|b| b.as_layout())
        );
    }

    #[test]
    fn starting_position_is_quiet() {
        let board = Board::starting_position();
        assert!(!board.is_in_check(Color::White));
        assert!(!board.is_in_check(Color::Black));
        assert_eq!(GameStatus::Ongoing, board.status(Color::White));
        assert_eq!(GameStatus::Ongoing, board.status(Color::Black));
    }

    #[test]
    fn control_excludes_specials() {
        let board = Board::starting_position();
        for (_, marker) in board.control(Color::White).iter() {
            match marker {
                Marker::Empty | Marker::Move | Marker::Capture | Marker::MoveAndCapture => {}
                other => panic!("control grid holds {:?}", other),
            }
        }
    }

    #[test]
    fn refresh_matches_fresh_board() {
        let mut board = Board::starting_position();
        let pawn = PieceId::new(Color::White, 4);
        assert!(board.execute_move(pawn, Square::of(5, 4)).is_some());

        let rebuilt = Board::from_armies(board.armies().clone());
        assert_eq!(board.occupancy(), rebuilt.occupancy());
        assert_eq!(board.control(Color::White), rebuilt.control(Color::White));
        assert_eq!(board.control(Color::Black), rebuilt.control(Color::Black));
    }

    #[test]
    fn captured_piece_has_no_moves() {
        let mut board = Board::from_layout("4k4/9/9/9/9/9/9/9/4r4/4K4").unwrap();
        let victim = board.piece_at(Square::of(8, 4)).unwrap().0;
        assert!(board.is_in_check(Color::White));

        let king = board.piece_at(Square::of(9, 4)).unwrap().0;
        let report = board.execute_move(king, Square::of(8, 4)).unwrap();
        assert_eq!(Some(PieceKind::Rook), report.captured);
        assert!(board.potential_moves(victim).is_none());
        assert!(board.possible_moves(victim).is_none());
        assert!(!board.is_in_check(Color::White));
    }

    #[test]
    fn promotion() {
        let mut board = Board::from_layout("P3k4/9/9/9/9/9/9/9/9/4K4").unwrap();
        let pawn = board.pawn_ready_to_promote(Color::White).unwrap();
        assert!(!board.promote(pawn, PieceKind::King));
        assert!(!board.promote(pawn, PieceKind::Pawn));
        assert!(board.promote(pawn, PieceKind::Wizard));

        let wizard = board.piece(pawn).unwrap();
        assert_eq!(PieceKind::Wizard, wizard.kind);
        assert_eq!(Some(Square::of(0, 0)), wizard.square);
        assert!(!wizard.has_moved);
        assert_eq!(None, board.pawn_ready_to_promote(Color::White));
        assert!(!board.promote(pawn, PieceKind::Queen));
    }

    #[test]
    fn upgrade_changes_moves() {
        let mut board = Board::from_layout("4k4/9/9/9/4B4/9/9/9/9/4K4").unwrap();
        let bishop = board.piece_at(Square::of(4, 4)).unwrap().0;
        let before = board.potential_moves(bishop).unwrap().count();
        assert_eq!(Some(Movement::Square), board.upgrade(bishop, 0));
        let after = board.potential_moves(bishop).unwrap().count();
        assert_eq!(before + 4, after);
    }

    #[test]
    fn begin_turn_clears_double_step() {
        let mut board = Board::starting_position();
        let pawn = PieceId::new(Color::White, 0);
        let report = board.execute_move(pawn, Square::of(5, 0)).unwrap();
        assert_eq!(Marker::DoubleStep, report.marker);
        assert!(board.piece(pawn).unwrap().moved_two_units_up);

        board.begin_turn(Color::Black);
        assert!(board.piece(pawn).unwrap().moved_two_units_up);
        board.begin_turn(Color::White);
        assert!(!board.piece(pawn).unwrap().moved_two_units_up);
    }
}
