use std::fmt;

use log::debug;

use crate::board::{Square, SquareSet};
use crate::move_gen;
use crate::position::{Position, PositionError, Side};

/// The boundary a GUI shell talks to: selection queries on one side,
/// position mutation on the other. The shell owns click-to-square
/// mapping and rendering; this owns the rules.
///
/// Queries are pure reads of the current position, answered fresh on
/// every call. The shell is expected to serialize each query/apply pair;
/// nothing here retains state between calls beyond the position itself.
pub struct Game {
    position: Position,
}

impl Game {
    /// A fresh game: standard opening layout, White to move.
    pub fn new() -> Self {
        Self {
            position: Position::start(),
        }
    }

    /// Adopts an already-built position, e.g. from a FEN record.
    pub fn from_position(position: Position) -> Self {
        Self { position }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn to_move(&self) -> Side {
        self.position.to_move()
    }

    /// Legal destinations for the piece on `square`. An empty square, or
    /// one holding the idle side's piece, is simply not a selection:
    /// empty set, no error.
    pub fn legal_moves(&self, square: Square) -> SquareSet {
        match self.position.piece_at(square) {
            Some(piece) if piece.side == self.position.to_move() => {
                move_gen::legal_moves(&self.position, square)
            }
            Some(piece) => {
                debug!("selected {} {} out of turn at {}", piece.side, piece.kind, square);
                SquareSet::empty()
            }
            None => SquareSet::empty(),
        }
    }

    /// Squares `side` currently threatens or defends; the shell renders
    /// these as an optional visual aid.
    pub fn controlled_squares(&self, side: Side) -> SquareSet {
        move_gen::controlled_squares(&self.position, side)
    }

    pub fn is_in_check(&self, side: Side) -> bool {
        move_gen::is_in_check(&self.position, side)
    }

    /// Applies `from -> to` and flips the turn. The destination must come
    /// from a preceding [`Game::legal_moves`] call; it is not re-checked
    /// here. Errors only on the detectable misuses: an empty source or a
    /// piece of the side not to move.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<(), PositionError> {
        self.position.apply_move(from, to)?;
        debug!("applied {} -> {}, {} to move", from, to, self.position.to_move());
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position)
    }
}
