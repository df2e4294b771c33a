use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::board::Square::*;
use crate::board::{Square, SquareSet};

mod fen;

pub use fen::FenParseError;

#[derive(thiserror::Error, Debug)]
pub enum PositionError {
    #[error("no piece at {0}")]
    MoveNoPiece(String),

    #[error("to_move is the other side, for move: {0} {1} -> {2}")]
    MoveNotToMove(String, String, String),
}

#[derive(Debug, PartialEq, Eq, EnumIter, Clone, Copy, Display, Hash, Deserialize, Serialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opposite(self) -> Side {
        if self == Side::White {
            Side::Black
        } else {
            Side::White
        }
    }
}

#[derive(Debug, PartialEq, Eq, EnumIter, Clone, Copy, Display, Hash, Deserialize, Serialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Point value, shown by the capture tally in the shell. Not consulted
    /// by the rules.
    pub fn value(self) -> u32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    /// Notation letter, empty for pawns. Presentation only.
    pub fn notation(self) -> &'static str {
        match self {
            PieceKind::Pawn => "",
            PieceKind::Knight => "N",
            PieceKind::Bishop => "B",
            PieceKind::Rook => "R",
            PieceKind::Queen => "Q",
            PieceKind::King => "K",
        }
    }
}

impl From<PieceKind> for char {
    fn from(kind: PieceKind) -> char {
        match kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

impl TryFrom<char> for PieceKind {
    type Error = FenParseError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'p' => Ok(PieceKind::Pawn),
            'n' => Ok(PieceKind::Knight),
            'b' => Ok(PieceKind::Bishop),
            'r' => Ok(PieceKind::Rook),
            'q' => Ok(PieceKind::Queen),
            'k' => Ok(PieceKind::King),
            _ => Err(FenParseError::FromCharPiece(value)),
        }
    }
}

/// A piece on the board. Its square is the index of the board slot that
/// holds it; `has_moved` flips on the first relocation and is read only
/// by castling eligibility.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Deserialize, Serialize)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(side: Side, kind: PieceKind) -> Piece {
        Piece {
            side,
            kind,
            has_moved: false,
        }
    }

    fn to_char(self) -> char {
        let ch: char = self.kind.into();
        match self.side {
            Side::White => ch.to_ascii_uppercase(),
            Side::Black => ch,
        }
    }
}

/// The board: a mapping from square to piece, absent entries empty, plus
/// the side to move. At most one piece per square and one king per side.
/// Mutated only through [`Position::apply_move`]; move generators take it
/// read-only.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    squares: [Option<Piece>; 64],
    to_move: Side,
}

impl Position {
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
            to_move: Side::White,
        }
    }

    /// The standard 16-per-side opening layout, White to move.
    pub fn start() -> Self {
        let mut position = Position::empty();

        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for (file, &kind) in back_rank.iter().enumerate() {
            let file = file as u8;
            position.place(square_at(0, file), Piece::new(Side::White, kind));
            position.place(square_at(1, file), Piece::new(Side::White, PieceKind::Pawn));
            position.place(square_at(6, file), Piece::new(Side::Black, PieceKind::Pawn));
            position.place(square_at(7, file), Piece::new(Side::Black, kind));
        }

        position
    }

    /// Puts `piece` on `square`, replacing whatever was there. Setup only;
    /// game moves go through [`Position::apply_move`].
    pub fn place(&mut self, square: Square, piece: Piece) {
        self.squares[square as usize] = Some(piece);
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square as usize]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.squares[square as usize].is_none()
    }

    /// An enemy piece `by` may capture: opposite side and never a king.
    pub(crate) fn is_capturable(&self, square: Square, by: Side) -> bool {
        match self.piece_at(square) {
            Some(piece) => piece.side != by && piece.kind != PieceKind::King,
            None => false,
        }
    }

    pub(crate) fn is_enemy_king(&self, square: Square, of: Side) -> bool {
        match self.piece_at(square) {
            Some(piece) => piece.side != of && piece.kind == PieceKind::King,
            None => false,
        }
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    pub(crate) fn set_to_move(&mut self, side: Side) {
        self.to_move = side;
    }

    pub fn king_square(&self, side: Side) -> Option<Square> {
        Square::iter().find(|&sq| {
            self.piece_at(sq)
                .is_some_and(|p| p.side == side && p.kind == PieceKind::King)
        })
    }

    /// Snapshot of one side's pieces with their squares. Sized to the
    /// board, since a loaded position may hold more than a game-legal
    /// piece count.
    pub fn pieces_of(&self, side: Side) -> ArrayVec<(Square, Piece), 64> {
        let mut pieces = ArrayVec::new();
        for sq in Square::iter() {
            if let Some(piece) = self.piece_at(sq) {
                if piece.side == side {
                    pieces.push((sq, piece));
                }
            }
        }
        pieces
    }

    pub fn occupied(&self) -> SquareSet {
        Square::iter().filter(|&sq| !self.is_empty(sq)).collect()
    }

    /// Moves the piece on `from` to `to`: removes any captured piece, sets
    /// the mover's `has_moved` flag, and flips the side to move. A castling
    /// king step (two files from its start file) brings the rook across.
    ///
    /// No destination legality check happens here; the caller must have
    /// taken `to` from a prior legal-move query, or the position silently
    /// ends up wherever the caller put it.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<(), PositionError> {
        let piece = self
            .piece_at(from)
            .ok_or_else(|| PositionError::MoveNoPiece(from.to_string()))?;

        if piece.side != self.to_move {
            return Err(PositionError::MoveNotToMove(
                piece.side.to_string(),
                from.to_string(),
                to.to_string(),
            ));
        }

        self.squares[to as usize] = Some(Piece {
            has_moved: true,
            ..piece
        });
        self.squares[from as usize] = None;

        if piece.kind == PieceKind::King && from.file() == 4 && from.rank() == to.rank() {
            let rook_hop = match to {
                G1 => Some((H1, F1)),
                C1 => Some((A1, D1)),
                G8 => Some((H8, F8)),
                C8 => Some((A8, D8)),
                _ => None,
            };
            if let Some((rook_from, rook_to)) = rook_hop {
                if let Some(rook) = self.squares[rook_from as usize].take() {
                    self.squares[rook_to as usize] = Some(Piece {
                        has_moved: true,
                        ..rook
                    });
                }
            }
        }

        self.to_move = piece.side.opposite();
        Ok(())
    }
}

fn square_at(rank: u8, file: u8) -> Square {
    Square::from_repr(rank * 8 + file).expect("rank and file in 0..8")
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board_str = String::with_capacity(64 + 7);
        for rank in (0..8).rev() {
            for file in 0..8 {
                let ch = match self.piece_at(square_at(rank, file)) {
                    Some(piece) => piece.to_char(),
                    None => '.',
                };
                board_str.push(ch);
            }
            if rank != 0 {
                board_str.push('\n');
            }
        }
        write!(f, "{}", board_str)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} to move", self, self.to_move)
    }
}
