use crate::board::Square;
use crate::board::Square::*;
use crate::position::{Piece, PieceKind, Position, Side};

#[derive(thiserror::Error, Debug)]
pub enum FenParseError {
    #[error("char -> piece: got {0}")]
    FromCharPiece(char),

    #[error("num fields: want at least 2 got {0}")]
    NumFields(usize),

    #[error("piece placement: got {0}, err at rank {1}")]
    PiecePlacement(String, usize),

    #[error("side to move: want 'w'|'b' got {0}")]
    SideToMove(String),

    #[error("castling rights: got {0}, err at idx {1}")]
    CastlingRights(String, usize),
}

impl Position {
    /// Builds a position from the placement, side-to-move, and castling
    /// fields of a FEN record. Castling rights land on `has_moved` flags:
    /// a missing right marks that wing's rook as moved, and a side with no
    /// rights at all marks its king as moved. The core tracks no clocks
    /// and no en passant target, so any further fields are ignored.
    pub fn from_fen(fen: &str) -> Result<Self, FenParseError> {
        let fields = fen.split(' ').collect::<Vec<&str>>();

        if fields.len() < 2 {
            Err(FenParseError::NumFields(fields.len()))?
        }

        let mut position = pieces_from_fen(fields[0])?;

        match fields[1] {
            "w" => position.set_to_move(Side::White),
            "b" => position.set_to_move(Side::Black),
            _ => Err(FenParseError::SideToMove(String::from(fields[1])))?,
        }

        let rights = fields.get(2).copied().unwrap_or("-");
        apply_castling_rights(&mut position, rights)?;

        Ok(position)
    }
}

fn pieces_from_fen(placement: &str) -> Result<Position, FenParseError> {
    let ranks = placement.split('/').collect::<Vec<&str>>();
    if ranks.len() != 8 {
        return Err(FenParseError::PiecePlacement(
            placement.to_string(),
            ranks.len(),
        ));
    }

    let mut position = Position::empty();

    // FEN lists ranks top down, 8 to 1
    for (row, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - row as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(skip) = ch.to_digit(10) {
                file += skip as u8;
                continue;
            }

            if file >= 8 {
                return Err(FenParseError::PiecePlacement(placement.to_string(), row));
            }

            let kind = PieceKind::try_from(ch.to_ascii_lowercase())?;
            let side = if ch.is_ascii_uppercase() {
                Side::White
            } else {
                Side::Black
            };

            let square = Square::from_repr(rank * 8 + file)
                .ok_or_else(|| FenParseError::PiecePlacement(placement.to_string(), row))?;
            position.place(square, Piece::new(side, kind));
            file += 1;
        }

        if file != 8 {
            return Err(FenParseError::PiecePlacement(placement.to_string(), row));
        }
    }

    Ok(position)
}

fn apply_castling_rights(position: &mut Position, rights: &str) -> Result<(), FenParseError> {
    let (mut wk, mut wq, mut bk, mut bq) = (false, false, false, false);

    if rights != "-" {
        for (idx, ch) in rights.chars().enumerate() {
            match ch {
                'K' => wk = true,
                'Q' => wq = true,
                'k' => bk = true,
                'q' => bq = true,
                _ => return Err(FenParseError::CastlingRights(rights.to_string(), idx)),
            }
        }
    }

    if !wk {
        mark_moved(position, H1, Side::White, PieceKind::Rook);
    }
    if !wq {
        mark_moved(position, A1, Side::White, PieceKind::Rook);
    }
    if !wk && !wq {
        mark_moved(position, E1, Side::White, PieceKind::King);
    }
    if !bk {
        mark_moved(position, H8, Side::Black, PieceKind::Rook);
    }
    if !bq {
        mark_moved(position, A8, Side::Black, PieceKind::Rook);
    }
    if !bk && !bq {
        mark_moved(position, E8, Side::Black, PieceKind::King);
    }

    Ok(())
}

fn mark_moved(position: &mut Position, square: Square, side: Side, kind: PieceKind) {
    if let Some(piece) = position.piece_at(square) {
        if piece.side == side && piece.kind == kind {
            position.place(
                square,
                Piece {
                    has_moved: true,
                    ..piece
                },
            );
        }
    }
}
