use crate::board::Direction::{self, *};
use crate::board::{Square, SquareSet};
use crate::position::{Position, Side};

use super::Movable;

/// The eight L-jumps, written as step sequences so each leg gets the
/// file-edge guard. A jump crossing two files dies at either boundary.
const KNIGHT_JUMPS: [[Direction; 3]; 8] = [
    [North, North, East],
    [North, North, West],
    [South, South, East],
    [South, South, West],
    [North, East, East],
    [North, West, West],
    [South, East, East],
    [South, West, West],
];

const KING_STEPS: [Direction; 8] = [
    North, South, East, West, NorthEast, NorthWest, SouthEast, SouthWest,
];

fn pawn_forward(side: Side) -> Direction {
    match side {
        Side::White => North,
        Side::Black => South,
    }
}

fn pawn_captures(side: Side) -> [Direction; 2] {
    match side {
        Side::White => [NorthWest, NorthEast],
        Side::Black => [SouthWest, SouthEast],
    }
}

pub(super) struct PawnMoves;
pub(super) struct KnightMoves;
pub(super) struct KingMoves;

pub(super) static PAWN: PawnMoves = PawnMoves;
pub(super) static KNIGHT: KnightMoves = KnightMoves;
pub(super) static KING: KingMoves = KingMoves;

impl Movable for PawnMoves {
    fn moves(&self, position: &Position, from: Square) -> SquareSet {
        let Some(piece) = position.piece_at(from) else {
            return SquareSet::empty();
        };
        let mut moves = SquareSet::empty();

        // One step forward onto an empty square; no opening double step
        if let Some(sq) = from.step(pawn_forward(piece.side)) {
            if position.is_empty(sq) {
                moves.insert(sq);
            }
        }

        for dir in pawn_captures(piece.side) {
            if let Some(sq) = from.step(dir) {
                if position.is_capturable(sq, piece.side) {
                    moves.insert(sq);
                }
            }
        }

        moves
    }

    fn controlled_moves(&self, position: &Position, from: Square) -> SquareSet {
        let Some(piece) = position.piece_at(from) else {
            return SquareSet::empty();
        };

        pawn_captures(piece.side)
            .into_iter()
            .filter_map(|dir| from.step(dir))
            .collect()
    }

    fn check_moves(&self, position: &Position, from: Square) -> SquareSet {
        let Some(piece) = position.piece_at(from) else {
            return SquareSet::empty();
        };

        let checks = pawn_captures(piece.side)
            .into_iter()
            .filter_map(|dir| from.step(dir))
            .any(|sq| position.is_enemy_king(sq, piece.side));

        if checks {
            SquareSet::from_squares(&[from])
        } else {
            SquareSet::empty()
        }
    }
}

impl Movable for KnightMoves {
    fn moves(&self, position: &Position, from: Square) -> SquareSet {
        let Some(piece) = position.piece_at(from) else {
            return SquareSet::empty();
        };

        KNIGHT_JUMPS
            .iter()
            .filter_map(|jump| from.walk(jump))
            .filter(|&sq| position.is_empty(sq) || position.is_capturable(sq, piece.side))
            .collect()
    }

    fn controlled_moves(&self, position: &Position, from: Square) -> SquareSet {
        if position.piece_at(from).is_none() {
            return SquareSet::empty();
        }

        KNIGHT_JUMPS
            .iter()
            .filter_map(|jump| from.walk(jump))
            .collect()
    }

    fn check_moves(&self, position: &Position, from: Square) -> SquareSet {
        let Some(piece) = position.piece_at(from) else {
            return SquareSet::empty();
        };

        let checks = KNIGHT_JUMPS
            .iter()
            .filter_map(|jump| from.walk(jump))
            .any(|sq| position.is_enemy_king(sq, piece.side));

        if checks {
            SquareSet::from_squares(&[from])
        } else {
            SquareSet::empty()
        }
    }
}

impl Movable for KingMoves {
    fn moves(&self, position: &Position, from: Square) -> SquareSet {
        let Some(piece) = position.piece_at(from) else {
            return SquareSet::empty();
        };

        KING_STEPS
            .into_iter()
            .filter_map(|dir| from.step(dir))
            .filter(|&sq| position.is_empty(sq) || position.is_capturable(sq, piece.side))
            .collect()
    }

    // Occupancy-independent: defended friendly squares still bar the
    // enemy king from stepping next door
    fn controlled_moves(&self, position: &Position, from: Square) -> SquareSet {
        if position.piece_at(from).is_none() {
            return SquareSet::empty();
        }

        KING_STEPS
            .into_iter()
            .filter_map(|dir| from.step(dir))
            .collect()
    }

    fn check_moves(&self, _position: &Position, _from: Square) -> SquareSet {
        SquareSet::empty()
    }
}
