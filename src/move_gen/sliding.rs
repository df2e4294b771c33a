use crate::board::Direction::{self, *};
use crate::board::{Square, SquareSet};
use crate::position::{Position, Side};

use super::Movable;

const BISHOP_RAYS: [Direction; 4] = [NorthEast, NorthWest, SouthEast, SouthWest];
const ROOK_RAYS: [Direction; 4] = [North, South, East, West];

/// Ray destinations for `moves`: advance until the edge, a friendly piece
/// (excluded), or a capturable enemy piece (included) halts the ray.
fn ray_moves(position: &Position, from: Square, side: Side, rays: [Direction; 4]) -> SquareSet {
    let mut moves = SquareSet::empty();

    for dir in rays {
        let mut cursor = from;
        while let Some(sq) = cursor.step(dir) {
            if position.is_empty(sq) {
                moves.insert(sq);
                cursor = sq;
                continue;
            }
            if position.is_capturable(sq, side) {
                moves.insert(sq);
            }
            break;
        }
    }

    moves
}

/// Controlled rays project to the board edge through any occupancy.
fn ray_controlled(from: Square, rays: [Direction; 4]) -> SquareSet {
    let mut controlled = SquareSet::empty();

    for dir in rays {
        let mut cursor = from;
        while let Some(sq) = cursor.step(dir) {
            controlled.insert(sq);
            cursor = sq;
        }
    }

    controlled
}

/// Scans each ray through occupied squares for the enemy king; a hit
/// yields the trajectory: `from` plus every square strictly between.
fn ray_checks(position: &Position, from: Square, side: Side, rays: [Direction; 4]) -> SquareSet {
    for dir in rays {
        let mut between = SquareSet::empty();
        let mut cursor = from;

        while let Some(sq) = cursor.step(dir) {
            if position.is_enemy_king(sq, side) {
                between.insert(from);
                return between;
            }
            between.insert(sq);
            cursor = sq;
        }
    }

    SquareSet::empty()
}

pub(super) struct BishopMoves;
pub(super) struct RookMoves;
pub(super) struct QueenMoves;

pub(super) static BISHOP: BishopMoves = BishopMoves;
pub(super) static ROOK: RookMoves = RookMoves;
pub(super) static QUEEN: QueenMoves = QueenMoves;

impl Movable for BishopMoves {
    fn moves(&self, position: &Position, from: Square) -> SquareSet {
        match position.piece_at(from) {
            Some(piece) => ray_moves(position, from, piece.side, BISHOP_RAYS),
            None => SquareSet::empty(),
        }
    }

    fn controlled_moves(&self, position: &Position, from: Square) -> SquareSet {
        match position.piece_at(from) {
            Some(_) => ray_controlled(from, BISHOP_RAYS),
            None => SquareSet::empty(),
        }
    }

    fn check_moves(&self, position: &Position, from: Square) -> SquareSet {
        match position.piece_at(from) {
            Some(piece) => ray_checks(position, from, piece.side, BISHOP_RAYS),
            None => SquareSet::empty(),
        }
    }
}

impl Movable for RookMoves {
    fn moves(&self, position: &Position, from: Square) -> SquareSet {
        match position.piece_at(from) {
            Some(piece) => ray_moves(position, from, piece.side, ROOK_RAYS),
            None => SquareSet::empty(),
        }
    }

    fn controlled_moves(&self, position: &Position, from: Square) -> SquareSet {
        match position.piece_at(from) {
            Some(_) => ray_controlled(from, ROOK_RAYS),
            None => SquareSet::empty(),
        }
    }

    fn check_moves(&self, position: &Position, from: Square) -> SquareSet {
        match position.piece_at(from) {
            Some(piece) => ray_checks(position, from, piece.side, ROOK_RAYS),
            None => SquareSet::empty(),
        }
    }
}

// The queen unions the bishop and rook on the same square; no geometry of
// its own
impl Movable for QueenMoves {
    fn moves(&self, position: &Position, from: Square) -> SquareSet {
        BISHOP.moves(position, from) | ROOK.moves(position, from)
    }

    fn controlled_moves(&self, position: &Position, from: Square) -> SquareSet {
        BISHOP.controlled_moves(position, from) | ROOK.controlled_moves(position, from)
    }

    fn check_moves(&self, position: &Position, from: Square) -> SquareSet {
        BISHOP.check_moves(position, from) | ROOK.check_moves(position, from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{Piece, PieceKind};
    use test_case::test_case;

    use Square::*;

    fn lone(side: Side, kind: PieceKind, at: Square) -> Position {
        let mut position = Position::empty();
        position.place(at, Piece::new(side, kind));
        position
    }

    #[test]
    fn test_bishop_open_board() {
        let position = lone(Side::White, PieceKind::Bishop, D4);
        let want = SquareSet::from_squares(&[
            E5, F6, G7, H8, C5, B6, A7, E3, F2, G1, C3, B2, A1,
        ]);
        assert_eq!(BISHOP.moves(&position, D4), want);
    }

    #[test]
    fn test_bishop_capture_halts_ray() {
        let mut position = lone(Side::White, PieceKind::Bishop, B1);
        position.place(D3, Piece::new(Side::Black, PieceKind::Pawn));

        let got = BISHOP.moves(&position, B1);
        // The pawn's square is included, nothing beyond it
        assert!(got.contains(D3));
        assert!(!got.contains(E4));
        assert_eq!(got, SquareSet::from_squares(&[A2, C2, D3]));
    }

    #[test]
    fn test_bishop_friendly_halts_ray() {
        let mut position = lone(Side::White, PieceKind::Bishop, B1);
        position.place(D3, Piece::new(Side::White, PieceKind::Pawn));

        let got = BISHOP.moves(&position, B1);
        assert_eq!(got, SquareSet::from_squares(&[A2, C2]));
    }

    #[test]
    fn test_bishop_king_halts_ray_uncaptured() {
        let mut position = lone(Side::White, PieceKind::Bishop, B1);
        position.place(D3, Piece::new(Side::Black, PieceKind::King));

        let got = BISHOP.moves(&position, B1);
        assert_eq!(got, SquareSet::from_squares(&[A2, C2]));
    }

    #[test]
    fn test_rook_moves() {
        let mut position = lone(Side::White, PieceKind::Rook, D4);
        position.place(D6, Piece::new(Side::Black, PieceKind::Pawn));
        position.place(F4, Piece::new(Side::White, PieceKind::Pawn));

        let want = SquareSet::from_squares(&[D5, D6, D3, D2, D1, C4, B4, A4, E4]);
        assert_eq!(ROOK.moves(&position, D4), want);
    }

    #[test]
    fn test_rook_controlled_through_pieces() {
        let mut position = lone(Side::Black, PieceKind::Rook, A8);
        position.place(A5, Piece::new(Side::White, PieceKind::Pawn));
        position.place(A2, Piece::new(Side::Black, PieceKind::Pawn));

        let got = ROOK.controlled_moves(&position, A8);
        // Rays run to the edge regardless of occupancy
        let want = SquareSet::from_squares(&[
            A7, A6, A5, A4, A3, A2, A1, B8, C8, D8, E8, F8, G8, H8,
        ]);
        assert_eq!(got, want);
    }

    #[test]
    fn test_queen_unions_bishop_and_rook() {
        let position = lone(Side::White, PieceKind::Queen, D4);
        let want = BISHOP.moves(&position, D4) | ROOK.moves(&position, D4);
        assert_eq!(QUEEN.moves(&position, D4), want);
        assert_eq!(want.len(), 27);
    }

    #[test_case(A1, E1, SquareSet::from_squares(&[A1, B1, C1, D1]) ; "open file")]
    #[test_case(A1, A8, SquareSet::from_squares(&[A1, A2, A3, A4, A5, A6, A7]) ; "open rank")]
    fn test_rook_check_trajectory(rook: Square, king: Square, want: SquareSet) {
        let mut position = lone(Side::Black, PieceKind::Rook, rook);
        position.place(king, Piece::new(Side::White, PieceKind::King));

        assert_eq!(ROOK.check_moves(&position, rook), want);
    }

    #[test]
    fn test_check_trajectory_runs_through_blockers() {
        let mut position = lone(Side::Black, PieceKind::Rook, E8);
        position.place(E1, Piece::new(Side::White, PieceKind::King));
        position.place(E4, Piece::new(Side::White, PieceKind::Knight));

        let got = ROOK.check_moves(&position, E8);
        let want = SquareSet::from_squares(&[E8, E7, E6, E5, E4, E3, E2]);
        assert_eq!(got, want);
    }

    #[test]
    fn test_no_check_no_trajectory() {
        let mut position = lone(Side::Black, PieceKind::Bishop, A1);
        position.place(E2, Piece::new(Side::White, PieceKind::King));

        assert_eq!(BISHOP.check_moves(&position, A1), SquareSet::empty());
    }
}
