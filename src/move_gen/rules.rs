use log::debug;

use crate::board::Direction;
use crate::board::{Square, SquareSet};
use crate::position::{PieceKind, Position, Side};

use super::movable;

/// One enemy piece with a trajectory aimed at a king.
///
/// `controlled` marks a trajectory interposed by exactly one piece of the
/// king's own side: not a live check yet, but the interposer is pinned to
/// the ray. Trajectories smothered by the attacker's own pieces, or by
/// two or more blockers, are no threat and are discarded before they get
/// here.
#[derive(Debug, Clone, Copy)]
pub struct Check {
    pub attacker: Square,
    pub trajectory: SquareSet,
    pub controlled: bool,
}

/// Every check trajectory currently aimed at `side`'s king, classified.
pub fn checks_against(position: &Position, side: Side) -> Vec<Check> {
    let mut checks = Vec::new();
    if position.king_square(side).is_none() {
        return checks;
    }

    for (from, piece) in position.pieces_of(side.opposite()) {
        let trajectory = movable(piece.kind).check_moves(position, from);
        if trajectory.is_empty() {
            continue;
        }

        let mut defenders = 0;
        let mut attackers = 0;
        for sq in trajectory.iter().filter(|&sq| sq != from) {
            if let Some(blocker) = position.piece_at(sq) {
                if blocker.side == side {
                    defenders += 1;
                } else {
                    attackers += 1;
                }
            }
        }

        match (defenders, attackers) {
            (0, 0) => checks.push(Check {
                attacker: from,
                trajectory,
                controlled: false,
            }),
            (1, 0) => checks.push(Check {
                attacker: from,
                trajectory,
                controlled: true,
            }),
            _ => (),
        }
    }

    checks
}

/// True when some enemy piece delivers an unblocked check against
/// `side`'s king.
pub fn is_in_check(position: &Position, side: Side) -> bool {
    checks_against(position, side).iter().any(|c| !c.controlled)
}

/// Union of the squares `side`'s pieces threaten or defend. Recomputed
/// from the whole position on every call; nothing is cached across
/// mutations.
pub fn controlled_squares(position: &Position, side: Side) -> SquareSet {
    position
        .pieces_of(side)
        .iter()
        .fold(SquareSet::empty(), |acc, &(from, piece)| {
            acc | movable(piece.kind).controlled_moves(position, from)
        })
}

/// Legal destinations for the piece on `from`, combining its movement
/// pattern with king safety and check resolution. Empty when `from` is
/// empty. Side-to-move filtering is the caller's concern; this answers
/// for whichever piece is selected.
pub fn legal_moves(position: &Position, from: Square) -> SquareSet {
    let Some(piece) = position.piece_at(from) else {
        return SquareSet::empty();
    };
    let side = piece.side;
    let mut moves = movable(piece.kind).moves(position, from);

    if piece.kind == PieceKind::King {
        // Never into an attacked square, whatever currently occupies it
        let danger = controlled_squares(position, side.opposite());
        moves -= danger;
        return moves | castling_moves(position, from, danger);
    }

    let checks = checks_against(position, side);
    if checks.is_empty() {
        return moves;
    }

    let check_set = checks
        .iter()
        .fold(SquareSet::empty(), |acc, c| acc | c.trajectory);
    let imminent = checks.iter().filter(|c| !c.controlled).count();
    let controlled = checks.len() - imminent;
    debug!(
        "{} checks against {}: {} imminent, {} controlled",
        checks.len(),
        side,
        imminent,
        controlled
    );

    if imminent == 0 {
        // Pins only: a piece standing on a trajectory stays on it
        if let Some(pin) = checks.iter().find(|c| c.trajectory.contains(from)) {
            return moves & pin.trajectory;
        }
        return moves;
    }

    if imminent == 1 && (check_set.contains(from) || controlled == 0) {
        // Capture the attacker or interpose on the trajectory
        return moves & check_set;
    }

    if imminent > 1 && imminent == controlled {
        // Each checker individually blockable: only a square covering
        // every imminent trajectory at once helps
        let cover = checks
            .iter()
            .filter(|c| !c.controlled)
            .map(|c| c.trajectory)
            .reduce(|acc, t| acc & t)
            .unwrap_or_else(SquareSet::empty);
        return moves & cover;
    }

    // Uncontrolled multiple check: only the king moves
    SquareSet::empty()
}

/// Castling destinations for the king on `king_sq`, at most one per wing.
/// Requires an unmoved, unchecked king, an unmoved rook on the wing's
/// corner, and every square strictly between them empty and outside
/// `danger` (the aggregated enemy controlled set).
pub fn castling_moves(position: &Position, king_sq: Square, danger: SquareSet) -> SquareSet {
    let mut destinations = SquareSet::empty();

    let Some(king) = position.piece_at(king_sq) else {
        return destinations;
    };
    if king.kind != PieceKind::King || king.has_moved {
        return destinations;
    }
    if is_in_check(position, king.side) {
        return destinations;
    }

    for dir in [Direction::East, Direction::West] {
        if let Some(dest) = castling_wing(position, king_sq, king.side, dir, danger) {
            destinations.insert(dest);
        }
    }

    destinations
}

fn castling_wing(
    position: &Position,
    king_sq: Square,
    side: Side,
    dir: Direction,
    danger: SquareSet,
) -> Option<Square> {
    // Walk from the king toward the board edge; the wing's rook must be
    // the first piece met, sitting on the corner
    let mut cursor = king_sq.step(dir)?;
    loop {
        if let Some(piece) = position.piece_at(cursor) {
            let on_corner = cursor.is_left_edge() || cursor.is_right_edge();
            if piece.side == side && piece.kind == PieceKind::Rook && !piece.has_moved && on_corner
            {
                break;
            }
            return None;
        }
        if danger.contains(cursor) {
            return None;
        }
        cursor = cursor.step(dir)?;
    }

    king_sq
        .step(dir)
        .and_then(|sq| sq.step(dir))
        .filter(|&sq| position.is_empty(sq))
}
