use chess_rules::board::Square::{self, *};
use chess_rules::board::SquareSet;
use chess_rules::game::Game;
use chess_rules::move_gen;
use chess_rules::position::{PieceKind, Position, Side};

use test_case::test_case;
use testresult::TestResult;

#[test]
fn test_opening_selection_sweep() {
    let game = Game::new();

    // Only pawns and knights can act from the start; pawns get exactly
    // their single step, the a1 rook sits behind its own pawn
    for file in 0..8u8 {
        let pawn = Square::from_repr(8 + file).unwrap();
        let dest = Square::from_repr(16 + file).unwrap();
        assert_eq!(game.legal_moves(pawn), SquareSet::from_squares(&[dest]));
    }

    assert_eq!(game.legal_moves(A1), SquareSet::empty());
    assert_eq!(game.legal_moves(C1), SquareSet::empty());
    assert_eq!(game.legal_moves(D1), SquareSet::empty());
    assert_eq!(game.legal_moves(E1), SquareSet::empty());
    assert_eq!(game.legal_moves(B1), SquareSet::from_squares(&[A3, C3]));
    assert_eq!(game.legal_moves(G1), SquareSet::from_squares(&[F3, H3]));
}

#[test]
fn test_bishop_capture_stops_at_pawn() -> TestResult {
    // Lone black pawn two diagonal steps from the bishop, nothing between
    let game = Game::from_position(Position::from_fen("8/8/8/8/3p4/8/1B6/8 w - -")?);

    let got = game.legal_moves(B2);
    assert!(got.contains(D4), "capture square included");
    assert!(!got.contains(E5), "ray stops at the capture");
    Ok(())
}

#[test]
fn test_king_self_check_prevention() -> TestResult {
    let game = Game::from_position(Position::from_fen("8/8/8/8/r7/8/8/1K6 w - -")?);

    let king_moves = game.legal_moves(B1);
    let danger = game.controlled_squares(Side::Black);

    assert!(!king_moves.contains(A1));
    assert!(!king_moves.contains(A2));
    assert_eq!(king_moves & danger, SquareSet::empty());
    Ok(())
}

#[test]
fn test_single_check_invariant() -> TestResult {
    // One imminent check: every non-king answer is a subset of the
    // checker's trajectory
    let position = Position::from_fen("4r3/8/8/8/8/7R/8/3QK3 w - -")?;

    let checks = move_gen::checks_against(&position, Side::White);
    assert_eq!(checks.len(), 1);
    let trajectory = checks[0].trajectory;

    for (from, piece) in position.pieces_of(Side::White) {
        if piece.kind == PieceKind::King {
            continue;
        }
        let moves = move_gen::legal_moves(&position, from);
        for sq in moves.iter() {
            assert!(trajectory.contains(sq), "{} -> {} escapes the check", from, sq);
        }
    }
    Ok(())
}

#[test]
fn test_apply_move_round_trip() -> TestResult {
    let mut game = Game::from_position(Position::from_fen("8/8/8/8/3p4/8/1B6/4K3 w - -")?);

    let moves = game.legal_moves(B2);
    assert!(moves.contains(D4));

    game.apply_move(B2, D4)?;

    let position = game.position();
    assert!(position.is_empty(B2));
    let bishop = position.piece_at(D4).unwrap();
    assert_eq!(bishop.kind, PieceKind::Bishop);
    assert_eq!(bishop.side, Side::White);
    assert!(bishop.has_moved);
    assert_eq!(position.pieces_of(Side::Black).len(), 0);
    assert_eq!(game.to_move(), Side::Black);
    Ok(())
}

#[test_case("4k3/8/8/8/8/8/P6P/R3K2R w KQ -", true, true ; "both rights")]
#[test_case("4k3/8/8/8/8/8/P6P/R3K2R w Q -", false, true ; "king side rook moved")]
#[test_case("4k3/8/8/8/8/8/P6P/R3K2R w K -", true, false ; "queen side rook moved")]
#[test_case("4k3/8/8/8/8/8/P6P/R3K2R w - -", false, false ; "king moved")]
fn test_castling_eligibility(fen: &str, king_side: bool, queen_side: bool) -> TestResult {
    let game = Game::from_position(Position::from_fen(fen)?);

    let got = game.legal_moves(E1);
    assert_eq!(got.contains(G1), king_side, "king side");
    assert_eq!(got.contains(C1), queen_side, "queen side");
    Ok(())
}

#[test]
fn test_short_game_with_castling() -> TestResult {
    let mut game = Game::new();

    for (from, to) in [
        (G1, F3),
        (G8, F6),
        (E2, E3),
        (E7, E6),
        (F1, B5),
        (F8, B4),
    ] {
        assert!(
            game.legal_moves(from).contains(to),
            "{} -> {} not offered",
            from,
            to
        );
        game.apply_move(from, to)?;
    }

    // The bishop on b4 eyes e1 through the d2 pawn: a pin, not a check
    assert!(!game.is_in_check(Side::White));

    let king_moves = game.legal_moves(E1);
    assert!(king_moves.contains(G1), "castling destination missing");

    game.apply_move(E1, G1)?;

    let position = game.position();
    assert_eq!(position.piece_at(G1).unwrap().kind, PieceKind::King);
    assert_eq!(position.piece_at(F1).unwrap().kind, PieceKind::Rook);
    assert!(position.is_empty(H1));
    assert!(position.is_empty(E1));
    assert_eq!(game.to_move(), Side::Black);
    Ok(())
}

#[test]
fn test_pinned_knight_frozen_through_game_api() -> TestResult {
    let game = Game::from_position(Position::from_fen("4r3/8/8/8/4N3/8/8/4K3 w - -")?);

    assert_eq!(game.legal_moves(E4), SquareSet::empty());
    assert!(!game.is_in_check(Side::White));
    Ok(())
}

#[test]
fn test_checkmate_like_position_offers_nothing() -> TestResult {
    // Back-rank mate pattern: king boxed by its own pawns, rook delivers
    let game = Game::from_position(Position::from_fen("8/8/8/8/8/8/5PPP/r5K1 w - -")?);

    assert!(game.is_in_check(Side::White));
    assert_eq!(game.legal_moves(G1), SquareSet::empty());
    assert_eq!(game.legal_moves(F2), SquareSet::empty());
    Ok(())
}
