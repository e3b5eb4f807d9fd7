/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use tadpole::{AttackAnalyzer, Position, ZobristKey, FEN_KIWIPETE, FEN_STARTPOS};

/// Walks every line to `depth`, checking that each apply keeps the key and board consistent,
/// never leaves the mover in check, and that each unapply restores the exact prior position.
fn walk(position: &mut Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for mv in position.generate_moves() {
        let before = *position;
        let mover = position.side_to_move();

        let undo = position.apply(mv);
        assert_eq!(position.key(), ZobristKey::new(position), "{before} {mv}");
        assert!(position.board().is_consistent(), "{before} {mv}");

        let king = position.king_square(mover);
        assert!(
            !AttackAnalyzer::new(position.board()).is_attacked(mover.opponent(), king),
            "{mv} leaves the King attacked in {before}"
        );

        nodes += walk(position, depth - 1);

        position.unapply(mv, undo);
        assert_eq!(*position, before, "unapplying {mv}");
    }

    nodes
}

#[test]
fn test_startpos_reverses() {
    let mut pos = Position::from_fen(FEN_STARTPOS).unwrap();
    assert_eq!(walk(&mut pos, 3), 8902);
}

#[test]
fn test_kiwipete_reverses() {
    let mut pos = Position::from_fen(FEN_KIWIPETE).unwrap();
    assert_eq!(walk(&mut pos, 3), 97862);
}

#[test]
fn test_promotions_reverse() {
    let mut pos = Position::from_fen("n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1").unwrap();
    assert_eq!(walk(&mut pos, 3), 9483);
}

#[test]
fn test_en_passant_and_castling_reverse() {
    let mut pos =
        Position::from_fen("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1")
            .unwrap();
    assert_eq!(walk(&mut pos, 3), 9467);

    let mut pos = Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
    assert_eq!(walk(&mut pos, 4), 43238);
}

#[test]
fn test_game_replay() {
    // Scholar's mate
    let mut pos = Position::default();
    let mut history = Vec::new();
    for uci in ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"] {
        let mv = pos.parse_move(uci).unwrap();
        history.push((pos, mv, pos.apply(mv)));
    }
    assert!(pos.is_checkmate());
    assert_eq!(
        pos.to_fen(),
        "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4"
    );

    while let Some((before, mv, undo)) = history.pop() {
        pos.unapply(mv, undo);
        assert_eq!(pos, before);
    }
    assert_eq!(pos, Position::default());
}
