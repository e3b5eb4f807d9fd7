/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, ray_between, rook_attacks,
    Bitboard, Board, Color, Square,
};

/// The result of [`AttackAnalyzer::count_attacks`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct AttackCount {
    /// Number of attackers found before the search stopped.
    pub count: u8,

    /// Squares that block or capture every counted attacker: each attacker's own square,
    /// plus the squares strictly between a sliding attacker and the target.
    pub interposition: Bitboard,
}

/// Answers "who attacks this square?" for a [`Board`].
///
/// Occupancy defaults to the board's own, but may be overridden with
/// [`AttackAnalyzer::with_occupancy`]. King safety uses this to look through the King's own
/// square, so a King cannot step backwards along the line of a checking slider.
///
/// # Example
/// ```
/// # use tadpole::*;
/// let pos = Position::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").unwrap();
/// let analyzer = AttackAnalyzer::new(pos.board());
///
/// let checks = analyzer.count_attacks(Color::Black, Square::E1, 2);
/// assert_eq!(checks.count, 1);
/// assert_eq!(checks.interposition, Square::A1.bitboard() | Square::B1 | Square::C1 | Square::D1);
///
/// // F1 is shielded by the King, unless the King is looked through
/// assert!(!analyzer.is_attacked(Color::Black, Square::F1));
/// let without_king = pos.occupied() ^ Square::E1;
/// assert!(analyzer.with_occupancy(without_king).is_attacked(Color::Black, Square::F1));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct AttackAnalyzer<'a> {
    board: &'a Board,
    occupied: Bitboard,
}

impl<'a> AttackAnalyzer<'a> {
    #[inline(always)]
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            occupied: board.occupied(),
        }
    }

    /// Uses `occupied` as the set of blockers for sliding attacks, instead of the board's own.
    #[inline(always)]
    pub fn with_occupancy(self, occupied: Bitboard) -> Self {
        Self { occupied, ..self }
    }

    /// Counts the pieces of `attacker` that attack `target`, stopping as soon as `threshold` are found.
    ///
    /// Attackers are examined in the order knights, diagonal sliders, orthogonal sliders, king, pawns.
    /// A `threshold` of `1` answers "is this square attacked?"; `2` separates no check, single check and
    /// double check.
    pub fn count_attacks(&self, attacker: Color, target: Square, threshold: u8) -> AttackCount {
        let mut result = AttackCount::default();
        if threshold == 0 {
            return result;
        }

        let found = |attackers: Bitboard, result: &mut AttackCount, slides: bool| -> bool {
            for square in attackers {
                result.count += 1;
                result.interposition |= square;
                if slides {
                    result.interposition |= ray_between(square, target);
                }
                if result.count >= threshold {
                    return true;
                }
            }
            false
        };

        let knights = knight_attacks(target) & self.board.knights(attacker);
        if found(knights, &mut result, false) {
            return result;
        }

        let diagonal = bishop_attacks(target, self.occupied) & self.board.diagonal_sliders(attacker);
        if found(diagonal, &mut result, true) {
            return result;
        }

        let orthogonal = rook_attacks(target, self.occupied) & self.board.orthogonal_sliders(attacker);
        if found(orthogonal, &mut result, true) {
            return result;
        }

        let king = king_attacks(target) & self.board.king(attacker);
        if found(king, &mut result, false) {
            return result;
        }

        // A Pawn of `attacker` hits `target` from wherever a Pawn of the other color on `target` would hit
        let pawns = pawn_attacks(target, attacker.opponent()) & self.board.pawns(attacker);
        found(pawns, &mut result, false);

        result
    }

    /// Returns `true` if any piece of `attacker` attacks `target`.
    #[inline(always)]
    pub fn is_attacked(&self, attacker: Color, target: Square) -> bool {
        self.count_attacks(attacker, target, 1).count > 0
    }

    /// Returns `true` if any square of `targets` is attacked by `attacker`.
    #[inline(always)]
    pub fn any_attacked(&self, attacker: Color, targets: Bitboard) -> bool {
        targets
            .into_iter()
            .any(|target| self.is_attacked(attacker, target))
    }

    /// Every piece of `attacker` that attacks `target`.
    pub fn attackers(&self, attacker: Color, target: Square) -> Bitboard {
        (knight_attacks(target) & self.board.knights(attacker))
            | (bishop_attacks(target, self.occupied) & self.board.diagonal_sliders(attacker))
            | (rook_attacks(target, self.occupied) & self.board.orthogonal_sliders(attacker))
            | (king_attacks(target) & self.board.king(attacker))
            | (pawn_attacks(target, attacker.opponent()) & self.board.pawns(attacker))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Position, FEN_KIWIPETE};

    fn analyze(fen: &str, attacker: Color, target: Square, threshold: u8) -> AttackCount {
        let pos = Position::from_fen(fen).unwrap();
        AttackAnalyzer::new(pos.board()).count_attacks(attacker, target, threshold)
    }

    #[test]
    fn test_unattacked_square() {
        let count = analyze(FEN_KIWIPETE, Color::Black, Square::E1, 2);
        assert_eq!(count, AttackCount::default());
    }

    #[test]
    fn test_pawn_direction() {
        // White pawn on e4 attacks d5 and f5, never d3
        let fen = "4k3/8/8/8/4P3/8/8/4K3 w - - 0 1";
        assert_eq!(analyze(fen, Color::White, Square::D5, 1).count, 1);
        assert_eq!(analyze(fen, Color::White, Square::F5, 1).count, 1);
        assert_eq!(analyze(fen, Color::White, Square::D3, 1).count, 0);

        let fen = "4k3/8/8/3p4/8/8/8/4K3 w - - 0 1";
        assert_eq!(analyze(fen, Color::Black, Square::E4, 1).count, 1);
        assert_eq!(analyze(fen, Color::Black, Square::E6, 1).count, 0);
    }

    #[test]
    fn test_double_check_interposition() {
        // Rook on h7 is not aligned; rook on d2 and bishop on h4 both give check to d8
        let fen = "3k4/7r/1P6/8/7B/8/3R4/K7 b - - 0 0";
        let count = analyze(fen, Color::White, Square::D8, 3);
        assert_eq!(count.count, 2);

        let expected_rook: Bitboard = [Square::D2, Square::D3, Square::D4, Square::D5, Square::D6, Square::D7]
            .into_iter()
            .collect();
        let expected_bishop: Bitboard = [Square::H4, Square::G5, Square::F6, Square::E7]
            .into_iter()
            .collect();
        assert_eq!(count.interposition, expected_rook | expected_bishop);
    }

    #[test]
    fn test_threshold_stops_early() {
        let fen = "3k4/7r/1P6/8/7B/8/3R4/K7 b - - 0 0";
        let count = analyze(fen, Color::White, Square::D8, 1);
        assert_eq!(count.count, 1);
        // The bishop is examined before the rook
        assert!(count.interposition.intersects(Square::H4));
        assert!(!count.interposition.intersects(Square::D2));

        assert_eq!(analyze(fen, Color::White, Square::D8, 0).count, 0);
    }

    #[test]
    fn test_knight_check_has_no_ray() {
        let fen = "4k3/8/3N4/8/8/8/8/4K3 b - - 0 1";
        let count = analyze(fen, Color::White, Square::E8, 2);
        assert_eq!(count.count, 1);
        assert_eq!(count.interposition, Square::D6.bitboard());
    }

    #[test]
    fn test_attackers_set() {
        let pos = Position::from_fen("3k4/7r/1P6/8/7B/8/3R4/K7 b - - 0 0").unwrap();
        let analyzer = AttackAnalyzer::new(pos.board());
        assert_eq!(
            analyzer.attackers(Color::White, Square::D8),
            Square::D2.bitboard() | Square::H4
        );
        assert!(analyzer.any_attacked(Color::White, Square::A8.bitboard() | Square::C7));
        assert!(!analyzer.any_attacked(Color::White, Square::F8.bitboard()));
    }
}
