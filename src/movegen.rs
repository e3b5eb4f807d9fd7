/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use anyhow::{bail, Result};
use arrayvec::ArrayVec;

use crate::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, pawn_pushes, queen_attacks,
    rook_attacks, AttackAnalyzer, Bitboard, Board, CastlingRights, Color, File, Move, MoveList,
    PieceKind, PinResolver, Position, Rank, Square,
};

/// Adds a move from `from` to every square in `targets`.
///
/// Pawn moves onto the far rank are expanded into one move per promotion.
#[inline(always)]
pub(crate) fn push_moves(
    moves: &mut MoveList,
    from: Square,
    targets: Bitboard,
    is_pawn: bool,
    color: Color,
) {
    if is_pawn {
        let promotions = targets & Bitboard::eighth_rank(color);
        for to in targets ^ promotions {
            moves.push(Move::new(from, to, None));
        }
        for to in promotions {
            for kind in PieceKind::promotions() {
                moves.push(Move::new(from, to, Some(kind)));
            }
        }
    } else {
        for to in targets {
            moves.push(Move::new(from, to, None));
        }
    }
}

/// Files that must be empty, and files the King must not be attacked on, for one castle.
struct Castle {
    must_be_empty: &'static [File],
    must_be_safe: [File; 3],
    king_to: File,
}

const SHORT_CASTLE: Castle = Castle {
    must_be_empty: &[File::F, File::G],
    must_be_safe: [File::E, File::F, File::G],
    king_to: File::G,
};

const LONG_CASTLE: Castle = Castle {
    must_be_empty: &[File::B, File::C, File::D],
    must_be_safe: [File::E, File::D, File::C],
    king_to: File::C,
};

/// Generates the legal moves of one side of a [`Board`], except en passant.
///
/// En passant captures are returned separately as candidates, since their legality is
/// decided by playing them out on the [`Position`]. See [`Position::generate_moves`].
struct MoveGenerator<'a> {
    board: &'a Board,
    us: Color,
    king: Square,
    castling_rights: CastlingRights,
    ep_square: Option<Square>,
}

impl<'a> MoveGenerator<'a> {
    fn new(position: &'a Position) -> Self {
        let us = position.side_to_move();
        Self {
            board: position.board(),
            us,
            king: position.king_square(us),
            castling_rights: position.castling_rights(),
            ep_square: position.ep_square(),
        }
    }

    /// Runs the check-status state machine.
    ///
    /// Returns every legal non-en passant move, and the en passant captures that still need verifying.
    fn generate(&self) -> (MoveList, ArrayVec<Move, 2>) {
        let mut moves = MoveList::new();
        let mut en_passant = ArrayVec::new();
        let them = self.us.opponent();

        let checks = AttackAnalyzer::new(self.board).count_attacks(them, self.king, 2);

        self.king_steps(&mut moves);

        if checks.count >= 2 {
            return (moves, en_passant);
        }

        // In check, every non-King move must capture the checker or block its ray
        let restriction = if checks.count == 1 {
            checks.interposition
        } else {
            Bitboard::FULL_BOARD
        };

        let pinned = PinResolver::new(self.board, self.us).resolve(restriction, &mut moves);

        self.pawn_moves(&mut moves, restriction, pinned);
        self.piece_moves(&mut moves, restriction, pinned);

        if checks.count == 0 {
            self.castles(&mut moves);
        }

        if let Some(ep_square) = self.ep_square {
            // Pinned Pawns included; the probe decides
            for from in pawn_attacks(ep_square, them) & self.board.pawns(self.us) {
                en_passant.push(Move::new(from, ep_square, None));
            }
        }

        (moves, en_passant)
    }

    /// King moves to adjacent squares that are not attacked once the King has left its square.
    fn king_steps(&self, moves: &mut MoveList) {
        let without_king = self.board.occupied() ^ self.king;
        let analyzer = AttackAnalyzer::new(self.board).with_occupancy(without_king);
        let them = self.us.opponent();

        let targets = king_attacks(self.king) & !self.board.color(self.us);
        for to in targets {
            if !analyzer.is_attacked(them, to) {
                moves.push(Move::new(self.king, to, None));
            }
        }
    }

    fn pawn_moves(&self, moves: &mut MoveList, restriction: Bitboard, pinned: Bitboard) {
        let occupied = self.board.occupied();
        let enemy = self.board.color(self.us.opponent());

        for from in self.board.pawns(self.us) & !pinned {
            let pushes = pawn_pushes(from, self.us, occupied);
            let captures = pawn_attacks(from, self.us) & enemy;
            push_moves(moves, from, (pushes | captures) & restriction, true, self.us);
        }
    }

    /// Knight, Bishop, Rook, and Queen moves of unpinned pieces.
    fn piece_moves(&self, moves: &mut MoveList, restriction: Bitboard, pinned: Bitboard) {
        let occupied = self.board.occupied();
        let allowed = !self.board.color(self.us) & restriction;

        let movers: [(PieceKind, fn(Square, Bitboard) -> Bitboard); 4] = [
            (PieceKind::Knight, |sq, _| knight_attacks(sq)),
            (PieceKind::Bishop, bishop_attacks),
            (PieceKind::Rook, rook_attacks),
            (PieceKind::Queen, queen_attacks),
        ];

        for (kind, attacks) in movers {
            for from in self.board.pieces(self.us, kind) & !pinned {
                push_moves(moves, from, attacks(from, occupied) & allowed, false, self.us);
            }
        }
    }

    /// Castles, emitted as the King stepping two files. Only called when not in check.
    ///
    /// The Rook's own squares may be attacked; only the King's path must be safe.
    fn castles(&self, moves: &mut MoveList) {
        let rank = Rank::first(self.us);
        let occupied = self.board.occupied();
        let analyzer = AttackAnalyzer::new(self.board);
        let them = self.us.opponent();

        let castles = [
            (CastlingRights::short(self.us), &SHORT_CASTLE),
            (CastlingRights::long(self.us), &LONG_CASTLE),
        ];

        for (right, castle) in castles {
            if !self.castling_rights.contains(right) {
                continue;
            }

            let path_is_clear = castle
                .must_be_empty
                .iter()
                .all(|&file| !occupied.intersects(Square::new(file, rank)));

            let path_is_safe = path_is_clear
                && castle
                    .must_be_safe
                    .iter()
                    .all(|&file| !analyzer.is_attacked(them, Square::new(file, rank)));

            if path_is_safe {
                moves.push(Move::new(self.king, Square::new(castle.king_to, rank), None));
            }
        }
    }
}

impl Position {
    /// Generates every legal move for the side to move.
    ///
    /// En passant captures are verified by applying them, checking the King, and unapplying them,
    /// so `self` is borrowed mutably but is left exactly as it was found.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let mut pos = Position::default();
    /// assert_eq!(pos.generate_moves().len(), 20);
    /// assert_eq!(pos, Position::default());
    /// ```
    pub fn generate_moves(&mut self) -> MoveList {
        let (mut moves, en_passant) = MoveGenerator::new(self).generate();

        for mv in en_passant {
            if self.en_passant_is_legal(mv) {
                moves.push(mv);
            }
        }

        moves
    }

    /// Same as [`Position::generate_moves`], working on a copy of `self`.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let pos = Position::from_fen(FEN_KIWIPETE).unwrap();
    /// assert_eq!(pos.legal_moves().len(), 48);
    /// ```
    #[inline(always)]
    pub fn legal_moves(&self) -> MoveList {
        let mut copy = *self;
        copy.generate_moves()
    }

    /// Plays out an en passant capture. Removing both Pawns from a rank can expose the King to a slider
    /// that no pin scan sees.
    fn en_passant_is_legal(&mut self, mv: Move) -> bool {
        let us = self.side_to_move;
        let undo = self.apply(mv);
        let king = self.board.king_square(us);
        let is_safe = !AttackAnalyzer::new(&self.board).is_attacked(us.opponent(), king);
        self.unapply(mv, undo);
        is_safe
    }

    /// Every enemy piece giving check to the side to move.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let pos = Position::from_fen("3k4/7r/1P6/8/7B/8/3R4/K7 b - - 0 1").unwrap();
    /// assert_eq!(pos.checkers(), Square::D2.bitboard() | Square::H4);
    /// ```
    pub fn checkers(&self) -> Bitboard {
        let us = self.side_to_move;
        AttackAnalyzer::new(&self.board).attackers(us.opponent(), self.board.king_square(us))
    }

    #[inline(always)]
    pub fn is_in_check(&self) -> bool {
        let us = self.side_to_move;
        AttackAnalyzer::new(&self.board).is_attacked(us.opponent(), self.board.king_square(us))
    }

    /// Returns `true` if the side to move is in check and has no legal moves.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// // Fool's mate
    /// let pos = Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
    /// assert!(pos.is_checkmate());
    /// assert!(!pos.is_stalemate());
    /// ```
    pub fn is_checkmate(&self) -> bool {
        self.is_in_check() && self.legal_moves().is_empty()
    }

    /// Returns `true` if the side to move is not in check but has no legal moves.
    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check() && self.legal_moves().is_empty()
    }

    /// Resolves UCI move text, such as `e2e4` or `e7e8q`, to one of the legal moves of this position.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let pos = Position::default();
    /// assert_eq!(pos.parse_move("g1f3").unwrap(), Move::new(Square::G1, Square::F3, None));
    /// assert!(pos.parse_move("e2e5").is_err());
    /// assert!(pos.parse_move("e2").is_err());
    /// ```
    pub fn parse_move(&self, uci: &str) -> Result<Move> {
        let mv = Move::from_uci(uci)?;
        if self.legal_moves().contains(&mv) {
            Ok(mv)
        } else {
            bail!("Illegal move {mv} in position {self}")
        }
    }
}
