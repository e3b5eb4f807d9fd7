/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{CastlingRights, Color, Move, Piece, PieceKind, Position, Square, ZobristKey};

/// Everything [`Position::unapply`] needs to reverse one [`Position::apply`].
///
/// Records must be consumed in the reverse order they were produced.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct UndoRecord {
    /// Kind and square of the captured piece. For en passant, the square is not the move's destination.
    captured: Option<(PieceKind, Square)>,

    /// Rook's squares before and after castling.
    castling_rook: Option<(Square, Square)>,

    castling_rights: CastlingRights,
    ep_square: Option<Square>,
    side_to_move: Color,
    halfmove: usize,
    fullmove: usize,

    /// Only checked in debug builds; the key itself is restored incrementally.
    key: ZobristKey,
}

impl UndoRecord {
    /// The piece taken by the move, and where it stood.
    #[inline(always)]
    pub const fn captured(&self) -> Option<(PieceKind, Square)> {
        self.captured
    }

    /// Returns `true` if the move was a castle.
    #[inline(always)]
    pub const fn is_castle(&self) -> bool {
        self.castling_rook.is_some()
    }
}

/// The Rook's squares for a King moving from `from` to `to`, if that is a castle.
#[inline(always)]
fn castling_rook_squares(from: Square, to: Square) -> Option<(Square, Square)> {
    match to.file().index() as i8 - from.file().index() as i8 {
        2 => Some((to.offset(1, 0)?, to.offset(-1, 0)?)),
        -2 => Some((to.offset(-2, 0)?, to.offset(1, 0)?)),
        _ => None,
    }
}

impl Position {
    /// Applies `mv` to this position and returns the record that reverses it.
    ///
    /// `mv` must be a legal move in this position, as produced by [`Position::generate_moves`].
    /// Anything else leaves the position in an unspecified state.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let mut pos = Position::default();
    /// let e2e4 = pos.parse_move("e2e4").unwrap();
    ///
    /// let undo = pos.apply(e2e4);
    /// assert_eq!(pos.to_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    ///
    /// pos.unapply(e2e4, undo);
    /// assert_eq!(pos, Position::default());
    /// ```
    pub fn apply(&mut self, mv: Move) -> UndoRecord {
        let (from, to) = (mv.from(), mv.to());
        let us = self.side_to_move;
        let them = us.opponent();

        let mut undo = UndoRecord {
            captured: None,
            castling_rook: None,
            castling_rights: self.castling_rights,
            ep_square: self.ep_square,
            side_to_move: us,
            halfmove: self.halfmove,
            fullmove: self.fullmove,
            key: self.key,
        };

        let Some(kind) = self.board.kind_of(us, from) else {
            debug_assert!(false, "{mv} does not move a {} piece in {self}", us.name());
            return undo;
        };

        // Old en passant square and rights leave the key; the new ones are hashed in at the end
        self.key.hash_optional_ep_square(self.ep_square);
        self.key.hash_castling_rights(self.castling_rights);

        let victim_square = match self.ep_square {
            Some(ep_square) if kind == PieceKind::Pawn && ep_square == to => {
                ep_square.backward_by(us, 1)
            }
            _ => Some(to),
        };

        if let Some(square) = victim_square {
            if let Some(victim) = self.board.kind_of(them, square) {
                let piece = Piece::new(them, victim);
                self.board.remove(piece, square);
                self.key.hash_piece(square, piece);
                undo.captured = Some((victim, square));
            }
        }

        let mover = Piece::new(us, kind);
        let landed = Piece::new(us, mv.promotion().unwrap_or(kind));
        self.board.remove(mover, from);
        self.key.hash_piece(from, mover);
        self.board.place(landed, to);
        self.key.hash_piece(to, landed);

        if kind == PieceKind::King {
            if let Some((rook_from, rook_to)) = castling_rook_squares(from, to) {
                let rook = Piece::new(us, PieceKind::Rook);
                self.board.relocate(us, PieceKind::Rook, rook_from, rook_to);
                self.key.hash_piece(rook_from, rook);
                self.key.hash_piece(rook_to, rook);
                undo.castling_rook = Some((rook_from, rook_to));
            }
            self.castling_rights.remove(CastlingRights::both(us));
        }

        // A Rook leaving its corner, or being captured on it
        self.castling_rights.remove(CastlingRights::for_rook_square(from));
        self.castling_rights.remove(CastlingRights::for_rook_square(to));

        let is_double_push =
            kind == PieceKind::Pawn && from.rank().index().abs_diff(to.rank().index()) == 2;
        self.ep_square = if is_double_push {
            from.forward_by(us, 1)
        } else {
            None
        };

        if kind == PieceKind::Pawn || undo.captured.is_some() {
            self.halfmove = 0;
        } else {
            self.halfmove += 1;
        }

        if us == Color::Black {
            self.fullmove += 1;
        }

        self.side_to_move = them;
        self.key.hash_side_to_move(us);
        self.key.hash_side_to_move(them);

        self.key.hash_optional_ep_square(self.ep_square);
        self.key.hash_castling_rights(self.castling_rights);

        undo
    }

    /// Reverses `mv`, which must be the most recent move applied, using the record [`Position::apply`] returned for it.
    pub fn unapply(&mut self, mv: Move, undo: UndoRecord) {
        let (from, to) = (mv.from(), mv.to());
        let us = undo.side_to_move;
        let them = us.opponent();

        let Some(landed) = self.board.kind_of(us, to) else {
            debug_assert!(false, "{mv} was not the last move applied to {self}");
            return;
        };

        self.key.hash_optional_ep_square(self.ep_square);
        self.key.hash_castling_rights(self.castling_rights);
        self.key.hash_side_to_move(self.side_to_move);
        self.key.hash_side_to_move(us);

        if let Some((rook_from, rook_to)) = undo.castling_rook {
            let rook = Piece::new(us, PieceKind::Rook);
            self.board.relocate(us, PieceKind::Rook, rook_to, rook_from);
            self.key.hash_piece(rook_to, rook);
            self.key.hash_piece(rook_from, rook);
        }

        let mover = if mv.promotion().is_some() {
            PieceKind::Pawn
        } else {
            landed
        };
        let landed = Piece::new(us, landed);
        let mover = Piece::new(us, mover);
        self.board.remove(landed, to);
        self.key.hash_piece(to, landed);
        self.board.place(mover, from);
        self.key.hash_piece(from, mover);

        if let Some((victim, square)) = undo.captured {
            let piece = Piece::new(them, victim);
            self.board.place(piece, square);
            self.key.hash_piece(square, piece);
        }

        self.side_to_move = us;
        self.castling_rights = undo.castling_rights;
        self.ep_square = undo.ep_square;
        self.halfmove = undo.halfmove;
        self.fullmove = undo.fullmove;

        self.key.hash_optional_ep_square(self.ep_square);
        self.key.hash_castling_rights(self.castling_rights);

        debug_assert_eq!(self.key, undo.key, "unapplying {mv} did not restore the key");
    }

    /// Returns a copy of this position with `mv` applied.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let pos = Position::default();
    /// let next = pos.with_move_applied(pos.parse_move("g1f3").unwrap());
    /// assert_eq!(next.side_to_move(), Color::Black);
    /// assert_eq!(next.halfmove(), 1);
    /// ```
    #[inline(always)]
    pub fn with_move_applied(&self, mv: Move) -> Self {
        let mut copy = *self;
        copy.apply(mv);
        copy
    }
}
