/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use super::{Board, CastlingRights, Color, Piece, Position, Rank, Square, XoShiRo};

/// Hash keys for [`Position`]s, generated at compile time from fixed seeds.
const ZOBRIST_TABLE: ZobristHashTable = ZobristHashTable::new();

/// A 64-bit Zobrist hash of a [`Position`].
///
/// The key covers piece placement, side to move, castling rights, and the en passant square.
/// Move counters are not part of it.
#[derive(Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct ZobristKey(u64);

impl ZobristKey {
    /// Computes a [`ZobristKey`] from scratch for the supplied [`Position`].
    ///
    /// [`Position::apply`](crate::Position::apply) maintains the key incrementally; this is the reference it must agree with.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let pos = Position::default();
    /// assert_eq!(ZobristKey::new(&pos), pos.key());
    /// assert_ne!(pos.key().inner(), 0);
    /// ```
    pub fn new(position: &Position) -> Self {
        Self::from_parts(
            position.board(),
            position.ep_square(),
            position.castling_rights(),
            position.side_to_move(),
        )
    }

    /// Computes a [`ZobristKey`] from the individual components of a [`Position`].
    pub fn from_parts(
        board: &Board,
        ep_square: Option<Square>,
        castling_rights: CastlingRights,
        side_to_move: Color,
    ) -> Self {
        let mut key = Self::default();

        for (square, piece) in board.iter() {
            key.hash_piece(square, piece);
        }

        key.hash_optional_ep_square(ep_square);
        key.hash_castling_rights(castling_rights);
        key.hash_side_to_move(side_to_move);

        key
    }

    #[inline(always)]
    pub const fn inner(&self) -> u64 {
        self.0
    }

    /// Toggles `hash_key` in or out of this [`ZobristKey`].
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let mut key = ZobristKey::default();
    /// key.hash(42);
    /// assert_ne!(key.inner(), 0);
    /// key.hash(42);
    /// assert_eq!(key.inner(), 0);
    /// ```
    #[inline(always)]
    pub fn hash(&mut self, hash_key: u64) {
        self.0 ^= hash_key;
    }

    /// Toggles `piece` on `square`.
    #[inline(always)]
    pub fn hash_piece(&mut self, square: Square, piece: Piece) {
        self.hash(ZOBRIST_TABLE.piece_keys[square][piece]);
    }

    /// Toggles the en passant square.
    ///
    /// Only squares on the third and sixth ranks carry a key; every other square hashes to nothing.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let mut e3 = ZobristKey::default();
    /// e3.hash_ep_square(Square::E3);
    /// assert_ne!(e3.inner(), 0);
    ///
    /// let mut e4 = ZobristKey::default();
    /// e4.hash_ep_square(Square::E4);
    /// assert_eq!(e4.inner(), 0);
    /// ```
    #[inline(always)]
    pub fn hash_ep_square(&mut self, ep_square: Square) {
        self.hash(ZOBRIST_TABLE.ep_keys[ep_square]);
    }

    /// Same as [`ZobristKey::hash_ep_square`], doing nothing for `None`.
    #[inline(always)]
    pub fn hash_optional_ep_square(&mut self, ep_square: Option<Square>) {
        // a1 has no key, so it stands in for "no square"
        self.hash_ep_square(ep_square.unwrap_or_default());
    }

    /// Toggles the key for the full set of `castling_rights`.
    #[inline(always)]
    pub fn hash_castling_rights(&mut self, castling_rights: CastlingRights) {
        self.hash(ZOBRIST_TABLE.castling_keys[castling_rights.index()]);
    }

    /// Toggles the side-to-move key. White has no key, so only Black changes anything.
    #[inline(always)]
    pub fn hash_side_to_move(&mut self, color: Color) {
        self.hash(ZOBRIST_TABLE.color_keys[color]);
    }
}

impl fmt::Display for ZobristKey {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

struct ZobristHashTable {
    piece_keys: [[u64; Piece::COUNT]; Square::COUNT],
    ep_keys: [u64; Square::COUNT],
    castling_keys: [u64; CastlingRights::COUNT],
    color_keys: [u64; Color::COUNT],
}

impl ZobristHashTable {
    const fn new() -> Self {
        let mut piece_keys = [[0; Piece::COUNT]; Square::COUNT];
        let mut ep_keys = [0; Square::COUNT];
        let mut castling_keys = [0; CastlingRights::COUNT];
        let mut color_keys = [0; Color::COUNT];

        let mut prng = XoShiRo::new();

        let mut i = 0;
        while i < Square::COUNT {
            let mut j = 0;
            while j < Piece::COUNT {
                let key;
                (key, prng) = prng.next_const();
                piece_keys[i][j] = key;
                j += 1;
            }

            let rank = Square::from_index_unchecked(i).rank();
            if rank.0 == Rank::THREE.0 || rank.0 == Rank::SIX.0 {
                let key;
                (key, prng) = prng.next_const();
                ep_keys[i] = key;
            }

            i += 1;
        }

        i = 0;
        while i < CastlingRights::COUNT {
            let key;
            (key, prng) = prng.next_const();
            castling_keys[i] = key;
            i += 1;
        }

        let (key, _) = prng.next_const();
        color_keys[Color::Black.index()] = key;

        Self {
            piece_keys,
            ep_keys,
            castling_keys,
            color_keys,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::PieceKind;

    #[test]
    fn test_piece_keys_are_distinct() {
        let pawn = Piece::new(Color::Black, PieceKind::Pawn);
        let rook = Piece::new(Color::Black, PieceKind::Rook);
        let white_pawn = Piece::new(Color::White, PieceKind::Pawn);

        let key = |square, piece| {
            let mut key = ZobristKey::default();
            key.hash_piece(square, piece);
            key
        };

        assert_ne!(key(Square::D7, pawn), key(Square::D5, pawn));
        assert_ne!(key(Square::D7, pawn), key(Square::D7, rook));
        assert_ne!(key(Square::D7, pawn), key(Square::D7, white_pawn));
    }

    #[test]
    fn test_only_ep_ranks_have_keys() {
        for square in Square::iter() {
            let mut key = ZobristKey::default();
            key.hash_ep_square(square);
            let on_ep_rank = square.rank() == Rank::THREE || square.rank() == Rank::SIX;
            assert_eq!(key.inner() != 0, on_ep_rank, "{square}");
        }
    }

    #[test]
    fn test_castling_keys_differ() {
        let mut all = ZobristKey::default();
        all.hash_castling_rights(CastlingRights::ALL);
        let mut none = ZobristKey::default();
        none.hash_castling_rights(CastlingRights::NONE);
        assert_ne!(all, none);
    }

    #[test]
    fn test_side_to_move_key() {
        let mut white = ZobristKey::default();
        white.hash_side_to_move(Color::White);
        assert_eq!(white.inner(), 0);

        let mut black = ZobristKey::default();
        black.hash_side_to_move(Color::Black);
        assert_ne!(black.inner(), 0);
    }
}
