/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Context, Result};

use super::{PieceKind, Square};

/// Maximum possible number of moves in a given chess position.
///
/// Found [here](<https://www.chessprogramming.org/Chess_Position#cite_note-4>)
pub const MAX_NUM_MOVES: usize = 218;

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] moves.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_NUM_MOVES>;

/// A move on a chess board: a source square, a destination square, and an optional promotion.
///
/// Castling is written as the King moving two files, so `e1g1` is White's short castle.
/// Whether a move captures, castles, or takes en passant is decided by the [`Position`](crate::Position) it is applied to.
///
/// Internally encoded using the following bit pattern:
/// ```text
///     0 000 000000 000000
///        |     |      |
///        |     |      +- Source square of the move.
///        |     +- Target square of the move.
///        +- Promotion kind, or 0 for none.
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Move(u16);

impl Move {
    const SRC_MASK: u16 = 0b0000_0000_0011_1111;
    const DST_MASK: u16 = 0b0000_1111_1100_0000;
    const PROMO_MASK: u16 = 0b0111_0000_0000_0000;
    const DST_BITS: u16 = 6;
    const PROMO_BITS: u16 = 12;

    /// The null move, written `0000`. It is never produced by move generation.
    pub const NULL: Self = Self(0);

    /// Creates a new [`Move`].
    ///
    /// # Example
    /// ```
    /// # use tadpole::{Move, Square, PieceKind};
    /// let e2e4 = Move::new(Square::E2, Square::E4, None);
    /// assert_eq!(e2e4.to_string(), "e2e4");
    ///
    /// let e7e8n = Move::new(Square::E7, Square::E8, Some(PieceKind::Knight));
    /// assert_eq!(e7e8n.to_string(), "e7e8n");
    /// ```
    #[inline(always)]
    pub const fn new(from: Square, to: Square, promotion: Option<PieceKind>) -> Self {
        let promo = match promotion {
            Some(kind) => kind.bits() as u16,
            None => 0,
        };

        Self(promo << Self::PROMO_BITS | (to.inner() as u16) << Self::DST_BITS | from.inner() as u16)
    }

    /// Fetches the source square of this [`Move`].
    #[inline(always)]
    pub const fn from(&self) -> Square {
        Square::from_index_unchecked((self.0 & Self::SRC_MASK) as usize)
    }

    /// Fetches the destination square of this [`Move`].
    #[inline(always)]
    pub const fn to(&self) -> Square {
        Square::from_index_unchecked(((self.0 & Self::DST_MASK) >> Self::DST_BITS) as usize)
    }

    /// Fetches the kind this move promotes to, if any.
    ///
    /// # Example
    /// ```
    /// # use tadpole::{Move, Square, PieceKind};
    /// let b7c8b = Move::new(Square::B7, Square::C8, Some(PieceKind::Bishop));
    /// assert_eq!(b7c8b.promotion(), Some(PieceKind::Bishop));
    /// assert_eq!(Move::new(Square::B7, Square::B8, None).promotion(), None);
    /// ```
    #[inline(always)]
    pub const fn promotion(&self) -> Option<PieceKind> {
        match (self.0 & Self::PROMO_MASK) >> Self::PROMO_BITS {
            0 => None,
            bits => PieceKind::from_bits(bits as u8),
        }
    }

    #[inline(always)]
    pub const fn is_null(&self) -> bool {
        self.0 == Self::NULL.0
    }

    /// Returns the raw encoded bits of this [`Move`].
    #[inline(always)]
    pub const fn inner(&self) -> u16 {
        self.0
    }

    /// Parses a [`Move`] from long algebraic (UCI) notation, such as `e2e4` or `e7e8q`.
    ///
    /// The text `0000` yields [`Move::NULL`]. No position is consulted, so the result may
    /// still be illegal; see [`Position::parse_move`](crate::Position::parse_move).
    ///
    /// # Example
    /// ```
    /// # use tadpole::{Move, Square, PieceKind};
    /// assert_eq!(Move::from_uci("e7e8q").unwrap(), Move::new(Square::E7, Square::E8, Some(PieceKind::Queen)));
    /// assert_eq!(Move::from_uci("0000").unwrap(), Move::NULL);
    /// assert!(Move::from_uci("e7e8k").is_err());
    /// assert!(Move::from_uci("e2").is_err());
    /// ```
    pub fn from_uci(uci: &str) -> Result<Self> {
        if uci == "0000" {
            return Ok(Self::NULL);
        }

        if !(4..=5).contains(&uci.len()) || !uci.is_ascii() {
            bail!("Move str must be 4 or 5 ASCII characters long. Got {uci:?}");
        }

        let from = Square::from_uci(&uci[0..2])
            .with_context(|| format!("Invalid `from` square in {uci:?}"))?;
        let to = Square::from_uci(&uci[2..4])
            .with_context(|| format!("Invalid `to` square in {uci:?}"))?;

        let promotion = match uci[4..].chars().next() {
            None => None,
            Some(c) => {
                let kind = PieceKind::from_uci(c)?;
                if !PieceKind::promotions().contains(&kind) {
                    bail!("Cannot promote to {kind:?} in {uci:?}");
                }
                Some(kind)
            }
        };

        Ok(Self::new(from, to, promotion))
    }

    /// Converts this [`Move`] into its long algebraic (UCI) notation.
    #[inline(always)]
    pub fn to_uci(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "0000");
        }

        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promotion) = self.promotion() {
            write!(f, "{promotion}")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({:#06x})", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_move_fields() {
        let mv = Move::new(Square::H7, Square::G8, Some(PieceKind::Rook));
        assert_eq!(mv.from(), Square::H7);
        assert_eq!(mv.to(), Square::G8);
        assert_eq!(mv.promotion(), Some(PieceKind::Rook));

        let mv = Move::new(Square::A1, Square::H8, None);
        assert_eq!(mv.from(), Square::A1);
        assert_eq!(mv.to(), Square::H8);
        assert_eq!(mv.promotion(), None);
    }

    #[test]
    fn test_null_move() {
        assert_eq!(Move::NULL.to_string(), "0000");
        assert_eq!(Move::default(), Move::NULL);
        assert!(!Move::new(Square::A1, Square::A2, None).is_null());
    }

    #[test]
    fn test_uci_parsing() {
        for uci in ["e2e4", "e1g1", "a7a8q", "h2h1n", "b7c8b", "g7g8r"] {
            assert_eq!(Move::from_uci(uci).unwrap().to_string(), uci);
        }

        // Promotion letters may be uppercase but are printed lowercase
        assert_eq!(Move::from_uci("a7a8Q").unwrap().to_string(), "a7a8q");

        assert!(Move::from_uci("").is_err());
        assert!(Move::from_uci("e2e").is_err());
        assert!(Move::from_uci("e2e4qq").is_err());
        assert!(Move::from_uci("i2e4").is_err());
        assert!(Move::from_uci("e2e9").is_err());
        assert!(Move::from_uci("e7e8p").is_err());
        assert!(Move::from_uci("e7e8x").is_err());
    }
}
