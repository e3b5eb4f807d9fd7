/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Not, str::FromStr};

use anyhow::{anyhow, bail};

use super::{Color, File, Rank, Square};

/// A [`Bitboard`] represents the game board as a set of bits.
/// They are used for various computations, such as fetching valid moves or computing move costs.
///
/// The internal representation is a 64-bit binary number, so the values will represent the entire board.
/// They are color-agnostic, with the low order bits representing the "lower" half of the board.
///
/// Bit index 0 is the least-significant bit (LSB = 2^0)
/// Bit index 63 is the most-significant bit (MSB = 2^63)
///
/// The square for `a1` is at index 0, and the square for `h8` is at index 63.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Bitboard(pub(crate) u64);

impl Bitboard {
    pub const FILE_A: Self = Self(0x0101010101010101);
    pub const FILE_H: Self = Self(0x8080808080808080);
    pub const NOT_FILE_A: Self = Self(0xfefefefefefefefe);
    pub const NOT_FILE_H: Self = Self(0x7f7f7f7f7f7f7f7f);
    pub const RANK_1: Self = Self(0x00000000000000FF);
    pub const RANK_2: Self = Self(0x000000000000FF00);
    pub const RANK_3: Self = Self(0x0000000000FF0000);
    pub const RANK_6: Self = Self(0x0000FF0000000000);
    pub const RANK_7: Self = Self(0x00FF000000000000);
    pub const RANK_8: Self = Self(0xFF00000000000000);
    pub const A1_H8_DIAG: Self = Self(0x8040201008040201);
    pub const EMPTY_BOARD: Self = Self(0x0000000000000000);
    pub const FULL_BOARD: Self = Self(0xFFFFFFFFFFFFFFFF);

    /// Constructs a new [`Bitboard`] from the provided bit pattern.
    ///
    /// # Example
    /// ```
    /// # use tadpole::Bitboard;
    /// let board = Bitboard::new(255);
    /// assert_eq!(board, Bitboard::RANK_1);
    /// ```
    #[inline(always)]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// Constructs a new [`Bitboard`] from the provided [`Square`].
    ///
    /// The resulting [`Bitboard`] will have only a single bit toggled on.
    #[inline(always)]
    pub const fn from_square(square: Square) -> Self {
        Self(1 << square.index())
    }

    /// Constructs a new [`Bitboard`] from the provided [`File`].
    ///
    /// # Example
    /// ```
    /// # use tadpole::{Bitboard, File};
    /// assert_eq!(Bitboard::from_file(File::H), Bitboard::FILE_H);
    /// ```
    #[inline(always)]
    pub const fn from_file(file: File) -> Self {
        Self::new(Self::FILE_A.0 << file.0)
    }

    /// Constructs a new [`Bitboard`] from the provided [`Rank`].
    #[inline(always)]
    pub const fn from_rank(rank: Rank) -> Self {
        Self::new(Self::RANK_1.0 << (rank.0 * 8))
    }

    /// Returns [`Self::FULL_BOARD`] if `value` is `true`, else [`Self::EMPTY_BOARD`].
    #[inline(always)]
    pub const fn from_bool(value: bool) -> Self {
        Self((value as u64).wrapping_neg())
    }

    /// The rank a Pawn of `color` double-pushes onto when leaving its starting rank.
    ///
    /// # Example
    /// ```
    /// # use tadpole::{Bitboard, Color};
    /// assert_eq!(Bitboard::third_rank(Color::White), Bitboard::RANK_3);
    /// assert_eq!(Bitboard::third_rank(Color::Black), Bitboard::RANK_6);
    /// ```
    #[inline(always)]
    pub const fn third_rank(color: Color) -> Self {
        [Self::RANK_3, Self::RANK_6][color.index()]
    }

    /// The rank a Pawn of `color` promotes on.
    #[inline(always)]
    pub const fn eighth_rank(color: Color) -> Self {
        [Self::RANK_8, Self::RANK_1][color.index()]
    }

    /// Returns the inner `u64` of this [`Bitboard`].
    #[inline(always)]
    pub const fn inner(&self) -> u64 {
        self.0
    }

    /// Converts this [`Bitboard`] to a [`Square`], assuming at least one bit is set.
    ///
    /// If the board is empty, the result is not a valid [`Square`].
    #[inline(always)]
    pub const fn to_square_unchecked(&self) -> Square {
        Square::from_index_unchecked(self.0.trailing_zeros() as usize)
    }

    /// Converts this [`Bitboard`] to a [`Square`] if exactly one bit is set.
    ///
    /// # Example
    /// ```
    /// # use tadpole::{Bitboard, Square};
    /// assert_eq!(Square::E4.bitboard().to_square(), Some(Square::E4));
    /// assert_eq!(Bitboard::RANK_1.to_square(), None);
    /// ```
    #[inline(always)]
    pub const fn to_square(&self) -> Option<Square> {
        if self.population() == 1 {
            Some(self.to_square_unchecked())
        } else {
            None
        }
    }

    /// Checks if this [`Bitboard`] is empty, meaning all bits are set to `0`.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Checks if this [`Bitboard`] is NOT empty, or has at least one bit set to `1`.
    #[inline(always)]
    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }

    /// Checks if `self` and `other` share no set bits.
    #[inline(always)]
    pub fn is_disjoint(&self, other: impl Into<Self>) -> bool {
        (*self & other.into()).is_empty()
    }

    /// Checks if `self` and `other` share at least one set bit.
    ///
    /// # Example
    /// ```
    /// # use tadpole::{Bitboard, Square};
    /// assert!(Bitboard::FILE_A.intersects(Square::A4));
    /// assert!(!Bitboard::FILE_A.intersects(Square::B4));
    /// ```
    #[inline(always)]
    pub fn intersects(&self, other: impl Into<Self>) -> bool {
        (*self & other.into()).is_nonempty()
    }

    /// Sets every bit of `other` on `self`.
    #[inline(always)]
    pub fn set(&mut self, other: impl Into<Self>) {
        *self |= other.into()
    }

    /// Toggles every bit of `other` on `self`.
    #[inline(always)]
    pub fn toggle(&mut self, other: impl Into<Self>) {
        *self ^= other.into()
    }

    /// Clears every bit of `other` from `self`.
    #[inline(always)]
    pub fn clear(&mut self, other: impl Into<Self>) {
        *self &= !other.into()
    }

    /// Returns the index of the lowest set bit as a [`Square`], if there is one.
    #[inline(always)]
    pub fn lsb(&self) -> Option<Square> {
        self.is_nonempty()
            .then(|| Square(self.0.trailing_zeros() as u8))
    }

    /// Pops and returns the index of the lowest set bit as a [`Square`], if there is one.
    #[inline(always)]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let lsb = self.lsb();
        self.clear_lsb();
        lsb
    }

    /// Clears the lowest set bit, if there is one.
    #[inline(always)]
    pub fn clear_lsb(&mut self) {
        self.0 &= self.0.wrapping_sub(1);
    }

    /// Returns an iterator over the [`Square`]s of every set bit, from lowest to highest.
    #[inline(always)]
    pub const fn iter(&self) -> BitboardIter {
        BitboardIter { bitboard: *self }
    }

    /// Returns an iterator over every subset of this [`Bitboard`], starting with the empty set.
    ///
    /// This is used when filling the sliding attack tables.
    ///
    /// # Example
    /// ```
    /// # use tadpole::{Bitboard, Square};
    /// let bb = Square::A1.bitboard() | Square::C3;
    /// let subsets: Vec<_> = bb.subsets().collect();
    /// assert_eq!(subsets.len(), 4);
    /// assert_eq!(subsets[0], Bitboard::EMPTY_BOARD);
    /// assert_eq!(subsets[3], bb);
    /// ```
    #[inline(always)]
    pub const fn subsets(&self) -> BitboardSubsetIter {
        BitboardSubsetIter {
            bitboard: *self,
            subset: Self::EMPTY_BOARD,
            remaining: 1 << self.population(),
        }
    }

    /// Returns the number of set bits.
    #[inline(always)]
    pub const fn population(&self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Shifts this [`Bitboard`] forward `n` ranks, relative to `color`.
    ///
    /// Bits shifted off the board are discarded.
    ///
    /// # Example
    /// ```
    /// # use tadpole::{Bitboard, Color};
    /// assert_eq!(Bitboard::RANK_2.forward_by(Color::White, 1), Bitboard::RANK_3);
    /// assert_eq!(Bitboard::RANK_7.forward_by(Color::Black, 1), Bitboard::RANK_6);
    /// assert!(Bitboard::RANK_8.forward_by(Color::White, 1).is_empty());
    /// ```
    #[inline(always)]
    pub const fn forward_by(self, color: Color, n: u32) -> Self {
        match color {
            Color::White => Self(self.0 << (n * 8)),
            Color::Black => Self(self.0 >> (n * 8)),
        }
    }

    /// Shifts this [`Bitboard`] backward `n` ranks, relative to `color`.
    #[inline(always)]
    pub const fn backward_by(self, color: Color, n: u32) -> Self {
        self.forward_by(color.opponent(), n)
    }

    /// Shifts one file towards the H file, discarding bits that wrap around.
    #[inline(always)]
    pub const fn east(self) -> Self {
        Self((self.0 << 1) & Self::NOT_FILE_A.0)
    }

    /// Shifts one file towards the A file, discarding bits that wrap around.
    #[inline(always)]
    pub const fn west(self) -> Self {
        Self((self.0 >> 1) & Self::NOT_FILE_H.0)
    }

    /// `const` analog of [`std::ops::BitAnd`].
    #[inline(always)]
    pub const fn and(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// `const` analog of [`std::ops::BitOr`].
    #[inline(always)]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// `const` analog of [`std::ops::BitXor`].
    #[inline(always)]
    pub const fn xor(self, other: Self) -> Self {
        Self(self.0 ^ other.0)
    }

    /// `const` analog of [`Not`].
    #[inline(always)]
    pub const fn not(self) -> Self {
        Self(!self.0)
    }
}

impl FromStr for Bitboard {
    type Err = anyhow::Error;
    /// Parses a hexadecimal string (with or without a leading `0x`) into a [`Bitboard`].
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let bits = s.trim().to_lowercase();
        let digits = bits.trim_start_matches("0x");

        if digits.is_empty() || digits.len() > 16 {
            bail!("Invalid Bitboard string: Expected 1 to 16 hexadecimal digits. Got {s:?}");
        }

        let bits = u64::from_str_radix(digits, 16)
            .map_err(|_| anyhow!("Invalid Bitboard string: Expected hexadecimal digits, got {s:?}"))?;

        Ok(Self::new(bits))
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<T: IntoIterator<Item = Square>>(iter: T) -> Self {
        iter.into_iter().fold(Self::default(), |bb, sq| bb | sq)
    }
}

macro_rules! impl_bitwise_op {
    // Impl op and op_assign for Self
    ($op:tt, $op_assign:tt, $func:ident, $func_assign:ident) => {
        impl<T> std::ops::$op<T> for Bitboard
        where
            Self: From<T>,
        {
            type Output = Self;
            #[inline(always)]
            fn $func(self, rhs: T) -> Self::Output {
                Self(self.0.$func(Self::from(rhs).0))
            }
        }

        impl<T> std::ops::$op_assign<T> for Bitboard
        where
            Self: From<T>,
        {
            #[inline(always)]
            fn $func_assign(&mut self, rhs: T) {
                self.0.$func_assign(Self::from(rhs).0);
            }
        }
    };
}

impl_bitwise_op!(BitAnd, BitAndAssign, bitand, bitand_assign);
impl_bitwise_op!(BitOr, BitOrAssign, bitor, bitor_assign);
impl_bitwise_op!(BitXor, BitXorAssign, bitxor, bitxor_assign);

impl Not for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl From<Square> for Bitboard {
    #[inline(always)]
    fn from(value: Square) -> Self {
        Self::from_square(value)
    }
}

impl From<File> for Bitboard {
    #[inline(always)]
    fn from(value: File) -> Self {
        Self::from_file(value)
    }
}

impl From<Rank> for Bitboard {
    #[inline(always)]
    fn from(value: Rank) -> Self {
        Self::from_rank(value)
    }
}

impl From<u64> for Bitboard {
    #[inline(always)]
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<Option<Square>> for Bitboard {
    /// `None` maps to the empty board.
    #[inline(always)]
    fn from(value: Option<Square>) -> Self {
        value.map(Self::from_square).unwrap_or_default()
    }
}

impl fmt::LowerHex for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:0>16x}", self.0)
    }
}

impl Default for Bitboard {
    #[inline(always)]
    fn default() -> Self {
        Self::EMPTY_BOARD
    }
}

impl fmt::Display for Bitboard {
    /// Renders an 8x8 grid, rank 8 first, with `X` for set bits and `.` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Allocate just enough capacity
        let mut board = String::with_capacity(136);

        for rank in Rank::iter().rev() {
            for file in File::iter() {
                let square = Square::new(file, rank);
                let occupant = if self.intersects(square) { 'X' } else { '.' };

                board.push(occupant);
                board.push(' ');
            }
            board.push('\n');
        }

        write!(f, "{board}")
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:x}")
    }
}

/// An iterator over all set bits in a [`Bitboard`].
pub struct BitboardIter {
    bitboard: Bitboard,
}

impl Iterator for BitboardIter {
    type Item = Square;
    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.bitboard.pop_lsb()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bitboard.population() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for BitboardIter {
    #[inline(always)]
    fn len(&self) -> usize {
        self.bitboard.population() as usize
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        BitboardIter { bitboard: self }
    }
}

/// An iterator over all subsets of a [`Bitboard`], via the Carry-Rippler trick.
pub struct BitboardSubsetIter {
    /// The set whose subsets are enumerated.
    bitboard: Bitboard,

    /// The next subset to be yielded.
    subset: Bitboard,

    /// Number of subsets left to yield.
    remaining: usize,
}

impl Iterator for BitboardSubsetIter {
    type Item = Bitboard;
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            None
        } else {
            let subset = self.subset;

            // https://www.chessprogramming.org/Traversing_Subsets_of_a_Set#All_Subsets_of_any_Set
            self.subset.0 = self.subset.0.wrapping_sub(self.bitboard.0) & self.bitboard.0;
            self.remaining -= 1;

            Some(subset)
        }
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for BitboardSubsetIter {
    #[inline(always)]
    fn len(&self) -> usize {
        self.remaining
    }
}
