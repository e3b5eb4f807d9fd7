/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{BitOr, Deref, Index},
    str::FromStr,
};

use anyhow::{anyhow, bail, Context, Result};

use super::{Bitboard, Color, File, Piece, PieceKind, Rank, Square, ZobristKey};

/// The set of castling rights still available in a [`Position`].
///
/// Stored as four bits: White long, White short, Black long, Black short (lowest first).
/// After a [`Position`] is constructed, rights are only ever removed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const WHITE_LONG: Self = Self(0b0001);
    pub const WHITE_SHORT: Self = Self(0b0010);
    pub const BLACK_LONG: Self = Self(0b0100);
    pub const BLACK_SHORT: Self = Self(0b1000);
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(0b1111);

    /// Number of possible combinations of castling rights.
    pub const COUNT: usize = 16;

    /// The kingside right for `color`.
    #[inline(always)]
    pub const fn short(color: Color) -> Self {
        [Self::WHITE_SHORT, Self::BLACK_SHORT][color.index()]
    }

    /// The queenside right for `color`.
    #[inline(always)]
    pub const fn long(color: Color) -> Self {
        [Self::WHITE_LONG, Self::BLACK_LONG][color.index()]
    }

    /// Both rights for `color`.
    #[inline(always)]
    pub const fn both(color: Color) -> Self {
        Self(Self::short(color).0 | Self::long(color).0)
    }

    /// Returns `true` if every right in `other` is present in `self`.
    ///
    /// # Example
    /// ```
    /// # use tadpole::{CastlingRights, Color};
    /// let rights = CastlingRights::ALL;
    /// assert!(rights.contains(CastlingRights::both(Color::Black)));
    /// assert!(!CastlingRights::NONE.contains(CastlingRights::WHITE_SHORT));
    /// ```
    #[inline(always)]
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    #[inline(always)]
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Index into tables of [`CastlingRights::COUNT`] entries.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// The right forfeited when a Rook leaves or is captured on `square`, if `square` is a corner.
    #[inline(always)]
    pub const fn for_rook_square(square: Square) -> Self {
        match square.0 {
            0 => Self::WHITE_LONG,
            7 => Self::WHITE_SHORT,
            56 => Self::BLACK_LONG,
            63 => Self::BLACK_SHORT,
            _ => Self::NONE,
        }
    }

    /// Parses the castling field of a FEN string, such as `KQkq` or `-`.
    pub fn from_uci(castling: &str) -> Result<Self> {
        let mut rights = Self::NONE;
        if castling == "-" {
            return Ok(rights);
        }

        for c in castling.chars() {
            let right = match c {
                'K' => Self::WHITE_SHORT,
                'Q' => Self::WHITE_LONG,
                'k' => Self::BLACK_SHORT,
                'q' => Self::BLACK_LONG,
                _ => bail!("Invalid castling rights char: Must be one of [KQkq] or '-'. Got {c:?}"),
            };
            rights.insert(right);
        }

        if rights.is_empty() {
            bail!("Castling rights must not be empty; use '-' for none");
        }

        Ok(rights)
    }

    /// Formats these rights for a FEN string, such as `KQkq` or `-`.
    pub fn to_uci(&self) -> String {
        if self.is_empty() {
            return String::from("-");
        }

        [
            (Self::WHITE_SHORT, 'K'),
            (Self::WHITE_LONG, 'Q'),
            (Self::BLACK_SHORT, 'k'),
            (Self::BLACK_LONG, 'q'),
        ]
        .into_iter()
        .filter_map(|(right, c)| self.contains(right).then_some(c))
        .collect()
    }
}

impl BitOr for CastlingRights {
    type Output = Self;
    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastlingRights({} = {:#06b})", self.to_uci(), self.0)
    }
}

/// The pieces of a single side: one [`Bitboard`] per [`PieceKind`], plus their union.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct SideBitboards {
    pieces: [Bitboard; PieceKind::COUNT],
    all: Bitboard,
}

impl SideBitboards {
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            pieces: [Bitboard::EMPTY_BOARD; PieceKind::COUNT],
            all: Bitboard::EMPTY_BOARD,
        }
    }

    /// Every square occupied by this side.
    #[inline(always)]
    pub const fn all(&self) -> Bitboard {
        self.all
    }

    /// Every square occupied by this side's pieces of `kind`.
    #[inline(always)]
    pub const fn kind(&self, kind: PieceKind) -> Bitboard {
        self.pieces[kind.index()]
    }

    #[inline(always)]
    fn toggle(&mut self, kind: PieceKind, mask: Bitboard) {
        self.pieces[kind].toggle(mask);
        self.all.toggle(mask);
    }

    /// The aggregate is the union of the six kinds, the kinds are disjoint, and there is exactly one King.
    pub fn is_consistent(&self) -> bool {
        let mut union = Bitboard::EMPTY_BOARD;
        for kind in self.pieces {
            if union.intersects(kind) {
                return false;
            }
            union |= kind;
        }

        union == self.all && self.pieces[PieceKind::King].population() == 1
    }
}

impl Index<PieceKind> for SideBitboards {
    type Output = Bitboard;
    #[inline(always)]
    fn index(&self, index: PieceKind) -> &Self::Output {
        &self.pieces[index]
    }
}

/// Represents all pieces and their locations on a chess board.
///
/// Has no knowledge of castling rights, en passant, or move counters. If you need those, see [`Position`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    sides: [SideBitboards; Color::COUNT],
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use tadpole::Board;
    /// let board = Board::new();
    /// assert_eq!(board.to_fen(), "8/8/8/8/8/8/8/8");
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            sides: [SideBitboards::new(); Color::COUNT],
        }
    }

    /// Constructs a [`Board`] from the placement field of a FEN string.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3").unwrap();
    /// assert_eq!(board.king_square(Color::White), Square::E1);
    /// assert!(Board::from_fen("4k3/8/8/8/8/8/8/4K4").is_err());
    /// ```
    pub fn from_fen(placements: &str) -> Result<Self> {
        let mut board = Self::new();

        let ranks: Vec<&str> = placements.split('/').collect();
        if ranks.len() != Rank::COUNT {
            bail!(
                "FEN must have piece placements for all 8 ranks. Got {} in {placements:?}",
                ranks.len()
            );
        }

        // FEN lists rank 8 first
        for (rank, placement) in Rank::iter().rev().zip(ranks) {
            let mut file = 0u8;

            for c in placement.chars() {
                if let Some(empty) = c.to_digit(10) {
                    if !(1..=8).contains(&empty) {
                        bail!("Invalid empty-square count {c:?} on rank {rank}");
                    }
                    file += empty as u8;
                } else {
                    if file > File::MAX {
                        bail!("Too many squares on rank {rank}: {placement:?}");
                    }
                    let piece = Piece::from_uci(c)
                        .with_context(|| format!("Invalid piece in placement {placement:?}"))?;
                    board.place(piece, Square::new(File::new_unchecked(file), rank));
                    file += 1;
                }

                if file > File::MAX + 1 {
                    bail!("Too many squares on rank {rank}: {placement:?}");
                }
            }

            if file != File::MAX + 1 {
                bail!("Rank {rank} must describe exactly 8 squares. Got {placement:?}");
            }
        }

        for color in Color::all() {
            let kings = board.king(color).population();
            if kings != 1 {
                bail!("FEN must contain exactly one {} King. Found {kings}", color.name());
            }
        }

        Ok(board)
    }

    /// Generates the placement field of a FEN string for this [`Board`].
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(72);

        for rank in Rank::iter().rev() {
            let mut empty_spaces = 0;
            for file in File::iter() {
                if let Some(piece) = self.piece_at(Square::new(file, rank)) {
                    if empty_spaces != 0 {
                        fen.push_str(&empty_spaces.to_string());
                        empty_spaces = 0;
                    }
                    fen.push(piece.char());
                } else {
                    empty_spaces += 1;
                }
            }

            if empty_spaces != 0 {
                fen.push_str(&empty_spaces.to_string());
            }
            if rank != Rank::ONE {
                fen.push('/');
            }
        }

        fen
    }

    /// Places `piece` on `square`, which must be empty.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        debug_assert!(self.piece_at(square).is_none(), "{square} is occupied");
        self.toggle(piece.color(), piece.kind(), square.bitboard());
    }

    /// Removes `piece` from `square`, which must hold it.
    #[inline(always)]
    pub fn remove(&mut self, piece: Piece, square: Square) {
        debug_assert_eq!(self.piece_at(square), Some(piece), "{square} does not hold {piece:?}");
        self.toggle(piece.color(), piece.kind(), square.bitboard());
    }

    /// Moves the `color` piece of `kind` from `from` to `to`.
    #[inline(always)]
    pub(crate) fn relocate(&mut self, color: Color, kind: PieceKind, from: Square, to: Square) {
        self.toggle(color, kind, from.bitboard() | to);
    }

    #[inline(always)]
    fn toggle(&mut self, color: Color, kind: PieceKind, mask: Bitboard) {
        self.sides[color].toggle(kind, mask);
    }

    /// Fetches the [`SideBitboards`] of `color`.
    #[inline(always)]
    pub const fn side(&self, color: Color) -> &SideBitboards {
        &self.sides[color.index()]
    }

    /// Every square occupied by `color`.
    #[inline(always)]
    pub const fn color(&self, color: Color) -> Bitboard {
        self.sides[color.index()].all
    }

    /// Every occupied square.
    #[inline(always)]
    pub const fn occupied(&self) -> Bitboard {
        self.sides[0].all.or(self.sides[1].all)
    }

    /// Every empty square.
    #[inline(always)]
    pub const fn empty(&self) -> Bitboard {
        self.occupied().not()
    }

    #[inline(always)]
    pub const fn pieces(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.sides[color.index()].kind(kind)
    }

    #[inline(always)]
    pub const fn pawns(&self, color: Color) -> Bitboard {
        self.pieces(color, PieceKind::Pawn)
    }

    #[inline(always)]
    pub const fn knights(&self, color: Color) -> Bitboard {
        self.pieces(color, PieceKind::Knight)
    }

    #[inline(always)]
    pub const fn bishops(&self, color: Color) -> Bitboard {
        self.pieces(color, PieceKind::Bishop)
    }

    #[inline(always)]
    pub const fn rooks(&self, color: Color) -> Bitboard {
        self.pieces(color, PieceKind::Rook)
    }

    #[inline(always)]
    pub const fn queens(&self, color: Color) -> Bitboard {
        self.pieces(color, PieceKind::Queen)
    }

    #[inline(always)]
    pub const fn king(&self, color: Color) -> Bitboard {
        self.pieces(color, PieceKind::King)
    }

    /// The square of `color`'s King.
    #[inline(always)]
    pub const fn king_square(&self, color: Color) -> Square {
        self.king(color).to_square_unchecked()
    }

    /// Rooks and Queens of `color`.
    #[inline(always)]
    pub const fn orthogonal_sliders(&self, color: Color) -> Bitboard {
        self.rooks(color).or(self.queens(color))
    }

    /// Bishops and Queens of `color`.
    #[inline(always)]
    pub const fn diagonal_sliders(&self, color: Color) -> Bitboard {
        self.bishops(color).or(self.queens(color))
    }

    /// Fetches the [`Color`] of the piece on `square`, if there is one.
    #[inline(always)]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        Color::all()
            .into_iter()
            .find(|&color| self.color(color).intersects(square))
    }

    /// Fetches the [`PieceKind`] on `square` belonging to `color`, if there is one.
    #[inline(always)]
    pub fn kind_of(&self, color: Color, square: Square) -> Option<PieceKind> {
        let side = self.side(color);
        if !side.all.intersects(square) {
            return None;
        }

        PieceKind::all()
            .into_iter()
            .find(|&kind| side.kind(kind).intersects(square))
    }

    /// Whether `target` could be the en passant square left by a double push of one of `pusher`'s pawns.
    ///
    /// The target and the pawn's starting square must be empty, and the pawn must stand just past the target.
    pub fn is_double_push_target(&self, target: Square, pusher: Color) -> bool {
        let (Some(start), Some(pawn)) =
            (target.backward_by(pusher, 1), target.forward_by(pusher, 1))
        else {
            return false;
        };

        !self.occupied().intersects(target)
            && !self.occupied().intersects(start)
            && self.pawns(pusher).intersects(pawn)
    }

    /// Fetches the [`PieceKind`] on `square`, if there is one.
    #[inline(always)]
    pub fn kind_at(&self, square: Square) -> Option<PieceKind> {
        self.piece_at(square).map(|piece| piece.kind())
    }

    /// Fetches the [`Piece`] on `square`, if there is one.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let board = Position::default();
    /// assert_eq!(board.piece_at(Square::D8), Some(Piece::new(Color::Black, PieceKind::Queen)));
    /// assert_eq!(board.piece_at(Square::D4), None);
    /// ```
    #[inline(always)]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let color = self.color_at(square)?;
        let kind = self.kind_of(color, square)?;
        Some(Piece::new(color, kind))
    }

    /// Returns an iterator over every occupied square and the [`Piece`] on it.
    #[inline(always)]
    pub const fn iter(&self) -> BoardIter<'_> {
        BoardIter {
            board: self,
            occupancy: self.occupied(),
        }
    }

    /// Checks the invariants of both sides, and that they do not overlap.
    pub fn is_consistent(&self) -> bool {
        self.sides.iter().all(SideBitboards::is_consistent)
            && self.color(Color::White).is_disjoint(self.color(Color::Black))
    }
}

impl fmt::Display for Board {
    /// Renders a diagram with rank 8 at the top, using FEN piece chars and `.` for empty squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{rank}|")?;
            for file in File::iter() {
                let occupant = self
                    .piece_at(Square::new(file, rank))
                    .map(|p| p.char())
                    .unwrap_or('.');
                write!(f, " {occupant}")?;
            }
            writeln!(f)?;
        }

        write!(f, " +")?;
        for _ in File::iter() {
            write!(f, "--")?;
        }
        write!(f, "\n  ")?;
        for file in File::iter() {
            write!(f, " {file}")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl<'a> IntoIterator for &'a Board {
    type IntoIter = BoardIter<'a>;
    type Item = <BoardIter<'a> as Iterator>::Item;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the occupied squares of a [`Board`], yielding each [`Square`] with its [`Piece`].
pub struct BoardIter<'a> {
    board: &'a Board,
    occupancy: Bitboard,
}

impl Iterator for BoardIter<'_> {
    type Item = (Square, Piece);

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let square = self.occupancy.pop_lsb()?;
        let piece = self.board.piece_at(square)?;
        Some((square, piece))
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.occupancy.population() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for BoardIter<'_> {}

/// The full state of a chess game at a single point in time.
///
/// A [`Position`] is built once from FEN (or [`Position::default`] for the starting position)
/// and afterwards changed only through [`Position::apply`] and [`Position::unapply`], which keep
/// its Zobrist key up to date.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,

    /// Square a Pawn may capture onto en passant. Only set directly after a double push.
    pub(crate) ep_square: Option<Square>,

    /// Plies since the last capture or Pawn move.
    pub(crate) halfmove: usize,

    /// Starts at 1 and increments after every Black move.
    pub(crate) fullmove: usize,

    pub(crate) key: ZobristKey,
}

impl Position {
    /// Creates an empty [`Position`] with White to move, no rights, and no en passant square.
    ///
    /// This has no Kings, so it is only a starting point for building a board piece by piece.
    fn empty() -> Self {
        let mut pos = Self {
            board: Board::new(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::NONE,
            ep_square: None,
            halfmove: 0,
            fullmove: 1,
            key: ZobristKey::default(),
        };
        pos.key = ZobristKey::new(&pos);
        pos
    }

    /// The standard starting position.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// assert_eq!(Position::startpos().to_fen(), FEN_STARTPOS);
    /// ```
    pub fn startpos() -> Self {
        use PieceKind::*;
        let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut pos = Self::empty();
        for color in Color::all() {
            for (file, kind) in File::iter().zip(back_rank) {
                pos.board
                    .place(Piece::new(color, kind), Square::new(file, Rank::first(color)));
                pos.board
                    .place(Piece::new(color, Pawn), Square::new(file, Rank::second(color)));
            }
        }
        pos.castling_rights = CastlingRights::ALL;
        pos.key = ZobristKey::new(&pos);
        pos
    }

    /// Creates a new [`Position`] from the provided FEN string.
    ///
    /// Trailing fields may be omitted, and default to `w - - 0 1`.
    /// Castling rights whose King or Rook is not on its starting square are dropped.
    /// An en passant square that could not have followed a double pawn push is an error.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w KQ - 3 40").unwrap();
    /// assert_eq!(pos.castling_rights(), CastlingRights::WHITE_SHORT);
    /// assert_eq!(pos.halfmove(), 3);
    /// assert_eq!(pos.fullmove(), 40);
    ///
    /// assert!(Position::from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1").is_err());
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        Self::parse_fen(fen).inspect_err(|err| tracing::debug!(fen, %err, "rejected FEN"))
    }

    fn parse_fen(fen: &str) -> Result<Self> {
        let mut split = fen.split_whitespace();
        let placements = split
            .next()
            .ok_or(anyhow!("FEN string must have piece placements."))?;

        let mut pos = Self::empty();
        pos.board = Board::from_fen(placements)?;

        let active_color = split.next().unwrap_or("w");
        pos.side_to_move = Color::from_str(active_color)?;

        let castling = split.next().unwrap_or("-");
        pos.castling_rights = CastlingRights::from_uci(castling)?;
        pos.drop_unusable_castling_rights();

        let en_passant_target = split.next().unwrap_or("-");
        pos.ep_square = match en_passant_target {
            "-" => None,
            square => {
                let square = Square::from_uci(square)?;
                // The pawn that just double-pushed belongs to the side not on move
                let expected = Bitboard::third_rank(pos.side_to_move.opponent());
                if !expected.intersects(square) {
                    bail!(
                        "En passant square {square} is impossible with {} to move",
                        pos.side_to_move.name()
                    );
                }
                if !pos.board.is_double_push_target(square, pos.side_to_move.opponent()) {
                    bail!("En passant square {square} does not follow a double pawn push");
                }
                Some(square)
            }
        };

        let halfmove = split.next().unwrap_or("0");
        pos.halfmove = halfmove.parse().or(Err(anyhow!(
            "FEN string must have valid halfmove counter. Got {halfmove:?}"
        )))?;

        let fullmove = split.next().unwrap_or("1");
        pos.fullmove = fullmove.parse().or(Err(anyhow!(
            "FEN string must have valid fullmove counter. Got {fullmove:?}"
        )))?;

        if let Some(extra) = split.next() {
            bail!("Unexpected trailing FEN field {extra:?}");
        }

        pos.key = ZobristKey::new(&pos);

        Ok(pos)
    }

    /// Removes any castling right whose King or Rook has left its starting square.
    fn drop_unusable_castling_rights(&mut self) {
        for color in Color::all() {
            let rank = Rank::first(color);
            let king_home = self.board.king(color).intersects(Square::new(File::E, rank));
            let rooks = self.board.rooks(color);

            if !king_home || !rooks.intersects(Square::new(File::H, rank)) {
                self.castling_rights.remove(CastlingRights::short(color));
            }
            if !king_home || !rooks.intersects(Square::new(File::A, rank)) {
                self.castling_rights.remove(CastlingRights::long(color));
            }
        }
    }

    /// Generates a FEN string of this [`Position`].
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let pos = Position::from_fen(FEN_KIWIPETE).unwrap();
    /// assert_eq!(pos.to_fen(), FEN_KIWIPETE);
    /// ```
    #[inline(always)]
    pub fn to_fen(&self) -> String {
        self.to_string()
    }

    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline(always)]
    pub const fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline(always)]
    pub const fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    #[inline(always)]
    pub const fn halfmove(&self) -> usize {
        self.halfmove
    }

    #[inline(always)]
    pub const fn fullmove(&self) -> usize {
        self.fullmove
    }

    /// The incrementally maintained Zobrist key of this [`Position`].
    #[inline(always)]
    pub const fn key(&self) -> ZobristKey {
        self.key
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl Deref for Position {
    type Target = Board;
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.board()
    }
}

impl Default for Position {
    #[inline(always)]
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Position {
    /// Display this position's FEN string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let en_passant_target = self
            .ep_square
            .map(|square| square.to_uci())
            .unwrap_or(String::from("-"));

        write!(
            f,
            "{} {} {} {en_passant_target} {} {}",
            self.board.to_fen(),
            self.side_to_move,
            self.castling_rights,
            self.halfmove,
            self.fullmove
        )
    }
}

impl fmt::Debug for Position {
    /// Renders a board diagram with the FEN fields and key alongside.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diagram = self.board.to_string();
        let ep = self
            .ep_square
            .map(|square| square.to_uci())
            .unwrap_or(String::from("-"));

        for (i, line) in diagram.lines().enumerate() {
            write!(f, "{line}")?;
            match i {
                1 => write!(f, "           FEN: {self}")?,
                2 => write!(f, "          Side: {}", self.side_to_move.name())?,
                3 => write!(f, "      Castling: {}", self.castling_rights)?,
                4 => write!(f, "            EP: {ep}")?,
                5 => write!(f, "     Half-move: {}", self.halfmove)?,
                6 => write!(f, "     Full-move: {}", self.fullmove)?,
                7 => write!(f, "           Key: {}", self.key)?,
                _ => {}
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
