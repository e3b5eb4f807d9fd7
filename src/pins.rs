/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use arrayvec::ArrayVec;

use crate::{
    are_collinear, bishop_attacks, movegen::push_moves, pawn_attacks, pawn_pushes, ray_between,
    rook_attacks, Bitboard, Board, Color, MoveList, PieceKind, Square,
};

/// The line along which a piece is pinned.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PinAxis {
    /// Along a rank or file, by a Rook or Queen.
    Orthogonal,
    /// Along a diagonal, by a Bishop or Queen.
    Diagonal,
}

/// A piece that cannot leave the line between its King and an enemy slider.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Pin {
    pub pinned: Square,
    pub pinner: Square,
    pub axis: PinAxis,
}

/// Finds the pieces of one side that are absolutely pinned to their King, and generates the moves they still have.
///
/// # Example
/// ```
/// # use tadpole::*;
/// // The Bishop on d7 is pinned by the Queen on a4
/// let pos = Position::from_fen("4k3/3b4/8/8/Q7/8/8/4K3 b - - 0 1").unwrap();
/// let resolver = PinResolver::new(pos.board(), Color::Black);
/// assert_eq!(resolver.pinned(), Square::D7.bitboard());
///
/// let mut moves = MoveList::new();
/// resolver.resolve(Bitboard::FULL_BOARD, &mut moves);
/// assert_eq!(moves.len(), 3); // c6, b5, and the capture on a4
/// ```
pub struct PinResolver<'a> {
    board: &'a Board,
    color: Color,
    king: Square,
}

impl<'a> PinResolver<'a> {
    #[inline(always)]
    pub fn new(board: &'a Board, color: Color) -> Self {
        Self {
            board,
            color,
            king: board.king_square(color),
        }
    }

    /// Finds every pin against `color`'s King.
    ///
    /// A friendly piece is pinned when it lies both on a ray cast from the King and on a ray cast from an enemy
    /// slider of the same kind, and all three squares share one line. Rays that merely cross are not pins.
    pub fn pins(&self) -> ArrayVec<Pin, 8> {
        let mut pins = ArrayVec::new();
        let occupied = self.board.occupied();
        let friendly = self.board.color(self.color);
        let enemy_color = self.color.opponent();
        let enemy = self.board.color(enemy_color);

        let axes = [
            (
                PinAxis::Orthogonal,
                rook_attacks as fn(Square, Bitboard) -> Bitboard,
                self.board.orthogonal_sliders(enemy_color),
            ),
            (
                PinAxis::Diagonal,
                bishop_attacks as fn(Square, Bitboard) -> Bitboard,
                self.board.diagonal_sliders(enemy_color),
            ),
        ];

        for (axis, attacks, sliders) in axes {
            let king_rays = attacks(self.king, occupied);

            for pinner in sliders {
                let pinner_rays = attacks(pinner, occupied) & !enemy;
                let candidates = pinner_rays & king_rays & friendly;

                for pinned in candidates {
                    if are_collinear(self.king, pinner, pinned) {
                        pins.push(Pin {
                            pinned,
                            pinner,
                            axis,
                        });
                    }
                }
            }
        }

        pins
    }

    /// All squares of pinned pieces.
    #[inline(always)]
    pub fn pinned(&self) -> Bitboard {
        self.pins().into_iter().map(|pin| pin.pinned).collect()
    }

    /// Adds the moves of every pinned piece to `moves`, keeping only destinations in `restriction`,
    /// and returns the squares of all pinned pieces.
    ///
    /// Outside of check `restriction` is the full board; in single check it is the check's interposition mask.
    /// En passant is never emitted here.
    pub fn resolve(&self, restriction: Bitboard, moves: &mut MoveList) -> Bitboard {
        let occupied = self.board.occupied();
        let friendly = self.board.color(self.color);
        let mut all_pinned = Bitboard::EMPTY_BOARD;

        for Pin {
            pinned,
            pinner,
            axis,
        } in self.pins()
        {
            all_pinned |= pinned;

            // The pinned piece may slide anywhere between its King and the pinner, or capture the pinner
            let pin_line = ray_between(self.king, pinner) | pinner;
            let allowed = pin_line & restriction & !friendly;

            let Some(kind) = self.board.kind_of(self.color, pinned) else {
                continue;
            };

            let targets = match (kind, axis) {
                (PieceKind::Pawn, PinAxis::Orthogonal) => {
                    // Only a Pawn pinned along its own file can still move
                    if pinned.file() == self.king.file() {
                        pawn_pushes(pinned, self.color, occupied) & allowed
                    } else {
                        Bitboard::EMPTY_BOARD
                    }
                }
                (PieceKind::Pawn, PinAxis::Diagonal) => {
                    pawn_attacks(pinned, self.color) & allowed & pinner
                }
                (PieceKind::Rook | PieceKind::Queen, PinAxis::Orthogonal) => {
                    rook_attacks(pinned, occupied) & allowed
                }
                (PieceKind::Bishop | PieceKind::Queen, PinAxis::Diagonal) => {
                    bishop_attacks(pinned, occupied) & allowed
                }
                _ => Bitboard::EMPTY_BOARD,
            };

            push_moves(moves, pinned, targets, kind == PieceKind::Pawn, self.color);
        }

        all_pinned
    }
}
