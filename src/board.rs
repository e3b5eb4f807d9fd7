/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Bitboards: one bit per square.
mod bitboard;

/// Moves and UCI move text.
mod moves;

/// Colors, piece kinds, and pieces.
mod piece;

/// Piece placement, castling rights, and full game positions, with FEN I/O.
mod position;

/// Pseudo-random numbers for seeding Zobrist keys.
mod prng;

/// Squares, files, and ranks.
mod square;

/// FEN constants.
mod utils;

/// Zobrist hashing of positions.
mod zobrist;

pub use bitboard::*;
pub use moves::*;
pub use piece::*;
pub use position::*;
pub use prng::*;
pub use square::*;
pub use utils::*;
pub use zobrist::*;
