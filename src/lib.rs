/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Counting and locating the attackers of a square.
mod analysis;

/// Applying and unapplying moves.
mod apply;

/// Attack lookups for every piece, and the ray tables.
mod attacks;

/// Board representation: bitboards, squares, pieces, moves, and positions.
mod board;

/// Command-line interface of the `tadpole` binary.
pub mod cli;

/// Magic numbers for sliding attack lookups.
mod magics;

/// Legal move generation.
mod movegen;

/// Move path enumeration.
mod perft;

/// Absolute pins against the King.
mod pins;

pub use analysis::*;
pub use apply::*;
pub use attacks::*;
pub use board::*;
pub use perft::*;
pub use pins::*;
