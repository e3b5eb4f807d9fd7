/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// FEN string for the starting position of chess.
pub const FEN_STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A popular FEN string for debugging move generation.
pub const FEN_KIWIPETE: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

/// Resolves the shorthand names `startpos` and `kiwipete`, passing anything else through as FEN.
///
/// # Example
/// ```
/// # use tadpole::*;
/// assert_eq!(fen_alias("startpos"), FEN_STARTPOS);
/// assert_eq!(fen_alias("8/8/8/8/8/8/8/8"), "8/8/8/8/8/8/8/8");
/// ```
pub fn fen_alias(fen: &str) -> &str {
    match fen.trim() {
        "startpos" => FEN_STARTPOS,
        "kiwipete" => FEN_KIWIPETE,
        other => other,
    }
}
