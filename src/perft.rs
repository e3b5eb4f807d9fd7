/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Instant;

use crate::Position;

/// Perform a perft at the specified depth, collecting only data about the number of possible positions (nodes).
///
/// This performs bulk counting, meaning that, at depth 1, it returns the number of available moves,
/// rather than making them, recursing again, and returning 1 for each terminal case.
/// If you do *not* want to use bulk counting, use [`perft_generic`].
///
/// `position` is mutated while counting and restored before returning.
///
/// # Example
/// ```
/// # use tadpole::*;
/// let mut pos = Position::default();
/// assert_eq!(perft(&mut pos, 0), 1);
/// assert_eq!(perft(&mut pos, 1), 20);
/// assert_eq!(perft(&mut pos, 3), 8902);
/// ```
#[inline(always)]
pub fn perft(position: &mut Position, depth: usize) -> u64 {
    timed(depth, || perft_generic::<true, false>(position, depth))
}

/// Perform a splitperft at the specified depth, collecting only data about the number of possible positions (nodes),
/// and printing the number of nodes reachable after each move available at the root node.
///
/// This performs bulk counting, meaning that, at depth 1, it returns the number of available moves,
/// rather than making them, recursing again, and returning 1 for each terminal case.
/// If you do *not* want to use bulk counting, use [`perft_generic`].
#[inline(always)]
pub fn splitperft(position: &mut Position, depth: usize) -> u64 {
    timed(depth, || perft_generic::<true, true>(position, depth))
}

/// Generic version of `perft` that allows you to specify whether to perform bulk counting and splitperft.
///
/// If `BULK` is set to `true`, this will perform bulk counting.
/// If `SPLIT` is set to `true`, this will perform a splitperft.
///
/// # Example
/// ```
/// # use tadpole::*;
/// let mut pos = Position::from_fen(FEN_KIWIPETE).unwrap();
/// assert_eq!(perft_generic::<false, false>(&mut pos, 2), 2039);
/// assert_eq!(perft_generic::<true, false>(&mut pos, 2), 2039);
/// ```
pub fn perft_generic<const BULK: bool, const SPLIT: bool>(
    position: &mut Position,
    depth: usize,
) -> u64 {
    // Recursion limit; return 1, since we're fathoming this node.
    if depth == 0 {
        return 1;
    }

    let moves = position.generate_moves();

    // Bulk counting; no need to recurse again just to apply a singular move and return 1.
    if BULK && !SPLIT && depth == 1 {
        return moves.len() as u64;
    }

    moves.into_iter().fold(0, |nodes, mv| {
        let undo = position.apply(mv);
        let new_nodes = perft_generic::<BULK, false>(position, depth - 1);
        position.unapply(mv, undo);

        if SPLIT {
            println!("{mv}\t{new_nodes}");
        }

        nodes + new_nodes
    })
}

fn timed(depth: usize, count: impl FnOnce() -> u64) -> u64 {
    let start = Instant::now();
    let nodes = count();
    let elapsed = start.elapsed();
    let nps = nodes as f64 / elapsed.as_secs_f64().max(f64::EPSILON);

    tracing::debug!(depth, nodes, ?elapsed, nps = nps as u64, "perft complete");

    nodes
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ZobristKey, FEN_KIWIPETE};

    #[test]
    fn test_depth_zero_and_one() {
        let mut pos = Position::from_fen(FEN_KIWIPETE).unwrap();
        assert_eq!(perft(&mut pos, 0), 1);
        assert_eq!(perft(&mut pos, 1), 48);
    }

    #[test]
    fn test_bulk_matches_leaf_counting() {
        let mut pos = Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
        for depth in 1..=3 {
            assert_eq!(
                perft_generic::<true, false>(&mut pos, depth),
                perft_generic::<false, false>(&mut pos, depth),
            );
        }
    }

    #[test]
    fn test_splitperft_sums_to_perft() {
        let mut pos = Position::default();
        assert_eq!(splitperft(&mut pos, 2), 400);
    }

    #[test]
    fn test_perft_restores_position() {
        let mut pos = Position::from_fen(FEN_KIWIPETE).unwrap();
        let before = pos;
        perft(&mut pos, 3);
        assert_eq!(pos, before);
        assert_eq!(pos.key(), ZobristKey::new(&pos));
    }
}
