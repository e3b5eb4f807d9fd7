/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::sync::OnceLock;

use crate::{
    magics::{MagicEntry, BISHOP_MAGICS, BISHOP_TABLE_SIZE, ROOK_MAGICS, ROOK_TABLE_SIZE},
    Bitboard, Color, Square,
};

/// Deltas for the movement of the Queen.
const QUEEN_DELTAS: [(i8, i8); 8] = [
    /* Rook */
    (1, 0),
    (0, -1),
    (-1, 0),
    (0, 1),
    /* Bishop */
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

const ROOK_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[0],
    QUEEN_DELTAS[1],
    QUEEN_DELTAS[2],
    QUEEN_DELTAS[3],
];

const BISHOP_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[4],
    QUEEN_DELTAS[5],
    QUEEN_DELTAS[6],
    QUEEN_DELTAS[7],
];

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (2, 1),
    (2, -1),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

const KNIGHT_ATTACKS: [Bitboard; Square::COUNT] = generate_leaper_mobility(&KNIGHT_DELTAS);
const KING_ATTACKS: [Bitboard; Square::COUNT] = generate_leaper_mobility(&QUEEN_DELTAS);
const PAWN_ATTACKS: [[Bitboard; Square::COUNT]; Color::COUNT] = [
    generate_pawn_attacks(Color::White),
    generate_pawn_attacks(Color::Black),
];

/// Squares strictly between two squares that share a rank, file, or diagonal. Empty otherwise.
static RAY_BETWEEN: [[Bitboard; Square::COUNT]; Square::COUNT] = {
    let mut rays = [[Bitboard::EMPTY_BOARD; Square::COUNT]; Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let from = Square::from_index_unchecked(i);
        let mut j = 0;
        while j < QUEEN_DELTAS.len() {
            let (df, dr) = QUEEN_DELTAS[j];
            let mut ray = Bitboard::EMPTY_BOARD;
            let mut to = from;

            while let Some(shifted) = to.offset(df, dr) {
                rays[from.index()][shifted.index()] = ray;
                ray = ray.or(shifted.bitboard());
                to = shifted;
            }

            j += 1;
        }

        i += 1;
    }

    rays
};

/// The entire line (edge to edge) through two squares that share a rank, file, or diagonal. Empty otherwise.
static RAY_CONTAINING: [[Bitboard; Square::COUNT]; Square::COUNT] = {
    let mut rays = [[Bitboard::EMPTY_BOARD; Square::COUNT]; Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let from = Square::from_index_unchecked(i);

        let mut j = 0;
        while j < QUEEN_DELTAS.len() {
            let (df, dr) = QUEEN_DELTAS[j];
            let line = cast_ray(from, df, dr).or(cast_ray(from, -df, -dr)).or(from.bitboard());

            let mut to = from;
            while let Some(shifted) = to.offset(df, dr) {
                rays[from.index()][shifted.index()] = line;
                to = shifted;
            }

            j += 1;
        }

        i += 1;
    }

    rays
};

/// Filled on first use from [`ROOK_MAGICS`] and [`BISHOP_MAGICS`].
struct SlidingTables {
    rook: Box<[Bitboard]>,
    bishop: Box<[Bitboard]>,
}

impl SlidingTables {
    fn new() -> Self {
        let rook = fill_table(&ROOK_MAGICS, &ROOK_DELTAS, ROOK_TABLE_SIZE);
        let bishop = fill_table(&BISHOP_MAGICS, &BISHOP_DELTAS, BISHOP_TABLE_SIZE);

        tracing::debug!(
            rook_entries = rook.len(),
            bishop_entries = bishop.len(),
            "initialized sliding attack tables"
        );

        Self { rook, bishop }
    }
}

#[inline(always)]
fn sliding_tables() -> &'static SlidingTables {
    static TABLES: OnceLock<SlidingTables> = OnceLock::new();
    TABLES.get_or_init(SlidingTables::new)
}

/// Builds the sliding attack tables now, rather than on the first lookup.
///
/// Useful before timing anything.
pub fn init_attack_tables() {
    sliding_tables();
}

/// Enumerates every blocker subset of each square's mask and stores its ray-cast attacks at the magic index.
fn fill_table(magics: &[MagicEntry; Square::COUNT], deltas: &[(i8, i8)], size: usize) -> Box<[Bitboard]> {
    let mut table = vec![Bitboard::EMPTY_BOARD; size].into_boxed_slice();

    for square in Square::iter() {
        let entry = &magics[square.index()];
        for blockers in Bitboard::new(entry.mask).subsets() {
            table[magic_index(entry, blockers)] = slider_attacks_slow(square, blockers, deltas);
        }
    }

    table
}

/// Casts rays from `square` along every delta, stopping at (and including) the first blocker.
fn slider_attacks_slow(square: Square, blockers: Bitboard, deltas: &[(i8, i8)]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY_BOARD;

    for &(df, dr) in deltas {
        let mut ray = square;
        while let Some(shifted) = ray.offset(df, dr) {
            attacks |= shifted;
            if blockers.intersects(shifted) {
                break;
            }
            ray = shifted;
        }
    }

    attacks
}

#[inline(always)]
const fn magic_index(entry: &MagicEntry, blockers: Bitboard) -> usize {
    let blockers = blockers.inner() & entry.mask;
    let hash = blockers.wrapping_mul(entry.magic);
    let index = (hash >> entry.shift) as usize;
    entry.offset as usize + index
}

/// Computes the squares a Rook on `square` attacks, given every occupied square in `blockers`.
///
/// The first blocker along each ray is included, whatever its color.
///
/// # Example
/// ```
/// # use tadpole::*;
/// let blockers = Square::A4.bitboard() | Square::A6;
/// let attacks = rook_attacks(Square::A1, blockers);
/// assert_eq!(attacks, Bitboard::RANK_1 ^ Square::A1 | Square::A2 | Square::A3 | Square::A4);
/// ```
#[inline(always)]
pub fn rook_attacks(square: Square, blockers: Bitboard) -> Bitboard {
    sliding_tables().rook[magic_index(&ROOK_MAGICS[square.index()], blockers)]
}

/// Computes the squares a Bishop on `square` attacks, given every occupied square in `blockers`.
///
/// The first blocker along each ray is included, whatever its color.
#[inline(always)]
pub fn bishop_attacks(square: Square, blockers: Bitboard) -> Bitboard {
    sliding_tables().bishop[magic_index(&BISHOP_MAGICS[square.index()], blockers)]
}

#[inline(always)]
pub fn queen_attacks(square: Square, blockers: Bitboard) -> Bitboard {
    rook_attacks(square, blockers) | bishop_attacks(square, blockers)
}

#[inline(always)]
pub const fn knight_attacks(square: Square) -> Bitboard {
    KNIGHT_ATTACKS[square.index()]
}

#[inline(always)]
pub const fn king_attacks(square: Square) -> Bitboard {
    KING_ATTACKS[square.index()]
}

/// Squares a Pawn of `color` on `square` attacks diagonally.
///
/// # Example
/// ```
/// # use tadpole::*;
/// assert_eq!(pawn_attacks(Square::E4, Color::White), Square::D5.bitboard() | Square::F5);
/// assert_eq!(pawn_attacks(Square::A5, Color::Black), Square::B4.bitboard());
/// ```
#[inline(always)]
pub const fn pawn_attacks(square: Square, color: Color) -> Bitboard {
    PAWN_ATTACKS[color.index()][square.index()]
}

/// Squares a Pawn of `color` on `square` can push to, given every occupied square in `blockers`.
///
/// A double push needs both squares in front of the Pawn to be empty.
///
/// # Example
/// ```
/// # use tadpole::*;
/// let pushes = pawn_pushes(Square::E2, Color::White, Bitboard::EMPTY_BOARD);
/// assert_eq!(pushes, Square::E3.bitboard() | Square::E4);
///
/// let pushes = pawn_pushes(Square::E7, Color::Black, Square::E5.bitboard());
/// assert_eq!(pushes, Square::E6.bitboard());
///
/// assert!(pawn_pushes(Square::E2, Color::White, Square::E3.bitboard()).is_empty());
/// ```
#[inline(always)]
pub const fn pawn_pushes(square: Square, color: Color, blockers: Bitboard) -> Bitboard {
    let empty = blockers.not();
    let single = square.bitboard().forward_by(color, 1).and(empty);
    let double = single
        .and(Bitboard::third_rank(color))
        .forward_by(color, 1)
        .and(empty);
    single.or(double)
}

/// Fetches the squares strictly between `from` and `to`, if they share a line.
///
/// # Example
/// ```
/// # use tadpole::*;
/// assert_eq!(ray_between(Square::A1, Square::A8), Bitboard::FILE_A ^ Square::A1 ^ Square::A8);
/// assert_eq!(ray_between(Square::A1, Square::B3), Bitboard::EMPTY_BOARD);
/// ```
#[inline(always)]
pub fn ray_between(from: Square, to: Square) -> Bitboard {
    RAY_BETWEEN[from][to]
}

/// Fetches the full line through `from` and `to`, if they share one.
///
/// # Example
/// ```
/// # use tadpole::*;
/// assert_eq!(ray_containing(Square::A3, Square::A5), Bitboard::FILE_A);
/// assert_eq!(ray_containing(Square::A1, Square::H8), Bitboard::A1_H8_DIAG);
/// ```
#[inline(always)]
pub fn ray_containing(from: Square, to: Square) -> Bitboard {
    RAY_CONTAINING[from][to]
}

/// Returns `true` if all three squares lie on one rank, file, or diagonal.
#[inline(always)]
pub fn are_collinear(a: Square, b: Square, c: Square) -> bool {
    ray_containing(a, b).intersects(c)
}

/// Casts an unblocked ray from `square`, excluding `square` itself.
const fn cast_ray(square: Square, df: i8, dr: i8) -> Bitboard {
    let mut ray = Bitboard::EMPTY_BOARD;
    let mut current = square;
    while let Some(shifted) = current.offset(df, dr) {
        ray = ray.or(shifted.bitboard());
        current = shifted;
    }
    ray
}

const fn generate_pawn_attacks(color: Color) -> [Bitboard; Square::COUNT] {
    let mut boards = [Bitboard::EMPTY_BOARD; Square::COUNT];
    let mut i = 0;
    while i < Square::COUNT {
        let forward = Square::from_index_unchecked(i).bitboard().forward_by(color, 1);
        boards[i] = forward.east().or(forward.west());
        i += 1;
    }
    boards
}

/// Generates the moves from every square for a piece that jumps by each of `deltas`.
const fn generate_leaper_mobility(deltas: &[(i8, i8)]) -> [Bitboard; Square::COUNT] {
    let mut mobility = [Bitboard::EMPTY_BOARD; Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let square = Square::from_index_unchecked(i);
        let mut movement = Bitboard::EMPTY_BOARD;

        let mut j = 0;
        while j < deltas.len() {
            let (df, dr) = deltas[j];
            if let Some(shifted) = square.offset(df, dr) {
                movement = movement.or(shifted.bitboard());
            }
            j += 1;
        }

        mobility[i] = movement;
        i += 1;
    }

    mobility
}

#[cfg(test)]
mod test {
    use super::*;

    /// Checks if `moves` and `legal_moves` contain all the same elements, ignoring order
    fn lists_match(moves: Bitboard, legal_moves: &[Square]) {
        assert_eq!(
            moves.population() as usize,
            legal_moves.len(),
            "\nMoves: {:?}\nLegal: {:?}",
            moves.iter().collect::<Vec<_>>(),
            legal_moves
        );

        for mv in moves {
            assert!(legal_moves.contains(&mv), "{mv} not found in {legal_moves:?}");
        }
    }

    #[test]
    fn rook_blockers() {
        let legal_moves = [
            Square::D2,
            Square::D3,
            Square::D5,
            Square::D6,
            Square::A4,
            Square::B4,
            Square::C4,
            Square::E4,
            Square::F4,
            Square::G4,
            Square::H4,
        ];

        // . . . X . . . X
        // . . . . . . . .
        // . . . X . . . .
        // . . . . . . . .
        // . . . . . . . X
        // . . X . . . . .
        // . . . X . X . .
        // . . . . . . . .
        let blockers =
            Bitboard::new(0b1000100000000000000010000000000010000000000001000010100000000000);

        lists_match(rook_attacks(Square::D4, blockers), &legal_moves);
    }

    #[test]
    fn magic_lookup_known_values() {
        let rook = rook_attacks(Square::D5, Bitboard::new(0x0800084000080800));
        assert_eq!(rook, Bitboard::new(0x0000087708080000));

        let bishop = bishop_attacks(Square::C3, Bitboard::new(0x0040200000000801));
        assert_eq!(bishop, Bitboard::new(0x000020110A000A01));
    }

    #[test]
    fn magic_lookup_matches_ray_casting_for_every_subset() {
        for square in Square::iter() {
            for blockers in Bitboard::new(ROOK_MAGICS[square.index()].mask).subsets() {
                assert_eq!(
                    rook_attacks(square, blockers),
                    slider_attacks_slow(square, blockers, &ROOK_DELTAS),
                    "rook on {square} with blockers {blockers:?}"
                );
            }

            for blockers in Bitboard::new(BISHOP_MAGICS[square.index()].mask).subsets() {
                assert_eq!(
                    bishop_attacks(square, blockers),
                    slider_attacks_slow(square, blockers, &BISHOP_DELTAS),
                    "bishop on {square} with blockers {blockers:?}"
                );
            }
        }
    }

    #[test]
    fn magic_masks_exclude_edges() {
        for square in Square::iter() {
            let rook = ROOK_MAGICS[square.index()];
            let bishop = BISHOP_MAGICS[square.index()];
            assert_eq!(rook.shift as u32, 64 - rook.mask.count_ones());
            assert_eq!(bishop.shift as u32, 64 - bishop.mask.count_ones());
            assert!(!Bitboard::new(rook.mask).intersects(square));
            assert!(!Bitboard::new(bishop.mask).intersects(square));
        }

        // Corner rook masks stop one short of the far corners
        assert_eq!(ROOK_MAGICS[Square::A1.index()].mask, 0x000101010101017E);
    }

    #[test]
    fn blockers_outside_the_mask_are_ignored() {
        let edges = Bitboard::RANK_1 | Bitboard::RANK_8 | Bitboard::FILE_A | Bitboard::FILE_H;
        assert_eq!(
            rook_attacks(Square::D4, edges),
            rook_attacks(Square::D4, Bitboard::EMPTY_BOARD)
        );
        assert_eq!(
            bishop_attacks(Square::D4, edges),
            bishop_attacks(Square::D4, Bitboard::EMPTY_BOARD)
        );
    }

    #[test]
    fn leaper_attacks() {
        lists_match(knight_attacks(Square::A1), &[Square::B3, Square::C2]);
        assert_eq!(knight_attacks(Square::D4).population(), 8);
        lists_match(
            king_attacks(Square::H8),
            &[Square::G8, Square::G7, Square::H7],
        );
        assert_eq!(pawn_attacks(Square::H2, Color::White), Square::G3.bitboard());
        assert_eq!(pawn_attacks(Square::E1, Color::Black), Bitboard::EMPTY_BOARD);
    }

    #[test]
    fn rays_between_and_through() {
        assert_eq!(
            ray_between(Square::C1, Square::F4),
            Square::D2.bitboard() | Square::E3
        );
        assert_eq!(ray_between(Square::E4, Square::E5), Bitboard::EMPTY_BOARD);
        assert_eq!(ray_between(Square::E4, Square::E4), Bitboard::EMPTY_BOARD);
        assert_eq!(ray_containing(Square::B1, Square::G1), Bitboard::RANK_1);
        assert_eq!(ray_containing(Square::B1, Square::C3), Bitboard::EMPTY_BOARD);

        assert!(are_collinear(Square::E1, Square::E4, Square::E8));
        assert!(are_collinear(Square::A1, Square::C3, Square::H8));
        assert!(!are_collinear(Square::E1, Square::E4, Square::F5));
    }
}
