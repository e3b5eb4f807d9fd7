/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Fixed seeds, so that hash keys are identical across builds.
const SEEDS: [u64; 4] = [
    0x3C6E_F372_FE94_F82B,
    0xA54F_F53A_5F1D_36F1,
    0x510E_527F_ADE6_82D1,
    0x9B05_688C_2B3E_6C1F,
];

/// A `const`-friendly pseudo-random number generator implementing xoshiro256**.
///
/// See <https://prng.di.unimi.it/xoshiro256starstar.c>
#[derive(Clone, Copy, Debug)]
pub struct XoShiRo([u64; 4]);

impl XoShiRo {
    #[inline(always)]
    pub const fn new() -> Self {
        Self::from_seeds(SEEDS)
    }

    #[inline(always)]
    pub const fn from_seeds(seeds: [u64; 4]) -> Self {
        Self(seeds)
    }

    /// Advances the generator, returning `(next, Self)` so it can be threaded through `const` code.
    #[inline(always)]
    pub const fn next_const(self) -> (u64, Self) {
        let mut s = self.0;
        let result = s[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = s[1] << 17;

        s[2] ^= s[0];
        s[3] ^= s[1];
        s[1] ^= s[2];
        s[0] ^= s[3];

        s[2] ^= t;
        s[3] = s[3].rotate_left(45);

        (result, Self(s))
    }
}

impl Default for XoShiRo {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for XoShiRo {
    type Item = u64;
    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let (value, next) = self.next_const();
        *self = next;
        Some(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_prng_is_deterministic() {
        let a: Vec<u64> = XoShiRo::new().take(16).collect();
        let b: Vec<u64> = XoShiRo::default().take(16).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_prng_yields_distinct_values() {
        let mut values: Vec<u64> = XoShiRo::new().take(1024).collect();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), 1024);
    }
}
