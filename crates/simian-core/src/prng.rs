// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::time::{SystemTime, UNIX_EPOCH};

/// LCG multiplier for the 64-bit state step.
const PCG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;

/// `2^32` as a float divisor for unit-interval conversion.
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Stateful PCG-XSH-RR pseudo-random number generator (64-bit state, 32-bit output).
///
/// * Not cryptographically secure; use only for event generation.
/// * A `(seed, sequence)` pair fully determines the output stream on every
///   platform. The seeding procedure and the output permutation are part of
///   the reproducibility contract and covered by golden-vector tests.
/// * Owned by exactly one scheduler; every draw mutates state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Random {
    state: u64,
    increment: u64,
}

impl Random {
    /// Constructs a generator for the given seed and stream selector.
    ///
    /// The increment is `(sequence << 1) | 1` (always odd). The state starts at
    /// zero, is stepped once, has `seed` added, and is stepped again.
    pub fn new(seed: u32, sequence: u32) -> Self {
        let mut random = Self {
            state: 0,
            increment: (u64::from(sequence) << 1) | 1,
        };
        random.next_u32();
        random.state = random.state.wrapping_add(u64::from(seed));
        random.next_u32();
        random
    }

    /// Constructs a generator on stream `0`.
    pub fn from_seed(seed: u32) -> Self {
        Self::new(seed, 0)
    }

    /// Returns the next 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = old.wrapping_mul(PCG_MULTIPLIER).wrapping_add(self.increment);
        // Truncation keeps the low 32 bits of the xorshifted high half.
        #[allow(clippy::cast_possible_truncation)]
        let xorshifted = (((old >> 18) ^ old) >> 27) as u32;
        #[allow(clippy::cast_possible_truncation)]
        let rot = (old >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Returns a value in `[0, n)` via `next_u32() % n`.
    ///
    /// # Panics
    /// Panics if `n == 0`.
    pub fn uint_less_than(&mut self, n: u32) -> u32 {
        assert!(n > 0, "uint_less_than requires n > 0");
        self.next_u32() % n
    }

    /// Returns a value in `[0, n)` via `next_u32() % n`.
    ///
    /// # Panics
    /// Panics if `n <= 0`.
    pub fn int_less_than(&mut self, n: i32) -> i32 {
        assert!(n > 0, "int_less_than requires n > 0, got {n}");
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
        let value = (self.next_u32() % n as u32) as i32;
        value
    }

    /// Returns the next double in `[0, 1)` (`next_u32() / 2^32`).
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / TWO_POW_32
    }

    /// Returns the next double in `[0, limit)`.
    pub fn next_f64_below(&mut self, limit: f64) -> f64 {
        self.next_f64() * limit
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::from_seed(0)
    }
}

/// Derives a seed from wall-clock time (`unix_millis & 0xffff_ffff`).
///
/// Runs using this seed are not reproducible unless the seed is logged.
pub fn time_seed() -> u32 {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis());
    #[allow(clippy::cast_possible_truncation)]
    let seed = (millis & 0xffff_ffff) as u32;
    seed
}
