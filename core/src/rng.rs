//! Park-Miller Linear Congruential Generator (MINSTD) for seeded indices
//!
//! Turns a fixed-width seed into an index below an arbitrary-precision bound,
//! so a 32-bit seed names one maze reproducibly on every platform.
//!
//! Constants:
//! - Multiplier (a): 48271
//! - Modulus (m): 2^31 - 1 = 2147483647
//!
//! Reference: https://en.wikipedia.org/wiki/Lehmer_random_number_generator

use alloc::vec::Vec;

use num_bigint::BigUint;
use num_traits::Zero;

const A: u64 = 48271;
const M: u64 = 2147483647; // 2^31 - 1

/// Bits taken from each generator step.
const CHUNK_BITS: u64 = 16;

/// Park-Miller Linear Congruential Generator
///
/// Same seed always produces the same sequence of indices.
pub struct SeededIndex {
    state: u32,
}

impl SeededIndex {
    /// Create a new generator with the given seed
    ///
    /// The seed is reduced mod M first; a zero state would stay zero
    /// forever, so it is replaced with 1.
    pub fn new(seed: u32) -> Self {
        let state = (seed as u64 % M) as u32;
        Self {
            state: if state == 0 { 1 } else { state },
        }
    }

    fn advance(&mut self) {
        self.state = ((self.state as u64 * A) % M) as u32;
    }

    /// Choose random index from a range [0, len)
    ///
    /// Pure integer arithmetic: `(state * len) / M`
    pub fn choice_index(&mut self, len: usize) -> usize {
        self.advance();
        ((self.state as u64 * len as u64) / M) as usize
    }

    /// Draw an index in `[0, bound)`.
    ///
    /// Fills `bound.bits()` bits from 16-bit chunks and rejects candidates
    /// that are not below `bound`, so fewer than two draws are needed on
    /// average. A zero bound yields zero.
    pub fn below(&mut self, bound: &BigUint) -> BigUint {
        let bits = bound.bits();
        if bits == 0 {
            return BigUint::zero();
        }

        let chunks = bits.div_ceil(CHUNK_BITS);
        let surplus = (chunks * CHUNK_BITS - bits) as usize;

        loop {
            let digits: Vec<u32> = (0..chunks)
                .map(|_| self.choice_index(1 << CHUNK_BITS) as u32)
                .collect::<Vec<u32>>()
                .chunks(2)
                .map(|pair| pair[0] | pair.get(1).map_or(0, |hi| hi << CHUNK_BITS))
                .collect();
            let candidate = BigUint::from_slice(&digits) >> surplus;
            if &candidate < bound {
                return candidate;
            }
        }
    }
}
