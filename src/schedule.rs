//! Per-word key/nonce register schedule.
//!
//! Every processed word swaps `k1`/`k2` and `n1`/`n2` and adds [`DELTA`] to
//! `gamma`. Keeping those registers in one struct lets the forward loop call
//! [`Schedule::advance`] and the inverse loop call [`Schedule::retreat`] at
//! mirrored points.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::consts::DELTA;

/// Rotating key and nonce registers plus the global `gamma` accumulator.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Schedule {
    k1: u64,
    k2: u64,
    n1: u64,
    n2: u64,
    gamma: u64,
}

impl Schedule {
    /// Creates the schedule for word 0 of pass 0.
    pub fn new(key: [u64; 2], nonce: [u64; 2]) -> Self {
        Schedule {
            k1: key[0],
            k2: key[1],
            n1: nonce[0],
            n2: nonce[1],
            gamma: 0,
        }
    }

    /// Creates the schedule as it stands after `steps` calls to
    /// [`advance`](Self::advance) from [`new`](Self::new).
    ///
    /// Only the parity of `steps` matters for the registers; `gamma` wraps.
    pub fn after_steps(key: [u64; 2], nonce: [u64; 2], steps: usize) -> Self {
        let mut schedule = Schedule::new(key, nonce);
        if steps & 1 != 0 {
            schedule.swap();
        }
        schedule.gamma = DELTA.wrapping_mul(steps as u64);
        schedule
    }

    pub fn k1(&self) -> u64 {
        self.k1
    }

    pub fn k2(&self) -> u64 {
        self.k2
    }

    pub fn n1(&self) -> u64 {
        self.n1
    }

    pub fn n2(&self) -> u64 {
        self.n2
    }

    pub fn gamma(&self) -> u64 {
        self.gamma
    }

    /// `k1` rotated left by the top 6 bits of `gamma` (always 0..=63).
    #[inline]
    pub fn key_mix(&self) -> u64 {
        self.k1.rotate_left((self.gamma >> 58) as u32)
    }

    /// `n1 + gamma`, wrapping.
    #[inline]
    pub fn nonce_mix(&self) -> u64 {
        self.n1.wrapping_add(self.gamma)
    }

    /// Moves to the next word.
    #[inline]
    pub fn advance(&mut self) {
        self.gamma = self.gamma.wrapping_add(DELTA);
        self.swap();
    }

    /// Moves back to the previous word.
    #[inline]
    pub fn retreat(&mut self) {
        self.gamma = self.gamma.wrapping_sub(DELTA);
        self.swap();
    }

    fn swap(&mut self) {
        std::mem::swap(&mut self.k1, &mut self.k2);
        std::mem::swap(&mut self.n1, &mut self.n2);
    }
}
