//! ARX round function over a four-word state.
//!
//! The forward round is the SipHash round with one extra `v2` half-rotation
//! at the end, which makes every step individually invertible. The inverse
//! round undoes the steps in reverse order using subtraction and right
//! rotation.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Four 64-bit words `v0..v3` mutated in place by the round function.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct State(pub [u64; 4]);

impl State {
    /// Creates a state from four words.
    pub fn new(words: [u64; 4]) -> Self {
        State(words)
    }

    /// Returns the state words.
    pub fn words(&self) -> &[u64; 4] {
        &self.0
    }

    /// Applies one forward round.
    #[inline]
    pub fn permute_right(&mut self) {
        let [v0, v1, v2, v3] = &mut self.0;
        *v0 = v0.wrapping_add(*v1);
        *v2 = v2.wrapping_add(*v3);
        *v1 = v1.rotate_left(13);
        *v3 = v3.rotate_left(16);
        *v1 ^= *v0;
        *v3 ^= *v2;
        *v0 = v0.rotate_left(32);
        *v2 = v2.wrapping_add(*v1);
        *v0 = v0.wrapping_add(*v3);
        *v1 = v1.rotate_left(17);
        *v3 = v3.rotate_left(21);
        *v1 ^= *v2;
        *v3 ^= *v0;
        *v2 = v2.rotate_left(32);
    }

    /// Applies one inverse round, undoing [`permute_right`](Self::permute_right).
    #[inline]
    pub fn permute_left(&mut self) {
        let [v0, v1, v2, v3] = &mut self.0;
        *v2 = v2.rotate_right(32);
        *v3 ^= *v0;
        *v1 ^= *v2;
        *v3 = v3.rotate_right(21);
        *v1 = v1.rotate_right(17);
        *v0 = v0.wrapping_sub(*v3);
        *v2 = v2.wrapping_sub(*v1);
        *v0 = v0.rotate_right(32);
        *v3 ^= *v2;
        *v1 ^= *v0;
        *v3 = v3.rotate_right(16);
        *v1 = v1.rotate_right(13);
        *v2 = v2.wrapping_sub(*v3);
        *v0 = v0.wrapping_sub(*v1);
    }
}
