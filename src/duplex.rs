//! Duplex state machine: initialization, the absorb/produce loop and
//! finalization, each with an exact inverse.
//!
//! Sealing runs `init -> transform -> finalize`. Opening starts from the tag,
//! runs `unfinalize -> untransform -> verify` and accepts only when the
//! recovered state equals the key-derived initial state.

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::consts::{FINAL_ROUNDS, INIT_DOMAIN, INIT_STATE, PASSES, TAG_DOMAIN, TAG_WORDS};
use crate::error::SipCipherError;
use crate::permutation::State;
use crate::schedule::Schedule;

/// Live cipher state: the four state words and the register schedule.
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct Duplex {
    state: State,
    schedule: Schedule,
    key: [u64; 2],
    nonce: [u64; 2],
}

/// The constants XORed with `(k1, k2, k1, k2)`.
fn keyed_state(key: [u64; 2]) -> State {
    State::new([
        INIT_STATE[0] ^ key[0],
        INIT_STATE[1] ^ key[1],
        INIT_STATE[2] ^ key[0],
        INIT_STATE[3] ^ key[1],
    ])
}

impl Duplex {
    /// Builds the keyed state, absorbs the nonce and applies the
    /// encryption domain separator.
    pub fn new(key: [u64; 2], nonce: [u64; 2]) -> Self {
        let mut state = keyed_state(key);
        state.0[3] ^= nonce[0];
        state.permute_right();
        state.0[3] ^= nonce[1];
        state.permute_right();
        state.0[0] ^= INIT_DOMAIN;

        Duplex {
            state,
            schedule: Schedule::new(key, nonce),
            key,
            nonce,
        }
    }

    /// Rebuilds the end-of-loop state from a tag for a message of
    /// `word_count` words.
    pub fn from_tag(
        key: [u64; 2],
        nonce: [u64; 2],
        tag: [u64; TAG_WORDS],
        word_count: usize,
    ) -> Self {
        let mut duplex = Duplex {
            state: State::new(tag),
            schedule: Schedule::after_steps(key, nonce, word_count * PASSES),
            key,
            nonce,
        };
        duplex.unfinalize();
        duplex
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Absorbs one plaintext word and returns its ciphertext word.
    #[inline]
    pub fn absorb(&mut self, plain: u64) -> u64 {
        let v = &mut self.state.0;
        v[3] ^= plain;
        v[1] ^= self.schedule.key_mix();
        v[2] ^= self.schedule.nonce_mix();
        self.state.permute_right();
        self.state.0[0] ^= plain;
        let cipher = plain.wrapping_add(self.state.0[3]);
        self.schedule.advance();
        cipher
    }

    /// Inverse of [`absorb`](Self::absorb): takes the ciphertext word and
    /// returns the plaintext word.
    #[inline]
    pub fn unabsorb(&mut self, cipher: u64) -> u64 {
        self.schedule.retreat();
        let plain = cipher.wrapping_sub(self.state.0[3]);
        self.state.0[0] ^= plain;
        self.state.permute_left();
        let v = &mut self.state.0;
        v[1] ^= self.schedule.key_mix();
        v[2] ^= self.schedule.nonce_mix();
        v[3] ^= plain;
        plain
    }

    /// Runs every pass over `words`, replacing plaintext words with
    /// ciphertext words.
    pub fn transform(&mut self, words: &mut [u64]) {
        for _ in 0..PASSES {
            for word in words.iter_mut() {
                *word = self.absorb(*word);
            }
        }
    }

    /// Inverse of [`transform`](Self::transform): passes in reverse, words
    /// from last to first.
    pub fn untransform(&mut self, words: &mut [u64]) {
        for _ in 0..PASSES {
            for word in words.iter_mut().rev() {
                *word = self.unabsorb(*word);
            }
        }
    }

    /// Mixes the registers into the state, runs the finalization rounds,
    /// whitens, and returns the tag words.
    pub fn finalize(&mut self) -> [u64; TAG_WORDS] {
        let (k1, k2) = (self.schedule.k1(), self.schedule.k2());
        let (n1, n2) = (self.schedule.n1(), self.schedule.n2());
        let gamma = self.schedule.gamma();

        let v = &mut self.state.0;
        v[1] ^= k1;
        v[3] ^= k2;
        v[0] ^= n2.wrapping_add(TAG_DOMAIN);
        v[2] ^= n1.wrapping_add(gamma);
        for _ in 0..FINAL_ROUNDS {
            self.state.permute_right();
        }
        let v = &mut self.state.0;
        v[1] ^= k1.wrapping_add(k2);
        v[3] ^= k2.wrapping_add(k1.wrapping_mul(2));
        v[0] ^= n2;
        v[2] ^= n1;
        *v
    }

    fn unfinalize(&mut self) {
        let (k1, k2) = (self.schedule.k1(), self.schedule.k2());
        let (n1, n2) = (self.schedule.n1(), self.schedule.n2());
        let gamma = self.schedule.gamma();

        let v = &mut self.state.0;
        v[1] ^= k1.wrapping_add(k2);
        v[3] ^= k2.wrapping_add(k1.wrapping_mul(2));
        v[0] ^= n2;
        v[2] ^= n1;
        for _ in 0..FINAL_ROUNDS {
            self.state.permute_left();
        }
        let v = &mut self.state.0;
        v[1] ^= k1;
        v[3] ^= k2;
        v[0] ^= n2.wrapping_add(TAG_DOMAIN);
        v[2] ^= n1.wrapping_add(gamma);
    }

    /// Undoes the nonce absorption and checks the result against the
    /// key-derived initial state.
    ///
    /// Must be called after [`untransform`](Self::untransform).
    ///
    /// # Errors
    /// Returns [`SipCipherError::AuthenticationFailed`] on any mismatch.
    pub fn verify(mut self) -> Result<(), SipCipherError> {
        let nonce = self.nonce;
        self.state.0[0] ^= INIT_DOMAIN;
        self.state.permute_left();
        self.state.0[3] ^= nonce[1];
        self.state.permute_left();
        self.state.0[3] ^= nonce[0];

        let expected = keyed_state(self.key);
        let recovered = self.state.words();
        let equal = expected
            .words()
            .iter()
            .zip(recovered.iter())
            .fold(subtle::Choice::from(1u8), |acc, (a, b)| acc & a.ct_eq(b));
        if bool::from(equal) {
            Ok(())
        } else {
            Err(SipCipherError::AuthenticationFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO_KEY: [u64; 2] = [0, 0];
    // 12 zero bytes normalize to a count byte of 4 in the last position.
    const SHORT_NONCE: [u64; 2] = [0, 0x0400_0000_0000_0000];

    #[test]
    fn test_initial_state_vector() {
        let duplex = Duplex::new(ZERO_KEY, SHORT_NONCE);
        assert_eq!(
            duplex.state().words(),
            &[
                0x24f3_e974_c546_136d,
                0x2627_9821_6936_3572,
                0x3494_355d_6711_a0a4,
                0x81c2_f5c6_6b93_7916,
            ]
        );
    }

    #[test]
    fn test_unabsorb_undoes_absorb() {
        let mut duplex = Duplex::new([7, 9], [11, 13]);
        let before = duplex.clone();
        let c = duplex.absorb(0xdead_beef);
        assert_ne!(c, 0xdead_beef);
        let p = duplex.unabsorb(c);
        assert_eq!(p, 0xdead_beef);
        assert_eq!(duplex.state(), before.state());
        assert_eq!(duplex.schedule(), before.schedule());
    }

    #[test]
    fn test_full_roundtrip_verifies() {
        let key = [0x0123_4567, 0x89ab_cdef];
        let nonce = [42, 43];
        let original: Vec<u64> = (0..5).collect();
        let mut words = original.clone();

        let mut sealer = Duplex::new(key, nonce);
        sealer.transform(&mut words);
        let tag = sealer.finalize();
        assert_ne!(words, original);

        let mut opener = Duplex::from_tag(key, nonce, tag, words.len());
        opener.untransform(&mut words);
        assert_eq!(words, original);
        assert_eq!(opener.verify(), Ok(()));
    }

    #[test]
    fn test_wrong_key_fails_verify() {
        let nonce = [1, 2];
        let mut words = vec![10u64, 20, 30];
        let mut sealer = Duplex::new([5, 6], nonce);
        sealer.transform(&mut words);
        let tag = sealer.finalize();

        let mut opener = Duplex::from_tag([5, 7], nonce, tag, words.len());
        opener.untransform(&mut words);
        assert_eq!(opener.verify(), Err(SipCipherError::AuthenticationFailed));
    }

    #[test]
    fn test_tampered_tag_fails_verify() {
        let key = [5, 6];
        let nonce = [1, 2];
        let mut words = vec![10u64, 20, 30];
        let mut sealer = Duplex::new(key, nonce);
        sealer.transform(&mut words);
        let mut tag = sealer.finalize();
        tag[2] ^= 1 << 17;

        let mut opener = Duplex::from_tag(key, nonce, tag, words.len());
        opener.untransform(&mut words);
        assert_eq!(opener.verify(), Err(SipCipherError::AuthenticationFailed));
    }
}
