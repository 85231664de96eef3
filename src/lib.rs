//! SipCipher authenticated encryption.
//!
//! SipCipher is a permutation-based duplex cipher built from a SipHash-style
//! ARX round. The same round drives both the keystream and a running
//! authenticator: every padded plaintext word is absorbed into a four-word
//! state over three passes, and the final state is whitened and appended as
//! a 32-byte tag. Opening runs the whole trajectory backwards and accepts
//! only if it lands exactly on the key-derived initial state.
//!
//! The construction is bespoke, not a standardized AEAD. Key management,
//! nonce uniqueness and wire framing are the caller's responsibility.
//!
//! # Architecture
//!
//! ```text
//! permutation  (State: forward / inverse ARX round)
//!     ↓
//! schedule     (k/n swap registers + gamma accumulator)
//!     ↓
//! duplex       (init → 3-pass absorb/produce → finalize, and the inverse)
//!     ↓
//! sipcipher    (padding, little-endian codec, seal / open)
//! ```
//!
//! # Examples
//!
//! Seal and open a message:
//!
//! ```
//! let key = b"0123456789abcdef";
//! let nonce = b"unique nonce 001";
//!
//! let sealed = sipcipher::seal(key, nonce, b"hello");
//! assert_eq!(sealed.len(), 56);
//!
//! let opened = sipcipher::open(key, nonce, &sealed).unwrap();
//! assert_eq!(opened, b"hello");
//! ```
//!
//! Any modification is rejected:
//!
//! ```
//! use sipcipher::SipCipherError;
//!
//! let mut sealed = sipcipher::seal(b"key", b"nonce", b"hello");
//! let last = sealed.len() - 1;
//! sealed[last] ^= 0x80;
//! assert_eq!(
//!     sipcipher::open(b"key", b"nonce", &sealed),
//!     Err(SipCipherError::AuthenticationFailed)
//! );
//! ```

#![deny(clippy::all)]

pub mod consts;
pub mod duplex;
pub mod error;
pub mod permutation;
pub mod schedule;
pub mod utils;

mod sipcipher;

pub use error::SipCipherError;
pub use sipcipher::{open, open_in_place, seal, seal_in_place, sealed_len, SipCipher};
