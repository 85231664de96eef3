//! Algorithm constants.
//!
//! None of these are tunable: changing any of them changes every ciphertext.

/// Size of a message word in bytes.
pub const WORD_BYTES: usize = 8;

/// Number of bytes a key or nonce is normalized to.
pub const KEY_BYTES: usize = 16;

/// Number of bytes a nonce is normalized to.
pub const NONCE_BYTES: usize = 16;

/// Number of state words emitted as the tag.
pub const TAG_WORDS: usize = 4;

/// Size of the trailing authentication tag in bytes.
pub const TAG_BYTES: usize = TAG_WORDS * WORD_BYTES;

/// Minimum size of the padded plaintext region.
pub const MIN_PADDED_BYTES: usize = 24;

/// Shortest ciphertext [`seal`](crate::seal) can produce.
pub const MIN_CIPHERTEXT_BYTES: usize = MIN_PADDED_BYTES + TAG_BYTES;

/// Number of full passes the main loop makes over the message words.
pub const PASSES: usize = 3;

/// Golden-ratio increment for the `gamma` accumulator.
pub const DELTA: u64 = 0x9e37_79b9_7f4a_7c15;

/// Initial state words: `"somepseu"`, `"dorandom"`, `"lygenera"`, `"tedbytes"`
/// read little-endian.
pub const INIT_STATE: [u64; 4] = [
    u64::from_le_bytes(*b"somepseu"),
    u64::from_le_bytes(*b"dorandom"),
    u64::from_le_bytes(*b"lygenera"),
    u64::from_le_bytes(*b"tedbytes"),
];

/// Domain separator folded into `v0` after the nonce is absorbed.
pub const INIT_DOMAIN: u64 = 0xfd;

/// Domain separator folded into `v0` at finalization.
pub const TAG_DOMAIN: u64 = 0xfe;

/// Number of rounds applied during finalization.
pub const FINAL_ROUNDS: usize = 4;
