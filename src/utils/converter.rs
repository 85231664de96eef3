//! Byte-to-word conversion and padding utilities.
//!
//! All conversions are explicit little-endian packs and unpacks, so results
//! do not depend on the host's memory layout.

use subtle::ConstantTimeEq;

use crate::consts::{KEY_BYTES, MIN_PADDED_BYTES, WORD_BYTES};
use crate::error::SipCipherError;

/// Normalizes a key or nonce of any length into two little-endian words.
///
/// Inputs shorter than 16 bytes are zero-extended and their last byte is set
/// to the number of bytes added, so a short input never collides with its
/// zero-padded form. Longer inputs are truncated to their first 16 bytes.
///
/// # Parameters
/// - `input`: Key or nonce bytes of any length.
///
/// # Returns
/// The two words `(w1, w2)` read from bytes `0..8` and `8..16`.
pub fn bytes_to_two_words(input: &[u8]) -> [u64; 2] {
    let mut block = [0u8; KEY_BYTES];
    let used = input.len().min(KEY_BYTES);
    block[..used].copy_from_slice(&input[..used]);
    if input.len() < KEY_BYTES {
        block[KEY_BYTES - 1] = (KEY_BYTES - input.len()) as u8;
    }
    let mut lo = [0u8; WORD_BYTES];
    let mut hi = [0u8; WORD_BYTES];
    lo.copy_from_slice(&block[..WORD_BYTES]);
    hi.copy_from_slice(&block[WORD_BYTES..]);
    [u64::from_le_bytes(lo), u64::from_le_bytes(hi)]
}

/// Length of the padded plaintext region for a plaintext of `len` bytes.
///
/// At least one padding byte is always added, the result is never below
/// 24 bytes, and it is rounded up to a multiple of 8.
pub fn padded_len(len: usize) -> usize {
    (len + 1).max(MIN_PADDED_BYTES).next_multiple_of(WORD_BYTES)
}

/// Pads `buffer` in place with zero bytes and a trailing count byte.
///
/// The count byte holds the number of bytes added, including itself.
pub fn pad(buffer: &mut Vec<u8>) {
    let len = buffer.len();
    let padded = padded_len(len);
    buffer.resize(padded, 0);
    buffer[padded - 1] = (padded - len) as u8;
}

/// Validates and strips the padding written by [`pad`].
///
/// # Errors
/// Returns [`SipCipherError::InvalidPadding`] if the count byte is zero,
/// larger than the buffer, or any padding byte before it is nonzero.
pub fn unpad(buffer: &mut Vec<u8>) -> Result<(), SipCipherError> {
    let len = buffer.len();
    let padlen = match buffer.last() {
        Some(&count) => count as usize,
        None => return Err(SipCipherError::InvalidPadding),
    };
    if padlen == 0 || padlen > len {
        return Err(SipCipherError::InvalidPadding);
    }
    let start = len - padlen;
    let residue = buffer[start..len - 1].iter().fold(0u8, |acc, &b| acc | b);
    if !bool::from(residue.ct_eq(&0)) {
        return Err(SipCipherError::InvalidPadding);
    }
    buffer.truncate(start);
    Ok(())
}

/// Converts a byte slice to little-endian `u64` words.
///
/// # Parameters
/// - `input`: Byte slice whose length must be a multiple of 8.
///
/// # Errors
/// Returns [`SipCipherError::MalformedCiphertext`] if `input.len() % 8 != 0`.
pub fn bytes_to_words(input: &[u8]) -> Result<Vec<u64>, SipCipherError> {
    if !input.len().is_multiple_of(WORD_BYTES) {
        return Err(SipCipherError::MalformedCiphertext);
    }
    Ok(pack_words(input, 0))
}

/// Pads `buffer` with [`pad`] and returns its words, with room for `spare`
/// more words.
pub fn pad_to_words(buffer: &mut Vec<u8>, spare: usize) -> Vec<u64> {
    pad(buffer);
    pack_words(buffer, spare)
}

// Trailing bytes past the last full word are ignored.
fn pack_words(input: &[u8], spare: usize) -> Vec<u64> {
    let mut output = Vec::with_capacity(input.len() / WORD_BYTES + spare);
    for chunk in input.chunks_exact(WORD_BYTES) {
        let mut bytes = [0u8; WORD_BYTES];
        bytes.copy_from_slice(chunk);
        output.push(u64::from_le_bytes(bytes));
    }
    output
}

/// Writes `words` into `output` as little-endian bytes, replacing its
/// previous contents.
pub fn words_to_bytes_into(words: &[u64], output: &mut Vec<u8>) {
    output.clear();
    output.reserve(words.len() * WORD_BYTES);
    for word in words {
        output.extend_from_slice(&word.to_le_bytes());
    }
}

/// Converts `u64` words to little-endian bytes.
pub fn words_to_bytes(words: &[u64]) -> Vec<u8> {
    let mut output = Vec::with_capacity(words.len() * WORD_BYTES);
    words_to_bytes_into(words, &mut output);
    output
}
