//! SipCipher: seal and open entry points.
//!
//! Orchestrates padding, the byte/word codec and the [`Duplex`] state
//! machine. Ciphertext layout is the transformed padded plaintext followed
//! by the 32-byte tag.

use tracing::{debug, trace};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::consts::{MIN_CIPHERTEXT_BYTES, TAG_BYTES, TAG_WORDS, WORD_BYTES};
use crate::duplex::Duplex;
use crate::error::SipCipherError;
use crate::utils::converter;

/// Returns the ciphertext length for a plaintext of `plaintext_len` bytes.
///
/// # Examples
///
/// ```
/// assert_eq!(sipcipher::sealed_len(0), 56);
/// assert_eq!(sipcipher::sealed_len(24), 64);
/// ```
pub fn sealed_len(plaintext_len: usize) -> usize {
    converter::padded_len(plaintext_len) + TAG_BYTES
}

/// Keyed cipher handle.
///
/// Normalizes the key once; every call takes its own nonce. The key words
/// are wiped when the handle is dropped.
///
/// # Examples
///
/// ```
/// use sipcipher::SipCipher;
///
/// let cipher = SipCipher::new(b"0123456789abcdef");
/// let sealed = cipher.seal(b"nonce-0001", b"attack at dawn");
/// assert_eq!(cipher.open(b"nonce-0001", &sealed).unwrap(), b"attack at dawn");
/// assert!(cipher.open(b"nonce-0002", &sealed).is_err());
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SipCipher {
    key: [u64; 2],
}

impl std::fmt::Debug for SipCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SipCipher").finish_non_exhaustive()
    }
}

impl SipCipher {
    /// Creates a handle from key bytes of any length.
    ///
    /// Keys shorter than 16 bytes are zero-extended with a length marker;
    /// longer keys are truncated to 16 bytes.
    pub fn new(key: &[u8]) -> Self {
        SipCipher {
            key: converter::bytes_to_two_words(key),
        }
    }

    /// Encrypts and authenticates `plaintext` under `nonce`.
    ///
    /// The returned ciphertext is [`sealed_len`]`(plaintext.len())` bytes.
    pub fn seal(&self, nonce: &[u8], plaintext: &[u8]) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(sealed_len(plaintext.len()));
        buffer.extend_from_slice(plaintext);
        self.seal_in_place(nonce, &mut buffer);
        buffer
    }

    /// Replaces the plaintext in `buffer` with its ciphertext.
    pub fn seal_in_place(&self, nonce: &[u8], buffer: &mut Vec<u8>) {
        trace!(plaintext_len = buffer.len(), "sealing");
        let nonce = converter::bytes_to_two_words(nonce);

        let mut words = converter::pad_to_words(buffer, TAG_WORDS);

        let mut duplex = Duplex::new(self.key, nonce);
        duplex.transform(&mut words);
        let tag = duplex.finalize();
        words.extend_from_slice(&tag);

        converter::words_to_bytes_into(&words, buffer);
        words.zeroize();
    }

    /// Verifies and decrypts `ciphertext` under `nonce`.
    ///
    /// # Errors
    /// - [`SipCipherError::MalformedCiphertext`] if the length is not a
    ///   multiple of 8 or is below 56 bytes.
    /// - [`SipCipherError::AuthenticationFailed`] for a wrong key, a wrong
    ///   nonce or a modified ciphertext.
    /// - [`SipCipherError::InvalidPadding`] if the decrypted padding is
    ///   inconsistent.
    pub fn open(&self, nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, SipCipherError> {
        let mut buffer = ciphertext.to_vec();
        self.open_in_place(nonce, &mut buffer)?;
        Ok(buffer)
    }

    /// Replaces the ciphertext in `buffer` with its plaintext.
    ///
    /// On failure the buffer is wiped and left empty.
    ///
    /// # Errors
    /// Same as [`open`](Self::open).
    pub fn open_in_place(
        &self,
        nonce: &[u8],
        buffer: &mut Vec<u8>,
    ) -> Result<(), SipCipherError> {
        trace!(ciphertext_len = buffer.len(), "opening");
        let result = self.try_open_in_place(nonce, buffer);
        if result.is_err() {
            buffer.zeroize();
            debug!("ciphertext rejected");
        }
        result
    }

    fn try_open_in_place(
        &self,
        nonce: &[u8],
        buffer: &mut Vec<u8>,
    ) -> Result<(), SipCipherError> {
        if buffer.len() < MIN_CIPHERTEXT_BYTES || !buffer.len().is_multiple_of(WORD_BYTES) {
            return Err(SipCipherError::MalformedCiphertext);
        }
        let nonce = converter::bytes_to_two_words(nonce);
        let mut words = converter::bytes_to_words(buffer)?;

        let split = words.len() - TAG_WORDS;
        let mut tag = [0u64; TAG_WORDS];
        tag.copy_from_slice(&words[split..]);
        words.truncate(split);

        let mut duplex = Duplex::from_tag(self.key, nonce, tag, words.len());
        duplex.untransform(&mut words);
        let verified = duplex.verify();

        converter::words_to_bytes_into(&words, buffer);
        words.zeroize();
        verified?;
        converter::unpad(buffer)
    }
}

/// Encrypts and authenticates `plaintext` with `key` and `nonce`.
///
/// Keys and nonces of any length are accepted and normalized to 16 bytes.
/// The same inputs always produce the same ciphertext; reusing a nonce
/// under one key is the caller's responsibility to avoid.
///
/// # Examples
///
/// ```
/// let ct = sipcipher::seal(b"key", b"nonce", b"hello");
/// assert_eq!(ct.len(), sipcipher::sealed_len(5));
/// assert_eq!(sipcipher::open(b"key", b"nonce", &ct).unwrap(), b"hello");
/// ```
pub fn seal(key: &[u8], nonce: &[u8], plaintext: &[u8]) -> Vec<u8> {
    SipCipher::new(key).seal(nonce, plaintext)
}

/// Verifies and decrypts a ciphertext produced by [`seal`].
///
/// # Errors
/// See [`SipCipher::open`].
///
/// # Examples
///
/// ```
/// use sipcipher::SipCipherError;
///
/// let mut ct = sipcipher::seal(b"key", b"nonce", b"hello");
/// ct[3] ^= 0x01;
/// assert_eq!(
///     sipcipher::open(b"key", b"nonce", &ct),
///     Err(SipCipherError::AuthenticationFailed)
/// );
/// ```
pub fn open(key: &[u8], nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, SipCipherError> {
    SipCipher::new(key).open(nonce, ciphertext)
}

/// In-place form of [`seal`].
pub fn seal_in_place(key: &[u8], nonce: &[u8], buffer: &mut Vec<u8>) {
    SipCipher::new(key).seal_in_place(nonce, buffer)
}

/// In-place form of [`open`]. On failure the buffer is wiped and left empty.
///
/// # Errors
/// See [`SipCipher::open`].
pub fn open_in_place(
    key: &[u8],
    nonce: &[u8],
    buffer: &mut Vec<u8>,
) -> Result<(), SipCipherError> {
    SipCipher::new(key).open_in_place(nonce, buffer)
}
