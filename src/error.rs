//! Error types for the sipcipher library.

use std::fmt;

/// Errors produced when opening a ciphertext.
///
/// Sealing never fails. Opening can fail in three ways, and every one of them
/// means the ciphertext must be rejected as a whole; no partial plaintext is
/// ever returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SipCipherError {
    /// Ciphertext length is not a multiple of 8 or is shorter than 56 bytes.
    MalformedCiphertext,
    /// The state recovered from the tag does not match the key and nonce.
    ///
    /// Covers a wrong key, a wrong nonce and any tampering with the ciphertext.
    AuthenticationFailed,
    /// The recovered padding length or padding bytes are invalid.
    InvalidPadding,
}

impl fmt::Display for SipCipherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SipCipherError::MalformedCiphertext => {
                write!(
                    f,
                    "Ciphertext must be word aligned and at least 56 bytes long"
                )
            }
            SipCipherError::AuthenticationFailed => {
                write!(f, "Ciphertext authentication failed")
            }
            SipCipherError::InvalidPadding => {
                write!(f, "Ciphertext padding is invalid")
            }
        }
    }
}

impl std::error::Error for SipCipherError {}
