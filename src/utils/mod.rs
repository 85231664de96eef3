//! Byte and word helpers shared by the cipher.

pub mod converter;
