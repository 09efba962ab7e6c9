//! Conversions between coordinates, keystream words and bytes.
//!
//! The wire contract is fixed: coordinates are IEEE-754 binary32 values and
//! every 32-bit word travels little-endian, whatever the host byte order.

use crate::algebra::Vector;
use crate::error::{ChaosMaskError, Result};

/// Width in bytes of one keystream word.
pub const WORD_LEN: usize = 4;

/// Reinterprets a coordinate's bit pattern as a keystream word.
///
/// This is a pure reinterpretation of the 32 bits, not a numeric conversion:
/// `1.0` maps to `0x3F80_0000`.
pub fn keystream_word(coord: f32) -> u32 {
    coord.to_bits()
}

/// Inverse of [`keystream_word`].
pub fn coordinate_from_word(word: u32) -> f32 {
    f32::from_bits(word)
}

/// Reads a little-endian word from the first 4 bytes of `bytes`.
///
/// # Errors
/// Returns [`ChaosMaskError::IncompleteBlock`] (block 0) if fewer than
/// 4 bytes are available.
pub fn word_from_le_bytes(bytes: &[u8]) -> Result<u32> {
    let word: [u8; WORD_LEN] = bytes
        .get(..WORD_LEN)
        .and_then(|b| b.try_into().ok())
        .ok_or(ChaosMaskError::IncompleteBlock {
            block: 0,
            needed: WORD_LEN,
            available: bytes.len(),
        })?;
    Ok(u32::from_le_bytes(word))
}

/// Serializes the keystream words of `state`, little-endian, in coordinate order.
pub fn state_to_le_bytes<const N: usize>(state: &Vector<N>) -> Vec<u8> {
    let mut output = Vec::with_capacity(N * WORD_LEN);
    for coord in state.coords() {
        output.extend_from_slice(&keystream_word(coord).to_le_bytes());
    }
    output
}
