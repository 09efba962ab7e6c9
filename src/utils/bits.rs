//! Bit extraction for control bytes.

use crate::error::{ChaosMaskError, Result};

/// Number of bits in a control byte.
pub const BYTE_BITS: u32 = 8;

/// Returns bit `position` (0 = least significant) of `value` as 0 or 1.
///
/// # Errors
/// Returns [`ChaosMaskError::BitPositionOutOfRange`] if `position >= 8`.
pub fn bit_at(value: u8, position: u32) -> Result<u8> {
    if position >= BYTE_BITS {
        return Err(ChaosMaskError::BitPositionOutOfRange(position));
    }
    Ok((value >> position) & 1)
}

/// Iterates the bits of `value` from least to most significant.
pub fn bits_low_to_high(value: u8) -> impl Iterator<Item = u8> {
    (0..BYTE_BITS).map(move |j| (value >> j) & 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_at() {
        assert_eq!(bit_at(0b0000_0001, 0).unwrap(), 1);
        assert_eq!(bit_at(0b0000_0001, 1).unwrap(), 0);
        assert_eq!(bit_at(0b1000_0000, 7).unwrap(), 1);
    }

    #[test]
    fn test_bit_at_out_of_range() {
        assert_eq!(bit_at(0xFF, 8), Err(ChaosMaskError::BitPositionOutOfRange(8)));
    }

    #[test]
    fn test_bits_low_to_high() {
        let bits: Vec<u8> = bits_low_to_high(0b1010_0011).collect();
        assert_eq!(bits, vec![1, 1, 0, 0, 0, 1, 0, 1]);
    }

    #[test]
    fn test_bits_of_zero_and_max() {
        assert!(bits_low_to_high(0).all(|b| b == 0));
        assert!(bits_low_to_high(0xFF).all(|b| b == 1));
    }
}
