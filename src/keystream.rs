//! Keystream extraction and XOR masking.
//!
//! Each block holds one 4-byte word per state coordinate (16 bytes for the
//! 4D Lorenz-Stenflo flow, 12 bytes for the 3D Lorenz flow). For every block
//! the trajectory advances exactly once, then each little-endian data word is
//! XORed with the bit pattern of the matching coordinate:
//!
//! ```text
//! C[i] = P[i] XOR to_bits(state[i])
//! ```
//!
//! The trajectory never depends on the data, so running the same procedure
//! with the same seed, parameters and wind-up over the ciphertext restores the
//! plaintext.

use std::io::{ErrorKind, Read, Write};

use tracing::{debug, trace};

use crate::dynamics::{Flow, Trajectory};
use crate::error::{ChaosMaskError, Result};
use crate::utils::converter::{keystream_word, state_to_le_bytes, word_from_le_bytes, WORD_LEN};

/// XOR masker driven by a wound-up trajectory.
#[derive(Debug, Clone)]
pub struct KeystreamMasker<F, const N: usize> {
    trajectory: Trajectory<F, N>,
    blocks: usize,
}

impl<F: Flow<N>, const N: usize> KeystreamMasker<F, N> {
    /// Number of bytes in one block.
    pub const BLOCK_LEN: usize = N * WORD_LEN;

    /// Creates a masker, discarding `wind_up + MIN_WIND_UP` transient steps.
    ///
    /// # Errors
    /// Returns [`ChaosMaskError::NumericDegeneracy`] if the trajectory diverges
    /// during the wind-up.
    pub fn new(mut trajectory: Trajectory<F, N>, wind_up: u32) -> Result<Self> {
        trajectory.wind_up(wind_up)?;
        Ok(KeystreamMasker {
            trajectory,
            blocks: 0,
        })
    }

    /// Returns the block length in bytes.
    pub fn block_len(&self) -> usize {
        Self::BLOCK_LEN
    }

    /// Returns the number of blocks processed so far.
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    /// Returns the underlying trajectory.
    pub fn trajectory(&self) -> &Trajectory<F, N> {
        &self.trajectory
    }

    /// Advances once and returns the keystream bytes of the new state.
    ///
    /// Counts as one processed block.
    pub fn next_keystream_block(&mut self) -> Result<Vec<u8>> {
        let state = *self.trajectory.advance()?;
        self.blocks += 1;
        Ok(state_to_le_bytes(&state))
    }

    /// Masks one block in place.
    ///
    /// # Errors
    /// - [`ChaosMaskError::IncompleteBlock`] if `block` is shorter than a block.
    /// - [`ChaosMaskError::DimensionMismatch`] if `block` is longer than a block.
    /// - [`ChaosMaskError::NumericDegeneracy`] if the trajectory diverges.
    ///
    /// On error the block is left untouched.
    pub fn mask_block(&mut self, block: &mut [u8]) -> Result<()> {
        if block.len() < Self::BLOCK_LEN {
            return Err(ChaosMaskError::IncompleteBlock {
                block: self.blocks,
                needed: Self::BLOCK_LEN,
                available: block.len(),
            });
        }
        if block.len() > Self::BLOCK_LEN {
            return Err(ChaosMaskError::DimensionMismatch {
                expected: Self::BLOCK_LEN,
                found: block.len(),
            });
        }

        let state = *self.trajectory.advance()?;
        for (chunk, coord) in block.chunks_exact_mut(WORD_LEN).zip(state.coords()) {
            let word = word_from_le_bytes(chunk)? ^ keystream_word(coord);
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        self.blocks += 1;
        trace!(block = self.blocks, "masked block");
        Ok(())
    }

    /// Masks a whole message held in memory.
    ///
    /// # Errors
    /// - [`ChaosMaskError::EmptyMessage`] if `data` is empty.
    /// - [`ChaosMaskError::IncompleteBlock`] if `data.len()` is not a multiple
    ///   of the block length. Nothing is masked in that case.
    /// - [`ChaosMaskError::NumericDegeneracy`] if the trajectory diverges.
    pub fn mask(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        if data.is_empty() {
            return Err(ChaosMaskError::EmptyMessage);
        }
        let remainder = data.len() % Self::BLOCK_LEN;
        if remainder != 0 {
            return Err(ChaosMaskError::IncompleteBlock {
                block: data.len() / Self::BLOCK_LEN,
                needed: Self::BLOCK_LEN,
                available: remainder,
            });
        }

        let mut output = data.to_vec();
        for block in output.chunks_exact_mut(Self::BLOCK_LEN) {
            self.mask_block(block)?;
        }
        Ok(output)
    }

    /// Masks `message_length` bytes from `input` into `output`.
    ///
    /// Blocks are read, masked and written strictly in order. A block is only
    /// written once it has been read completely, so a short final block
    /// produces no output.
    ///
    /// # Returns
    /// The number of bytes written.
    ///
    /// # Errors
    /// - [`ChaosMaskError::EmptyMessage`] if `message_length` is 0.
    /// - [`ChaosMaskError::IncompleteBlock`] if the input ends mid-block or
    ///   `message_length` is not a multiple of the block length.
    /// - [`ChaosMaskError::Io`] on read or write failures.
    pub fn mask_stream<R: Read, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
        message_length: usize,
    ) -> Result<usize> {
        if message_length == 0 {
            return Err(ChaosMaskError::EmptyMessage);
        }
        let num_blocks = message_length.div_ceil(Self::BLOCK_LEN);
        debug!(message_length, num_blocks, "masking stream");

        let mut buffer = vec![0u8; Self::BLOCK_LEN];
        let mut written = 0;
        for block in 0..num_blocks {
            let wanted = (message_length - block * Self::BLOCK_LEN).min(Self::BLOCK_LEN);
            let got = read_up_to(input, &mut buffer[..wanted])?;
            if got < Self::BLOCK_LEN {
                return Err(ChaosMaskError::IncompleteBlock {
                    block,
                    needed: Self::BLOCK_LEN,
                    available: got,
                });
            }
            self.mask_block(&mut buffer)?;
            output.write_all(&buffer)?;
            written += Self::BLOCK_LEN;
        }
        output.flush()?;

        debug!(written, "stream masked");
        Ok(written)
    }
}

/// Fills `buf` from `input`, stopping early only at end of stream.
pub(crate) fn read_up_to<R: Read>(input: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
