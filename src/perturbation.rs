//! Bit-indexed parameter perturbation.
//!
//! Each 3-byte control group `(d_rho, d_sigma, d_beta)` expands into eight
//! outputs. For bit `j` (least significant first) every parameter takes either
//! its base value or twice its base value, depending on bit `j` of its control
//! byte:
//!
//! ```text
//! rho_j = rho + rho * bit_j(d_rho)
//! ```
//!
//! The matrix is rebuilt from scratch for every bit and the trajectory takes
//! exactly one step before its x coordinate is emitted. Only the state vector
//! carries over between bits and groups.

use std::io::{Read, Write};

use tracing::debug;

use crate::dynamics::{Lorenz, LorenzParameters, Trajectory};
use crate::error::{ChaosMaskError, Result};
use crate::keystream::read_up_to;
use crate::sequence::write_values;
use crate::utils::bits::{bit_at, BYTE_BITS};

/// Bytes per control group.
pub const CONTROL_GROUP_LEN: usize = 3;

/// Values emitted per control group, one per bit.
pub const OUTPUTS_PER_GROUP: usize = BYTE_BITS as usize;

/// Derives per-bit parameter variants from control bytes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerturbationSchedule {
    base: LorenzParameters,
}

impl PerturbationSchedule {
    /// Creates a schedule around `base`.
    pub fn new(base: LorenzParameters) -> Self {
        PerturbationSchedule { base }
    }

    /// Returns the unperturbed parameters.
    pub fn base(&self) -> &LorenzParameters {
        &self.base
    }

    /// Parameters selected by bit `bit` of each control byte.
    ///
    /// # Errors
    /// Returns [`ChaosMaskError::BitPositionOutOfRange`] if `bit >= 8`.
    pub fn parameters_for(
        &self,
        control: [u8; CONTROL_GROUP_LEN],
        bit: u32,
    ) -> Result<LorenzParameters> {
        let [d_rho, d_sigma, d_beta] = control;
        Ok(LorenzParameters::new(
            perturb(self.base.rho, bit_at(d_rho, bit)?),
            perturb(self.base.sigma, bit_at(d_sigma, bit)?),
            perturb(self.base.beta, bit_at(d_beta, bit)?),
        ))
    }

    /// Expands one control group into eight x coordinates.
    pub fn expand(
        &self,
        trajectory: &mut Trajectory<Lorenz, 3>,
        control: [u8; CONTROL_GROUP_LEN],
    ) -> Result<[f32; OUTPUTS_PER_GROUP]> {
        let mut out = [0.0f32; OUTPUTS_PER_GROUP];
        for (bit, slot) in (0..BYTE_BITS).zip(out.iter_mut()) {
            trajectory.set_flow(Lorenz::new(self.parameters_for(control, bit)?));
            *slot = trajectory.advance()?.x();
        }
        Ok(out)
    }

    /// Expands every control group of `controls`.
    ///
    /// # Errors
    /// - [`ChaosMaskError::EmptyMessage`] if `controls` is empty.
    /// - [`ChaosMaskError::IncompleteBlock`] if the length is not a multiple of
    ///   3. No step is taken in that case.
    pub fn expand_all(
        &self,
        trajectory: &mut Trajectory<Lorenz, 3>,
        controls: &[u8],
    ) -> Result<Vec<f32>> {
        if controls.is_empty() {
            return Err(ChaosMaskError::EmptyMessage);
        }
        let remainder = controls.len() % CONTROL_GROUP_LEN;
        if remainder != 0 {
            return Err(ChaosMaskError::IncompleteBlock {
                block: controls.len() / CONTROL_GROUP_LEN,
                needed: CONTROL_GROUP_LEN,
                available: remainder,
            });
        }

        let num_groups = controls.len() / CONTROL_GROUP_LEN;
        let mut values = Vec::with_capacity(num_groups * OUTPUTS_PER_GROUP);
        for group in controls.chunks_exact(CONTROL_GROUP_LEN) {
            let control = [group[0], group[1], group[2]];
            values.extend_from_slice(&self.expand(trajectory, control)?);
        }
        Ok(values)
    }

    /// Reads `groups` control groups from `input` and writes the expanded
    /// values to `output`, one per line with 4 decimals.
    ///
    /// # Returns
    /// The number of values written.
    pub fn expand_stream<R: Read, W: Write>(
        &self,
        trajectory: &mut Trajectory<Lorenz, 3>,
        input: &mut R,
        output: &mut W,
        groups: usize,
    ) -> Result<usize> {
        if groups == 0 {
            return Err(ChaosMaskError::EmptyMessage);
        }
        debug!(groups, "expanding control stream");

        let mut written = 0;
        for block in 0..groups {
            let mut control = [0u8; CONTROL_GROUP_LEN];
            let got = read_up_to(input, &mut control)?;
            if got < CONTROL_GROUP_LEN {
                return Err(ChaosMaskError::IncompleteBlock {
                    block,
                    needed: CONTROL_GROUP_LEN,
                    available: got,
                });
            }
            let values = self.expand(trajectory, control)?;
            write_values(&values, output)?;
            written += values.len();
        }
        output.flush()?;
        Ok(written)
    }
}

/// `base` when the bit is clear, `2 * base` when it is set.
fn perturb(base: f32, bit: u8) -> f32 {
    base + base * f32::from(bit)
}
