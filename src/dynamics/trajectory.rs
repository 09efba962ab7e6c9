//! Owned, append-only trajectories.
//!
//! A [`Trajectory`] owns its flow, its current state and its integrator
//! configuration. It is extended one step at a time and never rewound. Every
//! step is checked for non-finite coordinates so a diverging regime is
//! reported instead of leaking NaN or infinity into the output.

use tracing::{debug, trace, warn};

use crate::algebra::Vector;
use crate::error::{ChaosMaskError, Result};

use super::flow::Flow;
use super::integrator::IntegratorConfig;

/// Minimum number of transient steps discarded before any output.
pub const MIN_WIND_UP: u64 = 1024;

/// The sequence of states produced from a seed under one flow.
#[derive(Debug, Clone)]
pub struct Trajectory<F, const N: usize> {
    flow: F,
    state: Vector<N>,
    integrator: IntegratorConfig,
    steps: u64,
}

impl<F: Flow<N>, const N: usize> Trajectory<F, N> {
    /// Creates a trajectory starting at `seed`.
    ///
    /// # Errors
    /// - [`ChaosMaskError::InvalidStepSize`] if the step size is not positive.
    /// - [`ChaosMaskError::NonFiniteSeed`] if a seed coordinate is NaN or infinite.
    pub fn new(flow: F, seed: Vector<N>, integrator: IntegratorConfig) -> Result<Self> {
        integrator.validate()?;
        if let Some(index) = seed.first_non_finite() {
            return Err(ChaosMaskError::NonFiniteSeed { index });
        }
        Ok(Trajectory {
            flow,
            state: seed,
            integrator,
            steps: 0,
        })
    }

    /// Creates a trajectory from a seed slice.
    ///
    /// # Errors
    /// Returns [`ChaosMaskError::DimensionMismatch`] if `seed.len() != N`, plus
    /// the errors of [`new`](Self::new).
    pub fn from_slice(flow: F, seed: &[f32], integrator: IntegratorConfig) -> Result<Self> {
        let seed = Vector::try_from(seed)?;
        Self::new(flow, seed, integrator)
    }

    /// Returns the current state.
    pub fn state(&self) -> &Vector<N> {
        &self.state
    }

    /// Returns the number of steps taken since the seed.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Returns the flow driving the trajectory.
    pub fn flow(&self) -> &F {
        &self.flow
    }

    /// Returns the integrator configuration.
    pub fn integrator(&self) -> &IntegratorConfig {
        &self.integrator
    }

    /// Advances the trajectory by exactly one integrator step.
    ///
    /// # Errors
    /// Returns [`ChaosMaskError::NumericDegeneracy`] if the new state has a
    /// non-finite coordinate. The trajectory is left at the last finite state.
    pub fn advance(&mut self) -> Result<&Vector<N>> {
        let next = self.integrator.step(&self.flow, &self.state);
        let step = self.steps + 1;
        if let Some(coord) = next.first_non_finite() {
            warn!(step, coord, "trajectory diverged");
            return Err(ChaosMaskError::NumericDegeneracy { step });
        }
        self.state = next;
        self.steps = step;
        trace!(step, "advanced");
        Ok(&self.state)
    }

    /// Discards `extra + MIN_WIND_UP` transient steps.
    pub fn wind_up(&mut self, extra: u32) -> Result<()> {
        let total = u64::from(extra) + MIN_WIND_UP;
        for _ in 0..total {
            self.advance()?;
        }
        debug!(discarded = total, "wind-up complete");
        Ok(())
    }

    /// Replaces the flow, for example after rebuilding it from new parameters.
    ///
    /// The state carries over unchanged.
    pub fn set_flow(&mut self, flow: F) {
        self.flow = flow;
    }

    /// Replaces the integrator configuration.
    ///
    /// # Errors
    /// Returns [`ChaosMaskError::InvalidStepSize`] for a non-positive step size.
    pub fn set_integrator(&mut self, integrator: IntegratorConfig) -> Result<()> {
        integrator.validate()?;
        self.integrator = integrator;
        Ok(())
    }

    /// Overrides one coordinate with an external drive value.
    ///
    /// Used to couple this trajectory to another signal before the next step.
    ///
    /// # Errors
    /// - [`ChaosMaskError::DimensionMismatch`] if `index >= N`.
    /// - [`ChaosMaskError::NonFiniteSeed`] if `value` is NaN or infinite.
    pub fn drive(&mut self, index: usize, value: f32) -> Result<()> {
        if index >= N {
            return Err(ChaosMaskError::DimensionMismatch {
                expected: N,
                found: index + 1,
            });
        }
        if !value.is_finite() {
            return Err(ChaosMaskError::NonFiniteSeed { index });
        }
        self.state = self.state.with(index, value);
        Ok(())
    }
}

impl<F, const N: usize> Drop for Trajectory<F, N> {
    /// Clears the seed-derived state on drop.
    fn drop(&mut self) {
        self.state = Vector::zero();
        self.steps = 0;
    }
}
