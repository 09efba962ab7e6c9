//! Fixed-step integrators.
//!
//! Two methods are provided:
//!
//! - **Euler**: `next = s + h · f(s)`.
//! - **Heun**: a one-and-a-half-stage predictor-corrector,
//!   `next = s + (h/2) · (s + (h + 1) · f(s))`.
//!
//! The Heun form is not the textbook two-stage method. It evaluates the flow
//! once, with the nonlinear term taken from the x projection of the current
//! state, and it is kept exactly as written because existing keystreams and
//! numeric sequences depend on its bit pattern.

use serde::{Deserialize, Serialize};

use crate::algebra::Vector;
use crate::error::{ChaosMaskError, Result};

use super::flow::Flow;

/// Integration method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Explicit Euler.
    #[default]
    Euler,
    /// One-and-a-half-stage Heun predictor-corrector.
    Heun,
}

/// Integration method and step size for one trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegratorConfig {
    pub method: Method,
    pub step_size: f32,
}

impl Default for IntegratorConfig {
    /// Euler with step size 0.1, the reference cipher regime.
    fn default() -> Self {
        IntegratorConfig {
            method: Method::Euler,
            step_size: 0.1,
        }
    }
}

impl IntegratorConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    /// Returns [`ChaosMaskError::InvalidStepSize`] if `step_size` is not a
    /// positive finite number.
    pub fn new(method: Method, step_size: f32) -> Result<Self> {
        let config = IntegratorConfig { method, step_size };
        config.validate()?;
        Ok(config)
    }

    /// Shorthand for an Euler configuration.
    pub fn euler(step_size: f32) -> Result<Self> {
        Self::new(Method::Euler, step_size)
    }

    /// Shorthand for a Heun configuration.
    pub fn heun(step_size: f32) -> Result<Self> {
        Self::new(Method::Heun, step_size)
    }

    /// Checks the step size.
    ///
    /// Deserialized configurations bypass [`new`](Self::new), so trajectories
    /// call this again on construction.
    pub fn validate(&self) -> Result<()> {
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(ChaosMaskError::InvalidStepSize(self.step_size));
        }
        Ok(())
    }

    /// Advances `state` by one step under `flow`.
    pub fn step<F: Flow<N>, const N: usize>(&self, flow: &F, state: &Vector<N>) -> Vector<N> {
        match self.method {
            Method::Euler => euler_step(flow, state, self.step_size),
            Method::Heun => heun_step(flow, state, self.step_size),
        }
    }
}

/// One explicit Euler step.
pub fn euler_step<F: Flow<N>, const N: usize>(flow: &F, state: &Vector<N>, h: f32) -> Vector<N> {
    state.add(&flow.derivative(state).scale(h))
}

/// One step of the one-and-a-half-stage Heun scheme.
pub fn heun_step<F: Flow<N>, const N: usize>(flow: &F, state: &Vector<N>, h: f32) -> Vector<N> {
    let predictor = state.add(&flow.derivative(state).scale(h + 1.0));
    state.add(&predictor.scale(h / 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::flow::{Lorenz, LorenzStenflo};

    #[test]
    fn test_rejects_non_positive_step() {
        assert_eq!(
            IntegratorConfig::euler(0.0),
            Err(ChaosMaskError::InvalidStepSize(0.0))
        );
        assert_eq!(
            IntegratorConfig::heun(-0.1),
            Err(ChaosMaskError::InvalidStepSize(-0.1))
        );
        assert!(IntegratorConfig::euler(f32::NAN).is_err());
        assert!(IntegratorConfig::euler(f32::INFINITY).is_err());
    }

    #[test]
    fn test_accepts_positive_step() {
        let cfg = IntegratorConfig::heun(0.01).unwrap();
        assert_eq!(cfg.method, Method::Heun);
        assert_eq!(cfg.step_size, 0.01);
    }

    #[test]
    fn test_default_is_reference_regime() {
        let cfg = IntegratorConfig::default();
        assert_eq!(cfg.method, Method::Euler);
        assert_eq!(cfg.step_size, 0.1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_euler_golden_step() {
        let flow = LorenzStenflo::default();
        let next = euler_step(&flow, &Vector::new([5.0; 4]), 0.1);
        let bits: Vec<u32> = next.coords().iter().map(|c| c.to_bits()).collect();
        assert_eq!(bits, vec![0x419C_0000, 0x40E0_0000, 0x40C5_5555, 0x420C_0000]);
    }

    #[test]
    fn test_heun_golden_step_unit_size() {
        let flow = Lorenz::default();
        let next = heun_step(&flow, &Vector::new([1.0; 3]), 1.0);
        let bits: Vec<u32> = next.coords().iter().map(|c| c.to_bits()).collect();
        assert_eq!(bits, vec![0x419C_0000, 0x4118_0000, 0xBE2A_AAB0]);
    }

    #[test]
    fn test_heun_golden_step_small_size() {
        let flow = Lorenz::default();
        let next = heun_step(&flow, &Vector::new([1.0; 3]), 0.01);
        let bits: Vec<u32> = next.coords().iter().map(|c| c.to_bits()).collect();
        assert_eq!(bits, vec![0x3F8C_4674, 0x3F85_CFAB, 0x3F7F_2016]);
    }

    #[test]
    fn test_methods_differ() {
        let flow = Lorenz::default();
        let seed = Vector::new([1.0; 3]);
        let euler = IntegratorConfig::euler(0.01).unwrap().step(&flow, &seed);
        let heun = IntegratorConfig::heun(0.01).unwrap().step(&flow, &seed);
        assert_eq!(
            euler.coords().map(f32::to_bits),
            [0x3F97_0A3D, 0x3F8A_3D71, 0x3F7B_BBBC]
        );
        assert_ne!(euler, heun);
    }

    #[test]
    fn test_serde_method_names() {
        let cfg: IntegratorConfig =
            serde_json::from_str(r#"{"method":"heun","step_size":0.25}"#).unwrap();
        assert_eq!(cfg, IntegratorConfig::heun(0.25).unwrap());
    }
}
