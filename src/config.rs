//! Serializable configuration for the three operating modes.
//!
//! Every struct has a [`Default`] matching the reference setup and can be
//! deserialized partially (`#[serde(default)]`). Values are validated when
//! they are turned into trajectories, not when they are parsed.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::dynamics::{
    IntegratorConfig, Lorenz, LorenzParameters, LorenzStenflo, StenfloParameters, Trajectory,
};
use crate::error::Result;
use crate::keystream::KeystreamMasker;
use crate::perturbation::PerturbationSchedule;
use crate::sequence::write_sequence;

/// Cipher seeds are reduced by floating remainder into `(-SEED_BOUND, SEED_BOUND)`.
pub const SEED_BOUND: f32 = 280.0 / 3.0;

/// Flow selection together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum FlowParameters {
    /// 3D Lorenz flow.
    Lorenz(LorenzParameters),
    /// 4D Lorenz-Stenflo flow.
    LorenzStenflo(StenfloParameters),
}

impl Default for FlowParameters {
    fn default() -> Self {
        FlowParameters::Lorenz(LorenzParameters::default())
    }
}

impl FlowParameters {
    /// Dimension of the selected flow.
    pub fn dimension(&self) -> usize {
        match self {
            FlowParameters::Lorenz(_) => 3,
            FlowParameters::LorenzStenflo(_) => 4,
        }
    }
}

/// Configuration of the XOR cipher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CipherConfig {
    /// Initial state (x, y, z, w), the shared secret.
    pub seed: Vec<f32>,
    pub parameters: StenfloParameters,
    pub integrator: IntegratorConfig,
    /// Transient steps discarded on top of [`MIN_WIND_UP`](crate::MIN_WIND_UP).
    pub wind_up: u32,
}

impl Default for CipherConfig {
    fn default() -> Self {
        CipherConfig {
            seed: vec![5.0; 4],
            parameters: StenfloParameters::default(),
            integrator: IntegratorConfig::default(),
            wind_up: 0,
        }
    }
}

impl CipherConfig {
    /// The seed after reduction by [`SEED_BOUND`].
    pub fn reduced_seed(&self) -> Vec<f32> {
        self.seed.iter().map(|c| c % SEED_BOUND).collect()
    }

    /// Builds the (not yet wound-up) cipher trajectory.
    ///
    /// # Errors
    /// Configuration errors: dimension mismatch, non-finite seed, bad step size.
    pub fn trajectory(&self) -> Result<Trajectory<LorenzStenflo, 4>> {
        Trajectory::from_slice(
            LorenzStenflo::new(self.parameters),
            &self.reduced_seed(),
            self.integrator,
        )
    }

    /// Builds a wound-up masker.
    pub fn masker(&self) -> Result<KeystreamMasker<LorenzStenflo, 4>> {
        KeystreamMasker::new(self.trajectory()?, self.wind_up)
    }

    /// Encrypts or decrypts `data`; the operation is its own inverse.
    pub fn apply(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.masker()?.mask(data)
    }

    /// Streaming form of [`apply`](Self::apply).
    pub fn apply_stream<R: Read, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
        message_length: usize,
    ) -> Result<usize> {
        self.masker()?.mask_stream(input, output, message_length)
    }
}

/// Configuration of the numeric-sequence mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    pub seed: Vec<f32>,
    pub flow: FlowParameters,
    pub integrator: IntegratorConfig,
    /// Number of lines to emit.
    pub steps: usize,
    /// Transient discard before the first line; `None` starts at the seed.
    pub wind_up: Option<u32>,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        SequenceConfig {
            seed: vec![1.0; 3],
            flow: FlowParameters::default(),
            integrator: IntegratorConfig {
                method: crate::dynamics::Method::Heun,
                step_size: 0.01,
            },
            steps: 1000,
            wind_up: None,
        }
    }
}

impl SequenceConfig {
    /// Writes the configured sequence as CSV lines.
    ///
    /// # Returns
    /// The number of lines written.
    pub fn write_csv<W: Write>(&self, output: &mut W) -> Result<usize> {
        match self.flow {
            FlowParameters::Lorenz(params) => {
                let mut trajectory =
                    Trajectory::from_slice(Lorenz::new(params), &self.seed, self.integrator)?;
                if let Some(extra) = self.wind_up {
                    trajectory.wind_up(extra)?;
                }
                write_sequence(&mut trajectory, self.steps, output)
            }
            FlowParameters::LorenzStenflo(params) => {
                let mut trajectory = Trajectory::from_slice(
                    LorenzStenflo::new(params),
                    &self.seed,
                    self.integrator,
                )?;
                if let Some(extra) = self.wind_up {
                    trajectory.wind_up(extra)?;
                }
                write_sequence(&mut trajectory, self.steps, output)
            }
        }
    }
}

/// Configuration of the perturbation mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerturbationConfig {
    pub seed: Vec<f32>,
    /// Unperturbed parameters; a set control bit doubles the matching value.
    pub base: LorenzParameters,
    pub integrator: IntegratorConfig,
}

impl Default for PerturbationConfig {
    fn default() -> Self {
        PerturbationConfig {
            seed: vec![1.0; 3],
            base: LorenzParameters::default(),
            integrator: IntegratorConfig {
                method: crate::dynamics::Method::Heun,
                step_size: 0.01,
            },
        }
    }
}

impl PerturbationConfig {
    /// Builds the starting trajectory.
    pub fn trajectory(&self) -> Result<Trajectory<Lorenz, 3>> {
        Trajectory::from_slice(Lorenz::new(self.base), &self.seed, self.integrator)
    }

    /// Builds the schedule.
    pub fn schedule(&self) -> PerturbationSchedule {
        PerturbationSchedule::new(self.base)
    }

    /// Expands `controls` (3-byte groups) into 8 values per group.
    pub fn expand(&self, controls: &[u8]) -> Result<Vec<f32>> {
        let mut trajectory = self.trajectory()?;
        self.schedule().expand_all(&mut trajectory, controls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::{Method, CLASSIC_BETA};
    use crate::error::ChaosMaskError;

    fn bounded_cipher() -> CipherConfig {
        CipherConfig {
            seed: vec![5.0; 4],
            parameters: StenfloParameters::new(28.0, -2.0, CLASSIC_BETA, 20.0),
            integrator: IntegratorConfig::euler(0.005).unwrap(),
            wind_up: 0,
        }
    }

    #[test]
    fn test_cipher_default_is_reference_regime() {
        let cfg = CipherConfig::default();
        assert_eq!(cfg.seed, vec![5.0; 4]);
        assert_eq!(cfg.parameters, StenfloParameters::new(40.0, 10.0, CLASSIC_BETA, 50.0));
        assert_eq!(cfg.integrator.method, Method::Euler);
        assert_eq!(cfg.integrator.step_size, 0.1);
        assert_eq!(cfg.wind_up, 0);
    }

    #[test]
    fn test_reduced_seed() {
        let cfg = CipherConfig {
            seed: vec![5.0, 100.0, -100.0, 93.0],
            ..CipherConfig::default()
        };
        let reduced = cfg.reduced_seed();
        assert_eq!(reduced[0], 5.0);
        assert!((reduced[1] - (100.0 - SEED_BOUND)).abs() < 1e-4);
        assert!((reduced[2] + (100.0 - SEED_BOUND)).abs() < 1e-4);
        assert_eq!(reduced[3], 93.0);
    }

    #[test]
    fn test_cipher_dimension_mismatch() {
        let cfg = CipherConfig {
            seed: vec![1.0, 2.0, 3.0],
            ..bounded_cipher()
        };
        assert_eq!(
            cfg.apply(&[0u8; 16]),
            Err(ChaosMaskError::DimensionMismatch {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_cipher_bad_step_size() {
        let mut cfg = bounded_cipher();
        cfg.integrator.step_size = 0.0;
        assert_eq!(cfg.masker().err(), Some(ChaosMaskError::InvalidStepSize(0.0)));
    }

    #[test]
    fn test_cipher_non_finite_seed() {
        let cfg = CipherConfig {
            seed: vec![5.0, f32::INFINITY, 5.0, 5.0],
            ..bounded_cipher()
        };
        assert_eq!(
            cfg.trajectory().err(),
            Some(ChaosMaskError::NonFiniteSeed { index: 1 })
        );
    }

    #[test]
    fn test_cipher_apply_roundtrip() {
        let cfg = bounded_cipher();
        let plaintext = b"0123456789abcdef0123456789abcdef";
        let ciphertext = cfg.apply(plaintext).unwrap();
        assert_ne!(&ciphertext[..], &plaintext[..]);
        assert_eq!(cfg.apply(&ciphertext).unwrap(), plaintext.to_vec());
    }

    #[test]
    fn test_cipher_apply_stream_matches_apply() {
        let cfg = bounded_cipher();
        let plaintext = vec![0x5Au8; 48];
        let mut output = Vec::new();
        cfg.apply_stream(&mut plaintext.as_slice(), &mut output, plaintext.len())
            .unwrap();
        assert_eq!(output, cfg.apply(&plaintext).unwrap());
    }

    #[test]
    fn test_cipher_config_from_json() {
        let json = r#"{
            "seed": [1.0, 2.0, 3.0, 4.0],
            "parameters": {"rho": 28.0, "sigma": -2.0, "beta": 2.6666667, "gamma": 20.0},
            "integrator": {"method": "euler", "step_size": 0.005},
            "wind_up": 16
        }"#;
        let cfg: CipherConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.seed, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(cfg.parameters.beta, CLASSIC_BETA);
        assert_eq!(cfg.wind_up, 16);
        assert!(cfg.masker().is_ok());
    }

    #[test]
    fn test_cipher_config_partial_json_uses_defaults() {
        let cfg: CipherConfig = serde_json::from_str(r#"{"wind_up": 3}"#).unwrap();
        assert_eq!(cfg.wind_up, 3);
        assert_eq!(cfg.seed, CipherConfig::default().seed);
    }

    #[test]
    fn test_flow_parameters_json_tag() {
        let flow: FlowParameters = serde_json::from_str(
            r#"{"variant": "lorenz_stenflo", "rho": 1.0, "sigma": 2.0, "beta": 3.0, "gamma": 4.0}"#,
        )
        .unwrap();
        assert_eq!(
            flow,
            FlowParameters::LorenzStenflo(StenfloParameters::new(1.0, 2.0, 3.0, 4.0))
        );
        assert_eq!(flow.dimension(), 4);
        assert_eq!(FlowParameters::default().dimension(), 3);
    }

    #[test]
    fn test_sequence_default_writes_lines() {
        let cfg = SequenceConfig {
            steps: 4,
            ..SequenceConfig::default()
        };
        let mut out = Vec::new();
        assert_eq!(cfg.write_csv(&mut out).unwrap(), 4);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().next(), Some("1.0959,1.0454,0.9966"));
    }

    #[test]
    fn test_sequence_stenflo_lines_have_four_values() {
        let cfg = SequenceConfig {
            seed: vec![5.0; 4],
            flow: FlowParameters::LorenzStenflo(StenfloParameters::default()),
            integrator: IntegratorConfig::default(),
            steps: 1,
            wind_up: None,
        };
        let mut out = Vec::new();
        cfg.write_csv(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "19.5000,7.0000,6.1667,35.0000\n");
    }

    #[test]
    fn test_sequence_seed_dimension_checked() {
        let cfg = SequenceConfig {
            seed: vec![1.0; 4],
            ..SequenceConfig::default()
        };
        let mut out = Vec::new();
        assert_eq!(
            cfg.write_csv(&mut out),
            Err(ChaosMaskError::DimensionMismatch {
                expected: 3,
                found: 4
            })
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_sequence_wind_up_changes_first_line() {
        let plain = SequenceConfig {
            steps: 1,
            ..SequenceConfig::default()
        };
        let wound = SequenceConfig {
            wind_up: Some(0),
            ..plain.clone()
        };
        let mut a = Vec::new();
        let mut b = Vec::new();
        plain.write_csv(&mut a).unwrap();
        wound.write_csv(&mut b).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_perturbation_config_expand() {
        let cfg = PerturbationConfig::default();
        let values = cfg.expand(&[0, 0, 0]).unwrap();
        assert_eq!(values.len(), 8);
        assert_eq!(format!("{:.4}", values[0]), "1.0959");
        assert_eq!(cfg.schedule().base(), &LorenzParameters::default());
    }
}
