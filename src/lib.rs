//! Chaotic-flow keystream generator.
//!
//! chaosmask integrates the Lorenz (3D) and Lorenz-Stenflo (4D) flows with a
//! fixed-step Euler or Heun integrator and uses the resulting trajectory in
//! three ways:
//!
//! - **Cipher mode**: the bit pattern of every coordinate is XORed with a
//!   little-endian data word, one state advance per block. The mask is its own
//!   inverse, so the same configuration decrypts.
//! - **Numeric-sequence mode**: states are emitted as comma-separated lines
//!   with 4 decimals.
//! - **Perturbation mode**: the bits of 3-byte control groups select per-step
//!   parameter variants, producing 8 values per group.
//!
//! This is not a reviewed cipher: there is no authentication and no nonce.
//!
//! # Architecture
//!
//! ```text
//! params  (rho, sigma, beta[, gamma] -> Matrix)
//!     ↓
//! flow    (M · s + quadratic coupling)
//!     ↓
//! integrator (Euler | Heun, fixed step)
//!     ↓
//! Trajectory (owned state, wind-up, divergence check)
//!     ↓                    ↓                      ↓
//! KeystreamMasker    NumericSequence     PerturbationSchedule
//! ```
//!
//! # Wire format
//!
//! Coordinates are IEEE-754 binary32 values and every 32-bit word is
//! little-endian, independent of the host.
//!
//! # Examples
//!
//! Encrypt and decrypt one 16-byte block:
//!
//! ```
//! use chaosmask::{CipherConfig, IntegratorConfig, StenfloParameters};
//!
//! let config = CipherConfig {
//!     seed: vec![1.0, 2.0, 3.0, 4.0],
//!     parameters: StenfloParameters::new(28.0, -2.0, 8.0 / 3.0, 20.0),
//!     integrator: IntegratorConfig::euler(0.005).unwrap(),
//!     wind_up: 64,
//! };
//!
//! let plaintext = b"sixteen byte msg";
//! let ciphertext = config.apply(plaintext).unwrap();
//! assert_ne!(&ciphertext[..], &plaintext[..]);
//! assert_eq!(config.apply(&ciphertext).unwrap(), plaintext.to_vec());
//! ```
//!
//! Emit a numeric sequence:
//!
//! ```
//! use chaosmask::SequenceConfig;
//!
//! let config = SequenceConfig { steps: 2, ..SequenceConfig::default() };
//! let mut out = Vec::new();
//! config.write_csv(&mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
//! ```

#![deny(clippy::all)]

pub mod algebra;
pub mod config;
pub mod dynamics;
pub mod error;
pub mod keystream;
pub mod perturbation;
pub mod sequence;
pub mod utils;

pub use config::{CipherConfig, FlowParameters, PerturbationConfig, SequenceConfig, SEED_BOUND};
pub use dynamics::{
    Flow, IntegratorConfig, Lorenz, LorenzParameters, LorenzStenflo, Method, StenfloParameters,
    Trajectory, MIN_WIND_UP,
};
pub use error::{ChaosMaskError, Result};
pub use keystream::KeystreamMasker;
pub use perturbation::PerturbationSchedule;
