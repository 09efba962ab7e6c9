//! Parameter sets and the linear coupling matrices built from them.
//!
//! The matrix is a pure function of the parameters: equal inputs always give
//! a bit-identical matrix. No range checks are made, so degenerate regimes
//! (for example `beta = 0`) are accepted and left to the caller.

use serde::{Deserialize, Serialize};

use crate::algebra::{Matrix, Vector};

/// The classic Lorenz beta value, 8/3.
pub const CLASSIC_BETA: f32 = 8.0 / 3.0;

/// Control parameters of the 3D Lorenz flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LorenzParameters {
    pub rho: f32,
    pub sigma: f32,
    pub beta: f32,
}

impl Default for LorenzParameters {
    /// The classic chaotic regime: rho = 28, sigma = 10, beta = 8/3.
    fn default() -> Self {
        LorenzParameters {
            rho: 28.0,
            sigma: 10.0,
            beta: CLASSIC_BETA,
        }
    }
}

impl LorenzParameters {
    /// Creates a parameter set.
    pub fn new(rho: f32, sigma: f32, beta: f32) -> Self {
        LorenzParameters { rho, sigma, beta }
    }

    /// Builds the 3×3 coupling matrix.
    ///
    /// ```text
    /// | -sigma  rho    0    |
    /// |  sigma  -1     0    |
    /// |  0       0    -beta |
    /// ```
    pub fn matrix(&self) -> Matrix<3> {
        Matrix::from_rows([
            Vector::new([-self.sigma, self.rho, 0.0]),
            Vector::new([self.sigma, -1.0, 0.0]),
            Vector::new([0.0, 0.0, -self.beta]),
        ])
    }
}

/// Control parameters of the 4D Lorenz-Stenflo flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StenfloParameters {
    pub rho: f32,
    pub sigma: f32,
    pub beta: f32,
    pub gamma: f32,
}

impl Default for StenfloParameters {
    /// The reference cipher regime: rho = 40, sigma = 10, beta = 8/3, gamma = 50.
    fn default() -> Self {
        StenfloParameters {
            rho: 40.0,
            sigma: 10.0,
            beta: CLASSIC_BETA,
            gamma: 50.0,
        }
    }
}

impl StenfloParameters {
    /// Creates a parameter set.
    pub fn new(rho: f32, sigma: f32, beta: f32, gamma: f32) -> Self {
        StenfloParameters {
            rho,
            sigma,
            beta,
            gamma,
        }
    }

    /// Builds the 4×4 coupling matrix.
    ///
    /// ```text
    /// | -sigma  rho    0     -1    |
    /// |  sigma  -1     0      0    |
    /// |  0       0    -beta   0    |
    /// |  gamma   0     0      sigma |
    /// ```
    pub fn matrix(&self) -> Matrix<4> {
        Matrix::from_rows([
            Vector::new([-self.sigma, self.rho, 0.0, -1.0]),
            Vector::new([self.sigma, -1.0, 0.0, 0.0]),
            Vector::new([0.0, 0.0, -self.beta, 0.0]),
            Vector::new([self.gamma, 0.0, 0.0, self.sigma]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lorenz_matrix_rows() {
        let m = LorenzParameters::new(28.0, 10.0, 2.5).matrix();
        assert_eq!(m.row(0).coords(), [-10.0, 28.0, 0.0]);
        assert_eq!(m.row(1).coords(), [10.0, -1.0, 0.0]);
        assert_eq!(m.row(2).coords(), [0.0, 0.0, -2.5]);
    }

    #[test]
    fn test_stenflo_matrix_rows() {
        let m = StenfloParameters::new(40.0, 10.0, 2.5, 50.0).matrix();
        assert_eq!(m.row(0).coords(), [-10.0, 40.0, 0.0, -1.0]);
        assert_eq!(m.row(1).coords(), [10.0, -1.0, 0.0, 0.0]);
        assert_eq!(m.row(2).coords(), [0.0, 0.0, -2.5, 0.0]);
        assert_eq!(m.row(3).coords(), [50.0, 0.0, 0.0, 10.0]);
    }

    #[test]
    fn test_matrix_is_bit_identical_for_equal_inputs() {
        let a = StenfloParameters::default().matrix();
        let b = StenfloParameters::default().matrix();
        for (ra, rb) in a.rows().iter().zip(b.rows().iter()) {
            let bits_a: Vec<u32> = ra.coords().iter().map(|c| c.to_bits()).collect();
            let bits_b: Vec<u32> = rb.coords().iter().map(|c| c.to_bits()).collect();
            assert_eq!(bits_a, bits_b);
        }
    }

    #[test]
    fn test_degenerate_beta_accepted() {
        let m = LorenzParameters::new(28.0, 10.0, 0.0).matrix();
        assert_eq!(m.row(2).coords()[2], 0.0);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(LorenzParameters::default(), LorenzParameters::new(28.0, 10.0, CLASSIC_BETA));
        assert_eq!(
            StenfloParameters::default(),
            StenfloParameters::new(40.0, 10.0, CLASSIC_BETA, 50.0)
        );
        assert_eq!(CLASSIC_BETA.to_bits(), 0x402A_AAAB);
    }
}
