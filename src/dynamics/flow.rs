//! Flow functions of the Lorenz and Lorenz-Stenflo systems.
//!
//! Each flow combines a constant linear part (the parameter matrix) with a
//! quadratic coupling term:
//!
//! ```text
//! derivative(s) = M · s + coupling(s)
//! ```

use crate::algebra::{Matrix, Vector};

use super::params::{LorenzParameters, StenfloParameters};

/// Trait for continuous dynamical systems of dimension `N`.
pub trait Flow<const N: usize> {
    /// Returns the linear coupling matrix.
    fn matrix(&self) -> &Matrix<N>;

    /// Computes the nonlinear coupling term at `state`.
    fn coupling(&self, state: &Vector<N>) -> Vector<N>;

    /// Computes the instantaneous derivative at `state`.
    fn derivative(&self, state: &Vector<N>) -> Vector<N> {
        self.matrix().mat_vec(state).add(&self.coupling(state))
    }
}

/// The 3D Lorenz flow.
///
/// The quadratic coupling is `(x, 0, 0) × (x, y, z) = (0, -x·z, x·y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lorenz {
    params: LorenzParameters,
    matrix: Matrix<3>,
}

impl Lorenz {
    /// Creates the flow, building its matrix from `params`.
    pub fn new(params: LorenzParameters) -> Self {
        Lorenz {
            matrix: params.matrix(),
            params,
        }
    }

    /// Returns the parameters the matrix was built from.
    pub fn parameters(&self) -> &LorenzParameters {
        &self.params
    }
}

impl Default for Lorenz {
    fn default() -> Self {
        Self::new(LorenzParameters::default())
    }
}

impl Flow<3> for Lorenz {
    fn matrix(&self) -> &Matrix<3> {
        &self.matrix
    }

    fn coupling(&self, state: &Vector<3>) -> Vector<3> {
        Vector::new([state.x(), 0.0, 0.0]).cross(state)
    }
}

/// The 4D Lorenz-Stenflo flow.
///
/// The fourth coordinate is driven by `gamma · x + sigma · w` and feeds back
/// into the first row. The quadratic coupling is `(0, -x·z, x·y, 0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LorenzStenflo {
    params: StenfloParameters,
    matrix: Matrix<4>,
}

impl LorenzStenflo {
    /// Creates the flow, building its matrix from `params`.
    pub fn new(params: StenfloParameters) -> Self {
        LorenzStenflo {
            matrix: params.matrix(),
            params,
        }
    }

    /// Returns the parameters the matrix was built from.
    pub fn parameters(&self) -> &StenfloParameters {
        &self.params
    }
}

impl Default for LorenzStenflo {
    fn default() -> Self {
        Self::new(StenfloParameters::default())
    }
}

impl Flow<4> for LorenzStenflo {
    fn matrix(&self) -> &Matrix<4> {
        &self.matrix
    }

    fn coupling(&self, state: &Vector<4>) -> Vector<4> {
        let [x, y, z, _] = state.coords();
        Vector::new([0.0, -x * z, x * y, 0.0])
    }
}
