//! State vectors of the dynamical systems.

/// An ordered tuple of `N` single-precision coordinates.
///
/// Coordinates are addressed in the fixed order x, y, z, w. Every operation
/// returns a new vector; nothing is updated in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const N: usize>([f32; N]);

impl<const N: usize> Vector<N> {
    /// Creates a vector from its coordinates.
    pub const fn new(coords: [f32; N]) -> Self {
        Vector(coords)
    }

    /// Creates the zero vector.
    pub const fn zero() -> Self {
        Vector([0.0; N])
    }

    /// Returns the coordinates as an array.
    pub fn coords(&self) -> [f32; N] {
        self.0
    }

    /// Returns the coordinate at `index`, or `None` past the dimension.
    pub fn get(&self, index: usize) -> Option<f32> {
        self.0.get(index).copied()
    }

    /// Returns the x coordinate.
    pub fn x(&self) -> f32 {
        self.0[0]
    }

    /// Multiplies every coordinate by `k`.
    pub fn scale(&self, k: f32) -> Self {
        Vector(self.0.map(|c| c * k))
    }

    /// Adds two vectors coordinate-wise.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: &Self) -> Self {
        let mut out = self.0;
        for (o, b) in out.iter_mut().zip(other.0.iter()) {
            *o += *b;
        }
        Vector(out)
    }

    /// Dot product, accumulated left to right starting from zero.
    ///
    /// The accumulation order is part of the bit-exact trajectory contract.
    pub fn dot(&self, other: &Self) -> f32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(0.0, |acc, (a, b)| acc + a * b)
    }

    /// Returns `true` when no coordinate is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Index of the first NaN or infinite coordinate.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.0.iter().position(|c| !c.is_finite())
    }

    /// Euclidean distance to `other`, computed in `f64`.
    pub fn distance(&self, other: &Self) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| {
                let d = f64::from(*a) - f64::from(*b);
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Replaces one coordinate, returning the updated vector.
    ///
    /// Indices past the dimension leave the vector unchanged.
    pub(crate) fn with(&self, index: usize, value: f32) -> Self {
        let mut out = self.0;
        if let Some(slot) = out.get_mut(index) {
            *slot = value;
        }
        Vector(out)
    }
}

impl Vector<3> {
    /// Cross product `self × other`.
    pub fn cross(&self, other: &Self) -> Self {
        let [a1, a2, a3] = self.0;
        let [b1, b2, b3] = other.0;
        Vector([a2 * b3 - a3 * b2, a3 * b1 - a1 * b3, a1 * b2 - a2 * b1])
    }
}

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> From<[f32; N]> for Vector<N> {
    fn from(coords: [f32; N]) -> Self {
        Vector(coords)
    }
}

impl<const N: usize> TryFrom<&[f32]> for Vector<N> {
    type Error = crate::error::ChaosMaskError;

    /// Builds a vector from a slice, rejecting a length other than `N`.
    fn try_from(coords: &[f32]) -> Result<Self, Self::Error> {
        let arr: [f32; N] =
            coords
                .try_into()
                .map_err(|_| crate::error::ChaosMaskError::DimensionMismatch {
                    expected: N,
                    found: coords.len(),
                })?;
        Ok(Vector(arr))
    }
}
