//! Square coupling matrices.

use super::vector::Vector;

/// An `N × N` matrix stored as `N` row vectors.
///
/// Built once from a parameter set and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<const N: usize> {
    rows: [Vector<N>; N],
}

impl<const N: usize> Matrix<N> {
    /// Creates a matrix from its rows.
    pub const fn from_rows(rows: [Vector<N>; N]) -> Self {
        Matrix { rows }
    }

    /// Returns the row at `index`.
    ///
    /// # Panics
    /// Panics if `index >= N`.
    pub fn row(&self, index: usize) -> &Vector<N> {
        &self.rows[index]
    }

    /// Returns all rows.
    pub fn rows(&self) -> &[Vector<N>; N] {
        &self.rows
    }

    /// Matrix-vector product: one dot product per row.
    pub fn mat_vec(&self, v: &Vector<N>) -> Vector<N> {
        let mut out = [0.0f32; N];
        for (o, row) in out.iter_mut().zip(self.rows.iter()) {
            *o = row.dot(v);
        }
        Vector::new(out)
    }
}
