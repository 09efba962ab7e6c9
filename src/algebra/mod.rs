//! Fixed-dimension linear algebra for the flow equations.
//!
//! Vectors and matrices carry their dimension in the type, so a 3D state can
//! never be fed to a 4D matrix. All operations are pure and use `f32`, the
//! width that the keystream reinterprets bit for bit.

pub mod matrix;
pub mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
