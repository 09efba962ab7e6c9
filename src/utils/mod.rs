//! Bit-level helpers shared by the keystream and the perturbation schedule.

pub mod bits;
pub mod converter;
