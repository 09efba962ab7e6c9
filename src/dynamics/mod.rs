//! Chaotic flows and their numerical integration.
//!
//! Provides the parameter matrix builders, the Lorenz and Lorenz-Stenflo
//! flow functions, the fixed-step integrators, and the owned [`Trajectory`]
//! that ties them together.

pub mod flow;
pub mod integrator;
pub mod params;
pub mod trajectory;

pub use flow::{Flow, Lorenz, LorenzStenflo};
pub use integrator::{IntegratorConfig, Method};
pub use params::{LorenzParameters, StenfloParameters, CLASSIC_BETA};
pub use trajectory::{Trajectory, MIN_WIND_UP};
