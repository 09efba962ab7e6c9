//! Numeric-sequence mode.
//!
//! Emits trajectory states directly instead of using them as a keystream:
//! one line per integration step, coordinates comma separated with a fixed
//! 4-decimal precision.

use std::io::Write;

use tracing::debug;

use crate::algebra::Vector;
use crate::dynamics::{Flow, Trajectory};
use crate::error::Result;

/// Decimal digits printed per value.
pub const DECIMALS: usize = 4;

/// Formats one value with [`DECIMALS`] digits.
pub fn format_value(value: f32) -> String {
    format!("{:.*}", DECIMALS, value)
}

/// Formats a state as one comma-separated line, without the newline.
pub fn format_state<const N: usize>(state: &Vector<N>) -> String {
    state
        .coords()
        .iter()
        .map(|c| format_value(*c))
        .collect::<Vec<_>>()
        .join(",")
}

/// Writes one value per line.
pub fn write_values<W: Write>(values: &[f32], output: &mut W) -> Result<()> {
    for value in values {
        writeln!(output, "{}", format_value(*value))?;
    }
    Ok(())
}

/// Iterator over the next `steps` states of a trajectory.
///
/// Yields `Err` once if the trajectory diverges and then stops.
pub struct NumericSequence<'a, F, const N: usize> {
    trajectory: &'a mut Trajectory<F, N>,
    remaining: usize,
}

impl<'a, F: Flow<N>, const N: usize> NumericSequence<'a, F, N> {
    /// Creates an iterator over the next `steps` states.
    pub fn new(trajectory: &'a mut Trajectory<F, N>, steps: usize) -> Self {
        NumericSequence {
            trajectory,
            remaining: steps,
        }
    }
}

impl<F: Flow<N>, const N: usize> Iterator for NumericSequence<'_, F, N> {
    type Item = Result<Vector<N>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        match self.trajectory.advance() {
            Ok(state) => {
                self.remaining -= 1;
                Some(Ok(*state))
            }
            Err(e) => {
                self.remaining = 0;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

/// Writes the next `steps` states as CSV lines.
///
/// # Returns
/// The number of lines written.
pub fn write_sequence<F: Flow<N>, const N: usize, W: Write>(
    trajectory: &mut Trajectory<F, N>,
    steps: usize,
    output: &mut W,
) -> Result<usize> {
    debug!(steps, dimension = N, "writing numeric sequence");
    let mut lines = 0;
    for state in NumericSequence::new(trajectory, steps) {
        writeln!(output, "{}", format_state(&state?))?;
        lines += 1;
    }
    output.flush()?;
    Ok(lines)
}

/// Steps a trajectory driven by an external signal.
///
/// Before each step the x coordinate is replaced by the next drive value, so
/// the trajectory follows the driving system. One state is returned per drive
/// value.
pub fn coupled_sequence<F, const N: usize, I>(
    trajectory: &mut Trajectory<F, N>,
    drive: I,
) -> Result<Vec<Vector<N>>>
where
    F: Flow<N>,
    I: IntoIterator<Item = f32>,
{
    let mut states = Vec::new();
    for value in drive {
        trajectory.drive(0, value)?;
        states.push(*trajectory.advance()?);
    }
    Ok(states)
}
