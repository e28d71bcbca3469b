//! Analysis/synthesis window generation
//!
//! The transform engine applies the same window on analysis and
//! synthesis, so reconstruction normalizes by the accumulated squared
//! window. A periodic Hann window with hop = size / overlap satisfies
//! the constant-overlap-add condition for any integer overlap >= 1.

use std::f64::consts::PI;

use crate::Sample;

/// Periodic Hann window of the given size
pub fn hann(size: usize) -> Vec<Sample> {
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f64 / size as f64).cos()))
        .collect()
}

/// Sum of squared, hop-shifted window instances at each position of one period
///
/// Useful for checking the COLA property of a (size, hop) pair: in the
/// steady state the returned values are constant for a valid pair.
pub fn cola_profile(window: &[Sample], hopsize: usize) -> Vec<Sample> {
    let size = window.len();
    let mut profile = vec![0.0; hopsize];

    for start in (0..size).step_by(hopsize) {
        for (i, value) in profile.iter_mut().enumerate() {
            let idx = start + i;
            if idx < size {
                *value += window[idx] * window[idx];
            }
        }
    }

    profile
}
