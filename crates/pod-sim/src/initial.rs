//! Closed-form initial condition.

use crate::model::BoundaryValues;
use nalgebra::DVector;
use std::f64::consts::PI;

/// Initial field at position `x`.
///
/// A half-sine bump of amplitude `viscosity` (peak `1 + viscosity` at
/// `x = 0.5`) on `[0, 1)`, constant `1` from `x = 1` on.
pub fn initial_condition(x: f64, viscosity: f64) -> f64 {
    let amplitude = viscosity / 2.0;
    if x < 1.0 {
        1.0 + amplitude * ((2.0 * PI * x - PI / 2.0).sin() + 1.0)
    } else {
        1.0
    }
}

/// Interpolate the initial condition at `coordinates` and impose `boundary`.
pub fn initial_state(coordinates: &[f64], viscosity: f64, boundary: BoundaryValues) -> DVector<f64> {
    let mut state = DVector::from_iterator(
        coordinates.len(),
        coordinates.iter().map(|&x| initial_condition(x, viscosity)),
    );
    boundary.apply(&mut state);
    state
}
