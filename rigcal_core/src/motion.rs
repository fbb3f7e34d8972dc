//! Numeric helpers shared by the classifier.

use nalgebra::{UnitQuaternion, Vector3};
use rigcal_traits::Chirality;

/// Squared magnitude of the world acceleration after removing vertical
/// gravity. Stays near zero for a resting node regardless of its pose drift;
/// spikes on deliberate shakes.
#[inline]
pub fn vertical_deviation_sq(acceleration: &Vector3<f32>, gravity: f32) -> f32 {
    (acceleration - Vector3::y() * gravity).norm_squared()
}

/// Canonical outward unit vector for an upper-arm candidate: `-x` for the
/// left side, `+x` for the right.
#[inline]
pub fn outward_axis(side: Chirality) -> Vector3<f32> {
    match side {
        Chirality::Left => -Vector3::x(),
        Chirality::Right => Vector3::x(),
    }
}

/// Vertical component of the outward vector rotated by the node's current
/// orientation. Near zero while the arm is horizontal; strongly signed once
/// the arm is raised or lowered.
#[inline]
pub fn lateral_vertical_component(orientation: &UnitQuaternion<f32>, side: Chirality) -> f32 {
    (orientation * outward_axis(side)).y
}
