//! Whole-object rotation driven by bass and treble.

use glam::Vec3;
use std::f32::consts::TAU;

use crate::audio::AudioFeatures;
use crate::params::RotationModulation;

/// Accumulates Euler angles (radians, XYZ order) applied by the renderer as
/// a model transform. Particle positions are never touched.
pub struct RotationModulator {
    params: RotationModulation,
}

impl RotationModulator {
    pub fn new(params: RotationModulation) -> Self {
        Self { params }
    }

    /// Angular change for one frame, before wrapping
    pub fn delta(&self, features: &AudioFeatures) -> Vec3 {
        let p = &self.params;
        let bass_velocity = (features.bass - p.center) * p.gain;
        let treble_velocity = (features.treble - p.center) * p.gain;
        let [x, y, z] = p.axis_share;

        Vec3::new(
            bass_velocity * x + treble_velocity * x,
            bass_velocity * y + treble_velocity * y,
            bass_velocity * z + treble_velocity * z,
        )
    }

    /// Advance `rotation` and wrap each axis into [0, 2π).
    ///
    /// Wrapping uses the Euclidean remainder, so a negative accumulation
    /// lands just below 2π rather than staying negative.
    pub fn apply(&self, rotation: &mut Vec3, features: &AudioFeatures) {
        let next = *rotation + self.delta(features);
        *rotation = Vec3::new(wrap(next.x), wrap(next.y), wrap(next.z));
    }
}

fn wrap(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
