//! Audio-reactive modulation constants.
//!
//! Every number the per-frame modulators use lives here, grouped by
//! modulator, with the feature it reads and the formula it feeds.

use super::galaxy::Rgb;

/// Color feedback: stored color is pulled toward an audio-derived color
#[derive(Debug, Clone)]
pub struct ColorModulation {
    /// Warm accent the audio color drifts toward as treble rises
    /// Formula: audio = lerp(hsl(bass/255, s, l), accent, treble/255)
    pub accent: Rgb,

    /// HSL saturation of the bass-driven hue
    pub saturation: f32,

    /// HSL lightness of the bass-driven hue
    pub lightness: f32,

    /// Fraction of the audio color mixed into the stored color each frame
    pub blend: f32,
}

impl Default for ColorModulation {
    fn default() -> Self {
        Self {
            accent: Rgb::from_bytes(0xff, 0xaa, 0x00),
            saturation: 1.0,
            lightness: 0.5,
            blend: 0.5,
        }
    }
}

/// Whole-object rotation driven by bass and treble
#[derive(Debug, Clone)]
pub struct RotationModulation {
    /// Feature value producing zero angular velocity (byte midpoint)
    pub center: f32,

    /// Radians per frame per unit of feature above `center`
    pub gain: f32,

    /// Share of each velocity term applied per axis (x, y, z)
    pub axis_share: [f32; 3],
}

impl Default for RotationModulation {
    fn default() -> Self {
        Self {
            center: 128.0,
            gain: 1e-5,
            axis_share: [0.25, 0.5, 0.1],
        }
    }
}

/// Travelling vertical sine wave scaled by bass
#[derive(Debug, Clone)]
pub struct WaveModulation {
    /// Peak displacement per frame at full bass (world units)
    pub amplitude: f32,

    /// Spatial frequency along x and z (radians per world unit)
    pub frequency: f32,

    /// Phase advance per frame (fixed, not wall-clock scaled)
    pub time_step: f32,
}

impl Default for WaveModulation {
    fn default() -> Self {
        Self {
            amplitude: 0.05,
            frequency: 0.2,
            time_step: 0.005,
        }
    }
}

/// Bass-triggered vibration bursts
#[derive(Debug, Clone)]
pub struct VibrationModulation {
    /// Normalized bass (bass/255) that must be exceeded to start a burst
    pub threshold: f32,

    /// Burst length (seconds)
    pub duration_s: f32,

    /// Displacement at full bass (world units)
    /// Formula: amplitude = bass/255 * this_scale
    pub amplitude_scale: f32,

    /// Oscillation frequency (radians per second)
    pub frequency: f32,

    /// Per-particle phase offset (seconds per particle index)
    pub phase_step: f32,
}

impl Default for VibrationModulation {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            duration_s: 0.05,
            amplitude_scale: 5.0,
            frequency: 2.0,
            phase_step: 0.1,
        }
    }
}

/// All modulator settings
#[derive(Debug, Clone, Default)]
pub struct ModulationParams {
    pub color: ColorModulation,
    pub rotation: RotationModulation,
    pub wave: WaveModulation,
    pub vibration: VibrationModulation,
}
