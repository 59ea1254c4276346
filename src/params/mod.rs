//! Parameter definitions with units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Units (world units, seconds, radians, dBFS)
//! - Documented ranges and meanings
//! - Type safety where possible

mod audio;
mod galaxy;
mod modulation;
mod render;

// Re-export all types
pub use audio::{audio_constants, AnalyserConfig};
pub use galaxy::{bounds, linear_to_srgb, srgb_to_linear, GalaxyParameters, ParameterBounds, Rgb};
pub use modulation::{
    ColorModulation, ModulationParams, RotationModulation, VibrationModulation, WaveModulation,
};
pub use render::{OrbitCameraConfig, RenderConfig};
