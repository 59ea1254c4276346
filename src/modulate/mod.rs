//! Per-frame audio-reactive transforms.
//!
//! Color, wave and vibration act on particle data in local space; rotation
//! only advances a whole-object transform the renderer composes at draw time.

mod color;
mod rotation;
mod vibration;
mod wave;

// Re-export public types
pub use color::ColorModulator;
pub use rotation::RotationModulator;
pub use vibration::{VibrationModulator, VibrationState};
pub use wave::WaveModulator;
