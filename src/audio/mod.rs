//! Audio playback, spectrum analysis and feature extraction.
//!
//! The output stream plays a track and taps it into a sample window; the
//! analyser turns that window into byte frequency data on demand, and
//! [`AudioFeatures::extract`] reduces the spectrum to bass and treble.

mod analyser;
mod features;
mod source;
mod synthesis;
mod system;

// Re-export public types
pub use analyser::{blackman_window, SpectrumAnalyser};
pub use features::AudioFeatures;
pub use source::{CompositionTrack, Frame, Track, WavTrack};
pub use system::{AudioSystem, PlaybackControls, SampleWindow};
