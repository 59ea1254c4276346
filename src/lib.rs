//! Audiogalaxy library - Audio-reactive procedural spiral galaxy

pub mod audio;
pub mod camera;
pub mod cli;
pub mod controls;
pub mod error;
pub mod frame;
pub mod galaxy;
pub mod modulate;
pub mod params;
pub mod rendering;

pub use error::{Error, Result};
