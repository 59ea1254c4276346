//! Crate-wide error type.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by galaxy generation and the runtime collaborators
#[derive(Error, Debug)]
pub enum Error {
    /// A galaxy parameter outside what the generator can work with.
    /// The configuration surface is expected to prevent these.
    #[error("invalid galaxy parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("particle attributes differ in length: {positions} positions, {colors} colors")]
    AttributeMismatch { positions: usize, colors: usize },

    #[error("invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),

    #[error("audio: {0}")]
    Audio(String),

    #[error("failed to read track {path}: {source}")]
    Track {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("failed to load texture {path}: {source}")]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("render: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, Error>;
