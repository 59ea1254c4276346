//! Particle sprite image: loaded from disk or generated.

use std::path::Path;

use crate::error::{Error, Result};

/// RGBA8 sprite pixels
#[derive(Debug, Clone)]
pub struct SpriteImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl SpriteImage {
    /// Load any format the `image` crate understands
    pub fn load(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .map_err(|source| Error::Texture {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();

        Ok(Self {
            width: image.width(),
            height: image.height(),
            rgba: image.into_raw(),
        })
    }

    /// White disc with a soft quadratic falloff to transparent edges
    pub fn radial_falloff(size: u32) -> Self {
        let size = size.max(2);
        let center = (size as f32 - 1.0) / 2.0;
        let image = image::RgbaImage::from_fn(size, size, |x, y| {
            let dx = (x as f32 - center) / center;
            let dy = (y as f32 - center) / center;
            let falloff = (1.0 - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
            let alpha = (falloff * falloff * 255.0).round() as u8;
            image::Rgba([255, 255, 255, alpha])
        });

        Self {
            width: size,
            height: size,
            rgba: image.into_raw(),
        }
    }
}
