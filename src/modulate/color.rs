//! Audio-driven color feedback.

use crate::audio::AudioFeatures;
use crate::galaxy::ParticleBuffer;
use crate::params::{ColorModulation, Rgb};

/// Pulls every particle's stored color toward a color derived from the
/// current bass (hue) and treble (warm accent).
///
/// The blend starts from the color stored last frame, not the generated
/// one, so colors drift and converge toward the audio color over time.
pub struct ColorModulator {
    params: ColorModulation,
}

impl ColorModulator {
    pub fn new(params: ColorModulation) -> Self {
        Self { params }
    }

    /// Color the particles are pulled toward for `features`
    pub fn audio_color(&self, features: &AudioFeatures) -> Rgb {
        Rgb::from_hsl(
            features.bass_level(),
            self.params.saturation,
            self.params.lightness,
        )
        .lerp(self.params.accent, features.treble_level())
    }

    pub fn apply(&self, buffer: &mut ParticleBuffer, features: &AudioFeatures) {
        let target = self.audio_color(features);
        for color in &mut buffer.colors {
            *color = Rgb::from_array(*color)
                .lerp(target, self.params.blend)
                .to_array();
        }
        buffer.mark_colors_dirty();
    }
}
