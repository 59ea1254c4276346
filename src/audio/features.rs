//! Bass and treble energy from a byte spectrum.

/// Mean spectral magnitudes of the lower and upper half of the spectrum,
/// both in [0, 255]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AudioFeatures {
    pub bass: f32,
    pub treble: f32,
}

impl AudioFeatures {
    /// Features of silence (also used when no audio is available)
    pub const NEUTRAL: Self = Self {
        bass: 0.0,
        treble: 0.0,
    };

    /// Split `spectrum` at its midpoint and average each half.
    ///
    /// With an odd length the middle bin belongs to the bass half. An empty
    /// half averages to 0.
    pub fn extract(spectrum: &[u8]) -> Self {
        let (low, high) = spectrum.split_at(spectrum.len().div_ceil(2));
        Self {
            bass: mean(low),
            treble: mean(high),
        }
    }

    /// Bass scaled to [0, 1]
    pub fn bass_level(&self) -> f32 {
        self.bass / 255.0
    }

    /// Treble scaled to [0, 1]
    pub fn treble_level(&self) -> f32 {
        self.treble / 255.0
    }
}

fn mean(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    (bins.iter().map(|&b| b as u64).sum::<u64>() as f64 / bins.len() as f64) as f32
}
