//! Audio analysis configuration and constants.

/// Spectrum analyser configuration (byte frequency data)
#[derive(Debug, Clone)]
pub struct AnalyserConfig {
    /// FFT window size (must be power of 2)
    /// Produces fft_size / 2 frequency bins
    pub fft_size: usize,

    /// Weight of the previous frame's magnitude, in [0, 1)
    pub smoothing: f32,

    /// Magnitude mapped to byte 0 (dBFS)
    pub min_decibels: f32,

    /// Magnitude mapped to byte 255 (dBFS)
    pub max_decibels: f32,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: 1024,
            smoothing: 0.8,
            min_decibels: -100.0,
            max_decibels: -30.0,
        }
    }
}

impl AnalyserConfig {
    /// Number of bins in the byte spectrum
    pub fn frequency_bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), String> {
        if !self.fft_size.is_power_of_two() || self.fft_size < 32 {
            return Err(format!(
                "FFT size must be a power of 2 >= 32, got {}",
                self.fft_size
            ));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(format!("Smoothing must be in [0, 1), got {}", self.smoothing));
        }
        if self.min_decibels >= self.max_decibels {
            return Err(format!(
                "min_decibels ({}) must be below max_decibels ({})",
                self.min_decibels, self.max_decibels
            ));
        }
        Ok(())
    }
}

/// Audio constants (compile-time, match Glicol engine setup)
pub mod audio_constants {
    /// Audio block size (samples per buffer)
    /// 128 = 2.9ms @ 44.1kHz
    pub const BLOCK_SIZE: usize = 128;
}
