//! Byte frequency data from time-domain samples.
//!
//! Mirrors the classic browser analyser node: Blackman window, FFT,
//! exponential smoothing across frames, then a decibel range mapped onto
//! 0..=255.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

use crate::params::AnalyserConfig;

/// Stateful spectrum analyser (smoothing carries over between calls)
pub struct SpectrumAnalyser {
    config: AnalyserConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    spectrum: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
}

impl SpectrumAnalyser {
    pub fn new(config: AnalyserConfig) -> Result<Self, String> {
        config
            .validate()
            .map_err(|e| format!("Invalid analyser config: {}", e))?;

        let size = config.fft_size;
        let fft = FftPlanner::new().plan_fft_forward(size);
        let window = (0..size).map(|i| blackman_window(i, size)).collect();

        Ok(Self {
            fft,
            window,
            spectrum: vec![Complex::new(0.0, 0.0); size],
            smoothed: vec![0.0; config.frequency_bin_count()],
            config,
        })
    }

    pub fn frequency_bin_count(&self) -> usize {
        self.config.frequency_bin_count()
    }

    pub fn fft_size(&self) -> usize {
        self.config.fft_size
    }

    /// Analyse the most recent `fft_size` samples of `samples` (oldest first)
    /// and write one byte per bin into `out`.
    ///
    /// Shorter inputs are treated as zero-padded at the front. Extra output
    /// slots beyond the bin count are left untouched.
    pub fn byte_frequency_data(&mut self, samples: &[f32], out: &mut [u8]) {
        let size = self.config.fft_size;
        let recent = &samples[samples.len().saturating_sub(size)..];
        let pad = size - recent.len();

        for (i, slot) in self.spectrum.iter_mut().enumerate() {
            let sample = if i < pad { 0.0 } else { recent[i - pad] };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }
        self.fft.process(&mut self.spectrum);

        let tau = self.config.smoothing;
        let range = self.config.max_decibels - self.config.min_decibels;
        let scale = 1.0 / size as f32;

        for (bin, (smoothed, byte)) in self.smoothed.iter_mut().zip(out.iter_mut()).enumerate() {
            let magnitude = self.spectrum[bin].norm() * scale;
            *smoothed = tau * *smoothed + (1.0 - tau) * magnitude;

            let decibels = 20.0 * smoothed.log10();
            let level = 255.0 * (decibels - self.config.min_decibels) / range;
            *byte = if level.is_finite() {
                level.floor().clamp(0.0, 255.0) as u8
            } else {
                0
            };
        }
    }

    /// Forget smoothing history
    pub fn reset(&mut self) {
        self.smoothed.fill(0.0);
    }
}

/// Blackman window (alpha = 0.16)
pub fn blackman_window(index: usize, size: usize) -> f32 {
    let x = index as f32 / size as f32;
    0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
}
