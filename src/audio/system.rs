//! Audio output stream feeding the spectrum analyser.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use super::analyser::SpectrumAnalyser;
use super::source::{CompositionTrack, Frame, Track, WavTrack};
use crate::error::{Error, Result};
use crate::params::AnalyserConfig;

/// Volume and play/pause state shared with the audio callback
#[derive(Debug)]
pub struct PlaybackControls {
    volume_bits: AtomicU32,
    playing: AtomicBool,
}

impl PlaybackControls {
    pub fn new(volume: f32, playing: bool) -> Self {
        Self {
            volume_bits: AtomicU32::new(volume.clamp(0.0, 1.0).to_bits()),
            playing: AtomicBool::new(playing),
        }
    }

    pub fn volume(&self) -> f32 {
        f32::from_bits(self.volume_bits.load(Ordering::Relaxed))
    }

    pub fn set_volume(&self, volume: f32) {
        self.volume_bits
            .store(volume.clamp(0.0, 1.0).to_bits(), Ordering::Relaxed);
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Relaxed)
    }

    pub fn set_playing(&self, playing: bool) {
        self.playing.store(playing, Ordering::Relaxed);
    }
}

/// Most recent mono samples heard by the analyser, oldest first
#[derive(Debug)]
pub struct SampleWindow {
    samples: Vec<f32>,
    capacity: usize,
}

impl SampleWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity * 2),
            capacity,
        }
    }

    /// Append stereo frames as mono, keeping only the newest `capacity`
    pub fn push_frames(&mut self, frames: &[Frame]) {
        self.samples
            .extend(frames.iter().map(|[left, right]| 0.5 * (left + right)));
        if self.samples.len() > self.capacity {
            let excess = self.samples.len() - self.capacity;
            self.samples.drain(0..excess);
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }
}

/// Audio system playing a track and exposing its byte spectrum
pub struct AudioSystem {
    controls: Arc<PlaybackControls>,
    window: Arc<Mutex<SampleWindow>>,
    analyser: SpectrumAnalyser,
    /// Local copy of the window so the lock is held only briefly
    scratch: Vec<f32>,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,
}

impl AudioSystem {
    /// Open the default output device and start playing `track_path`, or the
    /// built-in composition when no path is given.
    pub fn new(
        analyser_config: AnalyserConfig,
        track_path: Option<&Path>,
        volume: f32,
        playing: bool,
    ) -> Result<Self> {
        let analyser = SpectrumAnalyser::new(analyser_config).map_err(Error::Audio)?;

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Audio("No audio output device found".to_string()))?;

        let config = device
            .default_output_config()
            .map_err(|e| Error::Audio(format!("Failed to get audio config: {}", e)))?;

        if config.sample_format() != cpal::SampleFormat::F32 {
            return Err(Error::Audio(format!(
                "Unsupported output sample format {:?}",
                config.sample_format()
            )));
        }

        let sample_rate_hz = config.sample_rate().0;
        let channels = config.channels().max(1) as usize;

        log::info!(
            "Audio: {} @ {}Hz, {} channel(s)",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            sample_rate_hz,
            channels
        );

        let mut track = match track_path {
            Some(path) => {
                let mut wav = WavTrack::open(path)?;
                if wav.sample_rate_hz() != sample_rate_hz {
                    log::info!(
                        "Resampling track from {}Hz to {}Hz",
                        wav.sample_rate_hz(),
                        sample_rate_hz
                    );
                }
                wav.set_output_rate(sample_rate_hz);
                Track::Wav(wav)
            }
            None => Track::Composition(Box::new(CompositionTrack::new(sample_rate_hz as usize))),
        };
        log::info!("Playing {}", track.describe());

        let controls = Arc::new(PlaybackControls::new(volume, playing));
        let window = Arc::new(Mutex::new(SampleWindow::new(analyser.fft_size())));

        let controls_cb = Arc::clone(&controls);
        let window_cb = Arc::clone(&window);
        let mut frames: Vec<Frame> = Vec::new();

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let frame_count = data.len() / channels;
                    frames.resize(frame_count, [0.0; 2]);

                    if controls_cb.is_playing() {
                        track.fill(&mut frames);
                    } else {
                        // Paused: the analyser hears silence too
                        frames.fill([0.0; 2]);
                    }

                    // Analysis taps the signal before volume
                    if let Ok(mut window) = window_cb.try_lock() {
                        window.push_frames(&frames);
                    }

                    let volume = controls_cb.volume();
                    for (out, frame) in data.chunks_exact_mut(channels).zip(&frames) {
                        write_frame(out, *frame, volume);
                    }
                },
                |err| log::warn!("Audio stream error: {}", err),
                None,
            )
            .map_err(|e| Error::Audio(format!("Failed to build audio stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| Error::Audio(format!("Failed to start audio stream: {}", e)))?;

        Ok(Self {
            controls,
            window,
            scratch: Vec::new(),
            analyser,
            _stream: stream,
        })
    }

    pub fn frequency_bin_count(&self) -> usize {
        self.analyser.frequency_bin_count()
    }

    /// Write the current byte spectrum into `out`.
    ///
    /// A poisoned sample window is treated as silence.
    pub fn frequency_data(&mut self, out: &mut [u8]) {
        self.scratch.clear();
        if let Ok(window) = self.window.lock() {
            self.scratch.extend_from_slice(window.as_slice());
        }
        self.analyser.byte_frequency_data(&self.scratch, out);
    }

    pub fn set_volume(&self, volume: f32) {
        self.controls.set_volume(volume);
    }

    pub fn set_playing(&self, playing: bool) {
        self.controls.set_playing(playing);
    }

    pub fn controls(&self) -> &PlaybackControls {
        &self.controls
    }
}

/// Spread a stereo frame over `out.len()` device channels
fn write_frame(out: &mut [f32], frame: Frame, volume: f32) {
    match out.len() {
        1 => out[0] = 0.5 * (frame[0] + frame[1]) * volume,
        _ => {
            for (ch, sample) in out.iter_mut().enumerate() {
                *sample = frame[ch.min(1)] * volume;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_controls_clamp() {
        let controls = PlaybackControls::new(2.0, true);
        assert_eq!(controls.volume(), 1.0);

        controls.set_volume(0.25);
        assert_eq!(controls.volume(), 0.25);
        controls.set_volume(-1.0);
        assert_eq!(controls.volume(), 0.0);

        controls.set_playing(false);
        assert!(!controls.is_playing());
    }

    #[test]
    fn test_sample_window_keeps_newest() {
        let mut window = SampleWindow::new(3);
        window.push_frames(&[[1.0, 1.0], [2.0, 2.0]]);
        assert_eq!(window.as_slice(), &[1.0, 2.0]);

        window.push_frames(&[[3.0, 5.0], [4.0, 4.0]]);
        assert_eq!(window.as_slice(), &[2.0, 4.0, 4.0]);
    }

    #[test]
    fn test_write_frame_channel_layouts() {
        let mut mono = [0.0];
        write_frame(&mut mono, [1.0, 0.0], 0.5);
        assert_eq!(mono, [0.25]);

        let mut surround = [0.0; 4];
        write_frame(&mut surround, [0.2, 0.4], 1.0);
        assert_eq!(surround, [0.2, 0.4, 0.4, 0.4]);
    }
}
