//! Playable audio sources: a looped WAV track or the Glicol composition.

use glicol::Engine;
use std::path::Path;

use super::synthesis::GLICOL_COMPOSITION;
use crate::error::{Error, Result};
use crate::params::audio_constants::BLOCK_SIZE;

/// Stereo frame
pub type Frame = [f32; 2];

/// Something that can fill stereo frames on demand
pub enum Track {
    Wav(WavTrack),
    Composition(Box<CompositionTrack>),
}

impl Track {
    /// Fill `frames` with the next stretch of audio
    pub fn fill(&mut self, frames: &mut [Frame]) {
        match self {
            Track::Wav(track) => track.fill(frames),
            Track::Composition(track) => track.fill(frames),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Track::Wav(track) => format!(
                "WAV track ({} frames @ {}Hz)",
                track.frames.len(),
                track.sample_rate_hz
            ),
            Track::Composition(_) => "Glicol composition".to_string(),
        }
    }
}

/// Decoded WAV file, looped, resampled to the output rate by nearest frame
pub struct WavTrack {
    frames: Vec<Frame>,
    sample_rate_hz: u32,
    position: f64,
    step: f64,
}

impl WavTrack {
    /// Decode a WAV file into stereo frames (mono is duplicated,
    /// extra channels are dropped)
    pub fn open(path: &Path) -> Result<Self> {
        let track_error = |source| Error::Track {
            path: path.to_path_buf(),
            source,
        };

        let reader = hound::WavReader::open(path).map_err(track_error)?;
        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<std::result::Result<_, _>>()
                .map_err(track_error)?,
            hound::SampleFormat::Int => {
                let full_scale = (1i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / full_scale))
                    .collect::<std::result::Result<_, _>>()
                    .map_err(track_error)?
            }
        };

        let frames = samples
            .chunks_exact(channels)
            .map(|c| if channels == 1 { [c[0], c[0]] } else { [c[0], c[1]] })
            .collect();

        Self::from_frames(frames, spec.sample_rate)
    }

    pub fn from_frames(frames: Vec<Frame>, sample_rate_hz: u32) -> Result<Self> {
        if frames.is_empty() {
            return Err(Error::Audio("track contains no audio frames".to_string()));
        }
        Ok(Self {
            frames,
            sample_rate_hz,
            position: 0.0,
            step: 1.0,
        })
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    /// Play back at `output_rate_hz` without changing pitch
    pub fn set_output_rate(&mut self, output_rate_hz: u32) {
        self.step = self.sample_rate_hz as f64 / output_rate_hz.max(1) as f64;
    }

    fn fill(&mut self, out: &mut [Frame]) {
        let len = self.frames.len() as f64;
        for frame in out {
            *frame = self.frames[self.position as usize];
            self.position += self.step;
            if self.position >= len {
                self.position %= len;
            }
        }
    }
}

/// Glicol engine rendering the built-in composition block by block
pub struct CompositionTrack {
    engine: Engine<BLOCK_SIZE>,
    block: [Frame; BLOCK_SIZE],
    cursor: usize,
}

impl CompositionTrack {
    pub fn new(sample_rate_hz: usize) -> Self {
        let mut engine = Engine::<BLOCK_SIZE>::new();
        engine.set_sr(sample_rate_hz);
        engine.update_with_code(GLICOL_COMPOSITION);

        Self {
            engine,
            block: [[0.0; 2]; BLOCK_SIZE],
            cursor: BLOCK_SIZE,
        }
    }

    fn fill(&mut self, out: &mut [Frame]) {
        for frame in out {
            if self.cursor >= BLOCK_SIZE {
                let (buffers, _) = self.engine.next_block(vec![]);
                for i in 0..BLOCK_SIZE {
                    // Hard clip to ±0.5
                    self.block[i] = [buffers[0][i].clamp(-0.5, 0.5), buffers[1][i].clamp(-0.5, 0.5)];
                }
                self.cursor = 0;
            }
            *frame = self.block[self.cursor];
            self.cursor += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_track_loops() {
        let mut track = Track::Wav(
            WavTrack::from_frames(vec![[0.1, 0.1], [0.2, 0.2], [0.3, 0.3]], 44_100).unwrap(),
        );
        let mut out = [[0.0; 2]; 5];
        track.fill(&mut out);
        let left: Vec<f32> = out.iter().map(|f| f[0]).collect();
        assert_eq!(left, vec![0.1, 0.2, 0.3, 0.1, 0.2]);
    }

    #[test]
    fn test_wav_track_resamples() {
        let frames = (0..8).map(|i| [i as f32, i as f32]).collect();
        let mut track = WavTrack::from_frames(frames, 22_050).unwrap();
        track.set_output_rate(44_100);

        let mut out = [[0.0; 2]; 4];
        track.fill(&mut out);
        let left: Vec<f32> = out.iter().map(|f| f[0]).collect();
        assert_eq!(left, vec![0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_empty_track_rejected() {
        assert!(WavTrack::from_frames(Vec::new(), 44_100).is_err());
    }

    #[test]
    fn test_wav_decoding() {
        let path = std::env::temp_dir().join(format!("audiogalaxy-test-{}.wav", std::process::id()));
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        writer.write_sample(16_384i16).unwrap();
        writer.write_sample(-32_768i16).unwrap();
        writer.finalize().unwrap();

        let track = WavTrack::open(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(track.sample_rate_hz(), 8_000);
        assert_eq!(track.frames, vec![[0.5, 0.5], [-1.0, -1.0]]);
    }

    #[test]
    fn test_missing_file_is_track_error() {
        let result = WavTrack::open(Path::new("/definitely/not/here.wav"));
        assert!(matches!(result, Err(Error::Track { .. })));
    }
}
