//! Travelling vertical wave scaled by bass.

use crate::audio::AudioFeatures;
use crate::galaxy::ParticleBuffer;
use crate::params::WaveModulation;

/// Adds a sine displacement to every particle's height each frame.
///
/// The offset is added to the live height, so it accumulates across frames
/// rather than oscillating around the generated shape.
pub struct WaveModulator {
    params: WaveModulation,
    /// Phase accumulator, advanced by a fixed step per frame
    time: f64,
}

impl WaveModulator {
    pub fn new(params: WaveModulation) -> Self {
        Self { params, time: 0.0 }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn apply(&mut self, buffer: &mut ParticleBuffer, features: &AudioFeatures) {
        self.time += self.params.time_step as f64;

        let bass = features.bass_level();
        let amplitude = self.params.amplitude;
        let frequency = self.params.frequency;

        for position in &mut buffer.positions {
            let [x, _, z] = *position;
            let phase = (frequency * x + frequency * z) as f64 + self.time;
            let displacement = amplitude * phase.sin() as f32;
            position[1] += bass * displacement;
        }
        buffer.mark_positions_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(x: f32, y: f32, z: f32) -> ParticleBuffer {
        ParticleBuffer::new(vec![[x, y, z]], vec![[1.0; 3]]).unwrap()
    }

    #[test]
    fn test_time_advances_per_call() {
        let mut wave = WaveModulator::new(WaveModulation::default());
        let mut buffer = single(0.0, 0.0, 0.0);
        for _ in 0..4 {
            wave.apply(&mut buffer, &AudioFeatures::NEUTRAL);
        }
        assert!((wave.time() - 0.02).abs() < 1e-8);
    }

    #[test]
    fn test_time_keeps_advancing_in_long_sessions() {
        let mut wave = WaveModulator::new(WaveModulation::default());
        let mut buffer = single(0.0, 0.0, 0.0);
        // Past 2^17 an f32 accumulator no longer moves by 0.005
        wave.time = 131_072.0;

        for _ in 0..1000 {
            wave.apply(&mut buffer, &AudioFeatures::NEUTRAL);
        }
        assert!((wave.time() - 131_077.0).abs() < 1e-6);
    }

    #[test]
    fn test_silence_leaves_heights() {
        let mut wave = WaveModulator::new(WaveModulation::default());
        let mut buffer = single(1.0, 0.7, -2.0);
        wave.apply(&mut buffer, &AudioFeatures::NEUTRAL);
        assert_eq!(buffer.positions[0], [1.0, 0.7, -2.0]);
    }

    #[test]
    fn test_displacement_formula() {
        let mut wave = WaveModulator::new(WaveModulation::default());
        let mut buffer = single(2.0, 1.0, 3.0);
        let full_bass = AudioFeatures {
            bass: 255.0,
            treble: 0.0,
        };

        wave.apply(&mut buffer, &full_bass);
        let expected = 1.0 + 0.05 * (0.2 * 2.0 + 0.2 * 3.0 + 0.005f32).sin();
        assert!((buffer.positions[0][1] - expected).abs() < 1e-6);
        // x and z are untouched
        assert_eq!(buffer.positions[0][0], 2.0);
        assert_eq!(buffer.positions[0][2], 3.0);
    }

    #[test]
    fn test_displacement_compounds() {
        let mut wave = WaveModulator::new(WaveModulation::default());
        let mut buffer = single(4.0, 0.0, 4.0);
        let full_bass = AudioFeatures {
            bass: 255.0,
            treble: 0.0,
        };

        // sin(1.6 + t) stays positive for small t, so height keeps growing
        let mut previous = 0.0;
        for _ in 0..5 {
            wave.apply(&mut buffer, &full_bass);
            assert!(buffer.positions[0][1] > previous);
            previous = buffer.positions[0][1];
        }
        assert!(previous > 0.2);
    }
}
