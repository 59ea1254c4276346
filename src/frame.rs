//! Per-frame orchestration of the audio-reactive pipeline.

use glam::Vec3;

use crate::audio::AudioFeatures;
use crate::error::Result;
use crate::galaxy::{generate, ParticleBuffer, RandomSource, RestPositions};
use crate::modulate::{ColorModulator, RotationModulator, VibrationModulator, WaveModulator};
use crate::params::{GalaxyParameters, ModulationParams};

/// Everything the frame loop mutates
pub struct GalaxyState {
    /// Parameters of the current buffer
    pub params: GalaxyParameters,

    /// Live particle data (None until the first successful generation)
    pub particles: Option<ParticleBuffer>,

    /// Snapshot of `particles` positions taken at generation time
    pub rest_positions: Option<RestPositions>,

    /// Whole-object Euler rotation (radians, XYZ order)
    pub rotation: Vec3,

    /// Features used by the most recent tick
    pub features: AudioFeatures,

    /// Simulated clock (seconds), the sum of all tick deltas
    pub clock_s: f64,

    /// Incremented on every regeneration so the renderer can reallocate
    pub generation: u64,
}

/// Owns the galaxy state and runs the modulators in order each frame
pub struct FrameDriver {
    state: GalaxyState,
    color: ColorModulator,
    rotation: RotationModulator,
    wave: WaveModulator,
    vibration: VibrationModulator,
    random: Box<dyn RandomSource>,
}

impl FrameDriver {
    /// Create a driver with no particles yet; call [`regenerate`](Self::regenerate)
    /// to build the first galaxy.
    pub fn new(
        params: GalaxyParameters,
        modulation: ModulationParams,
        random: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            state: GalaxyState {
                params,
                particles: None,
                rest_positions: None,
                rotation: Vec3::ZERO,
                features: AudioFeatures::NEUTRAL,
                clock_s: 0.0,
                generation: 0,
            },
            color: ColorModulator::new(modulation.color),
            rotation: RotationModulator::new(modulation.rotation),
            wave: WaveModulator::new(modulation.wave),
            vibration: VibrationModulator::new(modulation.vibration),
            random,
        }
    }

    pub fn state(&self) -> &GalaxyState {
        &self.state
    }

    pub fn params(&self) -> &GalaxyParameters {
        &self.state.params
    }

    pub fn particles_mut(&mut self) -> Option<&mut ParticleBuffer> {
        self.state.particles.as_mut()
    }

    pub fn vibration(&self) -> &VibrationModulator {
        &self.vibration
    }

    /// Replace the galaxy with a fresh one built from `params`.
    ///
    /// The buffer swap, rest snapshot and vibration reset happen together.
    /// On error the previous galaxy is kept untouched.
    pub fn regenerate(&mut self, params: GalaxyParameters) -> Result<()> {
        let buffer = generate(&params, self.random.as_mut())?;

        self.state.rest_positions = Some(RestPositions::snapshot(&buffer));
        self.state.particles = Some(buffer);
        self.state.params = params;
        self.state.generation += 1;
        self.vibration.reset();

        log::info!(
            "Generated galaxy #{}: {} particles, {} branches, radius {:.2}",
            self.state.generation,
            self.state.params.count,
            self.state.params.branches,
            self.state.params.radius
        );
        Ok(())
    }

    /// Advance one frame by `delta_s` seconds.
    ///
    /// `spectrum` is the current byte frequency snapshot; `None` (audio
    /// unavailable) runs the frame with neutral features. Without particles
    /// only the clock advances.
    pub fn tick(&mut self, delta_s: f32, spectrum: Option<&[u8]>) {
        self.state.clock_s += delta_s.max(0.0) as f64;

        let features = spectrum.map_or(AudioFeatures::NEUTRAL, AudioFeatures::extract);
        self.state.features = features;

        let Some(particles) = self.state.particles.as_mut() else {
            return;
        };

        self.color.apply(particles, &features);
        self.rotation.apply(&mut self.state.rotation, &features);
        self.wave.apply(particles, &features);
        self.vibration.apply(
            particles,
            self.state.rest_positions.as_ref(),
            &features,
            self.state.clock_s,
        );

        particles.mark_positions_dirty();
        particles.mark_colors_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::{RngSource, ScriptedRandom};

    fn params(count: usize) -> GalaxyParameters {
        GalaxyParameters {
            count,
            ..GalaxyParameters::default()
        }
    }

    fn driver(count: usize) -> FrameDriver {
        let mut driver = FrameDriver::new(
            params(count),
            ModulationParams::default(),
            Box::new(RngSource::seeded(3)),
        );
        driver.regenerate(params(count)).unwrap();
        driver
    }

    #[test]
    fn test_tick_without_particles_is_safe() {
        let mut driver = FrameDriver::new(
            params(10),
            ModulationParams::default(),
            Box::new(ScriptedRandom::constant(0.5)),
        );
        driver.tick(0.016, Some(&[255; 512]));

        assert!(driver.state().particles.is_none());
        assert_eq!(driver.state().rotation, Vec3::ZERO);
        assert!((driver.state().clock_s - 0.016).abs() < 1e-9);
    }

    #[test]
    fn test_regenerate_snapshots_rest_positions() {
        let driver = driver(500);
        let state = driver.state();

        let particles = state.particles.as_ref().unwrap();
        let rest = state.rest_positions.as_ref().unwrap();
        assert_eq!(rest.len(), particles.len());
        assert_eq!(rest.as_slice(), particles.positions.as_slice());
        assert_eq!(state.generation, 1);
    }

    #[test]
    fn test_regenerate_resets_vibration_and_resizes() {
        let mut driver = driver(500);
        driver.tick(0.016, Some(&[255; 512]));
        assert!(driver.vibration().is_vibrating());

        driver.regenerate(params(800)).unwrap();
        assert!(!driver.vibration().is_vibrating());

        let state = driver.state();
        assert_eq!(state.particles.as_ref().unwrap().len(), 800);
        assert_eq!(state.rest_positions.as_ref().unwrap().len(), 800);
        assert_eq!(state.generation, 2);
    }

    #[test]
    fn test_failed_regeneration_keeps_previous_galaxy() {
        let mut driver = driver(500);
        let bad = GalaxyParameters {
            radius: -1.0,
            ..params(500)
        };
        assert!(driver.regenerate(bad).is_err());

        let state = driver.state();
        assert_eq!(state.generation, 1);
        assert_eq!(state.params.radius, GalaxyParameters::default().radius);
        assert_eq!(state.particles.as_ref().unwrap().len(), 500);
    }

    #[test]
    fn test_tick_marks_buffer_dirty() {
        let mut driver = driver(100);
        driver.particles_mut().unwrap().take_dirty();

        driver.tick(0.016, Some(&[0; 512]));
        let dirty = driver.particles_mut().unwrap().take_dirty();
        assert!(dirty.positions && dirty.colors);
    }

    #[test]
    fn test_midpoint_spectrum_does_not_rotate() {
        let mut driver = driver(100);
        driver.tick(0.016, Some(&[128; 512]));
        assert_eq!(driver.state().rotation, Vec3::ZERO);
    }

    #[test]
    fn test_missing_audio_uses_neutral_features() {
        let mut driver = driver(100);
        driver.tick(0.016, None);
        assert_eq!(driver.state().features, AudioFeatures::NEUTRAL);
        assert!(!driver.vibration().is_vibrating());
    }

    #[test]
    fn test_sustained_bass_burst_returns_near_rest() {
        let mut driver = driver(200);
        let loud = [255u8; 512];

        driver.tick(0.016, Some(&loud));
        assert!(driver.vibration().is_vibrating());

        // 4 more frames of 16ms pass the 50ms burst length
        for _ in 0..4 {
            driver.tick(0.016, Some(&loud));
        }
        assert!(!driver.vibration().is_vibrating());

        let state = driver.state();
        let particles = state.particles.as_ref().unwrap();
        let rest = state.rest_positions.as_ref().unwrap();
        for (position, rest) in particles.positions.iter().zip(rest.as_slice()) {
            // Burst amplitude at full bass is 5
            assert!((position[1] - rest[1]).abs() <= 5.0 + 1e-4);
        }
    }

    #[test]
    fn test_positional_modulators_stay_in_local_space() {
        let mut driver = driver(100);
        let before: Vec<[f32; 2]> = driver
            .state()
            .particles
            .as_ref()
            .unwrap()
            .positions
            .iter()
            .map(|p| [p[0], p[2]])
            .collect();

        for _ in 0..10 {
            driver.tick(0.016, Some(&[250; 512]));
        }

        // Rotation lives in the transform; x and z are never rewritten
        assert_ne!(driver.state().rotation, Vec3::ZERO);
        let after: Vec<[f32; 2]> = driver
            .state()
            .particles
            .as_ref()
            .unwrap()
            .positions
            .iter()
            .map(|p| [p[0], p[2]])
            .collect();
        assert_eq!(before, after);
    }
}
