//! Bass-triggered vibration bursts.

use crate::audio::AudioFeatures;
use crate::galaxy::{ParticleBuffer, RestPositions};
use crate::params::VibrationModulation;

/// Burst state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VibrationState {
    Idle,
    Vibrating {
        /// Clock time the burst started (seconds)
        started_at_s: f64,
    },
}

/// Short bursts that rewrite particle heights around their rest positions.
///
/// A burst starts when normalized bass exceeds the threshold while idle and
/// lasts `duration_s`. During a burst heights are overwritten from the rest
/// snapshot, so bursts never accumulate. Bass staying high mid-burst does not
/// restart it; the end-of-burst check runs once per frame, after writing.
pub struct VibrationModulator {
    params: VibrationModulation,
    state: VibrationState,
}

impl VibrationModulator {
    pub fn new(params: VibrationModulation) -> Self {
        Self {
            params,
            state: VibrationState::Idle,
        }
    }

    pub fn state(&self) -> VibrationState {
        self.state
    }

    pub fn is_vibrating(&self) -> bool {
        matches!(self.state, VibrationState::Vibrating { .. })
    }

    /// Drop any burst in progress
    pub fn reset(&mut self) {
        self.state = VibrationState::Idle;
    }

    /// Run one frame at clock time `now_s`.
    ///
    /// No-op without a rest snapshot matching the buffer.
    pub fn apply(
        &mut self,
        buffer: &mut ParticleBuffer,
        rest: Option<&RestPositions>,
        features: &AudioFeatures,
        now_s: f64,
    ) {
        let Some(rest) = rest.filter(|rest| rest.matches(buffer)) else {
            return;
        };

        let bass = features.bass_level();
        if self.state == VibrationState::Idle && bass > self.params.threshold {
            log::debug!("Vibration burst at {:.3}s (bass {:.1})", now_s, features.bass);
            self.state = VibrationState::Vibrating {
                started_at_s: now_s,
            };
        }

        let VibrationState::Vibrating { started_at_s } = self.state else {
            return;
        };

        let elapsed = (now_s - started_at_s) as f32;
        let amplitude = bass * self.params.amplitude_scale;
        let frequency = self.params.frequency;
        let phase_step = self.params.phase_step;

        for (i, (position, rest)) in buffer
            .positions
            .iter_mut()
            .zip(rest.as_slice())
            .enumerate()
        {
            let offset = amplitude * (frequency * (elapsed + i as f32 * phase_step)).sin();
            position[1] = rest[1] + offset;
        }
        buffer.mark_positions_dirty();

        if elapsed >= self.params.duration_s {
            self.state = VibrationState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOUD: AudioFeatures = AudioFeatures {
        bass: 200.0,
        treble: 0.0,
    };

    fn buffer_with_rest(n: usize) -> (ParticleBuffer, RestPositions) {
        let positions = (0..n).map(|i| [i as f32, 0.5 * i as f32, 0.0]).collect();
        let buffer = ParticleBuffer::new(positions, vec![[1.0; 3]; n]).unwrap();
        let rest = RestPositions::snapshot(&buffer);
        (buffer, rest)
    }

    #[test]
    fn test_quiet_bass_stays_idle() {
        let mut vibration = VibrationModulator::new(VibrationModulation::default());
        let (mut buffer, rest) = buffer_with_rest(4);
        let before = buffer.positions.clone();

        // 127 / 255 is just under the threshold
        let quiet = AudioFeatures {
            bass: 127.0,
            treble: 255.0,
        };
        vibration.apply(&mut buffer, Some(&rest), &quiet, 0.0);

        assert_eq!(vibration.state(), VibrationState::Idle);
        assert_eq!(buffer.positions, before);
    }

    #[test]
    fn test_trigger_and_expire() {
        let mut vibration = VibrationModulator::new(VibrationModulation::default());
        let (mut buffer, rest) = buffer_with_rest(8);

        vibration.apply(&mut buffer, Some(&rest), &LOUD, 1.0);
        assert_eq!(
            vibration.state(),
            VibrationState::Vibrating { started_at_s: 1.0 }
        );

        // Mid-burst: still vibrating, start time unchanged
        vibration.apply(&mut buffer, Some(&rest), &LOUD, 1.02);
        assert_eq!(
            vibration.state(),
            VibrationState::Vibrating { started_at_s: 1.0 }
        );

        // Past the burst length: back to idle after the final write
        vibration.apply(&mut buffer, Some(&rest), &LOUD, 1.06);
        assert!(!vibration.is_vibrating());

        let amplitude = 200.0 / 255.0 * 5.0;
        for (position, rest) in buffer.positions.iter().zip(rest.as_slice()) {
            assert!((position[1] - rest[1]).abs() <= amplitude + 1e-5);
            assert_eq!(position[0], rest[0]);
        }
    }

    #[test]
    fn test_heights_are_overwritten_from_rest() {
        let mut vibration = VibrationModulator::new(VibrationModulation::default());
        let (mut buffer, rest) = buffer_with_rest(3);

        // Drift the live buffer; the burst must ignore it
        for position in &mut buffer.positions {
            position[1] += 100.0;
        }
        vibration.apply(&mut buffer, Some(&rest), &LOUD, 0.0);

        let amplitude = 200.0 / 255.0 * 5.0;
        for (i, position) in buffer.positions.iter().enumerate() {
            let expected = rest.as_slice()[i][1] + amplitude * (2.0 * (i as f32 * 0.1)).sin();
            assert!((position[1] - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_phase_step_sets_per_particle_stagger() {
        // 0.3 per particle matches stepping a flat xyz array by 0.1 per float
        let params = VibrationModulation {
            phase_step: 0.3,
            ..VibrationModulation::default()
        };
        let mut vibration = VibrationModulator::new(params);
        let (mut buffer, rest) = buffer_with_rest(4);

        vibration.apply(&mut buffer, Some(&rest), &LOUD, 0.0);

        let amplitude = 200.0 / 255.0 * 5.0;
        for (i, position) in buffer.positions.iter().enumerate() {
            let expected = rest.as_slice()[i][1] + amplitude * (2.0 * (i as f32 * 0.3)).sin();
            assert!((position[1] - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_missing_or_stale_rest_is_noop() {
        let mut vibration = VibrationModulator::new(VibrationModulation::default());
        let (mut buffer, _) = buffer_with_rest(4);
        let before = buffer.positions.clone();

        vibration.apply(&mut buffer, None, &LOUD, 0.0);
        assert_eq!(buffer.positions, before);
        assert_eq!(vibration.state(), VibrationState::Idle);

        let (_, stale) = buffer_with_rest(2);
        vibration.apply(&mut buffer, Some(&stale), &LOUD, 0.0);
        assert_eq!(buffer.positions, before);
        assert_eq!(vibration.state(), VibrationState::Idle);
    }

    #[test]
    fn test_retrigger_after_idle() {
        let mut vibration = VibrationModulator::new(VibrationModulation::default());
        let (mut buffer, rest) = buffer_with_rest(2);

        vibration.apply(&mut buffer, Some(&rest), &LOUD, 0.0);
        vibration.apply(&mut buffer, Some(&rest), &LOUD, 0.1);
        assert!(!vibration.is_vibrating());

        vibration.apply(&mut buffer, Some(&rest), &LOUD, 0.2);
        assert_eq!(
            vibration.state(),
            VibrationState::Vibrating { started_at_s: 0.2 }
        );

        vibration.reset();
        assert_eq!(vibration.state(), VibrationState::Idle);
    }
}
