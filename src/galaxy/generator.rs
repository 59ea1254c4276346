//! Procedural spiral galaxy generation.

use std::f32::consts::TAU;

use super::random::RandomSource;
use super::ParticleBuffer;
use crate::error::Result;
use crate::params::GalaxyParameters;

/// Generate a spiral galaxy particle cloud.
///
/// Particles are spread across `branches` arms at a uniform random distance
/// from the center. Arms twist by `spin` radians per unit of radius and each
/// particle is scattered off its arm by an offset whose magnitude falls off
/// with `randomness_power`. Colors blend from `inside_color` at the core to
/// `outside_color` at the rim.
///
/// Draw order per particle: radius, then magnitude and sign for x, y and z.
///
/// # Errors
/// Returns `Error::InvalidParameter` for parameters the generator cannot
/// work with (zero count, non-positive radius, fewer than two branches, ...).
/// Values are never clamped here.
pub fn generate(params: &GalaxyParameters, random: &mut dyn RandomSource) -> Result<ParticleBuffer> {
    params.validate()?;

    let mut positions = Vec::with_capacity(params.count);
    let mut colors = Vec::with_capacity(params.count);

    for i in 0..params.count {
        let radius = random.next_uniform() * params.radius;
        let spin_angle = radius * params.spin;
        let branch_angle = (i % params.branches as usize) as f32 / params.branches as f32 * TAU;

        let random_x = scatter(random, params);
        let random_y = scatter(random, params);
        let random_z = scatter(random, params);

        let angle = branch_angle + spin_angle;
        positions.push([
            angle.cos() * radius + random_x,
            random_y,
            angle.sin() * radius + random_z,
        ]);

        let t = (radius / params.radius).clamp(0.0, 1.0);
        colors.push(params.inside_color.lerp(params.outside_color, t).to_array());
    }

    ParticleBuffer::new(positions, colors)
}

/// Signed offset with magnitude `U^power * randomness`
fn scatter(random: &mut dyn RandomSource, params: &GalaxyParameters) -> f32 {
    let magnitude = random.next_uniform().powf(params.randomness_power) * params.randomness;
    let sign = if random.next_uniform() < 0.5 { 1.0 } else { -1.0 };
    magnitude * sign
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::galaxy::{RngSource, ScriptedRandom};
    use crate::params::Rgb;

    fn small_params() -> GalaxyParameters {
        GalaxyParameters {
            count: 2_000,
            ..GalaxyParameters::default()
        }
    }

    #[test]
    fn test_count_and_bounds() {
        let params = small_params();
        let buffer = generate(&params, &mut RngSource::from_entropy()).unwrap();

        assert_eq!(buffer.len(), params.count);
        assert_eq!(buffer.colors.len(), params.count);

        let max_extent = params.radius + params.randomness;
        for (position, color) in buffer.positions.iter().zip(&buffer.colors) {
            assert!(position.iter().all(|c| c.is_finite()));
            assert!(position[1].abs() <= params.randomness);
            let planar = (position[0] * position[0] + position[2] * position[2]).sqrt();
            assert!(planar <= max_extent * 1.5);
            assert!(color.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn test_unseeded_generations_differ() {
        let params = small_params();
        let a = generate(&params, &mut RngSource::from_entropy()).unwrap();
        let b = generate(&params, &mut RngSource::from_entropy()).unwrap();

        assert_eq!(a.len(), b.len());
        assert_ne!(a.positions, b.positions);
    }

    #[test]
    fn test_seeded_generations_match() {
        let params = small_params();
        let a = generate(&params, &mut RngSource::seeded(11)).unwrap();
        let b = generate(&params, &mut RngSource::seeded(11)).unwrap();
        assert_eq!(a.positions, b.positions);
    }

    #[test]
    fn test_color_endpoints() {
        let params = GalaxyParameters {
            count: 1,
            inside_color: Rgb::new(1.0, 0.0, 0.0),
            outside_color: Rgb::new(0.0, 0.0, 1.0),
            ..GalaxyParameters::default()
        };

        // Radius draw 0 -> core
        let core = generate(&params, &mut ScriptedRandom::constant(0.0)).unwrap();
        let c = core.colors[0];
        assert!((c[0] - 1.0).abs() < 1e-6 && c[1].abs() < 1e-6 && c[2].abs() < 1e-6);

        // Radius draw 1 -> rim
        let rim = generate(&params, &mut ScriptedRandom::constant(1.0)).unwrap();
        let c = rim.colors[0];
        assert!(c[0].abs() < 1e-6 && c[1].abs() < 1e-6 && (c[2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_deterministic_arms_without_scatter() {
        let params = GalaxyParameters {
            count: 3,
            branches: 3,
            radius: 1.0,
            spin: 0.0,
            randomness: 0.0,
            randomness_power: 1.0,
            ..GalaxyParameters::default()
        };

        let buffer = generate(&params, &mut ScriptedRandom::constant(1.0)).unwrap();

        for (i, position) in buffer.positions.iter().enumerate() {
            let branch_angle = i as f32 / 3.0 * TAU;
            assert_eq!(position[0], branch_angle.cos());
            assert_eq!(position[1], 0.0);
            assert_eq!(position[2], branch_angle.sin());
        }
    }

    #[test]
    fn test_scatter_sign_and_power() {
        let params = GalaxyParameters {
            count: 1,
            radius: 1.0,
            spin: 0.0,
            randomness: 2.0,
            randomness_power: 2.0,
            ..GalaxyParameters::default()
        };

        // radius, |x|, sign(x), |y|, sign(y), |z|, sign(z)
        let mut random = ScriptedRandom::new(vec![0.0, 0.5, 0.1, 0.5, 0.9, 1.0, 0.2]);
        let buffer = generate(&params, &mut random).unwrap();
        let p = buffer.positions[0];

        assert!((p[0] - 0.5).abs() < 1e-6); // 0.5^2 * 2, positive
        assert!((p[1] + 0.5).abs() < 1e-6); // negative
        assert!((p[2] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_parameters_fail() {
        let params = GalaxyParameters {
            count: 0,
            ..GalaxyParameters::default()
        };
        let result = generate(&params, &mut ScriptedRandom::constant(0.5));
        assert!(matches!(result, Err(Error::InvalidParameter { name: "count", .. })));

        let params = GalaxyParameters {
            radius: 0.0,
            ..GalaxyParameters::default()
        };
        assert!(generate(&params, &mut ScriptedRandom::constant(0.5)).is_err());
    }
}
