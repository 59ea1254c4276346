//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

use crate::controls::{ControlSurface, ParameterField};
use crate::error::Result;
use crate::params::{GalaxyParameters, Rgb};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "audiogalaxy")]
#[command(about = "Audio-reactive procedural spiral galaxy", long_about = None)]
pub struct Args {
    /// Number of particles
    #[arg(long, value_name = "N")]
    pub count: Option<usize>,

    /// Particle sprite size
    #[arg(long, value_name = "F")]
    pub size: Option<f32>,

    /// Galaxy radius
    #[arg(long, value_name = "F")]
    pub radius: Option<f32>,

    /// Number of spiral arms
    #[arg(long, value_name = "N")]
    pub branches: Option<u32>,

    /// Arm twist per unit of radius
    #[arg(long, value_name = "F", allow_hyphen_values = true)]
    pub spin: Option<f32>,

    /// Maximum scatter away from the arms
    #[arg(long, value_name = "F")]
    pub randomness: Option<f32>,

    /// Scatter falloff exponent
    #[arg(long, value_name = "F")]
    pub randomness_power: Option<f32>,

    /// Core color (#rrggbb)
    #[arg(long, value_name = "HEX")]
    pub inside_color: Option<String>,

    /// Rim color (#rrggbb)
    #[arg(long, value_name = "HEX")]
    pub outside_color: Option<String>,

    /// Seed for reproducible galaxies
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// WAV file to play instead of the built-in composition
    #[arg(long, value_name = "FILE")]
    pub track: Option<PathBuf>,

    /// Particle sprite image
    #[arg(long, value_name = "FILE")]
    pub texture: Option<PathBuf>,

    /// Output volume (0-1)
    #[arg(long, value_name = "F", default_value = "1.0")]
    pub volume: f32,

    /// Start with music paused
    #[arg(long)]
    pub muted: bool,
}

impl Args {
    /// Galaxy parameters from defaults overridden by the given flags.
    ///
    /// Colors must parse; numeric values are left for the control surface
    /// to clamp.
    pub fn galaxy_parameters(&self) -> Result<GalaxyParameters> {
        let mut params = GalaxyParameters::default();

        let overrides = [
            (ParameterField::Count, self.count.map(|v| v as f64)),
            (ParameterField::Size, self.size.map(f64::from)),
            (ParameterField::Radius, self.radius.map(f64::from)),
            (ParameterField::Branches, self.branches.map(f64::from)),
            (ParameterField::Spin, self.spin.map(f64::from)),
            (ParameterField::Randomness, self.randomness.map(f64::from)),
            (
                ParameterField::RandomnessPower,
                self.randomness_power.map(f64::from),
            ),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                field.set(&mut params, value);
            }
        }

        if let Some(hex) = &self.inside_color {
            params.inside_color = Rgb::from_hex(hex)?;
        }
        if let Some(hex) = &self.outside_color {
            params.outside_color = Rgb::from_hex(hex)?;
        }

        Ok(params)
    }

    /// Build the live control surface seeded from these arguments
    pub fn control_surface(&self) -> Result<ControlSurface> {
        Ok(ControlSurface::new(
            self.galaxy_parameters()?,
            self.volume,
            !self.muted,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let args = Args::parse_from(["audiogalaxy"]);
        let surface = args.control_surface().unwrap();

        assert_eq!(surface.params(), &GalaxyParameters::default());
        assert_eq!(surface.volume(), 1.0);
        assert!(surface.is_playing());
        assert!(args.seed.is_none());
    }

    #[test]
    fn test_flags_are_clamped() {
        let args = Args::parse_from([
            "audiogalaxy",
            "--count",
            "5",
            "--spin",
            "-12",
            "--branches",
            "7",
            "--volume",
            "4",
            "--muted",
        ]);
        let surface = args.control_surface().unwrap();

        assert_eq!(surface.params().count, 20_000);
        assert!((surface.params().spin + 5.0).abs() < 1e-6);
        assert_eq!(surface.params().branches, 7);
        assert_eq!(surface.volume(), 1.0);
        assert!(!surface.is_playing());
    }

    #[test]
    fn test_colors_parse() {
        let args = Args::parse_from(["audiogalaxy", "--inside-color", "#00ff00"]);
        let params = args.galaxy_parameters().unwrap();
        assert_eq!(params.inside_color, Rgb::from_bytes(0x00, 0xff, 0x00));
    }

    #[test]
    fn test_bad_color_is_an_error() {
        let args = Args::parse_from(["audiogalaxy", "--outside-color", "blue"]);
        assert!(args.galaxy_parameters().is_err());
    }
}
