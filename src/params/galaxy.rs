//! Galaxy shape parameters and their editable ranges.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Linear RGB color with components in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from 8-bit sRGB channels
    pub fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        let decode = |c: u8| srgb_to_linear(c as f32 / 255.0);
        Self::new(decode(r), decode(g), decode(b))
    }

    /// 8-bit sRGB channels as they appear on an sRGB surface
    pub fn to_bytes(self) -> [u8; 3] {
        let encode = |c: f32| (linear_to_srgb(c.clamp(0.0, 1.0)) * 255.0).round() as u8;
        [encode(self.r), encode(self.g), encode(self.b)]
    }

    /// Parse `#rrggbb` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(Error::InvalidColor(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| Error::InvalidColor(hex.to_string()))
        };
        Ok(Self::from_bytes(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Color from sRGB-space HSL, all inputs in [0, 1]. Hue wraps.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(1.0);
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let [r, g, b] = if s == 0.0 {
            [l, l, l]
        } else {
            let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;
            [
                hue_to_channel(p, q, h + 1.0 / 3.0),
                hue_to_channel(p, q, h),
                hue_to_channel(p, q, h - 1.0 / 3.0),
            ]
        };

        Self::new(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
    }

    /// Linear interpolation toward `other` by `t`
    pub fn lerp(self, other: Rgb, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_array(c: [f32; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

/// sRGB transfer function decode, component in [0, 1]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB transfer function encode, component in [0, 1]
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Parameters of one generated galaxy.
///
/// Immutable per generation: any edit produces a new value and a full
/// regeneration of the particle buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct GalaxyParameters {
    /// Number of particles
    pub count: usize,

    /// Point sprite size (world units at unit depth)
    pub size: f32,

    /// Galaxy radius (world units)
    pub radius: f32,

    /// Number of spiral arms
    pub branches: u32,

    /// Arm twist (radians per world unit of radius)
    pub spin: f32,

    /// Maximum scatter distance from the arm (world units)
    pub randomness: f32,

    /// Scatter falloff exponent (higher = tighter arms)
    pub randomness_power: f32,

    /// Color at the core
    pub inside_color: Rgb,

    /// Color at the rim
    pub outside_color: Rgb,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            count: 50_000,
            size: 0.04,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            inside_color: Rgb::from_bytes(0xff, 0x60, 0x30),
            outside_color: Rgb::from_bytes(0x1b, 0x39, 0x84),
        }
    }
}

impl GalaxyParameters {
    /// Reject values the generator cannot work with. Never clamps.
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(Error::InvalidParameter {
                name: "count",
                value: 0.0,
            });
        }
        if !(self.size > 0.0 && self.size.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "size",
                value: self.size as f64,
            });
        }
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "radius",
                value: self.radius as f64,
            });
        }
        if self.branches < 2 {
            return Err(Error::InvalidParameter {
                name: "branches",
                value: self.branches as f64,
            });
        }
        if !self.spin.is_finite() {
            return Err(Error::InvalidParameter {
                name: "spin",
                value: self.spin as f64,
            });
        }
        if !(self.randomness >= 0.0 && self.randomness.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "randomness",
                value: self.randomness as f64,
            });
        }
        if !(self.randomness_power >= 1.0 && self.randomness_power.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "randomness_power",
                value: self.randomness_power as f64,
            });
        }
        Ok(())
    }
}

/// Editable range and slider step of one parameter
#[derive(Debug, Clone)]
pub struct ParameterBounds {
    pub range: RangeInclusive<f64>,
    pub step: f64,
}

impl ParameterBounds {
    const fn new(min: f64, max: f64, step: f64) -> Self {
        Self {
            range: min..=max,
            step,
        }
    }

    /// Clamp into range, then snap to the slider step
    pub fn constrain(&self, value: f64) -> f64 {
        let (min, max) = (*self.range.start(), *self.range.end());
        let snapped = min + ((value.clamp(min, max) - min) / self.step).round() * self.step;
        snapped.clamp(min, max)
    }
}

/// Configuration surface bounds (the core does not re-validate these)
pub mod bounds {
    use super::ParameterBounds;

    pub const COUNT: ParameterBounds = ParameterBounds::new(20_000.0, 100_000.0, 100.0);
    pub const SIZE: ParameterBounds = ParameterBounds::new(0.001, 0.1, 0.001);
    pub const RADIUS: ParameterBounds = ParameterBounds::new(0.01, 20.0, 0.01);
    pub const BRANCHES: ParameterBounds = ParameterBounds::new(2.0, 20.0, 1.0);
    pub const SPIN: ParameterBounds = ParameterBounds::new(-5.0, 5.0, 0.001);
    pub const RANDOMNESS: ParameterBounds = ParameterBounds::new(0.0, 2.0, 0.001);
    pub const RANDOMNESS_POWER: ParameterBounds = ParameterBounds::new(1.0, 10.0, 0.001);
    pub const VOLUME: ParameterBounds = ParameterBounds::new(0.0, 1.0, 0.01);
}
