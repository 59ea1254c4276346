//! Galaxy particle data and procedural generation.

mod generator;
mod random;

// Re-export public types
pub use generator::generate;
pub use random::{RandomSource, RngSource};

#[cfg(test)]
pub use random::ScriptedRandom;

use crate::error::{Error, Result};

/// Per-particle attributes read by the renderer.
///
/// Positions and colors are stored as triplets so both arrays can be handed
/// to the GPU as flat `f32` slices. Each attribute carries its own dirty flag.
#[derive(Debug, Clone, Default)]
pub struct ParticleBuffer {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    positions_dirty: bool,
    colors_dirty: bool,
}

/// Which attributes changed since the renderer last uploaded them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirtyAttributes {
    pub positions: bool,
    pub colors: bool,
}

impl ParticleBuffer {
    /// Create a buffer from matching position and color arrays.
    /// Freshly created buffers are dirty.
    ///
    /// # Errors
    /// Returns `Error::AttributeMismatch` when the arrays differ in length.
    pub fn new(positions: Vec<[f32; 3]>, colors: Vec<[f32; 3]>) -> Result<Self> {
        if positions.len() != colors.len() {
            return Err(Error::AttributeMismatch {
                positions: positions.len(),
                colors: colors.len(),
            });
        }
        Ok(Self {
            positions,
            colors,
            positions_dirty: true,
            colors_dirty: true,
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Flat `[x0, y0, z0, x1, ...]` view of the positions
    pub fn flat_positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Flat `[r0, g0, b0, r1, ...]` view of the colors
    pub fn flat_colors(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    pub fn mark_positions_dirty(&mut self) {
        self.positions_dirty = true;
    }

    pub fn mark_colors_dirty(&mut self) {
        self.colors_dirty = true;
    }

    pub fn dirty(&self) -> DirtyAttributes {
        DirtyAttributes {
            positions: self.positions_dirty,
            colors: self.colors_dirty,
        }
    }

    /// Return and clear the dirty flags (called after upload)
    pub fn take_dirty(&mut self) -> DirtyAttributes {
        let dirty = self.dirty();
        self.positions_dirty = false;
        self.colors_dirty = false;
        dirty
    }
}

/// Positions captured right after generation, used to restore particles
/// after a vibration burst.
#[derive(Debug, Clone, PartialEq)]
pub struct RestPositions(Vec<[f32; 3]>);

impl RestPositions {
    pub fn snapshot(buffer: &ParticleBuffer) -> Self {
        Self(buffer.positions.clone())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[[f32; 3]] {
        &self.0
    }

    /// Whether this snapshot can serve as the baseline for `buffer`
    pub fn matches(&self, buffer: &ParticleBuffer) -> bool {
        self.0.len() == buffer.len()
    }
}
