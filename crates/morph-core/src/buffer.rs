//! Flat, triple-packed particle position storage.
//!
//! A [`PositionBuffer`] holds `3 * N` floats for `N` particles. Slot `i` always
//! refers to the same particle, so the renderer can upload the raw bytes and
//! the morph code can address points as [`Vec3`] without copying.

use glam::Vec3;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionBuffer {
    coords: Vec<f32>,
}

impl PositionBuffer {
    /// All particles at the origin.
    pub fn zeroed(count: usize) -> Self {
        Self {
            coords: vec![0.0; count * 3],
        }
    }

    pub fn from_points(points: &[Vec3]) -> Self {
        Self {
            coords: bytemuck::cast_slice::<Vec3, f32>(points).to_vec(),
        }
    }

    /// Number of particles (not floats).
    #[inline]
    pub fn count(&self) -> usize {
        self.coords.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Flat `[x0, y0, z0, x1, ...]` view.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.coords
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.coords
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        bytemuck::cast_slice(&self.coords)
    }

    #[inline]
    pub fn points_mut(&mut self) -> &mut [Vec3] {
        bytemuck::cast_slice_mut(&mut self.coords)
    }

    /// Raw bytes for a vertex/storage buffer upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.coords)
    }

    pub fn max_abs_coord(&self) -> f32 {
        self.coords.iter().fold(0.0f32, |m, v| m.max(v.abs()))
    }

    pub fn all_finite(&self) -> bool {
        self.coords.iter().all(|v| v.is_finite())
    }
}
