//! Renderer-facing per-frame state.
//!
//! These types avoid any GPU API so both a web and a native front-end can
//! upload them as-is. [`FrameUniforms`] is plain-old-data laid out in 16-byte
//! rows to match a WGSL uniform block.

use crate::constants::COLOR_SMOOTHING_RATE;
use crate::shapes::ShapeKind;
use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    /// Primary, secondary, highlight; alpha unused.
    pub colors: [[f32; 4]; 3],
    pub interaction: [f32; 2],
    pub interaction_strength: f32,
    pub grip: f32,
    /// Animation clock, already scaled by the config speed.
    pub time: f32,
    pub beat: f32,
    pub treble: f32,
    pub energy: f32,
    pub shape_id: u32,
    pub shape_category: u32,
    pub background_shape_id: u32,
    pub _pad: u32,
}

impl FrameUniforms {
    pub fn shape(&self) -> Option<ShapeKind> {
        ShapeKind::from_id(self.shape_id)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Eases the uniform palette toward the configured one so a new track fades
/// its colors in instead of cutting.
#[derive(Clone, Debug)]
pub struct ColorSmoother {
    current: [Vec3; 3],
    rate: f32,
}

impl ColorSmoother {
    pub fn new(initial: [Vec3; 3]) -> Self {
        Self {
            current: initial,
            rate: COLOR_SMOOTHING_RATE,
        }
    }

    pub fn current(&self) -> [Vec3; 3] {
        self.current
    }

    pub fn update(&mut self, target: &[Vec3; 3], dt_sec: f32) -> [Vec3; 3] {
        let a = (1.0 - (-self.rate * dt_sec.max(0.0)).exp()).clamp(0.0, 1.0);
        for (c, t) in self.current.iter_mut().zip(target) {
            *c = c.lerp(*t, a);
        }
        self.current
    }

    pub fn as_rows(&self) -> [[f32; 4]; 3] {
        self.current.map(|c| c.extend(1.0).to_array())
    }
}
