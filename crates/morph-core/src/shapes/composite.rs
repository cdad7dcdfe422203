//! Shapes built from more than one region or laid out for the renderer to
//! animate further.

use super::parametric::{jitter, unit_direction};
use super::Sample;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

pub(crate) const EVENT_HORIZON_RADIUS: f32 = 3.0;
pub(crate) const EVENT_HORIZON_SHARE: f32 = 0.2;
pub(crate) const DISK_INNER_RADIUS: f32 = 4.5;
pub(crate) const DISK_OUTER_RADIUS: f32 = 22.0;
const WAVE_EXTENT: f32 = 40.0;

/// Flat square grid in XZ. Height stays 0; the vertex shader makes the waves.
pub(crate) fn liquid_wave<R: Rng + ?Sized>(s: Sample, rng: &mut R) -> Vec3 {
    let side = (s.count as f32).sqrt().ceil().max(1.0) as usize;
    let spacing = WAVE_EXTENT / side as f32;
    let gx = (s.i % side) as f32;
    let gz = (s.i / side) as f32;
    let scatter = spacing * (0.15 + s.chaos * 0.6);
    let x = (gx + 0.5) * spacing - WAVE_EXTENT * 0.5 + (rng.gen::<f32>() - 0.5) * scatter;
    let z = (gz + 0.5) * spacing - WAVE_EXTENT * 0.5 + (rng.gen::<f32>() - 0.5) * scatter;
    Vec3::new(x, 0.0, z)
}

/// First fifth of the slots fill the event horizon; the rest orbit in a disk
/// that thins and twists with distance.
pub(crate) fn black_hole<R: Rng + ?Sized>(s: Sample, rng: &mut R) -> Vec3 {
    if (s.i as f32) < s.count as f32 * EVENT_HORIZON_SHARE {
        let r = EVENT_HORIZON_RADIUS * rng.gen::<f32>().cbrt();
        return unit_direction(rng) * r;
    }
    let span = DISK_OUTER_RADIUS - DISK_INNER_RADIUS;
    let radius = DISK_INNER_RADIUS + span * rng.gen::<f32>().powf(1.5);
    let twist = radius * 0.28;
    let theta = rng.gen::<f32>() * TAU + twist;
    let thickness = (6.0 / radius) * (1.0 + s.chaos);
    let y = (rng.gen::<f32>() * 2.0 - 1.0) * thickness;
    Vec3::new(radius * theta.cos(), y, radius * theta.sin()) + jitter(rng, s.chaos * 0.3)
}
