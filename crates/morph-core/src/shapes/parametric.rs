//! Closed-form surfaces, volumes and lattices.
//!
//! Each function maps one particle to a point using a few independent draws
//! and/or its normalized index. Shapes are sized to roughly a 30 unit
//! bounding box so the renderer can keep one camera for all of them.

use super::Sample;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};

pub(crate) const SPHERE_RADIUS: f32 = 10.0;
pub(crate) const SPHERE_CHAOS_SPREAD: f32 = 5.0;
pub(crate) const TORUS_MAJOR_RADIUS: f32 = 15.0;
pub(crate) const TORUS_MINOR_RADIUS: f32 = 5.0;

const MENGER_HALF_EXTENT: f32 = 13.5;
const MENGER_LEVELS: u32 = 3;
const CUBE_GRID_HALF_EXTENT: f32 = 12.0;
const CUBE_GRID_CELL: f32 = 2.0;
const VOXEL_RADIUS: f32 = 14.0;
const VOXEL_CELL: f32 = 2.0;

#[inline]
fn signed<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>() * 2.0 - 1.0
}

/// Uniform direction on the unit sphere.
#[inline]
pub(crate) fn unit_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let z = signed(rng);
    let phi = rng.gen::<f32>() * TAU;
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Per-axis noise in `[-amount, amount]`.
#[inline]
pub(crate) fn jitter<R: Rng + ?Sized>(rng: &mut R, amount: f32) -> Vec3 {
    if amount <= 0.0 {
        return Vec3::ZERO;
    }
    Vec3::new(signed(rng), signed(rng), signed(rng)) * amount
}

#[inline]
pub(crate) fn snap(p: Vec3, cell: f32) -> Vec3 {
    (p / cell).round() * cell
}

/// Snap to the lattice unless a chaos-weighted coin says to leave the point
/// soft. Chaos 0 always snaps.
#[inline]
fn maybe_snap<R: Rng + ?Sized>(p: Vec3, cell: f32, chaos: f32, rng: &mut R) -> Vec3 {
    if rng.gen::<f32>() < chaos {
        p + jitter(rng, cell * 0.25 * chaos)
    } else {
        snap(p, cell)
    }
}

pub(crate) fn sphere<R: Rng + ?Sized>(s: Sample, rng: &mut R) -> Vec3 {
    let r = SPHERE_RADIUS + rng.gen::<f32>() * s.chaos * SPHERE_CHAOS_SPREAD;
    unit_direction(rng) * r
}

pub(crate) fn galaxy_spiral<R: Rng + ?Sized>(s: Sample, rng: &mut R) -> Vec3 {
    const ARMS: usize = 3;
    let arm = (s.i % ARMS) as f32;
    let radius = 1.5 + 20.0 * rng.gen::<f32>().powf(0.7);
    let spread = signed(rng) * (0.25 + s.chaos * 0.6);
    let angle = arm * TAU / ARMS as f32 + radius * 0.32 + spread;
    let thickness = (1.0 - radius / 22.0).max(0.15) * (1.5 + s.chaos * 2.5);
    Vec3::new(
        radius * angle.cos(),
        signed(rng) * thickness,
        radius * angle.sin(),
    )
}

pub(crate) fn mobius_strip<R: Rng + ?Sized>(s: Sample, rng: &mut R) -> Vec3 {
    const RADIUS: f32 = 12.0;
    const HALF_WIDTH: f32 = 4.0;
    let u = rng.gen::<f32>() * TAU;
    let v = signed(rng) * HALF_WIDTH;
    let half = u * 0.5;
    let ring = RADIUS + v * half.cos();
    Vec3::new(ring * u.cos(), v * half.sin(), ring * u.sin()) + jitter(rng, s.chaos * 0.8)
}

/// Picks one of the 20 surviving sub-cubes per level, then snaps to the
/// finest cell centre.
pub(crate) fn menger_sponge<R: Rng + ?Sized>(s: Sample, rng: &mut R) -> Vec3 {
    let mut cell = Vec3::ZERO;
    for _ in 0..MENGER_LEVELS {
        let digits = loop {
            let d = [rng.gen_range(0..3u8), rng.gen_range(0..3u8), rng.gen_range(0..3u8)];
            if d.iter().filter(|&&v| v == 1).count() <= 1 {
                break d;
            }
        };
        cell = cell * 3.0 + Vec3::new(digits[0] as f32, digits[1] as f32, digits[2] as f32);
    }
    let cells = 3u32.pow(MENGER_LEVELS) as f32;
    let cell_size = MENGER_HALF_EXTENT * 2.0 / cells;
    let centre = (cell + Vec3::splat(0.5)) * cell_size - Vec3::splat(MENGER_HALF_EXTENT);
    if rng.gen::<f32>() < s.chaos {
        // Soft look: anywhere inside the surviving cell.
        centre + jitter(rng, cell_size * 0.5)
    } else {
        centre
    }
}

/// Three square beams chained along +x, +y, +z. Seen along the (1, 1, 1)
/// diagonal the free ends overlap and the frame closes into the impossible
/// triangle.
pub(crate) fn penrose_triangle<R: Rng + ?Sized>(s: Sample, rng: &mut R) -> Vec3 {
    const LENGTH: f32 = 20.0;
    const HALF_THICK: f32 = 1.5;
    let along = rng.gen::<f32>() * LENGTH;
    let a = signed(rng) * HALF_THICK;
    let b = signed(rng) * HALF_THICK;
    let p = match s.i % 3 {
        0 => Vec3::new(along, a, b),
        1 => Vec3::new(LENGTH + a, along, b),
        _ => Vec3::new(LENGTH + a, LENGTH + b, along),
    };
    p - Vec3::splat(LENGTH * 0.5) + jitter(rng, s.chaos * 0.6)
}

pub(crate) fn cardioid_heart<R: Rng + ?Sized>(s: Sample, rng: &mut R) -> Vec3 {
    const SCALE: f32 = 0.75;
    let t = rng.gen::<f32>() * TAU;
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    // Filled interior, thicker in the middle.
    let fill = rng.gen::<f32>().sqrt();
    let depth = signed(rng) * 4.0 * (1.0 - fill * 0.7);
    Vec3::new(x * fill * SCALE, y * fill * SCALE, depth) + jitter(rng, s.chaos * 0.7)
}

pub(crate) fn dna_helix<R: Rng + ?Sized>(s: Sample, rng: &mut R) -> Vec3 {
    const TURNS: f32 = 4.0;
    const HEIGHT: f32 = 40.0;
    const RADIUS: f32 = 6.0;
    const RUNG_SHARE: f32 = 0.2;
    let t = s.t();
    let angle = t * TAU * TURNS;
    let y = (t - 0.5) * HEIGHT;
    let strand_a = Vec3::new(RADIUS * angle.cos(), y, RADIUS * angle.sin());
    let strand_b = Vec3::new(-RADIUS * angle.cos(), y, -RADIUS * angle.sin());
    let p = if rng.gen::<f32>() < RUNG_SHARE {
        strand_a.lerp(strand_b, rng.gen::<f32>())
    } else if s.i % 2 == 0 {
        strand_a
    } else {
        strand_b
    };
    p + jitter(rng, 0.15 + s.chaos * 0.8)
}

/// Shell of a cube with every face quantized to the grid.
pub(crate) fn cube_grid<R: Rng + ?Sized>(s: Sample, rng: &mut R) -> Vec3 {
    let h = CUBE_GRID_HALF_EXTENT;
    let u = signed(rng) * h;
    let v = signed(rng) * h;
    let p = match rng.gen_range(0..6u8) {
        0 => Vec3::new(h, u, v),
        1 => Vec3::new(-h, u, v),
        2 => Vec3::new(u, h, v),
        3 => Vec3::new(u, -h, v),
        4 => Vec3::new(u, v, h),
        _ => Vec3::new(u, v, -h),
    };
    maybe_snap(p, CUBE_GRID_CELL, s.chaos, rng)
}

pub(crate) fn torus<R: Rng + ?Sized>(s: Sample, rng: &mut R) -> Vec3 {
    let u = rng.gen::<f32>() * TAU;
    let v = rng.gen::<f32>() * TAU;
    // Chaos pulls points inward from the tube surface, never past it.
    let minor = TORUS_MINOR_RADIUS * (1.0 - s.chaos * rng.gen::<f32>() * 0.6);
    let ring = TORUS_MAJOR_RADIUS + minor * v.cos();
    Vec3::new(ring * u.cos(), minor * v.sin(), ring * u.sin())
}

/// Figure-eight immersion of the Klein bottle.
pub(crate) fn klein_bottle<R: Rng + ?Sized>(s: Sample, rng: &mut R) -> Vec3 {
    const A: f32 = 3.0;
    const SCALE: f32 = 3.0;
    let u = rng.gen::<f32>() * TAU;
    let v = rng.gen::<f32>() * TAU;
    let (hs, hc) = (u * 0.5).sin_cos();
    let w = A + hc * v.sin() - hs * (2.0 * v).sin();
    let p = Vec3::new(w * u.cos(), hs * v.sin() + hc * (2.0 * v).sin(), w * u.sin());
    p * SCALE + jitter(rng, s.chaos * 0.6)
}

/// Voxelized ball.
pub(crate) fn voxel_grid<R: Rng + ?Sized>(s: Sample, rng: &mut R) -> Vec3 {
    let r = VOXEL_RADIUS * rng.gen::<f32>().cbrt();
    maybe_snap(unit_direction(rng) * r, VOXEL_CELL, s.chaos, rng)
}

/// Layered rose curves: `r = R |cos(k θ)|`, each layer cupped upward.
pub(crate) fn cyber_flower<R: Rng + ?Sized>(s: Sample, rng: &mut R) -> Vec3 {
    const RADIUS: f32 = 14.0;
    const LAYERS: [(f32, f32, f32); 3] = [(5.0, 1.0, 0.0), (3.0, 0.7, PI / 5.0), (8.0, 0.4, PI / 9.0)];
    let (k, scale, twist) = LAYERS[s.i % LAYERS.len()];
    let theta = rng.gen::<f32>() * TAU;
    let petal = (k * theta).cos().abs();
    let r = RADIUS * scale * petal * rng.gen::<f32>().sqrt();
    let norm = r / RADIUS;
    let y = norm * norm * 8.0 - 3.0 + signed(rng) * (0.2 + s.chaos * 1.5);
    let a = theta + twist;
    Vec3::new(r * a.cos(), y, r * a.sin())
}
