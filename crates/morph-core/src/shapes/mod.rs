//! Procedural shape library.
//!
//! Every [`ShapeKind`] maps to one sampling function. Surface and lattice
//! shapes draw each point independently; attractor shapes walk a single
//! trajectory held in an [`IntegratorState`] that the caller owns, so a field
//! can keep the trajectory alive between regenerations and drop it when the
//! field is recreated.

mod attractors;
mod composite;
mod parametric;

pub use attractors::{AttractorSystem, IntegratorState};

use crate::buffer::PositionBuffer;
use crate::config::{sanitize_unit, ConfigError};
use crate::constants::FALLBACK_CUBE_HALF_EXTENT;
use glam::Vec3;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ShapeKind {
    Sphere = 0,
    GalaxySpiral = 1,
    LorenzAttractor = 2,
    MobiusStrip = 3,
    MengerSpongeApprox = 4,
    PenroseTriangleApprox = 5,
    CardioidHeart = 6,
    DnaHelix = 7,
    CubeGrid = 8,
    Torus = 9,
    KleinBottle = 10,
    VoxelGrid = 11,
    CyberFlower = 12,
    LiquidWave = 13,
    PulsingBlackHole = 14,
    AizawaAttractor = 15,
    ThomasAttractor = 16,
    CliffordAttractor = 17,
}

/// Coarse grouping the shader branches on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ShapeCategory {
    Surface = 0,
    Attractor = 1,
    Lattice = 2,
    Wave = 3,
    Singularity = 4,
}

impl ShapeKind {
    pub const COUNT: usize = 18;

    pub const fn all() -> [Self; Self::COUNT] {
        [
            Self::Sphere,
            Self::GalaxySpiral,
            Self::LorenzAttractor,
            Self::MobiusStrip,
            Self::MengerSpongeApprox,
            Self::PenroseTriangleApprox,
            Self::CardioidHeart,
            Self::DnaHelix,
            Self::CubeGrid,
            Self::Torus,
            Self::KleinBottle,
            Self::VoxelGrid,
            Self::CyberFlower,
            Self::LiquidWave,
            Self::PulsingBlackHole,
            Self::AizawaAttractor,
            Self::ThomasAttractor,
            Self::CliffordAttractor,
        ]
    }

    #[inline]
    pub const fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::all().get(id as usize).copied()
    }

    /// Kebab-case name used in configs and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::GalaxySpiral => "galaxy-spiral",
            Self::LorenzAttractor => "lorenz",
            Self::MobiusStrip => "mobius",
            Self::MengerSpongeApprox => "menger-sponge",
            Self::PenroseTriangleApprox => "penrose-triangle",
            Self::CardioidHeart => "heart",
            Self::DnaHelix => "dna",
            Self::CubeGrid => "cube-grid",
            Self::Torus => "torus",
            Self::KleinBottle => "klein-bottle",
            Self::VoxelGrid => "voxel-grid",
            Self::CyberFlower => "cyber-flower",
            Self::LiquidWave => "liquid-wave",
            Self::PulsingBlackHole => "black-hole",
            Self::AizawaAttractor => "aizawa",
            Self::ThomasAttractor => "thomas",
            Self::CliffordAttractor => "clifford",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sphere => "Sphere",
            Self::GalaxySpiral => "Galaxy Spiral",
            Self::LorenzAttractor => "Lorenz Attractor",
            Self::MobiusStrip => "Mobius Strip",
            Self::MengerSpongeApprox => "Menger Sponge",
            Self::PenroseTriangleApprox => "Penrose Triangle",
            Self::CardioidHeart => "Heart",
            Self::DnaHelix => "DNA Helix",
            Self::CubeGrid => "Cube Grid",
            Self::Torus => "Torus",
            Self::KleinBottle => "Klein Bottle",
            Self::VoxelGrid => "Voxel Grid",
            Self::CyberFlower => "Cyber Flower",
            Self::LiquidWave => "Liquid Wave",
            Self::PulsingBlackHole => "Black Hole",
            Self::AizawaAttractor => "Aizawa Attractor",
            Self::ThomasAttractor => "Thomas Attractor",
            Self::CliffordAttractor => "Clifford Attractor",
        }
    }

    pub fn category(self) -> ShapeCategory {
        match self {
            Self::LorenzAttractor
            | Self::AizawaAttractor
            | Self::ThomasAttractor
            | Self::CliffordAttractor => ShapeCategory::Attractor,
            Self::MengerSpongeApprox | Self::CubeGrid | Self::VoxelGrid => ShapeCategory::Lattice,
            Self::LiquidWave => ShapeCategory::Wave,
            Self::PulsingBlackHole => ShapeCategory::Singularity,
            _ => ShapeCategory::Surface,
        }
    }

    /// Attractor kinds need a persistent [`IntegratorState`].
    pub fn attractor(self) -> Option<AttractorSystem> {
        match self {
            Self::LorenzAttractor => Some(AttractorSystem::Lorenz),
            Self::AizawaAttractor => Some(AttractorSystem::Aizawa),
            Self::ThomasAttractor => Some(AttractorSystem::Thomas),
            Self::CliffordAttractor => Some(AttractorSystem::Halvorsen),
            _ => None,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShapeKind {
    type Err = ConfigError;

    /// Accepts the kebab-case name, the display label, or the label without
    /// spaces, ignoring case (`"torus"`, `"Lorenz Attractor"`, `"DNAHelix"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        Self::all()
            .into_iter()
            .find(|k| {
                normalize_name(k.name()) == wanted
                    || normalize_name(k.label()) == wanted
                    || normalize_name(&format!("{k:?}")) == wanted
            })
            .ok_or_else(|| ConfigError::UnknownShape(s.to_string()))
    }
}

fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Per-point sampling inputs shared by every generator.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Sample {
    pub i: usize,
    pub count: usize,
    pub chaos: f32,
}

impl Sample {
    /// Normalized index in [0, 1).
    #[inline]
    pub fn t(&self) -> f32 {
        self.i as f32 / self.count.max(1) as f32
    }
}

/// Generate `count` points of `kind` into a fresh buffer.
pub fn generate<R: Rng + ?Sized>(
    kind: ShapeKind,
    count: usize,
    chaos: f32,
    rng: &mut R,
    state: &mut IntegratorState,
) -> PositionBuffer {
    let mut out = PositionBuffer::zeroed(count);
    generate_into(&mut out, kind, chaos, rng, state);
    out
}

/// Regenerate `out` in place, keeping its particle count.
pub fn generate_into<R: Rng + ?Sized>(
    out: &mut PositionBuffer,
    kind: ShapeKind,
    chaos: f32,
    rng: &mut R,
    state: &mut IntegratorState,
) {
    let chaos = sanitize_unit(chaos);
    let count = out.count();
    if let Some(system) = kind.attractor() {
        state.adopt(system, rng);
    }
    for (i, p) in out.points_mut().iter_mut().enumerate() {
        let s = Sample { i, count, chaos };
        *p = match kind {
            ShapeKind::Sphere => parametric::sphere(s, rng),
            ShapeKind::GalaxySpiral => parametric::galaxy_spiral(s, rng),
            ShapeKind::MobiusStrip => parametric::mobius_strip(s, rng),
            ShapeKind::MengerSpongeApprox => parametric::menger_sponge(s, rng),
            ShapeKind::PenroseTriangleApprox => parametric::penrose_triangle(s, rng),
            ShapeKind::CardioidHeart => parametric::cardioid_heart(s, rng),
            ShapeKind::DnaHelix => parametric::dna_helix(s, rng),
            ShapeKind::CubeGrid => parametric::cube_grid(s, rng),
            ShapeKind::Torus => parametric::torus(s, rng),
            ShapeKind::KleinBottle => parametric::klein_bottle(s, rng),
            ShapeKind::VoxelGrid => parametric::voxel_grid(s, rng),
            ShapeKind::CyberFlower => parametric::cyber_flower(s, rng),
            ShapeKind::LiquidWave => composite::liquid_wave(s, rng),
            ShapeKind::PulsingBlackHole => composite::black_hole(s, rng),
            ShapeKind::LorenzAttractor
            | ShapeKind::AizawaAttractor
            | ShapeKind::ThomasAttractor
            | ShapeKind::CliffordAttractor => state.next_point(s, rng),
        };
    }
}

/// Uniform fill of a cube; used when a shape name or id is not recognized.
pub fn fallback_cube_into<R: Rng + ?Sized>(out: &mut PositionBuffer, rng: &mut R) {
    let h = FALLBACK_CUBE_HALF_EXTENT;
    for p in out.points_mut() {
        *p = Vec3::new(
            rng.gen_range(-h..=h),
            rng.gen_range(-h..=h),
            rng.gen_range(-h..=h),
        );
    }
}

/// Generate by config name. Unrecognized names produce the cube fill.
pub fn generate_named<R: Rng + ?Sized>(
    name: &str,
    count: usize,
    chaos: f32,
    rng: &mut R,
    state: &mut IntegratorState,
) -> PositionBuffer {
    match name.parse::<ShapeKind>() {
        Ok(kind) => generate(kind, count, chaos, rng, state),
        Err(_) => {
            log::debug!("[shapes] unknown shape {:?}, using cube fill", name);
            let mut out = PositionBuffer::zeroed(count);
            fallback_cube_into(&mut out, rng);
            out
        }
    }
}

/// Generate by numeric id (the value a shader or preset table carries).
/// Out-of-range ids produce the cube fill.
pub fn generate_by_id<R: Rng + ?Sized>(
    id: u32,
    count: usize,
    chaos: f32,
    rng: &mut R,
    state: &mut IntegratorState,
) -> PositionBuffer {
    match ShapeKind::from_id(id) {
        Some(kind) => generate(kind, count, chaos, rng, state),
        None => {
            let mut out = PositionBuffer::zeroed(count);
            fallback_cube_into(&mut out, rng);
            out
        }
    }
}
