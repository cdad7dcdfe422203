//! Strange attractors sampled by explicit Euler integration.
//!
//! Consecutive particles are consecutive integration steps, so the cloud is
//! made of trails. Every `segment_len` particles the state gets a small kick,
//! which splits one endless curve into many short trails and fills the
//! attractor's volume.

use super::parametric::jitter;
use super::Sample;
use glam::Vec3;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttractorSystem {
    Lorenz,
    Aizawa,
    Thomas,
    /// Cyclically symmetric quadratic system (Halvorsen); exposed as the
    /// "Clifford" shape.
    Halvorsen,
}

struct Tuning {
    dt: f32,
    substeps: u32,
    segment_len: usize,
    seed: Vec3,
    centre: Vec3,
    scale: f32,
    kick: f32,
    bound: f32,
}

impl AttractorSystem {
    fn tuning(self) -> Tuning {
        match self {
            Self::Lorenz => Tuning {
                dt: 0.005,
                substeps: 2,
                segment_len: 1000,
                seed: Vec3::new(0.1, 0.0, 0.0),
                centre: Vec3::new(0.0, 0.0, 25.0),
                scale: 0.6,
                kick: 0.5,
                bound: 120.0,
            },
            Self::Aizawa => Tuning {
                dt: 0.01,
                substeps: 2,
                segment_len: 500,
                seed: Vec3::new(0.1, 0.0, 0.0),
                centre: Vec3::new(0.0, 0.0, 0.5),
                scale: 9.0,
                kick: 0.05,
                bound: 10.0,
            },
            Self::Thomas => Tuning {
                dt: 0.05,
                substeps: 2,
                segment_len: 500,
                seed: Vec3::new(0.1, 0.0, 0.0),
                centre: Vec3::ZERO,
                scale: 3.2,
                kick: 0.1,
                bound: 20.0,
            },
            Self::Halvorsen => Tuning {
                dt: 0.005,
                substeps: 2,
                segment_len: 1000,
                seed: Vec3::new(-1.48, -1.51, 2.04),
                centre: Vec3::splat(-2.0),
                scale: 1.6,
                kick: 0.2,
                bound: 40.0,
            },
        }
    }

    /// Time derivative of the system at `p`.
    pub fn derivative(self, p: Vec3) -> Vec3 {
        let Vec3 { x, y, z } = p;
        match self {
            Self::Lorenz => {
                const SIGMA: f32 = 10.0;
                const RHO: f32 = 28.0;
                const BETA: f32 = 8.0 / 3.0;
                Vec3::new(SIGMA * (y - x), x * (RHO - z) - y, x * y - BETA * z)
            }
            Self::Aizawa => {
                const A: f32 = 0.95;
                const B: f32 = 0.7;
                const C: f32 = 0.6;
                const D: f32 = 3.5;
                const E: f32 = 0.25;
                const F: f32 = 0.1;
                Vec3::new(
                    (z - B) * x - D * y,
                    D * x + (z - B) * y,
                    C + A * z - z * z * z / 3.0 - (x * x + y * y) * (1.0 + E * z)
                        + F * z * x * x * x,
                )
            }
            Self::Thomas => {
                const B: f32 = 0.208186;
                Vec3::new(y.sin() - B * x, z.sin() - B * y, x.sin() - B * z)
            }
            Self::Halvorsen => {
                const A: f32 = 1.89;
                Vec3::new(
                    -A * x - 4.0 * y - 4.0 * z - y * y,
                    -A * y - 4.0 * z - 4.0 * x - z * z,
                    -A * z - 4.0 * x - 4.0 * y - x * x,
                )
            }
        }
    }

    pub fn segment_len(self) -> usize {
        self.tuning().segment_len
    }
}

/// Steps taken on adoption so the first trail starts on the attractor rather
/// than on the transient leading into it.
const WARMUP_STEPS: u32 = 600;

/// Continuation state for attractor shapes, owned by the particle field.
#[derive(Clone, Debug, Default)]
pub struct IntegratorState {
    point: Vec3,
    system: Option<AttractorSystem>,
}

impl IntegratorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget any trajectory. Called when the owning field is recreated.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn system(&self) -> Option<AttractorSystem> {
        self.system
    }

    /// Raw integrator coordinates (not scaled to scene space).
    pub fn point(&self) -> Vec3 {
        self.point
    }

    /// Keep the trajectory if `system` already owns it, otherwise reseed and
    /// warm up on the new system.
    pub fn adopt<R: Rng + ?Sized>(&mut self, system: AttractorSystem, rng: &mut R) {
        if self.system == Some(system) {
            return;
        }
        let tuning = system.tuning();
        self.system = Some(system);
        self.point = tuning.seed + jitter(rng, tuning.kick);
        for _ in 0..WARMUP_STEPS {
            self.advance(system, &tuning);
        }
        if !self.in_bounds(&tuning) {
            self.point = tuning.seed;
        }
    }

    /// Advance one particle's worth of integration and return its scene-space
    /// position. Does nothing useful until [`adopt`](Self::adopt) has run.
    pub(crate) fn next_point<R: Rng + ?Sized>(&mut self, s: Sample, rng: &mut R) -> Vec3 {
        let Some(system) = self.system else {
            return Vec3::ZERO;
        };
        let tuning = system.tuning();
        if s.i > 0 && s.i % tuning.segment_len == 0 {
            self.point += jitter(rng, tuning.kick * (1.0 + s.chaos));
        }
        for _ in 0..tuning.substeps {
            self.advance(system, &tuning);
        }
        if !self.in_bounds(&tuning) {
            self.point = tuning.seed + jitter(rng, tuning.kick);
        }
        (self.point - tuning.centre) * tuning.scale + jitter(rng, s.chaos * 0.4)
    }

    #[inline]
    fn advance(&mut self, system: AttractorSystem, tuning: &Tuning) {
        self.point += system.derivative(self.point) * tuning.dt;
    }

    #[inline]
    fn in_bounds(&self, tuning: &Tuning) -> bool {
        self.point.is_finite() && self.point.abs().max_element() <= tuning.bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn adopting_same_system_keeps_trajectory() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = IntegratorState::new();
        state.adopt(AttractorSystem::Lorenz, &mut rng);
        let before = state.point();
        state.adopt(AttractorSystem::Lorenz, &mut rng);
        assert_eq!(before, state.point());
    }

    #[test]
    fn adopting_other_system_reseeds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = IntegratorState::new();
        state.adopt(AttractorSystem::Lorenz, &mut rng);
        state.adopt(AttractorSystem::Thomas, &mut rng);
        assert_eq!(state.system(), Some(AttractorSystem::Thomas));
        assert!(state.point().abs().max_element() < 20.0);
    }

    #[test]
    fn reset_forgets_system() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = IntegratorState::new();
        state.adopt(AttractorSystem::Aizawa, &mut rng);
        state.reset();
        assert_eq!(state.system(), None);
        assert_eq!(state.point(), Vec3::ZERO);
    }

    #[test]
    fn segment_lengths_match_variant() {
        assert_eq!(AttractorSystem::Lorenz.segment_len(), 1000);
        assert_eq!(AttractorSystem::Halvorsen.segment_len(), 1000);
        assert_eq!(AttractorSystem::Aizawa.segment_len(), 500);
        assert_eq!(AttractorSystem::Thomas.segment_len(), 500);
    }
}
