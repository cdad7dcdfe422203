//! Per-tick easing of rendered positions toward the target shape.

use crate::buffer::PositionBuffer;
use crate::config::{finite_or_zero, sanitize_unit};
use crate::constants::{
    BURST_ENERGY_THRESHOLD, BURST_JITTER_SCALE, MORPH_BASE_RATE, MORPH_ENERGY_RATE,
};
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct IntegratorParams {
    /// Approach rate (per second) in silence.
    pub base_rate: f32,
    /// Extra rate at full energy.
    pub energy_rate: f32,
    pub burst_threshold: f32,
    pub burst_scale: f32,
}

impl Default for IntegratorParams {
    fn default() -> Self {
        Self {
            base_rate: MORPH_BASE_RATE,
            energy_rate: MORPH_ENERGY_RATE,
            burst_threshold: BURST_ENERGY_THRESHOLD,
            burst_scale: BURST_JITTER_SCALE,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParticleIntegrator {
    pub params: IntegratorParams,
}

impl ParticleIntegrator {
    pub fn new(params: IntegratorParams) -> Self {
        Self { params }
    }

    /// Share of the remaining distance covered this tick, in [0, 1].
    pub fn blend_factor(&self, energy: f32, speed: f32, dt_sec: f32) -> f32 {
        let energy = sanitize_unit(energy);
        let speed = finite_or_zero(speed).max(0.0);
        let dt_sec = finite_or_zero(dt_sec).max(0.0);
        let rate = (self.params.base_rate + energy * self.params.energy_rate) * speed;
        (1.0 - (-rate * dt_sec).exp()).clamp(0.0, 1.0)
    }

    /// Ease `current` toward `target`, then scatter it on loud transients.
    /// With `suspend_morph` set (strong grip) only the burst is applied.
    #[allow(clippy::too_many_arguments)]
    pub fn step<R: Rng + ?Sized>(
        &self,
        current: &mut PositionBuffer,
        target: &PositionBuffer,
        energy: f32,
        speed: f32,
        dt_sec: f32,
        suspend_morph: bool,
        rng: &mut R,
    ) {
        let energy = sanitize_unit(energy);
        if !suspend_morph {
            let alpha = self.blend_factor(energy, speed, dt_sec);
            if alpha > 0.0 {
                for (c, t) in current.points_mut().iter_mut().zip(target.points()) {
                    *c += (*t - *c) * alpha;
                }
            }
        }
        if energy > self.params.burst_threshold {
            let amount = energy * self.params.burst_scale;
            for v in current.as_mut_slice() {
                *v += (rng.gen::<f32>() * 2.0 - 1.0) * amount;
            }
        }
    }
}
