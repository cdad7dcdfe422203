//! Shape selection over time.
//!
//! The controller owns the target buffer and decides once per tick whether to
//! replace it. After a transition it stays [`MorphPhase::Stable`] for the
//! cooldown window, then becomes [`MorphPhase::Eligible`] and fires on the
//! first loud moment, or unconditionally once the force-switch window runs
//! out.

use crate::buffer::PositionBuffer;
use crate::config::{sanitize_unit, ConfigError, VisualConfig};
use crate::constants::{
    BACKGROUND_COOLDOWN_SEC, BACKGROUND_FORCE_SWITCH_SEC, CHAOS_ENERGY_GAIN,
    PRIMARY_COOLDOWN_SEC, PRIMARY_FORCE_SWITCH_SEC, SWITCH_ENERGY_THRESHOLD,
};
use crate::shapes::{generate_into, IntegratorState, ShapeKind};
use rand::Rng;
use smallvec::SmallVec;

#[derive(Clone, Debug, PartialEq)]
pub struct MorphPolicy {
    pub cooldown_sec: f64,
    pub force_switch_sec: f64,
    pub energy_threshold: f32,
    pub chaos_energy_gain: f32,
}

impl Default for MorphPolicy {
    fn default() -> Self {
        Self::primary()
    }
}

impl MorphPolicy {
    /// Cadence for the main field.
    pub fn primary() -> Self {
        Self {
            cooldown_sec: PRIMARY_COOLDOWN_SEC,
            force_switch_sec: PRIMARY_FORCE_SWITCH_SEC,
            energy_threshold: SWITCH_ENERGY_THRESHOLD,
            chaos_energy_gain: CHAOS_ENERGY_GAIN,
        }
    }

    /// Slightly quicker cadence for the background field.
    pub fn background() -> Self {
        Self {
            cooldown_sec: BACKGROUND_COOLDOWN_SEC,
            force_switch_sec: BACKGROUND_FORCE_SWITCH_SEC,
            ..Self::primary()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("cooldown", self.cooldown_sec),
            ("force switch", self.force_switch_sec),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDuration { name, value });
            }
        }
        if self.cooldown_sec > self.force_switch_sec {
            return Err(ConfigError::CooldownAfterForceSwitch {
                cooldown: self.cooldown_sec,
                force_switch: self.force_switch_sec,
            });
        }
        for (name, value) in [
            ("energy threshold", self.energy_threshold),
            ("chaos energy gain", self.chaos_energy_gain),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfUnitRange { name, value });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorphPhase {
    /// Cooling down after a transition.
    Stable,
    /// May transition on the next loud tick.
    Eligible,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionCause {
    Energy,
    ForceSwitch,
    Config,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub from: ShapeKind,
    pub to: ShapeKind,
    pub chaos: f32,
    pub cause: TransitionCause,
}

/// Everything the controller mutates, replaced as a unit on each transition.
#[derive(Clone, Debug)]
pub struct MorphState {
    pub current_shape: ShapeKind,
    pub target: PositionBuffer,
    pub last_transition_time: f64,
}

#[derive(Clone, Debug)]
pub struct MorphController {
    policy: MorphPolicy,
    state: MorphState,
}

impl MorphController {
    /// Start on `initial` with a freshly generated target of `count` points.
    pub fn new<R: Rng + ?Sized>(
        policy: MorphPolicy,
        initial: ShapeKind,
        count: usize,
        chaos: f32,
        now_sec: f64,
        rng: &mut R,
        integrator: &mut IntegratorState,
    ) -> Self {
        let mut target = PositionBuffer::zeroed(count);
        generate_into(&mut target, initial, chaos, rng, integrator);
        Self {
            policy,
            state: MorphState {
                current_shape: initial,
                target,
                last_transition_time: if now_sec.is_finite() { now_sec } else { 0.0 },
            },
        }
    }

    pub fn policy(&self) -> &MorphPolicy {
        &self.policy
    }

    pub fn set_policy(&mut self, policy: MorphPolicy) {
        self.policy = policy;
    }

    pub fn state(&self) -> &MorphState {
        &self.state
    }

    pub fn current_shape(&self) -> ShapeKind {
        self.state.current_shape
    }

    pub fn target(&self) -> &PositionBuffer {
        &self.state.target
    }

    pub fn last_transition_time(&self) -> f64 {
        self.state.last_transition_time
    }

    /// Seconds since the last transition; a clock that went backwards reads
    /// as zero.
    pub fn since_transition(&self, now_sec: f64) -> f64 {
        let now = if now_sec.is_finite() { now_sec } else { 0.0 };
        (now - self.state.last_transition_time).max(0.0)
    }

    pub fn phase(&self, now_sec: f64) -> MorphPhase {
        if self.since_transition(now_sec) >= self.policy.cooldown_sec {
            MorphPhase::Eligible
        } else {
            MorphPhase::Stable
        }
    }

    /// Per-tick decision. Returns the transition if one fired.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        now_sec: f64,
        energy: f32,
        config: &VisualConfig,
        rng: &mut R,
        integrator: &mut IntegratorState,
    ) -> Option<Transition> {
        let energy = sanitize_unit(energy);
        if self.phase(now_sec) == MorphPhase::Stable {
            return None;
        }
        let cause = if energy > self.policy.energy_threshold {
            TransitionCause::Energy
        } else if self.since_transition(now_sec) >= self.policy.force_switch_sec {
            TransitionCause::ForceSwitch
        } else {
            return None;
        };
        let next = pick_other(self.state.current_shape, rng);
        let chaos = (sanitize_unit(config.chaos) + energy * self.policy.chaos_energy_gain).min(1.0);
        Some(self.transition(next, chaos, cause, now_sec, rng, integrator))
    }

    /// New config from the presentation layer: jump to its shape now and
    /// restart the cooldown.
    pub fn set_config<R: Rng + ?Sized>(
        &mut self,
        config: &VisualConfig,
        now_sec: f64,
        rng: &mut R,
        integrator: &mut IntegratorState,
    ) -> Transition {
        let chaos = sanitize_unit(config.chaos);
        self.transition(
            config.shape,
            chaos,
            TransitionCause::Config,
            now_sec,
            rng,
            integrator,
        )
    }

    fn transition<R: Rng + ?Sized>(
        &mut self,
        to: ShapeKind,
        chaos: f32,
        cause: TransitionCause,
        now_sec: f64,
        rng: &mut R,
        integrator: &mut IntegratorState,
    ) -> Transition {
        let from = self.state.current_shape;
        generate_into(&mut self.state.target, to, chaos, rng, integrator);
        self.state.current_shape = to;
        if now_sec.is_finite() {
            self.state.last_transition_time = now_sec;
        }
        Transition {
            from,
            to,
            chaos,
            cause,
        }
    }
}

/// Uniform choice among every kind except `current`.
pub fn pick_other<R: Rng + ?Sized>(current: ShapeKind, rng: &mut R) -> ShapeKind {
    let candidates: SmallVec<[ShapeKind; ShapeKind::COUNT]> = ShapeKind::all()
        .into_iter()
        .filter(|&k| k != current)
        .collect();
    candidates[rng.gen_range(0..candidates.len())]
}
