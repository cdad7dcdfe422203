//! Two-hand gesture modulation.
//!
//! The primary hand squeezes or spreads the field (grip), the secondary hand
//! points at a spot the renderer ripples around. Raw tracking values are
//! noisy and arrive at camera rate, so both outputs are eased exponentially.

use crate::config::{finite_or_zero, sanitize_unit};
use crate::constants::{
    GRIP_SMOOTHING_RATE, INTERACTION_SMOOTHING_RATE, SCENE_HALF_EXTENT,
    STRONG_IMPLOSION_THRESHOLD,
};
use glam::Vec2;

/// One tracked hand, as reported by the capture subsystem.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandState {
    pub active: bool,
    pub is_fist: bool,
    /// How firmly the gesture is held, in [0, 1].
    pub strength: f32,
    /// Normalized screen coordinates, origin top-left.
    pub x: f32,
    pub y: f32,
}

impl HandState {
    pub fn fist(strength: f32) -> Self {
        Self {
            active: true,
            is_fist: true,
            strength,
            x: 0.5,
            y: 0.5,
        }
    }

    pub fn open(strength: f32) -> Self {
        Self {
            active: true,
            is_fist: false,
            strength,
            x: 0.5,
            y: 0.5,
        }
    }

    pub fn pointing(x: f32, y: f32) -> Self {
        Self {
            active: true,
            is_fist: false,
            strength: 1.0,
            x,
            y,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureState {
    /// Deform control.
    pub primary: HandState,
    /// Spatial interaction.
    pub secondary: HandState,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GestureParams {
    pub grip_rate: f32,
    pub interaction_rate: f32,
    pub strong_implosion_threshold: f32,
    pub scene_half_extent: Vec2,
}

impl Default for GestureParams {
    fn default() -> Self {
        Self {
            grip_rate: GRIP_SMOOTHING_RATE,
            interaction_rate: INTERACTION_SMOOTHING_RATE,
            strong_implosion_threshold: STRONG_IMPLOSION_THRESHOLD,
            scene_half_extent: Vec2::from(SCENE_HALF_EXTENT),
        }
    }
}

/// Smoothed outputs for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureControls {
    /// Positive implodes toward the centre, negative explodes outward.
    pub grip: f32,
    /// Scene-space ripple origin.
    pub interaction: Vec2,
    /// 1 while the secondary hand is tracked, easing to 0 after it is lost.
    pub interaction_strength: f32,
    /// Strong grip overrides the ambient morph this tick.
    pub suspend_morph: bool,
}

#[derive(Clone, Debug, Default)]
pub struct GestureModulator {
    params: GestureParams,
    grip: f32,
    interaction: Vec2,
    interaction_strength: f32,
    interaction_seen: bool,
}

impl GestureModulator {
    pub fn new(params: GestureParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    pub fn grip(&self) -> f32 {
        self.grip
    }

    /// Map normalized screen coordinates to scene space (y up).
    pub fn to_scene(&self, x: f32, y: f32) -> Vec2 {
        let x = sanitize_unit(x);
        let y = sanitize_unit(y);
        Vec2::new((x - 0.5) * 2.0, (0.5 - y) * 2.0) * self.params.scene_half_extent
    }

    pub fn update(&mut self, gesture: &GestureState, dt_sec: f32) -> GestureControls {
        let dt_sec = finite_or_zero(dt_sec).max(0.0);

        let hand = &gesture.primary;
        let grip_target = if hand.active {
            let strength = sanitize_unit(hand.strength);
            if hand.is_fist {
                strength
            } else {
                -strength
            }
        } else {
            0.0
        };
        let a = ease(self.params.grip_rate, dt_sec);
        self.grip = (self.grip + (grip_target - self.grip) * a).clamp(-1.0, 1.0);

        // An inactive hand's coordinates are stale; leave the point where it was.
        let pointer = &gesture.secondary;
        let a = ease(self.params.interaction_rate, dt_sec);
        if pointer.active {
            let target = self.to_scene(pointer.x, pointer.y);
            if self.interaction_seen {
                self.interaction += (target - self.interaction) * a;
            } else {
                self.interaction = target;
                self.interaction_seen = true;
            }
        }
        let strength_target = if pointer.active { 1.0 } else { 0.0 };
        self.interaction_strength += (strength_target - self.interaction_strength) * a;

        GestureControls {
            grip: self.grip,
            interaction: self.interaction,
            interaction_strength: self.interaction_strength,
            suspend_morph: self.grip > self.params.strong_implosion_threshold,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.params.clone());
    }
}

#[inline]
fn ease(rate: f32, dt_sec: f32) -> f32 {
    (1.0 - (-rate * dt_sec).exp()).clamp(0.0, 1.0)
}
