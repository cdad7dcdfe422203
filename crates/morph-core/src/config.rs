//! Presentation-facing configuration values.
//!
//! A [`VisualConfig`] is produced outside the core (track metadata, a mood
//! service, a preset file) and handed over whole. The core never mutates it;
//! it only reads the shape, palette, speed and chaos when a field regenerates.

use crate::constants::default_palette_vec3;
use crate::shapes::ShapeKind;
use glam::Vec3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid hex color {0:?} (expected #rrggbb or #rgb)")]
    InvalidColor(String),
    #[error("unknown shape {0:?}")]
    UnknownShape(String),
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidDuration { name: &'static str, value: f64 },
    #[error("cooldown ({cooldown}s) must not exceed force switch ({force_switch}s)")]
    CooldownAfterForceSwitch { cooldown: f64, force_switch: f64 },
    #[error("{name} must lie in [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },
}

/// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb` into linear-ish `[0, 1]` RGB.
pub fn parse_hex_color(s: &str) -> Result<Vec3, ConfigError> {
    let hex = s.trim().trim_start_matches('#');
    let bad = || ConfigError::InvalidColor(s.to_string());
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(bad());
    }
    let channel = |digits: &str| -> Result<f32, ConfigError> {
        u8::from_str_radix(digits, 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| bad())
    };
    match hex.len() {
        6 => Ok(Vec3::new(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let expand = |c: &str| format!("{c}{c}");
            Ok(Vec3::new(
                channel(&expand(&hex[0..1]))?,
                channel(&expand(&hex[1..2]))?,
                channel(&expand(&hex[2..3]))?,
            ))
        }
        _ => Err(bad()),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisualConfig {
    pub shape: ShapeKind,
    /// Primary, secondary and highlight colors.
    pub colors: [Vec3; 3],
    /// Multiplier on animation time and morph rate.
    pub speed: f32,
    pub chaos: f32,
    pub description: String,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            shape: ShapeKind::Sphere,
            colors: default_palette_vec3(),
            speed: 1.0,
            chaos: 0.3,
            description: String::from("Idle"),
        }
    }
}

impl VisualConfig {
    pub fn new(shape: ShapeKind) -> Self {
        Self {
            shape,
            ..Self::default()
        }
    }

    /// Build a config from the string form a mood/preset service emits.
    pub fn from_parts(
        shape: &str,
        colors: [&str; 3],
        speed: f32,
        chaos: f32,
        description: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let shape: ShapeKind = shape.parse()?;
        Ok(Self {
            shape,
            colors: [
                parse_hex_color(colors[0])?,
                parse_hex_color(colors[1])?,
                parse_hex_color(colors[2])?,
            ],
            speed,
            chaos,
            description: description.into(),
        }
        .sanitized())
    }

    pub fn with_chaos(mut self, chaos: f32) -> Self {
        self.chaos = chaos;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_colors(mut self, colors: [Vec3; 3]) -> Self {
        self.colors = colors;
        self
    }

    /// Chaos clamped to [0, 1], speed finite and non-negative, colors finite.
    pub fn sanitized(mut self) -> Self {
        self.chaos = sanitize_unit(self.chaos);
        self.speed = if self.speed.is_finite() {
            self.speed.max(0.0)
        } else {
            1.0
        };
        for c in &mut self.colors {
            if !c.is_finite() {
                *c = Vec3::ZERO;
            }
            *c = c.clamp(Vec3::ZERO, Vec3::ONE);
        }
        self
    }
}

/// NaN becomes 0, everything else is clamped into [0, 1].
#[inline]
pub fn sanitize_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// NaN and infinities become 0.
#[inline]
pub fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
