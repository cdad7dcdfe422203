//! Command-line arguments for the headless runner.

use anyhow::Context;
use clap::Parser;
use morph_core::{MorphPolicy, SceneOptions, ShapeKind, VisualConfig};

#[derive(Parser, Debug)]
#[command(name = "morph-native")]
#[command(about = "Headless driver for the audio-reactive particle morph engine", long_about = None)]
pub struct Args {
    /// Simulated run length
    #[arg(long, value_name = "SECONDS", default_value_t = 60.0)]
    pub seconds: f64,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Seed for shape sampling and the synthetic track
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[arg(long, default_value_t = morph_core::PRIMARY_PARTICLE_COUNT)]
    pub particles: usize,

    /// Background field size (0 disables it)
    #[arg(long, default_value_t = morph_core::BACKGROUND_PARTICLE_COUNT)]
    pub background_particles: usize,

    /// Starting shape, e.g. sphere, torus, lorenz, black-hole
    #[arg(long, default_value = "sphere")]
    pub shape: String,

    #[arg(long, default_value_t = 0.3)]
    pub chaos: f32,

    #[arg(long, default_value_t = 1.0)]
    pub speed: f32,

    /// Primary, secondary and highlight colors as hex
    #[arg(long, num_args = 3, value_names = ["PRIMARY", "SECONDARY", "HIGHLIGHT"],
          default_values = ["#00f2ff", "#8c33ff", "#ffffff"])]
    pub colors: Vec<String>,

    /// Tempo of the synthetic kick pattern
    #[arg(long, default_value_t = 124.0)]
    pub bpm: f32,

    /// Override the primary auto-morph cooldown
    #[arg(long, value_name = "SECONDS")]
    pub cooldown: Option<f64>,

    /// Override the primary force-switch window
    #[arg(long, value_name = "SECONDS")]
    pub force_switch: Option<f64>,

    /// Load a new config (random shape) every N seconds, like a playlist
    #[arg(long, value_name = "SECONDS")]
    pub track_length: Option<f64>,

    /// Script a fist on the primary hand between these times
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    pub grip: Option<Vec<f64>>,
}

impl Args {
    pub fn visual_config(&self) -> anyhow::Result<VisualConfig> {
        let colors: [&str; 3] = match self.colors.as_slice() {
            [a, b, c] => [a.as_str(), b.as_str(), c.as_str()],
            other => anyhow::bail!("expected 3 colors, got {}", other.len()),
        };
        VisualConfig::from_parts(
            &self.shape,
            colors,
            self.speed,
            self.chaos,
            "Synthetic track",
        )
        .context("building visual config from arguments")
    }

    pub fn scene_options(&self) -> anyhow::Result<SceneOptions> {
        let mut primary = MorphPolicy::primary();
        if let Some(c) = self.cooldown {
            primary.cooldown_sec = c;
        }
        if let Some(f) = self.force_switch {
            primary.force_switch_sec = f;
        }
        primary.validate().context("primary morph policy")?;
        Ok(SceneOptions {
            primary_count: self.particles,
            background_count: self.background_particles,
            primary_policy: primary,
            seed: self.seed,
            ..SceneOptions::default()
        })
    }

    pub fn grip_window(&self) -> Option<(f64, f64)> {
        match self.grip.as_deref() {
            Some([start, end]) => Some((*start, *end)),
            _ => None,
        }
    }

    /// Number of fixed steps in the run. Rejects lengths that would never end.
    pub fn frame_count(&self) -> anyhow::Result<u64> {
        if !self.seconds.is_finite() || self.seconds < 0.0 {
            anyhow::bail!("--seconds must be finite and non-negative, got {}", self.seconds);
        }
        Ok((self.seconds * self.fps.max(1) as f64).round() as u64)
    }

    pub fn frame_dt(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }
}

/// Shape name accepted on the command line, for help output.
pub fn shape_names() -> String {
    ShapeKind::all()
        .iter()
        .map(|k| k.name())
        .collect::<Vec<_>>()
        .join(", ")
}
