//! Particle fields and the per-frame tick that drives them.

use crate::audio::{extract, AudioFeatures, AudioFrame, EnvelopeFollower};
use crate::buffer::PositionBuffer;
use crate::config::{finite_or_zero, VisualConfig};
use crate::constants::{BACKGROUND_PARTICLE_COUNT, PRIMARY_PARTICLE_COUNT};
use crate::gesture::{GestureControls, GestureModulator, GestureParams, GestureState};
use crate::integrator::{IntegratorParams, ParticleIntegrator};
use crate::morph::{pick_other, MorphController, MorphPolicy, Transition};
use crate::shapes::{IntegratorState, ShapeKind};
use crate::state::{ColorSmoother, FrameUniforms};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Field seed and initial-shape pick seed for the background field, derived
/// from the scene seed. The two streams never coincide.
fn background_seeds(seed: u64) -> (u64, u64) {
    let field = seed ^ 0x9E37_79B9_7F4A_7C15;
    (field, field.wrapping_add(1))
}

/// One independently morphing point cloud.
pub struct ParticleField {
    label: &'static str,
    current: PositionBuffer,
    morph: MorphController,
    integrator: ParticleIntegrator,
    attractor: IntegratorState,
    rng: StdRng,
}

impl ParticleField {
    /// Fresh field showing `initial`. Attractor continuation always starts
    /// from scratch here.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        label: &'static str,
        count: usize,
        initial: ShapeKind,
        chaos: f32,
        policy: MorphPolicy,
        integrator: IntegratorParams,
        seed: u64,
        now_sec: f64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut attractor = IntegratorState::new();
        let morph = MorphController::new(
            policy,
            initial,
            count,
            chaos,
            now_sec,
            &mut rng,
            &mut attractor,
        );
        let current = morph.target().clone();
        log::debug!("[field:{}] {} particles, starting on {}", label, count, initial);
        Self {
            label,
            current,
            morph,
            integrator: ParticleIntegrator::new(integrator),
            attractor,
            rng,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn count(&self) -> usize {
        self.current.count()
    }

    pub fn current_shape(&self) -> ShapeKind {
        self.morph.current_shape()
    }

    /// Positions as rendered this frame.
    pub fn positions(&self) -> &PositionBuffer {
        &self.current
    }

    /// Positions the field is converging to.
    pub fn target(&self) -> &PositionBuffer {
        self.morph.target()
    }

    pub fn morph(&self) -> &MorphController {
        &self.morph
    }

    pub fn tick(
        &mut self,
        now_sec: f64,
        dt_sec: f32,
        energy: f32,
        config: &VisualConfig,
        suspend_morph: bool,
    ) -> Option<Transition> {
        let fired = self
            .morph
            .update(now_sec, energy, config, &mut self.rng, &mut self.attractor);
        if let Some(t) = &fired {
            log::info!(
                "[morph:{}] {} -> {} ({:?}, chaos {:.2}, energy {:.2})",
                self.label,
                t.from,
                t.to,
                t.cause,
                t.chaos,
                energy
            );
        }
        self.integrator.step(
            &mut self.current,
            self.morph.target(),
            energy,
            config.speed,
            dt_sec,
            suspend_morph,
            &mut self.rng,
        );
        fired
    }

    /// Jump to `shape` immediately and restart the cooldown clock.
    pub fn apply_config(&mut self, config: &VisualConfig, now_sec: f64) -> Transition {
        let t = self
            .morph
            .set_config(config, now_sec, &mut self.rng, &mut self.attractor);
        log::info!("[morph:{}] {} -> {} (config)", self.label, t.from, t.to);
        t
    }
}

#[derive(Clone, Debug)]
pub struct SceneOptions {
    pub primary_count: usize,
    /// Zero disables the background field.
    pub background_count: usize,
    pub primary_policy: MorphPolicy,
    pub background_policy: MorphPolicy,
    pub integrator: IntegratorParams,
    pub gesture: GestureParams,
    pub seed: u64,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            primary_count: PRIMARY_PARTICLE_COUNT,
            background_count: BACKGROUND_PARTICLE_COUNT,
            primary_policy: MorphPolicy::primary(),
            background_policy: MorphPolicy::background(),
            integrator: IntegratorParams::default(),
            gesture: GestureParams::default(),
            seed: 0x5EED,
        }
    }
}

/// Snapshot of everything the outside world supplies for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput<'a> {
    /// Seconds since the scene started.
    pub elapsed_sec: f64,
    pub dt_sec: f32,
    pub audio: &'a AudioFrame,
    pub gesture: &'a GestureState,
}

/// Result of one tick besides the uniforms, for logging and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickReport {
    pub features: AudioFeatures,
    pub gesture: GestureControls,
    pub primary: Option<Transition>,
    pub background: Option<Transition>,
}

/// Main field, optional background field, and the shared modulators.
pub struct Scene {
    config: VisualConfig,
    primary: ParticleField,
    background: Option<ParticleField>,
    gesture: GestureModulator,
    beat: EnvelopeFollower,
    colors: ColorSmoother,
    clock: f32,
    last_report: TickReport,
}

impl Scene {
    pub fn new(config: VisualConfig, options: SceneOptions) -> Self {
        let config = config.sanitized();
        let primary = ParticleField::new(
            "primary",
            options.primary_count,
            config.shape,
            config.chaos,
            options.primary_policy,
            options.integrator.clone(),
            options.seed,
            0.0,
        );
        let background = (options.background_count > 0).then(|| {
            let (bg_seed, pick_seed) = background_seeds(options.seed);
            let mut pick_rng = StdRng::seed_from_u64(pick_seed);
            ParticleField::new(
                "background",
                options.background_count,
                pick_other(config.shape, &mut pick_rng),
                config.chaos,
                options.background_policy,
                options.integrator,
                bg_seed,
                0.0,
            )
        });
        log::info!(
            "[scene] {} on {} ({} + {} particles)",
            config.description,
            config.shape,
            options.primary_count,
            options.background_count
        );
        Self {
            colors: ColorSmoother::new(config.colors),
            config,
            primary,
            background,
            gesture: GestureModulator::new(options.gesture),
            beat: EnvelopeFollower::default(),
            clock: 0.0,
            last_report: TickReport::default(),
        }
    }

    pub fn config(&self) -> &VisualConfig {
        &self.config
    }

    pub fn primary(&self) -> &ParticleField {
        &self.primary
    }

    pub fn background(&self) -> Option<&ParticleField> {
        self.background.as_ref()
    }

    pub fn last_report(&self) -> &TickReport {
        &self.last_report
    }

    /// New config from the presentation layer. Both fields regenerate now and
    /// their auto-morph cooldowns restart.
    pub fn set_config(&mut self, config: VisualConfig, elapsed_sec: f64) {
        let config = config.sanitized();
        log::info!(
            "[config] {:?}: {} chaos {:.2} speed {:.2}",
            config.description,
            config.shape,
            config.chaos,
            config.speed
        );
        self.primary.apply_config(&config, elapsed_sec);
        if let Some(bg) = &mut self.background {
            let mut bg_config = config.clone();
            bg_config.shape = pick_other(config.shape, &mut bg.rng);
            bg.apply_config(&bg_config, elapsed_sec);
        }
        self.config = config;
    }

    pub fn tick(&mut self, input: &FrameInput<'_>) -> FrameUniforms {
        let dt = finite_or_zero(input.dt_sec).max(0.0);
        let features = extract(input.audio);
        let controls = self.gesture.update(input.gesture, dt);
        let beat = self.beat.update(features.energy, dt);
        self.clock += dt * self.config.speed;

        let primary = self.primary.tick(
            input.elapsed_sec,
            dt,
            features.energy,
            &self.config,
            controls.suspend_morph,
        );
        let background = self.background.as_mut().and_then(|bg| {
            bg.tick(input.elapsed_sec, dt, features.energy, &self.config, false)
        });
        self.colors.update(&self.config.colors, dt);

        self.last_report = TickReport {
            features,
            gesture: controls,
            primary,
            background,
        };

        let shape = self.primary.current_shape();
        FrameUniforms {
            colors: self.colors.as_rows(),
            interaction: controls.interaction.to_array(),
            interaction_strength: controls.interaction_strength,
            grip: controls.grip,
            time: self.clock,
            beat,
            treble: features.treble,
            energy: features.energy,
            shape_id: shape.id(),
            shape_category: shape.category() as u32,
            background_shape_id: self
                .background
                .as_ref()
                .map(|bg| bg.current_shape().id())
                .unwrap_or(u32::MAX),
            _pad: 0,
        }
    }

    /// Tear down both fields and rebuild them, as on a scene remount.
    /// Attractor trajectories and gesture smoothing start over.
    pub fn remount(&mut self, options: SceneOptions) {
        *self = Self::new(self.config.clone(), options);
    }

    pub fn smoothed_colors(&self) -> [Vec3; 3] {
        self.colors.current()
    }
}
