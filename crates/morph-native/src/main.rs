mod cli;
mod synth;

use anyhow::Context;
use clap::Parser;
use fnv::FnvHashMap;
use glam::Vec3;
use instant::Instant;
use morph_core::{
    pick_other, AudioFrameSource, FrameInput, PositionBuffer, Scene, ShapeKind, TransitionCause,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use cli::Args;
use synth::{ScriptedGesture, SyntheticTrack};

#[derive(Default)]
struct RunStats {
    ticks: u64,
    over_budget: u64,
    busiest: Duration,
    total: Duration,
    visits: FnvHashMap<ShapeKind, u32>,
    forced: u32,
    energetic: u32,
    configs: u32,
}

impl RunStats {
    fn record_tick(&mut self, took: Duration, budget: Duration) {
        self.ticks += 1;
        self.total += took;
        self.busiest = self.busiest.max(took);
        if took > budget {
            self.over_budget += 1;
        }
    }

    fn record_shape(&mut self, kind: ShapeKind, cause: Option<TransitionCause>) {
        *self.visits.entry(kind).or_insert(0) += 1;
        match cause {
            Some(TransitionCause::ForceSwitch) => self.forced += 1,
            Some(TransitionCause::Energy) => self.energetic += 1,
            Some(TransitionCause::Config) => self.configs += 1,
            None => {}
        }
    }
}

fn mean_radius(buf: &PositionBuffer) -> f32 {
    if buf.is_empty() {
        return 0.0;
    }
    buf.points().iter().map(|p| p.length()).sum::<f32>() / buf.count() as f32
}

fn mean_distance(a: &PositionBuffer, b: &PositionBuffer) -> f32 {
    if a.is_empty() {
        return 0.0;
    }
    a.points()
        .iter()
        .zip(b.points())
        .map(|(p, q): (&Vec3, &Vec3)| p.distance(*q))
        .sum::<f32>()
        / a.count() as f32
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let config = args
        .visual_config()
        .with_context(|| format!("known shapes: {}", cli::shape_names()))?;
    let options = args.scene_options()?;

    let dt = args.frame_dt();
    let budget = Duration::from_secs_f32(dt);
    let frames = args.frame_count()?;
    log::info!(
        "morph-native: {} frames at {} fps, seed {}",
        frames,
        args.fps,
        args.seed
    );

    let mut scene = Scene::new(config, options);
    let mut track = SyntheticTrack::new(args.bpm, args.seed);
    let mut gesture = ScriptedGesture::new(args.grip_window());
    let mut playlist_rng = StdRng::seed_from_u64(args.seed.wrapping_add(1));
    let mut next_track = args.track_length;

    let mut stats = RunStats::default();
    stats.record_shape(scene.primary().current_shape(), None);

    for frame in 0..frames {
        let elapsed = frame as f64 * dt as f64;

        if let Some(at) = next_track.filter(|&at| elapsed >= at) {
            let mut next = scene.config().clone();
            next.shape = pick_other(next.shape, &mut playlist_rng);
            next.description = format!("Synthetic track @{:.0}s", at);
            scene.set_config(next, elapsed);
            stats.record_shape(scene.primary().current_shape(), Some(TransitionCause::Config));
            next_track = args.track_length.map(|len| at + len.max(1.0));
        }

        track.advance(dt as f64);
        let audio = track.current_frame();
        let gesture_state = *gesture.sample(elapsed);

        let started = Instant::now();
        let uniforms = scene.tick(&FrameInput {
            elapsed_sec: elapsed,
            dt_sec: dt,
            audio,
            gesture: &gesture_state,
        });
        let took = started.elapsed();
        stats.record_tick(took, budget);
        if took > budget {
            log::warn!(
                "frame {} took {:.2} ms (budget {:.2} ms)",
                frame,
                took.as_secs_f64() * 1e3,
                budget.as_secs_f64() * 1e3
            );
        }

        let report = scene.last_report();
        if let Some(t) = report.primary {
            stats.record_shape(t.to, Some(t.cause));
        }

        if frame % (args.fps.max(1) as u64 * 5) == 0 {
            let primary = scene.primary();
            log::debug!(
                "t={:.1}s {} energy {:.2} treble {:.2} beat {:.2} grip {:.2} radius {:.1} remaining {:.2}",
                elapsed,
                primary.current_shape(),
                uniforms.energy,
                uniforms.treble,
                uniforms.beat,
                uniforms.grip,
                mean_radius(primary.positions()),
                mean_distance(primary.positions(), primary.target()),
            );
        }
    }

    let avg_ms = if stats.ticks > 0 {
        stats.total.as_secs_f64() * 1e3 / stats.ticks as f64
    } else {
        0.0
    };
    log::info!(
        "{} ticks, avg {:.3} ms, worst {:.3} ms, {} over budget",
        stats.ticks,
        avg_ms,
        stats.busiest.as_secs_f64() * 1e3,
        stats.over_budget
    );
    log::info!(
        "transitions: {} energy, {} forced, {} config",
        stats.energetic,
        stats.forced,
        stats.configs
    );
    let mut visits: Vec<_> = stats.visits.iter().collect();
    visits.sort_by_key(|(k, _)| k.id());
    for (kind, n) in visits {
        log::info!("  {:<20} {}", kind.label(), n);
    }
    Ok(())
}
