// Host-side tests for the per-frame scene tick.

use glam::Vec3;
use morph_core::*;

const DT: f32 = 1.0 / 60.0;

fn small_options() -> SceneOptions {
    SceneOptions {
        primary_count: 200,
        background_count: 80,
        seed: 7,
        ..SceneOptions::default()
    }
}

fn tick(scene: &mut Scene, frame: u32, audio: &AudioFrame, gesture: &GestureState) -> FrameUniforms {
    scene.tick(&FrameInput {
        elapsed_sec: frame as f64 / 60.0,
        dt_sec: DT,
        audio,
        gesture,
    })
}

#[test]
fn uniforms_match_wgsl_block_size() {
    assert_eq!(std::mem::size_of::<FrameUniforms>(), 96);
    assert_eq!(FrameUniforms::default().as_bytes().len(), 96);
}

#[test]
fn uniforms_describe_current_shapes() {
    let mut scene = Scene::new(VisualConfig::new(ShapeKind::VoxelGrid), small_options());
    let u = tick(&mut scene, 1, &AudioFrame::silent(64), &GestureState::default());
    assert_eq!(u.shape(), Some(ShapeKind::VoxelGrid));
    assert_eq!(u.shape_category, ShapeCategory::Lattice as u32);
    let bg = scene.background().expect("background field");
    assert_eq!(u.background_shape_id, bg.current_shape().id());
    assert_ne!(bg.current_shape(), ShapeKind::VoxelGrid);
    assert_eq!(scene.primary().count(), 200);
    assert_eq!(bg.count(), 80);
}

#[test]
fn background_can_be_disabled() {
    let options = SceneOptions {
        background_count: 0,
        ..small_options()
    };
    let mut scene = Scene::new(VisualConfig::default(), options);
    assert!(scene.background().is_none());
    let u = tick(&mut scene, 1, &AudioFrame::silent(64), &GestureState::default());
    assert_eq!(u.background_shape_id, u32::MAX);
}

#[test]
fn audio_features_reach_uniforms() {
    let mut scene = Scene::new(VisualConfig::default(), small_options());
    let loud = AudioFrame::from_bins(vec![255; 64]);
    let u = tick(&mut scene, 1, &loud, &GestureState::default());
    assert_eq!(u.energy, 1.0);
    assert_eq!(u.treble, 1.0);
    assert!(u.beat > 0.0 && u.beat < 1.0);
    assert_eq!(scene.last_report().features.energy, 1.0);
}

#[test]
fn loud_music_morphs_after_cooldown() {
    let mut scene = Scene::new(VisualConfig::new(ShapeKind::Sphere), small_options());
    let loud = AudioFrame::from_bins(vec![255; 64]);
    let idle = GestureState::default();
    let mut primary = Vec::new();
    let mut background = Vec::new();
    for frame in 1..=540 {
        tick(&mut scene, frame, &loud, &idle);
        let report = scene.last_report();
        let now = frame as f64 / 60.0;
        if let Some(t) = report.primary {
            assert_eq!(t.cause, TransitionCause::Energy);
            primary.push(now);
        }
        if report.background.is_some() {
            background.push(now);
        }
    }
    assert_eq!(primary.len(), 1, "primary transitions at {primary:?}");
    assert!(primary[0] >= 8.0 && primary[0] < 8.1);
    assert!(!background.is_empty());
    assert!(background[0] >= 6.0 && background[0] < 6.1);
    assert_ne!(scene.primary().current_shape(), ShapeKind::Sphere);
}

#[test]
fn silence_morphs_only_on_force_switch() {
    let mut scene = Scene::new(VisualConfig::default(), small_options());
    let quiet = AudioFrame::silent(64);
    let idle = GestureState::default();
    let mut fired = Vec::new();
    for frame in 1..=1_260 {
        tick(&mut scene, frame, &quiet, &idle);
        if let Some(t) = scene.last_report().primary {
            assert_eq!(t.cause, TransitionCause::ForceSwitch);
            fired.push(frame as f64 / 60.0);
        }
    }
    assert_eq!(fired.len(), 1, "fired at {fired:?}");
    assert!(fired[0] >= 20.0 && fired[0] < 20.1);
}

#[test]
fn set_config_regenerates_both_fields() {
    let mut scene = Scene::new(VisualConfig::default(), small_options());
    let config = VisualConfig::new(ShapeKind::KleinBottle).with_chaos(0.1);
    scene.set_config(config, 12.0);
    assert_eq!(scene.config().shape, ShapeKind::KleinBottle);
    assert_eq!(scene.primary().current_shape(), ShapeKind::KleinBottle);
    assert_eq!(scene.primary().morph().last_transition_time(), 12.0);
    let bg = scene.background().expect("background");
    assert_ne!(bg.current_shape(), ShapeKind::KleinBottle);
    assert_eq!(bg.morph().last_transition_time(), 12.0);
}

#[test]
fn config_change_replaces_only_the_target() {
    let mut scene = Scene::new(VisualConfig::new(ShapeKind::Sphere), small_options());
    let before = scene.primary().positions().clone();
    scene.set_config(VisualConfig::new(ShapeKind::Torus), 1.0);
    assert_eq!(scene.primary().positions(), &before);
    assert_ne!(scene.primary().target(), &before);
}

#[test]
fn auto_transition_replaces_only_the_target() {
    let mut scene = Scene::new(VisualConfig::new(ShapeKind::Sphere), small_options());
    let quiet = AudioFrame::silent(64);
    let before = scene.primary().positions().clone();
    scene.tick(&FrameInput {
        elapsed_sec: 20.0,
        dt_sec: 0.0,
        audio: &quiet,
        gesture: &GestureState::default(),
    });
    let fired = scene.last_report().primary.expect("force switch at 20s");
    assert_eq!(fired.cause, TransitionCause::ForceSwitch);
    assert_eq!(scene.primary().positions(), &before);
    assert_ne!(scene.primary().target(), &before);
}

#[test]
fn strong_grip_holds_particles_in_place() {
    let mut scene = Scene::new(VisualConfig::new(ShapeKind::Sphere), small_options());
    let quiet = AudioFrame::silent(64);
    let fist = GestureState {
        primary: HandState::fist(1.0),
        ..GestureState::default()
    };
    for frame in 1..=60 {
        tick(&mut scene, frame, &quiet, &fist);
    }
    assert!(scene.last_report().gesture.suspend_morph);

    scene.set_config(VisualConfig::new(ShapeKind::CubeGrid), 1.0);
    let frozen = scene.primary().positions().clone();
    let u = tick(&mut scene, 61, &quiet, &fist);
    assert!(u.grip > STRONG_IMPLOSION_THRESHOLD);
    assert_eq!(scene.primary().positions(), &frozen);

    let released = GestureState::default();
    for frame in 62..=180 {
        tick(&mut scene, frame, &quiet, &released);
    }
    assert!(!scene.last_report().gesture.suspend_morph);
    assert_ne!(scene.primary().positions(), &frozen);
}

#[test]
fn background_field_ignores_grip() {
    let mut scene = Scene::new(VisualConfig::default(), small_options());
    let quiet = AudioFrame::silent(64);
    let fist = GestureState {
        primary: HandState::fist(1.0),
        ..GestureState::default()
    };
    for frame in 1..=60 {
        tick(&mut scene, frame, &quiet, &fist);
    }
    scene.set_config(VisualConfig::new(ShapeKind::Torus), 1.0);
    let before = scene.background().expect("background").positions().clone();
    tick(&mut scene, 61, &quiet, &fist);
    assert_ne!(scene.background().expect("background").positions(), &before);
}

#[test]
fn palette_fades_toward_new_config() {
    let mut scene = Scene::new(VisualConfig::default(), small_options());
    let red = [Vec3::X; 3];
    scene.set_config(VisualConfig::default().with_colors(red), 0.0);
    let quiet = AudioFrame::silent(64);
    let idle = GestureState::default();

    tick(&mut scene, 1, &quiet, &idle);
    let first = scene.smoothed_colors()[0];
    assert!(first.distance(Vec3::X) > 0.1, "color cut instead of fading");

    for frame in 2..600 {
        tick(&mut scene, frame, &quiet, &idle);
    }
    let u = tick(&mut scene, 600, &quiet, &idle);
    assert!(scene.smoothed_colors()[0].distance(Vec3::X) < 1e-3);
    assert_eq!(u.colors[0][3], 1.0);
    assert!((u.colors[1][0] - 1.0).abs() < 1e-3);
}

#[test]
fn clock_runs_at_config_speed() {
    let mut scene = Scene::new(VisualConfig::default().with_speed(2.0), small_options());
    let quiet = AudioFrame::silent(8);
    let idle = GestureState::default();
    let uniforms: Vec<FrameUniforms> = (1..=10)
        .map(|frame| {
            scene.tick(&FrameInput {
                elapsed_sec: frame as f64 * 0.1,
                dt_sec: 0.1,
                audio: &quiet,
                gesture: &idle,
            })
        })
        .collect();
    let u = uniforms[9];
    assert!(uniforms.windows(2).all(|w| w[1].time > w[0].time));
    assert!((u.time - 2.0).abs() < 1e-4, "time {}", u.time);

    let stalled = scene.tick(&FrameInput {
        elapsed_sec: 1.1,
        dt_sec: f32::NAN,
        audio: &quiet,
        gesture: &idle,
    });
    assert_eq!(stalled.time, u.time);
}

#[test]
fn same_seed_replays_identically() {
    let loud = AudioFrame::from_bins(vec![200; 64]);
    let idle = GestureState::default();
    let mut a = Scene::new(VisualConfig::default(), small_options());
    let mut b = Scene::new(VisualConfig::default(), small_options());
    for frame in 1..=600 {
        tick(&mut a, frame, &loud, &idle);
        tick(&mut b, frame, &loud, &idle);
    }
    assert_eq!(a.primary().current_shape(), b.primary().current_shape());
    assert_eq!(a.primary().positions(), b.primary().positions());
}

#[test]
fn remount_rebuilds_fields_and_modulators() {
    let mut scene = Scene::new(VisualConfig::default(), small_options());
    let quiet = AudioFrame::silent(64);
    let fist = GestureState {
        primary: HandState::fist(1.0),
        ..GestureState::default()
    };
    for frame in 1..=60 {
        tick(&mut scene, frame, &quiet, &fist);
    }
    scene.set_config(VisualConfig::new(ShapeKind::LorenzAttractor), 5.0);

    scene.remount(small_options());
    assert_eq!(scene.primary().current_shape(), ShapeKind::LorenzAttractor);
    assert_eq!(scene.primary().morph().last_transition_time(), 0.0);
    assert_eq!(scene.primary().positions(), scene.primary().target());
    let u = scene.tick(&FrameInput {
        elapsed_sec: 0.0,
        dt_sec: 0.0,
        audio: &quiet,
        gesture: &GestureState::default(),
    });
    assert_eq!(u.grip, 0.0);
    assert_eq!(u.time, 0.0);
}
