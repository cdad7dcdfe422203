// Host-side tests for easing particles toward their target.

use glam::Vec3;
use morph_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn pair() -> (PositionBuffer, PositionBuffer) {
    let current = PositionBuffer::zeroed(4);
    let target = PositionBuffer::from_points(&[
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(0.0, -5.0, 0.0),
        Vec3::new(3.0, 4.0, 12.0),
        Vec3::new(-7.5, 2.0, 1.0),
    ]);
    (current, target)
}

fn max_distance(a: &PositionBuffer, b: &PositionBuffer) -> f32 {
    a.points()
        .iter()
        .zip(b.points())
        .map(|(p, q)| p.distance(*q))
        .fold(0.0, f32::max)
}

fn distances(a: &PositionBuffer, b: &PositionBuffer) -> Vec<f32> {
    a.points()
        .iter()
        .zip(b.points())
        .map(|(p, q)| p.distance(*q))
        .collect()
}

#[test]
fn converges_monotonically_without_overshoot() {
    let integrator = ParticleIntegrator::default();
    let mut rng = StdRng::seed_from_u64(1);
    let (mut current, target) = pair();
    let mut last = distances(&current, &target);
    for _ in 0..600 {
        integrator.step(&mut current, &target, 0.5, 1.0, 1.0 / 60.0, false, &mut rng);
        let now = distances(&current, &target);
        for (i, (before, after)) in last.iter().zip(&now).enumerate() {
            assert!(
                *after <= before + 1e-6,
                "particle {i} moved away: {before} -> {after}"
            );
        }
        // Each coordinate stays between its start (0) and its target.
        for (c, t) in current.as_slice().iter().zip(target.as_slice()) {
            assert!(c.abs() <= t.abs() + 1e-5 && c * t >= 0.0, "{c} overshot {t}");
        }
        last = now;
    }
    assert!(
        last.iter().all(|&d| d < 1e-2),
        "still {last:?} away after 10s"
    );
}

#[test]
fn huge_step_lands_on_target() {
    let integrator = ParticleIntegrator::default();
    let mut rng = StdRng::seed_from_u64(1);
    let (mut current, target) = pair();
    integrator.step(&mut current, &target, 0.0, 1.0, 1.0e6, false, &mut rng);
    assert!(max_distance(&current, &target) < 1e-4);
}

#[test]
fn suspended_morph_freezes_positions() {
    let integrator = ParticleIntegrator::default();
    let mut rng = StdRng::seed_from_u64(1);
    let (mut current, target) = pair();
    integrator.step(&mut current, &target, 0.5, 1.0, 0.1, true, &mut rng);
    assert_eq!(current, PositionBuffer::zeroed(4));
}

#[test]
fn zero_speed_freezes_positions() {
    let integrator = ParticleIntegrator::default();
    let mut rng = StdRng::seed_from_u64(1);
    let (mut current, target) = pair();
    integrator.step(&mut current, &target, 0.5, 0.0, 0.1, false, &mut rng);
    assert_eq!(current, PositionBuffer::zeroed(4));
}

#[test]
fn loud_energy_scatters_current_only() {
    let integrator = ParticleIntegrator::default();
    let mut rng = StdRng::seed_from_u64(3);
    let (_, target) = pair();
    let mut current = target.clone();
    let energy = 0.95;
    integrator.step(&mut current, &target, energy, 0.0, 0.016, false, &mut rng);
    let limit = energy * BURST_JITTER_SCALE + 1e-5;
    let mut moved = false;
    for (c, t) in current.as_slice().iter().zip(target.as_slice()) {
        assert!((c - t).abs() <= limit, "offset {} beyond {limit}", c - t);
        moved |= c != t;
    }
    assert!(moved, "burst did not move any particle");
}

#[test]
fn burst_applies_even_while_suspended() {
    let integrator = ParticleIntegrator::default();
    let mut rng = StdRng::seed_from_u64(3);
    let (_, target) = pair();
    let mut current = target.clone();
    integrator.step(&mut current, &target, 1.0, 1.0, 0.016, true, &mut rng);
    assert_ne!(current, target);
}

#[test]
fn moderate_energy_never_scatters() {
    let integrator = ParticleIntegrator::default();
    let mut rng = StdRng::seed_from_u64(3);
    let (_, target) = pair();
    let mut current = target.clone();
    integrator.step(&mut current, &target, BURST_ENERGY_THRESHOLD, 1.0, 0.016, false, &mut rng);
    assert!(max_distance(&current, &target) < 1e-6);
}

#[test]
fn blend_factor_tracks_energy_and_speed() {
    let integrator = ParticleIntegrator::default();
    let quiet = integrator.blend_factor(0.0, 1.0, 1.0 / 60.0);
    let loud = integrator.blend_factor(1.0, 1.0, 1.0 / 60.0);
    let fast = integrator.blend_factor(0.0, 2.0, 1.0 / 60.0);
    assert!(quiet > 0.0 && quiet < loud && loud < 1.0);
    assert!(fast > quiet);
    assert_eq!(integrator.blend_factor(1.0, 1.0, 0.0), 0.0);
    assert_eq!(integrator.blend_factor(1.0, 1.0, f32::NAN), 0.0);
    assert_eq!(integrator.blend_factor(1.0, f32::INFINITY, 0.1), 0.0);
    assert_eq!(integrator.blend_factor(1.0, 1.0, -1.0), 0.0);
}

#[test]
fn custom_params_change_rate() {
    let slow = ParticleIntegrator::new(IntegratorParams {
        base_rate: 0.5,
        ..IntegratorParams::default()
    });
    let fast = ParticleIntegrator::default();
    assert!(slow.blend_factor(0.0, 1.0, 0.1) < fast.blend_factor(0.0, 1.0, 0.1));
}
