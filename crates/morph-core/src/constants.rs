use glam::Vec3;

// Shared tuning constants for the particle fields and their modulators.

// Field sizes
pub const PRIMARY_PARTICLE_COUNT: usize = 15_000;
pub const BACKGROUND_PARTICLE_COUNT: usize = 6_000;

// Auto-morph cadence (seconds)
pub const PRIMARY_COOLDOWN_SEC: f64 = 8.0;
pub const PRIMARY_FORCE_SWITCH_SEC: f64 = 20.0;
pub const BACKGROUND_COOLDOWN_SEC: f64 = 6.0;
pub const BACKGROUND_FORCE_SWITCH_SEC: f64 = 15.0;
pub const SWITCH_ENERGY_THRESHOLD: f32 = 0.7; // energy that counts as a "drop"
pub const CHAOS_ENERGY_GAIN: f32 = 0.2; // louder transitions generate noisier shapes

// Integration toward target
pub const MORPH_BASE_RATE: f32 = 2.4; // per second at speed 1.0
pub const MORPH_ENERGY_RATE: f32 = 6.0; // extra rate at full energy
pub const BURST_ENERGY_THRESHOLD: f32 = 0.8;
pub const BURST_JITTER_SCALE: f32 = 0.6; // max per-axis offset at energy 1.0

// Audio
pub const TREBLE_BAND_PERCENT: usize = 30; // top share of bins counted as treble
pub const BEAT_RISE_TAU_SEC: f32 = 0.05;
pub const BEAT_FALL_TAU_SEC: f32 = 0.35;

// Gesture smoothing
pub const GRIP_SMOOTHING_RATE: f32 = 6.0; // per second
pub const INTERACTION_SMOOTHING_RATE: f32 = 8.0; // per second
pub const STRONG_IMPLOSION_THRESHOLD: f32 = 0.5;
pub const SCENE_HALF_EXTENT: [f32; 2] = [30.0, 20.0]; // scene-space half width/height hit by the hand

// Colors
pub const COLOR_SMOOTHING_RATE: f32 = 2.5; // per second
pub const DEFAULT_PALETTE: [[f32; 3]; 3] = [
    [0.0, 0.95, 1.0], // cyan
    [0.55, 0.2, 1.0], // violet
    [1.0, 1.0, 1.0],  // white highlight
];

// Fallback fill for unrecognized shapes
pub const FALLBACK_CUBE_HALF_EXTENT: f32 = 15.0;

#[inline]
pub fn default_palette_vec3() -> [Vec3; 3] {
    [
        Vec3::from(DEFAULT_PALETTE[0]),
        Vec3::from(DEFAULT_PALETTE[1]),
        Vec3::from(DEFAULT_PALETTE[2]),
    ]
}
