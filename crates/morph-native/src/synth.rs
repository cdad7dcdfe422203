//! Synthetic inputs standing in for a live analyser and a hand tracker.

use morph_core::{AudioFrame, AudioFrameSource, GestureState, HandState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BINS: usize = 512;
const BEATS_PER_SECTION: f64 = 32.0;

/// Four-on-the-floor pattern with alternating quiet and loud sections.
pub struct SyntheticTrack {
    bpm: f64,
    time_sec: f64,
    rng: StdRng,
    scratch: Vec<u8>,
    frame: AudioFrame,
}

impl SyntheticTrack {
    pub fn new(bpm: f32, seed: u64) -> Self {
        Self {
            bpm: (bpm as f64).max(1.0),
            time_sec: 0.0,
            rng: StdRng::seed_from_u64(seed),
            scratch: vec![0; BINS],
            frame: AudioFrame::silent(BINS),
        }
    }

    /// Move the playhead and rebuild the spectrum.
    pub fn advance(&mut self, dt_sec: f64) {
        self.time_sec += dt_sec;
        let beats = self.time_sec * self.bpm / 60.0;
        let beat_phase = beats.fract() as f32;
        let loud = ((beats / BEATS_PER_SECTION) as u64) % 2 == 1;
        let level = if loud { 1.0 } else { 0.35 };
        let kick = (-beat_phase * 7.0).exp();
        let hat = (-((beat_phase + 0.5).fract()) * 14.0).exp();

        for (i, bin) in self.scratch.iter_mut().enumerate() {
            let f = i as f32 / BINS as f32;
            let low = (1.0 - f * 6.0).max(0.0);
            let high = ((f - 0.6) * 2.5).clamp(0.0, 1.0);
            let floor = 0.3 * (1.0 - f * 0.5);
            let noise = self.rng.gen::<f32>() * 0.08;
            let broadband = if loud { kick * 0.6 } else { 0.0 };
            let v = level * (kick * low + hat * high + floor + broadband) + noise;
            *bin = (v.clamp(0.0, 1.0) * 255.0) as u8;
        }
        self.frame.update_bins(&self.scratch);
    }
}

impl AudioFrameSource for SyntheticTrack {
    fn current_frame(&mut self) -> &AudioFrame {
        &self.frame
    }
}

/// Fist on the primary hand during an optional window; the secondary hand
/// traces a slow circle for the second half of every minute.
pub struct ScriptedGesture {
    grip_window: Option<(f64, f64)>,
    state: GestureState,
}

impl ScriptedGesture {
    pub fn new(grip_window: Option<(f64, f64)>) -> Self {
        Self {
            grip_window,
            state: GestureState::default(),
        }
    }

    pub fn sample(&mut self, time_sec: f64) -> &GestureState {
        self.state.primary = match self.grip_window {
            Some((start, end)) if time_sec >= start && time_sec < end => {
                let ramp = ((time_sec - start) / 0.5).min(1.0) as f32;
                HandState::fist(ramp)
            }
            _ => HandState::default(),
        };
        self.state.secondary = if time_sec % 60.0 >= 30.0 {
            let a = (time_sec * 0.8) as f32;
            HandState::pointing(0.5 + 0.3 * a.cos(), 0.5 + 0.3 * a.sin())
        } else {
            // Tracker lost the hand; coordinates go stale.
            HandState {
                active: false,
                x: 0.9,
                y: 0.1,
                ..HandState::default()
            }
        };
        &self.state
    }
}
