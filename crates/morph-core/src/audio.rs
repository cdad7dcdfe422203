//! Spectrum snapshots and the scalar features derived from them.

use crate::config::{finite_or_zero, sanitize_unit};
use crate::constants::{BEAT_FALL_TAU_SEC, BEAT_RISE_TAU_SEC, TREBLE_BAND_PERCENT};

/// One analyser read: byte magnitudes per frequency bin, lowest bin first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AudioFrame {
    pub frequency_bins: Vec<u8>,
    /// Mean of `frequency_bins` in byte units (0..=255).
    pub average_energy: f32,
}

impl AudioFrame {
    /// A frame with `bins` zeroed slots.
    pub fn silent(bins: usize) -> Self {
        Self {
            frequency_bins: vec![0; bins],
            average_energy: 0.0,
        }
    }

    pub fn from_bins(frequency_bins: Vec<u8>) -> Self {
        let average_energy = mean_bytes(&frequency_bins);
        Self {
            frequency_bins,
            average_energy,
        }
    }

    /// Refill in place, keeping the allocation.
    pub fn update_bins(&mut self, bins: &[u8]) {
        self.frequency_bins.clear();
        self.frequency_bins.extend_from_slice(bins);
        self.average_energy = mean_bytes(&self.frequency_bins);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AudioFeatures {
    /// Overall loudness in [0, 1].
    pub energy: f32,
    /// Mean magnitude of the top 30% of bins, in [0, 1].
    pub treble: f32,
}

/// Reduce a frame to its scalar features. Empty frames and NaN averages
/// give zeros.
pub fn extract(frame: &AudioFrame) -> AudioFeatures {
    let energy = sanitize_unit(frame.average_energy / 255.0);
    let bins = &frame.frequency_bins;
    let treble = if bins.is_empty() {
        0.0
    } else {
        let start = treble_start(bins.len());
        sanitize_unit(mean_bytes(&bins[start..]) / 255.0)
    };
    AudioFeatures { energy, treble }
}

/// First bin index of the treble band.
#[inline]
fn treble_start(len: usize) -> usize {
    let band = (len * TREBLE_BAND_PERCENT).div_ceil(100).clamp(1, len);
    len - band
}

#[inline]
fn mean_bytes(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    bins.iter().map(|&b| b as u32).sum::<u32>() as f32 / bins.len() as f32
}

/// Pull-style accessor for the latest spectrum.
pub trait AudioFrameSource {
    /// Must be cheap and safe to call every tick; returns a zero frame when
    /// nothing is playing.
    fn current_frame(&mut self) -> &AudioFrame;
}

/// Source for when no audio is connected.
#[derive(Clone, Debug)]
pub struct SilentSource {
    frame: AudioFrame,
}

impl SilentSource {
    pub fn new(bins: usize) -> Self {
        Self {
            frame: AudioFrame::silent(bins),
        }
    }
}

impl Default for SilentSource {
    fn default() -> Self {
        Self::new(512)
    }
}

impl AudioFrameSource for SilentSource {
    fn current_frame(&mut self) -> &AudioFrame {
        &self.frame
    }
}

/// Asymmetric one-pole smoother: fast attack, slow release. Turns raw energy
/// into the `beat` intensity the shader pulses with.
#[derive(Clone, Debug)]
pub struct EnvelopeFollower {
    value: f32,
    rise_tau_sec: f32,
    fall_tau_sec: f32,
}

impl Default for EnvelopeFollower {
    fn default() -> Self {
        Self::new(BEAT_RISE_TAU_SEC, BEAT_FALL_TAU_SEC)
    }
}

impl EnvelopeFollower {
    pub fn new(rise_tau_sec: f32, fall_tau_sec: f32) -> Self {
        Self {
            value: 0.0,
            rise_tau_sec: rise_tau_sec.max(1e-4),
            fall_tau_sec: fall_tau_sec.max(1e-4),
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn update(&mut self, target: f32, dt_sec: f32) -> f32 {
        let target = sanitize_unit(target);
        let dt_sec = finite_or_zero(dt_sec).max(0.0);
        let tau = if target > self.value {
            self.rise_tau_sec
        } else {
            self.fall_tau_sec
        };
        let alpha = 1.0 - (-dt_sec / tau).exp();
        self.value += (target - self.value) * alpha;
        self.value
    }
}
