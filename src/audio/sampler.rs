//! Frequency sampling: the engine-facing snapshot contract plus a PCM-backed
//! analyser with Web-Audio-compatible output scaling.

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

use crate::audio::pcm::AudioPcm;
use crate::foundation::error::{SoniformError, SoniformResult};

/// FFT window length used by the analyser.
pub const FFT_SIZE: usize = 256;
/// Number of magnitude bins in a spectrum snapshot (`FFT_SIZE / 2`).
pub const SPECTRUM_BINS: usize = FFT_SIZE / 2;

const MIN_DECIBELS: f32 = -100.0;
const MAX_DECIBELS: f32 = -30.0;
/// Temporal smoothing applied to magnitudes between snapshots.
const TIME_SMOOTHING: f32 = 0.8;

/// One frame's magnitude spectrum: one byte per frequency bin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioFrame {
    bins: [u8; SPECTRUM_BINS],
}

impl AudioFrame {
    /// Wrap a raw bin array (useful for synthetic spectra in tests).
    pub fn from_bins(bins: [u8; SPECTRUM_BINS]) -> Self {
        Self { bins }
    }

    /// All-zero frame.
    pub fn silent() -> Self {
        Self {
            bins: [0; SPECTRUM_BINS],
        }
    }

    /// Borrow the bins as a slice.
    pub fn bins(&self) -> &[u8] {
        &self.bins
    }
}

/// A source of spectrum snapshots, polled once per tick.
///
/// Returning `None` is a valid, expected state: no audio loaded or playback
/// not started yet. The compositor treats it as "no audio" and falls back to
/// the degenerate render modes rather than blocking.
pub trait SpectrumSource {
    /// Latest available spectrum snapshot, if any.
    fn snapshot(&mut self) -> Option<AudioFrame>;
}

/// Two-state audio capability.
///
/// Host platforms gate audio-context creation on a first user gesture, so
/// the engine must tolerate `Uninitialized` indefinitely; the transition to
/// `Ready` happens once on that gesture (or an explicit start).
pub enum AudioCapability {
    /// No analysis node exists yet; every snapshot is `None`.
    Uninitialized,
    /// A live sampler is attached.
    Ready(Box<dyn SpectrumSource + Send>),
}

impl AudioCapability {
    /// Attach a sampler, moving to `Ready`.
    pub fn activate(&mut self, source: Box<dyn SpectrumSource + Send>) {
        *self = AudioCapability::Ready(source);
    }

    /// Poll the sampler; `None` while uninitialized or before first data.
    pub fn snapshot(&mut self) -> Option<AudioFrame> {
        match self {
            AudioCapability::Uninitialized => None,
            AudioCapability::Ready(source) => source.snapshot(),
        }
    }
}

/// Offline analyser over decoded PCM, driven by an explicit clock.
///
/// Matches the live analyser the preview uses: Hann window over the 256
/// samples ending at the cursor, magnitude normalized by the window length,
/// 0.8 temporal smoothing, then dB mapped from [-100, -30] onto [0, 255].
/// Export advances the cursor frame by frame so captured frames see exactly
/// the spectrum the preview would have shown at that instant.
pub struct PcmAnalyser {
    mono: Vec<f32>,
    sample_rate: u32,
    fft: Arc<dyn Fft<f32>>,
    window: [f32; FFT_SIZE],
    scratch: Vec<Complex<f32>>,
    smoothed: [f32; SPECTRUM_BINS],
    cursor: usize,
    primed: bool,
}

impl PcmAnalyser {
    /// Build an analyser over a decoded clip. Fails on empty PCM.
    pub fn new(pcm: &AudioPcm) -> SoniformResult<Self> {
        let mono = pcm.mono_mixdown();
        if mono.is_empty() {
            return Err(SoniformError::validation(
                "analyser requires non-empty PCM data",
            ));
        }
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(FFT_SIZE);

        let mut window = [0.0f32; FFT_SIZE];
        for (i, w) in window.iter_mut().enumerate() {
            *w = hann_window(i, FFT_SIZE);
        }

        Ok(Self {
            mono,
            sample_rate: pcm.sample_rate,
            fft,
            window,
            scratch: vec![Complex::new(0.0, 0.0); FFT_SIZE],
            smoothed: [0.0; SPECTRUM_BINS],
            cursor: 0,
            primed: false,
        })
    }

    /// Duration of the underlying clip in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.mono.len() as f64 / f64::from(self.sample_rate)
    }

    /// Move the analysis cursor to `secs` (clamped into the clip) and run
    /// one windowed FFT there, folding the result into the smoothed state.
    pub fn advance_to(&mut self, secs: f64) {
        let pos = (secs.max(0.0) * f64::from(self.sample_rate)) as usize;
        self.cursor = pos.min(self.mono.len());

        let start = self.cursor.saturating_sub(FFT_SIZE);
        for (i, c) in self.scratch.iter_mut().enumerate() {
            let sample = self.mono.get(start + i).copied().unwrap_or(0.0);
            *c = Complex::new(sample * self.window[i], 0.0);
        }
        self.fft.process(&mut self.scratch);

        for (i, slot) in self.smoothed.iter_mut().enumerate() {
            let mag = self.scratch[i].norm() / FFT_SIZE as f32;
            *slot = TIME_SMOOTHING * *slot + (1.0 - TIME_SMOOTHING) * mag;
        }
        self.primed = true;
    }
}

impl SpectrumSource for PcmAnalyser {
    fn snapshot(&mut self) -> Option<AudioFrame> {
        if !self.primed {
            return None;
        }
        let mut bins = [0u8; SPECTRUM_BINS];
        for (b, &mag) in bins.iter_mut().zip(self.smoothed.iter()) {
            *b = magnitude_to_byte(mag);
        }
        Some(AudioFrame::from_bins(bins))
    }
}

fn hann_window(index: usize, size: usize) -> f32 {
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}

fn magnitude_to_byte(mag: f32) -> u8 {
    if mag <= 0.0 {
        return 0;
    }
    let db = 20.0 * mag.log10();
    let t = (db - MIN_DECIBELS) / (MAX_DECIBELS - MIN_DECIBELS);
    (t * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/audio/sampler.rs"]
mod tests;
