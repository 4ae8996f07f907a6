//! Soniform is an audio-reactive visual composition and video rendering
//! engine.
//!
//! It fuses a frequency-domain audio analysis signal with a layered visual
//! pipeline (background + filter, vignette, one of eight spectrum styles,
//! logo, particles, post-process overlays) into one deterministic image per
//! frame, and renders identically whether driven live for preview or
//! captured synchronously for export.
//!
//! # Pipeline overview
//!
//! 1. **Sample**: a [`SpectrumSource`] exposes the latest 128-bin magnitude
//!    snapshot (`AudioFrame`), or nothing while audio has not started.
//! 2. **Map**: [`map_band`] converts logical band positions into
//!    gain-compensated magnitudes with log-like frequency placement.
//! 3. **Smooth**: [`BandSmoother`] owns per-band temporal continuity.
//! 4. **Compose**: [`Compositor::render_frame`] runs the full layered pass
//!    sequence into a premultiplied RGBA8 frame buffer.
//! 5. **Capture** (optional): [`run_export`] replays the same compositor
//!    over N clip repetitions into a [`FrameSink`], with ffmpeg MP4 muxing.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: every stochastic effect derives from an
//!   explicit seed, so preview and export agree frame for frame.
//! - **The render loop never throws**: bad per-frame configuration skips a
//!   draw or reallocates state; errors surface only from construction and
//!   from the export pipeline.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod audio;
mod config;
mod encode;
mod export;
mod foundation;
mod overlays;
mod particles;
mod render;
mod styles;

pub use assets::decode::{PreparedImage, decode_image};
pub use assets::logo::key_out_background;
pub use audio::pcm::{AudioPcm, decode_audio_f32_stereo, write_pcm_to_f32le_file};
pub use audio::sampler::{
    AudioCapability, AudioFrame, FFT_SIZE, PcmAnalyser, SPECTRUM_BINS, SpectrumSource,
};
pub use audio::smoothing::BandSmoother;
pub use audio::spectrum::{average_level, map_band};
pub use config::{
    ColorMode, FilterKind, LogoPos, OverlayKind, ParticleKind, SpectrumPos, VisualConfig,
    VisualStyle,
};
pub use encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, is_ffmpeg_on_path};
pub use encode::sink::{AudioInputConfig, FrameSink, InMemorySink, SinkConfig};
pub use export::capture::{
    CancelHandle, ExportOpts, ExportOutcome, ExportStatus, default_output_name, export_video,
    run_export,
};
pub use foundation::core::{Canvas, FrameIndex, FrameRGBA, Fps, Rgb8, Rgba8Premul};
pub use foundation::error::{SoniformError, SoniformResult};
pub use render::frame::Compositor;
