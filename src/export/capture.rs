//! Export capture: drive the compositor synchronously over N repetitions of
//! the audio clip, streaming every frame into a sink.
//!
//! The controller is a small state machine
//! (`idle -> preparing -> recording[loop 1..N] -> processing -> complete|error`)
//! with one authoritative elapsed-time source per loop iteration (the frame
//! clock folded into the clip duration) and an idempotent `cancel()`
//! reachable from every state. A cancelled run tears the sink down without
//! finalizing, so no partial output is ever offered.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use crate::audio::pcm::{AudioPcm, write_pcm_to_f32le_file};
use crate::audio::sampler::{PcmAnalyser, SpectrumSource};
use crate::config::VisualConfig;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::{AudioInputConfig, FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Fps};
use crate::foundation::error::{SoniformError, SoniformResult};
use crate::render::frame::Compositor;

/// User-facing export state. Surfaced instead of raw errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportStatus {
    /// No export running.
    Idle,
    /// Decoding audio and opening the sink.
    Preparing,
    /// Capturing frames; `loop_index` is 1-based.
    Recording {
        /// Current repetition, 1-based.
        loop_index: u32,
        /// Total repetitions.
        total_loops: u32,
    },
    /// Finalizing the container.
    Processing,
    /// Output file is ready.
    Complete,
    /// Export failed; see the returned error.
    Error,
}

/// How a capture run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    /// All frames captured and the sink finalized.
    Complete {
        /// Number of frames pushed.
        frames: u64,
    },
    /// Cancelled cooperatively; the sink was aborted, nothing was finalized.
    Cancelled,
}

/// Export parameters.
#[derive(Clone, Debug)]
pub struct ExportOpts {
    /// Capture frame rate.
    pub fps: Fps,
    /// How many times the clip repeats (1-3).
    pub repeat_count: u32,
    /// Encoded audio bitrate in kbit/s.
    pub audio_bitrate_kbps: u32,
    /// Encoded video bitrate in kbit/s; `None` for encoder default.
    pub video_bitrate_kbps: Option<u32>,
    /// Mux the replayed audio into the output. Disabled only by tests that
    /// capture into memory.
    pub mux_audio: bool,
    /// Scratch path for the raw PCM side file; `None` uses the temp dir.
    pub audio_scratch_path: Option<PathBuf>,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            fps: Fps { num: 60, den: 1 },
            repeat_count: 1,
            audio_bitrate_kbps: 128,
            video_bitrate_kbps: Some(8_000),
            mux_audio: true,
            audio_scratch_path: None,
        }
    }
}

/// Shared cancellation flag; cloneable into UI handlers.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Create a fresh, unset handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent; reachable from every state.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Timestamped default output name, mirroring the preview's download names.
pub fn default_output_name() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("visualizer_{secs}.mp4")
}

/// Run a capture against `sink`, invoking `on_status` at every state
/// transition. The same compositor renders preview and capture; nothing in
/// the frame path differs between the two.
pub fn run_export(
    compositor: &mut Compositor,
    cfg: &VisualConfig,
    pcm: &AudioPcm,
    opts: &ExportOpts,
    sink: &mut dyn FrameSink,
    cancel: &CancelHandle,
    mut on_status: impl FnMut(ExportStatus),
) -> SoniformResult<ExportOutcome> {
    on_status(ExportStatus::Preparing);

    let loop_secs = pcm.duration_secs();
    if loop_secs <= 0.0 {
        on_status(ExportStatus::Error);
        return Err(SoniformError::export("export requires a non-empty audio clip"));
    }
    let repeat = opts.repeat_count.clamp(1, 3);
    let total_secs = loop_secs * f64::from(repeat);
    let total_frames = opts.fps.secs_to_frames_floor(total_secs).max(1);
    let frames_per_loop = opts.fps.secs_to_frames_floor(loop_secs).max(1);
    // Backstop well past the expected duration; a driver bug must not spin
    // the recorder forever.
    let max_frames = total_frames + opts.fps.secs_to_frames_floor(2.0).max(1);

    let mut analyser = PcmAnalyser::new(pcm).inspect_err(|_| on_status(ExportStatus::Error))?;

    // Audio side file: the clip repeated once per loop.
    let audio_path = if opts.mux_audio {
        let path = opts.audio_scratch_path.clone().unwrap_or_else(|| {
            std::env::temp_dir().join(format!("soniform_export_{}.f32le", std::process::id()))
        });
        let mut repeated =
            Vec::with_capacity(pcm.interleaved_f32.len() * repeat as usize);
        for _ in 0..repeat {
            repeated.extend_from_slice(&pcm.interleaved_f32);
        }
        write_pcm_to_f32le_file(&repeated, &path)
            .inspect_err(|_| on_status(ExportStatus::Error))?;
        Some(path)
    } else {
        None
    };

    let cleanup_audio = |path: &Option<PathBuf>| {
        if let Some(p) = path
            && std::fs::remove_file(p).is_err()
        {
            warn!(path = %p.display(), "failed to remove export audio scratch file");
        }
    };

    let canvas = compositor.canvas();
    let begin = sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps: opts.fps,
        audio: audio_path.as_ref().map(|path| AudioInputConfig {
            path: path.clone(),
            sample_rate: pcm.sample_rate,
            channels: pcm.channels,
            bitrate_kbps: opts.audio_bitrate_kbps,
        }),
    });
    if let Err(e) = begin {
        cleanup_audio(&audio_path);
        on_status(ExportStatus::Error);
        return Err(e);
    }

    debug!(total_frames, repeat, "export capture started");
    let mut current_loop = 0u32;

    for f in 0..total_frames.min(max_frames) {
        if cancel.is_cancelled() {
            sink.abort();
            cleanup_audio(&audio_path);
            debug!(frame = f, "export cancelled");
            on_status(ExportStatus::Idle);
            return Ok(ExportOutcome::Cancelled);
        }

        let loop_index = (f / frames_per_loop).min(u64::from(repeat) - 1) as u32 + 1;
        if loop_index != current_loop {
            current_loop = loop_index;
            on_status(ExportStatus::Recording {
                loop_index,
                total_loops: repeat,
            });
        }

        let t_total = opts.fps.frames_to_secs(f);
        let t_loop = t_total % loop_secs;
        analyser.advance_to(t_loop);
        let audio = analyser.snapshot();

        let frame = compositor.render_frame(cfg, audio.as_ref(), t_total);
        if let Err(e) = sink.push_frame(FrameIndex(f), frame) {
            sink.abort();
            cleanup_audio(&audio_path);
            on_status(ExportStatus::Error);
            return Err(e);
        }
    }

    // Natural end of recording: one final cancellation check before the
    // container is finalized, so a late cancel still produces no file.
    if cancel.is_cancelled() {
        sink.abort();
        cleanup_audio(&audio_path);
        on_status(ExportStatus::Idle);
        return Ok(ExportOutcome::Cancelled);
    }

    on_status(ExportStatus::Processing);
    let ended = sink.end();
    cleanup_audio(&audio_path);
    match ended {
        Ok(()) => {
            on_status(ExportStatus::Complete);
            Ok(ExportOutcome::Complete {
                frames: total_frames,
            })
        }
        Err(e) => {
            on_status(ExportStatus::Error);
            Err(e)
        }
    }
}

/// Convenience wrapper: decode `audio_path`, encode to `out_path` (or a
/// timestamped default name) through ffmpeg, and run the capture. Returns
/// the output path, or `None` when the run was cancelled.
pub fn export_video(
    compositor: &mut Compositor,
    cfg: &VisualConfig,
    audio_path: &std::path::Path,
    out_path: Option<PathBuf>,
    opts: &ExportOpts,
    cancel: &CancelHandle,
    on_status: impl FnMut(ExportStatus),
) -> SoniformResult<Option<PathBuf>> {
    let pcm = crate::audio::pcm::decode_audio_f32_stereo(audio_path, 48_000)?;
    if pcm.interleaved_f32.is_empty() {
        return Err(SoniformError::export(format!(
            "audio file '{}' decoded to no samples",
            audio_path.display()
        )));
    }

    let out_path = out_path.unwrap_or_else(|| PathBuf::from(default_output_name()));
    let mut sink_opts = FfmpegSinkOpts::new(&out_path);
    sink_opts.video_bitrate_kbps = opts.video_bitrate_kbps;
    let mut sink = FfmpegSink::new(sink_opts);

    match run_export(compositor, cfg, &pcm, opts, &mut sink, cancel, on_status)? {
        ExportOutcome::Complete { .. } => Ok(Some(out_path)),
        ExportOutcome::Cancelled => Ok(None),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/capture.rs"]
mod tests;
