use super::*;
use crate::config::VisualConfig;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Canvas;
use std::cell::RefCell;

fn test_pcm(secs: f64) -> AudioPcm {
    let sample_rate = 8_000u32;
    let frames = (f64::from(sample_rate) * secs) as usize;
    let mut interleaved = Vec::with_capacity(frames * 2);
    for i in 0..frames {
        let t = i as f64 / f64::from(sample_rate);
        let v = (std::f64::consts::TAU * 440.0 * t).sin() as f32 * 0.5;
        interleaved.push(v);
        interleaved.push(v);
    }
    AudioPcm {
        sample_rate,
        channels: 2,
        interleaved_f32: interleaved,
    }
}

fn test_opts(repeat: u32) -> ExportOpts {
    ExportOpts {
        fps: Fps { num: 30, den: 1 },
        repeat_count: repeat,
        audio_bitrate_kbps: 128,
        video_bitrate_kbps: None,
        mux_audio: false,
        audio_scratch_path: None,
    }
}

fn test_compositor() -> Compositor {
    Compositor::new(Canvas::new(64, 36).unwrap(), 8).unwrap()
}

#[test]
fn full_run_captures_every_frame_across_loops() {
    let mut comp = test_compositor();
    let cfg = VisualConfig::default();
    let pcm = test_pcm(0.5);
    let opts = test_opts(2);
    let mut sink = InMemorySink::new();
    let cancel = CancelHandle::new();
    let statuses = RefCell::new(Vec::new());

    let outcome = run_export(&mut comp, &cfg, &pcm, &opts, &mut sink, &cancel, |s| {
        statuses.borrow_mut().push(s)
    })
    .unwrap();

    // 0.5s clip x 2 loops at 30fps.
    assert_eq!(outcome, ExportOutcome::Complete { frames: 30 });
    assert_eq!(sink.frames().len(), 30);
    assert!(sink.finalized());

    // Frame indices are strictly increasing.
    let indices: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert!(indices.windows(2).all(|w| w[0] < w[1]));

    let statuses = statuses.into_inner();
    assert_eq!(statuses.first(), Some(&ExportStatus::Preparing));
    assert!(statuses.contains(&ExportStatus::Recording {
        loop_index: 1,
        total_loops: 2
    }));
    assert!(statuses.contains(&ExportStatus::Recording {
        loop_index: 2,
        total_loops: 2
    }));
    assert_eq!(statuses.last(), Some(&ExportStatus::Complete));
}

#[test]
fn cancel_stops_the_recorder_and_offers_no_output() {
    let mut comp = test_compositor();
    let cfg = VisualConfig::default();
    let pcm = test_pcm(0.5);
    let opts = test_opts(1);
    let mut sink = InMemorySink::new();
    let cancel = CancelHandle::new();
    let cancel_from_ui = cancel.clone();
    let statuses = RefCell::new(Vec::new());

    let outcome = run_export(&mut comp, &cfg, &pcm, &opts, &mut sink, &cancel, |s| {
        statuses.borrow_mut().push(s);
        // Cancel as soon as recording starts, before any "ended" event.
        if matches!(s, ExportStatus::Recording { .. }) {
            cancel_from_ui.cancel();
        }
    })
    .unwrap();

    assert_eq!(outcome, ExportOutcome::Cancelled);
    assert!(cancel.is_cancelled(), "abort flag must be set");
    assert!(!sink.finalized(), "a cancelled run must never finalize output");
    assert!(sink.frames().len() <= 2, "cancellation must be immediate");
    assert_eq!(statuses.into_inner().last(), Some(&ExportStatus::Idle));
}

#[test]
fn cancel_is_idempotent_and_pre_cancel_aborts_before_any_frame() {
    let mut comp = test_compositor();
    let cfg = VisualConfig::default();
    let pcm = test_pcm(0.2);
    let opts = test_opts(1);
    let mut sink = InMemorySink::new();
    let cancel = CancelHandle::new();
    cancel.cancel();
    cancel.cancel();

    let outcome =
        run_export(&mut comp, &cfg, &pcm, &opts, &mut sink, &cancel, |_| {}).unwrap();
    assert_eq!(outcome, ExportOutcome::Cancelled);
    assert!(sink.frames().is_empty());
    assert!(!sink.finalized());
}

#[test]
fn empty_clip_is_export_fatal() {
    let mut comp = test_compositor();
    let cfg = VisualConfig::default();
    let pcm = AudioPcm {
        sample_rate: 8_000,
        channels: 2,
        interleaved_f32: Vec::new(),
    };
    let opts = test_opts(1);
    let mut sink = InMemorySink::new();
    let cancel = CancelHandle::new();
    let statuses = RefCell::new(Vec::new());

    let err = run_export(&mut comp, &cfg, &pcm, &opts, &mut sink, &cancel, |s| {
        statuses.borrow_mut().push(s)
    })
    .unwrap_err();

    assert!(matches!(err, SoniformError::Export(_)));
    assert_eq!(statuses.into_inner().last(), Some(&ExportStatus::Error));
    assert!(sink.config().is_none(), "the sink must never be opened");
}

#[test]
fn repeat_count_is_clamped_to_the_supported_range() {
    let mut comp = test_compositor();
    let cfg = VisualConfig::default();
    let pcm = test_pcm(0.2);
    let mut opts = test_opts(9);
    opts.repeat_count = 9;
    let mut sink = InMemorySink::new();
    let cancel = CancelHandle::new();

    let outcome =
        run_export(&mut comp, &cfg, &pcm, &opts, &mut sink, &cancel, |_| {}).unwrap();
    // Clamped to 3 repeats: 0.2s x 3 at 30fps.
    assert_eq!(outcome, ExportOutcome::Complete { frames: 18 });
}
