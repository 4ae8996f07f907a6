use super::*;
use crate::audio::pcm::AudioPcm;

fn sine_pcm(freq_hz: f64, sample_rate: u32, secs: f64) -> AudioPcm {
    let frames = (f64::from(sample_rate) * secs) as usize;
    let mut interleaved = Vec::with_capacity(frames * 2);
    for i in 0..frames {
        let t = i as f64 / f64::from(sample_rate);
        let v = (std::f64::consts::TAU * freq_hz * t).sin() as f32 * 0.8;
        interleaved.push(v);
        interleaved.push(v);
    }
    AudioPcm {
        sample_rate,
        channels: 2,
        interleaved_f32: interleaved,
    }
}

#[test]
fn empty_pcm_is_rejected() {
    let pcm = AudioPcm {
        sample_rate: 48_000,
        channels: 2,
        interleaved_f32: Vec::new(),
    };
    assert!(PcmAnalyser::new(&pcm).is_err());
}

#[test]
fn no_snapshot_before_the_first_advance() {
    let pcm = sine_pcm(440.0, 48_000, 0.1);
    let mut analyser = PcmAnalyser::new(&pcm).unwrap();
    assert!(analyser.snapshot().is_none());
    analyser.advance_to(0.05);
    assert!(analyser.snapshot().is_some());
}

#[test]
fn sine_peak_lands_in_the_expected_bin() {
    let sample_rate = 48_000u32;
    let freq = 3_000.0;
    let pcm = sine_pcm(freq, sample_rate, 0.5);
    let mut analyser = PcmAnalyser::new(&pcm).unwrap();
    // Advance several times so the temporal smoothing settles.
    for i in 1..=20 {
        analyser.advance_to(0.02 * f64::from(i));
    }
    let frame = analyser.snapshot().unwrap();
    let bins = frame.bins();
    let peak = bins
        .iter()
        .enumerate()
        .max_by_key(|&(_, &v)| v)
        .map(|(i, _)| i)
        .unwrap();

    let bin_hz = f64::from(sample_rate) / FFT_SIZE as f64;
    let expected = (freq / bin_hz).round() as usize;
    assert!(
        peak.abs_diff(expected) <= 1,
        "peak bin {peak}, expected near {expected}"
    );
}

#[test]
fn silence_produces_zero_bins() {
    let pcm = AudioPcm {
        sample_rate: 48_000,
        channels: 2,
        interleaved_f32: vec![0.0; 48_000],
    };
    let mut analyser = PcmAnalyser::new(&pcm).unwrap();
    analyser.advance_to(0.25);
    let frame = analyser.snapshot().unwrap();
    assert!(frame.bins().iter().all(|&v| v == 0));
}

#[test]
fn uninitialized_capability_yields_none_indefinitely() {
    let mut cap = AudioCapability::Uninitialized;
    for _ in 0..3 {
        assert!(cap.snapshot().is_none());
    }

    let pcm = sine_pcm(440.0, 48_000, 0.1);
    let mut analyser = PcmAnalyser::new(&pcm).unwrap();
    analyser.advance_to(0.05);
    cap.activate(Box::new(analyser));
    assert!(cap.snapshot().is_some());
}
