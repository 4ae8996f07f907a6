//! Decoded audio access. Decoding itself is a platform capability: we shell
//! out to the system `ffmpeg` binary rather than linking codec internals.

use crate::foundation::error::SoniformResult;

/// Interleaved f32 PCM plus its format.
#[derive(Clone, Debug)]
pub struct AudioPcm {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Interleaved samples, `frames * channels` long.
    pub interleaved_f32: Vec<f32>,
}

impl AudioPcm {
    /// Clip duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.channels == 0 || self.sample_rate == 0 {
            return 0.0;
        }
        let frames = self.interleaved_f32.len() / usize::from(self.channels);
        frames as f64 / f64::from(self.sample_rate)
    }

    /// Average all channels down to mono for analysis.
    pub fn mono_mixdown(&self) -> Vec<f32> {
        let ch = usize::from(self.channels.max(1));
        self.interleaved_f32
            .chunks_exact(ch)
            .map(|frame| frame.iter().sum::<f32>() / ch as f32)
            .collect()
    }
}

/// Decode any audio file into stereo interleaved f32 PCM at `sample_rate`.
#[cfg(feature = "media-ffmpeg")]
pub fn decode_audio_f32_stereo(
    path: &std::path::Path,
    sample_rate: u32,
) -> SoniformResult<AudioPcm> {
    use crate::foundation::error::SoniformError;

    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-i"])
        .arg(path)
        .args([
            "-vn",
            "-f",
            "f32le",
            "-acodec",
            "pcm_f32le",
            "-ac",
            "2",
            "-ar",
            &sample_rate.to_string(),
            "pipe:1",
        ])
        .output()
        .map_err(|e| {
            SoniformError::evaluation(format!("failed to run ffmpeg for audio decode: {e}"))
        })?;

    if !out.status.success() {
        let msg = String::from_utf8_lossy(&out.stderr);
        return Err(SoniformError::evaluation(format!(
            "ffmpeg audio decode failed for '{}': {}",
            path.display(),
            msg.trim()
        )));
    }

    let mut interleaved = Vec::with_capacity(out.stdout.len() / 4);
    for chunk in out.stdout.chunks_exact(4) {
        interleaved.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }

    Ok(AudioPcm {
        sample_rate,
        channels: 2,
        interleaved_f32: interleaved,
    })
}

/// Decode any audio file into stereo interleaved f32 PCM at `sample_rate`.
#[cfg(not(feature = "media-ffmpeg"))]
pub fn decode_audio_f32_stereo(
    _path: &std::path::Path,
    _sample_rate: u32,
) -> SoniformResult<AudioPcm> {
    Err(crate::foundation::error::SoniformError::evaluation(
        "audio file decoding requires the 'media-ffmpeg' feature",
    ))
}

/// Write interleaved samples as raw little-endian f32 bytes.
pub fn write_pcm_to_f32le_file(
    samples_interleaved: &[f32],
    out_path: &std::path::Path,
) -> SoniformResult<()> {
    use crate::foundation::error::SoniformError;

    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            SoniformError::evaluation(format!(
                "failed to create audio output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let mut bytes = Vec::<u8>::with_capacity(samples_interleaved.len() * 4);
    for &sample in samples_interleaved {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    std::fs::write(out_path, bytes).map_err(|e| {
        SoniformError::evaluation(format!(
            "failed to write audio file '{}': {e}",
            out_path.display()
        ))
    })
}
