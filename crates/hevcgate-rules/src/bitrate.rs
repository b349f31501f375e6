//! Bitrate policy: the optimal bitrate estimate and the HEVC gates.
//!
//! The estimate is a linear heuristic, `width * height * fps * compression`.
//! Larger frames and higher frame rates need proportionally more bits; the
//! compression coefficient is an empirically tuned knob.

use crate::inputs::PolicyInputs;
use hevcgate_probe::VideoProfile;

/// Why a file was left alone.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The host did not classify the file as video.
    NotVideo,
    /// Classified as video but no video stream was probed.
    NoVideoStream,
    /// Already HEVC at or below the low resolution threshold.
    LowResolutionHevc { height: u32, threshold: u32 },
    /// Already HEVC and within the acceptable bitrate envelope.
    InsufficientGain { gain: f64, minimum: f64 },
}

/// Outcome of the gates.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Transcode,
    Skip(SkipReason),
}

/// Everything the policy computed for one video stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    /// `None` when the frame size is unknown.
    pub optimal_bitrate: Option<u64>,
    /// Expected fractional reduction. Only computed for HEVC sources above
    /// the low resolution threshold with a known bitrate.
    pub gain: Option<f64>,
    pub verdict: Verdict,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotVideo => write!(f, "not a video"),
            SkipReason::NoVideoStream => write!(f, "no video stream"),
            SkipReason::LowResolutionHevc { height, threshold } => {
                write!(f, "HEVC at {height}px, at or below {threshold}px")
            }
            SkipReason::InsufficientGain { gain, minimum } => write!(
                f,
                "expected gain {:.1}% below {}%",
                gain * 100.0,
                minimum * 100.0
            ),
        }
    }
}

impl Verdict {
    pub fn is_transcode(&self) -> bool {
        matches!(self, Verdict::Transcode)
    }
}

/// `floor(width * height * fps * compression)`.
///
/// Non-finite or negative products yield 0.
pub fn optimal_bitrate(width: u32, height: u32, fps: f64, compression: f64) -> u64 {
    let raw = f64::from(width) * f64::from(height) * fps * compression;
    if raw.is_finite() && raw > 0.0 {
        raw.floor() as u64
    } else {
        0
    }
}

/// Fractional reduction from `current` down to `optimal`.
///
/// `None` when the current bitrate is unknown, zero, negative or not finite.
pub fn compression_gain(current: Option<f64>, optimal: u64) -> Option<f64> {
    let current = current.filter(|c| c.is_finite() && *c > 0.0)?;
    Some((current - optimal as f64) / current)
}

/// Run the HEVC gates against the primary video stream.
///
/// Non-HEVC sources always transcode. HEVC sources are skipped when at or
/// below `low_res_threshold`, or when the expected gain is below
/// `min_compression_gain`. An HEVC source whose height, width or bitrate is
/// unknown cannot be judged by a gate and transcodes.
pub fn assess(video: &VideoProfile, inputs: &PolicyInputs) -> Assessment {
    let optimal_bitrate = match (video.width, video.height) {
        (Some(width), Some(height)) => Some(optimal_bitrate(
            width,
            height,
            video.frame_rate,
            inputs.target_codec_compression,
        )),
        _ => None,
    };

    let transcode = Assessment {
        optimal_bitrate,
        gain: None,
        verdict: Verdict::Transcode,
    };

    if !video.is_hevc() {
        return transcode;
    }
    let Some(height) = video.height else {
        return transcode;
    };

    if height <= inputs.low_res_threshold {
        return Assessment {
            verdict: Verdict::Skip(SkipReason::LowResolutionHevc {
                height,
                threshold: inputs.low_res_threshold,
            }),
            ..transcode
        };
    }

    let gain = optimal_bitrate.and_then(|optimal| compression_gain(video.bit_rate, optimal));
    let verdict = match gain {
        Some(g) if g < inputs.min_compression_gain => Verdict::Skip(SkipReason::InsufficientGain {
            gain: g,
            minimum: inputs.min_compression_gain,
        }),
        _ => Verdict::Transcode,
    };

    Assessment {
        optimal_bitrate,
        gain,
        verdict,
    }
}
