//! Stream inspection: canonical video attributes from arbitrary probe data.
//!
//! Every lookup here is infallible. Missing data resolves to a documented
//! fallback or to `None`, and the policy decides what `None` means.

use crate::types::{MediaFile, Stream};

/// Frame rate assumed when mediainfo does not report a usable one.
pub const DEFAULT_FRAME_RATE: f64 = 30.0;

/// Attributes of the primary video stream that the bitrate policy needs.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoProfile {
    /// Lowercased codec name, empty when the probe did not report one.
    pub codec: String,
    /// Frame size, `None` when the probe did not report it.
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Current bitrate in bits per second, `None` when unknown.
    pub bit_rate: Option<f64>,
    pub frame_rate: f64,
}

impl VideoProfile {
    pub fn is_hevc(&self) -> bool {
        self.codec == "hevc"
    }
}

/// First stream whose type is video.
pub fn primary_video(file: &MediaFile) -> Option<&Stream> {
    file.streams().iter().find(|s| s.is_video())
}

/// The stream's own bitrate when it parses as a finite number, otherwise the
/// container-level bitrate.
pub fn resolve_bit_rate(video: &Stream, file: &MediaFile) -> Option<f64> {
    video
        .bit_rate
        .as_deref()
        .and_then(parse_number)
        .or_else(|| file.container_bit_rate())
}

/// Frame rate from the first mediainfo track, or [`DEFAULT_FRAME_RATE`].
///
/// ffprobe often lacks a usable frame rate for some codecs, so the
/// independent mediainfo probe is the source here. Zero and negative rates
/// count as unusable.
pub fn resolve_frame_rate(file: &MediaFile) -> f64 {
    file.media_info
        .as_ref()
        .and_then(|mi| mi.track.first())
        .and_then(|t| t.frame_rate.as_deref())
        .and_then(parse_number)
        .filter(|fps| *fps > 0.0)
        .unwrap_or(DEFAULT_FRAME_RATE)
}

/// Parse a probe value as a finite number.
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Inspect a file. Returns `None` when there is no video stream.
pub fn inspect(file: &MediaFile) -> Option<VideoProfile> {
    let video = primary_video(file)?;

    let profile = VideoProfile {
        codec: video.codec().unwrap_or_default(),
        width: video.width,
        height: video.height,
        bit_rate: resolve_bit_rate(video, file),
        frame_rate: resolve_frame_rate(file),
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        codec = %profile.codec,
        width = ?profile.width,
        height = ?profile.height,
        bit_rate = ?profile.bit_rate,
        frame_rate = profile.frame_rate,
        "Inspected primary video stream"
    );

    Some(profile)
}
