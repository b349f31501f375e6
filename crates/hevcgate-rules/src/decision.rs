//! The gate's entry point.

use crate::args::{build_arguments, IO_PLACEHOLDER};
use crate::bitrate::{assess, SkipReason, Verdict};
use crate::inputs::PolicyInputs;
use hevcgate_probe::{inspect, MediaFile, Medium};
use serde::Serialize;

/// Output container, fixed.
pub const OUTPUT_CONTAINER: &str = "mkv";

/// Result of evaluating one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    /// Whether the host should invoke the encoder.
    pub should_process: bool,
    /// Output container extension.
    pub container: &'static str,
    /// Encoder arguments, empty when skipping.
    pub arguments: Vec<String>,
    /// Human-readable trace of each step, for operators.
    pub log: Vec<String>,
}

impl Decision {
    fn skip(log: Vec<String>) -> Self {
        Self {
            should_process: false,
            container: OUTPUT_CONTAINER,
            arguments: Vec::new(),
            log,
        }
    }

    /// Arguments joined with single spaces, the host's legacy preset string.
    pub fn preset(&self) -> String {
        self.arguments.join(" ")
    }

    /// Arguments before and after the `<io>` placeholder. Without a
    /// placeholder everything is returned as output arguments.
    pub fn split_io(&self) -> (&[String], &[String]) {
        match self.arguments.iter().position(|a| a == IO_PLACEHOLDER) {
            Some(i) => (&self.arguments[..i], &self.arguments[i + 1..]),
            None => (&self.arguments[..0], &self.arguments[..]),
        }
    }
}

/// Decide whether `file` should be re-encoded and build the arguments.
///
/// Never fails: missing streams, bitrates and frame rates all resolve to a
/// skip or a documented fallback.
pub fn evaluate(file: &MediaFile, inputs: &PolicyInputs) -> Decision {
    let mut log = Vec::new();

    if file.file_medium != Medium::Video {
        log.push(format!("✘ Not a video ({})", file.file_medium));
        tracing::debug!(reason = %SkipReason::NotVideo, "Skipping file");
        return Decision::skip(log);
    }
    log.push("✔ Video detected".to_string());

    let Some(video) = inspect(file) else {
        log.push("✘ No video stream found".to_string());
        tracing::debug!(reason = %SkipReason::NoVideoStream, "Skipping file");
        return Decision::skip(log);
    };

    log.push(format!(
        "Stream: {}x{}@{}fps",
        dimension(video.width),
        dimension(video.height),
        video.frame_rate
    ));
    log.push(match video.bit_rate {
        Some(br) => format!("Bitrate: {}", mbps(br)),
        None => "Bitrate: unknown".to_string(),
    });

    let assessment = assess(&video, inputs);
    log.push(match assessment.optimal_bitrate {
        Some(optimal) => format!("Optimal Bitrate: {}", mbps(optimal as f64)),
        None => "Optimal Bitrate: unknown, frame size unavailable".to_string(),
    });

    // HEVC that transcodes without a gain could not be judged by the gain gate.
    match assessment.gain {
        Some(gain) => log.push(format!("Expected Gain: {:.1}%", gain * 100.0)),
        None if video.is_hevc() && assessment.verdict.is_transcode() => {
            log.push("Expected Gain: unknown, bitrate or frame size unavailable".to_string())
        }
        None => {}
    }

    if let Verdict::Skip(reason) = &assessment.verdict {
        log.push(match reason {
            SkipReason::LowResolutionHevc { threshold, .. } => {
                format!("✔ HEVC & height ≤ {threshold}px, skipping")
            }
            SkipReason::InsufficientGain { minimum, .. } => {
                format!("✔ Gain < {}%, skipping", percent(*minimum))
            }
            other => format!("✔ Skipping: {other}"),
        });
        tracing::info!(codec = %video.codec, %reason, "Skipping file");
        return Decision::skip(log);
    }

    let arguments = build_arguments(file.streams(), inputs);
    log.push("✔ Transcoding with NVENC HEVC".to_string());
    tracing::info!(
        codec = %video.codec,
        optimal_bitrate = ?assessment.optimal_bitrate,
        "Transcoding to NVENC HEVC"
    );

    Decision {
        should_process: true,
        container: OUTPUT_CONTAINER,
        arguments,
        log,
    }
}

// Percentage rounded to one decimal, without trailing zeros.
fn percent(fraction: f64) -> f64 {
    (fraction * 1000.0).round() / 10.0
}

fn dimension(pixels: Option<u32>) -> String {
    pixels.map_or_else(|| "unknown".to_string(), |p| p.to_string())
}

fn mbps(bits_per_second: f64) -> String {
    format!("{:.2} Mbps", bits_per_second / 1e6)
}
