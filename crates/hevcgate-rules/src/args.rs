//! NVENC HEVC argument assembly.
//!
//! The output is a flat token list in a fixed order. Downstream hosts splice
//! `-i <input>` and the output path in at [`IO_PLACEHOLDER`] and some of them
//! rely on flag positions, so the order below is part of the contract.

use crate::inputs::PolicyInputs;
use crate::stream_rule::{Overrides, Slot};
use hevcgate_probe::Stream;

/// Token the host replaces with its input/output options.
pub const IO_PLACEHOLDER: &str = "<io>";

/// Preset used when the configured one is blank.
pub const DEFAULT_PRESET: &str = "medium";

/// Lookahead window for NVENC rate control, in frames.
const RC_LOOKAHEAD: &str = "32";

/// Build the encoder arguments for a stream list.
///
/// Identical inputs always produce identical output. Optional sections that
/// do not apply are dropped, and empty tokens never appear.
pub fn build_arguments(streams: &[Stream], inputs: &PolicyInputs) -> Vec<String> {
    let overrides = Overrides::collect(streams);

    for rule in overrides.applied() {
        tracing::debug!(rule = rule.name, slot = ?rule.slot, "Stream override applied");
    }

    let preset = match inputs.ffmpeg_preset.trim() {
        "" => DEFAULT_PRESET,
        p => p,
    };
    let cqv = inputs.cqv.to_string();
    let bframe = inputs.bframe.to_string();

    let sections: Vec<Option<Vec<&str>>> = vec![
        Some(vec!["-hwaccel", "cuda"]),
        Some(vec!["-dn"]),
        Some(vec![IO_PLACEHOLDER]),
        overrides.args(Slot::Mapping).map(|a| a.to_vec()),
        Some(vec!["-c:v", "hevc_nvenc"]),
        Some(vec!["-preset", preset]),
        Some(vec!["-cq", cqv.as_str()]),
        // Constant quality governs size, so the bitrate is left unconstrained.
        Some(vec!["-b:v", "0"]),
        Some(vec!["-rc-lookahead", RC_LOOKAHEAD]),
        Some(vec!["-bf", bframe.as_str()]),
        Some(vec!["-a53cc", "0"]),
        inputs.ten_bit.then(|| vec!["-pix_fmt", "p010le"]),
        Some(vec!["-c:a", "copy"]),
        overrides.args(Slot::Subtitles).map(|a| a.to_vec()),
        overrides.args(Slot::MuxingQueue).map(|a| a.to_vec()),
    ];

    sections
        .into_iter()
        .flatten()
        .flatten()
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
