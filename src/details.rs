//! Plugin descriptor handed to the host pipeline.

use hevcgate_rules::PolicyInputs;
use serde::Serialize;

pub const PLUGIN_ID: &str = "Tdarr_Plugin_Soggys_NVENC_HEVC_CQV_Optimised_Bitrate";
pub const PLUGIN_VERSION: &str = "1.1.0";

const DESCRIPTION: &str = "\
[Contains built-in filter] MEDIAINFO HAS TO BE ENABLED IN YOUR LIBRARY.
Transcodes with NVENC at the configured CQ:V value.
Files are transcoded when their bitrate exceeds the optimal bitrate, which accounts for resolution and frame rate.
The optimal bitrate is tuned with targetCodecCompression. Smaller values target lower bitrates.
The FFmpeg preset is configurable and defaults to medium.
HEVC files with height at or below lowResThreshold are not transcoded.
Files not already in HEVC are always transcoded.
The output container is MKV.
If CQ:V and targetCodecCompression are misaligned you may hit an infinite transcode loop. \
Raising targetCodecCompression lets you lower CQ:V for higher quality, and vice versa.";

/// Value type of a host input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Number,
    Boolean,
    String,
}

/// How the host renders an input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputUi {
    #[serde(rename = "type")]
    pub widget: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<&'static str>,
}

/// One operator tunable as presented to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: InputKind,
    pub default_value: serde_json::Value,
    #[serde(rename = "inputUI")]
    pub input_ui: InputUi,
    pub tooltip: &'static str,
}

/// Static metadata the host uses to list and configure the plugin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginDetails {
    pub id: &'static str,
    #[serde(rename = "Stage")]
    pub stage: &'static str,
    #[serde(rename = "Name")]
    pub name: &'static str,
    #[serde(rename = "Type")]
    pub media_type: &'static str,
    #[serde(rename = "Operation")]
    pub operation: &'static str,
    #[serde(rename = "Description")]
    pub description: &'static str,
    #[serde(rename = "Version")]
    pub version: &'static str,
    #[serde(rename = "Tags")]
    pub tags: &'static str,
    #[serde(rename = "Inputs")]
    pub inputs: Vec<InputDescriptor>,
}

fn text_input(
    name: &'static str,
    kind: InputKind,
    default_value: serde_json::Value,
    tooltip: &'static str,
) -> InputDescriptor {
    InputDescriptor {
        name,
        kind,
        default_value,
        input_ui: InputUi {
            widget: "text",
            options: Vec::new(),
        },
        tooltip,
    }
}

/// Build the descriptor. Defaults come from [`PolicyInputs::default`].
pub fn details() -> PluginDetails {
    let defaults = PolicyInputs::default();

    let inputs = vec![
        text_input(
            "targetCodecCompression",
            InputKind::Number,
            defaults.target_codec_compression.into(),
            "A guessed compression ratio used to compute the optimal bitrate. e.g. 0.08",
        ),
        text_input(
            "cqv",
            InputKind::Number,
            defaults.cqv.into(),
            "Constant quality value for NVENC (lower = higher quality). e.g. 28",
        ),
        text_input(
            "bframe",
            InputKind::Number,
            defaults.bframe.into(),
            "Number of B-frames (0-5). Set 0 to disable.",
        ),
        InputDescriptor {
            name: "ten_bit",
            kind: InputKind::Boolean,
            default_value: defaults.ten_bit.into(),
            input_ui: InputUi {
                widget: "dropdown",
                options: vec!["true", "false"],
            },
            tooltip: "Enable 10-bit output (p010le) if supported.",
        },
        text_input(
            "ffmpeg_preset",
            InputKind::String,
            defaults.ffmpeg_preset.into(),
            "FFmpeg preset for encoding (veryfast, fast, medium, slow, etc.).",
        ),
        text_input(
            "lowResThreshold",
            InputKind::Number,
            defaults.low_res_threshold.into(),
            "Skip HEVC files with height at or below this value.",
        ),
        text_input(
            "minCompressionGain",
            InputKind::Number,
            defaults.min_compression_gain.into(),
            "Minimum proportional bitrate reduction (e.g. 0.1 = 10%) to trigger a transcode.",
        ),
    ];

    PluginDetails {
        id: PLUGIN_ID,
        stage: "Pre-processing",
        name: "Soggys NVENC HEVC CQ:V Optimised Bitrate",
        media_type: "Video",
        operation: "Transcode",
        description: DESCRIPTION,
        version: PLUGIN_VERSION,
        tags: "pre-processing,ffmpeg,video only,nvenc h265,configurable",
        inputs,
    }
}
