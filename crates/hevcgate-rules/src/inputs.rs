//! Operator tunables and the configuration merge.
//!
//! Hosts hand options over as loosely typed values: numbers typed into text
//! boxes arrive as strings, dropdown booleans as `"true"`/`"false"`. All of
//! that is normalized once, in [`PolicyOverrides::merge`]; the policy and the
//! argument builder only ever see a complete [`PolicyInputs`].

use crate::error::{ConfigError, Result};
use hevcgate_probe::parse_number;
use serde::{Deserialize, Serialize};

/// Highest constant-quality value NVENC accepts.
pub const MAX_CQV: u32 = 51;

/// Highest B-frame count the gate will emit.
pub const MAX_BFRAMES: u8 = 5;

/// Complete, validated policy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyInputs {
    /// Coefficient of the optimal bitrate estimate. Smaller targets lower
    /// bitrates.
    #[serde(rename = "targetCodecCompression")]
    pub target_codec_compression: f64,
    /// NVENC constant-quality value (lower is higher quality).
    pub cqv: u32,
    /// B-frame count, 0 disables.
    pub bframe: u8,
    /// Emit 10-bit output (`p010le`).
    pub ten_bit: bool,
    /// Encoder preset name.
    pub ffmpeg_preset: String,
    /// HEVC sources at or below this height are never re-encoded.
    #[serde(rename = "lowResThreshold")]
    pub low_res_threshold: u32,
    /// Minimum fractional bitrate reduction that justifies re-encoding HEVC.
    #[serde(rename = "minCompressionGain")]
    pub min_compression_gain: f64,
}

impl Default for PolicyInputs {
    fn default() -> Self {
        Self {
            target_codec_compression: 0.12,
            cqv: 28,
            bframe: 0,
            ten_bit: true,
            ffmpeg_preset: "medium".to_string(),
            low_res_threshold: 720,
            min_compression_gain: 0.10,
        }
    }
}

/// A raw option value as supplied by a host or an options file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Options as supplied by the operator. Unset fields keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyOverrides {
    #[serde(
        rename = "targetCodecCompression",
        alias = "target_codec_compression",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub target_codec_compression: Option<OptionValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cqv: Option<OptionValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bframe: Option<OptionValue>,
    #[serde(alias = "tenBit", default, skip_serializing_if = "Option::is_none")]
    pub ten_bit: Option<OptionValue>,
    #[serde(alias = "ffmpegPreset", default, skip_serializing_if = "Option::is_none")]
    pub ffmpeg_preset: Option<OptionValue>,
    #[serde(
        rename = "lowResThreshold",
        alias = "low_res_threshold",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub low_res_threshold: Option<OptionValue>,
    #[serde(
        rename = "minCompressionGain",
        alias = "min_compression_gain",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub min_compression_gain: Option<OptionValue>,
}

impl PolicyOverrides {
    /// Fill unset options with the documented defaults.
    pub fn merge(&self) -> Result<PolicyInputs> {
        self.merge_over(PolicyInputs::default())
    }

    /// Apply these overrides on top of `base`.
    pub fn merge_over(&self, base: PolicyInputs) -> Result<PolicyInputs> {
        let mut inputs = base;

        if let Some(v) = &self.target_codec_compression {
            inputs.target_codec_compression =
                non_negative("targetCodecCompression", v.as_f64("targetCodecCompression")?)?;
        }
        if let Some(v) = &self.cqv {
            inputs.cqv = whole("cqv", v.as_f64("cqv")?, u64::from(MAX_CQV))? as u32;
        }
        if let Some(v) = &self.bframe {
            inputs.bframe = whole("bframe", v.as_f64("bframe")?, u64::from(MAX_BFRAMES))? as u8;
        }
        if let Some(v) = &self.ten_bit {
            inputs.ten_bit = v.as_bool("ten_bit")?;
        }
        if let Some(v) = &self.ffmpeg_preset {
            inputs.ffmpeg_preset = v.as_text("ffmpeg_preset")?.trim().to_string();
        }
        if let Some(v) = &self.low_res_threshold {
            inputs.low_res_threshold = whole(
                "lowResThreshold",
                v.as_f64("lowResThreshold")?,
                u64::from(u32::MAX),
            )? as u32;
        }
        if let Some(v) = &self.min_compression_gain {
            inputs.min_compression_gain = v.as_f64("minCompressionGain")?;
        }

        Ok(inputs)
    }
}

impl OptionValue {
    fn describe(&self) -> String {
        match self {
            OptionValue::Bool(b) => format!("boolean {b}"),
            OptionValue::Number(n) => format!("number {n}"),
            OptionValue::Text(s) => format!("{s:?}"),
        }
    }

    fn as_f64(&self, name: &'static str) -> Result<f64> {
        let n = match self {
            OptionValue::Number(n) => Some(*n),
            OptionValue::Text(s) => parse_number(s),
            OptionValue::Bool(_) => None,
        };
        n.filter(|n| n.is_finite())
            .ok_or_else(|| ConfigError::invalid_type(name, "a number", self.describe()))
    }

    fn as_bool(&self, name: &'static str) -> Result<bool> {
        match self {
            OptionValue::Bool(b) => Ok(*b),
            OptionValue::Number(n) if *n == 0.0 || *n == 1.0 => Ok(*n == 1.0),
            OptionValue::Text(s) => match s.trim().to_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(true),
                "false" | "no" | "0" => Ok(false),
                _ => Err(ConfigError::invalid_type(name, "a boolean", self.describe())),
            },
            _ => Err(ConfigError::invalid_type(name, "a boolean", self.describe())),
        }
    }

    fn as_text(&self, name: &'static str) -> Result<&str> {
        match self {
            OptionValue::Text(s) => Ok(s),
            _ => Err(ConfigError::invalid_type(name, "a string", self.describe())),
        }
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value < 0.0 {
        return Err(ConfigError::out_of_range(name, format!("{value} is negative")));
    }
    Ok(value)
}

fn whole(name: &'static str, value: f64, max: u64) -> Result<u64> {
    if value.fract() != 0.0 {
        return Err(ConfigError::invalid_type(
            name,
            "a whole number",
            format!("number {value}"),
        ));
    }
    if value < 0.0 || value > max as f64 {
        return Err(ConfigError::out_of_range(
            name,
            format!("{value} is not within 0-{max}"),
        ));
    }
    Ok(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Option<OptionValue> {
        Some(OptionValue::Text(s.to_string()))
    }

    #[test]
    fn empty_overrides_give_defaults() {
        let inputs = PolicyOverrides::default().merge().unwrap();
        assert_eq!(inputs, PolicyInputs::default());
        assert_eq!(inputs.target_codec_compression, 0.12);
        assert_eq!(inputs.cqv, 28);
        assert_eq!(inputs.bframe, 0);
        assert!(inputs.ten_bit);
        assert_eq!(inputs.ffmpeg_preset, "medium");
        assert_eq!(inputs.low_res_threshold, 720);
        assert_eq!(inputs.min_compression_gain, 0.10);
    }

    #[test]
    fn string_values_are_coerced() {
        let overrides = PolicyOverrides {
            target_codec_compression: text("0.08"),
            cqv: text("24"),
            bframe: text(" 3 "),
            ten_bit: text("false"),
            ffmpeg_preset: text(" slow "),
            low_res_threshold: text("1080"),
            min_compression_gain: text("0.2"),
        };
        let inputs = overrides.merge().unwrap();
        assert_eq!(inputs.target_codec_compression, 0.08);
        assert_eq!(inputs.cqv, 24);
        assert_eq!(inputs.bframe, 3);
        assert!(!inputs.ten_bit);
        assert_eq!(inputs.ffmpeg_preset, "slow");
        assert_eq!(inputs.low_res_threshold, 1080);
        assert_eq!(inputs.min_compression_gain, 0.2);
    }

    #[test]
    fn merge_over_keeps_unset_base_values() {
        let base = PolicyInputs {
            cqv: 22,
            ..Default::default()
        };
        let overrides = PolicyOverrides {
            bframe: Some(OptionValue::Number(2.0)),
            ..Default::default()
        };
        let inputs = overrides.merge_over(base).unwrap();
        assert_eq!(inputs.cqv, 22);
        assert_eq!(inputs.bframe, 2);
    }

    #[test]
    fn bframe_out_of_range() {
        let overrides = PolicyOverrides {
            bframe: Some(OptionValue::Number(7.0)),
            ..Default::default()
        };
        let err = overrides.merge().unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { name: "bframe", .. }));
    }

    #[test]
    fn fractional_cqv_rejected() {
        let overrides = PolicyOverrides {
            cqv: Some(OptionValue::Number(27.5)),
            ..Default::default()
        };
        assert!(matches!(
            overrides.merge(),
            Err(ConfigError::InvalidType { name: "cqv", .. })
        ));
    }

    #[test]
    fn wrong_kinds_rejected() {
        let overrides = PolicyOverrides {
            cqv: text("abc"),
            ..Default::default()
        };
        let err = overrides.merge().unwrap_err();
        assert_eq!(
            err.to_string(),
            "option `cqv` expects a number, got \"abc\""
        );

        let overrides = PolicyOverrides {
            ten_bit: text("maybe"),
            ..Default::default()
        };
        assert!(overrides.merge().is_err());

        let overrides = PolicyOverrides {
            ffmpeg_preset: Some(OptionValue::Bool(true)),
            ..Default::default()
        };
        assert!(overrides.merge().is_err());
    }

    #[test]
    fn negative_compression_rejected() {
        let overrides = PolicyOverrides {
            target_codec_compression: Some(OptionValue::Number(-0.1)),
            ..Default::default()
        };
        assert!(matches!(
            overrides.merge(),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn host_keys_deserialize() {
        let overrides: PolicyOverrides = toml::from_str(
            r#"
            targetCodecCompression = 0.1
            cqv = 30
            ten_bit = "false"
            ffmpeg_preset = "p5"
            lowResThreshold = "480"
            "#,
        )
        .unwrap();
        let inputs = overrides.merge().unwrap();
        assert_eq!(inputs.target_codec_compression, 0.1);
        assert_eq!(inputs.cqv, 30);
        assert!(!inputs.ten_bit);
        assert_eq!(inputs.ffmpeg_preset, "p5");
        assert_eq!(inputs.low_res_threshold, 480);
        assert_eq!(inputs.min_compression_gain, 0.10);
    }

    #[test]
    fn snake_case_aliases_deserialize() {
        let overrides: PolicyOverrides = serde_json::from_str(
            r#"{"target_codec_compression": "0.2", "tenBit": true, "min_compression_gain": 0.05}"#,
        )
        .unwrap();
        let inputs = overrides.merge().unwrap();
        assert_eq!(inputs.target_codec_compression, 0.2);
        assert!(inputs.ten_bit);
        assert_eq!(inputs.min_compression_gain, 0.05);
    }
}
