//! # hevcgate-rules
//!
//! Transcode policy for normalizing video libraries to NVENC HEVC.
//!
//! Given a probed [`MediaFile`](hevcgate_probe::MediaFile) and the operator's
//! [`PolicyInputs`], [`evaluate`] decides whether the file is worth
//! re-encoding and, if so, builds the ffmpeg arguments.
//!
//! ## Overview
//!
//! - [`PolicyInputs`] / [`PolicyOverrides`] -- the seven tunables and the
//!   single merge step that fills unset ones with defaults.
//! - [`bitrate`] -- optimal bitrate estimate and the HEVC gates.
//! - [`StreamRule`] -- table of per-stream argument overrides.
//! - [`build_arguments`] -- deterministic argument assembly.
//! - [`Decision`] -- the result handed back to the host.
//!
//! ## Known risk
//!
//! `cqv` and `targetCodecCompression` are tuned independently. If the
//! quality target produces output larger than the optimal-bitrate estimate,
//! freshly encoded HEVC files fail the gain gate's "already efficient" test
//! and are queued again on the next scan, forever. Raising
//! `targetCodecCompression` allows a lower `cqv` and vice versa. Nothing here
//! tries to detect that loop.

pub mod args;
pub mod bitrate;
pub mod decision;
mod error;
pub mod inputs;
pub mod stream_rule;

pub use args::{build_arguments, DEFAULT_PRESET, IO_PLACEHOLDER};
pub use bitrate::{assess, optimal_bitrate, Assessment, SkipReason, Verdict};
pub use decision::{evaluate, Decision, OUTPUT_CONTAINER};
pub use error::{ConfigError, Result};
pub use inputs::{OptionValue, PolicyInputs, PolicyOverrides};
pub use stream_rule::{Overrides, Slot, StreamRule, STREAM_RULES};
