//! hevcgate - NVENC HEVC transcode gate
//!
//! This library crate exposes the host-facing pieces for integration testing:
//! options file loading and the plugin descriptor. The decision itself lives
//! in `hevcgate-rules`.

pub mod config;
pub mod details;

pub use hevcgate_probe as probe;
pub use hevcgate_rules as rules;
