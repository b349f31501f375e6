//! # hevcgate-probe
//!
//! Probed media model and stream inspection for the hevcgate transcode gate.
//!
//! This crate provides:
//! - [`MediaFile`] and [`Stream`], deserialized from the host pipeline's file
//!   object (ffprobe streams plus an auxiliary mediainfo block)
//! - Adapters that build the same model from raw `ffprobe` and `mediainfo`
//!   JSON output
//! - The stream inspector: primary video stream lookup, bitrate resolution
//!   with container fallback, and frame rate resolution from mediainfo
//!
//! Nothing here performs I/O. Callers hand in JSON text or already-parsed
//! values.
//!
//! ## Features
//!
//! - `tracing` - Emit debug events while inspecting
//!
//! ## Example
//!
//! ```
//! use hevcgate_probe::{inspect, MediaFile};
//!
//! let file = MediaFile::from_json(r#"{
//!     "fileMedium": "video",
//!     "ffProbeData": {"streams": [
//!         {"codec_type": "video", "codec_name": "h264", "width": 1920, "height": 1080}
//!     ]},
//!     "bit_rate": 8000000
//! }"#)?;
//!
//! let video = inspect(&file).ok_or("no video stream")?;
//! assert_eq!(video.codec, "h264");
//! assert_eq!(video.bit_rate, Some(8_000_000.0));
//! assert_eq!(video.frame_rate, 30.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
pub mod ffprobe;
pub mod inspect;
mod lenient;
pub mod mediainfo;
mod types;

// Re-exports
pub use error::{Error, Result};
pub use ffprobe::parse_ffprobe_output;
pub use inspect::{
    inspect, parse_number, primary_video, resolve_bit_rate, resolve_frame_rate, VideoProfile,
    DEFAULT_FRAME_RATE,
};
pub use mediainfo::parse_mediainfo_output;
pub use types::*;
