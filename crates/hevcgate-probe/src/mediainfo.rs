//! Adapter for raw mediainfo output (`mediainfo --Output=JSON <file>`).
//!
//! Only the track list is kept; the gate reads the frame rate of the first
//! (General) track.

use crate::types::MediaInfoBlock;
use crate::{Error, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct MediaInfoOutput {
    media: MediaInfoBlock,
}

/// Extract the auxiliary track block from mediainfo JSON.
pub fn parse_mediainfo_output(json: &str) -> Result<MediaInfoBlock> {
    let output: MediaInfoOutput =
        serde_json::from_str(json).map_err(|e| Error::parse_error("mediainfo", e.to_string()))?;

    Ok(output.media)
}
