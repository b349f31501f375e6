//! Adapter for raw ffprobe output.
//!
//! Accepts the JSON printed by
//! `ffprobe -v quiet -print_format json -show_format -show_streams <file>`.

use crate::types::{MediaFile, ProbeData};
use crate::{Error, Result};

/// Build a [`MediaFile`] from ffprobe JSON.
///
/// The medium is classified from the streams and the container bitrate is
/// taken from the `format` section.
pub fn parse_ffprobe_output(json: &str) -> Result<MediaFile> {
    let data: ProbeData =
        serde_json::from_str(json).map_err(|e| Error::parse_error("ffprobe", e.to_string()))?;

    Ok(MediaFile::from_probe(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Medium, StreamType};

    const SAMPLE: &str = r#"{
        "streams": [
            {
                "index": 0,
                "codec_name": "h264",
                "codec_long_name": "H.264 / AVC / MPEG-4 AVC / MPEG-4 part 10",
                "codec_type": "video",
                "width": 1920,
                "height": 1080,
                "r_frame_rate": "24000/1001",
                "disposition": {"default": 1, "forced": 0}
            },
            {
                "index": 1,
                "codec_name": "dts",
                "codec_type": "audio",
                "channels": 6,
                "sample_rate": "48000",
                "bit_rate": "1509000",
                "tags": {"language": "eng"}
            },
            {
                "index": 2,
                "codec_name": "subrip",
                "codec_type": "subtitle"
            },
            {
                "index": 3,
                "codec_type": "attachment",
                "tags": {"filename": "font.ttf"}
            }
        ],
        "format": {
            "filename": "movie.mkv",
            "format_name": "matroska,webm",
            "duration": "5400.000000",
            "size": "6000000000",
            "bit_rate": "8888888"
        }
    }"#;

    #[test]
    fn test_parse_sample() {
        let file = parse_ffprobe_output(SAMPLE).unwrap();

        assert_eq!(file.file_medium, Medium::Video);
        assert_eq!(file.streams().len(), 4);
        assert_eq!(file.streams()[0].width, Some(1920));
        assert_eq!(file.streams()[0].bit_rate, None);
        assert_eq!(file.streams()[1].bit_rate.as_deref(), Some("1509000"));
        assert_eq!(file.streams()[3].codec_type, StreamType::Other);
        assert_eq!(file.container_bit_rate(), Some(8_888_888.0));
        assert!(file.media_info.is_none());
    }

    #[test]
    fn test_parse_invalid() {
        let err = parse_ffprobe_output("not json").unwrap_err();
        assert!(err.to_string().contains("ffprobe"), "unexpected error: {err}");
    }
}
