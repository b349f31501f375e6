//! Probed media types.
//!
//! The field layout follows the host pipeline's file object so a host can
//! hand its JSON straight to [`MediaFile::from_json`].

use crate::lenient;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Codec names of still-image video tracks (cover art, thumbnails).
pub const IMAGE_CODECS: &[&str] = &["png", "bmp", "mjpeg"];

/// A candidate file as seen by the host pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    /// Medium classification decided by the host.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub file_medium: Medium,
    /// ffprobe stream and format data.
    #[serde(
        default,
        rename = "ffProbeData",
        deserialize_with = "lenient::or_default"
    )]
    pub ff_probe_data: ProbeData,
    /// Container-level bitrate in bits per second.
    #[serde(
        default,
        rename = "bit_rate",
        deserialize_with = "lenient::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub bit_rate: Option<f64>,
    /// Secondary probe source, consulted for frame rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_info: Option<MediaInfoBlock>,
}

/// ffprobe `-show_streams -show_format` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProbeData {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub streams: Vec<Stream>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ProbeFormat>,
}

/// ffprobe container section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProbeFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub bit_rate: Option<String>,
}

/// A single probed stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub index: u32,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub codec_type: StreamType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Raw per-stream bitrate. Often missing for Matroska sources.
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub bit_rate: Option<String>,
}

/// Stream kind as reported by ffprobe's `codec_type`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum StreamType {
    Video,
    Audio,
    Subtitle,
    /// Data, attachment, or anything unrecognised.
    #[default]
    Other,
}

/// Host medium classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Medium {
    Video,
    Audio,
    #[default]
    Other,
}

/// Auxiliary mediainfo data (`media.track` of `mediainfo --Output=JSON`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaInfoBlock {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub track: Vec<MediaInfoTrack>,
}

/// One mediainfo track. Only the fields the gate reads are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaInfoTrack {
    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub track_type: Option<String>,
    #[serde(
        rename = "FrameRate",
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub frame_rate: Option<String>,
}

impl MediaFile {
    /// Parse the host's file object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a file from probe data, classifying the medium from its streams.
    pub fn from_probe(ff_probe_data: ProbeData) -> Self {
        let bit_rate = ff_probe_data
            .format
            .as_ref()
            .and_then(|f| f.bit_rate.as_deref())
            .and_then(crate::parse_number);

        Self {
            file_medium: Medium::classify(&ff_probe_data.streams),
            ff_probe_data,
            bit_rate,
            media_info: None,
        }
    }

    /// Attach a mediainfo block.
    pub fn with_media_info(mut self, media_info: MediaInfoBlock) -> Self {
        self.media_info = Some(media_info);
        self
    }

    /// All probed streams in probe order.
    pub fn streams(&self) -> &[Stream] {
        &self.ff_probe_data.streams
    }

    /// Container-level bitrate: the host's value, else ffprobe's format section.
    pub fn container_bit_rate(&self) -> Option<f64> {
        self.bit_rate.or_else(|| {
            self.ff_probe_data
                .format
                .as_ref()
                .and_then(|f| f.bit_rate.as_deref())
                .and_then(crate::parse_number)
        })
    }
}

impl Stream {
    /// Lowercased codec name, `None` when absent or blank.
    pub fn codec(&self) -> Option<String> {
        self.codec_name
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_lowercase)
    }

    pub fn is_video(&self) -> bool {
        self.codec_type == StreamType::Video
    }

    /// Whether this is a video track carrying a still image.
    pub fn is_image_video(&self) -> bool {
        self.is_video()
            && self
                .codec()
                .is_some_and(|c| IMAGE_CODECS.contains(&c.as_str()))
    }
}

impl Medium {
    /// Classify from streams when the host did not.
    ///
    /// Still-image video tracks alone do not make a file video: an MP3 with
    /// embedded cover art is audio.
    pub fn classify(streams: &[Stream]) -> Self {
        if streams.iter().any(|s| s.is_video() && !s.is_image_video()) {
            Medium::Video
        } else if streams.iter().any(|s| s.codec_type == StreamType::Audio) {
            Medium::Audio
        } else {
            Medium::Other
        }
    }
}

impl From<String> for StreamType {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "video" => StreamType::Video,
            "audio" => StreamType::Audio,
            "subtitle" => StreamType::Subtitle,
            _ => StreamType::Other,
        }
    }
}

impl From<String> for Medium {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "video" => Medium::Video,
            "audio" => Medium::Audio,
            _ => Medium::Other,
        }
    }
}

impl std::fmt::Display for Medium {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Medium::Video => write!(f, "video"),
            Medium::Audio => write!(f, "audio"),
            Medium::Other => write!(f, "other"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(codec_type: StreamType, codec: &str) -> Stream {
        Stream {
            codec_type,
            codec_name: Some(codec.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_host_file_json() {
        let file = MediaFile::from_json(
            r#"{
                "fileMedium": "video",
                "ffProbeData": {
                    "streams": [
                        {"index": 0, "codec_type": "video", "codec_name": "hevc",
                         "width": 3840, "height": 2160, "bit_rate": "20000000"},
                        {"index": 1, "codec_type": "audio", "codec_name": "truehd"},
                        {"index": 2, "codec_type": "Subtitle", "codec_name": "mov_text"}
                    ]
                },
                "bit_rate": "25000000",
                "mediaInfo": {"track": [{"@type": "General", "FrameRate": "23.976"}]}
            }"#,
        )
        .unwrap();

        assert_eq!(file.file_medium, Medium::Video);
        assert_eq!(file.streams().len(), 3);
        assert_eq!(file.streams()[2].codec_type, StreamType::Subtitle);
        assert_eq!(file.streams()[0].bit_rate.as_deref(), Some("20000000"));
        assert_eq!(file.container_bit_rate(), Some(25_000_000.0));
        let mi = file.media_info.unwrap();
        assert_eq!(mi.track[0].frame_rate.as_deref(), Some("23.976"));
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let file = MediaFile::from_json(
            r#"{"fileMedium": "image", "ffProbeData": {"streams": [{"codec_type": "data"}]}}"#,
        )
        .unwrap();
        assert_eq!(file.file_medium, Medium::Other);
        assert_eq!(file.streams()[0].codec_type, StreamType::Other);
        assert_eq!(file.streams()[0].codec(), None);
        assert_eq!(file.container_bit_rate(), None);

        let file = MediaFile::from_json(
            r#"{
                "fileMedium": null,
                "ffProbeData": {"streams": [
                    {"index": 0, "codec_type": "video", "codec_name": "h264"},
                    {"index": null, "codec_type": null, "codec_name": null}
                ]}
            }"#,
        )
        .unwrap();
        assert_eq!(file.file_medium, Medium::Other);
        assert_eq!(file.streams().len(), 2);
        assert_eq!(file.streams()[1].index, 0);
        assert_eq!(file.streams()[1].codec_type, StreamType::Other);
        assert_eq!(file.streams()[1].codec(), None);
    }

    #[test]
    fn test_null_sections_are_empty() {
        let file = MediaFile::from_json(
            r#"{"fileMedium": "video", "ffProbeData": {"streams": null}, "mediaInfo": {"track": null}}"#,
        )
        .unwrap();
        assert!(file.streams().is_empty());
        assert!(file.media_info.unwrap().track.is_empty());

        let file = MediaFile::from_json(r#"{"fileMedium": "video", "ffProbeData": null}"#).unwrap();
        assert!(file.streams().is_empty());
    }

    #[test]
    fn test_container_bit_rate_falls_back_to_format() {
        let file = MediaFile::from_json(
            r#"{"ffProbeData": {"streams": [], "format": {"bit_rate": "5000000"}}}"#,
        )
        .unwrap();
        assert_eq!(file.container_bit_rate(), Some(5_000_000.0));
    }

    #[test]
    fn test_codec_is_lowercased() {
        let s = stream(StreamType::Audio, " TrueHD ");
        assert_eq!(s.codec().as_deref(), Some("truehd"));
        assert_eq!(stream(StreamType::Audio, "").codec(), None);
    }

    #[test]
    fn test_image_video() {
        assert!(stream(StreamType::Video, "MJPEG").is_image_video());
        assert!(stream(StreamType::Video, "png").is_image_video());
        assert!(!stream(StreamType::Video, "h264").is_image_video());
        assert!(!stream(StreamType::Audio, "png").is_image_video());
    }

    #[test]
    fn test_classify_medium() {
        let movie = vec![
            stream(StreamType::Video, "h264"),
            stream(StreamType::Audio, "aac"),
        ];
        assert_eq!(Medium::classify(&movie), Medium::Video);

        let song_with_cover = vec![
            stream(StreamType::Audio, "mp3"),
            stream(StreamType::Video, "mjpeg"),
        ];
        assert_eq!(Medium::classify(&song_with_cover), Medium::Audio);

        assert_eq!(Medium::classify(&[]), Medium::Other);
    }
}
