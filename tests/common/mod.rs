//! Shared fixtures for integration tests.

#![allow(dead_code)]

use hevcgate_probe::{MediaFile, MediaInfoBlock, MediaInfoTrack, Medium, Stream, StreamType};
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("fixture should exist")
}

pub fn video_stream(codec: &str, width: u32, height: u32) -> Stream {
    Stream {
        codec_type: StreamType::Video,
        codec_name: Some(codec.to_string()),
        width: Some(width),
        height: Some(height),
        ..Default::default()
    }
}

pub fn audio_stream(codec: &str) -> Stream {
    Stream {
        codec_type: StreamType::Audio,
        codec_name: Some(codec.to_string()),
        ..Default::default()
    }
}

pub fn subtitle_stream(codec: &str) -> Stream {
    Stream {
        codec_type: StreamType::Subtitle,
        codec_name: Some(codec.to_string()),
        ..Default::default()
    }
}

/// Builder for host file objects.
pub struct FileBuilder {
    file: MediaFile,
}

impl FileBuilder {
    pub fn video() -> Self {
        Self {
            file: MediaFile {
                file_medium: Medium::Video,
                ..Default::default()
            },
        }
    }

    pub fn medium(mut self, medium: Medium) -> Self {
        self.file.file_medium = medium;
        self
    }

    pub fn stream(mut self, mut stream: Stream) -> Self {
        stream.index = self.file.ff_probe_data.streams.len() as u32;
        self.file.ff_probe_data.streams.push(stream);
        self
    }

    pub fn bit_rate(mut self, bit_rate: f64) -> Self {
        self.file.bit_rate = Some(bit_rate);
        self
    }

    pub fn frame_rate(mut self, frame_rate: &str) -> Self {
        self.file.media_info = Some(MediaInfoBlock {
            track: vec![MediaInfoTrack {
                track_type: Some("General".to_string()),
                frame_rate: Some(frame_rate.to_string()),
            }],
        });
        self
    }

    pub fn build(self) -> MediaFile {
        self.file
    }
}

/// 1080p30 H.264 movie with stereo AAC.
pub fn h264_movie() -> MediaFile {
    FileBuilder::video()
        .stream(video_stream("h264", 1920, 1080))
        .stream(audio_stream("aac"))
        .bit_rate(12_000_000.0)
        .frame_rate("30")
        .build()
}

/// HEVC movie at the given size and container bitrate, 30 fps.
pub fn hevc_movie(width: u32, height: u32, bit_rate: f64) -> MediaFile {
    FileBuilder::video()
        .stream(video_stream("hevc", width, height))
        .stream(audio_stream("eac3"))
        .bit_rate(bit_rate)
        .frame_rate("30")
        .build()
}
