//! Per-stream argument overrides.
//!
//! Codec-name driven flag selection is a flat table of [`StreamRule`]s. Each
//! rule targets one argument [`Slot`]; the first rule to match any stream
//! claims the slot, so a file with five `mov_text` tracks still gets a
//! single `-c:s srt`.

use hevcgate_probe::{Stream, StreamType};
use std::collections::BTreeMap;

/// Positions in the argument list that a stream can override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    /// Stream selection.
    Mapping,
    /// Subtitle codec.
    Subtitles,
    /// Muxer queue size.
    MuxingQueue,
}

impl Slot {
    /// Arguments used when no rule claimed the slot. `None` omits the slot.
    pub fn default_args(self) -> Option<&'static [&'static str]> {
        match self {
            Slot::Mapping => Some(&["-map", "0"]),
            Slot::Subtitles => Some(&["-c:s", "copy"]),
            Slot::MuxingQueue => None,
        }
    }
}

/// A predicate over one stream and the arguments it selects.
pub struct StreamRule {
    pub name: &'static str,
    pub slot: Slot,
    /// Called with the stream and its lowercased, non-empty codec name.
    pub matches: fn(&Stream, &str) -> bool,
    pub args: &'static [&'static str],
}

impl std::fmt::Debug for StreamRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamRule")
            .field("name", &self.name)
            .field("slot", &self.slot)
            .field("args", &self.args)
            .finish()
    }
}

/// The override table, in evaluation order.
pub static STREAM_RULES: &[StreamRule] = &[
    StreamRule {
        name: "image_video_track",
        slot: Slot::Mapping,
        matches: image_video_track,
        args: &["-map", "0:v:0", "-map", "0:a", "-map", "0:s?"],
    },
    StreamRule {
        name: "mov_text_subtitle",
        slot: Slot::Subtitles,
        matches: mov_text_subtitle,
        args: &["-c:s", "srt"],
    },
    StreamRule {
        name: "lossless_audio_queue",
        slot: Slot::MuxingQueue,
        matches: lossless_audio,
        args: &["-max_muxing_queue_size", "9999"],
    },
];

/// Subtitle codecs Matroska cannot carry as-is.
const INCOMPATIBLE_SUBTITLES: &[&str] = &["mov_text"];

/// Audio codecs whose bitrate overflows the default muxing queue.
const QUEUE_HUNGRY_AUDIO: &[&str] = &["truehd", "dts"];

// A still-image video track (cover art) must not become the encode target.
fn image_video_track(stream: &Stream, _codec: &str) -> bool {
    stream.is_image_video()
}

fn mov_text_subtitle(stream: &Stream, codec: &str) -> bool {
    stream.codec_type == StreamType::Subtitle && INCOMPATIBLE_SUBTITLES.contains(&codec)
}

fn lossless_audio(stream: &Stream, codec: &str) -> bool {
    stream.codec_type == StreamType::Audio && QUEUE_HUNGRY_AUDIO.contains(&codec)
}

/// Slots claimed by rules for one stream list.
#[derive(Debug, Default)]
pub struct Overrides {
    claimed: BTreeMap<Slot, &'static StreamRule>,
}

impl Overrides {
    /// Evaluate [`STREAM_RULES`] once per stream. Streams without a codec
    /// name are ignored.
    pub fn collect(streams: &[Stream]) -> Self {
        Self::collect_with(streams, STREAM_RULES)
    }

    /// Evaluate an arbitrary rule table.
    pub fn collect_with(streams: &[Stream], rules: &'static [StreamRule]) -> Self {
        let mut claimed = BTreeMap::new();

        for stream in streams {
            let Some(codec) = stream.codec() else {
                continue;
            };
            for rule in rules {
                if (rule.matches)(stream, &codec) {
                    claimed.entry(rule.slot).or_insert(rule);
                }
            }
        }

        Self { claimed }
    }

    /// Arguments for a slot: the claiming rule's, else the slot default.
    pub fn args(&self, slot: Slot) -> Option<&'static [&'static str]> {
        match self.claimed.get(&slot) {
            Some(rule) => Some(rule.args),
            None => slot.default_args(),
        }
    }

    /// Rules that claimed a slot, in slot order.
    pub fn applied(&self) -> impl Iterator<Item = &'static StreamRule> + '_ {
        self.claimed.values().copied()
    }
}
