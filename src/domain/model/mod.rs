// Domain models - Tracks, segments and the identifiers that tie them together

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a track within one editing session
    TrackId
);
string_id!(
    /// Identifier of a segment within one editing session
    SegmentId
);
string_id!(
    /// Identifier of an uploaded byte blob shared by segments and tracks
    FileId
);

/// Session-scoped handle to playable media bytes. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceRef(String);

impl SourceRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of media a track carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
}

impl TrackKind {
    /// Classify an upload by its file extension. Anything not recognised as
    /// video is treated as audio.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "mp4" | "m4v" | "mov" | "mkv" | "webm" | "avi" | "wmv" | "flv" | "ts" | "mts"
            | "m2ts" | "mpg" | "mpeg" | "3gp" | "ogv" => TrackKind::Video,
            _ => TrackKind::Audio,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackKind::Video => "video",
            TrackKind::Audio => "audio",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous, time-bounded slice of a track's source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    pub start: f64,
    pub end: f64,
    pub source: SourceRef,
    pub file_id: FileId,
    /// Audio synthesized from a video upload rather than uploaded on its own
    pub derived_from_video: bool,
}

impl Segment {
    /// True while the end has not been back-filled by a duration probe
    pub fn is_placeholder(&self) -> bool {
        self.end <= self.start
    }

    /// Closed-interval containment, `start <= t <= end`
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }

    /// True when this segment's span lies fully inside `outer`
    pub fn is_within(&self, outer: &Segment) -> bool {
        self.start >= outer.start && self.end <= outer.end
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// An ordered collection of segments of one kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub name: String,
    pub kind: TrackKind,
    pub segments: Vec<Segment>,
}

impl Track {
    pub fn segment(&self, segment_id: &SegmentId) -> Option<&Segment> {
        self.segments.iter().find(|segment| &segment.id == segment_id)
    }

    pub fn segment_index(&self, segment_id: &SegmentId) -> Option<usize> {
        self.segments
            .iter()
            .position(|segment| &segment.id == segment_id)
    }

    /// First segment whose closed span contains `time`
    pub fn segment_at(&self, time: f64) -> Option<&Segment> {
        self.segments.iter().find(|segment| segment.contains(time))
    }

    pub fn is_video(&self) -> bool {
        matches!(self.kind, TrackKind::Video)
    }

    /// True if any segment was synthesized from a video upload
    pub fn is_derived_audio(&self) -> bool {
        match self.kind {
            TrackKind::Audio => self.segments.iter().any(|s| s.derived_from_video),
            TrackKind::Video => false,
        }
    }
}

/// One entry of an export request: cut `[start, end)` from file `file_index`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentDescriptor {
    pub file_index: usize,
    pub start: f64,
    pub end: f64,
}

/// Name given to the audio track derived from a video upload
pub fn derived_audio_name(video_name: &str) -> String {
    let stem = video_name.split('.').next().unwrap_or(video_name);
    format!("{} (Audio)", stem)
}
