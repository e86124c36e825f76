//! Timeline view
//!
//! Proportional layout of tracks over the shared duration, pointer-to-time
//! mapping, segment selection, and translation of user intents into store
//! updates.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::model::*;
use crate::domain::store::SegmentStore;
use crate::utils::time::format_clock;

/// Smallest duration used as a layout denominator
pub const MIN_LAYOUT_DURATION: f64 = 0.1;

/// Horizontal placement of a segment, in percent of the timeline width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentLayout {
    pub left: f64,
    pub width: f64,
}

pub struct TimelineGeometry;

impl TimelineGeometry {
    /// Map a pointer offset to a time: `(x / width) * duration`, clamped to
    /// `[0, duration]`.
    pub fn time_at(x: f64, width: f64, duration: f64) -> f64 {
        if !x.is_finite() || !width.is_finite() || width <= 0.0 || duration <= 0.0 {
            return 0.0;
        }
        ((x / width) * duration).clamp(0.0, duration)
    }

    pub fn layout(segment: &Segment, duration: f64) -> SegmentLayout {
        let scale = duration.max(MIN_LAYOUT_DURATION);
        SegmentLayout {
            left: segment.start / scale * 100.0,
            width: segment.length() / scale * 100.0,
        }
    }

    pub fn cursor_offset(cursor: f64, duration: f64) -> f64 {
        cursor / duration.max(MIN_LAYOUT_DURATION) * 100.0
    }
}

/// Requests the timeline forwards to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum TimelineIntent {
    Seek { time: f64 },
    /// Click on the track area at `x` of `width`
    Click { x: f64, width: f64 },
    /// Cursor handle dragged to `x` of `width`
    DragTo { x: f64, width: f64 },
    Select { track_id: TrackId, segment_id: SegmentId },
    Cut { track_id: TrackId, segment_id: SegmentId, at: f64 },
    /// Cut the selected segment at the cursor
    CutSelected,
    RemoveSegment { track_id: TrackId, segment_id: SegmentId },
    RemoveTrack { track_id: TrackId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub track_id: TrackId,
    pub segment_id: SegmentId,
}

/// One rendered lane
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRow<'a> {
    pub track: &'a Track,
    /// Video track this derived audio lane is drawn under
    pub under: Option<&'a TrackId>,
    pub segments: Vec<&'a Segment>,
}

/// Selection state plus intent dispatch
#[derive(Debug, Clone, Default)]
pub struct TimelineView {
    selected: Option<Selection>,
    disabled: bool,
}

impl TimelineView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&Selection> {
        self.selected.as_ref()
    }

    /// Ignore all intents, e.g. while an export is running
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn apply(&mut self, store: &SegmentStore, intent: TimelineIntent) -> SegmentStore {
        if self.disabled {
            debug!(?intent, "timeline disabled, intent ignored");
            return store.clone();
        }

        let next = match intent {
            TimelineIntent::Seek { time } => store.seek(time),
            TimelineIntent::Click { x, width } | TimelineIntent::DragTo { x, width } => {
                store.seek(TimelineGeometry::time_at(x, width, store.duration()))
            }
            TimelineIntent::Select {
                track_id,
                segment_id,
            } => {
                self.selected = Some(Selection {
                    track_id,
                    segment_id,
                });
                store.clone()
            }
            TimelineIntent::Cut {
                track_id,
                segment_id,
                at,
            } => store.cut(&track_id, &segment_id, at),
            TimelineIntent::CutSelected => match self.selected.take() {
                Some(selection) => {
                    store.cut(&selection.track_id, &selection.segment_id, store.cursor())
                }
                None => store.clone(),
            },
            TimelineIntent::RemoveSegment {
                track_id,
                segment_id,
            } => store.remove_segment(&track_id, &segment_id),
            TimelineIntent::RemoveTrack { track_id } => store.remove_track(&track_id),
        };

        let stale = self.selected.as_ref().map_or(false, |selection| {
            next.track(&selection.track_id)
                .and_then(|track| track.segment(&selection.segment_id))
                .is_none()
        });
        if stale {
            self.selected = None;
        }

        next
    }

    /// Lanes in display order: each video track followed by its derived audio
    /// (only the audio inside that video's segments), then standalone audio.
    pub fn rows(store: &SegmentStore) -> Vec<TimelineRow<'_>> {
        let mut rows = Vec::new();

        for video in store.tracks().iter().filter(|t| t.is_video()) {
            rows.push(TimelineRow {
                track: video,
                under: None,
                segments: video.segments.iter().collect(),
            });

            if let Some(audio) = store.linked_audio(&video.id).and_then(|id| store.track(id)) {
                rows.push(TimelineRow {
                    track: audio,
                    under: Some(&video.id),
                    segments: audio
                        .segments
                        .iter()
                        .filter(|a| video.segments.iter().any(|v| a.is_within(v)))
                        .collect(),
                });
            }
        }

        let linked: Vec<&TrackId> = store.links().values().collect();
        for audio in store
            .tracks()
            .iter()
            .filter(|t| !t.is_video() && !linked.contains(&&t.id))
        {
            rows.push(TimelineRow {
                track: audio,
                under: None,
                segments: audio.segments.iter().collect(),
            });
        }

        rows
    }

    /// Plain-text rendering: one bar per lane, `|` marks the cursor
    pub fn render_text(store: &SegmentStore, columns: usize) -> String {
        if store.is_empty() {
            return "No tracks added. Upload a file to get started.\n".to_string();
        }

        let columns = columns.max(10);
        let duration = store.duration();
        let to_column = |percent: f64| -> usize {
            ((percent / 100.0 * columns as f64).floor().max(0.0) as usize).min(columns - 1)
        };

        let mut out = format!(
            "{} / {}\n",
            format_clock(store.cursor()),
            format_clock(duration)
        );

        for row in Self::rows(store) {
            let fill = match row.track.kind {
                TrackKind::Video => '=',
                TrackKind::Audio => '~',
            };
            let mut bar = vec!['.'; columns];
            for segment in &row.segments {
                let layout = TimelineGeometry::layout(segment, duration);
                let from = to_column(layout.left);
                let to = to_column(layout.left + layout.width);
                for cell in bar.iter_mut().take(to + 1).skip(from) {
                    *cell = fill;
                }
            }
            bar[to_column(TimelineGeometry::cursor_offset(store.cursor(), duration))] = '|';

            let indent = if row.under.is_some() { "  " } else { "" };
            out.push_str(&format!(
                "{}[{}] {} ({})\n{}{}\n",
                indent,
                row.track.kind,
                row.track.name,
                row.track.id,
                indent,
                bar.into_iter().collect::<String>()
            ));
            for segment in &row.segments {
                out.push_str(&format!(
                    "{}  {} {} - {}\n",
                    indent,
                    segment.id,
                    format_clock(segment.start),
                    format_clock(segment.end)
                ));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests;
