//! Segment store
//!
//! Owns the track list, the video→audio linkage and the shared cursor. Every
//! operation takes `&self` and returns a new snapshot; unknown ids yield an
//! unchanged snapshot rather than an error.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::domain::model::*;
use crate::domain::rules::CursorPlacement;

/// Identifiers created by a single upload
#[derive(Debug, Clone, PartialEq)]
pub struct AddedTrack {
    pub track_id: TrackId,
    pub file_id: FileId,
    /// Derived audio track created alongside a video upload
    pub derived_audio: Option<TrackId>,
}

/// Snapshot of all editing state for one session
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SegmentStore {
    tracks: Vec<Track>,
    links: BTreeMap<TrackId, TrackId>,
    cursor: f64,
    duration: f64,
    #[serde(skip)]
    next_id: u64,
}

impl SegmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, track_id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|track| &track.id == track_id)
    }

    /// Derived audio track paired with a video track
    pub fn linked_audio(&self, video_track_id: &TrackId) -> Option<&TrackId> {
        self.links.get(video_track_id)
    }

    pub fn links(&self) -> &BTreeMap<TrackId, TrackId> {
        &self.links
    }

    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    /// Shared timeline length; `0` until the first probe completes
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn has_video(&self) -> bool {
        self.tracks.iter().any(Track::is_video)
    }

    /// Segments of every video track, in track order
    pub fn video_segments(&self) -> impl Iterator<Item = &Segment> {
        self.tracks
            .iter()
            .filter(|track| track.is_video())
            .flat_map(|track| track.segments.iter())
    }

    /// Segments that anchor the cursor: video segments when any video track
    /// exists, otherwise the audio segments.
    pub fn timeline_segments(&self) -> Vec<&Segment> {
        if self.has_video() {
            self.video_segments().collect()
        } else {
            self.tracks
                .iter()
                .flat_map(|track| track.segments.iter())
                .collect()
        }
    }

    /// Add a track holding one placeholder segment `[0, 0]`. A video upload
    /// also gets a linked audio track over the same source bytes.
    pub fn add_track(&self, name: &str, source: SourceRef, kind: TrackKind) -> (Self, AddedTrack) {
        let mut next = self.clone();
        let file_id = FileId::new(next.issue("f"));
        let track_id = TrackId::new(next.issue("t"));
        let segment_id = SegmentId::new(next.issue("s"));

        next.tracks.push(Track {
            id: track_id.clone(),
            name: name.to_string(),
            kind,
            segments: vec![Segment {
                id: segment_id,
                start: 0.0,
                end: 0.0,
                source: source.clone(),
                file_id: file_id.clone(),
                derived_from_video: false,
            }],
        });

        let derived_audio = match kind {
            TrackKind::Video => {
                let audio_id = TrackId::new(next.issue("t"));
                let audio_segment_id = SegmentId::new(next.issue("s"));
                next.tracks.push(Track {
                    id: audio_id.clone(),
                    name: derived_audio_name(name),
                    kind: TrackKind::Audio,
                    segments: vec![Segment {
                        id: audio_segment_id,
                        start: 0.0,
                        end: 0.0,
                        source,
                        file_id: file_id.clone(),
                        derived_from_video: true,
                    }],
                });
                next.links.insert(track_id.clone(), audio_id.clone());
                Some(audio_id)
            }
            TrackKind::Audio => None,
        };

        debug!(track = %track_id, file = %file_id, %kind, "track added");

        (
            next,
            AddedTrack {
                track_id,
                file_id,
                derived_audio,
            },
        )
    }

    /// Completion handler for a duration probe. Back-fills the placeholder
    /// segment of `track_id` and of its linked audio track. The shared duration
    /// is taken from the first probe that completes and never grows after.
    pub fn apply_probed_duration(&self, track_id: &TrackId, seconds: f64) -> Self {
        if !seconds.is_finite() || seconds <= 0.0 || self.track(track_id).is_none() {
            return self.clone();
        }

        let mut next = self.clone();
        let mut targets = vec![track_id.clone()];
        if let Some(audio_id) = self.links.get(track_id) {
            targets.push(audio_id.clone());
        }

        for track in next.tracks.iter_mut().filter(|t| targets.contains(&t.id)) {
            if let Some(first) = track.segments.first_mut() {
                if first.is_placeholder() && first.start == 0.0 {
                    first.end = seconds;
                }
            }
        }

        if next.duration == 0.0 {
            next.duration = seconds;
        }

        debug!(track = %track_id, seconds, duration = next.duration, "duration probed");
        next
    }

    /// Move the cursor, clamped to `[0, duration]` once the duration is known
    pub fn seek(&self, time: f64) -> Self {
        let mut next = self.clone();
        next.cursor = next.clamp_time(time);
        next
    }

    /// Split a segment at `at`. Cutting at or outside either boundary leaves the
    /// snapshot unchanged. A cut on a linked video track is also applied to
    /// the first segment of its derived audio track, which is a no-op when
    /// `at` lies outside that segment.
    pub fn cut(&self, track_id: &TrackId, segment_id: &SegmentId, at: f64) -> Self {
        let mut next = self.clone();
        if !next.split_segment(track_id, segment_id, at) {
            return next;
        }

        let audio_segment = self.links.get(track_id).and_then(|audio_id| {
            self.track(audio_id)
                .and_then(|audio| audio.segments.first())
                .map(|segment| (audio_id.clone(), segment.id.clone()))
        });

        if let Some((audio_id, audio_segment_id)) = audio_segment {
            next.split_segment(&audio_id, &audio_segment_id, at);
        }

        next
    }

    /// Delete a segment. Removing a video segment also drops every linked
    /// audio segment fully contained in its span. Empty tracks are pruned and
    /// the cursor leaves the removed span if it was resting inside it.
    pub fn remove_segment(&self, track_id: &TrackId, segment_id: &SegmentId) -> Self {
        let Some(track) = self.track(track_id) else {
            return self.clone();
        };
        let Some(removed) = track.segment(segment_id).cloned() else {
            return self.clone();
        };

        let mut next = self.clone();

        match track.kind {
            TrackKind::Video => {
                if let Some(audio_id) = self.links.get(track_id) {
                    if let Some(audio) = next.track_mut(audio_id) {
                        audio.segments.retain(|segment| !segment.is_within(&removed));
                    }
                }
            }
            TrackKind::Audio => {}
        }

        if let Some(owner) = next.track_mut(track_id) {
            owner.segments.retain(|segment| segment.id != removed.id);
        }

        next.prune_empty_tracks();

        if removed.contains(self.cursor) {
            let relocated = CursorPlacement::relocate(next.timeline_segments(), self.cursor);
            next.cursor = next.clamp_time(relocated);
        }

        debug!(track = %track_id, segment = %segment_id, cursor = next.cursor, "segment removed");
        next
    }

    /// Delete a track together with its linked derived audio track
    pub fn remove_track(&self, track_id: &TrackId) -> Self {
        if self.track(track_id).is_none() {
            return self.clone();
        }

        let mut next = self.clone();
        next.tracks.retain(|track| &track.id != track_id);

        if let Some(audio_id) = next.links.remove(track_id) {
            next.tracks.retain(|track| track.id != audio_id);
        }
        next.links.retain(|_, audio_id| audio_id != track_id);

        debug!(track = %track_id, "track removed");
        next
    }

    fn issue(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{}", prefix, self.next_id)
    }

    fn track_mut(&mut self, track_id: &TrackId) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|track| &track.id == track_id)
    }

    fn clamp_time(&self, time: f64) -> f64 {
        if !time.is_finite() {
            return self.cursor;
        }
        if self.duration > 0.0 {
            time.clamp(0.0, self.duration)
        } else {
            time.max(0.0)
        }
    }

    fn split_segment(&mut self, track_id: &TrackId, segment_id: &SegmentId, at: f64) -> bool {
        let fresh_id = SegmentId::new(format!("s{}", self.next_id + 1));

        let Some(track) = self.track_mut(track_id) else {
            return false;
        };
        let Some(index) = track.segment_index(segment_id) else {
            return false;
        };

        let original = &track.segments[index];
        if !at.is_finite() || at <= original.start || at >= original.end {
            return false;
        }

        let mut first = original.clone();
        let mut second = original.clone();
        first.end = at;
        second.id = fresh_id;
        second.start = at;

        track.segments.splice(index..=index, [first, second]);
        self.next_id += 1;

        debug!(track = %track_id, segment = %segment_id, at, "segment cut");
        true
    }

    /// Drop tracks with no segments and any linkage that points at them
    fn prune_empty_tracks(&mut self) {
        self.tracks.retain(|track| !track.segments.is_empty());
        let tracks = &self.tracks;
        self.links.retain(|video_id, audio_id| {
            tracks.iter().any(|t| &t.id == video_id) && tracks.iter().any(|t| &t.id == audio_id)
        });
    }
}

#[cfg(test)]
mod tests;
