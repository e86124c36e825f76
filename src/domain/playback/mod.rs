//! Playback coordination
//!
//! Maps the global cursor to the active video segment and the time-aligned
//! audio segments, keeps the cursor off gaps between video segments, and
//! keeps secondary audio elements locked to the primary element.

use serde::Serialize;
use tracing::{debug, trace};

use crate::domain::errors::DomainError;
use crate::domain::model::*;
use crate::domain::rules::{CursorPlacement, GapNeighbour};
use crate::domain::store::SegmentStore;

/// Drift, in seconds, tolerated before a secondary element is resynchronised
pub const DEFAULT_SYNC_TOLERANCE: f64 = 0.1;

/// Audio segment playing at the cursor on one audio track
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveAudio<'a> {
    pub track_id: &'a TrackId,
    pub segment: &'a Segment,
}

/// What should be playing at one cursor position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackFrame<'a> {
    pub cursor: f64,
    pub video: Option<&'a Segment>,
    pub audio: Vec<ActiveAudio<'a>>,
    /// Primary element stays silent while derived audio plays separately
    pub primary_muted: bool,
}

/// Stateless coordinator over store snapshots
pub struct PlaybackCoordinator;

impl PlaybackCoordinator {
    /// First video segment (in track order) containing `time`; otherwise the
    /// nearest one starting after it, otherwise the nearest one ending before it.
    pub fn active_video_segment(store: &SegmentStore, time: f64) -> Option<&Segment> {
        CursorPlacement::neighbour(store.video_segments(), time).map(|n| n.segment())
    }

    /// Per audio track, the segment containing `time`. No fallback.
    pub fn active_audio_segments(store: &SegmentStore, time: f64) -> Vec<ActiveAudio<'_>> {
        store
            .tracks()
            .iter()
            .filter(|track| matches!(track.kind, TrackKind::Audio))
            .filter_map(|track| {
                track.segment_at(time).map(|segment| ActiveAudio {
                    track_id: &track.id,
                    segment,
                })
            })
            .collect()
    }

    pub fn primary_muted(store: &SegmentStore) -> bool {
        store.tracks().iter().any(Track::is_derived_audio)
    }

    pub fn frame(store: &SegmentStore) -> PlaybackFrame<'_> {
        let cursor = store.cursor();
        PlaybackFrame {
            cursor,
            video: Self::active_video_segment(store, cursor),
            audio: Self::active_audio_segments(store, cursor),
            primary_muted: Self::primary_muted(store),
        }
    }

    /// Re-run after every cursor or track-list change: a cursor resting in a
    /// gap between video segments moves to the nearest following start, else
    /// the nearest preceding end, else 0.
    pub fn settle(store: &SegmentStore) -> SegmentStore {
        if !store.has_video() {
            return store.clone();
        }

        let cursor = store.cursor();
        match CursorPlacement::neighbour(store.video_segments(), cursor) {
            Some(GapNeighbour::Containing(_)) => store.clone(),
            _ => {
                let target = CursorPlacement::relocate(store.video_segments(), cursor);
                debug!(from = cursor, to = target, "cursor moved off gap");
                store.seek(target)
            }
        }
    }
}

/// A playable element whose position and play state can be driven
pub trait MediaElement {
    /// Current playback position in seconds
    fn position(&self) -> f64;

    fn set_position(&mut self, seconds: f64);

    fn is_paused(&self) -> bool;

    /// Start playback. Elements may refuse (e.g. autoplay policies).
    fn play(&mut self) -> Result<(), DomainError>;

    fn pause(&mut self);
}

/// Outcome of one synchronisation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    pub resynced: usize,
    pub refused_play: usize,
}

/// Keeps secondary audio elements aligned with the primary element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvSync {
    tolerance: f64,
}

impl Default for AvSync {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_SYNC_TOLERANCE,
        }
    }
}

impl AvSync {
    pub fn new(tolerance: f64) -> Result<Self, DomainError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(DomainError::BadArgs(format!(
                "Sync tolerance must be positive, got {}",
                tolerance
            )));
        }
        Ok(Self { tolerance })
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Snap drifting secondaries to the primary's position and mirror its
    /// play/pause state. Play refusals are counted, not propagated.
    pub fn sync<P, S>(&self, primary: &P, secondaries: &mut [S]) -> SyncReport
    where
        P: MediaElement + ?Sized,
        S: MediaElement,
    {
        let mut report = SyncReport::default();
        let position = primary.position();
        let paused = primary.is_paused();

        for secondary in secondaries.iter_mut() {
            if (secondary.position() - position).abs() > self.tolerance {
                trace!(from = secondary.position(), to = position, "resync secondary");
                secondary.set_position(position);
                report.resynced += 1;
            }

            if paused {
                secondary.pause();
            } else if secondary.play().is_err() {
                report.refused_play += 1;
            }
        }

        report
    }
}

#[cfg(test)]
mod tests;
