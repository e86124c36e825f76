// Unit tests for playback coordination

use super::*;

fn probed(store: SegmentStore, name: &str, kind: TrackKind, seconds: f64) -> (SegmentStore, TrackId) {
    let (store, added) = store.add_track(name, SourceRef::new(name), kind);
    (store.apply_probed_duration(&added.track_id, seconds), added.track_id)
}

/// Video [0,5) [8,10) built by cutting a 10s upload and dropping the middle
fn gapped_video() -> (SegmentStore, TrackId) {
    let (store, video) = probed(SegmentStore::new(), "a.mp4", TrackKind::Video, 10.0);
    let head = store.track(&video).unwrap().segments[0].id.clone();
    let store = store.cut(&video, &head, 5.0);
    let tail = store.track(&video).unwrap().segments[1].id.clone();
    let store = store.cut(&video, &tail, 8.0);
    let middle = store.track(&video).unwrap().segments[1].id.clone();
    let store = store.remove_segment(&video, &middle);
    (store, video)
}

#[derive(Debug)]
struct FakeElement {
    position: f64,
    paused: bool,
    refuses_play: bool,
}

impl FakeElement {
    fn at(position: f64, paused: bool) -> Self {
        Self {
            position,
            paused,
            refuses_play: false,
        }
    }
}

impl MediaElement for FakeElement {
    fn position(&self) -> f64 {
        self.position
    }

    fn set_position(&mut self, seconds: f64) {
        self.position = seconds;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn play(&mut self) -> Result<(), DomainError> {
        if self.refuses_play {
            return Err(DomainError::BadArgs("autoplay blocked".to_string()));
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }
}

#[test]
fn test_active_video_segment_contains_cursor() {
    let (store, _) = gapped_video();
    let active = PlaybackCoordinator::active_video_segment(&store, 3.0).unwrap();
    assert_eq!((active.start, active.end), (0.0, 5.0));
}

#[test]
fn test_active_video_segment_in_gap_uses_following() {
    let (store, _) = gapped_video();
    let active = PlaybackCoordinator::active_video_segment(&store, 6.0).unwrap();
    assert_eq!(active.start, 8.0);
}

#[test]
fn test_active_video_segment_after_end_uses_preceding() {
    let (store, video) = gapped_video();
    let tail = store.track(&video).unwrap().segments[1].id.clone();
    let store = store.remove_segment(&video, &tail);
    let active = PlaybackCoordinator::active_video_segment(&store, 9.0).unwrap();
    assert_eq!(active.end, 5.0);
}

#[test]
fn test_active_video_segment_without_video() {
    let (store, _) = probed(SegmentStore::new(), "song.mp3", TrackKind::Audio, 4.0);
    assert!(PlaybackCoordinator::active_video_segment(&store, 1.0).is_none());
}

#[test]
fn test_active_video_prefers_track_order() {
    let (store, first) = probed(SegmentStore::new(), "a.mp4", TrackKind::Video, 10.0);
    let (store, _) = probed(store, "b.mp4", TrackKind::Video, 10.0);
    let active = PlaybackCoordinator::active_video_segment(&store, 2.0).unwrap();
    assert_eq!(active.id, store.track(&first).unwrap().segments[0].id);
}

#[test]
fn test_active_audio_segments_per_track() {
    let (store, _) = probed(SegmentStore::new(), "a.mp4", TrackKind::Video, 10.0);
    let (store, song) = probed(store, "song.mp3", TrackKind::Audio, 4.0);

    let active = PlaybackCoordinator::active_audio_segments(&store, 2.0);
    assert_eq!(active.len(), 2);

    let active = PlaybackCoordinator::active_audio_segments(&store, 6.0);
    assert_eq!(active.len(), 1);
    assert_ne!(active[0].track_id, &song);
}

#[test]
fn test_settle_moves_cursor_out_of_gap() {
    let (store, _) = gapped_video();
    let store = PlaybackCoordinator::settle(&store.seek(6.5));
    assert_eq!(store.cursor(), 8.0);
}

#[test]
fn test_settle_keeps_cursor_inside_segment() {
    let (store, _) = gapped_video();
    let store = PlaybackCoordinator::settle(&store.seek(4.0));
    assert_eq!(store.cursor(), 4.0);
}

#[test]
fn test_settle_ignores_audio_only_sessions() {
    let (store, song) = probed(SegmentStore::new(), "song.mp3", TrackKind::Audio, 10.0);
    let head = store.track(&song).unwrap().segments[0].id.clone();
    let store = store.cut(&song, &head, 5.0);
    let tail = store.track(&song).unwrap().segments[1].id.clone();
    let store = store.remove_segment(&song, &tail).seek(8.0);
    assert_eq!(PlaybackCoordinator::settle(&store).cursor(), 8.0);
}

#[test]
fn test_primary_muted_with_derived_audio() {
    let (store, _) = probed(SegmentStore::new(), "song.mp3", TrackKind::Audio, 4.0);
    assert!(!PlaybackCoordinator::primary_muted(&store));

    let (store, _) = probed(store, "a.mp4", TrackKind::Video, 4.0);
    assert!(PlaybackCoordinator::primary_muted(&store));
}

#[test]
fn test_frame_collects_everything_at_cursor() {
    let (store, _) = gapped_video();
    let store = store.seek(9.0);
    let frame = PlaybackCoordinator::frame(&store);
    assert_eq!(frame.cursor, 9.0);
    assert_eq!(frame.video.map(|s| s.start), Some(8.0));
    assert_eq!(frame.audio.len(), 1);
    assert!(frame.primary_muted);
}

#[test]
fn test_sync_resyncs_only_drifting_secondaries() {
    let primary = FakeElement::at(10.0, false);
    let mut secondaries = vec![
        FakeElement::at(10.05, true),
        FakeElement::at(10.5, true),
        FakeElement::at(9.0, false),
    ];

    let report = AvSync::default().sync(&primary, &mut secondaries);

    assert_eq!(report.resynced, 2);
    assert_eq!(secondaries[0].position, 10.05);
    assert_eq!(secondaries[1].position, 10.0);
    assert_eq!(secondaries[2].position, 10.0);
    assert!(secondaries.iter().all(|s| !s.paused));
}

#[test]
fn test_sync_mirrors_pause() {
    let primary = FakeElement::at(3.0, true);
    let mut secondaries = vec![FakeElement::at(3.0, false)];
    AvSync::default().sync(&primary, &mut secondaries);
    assert!(secondaries[0].paused);
}

#[test]
fn test_sync_tolerates_refused_play() {
    let primary = FakeElement::at(1.0, false);
    let mut blocked = FakeElement::at(1.0, true);
    blocked.refuses_play = true;
    let mut secondaries = vec![blocked];

    let report = AvSync::default().sync(&primary, &mut secondaries);
    assert_eq!(report.refused_play, 1);
    assert!(secondaries[0].paused);
}

#[test]
fn test_sync_tolerance_validation() {
    assert!(AvSync::new(0.0).is_err());
    assert!(AvSync::new(-1.0).is_err());
    assert_eq!(AvSync::new(0.25).unwrap().tolerance(), 0.25);
}
