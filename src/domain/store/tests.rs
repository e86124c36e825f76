// Unit tests for the segment store

use super::*;

/// Store with one probed video upload and its derived audio track
fn video_session(duration: f64) -> (SegmentStore, AddedTrack) {
    let (store, added) = SegmentStore::new().add_track(
        "holiday.mp4",
        SourceRef::new("/media/holiday.mp4"),
        TrackKind::Video,
    );
    (store.apply_probed_duration(&added.track_id, duration), added)
}

fn first_segment(store: &SegmentStore, track_id: &TrackId) -> SegmentId {
    store.track(track_id).unwrap().segments[0].id.clone()
}

fn spans(store: &SegmentStore, track_id: &TrackId) -> Vec<(f64, f64)> {
    store
        .track(track_id)
        .map(|track| track.segments.iter().map(|s| (s.start, s.end)).collect())
        .unwrap_or_default()
}

#[test]
fn test_video_upload_creates_linked_audio_track() {
    let (store, added) = SegmentStore::new().add_track(
        "holiday.mp4",
        SourceRef::new("/media/holiday.mp4"),
        TrackKind::Video,
    );

    assert_eq!(store.tracks().len(), 2);
    let audio_id = added.derived_audio.clone().unwrap();
    assert_eq!(store.linked_audio(&added.track_id), Some(&audio_id));

    let audio = store.track(&audio_id).unwrap();
    assert_eq!(audio.kind, TrackKind::Audio);
    assert_eq!(audio.name, "holiday (Audio)");
    assert!(audio.segments[0].derived_from_video);
    assert_eq!(audio.segments[0].file_id, added.file_id);

    let video = store.track(&added.track_id).unwrap();
    assert_eq!(video.segments.len(), 1);
    assert!(video.segments[0].is_placeholder());
}

#[test]
fn test_audio_upload_creates_single_track() {
    let (store, added) =
        SegmentStore::new().add_track("song.mp3", SourceRef::new("/media/song.mp3"), TrackKind::Audio);
    assert_eq!(store.tracks().len(), 1);
    assert!(added.derived_audio.is_none());
    assert!(store.links().is_empty());
}

#[test]
fn test_add_track_leaves_previous_snapshot_untouched() {
    let empty = SegmentStore::new();
    let (store, _) = empty.add_track("a.mp4", SourceRef::new("a.mp4"), TrackKind::Video);
    assert!(empty.is_empty());
    assert!(!store.is_empty());
}

#[test]
fn test_probe_backfills_video_and_derived_audio() {
    let (store, added) = video_session(12.5);
    let audio_id = added.derived_audio.unwrap();

    assert_eq!(spans(&store, &added.track_id), vec![(0.0, 12.5)]);
    assert_eq!(spans(&store, &audio_id), vec![(0.0, 12.5)]);
    assert_eq!(store.duration(), 12.5);
}

#[test]
fn test_duration_comes_from_first_probe_only() {
    let (store, _) = video_session(10.0);
    let (store, second) = store.add_track("long.mp4", SourceRef::new("long.mp4"), TrackKind::Video);
    let store = store.apply_probed_duration(&second.track_id, 30.0);

    assert_eq!(store.duration(), 10.0);
    assert_eq!(spans(&store, &second.track_id), vec![(0.0, 30.0)]);
}

#[test]
fn test_failed_probe_keeps_placeholder() {
    let (store, added) =
        SegmentStore::new().add_track("a.mp4", SourceRef::new("a.mp4"), TrackKind::Video);
    let store = store.apply_probed_duration(&added.track_id, f64::NAN);
    assert_eq!(spans(&store, &added.track_id), vec![(0.0, 0.0)]);
    assert_eq!(store.duration(), 0.0);
}

#[test]
fn test_cut_splits_segment_and_preserves_file() {
    let (store, added) = video_session(10.0);
    let original = first_segment(&store, &added.track_id);

    let store = store.cut(&added.track_id, &original, 4.0);
    let track = store.track(&added.track_id).unwrap();

    assert_eq!(spans(&store, &added.track_id), vec![(0.0, 4.0), (4.0, 10.0)]);
    assert_eq!(track.segments[0].id, original);
    assert_ne!(track.segments[1].id, original);
    assert!(track.segments.iter().all(|s| s.file_id == added.file_id));
    assert!(track.segments.iter().all(|s| !s.derived_from_video));
}

#[test]
fn test_cut_at_or_outside_boundaries_is_noop() {
    let (store, added) = video_session(10.0);
    let original = first_segment(&store, &added.track_id);

    for at in [0.0, -1.0, 10.0, 11.0] {
        let after = store.cut(&added.track_id, &original, at);
        assert_eq!(after, store, "cut at {} should not change state", at);
    }
}

#[test]
fn test_cut_propagates_to_linked_audio() {
    let (store, added) = video_session(10.0);
    let audio_id = added.derived_audio.clone().unwrap();
    let original = first_segment(&store, &added.track_id);

    let store = store.cut(&added.track_id, &original, 3.0);
    assert_eq!(spans(&store, &audio_id), vec![(0.0, 3.0), (3.0, 10.0)]);
    assert!(store
        .track(&audio_id)
        .unwrap()
        .segments
        .iter()
        .all(|s| s.derived_from_video));
}

#[test]
fn test_cut_outside_first_audio_segment_leaves_audio_alone() {
    let (store, added) = video_session(10.0);
    let audio_id = added.derived_audio.clone().unwrap();
    let original = first_segment(&store, &added.track_id);

    let store = store.cut(&added.track_id, &original, 3.0);
    let tail = store.track(&added.track_id).unwrap().segments[1].id.clone();
    let store = store.cut(&added.track_id, &tail, 7.0);

    assert_eq!(spans(&store, &added.track_id), vec![(0.0, 3.0), (3.0, 7.0), (7.0, 10.0)]);
    assert_eq!(spans(&store, &audio_id), vec![(0.0, 3.0), (3.0, 10.0)]);
}

#[test]
fn test_cut_inside_first_audio_segment_still_splits_it() {
    let (store, added) = video_session(10.0);
    let audio_id = added.derived_audio.clone().unwrap();

    let store = store.cut(&added.track_id, &first_segment(&store, &added.track_id), 6.0);
    let head = first_segment(&store, &added.track_id);
    let store = store.cut(&added.track_id, &head, 2.0);

    assert_eq!(spans(&store, &audio_id), vec![(0.0, 2.0), (2.0, 6.0), (6.0, 10.0)]);
}

#[test]
fn test_cut_on_audio_track_does_not_touch_video() {
    let (store, added) = video_session(10.0);
    let audio_id = added.derived_audio.clone().unwrap();
    let audio_segment = first_segment(&store, &audio_id);

    let store = store.cut(&audio_id, &audio_segment, 5.0);
    assert_eq!(spans(&store, &audio_id).len(), 2);
    assert_eq!(spans(&store, &added.track_id), vec![(0.0, 10.0)]);
}

#[test]
fn test_unknown_ids_are_ignored() {
    let (store, added) = video_session(10.0);
    let ghost_track = TrackId::new("nope");
    let ghost_segment = SegmentId::new("nope");

    assert_eq!(store.cut(&ghost_track, &ghost_segment, 2.0), store);
    assert_eq!(store.cut(&added.track_id, &ghost_segment, 2.0), store);
    assert_eq!(store.remove_segment(&ghost_track, &ghost_segment), store);
    assert_eq!(store.remove_segment(&added.track_id, &ghost_segment), store);
    assert_eq!(store.remove_track(&ghost_track), store);
    assert_eq!(store.apply_probed_duration(&ghost_track, 3.0), store);
}

#[test]
fn test_remove_video_segment_removes_contained_audio_only() {
    let (store, added) = video_session(10.0);
    let audio_id = added.derived_audio.clone().unwrap();

    // Video: [0,4) [4,10). Audio cut again at 2 and 6: [0,2) [2,4) [4,6) [6,10).
    let store = store.cut(&added.track_id, &first_segment(&store, &added.track_id), 4.0);
    let audio_head = first_segment(&store, &audio_id);
    let store = store.cut(&audio_id, &audio_head, 2.0);
    let audio_tail = store.track(&audio_id).unwrap().segments[2].id.clone();
    let store = store.cut(&audio_id, &audio_tail, 6.0);
    assert_eq!(
        spans(&store, &audio_id),
        vec![(0.0, 2.0), (2.0, 4.0), (4.0, 6.0), (6.0, 10.0)]
    );

    let video_head = first_segment(&store, &added.track_id);
    let store = store.remove_segment(&added.track_id, &video_head);

    assert_eq!(spans(&store, &added.track_id), vec![(4.0, 10.0)]);
    assert_eq!(spans(&store, &audio_id), vec![(4.0, 6.0), (6.0, 10.0)]);
}

#[test]
fn test_partially_overlapping_audio_survives() {
    let (store, added) = video_session(10.0);
    let audio_id = added.derived_audio.clone().unwrap();
    let mut store = store.cut(&added.track_id, &first_segment(&store, &added.track_id), 5.0);

    // Re-slice the audio so one segment straddles the video boundary at 5.
    let template = store.track(&audio_id).unwrap().segments[0].clone();
    let audio = store.track_mut(&audio_id).unwrap();
    audio.segments = [(0.0, 3.0), (3.0, 7.0), (7.0, 10.0)]
        .iter()
        .enumerate()
        .map(|(i, &(start, end))| Segment {
            id: SegmentId::new(format!("a{}", i)),
            start,
            end,
            ..template.clone()
        })
        .collect();

    let store = store.remove_segment(&added.track_id, &first_segment(&store, &added.track_id));
    assert_eq!(spans(&store, &added.track_id), vec![(5.0, 10.0)]);
    assert_eq!(spans(&store, &audio_id), vec![(3.0, 7.0), (7.0, 10.0)]);
}

#[test]
fn test_removing_last_segment_prunes_track_and_link() {
    let (store, added) =
        SegmentStore::new().add_track("song.mp3", SourceRef::new("song.mp3"), TrackKind::Audio);
    let store = store.apply_probed_duration(&added.track_id, 4.0);
    let store = store.remove_segment(&added.track_id, &first_segment(&store, &added.track_id));
    assert!(store.is_empty());

    let (store, added) = video_session(10.0);
    let audio_id = added.derived_audio.clone().unwrap();
    let store = store.remove_segment(&audio_id, &first_segment(&store, &audio_id));
    assert!(store.track(&audio_id).is_none());
    assert!(store.linked_audio(&added.track_id).is_none());
    assert!(store.track(&added.track_id).is_some());
}

#[test]
fn test_remove_segment_relocates_cursor_to_following_start() {
    let (store, added) = video_session(10.0);
    let store = store.cut(&added.track_id, &first_segment(&store, &added.track_id), 5.0);
    let tail = store.track(&added.track_id).unwrap().segments[1].id.clone();
    let store = store.cut(&added.track_id, &tail, 8.0);
    assert_eq!(spans(&store, &added.track_id), vec![(0.0, 5.0), (5.0, 8.0), (8.0, 10.0)]);

    let middle = store.track(&added.track_id).unwrap().segments[1].id.clone();
    let store = store.seek(6.0).remove_segment(&added.track_id, &middle);

    assert_eq!(store.cursor(), 8.0);
}

#[test]
fn test_remove_segment_relocates_cursor_to_preceding_end() {
    let (store, added) = video_session(10.0);
    let store = store.cut(&added.track_id, &first_segment(&store, &added.track_id), 5.0);
    let tail = store.track(&added.track_id).unwrap().segments[1].id.clone();

    let store = store.seek(9.0).remove_segment(&added.track_id, &tail);
    assert_eq!(store.cursor(), 5.0);
}

#[test]
fn test_remove_segment_outside_cursor_keeps_cursor() {
    let (store, added) = video_session(10.0);
    let store = store.cut(&added.track_id, &first_segment(&store, &added.track_id), 5.0);
    let tail = store.track(&added.track_id).unwrap().segments[1].id.clone();

    let store = store.seek(2.0).remove_segment(&added.track_id, &tail);
    assert_eq!(store.cursor(), 2.0);
}

#[test]
fn test_removing_everything_resets_cursor() {
    let (store, added) = video_session(10.0);
    let store = store
        .seek(4.0)
        .remove_segment(&added.track_id, &first_segment(&store, &added.track_id));
    assert!(store.is_empty());
    assert_eq!(store.cursor(), 0.0);
}

#[test]
fn test_remove_video_track_removes_linked_audio() {
    let (store, added) = video_session(10.0);
    let (store, song) = store.add_track("song.mp3", SourceRef::new("song.mp3"), TrackKind::Audio);
    let audio_id = added.derived_audio.clone().unwrap();

    let store = store.remove_track(&added.track_id);
    assert!(store.track(&added.track_id).is_none());
    assert!(store.track(&audio_id).is_none());
    assert!(store.links().is_empty());
    assert!(store.track(&song.track_id).is_some());
}

#[test]
fn test_remove_derived_audio_track_clears_link() {
    let (store, added) = video_session(10.0);
    let audio_id = added.derived_audio.clone().unwrap();

    let store = store.remove_track(&audio_id);
    assert!(store.track(&added.track_id).is_some());
    assert!(store.links().is_empty());
}

#[test]
fn test_seek_clamps_to_duration() {
    let (store, _) = video_session(10.0);
    assert_eq!(store.seek(-3.0).cursor(), 0.0);
    assert_eq!(store.seek(42.0).cursor(), 10.0);
    assert_eq!(store.seek(f64::NAN).cursor(), store.cursor());
}

#[test]
fn test_segment_ids_are_unique_across_cuts() {
    let (store, added) = video_session(10.0);
    let store = store.cut(&added.track_id, &first_segment(&store, &added.track_id), 2.0);
    let store = store.cut(&added.track_id, &first_segment(&store, &added.track_id), 1.0);

    let mut ids: Vec<String> = store
        .tracks()
        .iter()
        .flat_map(|t| t.segments.iter().map(|s| s.id.to_string()))
        .collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
}
