// Unit tests for the timeline view

use super::*;

fn session() -> (SegmentStore, TrackId, TrackId) {
    let (store, added) =
        SegmentStore::new().add_track("clip.mp4", SourceRef::new("clip.mp4"), TrackKind::Video);
    let store = store.apply_probed_duration(&added.track_id, 20.0);
    let audio = added.derived_audio.clone().unwrap();
    (store, added.track_id, audio)
}

#[test]
fn test_time_at_maps_and_clamps() {
    assert_eq!(TimelineGeometry::time_at(50.0, 200.0, 20.0), 5.0);
    assert_eq!(TimelineGeometry::time_at(-10.0, 200.0, 20.0), 0.0);
    assert_eq!(TimelineGeometry::time_at(500.0, 200.0, 20.0), 20.0);
    assert_eq!(TimelineGeometry::time_at(50.0, 0.0, 20.0), 0.0);
}

#[test]
fn test_layout_is_proportional() {
    let (store, video, _) = session();
    let segment = &store.track(&video).unwrap().segments[0];
    let layout = TimelineGeometry::layout(segment, 40.0);
    assert_eq!(layout.left, 0.0);
    assert_eq!(layout.width, 50.0);
}

#[test]
fn test_layout_guards_zero_duration() {
    let (store, video, _) = session();
    let segment = &store.track(&video).unwrap().segments[0];
    let layout = TimelineGeometry::layout(segment, 0.0);
    assert_eq!(layout.width, 20.0 / MIN_LAYOUT_DURATION * 100.0);
}

#[test]
fn test_click_and_drag_seek() {
    let (store, _, _) = session();
    let mut view = TimelineView::new();

    let store = view.apply(&store, TimelineIntent::Click { x: 100.0, width: 400.0 });
    assert_eq!(store.cursor(), 5.0);

    let store = view.apply(&store, TimelineIntent::DragTo { x: 300.0, width: 400.0 });
    assert_eq!(store.cursor(), 15.0);
}

#[test]
fn test_cut_selected_uses_cursor_and_clears_selection() {
    let (store, video, _) = session();
    let segment_id = store.track(&video).unwrap().segments[0].id.clone();
    let mut view = TimelineView::new();

    let store = view.apply(&store, TimelineIntent::Seek { time: 7.0 });
    let store = view.apply(
        &store,
        TimelineIntent::Select {
            track_id: video.clone(),
            segment_id,
        },
    );
    assert!(view.selected().is_some());

    let store = view.apply(&store, TimelineIntent::CutSelected);
    let ends: Vec<f64> = store.track(&video).unwrap().segments.iter().map(|s| s.end).collect();
    assert_eq!(ends, vec![7.0, 20.0]);
    assert!(view.selected().is_none());
}

#[test]
fn test_cut_selected_without_selection_is_noop() {
    let (store, _, _) = session();
    let mut view = TimelineView::new();
    assert_eq!(view.apply(&store, TimelineIntent::CutSelected), store);
}

#[test]
fn test_removing_selected_segment_drops_selection() {
    let (store, video, _) = session();
    let segment_id = store.track(&video).unwrap().segments[0].id.clone();
    let mut view = TimelineView::new();

    let store = view.apply(
        &store,
        TimelineIntent::Select {
            track_id: video.clone(),
            segment_id: segment_id.clone(),
        },
    );
    let store = view.apply(
        &store,
        TimelineIntent::RemoveSegment {
            track_id: video,
            segment_id,
        },
    );
    assert!(store.is_empty());
    assert!(view.selected().is_none());
}

#[test]
fn test_disabled_view_ignores_intents() {
    let (store, video, _) = session();
    let mut view = TimelineView::new();
    view.set_disabled(true);
    let after = view.apply(&store, TimelineIntent::RemoveTrack { track_id: video });
    assert_eq!(after, store);
}

#[test]
fn test_rows_group_derived_audio_under_video() {
    let (store, video, audio) = session();
    let (store, song) = store.add_track("song.mp3", SourceRef::new("song.mp3"), TrackKind::Audio);

    let rows = TimelineView::rows(&store);
    let order: Vec<&TrackId> = rows.iter().map(|r| &r.track.id).collect();
    assert_eq!(order, vec![&video, &audio, &song.track_id]);
    assert_eq!(rows[1].under, Some(&video));
    assert_eq!(rows[2].under, None);
}

#[test]
fn test_intent_deserializes_from_json() {
    let intent: TimelineIntent =
        serde_json::from_str(r#"{"intent":"cut","track_id":"t2","segment_id":"s3","at":4.5}"#)
            .unwrap();
    assert_eq!(
        intent,
        TimelineIntent::Cut {
            track_id: TrackId::new("t2"),
            segment_id: SegmentId::new("s3"),
            at: 4.5
        }
    );
}

#[test]
fn test_render_text_lists_lanes_and_segments() {
    let (store, _, _) = session();
    let text = TimelineView::render_text(&store.seek(10.0), 40);
    assert!(text.starts_with("0:10 / 0:20"));
    assert!(text.contains("[video] clip.mp4"));
    assert!(text.contains("[audio] clip (Audio)"));
    assert!(text.contains('|'));
}

#[test]
fn test_render_text_empty_store() {
    let text = TimelineView::render_text(&SegmentStore::new(), 40);
    assert!(text.contains("No tracks added"));
}
