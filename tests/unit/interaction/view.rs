use super::*;
use crate::shader::library::InMemoryShaderLibrary;

fn setup(start: f64, duration: f64, keys: &[f64]) -> (TimelineStore, ClipId) {
    let mut store = TimelineStore::new();
    let track = store.add_track();
    let clip = store
        .add_clip_with_duration(&InMemoryShaderLibrary::new(), track, "plasma", start, duration)
        .unwrap();
    for &t in keys {
        store.add_keyframe(clip, "level", t, 0.5).unwrap();
    }
    (store, clip)
}

fn key_times(store: &TimelineStore, clip: ClipId) -> Vec<f64> {
    store
        .clip(clip)
        .unwrap()
        .automation
        .curve("level")
        .map(|c| c.keyframes.iter().map(|k| k.time).collect())
        .unwrap_or_default()
}

#[test]
fn pixel_time_conversion_round_trips_with_scroll() {
    let mut view = ViewState::new();
    view.set_zoom(100.0);
    view.scroll_by(250.0);
    assert_eq!(view.x_to_time(50.0), 3.0);
    assert_eq!(view.time_to_x(3.0), 50.0);
    view.scroll_by(-1000.0);
    assert_eq!(view.scroll_offset(), 0.0);
}

#[test]
fn zoom_is_clamped_and_anchored() {
    let mut view = ViewState::new();
    view.set_zoom(1.0);
    assert_eq!(view.zoom(), MIN_ZOOM);
    view.set_zoom(1e6);
    assert_eq!(view.zoom(), MAX_ZOOM);

    view.set_zoom(100.0);
    view.scroll_by(100.0);
    let before = view.x_to_time(200.0);
    view.zoom_at(2.0, 200.0);
    assert_eq!(view.zoom(), 200.0);
    assert!((view.x_to_time(200.0) - before).abs() < 1e-9);
}

#[test]
fn selection_tracks_owner_and_tolerates_removal() {
    let (mut store, clip) = setup(0.0, 5.0, &[]);
    let mut view = ViewState::new();
    view.select_clip(&store, clip);
    assert!(view.selection.track.is_some());
    assert_eq!(view.selected_clip(&store).map(|c| c.id), Some(clip));

    store.remove_clip(clip);
    assert!(view.selected_clip(&store).is_none());

    view.select_keyframe("level", 1.0);
    assert!(view.selection.keyframe.is_some());
    view.clear_selection();
    assert_eq!(view.selection, Selection::default());
}

#[test]
fn resize_gesture_recomputes_from_snapshot() {
    let (mut store, clip) = setup(10.0, 20.0, &[5.0, 10.0]);
    let mut view = ViewState::new();
    assert!(view.begin_resize(&store, clip, ResizeHandle::Left, 500.0));
    assert_eq!(view.resize_pointer_origin(), Some(500.0));

    // Several frames at different positions, then back to one seen before.
    view.update_resize(&mut store, 7.0, false).unwrap();
    view.update_resize(&mut store, 3.0, false).unwrap();
    let out = view.update_resize(&mut store, 5.0, false).unwrap();
    assert_eq!(out.start_time, 5.0);
    assert_eq!(out.duration, 25.0);
    assert_eq!(key_times(&store, clip), vec![10.0, 15.0]);

    view.end_gesture();
    assert!(!view.is_dragging());
    assert!(view.update_resize(&mut store, 1.0, false).is_none());
    assert_eq!(store.clip(clip).unwrap().start_time, 5.0);
}

#[test]
fn modifier_switch_mid_drag_changes_formula() {
    let (mut store, clip) = setup(0.0, 10.0, &[5.0]);
    let mut view = ViewState::new();
    view.begin_resize(&store, clip, ResizeHandle::Right, 0.0);

    view.update_resize(&mut store, 15.0, false).unwrap();
    assert_eq!(key_times(&store, clip), vec![5.0]);

    view.update_resize(&mut store, 15.0, true).unwrap();
    assert_eq!(key_times(&store, clip), vec![7.5]);

    view.update_resize(&mut store, 15.0, false).unwrap();
    assert_eq!(key_times(&store, clip), vec![5.0]);
    view.cancel_gesture();
}

#[test]
fn begin_resize_on_unknown_clip_does_nothing() {
    let (store, _) = setup(0.0, 10.0, &[]);
    let mut view = ViewState::new();
    assert!(!view.begin_resize(&store, ClipId::new(), ResizeHandle::Right, 0.0));
    assert!(view.resize_snapshot().is_none());
}

#[test]
fn keyframe_drag_snaps_and_respects_neighbours() {
    let (mut store, clip) = setup(0.0, 10.0, &[2.0, 4.0]);
    let mut view = ViewState::new();
    assert!(view.begin_keyframe_drag(&store, clip, "level", 2.0));
    assert_eq!(view.keyframe_drag_origin(), Some(Keyframe::new(2.0, 0.5)));

    let k = view.update_keyframe_drag(&mut store, 2.74, 0.8).unwrap().unwrap();
    assert_eq!(k.time, 2.7);
    assert_eq!(k.value, 0.8);

    let k = view.update_keyframe_drag(&mut store, 9.0, 0.8).unwrap().unwrap();
    assert!((k.time - 3.98).abs() < 1e-12);
    assert_eq!(key_times(&store, clip).len(), 2);
    assert_eq!(view.selection.keyframe.as_ref().map(|(p, _)| p.as_str()), Some("level"));
    view.end_gesture();
}

#[test]
fn keyframe_drag_requires_existing_keyframe() {
    let (store, clip) = setup(0.0, 10.0, &[2.0]);
    let mut view = ViewState::new();
    assert!(!view.begin_keyframe_drag(&store, clip, "level", 3.0));
    assert!(!view.begin_keyframe_drag(&store, clip, "other", 2.0));
    assert!(!view.is_dragging());
}
