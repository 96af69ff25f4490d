//! Ephemeral editor state: zoom, scroll, selection and in-flight gestures.
//!
//! Nothing here is persisted. Gestures hold their own snapshot of the clip
//! they started on; the store never references them.

use crate::automation::keyframe::{Keyframe, find_keyframe_index};
use crate::foundation::core::{ClipId, KEYFRAME_TIME_TOLERANCE, SNAP_GRID, TrackId};
use crate::foundation::error::SeqResult;
use crate::resize::engine::{DragSnapshot, ResizeHandle, ResizeMode, ResizeOutcome};
use crate::timeline::model::Clip;
use crate::timeline::store::TimelineStore;

/// Default zoom in pixels per second.
pub const DEFAULT_ZOOM: f64 = 50.0;
/// Smallest zoom in pixels per second.
pub const MIN_ZOOM: f64 = 10.0;
/// Largest zoom in pixels per second.
pub const MAX_ZOOM: f64 = 500.0;

/// Current selection. Selecting a clip also selects its track.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    /// Selected track.
    pub track: Option<TrackId>,
    /// Selected clip.
    pub clip: Option<ClipId>,
    /// Selected keyframe as `(parameter, time)` on the selected clip.
    pub keyframe: Option<(String, f64)>,
}

#[derive(Clone, Debug)]
struct ResizeGesture {
    snapshot: DragSnapshot,
    pointer_origin: f64,
}

#[derive(Clone, Debug)]
struct KeyframeDrag {
    clip_id: ClipId,
    parameter: String,
    original: Keyframe,
    current_time: f64,
}

#[derive(Clone, Debug)]
enum Gesture {
    Resize(ResizeGesture),
    Keyframe(KeyframeDrag),
}

/// Zoom, scroll, selection and drag bookkeeping for one editor view.
#[derive(Clone, Debug)]
pub struct ViewState {
    zoom: f64,
    scroll_offset: f64,
    /// Current selection.
    pub selection: Selection,
    gesture: Option<Gesture>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            scroll_offset: 0.0,
            selection: Selection::default(),
            gesture: None,
        }
    }
}

impl ViewState {
    /// Create a view at default zoom, scrolled to the start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pixels per second.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Horizontal scroll in pixels.
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Set zoom, clamped to [`MIN_ZOOM`]..=[`MAX_ZOOM`].
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Multiply zoom by `factor`, keeping the time under `anchor_x` in place.
    pub fn zoom_at(&mut self, factor: f64, anchor_x: f64) {
        let anchored = self.x_to_time(anchor_x);
        self.set_zoom(self.zoom * factor);
        self.scroll_offset = (anchored * self.zoom - anchor_x).max(0.0);
    }

    /// Scroll by `dx` pixels; never scrolls before time zero.
    pub fn scroll_by(&mut self, dx: f64) {
        self.scroll_offset = (self.scroll_offset + dx).max(0.0);
    }

    /// Timeline seconds under view-relative pixel `x`.
    pub fn x_to_time(&self, x: f64) -> f64 {
        (x + self.scroll_offset) / self.zoom
    }

    /// View-relative pixel of timeline second `time`.
    pub fn time_to_x(&self, time: f64) -> f64 {
        time * self.zoom - self.scroll_offset
    }

    /// Select `clip_id` and the track that holds it.
    pub fn select_clip(&mut self, store: &TimelineStore, clip_id: ClipId) {
        self.selection = Selection {
            track: store.clip_track(clip_id).map(|t| t.id),
            clip: Some(clip_id),
            keyframe: None,
        };
    }

    /// Select a track, dropping clip and keyframe selection.
    pub fn select_track(&mut self, track_id: TrackId) {
        self.selection = Selection {
            track: Some(track_id),
            ..Selection::default()
        };
    }

    /// Select a keyframe of the selected clip.
    pub fn select_keyframe(&mut self, parameter: impl Into<String>, time: f64) {
        self.selection.keyframe = Some((parameter.into(), time));
    }

    /// Drop every selection.
    pub fn clear_selection(&mut self) {
        self.selection = Selection::default();
    }

    /// The selected clip, if it still exists.
    pub fn selected_clip<'a>(&self, store: &'a TimelineStore) -> Option<&'a Clip> {
        store.clip(self.selection.clip?)
    }

    /// Return `true` while any gesture is in flight.
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Snapshot of the resize in flight, if any.
    pub fn resize_snapshot(&self) -> Option<&DragSnapshot> {
        match &self.gesture {
            Some(Gesture::Resize(g)) => Some(&g.snapshot),
            _ => None,
        }
    }

    /// Pointer x at which the current resize started.
    pub fn resize_pointer_origin(&self) -> Option<f64> {
        match &self.gesture {
            Some(Gesture::Resize(g)) => Some(g.pointer_origin),
            _ => None,
        }
    }

    #[tracing::instrument(skip(self, store))]
    /// Pointer-down on a clip edge: capture the clip's pre-drag state.
    ///
    /// Returns `false` (and starts nothing) when the clip is unknown.
    pub fn begin_resize(
        &mut self,
        store: &TimelineStore,
        clip_id: ClipId,
        handle: ResizeHandle,
        pointer_x: f64,
    ) -> bool {
        let Some(clip) = store.clip(clip_id) else {
            return false;
        };
        self.gesture = Some(Gesture::Resize(ResizeGesture {
            snapshot: DragSnapshot::capture(clip, handle),
            pointer_origin: pointer_x,
        }));
        true
    }

    /// Pointer-move during a resize.
    ///
    /// Recomputes from the gesture snapshot and writes the result. The
    /// modifier state is read on every call, so the mode can flip mid-drag.
    pub fn update_resize(
        &mut self,
        store: &mut TimelineStore,
        pointer_time: f64,
        proportional: bool,
    ) -> Option<ResizeOutcome> {
        let snapshot = self.resize_snapshot()?;
        let outcome = snapshot.resize(pointer_time, ResizeMode::from_modifier(proportional));
        store.apply_resize(snapshot.clip_id, &outcome);
        Some(outcome)
    }

    #[tracing::instrument(skip(self, store))]
    /// Pointer-down on a keyframe marker.
    ///
    /// Returns `false` when the clip, curve, or keyframe cannot be found.
    pub fn begin_keyframe_drag(
        &mut self,
        store: &TimelineStore,
        clip_id: ClipId,
        parameter: &str,
        time: f64,
    ) -> bool {
        let original = store
            .clip(clip_id)
            .and_then(|c| c.automation.curve(parameter))
            .and_then(|curve| {
                find_keyframe_index(&curve.keyframes, time, KEYFRAME_TIME_TOLERANCE)
                    .map(|i| curve.keyframes[i])
            });
        let Some(original) = original else {
            return false;
        };
        self.gesture = Some(Gesture::Keyframe(KeyframeDrag {
            clip_id,
            parameter: parameter.to_string(),
            original,
            current_time: original.time,
        }));
        self.selection.clip = Some(clip_id);
        self.selection.keyframe = Some((parameter.to_string(), original.time));
        true
    }

    /// Pointer-move while dragging a keyframe.
    ///
    /// `pointer_time` is clip-relative. The time snaps to [`SNAP_GRID`] and is
    /// clamped to the clip and to neighbouring keyframes.
    pub fn update_keyframe_drag(
        &mut self,
        store: &mut TimelineStore,
        pointer_time: f64,
        value: f64,
    ) -> SeqResult<Option<Keyframe>> {
        let Some(Gesture::Keyframe(drag)) = &mut self.gesture else {
            return Ok(None);
        };
        let moved = store.update_keyframe_with(
            drag.clip_id,
            &drag.parameter,
            drag.current_time,
            pointer_time,
            value,
            Some(SNAP_GRID),
        )?;
        if let Some(k) = moved {
            drag.current_time = k.time;
            self.selection.keyframe = Some((drag.parameter.clone(), k.time));
        }
        Ok(moved)
    }

    /// Keyframe being dragged, as it was at pointer-down.
    pub fn keyframe_drag_origin(&self) -> Option<Keyframe> {
        match &self.gesture {
            Some(Gesture::Keyframe(d)) => Some(d.original),
            _ => None,
        }
    }

    /// Pointer-up: discard the gesture. Already-written states stay.
    pub fn end_gesture(&mut self) {
        if self.gesture.take().is_some() {
            tracing::debug!("gesture ended");
        }
    }

    /// Cancel signal; same as [`ViewState::end_gesture`], no rollback.
    pub fn cancel_gesture(&mut self) {
        self.end_gesture();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/view.rs"]
mod tests;
