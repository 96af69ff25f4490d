//! Clip resize computation.
//!
//! Every drag frame is a pure function of the [`DragSnapshot`] taken at
//! pointer-down and the current pointer state. Nothing is ever derived from
//! the clip as already mutated by an earlier frame of the same gesture.

use std::collections::BTreeMap;

use crate::automation::keyframe::Keyframe;
use crate::foundation::core::{ClipId, MIN_CLIP_DURATION, SNAP_GRID, snap_to_grid};
use crate::timeline::model::Clip;

/// Which clip edge is being dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    /// Start edge; moves `start_time` and keeps the end fixed.
    Left,
    /// End edge; keeps `start_time` fixed.
    Right,
}

/// How keyframes follow a resize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    /// Keyframes keep their absolute timeline position and bound the edge.
    #[default]
    Absolute,
    /// Keyframes scale with the duration change.
    ///
    /// Gaps scale too and are not floored at [`MIN_KEYFRAME_GAP`](crate::MIN_KEYFRAME_GAP):
    /// a deep shrink can pull neighbours inside the lookup tolerance, after which
    /// a time-addressed removal hits both.
    Proportional,
}

impl ResizeMode {
    /// Mode for the current modifier-key state.
    pub fn from_modifier(held: bool) -> Self {
        if held {
            Self::Proportional
        } else {
            Self::Absolute
        }
    }
}

/// One keyframe as captured at gesture start.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SnapshotKeyframe {
    /// Owning curve's parameter name.
    pub parameter: String,
    /// Clip-relative time at capture.
    pub time: f64,
    /// Value at capture.
    pub value: f64,
}

/// Immutable pre-gesture state of a clip being resized.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DragSnapshot {
    /// Clip under the pointer.
    pub clip_id: ClipId,
    /// Dragged edge.
    pub handle: ResizeHandle,
    /// `start_time` at pointer-down.
    pub original_start_time: f64,
    /// `duration` at pointer-down.
    pub original_duration: f64,
    /// Every keyframe of every curve, curve by curve in time order.
    pub original_keyframes: Vec<SnapshotKeyframe>,
}

/// New clip bounds plus the full replacement keyframe set per curve.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResizeOutcome {
    /// New absolute start time.
    pub start_time: f64,
    /// New duration.
    pub duration: f64,
    /// Replacement keyframes keyed by parameter name.
    pub curves: BTreeMap<String, Vec<Keyframe>>,
}

impl DragSnapshot {
    /// Capture `clip` at pointer-down on `handle`.
    pub fn capture(clip: &Clip, handle: ResizeHandle) -> Self {
        let original_keyframes = clip
            .automation
            .curves()
            .iter()
            .flat_map(|curve| {
                curve.keyframes.iter().map(|k| SnapshotKeyframe {
                    parameter: curve.parameter.clone(),
                    time: k.time,
                    value: k.value,
                })
            })
            .collect();

        Self {
            clip_id: clip.id,
            handle,
            original_start_time: clip.start_time,
            original_duration: clip.duration,
            original_keyframes,
        }
    }

    /// Original end time (`start + duration`).
    pub fn original_end_time(&self) -> f64 {
        self.original_start_time + self.original_duration
    }

    /// `(earliest, latest)` captured keyframe time, clip-relative.
    pub fn keyframe_bounds(&self) -> Option<(f64, f64)> {
        self.original_keyframes
            .iter()
            .map(|k| (k.time, k.time))
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }

    /// Compute the clip state for a pointer at `pointer_time` (timeline seconds).
    ///
    /// Pure and idempotent: the same inputs always produce the same outcome.
    pub fn resize(&self, pointer_time: f64, mode: ResizeMode) -> ResizeOutcome {
        let pointer = snap_to_grid(pointer_time, SNAP_GRID);
        let start = self.original_start_time;
        let end = self.original_end_time();
        let bounds = self.keyframe_bounds();

        let (new_start, new_duration) = match self.handle {
            ResizeHandle::Left => {
                let mut new_start = pointer.min(end - MIN_CLIP_DURATION).max(0.0);
                if mode == ResizeMode::Absolute {
                    // Shrinking may not pass the earliest keyframe; extending is free.
                    if let Some((earliest, _)) = bounds {
                        new_start = new_start.min(start + earliest);
                    }
                }
                (new_start, end - new_start)
            }
            ResizeHandle::Right => {
                let mut new_end = pointer.max(start + MIN_CLIP_DURATION);
                if mode == ResizeMode::Absolute {
                    if let Some((_, latest)) = bounds {
                        new_end = new_end.max(start + latest);
                    }
                }
                (start, new_end - start)
            }
        };

        let shift = start - new_start;
        let scale = new_duration / self.original_duration;
        let mut curves: BTreeMap<String, Vec<Keyframe>> = BTreeMap::new();
        for k in &self.original_keyframes {
            let time = match mode {
                ResizeMode::Absolute => k.time + shift,
                ResizeMode::Proportional => k.time * scale,
            };
            curves
                .entry(k.parameter.clone())
                .or_default()
                .push(Keyframe::new(time, k.value));
        }

        tracing::debug!(
            clip = %self.clip_id,
            handle = ?self.handle,
            ?mode,
            pointer,
            new_start,
            new_duration,
            "resize step"
        );

        ResizeOutcome {
            start_time: new_start,
            duration: new_duration,
            curves,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resize/engine.rs"]
mod tests;
