//! shaderseq is the editing core of a timeline for sequencing ISF shader clips.
//!
//! Clips are time-bounded shader instances placed on tracks. Each clip carries
//! base parameter values and keyframed automation curves whose times are
//! relative to the clip's start.
//!
//! # Overview
//!
//! 1. **Keyframe math**: clamping, lookup and validation over sorted keyframe lists.
//! 2. **Automation**: per-parameter curves with insert-or-update and linear sampling.
//! 3. **Resize**: [`DragSnapshot::resize`] turns an immutable pre-drag snapshot plus
//!    the pointer into new clip bounds and a full keyframe replacement set.
//! 4. **Store**: [`TimelineStore`] owns the [`Timeline`] and exposes CRUD.
//! 5. **View**: [`ViewState`] holds zoom, scroll, selection and drag gestures.
//!
//! Rendering, shader loading and the playback clock live outside this crate;
//! [`ShaderLibrary`] and [`PlaybackClock`] are the seams they plug into, and
//! [`Evaluator`] resolves what a renderer needs at a given time.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod automation;
mod eval;
mod foundation;
mod interaction;
mod resize;
mod shader;
mod timeline;

pub use automation::curve::{Automation, AutomationCurve, interpolate};
pub use automation::keyframe::{
    Keyframe, KeyframeReport, TimeConstraints, clamp_time_to_adjacent_keyframes, clamp_value,
    find_keyframe_index, move_keyframe, validate_keyframes,
};
pub use eval::evaluator::{EvaluatedClip, EvaluatedFrame, Evaluator};
pub use eval::time::PlaybackClock;
pub use foundation::core::{
    ClipId, DEFAULT_CLIP_DURATION, DEFAULT_TIMELINE_DURATION, KEYFRAME_TIME_TOLERANCE,
    MIN_CLIP_DURATION, MIN_KEYFRAME_GAP, SNAP_GRID, TrackId, snap_to_grid,
};
pub use foundation::error::{SeqError, SeqResult};
pub use interaction::view::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, Selection, ViewState};
pub use resize::engine::{
    DragSnapshot, ResizeHandle, ResizeMode, ResizeOutcome, SnapshotKeyframe,
};
pub use shader::library::{
    InMemoryShaderLibrary, InputKind, ShaderInput, ShaderLibrary, default_parameters,
    default_value,
};
pub use timeline::model::{Clip, ParamValue, Timeline, Track};
pub use timeline::store::TimelineStore;
