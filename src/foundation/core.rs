use std::fmt;

/// Minimum spacing in seconds between two keyframes of one automation curve.
pub const MIN_KEYFRAME_GAP: f64 = 0.02;

/// Tolerance in seconds used when looking a keyframe up by time.
pub const KEYFRAME_TIME_TOLERANCE: f64 = 0.01;

/// Shortest duration in seconds a clip may have.
pub const MIN_CLIP_DURATION: f64 = 0.1;

/// Grid in seconds that pointer times snap to during resize and keyframe drags.
pub const SNAP_GRID: f64 = 0.1;

/// Duration in seconds given to clips created without an explicit duration.
pub const DEFAULT_CLIP_DURATION: f64 = 5.0;

/// Extent in seconds of a freshly created timeline.
pub const DEFAULT_TIMELINE_DURATION: f64 = 60.0;

/// Stable identifier of a track.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TrackId(pub uuid::Uuid);

/// Stable identifier of a clip.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ClipId(pub uuid::Uuid);

impl TrackId {
    /// Allocate a fresh random id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipId {
    /// Allocate a fresh random id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ClipId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "track:{}", self.0)
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clip:{}", self.0)
    }
}

/// Round `secs` to the nearest multiple of `grid`.
///
/// Non-positive grids return the input unchanged. The result is computed as
/// `steps / (1 / grid)` so decimal grids like `0.1` land on the closest
/// representable decimal (`7.5`, not `7.500000000000001`).
pub fn snap_to_grid(secs: f64, grid: f64) -> f64 {
    if grid <= 0.0 {
        return secs;
    }
    let per_sec = grid.recip();
    (secs * per_sec).round() / per_sec
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
