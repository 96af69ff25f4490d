use crate::foundation::core::{KEYFRAME_TIME_TOLERANCE, MIN_KEYFRAME_GAP, snap_to_grid};
use crate::foundation::error::{SeqError, SeqResult};

/// A single automation control point.
///
/// `time` is in seconds relative to the owning clip's start.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    /// Clip-relative time in seconds.
    pub time: f64,
    /// Parameter value at `time`, conventionally in `[0, 1]`.
    pub value: f64,
}

impl Keyframe {
    /// Create a keyframe.
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

/// Bounds applied when placing a keyframe in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeConstraints {
    /// Earliest allowed time.
    pub min_time: f64,
    /// Latest allowed time.
    pub max_time: f64,
    /// Optional grid the time is rounded to before the final clamp.
    pub snap_grid: Option<f64>,
}

impl TimeConstraints {
    /// Constraints spanning `[min_time, max_time]` without snapping.
    pub fn new(min_time: f64, max_time: f64) -> Self {
        Self {
            min_time,
            max_time,
            snap_grid: None,
        }
    }

    /// Enable snapping to `grid`.
    pub fn with_snap(mut self, grid: f64) -> Self {
        self.snap_grid = Some(grid);
        self
    }
}

impl Default for TimeConstraints {
    fn default() -> Self {
        Self::new(0.0, f64::MAX)
    }
}

/// Advisory ordering report produced by [`validate_keyframes`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct KeyframeReport {
    /// `true` when no problems were found.
    pub valid: bool,
    /// One human-readable message per offending pair.
    pub errors: Vec<String>,
}

// Lower bound wins when the window is empty so an over-constrained key never
// passes its left neighbour.
fn clamp_window(v: f64, lo: f64, hi: f64) -> f64 {
    v.min(hi).max(lo)
}

/// Clamp `candidate` so the keyframe at `moving_index` stays inside `constraints`
/// and at least [`MIN_KEYFRAME_GAP`] away from its neighbours.
///
/// With a snap grid the candidate is rounded first and clamped afterwards, so
/// neighbour spacing always beats the grid.
pub fn clamp_time_to_adjacent_keyframes(
    candidate: f64,
    keyframes: &[Keyframe],
    moving_index: usize,
    constraints: TimeConstraints,
) -> f64 {
    let mut lo = constraints.min_time;
    let mut hi = constraints.max_time;

    if moving_index > 0 {
        if let Some(prev) = keyframes.get(moving_index - 1) {
            lo = lo.max(prev.time + MIN_KEYFRAME_GAP);
        }
    }
    if let Some(next) = keyframes.get(moving_index + 1) {
        hi = hi.min(next.time - MIN_KEYFRAME_GAP);
    }

    let snapped = match constraints.snap_grid {
        Some(grid) => snap_to_grid(candidate, grid),
        None => candidate,
    };
    let out = clamp_window(snapped, lo, hi);
    tracing::trace!(candidate, out, lo, hi, "clamped keyframe time");
    out
}

/// Saturate `v` into `[min, max]`.
pub fn clamp_value(v: f64, min: f64, max: f64) -> f64 {
    v.max(min).min(max)
}

/// Index of the first keyframe within `tolerance` seconds of `time`.
pub fn find_keyframe_index(keyframes: &[Keyframe], time: f64, tolerance: f64) -> Option<usize> {
    keyframes
        .iter()
        .position(|k| (k.time - time).abs() <= tolerance)
}

/// Compute where the keyframe currently at `current_time` lands when dragged to
/// `(desired_time, desired_value)`.
///
/// The input is not modified. Fails with [`SeqError::NotFound`] when no keyframe
/// lies within [`KEYFRAME_TIME_TOLERANCE`] of `current_time`.
pub fn move_keyframe(
    keyframes: &[Keyframe],
    current_time: f64,
    desired_time: f64,
    desired_value: f64,
    constraints: TimeConstraints,
) -> SeqResult<Keyframe> {
    let index = find_keyframe_index(keyframes, current_time, KEYFRAME_TIME_TOLERANCE)
        .ok_or_else(|| SeqError::not_found(format!("no keyframe at t={current_time:.3}s")))?;

    Ok(Keyframe {
        time: clamp_time_to_adjacent_keyframes(desired_time, keyframes, index, constraints),
        value: clamp_value(desired_value, 0.0, 1.0),
    })
}

/// Check ordering and spacing of consecutive keyframes.
pub fn validate_keyframes(keyframes: &[Keyframe]) -> KeyframeReport {
    let mut errors = Vec::new();
    for (i, pair) in keyframes.windows(2).enumerate() {
        let (a, b) = (pair[0], pair[1]);
        if b.time < a.time {
            errors.push(format!(
                "keyframes {i} and {} out of order ({:.3}s > {:.3}s)",
                i + 1,
                a.time,
                b.time
            ));
        } else if b.time - a.time < MIN_KEYFRAME_GAP - 1e-9 {
            errors.push(format!(
                "keyframes {i} and {} closer than {MIN_KEYFRAME_GAP}s ({:.3}s apart)",
                i + 1,
                b.time - a.time
            ));
        }
    }
    KeyframeReport {
        valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/automation/keyframe.rs"]
mod tests;
