use crate::automation::keyframe::{
    Keyframe, TimeConstraints, clamp_time_to_adjacent_keyframes, clamp_value, find_keyframe_index,
};
use crate::foundation::core::{KEYFRAME_TIME_TOLERANCE, MIN_KEYFRAME_GAP};
use crate::foundation::error::{SeqError, SeqResult};

// Slack for gap checks on times produced by `prev + MIN_KEYFRAME_GAP`.
const GAP_EPSILON: f64 = 1e-9;

/// Ordered keyframes animating one named parameter of a clip.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AutomationCurve {
    /// Animated parameter name; unique within a clip.
    pub parameter: String,
    /// Keyframes sorted ascending by time.
    pub keyframes: Vec<Keyframe>,
}

impl AutomationCurve {
    /// Create a curve holding a single keyframe.
    pub fn new(parameter: impl Into<String>, first: Keyframe) -> Self {
        Self {
            parameter: parameter.into(),
            keyframes: vec![first],
        }
    }

    /// Insert a keyframe, or overwrite the value of one already within tolerance of `time`.
    ///
    /// `time` is first clamped into `constraints`. A new keyframe is then pushed
    /// [`MIN_KEYFRAME_GAP`] clear of its neighbours; when the gap around it is too
    /// narrow the curve is left untouched and [`SeqError::Validation`] is returned.
    ///
    /// Returns `true` when a new keyframe was inserted.
    pub fn upsert(
        &mut self,
        time: f64,
        value: f64,
        constraints: TimeConstraints,
    ) -> SeqResult<bool> {
        let time = clamp_value(time, constraints.min_time, constraints.max_time);
        if let Some(i) = find_keyframe_index(&self.keyframes, time, KEYFRAME_TIME_TOLERANCE) {
            self.keyframes[i].value = value;
            return Ok(false);
        }

        let idx = self.keyframes.partition_point(|k| k.time < time);
        self.keyframes.insert(idx, Keyframe::new(time, value));
        let clamped = clamp_time_to_adjacent_keyframes(time, &self.keyframes, idx, constraints);
        if !self.fits_at(idx, clamped, constraints) {
            self.keyframes.remove(idx);
            return Err(SeqError::validation(format!(
                "no room for a keyframe of '{}' near {time}s",
                self.parameter
            )));
        }
        self.keyframes[idx].time = clamped;
        Ok(true)
    }

    /// Remove every keyframe within tolerance of `time`. Returns `true` if any were removed.
    pub fn remove_at(&mut self, time: f64) -> bool {
        let before = self.keyframes.len();
        self.keyframes
            .retain(|k| (k.time - time).abs() > KEYFRAME_TIME_TOLERANCE);
        self.keyframes.len() != before
    }

    /// Replace the whole keyframe list, keeping it sorted.
    pub fn replace(&mut self, keyframes: Vec<Keyframe>) {
        self.keyframes = keyframes;
        self.sort();
    }

    /// Curve value at clip-relative `time`.
    pub fn value_at(&self, time: f64) -> f64 {
        interpolate(&self.keyframes, time)
    }

    /// `(first, last)` keyframe times, or `None` for an empty curve.
    pub fn time_bounds(&self) -> Option<(f64, f64)> {
        Some((self.keyframes.first()?.time, self.keyframes.last()?.time))
    }

    /// Return `true` when the curve has no keyframes left.
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    fn fits_at(&self, index: usize, time: f64, constraints: TimeConstraints) -> bool {
        let after_prev = index == 0
            || self.keyframes[index - 1].time + MIN_KEYFRAME_GAP <= time + GAP_EPSILON;
        let before_next = self
            .keyframes
            .get(index + 1)
            .is_none_or(|next| time <= next.time - MIN_KEYFRAME_GAP + GAP_EPSILON);
        after_prev && before_next && time <= constraints.max_time
    }

    fn sort(&mut self) {
        self.keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
    }
}

/// Sample a sorted keyframe list at `time`.
///
/// Empty lists yield `0.0`. Times outside the keyed range hold the boundary
/// value; inside it the bracketing pair is interpolated linearly.
pub fn interpolate(keyframes: &[Keyframe], time: f64) -> f64 {
    let (Some(first), Some(last)) = (keyframes.first(), keyframes.last()) else {
        return 0.0;
    };
    if keyframes.len() == 1 || time <= first.time {
        return first.value;
    }
    if time >= last.time {
        return last.value;
    }

    let idx = keyframes.partition_point(|k| k.time <= time);
    let a = &keyframes[idx - 1];
    let b = &keyframes[idx];
    let span = b.time - a.time;
    if span <= 0.0 {
        return a.value;
    }
    a.value + (b.value - a.value) * (time - a.time) / span
}

/// All automation curves of one clip, at most one per parameter.
///
/// Curves never persist empty: removing the last keyframe drops the curve.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Automation {
    curves: Vec<AutomationCurve>,
}

impl Automation {
    /// Curves in creation order.
    pub fn curves(&self) -> &[AutomationCurve] {
        &self.curves
    }

    /// Look up the curve animating `parameter`.
    pub fn curve(&self, parameter: &str) -> Option<&AutomationCurve> {
        self.curves.iter().find(|c| c.parameter == parameter)
    }

    fn curve_mut(&mut self, parameter: &str) -> Option<&mut AutomationCurve> {
        self.curves.iter_mut().find(|c| c.parameter == parameter)
    }

    /// Number of animated parameters.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Return `true` when nothing is animated.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Add or overwrite a keyframe at any non-negative time, creating the curve on first use.
    pub fn add_keyframe(&mut self, parameter: &str, time: f64, value: f64) -> SeqResult<()> {
        self.add_keyframe_within(parameter, time, value, TimeConstraints::default())
    }

    /// Like [`Automation::add_keyframe`], with the time clamped into `constraints`.
    ///
    /// See [`AutomationCurve::upsert`] for the neighbour spacing rules.
    pub fn add_keyframe_within(
        &mut self,
        parameter: &str,
        time: f64,
        value: f64,
        constraints: TimeConstraints,
    ) -> SeqResult<()> {
        match self.curve_mut(parameter) {
            Some(curve) => {
                curve.upsert(time, value, constraints)?;
            }
            None => {
                let time = clamp_value(time, constraints.min_time, constraints.max_time);
                self.curves
                    .push(AutomationCurve::new(parameter, Keyframe::new(time, value)));
            }
        }
        Ok(())
    }

    /// Remove keyframes near `time`; prunes the curve if it ends up empty.
    ///
    /// Returns `true` if anything was removed.
    pub fn remove_keyframe(&mut self, parameter: &str, time: f64) -> bool {
        let Some(curve) = self.curve_mut(parameter) else {
            return false;
        };
        let removed = curve.remove_at(time);
        self.prune();
        removed
    }

    /// Drop the whole curve for `parameter`. Returns `true` if it existed.
    pub fn clear(&mut self, parameter: &str) -> bool {
        let before = self.curves.len();
        self.curves.retain(|c| c.parameter != parameter);
        self.curves.len() != before
    }

    /// Replace the keyframes of `parameter` wholesale, creating or pruning the curve as needed.
    pub fn replace(&mut self, parameter: &str, keyframes: Vec<Keyframe>) {
        match self.curve_mut(parameter) {
            Some(curve) => curve.replace(keyframes),
            None => {
                let mut curve = AutomationCurve {
                    parameter: parameter.to_string(),
                    keyframes: Vec::new(),
                };
                curve.replace(keyframes);
                self.curves.push(curve);
            }
        }
        self.prune();
    }

    /// Overwrite one keyframe in place, then re-sort its curve.
    pub(crate) fn set_keyframe(&mut self, parameter: &str, index: usize, keyframe: Keyframe) {
        if let Some(curve) = self.curve_mut(parameter) {
            if let Some(slot) = curve.keyframes.get_mut(index) {
                *slot = keyframe;
                curve.sort();
            }
        }
    }

    /// `(min, max)` keyframe time across every curve, or `None` without keyframes.
    pub fn keyframe_bounds(&self) -> Option<(f64, f64)> {
        self.curves
            .iter()
            .filter_map(AutomationCurve::time_bounds)
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }

    /// Total keyframe count across curves.
    pub fn keyframe_count(&self) -> usize {
        self.curves.iter().map(|c| c.keyframes.len()).sum()
    }

    fn prune(&mut self) {
        self.curves.retain(|c| !c.is_empty());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/automation/curve.rs"]
mod tests;
