use crate::automation::keyframe::{Keyframe, TimeConstraints, find_keyframe_index, move_keyframe};
use crate::foundation::core::{
    ClipId, DEFAULT_CLIP_DURATION, KEYFRAME_TIME_TOLERANCE, MIN_CLIP_DURATION, TrackId,
};
use crate::foundation::error::{SeqError, SeqResult};
use crate::resize::engine::ResizeOutcome;
use crate::shader::library::{ShaderLibrary, default_parameters};
use crate::timeline::model::{Clip, Timeline, Track};

/// Owner of the [`Timeline`] behind a narrow mutation API.
///
/// Mutations addressed at unknown ids are no-ops, so a stale id dispatched
/// after a fast double action is harmless.
#[derive(Clone, Debug, Default)]
pub struct TimelineStore {
    timeline: Timeline,
}

impl TimelineStore {
    /// Create a store with an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing timeline.
    pub fn from_timeline(timeline: Timeline) -> Self {
        Self { timeline }
    }

    /// Read access for rendering and hit-testing.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Look up a track.
    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.timeline.tracks.iter().find(|t| t.id == id)
    }

    /// Look up a clip on any track.
    pub fn clip(&self, id: ClipId) -> Option<&Clip> {
        self.timeline.tracks.iter().find_map(|t| t.clip(id))
    }

    /// Track that owns `clip_id`.
    pub fn clip_track(&self, clip_id: ClipId) -> Option<&Track> {
        self.timeline
            .tracks
            .iter()
            .find(|t| t.clip(clip_id).is_some())
    }

    fn track_mut(&mut self, id: TrackId) -> Option<&mut Track> {
        self.timeline.tracks.iter_mut().find(|t| t.id == id)
    }

    fn clip_mut(&mut self, id: ClipId) -> Option<&mut Clip> {
        self.timeline
            .tracks
            .iter_mut()
            .flat_map(|t| t.clips.iter_mut())
            .find(|c| c.id == id)
    }

    /// Append a track named `Track N`.
    pub fn add_track(&mut self) -> TrackId {
        let track = Track::new(format!("Track {}", self.timeline.tracks.len() + 1));
        let id = track.id;
        tracing::debug!(track = %id, name = %track.name, "add track");
        self.timeline.tracks.push(track);
        id
    }

    /// Remove a track and its clips.
    pub fn remove_track(&mut self, id: TrackId) {
        self.timeline.tracks.retain(|t| t.id != id);
    }

    /// Rename a track.
    pub fn rename_track(&mut self, id: TrackId, name: impl Into<String>) {
        if let Some(track) = self.track_mut(id) {
            track.name = name.into();
        }
    }

    /// Flip the mute flag.
    pub fn toggle_mute(&mut self, id: TrackId) {
        if let Some(track) = self.track_mut(id) {
            track.muted = !track.muted;
        }
    }

    /// Flip the solo flag.
    pub fn toggle_solo(&mut self, id: TrackId) {
        if let Some(track) = self.track_mut(id) {
            track.solo = !track.solo;
        }
    }

    /// Set the overall timeline extent, floored at zero.
    pub fn set_timeline_duration(&mut self, duration: f64) {
        self.timeline.duration = duration.max(0.0);
    }

    /// Add a [`DEFAULT_CLIP_DURATION`] clip of `shader_id` to `track_id`.
    pub fn add_clip(
        &mut self,
        shaders: &impl ShaderLibrary,
        track_id: TrackId,
        shader_id: &str,
        start_time: f64,
    ) -> Option<ClipId> {
        self.add_clip_with_duration(shaders, track_id, shader_id, start_time, DEFAULT_CLIP_DURATION)
    }

    /// Add a clip seeded with the shader's declared defaults.
    ///
    /// Returns `None` (and adds nothing) when `track_id` is unknown.
    pub fn add_clip_with_duration(
        &mut self,
        shaders: &impl ShaderLibrary,
        track_id: TrackId,
        shader_id: &str,
        start_time: f64,
        duration: f64,
    ) -> Option<ClipId> {
        let parameters = match shaders.inputs(shader_id) {
            Some(inputs) => default_parameters(inputs),
            None => {
                tracing::warn!(shader_id, "unknown shader; clip starts without parameters");
                Default::default()
            }
        };
        let track = self.track_mut(track_id)?;
        let clip = Clip::new(shader_id, start_time, duration, parameters);
        let id = clip.id;
        tracing::debug!(clip = %id, track = %track_id, shader_id, start_time, "add clip");
        track.clips.push(clip);
        Some(id)
    }

    /// Remove a clip from whichever track holds it.
    pub fn remove_clip(&mut self, clip_id: ClipId) {
        for track in &mut self.timeline.tracks {
            track.clips.retain(|c| c.id != clip_id);
        }
    }

    /// Overwrite the start time (floored at zero). Keyframes are left untouched.
    pub fn update_clip_time(&mut self, clip_id: ClipId, start_time: f64) {
        if let Some(clip) = self.clip_mut(clip_id) {
            clip.start_time = start_time.max(0.0);
        }
    }

    /// Overwrite the duration, floored at [`MIN_CLIP_DURATION`].
    pub fn update_clip_duration(&mut self, clip_id: ClipId, duration: f64) {
        if let Some(clip) = self.clip_mut(clip_id) {
            clip.duration = duration.max(MIN_CLIP_DURATION);
        }
    }

    /// Set compositing opacity, clamped to `[0, 1]`.
    pub fn set_clip_alpha(&mut self, clip_id: ClipId, alpha: f64) {
        if let Some(clip) = self.clip_mut(clip_id) {
            clip.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    /// Add a keyframe, or overwrite the value of one within tolerance of `time`.
    ///
    /// Time is clamped to `[0, clip.duration]` and pushed clear of neighbouring keyframes.
    /// Fails when the parameter's base value is not numeric, or when no slot at least
    /// [`MIN_KEYFRAME_GAP`](crate::MIN_KEYFRAME_GAP) from both neighbours exists.
    pub fn add_keyframe(
        &mut self,
        clip_id: ClipId,
        parameter: &str,
        time: f64,
        value: f64,
    ) -> SeqResult<()> {
        let Some(clip) = self.clip_mut(clip_id) else {
            return Ok(());
        };
        if let Some(base) = clip.parameters.get(parameter) {
            if !base.is_animatable() {
                return Err(SeqError::validation(format!(
                    "parameter '{parameter}' is not numeric and cannot be animated"
                )));
            }
        }
        let constraints = TimeConstraints::new(0.0, clip.duration);
        clip.automation
            .add_keyframe_within(parameter, time, value, constraints)
            .inspect_err(|e| tracing::warn!(clip = %clip_id, parameter, time, "{e}"))?;
        tracing::debug!(clip = %clip_id, parameter, time, value, "add keyframe");
        Ok(())
    }

    /// Remove the keyframe near `time`; an emptied curve is dropped.
    pub fn remove_keyframe(&mut self, clip_id: ClipId, parameter: &str, time: f64) {
        if let Some(clip) = self.clip_mut(clip_id) {
            clip.automation.remove_keyframe(parameter, time);
        }
    }

    /// Remove the whole curve of `parameter`.
    pub fn clear_keyframes(&mut self, clip_id: ClipId, parameter: &str) {
        if let Some(clip) = self.clip_mut(clip_id) {
            clip.automation.clear(parameter);
        }
    }

    /// Move the keyframe at `current_time` to `(new_time, new_value)` within the clip.
    ///
    /// Time is clamped to the clip and its neighbours, value to `[0, 1]`.
    /// Unknown clips or curves are a no-op (`Ok(None)`); a curve without a
    /// keyframe at `current_time` is [`SeqError::NotFound`].
    pub fn update_keyframe(
        &mut self,
        clip_id: ClipId,
        parameter: &str,
        current_time: f64,
        new_time: f64,
        new_value: f64,
    ) -> SeqResult<Option<Keyframe>> {
        self.update_keyframe_with(
            clip_id,
            parameter,
            current_time,
            new_time,
            new_value,
            None,
        )
    }

    pub(crate) fn update_keyframe_with(
        &mut self,
        clip_id: ClipId,
        parameter: &str,
        current_time: f64,
        new_time: f64,
        new_value: f64,
        snap_grid: Option<f64>,
    ) -> SeqResult<Option<Keyframe>> {
        let Some(clip) = self.clip_mut(clip_id) else {
            return Ok(None);
        };
        let Some(curve) = clip.automation.curve(parameter) else {
            return Ok(None);
        };

        let constraints = TimeConstraints {
            min_time: 0.0,
            max_time: clip.duration,
            snap_grid,
        };
        let moved = move_keyframe(
            &curve.keyframes,
            current_time,
            new_time,
            new_value,
            constraints,
        )
        .inspect_err(|err| tracing::warn!(clip = %clip_id, parameter, %err, "stale keyframe"))?;
        let index = find_keyframe_index(&curve.keyframes, current_time, KEYFRAME_TIME_TOLERANCE)
            .ok_or_else(|| SeqError::not_found(format!("no keyframe at t={current_time:.3}s")))?;

        clip.automation.set_keyframe(parameter, index, moved);
        Ok(Some(moved))
    }

    /// `(min, max)` keyframe time across all curves of a clip.
    pub fn keyframe_bounds(&self, clip_id: ClipId) -> Option<(f64, f64)> {
        self.clip(clip_id)?.automation.keyframe_bounds()
    }

    /// Write one resize step: every affected curve is rebuilt from the outcome,
    /// then the clip bounds are set.
    pub fn apply_resize(&mut self, clip_id: ClipId, outcome: &ResizeOutcome) {
        let Some(clip) = self.clip_mut(clip_id) else {
            return;
        };
        for (parameter, keyframes) in &outcome.curves {
            clip.automation.replace(parameter, keyframes.clone());
        }
        clip.start_time = outcome.start_time.max(0.0);
        clip.duration = outcome.duration.max(MIN_CLIP_DURATION);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/store.rs"]
mod tests;
