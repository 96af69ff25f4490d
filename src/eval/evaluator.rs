use std::collections::BTreeMap;

use crate::eval::time::PlaybackClock;
use crate::foundation::core::{ClipId, TrackId};
use crate::timeline::model::{Clip, ParamValue, Timeline};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything the renderer needs for one instant.
pub struct EvaluatedFrame {
    /// Evaluated timeline time in seconds.
    pub time: f64,
    /// Visible clips, bottom track first.
    pub clips: Vec<EvaluatedClip>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A visible clip with resolved parameter values.
pub struct EvaluatedClip {
    /// Clip identifier.
    pub clip_id: ClipId,
    /// Owning track.
    pub track_id: TrackId,
    /// Shader to run.
    pub shader_id: String,
    /// Seconds since the clip's start.
    pub local_time: f64,
    /// Compositing opacity.
    pub alpha: f64,
    /// Base values with automation applied.
    pub parameters: BTreeMap<String, ParamValue>,
}

/// Stateless resolver from timeline + time to visible clip state.
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(timeline))]
    /// Evaluate the timeline at absolute `time`.
    pub fn eval_at(timeline: &Timeline, time: f64) -> EvaluatedFrame {
        let clips = timeline
            .active_tracks()
            .flat_map(|track| {
                track
                    .clips
                    .iter()
                    .filter(move |clip| clip.contains(time))
                    .map(move |clip| eval_clip(clip, track.id, time))
            })
            .collect();
        EvaluatedFrame { time, clips }
    }

    /// Evaluate at the clock's current playhead.
    pub fn eval_clock(timeline: &Timeline, clock: &impl PlaybackClock) -> EvaluatedFrame {
        Self::eval_at(timeline, clock.current_time())
    }
}

fn eval_clip(clip: &Clip, track_id: TrackId, time: f64) -> EvaluatedClip {
    let local_time = clip.local_time(time);
    let mut parameters = clip.parameters.clone();
    for curve in clip.automation.curves() {
        let animatable = parameters
            .get(&curve.parameter)
            .is_none_or(|base| base.is_animatable());
        if animatable {
            parameters.insert(
                curve.parameter.clone(),
                ParamValue::Number(curve.value_at(local_time)),
            );
        }
    }
    EvaluatedClip {
        clip_id: clip.id,
        track_id,
        shader_id: clip.shader_id.clone(),
        local_time,
        alpha: clip.alpha,
        parameters,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
