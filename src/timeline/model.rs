use std::collections::BTreeMap;

use crate::automation::curve::Automation;
use crate::foundation::core::{ClipId, DEFAULT_TIMELINE_DURATION, MIN_CLIP_DURATION, TrackId};

/// Static (base) value of a shader parameter.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Scalar; the only variant automation applies to.
    Number(f64),
    /// Toggle or event flag.
    Bool(bool),
    /// RGBA color, each channel in `[0, 1]`.
    Color([f64; 4]),
    /// 2D point.
    Vector2([f64; 2]),
}

impl ParamValue {
    /// Scalar value, if this is a [`ParamValue::Number`].
    pub fn as_number(self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(v),
            _ => None,
        }
    }

    /// Return `true` for values automation may drive.
    pub fn is_animatable(self) -> bool {
        matches!(self, Self::Number(_))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One shader instance placed on a track.
///
/// Keyframe times inside [`Clip::automation`] are relative to [`Clip::start_time`].
pub struct Clip {
    /// Clip identifier.
    pub id: ClipId,
    /// Shader definition this clip instantiates.
    pub shader_id: String,
    /// Absolute timeline start in seconds, `>= 0`.
    pub start_time: f64,
    /// Length in seconds, `>= MIN_CLIP_DURATION`.
    pub duration: f64,
    /// Base parameter values keyed by input name.
    pub parameters: BTreeMap<String, ParamValue>,
    /// Keyframed curves, one per animated parameter.
    pub automation: Automation,
    /// Compositing opacity in `[0, 1]`.
    pub alpha: f64,
}

impl Clip {
    /// Create a clip with fresh id, no automation and full opacity.
    pub fn new(
        shader_id: impl Into<String>,
        start_time: f64,
        duration: f64,
        parameters: BTreeMap<String, ParamValue>,
    ) -> Self {
        Self {
            id: ClipId::new(),
            shader_id: shader_id.into(),
            start_time: start_time.max(0.0),
            duration: duration.max(MIN_CLIP_DURATION),
            parameters,
            automation: Automation::default(),
            alpha: 1.0,
        }
    }

    /// Absolute end time.
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Return `true` when absolute `time` falls in `[start, end)`.
    pub fn contains(&self, time: f64) -> bool {
        self.start_time <= time && time < self.end_time()
    }

    /// Convert absolute timeline seconds into clip-relative seconds.
    pub fn local_time(&self, time: f64) -> f64 {
        time - self.start_time
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A lane of clips. Clips may overlap; order is insertion order.
pub struct Track {
    /// Track identifier.
    pub id: TrackId,
    /// Display name.
    pub name: String,
    /// Clips in insertion order.
    pub clips: Vec<Clip>,
    /// Excluded from compositing when set.
    pub muted: bool,
    /// When any track is soloed only soloed tracks composite.
    pub solo: bool,
}

impl Track {
    /// Create an empty, audible track.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TrackId::new(),
            name: name.into(),
            clips: Vec::new(),
            muted: false,
            solo: false,
        }
    }

    /// Look up a clip on this track.
    pub fn clip(&self, id: ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// The whole arrangement.
///
/// Tracks composite bottom to top: the last track renders on top.
pub struct Timeline {
    /// Tracks in z-order.
    pub tracks: Vec<Track>,
    /// Overall extent in seconds.
    pub duration: f64,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            tracks: Vec::new(),
            duration: DEFAULT_TIMELINE_DURATION,
        }
    }
}

impl Timeline {
    /// Return `true` when any track is soloed.
    pub fn any_solo(&self) -> bool {
        self.tracks.iter().any(|t| t.solo)
    }

    /// Return `true` when `track` takes part in compositing.
    pub fn is_track_active(&self, track: &Track) -> bool {
        !track.muted && (track.solo || !self.any_solo())
    }

    /// Active tracks in z-order.
    pub fn active_tracks(&self) -> impl Iterator<Item = &Track> {
        let any_solo = self.any_solo();
        self.tracks
            .iter()
            .filter(move |t| !t.muted && (t.solo || !any_solo))
    }

    /// Latest clip end across all tracks, `0.0` when empty.
    pub fn content_end(&self) -> f64 {
        self.tracks
            .iter()
            .flat_map(|t| t.clips.iter())
            .map(Clip::end_time)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
