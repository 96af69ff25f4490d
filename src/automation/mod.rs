//! Keyframe math and automation curves.

pub(crate) mod curve;
pub(crate) mod keyframe;
