//! Tracks, clips and the mutable store that owns them.

pub(crate) mod model;
pub(crate) mod store;
