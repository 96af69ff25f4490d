/// Source of the current playhead position.
pub trait PlaybackClock {
    /// Playhead in timeline seconds.
    fn current_time(&self) -> f64;
    /// Return `true` while playback is running.
    fn is_playing(&self) -> bool;
}
