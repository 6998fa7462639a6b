//! Where playback restarts when a user returns.

/// Resume point for a returning viewer.
///
/// Returns the last position, or `0` when there is none or it lies within
/// `end_tolerance` seconds of the (whole-second) end of the video.
pub fn resume_position(last_position: Option<f64>, duration: f64, end_tolerance: f64) -> f64 {
    match last_position {
        Some(position) if position + end_tolerance < duration.floor() => position,
        _ => 0.0,
    }
}
