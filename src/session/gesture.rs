//! Drag-to-seek mapping.
//!
//! Drag distance converts to media time with a fixed scale factor rather
//! than proportionally to clip length, so a one-inch swipe feels the same
//! on a 30-second clip and a two-hour movie.

/// Transient per-session seek gesture state.
///
/// `anchor_ms` is captured once when the gesture starts; `target_ms` is
/// recomputed on every drag sample and only applied to the engine when the
/// gesture ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeekGesture {
    /// Whether a drag is currently in progress.
    pub active: bool,
    /// Playhead position when the drag started.
    pub anchor_ms: i64,
    /// Accumulated horizontal drag distance in pixels.
    pub cumulative_px: f32,
    /// Seek position that would be applied if the drag ended now.
    pub target_ms: i64,
}

/// Map an accumulated drag distance to an absolute seek target.
///
/// The result is clamped to `[0, duration_ms]`. While the duration is not
/// yet known (`duration_ms <= 0`) the anchor is returned unchanged, since
/// there is no valid range to clamp into. Monotonically non-decreasing in
/// `cumulative_px` for a fixed anchor and duration.
pub fn compute_seek_target(
    anchor_ms: i64,
    cumulative_px: f32,
    duration_ms: i64,
    scale_ms_per_px: i64,
) -> i64 {
    if duration_ms <= 0 {
        return anchor_ms;
    }

    let delta_ms = (f64::from(cumulative_px) * scale_ms_per_px as f64) as i64;
    anchor_ms.saturating_add(delta_ms).clamp(0, duration_ms)
}
