//! Media engine seam.
//!
//! The actual decode/render engine lives outside this crate; the controller
//! drives it through [`MediaEngine`]. Engines push [`EngineEvent`]s over a
//! `tokio::sync::broadcast` channel from whatever thread or task they run
//! on — the controller serializes them, so implementations only need to be
//! `Send + Sync`.
//!
//! Playback state codes are plain `i32`s rather than a closed enum: real
//! engines report codes we have never seen, and the controller must be able
//! to carry them through unchanged (and ignore them) instead of failing to
//! represent them.

use std::sync::Arc;

use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Raw playback state codes
// ---------------------------------------------------------------------------

/// Engine has no media or was reset.
pub const STATE_IDLE: i32 = 1;
/// Engine is stalled waiting for data.
pub const STATE_BUFFERING: i32 = 2;
/// Engine has enough data to advance.
pub const STATE_READY: i32 = 3;
/// Engine reached the end of the stream.
pub const STATE_ENDED: i32 = 4;

// ---------------------------------------------------------------------------
// EngineEvent
// ---------------------------------------------------------------------------

/// An asynchronous notification from a media engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The engine's playback state code changed.
    StateChanged(i32),
    /// The engine started or stopped advancing (play/pause, not buffering).
    PlayingChanged(bool),
    /// A fatal decode or transport failure. Terminal for the session.
    Error(String),
    /// The decoded video dimensions became known or changed.
    VideoSizeChanged {
        /// Width in pixels.
        width: i32,
        /// Height in pixels.
        height: i32,
    },
}

// ---------------------------------------------------------------------------
// MediaEngine
// ---------------------------------------------------------------------------

/// Capability to load, position, and drive one media source.
///
/// Commands are fire-and-forget: they never block and never report success
/// directly. The resulting state change (if any) arrives later via the
/// event channel.
pub trait MediaEngine: Send + Sync {
    /// Submit a source locator (local reference or remote URL) for playback.
    fn load(&self, source: &str);

    /// Start or resume playback.
    fn play(&self);

    /// Pause playback.
    fn pause(&self);

    /// Jump to an absolute position in milliseconds.
    fn seek_to(&self, position_ms: i64);

    /// Release the engine and all underlying resources. Events emitted
    /// after release may still be in flight; callers discard them.
    fn release(&self);

    /// Current playhead position in milliseconds.
    fn current_position_ms(&self) -> i64;

    /// Total media duration in milliseconds, or a non-positive value while
    /// the duration is not yet known.
    fn duration_ms(&self) -> i64;

    /// Latest network throughput estimate in bits per second.
    fn bitrate_estimate(&self) -> i64;

    /// Subscribe to this engine's event channel.
    fn subscribe(&self) -> broadcast::Receiver<EngineEvent>;
}

/// Capability to create engine instances; one engine per session.
pub trait MediaEngineFactory: Send + Sync {
    /// Create a fresh engine handle.
    fn create(&self) -> Arc<dyn MediaEngine>;
}
