//! Playback session controller.
//!
//! [`PlaybackSessionController`] is the single authoritative owner of one
//! [`MediaEngine`] handle and of the [`PlayerState`] derived from it. It
//! subscribes to the engine's event channel before loading the source, runs
//! a spawned pump task that serializes every inbound event into a state
//! transition, and republishes transitions over a [`StateStream`] that all
//! observers share in order.
//!
//! Commands (play/pause/seek) are forwarded to the engine and never mutate
//! local state; the resulting transition arrives back through the event
//! path. This keeps commanded state and actual engine state from diverging.

mod bandwidth;
mod gesture;
mod orientation;
mod state;

pub use bandwidth::format_bitrate;
pub use gesture::{compute_seek_target, SeekGesture};
pub use orientation::{decide_orientation, Orientation};
pub use state::{PlayerState, StateStream};

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::PlaybackConfig;
use crate::engine::{
    EngineEvent, MediaEngine, MediaEngineFactory, STATE_BUFFERING, STATE_ENDED, STATE_IDLE,
    STATE_READY,
};
use crate::error::{Error, Result};
use state::StateBus;

// ---------------------------------------------------------------------------
// SessionHost
// ---------------------------------------------------------------------------

/// Callbacks from a session to its hosting screen.
pub trait SessionHost: Send + Sync {
    /// The preferred orientation for this video was decided. Fired at most
    /// once per session, on the first usable size report.
    fn orientation_decided(&self, orientation: Orientation);
}

/// Host that ignores all session callbacks.
pub struct NoopHost;

impl SessionHost for NoopHost {
    fn orientation_decided(&self, _orientation: Orientation) {}
}

// ---------------------------------------------------------------------------
// PlaybackSessionController
// ---------------------------------------------------------------------------

/// Mutable session bookkeeping, written only by the pump task, gesture
/// methods, and `dispose`.
struct SessionInner {
    gesture: SeekGesture,
    orientation_locked: bool,
    disposed: bool,
}

/// Everything shared between the controller handle and its pump task.
struct SessionShared {
    engine: Arc<dyn MediaEngine>,
    host: Arc<dyn SessionHost>,
    bus: StateBus,
    inner: Mutex<SessionInner>,
    config: PlaybackConfig,
    source: String,
}

/// Owner of one engine handle and the state machine derived from it.
///
/// Created with a source locator; starts in [`PlayerState::Idle`] and
/// advances purely on engine events. Dropping the controller disposes the
/// session if [`dispose`](Self::dispose) was not already called.
pub struct PlaybackSessionController {
    shared: Arc<SessionShared>,
    pump: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for PlaybackSessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackSessionController")
            .field("source", &self.shared.source)
            .finish_non_exhaustive()
    }
}

impl PlaybackSessionController {
    /// Create a session for `source` and request playback to start.
    ///
    /// The locator is opaque (local content reference or remote URL); only
    /// emptiness is rejected here so that malformed sources surface
    /// uniformly as [`PlayerState::Error`] through the engine. Never blocks
    /// on media readiness: returns immediately in `Idle`.
    pub fn create(
        source: impl Into<String>,
        factory: &dyn MediaEngineFactory,
        host: Arc<dyn SessionHost>,
        config: PlaybackConfig,
    ) -> Result<Self> {
        let source = source.into();
        if source.trim().is_empty() {
            return Err(Error::invalid_source("source locator is empty"));
        }

        for warning in config.validate() {
            warn!(source = %source, "playback config: {warning}");
        }

        let engine = factory.create();
        // Subscribe before loading so no early engine event is lost.
        let events = engine.subscribe();

        let shared = Arc::new(SessionShared {
            engine: Arc::clone(&engine),
            host,
            bus: StateBus::new(config.state_channel_capacity.max(1)),
            inner: Mutex::new(SessionInner {
                gesture: SeekGesture::default(),
                orientation_locked: false,
                disposed: false,
            }),
            config,
            source: source.clone(),
        });

        let pump = tokio::spawn(pump_events(Arc::clone(&shared), events));

        engine.load(&source);
        if shared.config.autoplay {
            engine.play();
        }

        info!(source = %source, "playback session created");

        Ok(Self {
            shared,
            pump: Mutex::new(Some(pump)),
        })
    }

    /// Observe the state machine: current value immediately, then every
    /// transition in order. Any number of observers may subscribe.
    pub fn observe_state(&self) -> StateStream {
        self.shared.bus.subscribe()
    }

    /// Snapshot of the current state.
    pub fn current_state(&self) -> PlayerState {
        self.shared.bus.current()
    }

    // -- Seek gestures ------------------------------------------------------

    /// Begin a drag-to-seek gesture, anchored at the current playhead.
    ///
    /// Ignored unless the session is in `Playing` or `Paused`: a drag during
    /// buffering, error, or idle must not start a seek.
    pub fn begin_seek_gesture(&self) {
        let mut inner = self.shared.inner.lock();
        if inner.disposed || !self.shared.bus.current().accepts_seek() {
            return;
        }

        let anchor_ms = self.shared.engine.current_position_ms();
        inner.gesture = SeekGesture {
            active: true,
            anchor_ms,
            cumulative_px: 0.0,
            target_ms: anchor_ms,
        };
        debug!(anchor_ms, "seek gesture started");
    }

    /// Feed a horizontal drag sample (pixels, signed) into the active
    /// gesture. Has no effect while no gesture is active.
    pub fn update_seek_gesture(&self, dx_px: f32) {
        let mut inner = self.shared.inner.lock();
        if !inner.gesture.active {
            return;
        }

        inner.gesture.cumulative_px += dx_px;
        inner.gesture.target_ms = compute_seek_target(
            inner.gesture.anchor_ms,
            inner.gesture.cumulative_px,
            self.shared.engine.duration_ms(),
            self.shared.config.seek_scale_ms_per_px,
        );
    }

    /// End the active gesture, issuing a single seek to the final target.
    ///
    /// Fire-and-forget: the position/state update arrives later through the
    /// normal engine event path.
    pub fn end_seek_gesture(&self) {
        let target_ms = {
            let mut inner = self.shared.inner.lock();
            if !inner.gesture.active {
                return;
            }
            inner.gesture.active = false;
            inner.gesture.target_ms
        };

        debug!(target_ms, "seek gesture ended");
        self.shared.engine.seek_to(target_ms);
    }

    /// The gesture state, for rendering a seek indicator.
    pub fn seek_gesture(&self) -> SeekGesture {
        self.shared.inner.lock().gesture
    }

    // -- Transport commands -------------------------------------------------

    /// Request playback to start or resume. Forwarded only; the state
    /// updates when the engine reports it.
    pub fn request_play(&self) {
        self.shared.engine.play();
    }

    /// Request playback to pause. Forwarded only.
    pub fn request_pause(&self) {
        self.shared.engine.pause();
    }

    /// Toggle between play and pause based on the current state.
    pub fn request_pause_resume(&self) {
        match self.shared.bus.current() {
            PlayerState::Playing => self.shared.engine.pause(),
            _ => self.shared.engine.play(),
        }
    }

    // -- Teardown -----------------------------------------------------------

    /// Tear the session down: stop event delivery, release the engine.
    ///
    /// Idempotent and safe from any state, including `Error`. After this
    /// returns, no further transition reaches any observer; engine events
    /// still in flight are discarded.
    pub fn dispose(&self) {
        {
            let mut inner = self.shared.inner.lock();
            if inner.disposed {
                debug!(source = %self.shared.source, "dispose called on disposed session");
                return;
            }
            inner.disposed = true;
        }

        if let Some(pump) = self.pump.lock().take() {
            pump.abort();
        }
        self.shared.engine.release();

        info!(source = %self.shared.source, "playback session disposed");
    }
}

impl Drop for PlaybackSessionController {
    fn drop(&mut self) {
        self.dispose();
    }
}

// ---------------------------------------------------------------------------
// Event pump
// ---------------------------------------------------------------------------

/// Background loop that drains the engine's event channel and applies each
/// event to the session. Sole writer of the published state.
async fn pump_events(shared: Arc<SessionShared>, mut events: broadcast::Receiver<EngineEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => shared.apply_event(event),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, source = %shared.source, "engine events lagged");
            }
            Err(broadcast::error::RecvError::Closed) => {
                debug!(source = %shared.source, "engine event channel closed");
                return;
            }
        }
    }
}

impl SessionShared {
    /// Apply one engine event, publishing the resulting transition if any.
    ///
    /// Everything happens under the session lock so that transitions are
    /// serialized and nothing is published after disposal.
    fn apply_event(&self, event: EngineEvent) {
        // Engine reads that feed the transition happen before taking the
        // lock; they are plain reads on the engine handle.
        let prepared = match &event {
            EngineEvent::StateChanged(code) if *code == STATE_BUFFERING => {
                Some(format_bitrate(self.engine.bitrate_estimate()))
            }
            _ => None,
        };

        let mut inner = self.inner.lock();
        if inner.disposed {
            debug!(?event, "discarding engine event after disposal");
            return;
        }

        let current = self.bus.current();
        match event {
            EngineEvent::StateChanged(code) => {
                if let Some(next) = map_state_code(&current, code, prepared) {
                    self.transition(&current, next);
                }
            }
            EngineEvent::PlayingChanged(is_playing) => {
                let next = match (&current, is_playing) {
                    (PlayerState::Playing, false) => Some(PlayerState::Paused),
                    (PlayerState::Paused, true) => Some(PlayerState::Playing),
                    _ => None,
                };
                if let Some(next) = next {
                    self.transition(&current, next);
                }
            }
            EngineEvent::Error(message) => {
                // Unconditional and terminal: every prior state funnels here.
                self.transition(&current, PlayerState::Error { message });
            }
            EngineEvent::VideoSizeChanged { width, height } => {
                if !inner.orientation_locked {
                    if let Some(orientation) = decide_orientation(width, height) {
                        inner.orientation_locked = true;
                        debug!(width, height, %orientation, "orientation decided");
                        // Release the lock before calling out to the host.
                        drop(inner);
                        self.host.orientation_decided(orientation);
                    }
                }
            }
        }
    }

    fn transition(&self, from: &PlayerState, to: PlayerState) {
        if *from == to {
            return;
        }
        debug!(?from, ?to, source = %self.source, "player state transition");
        self.bus.publish(to);
    }
}

/// Map a raw engine state code to the next [`PlayerState`], or `None` when
/// no transition applies.
///
/// `Error` is terminal: every code is ignored until the session is
/// recreated. Unrecognized codes never cause a transition — regressing to
/// `Idle` on an unknown code would be a spurious reset. An end-of-stream
/// code is honoured only while the media was actually advancing or
/// buffering; conservatively ignored elsewhere.
fn map_state_code(
    current: &PlayerState,
    code: i32,
    buffering_rate_label: Option<String>,
) -> Option<PlayerState> {
    if matches!(current, PlayerState::Error { .. }) {
        return None;
    }

    match code {
        STATE_BUFFERING => Some(PlayerState::Buffering {
            rate_label: buffering_rate_label.unwrap_or_else(|| format_bitrate(0)),
        }),
        STATE_READY => Some(PlayerState::Playing),
        STATE_ENDED => match current {
            PlayerState::Playing | PlayerState::Buffering { .. } => Some(PlayerState::Ended),
            _ => None,
        },
        STATE_IDLE => Some(PlayerState::Idle),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffering_code_maps_with_rate_label() {
        let next = map_state_code(&PlayerState::Idle, STATE_BUFFERING, Some("2.0 Mbps".into()));
        assert_eq!(
            next,
            Some(PlayerState::Buffering {
                rate_label: "2.0 Mbps".into()
            })
        );
    }

    #[test]
    fn ready_code_maps_to_playing() {
        let buffering = PlayerState::Buffering {
            rate_label: "0 Kbps".into(),
        };
        assert_eq!(
            map_state_code(&buffering, STATE_READY, None),
            Some(PlayerState::Playing)
        );
    }

    #[test]
    fn ended_only_from_playing_or_buffering() {
        let buffering = PlayerState::Buffering {
            rate_label: "0 Kbps".into(),
        };
        assert_eq!(
            map_state_code(&PlayerState::Playing, STATE_ENDED, None),
            Some(PlayerState::Ended)
        );
        assert_eq!(
            map_state_code(&buffering, STATE_ENDED, None),
            Some(PlayerState::Ended)
        );
        assert_eq!(map_state_code(&PlayerState::Idle, STATE_ENDED, None), None);
        assert_eq!(map_state_code(&PlayerState::Paused, STATE_ENDED, None), None);
    }

    #[test]
    fn unknown_code_causes_no_transition() {
        assert_eq!(map_state_code(&PlayerState::Playing, 99, None), None);
        assert_eq!(map_state_code(&PlayerState::Playing, -3, None), None);
    }

    #[test]
    fn error_state_is_terminal() {
        let error = PlayerState::Error {
            message: "decode failed".into(),
        };
        for code in [STATE_IDLE, STATE_BUFFERING, STATE_READY, STATE_ENDED, 99] {
            assert_eq!(map_state_code(&error, code, None), None);
        }
    }
}
