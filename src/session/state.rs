//! Player state machine values and their observation channel.
//!
//! [`StateBus`] wraps a `tokio::sync::broadcast` channel with the retained
//! current state so that new subscribers see the present value immediately,
//! then every later transition in publish order. Snapshot and subscription
//! happen under the publisher's lock, so a subscriber can neither miss a
//! transition nor see one twice.

use parking_lot::Mutex;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// PlayerState
// ---------------------------------------------------------------------------

/// The externally visible state of one playback session.
///
/// Exactly one variant is active at a time. Transitions originate only from
/// engine events (or disposal); the UI layer observes, it never writes.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerState {
    /// No media loaded, or the engine was freshly created or reset.
    Idle,
    /// The engine is stalled waiting for data.
    Buffering {
        /// Last formatted network throughput, e.g. `"2.0 Mbps"`.
        rate_label: String,
    },
    /// Media is advancing.
    Playing,
    /// Media loaded but not advancing, by user request.
    Paused,
    /// Playback reached the end of the stream.
    Ended,
    /// The engine reported a fatal failure. Terminal for this session.
    Error {
        /// Engine-provided description, surfaced verbatim to the UI.
        message: String,
    },
}

impl PlayerState {
    /// Whether seek gestures are accepted in this state.
    pub fn accepts_seek(&self) -> bool {
        matches!(self, PlayerState::Playing | PlayerState::Paused)
    }
}

// ---------------------------------------------------------------------------
// StateBus
// ---------------------------------------------------------------------------

/// Broadcast channel plus the retained current state.
pub(crate) struct StateBus {
    tx: broadcast::Sender<PlayerState>,
    current: Mutex<PlayerState>,
}

impl StateBus {
    /// Create a bus starting in [`PlayerState::Idle`].
    pub(crate) fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            current: Mutex::new(PlayerState::Idle),
        }
    }

    /// Snapshot of the current state.
    pub(crate) fn current(&self) -> PlayerState {
        self.current.lock().clone()
    }

    /// Publish a transition to all subscribers and retain it as current.
    pub(crate) fn publish(&self, state: PlayerState) {
        let mut current = self.current.lock();
        *current = state.clone();
        // Ignore send errors (no subscribers yet).
        let _ = self.tx.send(state);
    }

    /// Subscribe, yielding the current state first.
    pub(crate) fn subscribe(&self) -> StateStream {
        // Hold the lock across snapshot + subscribe so the stream starts at
        // a consistent point in the transition sequence.
        let current = self.current.lock();
        StateStream {
            first: Some(current.clone()),
            rx: self.tx.subscribe(),
        }
    }
}

// ---------------------------------------------------------------------------
// StateStream
// ---------------------------------------------------------------------------

/// An ordered stream of [`PlayerState`] values for one observer.
///
/// The first value is the state at subscription time; every subsequent
/// value is a transition, delivered in the order it was published.
pub struct StateStream {
    first: Option<PlayerState>,
    rx: broadcast::Receiver<PlayerState>,
}

impl StateStream {
    /// Wait for the next state.
    ///
    /// Returns `None` once the session is disposed and all pending
    /// transitions have been drained. A slow observer that lags behind the
    /// channel capacity skips to the oldest retained transition rather than
    /// erroring.
    pub async fn next(&mut self) -> Option<PlayerState> {
        if let Some(first) = self.first.take() {
            return Some(first);
        }

        loop {
            match self.rx.recv().await {
                Ok(state) => return Some(state),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "state observer lagged; resyncing");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
