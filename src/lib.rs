//! flickview: playback session core for a mobile video player.
//!
//! The crate owns the lifecycle of one media-engine handle per session,
//! translates the engine's asynchronous events into a
//! [`PlayerState`](session::PlayerState) machine, derives buffering-rate
//! and auto-rotation signals, and maps drag gestures onto absolute seek
//! targets. Screens, navigation, permissions, and the decode engine itself
//! are external collaborators behind the traits in [`engine`] and
//! [`library`].
//!
//! # Example
//!
//! ```rust,ignore
//! let controller = PlaybackSessionController::create(
//!     "https://example.com/clip.mp4",
//!     &engine_factory,
//!     Arc::new(screen_host),
//!     PlaybackConfig::default(),
//! )?;
//!
//! let mut states = controller.observe_state();
//! while let Some(state) = states.next().await {
//!     render(state);
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod library;
pub mod session;
pub mod timefmt;

// Re-export the most commonly used items at the crate root.
pub use config::PlaybackConfig;
pub use error::{Error, Result};
pub use session::{
    NoopHost, Orientation, PlaybackSessionController, PlayerState, SeekGesture, SessionHost,
    StateStream,
};
