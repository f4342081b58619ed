//! # replay-controls: Session Replay Control Surface
//!
//! The decision logic behind a session-replay player's control bar: a
//! playback clock owning the authoritative cursor, a breadcrumb index for
//! "jump to next action", and a width-driven compaction rule for the bar.
//! Rendering is left to the host, which subscribes to state snapshots and
//! sends gestures back as [`ControlCommand`]s.
//!
//! ## Architecture
//!
//! - **Session**: recorded session files, the breadcrumb index, the playback
//!   clock and the real-time driver
//! - **Controls**: the control surface dispatching gestures, and the layout
//!   compactor
//! - **Config**: offered speeds, rewind step, compaction breakpoint and
//!   skip-idle thresholds, loaded from TOML
//!
//! ## Example
//!
//! ```ignore
//! use replay_controls::{
//!     config::ReplayConfig,
//!     controls::{ControlCommand, ControlSurface, FullscreenFlag},
//!     session::ReplaySession,
//! };
//!
//! let config = ReplayConfig::load_or_default();
//! let session = ReplaySession::load_from_file("session.json".as_ref())?;
//!
//! let mut surface = ControlSurface::new(&config, FullscreenFlag::default());
//! surface.mount(1024.0);
//! surface.load_session(&session);
//!
//! let updates = surface.subscribe();
//! surface.dispatch(ControlCommand::TogglePlayPause)?;
//! surface.dispatch(ControlCommand::NextBreadcrumb)?;
//! ```

pub mod config;
pub mod controls;
pub mod error;
pub mod session;

// Re-export commonly used types
pub use config::ReplayConfig;
pub use controls::{CompactionLevel, ControlCommand, ControlSurface, FullscreenController};
pub use error::{ReplayError, Result};
pub use session::{BreadcrumbIndex, EventKind, PlaybackClock, PlaybackState, ReplaySession};
