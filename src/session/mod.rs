//! Session replay playback module
//!
//! This module holds the playback core of the control surface: the
//! recorded session as loaded from disk, the breadcrumb index built from its
//! events, the playback clock that owns the cursor, and the driver that
//! advances the clock in real time.
//!
//! # Features
//!
//! - Normalize unordered, partly malformed events into a sorted index
//! - Find the next breadcrumb of interest at or after a point in time
//! - Play, pause, restart and seek with clamped cursor semantics
//! - Change speed among a fixed list of offered speeds
//! - Skip idle gaps while playing

pub mod breadcrumbs;
pub mod clock;
pub mod driver;
pub mod types;

pub use breadcrumbs::{BreadcrumbIndex, EventKind, SessionEvent, USER_ACTION_KINDS};
pub use clock::{PlaybackClock, PlaybackState};
pub use driver::PlaybackDriver;
pub use types::{RawEvent, ReplaySession, SessionSource};
