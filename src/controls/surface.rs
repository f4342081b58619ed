//! Control surface: user gestures in, clock and index operations out
//!
//! Every user gesture maps to exactly one [`PlaybackClock`] command or one
//! [`BreadcrumbIndex`] lookup followed by a seek. The compaction level only
//! decides which controls are shown; [`ControlSurface::dispatch`] executes
//! any command regardless of visibility.

use crate::config::ReplayConfig;
use crate::error::Result;
use crate::session::{
    BreadcrumbIndex, PlaybackClock, PlaybackDriver, PlaybackState, SessionSource,
    USER_ACTION_KINDS,
};
use crossbeam_channel::Receiver;

use super::layout::{CompactionLevel, LayoutCompactor};

/// Host-provided fullscreen toggle
///
/// The control surface only reports and flips the status; entering and
/// leaving fullscreen is the host's job.
#[cfg_attr(test, mockall::automock)]
pub trait FullscreenController {
    fn is_fullscreen(&self) -> bool;
    fn toggle(&mut self);
}

/// Fullscreen status kept as a plain flag, for hosts without a window
#[derive(Debug, Clone, Copy, Default)]
pub struct FullscreenFlag {
    enabled: bool,
}

impl FullscreenController for FullscreenFlag {
    fn is_fullscreen(&self) -> bool {
        self.enabled
    }

    fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}

/// A user gesture on the control bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlCommand {
    TogglePlayPause,
    Restart,
    /// Jump back by the configured rewind step
    Rewind,
    NextBreadcrumb,
    SetSpeed(f64),
    SetSkipInactive(bool),
    ToggleFullscreen,
    /// Scrub to a time in milliseconds from session start
    Seek(f64),
}

/// A control on the bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    PlayPause,
    Rewind,
    NextBreadcrumb,
    Speed,
    SkipInactive,
    Fullscreen,
}

/// What the play/pause button does when pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayButton {
    Play,
    Pause,
    Restart,
}

/// Format a speed for the speed selector
pub fn format_speed(speed: f64, level: CompactionLevel) -> String {
    match level {
        CompactionLevel::Full => format!("Speed {}x", speed),
        CompactionLevel::Compact => format!("{}x", speed),
    }
}

/// Composes the playback clock, breadcrumb index and layout compactor
pub struct ControlSurface<F: FullscreenController> {
    clock: PlaybackClock,
    index: BreadcrumbIndex,
    session_start_ms: Option<i64>,
    compactor: LayoutCompactor,
    driver: PlaybackDriver,
    fullscreen: F,
    rewind_step_ms: f64,
}

impl<F: FullscreenController> ControlSurface<F> {
    /// Create a surface with no session loaded
    pub fn new(config: &ReplayConfig, fullscreen: F) -> Self {
        Self {
            clock: PlaybackClock::from_config(config),
            index: BreadcrumbIndex::default(),
            session_start_ms: None,
            compactor: LayoutCompactor::from_config(config),
            driver: PlaybackDriver::from_config(config),
            fullscreen,
            rewind_step_ms: config.rewind_step_ms,
        }
    }

    /// Index the session's events and reset the clock to its start
    pub fn load_session(&mut self, source: &impl SessionSource) {
        self.index = BreadcrumbIndex::build(&source.raw_events());
        self.session_start_ms = source.start_timestamp_ms();
        self.clock.load(source.duration_ms());

        tracing::info!(
            "Session loaded: {} breadcrumbs, {:.0}ms",
            self.index.len(),
            self.clock.duration_ms()
        );
    }

    /// Drop the loaded session
    pub fn unload(&mut self) {
        self.index = BreadcrumbIndex::default();
        self.session_start_ms = None;
        self.clock.load(0.0);
    }

    pub fn state(&self) -> PlaybackState {
        self.clock.state()
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn index(&self) -> &BreadcrumbIndex {
        &self.index
    }

    pub fn session_start_ms(&self) -> Option<i64> {
        self.session_start_ms
    }

    /// Receive a state snapshot after every playback change
    pub fn subscribe(&mut self) -> Receiver<PlaybackState> {
        self.clock.subscribe()
    }

    /// Execute one gesture
    pub fn dispatch(&mut self, command: ControlCommand) -> Result<()> {
        tracing::trace!("Dispatching {:?}", command);
        match command {
            ControlCommand::TogglePlayPause => self.toggle_play_pause(),
            ControlCommand::Restart => self.restart(),
            ControlCommand::Rewind => self.rewind(),
            ControlCommand::NextBreadcrumb => {
                self.seek_to_next_breadcrumb();
            }
            ControlCommand::SetSpeed(speed) => self.set_speed(speed)?,
            ControlCommand::SetSkipInactive(enabled) => self.set_skip_inactive(enabled),
            ControlCommand::ToggleFullscreen => self.toggle_fullscreen(),
            ControlCommand::Seek(time_ms) => self.seek(time_ms),
        }
        Ok(())
    }

    /// Play or pause; pressing play on a finished replay restarts it
    pub fn toggle_play_pause(&mut self) {
        if self.clock.is_finished() {
            self.clock.restart();
        } else {
            self.clock.toggle_play_pause(!self.clock.is_playing());
        }
    }

    pub fn restart(&mut self) {
        self.clock.restart();
    }

    /// Jump back by the rewind step, stopping at the start
    pub fn rewind(&mut self) {
        self.clock
            .set_current_time(self.clock.current_time_ms() - self.rewind_step_ms);
    }

    pub fn seek(&mut self, time_ms: f64) {
        self.clock.set_current_time(time_ms);
    }

    /// Move the cursor to the next user-action breadcrumb at or after it
    ///
    /// The search is inclusive: with the cursor exactly on a breadcrumb, that
    /// same breadcrumb is found again and the cursor does not move forward.
    ///
    /// Returns `false`, leaving the cursor alone, when the session start is
    /// unknown or no such breadcrumb lies ahead.
    pub fn seek_to_next_breadcrumb(&mut self) -> bool {
        let Some(start_ms) = self.session_start_ms else {
            tracing::debug!("No session start timestamp, nothing to seek to");
            return false;
        };

        let target_ms = start_ms.saturating_add(self.clock.current_time_ms().ceil() as i64);
        let Some(event) = self.index.next_event_of_interest(&USER_ACTION_KINDS, target_ms) else {
            tracing::debug!("No breadcrumb ahead of {}ms", target_ms);
            return false;
        };

        let offset_ms = (event.timestamp_ms - start_ms) as f64;
        tracing::debug!("Seeking to {} at {:.0}ms", event.kind.display_name(), offset_ms);
        self.clock.set_current_time(offset_ms);
        true
    }

    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        self.clock.set_speed(speed)
    }

    pub fn set_skip_inactive(&mut self, enabled: bool) {
        self.clock.toggle_skip_inactive(enabled);
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen.toggle();
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_fullscreen()
    }

    /// Advance playback by `elapsed_ms` of wall time
    pub fn tick(&mut self, elapsed_ms: f64) -> bool {
        self.driver
            .tick(&mut self.clock, &self.index, self.session_start_ms, elapsed_ms)
    }

    /// Initial width measurement, before the first paint
    pub fn mount(&mut self, width_px: f32) -> CompactionLevel {
        self.compactor.mount(width_px)
    }

    /// Container resized
    pub fn resize(&mut self, width_px: f32) -> CompactionLevel {
        self.compactor.resize(width_px)
    }

    pub fn compaction_level(&self) -> CompactionLevel {
        self.compactor.level()
    }

    /// Controls to render at the current compaction level
    pub fn visible_controls(&self) -> Vec<Control> {
        let compact = self.compactor.level().is_compact();
        [
            Control::PlayPause,
            Control::Rewind,
            Control::NextBreadcrumb,
            Control::Speed,
            Control::SkipInactive,
            Control::Fullscreen,
        ]
        .into_iter()
        .filter(|c| !(compact && matches!(c, Control::Rewind | Control::NextBreadcrumb)))
        .collect()
    }

    pub fn play_button(&self) -> PlayButton {
        let state = self.clock.state();
        if state.is_finished {
            PlayButton::Restart
        } else if state.is_playing {
            PlayButton::Pause
        } else {
            PlayButton::Play
        }
    }

    pub fn speed_label(&self) -> String {
        format_speed(self.clock.speed(), self.compactor.level())
    }

    pub fn allowed_speeds(&self) -> &[f64] {
        self.clock.allowed_speeds()
    }
}
