//! Playback clock: the authoritative replay cursor
//!
//! Every mutation of [`PlaybackState`] goes through a [`PlaybackClock`]
//! command. Each command is one synchronous update; when it changes the state
//! the new snapshot is pushed to every subscriber, and when it is a no-op
//! nothing is published.

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::config::ReplayConfig;
use crate::error::{ReplayError, Result};

/// Snapshot of the playback state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    /// Cursor in milliseconds from session start, within `[0, duration_ms]`
    pub current_time_ms: f64,
    /// Replay length in milliseconds
    pub duration_ms: f64,
    pub is_playing: bool,
    /// Set when natural playback reached the end (or a seek landed on it)
    pub is_finished: bool,
    /// Playback speed multiplier
    pub speed: f64,
    /// Advisory flag for the driver: fast-forward through idle gaps
    pub is_skipping_inactive: bool,
}

impl PlaybackState {
    fn new(duration_ms: f64, speed: f64) -> Self {
        Self {
            current_time_ms: 0.0,
            duration_ms,
            is_playing: false,
            is_finished: false,
            speed,
            is_skipping_inactive: false,
        }
    }

    /// Get playback progress (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        if self.duration_ms <= 0.0 {
            return 0.0;
        }
        self.current_time_ms / self.duration_ms
    }
}

/// Owns the playback state and the transitions between states
#[derive(Debug)]
pub struct PlaybackClock {
    state: PlaybackState,
    allowed_speeds: Vec<f64>,
    subscribers: Vec<Sender<PlaybackState>>,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::from_config(&ReplayConfig::default())
    }
}

impl PlaybackClock {
    /// Create a clock offering `allowed_speeds`, starting at `default_speed`
    ///
    /// Falls back to the first offered speed when `default_speed` is not offered.
    /// An empty list is seeded with the starting speed so it stays selectable.
    pub fn new(mut allowed_speeds: Vec<f64>, default_speed: f64) -> Self {
        if allowed_speeds.is_empty() {
            let seed = if default_speed.is_finite() && default_speed > 0.0 {
                default_speed
            } else {
                1.0
            };
            allowed_speeds.push(seed);
        }

        let speed = if allowed_speeds.contains(&default_speed) {
            default_speed
        } else {
            allowed_speeds[0]
        };

        Self {
            state: PlaybackState::new(0.0, speed),
            allowed_speeds,
            subscribers: Vec::new(),
        }
    }

    /// Create a clock from the replay config
    pub fn from_config(config: &ReplayConfig) -> Self {
        Self::new(config.allowed_speeds.clone(), config.default_speed)
    }

    /// Current state snapshot
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Get current playback time in milliseconds
    pub fn current_time_ms(&self) -> f64 {
        self.state.current_time_ms
    }

    /// Get total duration in milliseconds
    pub fn duration_ms(&self) -> f64 {
        self.state.duration_ms
    }

    /// Check if playing
    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    /// Check if playback ran to the end
    pub fn is_finished(&self) -> bool {
        self.state.is_finished
    }

    /// Get playback speed
    pub fn speed(&self) -> f64 {
        self.state.speed
    }

    /// Check if idle gaps should be skipped
    pub fn is_skipping_inactive(&self) -> bool {
        self.state.is_skipping_inactive
    }

    /// Speeds offered by the speed selector
    pub fn allowed_speeds(&self) -> &[f64] {
        &self.allowed_speeds
    }

    /// Receive a snapshot after every state change
    pub fn subscribe(&mut self) -> Receiver<PlaybackState> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Load a session of the given length, resetting the cursor
    ///
    /// Speed and skip-inactive are user preferences and survive a reload.
    pub fn load(&mut self, duration_ms: f64) {
        let duration_ms = if duration_ms.is_finite() {
            duration_ms.max(0.0)
        } else {
            0.0
        };
        tracing::debug!("Loading session of {:.0}ms", duration_ms);

        self.update(|s| {
            s.current_time_ms = 0.0;
            s.duration_ms = duration_ms;
            s.is_playing = false;
            s.is_finished = false;
        });
    }

    /// Start or resume playback; no-op once finished
    pub fn play(&mut self) {
        if self.state.is_finished {
            tracing::trace!("Ignoring play on a finished replay");
            return;
        }
        self.update(|s| s.is_playing = true);
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.update(|s| s.is_playing = false);
    }

    /// Set the playing flag to `requested`; a finished replay stays paused
    pub fn toggle_play_pause(&mut self, requested: bool) {
        if requested {
            self.play();
        } else {
            self.pause();
        }
    }

    /// Rewind to the start and play
    pub fn restart(&mut self) {
        self.update(|s| {
            s.current_time_ms = 0.0;
            s.is_finished = false;
            s.is_playing = true;
        });
    }

    /// Move the cursor to `time_ms`, clamped to the session
    ///
    /// `is_finished` is recomputed by equality with the duration only.
    pub fn set_current_time(&mut self, time_ms: f64) {
        if time_ms.is_nan() {
            tracing::trace!("Ignoring seek to NaN");
            return;
        }

        self.update(|s| {
            s.current_time_ms = time_ms.clamp(0.0, s.duration_ms);
            s.is_finished = s.current_time_ms == s.duration_ms;
        });
    }

    /// Change playback speed without touching play/pause
    ///
    /// Re-selecting the active speed is always accepted and publishes nothing.
    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        if speed == self.state.speed {
            return Ok(());
        }
        if !self.allowed_speeds.contains(&speed) {
            return Err(ReplayError::UnsupportedSpeed(speed));
        }
        self.update(|s| s.speed = speed);
        Ok(())
    }

    /// Enable or disable skipping of idle gaps
    pub fn toggle_skip_inactive(&mut self, enabled: bool) {
        self.update(|s| s.is_skipping_inactive = enabled);
    }

    /// Natural time advance by `elapsed_ms` of wall time
    ///
    /// Only path to `is_finished` without a seek: reaching the duration stops
    /// playback and marks the replay finished.
    pub fn advance(&mut self, elapsed_ms: f64) {
        if !self.state.is_playing || !elapsed_ms.is_finite() || elapsed_ms < 0.0 {
            return;
        }

        self.update(|s| {
            let next = s.current_time_ms + elapsed_ms * s.speed;
            if next >= s.duration_ms {
                s.current_time_ms = s.duration_ms;
                s.is_playing = false;
                s.is_finished = true;
            } else {
                s.current_time_ms = next;
            }
        });

        if self.state.is_finished && !self.state.is_playing {
            tracing::trace!("Playback reached the end at {:.0}ms", self.state.duration_ms);
        }
    }

    /// Apply one transition and publish the result if anything changed
    fn update(&mut self, transition: impl FnOnce(&mut PlaybackState)) {
        let before = self.state;
        transition(&mut self.state);

        if self.state != before {
            let state = self.state;
            self.subscribers.retain(|tx| tx.send(state).is_ok());
        }
    }
}
