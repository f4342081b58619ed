//! Playback driver: turns wall-clock ticks into natural time advance
//!
//! The driver owns no state of its own beyond its thresholds. While the clock
//! is playing, each tick advances the cursor by the elapsed time. With
//! skip-inactive enabled, a cursor sitting in a long idle gap is first moved
//! to just before the next recorded activity.

use super::breadcrumbs::BreadcrumbIndex;
use super::clock::PlaybackClock;
use crate::config::ReplayConfig;

/// Ticks a [`PlaybackClock`] forward
#[derive(Debug, Clone, Copy)]
pub struct PlaybackDriver {
    /// Gaps longer than this are skipped when skip-inactive is on
    inactivity_threshold_ms: i64,
    /// Distance kept before the next activity after a skip
    skip_lead_in_ms: i64,
}

impl Default for PlaybackDriver {
    fn default() -> Self {
        Self::from_config(&ReplayConfig::default())
    }
}

impl PlaybackDriver {
    pub fn new(inactivity_threshold_ms: i64, skip_lead_in_ms: i64) -> Self {
        Self {
            inactivity_threshold_ms: inactivity_threshold_ms.max(0),
            skip_lead_in_ms: skip_lead_in_ms.max(0),
        }
    }

    pub fn from_config(config: &ReplayConfig) -> Self {
        Self::new(config.inactivity_threshold_ms, config.skip_lead_in_ms)
    }

    /// Advance `clock` by `elapsed_ms` of wall time
    ///
    /// Returns `true` when an idle gap was skipped on this tick.
    pub fn tick(
        &self,
        clock: &mut PlaybackClock,
        index: &BreadcrumbIndex,
        session_start_ms: Option<i64>,
        elapsed_ms: f64,
    ) -> bool {
        if !clock.is_playing() {
            return false;
        }

        let target = match session_start_ms {
            Some(start) if clock.is_skipping_inactive() => {
                self.skip_target(clock.current_time_ms(), index, start)
            }
            _ => None,
        };

        if let Some(target) = target {
            tracing::debug!(
                "Skipping idle gap {:.0}ms -> {:.0}ms",
                clock.current_time_ms(),
                target
            );
            clock.set_current_time(target);
        }

        clock.advance(elapsed_ms);
        target.is_some()
    }

    /// Relative time to jump to when the cursor sits in an idle gap
    fn skip_target(&self, current_ms: f64, index: &BreadcrumbIndex, start_ms: i64) -> Option<f64> {
        let now = start_ms.saturating_add(current_ms.floor() as i64);
        let next = index.next_event_after(now)?;

        if next.timestamp_ms - now <= self.inactivity_threshold_ms {
            return None;
        }

        let target = (next.timestamp_ms - self.skip_lead_in_ms - start_ms) as f64;
        (target > current_ms).then_some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::types::RawEvent;

    const START: i64 = 1_000_000;

    fn index_at(offsets: &[i64]) -> BreadcrumbIndex {
        let raw: Vec<RawEvent> = offsets
            .iter()
            .map(|o| RawEvent::new("http", START + o))
            .collect();
        BreadcrumbIndex::build(&raw)
    }

    fn playing_clock(duration_ms: f64) -> PlaybackClock {
        let mut clock = PlaybackClock::default();
        clock.load(duration_ms);
        clock.play();
        clock
    }

    #[test]
    fn test_tick_advances_when_playing() {
        let driver = PlaybackDriver::default();
        let index = index_at(&[]);
        let mut clock = playing_clock(10_000.0);

        assert!(!driver.tick(&mut clock, &index, Some(START), 16.0));
        assert_eq!(clock.current_time_ms(), 16.0);
    }

    #[test]
    fn test_tick_is_noop_when_paused() {
        let driver = PlaybackDriver::default();
        let index = index_at(&[]);
        let mut clock = playing_clock(10_000.0);
        clock.pause();

        driver.tick(&mut clock, &index, Some(START), 16.0);
        assert_eq!(clock.current_time_ms(), 0.0);
    }

    #[test]
    fn test_tick_skips_long_idle_gap() {
        let driver = PlaybackDriver::new(5_000, 1_000);
        let index = index_at(&[0, 20_000]);
        let mut clock = playing_clock(30_000.0);
        clock.toggle_skip_inactive(true);
        clock.set_current_time(100.0);

        assert!(driver.tick(&mut clock, &index, Some(START), 10.0));
        assert_eq!(clock.current_time_ms(), 19_010.0);
    }

    #[test]
    fn test_tick_keeps_short_gap() {
        let driver = PlaybackDriver::new(5_000, 1_000);
        let index = index_at(&[0, 4_000]);
        let mut clock = playing_clock(30_000.0);
        clock.toggle_skip_inactive(true);

        assert!(!driver.tick(&mut clock, &index, Some(START), 10.0));
        assert_eq!(clock.current_time_ms(), 10.0);
    }

    #[test]
    fn test_tick_without_skip_flag_plays_through_gap() {
        let driver = PlaybackDriver::new(5_000, 1_000);
        let index = index_at(&[0, 20_000]);
        let mut clock = playing_clock(30_000.0);

        assert!(!driver.tick(&mut clock, &index, Some(START), 10.0));
        assert_eq!(clock.current_time_ms(), 10.0);
    }

    #[test]
    fn test_tick_without_later_activity_plays_normally() {
        let driver = PlaybackDriver::new(5_000, 1_000);
        let index = index_at(&[0]);
        let mut clock = playing_clock(30_000.0);
        clock.toggle_skip_inactive(true);
        clock.set_current_time(500.0);

        assert!(!driver.tick(&mut clock, &index, Some(START), 10.0));
        assert_eq!(clock.current_time_ms(), 510.0);
    }

    #[test]
    fn test_tick_without_session_start_never_skips() {
        let driver = PlaybackDriver::new(5_000, 1_000);
        let index = index_at(&[0, 20_000]);
        let mut clock = playing_clock(30_000.0);
        clock.toggle_skip_inactive(true);

        assert!(!driver.tick(&mut clock, &index, None, 10.0));
        assert_eq!(clock.current_time_ms(), 10.0);
    }
}
