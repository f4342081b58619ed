//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use replay_controls::controls::FullscreenController;

/// Absolute start used by most test sessions
pub const SESSION_START_MS: i64 = 1_000;

/// Fullscreen controller that counts toggles
#[derive(Debug, Default)]
pub struct RecordingFullscreen {
    pub enabled: bool,
    pub toggles: usize,
}

impl FullscreenController for RecordingFullscreen {
    fn is_fullscreen(&self) -> bool {
        self.enabled
    }

    fn toggle(&mut self) {
        self.enabled = !self.enabled;
        self.toggles += 1;
    }
}

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}
