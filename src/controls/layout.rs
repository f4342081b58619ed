//! Width-driven compaction of the control bar
//!
//! [`derive_compaction_level`] is the pure rule. [`LayoutCompactor`] is the
//! resize observer the control surface holds; with a zero hysteresis band it
//! reports exactly what the pure rule says.

use crate::config::{ReplayConfig, DEFAULT_COMPACT_WIDTH_PX};

/// How densely the control bar is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum CompactionLevel {
    /// All controls, full labels
    #[default]
    Full = 0,
    /// Rewind and next-breadcrumb hidden, speed label abbreviated
    Compact = 1,
}

impl CompactionLevel {
    pub fn is_compact(&self) -> bool {
        matches!(self, CompactionLevel::Compact)
    }
}

/// Compaction level for a container `width_px` wide
pub fn derive_compaction_level(width_px: f32) -> CompactionLevel {
    level_for(width_px, DEFAULT_COMPACT_WIDTH_PX)
}

fn level_for(width_px: f32, breakpoint_px: f32) -> CompactionLevel {
    if width_px < breakpoint_px {
        CompactionLevel::Compact
    } else {
        CompactionLevel::Full
    }
}

/// Tracks the container width and the compaction level derived from it
#[derive(Debug, Clone, Copy)]
pub struct LayoutCompactor {
    breakpoint_px: f32,
    hysteresis_px: f32,
    level: CompactionLevel,
}

impl Default for LayoutCompactor {
    fn default() -> Self {
        Self::new(DEFAULT_COMPACT_WIDTH_PX, 0.0)
    }
}

impl LayoutCompactor {
    pub fn new(breakpoint_px: f32, hysteresis_px: f32) -> Self {
        Self {
            breakpoint_px,
            hysteresis_px: hysteresis_px.max(0.0),
            level: CompactionLevel::Full,
        }
    }

    pub fn from_config(config: &ReplayConfig) -> Self {
        Self::new(config.compact_width_px, config.compact_hysteresis_px)
    }

    /// Current level
    pub fn level(&self) -> CompactionLevel {
        self.level
    }

    /// Initial measurement, taken before the first paint
    ///
    /// Ignores any previous level so the band cannot bias the first layout.
    pub fn mount(&mut self, width_px: f32) -> CompactionLevel {
        self.level = level_for(width_px, self.breakpoint_px);
        self.level
    }

    /// Recompute after the container was resized
    pub fn resize(&mut self, width_px: f32) -> CompactionLevel {
        let next = match self.level {
            CompactionLevel::Compact if width_px < self.breakpoint_px + self.hysteresis_px => {
                CompactionLevel::Compact
            }
            _ => level_for(width_px, self.breakpoint_px),
        };

        if next != self.level {
            tracing::trace!("Control bar at {}px: {:?} -> {:?}", width_px, self.level, next);
        }
        self.level = next;
        self.level
    }
}
