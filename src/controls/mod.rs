//! Control bar logic
//!
//! The control surface turns gestures into playback commands; the layout
//! compactor decides how much of the bar fits the available width.

pub mod layout;
pub mod surface;

pub use layout::{derive_compaction_level, CompactionLevel, LayoutCompactor};
pub use surface::{
    format_speed, Control, ControlCommand, ControlSurface, FullscreenController, FullscreenFlag,
    PlayButton,
};
