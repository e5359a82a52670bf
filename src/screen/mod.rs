//! Screen tone handling
//!
//! Tone values, the default easing driver, and the coordinator deciding
//! when the clock may tint the screen.

mod tint;
mod tone;

pub use tint::{fade_speed_for, PhaseTintCoordinator, TintSettings, TintSnapshot};
pub use tone::{ScreenTone, Tone, ToneDriver, TONE_TOLERANCE};
