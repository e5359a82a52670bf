//! Rendering layer
//!
//! Headless sprite models that a frontend draws from.

pub mod clock_sprite;

pub use clock_sprite::{ClockLayout, ClockSprite, CLOCK_VIEWPORT_Z};
