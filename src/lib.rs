//! Duskwheel - Day/night clock for tile-based RPGs
//!
//! Keeps in-game time, turns a clock sprite with it, and tints the
//! screen as dawn, day, dusk and night come around.

pub mod clock;
pub mod data;
pub mod game;
pub mod render;
pub mod save;
pub mod screen;

// Re-export commonly used types
pub use clock::{ClockState, DayPhase};
pub use data::ClockConfig;
pub use game::{ClockCommand, Game};
pub use screen::Tone;
