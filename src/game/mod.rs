//! Game module - Session state and the host-facing surface

mod commands;
mod state;
mod world;

pub use commands::{parse_script, ClockCommand, CommandError, DEFAULT_TINT_DURATION};
pub use state::Game;
pub use world::{MovementGate, StaticWorld, WorldQuery};
