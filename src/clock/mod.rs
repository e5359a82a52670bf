//! Clock module - Day/night time keeping
//!
//! Frame arithmetic, the phase table, and the clock state machine.

mod phase;
mod state;
mod time;

pub use phase::{DayPhase, PhaseTable, PhaseWindow};
pub use state::{ClockRules, ClockSnapshot, ClockState};
pub use time::{ClockTiming, Meridiem, FULL_TURN, HOURS_PER_DAY, PHASES_PER_DAY};
