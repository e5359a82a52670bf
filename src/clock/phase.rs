//! Named day phases and the phase boundary table
//!
//! The day is a ring of 48 half-hour phases. Dawn, day and dusk occupy
//! windows that never cross phase 47; night wraps around the ring and is
//! the fallback for anything the other three don't claim.

use serde::{Deserialize, Serialize};

use crate::clock::time::PHASES_PER_DAY;
use crate::data::ConfigError;
use crate::screen::Tone;

/// The four named parts of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayPhase {
    Dawn,
    Day,
    Dusk,
    Night,
}

impl DayPhase {
    pub fn name(&self) -> &'static str {
        match self {
            DayPhase::Dawn => "Dawn",
            DayPhase::Day => "Day",
            DayPhase::Dusk => "Dusk",
            DayPhase::Night => "Night",
        }
    }
}

/// Tone and phase range of one named part of the day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseWindow {
    pub tone: Tone,
    /// Phase at which this part of the day begins
    pub start: u32,
    pub end: u32,
}

impl PhaseWindow {
    pub fn new(tone: Tone, start: u32, end: u32) -> Self {
        Self { tone, start, end }
    }

    /// Parse a `[red, green, blue, gray, start, end]` config entry
    pub fn from_entry(name: &'static str, entry: [i32; 6]) -> Result<Self, ConfigError> {
        let [red, green, blue, gray, start, end] = entry;
        let bound = |value: i32| {
            u32::try_from(value)
                .ok()
                .filter(|phase| *phase < PHASES_PER_DAY)
                .ok_or(ConfigError::PhaseOutOfRange { name, value })
        };
        Ok(Self {
            tone: Tone::from_components([red, green, blue, gray]),
            start: bound(start)?,
            end: bound(end)?,
        })
    }

    /// Strictly between start and end
    pub fn contains(&self, phase: u32) -> bool {
        phase > self.start && phase < self.end
    }

    /// Past the start or before the end, for a window that crosses 47 -> 0
    pub fn contains_wrapping(&self, phase: u32) -> bool {
        phase > self.start || phase < self.end
    }

    /// Inclusive range test used by the tone lookup
    pub fn covers(&self, phase: u32) -> bool {
        phase >= self.start && phase <= self.end
    }
}

/// Boundary table for all four parts of the day
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseTable {
    pub dawn: PhaseWindow,
    pub day: PhaseWindow,
    pub dusk: PhaseWindow,
    pub night: PhaseWindow,
    /// When false every phase maps to the neutral tone
    pub tint_on_changes: bool,
}

impl PhaseTable {
    pub fn window(&self, phase: DayPhase) -> &PhaseWindow {
        match phase {
            DayPhase::Dawn => &self.dawn,
            DayPhase::Day => &self.day,
            DayPhase::Dusk => &self.dusk,
            DayPhase::Night => &self.night,
        }
    }

    pub fn is_dawn(&self, phase: u32) -> bool {
        self.dawn.contains(phase)
    }

    pub fn is_day(&self, phase: u32) -> bool {
        self.day.contains(phase)
    }

    pub fn is_dusk(&self, phase: u32) -> bool {
        self.dusk.contains(phase)
    }

    pub fn is_night(&self, phase: u32) -> bool {
        self.night.contains_wrapping(phase)
    }

    /// Resolve a phase in dawn, day, dusk order; night takes the rest
    pub fn classify(&self, phase: u32) -> DayPhase {
        [DayPhase::Dawn, DayPhase::Day, DayPhase::Dusk]
            .into_iter()
            .find(|kind| self.window(*kind).covers(phase))
            .unwrap_or(DayPhase::Night)
    }

    /// Tone for a phase
    pub fn phase_color(&self, phase: u32) -> Tone {
        if !self.tint_on_changes {
            return Tone::NEUTRAL;
        }
        self.window(self.classify(phase)).tone
    }

    /// True iff `phase` is where one of the four parts of the day begins
    pub fn is_boundary(&self, phase: u32) -> bool {
        [&self.dawn, &self.dusk, &self.night, &self.day]
            .iter()
            .any(|window| window.start == phase)
    }
}
