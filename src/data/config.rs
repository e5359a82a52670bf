//! Clock configuration
//!
//! One immutable value built at startup and handed to everything that
//! needs it. Field defaults match the shipped `assets/data/clock.ron`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::{ClockRules, ClockTiming, PhaseTable, PhaseWindow, HOURS_PER_DAY, PHASES_PER_DAY};
use crate::screen::TintSettings;

/// Smallest accepted frames-per-hour; keeps minute frames above zero
pub const MIN_HOUR_FRAMES: u32 = 60;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid resolution {0:?}, expected WIDTHxHEIGHT")]
    InvalidResolution(String),
    #[error("hour frames must be at least {min}, found {found}")]
    HourFramesTooSmall { found: u32, min: u32 },
    #[error("hour frames {0} overflow the frame counter over a day")]
    HourFramesTooLarge(u32),
    #[error("{name} phase bound {value} is outside 0..48")]
    PhaseOutOfRange { name: &'static str, value: i32 },
    #[error("starting phase {0} is outside 0..48")]
    StartingPhaseOutOfRange(u32),
    #[error("maximum transition length must be positive")]
    ZeroMaxTransition,
}

/// Clock sprite dimensions, written as `"48x48"` in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl FromStr for Resolution {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidResolution(s.to_string());
        let (width, height) = s.split_once('x').ok_or_else(invalid)?;
        Ok(Self {
            width: width.trim().parse().map_err(|_| invalid())?,
            height: height.trim().parse().map_err(|_| invalid())?,
        })
    }
}

impl TryFrom<String> for Resolution {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Resolution> for String {
    fn from(res: Resolution) -> Self {
        res.to_string()
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Where and how the clock sprite is drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Distance from the screen edges in pixels
    pub padding: i32,
    /// Screen corner: even values sit on the right, 2 and above at the bottom
    pub corner: u8,
    pub resolution: Resolution,
    /// Directory holding the clock images
    pub path: String,
    pub clock_image: String,
    pub support_image: String,
    /// Z offset of the support layer relative to the hand
    pub support_z_offset: i32,
    /// Run setup automatically when the map starts
    pub show_on_start: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            padding: 40,
            corner: 0,
            resolution: Resolution { width: 48, height: 48 },
            path: "Graphics/Clock/".to_string(),
            clock_image: "Clock".to_string(),
            support_image: "Clock_support".to_string(),
            support_z_offset: 1,
            show_on_start: true,
        }
    }
}

impl DisplayConfig {
    pub fn clock_path(&self) -> String {
        format!("{}{}", self.path, self.clock_image)
    }

    pub fn support_path(&self) -> String {
        format!("{}{}", self.path, self.support_image)
    }
}

/// Rules tying time flow to player movement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Only advance time while the player moves
    pub update_when_moving: bool,
    /// Same, but only while `update_when_moving_switch` is on
    pub update_when_moving_with_switch: bool,
    pub update_when_moving_switch: u32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            update_when_moving: false,
            update_when_moving_with_switch: false,
            update_when_moving_switch: 1,
        }
    }
}

/// Accelerated clock for testing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub active: bool,
    pub hour_frames: u32,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            active: false,
            hour_frames: 60,
        }
    }
}

/// Complete clock configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub display: DisplayConfig,
    /// Frames per in-game hour
    pub hour_frames: u32,
    /// Phase the clock starts at on setup
    pub starting_phase: u32,
    /// Minimum hand movement in degrees before the sprite is redrawn
    pub refresh_degrees: u32,
    /// Tint the screen when a part of the day begins
    pub tint_on_changes: bool,
    /// `[red, green, blue, gray, start phase, end phase]`
    pub dawn: [i32; 6],
    pub day: [i32; 6],
    pub dusk: [i32; 6],
    pub night: [i32; 6],
    /// Frames a phase tint transition lasts
    pub phase_transition: u32,
    /// Cap applied to every transition length
    pub max_transition: u32,
    pub movement: MovementConfig,
    pub debug: DebugConfig,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            hour_frames: 18_000,
            starting_phase: 16,
            refresh_degrees: 2,
            tint_on_changes: true,
            dawn: [30, -34, -34, 0, 12, 13],
            day: [0, 0, 0, 0, 14, 35],
            dusk: [68, -34, -34, 0, 36, 37],
            night: [-68, -68, 0, 68, 38, 11],
            phase_transition: 300,
            max_transition: 300,
            movement: MovementConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl ClockConfig {
    /// Frames per hour, accounting for debug acceleration
    pub fn effective_hour_frames(&self) -> u32 {
        if self.debug.active {
            self.debug.hour_frames
        } else {
            self.hour_frames
        }
    }

    pub fn timing(&self) -> ClockTiming {
        ClockTiming::new(self.effective_hour_frames())
    }

    /// Length of an automatic phase tint transition
    pub fn phase_transition_length(&self) -> u32 {
        if self.debug.active {
            self.effective_hour_frames() / 3
        } else {
            self.phase_transition
        }
    }

    pub fn phase_table(&self) -> Result<PhaseTable, ConfigError> {
        Ok(PhaseTable {
            dawn: PhaseWindow::from_entry("dawn", self.dawn)?,
            day: PhaseWindow::from_entry("day", self.day)?,
            dusk: PhaseWindow::from_entry("dusk", self.dusk)?,
            night: PhaseWindow::from_entry("night", self.night)?,
            tint_on_changes: self.tint_on_changes,
        })
    }

    /// Check every constraint the clock relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hour_frames = self.effective_hour_frames();
        if hour_frames < MIN_HOUR_FRAMES {
            return Err(ConfigError::HourFramesTooSmall {
                found: hour_frames,
                min: MIN_HOUR_FRAMES,
            });
        }
        for frames in [self.hour_frames, self.debug.hour_frames] {
            if frames.checked_mul(HOURS_PER_DAY).is_none() {
                return Err(ConfigError::HourFramesTooLarge(frames));
            }
        }
        if self.starting_phase >= PHASES_PER_DAY {
            return Err(ConfigError::StartingPhaseOutOfRange(self.starting_phase));
        }
        if self.max_transition == 0 {
            return Err(ConfigError::ZeroMaxTransition);
        }
        self.phase_table()?;
        Ok(())
    }

    /// Validated rules for a `ClockState`
    pub fn rules(&self) -> Result<ClockRules, ConfigError> {
        self.validate()?;
        Ok(ClockRules {
            timing: self.timing(),
            phases: self.phase_table()?,
            refresh_degrees: self.refresh_degrees,
            starting_phase: self.starting_phase,
            debug: self.debug.active,
        })
    }

    pub fn tint_settings(&self) -> TintSettings {
        TintSettings {
            enabled: self.tint_on_changes,
            phase_transition: self.phase_transition_length(),
            max_transition: self.max_transition,
        }
    }
}
