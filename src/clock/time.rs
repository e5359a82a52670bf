//! Frame arithmetic for the 24-hour cycle
//!
//! Everything here is a pure function of the frame counter and the
//! configured number of frames per in-game hour.

use std::fmt;

/// Hours in one in-game day
pub const HOURS_PER_DAY: u32 = 24;
/// Half-hour phases in one in-game day
pub const PHASES_PER_DAY: u32 = 48;
/// Degrees swept by the clock hand in one day
pub const FULL_TURN: u32 = 360;

/// Morning/afternoon marker for the 12-hour display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn label(&self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Frame lengths derived from the frames-per-hour rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTiming {
    hour_frames: u32,
}

impl ClockTiming {
    pub fn new(hour_frames: u32) -> Self {
        Self { hour_frames }
    }

    pub fn hour_frames(&self) -> u32 {
        self.hour_frames
    }

    /// Frames in a full day; the counter wraps here
    pub fn day_frames(&self) -> u32 {
        self.hour_frames * HOURS_PER_DAY
    }

    /// Frames in one half-hour phase
    pub fn phase_length(&self) -> u32 {
        self.hour_frames / 2
    }

    /// Frames per degree of hand rotation (15 degrees per hour)
    pub fn degree_frames(&self) -> u32 {
        self.hour_frames / 15
    }

    pub fn minute_frames(&self) -> u32 {
        self.hour_frames / 60
    }

    pub fn phase_at(&self, time: u32) -> u32 {
        time.checked_div(self.phase_length()).unwrap_or(0)
    }

    pub fn hour24_at(&self, time: u32) -> u32 {
        time.checked_div(self.hour_frames).unwrap_or(0)
    }

    pub fn minute_at(&self, time: u32) -> u32 {
        let into_hour = time - self.hour24_at(time) * self.hour_frames;
        into_hour.checked_div(self.minute_frames()).unwrap_or(0)
    }

    /// Hand angle for a frame: sweeps backward from 360 towards 0 over the day
    pub fn angle_at(&self, time: u32) -> u32 {
        let swept = time.checked_div(self.degree_frames()).unwrap_or(0);
        FULL_TURN.saturating_sub(swept)
    }

    /// First frame of a phase; phases past 47 wrap around the ring
    pub fn phase_start(&self, phase: u32) -> u32 {
        (phase % PHASES_PER_DAY) * self.phase_length()
    }
}

impl Default for ClockTiming {
    fn default() -> Self {
        Self::new(18_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_lengths() {
        let timing = ClockTiming::new(18_000);
        assert_eq!(timing.day_frames(), 432_000);
        assert_eq!(timing.phase_length(), 9_000);
        assert_eq!(timing.degree_frames(), 1_200);
        assert_eq!(timing.minute_frames(), 300);
    }

    #[test]
    fn test_hour_and_minute() {
        let timing = ClockTiming::new(18_000);
        // 22:30
        let time = 45 * 9_000;
        assert_eq!(timing.hour24_at(time), 22);
        assert_eq!(timing.minute_at(time), 30);
        assert_eq!(timing.phase_at(time), 45);
    }

    #[test]
    fn test_angle_sweeps_backward() {
        let timing = ClockTiming::new(18_000);
        assert_eq!(timing.angle_at(0), 360);
        assert_eq!(timing.angle_at(1_200), 359);
        assert_eq!(timing.angle_at(timing.day_frames() - 1), 1);
        assert_eq!(timing.angle_at(timing.day_frames()), 0);
    }

    #[test]
    fn test_zero_rate_does_not_divide_by_zero() {
        let timing = ClockTiming::new(0);
        assert_eq!(timing.phase_at(10), 0);
        assert_eq!(timing.minute_at(10), 0);
        assert_eq!(timing.angle_at(10), 360);
    }

    #[test]
    fn test_phase_start_wraps() {
        let timing = ClockTiming::new(60);
        assert_eq!(timing.phase_start(51), timing.phase_start(3));
    }
}
