//! Clock state machine
//!
//! Owns the frame counter and derives everything else from it: hour,
//! minute, phase and the angle of the clock hand. Consumers learn about
//! changes through dirty flags which they clear once they have acted on
//! them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::phase::{DayPhase, PhaseTable};
use super::time::{ClockTiming, Meridiem, FULL_TURN, PHASES_PER_DAY};
use crate::screen::Tone;

/// Fixed parameters a clock runs under, derived from `ClockConfig`
#[derive(Debug, Clone, PartialEq)]
pub struct ClockRules {
    pub timing: ClockTiming,
    pub phases: PhaseTable,
    /// Hand movement in degrees that triggers a redraw
    pub refresh_degrees: u32,
    pub starting_phase: u32,
    /// Log the time every frame
    pub debug: bool,
}

/// Everything about a clock that survives save/load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSnapshot {
    /// Frames since midnight
    pub time: u32,
    /// Displayed hand angle; 0 reads back as 360
    pub rotation: u32,
    /// Signed opacity delta per frame while fading
    pub fade_speed: i32,
    pub opacity: u8,
    pub working: bool,
    pub visible: bool,
    pub indoor: bool,
    pub fading: bool,
    pub set_up: bool,
    /// Explicit refresh requested
    pub need_refresh: bool,
    /// Sprite has to pick up a new angle or visibility
    pub refresh_sprites: bool,
    /// Screen tone has to follow the phase
    pub phase_update: bool,
    /// Indoor tone has to be applied even under a manual tint
    pub indoor_tint_refresh: bool,
}

impl Default for ClockSnapshot {
    fn default() -> Self {
        Self {
            time: 0,
            rotation: 0,
            fade_speed: 0,
            opacity: u8::MAX,
            working: false,
            visible: false,
            indoor: false,
            fading: false,
            set_up: false,
            need_refresh: false,
            refresh_sprites: false,
            phase_update: false,
            indoor_tint_refresh: false,
        }
    }
}

/// The in-game clock
#[derive(Debug, Clone, PartialEq)]
pub struct ClockState {
    rules: ClockRules,
    data: ClockSnapshot,
}

impl ClockState {
    /// Create an inert clock; nothing happens until `setup`
    pub fn new(rules: ClockRules) -> Self {
        Self::from_snapshot(rules, ClockSnapshot::default())
    }

    /// Restore a saved clock. A time past the end of the configured day
    /// is folded back into it and the hand angle is clamped to a full turn.
    pub fn from_snapshot(rules: ClockRules, mut data: ClockSnapshot) -> Self {
        let day_frames = rules.timing.day_frames();
        if let Some(time) = data.time.checked_rem(day_frames) {
            if time != data.time {
                log::warn!("Saved clock time {} is outside the day, using {}", data.time, time);
                data.time = time;
            }
        }
        data.rotation = data.rotation.min(FULL_TURN);
        Self { rules, data }
    }

    pub fn snapshot(&self) -> ClockSnapshot {
        self.data.clone()
    }

    pub fn rules(&self) -> &ClockRules {
        &self.rules
    }

    // ----- Setup -----

    /// Start the clock at the configured phase. Does nothing the second time.
    pub fn setup(&mut self, display: bool) {
        if self.data.set_up {
            return;
        }
        self.data.time = self.rules.timing.phase_start(self.rules.starting_phase);
        self.data.visible = display;
        self.data.rotation = self.next_angle();
        self.data.phase_update = true;
        self.data.need_refresh = true;
        self.data.set_up = true;
        self.data.working = true;
        self.refresh();
        log::info!("Clock set up at {} (phase {})", self, self.phase());
    }

    pub fn is_set_up(&self) -> bool {
        self.data.set_up
    }

    // ----- Per-frame update -----

    /// Advance one frame. `can_advance` is the host's movement gate.
    pub fn tick(&mut self, can_advance: bool) {
        if !can_advance {
            return;
        }
        let old_phase = self.phase();
        if self.data.working {
            self.data.time += 1;
        }
        let phase = self.phase();
        if !self.rules.phases.is_boundary(old_phase) && self.rules.phases.is_boundary(phase) {
            self.data.phase_update = true;
            log::debug!(
                "Entered phase {} ({})",
                phase,
                self.rules.phases.classify(phase).name()
            );
        }
        if self.rules.debug {
            log::debug!("Current in-game time: {}", self);
        }
        if self.needs_refresh() {
            self.refresh();
        }
        if self.data.time >= self.rules.timing.day_frames() {
            self.data.time = 0;
        }
    }

    /// Move the hand if it drifted far enough, and flag the sprite
    pub fn refresh(&mut self) {
        if self.needs_angle_refresh() {
            self.data.rotation = self.next_angle();
            self.data.refresh_sprites = true;
        }
        if self.data.need_refresh {
            self.data.refresh_sprites = true;
        }
        self.data.need_refresh = false;
    }

    pub fn needs_angle_refresh(&self) -> bool {
        let drift = i64::from(self.current_angle()) - i64::from(self.next_angle());
        drift >= i64::from(self.rules.refresh_degrees)
    }

    pub fn needs_refresh(&self) -> bool {
        self.needs_angle_refresh() || self.data.need_refresh
    }

    /// Request a sprite refresh and a tone update on the next frame
    pub fn force_refresh(&mut self) {
        self.data.need_refresh = true;
        self.data.phase_update = true;
    }

    // ----- Derived time -----

    pub fn time(&self) -> u32 {
        self.data.time
    }

    /// Hour on a 12-hour dial; midnight and noon read as 12
    pub fn hour(&self) -> u32 {
        match self.hour24() {
            0 => 12,
            h if h <= 12 => h,
            h => h - 12,
        }
    }

    pub fn hour24(&self) -> u32 {
        self.rules.timing.hour24_at(self.data.time)
    }

    pub fn minute(&self) -> u32 {
        self.rules.timing.minute_at(self.data.time)
    }

    pub fn meridiem(&self) -> Meridiem {
        if self.hour24() < 12 {
            Meridiem::Am
        } else {
            Meridiem::Pm
        }
    }

    pub fn phase(&self) -> u32 {
        self.rules.timing.phase_at(self.data.time)
    }

    /// Jump to the start of a phase. Negative input is ignored; values of
    /// 48 and above count round the ring.
    pub fn set_time(&mut self, phase: i64) {
        if phase < 0 {
            return;
        }
        let phase = (phase % i64::from(PHASES_PER_DAY)) as u32;
        self.data.time = self.rules.timing.phase_start(phase);
        let next = self.next_angle();
        self.data.rotation = next - next % 2;
        self.force_refresh();
        log::debug!("Clock set to phase {} ({})", phase, self);
    }

    // ----- Angle -----

    /// Displayed angle, with a stored 0 read as a full turn
    pub fn current_angle(&self) -> u32 {
        if self.data.rotation % FULL_TURN == 0 {
            FULL_TURN
        } else {
            self.data.rotation
        }
    }

    /// Angle the hand should show for the current time
    pub fn next_angle(&self) -> u32 {
        self.rules.timing.angle_at(self.data.time)
    }

    // ----- Visibility -----

    pub fn is_visible(&self) -> bool {
        self.data.visible
    }

    pub fn show(&mut self) {
        self.data.visible = true;
        self.data.need_refresh = true;
    }

    pub fn hide(&mut self) {
        self.data.visible = false;
        self.data.need_refresh = true;
    }

    pub fn toggle(&mut self) {
        if self.data.visible {
            self.hide();
        } else {
            self.show();
        }
    }

    pub fn needs_sprite_refresh(&self) -> bool {
        self.data.refresh_sprites
    }

    /// The sprite picked up the latest angle and visibility
    pub fn on_successful_refresh(&mut self) {
        self.data.refresh_sprites = false;
    }

    // ----- Fading -----

    pub fn start_fading(&mut self) {
        self.data.fading = true;
    }

    pub fn stop_fading(&mut self) {
        self.data.fading = false;
    }

    pub fn is_fading(&self) -> bool {
        self.data.fading
    }

    pub fn set_fade_speed(&mut self, speed: i32) {
        self.data.fade_speed = speed;
    }

    pub fn fade_speed(&self) -> i32 {
        self.data.fade_speed
    }

    pub fn opacity(&self) -> u8 {
        self.data.opacity
    }

    pub fn set_opacity(&mut self, opacity: u8) {
        self.data.opacity = opacity;
    }

    /// Apply one frame of fading. The speed drops to zero at either end of
    /// the range; fading itself only ends at full opacity.
    pub fn step_fade(&mut self) {
        let value = (i32::from(self.data.opacity) + self.data.fade_speed).clamp(0, 255);
        self.data.opacity = u8::try_from(value).unwrap_or(u8::MAX);
        if self.data.opacity == 0 || self.data.opacity == u8::MAX {
            self.data.fade_speed = 0;
        }
        if self.data.opacity == u8::MAX {
            self.stop_fading();
        }
    }

    // ----- Time flow -----

    pub fn stop(&mut self) {
        self.data.working = false;
    }

    pub fn resume(&mut self) {
        self.data.working = true;
    }

    pub fn is_working(&self) -> bool {
        self.data.working
    }

    pub fn toggle_timeflow(&mut self) {
        if self.data.working {
            self.stop();
        } else {
            self.resume();
        }
    }

    // ----- Indoor -----

    pub fn set_indoor(&mut self, inside: bool) {
        self.data.indoor = inside;
        self.data.phase_update = true;
        if inside {
            self.data.indoor_tint_refresh = true;
        }
    }

    pub fn toggle_indoor(&mut self) {
        self.set_indoor(!self.data.indoor);
    }

    pub fn is_indoor(&self) -> bool {
        self.data.indoor
    }

    pub fn indoor_tint_pending(&self) -> bool {
        self.data.indoor_tint_refresh
    }

    pub fn on_successful_indoor_tint(&mut self) {
        self.data.indoor_tint_refresh = false;
    }

    // ----- Phase tone -----

    pub fn tone_update_pending(&self) -> bool {
        self.data.phase_update
    }

    pub fn on_successful_tone_change(&mut self) {
        self.data.phase_update = false;
    }

    pub fn is_dawn(&self) -> bool {
        self.rules.phases.is_dawn(self.phase())
    }

    pub fn is_day(&self) -> bool {
        self.rules.phases.is_day(self.phase())
    }

    pub fn is_dusk(&self) -> bool {
        self.rules.phases.is_dusk(self.phase())
    }

    pub fn is_night(&self) -> bool {
        self.rules.phases.is_night(self.phase())
    }

    pub fn day_phase(&self) -> DayPhase {
        self.rules.phases.classify(self.phase())
    }

    /// Tone the screen should have right now: neutral indoors
    pub fn phase_tone(&self) -> Tone {
        if self.data.indoor {
            Tone::NEUTRAL
        } else {
            self.rules.phases.phase_color(self.phase())
        }
    }
}

impl fmt::Display for ClockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02} {}", self.hour(), self.minute(), self.meridiem())
    }
}
