//! Phase tint coordination
//!
//! Decides when the screen tone follows the clock and when a manual tint
//! holds it. The actual animation belongs to a `ToneDriver`.

use serde::{Deserialize, Serialize};

use super::tone::{Tone, ToneDriver, TONE_TOLERANCE};
use crate::clock::ClockState;

/// Full opacity range covered by a clock fade
const FADE_RANGE: i32 = 255;

/// Tint behaviour taken from `ClockConfig`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TintSettings {
    /// Follow the clock automatically
    pub enabled: bool,
    /// Frames a phase transition lasts
    pub phase_transition: u32,
    /// Upper bound for every transition
    pub max_transition: u32,
}

impl Default for TintSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            phase_transition: 300,
            max_transition: 300,
        }
    }
}

/// Persisted part of the coordinator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TintSnapshot {
    pub manual_tint: bool,
}

/// Starts phase tone transitions unless a manual tint is holding the screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseTintCoordinator {
    settings: TintSettings,
    manual_tint: bool,
}

/// Per-frame opacity delta that fades the clock over `duration` frames.
/// Fading out rounds towards the faster speed.
pub fn fade_speed_for(duration: u32, fade_out: bool) -> i32 {
    let frames = i32::try_from(duration.max(1)).unwrap_or(i32::MAX);
    if fade_out {
        -(FADE_RANGE / frames + i32::from(FADE_RANGE % frames != 0))
    } else {
        FADE_RANGE / frames
    }
}

impl PhaseTintCoordinator {
    pub fn new(settings: TintSettings) -> Self {
        Self {
            settings,
            manual_tint: false,
        }
    }

    pub fn settings(&self) -> TintSettings {
        self.settings
    }

    pub fn snapshot(&self) -> TintSnapshot {
        TintSnapshot {
            manual_tint: self.manual_tint,
        }
    }

    pub fn restore(&mut self, snapshot: TintSnapshot) {
        self.manual_tint = snapshot.manual_tint;
    }

    /// Hand the screen back to the clock
    pub fn allow_clock_tint(&mut self) {
        self.manual_tint = false;
    }

    /// Hold the screen tone until `allow_clock_tint`
    pub fn tint_manually(&mut self) {
        self.manual_tint = true;
    }

    pub fn is_manual(&self) -> bool {
        self.manual_tint
    }

    pub fn can_apply_clock_tint(&self, clock: &ClockState) -> bool {
        !self.manual_tint && !clock.is_indoor()
    }

    /// Clamp a transition length to the configured maximum
    pub fn transition_frames(&self, requested: u32) -> u32 {
        requested.min(self.settings.max_transition)
    }

    /// Consume the clock's tone flags, starting a transition when allowed.
    /// Returns whether a transition was started.
    pub fn update(&self, clock: &mut ClockState, driver: &mut impl ToneDriver) -> bool {
        if !self.settings.enabled {
            return false;
        }
        let tone_pending = clock.tone_update_pending();
        let indoor_pending = clock.indoor_tint_pending();
        let mut started = false;

        if tone_pending && (self.can_apply_clock_tint(clock) || indoor_pending) {
            let tone = clock.phase_tone();
            let duration = self.transition_frames(self.settings.phase_transition);
            driver.start_tone_change(tone, duration);
            log::debug!("Phase tone change to {:?} over {} frames at {}", tone, duration, clock);
            started = true;
        }
        if indoor_pending {
            clock.on_successful_indoor_tint();
        }
        if tone_pending {
            clock.on_successful_tone_change();
        }
        started
    }

    // ----- Tint commands -----

    /// Clear the screen tone and resume automatic tinting
    pub fn tint_clear(&mut self, clock: &mut ClockState, driver: &mut impl ToneDriver, duration: u32) {
        clock.set_fade_speed(fade_speed_for(duration, false));
        self.allow_clock_tint();
        driver.start_tone_change(Tone::NEUTRAL, self.transition_frames(duration));
    }

    /// Return to the tone of the current phase and resume automatic tinting
    pub fn tint_normal(&mut self, clock: &mut ClockState, driver: &mut impl ToneDriver, duration: u32) {
        clock.set_fade_speed(fade_speed_for(duration, false));
        self.allow_clock_tint();
        driver.start_tone_change(clock.phase_tone(), self.transition_frames(duration));
    }

    /// Fade to black, fading the clock out with it
    pub fn tint_black(&mut self, clock: &mut ClockState, driver: &mut impl ToneDriver, duration: u32) {
        self.tint_fade_out(clock, driver, Tone::BLACK, duration);
    }

    /// Fade to white, fading the clock out with it
    pub fn tint_white(&mut self, clock: &mut ClockState, driver: &mut impl ToneDriver, duration: u32) {
        self.tint_fade_out(clock, driver, Tone::WHITE, duration);
    }

    fn tint_fade_out(&mut self, clock: &mut ClockState, driver: &mut impl ToneDriver, tone: Tone, duration: u32) {
        if self.settings.enabled {
            self.tint_manually();
        }
        clock.set_fade_speed(fade_speed_for(duration, true));
        clock.start_fading();
        driver.start_tone_change(tone, self.transition_frames(duration));
    }

    /// Handle an external tone change request. A neutral target means
    /// "back to the clock"; anything else becomes a manual tint.
    pub fn change_tone(
        &mut self,
        clock: &ClockState,
        driver: &mut impl ToneDriver,
        tone: Tone,
        duration: u32,
    ) {
        if self.settings.enabled && tone.same_as(&Tone::NEUTRAL, TONE_TOLERANCE) {
            driver.start_tone_change(clock.phase_tone(), self.transition_frames(duration));
            self.allow_clock_tint();
        } else {
            if self.settings.enabled {
                self.tint_manually();
            }
            driver.start_tone_change(tone, self.transition_frames(duration));
        }
    }
}
