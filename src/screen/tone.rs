//! Screen tone values and the default tone driver

use serde::{Deserialize, Serialize};

/// Tolerance used when deciding whether two tones are the same
pub const TONE_TOLERANCE: f32 = 0.1;

/// Ambient color overlay: per-channel deltas plus desaturation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Tone {
    /// Red delta (-255..=255)
    pub red: f32,
    /// Green delta (-255..=255)
    pub green: f32,
    /// Blue delta (-255..=255)
    pub blue: f32,
    /// Grayscale amount (0..=255)
    pub gray: f32,
}

impl Tone {
    /// No tint at all
    pub const NEUTRAL: Tone = Tone { red: 0.0, green: 0.0, blue: 0.0, gray: 0.0 };
    pub const BLACK: Tone = Tone { red: -255.0, green: -255.0, blue: -255.0, gray: 0.0 };
    pub const WHITE: Tone = Tone { red: 255.0, green: 255.0, blue: 255.0, gray: 0.0 };

    /// Create a tone, clamping each channel into its valid range
    pub fn new(red: f32, green: f32, blue: f32, gray: f32) -> Self {
        Self {
            red: red.clamp(-255.0, 255.0),
            green: green.clamp(-255.0, 255.0),
            blue: blue.clamp(-255.0, 255.0),
            gray: gray.clamp(0.0, 255.0),
        }
    }

    /// Build a tone from integer `[red, green, blue, gray]` components
    pub fn from_components(components: [i32; 4]) -> Self {
        let [red, green, blue, gray] = components;
        Self::new(red as f32, green as f32, blue as f32, gray as f32)
    }

    /// Channel-wise comparison within an open tolerance band
    pub fn same_as(&self, other: &Tone, tolerance: f32) -> bool {
        let close = |a: f32, b: f32| a > b - tolerance && a < b + tolerance;
        close(self.red, other.red)
            && close(self.green, other.green)
            && close(self.blue, other.blue)
            && close(self.gray, other.gray)
    }

    pub fn is_neutral(&self) -> bool {
        self.same_as(&Tone::NEUTRAL, TONE_TOLERANCE)
    }

    /// One easing step towards `target` with `remaining` frames left
    fn step_towards(&self, target: &Tone, remaining: u32) -> Tone {
        let d = remaining as f32;
        let ease = |current: f32, goal: f32| (current * (d - 1.0) + goal) / d;
        Tone {
            red: ease(self.red, target.red),
            green: ease(self.green, target.green),
            blue: ease(self.blue, target.blue),
            gray: ease(self.gray, target.gray),
        }
    }
}

/// Anything able to animate the screen towards a tone
pub trait ToneDriver {
    /// Begin a transition to `tone` lasting `duration` frames
    fn start_tone_change(&mut self, tone: Tone, duration: u32);
}

/// Screen tone state eased one frame per `update`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenTone {
    current: Tone,
    target: Tone,
    duration: u32,
}

impl ScreenTone {
    pub fn new(current: Tone) -> Self {
        Self {
            current,
            target: current,
            duration: 0,
        }
    }

    pub fn current(&self) -> Tone {
        self.current
    }

    pub fn target(&self) -> Tone {
        self.target
    }

    /// Frames left in the running transition
    pub fn remaining(&self) -> u32 {
        self.duration
    }

    pub fn is_changing(&self) -> bool {
        self.duration > 0
    }

    /// Advance the running transition by one frame
    pub fn update(&mut self) {
        if self.duration == 0 {
            return;
        }
        self.current = self.current.step_towards(&self.target, self.duration);
        self.duration -= 1;
        if self.duration == 0 {
            self.current = self.target;
        }
    }
}

impl ToneDriver for ScreenTone {
    fn start_tone_change(&mut self, tone: Tone, duration: u32) {
        self.target = tone;
        self.duration = duration;
        if duration == 0 {
            self.current = tone;
        }
    }
}
