//! Clock sprite driver
//!
//! Keeps a headless model of the clock hand and its support layer in sync
//! with the `ClockState`: placement on screen, angle, visibility and
//! opacity. A frontend draws from the values exposed here.

use crate::clock::ClockState;
use crate::data::DisplayConfig;

/// Z order of the clock viewport
pub const CLOCK_VIEWPORT_Z: i32 = 100;

/// Where the clock sits on screen and which images it uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockLayout {
    /// Viewport left edge
    pub x: i32,
    /// Viewport top edge
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub z: i32,
    /// Z of the support layer relative to the hand
    pub support_z_offset: i32,
    pub clock_path: String,
    pub support_path: String,
}

impl ClockLayout {
    /// Place the clock in the configured corner of a screen
    pub fn new(display: &DisplayConfig, screen_width: u32, screen_height: u32) -> Self {
        let width = display.resolution.width;
        let height = display.resolution.height;
        let to_i32 = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);

        let mut x = display.padding;
        if display.corner % 2 == 0 {
            x = to_i32(screen_width) - x - to_i32(width);
        }
        let mut y = display.padding;
        if display.corner >= 2 {
            y = to_i32(screen_height) - y - to_i32(height);
        }

        Self {
            x,
            y,
            width,
            height,
            z: CLOCK_VIEWPORT_Z,
            support_z_offset: display.support_z_offset,
            clock_path: display.clock_path(),
            support_path: display.support_path(),
        }
    }

    /// Rotation origin, the centre of the image
    pub fn origin(&self) -> (u32, u32) {
        (self.width / 2, self.height / 2)
    }
}

/// Clock hand and support layer as last drawn
#[derive(Debug, Clone, PartialEq)]
pub struct ClockSprite {
    layout: ClockLayout,
    angle: u32,
    visible: bool,
    opacity: u8,
    /// Number of frames the sprite was redrawn
    repaints: u64,
}

impl ClockSprite {
    pub fn new(layout: ClockLayout, clock: &ClockState) -> Self {
        Self {
            layout,
            angle: clock.current_angle(),
            visible: clock.is_visible(),
            opacity: clock.opacity(),
            repaints: 0,
        }
    }

    pub fn layout(&self) -> &ClockLayout {
        &self.layout
    }

    pub fn angle(&self) -> u32 {
        self.angle
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    pub fn repaints(&self) -> u64 {
        self.repaints
    }

    /// Per-frame sync after the clock has ticked
    pub fn update_clock(&mut self, clock: &mut ClockState) {
        let sync = clock.needs_sprite_refresh();
        if sync || clock.is_fading() {
            self.repaint(clock);
        }
        if sync {
            clock.on_successful_refresh();
        }
    }

    fn repaint(&mut self, clock: &mut ClockState) {
        self.angle = clock.current_angle();
        self.visible = clock.is_visible();
        if clock.is_visible() && clock.is_fading() {
            clock.step_fade();
        }
        self.opacity = clock.opacity();
        self.repaints += 1;
    }
}
