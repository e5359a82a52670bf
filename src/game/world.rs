//! Host world queries gating time flow

use std::collections::HashSet;

use crate::data::MovementConfig;

/// What the clock needs to know about the host world each frame
pub trait WorldQuery {
    /// Whether the player is currently moving
    fn player_moving(&self) -> bool;
    /// State of a game switch
    fn switch(&self, id: u32) -> bool;
}

/// Decides whether time may advance this frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovementGate {
    config: MovementConfig,
}

impl MovementGate {
    pub fn new(config: MovementConfig) -> Self {
        Self { config }
    }

    fn moving_switch_on(&self, world: &impl WorldQuery) -> bool {
        self.config.update_when_moving_with_switch && world.switch(self.config.update_when_moving_switch)
    }

    /// Evaluated fresh every frame
    pub fn can_update(&self, world: &impl WorldQuery) -> bool {
        if self.config.update_when_moving || self.moving_switch_on(world) {
            world.player_moving()
        } else {
            true
        }
    }
}

/// Fixed world state, for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct StaticWorld {
    pub moving: bool,
    pub switches: HashSet<u32>,
}

impl WorldQuery for StaticWorld {
    fn player_moving(&self) -> bool {
        self.moving
    }

    fn switch(&self, id: u32) -> bool {
        self.switches.contains(&id)
    }
}
