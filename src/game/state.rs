//! Game session
//!
//! Owns the clock and everything that reads it, and runs them in order
//! once per frame: clock, sprite, screen tone.

use crate::clock::ClockState;
use crate::data::{ClockConfig, ConfigError};
use crate::render::{ClockLayout, ClockSprite};
use crate::save::{SaveData, ScreenSaveData};
use crate::screen::{PhaseTintCoordinator, ScreenTone};

use super::commands::{parse_script, ClockCommand, CommandError};
use super::world::{MovementGate, WorldQuery};

/// The clock and its collaborators for one play session
pub struct Game {
    /// Immutable configuration
    config: ClockConfig,
    /// The in-game clock
    clock: ClockState,
    /// Decides when the clock may tint the screen
    tint: PhaseTintCoordinator,
    /// Screen tone animation
    screen: ScreenTone,
    /// Clock hand sprite
    sprite: ClockSprite,
    /// Movement gating for time flow
    gate: MovementGate,
    /// Screen size the sprite is laid out against
    screen_size: (u32, u32),
    /// Frames updated this session
    frame: u64,
}

impl Game {
    /// Create a fresh session with an inert clock
    pub fn new(config: ClockConfig, screen_size: (u32, u32)) -> Result<Self, ConfigError> {
        let clock = ClockState::new(config.rules()?);
        let layout = ClockLayout::new(&config.display, screen_size.0, screen_size.1);
        let sprite = ClockSprite::new(layout, &clock);
        Ok(Self {
            tint: PhaseTintCoordinator::new(config.tint_settings()),
            gate: MovementGate::new(config.movement.clone()),
            screen: ScreenTone::default(),
            config,
            clock,
            sprite,
            screen_size,
            frame: 0,
        })
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn clock(&self) -> &ClockState {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut ClockState {
        &mut self.clock
    }

    pub fn tint(&self) -> &PhaseTintCoordinator {
        &self.tint
    }

    pub fn screen(&self) -> &ScreenTone {
        &self.screen
    }

    pub fn sprite(&self) -> &ClockSprite {
        &self.sprite
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The map scene started: set the clock up if configured to
    pub fn start_map(&mut self) {
        if self.config.display.show_on_start {
            self.clock.setup(true);
        }
    }

    /// Run one frame
    pub fn update(&mut self, world: &impl WorldQuery) {
        let can_advance = self.gate.can_update(world);
        self.clock.tick(can_advance);
        self.sprite.update_clock(&mut self.clock);
        if self.tint.update(&mut self.clock, &mut self.screen) {
            log::info!(
                "{} tint started at frame {}",
                self.clock.day_phase().name(),
                self.frame
            );
        }
        self.screen.update();
        self.frame += 1;
    }

    /// Apply a scripted command
    pub fn execute(&mut self, command: ClockCommand) {
        log::debug!("Clock command: {:?}", command);
        match command {
            ClockCommand::Setup { visible } => self.clock.setup(visible),
            ClockCommand::Show => self.clock.show(),
            ClockCommand::Hide => self.clock.hide(),
            ClockCommand::Toggle => self.clock.toggle(),
            ClockCommand::Stop => self.clock.stop(),
            ClockCommand::Resume => self.clock.resume(),
            ClockCommand::ToggleTimeflow => self.clock.toggle_timeflow(),
            ClockCommand::SetIndoor(inside) => self.clock.set_indoor(inside),
            ClockCommand::ToggleIndoor => self.clock.toggle_indoor(),
            ClockCommand::SetTime(phase) => {
                let phase = phase.unwrap_or_else(|| i64::from(self.config.starting_phase));
                self.clock.set_time(phase);
            }
            ClockCommand::ForceRefresh => self.clock.force_refresh(),
            ClockCommand::TintClear(d) => self.tint.tint_clear(&mut self.clock, &mut self.screen, d),
            ClockCommand::TintNormal(d) => self.tint.tint_normal(&mut self.clock, &mut self.screen, d),
            ClockCommand::TintBlack(d) => self.tint.tint_black(&mut self.clock, &mut self.screen, d),
            ClockCommand::TintWhite(d) => self.tint.tint_white(&mut self.clock, &mut self.screen, d),
            ClockCommand::ChangeTone { tone, duration } => {
                self.tint.change_tone(&self.clock, &mut self.screen, tone, duration)
            }
        }
    }

    /// Parse and run a whole script. Nothing runs if any line is invalid.
    pub fn run_script(&mut self, script: &str) -> Result<usize, CommandError> {
        let commands = parse_script(script)?;
        let count = commands.len();
        for command in commands {
            self.execute(command);
        }
        Ok(count)
    }

    /// Snapshot everything that goes into a save file
    pub fn save_data(&self) -> SaveData {
        SaveData::new(
            self.clock.snapshot(),
            ScreenSaveData {
                tint: self.tint.snapshot(),
                tone: self.screen.clone(),
            },
        )
    }

    /// Replace the session state with a loaded save. A save without clock
    /// data gets a fresh, inert clock.
    pub fn load_save(&mut self, data: SaveData) {
        let rules = self.clock.rules().clone();
        self.clock = match data.clock {
            Some(snapshot) => ClockState::from_snapshot(rules, snapshot),
            None => {
                log::warn!("Save has no clock data, starting a new clock");
                ClockState::new(rules)
            }
        };
        let screen = data.screen.unwrap_or_else(|| ScreenSaveData {
            tint: Default::default(),
            tone: ScreenTone::default(),
        });
        self.tint.restore(screen.tint);
        self.screen = screen.tone;

        let layout = ClockLayout::new(&self.config.display, self.screen_size.0, self.screen_size.1);
        self.sprite = ClockSprite::new(layout, &self.clock);
        log::info!("Clock restored at {}", self.clock);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::DayPhase;
    use crate::game::StaticWorld;
    use crate::screen::Tone;

    fn fast_config() -> ClockConfig {
        let mut config = ClockConfig::default();
        config.hour_frames = 60;
        config.phase_transition = 20;
        config
    }

    #[test]
    fn test_start_map_sets_up_clock() {
        let mut game = Game::new(ClockConfig::default(), (544, 416)).unwrap();
        assert!(!game.clock().is_set_up());
        game.start_map();
        assert!(game.clock().is_set_up());
        assert_eq!(game.clock().to_string(), "08:00 AM");

        let mut config = ClockConfig::default();
        config.display.show_on_start = false;
        let mut game = Game::new(config, (544, 416)).unwrap();
        game.start_map();
        assert!(!game.clock().is_set_up());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ClockConfig::default();
        config.starting_phase = 60;
        assert!(Game::new(config, (544, 416)).is_err());
    }

    #[test]
    fn test_first_frame_tints_and_draws() {
        let mut game = Game::new(fast_config(), (544, 416)).unwrap();
        game.start_map();
        game.update(&StaticWorld::default());

        assert!(!game.clock().needs_sprite_refresh());
        assert!(!game.clock().tone_update_pending());
        assert!(game.sprite().is_visible());
        assert_eq!(game.screen().target(), game.clock().rules().phases.day.tone);
        assert_eq!(game.frame(), 1);
    }

    #[test]
    fn test_indoor_tint_beats_manual_override() {
        let mut game = Game::new(fast_config(), (544, 416)).unwrap();
        game.start_map();
        game.clock_mut().set_time(40);
        game.update(&StaticWorld::default());
        assert_eq!(game.screen().target(), game.clock().rules().phases.night.tone);

        game.execute(ClockCommand::ChangeTone {
            tone: Tone::new(0.0, 0.0, 0.0, 255.0),
            duration: 10,
        });
        assert!(game.tint().is_manual());

        game.execute(ClockCommand::SetIndoor(true));
        game.update(&StaticWorld::default());
        assert_eq!(game.screen().target(), Tone::NEUTRAL);
        assert!(!game.clock().indoor_tint_pending());
    }

    #[test]
    fn test_phase_transition_over_a_day() {
        let mut game = Game::new(fast_config(), (544, 416)).unwrap();
        game.start_map();
        let world = StaticWorld::default();
        let day = game.clock().rules().timing.day_frames();

        let mut targets = Vec::new();
        let mut last = game.screen().target();
        for _ in 0..day {
            game.update(&world);
            if game.screen().target() != last {
                last = game.screen().target();
                targets.push(game.clock().day_phase());
            }
        }
        // Day's tone is neutral, so the first change is at dusk
        assert_eq!(
            targets,
            vec![DayPhase::Dusk, DayPhase::Night, DayPhase::Dawn, DayPhase::Day]
        );
    }

    #[test]
    fn test_tint_black_fades_clock_out_and_normal_back_in() {
        let mut game = Game::new(fast_config(), (544, 416)).unwrap();
        game.start_map();
        let world = StaticWorld::default();

        game.run_script("tint_black 30").unwrap();
        for _ in 0..40 {
            game.update(&world);
        }
        assert_eq!(game.sprite().opacity(), 0);
        assert_eq!(game.screen().current(), Tone::BLACK);
        assert!(game.tint().is_manual());

        game.run_script("tint_normal 30").unwrap();
        for _ in 0..40 {
            game.update(&world);
        }
        assert_eq!(game.sprite().opacity(), 255);
        assert!(!game.clock().is_fading());
        assert!(!game.tint().is_manual());
    }

    #[test]
    fn test_script_commands() {
        let mut game = Game::new(fast_config(), (544, 416)).unwrap();
        let count = game
            .run_script("setup false\nshow\nstop\nset_time 51\nset_indoor\ntoggle_indoor")
            .unwrap();
        assert_eq!(count, 6);
        assert!(game.clock().is_visible());
        assert!(!game.clock().is_working());
        assert_eq!(game.clock().phase(), 3);
        assert!(!game.clock().is_indoor());

        game.run_script("set_time").unwrap();
        assert_eq!(game.clock().phase(), 16);

        assert!(game.run_script("resume\nwarp 3").is_err());
        // Rejected scripts run nothing
        assert!(!game.clock().is_working());
    }

    #[test]
    fn test_movement_gate_pauses_time() {
        let mut config = fast_config();
        config.movement.update_when_moving = true;
        let mut game = Game::new(config, (544, 416)).unwrap();
        game.start_map();
        let time = game.clock().time();

        let mut world = StaticWorld::default();
        game.update(&world);
        assert_eq!(game.clock().time(), time);
        world.moving = true;
        game.update(&world);
        assert_eq!(game.clock().time(), time + 1);
    }
}
