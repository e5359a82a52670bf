//! Duskwheel - Entry Point
//!
//! Headless driver: runs a clock session for one in-game day, plays a
//! short event script, and saves the result.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::Result;

use duskwheel::data::{load_config, read_config, DEFAULT_CONFIG_PATH};
use duskwheel::game::{Game, StaticWorld};
use duskwheel::save::save_game;
use duskwheel::DayPhase;

/// Screen the clock is laid out against
const SCREEN_SIZE: (u32, u32) = (544, 416);

/// Events played after the first day
const DEMO_SCRIPT: &str = "\
# Head indoors for the evening
set_time 36
set_indoor true
tint_black 30
# Morning outside
set_indoor false
set_time 12
tint_normal 60
";

fn main() -> Result<()> {
    // Log to a file, or to stderr if the file can't be opened
    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Ok(log_file) = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("duskwheel.log")
    {
        logger.target(env_logger::Target::Pipe(Box::new(log_file)));
    }
    logger.init();

    log::info!("Starting Duskwheel v{}", env!("CARGO_PKG_VERSION"));

    let config = match std::env::args().nth(1) {
        Some(path) => read_config(Path::new(&path))?,
        None => load_config(Path::new(DEFAULT_CONFIG_PATH)),
    };

    let mut game = Game::new(config, SCREEN_SIZE)?;
    game.start_map();

    let world = StaticWorld::default();
    let day_frames = game.clock().rules().timing.day_frames();
    let mut last_phase: Option<DayPhase> = None;

    for _ in 0..day_frames {
        game.update(&world);
        let phase = game.clock().day_phase();
        if last_phase != Some(phase) {
            log::info!("{} begins at {}", phase.name(), game.clock());
            last_phase = Some(phase);
        }
    }

    let commands = game.run_script(DEMO_SCRIPT)?;
    log::info!("Ran {} scripted clock commands", commands);
    for _ in 0..120 {
        game.update(&world);
    }

    let path = save_game(&game, 0)?;
    println!(
        "Clock reads {} ({}) after {} frames; saved to {}",
        game.clock(),
        game.clock().day_phase().name(),
        game.frame(),
        path.display()
    );

    log::info!("Duskwheel shut down cleanly");
    Ok(())
}
