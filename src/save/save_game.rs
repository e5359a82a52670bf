//! Game save/load system
//!
//! Writes the clock and screen tint state to JSON save slots and reads
//! them back.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::clock::ClockSnapshot;
use crate::game::Game;
use crate::screen::{ScreenTone, TintSnapshot};

/// Save file version for compatibility checking
const SAVE_VERSION: u32 = 1;

/// Number of save slots
pub const SAVE_SLOTS: u8 = 3;

/// Complete save data structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    /// Missing in saves made before the clock existed
    #[serde(default)]
    pub clock: Option<ClockSnapshot>,
    #[serde(default)]
    pub screen: Option<ScreenSaveData>,
}

/// Screen tone and tint override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenSaveData {
    pub tint: TintSnapshot,
    pub tone: ScreenTone,
}

impl SaveData {
    pub fn new(clock: ClockSnapshot, screen: ScreenSaveData) -> Self {
        Self {
            version: SAVE_VERSION,
            clock: Some(clock),
            screen: Some(screen),
        }
    }
}

/// Save error types
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Get the save directory path
pub fn save_directory() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "duskwheel", "Duskwheel") {
        let mut path = proj_dirs.data_local_dir().to_path_buf();
        path.push("saves");
        path
    } else {
        // Fallback to current directory
        PathBuf::from("./saves")
    }
}

/// Path of a slot inside `dir`
pub fn save_path_in(dir: &Path, slot: u8) -> PathBuf {
    dir.join(format!("save_{}.json", slot))
}

/// Get the path for a specific save slot
pub fn save_path(slot: u8) -> PathBuf {
    save_path_in(&save_directory(), slot)
}

/// Check if a save exists in the given slot
pub fn save_exists(slot: u8) -> bool {
    save_path(slot).exists()
}

/// List which slots hold a save
pub fn list_saves() -> Vec<(u8, bool)> {
    (0..SAVE_SLOTS).map(|slot| (slot, save_exists(slot))).collect()
}

/// Save the game to a slot in `dir`
pub fn save_game_in(dir: &Path, game: &Game, slot: u8) -> Result<PathBuf, SaveError> {
    fs::create_dir_all(dir)?;
    let path = save_path_in(dir, slot);
    let json = serde_json::to_string_pretty(&game.save_data())?;
    fs::write(&path, json)?;

    log::info!("Game saved to slot {} ({:?})", slot, path);
    Ok(path)
}

/// Save the game to a slot
pub fn save_game(game: &Game, slot: u8) -> Result<PathBuf, SaveError> {
    save_game_in(&save_directory(), game, slot)
}

/// Load a save from a slot in `dir`
pub fn load_game_in(dir: &Path, slot: u8) -> Result<SaveData, SaveError> {
    let path = save_path_in(dir, slot);
    let data = fs::read_to_string(&path)?;
    let save: SaveData = serde_json::from_str(&data)?;

    // Version check
    if save.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save.version,
        });
    }

    log::info!("Game loaded from slot {}", slot);
    Ok(save)
}

/// Load a game from a slot
pub fn load_game(slot: u8) -> Result<SaveData, SaveError> {
    load_game_in(&save_directory(), slot)
}

/// Delete a save slot in `dir`
pub fn delete_save_in(dir: &Path, slot: u8) -> Result<(), SaveError> {
    let path = save_path_in(dir, slot);
    if path.exists() {
        fs::remove_file(&path)?;
        log::info!("Deleted save slot {}", slot);
    }
    Ok(())
}

/// Delete a save slot
pub fn delete_save(slot: u8) -> Result<(), SaveError> {
    delete_save_in(&save_directory(), slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ClockConfig;
    use crate::game::StaticWorld;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("duskwheel-save-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn new_game() -> Game {
        Game::new(ClockConfig::default(), (544, 416)).unwrap()
    }

    #[test]
    fn test_save_and_load_slot() {
        let dir = scratch_dir("slot");
        let mut game = new_game();
        game.start_map();
        game.clock_mut().set_time(30);
        game.update(&StaticWorld::default());

        save_game_in(&dir, &game, 1).unwrap();
        assert!(save_path_in(&dir, 1).exists());

        let data = load_game_in(&dir, 1).unwrap();
        assert_eq!(data.clock, Some(game.clock().snapshot()));

        let mut restored = new_game();
        restored.load_save(data);
        assert_eq!(restored.clock().snapshot(), game.clock().snapshot());
        assert_eq!(restored.clock().to_string(), game.clock().to_string());

        delete_save_in(&dir, 1).unwrap();
        assert!(!save_path_in(&dir, 1).exists());
    }

    #[test]
    fn test_old_save_without_clock() {
        let dir = scratch_dir("old");
        fs::create_dir_all(&dir).unwrap();
        fs::write(save_path_in(&dir, 0), "{\"version\": 1}").unwrap();

        let data = load_game_in(&dir, 0).unwrap();
        assert!(data.clock.is_none());

        let mut game = new_game();
        game.start_map();
        game.load_save(data);
        assert!(!game.clock().is_set_up());
        assert!(!game.clock().is_working());
    }

    #[test]
    fn test_version_mismatch() {
        let dir = scratch_dir("version");
        fs::create_dir_all(&dir).unwrap();
        fs::write(save_path_in(&dir, 2), "{\"version\": 99}").unwrap();
        assert!(matches!(
            load_game_in(&dir, 2),
            Err(SaveError::VersionMismatch { expected: 1, found: 99 })
        ));
    }

    #[test]
    fn test_missing_slot_is_io_error() {
        let dir = scratch_dir("missing");
        assert!(matches!(load_game_in(&dir, 0), Err(SaveError::Io(_))));
    }
}
