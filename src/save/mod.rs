//! Save/load system
//!
//! Persists the clock and screen tint state between sessions.

pub mod save_game;

pub use save_game::{
    SaveData, SaveError, ScreenSaveData, SAVE_SLOTS,
    save_game, load_game, delete_save, save_exists, list_saves, save_path,
    save_game_in, load_game_in, delete_save_in, save_path_in, save_directory,
};
