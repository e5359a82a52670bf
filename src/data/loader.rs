//! RON config loader
//!
//! Loads the clock configuration from a RON file, with fallback to the
//! built-in defaults.

use std::fs;
use std::path::Path;

use super::config::{ClockConfig, ConfigError};

/// Where the shipped configuration lives
pub const DEFAULT_CONFIG_PATH: &str = "assets/data/clock.ron";

/// Load and validate a config file, reporting any problem
pub fn read_config(path: &Path) -> Result<ClockConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ClockConfig = ron::from_str(&content)?;
    config.validate()?;
    log::info!("Clock config loaded from {:?}", path);
    Ok(config)
}

/// Load a config file, falling back to defaults when it is missing or invalid
pub fn load_config(path: &Path) -> ClockConfig {
    if !path.exists() {
        log::info!("No clock config at {:?}, using defaults", path);
        return ClockConfig::default();
    }
    read_config(path).unwrap_or_else(|e| {
        log::warn!("Failed to load clock config {:?}: {}. Using defaults.", path, e);
        ClockConfig::default()
    })
}

/// Write the default configuration as pretty RON
pub fn export_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let ron = ron::ser::to_string_pretty(&ClockConfig::default(), ron::ser::PrettyConfig::default())?;
    fs::write(path, ron)?;
    log::info!("Exported default clock config to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("duskwheel-loader-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_export_then_read() {
        let dir = scratch_dir("export");
        let path = dir.join("clock.ron");
        export_default_config(&path).unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config, ClockConfig::default());
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = read_config(Path::new(DEFAULT_CONFIG_PATH)).unwrap();
        assert_eq!(config, ClockConfig::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = scratch_dir("missing");
        let config = load_config(&dir.join("nope.ron"));
        assert_eq!(config, ClockConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = scratch_dir("partial");
        let path = dir.join("clock.ron");
        fs::write(&path, "(hour_frames: 600, display: (resolution: \"32x32\"))").unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.hour_frames, 600);
        assert_eq!(config.display.resolution.width, 32);
        assert_eq!(config.display.padding, 40);
        assert_eq!(config.starting_phase, 16);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = scratch_dir("invalid");
        let path = dir.join("clock.ron");
        fs::write(&path, "(hour_frames: 10)").unwrap();

        assert!(matches!(read_config(&path), Err(ConfigError::HourFramesTooSmall { .. })));
        assert_eq!(load_config(&path), ClockConfig::default());

        fs::write(&path, "not ron at all (").unwrap();
        assert!(matches!(read_config(&path), Err(ConfigError::Parse(_))));
    }
}
