//! Tuning data loader
//!
//! Loads progression tuning from RON (or JSON) files, with fallback to the
//! built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::display::fade::DEFAULT_FADE_SECONDS;
use crate::error::{ConfigError, ProgressionError};
use crate::progression::{ExperienceCurve, MAX_LEVEL_UPS_PER_TICK, STAT_POINTS_PER_LEVEL};

/// File name searched for in each config location
pub const CONFIG_FILE_NAME: &str = "progression.ron";

/// Bundled data directory
const ASSETS_DATA_DIR: &str = "assets/data";

/// All progression tuning, fixed once the game starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Experience curve parameters
    pub curve: ExperienceCurve,
    /// Stat points awarded per level gained
    pub stat_points_per_level: u32,
    /// Guard against runaway level-up loops from bad tuning
    pub max_level_ups_per_tick: u32,
    /// Length of the level-up icon fade
    pub level_up_fade_seconds: f32,
    /// Pools for a newly spawned character
    pub starting_health: u32,
    pub starting_magic: u32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            curve: ExperienceCurve::default(),
            stat_points_per_level: STAT_POINTS_PER_LEVEL,
            max_level_ups_per_tick: MAX_LEVEL_UPS_PER_TICK,
            level_up_fade_seconds: DEFAULT_FADE_SECONDS,
            starting_health: 100,
            starting_magic: 50,
        }
    }
}

impl ProgressionConfig {
    /// Reject tuning that would stall level-ups or break the fade
    pub fn validate(&self) -> Result<(), ProgressionError> {
        self.curve.validate()?;

        if self.max_level_ups_per_tick == 0 {
            return Err(ProgressionError::InvalidSetting {
                parameter: "max_level_ups_per_tick",
                value: 0.0,
            });
        }
        let fade = self.level_up_fade_seconds;
        if !fade.is_finite() || fade < 0.0 {
            return Err(ProgressionError::InvalidSetting {
                parameter: "level_up_fade_seconds",
                value: f64::from(fade),
            });
        }
        Ok(())
    }

    /// Parse and validate RON text
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate JSON text
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` files are read as JSON, anything else as RON
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_ron_str(&content)
        }
    }

    /// Load from the first usable config location, or use defaults
    pub fn load_or_default() -> Self {
        for path in config_search_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_path(&path) {
                Ok(config) => {
                    log::info!("Loaded progression config from {:?}", path);
                    return config;
                }
                Err(e) => log::warn!("Failed to load {:?}: {}", path, e),
            }
        }
        log::info!("Using default progression config");
        Self::default()
    }

    /// Serialize as pretty RON
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }
}

/// Config locations in priority order: user config dir, then bundled assets
pub fn config_search_paths() -> Vec<PathBuf> {
    use directories::ProjectDirs;

    let mut paths = Vec::new();
    if let Some(proj_dirs) = ProjectDirs::from("com", "emberlevel", "Emberlevel") {
        paths.push(proj_dirs.config_dir().join(CONFIG_FILE_NAME));
    }
    paths.push(Path::new(ASSETS_DATA_DIR).join(CONFIG_FILE_NAME));
    paths
}

/// Export the default tuning to a RON file for easy editing
pub fn export_default_config(path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let ron = ProgressionConfig::default().to_ron_string()?;
    fs::write(path, ron).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Exported default progression config to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("emberlevel-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_parse_full_ron() {
        let content = r#"(
            curve: (
                base_requirement: 50.0,
                base_growth_per_level: 1.5,
                first_tier_bonus: 0.05,
                tier_bonus_multiplier: 1.0,
            ),
            stat_points_per_level: 3,
            max_level_ups_per_tick: 64,
            level_up_fade_seconds: 1.5,
            starting_health: 80,
            starting_magic: 30,
        )"#;
        let config = ProgressionConfig::from_ron_str(content).unwrap();
        assert_eq!(config.curve.required_experience(1), 50);
        assert_eq!(config.curve.tier_bonus_multiplier(), 1.0);
        assert_eq!(config.stat_points_per_level, 3);
        assert_eq!(config.max_level_ups_per_tick, 64);
        assert_eq!(config.starting_magic, 30);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config = ProgressionConfig::from_ron_str("(stat_points_per_level: 2)").unwrap();
        assert_eq!(config.stat_points_per_level, 2);
        assert_eq!(config.curve, ExperienceCurve::default());
        assert_eq!(config.level_up_fade_seconds, 3.0);
    }

    #[test]
    fn test_parse_json() {
        let content = r#"{ "stat_points_per_level": 4, "starting_health": 120 }"#;
        let config = ProgressionConfig::from_json_str(content).unwrap();
        assert_eq!(config.stat_points_per_level, 4);
        assert_eq!(config.starting_health, 120);
    }

    #[test]
    fn test_invalid_curve_rejected() {
        let content = r#"(
            curve: (
                base_requirement: 0.0,
                base_growth_per_level: 1.8,
                first_tier_bonus: 0.1,
                tier_bonus_multiplier: 0.2,
            ),
        )"#;
        match ProgressionConfig::from_ron_str(content) {
            Err(ConfigError::Invalid(ProgressionError::InvalidCurve { parameter, .. })) => {
                assert_eq!(parameter, "base_requirement");
            }
            other => panic!("expected invalid curve, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_level_up_cap_rejected() {
        match ProgressionConfig::from_ron_str("(max_level_ups_per_tick: 0)") {
            Err(ConfigError::Invalid(ProgressionError::InvalidSetting { parameter, .. })) => {
                assert_eq!(parameter, "max_level_ups_per_tick");
            }
            other => panic!("expected invalid setting, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_fade_length_rejected() {
        assert!(matches!(
            ProgressionConfig::from_ron_str("(level_up_fade_seconds: -1.0)"),
            Err(ConfigError::Invalid(ProgressionError::InvalidSetting {
                parameter: "level_up_fade_seconds",
                ..
            }))
        ));
        assert!(matches!(
            ProgressionConfig::from_json_str(r#"{ "max_level_ups_per_tick": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(ProgressionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_malformed_ron() {
        assert!(matches!(
            ProgressionConfig::from_ron_str("(curve: oops"),
            Err(ConfigError::Ron(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = scratch_dir("missing").join("nope.ron");
        assert!(matches!(
            ProgressionConfig::load_from_path(&path),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_export_and_reload() {
        let dir = scratch_dir("export");
        let path = dir.join(CONFIG_FILE_NAME);

        let result = export_default_config(&path);
        assert!(result.is_ok(), "Failed to export default config: {:?}", result.err());
        assert!(path.exists(), "progression.ron not created");

        let loaded = ProgressionConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded, ProgressionConfig::default());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_search_paths_end_with_assets() {
        let paths = config_search_paths();
        assert_eq!(paths.last(), Some(&Path::new("assets/data").join(CONFIG_FILE_NAME)));
    }
}
