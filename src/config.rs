use crate::error::ConfigError;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted settings. Every field has a default so partial files load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub title: String,
    /// Display name for the reference zone; the offset below is what drives the sky.
    pub zone_label: String,
    pub utc_offset_minutes: i32,
    pub frame_rate: u32,
    pub resample_interval_secs: u64,
    pub pixel_ratio: u32,
    /// Viewports narrower than this many columns get the larger body.
    pub narrow_breakpoint: u32,
    pub show_clock: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Latino Excellence".into(),
            zone_label: "America/Lima".into(),
            utc_offset_minutes: -5 * 60,
            frame_rate: 30,
            resample_interval_secs: 60,
            pixel_ratio: 2,
            narrow_breakpoint: 100,
            show_clock: true,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=120).contains(&self.frame_rate) {
            return Err(invalid("frameRate", format!("{} is outside 1..=120", self.frame_rate)));
        }
        if self.resample_interval_secs == 0 {
            return Err(invalid("resampleIntervalSecs", "must be at least 1".into()));
        }
        if !(1..=4).contains(&self.pixel_ratio) {
            return Err(invalid("pixelRatio", format!("{} is outside 1..=4", self.pixel_ratio)));
        }
        if !(-1439..=1439).contains(&self.utc_offset_minutes) {
            return Err(invalid(
                "utcOffsetMinutes",
                format!("{} is outside -1439..=1439", self.utc_offset_minutes),
            ));
        }
        if self.narrow_breakpoint == 0 {
            return Err(invalid("narrowBreakpoint", "must be at least 1".into()));
        }
        Ok(())
    }

    /// The single offset shared by the sky sampler and the clock.
    pub fn offset(&self) -> Result<FixedOffset, ConfigError> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            invalid(
                "utcOffsetMinutes",
                format!("{} is not a valid offset", self.utc_offset_minutes),
            )
        })
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

/// Returns the default config file path: `<config_dir>/skyclock/config.json`.
pub fn config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("skyclock").join("config.json")
}

/// Load the config from `path`; a missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Like [`load_config`], but falls back to defaults on a bad file.
pub fn load_config_or_default(path: &Path) -> Config {
    match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("{}; using defaults", e);
            Config::default()
        }
    }
}

/// Persist the config to disk.
pub fn save_config(path: &Path, config: &Config) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(config).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(io_err)
}
