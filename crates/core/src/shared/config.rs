use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gesture::domain::gesture_classifier::{CursorMapper, NavHotZone};
use crate::shared::constants::{
    CURSOR_Y_MARGIN, DEFAULT_ENROLL_DIR, DEFAULT_SLIDES_DIR, DISPLAY_TIME, FACE_MATCH_THRESHOLD,
    FRAME_HEIGHT, FRAME_WIDTH, GESTURE_DELAY, HOT_ZONE_MAX_Y, HOT_ZONE_MIN_X, MIN_FACE_SIZE,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables for the authentication and presentation loops.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub face_match_threshold: f64,
    /// Pixels² of the face bounding box required before matching.
    pub min_face_size: f64,
    pub display_time: u32,
    pub debounce_delay: u32,
    pub frame_width: u32,
    pub frame_height: u32,
    pub hot_zone_min_x: f64,
    pub hot_zone_max_y: f64,
    /// Camera-pixel span of the fingertip mapped onto the full output width.
    pub cursor_x_range: [f64; 2],
    pub cursor_y_range: [f64; 2],
    pub enroll_dir: PathBuf,
    pub slides_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let w = FRAME_WIDTH as f64;
        let h = FRAME_HEIGHT as f64;
        Self {
            face_match_threshold: FACE_MATCH_THRESHOLD,
            min_face_size: MIN_FACE_SIZE,
            display_time: DISPLAY_TIME,
            debounce_delay: GESTURE_DELAY,
            frame_width: FRAME_WIDTH,
            frame_height: FRAME_HEIGHT,
            hot_zone_min_x: HOT_ZONE_MIN_X,
            hot_zone_max_y: HOT_ZONE_MAX_Y,
            cursor_x_range: [w / 2.0, w],
            cursor_y_range: [CURSOR_Y_MARGIN, h - CURSOR_Y_MARGIN],
            enroll_dir: PathBuf::from(DEFAULT_ENROLL_DIR),
            slides_dir: PathBuf::from(DEFAULT_SLIDES_DIR),
        }
    }
}

impl SessionConfig {
    /// Platform config location: `<config_dir>/GestureDeck/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("GestureDeck").join("config.json"))
    }

    /// Loads from `path`, or from the platform location when it exists,
    /// falling back to defaults. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(p) => Self::read(p)?,
            None => match Self::default_path() {
                Some(p) if p.exists() => Self::read(&p)?,
                _ => {
                    log::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-1.0..=1.0).contains(&self.face_match_threshold) {
            return Err(ConfigError::Invalid(format!(
                "face_match_threshold must be between -1.0 and 1.0, got {}",
                self.face_match_threshold
            )));
        }
        if self.min_face_size < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_face_size must be non-negative, got {}",
                self.min_face_size
            )));
        }
        if self.display_time == 0 {
            return Err(ConfigError::Invalid("display_time must be at least 1 frame".into()));
        }
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "frame size must be non-zero, got {}x{}",
                self.frame_width, self.frame_height
            )));
        }
        for (name, [lo, hi]) in [
            ("cursor_x_range", self.cursor_x_range),
            ("cursor_y_range", self.cursor_y_range),
        ] {
            if hi <= lo {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be increasing, got [{lo}, {hi}]"
                )));
            }
        }
        Ok(())
    }

    pub fn hot_zone(&self) -> NavHotZone {
        NavHotZone::new(self.hot_zone_min_x, self.hot_zone_max_y)
    }

    pub fn cursor_mapper(&self) -> CursorMapper {
        CursorMapper::new(
            self.frame_width,
            self.frame_height,
            self.cursor_x_range,
            self.cursor_y_range,
        )
    }
}
