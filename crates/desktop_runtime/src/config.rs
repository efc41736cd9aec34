//! Runtime tunables loaded from the embedded `runtime.toml`.

use leptos::logging;
use serde::Deserialize;
use thiserror::Error;

const EMBEDDED_CONFIG: &str = include_str!("../runtime.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("runtime config parse failed: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("runtime config invalid: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub first_z_index: u32,
    pub default_width: i32,
    pub default_height: i32,
    /// Half-open spawn range for the window's left edge.
    pub spawn_x: [i32; 2],
    /// Half-open spawn range for the window's top edge.
    pub spawn_y: [i32; 2],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            first_z_index: 10,
            default_width: 640,
            default_height: 480,
            spawn_x: [150, 350],
            spawn_y: [50, 150],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DelayConfig {
    pub decrypt_ms: u64,
    pub breach_ms: u64,
    pub repair_ms: u64,
    pub crash_reset_ms: u64,
    pub damage_flash_ms: u64,
    pub scene_ready_ms: u64,
    /// Exit transition length before a closing window is removed.
    pub window_exit_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            decrypt_ms: 1500,
            breach_ms: 3000,
            repair_ms: 2000,
            crash_reset_ms: 5000,
            damage_flash_ms: 300,
            scene_ready_ms: 50,
            window_exit_ms: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Scene pixels per frame.
    pub max_speed: f64,
    pub acceleration: f64,
    /// Multiplier applied to an axis with no input.
    pub friction: f64,
    pub rest_threshold: f64,
    pub walk_cue_speed: f64,
    pub facing_speed: f64,
    pub animation_poll_ms: u64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            max_speed: 1.0,
            acceleration: 0.1,
            friction: 0.42,
            rest_threshold: 0.01,
            walk_cue_speed: 0.05,
            facing_speed: 0.1,
            animation_poll_ms: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub lerp: f64,
    pub snap_epsilon: f64,
    pub zoom: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            lerp: 0.08,
            snap_epsilon: 0.1,
            zoom: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NarrativeConfig {
    pub intro_char_ms: u64,
    pub ending_line_ms: u64,
    pub ending_menu_delay_ms: u64,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            intro_char_ms: 50,
            ending_line_ms: 2500,
            ending_menu_delay_ms: 1000,
        }
    }
}

/// All runtime tunables. Missing sections and keys take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub windows: WindowConfig,
    pub delays: DelayConfig,
    pub movement: MovementConfig,
    pub camera: CameraConfig,
    pub narrative: NarrativeConfig,
}

impl RuntimeConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the document is not valid TOML or a value is out of range.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the embedded configuration, falling back to defaults on error.
    pub fn embedded() -> Self {
        match Self::from_toml_str(EMBEDDED_CONFIG) {
            Ok(config) => config,
            Err(err) => {
                logging::warn!("{err}; using default runtime config");
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let [x0, x1] = self.windows.spawn_x;
        let [y0, y1] = self.windows.spawn_y;
        if x0 >= x1 || y0 >= y1 {
            return Err(ConfigError::Invalid("window spawn ranges must be non-empty"));
        }
        if self.windows.default_width <= 0 || self.windows.default_height <= 0 {
            return Err(ConfigError::Invalid("default window size must be positive"));
        }
        if !(self.camera.lerp > 0.0 && self.camera.lerp <= 1.0) {
            return Err(ConfigError::Invalid("camera.lerp must be in (0, 1]"));
        }
        if self.camera.zoom <= 0.0 {
            return Err(ConfigError::Invalid("camera.zoom must be positive"));
        }
        if self.movement.animation_poll_ms == 0 || self.narrative.intro_char_ms == 0 {
            return Err(ConfigError::Invalid("poll intervals must be non-zero"));
        }
        Ok(())
    }
}
