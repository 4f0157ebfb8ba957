//! Assist configuration.
//!
//! [`AssistConfig`] groups one section per feature. Every section defaults
//! to disabled, and missing fields in a JSON file fall back to the defaults
//! below, so an empty object is a valid configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assist::AntiGoingMode;
use crate::constants::{
    AIM_DISTANCE, HOOK_REACH_TICKS, HOOK_SCAN_STEP, PHYSICAL_SIZE, SURVIVAL_HORIZON_TICKS,
    SURVIVAL_PRECHECK_TICKS, WALLSHOT_ANGLE_STEP,
};
use crate::geometry::BounceModel;
use crate::search::reach::ReachParams;
use crate::search::survival::SurvivalParams;
use crate::search::wallshot::{UnfreezeParams, WallshotParams};

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not a valid configuration.
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Hook auto-aim settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoAimConfig {
    /// Feature switch.
    pub enabled: bool,
    /// Maximum distance to a target.
    pub range: f32,
    /// Press fire whenever an aim is found.
    pub autofire: bool,
    /// Change only the transmitted aim, leaving the cursor alone.
    pub silent: bool,
    /// Angular step of the aim scan, in radians.
    pub scan_step: f32,
    /// Radius of the circle of aim points around the target.
    pub aim_offset: f32,
    /// Ticks the hook is given to attach.
    pub hook_ticks: u32,
    /// Length of the transmitted aim vector.
    pub aim_distance: f32,
}

impl Default for AutoAimConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            range: 400.0,
            autofire: false,
            silent: false,
            scan_step: HOOK_SCAN_STEP,
            aim_offset: PHYSICAL_SIZE,
            hook_ticks: HOOK_REACH_TICKS,
            aim_distance: AIM_DISTANCE,
        }
    }
}

impl AutoAimConfig {
    /// Scan parameters for [`crate::search::reach::find_hook_aim`].
    #[must_use]
    pub const fn reach_params(&self) -> ReachParams {
        ReachParams {
            scan_step: self.scan_step,
            aim_offset: self.aim_offset,
            hook_ticks: self.hook_ticks,
            aim_distance: self.aim_distance,
        }
    }
}

/// Spinning aim settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinbotConfig {
    /// Feature switch.
    pub enabled: bool,
    /// Angular speed in radians per second.
    pub speed: f32,
    /// Length of the aim vector.
    pub distance: f32,
    /// Change only the transmitted aim.
    pub silent: bool,
    /// Press fire every frame.
    pub autofire: bool,
}

impl Default for SpinbotConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            speed: 10.0,
            distance: 100.0,
            silent: false,
            autofire: false,
        }
    }
}

/// Walk-towards-nearest settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizerConfig {
    /// Feature switch.
    pub enabled: bool,
    /// Maximum distance to the followed player.
    pub range: f32,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            range: 400.0,
        }
    }
}

/// Hover settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyConfig {
    /// Feature switch.
    pub enabled: bool,
}

/// Jump-over-freeze settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntiFallingFreezeConfig {
    /// Feature switch.
    pub enabled: bool,
}

/// Walk-away-from-freeze settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntiGoingFreezeConfig {
    /// Behaviour near a freeze tile.
    pub mode: AntiGoingMode,
    /// Horizontal probe distance on each side.
    pub range: f32,
}

impl Default for AntiGoingFreezeConfig {
    fn default() -> Self {
        Self {
            mode: AntiGoingMode::Off,
            range: 32.0,
        }
    }
}

/// Survival search settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurvivalConfig {
    /// Feature switch.
    pub enabled: bool,
    /// Ticks the live input is replayed before searching.
    pub precheck_ticks: u32,
    /// Ticks each candidate movement is replayed.
    pub horizon_ticks: u32,
}

impl Default for SurvivalConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            precheck_ticks: SURVIVAL_PRECHECK_TICKS,
            horizon_ticks: SURVIVAL_HORIZON_TICKS,
        }
    }
}

impl SurvivalConfig {
    /// Replay horizons for [`crate::search::survival::search`].
    #[must_use]
    pub const fn params(&self) -> SurvivalParams {
        SurvivalParams {
            precheck_ticks: self.precheck_ticks,
            horizon_ticks: self.horizon_ticks,
        }
    }
}

/// Self-unfreeze wallshot settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallshotConfig {
    /// Feature switch.
    pub enabled: bool,
    /// Wall hits before the laser returns.
    pub bounces: u32,
    /// Angular step of the launch scan, in radians.
    pub angle_step: f32,
    /// How traced rays leave a wall.
    pub bounce_model: BounceModel,
}

impl Default for WallshotConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bounces: 1,
            angle_step: WALLSHOT_ANGLE_STEP,
            bounce_model: BounceModel::default(),
        }
    }
}

impl WallshotConfig {
    /// Parameters for [`crate::search::wallshot::plan_self_unfreeze`].
    #[must_use]
    pub fn unfreeze_params(&self) -> UnfreezeParams {
        UnfreezeParams {
            wallshot: WallshotParams {
                bounces: self.bounces,
                angle_step: self.angle_step,
                model: self.bounce_model,
                ..WallshotParams::default()
            },
            ..UnfreezeParams::default()
        }
    }
}

/// Settings for every assist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistConfig {
    /// Hook auto-aim.
    pub auto_aim: AutoAimConfig,
    /// Spinning aim.
    pub spinbot: SpinbotConfig,
    /// Walk towards the nearest player.
    pub stabilizer: StabilizerConfig,
    /// Hover around an anchor.
    pub fly: FlyConfig,
    /// Jump before landing in freeze.
    pub anti_falling_freeze: AntiFallingFreezeConfig,
    /// Avoid walking into freeze.
    pub anti_going_freeze: AntiGoingFreezeConfig,
    /// Survival search.
    pub survival: SurvivalConfig,
    /// Self-unfreeze wallshot.
    pub wallshot: WallshotConfig,
}

impl AssistConfig {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] when the text is not a valid
    /// configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use foresight::config::AssistConfig;
    ///
    /// let config = AssistConfig::from_json(r#"{ "survival": { "enabled": true } }"#).unwrap();
    /// assert!(config.survival.enabled);
    /// assert_eq!(config.survival.horizon_ticks, 20);
    /// assert!(!config.auto_aim.enabled);
    /// ```
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Json`] when it does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
