//! # Configuration
//!
//! The user-facing settings: grid presets, control keys, activation chords and
//! overlay styling. The engine only ever reads an [`AppConfig`]; loading,
//! saving and validation live here so hosts share one implementation.
//!
//! Files are camelCase JSON. A missing or broken file falls back to the
//! built-in default, which is embedded from `assets/default-config.json`.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::hotkey::{Hotkey, HotkeyError};
use crate::types::{ComboStage, StepMode};

pub const DEFAULT_CONFIG_JSON: &str = include_str!("../assets/default-config.json");
pub const DEFAULT_NUDGE_STEP_PX: u32 = 5;

// ============================================================================
// Config Structs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub app: AppSection,
    pub hotkeys: HotkeysConfig,
    pub active_preset_id: String,
    pub presets: Vec<Preset>,
    pub overlay: OverlayConfig,
    #[serde(default)]
    pub nudge: NudgeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSection {
    pub tray: TrayConfig,
    pub settings_window: SettingsWindowConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrayConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsWindowConfig {
    pub open_from_tray: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotkeysConfig {
    pub activation: ActivationHotkeys,
    pub controls: ControlHotkeys,
}

/// Global chords that open the overlay, one per mouse button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationHotkeys {
    pub left_click: String,
    pub right_click: String,
    pub middle_click: String,
}

/// Keys that steer an interaction instead of selecting a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlHotkeys {
    pub cancel: String,
    pub undo: String,
    pub direct_click: String,
}

/// An ordered pipeline of narrowing layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub layers: Vec<Layer>,
}

/// One narrowing step of a preset.
///
/// The JSON form carries the variant in a `mode` field:
/// `{"mode": "single", "rows": 3, "cols": 3, "keys": [...]}` or
/// `{"mode": "combo", "stage0": {...}, "stage1": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum Layer {
    Single(GridStage),
    Combo { stage0: GridStage, stage1: GridStage },
}

/// A `rows x cols` grid with one key per cell, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridStage {
    pub rows: u32,
    pub cols: u32,
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayConfig {
    pub alpha: u8,
    pub mask_color: String,
    pub line_color: String,
    pub text_color: String,
    pub line_width_px: u32,
    pub font: OverlayFont,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayFont {
    pub family: String,
    pub size_px: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NudgeConfig {
    pub step_px: u32,
}

impl Default for NudgeConfig {
    fn default() -> Self {
        Self {
            step_px: DEFAULT_NUDGE_STEP_PX,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {reason}")]
    Invalid { reason: String },
    #[error("{label} hotkey is invalid: {value}")]
    InvalidHotkey {
        label: &'static str,
        value: String,
        #[source]
        source: HotkeyError,
    },
}

impl ConfigError {
    fn invalid(reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Lookups
// ============================================================================

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        // Editors on Windows like to prepend a BOM.
        let json = json.strip_prefix('\u{FEFF}').unwrap_or(json);
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn preset(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|candidate| candidate.id == id)
    }

    pub fn active_preset(&self) -> Option<&Preset> {
        self.preset(&self.active_preset_id)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        default_config()
    }
}

impl Layer {
    /// The grid active at `stage`. Single layers ignore the stage.
    pub fn grid(&self, stage: ComboStage) -> &GridStage {
        match (self, stage) {
            (Layer::Single(grid), _) => grid,
            (Layer::Combo { stage0, .. }, ComboStage::First) => stage0,
            (Layer::Combo { stage1, .. }, ComboStage::Second) => stage1,
        }
    }

    pub fn mode(&self) -> StepMode {
        match self {
            Layer::Single(_) => StepMode::Single,
            Layer::Combo { .. } => StepMode::Combo,
        }
    }

    /// Every grid of the layer in the order it is consumed.
    pub fn grids(&self) -> impl Iterator<Item = &GridStage> {
        let (first, second) = match self {
            Layer::Single(grid) => (grid, None),
            Layer::Combo { stage0, stage1 } => (stage0, Some(stage1)),
        };
        std::iter::once(first).chain(second)
    }
}

impl GridStage {
    pub fn new(rows: u32, cols: u32, keys: &[&str]) -> Self {
        Self {
            rows,
            cols,
            keys: keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

// ============================================================================
// Loading
// ============================================================================

/// The built-in configuration.
///
/// # Panics
///
/// Panics if the embedded JSON does not parse; a unit test pins it.
pub fn default_config() -> AppConfig {
    AppConfig::from_json_str(DEFAULT_CONFIG_JSON)
        .expect("assets/default-config.json should be a valid AppConfig")
}

/// Reads and validates the config at `path`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config = AppConfig::from_json_str(&contents)?;
    validate_config(&config)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Like [`load_config`], but falls back to [`default_config`] on any failure.
///
/// The flag is `true` when the default was used, so the host can persist it.
pub fn load_or_default(path: &Path) -> (AppConfig, bool) {
    match load_config(path) {
        Ok(config) => (config, false),
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No config at {}, using default", path.display());
            (default_config(), true)
        }
        Err(e) => {
            warn!("Ignoring config at {}: {e}", path.display());
            (default_config(), true)
        }
    }
}

/// Validates and writes `config` as pretty JSON, creating parent directories.
pub fn save_config(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    validate_config(config)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, config.to_json_pretty()?)?;
    debug!("Saved config to {}", path.display());
    Ok(())
}

// ============================================================================
// Validation
// ============================================================================

/// Checks everything the engine assumes about a config.
///
/// The engine never calls this; hosts run it before handing a config over.
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.presets.is_empty() {
        return Err(ConfigError::invalid("presets must not be empty"));
    }

    let activation = &config.hotkeys.activation;
    validate_hotkey(&activation.left_click, "leftClick")?;
    validate_hotkey(&activation.right_click, "rightClick")?;
    validate_hotkey(&activation.middle_click, "middleClick")?;

    let controls = &config.hotkeys.controls;
    for (value, label) in [
        (&controls.cancel, "cancel"),
        (&controls.undo, "undo"),
        (&controls.direct_click, "directClick"),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::invalid(format!("{label} hotkey is empty")));
        }
    }

    if config.nudge.step_px == 0 {
        return Err(ConfigError::invalid("nudge stepPx must be > 0"));
    }
    if config.overlay.line_width_px == 0 {
        return Err(ConfigError::invalid("overlay lineWidthPx must be > 0"));
    }
    if config.overlay.font.size_px == 0 {
        return Err(ConfigError::invalid("overlay font sizePx must be > 0"));
    }

    let mut preset_ids = HashSet::new();
    for preset in &config.presets {
        if preset.id.trim().is_empty() {
            return Err(ConfigError::invalid("preset id must not be empty"));
        }
        if !preset_ids.insert(preset.id.as_str()) {
            return Err(ConfigError::invalid(format!(
                "duplicate preset id: {}",
                preset.id
            )));
        }
        if preset.layers.is_empty() {
            return Err(ConfigError::invalid(format!(
                "preset {} has no layers",
                preset.id
            )));
        }

        for (layer_index, layer) in preset.layers.iter().enumerate() {
            match layer {
                Layer::Single(grid) => {
                    validate_grid(grid, &format!("preset {} layer {}", preset.id, layer_index))?;
                }
                Layer::Combo { stage0, stage1 } => {
                    validate_grid(
                        stage0,
                        &format!("preset {} layer {} stage0", preset.id, layer_index),
                    )?;
                    validate_grid(
                        stage1,
                        &format!("preset {} layer {} stage1", preset.id, layer_index),
                    )?;
                }
            }
        }
    }

    if !preset_ids.contains(config.active_preset_id.as_str()) {
        return Err(ConfigError::invalid(format!(
            "activePresetId {} does not match any preset",
            config.active_preset_id
        )));
    }

    Ok(())
}

fn validate_grid(grid: &GridStage, label: &str) -> Result<(), ConfigError> {
    if grid.rows == 0 || grid.cols == 0 {
        return Err(ConfigError::invalid(format!(
            "{label} has invalid grid size"
        )));
    }
    let expected = grid.cell_count();
    if grid.keys.len() != expected {
        return Err(ConfigError::invalid(format!(
            "{label} expects {expected} keys but got {}",
            grid.keys.len()
        )));
    }
    if grid.keys.iter().any(|key| key.trim().is_empty()) {
        return Err(ConfigError::invalid(format!(
            "{label} contains empty key labels"
        )));
    }
    Ok(())
}

fn validate_hotkey(value: &str, label: &'static str) -> Result<(), ConfigError> {
    value
        .parse::<Hotkey>()
        .map(|_| ())
        .map_err(|source| ConfigError::InvalidHotkey {
            label,
            value: value.to_string(),
            source,
        })
}
