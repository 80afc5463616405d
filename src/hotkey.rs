//! Activation chords and the key set an overlay captures.
//!
//! Activation hotkeys are chords such as `Ctrl+Shift+;`. Hosts register them
//! with the OS and, when one fires, ask [`ActivationHotkeys::click_button_for`]
//! which mouse button the interaction will end with.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{ActivationHotkeys, AppConfig};
use crate::key::normalize_key;
use crate::types::ClickButton;

bitflags::bitflags! {
    /// Keyboard modifier flags.
    ///
    /// These can be combined to represent multiple modifiers held simultaneously.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

impl Modifiers {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "ctrl" | "control" => Some(Modifiers::CTRL),
            "shift" => Some(Modifiers::SHIFT),
            "alt" | "option" => Some(Modifiers::ALT),
            "meta" | "super" | "cmd" | "command" | "win" => Some(Modifiers::META),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HotkeyError {
    #[error("hotkey is empty")]
    Empty,
    #[error("hotkey has an empty segment")]
    EmptySegment,
    #[error("hotkey has no key besides modifiers")]
    MissingKey,
    #[error("hotkey names more than one key: {0} and {1}")]
    MultipleKeys(String, String),
}

/// A parsed chord: a set of modifiers plus one normalized key.
///
/// Token order and case do not matter, so `shift+CTRL+;` equals `Ctrl+Shift+;`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub mods: Modifiers,
    pub key: String,
}

impl Hotkey {
    pub fn new(mods: Modifiers, key: &str) -> Self {
        Self {
            mods,
            key: normalize_key(key),
        }
    }
}

impl FromStr for Hotkey {
    type Err = HotkeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().is_empty() {
            return Err(HotkeyError::Empty);
        }

        // A bare "+" is the plus key, not a separator.
        if value.trim() == "+" {
            return Ok(Hotkey::new(Modifiers::empty(), "+"));
        }

        let mut mods = Modifiers::empty();
        let mut key: Option<String> = None;
        for part in value.split('+') {
            let token = part.trim();
            if token.is_empty() {
                return Err(HotkeyError::EmptySegment);
            }
            let token = normalize_key(token);
            if let Some(flag) = Modifiers::from_token(&token) {
                mods |= flag;
                continue;
            }
            if let Some(existing) = key {
                return Err(HotkeyError::MultipleKeys(existing, token));
            }
            key = Some(token);
        }

        let key = key.ok_or(HotkeyError::MissingKey)?;
        Ok(Hotkey { mods, key })
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (Modifiers::CTRL, "Ctrl"),
            (Modifiers::SHIFT, "Shift"),
            (Modifiers::ALT, "Alt"),
            (Modifiers::META, "Meta"),
        ] {
            if self.mods.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        f.write_str(&self.key)
    }
}

impl ActivationHotkeys {
    /// Maps a fired chord to its mouse button. Left wins over right over
    /// middle when bindings collide; unparsable bindings never match.
    pub fn click_button_for(&self, pressed: &Hotkey) -> Option<ClickButton> {
        [
            (&self.left_click, ClickButton::Left),
            (&self.right_click, ClickButton::Right),
            (&self.middle_click, ClickButton::Middle),
        ]
        .into_iter()
        .find(|(binding, _)| binding.parse::<Hotkey>().ok().as_ref() == Some(pressed))
        .map(|(_, button)| button)
    }
}

/// Keys an overlay has to capture while an interaction is running.
///
/// Grid keys of the active preset first, then the control keys, then the
/// arrows used for nudging. Blank entries are dropped and duplicates (by
/// normalized form) keep their first spelling.
pub fn overlay_keys(config: &AppConfig) -> Vec<String> {
    let grid_keys = config
        .active_preset()
        .into_iter()
        .flat_map(|preset| preset.layers.iter())
        .flat_map(|layer| layer.grids())
        .flat_map(|grid| grid.keys.iter().cloned());

    let controls = &config.hotkeys.controls;
    let control_keys = [&controls.cancel, &controls.undo, &controls.direct_click]
        .into_iter()
        .cloned();

    let arrows = ["ArrowLeft", "ArrowRight", "ArrowUp", "ArrowDown"]
        .into_iter()
        .map(String::from);

    let mut seen = HashSet::new();
    grid_keys
        .chain(control_keys)
        .chain(arrows)
        .filter(|key| !key.trim().is_empty())
        .filter(|key| seen.insert(normalize_key(key)))
        .collect()
}
