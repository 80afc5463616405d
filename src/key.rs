use crate::config::ControlHotkeys;

/// Folds a raw key identifier into the form every comparison uses.
///
/// Hosts report the same physical key under different names (`Escape` vs
/// `Esc`, `ArrowLeft` vs `Left`, a literal `" "` vs `Space`). Everything is
/// lower-cased first, then the aliases below collapse onto one spelling.
/// Unknown keys pass through lower-cased.
pub fn normalize_key(value: &str) -> String {
    let lower = value.to_lowercase();
    let alias = match lower.as_str() {
        "escape" | "esc" => "esc",
        "backspace" => "backspace",
        "space" | "spacebar" | " " => "space",
        "arrowleft" | "left" => "left",
        "arrowright" | "right" => "right",
        "arrowup" | "up" => "up",
        "arrowdown" | "down" => "down",
        _ => return lower,
    };
    alias.to_string()
}

/// A fine-adjustment direction bound to the arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl NudgeDirection {
    /// Expects an already normalized key.
    pub fn from_normalized(key: &str) -> Option<Self> {
        match key {
            "left" => Some(NudgeDirection::Left),
            "right" => Some(NudgeDirection::Right),
            "up" => Some(NudgeDirection::Up),
            "down" => Some(NudgeDirection::Down),
            _ => None,
        }
    }

    /// Translation in screen units for a nudge of `step`.
    pub fn delta(self, step: f64) -> (f64, f64) {
        match self {
            NudgeDirection::Left => (-step, 0.0),
            NudgeDirection::Right => (step, 0.0),
            NudgeDirection::Up => (0.0, -step),
            NudgeDirection::Down => (0.0, step),
        }
    }
}

/// The control bindings, normalized once per key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlKeys {
    pub cancel: String,
    pub undo: String,
    pub direct_click: String,
}

impl ControlKeys {
    pub fn from_config(controls: &ControlHotkeys) -> Self {
        Self {
            cancel: normalize_key(&controls.cancel),
            undo: normalize_key(&controls.undo),
            direct_click: normalize_key(&controls.direct_click),
        }
    }
}
