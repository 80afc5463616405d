use serde::{Deserialize, Serialize};

/// A rectangle in screen coordinates.
///
/// Coordinates are fractional on purpose: every narrowing step divides the
/// region by the grid size and the remainder is carried into the next layer.
/// Only [`crate::geometry::region_center`] converts to integer pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// An integer screen coordinate, the final output of a narrowing interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Which grid of a combo layer is active.
///
/// Single layers always sit on [`ComboStage::First`]. Serialized as `0` / `1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ComboStage {
    /// The coarse grid (`stage0`).
    #[default]
    First,
    /// The fine grid (`stage1`).
    Second,
}

impl From<ComboStage> for u8 {
    fn from(stage: ComboStage) -> Self {
        match stage {
            ComboStage::First => 0,
            ComboStage::Second => 1,
        }
    }
}

impl TryFrom<u8> for ComboStage {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ComboStage::First),
            1 => Ok(ComboStage::Second),
            other => Err(format!("combo stage must be 0 or 1, got {other}")),
        }
    }
}

/// The kind of layer the current step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepMode {
    Single,
    Combo,
}

/// The mouse button the host should press once a point is resolved.
///
/// Chosen by the activation hotkey, never by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// The part of a [`RuntimeState`] that undo restores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeSnapshot {
    pub layer_index: usize,
    pub stage: ComboStage,
    pub region: Region,
}

/// The full state of one narrowing interaction.
///
/// Transitions never mutate a state in place; [`crate::engine::apply_key`]
/// returns a fresh value and the caller swaps it in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeState {
    pub preset_id: String,
    pub layer_index: usize,
    pub stage: ComboStage,
    pub region: Region,
    /// The activation region. Nudges clamp against it for the whole interaction.
    pub base_region: Region,
    pub done: bool,
    pub history: Vec<RuntimeSnapshot>,
}

impl RuntimeState {
    pub(crate) fn snapshot(&self) -> RuntimeSnapshot {
        RuntimeSnapshot {
            layer_index: self.layer_index,
            stage: self.stage,
            region: self.region,
        }
    }
}

/// Result of feeding one key into the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutput {
    pub state: RuntimeState,
    /// Set when the key resolved the interaction to a point.
    pub click_point: Option<Point>,
    pub did_advance: bool,
}

/// What the renderer paints over the current region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentStep<'a> {
    pub mode: StepMode,
    pub stage: ComboStage,
    pub layer_index: usize,
    pub rows: u32,
    pub cols: u32,
    pub keys: &'a [String],
}
