pub mod config;
pub mod engine;
pub mod geometry;
pub mod hotkey;
pub mod key;
pub mod session;
pub mod types;

pub use crate::config::{AppConfig, ConfigError, GridStage, Layer, Preset};
pub use crate::engine::{apply_key, create_initial_state, current_step};
pub use crate::geometry::{crop_region, region_center};
pub use crate::hotkey::{Hotkey, HotkeyError, Modifiers};
pub use crate::key::normalize_key;
pub use crate::session::{ClickRequest, Session, SessionBuilder, SessionEvent};
pub use crate::types::{
    ClickButton, ComboStage, CurrentStep, EngineOutput, Point, Region, RuntimeSnapshot,
    RuntimeState, StepMode,
};
