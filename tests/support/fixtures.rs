use gridclick::config::{
    ActivationHotkeys, AppConfig, AppSection, ControlHotkeys, GridStage, HotkeysConfig, Layer,
    NudgeConfig, OverlayConfig, OverlayFont, Preset, SettingsWindowConfig, TrayConfig,
};
use gridclick::{Region, RuntimeState, create_initial_state};

/// Combo layer (1x2 then 2x1) followed by a single 1x2 layer.
pub fn make_config() -> AppConfig {
    config_with_layers(vec![
        Layer::Combo {
            stage0: GridStage::new(1, 2, &["a", "b"]),
            stage1: GridStage::new(2, 1, &["c", "d"]),
        },
        Layer::Single(GridStage::new(1, 2, &["e", "f"])),
    ])
}

/// A preset made of one single-mode layer.
pub fn single_layer_config(rows: u32, cols: u32, keys: &[&str]) -> AppConfig {
    config_with_layers(vec![Layer::Single(GridStage::new(rows, cols, keys))])
}

pub fn config_with_layers(layers: Vec<Layer>) -> AppConfig {
    AppConfig {
        app: AppSection {
            tray: TrayConfig { enabled: true },
            settings_window: SettingsWindowConfig {
                open_from_tray: true,
            },
        },
        hotkeys: HotkeysConfig {
            activation: ActivationHotkeys {
                left_click: "Ctrl+;".to_string(),
                right_click: "Ctrl+Shift+;".to_string(),
                middle_click: "Ctrl+Shift+Alt+;".to_string(),
            },
            controls: ControlHotkeys {
                cancel: "Esc".to_string(),
                undo: "Backspace".to_string(),
                direct_click: "Space".to_string(),
            },
        },
        active_preset_id: "test".to_string(),
        presets: vec![Preset {
            id: "test".to_string(),
            name: "test".to_string(),
            layers,
        }],
        overlay: OverlayConfig {
            alpha: 120,
            mask_color: "#000000".to_string(),
            line_color: "#ffffff".to_string(),
            text_color: "#ffffff".to_string(),
            line_width_px: 1,
            font: OverlayFont {
                family: "Segoe UI".to_string(),
                size_px: 12,
            },
        },
        nudge: NudgeConfig::default(),
    }
}

pub fn square(size: f64) -> Region {
    Region::new(0.0, 0.0, size, size)
}

pub fn initial(config: &AppConfig, region: Region) -> RuntimeState {
    create_initial_state(config, region)
}
