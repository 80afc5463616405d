use crate::config::{AppConfig, Layer, Preset};
use crate::geometry::{crop_region, nudge_region, region_center};
use crate::key::{ControlKeys, NudgeDirection, normalize_key};
use crate::types::{
    ComboStage, CurrentStep, EngineOutput, Region, RuntimeState, StepMode,
};

/// Starts an interaction over `initial_region` using the active preset.
pub fn create_initial_state(config: &AppConfig, initial_region: Region) -> RuntimeState {
    RuntimeState {
        preset_id: config.active_preset_id.clone(),
        layer_index: 0,
        stage: ComboStage::First,
        region: initial_region,
        base_region: initial_region,
        done: false,
        history: Vec::new(),
    }
}

/// Feeds one key into the interaction and returns the next state.
///
/// Keys are matched in priority order: cancel, undo, direct click, nudge,
/// then grid cells of the current step. Anything else is ignored. The input
/// state is never modified.
pub fn apply_key(config: &AppConfig, state: &RuntimeState, key: &str) -> EngineOutput {
    if state.done {
        return unchanged(state);
    }

    let key = normalize_key(key);
    let controls = ControlKeys::from_config(&config.hotkeys.controls);

    if key == controls.cancel {
        return finish(state);
    }

    if key == controls.undo {
        return undo(state);
    }

    if key == controls.direct_click {
        return EngineOutput {
            click_point: Some(region_center(state.region)),
            ..finish(state)
        };
    }

    if let Some(direction) = NudgeDirection::from_normalized(&key) {
        return nudge(config, state, direction);
    }

    select_cell(config, state, &key)
}

/// The grid the renderer should paint, resolved exactly as [`apply_key`]
/// resolves it. `None` when the preset or layer cannot be found.
pub fn current_step<'a>(config: &'a AppConfig, state: &RuntimeState) -> Option<CurrentStep<'a>> {
    let preset = config.preset(&state.preset_id)?;
    let layer = preset.layers.get(state.layer_index)?;
    let grid = layer.grid(state.stage);

    Some(CurrentStep {
        mode: layer.mode(),
        stage: state.stage,
        layer_index: state.layer_index,
        rows: grid.rows,
        cols: grid.cols,
        keys: &grid.keys,
    })
}

fn unchanged(state: &RuntimeState) -> EngineOutput {
    EngineOutput {
        state: state.clone(),
        click_point: None,
        did_advance: false,
    }
}

fn finish(state: &RuntimeState) -> EngineOutput {
    EngineOutput {
        state: RuntimeState {
            done: true,
            ..state.clone()
        },
        click_point: None,
        did_advance: true,
    }
}

// Undo at the root ends the interaction instead of doing nothing.
fn undo(state: &RuntimeState) -> EngineOutput {
    let Some((previous, rest)) = state.history.split_last() else {
        return finish(state);
    };

    EngineOutput {
        state: RuntimeState {
            layer_index: previous.layer_index,
            stage: previous.stage,
            region: previous.region,
            done: false,
            history: rest.to_vec(),
            ..state.clone()
        },
        click_point: None,
        did_advance: true,
    }
}

fn nudge(config: &AppConfig, state: &RuntimeState, direction: NudgeDirection) -> EngineOutput {
    match current_step(config, state) {
        Some(step) if step.mode == StepMode::Single => {}
        _ => return unchanged(state),
    }

    let (dx, dy) = direction.delta(f64::from(config.nudge.step_px));
    let region = nudge_region(state.region, state.base_region, dx, dy);
    if region == state.region {
        return unchanged(state);
    }

    EngineOutput {
        state: RuntimeState {
            region,
            ..state.clone()
        },
        click_point: None,
        did_advance: true,
    }
}

fn select_cell(config: &AppConfig, state: &RuntimeState, key: &str) -> EngineOutput {
    let Some(preset) = config.preset(&state.preset_id) else {
        return unchanged(state);
    };

    let Some(layer) = preset.layers.get(state.layer_index) else {
        // Preset exhausted; only reachable with a hand-built state.
        return EngineOutput {
            state: RuntimeState {
                done: true,
                ..state.clone()
            },
            click_point: None,
            did_advance: false,
        };
    };

    let grid = layer.grid(state.stage);
    let Some(position) = grid
        .keys
        .iter()
        .position(|candidate| normalize_key(candidate) == key)
    else {
        return unchanged(state);
    };

    // position < rows * cols, so it fits in u32.
    let key_index = position as u32 + 1;
    let region = crop_region(state.region, grid.rows, grid.cols, key_index);
    let next = advance(state, preset, layer, region);
    let click_point = next.done.then(|| region_center(region));

    EngineOutput {
        state: next,
        click_point,
        did_advance: true,
    }
}

fn advance(state: &RuntimeState, preset: &Preset, layer: &Layer, region: Region) -> RuntimeState {
    let (layer_index, stage) = match (layer, state.stage) {
        (Layer::Combo { .. }, ComboStage::First) => (state.layer_index, ComboStage::Second),
        (Layer::Combo { .. }, ComboStage::Second) | (Layer::Single(_), _) => {
            (state.layer_index + 1, ComboStage::First)
        }
    };

    let mut history = state.history.clone();
    history.push(state.snapshot());

    RuntimeState {
        layer_index,
        stage,
        region,
        done: layer_index >= preset.layers.len(),
        history,
        ..state.clone()
    }
}
