use gridclick::{
    ComboStage, Point, Region, RuntimeState, StepMode, apply_key, current_step,
};

mod support;
use support::fixtures::{config_with_layers, initial, make_config, single_layer_config, square};

fn single_state(config: &gridclick::AppConfig, region: Region) -> RuntimeState {
    RuntimeState {
        layer_index: 1,
        stage: ComboStage::First,
        region,
        ..initial(config, square(100.0))
    }
}

#[test]
fn cancels_on_escape() {
    let config = make_config();
    let state = initial(&config, square(100.0));

    let result = apply_key(&config, &state, "Escape");

    assert!(result.state.done);
    assert!(result.did_advance);
    assert_eq!(result.click_point, None);
    assert_eq!(result.state.region, state.region);
}

#[test]
fn direct_clicks_on_space() {
    let config = make_config();
    let state = initial(&config, square(100.0));

    let result = apply_key(&config, &state, "Space");

    assert!(result.state.done);
    assert!(result.did_advance);
    assert_eq!(result.click_point, Some(Point { x: 50, y: 50 }));
}

#[test]
fn control_keys_match_through_aliases() {
    let config = make_config();
    let state = initial(&config, square(100.0));

    assert!(apply_key(&config, &state, "ESC").state.done);
    assert_eq!(
        apply_key(&config, &state, " ").click_point,
        Some(Point { x: 50, y: 50 })
    );
    assert_eq!(
        apply_key(&config, &state, "spacebar").click_point,
        Some(Point { x: 50, y: 50 })
    );
}

#[test]
fn direct_click_on_single_layer_preset() {
    let config = single_layer_config(1, 2, &["e", "f"]);
    let state = initial(&config, square(100.0));

    let result = apply_key(&config, &state, "Space");

    assert!(result.state.done);
    assert_eq!(result.click_point, Some(Point { x: 50, y: 50 }));
}

#[test]
fn undoes_the_last_step() {
    let config = make_config();
    let region = square(100.0);
    let start = initial(&config, region);

    let advanced = apply_key(&config, &start, "a");
    assert!(advanced.did_advance);
    assert_eq!(advanced.state.stage, ComboStage::Second);
    assert_eq!(advanced.state.history.len(), 1);

    let undone = apply_key(&config, &advanced.state, "Backspace");
    assert!(undone.did_advance);
    assert_eq!(undone.state.stage, ComboStage::First);
    assert_eq!(undone.state.layer_index, 0);
    assert_eq!(undone.state.region, region);
    assert!(undone.state.history.is_empty());
    assert_eq!(undone.state, start);
}

#[test]
fn undo_with_empty_history_ends_interaction() {
    let config = make_config();
    let state = initial(&config, square(100.0));

    let result = apply_key(&config, &state, "Backspace");

    assert!(result.state.done);
    assert!(result.did_advance);
    assert_eq!(result.click_point, None);
}

#[test]
fn full_path_emits_click_at_last_cell_center() {
    let config = make_config();
    let state = initial(&config, square(100.0));

    let step1 = apply_key(&config, &state, "a");
    assert_eq!(step1.state.region, Region::new(0.0, 0.0, 50.0, 100.0));
    assert_eq!(step1.click_point, None);

    let step2 = apply_key(&config, &step1.state, "d");
    assert_eq!(step2.state.region, Region::new(0.0, 50.0, 50.0, 50.0));
    assert_eq!(step2.state.layer_index, 1);
    assert_eq!(step2.state.stage, ComboStage::First);
    assert!(!step2.state.done);

    let step3 = apply_key(&config, &step2.state, "f");
    assert!(step3.state.done);
    assert!(step3.did_advance);
    assert_eq!(step3.state.region, Region::new(25.0, 50.0, 25.0, 50.0));
    assert_eq!(step3.click_point, Some(Point { x: 38, y: 75 }));
    assert_eq!(step3.state.history.len(), 3);
}

#[test]
fn grid_keys_compare_case_insensitively() {
    let config = single_layer_config(1, 2, &["E", "F"]);
    let state = initial(&config, square(100.0));

    let result = apply_key(&config, &state, "f");

    assert!(result.did_advance);
    assert_eq!(result.click_point, Some(Point { x: 75, y: 50 }));
}

#[test]
fn keys_of_other_stages_are_ignored() {
    let config = make_config();
    let state = initial(&config, square(100.0));

    // "c" belongs to stage1 of the combo layer, not stage0.
    let result = apply_key(&config, &state, "c");

    assert!(!result.did_advance);
    assert_eq!(result.state, state);
}

#[test]
fn unknown_key_is_a_no_op() {
    let config = make_config();
    let state = initial(&config, square(100.0));

    let result = apply_key(&config, &state, "F12");

    assert!(!result.did_advance);
    assert_eq!(result.click_point, None);
    assert_eq!(result.state, state);
}

#[test]
fn done_state_absorbs_every_key() {
    let config = make_config();
    let state = RuntimeState {
        done: true,
        ..initial(&config, square(100.0))
    };

    for key in ["a", "Escape", "Backspace", "Space", "Left", "zzz"] {
        let result = apply_key(&config, &state, key);
        assert!(!result.did_advance, "{key} advanced a finished state");
        assert_eq!(result.click_point, None);
        assert_eq!(result.state, state);
    }
}

#[test]
fn nudges_region_only_in_single_step() {
    let config = make_config();
    let state = single_state(&config, Region::new(10.0, 10.0, 20.0, 20.0));

    let nudged = apply_key(&config, &state, "Right");
    assert!(nudged.did_advance);
    assert_eq!(nudged.state.region, Region::new(15.0, 10.0, 20.0, 20.0));
    assert_eq!(nudged.state.layer_index, 1);
    assert_eq!(nudged.state.history.len(), state.history.len());

    let at_edge = single_state(&config, Region::new(0.0, 0.0, 20.0, 20.0));
    let clamped = apply_key(&config, &at_edge, "Left");
    assert!(!clamped.did_advance);
    assert_eq!(clamped.state.region.x, 0.0);
}

#[test]
fn nudge_is_ignored_in_combo_step() {
    let config = make_config();
    let state = initial(&config, square(100.0));
    let state = apply_key(&config, &state, "a").state;

    let result = apply_key(&config, &state, "ArrowDown");

    assert!(!result.did_advance);
    assert_eq!(result.state, state);
}

#[test]
fn nudge_clamps_to_base_not_current_region() {
    let config = make_config();
    let state = single_state(&config, Region::new(78.0, 78.0, 20.0, 20.0));

    let right = apply_key(&config, &state, "right");
    assert_eq!(right.state.region, Region::new(80.0, 78.0, 20.0, 20.0));

    let down = apply_key(&config, &right.state, "down");
    assert_eq!(down.state.region, Region::new(80.0, 80.0, 20.0, 20.0));

    let blocked = apply_key(&config, &down.state, "down");
    assert!(!blocked.did_advance);
}

#[test]
fn nudge_step_follows_config() {
    let mut config = single_layer_config(1, 2, &["e", "f"]);
    config.nudge.step_px = 12;
    let state = RuntimeState {
        region: Region::new(40.0, 40.0, 10.0, 10.0),
        ..initial(&config, square(100.0))
    };

    let result = apply_key(&config, &state, "Up");

    assert_eq!(result.state.region, Region::new(40.0, 28.0, 10.0, 10.0));
}

#[test]
fn nudge_then_select_uses_moved_region() {
    let config = single_layer_config(1, 2, &["e", "f"]);
    let state = RuntimeState {
        region: Region::new(10.0, 10.0, 20.0, 20.0),
        ..initial(&config, square(100.0))
    };

    let moved = apply_key(&config, &state, "Right").state;
    let result = apply_key(&config, &moved, "e");

    assert_eq!(result.state.region, Region::new(15.0, 10.0, 10.0, 20.0));
    assert_eq!(result.click_point, Some(Point { x: 20, y: 20 }));
}

#[test]
fn exhausted_layer_index_forces_completion() {
    let config = make_config();
    let state = RuntimeState {
        layer_index: 7,
        ..initial(&config, square(100.0))
    };

    let result = apply_key(&config, &state, "a");

    assert!(result.state.done);
    assert!(!result.did_advance);
    assert_eq!(result.click_point, None);
}

#[test]
fn unknown_preset_is_a_no_op() {
    let config = make_config();
    let state = RuntimeState {
        preset_id: "missing".to_string(),
        ..initial(&config, square(100.0))
    };

    let result = apply_key(&config, &state, "a");

    assert!(!result.did_advance);
    assert!(!result.state.done);
    assert_eq!(current_step(&config, &state), None);
}

#[test]
fn current_step_follows_the_state_machine() {
    let config = make_config();
    let state = initial(&config, square(100.0));

    let step = current_step(&config, &state).unwrap();
    assert_eq!(step.mode, StepMode::Combo);
    assert_eq!(step.stage, ComboStage::First);
    assert_eq!((step.rows, step.cols), (1, 2));
    assert_eq!(step.keys, ["a", "b"]);

    let state = apply_key(&config, &state, "b").state;
    let step = current_step(&config, &state).unwrap();
    assert_eq!(step.stage, ComboStage::Second);
    assert_eq!(step.keys, ["c", "d"]);

    let state = apply_key(&config, &state, "c").state;
    let step = current_step(&config, &state).unwrap();
    assert_eq!(step.mode, StepMode::Single);
    assert_eq!(step.layer_index, 1);
    assert_eq!(step.keys, ["e", "f"]);

    let state = apply_key(&config, &state, "e").state;
    assert!(state.done);
    assert_eq!(current_step(&config, &state), None);
}

#[test]
fn combo_only_preset_finishes_after_second_stage() {
    let config = config_with_layers(vec![gridclick::Layer::Combo {
        stage0: gridclick::GridStage::new(2, 2, &["q", "w", "a", "s"]),
        stage1: gridclick::GridStage::new(2, 2, &["u", "i", "j", "k"]),
    }]);
    let state = initial(&config, square(400.0));

    let first = apply_key(&config, &state, "s");
    assert!(!first.state.done);
    assert_eq!(first.state.region, Region::new(200.0, 200.0, 200.0, 200.0));

    let second = apply_key(&config, &first.state, "u");
    assert!(second.state.done);
    assert_eq!(second.click_point, Some(Point { x: 250, y: 250 }));
}

#[test]
fn engine_values_cross_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<gridclick::AppConfig>();
    assert_send_sync::<RuntimeState>();
    assert_send_sync::<gridclick::EngineOutput>();
    assert_send_sync::<gridclick::Session>();
}
