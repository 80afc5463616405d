use std::sync::Arc;

use log::debug;

use crate::config::AppConfig;
use crate::engine::{apply_key, create_initial_state, current_step};
use crate::types::{ClickButton, CurrentStep, Point, Region, RuntimeState};

/// A resolved click the host should simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickRequest {
    pub point: Point,
    pub button: ClickButton,
}

/// What a key did to the session, from the host's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Nothing changed; the key was unknown, blocked or the session is over.
    Ignored,
    /// The region or step changed; repaint.
    Advanced,
    /// The interaction resolved to a point. The session is over.
    Clicked(ClickRequest),
    /// The interaction ended without a click. The session is over.
    Cancelled,
}

/// One overlay interaction: a config snapshot, the button chosen at
/// activation and the current engine state.
///
/// Each key replaces the held [`RuntimeState`] with the engine's output, so
/// [`Session::state`] always returns a complete value.
#[derive(Debug, Clone)]
pub struct Session {
    config: Arc<AppConfig>,
    button: ClickButton,
    state: RuntimeState,
}

/// Configures a [`Session`] before activation. See [`Session::builder`].
#[derive(Debug)]
pub struct SessionBuilder {
    config: Arc<AppConfig>,
    button: ClickButton,
    preset_id: Option<String>,
}

impl SessionBuilder {
    pub fn button(mut self, button: ClickButton) -> Self {
        self.button = button;
        self
    }

    /// Runs a preset other than the config's active one.
    pub fn preset(mut self, id: impl Into<String>) -> Self {
        self.preset_id = Some(id.into());
        self
    }

    pub fn build(self, region: Region) -> Session {
        let mut state = create_initial_state(&self.config, region);
        if let Some(preset_id) = self.preset_id {
            state.preset_id = preset_id;
        }
        debug!(
            "Session activated: preset={} button={:?} region={:?}",
            state.preset_id, self.button, region
        );
        Session {
            config: self.config,
            button: self.button,
            state,
        }
    }
}

impl Session {
    pub fn builder(config: impl Into<Arc<AppConfig>>) -> SessionBuilder {
        SessionBuilder {
            config: config.into(),
            button: ClickButton::default(),
            preset_id: None,
        }
    }

    pub fn activate(config: impl Into<Arc<AppConfig>>, region: Region, button: ClickButton) -> Self {
        Self::builder(config).button(button).build(region)
    }

    pub fn handle_key(&mut self, key: &str) -> SessionEvent {
        let was_done = self.state.done;
        let output = apply_key(&self.config, &self.state, key);
        self.state = output.state;

        let event = match output.click_point {
            Some(point) => SessionEvent::Clicked(ClickRequest {
                point,
                button: self.button,
            }),
            None if self.state.done && !was_done => SessionEvent::Cancelled,
            None if output.did_advance => SessionEvent::Advanced,
            None => SessionEvent::Ignored,
        };

        if event != SessionEvent::Ignored {
            debug!(
                "key {key:?} -> {event:?} (layer={} stage={:?} depth={})",
                self.state.layer_index,
                self.state.stage,
                self.state.history.len()
            );
        }
        event
    }

    pub fn current_step(&self) -> Option<CurrentStep<'_>> {
        current_step(&self.config, &self.state)
    }

    pub fn state(&self) -> &RuntimeState {
        &self.state
    }

    pub fn region(&self) -> Region {
        self.state.region
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn click_button(&self) -> ClickButton {
        self.button
    }

    pub fn is_done(&self) -> bool {
        self.state.done
    }
}
