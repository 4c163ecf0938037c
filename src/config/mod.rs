//! Declarative table configuration.
//!
//! A [`TableConfig`] describes limits, states, transitions and the initial
//! position as plain serde data, so a whole menu table can live in a JSON
//! file. Actions are not serializable; a rule carries an optional action
//! *name* and the host binds names to [`ActionFn`] values when the engine is
//! built.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::builder::{BuildError, EngineBuilder};
use crate::core::{ActionFn, ButtonId, EventId, Limits, PageId, Position, StateRecord, TransitionRecord};
use crate::engine::Engine;

/// Version identifier for the configuration format.
pub const CONFIG_VERSION: u32 = 1;

fn default_version() -> u32 {
    CONFIG_VERSION
}

/// Errors that can occur when loading or applying a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("serialization failed: {0}")]
    SerializationFailed(String),

    #[error("deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("unsupported configuration version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("no action registered under name '{name}'")]
    UnknownAction { name: String },

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// One transition rule as configuration data.
///
/// `None` on a source axis means the wildcard; destinations are always
/// concrete, mirroring the engine's own rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionConfig {
    #[serde(default)]
    pub from_page: Option<PageId>,
    #[serde(default)]
    pub from_button: Option<ButtonId>,
    #[serde(default)]
    pub event: Option<EventId>,
    pub to_page: PageId,
    pub to_button: ButtonId,
    #[serde(default)]
    pub operands: [u8; 3],
    /// Name of the action to bind, if any.
    #[serde(default)]
    pub action: Option<String>,
}

impl TransitionConfig {
    fn to_record<Ctx>(&self, limits: &Limits) -> TransitionRecord<Ctx> {
        TransitionRecord::new(
            self.from_page.unwrap_or(limits.wildcard_page()),
            self.from_button.unwrap_or(limits.wildcard_button()),
            self.event.unwrap_or(limits.wildcard_event()),
            self.to_page,
            self.to_button,
        )
        .with_operands(self.operands)
    }
}

/// A complete table description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub initial: Option<Position>,
    #[serde(default)]
    pub states: Vec<StateRecord>,
    #[serde(default)]
    pub transitions: Vec<TransitionConfig>,
}

impl TableConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)
            .map_err(|err| ConfigError::DeserializationFailed(err.to_string()))?;
        if config.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: config.version,
                supported: CONFIG_VERSION,
            });
        }
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self)
            .map_err(|err| ConfigError::SerializationFailed(err.to_string()))
    }

    /// Build a validated engine; every rule must be action-free.
    pub fn build_engine<Ctx>(&self) -> Result<Engine<Ctx>, ConfigError> {
        self.build_engine_with(|_| None)
    }

    /// Build a validated engine, binding action names through `bind`.
    ///
    /// `bind` returning `None` for a name the configuration references is an
    /// error: a rule must not silently lose its side effect.
    pub fn build_engine_with<Ctx, F>(&self, mut bind: F) -> Result<Engine<Ctx>, ConfigError>
    where
        F: FnMut(&str) -> Option<ActionFn<Ctx>>,
    {
        let mut builder = EngineBuilder::new().limits(self.limits);
        for state in &self.states {
            builder = builder.state(state.clone());
        }
        for transition in &self.transitions {
            let mut record = transition.to_record::<Ctx>(&self.limits);
            if let Some(name) = &transition.action {
                let action = bind(name).ok_or_else(|| ConfigError::UnknownAction {
                    name: name.clone(),
                })?;
                record = record.with_action(action);
            }
            builder = builder.transition(record);
        }
        if let Some(initial) = self.initial {
            builder = builder.initial(initial.page, initial.button);
        }
        Ok(builder.build()?)
    }
}
