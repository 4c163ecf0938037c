//! Fluent construction of a fully validated engine.
//!
//! The builder collects limits, states, transitions and the initial
//! position, then `build()` feeds them through the engine's own add-time
//! checks and finishes with a whole-table validation, so a built engine is
//! known-good.

use thiserror::Error;

use crate::core::{ButtonId, Limits, LimitsError, PageId, Position, StateRecord, TransitionRecord};
use crate::engine::Engine;
use crate::table::{AddStateError, AddTransitionError, SetStateError, ValidationError};

/// Errors that can occur while building an engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("initial state not specified; call .initial(page, button) before .build()")]
    MissingInitialState,

    #[error("no transitions defined; add at least one transition")]
    NoTransitions,

    #[error(transparent)]
    Limits(#[from] LimitsError),

    #[error(transparent)]
    State(#[from] AddStateError),

    #[error(transparent)]
    Transition(#[from] AddTransitionError),

    #[error(transparent)]
    InitialState(#[from] SetStateError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Builder for constructing engines with a fluent API.
pub struct EngineBuilder<Ctx = ()> {
    limits: Limits,
    initial: Option<Position>,
    states: Vec<StateRecord>,
    transitions: Vec<TransitionRecord<Ctx>>,
}

impl<Ctx> EngineBuilder<Ctx> {
    /// Create a new builder with default limits.
    pub fn new() -> Self {
        Self {
            limits: Limits::default(),
            initial: None,
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Override the capacity bounds.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the initial position (required).
    pub fn initial(mut self, page: PageId, button: ButtonId) -> Self {
        self.initial = Some(Position::new(page, button));
        self
    }

    /// Add a state record.
    pub fn state(mut self, record: StateRecord) -> Self {
        self.states.push(record);
        self
    }

    /// Add a transition rule. Registration order is preserved.
    pub fn transition(mut self, record: TransitionRecord<Ctx>) -> Self {
        self.transitions.push(record);
        self
    }

    /// Build and validate the engine.
    pub fn build(self) -> Result<Engine<Ctx>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        if self.transitions.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        let mut engine = Engine::with_limits(self.limits)?;
        for record in self.states {
            engine.add_state(record)?;
        }
        for record in self.transitions {
            engine.add_transition(record)?;
        }
        engine.set_initial_state(initial.page, initial.button)?;
        engine.validate_configuration()?;
        Ok(engine)
    }
}

impl<Ctx> Default for EngineBuilder<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}
