//! Pageflow: a table-driven menu state engine
//!
//! Pageflow dispatches events against a bounded table of transition rules.
//! Each rule matches on three independent axes (source page, source button,
//! event), any of which may be a "don't-care" wildcard; the first matching
//! rule in registration order wins. Dispatch runs the rule's action under a
//! recursion guard, mutates the current/last state pair, computes a minimal
//! redraw mask for the renderer, and records coverage and timing statistics.
//!
//! # Core Concepts
//!
//! - **Page / Button**: the two state dimensions, a menu node and the
//!   cursor position within it
//! - **Wildcard**: the sentinel one past an axis's capacity, legal only on
//!   the source side of a rule
//! - **Redraw mask**: a `u16` bitmask telling a renderer what to repaint
//! - **Scoreboard**: a sticky bit-vector of visited pages
//!
//! # Example
//!
//! ```rust
//! use pageflow::{Engine, RedrawMask, StateRecord, TransitionRecord};
//!
//! let mut engine: Engine = Engine::new();
//!
//! engine.add_state(StateRecord::new(0, "IDLE", "Idle", 0)).unwrap();
//! engine.add_state(StateRecord::new(1, "RUNNING", "Running", 0)).unwrap();
//!
//! // From page 0, any button, event 1 moves to page 1 button 0.
//! let any_button = engine.limits().wildcard_button();
//! engine
//!     .add_transition(TransitionRecord::new(0, any_button, 1, 1, 0))
//!     .unwrap();
//!
//! engine.set_initial_state(0, 0).unwrap();
//!
//! let mask = engine.process_event(1, &mut ());
//! assert_eq!(mask, RedrawMask::FULL);
//! assert_eq!(engine.current_state().page, 1);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod engine;
pub mod table;

// Re-export commonly used types
pub use builder::{BuildError, EngineBuilder};
pub use config::{ConfigError, TableConfig, TransitionConfig};
pub use core::{
    first_match, redraw_mask, source_matches, ActionError, ActionFn, ActionResult, ButtonId,
    EventId, EventSink, Limits, LimitsError, PageId, Position, RedrawMask, StateRecord,
    TransitionRecord,
};
pub use engine::{Engine, Scoreboard, Statistics};
pub use table::{
    AddStateError, AddTransitionError, SetStateError, TransitionTable, ValidationError,
};
