//! Identifier types, the page/button position pair, and capacity limits.
//!
//! Every axis of the engine (pages, buttons, events) is addressed by a small
//! integer id with a capacity bound. The value exactly one past the largest
//! legal id is the wildcard sentinel for that axis: legal on the source side
//! of a transition (meaning "match any"), illegal as a destination, and an
//! error anywhere beyond it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Primary state dimension: a menu/screen node.
pub type PageId = u16;

/// Secondary state dimension: cursor position within a page.
pub type ButtonId = u16;

/// External stimulus code selecting a transition.
pub type EventId = u16;

/// A page/button pair. The engine's current and last state are both
/// `Position` values.
///
/// # Example
///
/// ```rust
/// use pageflow::Position;
///
/// let home = Position::new(0, 0);
/// assert_eq!(home.page, 0);
/// assert_eq!(home.button, 0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Page the cursor is on.
    pub page: PageId,
    /// Button the cursor rests on within that page.
    pub button: ButtonId,
}

impl Position {
    /// Create a position from a page/button pair.
    pub const fn new(page: PageId, button: ButtonId) -> Self {
        Self { page, button }
    }
}

/// Capacity bounds for one engine instance, fixed at construction.
///
/// The wildcard sentinel on each axis is derived from the bound:
/// `wildcard_page() == max_pages`, and likewise for buttons and events.
/// All storage (state slots, transition table, scoreboard words) is sized
/// from these values once and never grows.
///
/// # Example
///
/// ```rust
/// use pageflow::Limits;
///
/// let limits = Limits::default();
/// assert_eq!(limits.wildcard_page(), limits.max_pages);
/// assert!(limits.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Number of addressable pages; page ids are `0..max_pages`.
    pub max_pages: u16,
    /// Number of addressable buttons per page; at most 16 (one redraw bit each).
    pub max_buttons: u16,
    /// Number of event codes; event ids are `0..max_events`.
    pub max_events: u16,
    /// Number of layout templates a `StateRecord` may reference.
    pub max_templates: u8,
    /// Transition table capacity.
    pub max_transitions: usize,
    /// Nested `process_event` calls allowed before dispatch fails closed.
    pub max_recursion_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_pages: 16,
            max_buttons: 8,
            max_events: 32,
            max_templates: 8,
            max_transitions: 64,
            max_recursion_depth: 10,
        }
    }
}

impl Limits {
    /// Wildcard sentinel for the page axis.
    pub const fn wildcard_page(&self) -> PageId {
        self.max_pages
    }

    /// Wildcard sentinel for the button axis.
    pub const fn wildcard_button(&self) -> ButtonId {
        self.max_buttons
    }

    /// Wildcard sentinel for the event axis.
    pub const fn wildcard_event(&self) -> EventId {
        self.max_events
    }

    /// Check that the bounds describe a usable engine.
    pub fn validate(&self) -> Result<(), LimitsError> {
        if self.max_pages == 0
            || self.max_buttons == 0
            || self.max_events == 0
            || self.max_transitions == 0
        {
            return Err(LimitsError::ZeroCapacity);
        }
        if self.max_buttons > 16 {
            return Err(LimitsError::TooManyButtons(self.max_buttons));
        }
        if self.max_recursion_depth == 0 {
            return Err(LimitsError::ZeroRecursionDepth);
        }
        Ok(())
    }
}

/// Errors produced by [`Limits::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LimitsError {
    #[error("every axis needs capacity for at least one concrete value")]
    ZeroCapacity,

    #[error("button capacity {0} exceeds the 16 bits of the redraw mask")]
    TooManyButtons(u16),

    #[error("recursion depth bound must be at least 1")]
    ZeroRecursionDepth,
}
