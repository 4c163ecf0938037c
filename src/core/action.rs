//! The action contract: side effects invoked by the dispatcher.
//!
//! Actions are `Send + Sync` closures behind an `Arc`, invoked with the
//! destination page, the triggering event and the caller's context. An
//! action's `Err` is the fault channel: the dispatcher catches it, counts a
//! failed transition and leaves the state untouched.
//!
//! An action may raise a further event through the [`EventSink`] handle it
//! receives; the nested dispatch runs under the engine's recursion guard.

use std::sync::Arc;

use thiserror::Error;

use super::redraw::RedrawMask;
use super::types::{EventId, PageId};

/// Fault raised by an action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("action failed: {message}")]
pub struct ActionError {
    /// Human-readable description of the fault.
    pub message: String,
}

impl ActionError {
    /// Create an error from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<&str> for ActionError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

/// Result of one action invocation.
pub type ActionResult = Result<(), ActionError>;

/// Re-entry seam between actions and the engine.
///
/// The engine implements this trait; an action that needs to raise a
/// follow-up event calls [`EventSink::raise`], which dispatches it like any
/// externally injected event, bounded by the recursion guard.
pub trait EventSink<Ctx> {
    /// Dispatch `event` now, returning the redraw mask of the nested call.
    fn raise(&mut self, event: EventId, ctx: &mut Ctx) -> RedrawMask;
}

/// Action invoked as `(sink, to_page, event, ctx)`.
pub type ActionFn<Ctx> =
    Arc<dyn Fn(&mut dyn EventSink<Ctx>, PageId, EventId, &mut Ctx) -> ActionResult + Send + Sync>;
