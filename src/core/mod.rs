//! Core data types and pure functions.
//!
//! This module contains the leaf pieces everything else builds on:
//! - Identifier types, the page/button [`Position`] pair and capacity [`Limits`]
//! - [`StateRecord`] and [`TransitionRecord`] plain data
//! - The action contract ([`ActionFn`], [`EventSink`])
//! - The pure wildcard matcher and the redraw mask calculator
//!
//! Nothing here mutates engine state; the imperative shell lives in
//! `crate::engine`.

mod action;
mod matcher;
mod record;
mod redraw;
mod types;

pub use action::{ActionError, ActionFn, ActionResult, EventSink};
pub use matcher::{first_match, source_matches};
pub use record::{StateRecord, TransitionRecord};
pub use redraw::{redraw_mask, RedrawMask};
pub use types::{ButtonId, EventId, Limits, LimitsError, PageId, Position};
