//! Configuration-time error surfaces for the transition table.

use thiserror::Error;

use crate::core::{ButtonId, EventId, PageId};

/// Errors returned by `add_state`. Always surfaced to the caller, never
/// silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddStateError {
    #[error("page id {id} is at or beyond the page capacity {max_pages}")]
    MaxPagesExceeded { id: PageId, max_pages: u16 },

    #[error("page {id} is already registered")]
    DuplicatePage { id: PageId },

    #[error("page {id} has an empty name")]
    InvalidPageName { id: PageId },

    #[error("page {id} has an empty display name")]
    InvalidPageDisplayName { id: PageId },

    #[error("page {id} references layout template {template}, limit is {max_templates}")]
    InvalidMenuTemplate {
        id: PageId,
        template: u8,
        max_templates: u8,
    },
}

/// Errors returned by `add_transition`.
///
/// Source axes may equal their wildcard sentinel; destinations must sit
/// strictly below it. A conflicting rule reports the index of the existing
/// rule it collides with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddTransitionError {
    #[error("transition table is full, capacity {capacity}")]
    MaxTransitionsExceeded { capacity: usize },

    #[error("page id {id} is out of range")]
    InvalidPageId { id: PageId },

    #[error("button id {id} is out of range")]
    InvalidButtonId { id: ButtonId },

    #[error("event id {id} is out of range")]
    InvalidEventId { id: EventId },

    #[error("rule is shadowed by transition #{index} with a different destination")]
    DuplicateTransition { index: usize },
}

/// Errors returned by the explicit state setters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetStateError {
    #[error("page id {id} is out of range")]
    InvalidPageId { id: PageId },

    #[error("button id {id} is out of range")]
    InvalidButtonId { id: ButtonId },

    #[error("page {id} is not a registered state")]
    UnknownPage { id: PageId },
}

/// Whole-table validation errors, surfaced only by `validate_configuration`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("page {page} is not any transition's destination nor the initial page")]
    UnreachablePage { page: PageId },

    #[error("page {page} is not the source of any transition")]
    DanglingPage { page: PageId },

    /// Reserved. Self-loops are legal and no deeper cycle analysis runs, so
    /// this variant is currently never produced; it stays in the surface for
    /// consumers that match on it.
    #[error("transition graph contains a cycle through page {page}")]
    CircularDependency { page: PageId },
}
