//! Pure wildcard matching over transition rules.
//!
//! A rule matches when every source axis is either its wildcard sentinel or
//! equal to the concrete value. Selection scans in insertion order and the
//! first match wins, so a safety-net wildcard rule must be registered after
//! the specific rules it backstops.

use super::record::TransitionRecord;
use super::types::{EventId, Limits, Position};

/// Does `rule` match the current position and event?
pub fn source_matches<Ctx>(
    rule: &TransitionRecord<Ctx>,
    at: Position,
    event: EventId,
    limits: &Limits,
) -> bool {
    (rule.from_page == limits.wildcard_page() || rule.from_page == at.page)
        && (rule.from_button == limits.wildcard_button() || rule.from_button == at.button)
        && (rule.event == limits.wildcard_event() || rule.event == event)
}

/// First matching rule in insertion order, with its table index.
pub fn first_match<'a, Ctx>(
    rules: &'a [TransitionRecord<Ctx>],
    at: Position,
    event: EventId,
    limits: &Limits,
) -> Option<(usize, &'a TransitionRecord<Ctx>)> {
    rules
        .iter()
        .enumerate()
        .find(|(_, rule)| source_matches(rule, at, event, limits))
}
