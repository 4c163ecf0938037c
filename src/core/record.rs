//! Plain-data records: page metadata and transition rules.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::action::ActionFn;
use super::types::{ButtonId, EventId, PageId, Position};

/// Metadata for one page (state). Immutable after insertion; removed only by
/// a whole-table clear.
///
/// The name, display name, layout template and button labels are render
/// metadata carried for the host's menu renderer; the engine itself only
/// dispatches on the id.
///
/// # Example
///
/// ```rust
/// use pageflow::StateRecord;
///
/// let record = StateRecord::new(0, "IDLE", "Idle screen", 0)
///     .with_button_labels(vec!["Start".into(), "Setup".into()]);
/// assert_eq!(record.id, 0);
/// assert_eq!(record.button_labels.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    /// Unique page id, below the page capacity.
    pub id: PageId,
    /// Short name shown in compact layouts.
    pub short_name: String,
    /// Long display name.
    pub long_name: String,
    /// Layout template tag, below the template capacity.
    pub layout_template: u8,
    /// Per-button labels, opaque to the engine.
    #[serde(default)]
    pub button_labels: Vec<String>,
}

impl StateRecord {
    /// Create a record with no button labels.
    pub fn new(
        id: PageId,
        short_name: impl Into<String>,
        long_name: impl Into<String>,
        layout_template: u8,
    ) -> Self {
        Self {
            id,
            short_name: short_name.into(),
            long_name: long_name.into(),
            layout_template,
            button_labels: Vec::new(),
        }
    }

    /// Attach per-button labels.
    pub fn with_button_labels(mut self, labels: Vec<String>) -> Self {
        self.button_labels = labels;
        self
    }
}

/// One transition rule. Immutable after insertion; insertion order is
/// semantically significant (first match wins).
///
/// Each source axis (`from_page`, `from_button`, `event`) may equal its
/// wildcard sentinel, meaning "match any". The destination is always
/// concrete. Up to three opaque operand bytes ride along for the action.
pub struct TransitionRecord<Ctx> {
    /// Source page, or the page wildcard.
    pub from_page: PageId,
    /// Source button, or the button wildcard.
    pub from_button: ButtonId,
    /// Triggering event, or the event wildcard.
    pub event: EventId,
    /// Destination page. Never a wildcard.
    pub to_page: PageId,
    /// Destination button. Never a wildcard.
    pub to_button: ButtonId,
    /// Opaque operand bytes passed through to the action's context.
    pub operands: [u8; 3],
    /// Side effect invoked before the state mutation commits.
    pub action: Option<ActionFn<Ctx>>,
}

impl<Ctx> TransitionRecord<Ctx> {
    /// Create a rule with no action and zeroed operands.
    pub fn new(
        from_page: PageId,
        from_button: ButtonId,
        event: EventId,
        to_page: PageId,
        to_button: ButtonId,
    ) -> Self {
        Self {
            from_page,
            from_button,
            event,
            to_page,
            to_button,
            operands: [0; 3],
            action: None,
        }
    }

    /// Attach an action.
    pub fn with_action(mut self, action: ActionFn<Ctx>) -> Self {
        self.action = Some(action);
        self
    }

    /// Attach operand bytes.
    pub fn with_operands(mut self, operands: [u8; 3]) -> Self {
        self.operands = operands;
        self
    }

    /// The source triple this rule matches on.
    pub fn source(&self) -> (PageId, ButtonId, EventId) {
        (self.from_page, self.from_button, self.event)
    }

    /// The position this rule transitions to.
    pub fn destination(&self) -> Position {
        Position::new(self.to_page, self.to_button)
    }
}

// Manual impls because the action field is a trait object: Clone must not
// require Ctx: Clone, and Debug reports only the action's presence.

impl<Ctx> Clone for TransitionRecord<Ctx> {
    fn clone(&self) -> Self {
        Self {
            from_page: self.from_page,
            from_button: self.from_button,
            event: self.event,
            to_page: self.to_page,
            to_button: self.to_button,
            operands: self.operands,
            action: self.action.clone(),
        }
    }
}

impl<Ctx> fmt::Debug for TransitionRecord<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionRecord")
            .field("from_page", &self.from_page)
            .field("from_button", &self.from_button)
            .field("event", &self.event)
            .field("to_page", &self.to_page)
            .field("to_button", &self.to_button)
            .field("operands", &self.operands)
            .field("action", &self.action.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn state_record_carries_render_metadata() {
        let record = StateRecord::new(3, "CFG", "Configuration", 1)
            .with_button_labels(vec!["Up".into(), "Down".into()]);

        assert_eq!(record.id, 3);
        assert_eq!(record.short_name, "CFG");
        assert_eq!(record.long_name, "Configuration");
        assert_eq!(record.layout_template, 1);
        assert_eq!(record.button_labels, vec!["Up", "Down"]);
    }

    #[test]
    fn state_record_roundtrips_through_serde() {
        let record = StateRecord::new(1, "RUN", "Running", 0);
        let json = serde_json::to_string(&record).unwrap();
        let back: StateRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn transition_record_defaults_to_no_action() {
        let rule: TransitionRecord<()> = TransitionRecord::new(0, 1, 2, 3, 4);
        assert!(rule.action.is_none());
        assert_eq!(rule.operands, [0, 0, 0]);
        assert_eq!(rule.source(), (0, 1, 2));
        assert_eq!(rule.destination(), Position::new(3, 4));
    }

    #[test]
    fn clone_shares_the_action() {
        let rule: TransitionRecord<()> = TransitionRecord::new(0, 0, 0, 1, 0)
            .with_action(Arc::new(|_, _, _, _| Ok(())))
            .with_operands([7, 8, 9]);

        let copy = rule.clone();
        assert!(copy.action.is_some());
        assert_eq!(copy.operands, [7, 8, 9]);
    }

    #[test]
    fn debug_does_not_require_a_debug_action() {
        let rule: TransitionRecord<()> =
            TransitionRecord::new(0, 0, 0, 1, 0).with_action(Arc::new(|_, _, _, _| Ok(())));
        let text = format!("{rule:?}");
        assert!(text.contains("to_page: 1"));
    }
}
