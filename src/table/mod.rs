//! Bounded transition table with add-time validation.
//!
//! The table owns the state records and the ordered transition rules of one
//! engine. Capacity is fixed when the table is built; registration order of
//! rules is preserved because the matcher selects the first match.

mod error;

pub use error::{AddStateError, AddTransitionError, SetStateError, ValidationError};

use crate::core::{Limits, PageId, Position, StateRecord, TransitionRecord};

/// Fixed-capacity storage for state records and transition rules.
///
/// State records are slotted by page id, so lookup is a direct index.
/// Transitions are kept in insertion order.
pub struct TransitionTable<Ctx> {
    limits: Limits,
    states: Vec<Option<StateRecord>>,
    state_count: usize,
    transitions: Vec<TransitionRecord<Ctx>>,
}

impl<Ctx> TransitionTable<Ctx> {
    /// Create an empty table. Storage is allocated once and never grows.
    pub fn new(limits: Limits) -> Self {
        let mut states = Vec::with_capacity(limits.max_pages as usize);
        states.resize_with(limits.max_pages as usize, || None);
        Self {
            limits,
            states,
            state_count: 0,
            transitions: Vec::with_capacity(limits.max_transitions),
        }
    }

    /// The capacity bounds this table was built with.
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Register a state record.
    pub fn add_state(&mut self, record: StateRecord) -> Result<(), AddStateError> {
        if record.id >= self.limits.max_pages {
            return Err(AddStateError::MaxPagesExceeded {
                id: record.id,
                max_pages: self.limits.max_pages,
            });
        }
        if record.short_name.is_empty() {
            return Err(AddStateError::InvalidPageName { id: record.id });
        }
        if record.long_name.is_empty() {
            return Err(AddStateError::InvalidPageDisplayName { id: record.id });
        }
        if record.layout_template >= self.limits.max_templates {
            return Err(AddStateError::InvalidMenuTemplate {
                id: record.id,
                template: record.layout_template,
                max_templates: self.limits.max_templates,
            });
        }
        let slot = &mut self.states[record.id as usize];
        if slot.is_some() {
            return Err(AddStateError::DuplicatePage { id: record.id });
        }
        *slot = Some(record);
        self.state_count += 1;
        Ok(())
    }

    /// Register a transition rule, returning its table index.
    ///
    /// Checks run in a fixed order: capacity, source-axis range (wildcard
    /// legal), destination range (wildcard illegal), then the conflict scan
    /// over existing rules.
    pub fn add_transition(
        &mut self,
        record: TransitionRecord<Ctx>,
    ) -> Result<usize, AddTransitionError> {
        if self.transitions.len() >= self.limits.max_transitions {
            return Err(AddTransitionError::MaxTransitionsExceeded {
                capacity: self.limits.max_transitions,
            });
        }
        if record.from_page > self.limits.wildcard_page() {
            return Err(AddTransitionError::InvalidPageId {
                id: record.from_page,
            });
        }
        if record.from_button > self.limits.wildcard_button() {
            return Err(AddTransitionError::InvalidButtonId {
                id: record.from_button,
            });
        }
        if record.event > self.limits.wildcard_event() {
            return Err(AddTransitionError::InvalidEventId { id: record.event });
        }
        if record.to_page >= self.limits.wildcard_page() {
            return Err(AddTransitionError::InvalidPageId { id: record.to_page });
        }
        if record.to_button >= self.limits.wildcard_button() {
            return Err(AddTransitionError::InvalidButtonId {
                id: record.to_button,
            });
        }
        if let Some(index) = self.conflicting_index(&record) {
            return Err(AddTransitionError::DuplicateTransition { index });
        }
        self.transitions.push(record);
        Ok(self.transitions.len() - 1)
    }

    /// Index of an existing rule that makes `candidate` illegal.
    ///
    /// An existing rule conflicts when it covers every triple the candidate
    /// matches (per axis: wildcard, or equal) and either the two source
    /// triples are identical or the destinations disagree. First-match order
    /// makes such a candidate unreachable, so it is a configuration bug; a
    /// shadowed rule that agrees on destination is tolerated, and a wildcard
    /// safety net registered after the specific rules it backstops never
    /// triggers this scan.
    fn conflicting_index(&self, candidate: &TransitionRecord<Ctx>) -> Option<usize> {
        self.transitions.iter().position(|existing| {
            let covers = Self::axis_covers(
                existing.from_page,
                candidate.from_page,
                self.limits.wildcard_page(),
            ) && Self::axis_covers(
                existing.from_button,
                candidate.from_button,
                self.limits.wildcard_button(),
            ) && Self::axis_covers(
                existing.event,
                candidate.event,
                self.limits.wildcard_event(),
            );
            if !covers {
                return false;
            }
            existing.source() == candidate.source()
                || existing.destination() != candidate.destination()
        })
    }

    fn axis_covers(existing: u16, candidate: u16, wildcard: u16) -> bool {
        existing == wildcard || existing == candidate
    }

    /// Whole-table validation, run on demand because it scans everything.
    ///
    /// `current` must be reachable (some rule's destination, or the declared
    /// initial position) and every registered state must be the concrete
    /// source page of at least one rule. Self-loops are legal; no deeper
    /// cycle analysis runs (see `ValidationError::CircularDependency`).
    pub fn validate(
        &self,
        current: Position,
        initial: Option<Position>,
    ) -> Result<(), ValidationError> {
        let reachable = self
            .transitions
            .iter()
            .any(|rule| rule.to_page == current.page)
            || initial.is_some_and(|start| start.page == current.page);
        if !reachable {
            return Err(ValidationError::UnreachablePage { page: current.page });
        }

        for record in self.states.iter().flatten() {
            // Wildcard-from rules never carry a concrete page id, so they do
            // not count as an outgoing edge here.
            let has_exit = self
                .transitions
                .iter()
                .any(|rule| rule.from_page == record.id);
            if !has_exit {
                return Err(ValidationError::DanglingPage { page: record.id });
            }
        }

        Ok(())
    }

    /// State record for `page`, if registered.
    pub fn state(&self, page: PageId) -> Option<&StateRecord> {
        self.states.get(page as usize).and_then(Option::as_ref)
    }

    /// Is `page` a registered state?
    pub fn has_state(&self, page: PageId) -> bool {
        self.state(page).is_some()
    }

    /// Registered states in page-id order.
    pub fn states(&self) -> impl Iterator<Item = &StateRecord> {
        self.states.iter().flatten()
    }

    /// All rules in insertion order.
    pub fn transitions(&self) -> &[TransitionRecord<Ctx>] {
        &self.transitions
    }

    /// Number of registered states.
    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /// Number of registered rules.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Drop every state and rule. Capacity is unchanged.
    pub fn clear(&mut self) {
        for slot in &mut self.states {
            *slot = None;
        }
        self.state_count = 0;
        self.transitions.clear();
    }
}
