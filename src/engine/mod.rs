//! The engine facade: owns all storage and runs event dispatch.

mod scoreboard;
mod stats;

pub use scoreboard::Scoreboard;
pub use stats::Statistics;

use std::time::Instant;

use log::{debug, trace, warn};

use crate::core::{
    first_match, redraw_mask, ButtonId, EventId, EventSink, Limits, LimitsError, PageId, Position,
    RedrawMask, StateRecord, TransitionRecord,
};
use crate::table::{
    AddStateError, AddTransitionError, SetStateError, TransitionTable, ValidationError,
};
use stats::StatsRecorder;

/// Table-driven menu state engine.
///
/// One engine exclusively owns its transition table, current/last state
/// pair, scoreboard and statistics; instances share nothing. `Ctx` is the
/// caller's context, passed through to actions on every dispatch.
///
/// Dispatch is synchronous and single-threaded. The only re-entrancy
/// modeled is an action raising a further event through the [`EventSink`]
/// handle it receives, bounded by `Limits::max_recursion_depth`.
///
/// # Example
///
/// ```rust
/// use pageflow::{Engine, RedrawMask, StateRecord, TransitionRecord};
///
/// let mut engine: Engine = Engine::new();
/// engine.add_state(StateRecord::new(0, "IDLE", "Idle", 0)).unwrap();
/// engine.add_state(StateRecord::new(1, "RUN", "Running", 0)).unwrap();
///
/// let any_button = engine.limits().wildcard_button();
/// engine
///     .add_transition(TransitionRecord::new(0, any_button, 1, 1, 0))
///     .unwrap();
/// engine.set_initial_state(0, 0).unwrap();
///
/// assert_eq!(engine.process_event(1, &mut ()), RedrawMask::FULL);
/// assert_eq!(engine.current_state().page, 1);
/// ```
pub struct Engine<Ctx = ()> {
    table: TransitionTable<Ctx>,
    current: Position,
    last: Position,
    initial: Option<Position>,
    depth: usize,
    scoreboard: Scoreboard,
    stats: StatsRecorder,
}

impl<Ctx> Engine<Ctx> {
    /// Engine with default [`Limits`].
    pub fn new() -> Self {
        Self::with_limits(Limits::default()).expect("default limits are valid")
    }

    /// Engine with caller-chosen capacity bounds.
    pub fn with_limits(limits: Limits) -> Result<Self, LimitsError> {
        limits.validate()?;
        Ok(Self {
            table: TransitionTable::new(limits),
            current: Position::default(),
            last: Position::default(),
            initial: None,
            depth: 0,
            scoreboard: Scoreboard::new(limits.max_pages),
            stats: StatsRecorder::default(),
        })
    }

    /// The capacity bounds this engine was built with.
    pub fn limits(&self) -> &Limits {
        self.table.limits()
    }

    /// Read access to the underlying table.
    pub fn table(&self) -> &TransitionTable<Ctx> {
        &self.table
    }

    /// Register a state record. Errors count toward `validation_errors`.
    pub fn add_state(&mut self, record: StateRecord) -> Result<(), AddStateError> {
        let result = self.table.add_state(record);
        if result.is_err() {
            self.stats.count_validation_error();
        }
        result
    }

    /// Register a transition rule, returning its table index. Errors count
    /// toward `validation_errors`.
    pub fn add_transition(
        &mut self,
        record: TransitionRecord<Ctx>,
    ) -> Result<usize, AddTransitionError> {
        let result = self.table.add_transition(record);
        if result.is_err() {
            self.stats.count_validation_error();
        }
        result
    }

    /// Declare the starting position and move there. Ids must be concrete.
    pub fn set_initial_state(
        &mut self,
        page: PageId,
        button: ButtonId,
    ) -> Result<(), SetStateError> {
        let position = self.concrete_position(page, button)?;
        self.initial = Some(position);
        self.current = position;
        self.last = position;
        Ok(())
    }

    /// Validated jump: ids must be concrete and the page registered.
    pub fn set_state(&mut self, page: PageId, button: ButtonId) -> Result<(), SetStateError> {
        let position = self.concrete_position(page, button)?;
        if !self.table.has_state(page) {
            return Err(SetStateError::UnknownPage { id: page });
        }
        self.last = self.current;
        self.current = position;
        Ok(())
    }

    /// Unvalidated jump for diagnostic and host use.
    pub fn force_state(&mut self, page: PageId, button: ButtonId) {
        self.last = self.current;
        self.current = Position::new(page, button);
    }

    fn concrete_position(
        &self,
        page: PageId,
        button: ButtonId,
    ) -> Result<Position, SetStateError> {
        if page >= self.limits().wildcard_page() {
            return Err(SetStateError::InvalidPageId { id: page });
        }
        if button >= self.limits().wildcard_button() {
            return Err(SetStateError::InvalidButtonId { id: button });
        }
        Ok(Position::new(page, button))
    }

    /// Where the cursor is now.
    pub fn current_state(&self) -> Position {
        self.current
    }

    /// Where the cursor was before the most recent mutation.
    pub fn last_state(&self) -> Position {
        self.last
    }

    /// Dispatch one event against the table.
    ///
    /// Selects the first matching rule in insertion order, runs its action,
    /// and commits the state mutation only if the action returned `Ok`.
    /// Returns the redraw mask for the committed change, or an empty mask
    /// when nothing committed (no match, invalid event, recursion guard, or
    /// a faulted action).
    pub fn process_event(&mut self, event: EventId, ctx: &mut Ctx) -> RedrawMask {
        let started = Instant::now();
        self.stats.count_dispatch();

        if self.depth >= self.limits().max_recursion_depth {
            warn!(
                "recursion depth {} reached, dropping event {}",
                self.depth, event
            );
            self.stats.count_failure();
            return RedrawMask::empty();
        }
        if event >= self.limits().wildcard_event() {
            debug!("event {} is out of range", event);
            self.stats.count_failure();
            return RedrawMask::empty();
        }

        // Decrement pairs with every exit path of dispatch.
        self.depth += 1;
        let mask = self.dispatch(event, ctx, started);
        self.depth -= 1;
        mask
    }

    fn dispatch(&mut self, event: EventId, ctx: &mut Ctx, started: Instant) -> RedrawMask {
        let matched = first_match(self.table.transitions(), self.current, event, self.limits())
            .map(|(index, rule)| (index, rule.destination(), rule.action.clone()));

        let Some((index, destination, action)) = matched else {
            trace!(
                "no rule for event {} at page {} button {}",
                event,
                self.current.page,
                self.current.button
            );
            self.stats.count_failure();
            return RedrawMask::empty();
        };

        trace!("rule #{} matched event {}", index, event);

        if let Some(action) = action {
            // The nested borrow is released above by cloning the Arc, so the
            // action may re-enter this engine through the sink.
            if let Err(fault) = action(self, destination.page, event, ctx) {
                debug!("action of rule #{} faulted: {}", index, fault);
                self.stats.count_failure();
                return RedrawMask::empty();
            }
            self.stats.count_action();
        }

        let previous = self.current;
        self.last = previous;
        self.current = destination;
        self.scoreboard.mark(destination.page);
        self.stats.count_state_change(started.elapsed());
        redraw_mask(previous, destination)
    }

    /// Whole-table validation. Errors count toward `validation_errors`.
    pub fn validate_configuration(&mut self) -> Result<(), ValidationError> {
        let result = self.table.validate(self.current, self.initial);
        if result.is_err() {
            self.stats.count_validation_error();
        }
        result
    }

    /// Snapshot of the counters.
    pub fn statistics(&self) -> Statistics {
        self.stats.snapshot()
    }

    /// Zero every counter and aggregate.
    pub fn reset_statistics(&mut self) {
        self.stats.reset();
    }

    /// Read access to the coverage scoreboard.
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// One 32-bit scoreboard segment, `None` when out of range.
    pub fn scoreboard_segment(&self, segment: usize) -> Option<u32> {
        self.scoreboard.get(segment)
    }

    /// Overwrite one scoreboard segment, e.g. when restoring a host mirror.
    pub fn set_scoreboard_segment(&mut self, value: u32, segment: usize) -> bool {
        self.scoreboard.set(value, segment)
    }

    /// Clear every scoreboard bit.
    pub fn clear_scoreboard(&mut self) {
        self.scoreboard.clear();
    }

    /// Drop all configuration and runtime state: table, positions,
    /// scoreboard and statistics.
    pub fn clear(&mut self) {
        self.table.clear();
        self.current = Position::default();
        self.last = Position::default();
        self.initial = None;
        self.scoreboard.clear();
        self.stats.reset();
    }
}

impl<Ctx> Default for Engine<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx> EventSink<Ctx> for Engine<Ctx> {
    fn raise(&mut self, event: EventId, ctx: &mut Ctx) -> RedrawMask {
        self.process_event(event, ctx)
    }
}


#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::sync::Arc;

    /// The IDLE/RUNNING scenario: one wildcard-button rule, one event.
    #[test]
    fn idle_running_scenario() {
        let mut engine: Engine = Engine::new();
        engine
            .add_state(StateRecord::new(0, "IDLE", "Idle", 0))
            .unwrap();
        engine
            .add_state(StateRecord::new(1, "RUNNING", "Running", 0))
            .unwrap();

        let any_button = engine.limits().wildcard_button();
        engine
            .add_transition(TransitionRecord::new(0, any_button, 1, 1, 0))
            .unwrap();
        engine.set_initial_state(0, 0).unwrap();

        let mask = engine.process_event(1, &mut ());
        assert_eq!(mask, RedrawMask::FULL);
        assert_eq!(engine.current_state(), Position::new(1, 0));

        let stats = engine.statistics();
        assert_eq!(stats.total_transitions, 1);
        assert_eq!(stats.state_changes, 1);
    }

    #[test]
    fn specific_rule_wins_over_a_later_safety_net() {
        let mut engine: Engine = Engine::new();
        let any_page = engine.limits().wildcard_page();
        let any_button = engine.limits().wildcard_button();

        engine
            .add_transition(TransitionRecord::new(0, 0, 5, 1, 0))
            .unwrap();
        engine
            .add_transition(TransitionRecord::new(1, 0, 5, 2, 0))
            .unwrap();
        engine
            .add_transition(TransitionRecord::new(any_page, any_button, 5, 0, 0))
            .unwrap();
        engine.set_initial_state(0, 0).unwrap();

        engine.process_event(5, &mut ());
        assert_eq!(engine.current_state(), Position::new(1, 0));

        // From a state only the net covers, the net fires.
        engine.force_state(7, 3);
        engine.process_event(5, &mut ());
        assert_eq!(engine.current_state(), Position::new(0, 0));
    }

    /// A runaway action that re-raises its own event is stopped by the
    /// recursion guard after exactly `max_recursion_depth` attempts.
    #[test]
    fn runaway_recursion_fails_closed() {
        struct Calls(u64);

        let mut engine: Engine<Calls> = Engine::new();
        let depth = engine.limits().max_recursion_depth as u64;

        let runaway: TransitionRecord<Calls> = TransitionRecord::new(0, 0, 1, 0, 0)
            .with_action(Arc::new(|sink, _, event, calls| {
                calls.0 += 1;
                sink.raise(event, calls);
                Ok(())
            }));
        engine.add_transition(runaway).unwrap();
        engine.set_initial_state(0, 0).unwrap();

        let mut calls = Calls(0);
        let mask = engine.process_event(1, &mut calls);

        // The self-loop commits at every level but the cursor never moves.
        assert!(mask.is_empty());
        assert_eq!(engine.current_state(), Position::new(0, 0));
        assert_eq!(calls.0, depth);

        let stats = engine.statistics();
        assert_eq!(stats.total_transitions, depth + 1);
        assert_eq!(stats.failed_transitions, 1);
        assert_eq!(stats.state_changes, depth);
        assert_eq!(stats.action_executions, depth);
    }

    /// An action may raise a different event; the nested dispatch observes
    /// the pre-mutation state and the outer transition commits last.
    #[test]
    fn nested_dispatch_runs_against_the_pre_mutation_state() {
        struct Ctx;

        let mut engine: Engine<Ctx> = Engine::new();
        let chaining: TransitionRecord<Ctx> = TransitionRecord::new(0, 0, 1, 2, 0)
            .with_action(Arc::new(|sink, _, _, ctx| {
                sink.raise(4, ctx);
                Ok(())
            }));
        engine.add_transition(chaining).unwrap();
        // Fires during the nested call, while the cursor is still at (0,0).
        engine
            .add_transition(TransitionRecord::new(0, 0, 4, 3, 0))
            .unwrap();
        engine.set_initial_state(0, 0).unwrap();

        engine.process_event(1, &mut Ctx);

        // Outer commit wins; the nested excursion is visible in last_state
        // and on the scoreboard.
        assert_eq!(engine.current_state(), Position::new(2, 0));
        assert_eq!(engine.last_state(), Position::new(3, 0));
        assert!(engine.scoreboard().is_marked(3));
        assert!(engine.scoreboard().is_marked(2));
        assert_eq!(engine.statistics().state_changes, 2);
    }

    #[test]
    fn scoreboard_accumulates_coverage_across_dispatches() {
        let mut engine: Engine = Engine::new();
        engine
            .add_transition(TransitionRecord::new(0, 0, 1, 1, 0))
            .unwrap();
        engine
            .add_transition(TransitionRecord::new(1, 0, 2, 0, 0))
            .unwrap();
        engine.set_initial_state(0, 0).unwrap();

        engine.process_event(1, &mut ());
        engine.process_event(2, &mut ());

        assert!(engine.scoreboard().is_marked(0));
        assert!(engine.scoreboard().is_marked(1));
        assert_eq!(engine.scoreboard().visited_count(), 2);

        engine.clear_scoreboard();
        assert_eq!(engine.scoreboard_segment(0), Some(0));
    }

    #[test]
    fn statistics_track_durations_only_for_committed_transitions() {
        let mut engine: Engine = Engine::new();
        engine
            .add_transition(TransitionRecord::new(0, 0, 1, 1, 0))
            .unwrap();
        engine.set_initial_state(0, 0).unwrap();

        engine.process_event(9, &mut ()); // no match
        let before = engine.statistics();
        assert_eq!(before.last_transition_at, None);

        engine.process_event(1, &mut ());
        let after = engine.statistics();
        assert!(after.last_transition_at.is_some());
        // Exactly one commit: every aggregate equals that sample.
        assert_eq!(after.max_duration, after.last_duration);
        assert_eq!(after.mean_duration, after.last_duration);
        assert_eq!(after.state_changes, 1);
    }
}
