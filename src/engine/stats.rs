//! Dispatch counters and timing aggregates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Immutable snapshot of the engine's counters.
///
/// Counters are monotonic between resets. `mean_duration` is a true running
/// mean over successful transitions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Dispatch attempts, one per `process_event` call regardless of outcome.
    pub total_transitions: u64,
    /// Dispatches that did not commit: no match, invalid event, recursion
    /// guard, or a faulted action.
    pub failed_transitions: u64,
    /// Committed state mutations.
    pub state_changes: u64,
    /// Actions that ran to completion without a fault.
    pub action_executions: u64,
    /// Configuration and whole-table validation errors returned to callers.
    pub validation_errors: u64,
    /// Wall-clock duration of the most recent committed transition.
    pub last_duration: Duration,
    /// Longest committed transition seen since the last reset.
    pub max_duration: Duration,
    /// Running mean over committed transitions.
    pub mean_duration: Duration,
    /// When the most recent transition committed.
    pub last_transition_at: Option<DateTime<Utc>>,
}

/// Mutable recorder behind the snapshots.
#[derive(Clone, Debug, Default)]
pub(crate) struct StatsRecorder {
    stats: Statistics,
    duration_total_nanos: u128,
}

impl StatsRecorder {
    pub(crate) fn count_dispatch(&mut self) {
        self.stats.total_transitions += 1;
    }

    pub(crate) fn count_failure(&mut self) {
        self.stats.failed_transitions += 1;
    }

    pub(crate) fn count_action(&mut self) {
        self.stats.action_executions += 1;
    }

    pub(crate) fn count_validation_error(&mut self) {
        self.stats.validation_errors += 1;
    }

    pub(crate) fn count_state_change(&mut self, took: Duration) {
        self.stats.state_changes += 1;
        self.stats.last_duration = took;
        self.stats.max_duration = self.stats.max_duration.max(took);
        self.duration_total_nanos += took.as_nanos();
        let mean = self.duration_total_nanos / u128::from(self.stats.state_changes);
        self.stats.mean_duration = Duration::from_nanos(mean as u64);
        self.stats.last_transition_at = Some(Utc::now());
    }

    pub(crate) fn snapshot(&self) -> Statistics {
        self.stats.clone()
    }

    pub(crate) fn reset(&mut self) {
        self.stats = Statistics::default();
        self.duration_total_nanos = 0;
    }
}
