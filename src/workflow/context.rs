//! Workflow context
//!
//! This module defines the run state owned by the orchestrator.

/// Phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Validating the source and discovering files
    Scanning,
    /// Dispatching the command for each discovered file
    Processing,
    /// Every file was visited, or nothing matched
    Complete,
    /// The operator cancelled the run
    Aborted,
}

/// Counters for a run
///
/// `total` is fixed when discovery finishes; `processed` grows by one per
/// visited file whatever the outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    /// Number of files discovered
    pub total: usize,
    /// Number of files visited so far
    pub processed: usize,
}

/// State of a run, mutated only by the engine
#[derive(Debug, Clone)]
pub struct RunContext {
    state: RunState,
    counters: RunCounters,
}

impl RunContext {
    /// Creates a context in the `Scanning` state
    pub fn new() -> Self {
        RunContext {
            state: RunState::Scanning,
            counters: RunCounters::default(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn counters(&self) -> RunCounters {
        self.counters
    }

    /// Fixes the total and enters `Processing`
    pub fn begin_processing(&mut self, total: usize) {
        debug_assert_eq!(self.state, RunState::Scanning);
        self.counters.total = total;
        self.state = RunState::Processing;
    }

    /// Records one visited file
    pub fn advance(&mut self) {
        debug_assert_eq!(self.state, RunState::Processing);
        debug_assert!(
            self.counters.processed < self.counters.total,
            "processed count must never exceed the total"
        );
        self.counters.processed += 1;
    }

    /// The 1-based position of the file about to be visited
    pub fn next_position(&self) -> usize {
        self.counters.processed + 1
    }

    /// Enters `Complete`
    pub fn complete(&mut self) {
        self.state = RunState::Complete;
    }

    /// Enters `Aborted`; only reachable while processing
    pub fn abort(&mut self) {
        debug_assert_eq!(self.state, RunState::Processing);
        self.state = RunState::Aborted;
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut context = RunContext::new();
        assert_eq!(context.state(), RunState::Scanning);

        context.begin_processing(2);
        assert_eq!(context.state(), RunState::Processing);
        assert_eq!(context.next_position(), 1);

        context.advance();
        context.advance();
        assert_eq!(
            context.counters(),
            RunCounters {
                total: 2,
                processed: 2
            }
        );

        context.complete();
        assert_eq!(context.state(), RunState::Complete);
    }

    #[test]
    fn test_abort_keeps_counters() {
        let mut context = RunContext::new();
        context.begin_processing(3);
        context.advance();
        context.abort();

        assert_eq!(context.state(), RunState::Aborted);
        assert_eq!(context.counters().processed, 1);
        assert_eq!(context.counters().total, 3);
    }

    #[test]
    #[should_panic(expected = "processed count must never exceed the total")]
    #[cfg(debug_assertions)]
    fn test_advance_past_total() {
        let mut context = RunContext::new();
        context.begin_processing(1);
        context.advance();
        context.advance();
    }
}
