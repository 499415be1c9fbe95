//! One structure, its latest trace and the undo history, kept in lockstep.

use algolens_core::StepTrace;
use algolens_history::History;
use tracing::info;

use crate::playback::Playback;

/// Session for a single visualized structure.
///
/// Each completed operation commits the structure's new state and its trace
/// together: the state becomes the newest history snapshot and the trace
/// replaces the previous one, with the playback cursor rewound. Undo and
/// redo move only through states; the trace that produced a restored state
/// is gone, so they clear playback rather than replaying it.
pub struct Session<S: PartialEq> {
    history: History<S>,
    trace: StepTrace,
    playback: Playback,
}

impl<S: PartialEq> Session<S> {
    /// Session at `initial` with an empty trace.
    pub fn new(initial: S) -> Self {
        Self {
            history: History::new(initial),
            trace: StepTrace::new(),
            playback: Playback::new(0),
        }
    }

    /// The current structure state.
    pub fn state(&self) -> &S {
        self.history.state()
    }

    /// The trace of the most recent operation.
    pub fn trace(&self) -> &StepTrace {
        &self.trace
    }

    /// The playback cursor over the current trace.
    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    /// Mutable playback access for the driving UI loop.
    pub fn playback_mut(&mut self) -> &mut Playback {
        &mut self.playback
    }

    /// The undo history over structure states.
    pub fn history(&self) -> &History<S> {
        &self.history
    }

    /// Commits a completed operation: `state` is the structure after the
    /// operation and `trace` is what it emitted. A state equal to the
    /// current one still installs the new trace (a failed search mutates
    /// nothing but is worth replaying).
    pub fn commit(&mut self, state: S, trace: StepTrace) {
        info!(steps = trace.len(), "commit operation");
        self.history.set(state);
        self.playback.load(trace.len());
        self.trace = trace;
    }

    /// Restores the previous state, discarding the current trace.
    pub fn undo(&mut self) -> bool {
        if self.history.undo() {
            self.clear_trace();
            true
        } else {
            false
        }
    }

    /// Re-applies an undone state, discarding the current trace.
    pub fn redo(&mut self) -> bool {
        if self.history.redo() {
            self.clear_trace();
            true
        } else {
            false
        }
    }

    /// Drops history and trace, keeping only `state`.
    pub fn reset(&mut self, state: S) {
        self.history.reset(state);
        self.clear_trace();
    }

    fn clear_trace(&mut self) {
        self.trace = StepTrace::new();
        self.playback.load(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_installs_state_and_trace() {
        let mut session = Session::new(vec![1]);
        let mut trace = StepTrace::new();
        trace.push_message("Inserted 2.", 1);
        session.commit(vec![1, 2], trace);

        assert_eq!(session.state(), &vec![1, 2]);
        assert_eq!(session.trace().len(), 1);
        assert_eq!(session.playback().len(), 1);
        assert_eq!(session.playback().cursor(), None);
    }

    #[test]
    fn test_undo_restores_state_and_clears_trace() {
        let mut session = Session::new(vec![1]);
        let mut trace = StepTrace::new();
        trace.push_message("Inserted 2.", 1);
        session.commit(vec![1, 2], trace);

        assert!(session.undo());
        assert_eq!(session.state(), &vec![1]);
        assert!(session.trace().is_empty());
        assert_eq!(session.playback().len(), 0);
    }

    #[test]
    fn test_redo_after_undo_round_trips_state() {
        let mut session = Session::new(0);
        session.commit(1, StepTrace::new());
        session.undo();
        assert!(session.redo());
        assert_eq!(session.state(), &1);
        assert!(!session.redo());
    }

    #[test]
    fn test_commit_with_unchanged_state_still_replaces_trace() {
        let mut session = Session::new(7);
        let mut trace = StepTrace::new();
        trace.push_message("Value 9 not found.", 4);
        trace.push_message("Search complete.", 5);
        session.commit(7, trace);

        assert_eq!(session.trace().len(), 2);
        // No new history snapshot for an identical state.
        assert!(!session.undo());
    }
}
