#![forbid(unsafe_code)]

//! Demo phase tracking: the Idle / Running / Completed state machine.
//!
//! One [`PhaseTracker`] is owned by the sequence controller and queried at
//! every entry point, replacing ambient mutable flags. Transitions:
//!
//! - Idle → Running via [`PhaseTracker::try_begin`] (rejected otherwise)
//! - Running → Completed via [`PhaseTracker::finish`]
//! - Completed → Idle via [`PhaseTracker::reset`]
//!
//! # Invariants
//!
//! 1. `try_begin` succeeds only from Idle; a running or completed sequence
//!    blocks any further trigger.
//! 2. `reset` from Idle is a safe no-op (returns `false`, state unchanged).
//! 3. `reset` never interrupts a running sequence.

/// Position of the sequence controller in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No sequence has run since the last reset.
    #[default]
    Idle,
    /// A sequence is in flight.
    Running,
    /// The sequence ran to completion; only reset can rearm it.
    Completed,
}

/// Guarded owner of the current [`Phase`].
#[derive(Debug, Clone, Default)]
pub struct PhaseTracker {
    phase: Phase,
}

impl PhaseTracker {
    /// Start in `Idle`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    #[inline]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.phase == Phase::Completed
    }

    /// Attempt Idle → Running. Returns `false` (state unchanged) if a
    /// sequence is already running or has already completed.
    pub fn try_begin(&mut self) -> bool {
        if self.phase == Phase::Idle {
            self.phase = Phase::Running;
            true
        } else {
            false
        }
    }

    /// Running → Completed. Returns `false` if not running.
    pub fn finish(&mut self) -> bool {
        if self.phase == Phase::Running {
            self.phase = Phase::Completed;
            true
        } else {
            false
        }
    }

    /// Completed → Idle. A reset from Idle is a no-op; a reset while
    /// running is rejected.
    pub fn reset(&mut self) -> bool {
        if self.phase == Phase::Completed {
            self.phase = Phase::Idle;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let t = PhaseTracker::new();
        assert_eq!(t.phase(), Phase::Idle);
        assert!(t.is_idle());
        assert!(!t.is_running());
        assert!(!t.is_completed());
    }

    #[test]
    fn begin_from_idle() {
        let mut t = PhaseTracker::new();
        assert!(t.try_begin());
        assert!(t.is_running());
    }

    #[test]
    fn begin_rejected_while_running() {
        let mut t = PhaseTracker::new();
        assert!(t.try_begin());
        assert!(!t.try_begin());
        assert!(t.is_running());
    }

    #[test]
    fn begin_rejected_after_completion() {
        let mut t = PhaseTracker::new();
        t.try_begin();
        t.finish();
        assert!(!t.try_begin());
        assert!(t.is_completed());
    }

    #[test]
    fn finish_only_from_running() {
        let mut t = PhaseTracker::new();
        assert!(!t.finish());
        t.try_begin();
        assert!(t.finish());
        assert!(!t.finish());
    }

    #[test]
    fn reset_from_completed_rearms() {
        let mut t = PhaseTracker::new();
        t.try_begin();
        t.finish();
        assert!(t.reset());
        assert!(t.is_idle());
        assert!(t.try_begin());
    }

    #[test]
    fn reset_from_idle_is_noop() {
        let mut t = PhaseTracker::new();
        assert!(!t.reset());
        assert!(t.is_idle());
    }

    #[test]
    fn reset_rejected_while_running() {
        let mut t = PhaseTracker::new();
        t.try_begin();
        assert!(!t.reset());
        assert!(t.is_running());
    }
}
