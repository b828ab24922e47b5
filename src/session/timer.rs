use serde::{Deserialize, Serialize};

use crate::pattern::{BreathPhase, BreathingPattern};

/// Snapshot of a timer-driven session, consumed read-only by presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Whether the session is currently running
    pub is_active: bool,

    /// Whether ticking is suspended
    pub is_paused: bool,

    /// Phase the session is currently in
    pub current_phase: BreathPhase,

    /// 1-based cycle index; 0 before the first inhale
    pub current_cycle: u32,

    /// Total cycles configured for the session
    pub total_cycles: u32,

    /// Whole seconds left in the current phase
    pub phase_time_remaining: u32,

    /// Whole seconds left in the whole session (including preparation)
    pub total_time_remaining: u32,
}

/// Result of one tick, surfaced so the owner can log transitions and
/// record completion exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing visible changed (mid-phase, or session paused/inactive)
    Running,

    /// The session crossed into a new phase
    PhaseChanged(BreathPhase),

    /// The session finished; no further ticks will mutate state
    Completed,
}

/// Timer-driven session controller.
///
/// Advances a breathing session one second at a time, independent of any
/// audio. All state lives in the single owning instance; the tick is pure
/// integer arithmetic over a finite phase machine.
#[derive(Debug, Clone)]
pub struct TimerSession {
    pattern: BreathingPattern,
    preparation_secs: u32,
    state: SessionState,
}

impl TimerSession {
    pub fn new(pattern: BreathingPattern, preparation_secs: u32) -> Self {
        Self {
            pattern,
            preparation_secs,
            state: Self::rest_state(&pattern, preparation_secs),
        }
    }

    /// The at-rest state used at construction and restored by `stop()`.
    fn rest_state(pattern: &BreathingPattern, preparation_secs: u32) -> SessionState {
        SessionState {
            is_active: false,
            is_paused: false,
            current_phase: BreathPhase::Inhale,
            current_cycle: 0,
            total_cycles: pattern.cycles,
            phase_time_remaining: pattern.inhale_secs,
            total_time_remaining: pattern.total_secs() + preparation_secs,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn pattern(&self) -> &BreathingPattern {
        &self.pattern
    }

    /// (Re)start the session from the beginning.
    pub fn start(&mut self) {
        let (phase, cycle, phase_remaining) = if self.preparation_secs > 0 {
            (BreathPhase::Prepare, 0, self.preparation_secs)
        } else {
            (BreathPhase::Inhale, 1, self.pattern.inhale_secs)
        };

        self.state = SessionState {
            is_active: true,
            is_paused: false,
            current_phase: phase,
            current_cycle: cycle,
            total_cycles: self.pattern.cycles,
            phase_time_remaining: phase_remaining,
            total_time_remaining: self.pattern.total_secs() + self.preparation_secs,
        };
    }

    pub fn pause(&mut self) {
        if self.state.is_active {
            self.state.is_paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.state.is_active {
            self.state.is_paused = false;
        }
    }

    /// Discard all progress and return to the rest state.
    pub fn stop(&mut self) {
        self.state = Self::rest_state(&self.pattern, self.preparation_secs);
    }

    /// Advance the session by one second.
    ///
    /// Must be invoked once per whole second while the session runs; does
    /// nothing while inactive or paused.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_active || self.state.is_paused {
            return TickOutcome::Running;
        }

        self.state.phase_time_remaining = self.state.phase_time_remaining.saturating_sub(1);
        self.state.total_time_remaining = self.state.total_time_remaining.saturating_sub(1);

        if self.state.total_time_remaining == 0 {
            self.state.current_phase = BreathPhase::Complete;
            self.state.is_active = false;
            return TickOutcome::Completed;
        }

        if self.state.phase_time_remaining == 0 {
            let next = self.advance_phase();
            return TickOutcome::PhaseChanged(next);
        }

        TickOutcome::Running
    }

    /// Move to the next phase in the fixed cycle order, skipping
    /// zero-duration holds, and update the cycle counter.
    ///
    /// The prepare→inhale transition assigns cycle 1; a later re-entry
    /// into inhale (from exhale or hold-out) increments it. The asymmetry
    /// is deliberate and load-bearing for the cycle display.
    fn advance_phase(&mut self) -> BreathPhase {
        let next = match self.state.current_phase {
            BreathPhase::Prepare => {
                self.state.current_cycle = 1;
                BreathPhase::Inhale
            }
            BreathPhase::Inhale => {
                if self.pattern.hold_in_secs > 0 {
                    BreathPhase::HoldIn
                } else {
                    BreathPhase::Exhale
                }
            }
            BreathPhase::HoldIn => BreathPhase::Exhale,
            BreathPhase::Exhale => {
                if self.pattern.hold_out_secs > 0 {
                    BreathPhase::HoldOut
                } else {
                    self.state.current_cycle += 1;
                    BreathPhase::Inhale
                }
            }
            BreathPhase::HoldOut => {
                self.state.current_cycle += 1;
                BreathPhase::Inhale
            }
            // Terminal and pre-session states never reach advance_phase
            phase @ (BreathPhase::Idle | BreathPhase::Complete) => phase,
        };

        self.state.current_phase = next;
        self.state.phase_time_remaining = self.pattern.phase_secs(next);
        next
    }
}
