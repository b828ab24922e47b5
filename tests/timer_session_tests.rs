// Integration tests for the timer-driven session controller
//
// These drive the tick function directly and check the phase machine's
// ordering, cycle counting, and completion properties.

use calma_sessions::{BreathPhase, BreathingPattern, TickOutcome, TimerSession};

fn run_to_completion(session: &mut TimerSession, max_ticks: u32) -> (Vec<BreathPhase>, u32) {
    let mut phases = Vec::new();
    for n in 1..=max_ticks {
        let outcome = session.tick();
        phases.push(session.state().current_phase);
        if outcome == TickOutcome::Completed {
            return (phases, n);
        }
    }
    panic!("session did not complete within {} ticks", max_ticks);
}

#[test]
fn box_breathing_completes_in_exactly_96_ticks() {
    let pattern = BreathingPattern::new(4, 4, 4, 4, 6).unwrap();
    let mut session = TimerSession::new(pattern, 0);
    session.start();

    let (_, ticks) = run_to_completion(&mut session, 200);

    assert_eq!(ticks, 96);
    assert_eq!(session.state().current_phase, BreathPhase::Complete);
    assert_eq!(session.state().total_time_remaining, 0);
    assert!(!session.state().is_active);
}

#[test]
fn preparation_extends_session_by_its_duration() {
    let pattern = BreathingPattern::new(4, 4, 4, 4, 6).unwrap();
    let mut session = TimerSession::new(pattern, 3);
    session.start();

    assert_eq!(session.state().current_phase, BreathPhase::Prepare);
    assert_eq!(session.state().current_cycle, 0);

    let (_, ticks) = run_to_completion(&mut session, 200);
    assert_eq!(ticks, 99);
}

#[test]
fn zero_holds_never_appear_as_current_phase() {
    let pattern = BreathingPattern::new(4, 0, 6, 0, 8).unwrap();
    let mut session = TimerSession::new(pattern, 0);
    session.start();

    let (phases, ticks) = run_to_completion(&mut session, 200);

    assert_eq!(ticks, 80);
    assert!(!phases.contains(&BreathPhase::HoldIn));
    assert!(!phases.contains(&BreathPhase::HoldOut));
}

#[test]
fn phase_order_follows_the_cycle() {
    let pattern = BreathingPattern::new(2, 1, 2, 1, 3).unwrap();
    let mut session = TimerSession::new(pattern, 0);
    session.start();

    let mut prev = session.state().current_phase;
    loop {
        let outcome = session.tick();
        let cur = session.state().current_phase;

        if cur != prev {
            let valid = matches!(
                (prev, cur),
                (BreathPhase::Inhale, BreathPhase::HoldIn)
                    | (BreathPhase::HoldIn, BreathPhase::Exhale)
                    | (BreathPhase::Exhale, BreathPhase::HoldOut)
                    | (BreathPhase::HoldOut, BreathPhase::Inhale)
                    | (BreathPhase::HoldOut, BreathPhase::Complete)
                    | (BreathPhase::Exhale, BreathPhase::Complete)
            );
            assert!(valid, "invalid transition {:?} -> {:?}", prev, cur);
            prev = cur;
        }

        if outcome == TickOutcome::Completed {
            break;
        }
    }
}

#[test]
fn cycle_set_on_prepare_exit_and_incremented_on_reentry() {
    let pattern = BreathingPattern::new(2, 0, 2, 0, 3).unwrap();
    let mut session = TimerSession::new(pattern, 2);
    session.start();

    assert_eq!(session.state().current_cycle, 0);

    // Two preparation ticks; the exit from prepare assigns cycle 1.
    session.tick();
    assert_eq!(session.state().current_cycle, 0);
    session.tick();
    assert_eq!(session.state().current_phase, BreathPhase::Inhale);
    assert_eq!(session.state().current_cycle, 1);

    // Each re-entry into inhale increments by exactly one.
    let mut observed = vec![1];
    loop {
        let outcome = session.tick();
        let cycle = session.state().current_cycle;
        if *observed.last().unwrap() != cycle {
            assert_eq!(cycle, observed.last().unwrap() + 1);
            observed.push(cycle);
        }
        if outcome == TickOutcome::Completed {
            break;
        }
    }
    assert_eq!(observed, vec![1, 2, 3]);
}

#[test]
fn single_cycle_pattern_completes_after_one_traversal() {
    let pattern = BreathingPattern::new(3, 2, 4, 1, 1).unwrap();
    let mut session = TimerSession::new(pattern, 0);
    session.start();

    let (_, ticks) = run_to_completion(&mut session, 50);
    assert_eq!(ticks, 10);
    assert_eq!(session.state().current_cycle, 1);
}

#[test]
fn pausing_freezes_remaining_time() {
    let pattern = BreathingPattern::new(4, 4, 4, 4, 6).unwrap();
    let mut session = TimerSession::new(pattern, 0);
    session.start();

    session.tick();
    let phase_remaining = session.state().phase_time_remaining;
    let total_remaining = session.state().total_time_remaining;

    session.pause();
    assert!(session.state().is_paused);

    for _ in 0..10 {
        let outcome = session.tick();
        assert_eq!(outcome, TickOutcome::Running);
    }

    assert_eq!(session.state().phase_time_remaining, phase_remaining);
    assert_eq!(session.state().total_time_remaining, total_remaining);

    session.resume();
    session.tick();
    assert_eq!(session.state().total_time_remaining, total_remaining - 1);
}

#[test]
fn stop_restores_the_rest_state() {
    let pattern = BreathingPattern::new(4, 4, 4, 4, 6).unwrap();
    let mut session = TimerSession::new(pattern, 0);
    session.start();

    for _ in 0..17 {
        session.tick();
    }
    session.stop();

    let state = session.state();
    assert!(!state.is_active);
    assert!(!state.is_paused);
    assert_eq!(state.current_phase, BreathPhase::Inhale);
    assert_eq!(state.current_cycle, 0);
    assert_eq!(state.phase_time_remaining, 4);
    assert_eq!(state.total_time_remaining, 96);
}

#[test]
fn restart_replaces_previous_progress() {
    let pattern = BreathingPattern::new(4, 0, 4, 0, 2).unwrap();
    let mut session = TimerSession::new(pattern, 0);
    session.start();

    for _ in 0..5 {
        session.tick();
    }
    session.start();

    assert_eq!(session.state().current_phase, BreathPhase::Inhale);
    assert_eq!(session.state().current_cycle, 1);
    assert_eq!(session.state().total_time_remaining, 16);
}

#[test]
fn ticks_are_inert_before_start() {
    let pattern = BreathingPattern::new(4, 4, 4, 4, 6).unwrap();
    let mut session = TimerSession::new(pattern, 0);

    let outcome = session.tick();
    assert_eq!(outcome, TickOutcome::Running);
    assert_eq!(session.state().total_time_remaining, 96);
    assert!(!session.state().is_active);
}
