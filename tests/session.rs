//! Whole-session behaviour driven through the public simulation API

use lane_beat::sim::{
    Difficulty, Direction, GameEvent, GamePhase, GameState, JudgeRules, Judgement, PATTERNS,
    handle_input, tick,
};

fn medium() -> GameState {
    let mut state = GameState::new(Difficulty::Medium, JudgeRules::default());
    state.start();
    state
}

#[test]
fn emissions_land_on_interval_multiples() {
    let mut state = medium();
    let interval = state.profile().pattern_interval_ms;

    for k in 0..(PATTERNS.len() * 2) {
        let at = k as f64 * interval;
        let events = tick(&mut state, at);
        assert!(events.contains(&GameEvent::PatternEmitted {
            pattern_index: k % PATTERNS.len(),
            at
        }));

        // New notes are appended after any survivors
        let pattern = &PATTERNS[k % PATTERNS.len()];
        let fresh: Vec<(Direction, f64)> = state.notes[state.notes.len() - pattern.buttons.len()..]
            .iter()
            .map(|n| (n.direction, n.time))
            .collect();
        let expected: Vec<(Direction, f64)> = pattern
            .buttons
            .iter()
            .map(|b| (b.direction, at + b.offset_ms))
            .collect();
        assert_eq!(fresh, expected, "pattern {} at {}", k, at);
        assert_eq!(state.pattern_index, (k + 1) % PATTERNS.len());
    }
}

#[test]
fn every_difficulty_waits_a_full_interval() {
    for (difficulty, interval) in [
        (Difficulty::Easy, 2500.0),
        (Difficulty::Medium, 2000.0),
        (Difficulty::Hard, 1500.0),
    ] {
        let mut state = GameState::new(difficulty, JudgeRules::default());
        state.start();
        assert_eq!(state.profile().pattern_interval_ms, interval);

        for k in 1..=PATTERNS.len() {
            let at = k as f64 * interval;
            tick(&mut state, at - interval);
            let early = tick(&mut state, at - 1.0);
            assert!(
                !early.iter().any(|e| matches!(e, GameEvent::PatternEmitted { .. })),
                "{:?} emitted 1ms early at {}",
                difficulty,
                at - 1.0
            );

            let events = tick(&mut state, at);
            let pattern_index = k % PATTERNS.len();
            assert!(
                events.contains(&GameEvent::PatternEmitted { pattern_index, at }),
                "{:?} missed emission at {}",
                difficulty,
                at
            );
            let fresh = state.notes.len() - PATTERNS[pattern_index].buttons.len();
            let times: Vec<f64> = state.notes[fresh..]
                .iter()
                .map(|n| n.time)
                .collect();
            let expected: Vec<f64> = PATTERNS[pattern_index]
                .buttons
                .iter()
                .map(|b| at + b.offset_ms)
                .collect();
            assert_eq!(times, expected);
        }
    }
}

#[test]
fn perfect_play_never_misses() {
    let mut state = medium();
    let frame = 1000.0 / 60.0;
    let end = PATTERNS.len() as f64 * state.profile().pattern_interval_ms;
    let mut pressed = 0;

    let mut now = 0.0;
    while now < end {
        tick(&mut state, now);
        let due: Vec<Direction> = state
            .notes
            .iter()
            .filter(|n| n.is_pending() && n.time <= now)
            .map(|n| n.direction)
            .collect();
        for direction in due {
            let (judgement, _) = handle_input(&mut state, direction, now);
            assert_eq!(judgement, Judgement::Perfect);
            pressed += 1;
        }
        now += frame;
    }

    assert_eq!(state.stats.miss, 0);
    assert_eq!(state.stats.perfect, pressed);
    assert_eq!(state.combo as usize, pressed as usize);
    assert_eq!(state.max_combo, state.combo);
    assert_eq!(state.score, pressed as u64 * 100);
}

#[test]
fn idle_session_misses_everything_and_stays_bounded() {
    let mut state = medium();
    let interval = state.profile().pattern_interval_ms;
    let mut now = 0.0;
    let mut peak = 0;
    while now < 20.0 * interval {
        tick(&mut state, now);
        peak = peak.max(state.notes.len());
        now += 10.0;
    }

    assert_eq!(state.score, 0);
    assert_eq!(state.combo, 0);
    assert!(state.stats.miss > 0);
    assert!(state.notes.iter().all(|n| !n.is_hit()));
    // Old notes are evicted, so the active set never grows past a couple of patterns
    assert!(peak <= 16, "peak active notes {}", peak);
}

#[test]
fn finished_session_is_inert_until_restart() {
    let mut state = medium();
    tick(&mut state, 0.0);
    handle_input(&mut state, Direction::Up, 0.0);
    state.finish();
    assert_eq!(state.phase, GamePhase::Finished);

    assert!(tick(&mut state, 2000.0).is_empty());
    assert!(state.notes.is_empty());
    assert_eq!(state.score, 100);

    state.start();
    assert_eq!(state.score, 0);
    tick(&mut state, 0.0);
    assert_eq!(state.pending_count(), PATTERNS[0].buttons.len());
}
