//! Property tests for the judgment engine

use lane_beat::sim::{
    Difficulty, Direction, GameState, JudgeRules, Judgement, MatchPolicy, Note, NoteStatus,
    handle_input, tick,
};
use proptest::prelude::*;

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

fn rules() -> impl Strategy<Value = JudgeRules> {
    (any::<bool>(), any::<bool>(), 0u32..20).prop_map(|(nearest, reset, milestone)| JudgeRules {
        match_policy: if nearest {
            MatchPolicy::Nearest
        } else {
            MatchPolicy::FirstInOrder
        },
        reset_combo_on_miss: reset,
        combo_milestone: milestone,
    })
}

/// A press: milliseconds since the previous step and a lane
fn presses() -> impl Strategy<Value = Vec<(f64, Direction)>> {
    prop::collection::vec((0.0f64..120.0, direction()), 1..200)
}

proptest! {
    #[test]
    fn session_invariants_hold(
        difficulty in difficulty(),
        rules in rules(),
        steps in presses(),
    ) {
        let mut state = GameState::new(difficulty, rules);
        state.start();
        let mut now = 0.0;
        let mut last_max = 0;
        let mut last_score = 0;

        for (dt, dir) in steps {
            now += dt;
            tick(&mut state, now);
            let score_before = state.score;
            let (judgement, _) = handle_input(&mut state, dir, now);

            // Score moves by exactly the judgement's points
            prop_assert_eq!(state.score - score_before, judgement.points());
            prop_assert!(state.score >= last_score);
            prop_assert!(state.max_combo >= last_max);
            prop_assert!(state.max_combo >= state.combo);
            last_max = state.max_combo;
            last_score = state.score;
        }
    }

    #[test]
    fn press_matches_iff_pending_note_in_window(
        offsets in prop::collection::vec(-400.0f64..400.0, 1..6),
        lanes in prop::collection::vec(direction(), 6),
        pressed in direction(),
        nearest in any::<bool>(),
    ) {
        let rules = JudgeRules {
            match_policy: if nearest { MatchPolicy::Nearest } else { MatchPolicy::FirstInOrder },
            ..Default::default()
        };
        let mut state = GameState::new(Difficulty::Medium, rules);
        state.start();
        let now = 10_000.0;
        for (i, offset) in offsets.iter().enumerate() {
            let id = state.next_note_id();
            state.notes.push(Note::new(id, lanes[i], now + offset, 0));
        }
        let window = state.profile().judgment_window_ms;
        let matchable: Vec<f64> = state
            .notes
            .iter()
            .filter(|n| n.direction == pressed && (now - n.time).abs() <= window)
            .map(|n| (now - n.time).abs())
            .collect();
        let before = state.clone();

        let (judgement, _) = handle_input(&mut state, pressed, now);

        if matchable.is_empty() {
            prop_assert_eq!(judgement, Judgement::Miss);
            prop_assert_eq!(state.score, before.score);
            prop_assert_eq!(state.combo, before.combo);
            prop_assert!(state.notes.iter().all(|n| n.is_pending()));
        } else {
            let hit: Vec<&Note> = state.notes.iter().filter(|n| n.is_hit()).collect();
            prop_assert_eq!(hit.len(), 1);
            let diff = (now - hit[0].time).abs();
            let expected = if diff < window / 2.0 { Judgement::Perfect } else { Judgement::Good };
            prop_assert_eq!(judgement, expected);
            prop_assert_eq!(state.combo, before.combo + 1);
            if nearest {
                let best = matchable.iter().cloned().fold(f64::INFINITY, f64::min);
                prop_assert_eq!(diff, best);
            }
        }
    }

    #[test]
    fn resolved_notes_never_change(
        steps in presses(),
    ) {
        let mut state = GameState::new(Difficulty::Hard, JudgeRules::default());
        state.start();
        let mut resolved: Vec<(u64, NoteStatus)> = Vec::new();
        let mut now = 0.0;

        for (dt, dir) in steps {
            now += dt;
            tick(&mut state, now);
            handle_input(&mut state, dir, now);

            for note in &state.notes {
                if let Some((_, status)) = resolved.iter().find(|(id, _)| *id == note.id) {
                    prop_assert_eq!(*status, note.status);
                } else if !note.is_pending() {
                    resolved.push((note.id, note.status));
                }
            }
        }
    }
}
