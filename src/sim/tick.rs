//! Frame tick and key-press judgment
//!
//! `tick` runs once per animation frame: it fires due patterns, expires
//! overdue notes and evicts faded ones. `handle_input` resolves a key press
//! against the active notes.

use super::note::{Direction, Note, NoteStatus};
use super::pattern::{PATTERNS, pattern_due};
use super::state::{GameEvent, GameState, Judgement, MatchPolicy};
use crate::consts::NOTE_RETAIN_MS;

/// Advance the session to `now` (session milliseconds)
pub fn tick(state: &mut GameState, now: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_playing() {
        return events;
    }

    state.current_time = now;
    let profile = state.profile();

    if pattern_due(state.last_emission, now, profile.pattern_interval_ms) {
        emit_pattern(state, now, &mut events);
    }

    expire_overdue(state, now, profile.judgment_window_ms, &mut events);

    // Resolved notes linger for the fade-out, then go
    state
        .notes
        .retain(|n| n.is_pending() || now - n.time < NOTE_RETAIN_MS);

    events
}

/// Spawn every note of the current pattern relative to `now` and advance the pattern index
fn emit_pattern(state: &mut GameState, now: f64, events: &mut Vec<GameEvent>) {
    let pattern_index = state.pattern_index;
    let pattern = &PATTERNS[pattern_index];

    for button in pattern.buttons {
        let id = state.next_note_id();
        state.notes.push(Note::new(
            id,
            button.direction,
            now + button.offset_ms,
            pattern_index,
        ));
    }

    state.pattern_index = (pattern_index + 1) % PATTERNS.len();
    state.last_emission = Some(now);

    log::debug!(
        "Pattern {} emitted at {:.1}ms ({} notes)",
        pattern_index,
        now,
        pattern.buttons.len()
    );
    events.push(GameEvent::PatternEmitted {
        pattern_index,
        at: now,
    });
}

/// Mark pending notes whose window has fully elapsed as missed
fn expire_overdue(state: &mut GameState, now: f64, window: f64, events: &mut Vec<GameEvent>) {
    for note in state.notes.iter_mut() {
        if !note.is_pending() || note.offset(now) <= window {
            continue;
        }

        note.status = NoteStatus::Missed;
        state.stats.miss += 1;
        events.push(GameEvent::NoteMissed {
            id: note.id,
            direction: note.direction,
        });

        if state.rules.reset_combo_on_miss && state.combo > 0 {
            events.push(GameEvent::ComboBroken { combo: state.combo });
            state.combo = 0;
        }
    }
}

/// Resolve a key press in `direction` at session time `now`.
///
/// Returns `Judgement::Miss` for a press that matched nothing, or for any
/// press while the session is not playing (which also yields no events).
pub fn handle_input(
    state: &mut GameState,
    direction: Direction,
    now: f64,
) -> (Judgement, Vec<GameEvent>) {
    let mut events = Vec::new();
    if !state.is_playing() {
        return (Judgement::Miss, events);
    }

    let window = state.profile().judgment_window_ms;
    let Some(idx) = find_match(&state.notes, direction, now, window, state.rules.match_policy)
    else {
        state.stats.ghost_taps += 1;
        events.push(GameEvent::GhostTap { direction });
        return (Judgement::Miss, events);
    };

    let note = &mut state.notes[idx];
    let offset_ms = note.offset(now);
    let judgement = if offset_ms.abs() < window / 2.0 {
        Judgement::Perfect
    } else {
        Judgement::Good
    };
    note.status = NoteStatus::Hit;
    let id = note.id;

    state.score += judgement.points();
    state.combo += 1;
    state.max_combo = state.max_combo.max(state.combo);
    match judgement {
        Judgement::Perfect => state.stats.perfect += 1,
        Judgement::Good => state.stats.good += 1,
        Judgement::Miss => {}
    }
    state.stats.score = state.score;
    state.stats.max_combo = state.max_combo;

    events.push(GameEvent::NoteJudged {
        id,
        direction,
        judgement,
        offset_ms,
    });

    let milestone = state.rules.combo_milestone;
    if milestone > 0 && state.combo % milestone == 0 {
        events.push(GameEvent::ComboMilestone { combo: state.combo });
    }

    (judgement, events)
}

/// Index of the pending note in `direction` that a press at `now` resolves
fn find_match(
    notes: &[Note],
    direction: Direction,
    now: f64,
    window: f64,
    policy: MatchPolicy,
) -> Option<usize> {
    let mut candidates = notes.iter().enumerate().filter(|(_, n)| {
        n.is_pending() && n.direction == direction && n.offset(now).abs() <= window
    });

    match policy {
        MatchPolicy::FirstInOrder => candidates.next().map(|(i, _)| i),
        MatchPolicy::Nearest => candidates
            .min_by(|(_, a), (_, b)| {
                a.offset(now)
                    .abs()
                    .partial_cmp(&b.offset(now).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i),
    }
}
