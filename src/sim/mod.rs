//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time is passed in by the caller (session milliseconds)
//! - Patterns are cycled in a fixed order
//! - Notes are judged in insertion order
//! - No rendering or platform dependencies

pub mod difficulty;
pub mod note;
pub mod pattern;
pub mod state;
pub mod tick;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use note::{Direction, Note, NoteStatus};
pub use pattern::{ButtonPattern, PATTERNS, Pattern, pattern_due};
pub use state::{
    GameEvent, GamePhase, GameState, GameStats, JudgeRules, Judgement, MatchPolicy,
};
pub use tick::{handle_input, tick};
