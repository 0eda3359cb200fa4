//! Game state and core simulation types
//!
//! The whole play session lives in one `GameState` aggregate that the
//! scheduler and judgment engine mutate through `tick` / `handle_input`.

use serde::{Deserialize, Serialize};

use super::difficulty::{Difficulty, DifficultyProfile};
use super::note::{Direction, Note};
use crate::consts::{GOOD_POINTS, PERFECT_POINTS};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start prompt shown, nothing scheduled
    #[default]
    Ready,
    /// Active gameplay
    Playing,
    /// Clock frozen, input ignored
    Paused,
    /// Session over, results shown
    Finished,
}

/// How to pick between several pending notes of the same lane inside the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// First matching note in insertion order
    #[default]
    FirstInOrder,
    /// Matching note closest to the press time (ties go to the earlier note)
    Nearest,
}

impl MatchPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "first" | "first_in_order" | "order" => Some(MatchPolicy::FirstInOrder),
            "nearest" | "closest" => Some(MatchPolicy::Nearest),
            _ => None,
        }
    }
}

/// Judgment rule switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeRules {
    pub match_policy: MatchPolicy,
    /// Reset the combo when a note expires unhit
    pub reset_combo_on_miss: bool,
    /// Emit a milestone event every N combo (0 disables)
    pub combo_milestone: u32,
}

impl Default for JudgeRules {
    fn default() -> Self {
        Self {
            match_policy: MatchPolicy::FirstInOrder,
            reset_combo_on_miss: false,
            combo_milestone: 10,
        }
    }
}

/// Result of a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Judgement {
    Perfect,
    Good,
    Miss,
}

impl Judgement {
    pub fn points(&self) -> u64 {
        match self {
            Judgement::Perfect => PERFECT_POINTS,
            Judgement::Good => GOOD_POINTS,
            Judgement::Miss => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Judgement::Perfect => "Perfect",
            Judgement::Good => "Good",
            Judgement::Miss => "Miss",
        }
    }
}

/// Per-session tallies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub perfect: u32,
    pub good: u32,
    /// Notes that expired unhit
    pub miss: u32,
    /// Key presses that matched no note
    pub ghost_taps: u32,
    pub max_combo: u32,
    pub score: u64,
}

impl GameStats {
    /// Accuracy in percent over judged notes (perfect counts double)
    pub fn accuracy(&self) -> f64 {
        let judged = (self.perfect + self.good + self.miss) as f64;
        if judged == 0.0 {
            return 0.0;
        }
        let earned = self.perfect as f64 * 2.0 + self.good as f64;
        earned / (judged * 2.0) * 100.0
    }
}

/// Things that happened during a tick or key press, for audio and visuals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PatternEmitted { pattern_index: usize, at: f64 },
    NoteMissed { id: u64, direction: Direction },
    NoteJudged {
        id: u64,
        direction: Direction,
        judgement: Judgement,
        /// Signed press offset (positive = late)
        offset_ms: f64,
    },
    GhostTap { direction: Direction },
    ComboMilestone { combo: u32 },
    ComboBroken { combo: u32 },
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub score: u64,
    /// Consecutive hits
    pub combo: u32,
    /// High-water mark of `combo`
    pub max_combo: u32,
    /// Active notes in insertion order
    pub notes: Vec<Note>,
    pub phase: GamePhase,
    /// Session clock (ms) as of the last tick
    pub current_time: f64,
    /// Pattern the scheduler emits next
    pub pattern_index: usize,
    /// Session time of the last pattern emission
    pub last_emission: Option<f64>,
    pub difficulty: Difficulty,
    pub rules: JudgeRules,
    pub stats: GameStats,
    next_id: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Difficulty::default(), JudgeRules::default())
    }
}

impl GameState {
    pub fn new(difficulty: Difficulty, rules: JudgeRules) -> Self {
        Self {
            score: 0,
            combo: 0,
            max_combo: 0,
            notes: Vec::new(),
            phase: GamePhase::Ready,
            current_time: 0.0,
            pattern_index: 0,
            last_emission: None,
            difficulty,
            rules,
            stats: GameStats::default(),
            next_id: 1,
        }
    }

    /// Reset the session and begin playing from session time 0
    pub fn start(&mut self) {
        *self = Self::new(self.difficulty, self.rules);
        self.phase = GamePhase::Playing;
    }

    /// Playing <-> Paused. Other phases are left alone.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }

    /// End the session. Remaining notes are dropped.
    pub fn finish(&mut self) {
        if matches!(self.phase, GamePhase::Playing | GamePhase::Paused) {
            self.phase = GamePhase::Finished;
            self.notes.clear();
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Timing values for the selected difficulty
    #[inline]
    pub fn profile(&self) -> DifficultyProfile {
        self.difficulty.profile()
    }

    /// Allocate a new note ID
    pub fn next_note_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Number of unresolved notes
    pub fn pending_count(&self) -> usize {
        self.notes.iter().filter(|n| n.is_pending()).count()
    }
}
