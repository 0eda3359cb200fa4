//! Difficulty presets
//!
//! Each preset supplies the timing numbers used by the scheduler,
//! the judgment engine and the note layout.

use serde::{Deserialize, Serialize};

/// Timing values for one difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Note fall speed (pixels per second)
    pub note_speed: f32,
    /// Symmetric tolerance around a note's target time (ms)
    pub judgment_window_ms: f64,
    /// Time between pattern starts (ms)
    pub pattern_interval_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" | "normal" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                note_speed: 400.0,
                judgment_window_ms: 150.0,
                pattern_interval_ms: 2500.0,
            },
            Difficulty::Medium => DifficultyProfile {
                note_speed: 500.0,
                judgment_window_ms: 100.0,
                pattern_interval_ms: 2000.0,
            },
            Difficulty::Hard => DifficultyProfile {
                note_speed: 650.0,
                judgment_window_ms: 70.0,
                pattern_interval_ms: 1500.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_roundtrip() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("insane"), None);
    }

    #[test]
    fn test_harder_is_tighter() {
        let easy = Difficulty::Easy.profile();
        let medium = Difficulty::Medium.profile();
        let hard = Difficulty::Hard.profile();
        assert!(easy.judgment_window_ms > medium.judgment_window_ms);
        assert!(medium.judgment_window_ms > hard.judgment_window_ms);
        assert!(easy.note_speed < hard.note_speed);
        assert!(easy.pattern_interval_ms > hard.pattern_interval_ms);
    }
}
