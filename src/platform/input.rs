//! Keyboard mapping
//!
//! Arrow keys and WASD both drive the four lanes.

use crate::sim::{Direction, GamePhase};

/// Non-lane keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start (or restart) a session
    Start,
    /// Toggle pause
    Pause,
    /// End the session and show results
    Quit,
}

/// Map a `KeyboardEvent.key` value to a lane
pub fn key_to_direction(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        _ => None,
    }
}

/// Map a `KeyboardEvent.key` value to a control command
pub fn key_command(key: &str) -> Option<Command> {
    match key {
        " " | "Enter" => Some(Command::Start),
        "Escape" | "p" | "P" => Some(Command::Pause),
        "q" | "Q" => Some(Command::Quit),
        _ => None,
    }
}

/// Whether a command does anything in the given phase.
///
/// Keyboard and pointer input share this gate: a click on the playfield is
/// `Start`, so it only starts a session from the prompt screens.
pub fn command_allowed(command: Command, phase: GamePhase) -> bool {
    match command {
        Command::Start => matches!(phase, GamePhase::Ready | GamePhase::Finished),
        Command::Pause | Command::Quit => matches!(phase, GamePhase::Playing | GamePhase::Paused),
    }
}

/// Button labels for a lane: (arrow glyph, WASD letter)
pub fn key_labels(direction: Direction) -> (&'static str, &'static str) {
    match direction {
        Direction::Up => ("↑", "W"),
        Direction::Down => ("↓", "S"),
        Direction::Left => ("←", "A"),
        Direction::Right => ("→", "D"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_layouts_map_to_same_lanes() {
        for (arrow, wasd, dir) in [
            ("ArrowUp", "w", Direction::Up),
            ("ArrowDown", "s", Direction::Down),
            ("ArrowLeft", "a", Direction::Left),
            ("ArrowRight", "d", Direction::Right),
        ] {
            assert_eq!(key_to_direction(arrow), Some(dir));
            assert_eq!(key_to_direction(wasd), Some(dir));
            assert_eq!(key_to_direction(&wasd.to_uppercase()), Some(dir));
        }
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(key_to_direction("x"), None);
        assert_eq!(key_to_direction("Up"), None);
        assert_eq!(key_command("x"), None);
        assert_eq!(key_command("Escape"), Some(Command::Pause));
        assert_eq!(key_command(" "), Some(Command::Start));
    }

    #[test]
    fn test_start_only_from_prompt_screens() {
        assert!(command_allowed(Command::Start, GamePhase::Ready));
        assert!(command_allowed(Command::Start, GamePhase::Finished));
        assert!(!command_allowed(Command::Start, GamePhase::Playing));
        assert!(!command_allowed(Command::Start, GamePhase::Paused));
    }

    #[test]
    fn test_pause_and_quit_only_in_session() {
        for command in [Command::Pause, Command::Quit] {
            assert!(command_allowed(command, GamePhase::Playing));
            assert!(command_allowed(command, GamePhase::Paused));
            assert!(!command_allowed(command, GamePhase::Ready));
            assert!(!command_allowed(command, GamePhase::Finished));
        }
    }
}
