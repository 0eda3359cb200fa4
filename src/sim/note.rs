//! Notes and lane directions

use serde::{Deserialize, Serialize};

/// One of the four lanes a note can travel down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in lane order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Lane index (0 = leftmost)
    pub fn lane(&self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Resolution state of a note. `Hit` and `Missed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NoteStatus {
    #[default]
    Pending,
    Hit,
    Missed,
}

/// A scheduled hit target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,
    pub direction: Direction,
    /// Absolute session time (ms) at which the note should be hit
    pub time: f64,
    pub status: NoteStatus,
    /// Index of the pattern that emitted this note
    pub pattern_index: usize,
}

impl Note {
    pub fn new(id: u64, direction: Direction, time: f64, pattern_index: usize) -> Self {
        Self {
            id,
            direction,
            time,
            status: NoteStatus::Pending,
            pattern_index,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == NoteStatus::Pending
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.status == NoteStatus::Hit
    }

    #[inline]
    pub fn is_missed(&self) -> bool {
        self.status == NoteStatus::Missed
    }

    /// Signed offset of `now` from the target time (positive = late)
    #[inline]
    pub fn offset(&self, now: f64) -> f64 {
        now - self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lanes_are_distinct_and_ordered() {
        let lanes: Vec<usize> = Direction::ALL.iter().map(|d| d.lane()).collect();
        assert_eq!(lanes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_new_note_is_pending() {
        let note = Note::new(7, Direction::Left, 1000.0, 0);
        assert!(note.is_pending());
        assert!(!note.is_hit());
        assert!(!note.is_missed());
        assert_eq!(note.offset(1040.0), 40.0);
        assert_eq!(note.offset(960.0), -40.0);
    }
}
