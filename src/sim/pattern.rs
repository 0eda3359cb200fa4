//! Static note patterns, replayed round-robin

use super::note::Direction;
use Direction::*;

/// A single button press relative to its pattern's start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonPattern {
    pub direction: Direction,
    pub offset_ms: f64,
}

/// An ordered group of button presses
#[derive(Debug, Clone, Copy)]
pub struct Pattern {
    pub buttons: &'static [ButtonPattern],
    /// Nominal length of the pattern
    pub duration_ms: f64,
}

const fn b(direction: Direction, offset_ms: f64) -> ButtonPattern {
    ButtonPattern {
        direction,
        offset_ms,
    }
}

pub const PATTERNS: &[Pattern] = &[
    // Walk across all four lanes
    Pattern {
        buttons: &[b(Up, 0.0), b(Down, 500.0), b(Left, 1000.0), b(Right, 1500.0)],
        duration_ms: 2000.0,
    },
    // Vertical doubles
    Pattern {
        buttons: &[b(Up, 0.0), b(Up, 250.0), b(Down, 500.0), b(Down, 750.0)],
        duration_ms: 2000.0,
    },
    // Horizontal trill
    Pattern {
        buttons: &[b(Left, 0.0), b(Right, 250.0), b(Left, 500.0), b(Right, 750.0)],
        duration_ms: 2000.0,
    },
    // Spin, twice
    Pattern {
        buttons: &[
            b(Up, 0.0),
            b(Right, 250.0),
            b(Down, 500.0),
            b(Left, 750.0),
            b(Up, 1000.0),
            b(Right, 1250.0),
            b(Down, 1500.0),
            b(Left, 1750.0),
        ],
        duration_ms: 2000.0,
    },
];

/// Whether the next pattern should fire at `now`.
///
/// The first pattern of a session fires immediately.
pub fn pattern_due(last_emission: Option<f64>, now: f64, interval_ms: f64) -> bool {
    match last_emission {
        None => true,
        Some(last) => now - last >= interval_ms,
    }
}
