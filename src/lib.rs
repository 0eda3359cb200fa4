//! Lane Beat - A four-lane arrow-key rhythm game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pattern scheduling, judgment, scoring)
//! - `renderer`: Note layout and Canvas2D drawing
//! - `platform`: Browser/native platform abstraction (keys, clock, devices)
//! - `settings`: Runtime configuration

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{Difficulty, Direction, GameState};

/// Game configuration constants
pub mod consts {
    /// Number of lanes (one per direction)
    pub const LANE_COUNT: usize = 4;
    /// Lane width in pixels
    pub const LANE_WIDTH: f32 = 100.0;
    /// Playfield height in pixels
    pub const GAME_HEIGHT: f32 = 600.0;
    /// Playfield width in pixels
    pub const GAME_WIDTH: f32 = LANE_COUNT as f32 * LANE_WIDTH;
    /// Distance of the hit line from the bottom edge
    pub const HIT_LINE_OFFSET: f32 = 100.0;
    /// Rendered note diameter
    pub const NOTE_SIZE: f32 = 50.0;
    /// Lane button size and margin
    pub const BUTTON_SIZE: f32 = 80.0;
    pub const BUTTON_MARGIN: f32 = 10.0;

    /// Points for a press within half the judgment window
    pub const PERFECT_POINTS: u64 = 100;
    /// Points for any other press inside the judgment window
    pub const GOOD_POINTS: u64 = 50;

    /// Resolved notes stay in the active set this long after their target time (fade-out)
    pub const NOTE_RETAIN_MS: f64 = 1000.0;
    /// How long a lane button stays lit after a key press
    pub const FLASH_MS: i32 = 100;
}
