//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Key names and clicks -> lanes and commands
//! - Session time (host timestamp with pauses removed)
//! - Output device detection (headphone heuristic)

pub mod clock;
pub mod device;
pub mod input;

pub use clock::SessionClock;
pub use device::{OutputCapability, classify_output_labels, music_allowed};
pub use input::{Command, command_allowed, key_command, key_labels, key_to_direction};
