//! Rendering module
//!
//! `layout` maps notes to screen space and picks their colours; it has no
//! platform dependencies. `canvas` draws a frame with Canvas2D (web only).

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod layout;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use layout::{css_rgba, hit_line_y, lane_center_x, note_alpha, note_color, note_position};
