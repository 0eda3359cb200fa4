//! Note geometry and colours
//!
//! Notes fall from the top edge toward the hit line; a note sits exactly
//! on the hit line at its target time.

use glam::Vec2;

use crate::consts::{GAME_HEIGHT, HIT_LINE_OFFSET, LANE_WIDTH, NOTE_RETAIN_MS, NOTE_SIZE};
use crate::sim::{Direction, Note, NoteStatus};

/// Hit feedback colours
pub const HIT_COLOR: [f32; 4] = [0.298, 0.686, 0.314, 1.0]; // #4CAF50
pub const MISS_COLOR: [f32; 4] = [0.957, 0.263, 0.212, 1.0]; // #f44336

/// Y coordinate of the hit line
#[inline]
pub fn hit_line_y() -> f32 {
    GAME_HEIGHT - HIT_LINE_OFFSET
}

/// X coordinate of the centre of a lane
#[inline]
pub fn lane_center_x(direction: Direction) -> f32 {
    direction.lane() as f32 * LANE_WIDTH + LANE_WIDTH / 2.0
}

/// Screen position of a note centre at session time `now`
pub fn note_position(note: &Note, now: f64, note_speed: f32) -> Vec2 {
    let ms_until_hit = (note.time - now) as f32;
    Vec2::new(
        lane_center_x(note.direction),
        hit_line_y() - ms_until_hit * note_speed / 1000.0,
    )
}

/// Whether any part of a note at `y` is on screen
#[inline]
pub fn is_visible(y: f32) -> bool {
    y + NOTE_SIZE / 2.0 >= 0.0 && y - NOTE_SIZE / 2.0 <= GAME_HEIGHT
}

/// Opacity of a note; resolved notes fade out over the retention window
pub fn note_alpha(note: &Note, now: f64) -> f32 {
    if note.is_pending() {
        return 1.0;
    }
    let remaining = 1.0 - (now - note.time) / NOTE_RETAIN_MS;
    remaining.clamp(0.0, 1.0) as f32
}

/// Base lane colour
pub fn lane_color(direction: Direction) -> [f32; 4] {
    match direction {
        Direction::Up => [1.0, 0.0, 0.0, 1.0],
        Direction::Down => [0.0, 1.0, 0.0, 1.0],
        Direction::Left => [0.0, 0.0, 1.0, 1.0],
        Direction::Right => [1.0, 1.0, 0.0, 1.0],
    }
}

/// Colour of a note, by lane while pending and by outcome once resolved
pub fn note_color(note: &Note) -> [f32; 4] {
    match note.status {
        NoteStatus::Pending => lane_color(note.direction),
        NoteStatus::Hit => HIT_COLOR,
        NoteStatus::Missed => MISS_COLOR,
    }
}

/// Format an RGBA colour for a canvas fill/stroke style
pub fn css_rgba(color: [f32; 4]) -> String {
    let [r, g, b, a] = color;
    format!(
        "rgba({}, {}, {}, {:.3})",
        (r.clamp(0.0, 1.0) * 255.0).round() as u8,
        (g.clamp(0.0, 1.0) * 255.0).round() as u8,
        (b.clamp(0.0, 1.0) * 255.0).round() as u8,
        a.clamp(0.0, 1.0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_on_hit_line_at_target_time() {
        let note = Note::new(1, Direction::Left, 1500.0, 0);
        let pos = note_position(&note, 1500.0, 500.0);
        assert_eq!(pos, Vec2::new(250.0, hit_line_y()));
    }

    #[test]
    fn test_note_falls_at_speed() {
        let note = Note::new(1, Direction::Up, 1000.0, 0);
        // One second early at 500 px/s: 500px above the line
        let early = note_position(&note, 0.0, 500.0);
        assert_eq!(early.y, hit_line_y() - 500.0);
        // Later notes are lower on screen
        let later = note_position(&note, 500.0, 500.0);
        assert!(later.y > early.y);
    }

    #[test]
    fn test_visibility() {
        assert!(is_visible(0.0));
        assert!(is_visible(GAME_HEIGHT));
        assert!(!is_visible(-NOTE_SIZE));
        assert!(!is_visible(GAME_HEIGHT + NOTE_SIZE));
    }

    #[test]
    fn test_resolved_notes_fade() {
        let mut note = Note::new(1, Direction::Down, 0.0, 0);
        assert_eq!(note_alpha(&note, 500.0), 1.0);
        note.status = NoteStatus::Missed;
        assert!((note_alpha(&note, 500.0) - 0.5).abs() < 1e-6);
        assert_eq!(note_alpha(&note, 2000.0), 0.0);
        assert_eq!(note_color(&note), MISS_COLOR);
    }

    #[test]
    fn test_css_rgba() {
        assert_eq!(css_rgba([1.0, 0.0, 0.0, 1.0]), "rgba(255, 0, 0, 1.000)");
        assert_eq!(css_rgba([0.0, 1.0, 0.0, 0.5]), "rgba(0, 255, 0, 0.500)");
    }
}
