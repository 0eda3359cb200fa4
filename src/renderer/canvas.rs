//! Canvas2D renderer
//!
//! Draws one frame of the playfield: lanes, notes, hit line, lane buttons,
//! the score overlay and the start / pause / results prompt.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::layout::{
    css_rgba, hit_line_y, is_visible, lane_center_x, lane_color, note_alpha, note_color,
    note_position,
};
use crate::consts::*;
use crate::platform::key_labels;
use crate::sim::{Direction, GamePhase, GameState};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Size the canvas for the device pixel ratio and grab a 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        canvas.set_width((GAME_WIDTH as f64 * dpr) as u32);
        canvas.set_height((GAME_HEIGHT as f64 * dpr) as u32);
        canvas.set_attribute(
            "style",
            &format!("width:{}px; height:{}px;", GAME_WIDTH, GAME_HEIGHT),
        )?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;
        ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;

        Ok(Self { ctx })
    }

    /// Draw the full frame at session time `now`.
    ///
    /// `active` holds the lit state of each lane button, in lane order.
    pub fn render(&self, state: &GameState, now: f64, active: &[bool; LANE_COUNT]) {
        self.draw_background();
        self.draw_notes(state, now);
        self.draw_buttons(active);
        self.draw_hit_line();
        self.draw_overlay(state);
        self.draw_prompt(state);
    }

    fn draw_background(&self) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str("#1a1a1a");
        ctx.fill_rect(0.0, 0.0, GAME_WIDTH as f64, GAME_HEIGHT as f64);

        ctx.set_stroke_style_str("#333");
        ctx.set_line_width(1.0);
        for lane in 0..=LANE_COUNT {
            let x = lane as f64 * LANE_WIDTH as f64;
            ctx.begin_path();
            ctx.move_to(x, 0.0);
            ctx.line_to(x, GAME_HEIGHT as f64);
            ctx.stroke();
        }
    }

    fn draw_notes(&self, state: &GameState, now: f64) {
        let ctx = &self.ctx;
        let speed = state.profile().note_speed;

        for note in &state.notes {
            let pos = note_position(note, now, speed);
            if !is_visible(pos.y) {
                continue;
            }
            let mut color = note_color(note);
            color[3] *= note_alpha(note, now);
            let css = css_rgba(color);

            ctx.set_shadow_color(&css);
            ctx.set_shadow_blur(if note.is_pending() { 10.0 } else { 20.0 });
            ctx.set_fill_style_str(&css);
            ctx.begin_path();
            ctx.arc(pos.x as f64, pos.y as f64, NOTE_SIZE as f64 / 2.0, 0.0, TAU)
                .ok();
            ctx.fill();
        }
        ctx.set_shadow_blur(0.0);
    }

    fn draw_hit_line(&self) {
        self.ctx.set_fill_style_str("#fff");
        self.ctx
            .fill_rect(0.0, hit_line_y() as f64 - 1.0, GAME_WIDTH as f64, 2.0);
    }

    fn draw_buttons(&self, active: &[bool; LANE_COUNT]) {
        let ctx = &self.ctx;
        let strip_h = (BUTTON_SIZE + BUTTON_MARGIN * 2.0) as f64;
        let top = GAME_HEIGHT as f64 - strip_h;
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.5)");
        ctx.fill_rect(0.0, top, GAME_WIDTH as f64, strip_h);

        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        let size = BUTTON_SIZE as f64;
        for direction in Direction::ALL {
            let lit = active[direction.lane()];
            let x = lane_center_x(direction) as f64 - size / 2.0;
            let y = top + BUTTON_MARGIN as f64;
            let color = css_rgba(lane_color(direction));

            if lit {
                ctx.set_shadow_color(&color);
                ctx.set_shadow_blur(20.0);
                ctx.set_fill_style_str(&color);
            } else {
                ctx.set_fill_style_str("#333");
            }
            ctx.fill_rect(x, y, size, size);
            ctx.set_shadow_blur(0.0);

            let (arrow, wasd) = key_labels(direction);
            let cx = x + size / 2.0;
            ctx.set_fill_style_str(if lit { "#000" } else { "#fff" });
            ctx.set_font("bold 28px sans-serif");
            ctx.fill_text(arrow, cx, y + size * 0.38).ok();
            ctx.set_font("16px sans-serif");
            ctx.fill_text(wasd, cx, y + size * 0.75).ok();
        }
    }

    fn draw_overlay(&self, state: &GameState) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str("#fff");
        ctx.set_font("24px sans-serif");
        ctx.set_text_align("left");
        ctx.set_text_baseline("top");
        ctx.fill_text(&format!("Score: {}", state.score), 20.0, 20.0)
            .ok();
        ctx.fill_text(&format!("Combo: {}", state.combo), 20.0, 50.0)
            .ok();
        ctx.set_font("14px sans-serif");
        ctx.set_text_align("right");
        ctx.fill_text(state.difficulty.as_str(), GAME_WIDTH as f64 - 12.0, 20.0)
            .ok();
    }

    fn draw_prompt(&self, state: &GameState) {
        let lines: Vec<(String, &str)> = match state.phase {
            GamePhase::Playing => return,
            GamePhase::Ready => vec![
                ("Click or press Enter to start".into(), "bold 28px sans-serif"),
                ("Use Arrow Keys or WASD to play!".into(), "16px sans-serif"),
            ],
            GamePhase::Paused => vec![
                ("Paused".into(), "bold 28px sans-serif"),
                ("Esc to resume, Q to quit".into(), "16px sans-serif"),
            ],
            GamePhase::Finished => {
                let s = &state.stats;
                vec![
                    ("Results".into(), "bold 28px sans-serif"),
                    (format!("Score {}   Max combo {}", s.score, s.max_combo), "18px sans-serif"),
                    (
                        format!("Perfect {}   Good {}   Miss {}", s.perfect, s.good, s.miss),
                        "16px sans-serif",
                    ),
                    (format!("Accuracy {:.1}%", s.accuracy()), "16px sans-serif"),
                    ("Click or press Enter to play again".into(), "16px sans-serif"),
                ]
            }
        };

        let ctx = &self.ctx;
        let box_h = 40.0 + lines.len() as f64 * 32.0;
        let top = GAME_HEIGHT as f64 / 2.0 - box_h / 2.0;
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.75)");
        ctx.fill_rect(20.0, top, GAME_WIDTH as f64 - 40.0, box_h);

        ctx.set_fill_style_str("#fff");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        for (i, (text, font)) in lines.iter().enumerate() {
            ctx.set_font(font);
            ctx.fill_text(text, GAME_WIDTH as f64 / 2.0, top + 36.0 + i as f64 * 32.0)
                .ok();
        }
    }
}
