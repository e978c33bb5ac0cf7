//! Terminal rendering module
//!
//! Scales the playfield onto a half-block pixel buffer and draws a
//! [`FrameView`]: sky, scrolling floor, pipes, the runner and the HUD.

pub mod pixels;

use std::io::{self, Write};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH, FLOOR_TOP};
use crate::sim::{FrameView, PipeKind, Rect, RunFrame, Sprite};
use pixels::{PixelBuf, Rgb};

const SKY_TOP: Rgb = Rgb(92, 148, 252);
const SKY_BOT: Rgb = Rgb(170, 206, 255);
const BRICK: Rgb = Rgb(200, 76, 12);
const BRICK_DARK: Rgb = Rgb(150, 52, 8);
const MORTAR: Rgb = Rgb(240, 208, 176);
const PIPE_DARK: Rgb = Rgb(0, 120, 0);
const PIPE_MID: Rgb = Rgb(40, 168, 40);
const PIPE_LIGHT: Rgb = Rgb(128, 216, 16);
const CAP: Rgb = Rgb(16, 96, 16);
const SUIT: Rgb = Rgb(216, 40, 0);
const OVERALLS: Rgb = Rgb(40, 72, 200);
const SKIN: Rgb = Rgb(252, 188, 120);
const BOOTS: Rgb = Rgb(120, 64, 16);
const GHOST: Rgb = Rgb(120, 120, 120);
const WHITE: Rgb = Rgb(255, 255, 255);
const SHADOW: Rgb = Rgb(30, 30, 30);
const DIM: Rgb = Rgb(200, 200, 200);

/// World units per floor brick
const BRICK_WIDTH: f32 = 32.0;

// ── 3x5 bitmap glyphs ──────────────────────────────────────────────────────

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

#[rustfmt::skip]
const GLYPH_H: [u8; 15] = [1,0,1, 1,0,1, 1,1,1, 1,0,1, 1,0,1];
#[rustfmt::skip]
const GLYPH_I: [u8; 15] = [1,1,1, 0,1,0, 0,1,0, 0,1,0, 1,1,1];

fn draw_glyph(buf: &mut PixelBuf, x: i32, y: i32, glyph: &[u8; 15], fg: Rgb) {
    for row in 0..5 {
        for col in 0..3 {
            if glyph[row * 3 + col] == 1 {
                let px = x + col as i32;
                let py = y + row as i32;
                buf.set(px + 1, py + 1, SHADOW);
                buf.set(px, py, fg);
            }
        }
    }
}

/// Zero-padded to `width` digits; returns the x just past the last glyph
fn draw_number(buf: &mut PixelBuf, x: i32, y: i32, n: u64, width: usize, fg: Rgb) -> i32 {
    let text = format!("{:0width$}", n, width = width);
    let mut cx = x;
    for ch in text.bytes() {
        draw_glyph(buf, cx, y, &DIGITS[(ch - b'0') as usize], fg);
        cx += 4;
    }
    cx
}

/// Width in pixels of a zero-padded number
fn number_width(n: u64, width: usize) -> i32 {
    let digits = n.to_string().len().max(width) as i32;
    digits * 4 - 1
}

pub struct Renderer {
    buf: PixelBuf,
    /// Pixels per world unit on each axis
    scale_x: f32,
    scale_y: f32,
}

impl Renderer {
    /// Renderer for a terminal of `cols` x `rows` cells
    pub fn new(cols: u16, rows: u16) -> Self {
        let mut renderer = Self {
            buf: PixelBuf::new(0, 0),
            scale_x: 1.0,
            scale_y: 1.0,
        };
        renderer.resize(cols, rows);
        renderer
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        let w = usize::from(cols.max(1));
        let h = usize::from(rows.max(1)) * 2;
        self.buf.resize(w, h);
        self.scale_x = w as f32 / FIELD_WIDTH;
        self.scale_y = h as f32 / FIELD_HEIGHT;
    }

    fn px(&self, x: f32) -> i32 {
        (x * self.scale_x).round() as i32
    }

    fn py(&self, y: f32) -> i32 {
        (y * self.scale_y).round() as i32
    }

    /// World rect to pixel rect (x, y, w, h), at least one pixel each way
    fn to_pixels(&self, r: &Rect) -> (i32, i32, i32, i32) {
        let x0 = self.px(r.left());
        let y0 = self.py(r.top());
        let w = (self.px(r.right()) - x0).max(1);
        let h = (self.py(r.bottom()) - y0).max(1);
        (x0, y0, w, h)
    }

    /// Draw a frame into the buffer
    pub fn draw(&mut self, view: &FrameView, fps: Option<u32>) {
        self.draw_sky();
        self.draw_floor(view.floor_offset);
        for pipe in &view.pipes {
            self.draw_pipe(&pipe.rect, pipe.kind);
        }
        self.draw_runner(&view.player, view.sprite);
        if view.show_score {
            self.draw_scores(view.score, view.best);
        }
        if !view.game_on {
            self.draw_leaderboard(&view.leaderboard);
        }
        if let Some(fps) = fps {
            draw_number(&mut self.buf, 1, 1, u64::from(fps), 1, DIM);
        }
    }

    /// Send the buffer to the terminal
    pub fn present(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.buf.present(out)
    }

    fn draw_sky(&mut self) {
        let floor_y = self.py(FLOOR_TOP).max(1);
        let h = self.buf.height() as i32;
        let w = self.buf.width() as i32;
        for y in 0..floor_y.min(h) {
            let c = SKY_TOP.mix(SKY_BOT, y as f32 / floor_y as f32);
            self.buf.fill_rect(0, y, w, 1, c);
        }
    }

    fn draw_floor(&mut self, offset: f32) {
        let floor_y = self.py(FLOOR_TOP);
        let w = self.buf.width() as i32;
        let h = self.buf.height() as i32;
        self.buf.fill_rect(0, floor_y, w, 1, MORTAR);
        for x in 0..w {
            let wx = x as f32 / self.scale_x - offset;
            let brick = (wx / BRICK_WIDTH).floor() as i64;
            for y in floor_y + 1..h {
                let row = (y - floor_y - 1) as i64 / 2;
                let shade = if (brick + row).rem_euclid(2) == 0 {
                    BRICK
                } else {
                    BRICK_DARK
                };
                self.buf.set(x, y, shade);
            }
        }
    }

    fn draw_pipe(&mut self, rect: &Rect, kind: PipeKind) {
        let (x, y, w, h) = self.to_pixels(rect);
        let columns = match kind {
            PipeKind::Small | PipeKind::Big => 1,
            PipeKind::Twins => 2,
            PipeKind::Cluster => 3,
        };
        let col_w = (w / columns).max(1);

        for c in 0..columns {
            let cx = x + c * col_w;
            // Staggered heights inside a cluster
            let drop = if kind == PipeKind::Cluster && c % 2 == 1 {
                h / 3
            } else {
                0
            };
            let top = y + drop;
            let body_h = h - drop;
            for dx in 0..col_w {
                let shade = match dx * 4 / col_w {
                    0 => PIPE_DARK,
                    1 => PIPE_LIGHT,
                    _ => PIPE_MID,
                };
                self.buf.fill_rect(cx + dx, top, 1, body_h, shade);
            }
            self.buf.fill_rect(cx, top, col_w, 1, CAP);
        }
    }

    fn draw_runner(&mut self, rect: &Rect, sprite: Sprite) {
        let (x, y, w, h) = self.to_pixels(rect);
        if sprite == Sprite::Dead {
            self.buf.fill_rect(x, y, w, h, GHOST);
            self.buf.fill_rect(x, y, w, 1, SUIT);
            return;
        }

        // Cap, face, body, legs from top to bottom
        let band = (h / 4).max(1);
        self.buf.fill_rect(x, y, w, band, SUIT);
        self.buf.fill_rect(x, y + band, w, band, SKIN);
        self.buf.fill_rect(x, y + 2 * band, w, h - 3 * band, OVERALLS);

        let legs_y = y + h - band;
        match sprite {
            Sprite::Airborne => {
                self.buf.fill_rect(x, legs_y, 1, band, BOOTS);
                self.buf.fill_rect(x + w - 1, legs_y - 1, 1, band, BOOTS);
            }
            Sprite::Run(frame) => {
                let (left, right) = match frame {
                    RunFrame::Stride => (0, w - 1),
                    RunFrame::Passing => (w / 2, w / 2),
                    RunFrame::Reach => (w / 4, w - 1 - w / 4),
                };
                self.buf.fill_rect(x + left, legs_y, 1, band, BOOTS);
                self.buf.fill_rect(x + right, legs_y, 1, band, BOOTS);
            }
            Sprite::Dead => {}
        }
    }

    /// `HI 00042  00007` in the top right corner
    fn draw_scores(&mut self, score: u64, best: u64) {
        let w = self.buf.width() as i32;
        let total = 4 + 4 + number_width(best, 5) + 6 + number_width(score, 5);
        let mut x = (w - total - 2).max(0);
        let y = 2;
        draw_glyph(&mut self.buf, x, y, &GLYPH_H, WHITE);
        draw_glyph(&mut self.buf, x + 4, y, &GLYPH_I, WHITE);
        x += 8;
        x = draw_number(&mut self.buf, x, y, best, 5, WHITE);
        x += 6;
        draw_number(&mut self.buf, x, y, score, 5, WHITE);
    }

    /// Best finished runs stacked in the middle of the sky
    fn draw_leaderboard(&mut self, runs: &[u64]) {
        let cx = self.buf.width() as i32 / 2;
        let mut y = (self.py(FLOOR_TOP) / 3).max(8);
        for &run in runs {
            let x = cx - number_width(run, 5) / 2;
            draw_number(&mut self.buf, x, y, run, 5, WHITE);
            y += 7;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;
    use crate::tuning::Tuning;

    #[test]
    fn test_scale_follows_terminal() {
        let renderer = Renderer::new(128, 32);
        assert_eq!(renderer.buf.width(), 128);
        assert_eq!(renderer.buf.height(), 64);
        assert_eq!(renderer.px(FIELD_WIDTH), 128);
        assert_eq!(renderer.py(FIELD_HEIGHT), 64);
    }

    #[test]
    fn test_tiny_rect_still_visible() {
        let renderer = Renderer::new(10, 5);
        let (_, _, w, h) = renderer.to_pixels(&Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!((w, h), (1, 1));
    }

    #[test]
    fn test_draws_runner_on_floor() {
        let mut renderer = Renderer::new(256, 64);
        let state = GameState::new(1, Tuning::default());
        let view = FrameView::capture(&state);
        renderer.draw(&view, None);

        let (x, y, _, h) = renderer.to_pixels(&view.player);
        // Cap row is the suit color, the row under the runner is floor
        assert_eq!(renderer.buf.get(x as usize, y as usize), SUIT);
        assert_eq!(renderer.buf.get(x as usize, (y + h) as usize), MORTAR);
    }

    #[test]
    fn test_number_width_pads() {
        assert_eq!(number_width(7, 5), 19);
        assert_eq!(number_width(123456, 5), 23);
    }
}
