//! Pixel buffer drawn to the terminal with half-block characters
//!
//! Each terminal cell shows two vertical pixels: the foreground colors the
//! upper half (`▀`), the background the lower half. The buffer remembers what
//! the terminal already shows and only repaints cells that changed.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color},
    terminal,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    const BLACK: Rgb = Rgb(0, 0, 0);

    /// Move `t` (0.0 - 1.0) of the way toward `to`
    pub fn mix(self, to: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
        Rgb(ch(self.0, to.0), ch(self.1, to.1), ch(self.2, to.2))
    }

    fn color(self) -> Color {
        Color::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

/// The two pixels behind one terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    top: Rgb,
    bottom: Rgb,
}

/// Colors and cursor the terminal currently holds while presenting
#[derive(Default)]
struct Pen {
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    at: Option<(usize, usize)>,
}

impl Pen {
    fn paint(&mut self, out: &mut impl Write, col: usize, row: usize, cell: Cell) -> io::Result<()> {
        if self.at != Some((col, row)) {
            queue!(out, cursor::MoveTo(col as u16, row as u16))?;
        }
        if cell.top == cell.bottom {
            self.background(out, cell.top)?;
            queue!(out, style::Print(' '))?;
        } else {
            if self.fg != Some(cell.top) {
                queue!(out, style::SetForegroundColor(cell.top.color()))?;
                self.fg = Some(cell.top);
            }
            self.background(out, cell.bottom)?;
            queue!(out, style::Print('\u{2580}'))?;
        }
        self.at = Some((col + 1, row));
        Ok(())
    }

    fn background(&mut self, out: &mut impl Write, c: Rgb) -> io::Result<()> {
        if self.bg != Some(c) {
            queue!(out, style::SetBackgroundColor(c.color()))?;
            self.bg = Some(c);
        }
        Ok(())
    }
}

pub struct PixelBuf {
    width: usize,
    /// Pixel rows, twice the terminal rows
    height: usize,
    px: Vec<Rgb>,
    /// Cells as last sent to the terminal; empty forces a full repaint
    shown: Vec<Cell>,
}

impl PixelBuf {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            px: vec![Rgb::BLACK; width * height],
            shown: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// New dimensions; the next present repaints everything
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.px = vec![Rgb::BLACK; width * height];
        self.shown.clear();
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.width + x]
    }

    /// Write a pixel; out-of-bounds writes are dropped
    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        self.fill_rect(x, y, 1, 1, c);
    }

    /// Fill the part of the rect that lies inside the buffer
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        let clip = |from: i32, len: i32, max: usize| {
            let lo = from.clamp(0, max as i32) as usize;
            let hi = from.saturating_add(len).clamp(0, max as i32) as usize;
            lo..hi.max(lo)
        };
        let cols = clip(x, w, self.width);
        for row in clip(y, h, self.height) {
            let start = row * self.width;
            self.px[start + cols.start..start + cols.end].fill(c);
        }
    }

    fn cell(&self, col: usize, row: usize) -> Cell {
        Cell {
            top: self.get(col, row * 2),
            bottom: self.get(col, row * 2 + 1),
        }
    }

    /// Write changed cells to the terminal
    pub fn present(&mut self, out: &mut impl Write) -> io::Result<()> {
        let (cols, rows) = (self.width, self.height / 2);
        let repaint = self.shown.len() != cols * rows;
        if repaint {
            queue!(out, style::ResetColor, terminal::Clear(terminal::ClearType::All))?;
            self.shown = vec![
                Cell {
                    top: Rgb::BLACK,
                    bottom: Rgb::BLACK,
                };
                cols * rows
            ];
        }

        let mut pen = Pen::default();
        for row in 0..rows {
            for col in 0..cols {
                let cell = self.cell(col, row);
                let slot = &mut self.shown[row * cols + col];
                if !repaint && *slot == cell {
                    continue;
                }
                *slot = cell;
                pen.paint(out, col, row, cell)?;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}
