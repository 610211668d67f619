//! Front orthographic view rendered into the terminal

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal,
};
use penspace::Vec3;
use unicode_width::UnicodeWidthChar;

pub const INK: Color = Color::Rgb { r: 120, g: 200, b: 255 };
pub const PENDING_INK: Color = Color::Rgb { r: 255, g: 220, b: 120 };
pub const ANCHOR: Color = Color::Rgb { r: 255, g: 120, b: 200 };
pub const PANEL: Color = Color::Rgb { r: 90, g: 110, b: 130 };
pub const HOVER: Color = Color::Rgb { r: 0, g: 255, b: 180 };
pub const RAY: Color = Color::Rgb { r: 70, g: 70, b: 90 };
pub const TEXT: Color = Color::White;
const BACKGROUND: Color = Color::Rgb { r: 5, g: 7, b: 12 };

/// Rows kept free at the bottom for the status lines
pub const STATUS_ROWS: u16 = 3;

#[derive(Clone, PartialEq)]
struct Cell {
    symbol: char,
    fg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            symbol: ' ',
            fg: TEXT,
        }
    }
}

/// Cells that differ from anything drawable, forcing a full redraw
fn unpainted(size: usize) -> Vec<Cell> {
    vec![
        Cell {
            symbol: '\0',
            fg: TEXT,
        };
        size
    ]
}

/// Visible slice of the world's XY plane
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            min_x: -0.8,
            max_x: 0.8,
            min_y: 0.5,
            max_y: 1.6,
        }
    }
}

/// Double-buffered terminal canvas, redrawing only changed cells
pub struct FrontView {
    width: u16,
    height: u16,
    buffer: Vec<Cell>,
    prev_buffer: Vec<Cell>,
    viewport: Viewport,
}

impl FrontView {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let size = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            // Swapped into `prev_buffer` by the first `begin_frame`
            buffer: unpainted(size),
            prev_buffer: vec![Cell::default(); size],
            viewport: Viewport::default(),
        })
    }

    fn refresh_size(&mut self) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            let size = width as usize * height as usize;
            self.buffer = unpainted(size);
            self.prev_buffer = vec![Cell::default(); size];
        }
        Ok(())
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn begin_frame(&mut self) -> io::Result<()> {
        self.refresh_size()?;
        std::mem::swap(&mut self.buffer, &mut self.prev_buffer);
        self.buffer.fill(Cell::default());
        Ok(())
    }

    pub fn put(&mut self, x: u16, y: u16, symbol: char, fg: Color) {
        if let Some(idx) = self.index(x, y) {
            self.buffer[idx] = Cell { symbol, fg };
        }
    }

    /// Write text starting at column `x`, clipped to the screen
    pub fn text(&mut self, x: u16, y: u16, text: &str, fg: Color) {
        let mut col = x;
        for ch in text.chars() {
            let width = ch.width().unwrap_or(0) as u16;
            if width == 0 {
                continue;
            }
            self.put(col, y, ch, fg);
            col = col.saturating_add(width);
            if col >= self.width {
                break;
            }
        }
    }

    /// Text centred on column `x`
    pub fn text_centered(&mut self, x: u16, y: u16, text: &str, fg: Color) {
        let width: usize = text.chars().filter_map(|c| c.width()).sum();
        self.text(x.saturating_sub(width as u16 / 2), y, text, fg);
    }

    fn scene_rows(&self) -> u16 {
        self.height.saturating_sub(STATUS_ROWS)
    }

    /// Screen cell of a world point, dropping depth
    pub fn project(&self, point: Vec3) -> Option<(u16, u16)> {
        let vp = self.viewport;
        let u = (point.x - vp.min_x) / (vp.max_x - vp.min_x);
        let v = (vp.max_y - point.y) / (vp.max_y - vp.min_y);
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return None;
        }
        let cols = self.width.saturating_sub(1) as f32;
        let rows = self.scene_rows().saturating_sub(1) as f32;
        Some(((u * cols).round() as u16, (v * rows).round() as u16))
    }

    pub fn plot(&mut self, point: Vec3, symbol: char, fg: Color) {
        if let Some((x, y)) = self.project(point) {
            self.put(x, y, symbol, fg);
        }
    }

    /// Sampled line between two world points
    pub fn line(&mut self, from: Vec3, to: Vec3, symbol: char, fg: Color) {
        const STEPS: usize = 64;
        for i in 0..=STEPS {
            let t = i as f32 / STEPS as f32;
            self.plot(from + (to - from) * t, symbol, fg);
        }
    }

    /// Outline of an axis-aligned world rectangle in the XY plane
    pub fn rect(&mut self, min: Vec3, max: Vec3, fg: Color) {
        let (Some((x0, y1)), Some((x1, y0))) = (self.project(min), self.project(max)) else {
            return;
        };
        for x in x0..=x1 {
            self.put(x, y0, '─', fg);
            self.put(x, y1, '─', fg);
        }
        for y in y0..=y1 {
            self.put(x0, y, '│', fg);
            self.put(x1, y, '│', fg);
        }
        self.put(x0, y0, '┌', fg);
        self.put(x1, y0, '┐', fg);
        self.put(x0, y1, '└', fg);
        self.put(x1, y1, '┘', fg);
    }

    /// Write a status line below the scene
    pub fn status(&mut self, line: u16, text: &str, fg: Color) {
        let y = self.scene_rows() + line;
        self.text(0, y, text, fg);
    }

    pub fn end_frame(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        queue!(stdout, cursor::Hide, SetBackgroundColor(BACKGROUND))?;

        for y in 0..self.height {
            for x in 0..self.width {
                let Some(idx) = self.index(x, y) else {
                    continue;
                };
                let cell = &self.buffer[idx];
                if *cell != self.prev_buffer[idx] {
                    queue!(
                        stdout,
                        cursor::MoveTo(x, y),
                        SetForegroundColor(cell.fg),
                        Print(cell.symbol)
                    )?;
                }
            }
        }

        stdout.flush()
    }
}
