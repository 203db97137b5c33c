/// Terminal rendering backend.
///
/// Implements [`Surface`] on top of an in-memory cell grid: entities draw in
/// virtual 800×600 units, the grid scales them to whatever the terminal
/// currently measures, and `present` flushes the whole grid with queued
/// crossterm commands. Keeping the trait methods infallible means entity
/// render code never sees I/O errors; they surface once per frame from
/// `present`.
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Print},
    QueueableCommand,
};

use crate::constants::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::surface::{Align, Color, Surface};

fn term_color(color: Color) -> style::Color {
    match color {
        Color::Black => style::Color::Black,
        Color::White => style::Color::White,
        Color::Grey => style::Color::Grey,
        Color::DarkGrey => style::Color::DarkGrey,
        Color::Red => style::Color::Red,
        Color::Green => style::Color::Green,
        Color::Blue => style::Color::Blue,
        Color::LightBlue => style::Color::Rgb {
            r: 120,
            g: 180,
            b: 255,
        },
        Color::Cyan => style::Color::Cyan,
        Color::Yellow => style::Color::Yellow,
        Color::Gold => style::Color::Rgb {
            r: 255,
            g: 200,
            b: 60,
        },
        Color::Magenta => style::Color::Magenta,
        Color::Pink => style::Color::Rgb {
            r: 255,
            g: 150,
            b: 200,
        },
        Color::Purple => style::Color::Rgb {
            r: 160,
            g: 90,
            b: 220,
        },
    }
}

#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: Color::White,
};

pub struct TermSurface {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl TermSurface {
    pub fn new(cols: u16, rows: u16) -> Self {
        TermSurface {
            cols: cols.max(1),
            rows: rows.max(1),
            cells: vec![BLANK; cols.max(1) as usize * rows.max(1) as usize],
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        self.cells = vec![BLANK; self.cols as usize * self.rows as usize];
    }

    fn scale_x(&self) -> f32 {
        self.cols as f32 / WORLD_WIDTH
    }

    fn scale_y(&self) -> f32 {
        self.rows as f32 / WORLD_HEIGHT
    }

    fn col_of(&self, x: f32) -> i32 {
        (x * self.scale_x()).floor() as i32
    }

    fn row_of(&self, y: f32) -> i32 {
        (y * self.scale_y()).floor() as i32
    }

    /// Terminal cell → virtual world coordinate, for mouse events.
    pub fn virtual_x(&self, col: u16) -> f32 {
        (col as f32 + 0.5) / self.scale_x()
    }

    pub fn virtual_y(&self, row: u16) -> f32 {
        (row as f32 + 0.5) / self.scale_y()
    }

    fn put(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        self.cells[row as usize * self.cols as usize + col as usize] = Cell { ch, color };
    }

    /// Flushes the grid to the terminal, one queued run per color change.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let mut run = String::new();
            let mut run_color: Option<Color> = None;
            for col in 0..self.cols {
                let cell = self.cells[row as usize * self.cols as usize + col as usize];
                if run_color != Some(cell.color) {
                    if !run.is_empty() {
                        out.queue(Print(&run))?;
                        run.clear();
                    }
                    out.queue(style::SetForegroundColor(term_color(cell.color)))?;
                    run_color = Some(cell.color);
                }
                run.push(cell.ch);
            }
            if !run.is_empty() {
                out.queue(Print(&run))?;
            }
        }

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }
}

impl Surface for TermSurface {
    fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let col0 = self.col_of(x);
        let row0 = self.row_of(y);
        // Anything with positive extent covers at least one cell.
        let col1 = (self.col_of(x + w) - 1).max(col0);
        let row1 = (self.row_of(y + h) - 1).max(row0);
        for row in row0..=row1 {
            for col in col0..=col1 {
                self.put(col, row, '█', color);
            }
        }
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let col0 = self.col_of(x);
        let row0 = self.row_of(y);
        let col1 = (self.col_of(x + w) - 1).max(col0);
        let row1 = (self.row_of(y + h) - 1).max(row0);

        // Degenerate (single row or column) outlines collapse to a bar.
        if row1 == row0 {
            for col in col0..=col1 {
                self.put(col, row0, '─', color);
            }
            return;
        }
        if col1 == col0 {
            for row in row0..=row1 {
                self.put(col0, row, '│', color);
            }
            return;
        }

        for col in col0 + 1..col1 {
            self.put(col, row0, '─', color);
            self.put(col, row1, '─', color);
        }
        for row in row0 + 1..row1 {
            self.put(col0, row, '│', color);
            self.put(col1, row, '│', color);
        }
        self.put(col0, row0, '┌', color);
        self.put(col1, row0, '┐', color);
        self.put(col0, row1, '└', color);
        self.put(col1, row1, '┘', color);
    }

    // Terminal cells have one glyph size; the font-size hint is ignored.
    fn text(&mut self, text: &str, x: f32, y: f32, _size: f32, color: Color, align: Align) {
        let row = self.row_of(y);
        let len = text.chars().count() as i32;
        let col = match align {
            Align::Left => self.col_of(x),
            Align::Center => self.col_of(x) - len / 2,
            Align::Right => self.col_of(x) - len,
        };
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, color);
        }
    }
}
