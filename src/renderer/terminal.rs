//! Terminal presentation
//!
//! The playfield is stretched over the whole terminal, one cell per scaled
//! block. Resizing the terminal just changes the scale on the next frame.

use std::io::{self, Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal,
};
use glam::Vec2;

use super::frame::{Frame, Rgb};

/// A single terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

/// Rasterized frame, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub cols: u16,
    pub rows: u16,
    pub cells: Vec<Cell>,
}

impl Grid {
    pub fn new(cols: u16, rows: u16, bg: Rgb) -> Self {
        let blank = Cell {
            ch: ' ',
            fg: bg,
            bg,
        };
        Self {
            cols,
            rows,
            cells: vec![blank; cols as usize * rows as usize],
        }
    }

    pub fn get(&self, col: u16, row: u16) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row as usize * self.cols as usize + col as usize)
    }

    fn get_mut(&mut self, col: u16, row: u16) -> Option<&mut Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells
            .get_mut(row as usize * self.cols as usize + col as usize)
    }

    /// Scale a frame onto a `cols` x `rows` grid
    pub fn rasterize(frame: &Frame, cols: u16, rows: u16) -> Self {
        let mut grid = Self::new(cols, rows, frame.background);
        if cols == 0 || rows == 0 {
            return grid;
        }
        let scale = Vec2::new(cols as f32, rows as f32) / frame.playfield;

        for sprite in &frame.sprites {
            let min = (sprite.pos * scale).floor();
            let max = ((sprite.pos + sprite.size) * scale).ceil();
            let c0 = min.x.max(0.0) as u16;
            let r0 = min.y.max(0.0) as u16;
            let c1 = max.x.clamp(0.0, cols as f32) as u16;
            let r1 = max.y.clamp(0.0, rows as f32) as u16;
            let color = sprite.sprite.color();
            for row in r0..r1 {
                for col in c0..c1 {
                    if let Some(cell) = grid.get_mut(col, row) {
                        cell.ch = ' ';
                        cell.bg = color;
                    }
                }
            }
        }

        for text in &frame.texts {
            let anchor = text.center * scale;
            if anchor.y < 0.0 || anchor.y >= rows as f32 {
                continue;
            }
            let row = anchor.y as u16;
            let len = text.text.chars().count() as f32;
            let start = (anchor.x - len / 2.0).round();
            for (i, ch) in text.text.chars().enumerate() {
                let col = start + i as f32;
                if col < 0.0 {
                    continue;
                }
                if let Some(cell) = grid.get_mut(col as u16, row) {
                    cell.ch = ch;
                    cell.fg = text.color;
                }
            }
        }

        grid
    }
}

fn rgb(c: Rgb) -> Color {
    Color::Rgb {
        r: c[0],
        g: c[1],
        b: c[2],
    }
}

/// Draws frames to a terminal with `crossterm`
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    last: Option<Grid>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rasterize at the current terminal size and write it out
    pub fn present<W: Write>(&mut self, out: &mut W, frame: &Frame) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let grid = Grid::rasterize(frame, cols, rows);
        if self.last.as_ref() == Some(&grid) {
            return Ok(());
        }
        write_grid(out, &grid)?;
        self.last = Some(grid);
        Ok(())
    }
}

/// Write a grid, switching colours only between runs of equal cells
pub fn write_grid<W: Write>(out: &mut W, grid: &Grid) -> io::Result<()> {
    for row in 0..grid.rows {
        out.queue(cursor::MoveTo(0, row))?;
        let mut current: Option<(Rgb, Rgb)> = None;
        let mut run = String::new();
        for col in 0..grid.cols {
            let Some(cell) = grid.get(col, row) else {
                continue;
            };
            let colors = (cell.fg, cell.bg);
            if current != Some(colors) {
                if let Some((fg, bg)) = current {
                    out.queue(SetForegroundColor(rgb(fg)))?;
                    out.queue(SetBackgroundColor(rgb(bg)))?;
                    out.queue(Print(&run))?;
                    run.clear();
                }
                current = Some(colors);
            }
            run.push(cell.ch);
        }
        if let Some((fg, bg)) = current {
            out.queue(SetForegroundColor(rgb(fg)))?;
            out.queue(SetBackgroundColor(rgb(bg)))?;
            out.queue(Print(&run))?;
        }
    }
    out.queue(ResetColor)?;
    out.flush()
}
