//! Character-grid frame buffer

use std::io::{self, Write};

use crate::error::{Error, Result};

/// Largest canvas accepted, in cells
pub const MAX_CELLS: usize = 1 << 24;

/// Glyphs used when displaying the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub lit: char,
    pub unlit: char,
}

impl Glyphs {
    pub fn new(lit: char, unlit: char) -> Self {
        Self { lit, unlit }
    }

    fn pick(&self, lit: bool) -> char {
        if lit {
            self.lit
        } else {
            self.unlit
        }
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::new('█', ' ')
    }
}

/// A `rows × cols` grid of lit/unlit cells
///
/// X indexes columns and Y indexes rows. All writes go through [`Canvas::plot`],
/// which drops coordinates outside the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Canvas {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let size = Self::check_size(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![false; size],
        })
    }

    /// Cell count for a `rows × cols` grid, rejecting sizes above [`MAX_CELLS`]
    pub fn check_size(rows: usize, cols: usize) -> Result<usize> {
        rows.checked_mul(cols)
            .filter(|&size| size <= MAX_CELLS)
            .ok_or(Error::CanvasTooLarge {
                rows,
                cols,
                limit: MAX_CELLS,
            })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cols
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.cols as u64 && (y as u64) < self.rows as u64
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        self.contains(x, y)
            .then(|| y as usize * self.cols + x as usize)
    }

    /// Light the cell at column `x`, row `y`
    ///
    /// Returns `false` without writing when the cell is off the grid.
    pub fn plot(&mut self, x: i64, y: i64) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = true;
                true
            }
            None => false,
        }
    }

    pub fn is_lit(&self, x: i64, y: i64) -> bool {
        self.index(x, y).map_or(false, |idx| self.cells[idx])
    }

    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|&&lit| lit).count()
    }

    /// Coordinates `(x, y)` of every lit cell in row-major order
    pub fn lit_cells(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &lit)| lit)
            .map(move |(idx, _)| ((idx % cols) as i64, (idx / cols) as i64))
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Write the grid row by row, one newline per row
    pub fn draw<W: Write>(&self, writer: &mut W, glyphs: &Glyphs) -> io::Result<()> {
        let mut line = String::with_capacity(self.cols * glyphs.lit.len_utf8() + 1);
        for y in 0..self.rows {
            line.clear();
            self.push_row(&mut line, y, glyphs);
            line.push('\n');
            writer.write_all(line.as_bytes())?;
        }
        Ok(())
    }

    pub fn to_string_with(&self, glyphs: &Glyphs) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for y in 0..self.rows {
            self.push_row(&mut out, y, glyphs);
            out.push('\n');
        }
        out
    }

    fn push_row(&self, out: &mut String, y: usize, glyphs: &Glyphs) {
        let row = &self.cells[y * self.cols..(y + 1) * self.cols];
        out.extend(row.iter().map(|&lit| glyphs.pick(lit)));
    }
}
