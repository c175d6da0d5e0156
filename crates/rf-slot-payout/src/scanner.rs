//! Winning line detection
//!
//! Two independent passes over the same grid:
//!
//! - **Vertical**: a column pays only when every row holds the same symbol.
//! - **Horizontal**: each maximal run of identical symbols in a row pays once
//!   when it is at least [`MIN_HORIZONTAL_RUN`] cells long.
//!
//! A cell can sit on one vertical and one horizontal line at the same time.

use serde::{Deserialize, Serialize};

use crate::error::PayoutResult;
use crate::grid::{Cell, Grid};
use crate::symbols::{SymbolCatalog, SymbolId};

/// Shortest horizontal run that counts as a line
pub const MIN_HORIZONTAL_RUN: usize = 3;

/// Line direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// A detected winning line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Matched symbol
    pub symbol: SymbolId,
    pub orientation: Orientation,
    /// First cell (top for vertical, leftmost for horizontal)
    pub start: Cell,
    /// Last cell, inclusive
    pub end: Cell,
    /// Number of matched cells
    pub run_length: usize,
}

impl Line {
    /// Cells covered by this line, start to end
    pub fn cells(&self) -> Vec<Cell> {
        match self.orientation {
            Orientation::Vertical => (self.start.row..=self.end.row)
                .map(|row| Cell::new(self.start.column, row))
                .collect(),
            Orientation::Horizontal => (self.start.column..=self.end.column)
                .map(|column| Cell::new(column, self.start.row))
                .collect(),
        }
    }
}

/// Find all winning lines: vertical lines first (left to right), then
/// horizontal lines (top to bottom, left to right)
pub fn scan(grid: &Grid, catalog: &SymbolCatalog) -> PayoutResult<Vec<Line>> {
    // Fixture grids may carry ids the catalog never issued.
    for &id in grid.cells() {
        catalog.resolve(id)?;
    }

    let mut lines = scan_vertical(grid);
    lines.extend(scan_horizontal(grid));
    Ok(lines)
}

/// Full-column matches
///
/// A single-row grid has no columns to match.
pub fn scan_vertical(grid: &Grid) -> Vec<Line> {
    let height = grid.height();
    if height < 2 {
        return Vec::new();
    }

    (0..grid.width())
        .filter_map(|x| {
            let mut column = grid.column(x);
            let first = column.next()?;
            if !column.all(|id| id == first) {
                return None;
            }
            Some(Line {
                symbol: first,
                orientation: Orientation::Vertical,
                start: Cell::new(x, 0),
                end: Cell::new(x, height - 1),
                run_length: height,
            })
        })
        .collect()
}

/// Maximal horizontal runs of at least [`MIN_HORIZONTAL_RUN`] cells
pub fn scan_horizontal(grid: &Grid) -> Vec<Line> {
    let mut lines = Vec::new();

    for y in 0..grid.height() {
        let row = grid.row(y);
        let mut run_start = 0;

        for x in 1..=row.len() {
            // A run closes on a different symbol or at the end of the row.
            if x < row.len() && row[x] == row[run_start] {
                continue;
            }
            let run_length = x - run_start;
            if run_length >= MIN_HORIZONTAL_RUN {
                lines.push(Line {
                    symbol: row[run_start],
                    orientation: Orientation::Horizontal,
                    start: Cell::new(run_start, y),
                    end: Cell::new(x - 1, y),
                    run_length,
                });
            }
            run_start = x;
        }
    }

    lines
}
