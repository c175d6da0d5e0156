//! Symbol grid and random grid generation

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GridSpec;
use crate::error::{PayoutError, PayoutResult};
use crate::symbols::{SymbolCatalog, SymbolId};

/// Grid coordinate; row 0 is the top row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub column: usize,
    pub row: usize,
}

impl Cell {
    pub fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

/// A `width × height` snapshot of drawn symbols, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<SymbolId>,
}

impl Grid {
    /// Build a grid from row-major symbol ids
    ///
    /// Ids are not checked against a catalog here; the scanner does that.
    pub fn from_ids(width: usize, height: usize, cells: Vec<SymbolId>) -> PayoutResult<Self> {
        if width == 0 || height == 0 {
            return Err(PayoutError::config(format!(
                "grid dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let expected = GridSpec::new(width, height).total_positions()?;
        if cells.len() != expected {
            return Err(PayoutError::config(format!(
                "{width}x{height} grid needs {expected} cells, got {}",
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a grid from symbol names, one slice per row (top row first)
    pub fn from_names<S: AsRef<str>>(
        catalog: &SymbolCatalog,
        rows: &[Vec<S>],
    ) -> PayoutResult<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);

        let mut cells = Vec::with_capacity(rows.iter().map(|r| r.len()).sum());
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(PayoutError::config(format!(
                    "row {y} has {} cells, expected {width}",
                    row.len()
                )));
            }
            for name in row {
                cells.push(catalog.lookup(name.as_ref())?);
            }
        }

        Self::from_ids(width, height, cells)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Symbol at a cell
    pub fn get(&self, cell: Cell) -> Option<SymbolId> {
        if cell.column >= self.width || cell.row >= self.height {
            return None;
        }
        Some(self.cells[cell.row * self.width + cell.column])
    }

    /// One row, left to right
    pub fn row(&self, y: usize) -> &[SymbolId] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// One column, top to bottom
    pub fn column(&self, x: usize) -> impl Iterator<Item = SymbolId> + '_ {
        self.cells.iter().skip(x).step_by(self.width).copied()
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[SymbolId] {
        &self.cells
    }

    /// Symbol names per row, for display and logging
    pub fn symbol_names(&self, catalog: &SymbolCatalog) -> Vec<Vec<String>> {
        (0..self.height)
            .map(|y| {
                self.row(y)
                    .iter()
                    .map(|&id| catalog.name_of(id).to_string())
                    .collect()
            })
            .collect()
    }
}

/// Draw a fresh grid
///
/// Every cell is an independent uniform draw from the catalog. Draw order is
/// row-major (top row first, left to right), so a seeded source always
/// yields the same grid.
pub fn generate<R: Rng>(
    spec: GridSpec,
    catalog: &SymbolCatalog,
    rng: &mut R,
) -> PayoutResult<Grid> {
    if catalog.is_empty() {
        return Err(PayoutError::config("cannot draw a grid from an empty catalog"));
    }
    if spec.width == 0 || spec.height == 0 {
        return Err(PayoutError::config(format!(
            "grid dimensions must be non-zero, got {}x{}",
            spec.width, spec.height
        )));
    }

    let symbol_count = catalog.len();
    let cells = (0..spec.total_positions()?)
        .map(|_| SymbolId(rng.random_range(0..symbol_count) as u16))
        .collect();

    Grid::from_ids(spec.width, spec.height, cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::symbols::Symbol;

    #[test]
    fn test_generate_dimensions() {
        let catalog = SymbolCatalog::classic();
        let mut rng = StdRng::seed_from_u64(7);
        let grid = generate(GridSpec::new(5, 3), &catalog, &mut rng).unwrap();

        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.cells().len(), 15);
        assert!(grid.cells().iter().all(|id| catalog.get(*id).is_some()));
    }

    #[test]
    fn test_generate_is_reproducible() {
        let catalog = SymbolCatalog::classic();
        let a = generate(GridSpec::new(5, 3), &catalog, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = generate(GridSpec::new(5, 3), &catalog, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_draws_row_major() {
        let catalog = SymbolCatalog::classic();
        let grid = generate(GridSpec::new(5, 3), &catalog, &mut StdRng::seed_from_u64(5)).unwrap();

        let mut rng = StdRng::seed_from_u64(5);
        let expected: Vec<SymbolId> = (0..15)
            .map(|_| SymbolId(rng.random_range(0..catalog.len()) as u16))
            .collect();
        assert_eq!(grid.cells(), expected.as_slice());
    }

    #[test]
    fn test_from_ids_rejects_overflowing_dimensions() {
        let result = Grid::from_ids(1usize << 63, 2, Vec::new());
        assert!(matches!(result, Err(PayoutError::Configuration(_))));

        let result = Grid::from_ids(usize::MAX, usize::MAX, vec![SymbolId(0)]);
        assert!(matches!(result, Err(PayoutError::Configuration(_))));
    }

    #[test]
    fn test_generate_rejects_empty_catalog() {
        let catalog = SymbolCatalog::new(Vec::new()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let result = generate(GridSpec::new(5, 3), &catalog, &mut rng);
        assert!(matches!(result, Err(PayoutError::Configuration(_))));
    }

    #[test]
    fn test_generate_rejects_zero_dimensions() {
        let catalog = SymbolCatalog::classic();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate(GridSpec::new(0, 3), &catalog, &mut rng).is_err());
        assert!(generate(GridSpec::new(5, 0), &catalog, &mut rng).is_err());
    }

    #[test]
    fn test_single_symbol_catalog_fills_grid() {
        let catalog = SymbolCatalog::new(vec![Symbol::new("ONLY", 1.0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let grid = generate(GridSpec::new(4, 2), &catalog, &mut rng).unwrap();
        assert!(grid.cells().iter().all(|&id| id == SymbolId(0)));
    }

    #[test]
    fn test_rows_and_columns() {
        let catalog = SymbolCatalog::classic();
        let grid = Grid::from_names(
            &catalog,
            &[
                vec!["CHERRY", "LEMON", "BELL"],
                vec!["BAR", "SEVEN", "CHERRY"],
            ],
        )
        .unwrap();

        assert_eq!(grid.row(1), &[SymbolId(3), SymbolId(4), SymbolId(0)]);
        let col: Vec<_> = grid.column(1).collect();
        assert_eq!(col, vec![SymbolId(1), SymbolId(4)]);
        assert_eq!(grid.get(Cell::new(2, 0)), Some(SymbolId(2)));
        assert_eq!(grid.get(Cell::new(3, 0)), None);
        assert_eq!(grid.symbol_names(&catalog)[0][2], "BELL");
    }

    #[test]
    fn test_from_names_errors() {
        let catalog = SymbolCatalog::classic();
        let unknown = Grid::from_names(&catalog, &[vec!["CHERRY", "PLUM"]]);
        assert!(matches!(unknown, Err(PayoutError::UnknownSymbol(_))));

        let ragged = Grid::from_names(&catalog, &[vec!["CHERRY", "BAR"], vec!["BAR"]]);
        assert!(matches!(ragged, Err(PayoutError::Configuration(_))));

        let empty: Vec<Vec<&str>> = Vec::new();
        assert!(Grid::from_names(&catalog, &empty).is_err());
    }
}
