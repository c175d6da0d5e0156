//! Paytable and payout calculation
//!
//! The total multiplier of an evaluation is the sum of two terms:
//!
//! - **Line pay**: for every line, the symbol's base multiplier times the
//!   run-length factor from [`LinePayTable`].
//! - **Bonus**: for every tallied symbol, `count × rate(count)` from
//!   [`BonusTable`].

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::{GridSpec, MachineConfig};
use crate::error::{PayoutError, PayoutResult};
use crate::grid::Grid;
use crate::scanner::{self, Line, MIN_HORIZONTAL_RUN};
use crate::symbols::{SymbolCatalog, SymbolId};
use crate::tally::{self, SymbolMatchTally};

/// Run length → line factor
///
/// Every run length a grid can produce must be listed, even when its factor
/// is 0. A missing length is a configuration error, never a silent 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinePayTable {
    factors: BTreeMap<usize, f64>,
}

impl LinePayTable {
    /// Build from `(run_length, factor)` pairs
    pub fn new(factors: impl IntoIterator<Item = (usize, f64)>) -> Self {
        Self {
            factors: factors.into_iter().collect(),
        }
    }

    /// 3 → 0.2, 4 → 0.4, 5 → 0.8
    pub fn standard() -> Self {
        Self::new([(3, 0.2), (4, 0.4), (5, 0.8)])
    }

    /// Factor for a run length, if tabulated
    pub fn factor(&self, run_length: usize) -> Option<f64> {
        self.factors.get(&run_length).copied()
    }

    /// Add or replace an entry
    pub fn set(&mut self, run_length: usize, factor: f64) {
        self.factors.insert(run_length, factor);
    }

    /// Tabulated run lengths, ascending
    pub fn run_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.factors.keys().copied()
    }

    /// Every factor must be finite and non-negative
    pub fn validate_factors(&self) -> PayoutResult<()> {
        for (&len, &factor) in &self.factors {
            if !factor.is_finite() || factor < 0.0 {
                return Err(PayoutError::config(format!(
                    "line factor for run length {len} is invalid: {factor}"
                )));
            }
        }
        Ok(())
    }

    /// Check factors and coverage of every run length `grid` can produce
    pub fn validate(&self, grid: GridSpec) -> PayoutResult<()> {
        self.validate_factors()?;

        let horizontal = MIN_HORIZONTAL_RUN..=grid.width;
        let vertical = (grid.height >= 2).then_some(grid.height);
        for len in horizontal.chain(vertical) {
            if self.factor(len).is_none() {
                return Err(PayoutError::config(format!(
                    "no line factor for run length {len} on a {}x{} grid",
                    grid.width, grid.height
                )));
            }
        }
        Ok(())
    }
}

impl Default for LinePayTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// A bonus tier: counts strictly above `above` earn `rate` per matched cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusTier {
    pub above: u32,
    pub rate: f64,
}

impl BonusTier {
    pub fn new(above: u32, rate: f64) -> Self {
        Self { above, rate }
    }
}

/// Step table from tally count to per-cell bonus rate
///
/// Tiers are kept in ascending `above` order. The highest tier the count
/// exceeds wins; counts that exceed no tier earn nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BonusTable {
    tiers: Vec<BonusTier>,
}

impl BonusTable {
    /// Build from tiers in any order
    pub fn new(mut tiers: Vec<BonusTier>) -> Self {
        tiers.sort_by_key(|t| t.above);
        Self { tiers }
    }

    /// Table with no bonus at all
    pub fn none() -> Self {
        Self { tiers: Vec::new() }
    }

    /// Standard table, from `> 4` up to `> 22`
    pub fn standard() -> Self {
        Self::new(vec![
            BonusTier::new(4, 0.2),
            BonusTier::new(5, 0.25),
            BonusTier::new(6, 0.35),
            BonusTier::new(7, 0.6),
            BonusTier::new(8, 2.0),
            BonusTier::new(9, 3.0),
            BonusTier::new(10, 4.5),
            BonusTier::new(11, 6.0),
            BonusTier::new(12, 7.5),
            BonusTier::new(13, 13.0),
            BonusTier::new(14, 15.0),
            BonusTier::new(15, 25.0),
            BonusTier::new(16, 30.0),
            BonusTier::new(17, 40.0),
            BonusTier::new(18, 50.0),
            BonusTier::new(19, 70.0),
            BonusTier::new(20, 150.0),
            BonusTier::new(21, 750.0),
            BonusTier::new(22, 1000.0),
        ])
    }

    /// Per-cell rate for a tally count
    pub fn rate_for(&self, count: u32) -> f64 {
        self.tiers
            .iter()
            .rev()
            .find(|t| count > t.above)
            .map(|t| t.rate)
            .unwrap_or(0.0)
    }

    pub fn tiers(&self) -> &[BonusTier] {
        &self.tiers
    }

    /// Thresholds strictly increasing, rates finite, non-negative and
    /// non-decreasing
    pub fn validate(&self) -> PayoutResult<()> {
        let mut previous: Option<&BonusTier> = None;
        for tier in &self.tiers {
            if !tier.rate.is_finite() || tier.rate < 0.0 {
                return Err(PayoutError::config(format!(
                    "bonus rate above {} is invalid: {}",
                    tier.above, tier.rate
                )));
            }
            if let Some(prev) = previous {
                if tier.above == prev.above {
                    return Err(PayoutError::config(format!(
                        "bonus threshold {} listed twice",
                        tier.above
                    )));
                }
                if tier.rate < prev.rate {
                    return Err(PayoutError::config(format!(
                        "bonus rate above {} ({}) is lower than above {} ({})",
                        tier.above, tier.rate, prev.above, prev.rate
                    )));
                }
            }
            previous = Some(tier);
        }
        Ok(())
    }
}

impl Default for BonusTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Bonus earned by one symbol
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymbolBonus {
    pub symbol: SymbolId,
    /// Tally count the rate was looked up with
    pub count: u32,
    pub rate: f64,
    /// `count × rate`
    pub multiplier: f64,
}

/// Breakdown of a payout calculation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    /// Line pay per line, same order as the evaluated lines
    pub line_multipliers: Vec<f64>,
    /// Bonus per tallied symbol, ordered by symbol id
    pub bonuses: Vec<SymbolBonus>,
    /// Sum of line pay
    pub line_total: f64,
    /// Sum of bonuses
    pub bonus_total: f64,
    /// `line_total + bonus_total`
    pub total: f64,
}

/// Lines, tally and payout of one grid
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub lines: Vec<Line>,
    pub tally: SymbolMatchTally,
    pub payout: Payout,
}

impl Evaluation {
    pub fn total_multiplier(&self) -> f64 {
        self.payout.total
    }

    pub fn is_win(&self) -> bool {
        self.payout.total > 0.0
    }
}

/// Complete paytable: symbols, line factors and bonus tiers
///
/// Cheap to clone; the catalog is shared read-only between clones.
#[derive(Debug, Clone)]
pub struct PayTable {
    catalog: Arc<SymbolCatalog>,
    line_pays: LinePayTable,
    bonus_table: BonusTable,
}

impl PayTable {
    /// Assemble a paytable from parts, validating the tables
    ///
    /// Grid coverage of the line factors is checked when a machine is built.
    pub fn new(
        catalog: Arc<SymbolCatalog>,
        line_pays: LinePayTable,
        bonus_table: BonusTable,
    ) -> PayoutResult<Self> {
        line_pays.validate_factors()?;
        bonus_table.validate()?;
        Ok(Self {
            catalog,
            line_pays,
            bonus_table,
        })
    }

    /// Build from a validated machine config
    pub fn from_config(config: &MachineConfig) -> PayoutResult<Self> {
        config.validate()?;
        let catalog = SymbolCatalog::new(config.symbols.clone())?;
        Self::new(
            Arc::new(catalog),
            config.line_pays.clone(),
            config.bonus_table.clone(),
        )
    }

    pub fn catalog(&self) -> &Arc<SymbolCatalog> {
        &self.catalog
    }

    pub fn line_pays(&self) -> &LinePayTable {
        &self.line_pays
    }

    pub fn bonus_table(&self) -> &BonusTable {
        &self.bonus_table
    }

    /// Line pay for a single line
    pub fn line_multiplier(&self, line: &Line) -> PayoutResult<f64> {
        let symbol = self.catalog.resolve(line.symbol)?;
        let factor = self.line_pays.factor(line.run_length).ok_or_else(|| {
            PayoutError::config(format!(
                "no line factor for run length {}",
                line.run_length
            ))
        })?;
        Ok(symbol.multiplier * factor)
    }

    /// Turn lines and their tally into a payout
    ///
    /// Lines of the same symbol always add.
    pub fn calculate(&self, lines: &[Line], tally: &SymbolMatchTally) -> PayoutResult<Payout> {
        let line_multipliers = lines
            .iter()
            .map(|line| self.line_multiplier(line))
            .collect::<PayoutResult<Vec<_>>>()?;

        let bonuses: Vec<SymbolBonus> = tally
            .iter()
            .map(|(symbol, count)| {
                let rate = self.bonus_table.rate_for(count);
                SymbolBonus {
                    symbol,
                    count,
                    rate,
                    multiplier: count as f64 * rate,
                }
            })
            .collect();

        let line_total: f64 = line_multipliers.iter().sum();
        let bonus_total: f64 = bonuses.iter().map(|b| b.multiplier).sum();

        Ok(Payout {
            line_multipliers,
            bonuses,
            line_total,
            bonus_total,
            total: line_total + bonus_total,
        })
    }

    /// Scan, aggregate and calculate a grid
    pub fn evaluate(&self, grid: &Grid) -> PayoutResult<Evaluation> {
        let lines = scanner::scan(grid, &self.catalog)?;
        let tally = tally::aggregate(&lines);
        let payout = self.calculate(&lines, &tally)?;

        Ok(Evaluation {
            lines,
            tally,
            payout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use crate::scanner::Orientation;
    use crate::symbols::Symbol;

    fn paytable() -> PayTable {
        let catalog =
            SymbolCatalog::new(vec![Symbol::new("A", 1.0), Symbol::new("B", 2.0)]).unwrap();
        PayTable::new(
            Arc::new(catalog),
            LinePayTable::standard(),
            BonusTable::standard(),
        )
        .unwrap()
    }

    fn horizontal(symbol: u16, run_length: usize) -> Line {
        Line {
            symbol: SymbolId(symbol),
            orientation: Orientation::Horizontal,
            start: Cell::new(0, 0),
            end: Cell::new(run_length - 1, 0),
            run_length,
        }
    }

    #[test]
    fn test_line_factors() {
        let table = LinePayTable::standard();
        assert_eq!(table.factor(3), Some(0.2));
        assert_eq!(table.factor(4), Some(0.4));
        assert_eq!(table.factor(5), Some(0.8));
        assert_eq!(table.factor(6), None);
    }

    #[test]
    fn test_line_table_coverage() {
        let table = LinePayTable::standard();
        assert!(table.validate(GridSpec::new(5, 3)).is_ok());
        assert!(table.validate(GridSpec::new(6, 3)).is_err());
        // Vertical lines on a 5x2 grid have run length 2
        assert!(table.validate(GridSpec::new(5, 2)).is_err());

        let mut explicit = LinePayTable::standard();
        explicit.set(2, 0.0);
        assert!(explicit.validate(GridSpec::new(5, 2)).is_ok());
        // One row: no vertical lines to cover
        assert!(LinePayTable::standard().validate(GridSpec::new(4, 1)).is_ok());
    }

    #[test]
    fn test_new_rejects_bad_line_factors() {
        let catalog = Arc::new(SymbolCatalog::classic());

        let mut negative = LinePayTable::standard();
        negative.set(4, -0.4);
        let result = PayTable::new(Arc::clone(&catalog), negative, BonusTable::standard());
        assert!(matches!(result, Err(PayoutError::Configuration(_))));

        let mut nan = LinePayTable::standard();
        nan.set(3, f64::NAN);
        assert!(PayTable::new(Arc::clone(&catalog), nan, BonusTable::none()).is_err());

        // Coverage is not a paytable concern; a sparse table is accepted
        let sparse = LinePayTable::new([(3, 0.2)]);
        assert!(PayTable::new(catalog, sparse, BonusTable::none()).is_ok());
    }

    #[test]
    fn test_bonus_rate_steps() {
        let table = BonusTable::standard();
        assert_eq!(table.rate_for(0), 0.0);
        assert_eq!(table.rate_for(4), 0.0);
        assert_eq!(table.rate_for(5), 0.2);
        assert_eq!(table.rate_for(9), 2.0);
        assert_eq!(table.rate_for(22), 750.0);
        assert_eq!(table.rate_for(23), 1000.0);
        assert_eq!(table.rate_for(500), 1000.0);
    }

    #[test]
    fn test_bonus_table_validation() {
        assert!(BonusTable::standard().validate().is_ok());
        assert!(BonusTable::none().validate().is_ok());

        let duplicate = BonusTable::new(vec![BonusTier::new(4, 1.0), BonusTier::new(4, 2.0)]);
        assert!(duplicate.validate().is_err());

        let falling = BonusTable::new(vec![BonusTier::new(4, 2.0), BonusTier::new(8, 1.0)]);
        assert!(falling.validate().is_err());

        let negative = BonusTable::new(vec![BonusTier::new(4, -1.0)]);
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_calculate_line_pay() {
        let pt = paytable();
        let lines = vec![horizontal(0, 3)];
        let payout = pt.calculate(&lines, &tally::aggregate(&lines)).unwrap();

        assert!((payout.line_total - 0.2).abs() < 1e-12);
        assert_eq!(payout.bonus_total, 0.0);
        assert!((payout.total - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_calculate_lines_add() {
        let pt = paytable();
        let lines = vec![horizontal(1, 4), horizontal(1, 3)];
        let payout = pt.calculate(&lines, &tally::aggregate(&lines)).unwrap();

        // 2.0 * 0.4 + 2.0 * 0.2
        assert!((payout.line_total - 1.2).abs() < 1e-12);
        // tally 7 → rate 0.35
        assert_eq!(payout.bonuses.len(), 1);
        assert_eq!(payout.bonuses[0].count, 7);
        assert!((payout.bonus_total - 7.0 * 0.35).abs() < 1e-12);
        assert!((payout.total - (1.2 + 2.45)).abs() < 1e-12);
    }

    #[test]
    fn test_calculate_no_lines() {
        let pt = paytable();
        let payout = pt.calculate(&[], &SymbolMatchTally::new()).unwrap();
        assert_eq!(payout.total, 0.0);
        assert!(payout.line_multipliers.is_empty());
    }

    #[test]
    fn test_missing_factor_is_error() {
        let pt = paytable();
        let lines = vec![horizontal(0, 7)];
        let result = pt.calculate(&lines, &tally::aggregate(&lines));
        assert!(matches!(result, Err(PayoutError::Configuration(_))));
    }

    #[test]
    fn test_evaluate_grid() {
        let pt = paytable();
        let grid = Grid::from_names(
            pt.catalog(),
            &[
                vec!["A", "A", "A", "B", "B"],
                vec!["B", "B", "A", "A", "B"],
                vec!["A", "A", "B", "B", "A"],
            ],
        )
        .unwrap();

        let eval = pt.evaluate(&grid).unwrap();
        assert_eq!(eval.lines.len(), 1);
        assert_eq!(eval.tally.get(SymbolId(0)), 3);
        assert!((eval.total_multiplier() - 0.2).abs() < 1e-12);
        assert!(eval.is_win());
    }
}
