//! Spin result

use serde::Serialize;

use crate::grid::Grid;
use crate::paytable::{Evaluation, Payout};
use crate::scanner::Line;
use crate::tally::SymbolMatchTally;

/// Outcome of one spin, handed to the host for display and settlement
#[derive(Debug, Clone, Serialize)]
pub struct SpinResult {
    /// Spin number on this machine, starting at 1
    pub spin_id: u64,
    /// Wager the spin was played with
    pub bet: f64,
    /// Drawn grid
    pub grid: Grid,
    /// Winning lines, vertical first then horizontal
    pub lines: Vec<Line>,
    /// Matched cells per symbol
    pub tally: SymbolMatchTally,
    /// Line pay and bonus breakdown
    pub payout: Payout,
    /// Line pay + bonus; always >= 0
    pub total_multiplier: f64,
}

impl SpinResult {
    /// Create a result from an evaluated grid
    pub fn new(spin_id: u64, bet: f64, grid: Grid, eval: Evaluation) -> Self {
        Self {
            spin_id,
            bet,
            grid,
            total_multiplier: eval.payout.total,
            lines: eval.lines,
            tally: eval.tally,
            payout: eval.payout,
        }
    }

    /// `bet × total_multiplier`
    pub fn win(&self) -> f64 {
        self.bet * self.total_multiplier
    }

    /// Check if this is a win
    pub fn is_win(&self) -> bool {
        self.total_multiplier > 0.0
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
