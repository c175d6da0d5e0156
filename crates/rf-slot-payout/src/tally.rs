//! Per-symbol match tally

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scanner::Line;
use crate::symbols::SymbolId;

/// Total matched cells per symbol across all lines of one evaluation
///
/// Vertical and horizontal lines of the same symbol add into one count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMatchTally {
    counts: BTreeMap<SymbolId, u32>,
}

impl SymbolMatchTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one line's run length to its symbol
    pub fn add(&mut self, line: &Line) {
        *self.counts.entry(line.symbol).or_insert(0) += line.run_length as u32;
    }

    /// Matched cells for a symbol (0 if it won nothing)
    pub fn get(&self, symbol: SymbolId) -> u32 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// `(symbol, count)` pairs ordered by symbol id
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, u32)> + '_ {
        self.counts.iter().map(|(&id, &count)| (id, count))
    }

    /// Number of distinct symbols tallied
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Build the tally for a set of lines
pub fn aggregate(lines: &[Line]) -> SymbolMatchTally {
    let mut tally = SymbolMatchTally::new();
    for line in lines {
        tally.add(line);
    }
    tally
}
