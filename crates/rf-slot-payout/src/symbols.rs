//! Symbol definitions and the symbol catalog

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PayoutError, PayoutResult};

/// Index of a symbol inside its [`SymbolCatalog`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u16);

impl SymbolId {
    /// Catalog slot for this id
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A symbol definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    /// Symbol name, unique within a catalog (e.g. "CHERRY", "SEVEN")
    pub name: String,
    /// Base multiplier applied to every line this symbol wins
    pub multiplier: f64,
}

impl Symbol {
    /// Create a symbol
    pub fn new(name: impl Into<String>, multiplier: f64) -> Self {
        Self {
            name: name.into(),
            multiplier,
        }
    }
}

/// Read-only table of symbols, indexed by [`SymbolId`]
///
/// Names are resolved to ids once when the catalog is built; everything
/// downstream (grids, lines, tallies) works on ids.
#[derive(Debug, Clone)]
pub struct SymbolCatalog {
    symbols: Vec<Symbol>,
    by_name: HashMap<String, SymbolId>,
}

impl SymbolCatalog {
    /// Build a catalog, rejecting duplicate names and bad multipliers
    pub fn new(symbols: Vec<Symbol>) -> PayoutResult<Self> {
        if symbols.len() > u16::MAX as usize {
            return Err(PayoutError::config(format!(
                "catalog holds {} symbols, at most {} are supported",
                symbols.len(),
                u16::MAX
            )));
        }

        let mut by_name = HashMap::with_capacity(symbols.len());
        for (idx, symbol) in symbols.iter().enumerate() {
            if symbol.name.is_empty() {
                return Err(PayoutError::config(format!("symbol {idx} has an empty name")));
            }
            if !symbol.multiplier.is_finite() || symbol.multiplier < 0.0 {
                return Err(PayoutError::config(format!(
                    "symbol '{}' has invalid multiplier {}",
                    symbol.name, symbol.multiplier
                )));
            }
            if by_name
                .insert(symbol.name.clone(), SymbolId(idx as u16))
                .is_some()
            {
                return Err(PayoutError::config(format!(
                    "duplicate symbol name '{}'",
                    symbol.name
                )));
            }
        }

        Ok(Self { symbols, by_name })
    }

    /// Classic five-symbol set
    pub fn classic() -> Self {
        let symbols = classic_symbols();
        let by_name = symbols
            .iter()
            .enumerate()
            .map(|(idx, s)| (s.name.clone(), SymbolId(idx as u16)))
            .collect();
        Self { symbols, by_name }
    }

    /// Get symbol by id
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    /// Resolve a symbol name to its id
    pub fn lookup(&self, name: &str) -> PayoutResult<SymbolId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| PayoutError::UnknownSymbol(name.to_string()))
    }

    /// Check that an id belongs to this catalog
    pub fn resolve(&self, id: SymbolId) -> PayoutResult<&Symbol> {
        self.get(id)
            .ok_or_else(|| PayoutError::UnknownSymbol(id.to_string()))
    }

    /// Symbol name for an id, `"?"` if unknown
    pub fn name_of(&self, id: SymbolId) -> &str {
        self.get(id).map(|s| s.name.as_str()).unwrap_or("?")
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate `(id, symbol)` pairs in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(idx, s)| (SymbolId(idx as u16), s))
    }

    /// Underlying symbol list
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        Self::classic()
    }
}

/// Symbols used by [`SymbolCatalog::classic`] and the default machine config
pub fn classic_symbols() -> Vec<Symbol> {
    vec![
        Symbol::new("CHERRY", 1.0),
        Symbol::new("LEMON", 1.5),
        Symbol::new("BELL", 2.5),
        Symbol::new("BAR", 5.0),
        Symbol::new("SEVEN", 10.0),
    ]
}
