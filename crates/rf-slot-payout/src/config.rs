//! Machine configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PayoutError, PayoutResult};
use crate::paytable::{BonusTable, LinePayTable};
use crate::symbols::{Symbol, SymbolCatalog, classic_symbols};

/// Grid dimensions (columns × rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
}

impl GridSpec {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Standard 5×3
    pub fn standard_5x3() -> Self {
        Self::new(5, 3)
    }

    /// Total grid positions
    pub fn total_positions(&self) -> PayoutResult<usize> {
        self.width.checked_mul(self.height).ok_or_else(|| {
            PayoutError::config(format!(
                "{}x{} grid has too many positions",
                self.width, self.height
            ))
        })
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::standard_5x3()
    }
}

/// Everything a machine needs to draw and pay a grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    pub grid: GridSpec,
    /// Symbol catalog entries, in id order
    pub symbols: Vec<Symbol>,
    /// Run length → line factor
    pub line_pays: LinePayTable,
    /// Tally count → bonus rate
    pub bonus_table: BonusTable,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            symbols: classic_symbols(),
            line_pays: LinePayTable::standard(),
            bonus_table: BonusTable::standard(),
        }
    }
}

impl MachineConfig {
    /// Default tables with a custom grid and symbol set
    pub fn new(grid: GridSpec, symbols: Vec<Symbol>) -> Self {
        Self {
            grid,
            symbols,
            ..Self::default()
        }
    }

    pub fn with_line_pays(mut self, line_pays: LinePayTable) -> Self {
        self.line_pays = line_pays;
        self
    }

    pub fn with_bonus_table(mut self, bonus_table: BonusTable) -> Self {
        self.bonus_table = bonus_table;
        self
    }

    /// Check the whole config before a machine is built from it
    pub fn validate(&self) -> PayoutResult<()> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(PayoutError::config(format!(
                "grid dimensions must be non-zero, got {}x{}",
                self.grid.width, self.grid.height
            )));
        }
        self.grid.total_positions()?;
        if self.symbols.is_empty() {
            return Err(PayoutError::config("symbol catalog is empty"));
        }
        SymbolCatalog::new(self.symbols.clone())?;
        self.line_pays.validate(self.grid)?;
        self.bonus_table.validate()?;
        Ok(())
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> PayoutResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| PayoutError::Serialization(format!("Invalid config JSON: {}", e)))
    }

    /// Parse from YAML
    pub fn from_yaml(yaml: &str) -> PayoutResult<Self> {
        serde_yml::from_str(yaml)
            .map_err(|e| PayoutError::Serialization(format!("Invalid config YAML: {}", e)))
    }

    /// Export as pretty JSON
    pub fn to_json(&self) -> PayoutResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PayoutError::Serialization(e.to_string()))
    }

    /// Export as YAML
    pub fn to_yaml(&self) -> PayoutResult<String> {
        serde_yml::to_string(self).map_err(|e| PayoutError::Serialization(e.to_string()))
    }

    /// Load and validate a `.json`, `.yaml` or `.yml` file
    pub fn load(path: impl AsRef<Path>) -> PayoutResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let config = match extension.as_deref() {
            Some("json") => Self::from_json(&text)?,
            Some("yaml") | Some("yml") => Self::from_yaml(&text)?,
            other => {
                return Err(PayoutError::config(format!(
                    "unsupported config format: {:?}",
                    other.unwrap_or("")
                )));
            }
        };

        config.validate()?;
        log::info!(
            "Loaded machine config from {:?}: {}x{} grid, {} symbols",
            path,
            config.grid.width,
            config.grid.height,
            config.symbols.len()
        );
        Ok(config)
    }
}
