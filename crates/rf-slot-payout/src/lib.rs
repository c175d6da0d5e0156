//! # rf-slot-payout — Line detection and payout engine
//!
//! Pays a rectangular grid of randomly drawn symbols. One spin draws a grid,
//! finds its winning lines, tallies matched cells per symbol and turns both
//! into a single multiplier for the wager.
//!
//! ## Paying rules
//!
//! - **Vertical lines**: a column pays only when every row matches.
//! - **Horizontal lines**: each maximal run of 3+ identical symbols in a row
//!   pays once.
//! - **Line pay**: symbol multiplier × run-length factor, summed over lines.
//! - **Bonus**: per symbol, matched cells × tiered rate for that count.
//!
//! ## Architecture
//!
//! ```text
//! SlotMachine
//!     │
//!     ├── GridSpec (columns × rows)
//!     └── PayTable (shared, read-only)
//!           ├── SymbolCatalog (name → base multiplier)
//!           ├── LinePayTable (run length → factor)
//!           └── BonusTable (tally count → rate)
//!                 │
//!                 v
//!     generate → scan → aggregate → calculate → SpinResult
//!                                                   │
//!                                                   v
//!                                     PresentationSchedule (timing)
//! ```
//!
//! The host settles `bet × total_multiplier`; balances, currency formatting
//! and rendering stay outside this crate.

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod paytable;
pub mod scanner;
pub mod spin;
pub mod symbols;
pub mod tally;
pub mod timing;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use grid::*;
pub use paytable::*;
pub use scanner::*;
pub use spin::*;
pub use symbols::*;
pub use tally::*;
pub use timing::*;
