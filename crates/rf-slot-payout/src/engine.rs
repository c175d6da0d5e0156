//! Spin engine — draws, scans and pays one grid per spin

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{GridSpec, MachineConfig};
use crate::error::{PayoutError, PayoutResult};
use crate::grid::{self, Grid};
use crate::paytable::{Evaluation, PayTable};
use crate::spin::SpinResult;

/// Machine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineState {
    /// Ready for the next spin
    Idle,
    /// A spin is being drawn and paid
    Evaluating,
}

/// Session statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub total_bet: f64,
    pub total_win: f64,
    pub wins: u64,
    pub losses: u64,
    pub lines_hit: u64,
    pub max_multiplier: f64,
}

impl SessionStats {
    /// Return to player, in percent
    pub fn rtp(&self) -> f64 {
        if self.total_bet > 0.0 {
            (self.total_win / self.total_bet) * 100.0
        } else {
            0.0
        }
    }

    /// Share of winning spins, in percent
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            (self.wins as f64 / self.total_spins as f64) * 100.0
        } else {
            0.0
        }
    }

    fn record(&mut self, result: &SpinResult) {
        self.total_spins += 1;
        self.total_bet += result.bet;
        self.total_win += result.win();
        self.lines_hit += result.lines.len() as u64;
        if result.is_win() {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        self.max_multiplier = self.max_multiplier.max(result.total_multiplier);
    }
}

/// Holds a machine in [`MachineState::Evaluating`] until dropped
struct SpinGuard<'a> {
    state: &'a Mutex<MachineState>,
}

impl<'a> SpinGuard<'a> {
    fn acquire(state: &'a Mutex<MachineState>) -> PayoutResult<Self> {
        let mut current = state.lock();
        if *current == MachineState::Evaluating {
            return Err(PayoutError::ConcurrentSpin);
        }
        *current = MachineState::Evaluating;
        Ok(Self { state })
    }
}

impl Drop for SpinGuard<'_> {
    fn drop(&mut self) {
        *self.state.lock() = MachineState::Idle;
    }
}

/// A single slot machine
///
/// Spins are serialized: a spin requested while another is in flight fails
/// with [`PayoutError::ConcurrentSpin`]. The paytable is shared read-only, so
/// independent machines may be built from clones of the same [`PayTable`].
pub struct SlotMachine<R = StdRng> {
    /// Grid dimensions
    grid: GridSpec,
    /// Symbols, line factors and bonus tiers
    paytable: PayTable,
    /// Random source for grid draws
    rng: Mutex<R>,
    /// Idle / Evaluating
    state: Mutex<MachineState>,
    /// Spins started since creation or the last stats reset
    spin_count: AtomicU64,
    /// Current session stats
    stats: Mutex<SessionStats>,
}

impl SlotMachine<StdRng> {
    /// Create a machine seeded from the operating system
    pub fn new(config: MachineConfig) -> PayoutResult<Self> {
        Self::with_rng(config, StdRng::from_os_rng())
    }
}

impl<R: RngCore + SeedableRng> SlotMachine<R> {
    /// Create a machine with a fixed seed for reproducible spins
    pub fn seeded(config: MachineConfig, seed: u64) -> PayoutResult<Self> {
        Self::with_rng(config, R::seed_from_u64(seed))
    }

    /// Reseed the random source
    pub fn seed(&self, seed: u64) {
        *self.rng.lock() = R::seed_from_u64(seed);
    }
}

impl<R: RngCore> SlotMachine<R> {
    /// Create a machine with a caller-supplied random source
    pub fn with_rng(config: MachineConfig, rng: R) -> PayoutResult<Self> {
        let paytable = PayTable::from_config(&config)?;
        Self::with_paytable(config.grid, paytable, rng)
    }

    /// Create a machine around an existing (possibly shared) paytable
    pub fn with_paytable(grid: GridSpec, paytable: PayTable, rng: R) -> PayoutResult<Self> {
        if paytable.catalog().is_empty() {
            return Err(PayoutError::config("symbol catalog is empty"));
        }
        if grid.width == 0 || grid.height == 0 {
            return Err(PayoutError::config(format!(
                "grid dimensions must be non-zero, got {}x{}",
                grid.width, grid.height
            )));
        }
        paytable.line_pays().validate(grid)?;

        log::info!(
            "Slot machine ready: {}x{} grid, {} symbols, {} bonus tiers",
            grid.width,
            grid.height,
            paytable.catalog().len(),
            paytable.bonus_table().tiers().len()
        );

        Ok(Self {
            grid,
            paytable,
            rng: Mutex::new(rng),
            state: Mutex::new(MachineState::Idle),
            spin_count: AtomicU64::new(0),
            stats: Mutex::new(SessionStats::default()),
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SPIN EXECUTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Draw a grid and pay it
    ///
    /// The host settles `bet × total_multiplier` (see [`SpinResult::win`]).
    pub fn spin(&self, bet: f64) -> PayoutResult<SpinResult> {
        if !bet.is_finite() || bet < 0.0 {
            return Err(PayoutError::InvalidBet(bet));
        }

        let _guard = SpinGuard::acquire(&self.state).inspect_err(|_| {
            log::warn!("Spin rejected: previous spin still evaluating");
        })?;

        let spin_id = self.spin_count.fetch_add(1, Ordering::Relaxed) + 1;
        let grid = {
            let mut rng = self.rng.lock();
            grid::generate(self.grid, self.paytable.catalog(), &mut *rng)?
        };

        let eval = self.paytable.evaluate(&grid)?;
        let result = SpinResult::new(spin_id, bet, grid, eval);
        self.stats.lock().record(&result);

        log::debug!(
            "spin {}: {} line(s), multiplier {:.2} (lines {:.2} + bonus {:.2})",
            spin_id,
            result.lines.len(),
            result.total_multiplier,
            result.payout.line_total,
            result.payout.bonus_total
        );

        Ok(result)
    }

    /// Pay an externally supplied grid
    ///
    /// Does not touch the random source, machine state or session stats.
    pub fn evaluate(&self, grid: &Grid) -> PayoutResult<Evaluation> {
        self.paytable.evaluate(grid)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn state(&self) -> MachineState {
        *self.state.lock()
    }

    pub fn grid_spec(&self) -> GridSpec {
        self.grid
    }

    pub fn paytable(&self) -> &PayTable {
        &self.paytable
    }

    /// Snapshot of the session stats
    pub fn stats(&self) -> SessionStats {
        self.stats.lock().clone()
    }

    /// Reset session stats and the spin counter
    pub fn reset_stats(&self) {
        *self.stats.lock() = SessionStats::default();
        self.spin_count.store(0, Ordering::Relaxed);
    }
}
