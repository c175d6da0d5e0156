//! Presentation timing
//!
//! Turns a finished [`SpinResult`] into a schedule of timestamped cues for
//! the presentation layer (slot drop, line reveal and blink, win display).
//! Nothing here feeds back into evaluation.

use serde::{Deserialize, Serialize};

use crate::spin::SpinResult;

/// Timing profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimingProfile {
    /// Normal gameplay timing
    Normal,
    /// Fast/Turbo mode
    Turbo,
    /// Everything at once (tests, replays)
    Instant,
    /// Custom timing multiplier
    Custom,
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self::Normal
    }
}

/// Detailed timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Profile type
    pub profile: TimingProfile,

    /// Time for one column of slots to drop into place (ms); columns drop
    /// one after another
    pub slot_drop_ms: f64,

    /// Delay between the last drop and the first line reveal (ms)
    pub win_reveal_delay_ms: f64,

    /// Time each winning line is shown before the next one (ms)
    pub line_reveal_ms: f64,

    /// Half-period of the line blink (ms)
    pub line_blink_interval_ms: f64,

    /// Blink toggles per line after it is revealed
    pub line_blink_count: u32,

    /// Minimum time between cues (ms)
    pub min_event_interval_ms: f64,
}

impl TimingConfig {
    /// Normal gameplay timing
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            slot_drop_ms: 330.0,
            win_reveal_delay_ms: 200.0,
            line_reveal_ms: 500.0,
            line_blink_interval_ms: 250.0,
            line_blink_count: 4,
            min_event_interval_ms: 20.0,
        }
    }

    /// Turbo mode
    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            slot_drop_ms: 120.0,
            win_reveal_delay_ms: 80.0,
            line_reveal_ms: 200.0,
            line_blink_interval_ms: 100.0,
            line_blink_count: 2,
            min_event_interval_ms: 10.0,
        }
    }

    /// No delays at all
    pub fn instant() -> Self {
        Self {
            profile: TimingProfile::Instant,
            slot_drop_ms: 0.0,
            win_reveal_delay_ms: 0.0,
            line_reveal_ms: 0.0,
            line_blink_interval_ms: 0.0,
            line_blink_count: 0,
            min_event_interval_ms: 0.0,
        }
    }

    /// Get config for profile
    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Instant => Self::instant(),
            TimingProfile::Custom => Self::normal(),
        }
    }

    /// Scale timing by factor (< 1.0 = faster)
    pub fn scaled(&self, factor: f64) -> Self {
        let factor = factor.max(0.0);
        Self {
            profile: TimingProfile::Custom,
            slot_drop_ms: self.slot_drop_ms * factor,
            win_reveal_delay_ms: self.win_reveal_delay_ms * factor,
            line_reveal_ms: self.line_reveal_ms * factor,
            line_blink_interval_ms: self.line_blink_interval_ms * factor,
            line_blink_count: self.line_blink_count,
            min_event_interval_ms: self.min_event_interval_ms * factor,
        }
    }

    /// Time until every column has landed
    pub fn total_drop_duration(&self, columns: usize) -> f64 {
        self.slot_drop_ms * columns as f64
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::normal()
    }
}

/// Timestamp generator for sequential cues
#[derive(Debug, Clone)]
pub struct TimestampGenerator {
    current_ms: f64,
    config: TimingConfig,
}

impl TimestampGenerator {
    /// Create new generator
    pub fn new(config: TimingConfig) -> Self {
        Self {
            current_ms: 0.0,
            config,
        }
    }

    /// Reset to zero
    pub fn reset(&mut self) {
        self.current_ms = 0.0;
    }

    /// Get current timestamp
    pub fn current(&self) -> f64 {
        self.current_ms
    }

    /// Advance by duration and return new timestamp
    pub fn advance(&mut self, duration_ms: f64) -> f64 {
        self.current_ms += duration_ms.max(self.config.min_event_interval_ms);
        self.current_ms
    }

    /// Advance for one column landing
    pub fn slot_drop(&mut self) -> f64 {
        self.advance(self.config.slot_drop_ms)
    }

    /// Advance for win reveal
    pub fn win_reveal(&mut self) -> f64 {
        self.advance(self.config.win_reveal_delay_ms)
    }

    /// Advance for one blink toggle
    pub fn blink(&mut self) -> f64 {
        self.advance(self.config.line_blink_interval_ms)
    }

    /// Advance for the next line reveal
    pub fn next_line(&mut self) -> f64 {
        self.advance(self.config.line_reveal_ms)
    }

    /// Get timing config reference
    pub fn config(&self) -> &TimingConfig {
        &self.config
    }
}

/// What a cue asks the presentation layer to do
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CueKind {
    /// Column `column` has landed
    SlotDrop { column: usize },
    /// Draw winning line `line` (index into `SpinResult::lines`)
    LineReveal { line: usize },
    /// Toggle the drawn line's visibility
    LineBlink { line: usize, visible: bool },
    /// Show the spin's total multiplier
    WinShown { multiplier: f64 },
}

/// A timestamped presentation cue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresentationCue {
    /// Milliseconds from spin start
    pub at_ms: f64,
    pub kind: CueKind,
}

/// Ordered cues for one spin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresentationSchedule {
    pub cues: Vec<PresentationCue>,
}

impl PresentationSchedule {
    /// Build the schedule for a spin
    ///
    /// Columns drop left to right, then each winning line is revealed and
    /// blinked in result order, and the win is shown last.
    pub fn build(result: &SpinResult, config: &TimingConfig) -> Self {
        let mut ts = TimestampGenerator::new(config.clone());
        let mut cues = Vec::new();

        for column in 0..result.grid.width() {
            cues.push(PresentationCue {
                at_ms: ts.slot_drop(),
                kind: CueKind::SlotDrop { column },
            });
        }

        for line in 0..result.lines.len() {
            let at_ms = if line == 0 { ts.win_reveal() } else { ts.next_line() };
            cues.push(PresentationCue {
                at_ms,
                kind: CueKind::LineReveal { line },
            });

            let mut visible = true;
            for _ in 0..config.line_blink_count {
                visible = !visible;
                cues.push(PresentationCue {
                    at_ms: ts.blink(),
                    kind: CueKind::LineBlink { line, visible },
                });
            }
            // A line always ends up drawn.
            if !visible {
                cues.push(PresentationCue {
                    at_ms: ts.blink(),
                    kind: CueKind::LineBlink {
                        line,
                        visible: true,
                    },
                });
            }
        }

        cues.push(PresentationCue {
            at_ms: ts.current(),
            kind: CueKind::WinShown {
                multiplier: result.total_multiplier,
            },
        });

        Self { cues }
    }

    /// Timestamp of the last cue
    pub fn duration_ms(&self) -> f64 {
        self.cues.last().map(|c| c.at_ms).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}
