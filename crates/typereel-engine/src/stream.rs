#![forbid(unsafe_code)]

//! Tick-driven character streaming with a trailing emphasis window.
//!
//! A [`StreamSession`] reveals a fixed source text into a [`TextSurface`] at
//! a configured typing cadence. Each elapsed tick interval emits a batch of
//! 1–2 graphemes (uniformly chosen), re-seats the trailing caret, keeps the
//! emphasis window on the newest emissions, and pins the scroll offset to
//! the bottom while the content overflows.
//!
//! After the final grapheme the session enters a cooling phase: the caret is
//! gone and the stream counts as complete, but markers stay until the
//! configured cooldown elapses, then every marker is swept at once.
//!
//! # Invariants
//!
//! 1. The source is emitted in order with no grapheme skipped or duplicated.
//! 2. At most 2 graphemes are emitted per tick interval.
//! 3. An empty source is complete and settled at start, with zero ticks.
//! 4. `halt` stops ticking without ever reporting completion.
//!
//! # Determinism
//!
//! Batch jitter uses xorshift32 from a caller-supplied seed, so a session is
//! reproducible tick-for-tick.

use std::time::Duration;

use typereel_core::surface::TextSurface;
use unicode_segmentation::UnicodeSegmentation;

// ---------------------------------------------------------------------------
// Xorshift32 RNG
// ---------------------------------------------------------------------------

#[inline]
fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Rates below this are clamped so the tick interval stays finite.
const MIN_RATE: f32 = 0.001;

/// Fallback seed; xorshift32 cannot run from an all-zero state.
const DEFAULT_SEED: u32 = 0x9E37_79B9;

/// Streaming cadence and emphasis configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamConfig {
    chars_per_second: f32,
    emphasis_tail: usize,
    cooldown: Duration,
    seed: u32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            chars_per_second: 100.0,
            emphasis_tail: 40,
            cooldown: Duration::from_millis(1500),
            seed: DEFAULT_SEED,
        }
    }
}

impl StreamConfig {
    /// Default cadence: 100 chars/s, 40-char emphasis tail, 1.5 s cooldown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the emission rate in characters per second (clamped above zero).
    #[must_use]
    pub fn chars_per_second(mut self, rate: f32) -> Self {
        self.chars_per_second = rate.max(MIN_RATE);
        self
    }

    /// Set the number of most-recent graphemes kept visually marked.
    #[must_use]
    pub fn emphasis_tail(mut self, len: usize) -> Self {
        self.emphasis_tail = len;
        self
    }

    /// Set how long markers linger after the stream completes.
    #[must_use]
    pub fn cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Seed the batch jitter for reproducible runs.
    #[must_use]
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = if seed == 0 { DEFAULT_SEED } else { seed };
        self
    }

    /// Time between emission ticks (`1000 / rate` milliseconds).
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.chars_per_second.max(MIN_RATE))
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamPhase {
    /// Emitting graphemes on each elapsed interval.
    Streaming,
    /// All graphemes emitted; markers linger until the cooldown elapses.
    Cooling { remaining: Duration },
    /// Markers swept; nothing left to do.
    Settled,
    /// Hard-stopped; never reports completion.
    Halted,
}

/// One in-progress text streaming operation.
///
/// Owned by exactly one driver at a time; the driver advances it with
/// [`StreamSession::tick`] and polls [`StreamSession::is_complete`].
#[derive(Debug, Clone)]
pub struct StreamSession {
    source: String,
    /// Byte offset where each grapheme starts.
    bounds: Vec<usize>,
    /// Graphemes emitted so far.
    cursor: usize,
    interval: Duration,
    carry: Duration,
    emphasis_tail: usize,
    cooldown: Duration,
    rng: u32,
    ticks: u64,
    phase: StreamPhase,
}

impl StreamSession {
    /// Begin streaming `source` into `surface`.
    ///
    /// The surface is cleared first. An empty source completes (and settles)
    /// immediately, with no ticks and no caret.
    pub fn start(
        config: &StreamConfig,
        source: impl Into<String>,
        surface: &mut dyn TextSurface,
    ) -> Self {
        let source = source.into();
        surface.clear();

        let bounds: Vec<usize> = source.grapheme_indices(true).map(|(i, _)| i).collect();
        let phase = if bounds.is_empty() {
            StreamPhase::Settled
        } else {
            StreamPhase::Streaming
        };
        tracing::debug!(graphemes = bounds.len(), "stream session started");

        Self {
            source,
            bounds,
            cursor: 0,
            interval: config.tick_interval(),
            carry: Duration::ZERO,
            emphasis_tail: config.emphasis_tail,
            cooldown: config.cooldown,
            rng: if config.seed == 0 {
                DEFAULT_SEED
            } else {
                config.seed
            },
            ticks: 0,
            phase,
        }
    }

    /// Advance the session by `dt`, emitting one batch per elapsed interval.
    pub fn tick(&mut self, dt: Duration, surface: &mut dyn TextSurface) {
        match self.phase {
            StreamPhase::Streaming => {
                self.carry += dt;
                while self.carry >= self.interval && self.phase == StreamPhase::Streaming {
                    self.carry -= self.interval;
                    self.emit_batch(surface);
                }
            }
            StreamPhase::Cooling { remaining } => {
                let remaining = remaining.saturating_sub(dt);
                if remaining.is_zero() {
                    surface.clear_markers();
                    self.phase = StreamPhase::Settled;
                    tracing::debug!("emphasis markers swept");
                } else {
                    self.phase = StreamPhase::Cooling { remaining };
                }
            }
            StreamPhase::Settled | StreamPhase::Halted => {}
        }
    }

    /// Emit 1–2 graphemes, re-seat the caret, and pin the scroll offset.
    fn emit_batch(&mut self, surface: &mut dyn TextSurface) {
        let total = self.bounds.len();
        let batch = 1 + (xorshift32(&mut self.rng) as usize & 1);
        let end = (self.cursor + batch).min(total);

        let byte_start = self.bounds[self.cursor];
        let byte_end = if end == total {
            self.source.len()
        } else {
            self.bounds[end]
        };

        surface.remove_caret();
        surface.append(&self.source[byte_start..byte_end]);
        surface.mark_tail(self.emphasis_tail.min(end));
        self.cursor = end;
        self.ticks += 1;

        if self.cursor < total {
            surface.place_caret();
        } else {
            surface.remove_caret();
            self.phase = if self.cooldown.is_zero() {
                surface.clear_markers();
                StreamPhase::Settled
            } else {
                StreamPhase::Cooling {
                    remaining: self.cooldown,
                }
            };
            tracing::debug!(ticks = self.ticks, "stream complete");
        }

        let scroll = surface.scroll_state();
        if scroll.overflows() {
            surface.set_scroll_offset(scroll.max_offset());
        }
    }

    /// Hard stop: halts ticking without firing the completion signal.
    pub fn halt(&mut self) {
        if self.phase != StreamPhase::Settled {
            self.phase = StreamPhase::Halted;
            tracing::debug!(emitted = self.cursor, "stream halted");
        }
    }

    /// Whether every grapheme has been emitted and appended.
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(
            self.phase,
            StreamPhase::Cooling { .. } | StreamPhase::Settled
        )
    }

    /// Whether the post-completion marker sweep has also run.
    #[inline]
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.phase == StreamPhase::Settled
    }

    /// Whether the session was hard-stopped.
    #[inline]
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.phase == StreamPhase::Halted
    }

    /// Graphemes emitted so far.
    #[inline]
    #[must_use]
    pub fn emitted(&self) -> usize {
        self.cursor
    }

    /// Total graphemes in the source.
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.bounds.len()
    }

    /// Emission ticks performed so far.
    #[inline]
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
