#![forbid(unsafe_code)]

//! Surface capability interface and the in-memory reference surface.
//!
//! A *surface* is any addressable text region the sequencer writes to. The
//! [`TextSurface`] trait is the full capability set the engine and the
//! orchestrator need: grapheme append, a trailing emphasis window, caret
//! placement, atomic rich-content swaps, and scroll control. Nothing above
//! this trait depends on a concrete UI toolkit.
//!
//! # Invariants
//!
//! 1. `append` never reorders, skips, or duplicates graphemes.
//! 2. `mark_tail(n)` marks exactly the last `min(n, len)` appended graphemes
//!    and unmarks everything older.
//! 3. `clear_markers` removes every emphasis marker at once.
//! 4. At most one caret exists; `place_caret` is idempotent and the caret
//!    always trails the newest grapheme.
//!
//! # Failure Modes
//!
//! - `mark_tail(0)` is equivalent to `clear_markers`.
//! - Scroll offsets are clamped to `ScrollState::max_offset`.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

// ---------------------------------------------------------------------------
// Rich content spans
// ---------------------------------------------------------------------------

/// Syntax category of a content span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Plain,
    Keyword,
    Variable,
    StringLit,
    Tag,
    Attribute,
    Value,
}

/// One fragment of pre-rendered rich content.
///
/// `highlighted` is the persistent "pending edit" emphasis carried by
/// authored content; `marked` is the transient emphasis the streaming engine
/// applies to freshly emitted graphemes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub text: String,
    pub highlighted: bool,
    pub marked: bool,
}

impl Span {
    /// Create a span with the given syntax kind.
    #[must_use]
    pub fn new(kind: SpanKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            highlighted: false,
            marked: false,
        }
    }

    /// Plain, uncategorized text.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(SpanKind::Plain, text)
    }

    /// Language keyword.
    #[must_use]
    pub fn keyword(text: impl Into<String>) -> Self {
        Self::new(SpanKind::Keyword, text)
    }

    /// Identifier / variable name.
    #[must_use]
    pub fn variable(text: impl Into<String>) -> Self {
        Self::new(SpanKind::Variable, text)
    }

    /// String literal.
    #[must_use]
    pub fn string_lit(text: impl Into<String>) -> Self {
        Self::new(SpanKind::StringLit, text)
    }

    /// Markup tag.
    #[must_use]
    pub fn tag(text: impl Into<String>) -> Self {
        Self::new(SpanKind::Tag, text)
    }

    /// Markup attribute name.
    #[must_use]
    pub fn attribute(text: impl Into<String>) -> Self {
        Self::new(SpanKind::Attribute, text)
    }

    /// Markup attribute value.
    #[must_use]
    pub fn value(text: impl Into<String>) -> Self {
        Self::new(SpanKind::Value, text)
    }

    /// Mark this span as a pending-edit highlight.
    #[must_use]
    pub fn highlighted(mut self) -> Self {
        self.highlighted = true;
        self
    }
}

// ---------------------------------------------------------------------------
// Scroll state
// ---------------------------------------------------------------------------

/// Snapshot of a surface's scrollable extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    /// Total content height in rows (after soft wrapping).
    pub content_rows: usize,
    /// Visible height in rows.
    pub viewport_rows: usize,
    /// Current scroll offset in rows from the top.
    pub offset: usize,
}

impl ScrollState {
    /// Largest valid scroll offset.
    #[inline]
    #[must_use]
    pub fn max_offset(&self) -> usize {
        self.content_rows.saturating_sub(self.viewport_rows)
    }

    /// Whether the content is taller than the viewport.
    #[inline]
    #[must_use]
    pub fn overflows(&self) -> bool {
        self.content_rows > self.viewport_rows
    }
}

// ---------------------------------------------------------------------------
// Capability trait
// ---------------------------------------------------------------------------

/// Capability interface for any concrete rendering surface.
pub trait TextSurface {
    /// Append text grapheme by grapheme after the existing content.
    fn append(&mut self, text: &str);

    /// Mark exactly the last `len` appended graphemes as freshly emitted,
    /// unmarking everything older.
    fn mark_tail(&mut self, len: usize);

    /// Remove every emphasis marker at once.
    fn clear_markers(&mut self);

    /// Replace the whole content with pre-rendered spans (atomic swap).
    fn set_content(&mut self, spans: Vec<Span>);

    /// Remove all content, markers, and the caret.
    fn clear(&mut self);

    /// Show the caret after the newest grapheme. Idempotent.
    fn place_caret(&mut self);

    /// Remove the caret if present.
    fn remove_caret(&mut self);

    /// Current scrollable extent.
    fn scroll_state(&self) -> ScrollState;

    /// Set the scroll offset, clamped to the maximum.
    fn set_scroll_offset(&mut self, offset: usize);
}

// ---------------------------------------------------------------------------
// MemorySurface
// ---------------------------------------------------------------------------

/// In-memory [`TextSurface`] used by the demo and by tests.
///
/// Content is a flat span list; appended text becomes one span per grapheme
/// so the emphasis tail can be tracked per character.
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySurface {
    spans: Vec<Span>,
    caret: bool,
    viewport_rows: usize,
    viewport_cols: usize,
    offset: usize,
}

impl MemorySurface {
    /// Create an empty surface with the given viewport size.
    #[must_use]
    pub fn new(viewport_rows: usize, viewport_cols: usize) -> Self {
        Self {
            spans: Vec::new(),
            caret: false,
            viewport_rows,
            viewport_cols: viewport_cols.max(1),
            offset: 0,
        }
    }

    /// Create a surface pre-filled with content.
    #[must_use]
    pub fn with_content(viewport_rows: usize, viewport_cols: usize, spans: Vec<Span>) -> Self {
        let mut surface = Self::new(viewport_rows, viewport_cols);
        surface.spans = spans;
        surface
    }

    /// All content spans in order.
    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Concatenated plain text of all spans.
    #[must_use]
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Number of spans currently carrying the transient emphasis marker.
    #[must_use]
    pub fn marked_count(&self) -> usize {
        self.spans.iter().filter(|s| s.marked).count()
    }

    /// Whether any span carries a pending-edit highlight.
    #[must_use]
    pub fn has_highlights(&self) -> bool {
        self.spans.iter().any(|s| s.highlighted)
    }

    /// Strip pending-edit highlights, keeping the text in place.
    pub fn clear_highlights(&mut self) {
        for span in &mut self.spans {
            span.highlighted = false;
        }
    }

    /// Whether the caret is currently shown.
    #[must_use]
    pub fn caret_visible(&self) -> bool {
        self.caret
    }

    /// Current scroll offset in rows.
    #[must_use]
    pub fn scroll_offset(&self) -> usize {
        self.offset
    }

    /// Rows the content occupies after soft wrapping to the viewport width.
    fn content_rows(&self) -> usize {
        let text = self.text();
        if text.is_empty() {
            return 0;
        }
        text.split('\n')
            .map(|line| {
                let width = UnicodeWidthStr::width(line);
                if width == 0 {
                    1
                } else {
                    width.div_ceil(self.viewport_cols)
                }
            })
            .sum()
    }
}

impl TextSurface for MemorySurface {
    fn append(&mut self, text: &str) {
        for grapheme in text.graphemes(true) {
            let mut span = Span::plain(grapheme);
            span.marked = true;
            self.spans.push(span);
        }
    }

    fn mark_tail(&mut self, len: usize) {
        let total = self.spans.len();
        let keep_from = total.saturating_sub(len);
        for (i, span) in self.spans.iter_mut().enumerate() {
            span.marked = i >= keep_from && len > 0;
        }
    }

    fn clear_markers(&mut self) {
        for span in &mut self.spans {
            span.marked = false;
        }
    }

    fn set_content(&mut self, spans: Vec<Span>) {
        self.spans = spans;
    }

    fn clear(&mut self) {
        self.spans.clear();
        self.caret = false;
        self.offset = 0;
    }

    fn place_caret(&mut self) {
        self.caret = true;
    }

    fn remove_caret(&mut self) {
        self.caret = false;
    }

    fn scroll_state(&self) -> ScrollState {
        ScrollState {
            content_rows: self.content_rows(),
            viewport_rows: self.viewport_rows,
            offset: self.offset,
        }
    }

    fn set_scroll_offset(&mut self, offset: usize) {
        self.offset = offset.min(self.scroll_state().max_offset());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
