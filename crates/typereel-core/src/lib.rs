#![forbid(unsafe_code)]

//! Core: surface capability interface, stage registry, and phase tracking.

pub mod phase;
pub mod stage;
pub mod surface;

pub use phase::{Phase, PhaseTracker};
pub use stage::{ClassSet, Control, Stage};
pub use surface::{MemorySurface, ScrollState, Span, SpanKind, TextSurface};
