#![forbid(unsafe_code)]

//! Streaming engine: progressive text reveal at a simulated typing cadence.

pub mod stream;

pub use stream::{StreamConfig, StreamSession};
