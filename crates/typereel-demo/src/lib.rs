#![forbid(unsafe_code)]

//! The scripted code-editing console demo: a fixed timeline that simulates
//! an AI assistant restyling a button, driven by the Typereel engine.

pub mod cli;
pub mod console;
pub mod content;
pub mod script;

pub use console::ConsoleDemo;
pub use script::{SCRIPT, Step};
