//! Core domain types for Ward.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

mod fault;
mod sanitize;

pub use fault::{Fault, FaultContext, MAX_FAULT_MESSAGE_CHARS};
pub use sanitize::{sanitize_terminal_text, truncate_chars};

/// Cosmetic rendering options shared by every view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    /// Use ASCII-only glyphs.
    pub ascii_only: bool,
    /// Use the high-contrast palette.
    pub high_contrast: bool,
}
