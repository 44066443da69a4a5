//! Fault-containing rendering for Ward TUIs using ratatui.
//!
//! [`FaultBoundary`] guards a widget: a panic raised while the widget renders
//! is captured into a [`BoundaryState`] and replaced by a fallback view with
//! a "Try Again" control, instead of tearing down the whole terminal UI.

mod boundary;
mod capture;
mod fallback;
mod input;
mod theme;
pub mod trace;

pub use boundary::{BOUNDARY_COMPONENT, BoundaryState, FaultBoundary, RenderFn, handle_event};
pub use capture::install_panic_hook;
pub use fallback::{FALLBACK_TITLE, FallbackLayout, RETRY_BUTTON, fallback_layout};
pub use input::InputPump;
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

pub use ward_types::{Fault, FaultContext, UiOptions};
