//! Fault-containing render boundary.
//!
//! [`FaultBoundary`] wraps a widget. While its [`BoundaryState`] is clean the
//! widget renders as if unwrapped. If the widget panics during `render`, the
//! boundary captures the fault, switches to the faulted state and draws the
//! fallback view in the same frame. The state stays faulted until the user
//! activates "Try Again" ([`handle_event`] or [`BoundaryState::reset_fault`]);
//! the next frame then renders the widget again.
//!
//! ```no_run
//! use ratatui::{Frame, widgets::Paragraph};
//! use ward_tui::{BoundaryState, FaultBoundary};
//!
//! fn draw(frame: &mut Frame, state: &mut BoundaryState) {
//!     let content = Paragraph::new("guarded");
//!     frame.render_stateful_widget(FaultBoundary::new(content), frame.area(), state);
//! }
//! ```

use std::panic::{self, AssertUnwindSafe};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    widgets::{StatefulWidget, Widget},
};

use ward_types::{Fault, FaultContext, UiOptions};

use crate::capture::{CaptureGuard, install_panic_hook};
use crate::fallback::{fallback_layout, render_fallback};
use crate::trace;

/// Component name the boundary contributes to fault traces.
pub const BOUNDARY_COMPONENT: &str = "FaultBoundary";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Clean,
    Faulted {
        fault: Fault,
        context: Option<FaultContext>,
    },
}

/// Capture state owned by one boundary.
///
/// A fault and its context exist only while faulted, and always come from
/// the same capture event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryState {
    phase: Phase,
}

impl BoundaryState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_fault(&self) -> bool {
        matches!(self.phase, Phase::Faulted { .. })
    }

    #[must_use]
    pub fn fault(&self) -> Option<&Fault> {
        match &self.phase {
            Phase::Clean => None,
            Phase::Faulted { fault, .. } => Some(fault),
        }
    }

    #[must_use]
    pub fn fault_context(&self) -> Option<&FaultContext> {
        match &self.phase {
            Phase::Clean => None,
            Phase::Faulted { context, .. } => context.as_ref(),
        }
    }

    /// Record a fault and switch to the faulted state.
    ///
    /// Emits exactly one error event. A capture while already faulted
    /// replaces the previous fault and context.
    pub fn capture_fault(&mut self, fault: Fault, context: Option<FaultContext>) {
        match &context {
            Some(ctx) => tracing::error!(
                fault = %fault,
                context = %ctx,
                "Render fault captured"
            ),
            None => tracing::error!(fault = %fault, "Render fault captured"),
        }
        self.phase = Phase::Faulted { fault, context };
    }

    /// Return to the clean state so the guarded content renders again.
    ///
    /// Returns `false` (and does nothing) when there was no fault.
    pub fn reset_fault(&mut self) -> bool {
        if !self.has_fault() {
            return false;
        }
        self.phase = Phase::Clean;
        tracing::info!("Fault boundary reset, retrying guarded content");
        true
    }
}

/// Widget that contains panics raised by `W` while it renders.
pub struct FaultBoundary<W> {
    content: W,
    options: UiOptions,
}

impl<W: Widget> FaultBoundary<W> {
    #[must_use]
    pub fn new(content: W) -> Self {
        Self {
            content,
            options: UiOptions::default(),
        }
    }
}

impl<F> FaultBoundary<RenderFn<F>>
where
    F: FnOnce(Rect, &mut Buffer),
{
    /// Guard a render closure instead of a widget value.
    #[must_use]
    pub fn from_fn(render: F) -> Self {
        Self::new(RenderFn(render))
    }
}

impl<W> FaultBoundary<W> {
    /// Theme used by the fallback view.
    pub fn ui_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }
}

/// Adapter turning a render closure into a [`Widget`].
pub struct RenderFn<F>(F);

impl<F> Widget for RenderFn<F>
where
    F: FnOnce(Rect, &mut Buffer),
{
    fn render(self, area: Rect, buf: &mut Buffer) {
        (self.0)(area, buf);
    }
}

impl<W: Widget> StatefulWidget for FaultBoundary<W> {
    type State = BoundaryState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let area = area.intersection(buf.area);

        if !state.has_fault() {
            match render_guarded(self.content, area, buf) {
                Ok(()) => return,
                Err(captured) => state.capture_fault(captured.fault, captured.context),
            }
        }

        if let Some(fault) = state.fault() {
            render_fallback(fault, state.fault_context(), self.options, area, buf);
        }
    }
}

struct Captured {
    fault: Fault,
    context: Option<FaultContext>,
}

/// Render `content` into a scratch copy of the frame and keep it only if the
/// render completes, so a half-drawn subtree never reaches the frame.
///
/// The copy spans the whole frame buffer, not just `area`, so content sees
/// the same bounds it would see unguarded.
fn render_guarded<W: Widget>(content: W, area: Rect, buf: &mut Buffer) -> Result<(), Captured> {
    install_panic_hook();

    let mut scratch = buf.clone();

    let guard = CaptureGuard::arm();
    let outcome = {
        let _scope = trace::enter(BOUNDARY_COMPONENT);
        panic::catch_unwind(AssertUnwindSafe(|| content.render(area, &mut scratch)))
    };

    match outcome {
        Ok(()) => {
            *buf = scratch;
            Ok(())
        }
        Err(payload) => Err(Captured {
            fault: Fault::from_panic_payload(&*payload),
            context: guard.take_context(),
        }),
    }
}

/// Route a terminal event to the retry control of a faulted boundary.
///
/// `area` is the area the boundary was last rendered into. Activates on
/// `Enter`, `r` or `R`, or a left click on the button. Returns whether the
/// event reset the boundary; everything else is left for the caller.
pub fn handle_event(state: &mut BoundaryState, event: &Event, area: Rect) -> bool {
    if !state.has_fault() {
        return false;
    }

    let activate = match event {
        Event::Key(KeyEvent {
            code: KeyCode::Enter | KeyCode::Char('r' | 'R'),
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => fallback_layout(area)
            .retry
            .contains(Position::new(*column, *row)),
        _ => false,
    };

    activate && state.reset_fault()
}
