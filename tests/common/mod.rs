//! Shared test utilities and fixtures
//!
//! Guarded widgets used by the integration tests.

#![allow(dead_code)]

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::{Paragraph, Widget};

use ward_tui::trace;

/// Renders a fixed line of text.
pub struct Healthy(pub &'static str);

impl Widget for Healthy {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let _scope = trace::enter("Healthy");
        Paragraph::new(self.0).render(area, buf);
    }
}

/// Draws part of itself, then panics with the given message.
pub struct Exploding(pub String);

impl Widget for Exploding {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let _scope = trace::enter("Exploding");
        Paragraph::new("partial output").render(area, buf);
        Inner(self.0).render(area, buf);
    }
}

struct Inner(String);

impl Widget for Inner {
    fn render(self, _area: Rect, _buf: &mut Buffer) {
        let _scope = trace::enter("Inner");
        panic!("{}", self.0);
    }
}

/// A widget that panics while `fail` is set, otherwise renders `text`.
pub fn flaky(fail: Option<&str>, text: &'static str) -> Flaky {
    Flaky {
        fail: fail.map(str::to_string),
        text,
    }
}

pub struct Flaky {
    fail: Option<String>,
    text: &'static str,
}

impl Widget for Flaky {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.fail {
            Some(message) => Exploding(message).render(area, buf),
            None => Healthy(self.text).render(area, buf),
        }
    }
}
