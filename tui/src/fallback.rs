//! Fallback view drawn in place of faulted content.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Padding, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use ward_types::{Fault, FaultContext, UiOptions};

use crate::theme::{glyphs, palette, styles};

/// Title shown at the top of every fallback view.
pub const FALLBACK_TITLE: &str = "Something went wrong!";
/// Label of the retry control.
pub const RETRY_BUTTON: &str = "[ Try Again ]";

/// Screen regions of the fallback view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackLayout {
    /// Title, fault text and context.
    pub body: Rect,
    /// The retry control. Zero-sized when the area is too small to show it.
    pub retry: Rect,
}

/// Border and padding shared by layout and rendering.
fn frame_block() -> Block<'static> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .padding(Padding::horizontal(1))
}

/// Compute where the fallback view places its parts inside `area`.
#[must_use]
pub fn fallback_layout(area: Rect) -> FallbackLayout {
    let inner = frame_block().inner(area);
    let [body, _, button_row] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let width = (RETRY_BUTTON.width() as u16).min(button_row.width);
    let x = button_row.x + (button_row.width - width) / 2;
    let retry = Rect::new(x, button_row.y, width, button_row.height);

    FallbackLayout { body, retry }
}

pub(crate) fn render_fallback(
    fault: &Fault,
    context: Option<&FaultContext>,
    options: UiOptions,
    area: Rect,
    buf: &mut Buffer,
) {
    let palette = palette(options);
    let glyphs = glyphs(options);
    let layout = fallback_layout(area);

    Clear.render(area, buf);
    frame_block()
        .border_style(Style::default().fg(palette.error))
        .style(Style::default().bg(palette.bg_panel))
        .render(area, buf);

    let title_style = styles::fault_title(&palette);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(glyphs.fault, title_style),
            Span::raw(" "),
            Span::styled(FALLBACK_TITLE, title_style),
        ]),
        Line::default(),
    ];

    // Fault text is sanitized at construction; it may still span lines.
    let message = format!("Error: {fault}");
    lines.extend(
        message
            .lines()
            .map(|line| Line::styled(line.to_string(), styles::fault_message(&palette))),
    );

    if let Some(context) = context {
        lines.push(Line::default());
        lines.extend(
            context
                .to_string()
                .lines()
                .map(|line| Line::styled(line.to_string(), styles::fault_context(&palette))),
        );
    }

    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled(glyphs.retry, styles::key_highlight(&palette)),
        Span::styled(" Enter", styles::key_highlight(&palette)),
        Span::styled(" or ", styles::key_hint(&palette)),
        Span::styled("r", styles::key_highlight(&palette)),
        Span::styled(" to try again", styles::key_hint(&palette)),
    ]));

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(layout.body, buf);

    Paragraph::new(RETRY_BUTTON)
        .style(styles::retry_button(&palette))
        .render(layout.retry, buf);
}
