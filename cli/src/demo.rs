//! Demo dashboard whose sensor panel is guarded by a [`FaultBoundary`].
//!
//! The gauges can be told to panic on their next render, either once or on
//! every attempt, to exercise capture and retry by hand.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};

use ward_tui::{
    BoundaryState, FaultBoundary, Glyphs, Palette, UiOptions, glyphs, handle_event, palette,
    styles, trace,
};

const SENSORS: [&str; 4] = ["intake", "boiler", "condenser", "exhaust"];
const ONE_SHOT_FAULT: &str = "x is undefined";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FaultPlan {
    Off,
    Once,
    Persistent,
}

pub struct Dashboard {
    boundary: BoundaryState,
    boundary_area: Rect,
    options: UiOptions,
    plan: FaultPlan,
    frame: u64,
    attempts: u32,
    captures: u32,
    quit: bool,
}

impl Dashboard {
    #[must_use]
    pub fn new(options: UiOptions) -> Self {
        Self {
            boundary: BoundaryState::new(),
            boundary_area: Rect::default(),
            options,
            plan: FaultPlan::Off,
            frame: 0,
            attempts: 0,
            captures: 0,
            quit: false,
        }
    }

    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn handle_event(&mut self, event: &Event) {
        if handle_event(&mut self.boundary, event, self.boundary_area) {
            return;
        }

        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return;
        };

        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => self.quit = true,
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char('f') => self.plan = FaultPlan::Once,
            KeyCode::Char('p') => {
                self.plan = match self.plan {
                    FaultPlan::Persistent => FaultPlan::Off,
                    FaultPlan::Off | FaultPlan::Once => FaultPlan::Persistent,
                };
                tracing::info!(plan = ?self.plan, "Fault plan changed");
            }
            _ => {}
        }
    }

    /// Message the gauges should panic with on this render attempt.
    fn next_fault(&mut self) -> Option<String> {
        match self.plan {
            FaultPlan::Off => None,
            FaultPlan::Once => {
                self.plan = FaultPlan::Off;
                Some(ONE_SHOT_FAULT.to_string())
            }
            FaultPlan::Persistent => {
                self.attempts += 1;
                Some(format!(
                    "sensor feed returned no reading (attempt {})",
                    self.attempts
                ))
            }
        }
    }

    fn readings(&self) -> Vec<u16> {
        (0..SENSORS.len() as u64)
            .map(|i| ((self.frame / 4 + i * 23) % 100) as u16)
            .collect()
    }
}

pub fn draw(frame: &mut Frame, app: &mut Dashboard) {
    let palette = palette(app.options);
    let glyphs = glyphs(app.options);

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg_dark)),
        frame.area(),
    );

    let [header, body, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" ward ", styles::app_title(&palette)),
            Span::styled("fault boundary demo", styles::key_hint(&palette)),
        ])),
        header,
    );

    // A faulted boundary skips its content, so only consult the plan when
    // the panel will actually be rendered.
    let fault = if app.boundary.has_fault() {
        None
    } else {
        app.next_fault()
    };
    let panel = SensorPanel {
        readings: app.readings(),
        fault,
        palette,
        glyphs,
    };

    let was_faulted = app.boundary.has_fault();
    frame.render_stateful_widget(
        FaultBoundary::new(panel).ui_options(app.options),
        body,
        &mut app.boundary,
    );
    if !was_faulted && app.boundary.has_fault() {
        app.captures += 1;
    }
    app.boundary_area = body;

    draw_status(frame, app, status, &palette);
}

fn draw_status(frame: &mut Frame, app: &Dashboard, area: Rect, palette: &Palette) {
    let key = |k: &'static str| Span::styled(k, styles::key_highlight(palette));
    let hint = |h: &'static str| Span::styled(h, styles::key_hint(palette));
    let plan = match app.plan {
        FaultPlan::Off => "off",
        FaultPlan::Once => "once",
        FaultPlan::Persistent => "persistent",
    };

    let line = Line::from(vec![
        key(" f"),
        hint(" fault once  "),
        key("p"),
        hint(" persistent  "),
        key("q"),
        hint(" quit  "),
        hint("plan: "),
        Span::styled(plan, Style::default().fg(palette.text_secondary)),
        hint("  captures: "),
        Span::styled(
            app.captures.to_string(),
            Style::default().fg(palette.text_secondary),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Guarded content: one gauge per sensor.
struct SensorPanel {
    readings: Vec<u16>,
    fault: Option<String>,
    palette: Palette,
    glyphs: Glyphs,
}

impl Widget for SensorPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let _scope = trace::enter("SensorPanel");

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.palette.bg_border))
            .title(" Sensors ");
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::vertical(vec![Constraint::Length(1); SENSORS.len()]).split(inner);
        let mut fault = self.fault;
        for ((name, value), row) in SENSORS.iter().zip(self.readings).zip(rows.iter()) {
            Gauge {
                name: *name,
                value,
                fault: fault.take(),
                palette: &self.palette,
                glyphs: &self.glyphs,
            }
            .render(*row, buf);
        }
    }
}

struct Gauge<'a> {
    name: &'a str,
    value: u16,
    fault: Option<String>,
    palette: &'a Palette,
    glyphs: &'a Glyphs,
}

impl Widget for Gauge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let _scope = trace::enter("Gauge");
        if let Some(message) = self.fault {
            panic!("{message}");
        }

        let label = format!("{} {:<10} {:>3}% ", self.glyphs.bullet, self.name, self.value);
        let bar_width = usize::from(area.width).saturating_sub(label.chars().count());
        let filled = bar_width * usize::from(self.value.min(100)) / 100;
        let line = Line::from(vec![
            Span::styled(label, Style::default().fg(self.palette.text_primary)),
            Span::styled(
                self.glyphs.bar_full.repeat(filled),
                Style::default().fg(self.palette.success),
            ),
            Span::styled(
                self.glyphs.bar_empty.repeat(bar_width - filled),
                Style::default().fg(self.palette.text_muted),
            ),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}
