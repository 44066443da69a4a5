//! End-to-end capture/reset scenarios driven through `Terminal::draw`.

use insta::assert_debug_snapshot;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::widgets::Widget;

use ward_tui::{BoundaryState, FALLBACK_TITLE, Fault, FaultBoundary};

use crate::common::{Exploding, Healthy, flaky};

fn screen(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let area = buffer.area;
    (area.y..area.bottom())
        .map(|y| {
            (area.x..area.right())
                .filter_map(|x| buffer.cell((x, y)).map(|c| c.symbol().to_string()))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn draw<W: Widget>(terminal: &mut Terminal<TestBackend>, state: &mut BoundaryState, widget: W) {
    terminal
        .draw(|frame| {
            frame.render_stateful_widget(FaultBoundary::new(widget), frame.area(), state);
        })
        .expect("draw never fails on a test backend");
}

fn terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(64, 14)).expect("terminal")
}

#[test]
fn healthy_content_renders_unchanged() {
    let mut guarded = terminal();
    let mut state = BoundaryState::new();
    draw(&mut guarded, &mut state, Healthy("all systems nominal"));

    let mut bare = terminal();
    bare.draw(|frame| frame.render_widget(Healthy("all systems nominal"), frame.area()))
        .expect("draw");

    assert_eq!(guarded.backend().buffer(), bare.backend().buffer());
    assert!(!state.has_fault());
}

#[test]
fn render_fault_is_contained_and_described() {
    let mut terminal = terminal();
    let mut state = BoundaryState::new();
    draw(&mut terminal, &mut state, Exploding("x is undefined".into()));

    assert!(state.has_fault());
    assert_eq!(state.fault(), Some(&Fault::new("x is undefined")));

    let text = screen(&terminal);
    assert!(text.contains(FALLBACK_TITLE));
    assert!(text.contains("Error: x is undefined"));
    assert!(!text.contains("partial output"));

    let context = state.fault_context().expect("context");
    assert_eq!(
        context.components(),
        ["Inner", "Exploding", "FaultBoundary"].map(String::from)
    );
}

#[test]
fn retry_renders_the_content_fresh() {
    let mut terminal = terminal();
    let mut state = BoundaryState::new();
    draw(&mut terminal, &mut state, flaky(Some("x is undefined"), "unused"));
    assert!(state.has_fault());

    assert!(state.reset_fault());
    assert_debug_snapshot!(state, @r"
    BoundaryState {
        phase: Clean,
    }
    ");

    draw(&mut terminal, &mut state, flaky(None, "recovered"));
    let text = screen(&terminal);
    assert!(text.contains("recovered"));
    assert!(!text.contains(FALLBACK_TITLE));
    assert!(!text.contains("x is undefined"));
}

#[test]
fn second_fault_replaces_the_first() {
    let mut terminal = terminal();
    let mut state = BoundaryState::new();
    draw(&mut terminal, &mut state, flaky(Some("first failure"), "unused"));
    state.reset_fault();
    draw(&mut terminal, &mut state, flaky(Some("second failure"), "unused"));

    assert_eq!(state.fault().map(Fault::message), Some("second failure"));
    let text = screen(&terminal);
    assert!(text.contains("Error: second failure"));
    assert!(!text.contains("first failure"));
}

#[test]
fn retry_cycle_has_no_cap() {
    let mut terminal = terminal();
    let mut state = BoundaryState::new();
    for attempt in 1..=25 {
        let message = format!("attempt {attempt}");
        draw(&mut terminal, &mut state, flaky(Some(message.as_str()), "unused"));
        assert_eq!(state.fault().map(Fault::message), Some(message.as_str()));
        assert!(state.reset_fault());
    }
    draw(&mut terminal, &mut state, flaky(None, "finally"));
    assert!(screen(&terminal).contains("finally"));
}

#[test]
fn hostile_fault_text_is_neutralized() {
    let mut terminal = terminal();
    let mut state = BoundaryState::new();
    draw(
        &mut terminal,
        &mut state,
        Exploding("bad \x1b]52;c;SGVsbG8=\x07input\x1b[2J".into()),
    );

    assert_eq!(state.fault().map(Fault::message), Some("bad input"));
    assert!(screen(&terminal).contains("Error: bad input"));
}
