use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::app::App;
use crate::engine::{PowerUp, MAX_HEALTH};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(2),
    ])
    .split(area);

    render_status_line(frame, chunks[0], app);
    render_power_ups(frame, chunks[1], app);
    render_timer(frame, chunks[2], app);
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let engine = app.engine();
    let session = engine.session();

    let hearts: String = (0..MAX_HEALTH)
        .map(|i| if i < session.health() { "♥ " } else { "♡ " })
        .collect();

    let line = Line::from(vec![
        Span::styled(
            format!(
                "Question {}/{}",
                session.cursor() + 1,
                session.total_questions()
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{} pts", session.points()),
            Style::default().fg(Color::Cyan).bold(),
        ),
        Span::raw("   "),
        Span::styled(hearts, Style::default().fg(Color::Red)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_power_ups(frame: &mut Frame, area: Rect, app: &App) {
    let inventory = app.engine().inventory();

    let mut spans = vec![Span::styled("power-ups ", Style::default().fg(Color::DarkGray))];
    for (i, kind) in PowerUp::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
        }
        let count = inventory.count(kind);
        let style = if count > 0 {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!("{} ×{}", kind.label(), count),
            style,
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_timer(frame: &mut Frame, area: Rect, app: &App) {
    let engine = app.engine();
    if !engine.timer_running() {
        return;
    }

    let color = if engine.timer_critical() {
        Color::Red
    } else {
        Color::Green
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::NONE))
        .gauge_style(Style::default().fg(color))
        .ratio(engine.timer_ratio())
        .label(format!("{}s", engine.timer_seconds()));
    frame.render_widget(gauge, area);
}
