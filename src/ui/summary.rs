use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::engine::SessionOutcome;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_tally(frame, chunks[1], app);
    render_leaderboard(frame, chunks[2], app);
    render_controls(frame, chunks[3], app);
}

fn render_tally(frame: &mut Frame, area: Rect, app: &App) {
    let summary = app.engine().summary();

    let (title, color) = match summary.outcome {
        SessionOutcome::Cleared => ("ROUND CLEAR", Color::Green),
        SessionOutcome::OutOfLives => ("OUT OF LIVES", Color::Red),
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(title, Style::default().fg(color).bold())),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} pts", summary.points),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(
            format!(
                "landmarks {}/{}  ·  prices {}/{}  ·  {} lives left",
                summary.landmarks_correct,
                summary.landmarks_attempted,
                summary.prices_correct,
                summary.prices_attempted,
                summary.health
            )
            .fg(Color::DarkGray),
        ),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_leaderboard(frame: &mut Frame, area: Rect, app: &App) {
    let current = app.engine().summary().session_id;

    let mut lines = vec![Line::from(Span::styled(
        "BEST RUNS",
        Style::default().fg(Color::DarkGray).bold(),
    ))];
    lines.push(Line::from(""));

    for (index, record) in app.best_scores().iter().enumerate() {
        let is_this_run = record.summary.session_id == current;
        let style = if is_this_run {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_this_run { "*" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{:2}. ", index + 1), style),
            Span::styled(format!("{:>5} pts  ", record.summary.points), style),
            Span::styled(
                format!(
                    "landmarks {}/{} · prices {}/{}",
                    record.summary.landmarks_correct,
                    record.summary.landmarks_attempted,
                    record.summary.prices_correct,
                    record.summary.prices_attempted
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    if let Some(err) = app.score_error() {
        lines.push(Line::from(""));
        lines.push(Line::from(
            format!("score not saved: {}", err).fg(Color::Red),
        ));
    }

    let widget = Paragraph::new(lines).block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, _app: &App) {
    let widget = Paragraph::new("r play again  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
