use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.engine().current_question() else {
        return;
    };
    let Some(price) = question.price.as_ref() else {
        return;
    };
    let guess = app.engine().question_state().guess;

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let prompt = vec![
        Line::from(Span::styled(
            format!("How much is {}?", price.item),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(Span::styled(
            format!("near {}", question.subject),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(prompt).wrap(Wrap { trim: true }), chunks[0]);

    let value = Paragraph::new(Span::styled(
        format!("{}{:.2}", price.unit, guess),
        Style::default().fg(Color::Cyan).bold(),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(value, chunks[1]);

    let span = price.max - price.min;
    let ratio = if span > 0.0 {
        ((guess - price.min) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let slider = Gauge::default()
        .block(Block::default().borders(Borders::NONE))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio)
        .label("");
    frame.render_widget(slider, chunks[2]);

    let low = Paragraph::new(format!("{}{:.0}", price.unit, price.min)).fg(Color::DarkGray);
    let high = Paragraph::new(format!("{}{:.0}", price.unit, price.max))
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(low, chunks[3]);
    frame.render_widget(high, chunks[3]);
}
