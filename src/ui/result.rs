use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::engine::{Outcome, Phase};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(8),
        Constraint::Fill(1),
    ])
    .split(area);

    let content = if app.engine().phase() == Phase::Transition {
        transition_lines(app)
    } else {
        outcome_lines(app)
    };

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[1]);
}

fn transition_lines(app: &App) -> Vec<Line<'static>> {
    let state = app.engine().question_state();
    vec![
        Line::from(""),
        Line::from(Span::styled(
            "CORRECT",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("+{} pts", state.phase1_points),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from("now guess the price".fg(Color::DarkGray)),
    ]
}

fn outcome_lines(app: &App) -> Vec<Line<'static>> {
    let engine = app.engine();
    let state = engine.question_state();

    let mut lines = vec![Line::from("")];
    match state.outcome {
        Some(Outcome::Solved { band }) => {
            lines.push(Line::from(Span::styled(
                "SOLVED",
                Style::default().fg(Color::Green).bold(),
            )));
            lines.push(Line::from(""));
            lines.push(points_line(
                state.phase1_points,
                band.map(|_| state.phase2_points),
            ));
            if let Some(band) = band {
                lines.push(Line::from(band.label().fg(Color::DarkGray)));
            }
            lines.extend(actual_price_line(app));
        }
        Some(Outcome::PriceMissed { band }) => {
            lines.push(Line::from(Span::styled(
                "TOO FAR OFF",
                Style::default().fg(Color::Red).bold(),
            )));
            lines.push(Line::from(""));
            lines.push(points_line(
                state.phase1_points,
                Some(state.phase2_points),
            ));
            lines.push(Line::from(
                format!("{} · -1 life", band.label()).fg(Color::Red),
            ));
            lines.extend(actual_price_line(app));
        }
        Some(Outcome::LocationMissed) => {
            lines.push(Line::from(Span::styled(
                "MISSED",
                Style::default().fg(Color::Red).bold(),
            )));
            lines.push(Line::from(""));
            if let Some(question) = engine.current_question() {
                if let Some(answer) = question.choices.get(question.correct_choice) {
                    lines.push(Line::from(format!("it was {}", answer).fg(Color::Gray)));
                }
            }
            lines.push(Line::from("-1 life".fg(Color::Red)));
        }
        Some(Outcome::Skipped) => {
            lines.push(Line::from(Span::styled(
                "SKIPPED",
                Style::default().fg(Color::Yellow).bold(),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(
                format!("+{} pts", crate::engine::SKIP_POINTS).fg(Color::Cyan),
            ));
        }
        None => {}
    }
    lines
}

fn points_line(phase1: u32, phase2: Option<u32>) -> Line<'static> {
    let text = match phase2 {
        Some(phase2) => format!("+{} location · +{} price", phase1, phase2),
        None => format!("+{} pts", phase1),
    };
    Line::from(Span::styled(text, Style::default().fg(Color::Cyan)))
}

fn actual_price_line(app: &App) -> Option<Line<'static>> {
    let question = app.engine().current_question()?;
    let price = question.price.as_ref()?;
    Some(Line::from(
        format!("actual: {}{:.2}", price.unit, price.actual).fg(Color::DarkGray),
    ))
}
