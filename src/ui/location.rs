use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;

const CHOICE_LABELS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.engine().current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .margin(1)
    .split(area);

    let prompt = vec![
        Line::from(Span::styled(
            format!("Where is {}?", question.subject),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(Span::styled(
            question.category.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(prompt).wrap(Wrap { trim: true }), chunks[0]);

    if app.engine().question_state().retry_used {
        let notice = Paragraph::new("Not quite — one more try").fg(Color::Yellow);
        frame.render_widget(notice, chunks[1]);
    }

    render_choices(frame, chunks[2], app);
}

fn render_choices(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.engine().current_question() else {
        return;
    };
    let state = app.engine().question_state();

    let mut lines: Vec<Line> = Vec::with_capacity(question.choices.len() * 2);
    for (index, choice) in question.choices.iter().enumerate() {
        let eliminated = state.eliminated.contains(&index);
        let is_selected = state.selected == Some(index);

        let style = if eliminated {
            Style::default().fg(Color::DarkGray).crossed_out()
        } else if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };
        let label = CHOICE_LABELS.get(index).copied().unwrap_or('?');

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(choice.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
