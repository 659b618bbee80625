mod hud;
mod location;
mod price;
mod result;
mod summary;
mod welcome;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::App;
use crate::engine::Phase;
use crate::models::Screen;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.screen {
        Screen::Welcome => welcome::render(frame, area),
        Screen::Playing => render_playing(frame, area, app),
        Screen::Summary => summary::render(frame, area, app),
    }
}

fn render_playing(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    hud::render(frame, chunks[0], app);

    match app.engine().phase() {
        Phase::Location => location::render(frame, chunks[1], app),
        Phase::Price => price::render(frame, chunks[1], app),
        Phase::Transition | Phase::Result => result::render(frame, chunks[1], app),
        Phase::Loading | Phase::GameOver => {}
    }

    render_controls(frame, chunks[2], app.engine().phase());
}

fn render_controls(frame: &mut Frame, area: Rect, phase: Phase) {
    let text = match phase {
        Phase::Location => "j/k navigate  ·  enter submit  ·  e/s/f/x power-ups  ·  q quit",
        Phase::Price => "h/l nudge  ·  j/k step  ·  enter submit  ·  e/s/f power-ups  ·  q quit",
        _ => "q quit",
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
