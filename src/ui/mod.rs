mod quiz;
mod result;
mod start;

use ratatui::{prelude::*, widgets::Block};

use crate::app::{App, AppState};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.state {
        AppState::Start => start::render(frame, area, app),
        AppState::Fetching => render_fetching(frame, area),
        AppState::Quiz => quiz::render(frame, area, app),
        AppState::Result => result::render(frame, area, app),
    }
}

fn render_fetching(frame: &mut Frame, area: Rect) {
    use ratatui::widgets::Paragraph;

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(area);

    let widget = Paragraph::new("Fetching questions...")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, chunks[1]);
}
