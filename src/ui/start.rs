use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

const FIELD_LABELS: [&str; 3] = ["Category", "Difficulty", "Questions"];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(16),
        Constraint::Fill(1),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "TRIVIA QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from("Questions from the Open Trivia DB".fg(Color::DarkGray)),
        Line::from(""),
    ];

    let values = [
        app.config.category().label.to_string(),
        app.config.difficulty.label().to_string(),
        app.config.amount.to_string(),
    ];
    for (index, (label, value)) in FIELD_LABELS.iter().zip(values.iter()).enumerate() {
        content.push(form_line(label, value, index == app.form_field()));
    }

    content.push(Line::from(""));
    content.push(Line::from(
        format!("High Score: {}", app.high_score()).fg(Color::DarkGray),
    ));
    content.push(Line::from(""));
    content.push(match app.notice() {
        Some(notice) => Line::from(Span::styled(
            notice.message(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(""),
    });
    content.push(Line::from(""));
    content.push(Line::from(
        "j/k field  ·  h/l change  ·  enter start  ·  q quit".fg(Color::DarkGray),
    ));

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}

fn form_line(label: &str, value: &str, is_selected: bool) -> Line<'static> {
    let style = if is_selected {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    };
    let marker = if is_selected { ">" } else { " " };

    Line::from(Span::styled(
        format!("{} {:<11} < {} >", marker, label, value),
        style,
    ))
}
