use ratatui::{
    prelude::*,
    widgets::{Gauge, Paragraph, Wrap},
};

use crate::app::{App, QuestionPhase};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_header(frame, chunks[0], app);
    render_progress(frame, chunks[1], app);
    render_status(frame, chunks[2], app);
    render_question_text(frame, chunks[4], app.prompt());
    render_options(frame, chunks[5], app);
    render_controls(frame, chunks[6], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let count = format!(
        "Question {} / {}",
        app.current_question_number(),
        app.total_questions()
    );
    frame.render_widget(Paragraph::new(count).fg(Color::White).bold(), halves[0]);

    let timer_color = if app.time_remaining() <= 5 {
        Color::Red
    } else {
        Color::Yellow
    };
    let timer = Paragraph::new(format!("Time: {:2}s", app.time_remaining()))
        .alignment(Alignment::Right)
        .fg(timer_color);
    frame.render_widget(timer, halves[1]);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio(app.progress_ratio())
        .label("");
    frame.render_widget(gauge, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let status = format!(
        "Score: {}  ·  Best: {}  ·  {}  ·  {}",
        app.score(),
        app.high_score(),
        app.config.category().label,
        app.config.difficulty.label(),
    );
    frame.render_widget(Paragraph::new(status).fg(Color::DarkGray), area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::with_capacity(app.options().len() * 2);

    for (index, option) in app.options().iter().enumerate() {
        let label = (b'A' + index as u8) as char;
        let (marker, style) = option_appearance(app, index, option.correct);

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(option.text.clone(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn option_appearance(app: &App, index: usize, is_correct: bool) -> (&'static str, Style) {
    match app.phase() {
        QuestionPhase::Answering => {
            if index == app.selected_option() {
                (">", Style::default().fg(Color::Cyan).bold())
            } else {
                (" ", Style::default().fg(Color::Gray))
            }
        }
        QuestionPhase::Revealed { selected } => {
            if is_correct {
                ("+", Style::default().fg(Color::Green).bold())
            } else if selected == Some(index) {
                ("-", Style::default().fg(Color::Red))
            } else {
                (" ", Style::default().fg(Color::DarkGray))
            }
        }
    }
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let hint = if app.can_advance() {
        "enter next  ·  q quit"
    } else {
        "j/k navigate  ·  enter answer  ·  q quit"
    };
    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
