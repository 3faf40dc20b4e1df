use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use super::{TITLE, centered};
use crate::app::App;
use crate::document::{ACCEPTED_EXTENSIONS, MAX_FILE_SIZE_MB};
use crate::generator::{MAX_QUESTIONS, MIN_QUESTIONS};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let card = centered(area, 72, 18);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Color::DarkGray)
        .padding(Padding::horizontal(2));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(inner);

    render_header(frame, chunks[0]);
    render_path_input(frame, chunks[1], app.path_input());
    render_supported_types(frame, chunks[2]);
    render_question_count(frame, chunks[3], chunks[4], app.question_count());
    render_controls(frame, chunks[6], app.question_count());
}

fn render_header(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(TITLE, Style::default().fg(Color::Cyan).bold())),
        Line::from("Pick a document and let AI generate a quiz for you!".fg(Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}

fn render_path_input(frame: &mut Frame, area: Rect, input: &str) {
    let line = if input.is_empty() {
        Line::from(vec![
            Span::styled("Type the path of a document", Style::default().fg(Color::DarkGray)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ])
    } else {
        Line::from(vec![
            Span::styled(input, Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ])
    };

    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(" Document ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_supported_types(frame: &mut Frame, area: Rect) {
    let text = format!(
        "Supported: {} (up to {}MB)",
        ACCEPTED_EXTENSIONS.join(", "),
        MAX_FILE_SIZE_MB
    );
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_question_count(frame: &mut Frame, label_area: Rect, slider_area: Rect, count: usize) {
    let label = Line::from(vec![
        Span::styled("Number of Questions: ", Style::default().fg(Color::White)),
        Span::styled(count.to_string(), Style::default().fg(Color::Cyan).bold()),
    ]);
    frame.render_widget(Paragraph::new(label), label_area);

    let ratio = (count - MIN_QUESTIONS) as f64 / (MAX_QUESTIONS - MIN_QUESTIONS) as f64;
    let slider = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{}  ·  {}", MIN_QUESTIONS, MAX_QUESTIONS));
    frame.render_widget(slider, slider_area);
}

fn render_controls(frame: &mut Frame, area: Rect, count: usize) {
    let text = format!(
        "enter generate quiz ({} questions)  ·  ←/→ questions  ·  esc quit",
        count
    );
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
