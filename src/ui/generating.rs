use ratatui::{prelude::*, widgets::Paragraph};

use super::{TITLE, centered};
use crate::app::App;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let spinner = SPINNER[app.spinner_frame() % SPINNER.len()];

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(TITLE, Style::default().fg(Color::Cyan).bold())),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} Generating Quiz...", spinner),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(""),
        Line::from(
            format!(
                "AI is working its magic to craft {} questions. Please wait a moment.",
                app.session.number_of_questions()
            )
            .fg(Color::DarkGray),
        ),
        Line::from(""),
        Line::from(""),
        Line::from("q quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, centered(area, 80, 9));
}
