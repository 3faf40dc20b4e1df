use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{OPTION_COUNT, Question};

const OPTION_LABELS: [char; OPTION_COUNT] = ['A', 'B', 'C', 'D', 'E'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.session.current_question() else {
        render_not_ready(frame, area);
        return;
    };

    let show_feedback = app.session.show_feedback();
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Length(OPTION_COUNT as u16 * 2 + 2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], chunks[1], app);
    render_question_text(frame, chunks[2], &question.text);
    render_options(frame, chunks[3], app, question, show_feedback);
    if show_feedback {
        render_feedback(frame, chunks[4], question);
    }
    render_controls(frame, chunks[5], app);
}

fn render_not_ready(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(vec![
        Line::from(Span::styled(
            "Quiz Not Ready",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from("There was an issue loading the quiz. Press r to go to upload.".fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_progress(frame: &mut Frame, label_area: Rect, bar_area: Rect, app: &App) {
    let label = format!(
        "Question {} of {}",
        app.session.current_question_number(),
        app.session.total_questions()
    );
    let widget = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).bold());
    frame.render_widget(widget, label_area);

    let ratio = app.session.progress_percentage() / 100.0;
    let bar = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio(ratio.clamp(0.0, 1.0))
        .label("");
    frame.render_widget(bar, bar_area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    question: &Question,
    show_feedback: bool,
) {
    let selected = app.session.selected_answer();
    let mut lines: Vec<Line> = Vec::with_capacity(OPTION_COUNT * 2);

    for (index, option) in question.options.iter().enumerate() {
        let is_cursor = index == app.option_cursor();
        let is_selected = selected == Some(option.as_str());
        let is_correct = *option == question.correct_answer;

        let style = if show_feedback {
            if is_correct {
                Style::default().fg(Color::Green).bold()
            } else if is_selected {
                Style::default().fg(Color::Red).crossed_out()
            } else {
                Style::default().fg(Color::DarkGray)
            }
        } else if is_cursor || is_selected {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::White)
        };

        let marker = match (show_feedback, is_correct, is_selected, is_cursor) {
            (true, true, _, _) => "✓ ",
            (true, false, true, _) => "✗ ",
            (false, _, _, true) => "> ",
            _ => "  ",
        };

        lines.push(Line::from(vec![
            Span::styled(marker, style),
            Span::styled(format!("{}) ", OPTION_LABELS[index]), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Options ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_feedback(frame: &mut Frame, area: Rect, question: &Question) {
    let (title, color) = if question.is_correct == Some(true) {
        ("Correct!", Color::Green)
    } else {
        ("Incorrect.", Color::Red)
    };

    let widget = Paragraph::new(question.explanation.as_str())
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(format!(" {} ", title))
                .title_style(Style::default().fg(color).bold())
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let advance = if app.session.is_last_question() {
        "finish quiz"
    } else {
        "next question"
    };
    let text = if app.session.show_feedback() {
        format!("enter {}  ·  ← previous  ·  r start new quiz  ·  q quit", advance)
    } else {
        "j/k or a-e select  ·  enter submit answer  ·  ← previous  ·  r start new quiz  ·  q quit"
            .to_string()
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
