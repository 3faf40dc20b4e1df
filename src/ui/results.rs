use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::Question;

const QUESTION_PREVIEW_LENGTH: usize = 60;
const NOT_ANSWERED: &str = "Not answered";

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let score = app.session.score();
    let total = app.session.total_questions();
    let percentage = app.session.score_percentage();

    let chunks = Layout::vertical([
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[0], score, total, percentage);
    render_breakdown(frame, chunks[1], app);
    render_controls(frame, chunks[2]);
}

fn grade_color(percentage: u32) -> Color {
    match percentage {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, score: usize, total: usize, percentage: u32) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Quiz Completed!",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("You scored ", Style::default().fg(Color::Gray)),
            Span::styled(score.to_string(), Style::default().fg(grade_color(percentage)).bold()),
            Span::styled(" out of ", Style::default().fg(Color::Gray)),
            Span::styled(total.to_string(), Style::default().fg(Color::White).bold()),
            Span::styled(format!(" ({}%)", percentage), Style::default().fg(grade_color(percentage))),
        ]),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_breakdown(frame: &mut Frame, area: Rect, app: &App) {
    let cursor = app.results_cursor();
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line = 0;

    for (index, question) in app.session.questions().iter().enumerate() {
        if index == cursor {
            cursor_line = lines.len();
        }
        lines.push(summary_line(index, question, index == cursor));
        if app.is_expanded(index) {
            lines.extend(detail_lines(question));
        }
    }

    // Keep the cursor row in view.
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = cursor_line.saturating_sub(visible.saturating_sub(1));

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Detailed Summary ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        )
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn summary_line(index: usize, question: &Question, is_cursor: bool) -> Line<'static> {
    let (symbol, color) = if question.is_correct == Some(true) {
        ("+", Color::Green)
    } else {
        ("-", Color::Red)
    };
    let text_style = if is_cursor {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().fg(Color::Gray)
    };

    Line::from(vec![
        Span::styled(if is_cursor { ">" } else { " " }, text_style),
        Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
        Span::styled(
            format!("Question {}: ", index + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(truncate_question(&question.text), text_style),
    ])
}

fn detail_lines(question: &Question) -> Vec<Line<'static>> {
    let answer = question.user_answer.clone().unwrap_or_else(|| NOT_ANSWERED.to_string());
    let answer_style = if question.is_correct == Some(true) {
        Style::default().fg(Color::Green).bold()
    } else {
        Style::default().fg(Color::Red).crossed_out()
    };

    let mut lines = vec![Line::from(Span::styled(
        format!("      {}", question.text),
        Style::default().fg(Color::White),
    ))];

    for option in &question.options {
        let style = if *option == question.correct_answer {
            Style::default().fg(Color::Green).bold()
        } else if question.user_answer.as_deref() == Some(option.as_str()) {
            Style::default().fg(Color::Red).crossed_out()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(Span::styled(format!("        • {}", option), style)));
    }

    lines.push(Line::from(vec![
        Span::styled("      Your answer: ", Style::default().fg(Color::Gray).bold()),
        Span::styled(answer, answer_style),
    ]));
    lines.push(Line::from(vec![
        Span::styled("      Correct answer: ", Style::default().fg(Color::Gray).bold()),
        Span::styled(
            question.correct_answer.clone(),
            Style::default().fg(Color::Green).bold(),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("      Explanation: ", Style::default().fg(Color::Gray).bold()),
        Span::styled(question.explanation.clone(), Style::default().fg(Color::DarkGray)),
    ]));
    lines.push(Line::from(""));
    lines
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k move  ·  enter details  ·  r start new quiz  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
