use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::app::{Toast, ToastKind};

const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 5;

/// Draws `toast` in the bottom right corner of `area`.
pub fn render(frame: &mut Frame, area: Rect, toast: &Toast) {
    let width = TOAST_WIDTH.min(area.width);
    let height = TOAST_HEIGHT.min(area.height);
    let rect = Rect {
        x: area.x + area.width - width,
        y: area.y + area.height - height,
        width,
        height,
    };

    let color = match toast.kind {
        ToastKind::Error => Color::Red,
        ToastKind::Info => Color::Cyan,
    };

    let widget = Paragraph::new(toast.message.as_str())
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(format!(" {} ", toast.title))
                .title_style(Style::default().fg(color).bold())
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(Clear, rect);
    frame.render_widget(widget, rect);
}
