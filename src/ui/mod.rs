mod generating;
mod quiz;
mod results;
mod toast;
mod upload;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::models::QuizState;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.state() {
        QuizState::Idle => upload::render(frame, area, app),
        QuizState::Loading => generating::render(frame, area, app),
        QuizState::Active => quiz::render(frame, area, app),
        QuizState::Finished => results::render(frame, area, app),
    }

    if let Some(toast) = app.toast() {
        toast::render(frame, area, toast);
    }
}

/// A `width` x `height` rectangle centered in `area`, clipped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

const TITLE: &str = "DOC QUIZ";
