use chrono::Local;
use color_eyre::eyre::Result;
use ratatui::prelude::*;
use throbber_widgets_tui::{Throbber, ThrobberState};

use super::Component;
use crate::{action::Action, app::AppState, app::MessageType, layout, tui::Frame};

const HINT: &str = "F1/F2 views  ? help";

pub struct Status {
    message: String,
    message_type: MessageType,
    message_timestamp: Option<String>,
    spinner_state: ThrobberState,
}

impl Status {
    pub fn new() -> Self {
        Self {
            message: "".into(),
            message_timestamp: None,
            message_type: MessageType::Info,
            spinner_state: ThrobberState::default(),
        }
    }
}

impl Component for Status {
    fn update(&mut self, state: &AppState, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick if state.load().is_loading() => {
                self.spinner_state.calc_next();
            }
            Action::Message(text, m_type) => {
                self.message = text;
                self.message_type = m_type;
                self.message_timestamp = Some(Local::now().format("%H:%M:%S").to_string());
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &AppState) -> Result<()> {
        let line = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Min(0), Constraint::Length(HINT.len() as u16)])
            .split(layout::page(area).status);

        let prompt = Span::raw("SHOWCASE > ").style(Style::default().fg(Color::Red));
        let message = if let Some(timestamp) = &self.message_timestamp {
            format!("{} {}", timestamp, self.message)
        } else {
            self.message.clone()
        };
        let message_style = match self.message_type {
            MessageType::Info => Style::default(),
            MessageType::Success => Style::default().fg(Color::Green),
            MessageType::Error => Style::default().fg(Color::Red),
        };
        let line_draw =
            Line::default().spans(vec![prompt, Span::raw(message).style(message_style)]);
        f.render_widget(line_draw, line[0]);

        if state.load().is_loading() {
            let spinner = Throbber::default()
                .style(Style::default().fg(Color::Yellow))
                .label("Working ")
                .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
                .use_type(throbber_widgets_tui::WhichUse::Spin);

            f.render_stateful_widget(spinner, line[1], &mut self.spinner_state);
        } else {
            f.render_widget(Line::from(HINT).dark_gray().right_aligned(), line[1]);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::testing::{render, screen_contains};

    #[test]
    fn shows_latest_message_with_timestamp() {
        let mut status = Status::new();
        let state = AppState::default();

        status
            .update(
                &state,
                Action::Message("Loaded 3 companies".into(), MessageType::Success),
            )
            .unwrap();

        assert_eq!("Loaded 3 companies", status.message);
        assert!(status.message_timestamp.is_some());
        let lines = render(&mut status, &state, 100, 40);
        assert!(lines[39].contains("SHOWCASE > "));
        assert!(lines[39].contains("Loaded 3 companies"));
    }

    #[test]
    fn hint_replaces_spinner_once_loaded() {
        let mut state = AppState::default();
        let mut status = Status::new();

        let lines = render(&mut status, &state, 100, 40);
        assert!(screen_contains(&lines, "Working"));

        state.apply_load(Ok(vec![]));
        let lines = render(&mut status, &state, 100, 40);
        assert!(screen_contains(&lines, HINT));
        assert!(!screen_contains(&lines, "Working"));
    }
}
