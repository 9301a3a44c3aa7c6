use color_eyre::eyre::Result;
use ratatui::prelude::*;
use tui_popup::Popup;

use super::Component;
use crate::{action::Action, app::AppState, tui::Frame};

pub struct Help {
    visible: bool,
    text: String,
}

impl Help {
    pub fn new() -> Self {
        let lines = vec![
            ("q / Ctrl-C", "Quit"),
            ("F1", "Company list"),
            ("F2", "Register company"),
            ("\u{02190}\u{02192}", "Previous / next slide"),
            ("1-4", "Jump to slide"),
            ("\u{02191}\u{02193}", "Move through companies"),
            ("Tab", "Next form field"),
            ("Space", "Toggle / cycle form choice"),
            ("Mouse", "Hover pauses the gallery"),
            ("Esc", "Close this help"),
        ];

        let key_length = lines.iter().map(|tuple| tuple.0.chars().count()).max();
        let value_length = lines.iter().map(|tuple| tuple.1.len()).max();

        let text = lines
            .iter()
            .map(|tuple| {
                format!(
                    "{:>kwidth$} | {:vwidth$}",
                    tuple.0,
                    tuple.1,
                    kwidth = key_length.unwrap_or(1),
                    vwidth = value_length.unwrap_or(1)
                )
            })
            .reduce(|acc, line| acc + "\n" + &line)
            .unwrap_or_default();

        Self {
            visible: false,
            text,
        }
    }
}

impl Component for Help {
    fn update(&mut self, _state: &AppState, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ToggleHelp => self.visible = !self.visible,
            Action::CloseHelp => self.visible = false,
            Action::SwitchView(_) => self.visible = false,
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, _state: &AppState) -> Result<()> {
        if self.visible {
            let popup = Popup::new(Text::from(self.text.as_str()))
                .title("Keybindings")
                .style(Style::new().black().on_light_yellow());
            f.render_widget(&popup, area);
        }

        Ok(())
    }
}
