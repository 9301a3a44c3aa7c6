use color_eyre::eyre::Result;
use ratatui::{prelude::*, widgets::Paragraph};

use super::Component;
use crate::{app::AppState, layout, tui::Frame};

pub struct Header {
    title: &'static str,
    subtitle: &'static str,
}

impl Header {
    pub fn new() -> Self {
        Self {
            title: "Company Showcase",
            subtitle: "Listing, registration and a rotating gallery",
        }
    }
}

impl Component for Header {
    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, _state: &AppState) -> Result<()> {
        let header = Paragraph::new(vec![
            Line::from(self.title).style(Style::new().bold()),
            Line::from(self.subtitle).style(Style::new().dark_gray()),
        ])
        .alignment(Alignment::Center);

        f.render_widget(header, layout::page(area).header);
        Ok(())
    }
}
