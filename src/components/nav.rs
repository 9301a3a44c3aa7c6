use color_eyre::eyre::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Flex,
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::Component;
use crate::{action::Action, app::AppState, layout, model::ViewMode, tui::Frame};

/// The two buttons choosing between the listing and the form.
pub struct Nav {
    buttons: Vec<(ViewMode, Rect)>,
}

impl Nav {
    pub fn new() -> Self {
        Self { buttons: vec![] }
    }

    fn hit(&self, column: u16, row: u16) -> Option<ViewMode> {
        self.buttons
            .iter()
            .find(|(_, rect)| rect.contains(Position::new(column, row)))
            .map(|(mode, _)| *mode)
    }
}

impl Component for Nav {
    fn handle_mouse_event(
        &mut self,
        mouse: MouseEvent,
        _state: &AppState,
    ) -> Result<Option<Action>> {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            return Ok(self.hit(mouse.column, mouse.row).map(Action::SwitchView));
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &AppState) -> Result<()> {
        let area = layout::page(area).nav;
        let widths = ViewMode::ALL
            .iter()
            .map(|mode| Constraint::Length(mode.title().len() as u16 + 6));
        let rects = Layout::horizontal(widths)
            .flex(Flex::Center)
            .spacing(2)
            .split(area);

        self.buttons.clear();
        for (mode, rect) in ViewMode::ALL.iter().zip(rects.iter()) {
            let style = if state.view() == *mode {
                Style::new().black().on_white().bold()
            } else {
                Style::default()
            };
            let key = match mode {
                ViewMode::List => "F1",
                ViewMode::Form => "F2",
            };

            let button = Paragraph::new(mode.title())
                .alignment(Alignment::Center)
                .style(style)
                .block(
                    Block::new()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .title_bottom(Line::from(key).right_aligned()),
                );
            f.render_widget(button, *rect);
            self.buttons.push((*mode, *rect));
        }

        Ok(())
    }
}
