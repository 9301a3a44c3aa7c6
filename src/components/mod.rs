use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::{Rect, Size};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    action::Action,
    app::AppState,
    config::Settings,
    tui::{Event, Frame},
};

pub mod carousel;
pub mod company_table;
pub mod header;
pub mod help;
pub mod nav;
pub mod registration_form;
pub mod status;

/// A region of the page. Each region keeps its own state and decides for
/// itself how it reacts to events; page level state only comes in through
/// the `state` argument.
pub trait Component {
    #[allow(unused_variables)]
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    #[allow(unused_variables)]
    fn register_config_handler(&mut self, config: Settings) -> Result<()> {
        Ok(())
    }

    #[allow(unused_variables)]
    fn init(&mut self, area: Size) -> Result<()> {
        Ok(())
    }

    fn handle_events(&mut self, event: Option<Event>, state: &AppState) -> Result<Option<Action>> {
        let action = match event {
            Some(Event::Key(key_event)) => self.handle_key_event(key_event, state)?,
            Some(Event::Mouse(mouse_event)) => self.handle_mouse_event(mouse_event, state)?,
            _ => None,
        };
        Ok(action)
    }

    #[allow(unused_variables)]
    fn handle_key_event(&mut self, key: KeyEvent, state: &AppState) -> Result<Option<Action>> {
        Ok(None)
    }

    #[allow(unused_variables)]
    fn handle_mouse_event(
        &mut self,
        mouse: MouseEvent,
        state: &AppState,
    ) -> Result<Option<Action>> {
        Ok(None)
    }

    #[allow(unused_variables)]
    fn update(&mut self, state: &AppState, action: Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &AppState) -> Result<()>;
}
