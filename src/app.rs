use color_eyre::eyre;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::Rect;
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::{
    action::Action,
    components::{
        carousel::CarouselRegion, company_table::CompanyTable, header::Header, help::Help,
        nav::Nav, registration_form::RegistrationForm, status::Status, Component,
    },
    config::Settings,
    model::{Company, LoadState, ViewMode},
    tui::{self, Frame, PointerCapture},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Error,
}

/// Page level state. Regions get it handed in, none of them own it.
#[derive(Debug, Default)]
pub struct AppState {
    view: ViewMode,
    load: LoadState,
    interactive: bool,
}

impl AppState {
    pub fn view(&self) -> ViewMode {
        self.view
    }

    /// Returns whether the visible section actually changed.
    pub fn set_view(&mut self, mode: ViewMode) -> bool {
        if self.view == mode {
            return false;
        }
        self.view = mode;
        true
    }

    pub fn load(&self) -> &LoadState {
        &self.load
    }

    pub fn apply_load(&mut self, outcome: Result<Vec<Company>, String>) -> bool {
        self.load.settle(outcome)
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// The one false to true transition. Later calls report `false`.
    pub fn mark_interactive(&mut self) -> bool {
        if self.interactive {
            return false;
        }
        self.interactive = true;
        true
    }
}

/// Keys that mean the same thing wherever focus is.
pub fn global_key_action(key: KeyEvent, state: &AppState) -> Option<Action> {
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') if key.modifiers == KeyModifiers::CONTROL => {
            Some(Action::Quit)
        }
        KeyCode::Char('z') if key.modifiers == KeyModifiers::CONTROL => Some(Action::Suspend),
        KeyCode::F(1) => Some(Action::SwitchView(ViewMode::List)),
        KeyCode::F(2) => Some(Action::SwitchView(ViewMode::Form)),
        KeyCode::Esc => Some(Action::CloseHelp),
        KeyCode::Char('q') if state.view() == ViewMode::List => Some(Action::Quit),
        KeyCode::Char('?') if state.view() == ViewMode::List => Some(Action::ToggleHelp),
        _ => None,
    }
}

pub struct App {
    pub state: AppState,
    pub settings: Settings,
    pub exit: bool,
    pub suspend: bool,
    pub pointer: PointerCapture,
    pub components: Vec<Box<dyn Component>>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let pointer = PointerCapture::default();
        Self {
            state: AppState::default(),
            settings,
            exit: false,
            suspend: false,
            pointer: pointer.clone(),
            components: vec![
                Box::new(Header::new()),
                Box::new(CarouselRegion::new(pointer)),
                Box::new(Nav::new()),
                Box::new(CompanyTable::new()),
                Box::new(RegistrationForm::new()),
                Box::new(Status::new()),
                Box::new(Help::new()),
            ],
        }
    }

    /// Applies page level transitions. Returns `false` for actions that
    /// changed nothing and need not reach the regions.
    pub fn reduce(
        &mut self,
        action: &Action,
        action_tx: &UnboundedSender<Action>,
    ) -> eyre::Result<bool> {
        match action {
            Action::Quit => self.exit = true,
            Action::Suspend => self.suspend = true,
            Action::Resume => self.suspend = false,
            Action::ClientReady => return Ok(self.state.mark_interactive()),
            Action::SwitchView(mode) => return Ok(self.state.set_view(*mode)),
            Action::CompaniesLoaded(companies) => {
                let count = companies.len();
                if !self.state.apply_load(Ok(companies.clone())) {
                    log::debug!("Discarding late company listing");
                    return Ok(false);
                }
                action_tx.send(Action::Message(
                    format!("Loaded {count} companies"),
                    MessageType::Success,
                ))?;
            }
            Action::CompaniesFailed(message) => {
                if !self.state.apply_load(Err(message.clone())) {
                    log::debug!("Discarding late failure: {message}");
                    return Ok(false);
                }
                action_tx.send(Action::Message(
                    "Could not load companies".into(),
                    MessageType::Error,
                ))?;
            }
            Action::Error(e) => {
                log::error!("{e}");
                action_tx.send(Action::Message(e.clone(), MessageType::Error))?;
            }
            _ => {}
        }
        Ok(true)
    }

    pub async fn run(&mut self) -> eyre::Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();

        let mut tui = tui::Tui::new()?
            .tick_rate(self.settings.tick_rate)
            .frame_rate(self.settings.frame_rate)
            .pointer(self.pointer.clone());
        tui.enter()?;

        for component in self.components.iter_mut() {
            component.register_action_handler(action_tx.clone())?;
        }

        for component in self.components.iter_mut() {
            component.register_config_handler(self.settings.clone())?;
        }

        for component in self.components.iter_mut() {
            component.init(tui.size()?)?;
        }

        loop {
            if let Some(e) = tui.next().await {
                match e {
                    tui::Event::Init => action_tx.send(Action::ClientReady)?,
                    tui::Event::Closed => action_tx.send(Action::Quit)?,
                    tui::Event::Error(ref message) => {
                        action_tx.send(Action::Error(format!("Terminal input failed: {message}")))?
                    }
                    tui::Event::Tick => action_tx.send(Action::Tick)?,
                    tui::Event::Render => action_tx.send(Action::Render)?,
                    tui::Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
                    tui::Event::Key(key) => {
                        if let Some(action) = global_key_action(key, &self.state) {
                            action_tx.send(action)?;
                        }
                    }
                    _ => {}
                }
                for component in self.components.iter_mut() {
                    if let Some(action) = component.handle_events(Some(e.clone()), &self.state)? {
                        action_tx.send(action)?;
                    }
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                if action != Action::Tick && action != Action::Render {
                    log::debug!("{action:?}");
                }
                match &action {
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, *w, *h))?;
                        tui.draw(|f| self.draw(f, &action_tx))?;
                    }
                    Action::Render => {
                        tui.draw(|f| self.draw(f, &action_tx))?;
                    }
                    _ => {}
                }
                if !self.reduce(&action, &action_tx)? {
                    continue;
                }
                for component in self.components.iter_mut() {
                    if let Some(action) = component.update(&self.state, action.clone())? {
                        action_tx.send(action)?
                    };
                }
            }

            if self.suspend {
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                tui = tui::Tui::new()?
                    .tick_rate(self.settings.tick_rate)
                    .frame_rate(self.settings.frame_rate)
                    .pointer(self.pointer.clone());
                tui.enter()?;
            } else if self.exit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame<'_>, action_tx: &UnboundedSender<Action>) {
        let area = f.area();
        for component in self.components.iter_mut() {
            if let Err(e) = component.draw(f, area, &self.state) {
                let report = Action::Error(format!("Failed to draw: {:?}", e));
                if let Err(e) = action_tx.send(report) {
                    log::error!("Failed to report draw error: {e}");
                }
            }
        }
    }
}
