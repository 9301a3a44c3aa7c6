use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle};

use super::Component;
use crate::{
    action::Action,
    app::AppState,
    config::Settings,
    layout,
    loader::CompanyLoader,
    model::{Company, LoadState, LoadStatus, ViewMode},
    tui::Frame,
};

const COLUMNS: [&str; 4] = ["Name", "Industry", "Country", "CEO"];
const EMPTY_MESSAGE: &str = "No companies found.";

/// What the listing shows for a given load state.
#[derive(Debug, PartialEq, Eq)]
pub enum TableBody<'a> {
    Loading,
    Failed(&'a str),
    Empty,
    Rows(&'a [Company]),
}

impl<'a> From<&'a LoadState> for TableBody<'a> {
    fn from(load: &'a LoadState) -> Self {
        match load.status() {
            LoadStatus::Loading => TableBody::Loading,
            LoadStatus::Failed(message) => TableBody::Failed(message),
            LoadStatus::Loaded if load.companies().is_empty() => TableBody::Empty,
            LoadStatus::Loaded => TableBody::Rows(load.companies()),
        }
    }
}

pub struct CompanyTable {
    command_tx: Option<UnboundedSender<Action>>,
    loader: CompanyLoader,
    request: Option<JoinHandle<()>>,
    state: TableState,
    spinner_state: ThrobberState,
}

impl CompanyTable {
    pub fn new() -> Self {
        Self {
            command_tx: None,
            loader: CompanyLoader::new(Settings::default().endpoint),
            request: None,
            state: TableState::default(),
            spinner_state: ThrobberState::default(),
        }
    }

    pub fn cursor_up(&mut self) {
        if let Some(position) = self.state.selected() {
            if position > 0 {
                self.state.select(Some(position - 1))
            }
        }
    }

    pub fn cursor_down(&mut self, rows: usize) {
        match self.state.selected() {
            Some(position) if position + 1 < rows => self.state.select(Some(position + 1)),
            None if rows > 0 => self.state.select(Some(0)),
            _ => {}
        }
    }

    fn header() -> Row<'static> {
        Row::new(COLUMNS.iter().map(|title| Cell::from(*title)))
            .style(Style::new().bold().underlined())
    }

    fn widths() -> [Constraint; 4] {
        [Constraint::Fill(1); 4]
    }

    fn frame() -> Block<'static> {
        Block::new()
            .title("Companies")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
    }
}

impl Drop for CompanyTable {
    fn drop(&mut self) {
        if let Some(request) = self.request.take() {
            request.abort();
        }
    }
}

impl Component for CompanyTable {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.command_tx = Some(tx);
        Ok(())
    }

    fn register_config_handler(&mut self, config: Settings) -> Result<()> {
        self.loader = CompanyLoader::new(config.endpoint);
        Ok(())
    }

    /// Mounting issues the one request of this page view.
    fn init(&mut self, _area: Size) -> Result<()> {
        if let Some(tx) = &self.command_tx {
            log::info!("Requesting companies from {}", self.loader.endpoint());
            self.request = Some(self.loader.spawn(tx.clone()));
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent, state: &AppState) -> Result<Option<Action>> {
        if state.view() != ViewMode::List {
            return Ok(None);
        }
        let rows = state.load().companies().len();
        match key.code {
            KeyCode::Up => self.cursor_up(),
            KeyCode::Down => self.cursor_down(rows),
            KeyCode::Home if rows > 0 => self.state.select(Some(0)),
            KeyCode::End if rows > 0 => self.state.select(Some(rows - 1)),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, state: &AppState, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick if state.load().is_loading() => self.spinner_state.calc_next(),
            Action::CompaniesLoaded(_) | Action::CompaniesFailed(_) => {
                self.request = None;
                self.state.select(None);
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &AppState) -> Result<()> {
        if state.view() != ViewMode::List {
            return Ok(());
        }

        let area = layout::page(area).body;
        let block = Self::frame();
        let inner = block.inner(area);
        f.render_widget(block, area);

        match TableBody::from(state.load()) {
            TableBody::Loading => {
                let spinner = Throbber::default()
                    .label("Loading companies...")
                    .style(Style::default().fg(Color::Yellow))
                    .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
                    .use_type(throbber_widgets_tui::WhichUse::Spin);
                f.render_stateful_widget(spinner, inner, &mut self.spinner_state);
            }
            TableBody::Failed(message) => {
                let error = Paragraph::new(format!("Error: {message}"))
                    .style(Style::default().fg(Color::Red));
                f.render_widget(error, inner);
            }
            TableBody::Empty => {
                let rects = Layout::vertical([Constraint::Length(2), Constraint::Fill(1)])
                    .split(inner);
                let header = Table::new(Vec::<Row>::new(), Self::widths())
                    .header(Self::header().bottom_margin(1));
                let empty = Paragraph::new(EMPTY_MESSAGE)
                    .alignment(Alignment::Center)
                    .style(Style::new().italic());

                f.render_widget(header, rects[0]);
                f.render_widget(empty, rects[1]);
            }
            TableBody::Rows(companies) => {
                let rows = companies.iter().map(|company| {
                    Row::new(vec![
                        Cell::from(company.name.as_str()),
                        Cell::from(company.industry.as_str()),
                        Cell::from(company.country.as_str()),
                        Cell::from(company.ceo_name.as_str()),
                    ])
                });
                let table = Table::new(rows, Self::widths())
                    .header(Self::header().bottom_margin(1))
                    .row_highlight_style(Style::new().reversed())
                    .highlight_symbol(">> ");

                f.render_stateful_widget(table, inner, &mut self.state);
            }
        }

        Ok(())
    }
}
