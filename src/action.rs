use crate::{app::MessageType, model::Company, model::ViewMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    ClientReady,
    SwitchView(ViewMode),
    CompaniesLoaded(Vec<Company>),
    CompaniesFailed(String),
    CarouselReady,
    CarouselUnavailable(String),
    Message(String, MessageType),
    ToggleHelp,
    CloseHelp,
    Suspend,
    Resume,
    Quit,
    Error(String),
}
