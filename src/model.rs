use serde::{Deserialize, Serialize};

/// One row of the company listing, exactly as the endpoint sends it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub industry: String,
    pub country: String,
    pub ceo_name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    #[default]
    List,
    Form,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::List, ViewMode::Form];

    pub fn title(&self) -> &'static str {
        match self {
            ViewMode::List => "Company List",
            ViewMode::Form => "Register Company",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Loaded,
    Failed(String),
}

/// Lifecycle of the single company fetch.
///
/// Starts in [`LoadStatus::Loading`] and settles exactly once. Anything that
/// arrives after it settled is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadState {
    status: LoadStatus,
    companies: Vec<Company>,
}

impl LoadState {
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Settles the state with the outcome of the fetch. Returns `false` when
    /// the state had already settled and the outcome was discarded.
    pub fn settle(&mut self, outcome: Result<Vec<Company>, String>) -> bool {
        if !self.is_loading() {
            return false;
        }

        match outcome {
            Ok(companies) => {
                self.companies = companies;
                self.status = LoadStatus::Loaded;
            }
            Err(message) => {
                self.companies.clear();
                self.status = LoadStatus::Failed(message);
            }
        }

        true
    }
}
