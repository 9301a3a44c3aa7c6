use std::{fs::create_dir_all, path::PathBuf, time::Duration};

use color_eyre::eyre::{self, WrapErr};
use config::{Config, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://json-placeholder.mock.beeceptor.com/companies";
pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u64 = 4000;
pub const ENV_PREFIX: &str = "SHOWCASE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// URL answering `GET` with a JSON array of companies
    pub endpoint: String,
    pub autoplay_interval_ms: u64,
    pub tick_rate: f64,
    pub frame_rate: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            autoplay_interval_ms: DEFAULT_AUTOPLAY_INTERVAL_MS,
            tick_rate: 4.0,
            frame_rate: 30.0,
        }
    }
}

impl Settings {
    /// Rejects values the run loop cannot turn into intervals.
    pub fn validate(self) -> eyre::Result<Self> {
        for (name, rate) in [("tick_rate", self.tick_rate), ("frame_rate", self.frame_rate)] {
            let period = Duration::try_from_secs_f64(1.0 / rate).unwrap_or_default();
            if !rate.is_finite() || rate <= 0.0 || period.is_zero() {
                eyre::bail!("{name} must be a positive number, got {rate}");
            }
        }
        if self.autoplay_interval_ms == 0 {
            eyre::bail!("autoplay_interval_ms must be greater than zero");
        }
        Ok(self)
    }
}

pub fn read_config() -> eyre::Result<Settings> {
    let config_path = ensure_config_file()?;

    let config_path_str = config_path
        .to_str()
        .ok_or_else(|| eyre::eyre!("Configuration path is not valid UTF-8"))?;

    let settings = Config::builder()
        .add_source(File::new(config_path_str, FileFormat::Toml).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()
        .wrap_err("Configuration build failed")?;

    settings
        .try_deserialize()
        .wrap_err("Configuration parsing failed")
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "showcase", env!("CARGO_PKG_NAME"))
}

pub fn get_data_dir() -> PathBuf {
    if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

pub fn get_config_file() -> PathBuf {
    get_config_dir().join("config.toml")
}

fn ensure_config_file() -> eyre::Result<PathBuf> {
    let config_dir = get_config_dir();

    create_dir_all(&config_dir)?;

    Ok(get_config_file())
}
