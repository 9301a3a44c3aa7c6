use clap::{Args, Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser, Debug)]
#[command(
    name = "showcase",
    version,
    about,
    long_about = "Company listing, registration form and an auto-advancing image carousel in your terminal"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub overrides: SettingsArgs,
}

#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// URL the company listing is fetched from
    #[arg(long, short)]
    pub endpoint: Option<String>,
    /// Milliseconds between automatic carousel advances (defaults to 4000)
    #[arg(long)]
    pub autoplay_ms: Option<u64>,
    /// Ticks per second (defaults to 4)
    #[arg(long, short)]
    pub tick_rate: Option<f64>,
    /// Frames per second (defaults to 30)
    #[arg(long, short)]
    pub frame_rate: Option<f64>,
}

impl SettingsArgs {
    /// Flags win over whatever was read from file and environment.
    pub fn merge(&self, from_config: Settings) -> Settings {
        Settings {
            endpoint: self.endpoint.clone().unwrap_or(from_config.endpoint),
            autoplay_interval_ms: self
                .autoplay_ms
                .unwrap_or(from_config.autoplay_interval_ms),
            tick_rate: self.tick_rate.unwrap_or(from_config.tick_rate),
            frame_rate: self.frame_rate.unwrap_or(from_config.frame_rate),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows application info and configuration for the current system
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from(["showcase", "--endpoint", "http://localhost/x", "-f", "60"]);

        let settings = cli.overrides.merge(Settings::default());

        assert_eq!("http://localhost/x", settings.endpoint);
        assert_eq!(60.0, settings.frame_rate);
        assert_eq!(4.0, settings.tick_rate);
    }

    #[test]
    fn zero_tick_rate_flag_is_rejected() {
        let cli = Cli::parse_from(["showcase", "-t", "0"]);

        let settings = cli.overrides.merge(Settings::default());

        assert_eq!(0.0, settings.tick_rate);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn config_subcommand_parses() {
        let cli = Cli::parse_from(["showcase", "config"]);

        assert!(matches!(cli.command, Some(Command::Config)));
    }
}
