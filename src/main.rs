use clap::Parser;
use color_eyre::eyre::Result;

use crate::{
    app::App,
    cli::{Cli, Command},
    config::{get_config_file, get_data_dir, read_config, Settings},
    utils::{initialize_logging, initialize_panic_handler, log_file_name},
};

mod action;
mod app;
mod carousel;
mod cli;
mod components;
mod config;
mod layout;
mod loader;
mod model;
mod tui;
mod utils;

fn print_config(settings: &Settings) -> Result<()> {
    println!("🦀 {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("Config file: {}", get_config_file().display());
    println!("Log file:    {}", get_data_dir().join(log_file_name()).display());
    println!();
    print!("{}", toml::to_string_pretty(settings)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    initialize_panic_handler()?;
    initialize_logging()?;

    let args = Cli::parse();
    let settings = args.overrides.merge(read_config()?).validate()?;

    match args.command {
        Some(Command::Config) => print_config(&settings),
        None => {
            log::info!("Starting with endpoint {}", settings.endpoint);
            let mut app = App::new(settings);
            app.run().await
        }
    }
}
