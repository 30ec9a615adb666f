//! Weekly schedule manager entry point.
//!
//! # Responsibility
//! - Resolve configuration, start file logging, open JSON storage.
//! - Hand stdin/stdout to the numbered menu until the user exits.

mod menu;
mod render;

use log::info;
use menu::Menu;
use schedule_core::{init_logging, JsonFileStorage, ScheduleConfig, ScheduleService};
use std::error::Error;
use std::io;

fn main() -> Result<(), Box<dyn Error>> {
    let config = ScheduleConfig::from_env()?;

    // Logging is diagnostics only; the menu works without it.
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let storage = JsonFileStorage::new(&config.data_dir);
    info!(
        "event=cli_start module=cli status=ok version={} data_dir={}",
        schedule_core::core_version(),
        storage.data_dir().display()
    );
    let service = ScheduleService::open(storage)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(stdin.lock(), stdout.lock(), service).run()?;

    info!("event=cli_exit module=cli status=ok");
    Ok(())
}
