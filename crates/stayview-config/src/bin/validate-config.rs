//! Config validation CLI tool
//!
//! Checks a stayview configuration file and shows the settings it resolves
//! to. Without an argument the default config path is checked.

use stayview_config::{load_config, ConfigError, Settings};
use stayview_util::default_config_path;
use std::path::PathBuf;
use std::process::ExitCode;

fn print_settings(settings: &Settings) {
    let display = &settings.display;
    let rows = [
        ("currency_symbol", display.currency_symbol.clone()),
        ("stay_date_format", display.stay_date_format.clone()),
        ("booked_at_format", display.booked_at_format.clone()),
        ("today_label", display.today_label.clone()),
        ("timezone", display.zone.to_string()),
        ("routes.edit", settings.routes.edit.clone()),
    ];

    for (key, value) in rows {
        println!("  {:<18} {}", key, value);
    }
}

fn main() -> ExitCode {
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match load_config(&config_path) {
        Ok(settings) => {
            println!("{}: ok", config_path.display());
            print_settings(&settings);
            ExitCode::SUCCESS
        }
        Err(ConfigError::ValidationFailed { errors }) => {
            eprintln!("{}: {} problem(s)", config_path.display(), errors.len());
            for err in errors {
                eprintln!("  - {}", err);
            }
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("{}: {}", config_path.display(), e);
            ExitCode::from(1)
        }
    }
}
