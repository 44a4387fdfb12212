use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use relaunch_lib::settings::{load_settings_string, settings_path};

use super::Context;
use crate::CliError;

/// Show the settings file location and the effective settings.
pub(crate) fn run_config_show(ctx: &Context) -> Result<(), CliError> {
    let path = settings_path();
    log::info!(
        "{}",
        "relaunch settings".if_supports_color(Stdout, |t| t.bold())
    );
    log::info!(
        "  Settings file: {} {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        if path.exists() {
            "(exists)".if_supports_color(Stdout, |t| t.green()).to_string()
        } else {
            "(not found, using defaults)"
                .if_supports_color(Stdout, |t| t.dimmed())
                .to_string()
        },
    );
    log::info!("  Database:      {}", ctx.db_path.display());
    crate::log_blank();

    let contents =
        load_settings_string().ok_or_else(|| CliError::config("could not render settings"))?;
    println!("{}", contents.trim_end());
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}
