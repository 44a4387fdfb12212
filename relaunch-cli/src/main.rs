//! relaunch CLI
//!
//! Lists what the GOG Galaxy database knows about installed games and their
//! launch tasks, and redirects DOS games to a DOSBox of the user's choice.

mod cli_types;
mod commands;
mod error;
mod logging;

use clap::Parser;

use relaunch_lib::Settings;

use cli_types::{Cli, Commands, ConfigAction};
use commands::Context;
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = Context::new(Settings::load(), &cli);

    match cli.command {
        Commands::Games {
            dos_only,
            release_key,
        } => commands::list::run_games(&ctx, dos_only, release_key.as_deref()),
        Commands::Tasks { release_key } => commands::list::run_tasks(&ctx, release_key.as_deref()),
        Commands::Params { task_id } => commands::list::run_params(&ctx, task_id),
        Commands::Users => commands::list::run_users(&ctx),
        Commands::TaskTypes => commands::list::run_task_types(&ctx),
        Commands::Backup => commands::backup::run_backup(&ctx),
        Commands::Restore => commands::backup::run_restore(&ctx),
        Commands::Replace(args) => commands::replace::run_replace(&ctx, args),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&ctx),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
        },
    }
}

/// Emit an empty info line.
pub(crate) fn log_blank() {
    log::info!("");
}
