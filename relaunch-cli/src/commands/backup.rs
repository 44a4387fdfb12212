use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use relaunch_lib::{create_backup, restore_latest};

use super::{Context, open_database};
use crate::CliError;

/// Back up the database after checking that it is a launcher database.
pub(crate) fn run_backup(ctx: &Context) -> Result<(), CliError> {
    let mut db = open_database(ctx)?;
    db.close();

    log::info!("Creating a backup of {}", ctx.db_path.display());
    let backup = create_backup(&ctx.db_path)?;
    log::info!(
        "{} {}",
        "Backup created:".if_supports_color(Stdout, |t| t.green()),
        backup.display()
    );
    Ok(())
}

/// Restore the most recent backup, then check the result.
pub(crate) fn run_restore(ctx: &Context) -> Result<(), CliError> {
    log::info!("Restoring the backup of {}", ctx.db_path.display());
    let backup = restore_latest(&ctx.db_path)?;
    log::info!(
        "{} {}",
        "Restored from".if_supports_color(Stdout, |t| t.green()),
        backup.display()
    );

    if let Err(e) = open_database(ctx) {
        log::warn!("Restored database failed verification: {}", e);
    }
    Ok(())
}
