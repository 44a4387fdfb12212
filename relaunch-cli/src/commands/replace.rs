use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use relaunch_lib::{DirectoryScanner, ReplaceRequest, create_backup, replace_runtime};

use super::{Context, open_database};
use crate::CliError;
use crate::cli_types::ReplaceArgs;

pub(crate) fn run_replace(ctx: &Context, args: ReplaceArgs) -> Result<(), CliError> {
    if !args.runtime.is_file() {
        return Err(CliError::usage(format!(
            "The runtime executable does not exist: {}",
            args.runtime.display()
        )));
    }

    let db = open_database(ctx)?;
    if !args.no_backup {
        create_backup(&ctx.db_path)?;
    }

    let rewrite = &ctx.settings.rewrite;
    let request = ReplaceRequest {
        release_key: args.release_key,
        runtime: args.runtime,
        label: args.label,
        windowed: args.windowed || rewrite.disable_fullscreen,
        backup_configs: !args.no_backup && rewrite.backup_configs,
        custom_parameters: args.custom_parameters,
    };
    let summary = replace_runtime(&db, &DirectoryScanner, &request)?;

    log::info!(
        "{} {} now starts {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        request.release_key.if_supports_color(Stdout, |t| t.bold()),
        summary.parameters.executable_path,
    );
    log::info!(
        "  New primary task {} (order {})",
        summary.task.id,
        summary.task.order
    );
    log::info!("  Arguments: {}", summary.parameters.command_line_args);
    for path in &summary.scripts_rewritten {
        log::info!("  Resolved mount paths in {}", path.display());
    }
    for path in &summary.settings_rewritten {
        log::info!("  Disabled fullscreen in {}", path.display());
    }
    if !summary.backups.is_empty() {
        log::info!("  {} configuration backup(s) created", summary.backups.len());
    }
    Ok(())
}
