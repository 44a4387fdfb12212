pub(crate) mod backup;
pub(crate) mod config;
pub(crate) mod list;
pub(crate) mod replace;

use std::fs;
use std::path::PathBuf;

use relaunch_core::Record;
use relaunch_db::GalaxyDatabase;
use relaunch_lib::{ExportFormat, Settings, export_records};

use crate::CliError;
use crate::cli_types::Cli;

/// Settings merged with command-line overrides.
pub(crate) struct Context {
    pub settings: Settings,
    pub db_path: PathBuf,
    pub format: ExportFormat,
    pub output: Option<PathBuf>,
}

impl Context {
    pub(crate) fn new(settings: Settings, cli: &Cli) -> Self {
        let dir = cli
            .directory
            .clone()
            .unwrap_or_else(|| settings.database.storage_dir.clone());
        let file = cli
            .file
            .clone()
            .unwrap_or_else(|| settings.database.file.clone());
        Self {
            db_path: dir.join(file),
            format: cli.format.unwrap_or(settings.export.format),
            output: cli.output.clone(),
            settings,
        }
    }
}

/// Open and verify the launcher database.
pub(crate) fn open_database(ctx: &Context) -> Result<GalaxyDatabase, CliError> {
    let options = ctx.settings.query_options()?;
    let mut db = GalaxyDatabase::new(options).with_dos_marker(&ctx.settings.rewrite.dos_marker);
    if !db.open(&ctx.db_path)? {
        return Err(CliError::invalid_database(&ctx.db_path));
    }
    Ok(db)
}

/// Print records in the chosen format, or write them to `--output`.
pub(crate) fn emit<R: Record>(ctx: &Context, records: &[R]) -> Result<(), CliError> {
    let rendered = export_records(records, ctx.format)?;
    match &ctx.output {
        Some(path) => {
            fs::write(path, rendered)?;
            log::info!(
                "Wrote {} {} record(s) to {}",
                records.len(),
                R::KIND,
                path.display()
            );
        }
        None => println!("{}", rendered.trim_end()),
    }
    Ok(())
}
