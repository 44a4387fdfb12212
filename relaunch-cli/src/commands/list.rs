use relaunch_core::DirectoryLister;
use relaunch_lib::DirectoryScanner;

use super::{Context, emit, open_database};
use crate::CliError;

pub(crate) fn run_games(
    ctx: &Context,
    dos_only: bool,
    release_key: Option<&str>,
) -> Result<(), CliError> {
    let db = open_database(ctx)?;
    let scanner = DirectoryScanner;
    let lister: Option<&dyn DirectoryLister> = if dos_only { Some(&scanner) } else { None };
    let games = db.products(release_key, lister)?;
    emit(ctx, &games)
}

pub(crate) fn run_tasks(ctx: &Context, release_key: Option<&str>) -> Result<(), CliError> {
    let db = open_database(ctx)?;
    let tasks = match release_key {
        Some(key) => db.tasks_for(key)?,
        None => db.tasks()?,
    };
    emit(ctx, &tasks)
}

pub(crate) fn run_params(ctx: &Context, task_id: Option<i64>) -> Result<(), CliError> {
    let db = open_database(ctx)?;
    let params = match task_id {
        Some(id) => db.launch_parameters_for(id)?,
        None => db.launch_parameters()?,
    };
    emit(ctx, &params)
}

pub(crate) fn run_users(ctx: &Context) -> Result<(), CliError> {
    let db = open_database(ctx)?;
    emit(ctx, &db.users()?)
}

pub(crate) fn run_task_types(ctx: &Context) -> Result<(), CliError> {
    let db = open_database(ctx)?;
    emit(ctx, &db.task_types()?)
}
