//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use relaunch_lib::ExportFormat;

#[derive(Parser)]
#[command(name = "relaunch")]
#[command(
    about = "Inspect GOG Galaxy launch tasks and point DOS games at another DOSBox",
    long_about = None
)]
pub(crate) struct Cli {
    /// GOG Galaxy storage directory (defaults to the configured one)
    #[arg(short, long, global = true)]
    pub directory: Option<PathBuf>,

    /// Database file inside the storage directory
    #[arg(short, long, global = true)]
    pub file: Option<String>,

    /// Listing format: json, csv or txt
    #[arg(long, global = true)]
    pub format: Option<ExportFormat>,

    /// Write listings to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List installed games
    Games {
        /// Only games whose install directory contains a DOSBox folder
        #[arg(long)]
        dos_only: bool,

        /// Only the game with this release key
        #[arg(short = 'k', long)]
        release_key: Option<String>,
    },

    /// List launch tasks
    Tasks {
        /// Only tasks of this release key
        #[arg(short = 'k', long)]
        release_key: Option<String>,
    },

    /// List launch parameters
    Params {
        /// Only parameters of this task
        #[arg(short, long)]
        task_id: Option<i64>,
    },

    /// List launcher users
    Users,

    /// List launch task types
    TaskTypes,

    /// Back up the database (<file>.bak, <file>.bak2, ...)
    Backup,

    /// Restore the database from its most recent backup
    Restore,

    /// Make a game launch through a different DOSBox executable
    Replace(ReplaceArgs),

    /// Show settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Clone)]
pub(crate) struct ReplaceArgs {
    /// Release key of the game (see `relaunch games`)
    #[arg(short = 'k', long)]
    pub release_key: String,

    /// Path to the DOSBox executable to launch instead
    #[arg(short, long)]
    pub runtime: PathBuf,

    /// Label for the new launch task
    #[arg(short, long)]
    pub label: Option<String>,

    /// Turn fullscreen off in the game's DOSBox settings
    #[arg(long)]
    pub windowed: bool,

    /// Don't back up the database or configuration files
    #[arg(long)]
    pub no_backup: bool,

    /// Enable the game's custom launch parameters setting
    #[arg(long)]
    pub custom_parameters: bool,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings
    Show,

    /// Print the settings file path
    Path,
}
