pub mod diff;
pub mod snapshot;
pub mod tree;
mod view;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "refdiff",
    version,
    about = "Refactoring-aware diff of two JavaScript snapshots",
    long_about = "Compares two versions of a code base structurally. Functions and classes are \
                  matched across versions by name and token similarity, and the differences are \
                  reported as refactorings: renames, moves, signature changes, extracted and \
                  inlined functions."
)]
pub struct Cli {
    /// Also log to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory for log files [default: $REFDIFF_LOG_DIR or ~/.refdiff/logs]
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report the refactorings between two snapshots
    #[command(
        long_about = "Each snapshot is a single file or a directory. Directories are searched \
                            for .js, .mjs, .cjs and .jsx files, which are paired across snapshots \
                            by their path relative to the snapshot root."
    )]
    Diff {
        /// The older snapshot
        #[arg(value_name = "BEFORE")]
        before: PathBuf,
        /// The newer snapshot
        #[arg(value_name = "AFTER")]
        after: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Include unchanged elements
        #[arg(long)]
        all: bool,
        /// Similarity a pair must exceed to match, overrides the config file
        #[arg(long, value_name = "F")]
        threshold: Option<f64>,
        /// JSON file with finder settings
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Print the structural tree extracted from a snapshot
    Tree {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let log_dir = cli
        .log_dir
        .clone()
        .unwrap_or_else(refdiff_core::logging::default_log_dir);
    let _guard = refdiff_core::logging::init_logging("cli", &log_dir, cli.verbose)?;

    match cli.command {
        Commands::Diff {
            before,
            after,
            format,
            all,
            threshold,
            config,
        } => {
            let config = diff::resolve_config(config.as_deref(), threshold)?;
            diff::run(&before, &after, config, format, all)
        }
        Commands::Tree { path } => tree::run(&path),
    }
}
