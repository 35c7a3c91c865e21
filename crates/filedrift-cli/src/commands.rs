use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "filedrift")]
#[command(about = "Find files on source that are missing, moved, or duplicated relative to target", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Source directory (smaller, e.g. a USB drive)
    #[arg(long)]
    pub source: PathBuf,

    /// Target directory (larger, e.g. a cloud-sync mirror or SMB share)
    #[arg(long)]
    pub target: PathBuf,

    /// Output CSV file path
    #[arg(long, default_value = "missing_files.csv")]
    pub output: PathBuf,

    /// Scan the entire target tree instead of smart subdirectory scanning
    #[arg(long)]
    pub full_scan: bool,

    /// Exclude high-confidence moved files from the CSV output
    #[arg(long)]
    pub exclude_high_confidence_moved: bool,

    /// Show detailed progress during scanning
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct DryRunArgs {
    /// Source directory
    #[arg(long)]
    pub source: PathBuf,

    /// Target directory
    #[arg(long)]
    pub target: PathBuf,

    /// Plan as if scanning the entire target tree
    #[arg(long)]
    pub full_scan: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare source against target and write the drift report
    Compare(CompareArgs),
    /// Show the scan plan without traversing the target
    DryRun(DryRunArgs),
    /// Print configuration values
    PrintConfig,
}
