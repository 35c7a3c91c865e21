mod commands;
mod logging;
mod progress;

use std::collections::BTreeMap;
use std::path::Path;
use std::process;

use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands, CompareArgs, DryRunArgs};
use dotenv::dotenv;
use filedrift_core::engine::validate_directory;
use filedrift_core::matching::{Confidence, MatchStatus};
use filedrift_core::{planner, report, scanner, AppConfig, DriftEngine, DriftResult, ScanMode};
use progress::CliReporter;
use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let args = Cli::parse();

    let verbose = match &args.command {
        Some(Commands::Compare(compare_args)) => compare_args.verbose,
        _ => false,
    };
    let _guard = logging::init_logger(verbose);

    let config = match filedrift_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    match args.command {
        Some(Commands::Compare(compare_args)) => {
            if let Err(err) = run_compare(&config, &compare_args) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::DryRun(dry_run_args)) => {
            if let Err(err) = run_dry_run(&config, &dry_run_args) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn scan_mode(full_scan: bool) -> ScanMode {
    if full_scan {
        ScanMode::Full
    } else {
        ScanMode::Smart
    }
}

fn run_compare(
    config: &AppConfig,
    args: &CompareArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = DriftEngine::new(
        config.clone(),
        &args.source,
        &args.target,
        scan_mode(args.full_scan),
    );
    let reporter = CliReporter::new();
    let result = engine.run(&reporter)?;

    if result.empty_source {
        println!(
            "{}",
            format!(
                "Warning: no files found under source {} — is the path correct?",
                args.source.display()
            )
            .red()
            .bold()
        );
    }

    let report = report::assemble(&result.comparisons, args.exclude_high_confidence_moved);
    report::write_csv(&args.output, &report.rows)?;

    println!();
    info!(
        "Source scan: {}, Target scan: {}, Compare: {}",
        format!("{:.2}s", result.source_scan_duration.as_secs_f64()).green(),
        format!("{:.2}s", result.target_scan_duration.as_secs_f64()).green(),
        format!("{:.2}s", result.compare_duration.as_secs_f64()).green(),
    );
    info!(
        "{} rows written to {}",
        format!("{}", report.rows.len()).green(),
        args.output.display(),
    );

    print_summary(&result, &report, &args.output, args.exclude_high_confidence_moved);

    Ok(())
}

fn print_summary(
    result: &DriftResult,
    report: &report::Report,
    output: &Path,
    excluded_high_confidence_moved: bool,
) {
    let only_on_source = result.count_status(MatchStatus::OnlyOnSource);
    let in_both = result.count_status(MatchStatus::InBoth);
    let duplicates = result.count_status(MatchStatus::DuplicateOnSource);
    let moved_high = result.count_moved_with(Confidence::High);
    let moved_medium = result.count_moved_with(Confidence::Medium);

    println!();
    println!("{}", "=".repeat(60));
    println!("SUMMARY");
    println!("{}", "=".repeat(60));
    println!("Scan mode: {} scan", result.mode.as_str());
    println!("Total files on source: {}", result.source_files);
    println!(
        "  ({} at root, {} top-level subdirectories)",
        result.source_root_files,
        result.source_subdirs.len()
    );
    println!("Total files scanned on target: {}", result.target_files);
    println!(
        "Files only on source: {}",
        format!("{}", only_on_source).red()
    );
    println!("Files in both locations: {} (excluded from CSV)", in_both);
    println!(
        "Files moved to different path: {} (high confidence)",
        format!("{}", moved_high).yellow()
    );
    println!(
        "Files possibly moved: {} (medium confidence)",
        format!("{}", moved_medium).yellow()
    );
    println!(
        "Source duplicates: {} in {} groups",
        format!("{}", duplicates).cyan(),
        result.duplicate_groups
    );

    if duplicates > 0 {
        println!();
        println!("Source duplicate groups:");
        let mut groups: BTreeMap<(String, u64), (String, Vec<String>)> = BTreeMap::new();
        for comparison in &result.comparisons {
            if comparison.status != MatchStatus::DuplicateOnSource {
                continue;
            }
            let display_name = Path::new(&comparison.source.relative_path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let entry = groups
                .entry((comparison.source.normalized_filename(), comparison.source.size))
                .or_insert_with(|| (display_name, Vec::new()));
            entry.1.push(comparison.source.relative_path.clone());
        }
        for ((_, size), (filename, files)) in &groups {
            println!("  {} ({} bytes):", filename, size);
            for file in files {
                println!("    - {}", file);
            }
        }
    }

    if excluded_high_confidence_moved && report.excluded_high_confidence > 0 {
        println!();
        println!(
            "Note: {} high-confidence moved files excluded from CSV output",
            report.excluded_high_confidence
        );
    }

    if !result.plan.skipped_target_subdirs.is_empty() {
        println!();
        println!(
            "Target subdirectories skipped by smart scan: {}",
            result.plan.skipped_target_subdirs.join(", ")
        );
    }

    if !result.entirely_missing_dirs.is_empty() {
        println!();
        println!("Directories entirely missing on target:");
        for dir in result.entirely_missing_dirs.iter().take(50) {
            println!(
                "  {} ({} files, {} bytes)",
                dir.name, dir.total_files, dir.total_bytes
            );
        }
        if result.entirely_missing_dirs.len() > 50 {
            println!(
                "  ... and {} more directories",
                result.entirely_missing_dirs.len() - 50
            );
        }
    }

    println!();
    println!(
        "Skipped due to errors: {}",
        result.source_skipped + result.target_skipped
    );
    println!();
    println!(
        "Phase 1 (source scan): {:.1}s",
        result.source_scan_duration.as_secs_f64()
    );
    println!(
        "Phase 2 (target scan): {:.1}s",
        result.target_scan_duration.as_secs_f64()
    );
    println!(
        "Phase 3 (comparison): {:.1}s",
        result.compare_duration.as_secs_f64()
    );
    println!();
    println!("Results saved to: {}", output.display());
}

fn run_dry_run(config: &AppConfig, args: &DryRunArgs) -> Result<(), Box<dyn std::error::Error>> {
    validate_directory(&args.source)?;
    validate_directory(&args.target)?;

    let mode = scan_mode(args.full_scan);

    println!("{}", "=".repeat(60));
    println!("DRY RUN MODE");
    println!("{}", "=".repeat(60));
    println!();
    println!("Source: {}", args.source.display());
    println!("Target: {}", args.target.display());
    println!("Scan mode: {} scan", mode.as_str());
    println!();

    let source = scanner::scan_directory(&args.source, None, &config.ignore_patterns);
    if source.files.is_empty() {
        println!("No files found in source directory!");
        return Ok(());
    }

    println!("Total files in source: {}", source.files.len());
    println!("Root files: {}", source.root_files);
    println!("Subdirectories: {}", source.top_level_subdirs.len());
    println!();

    let plan = planner::plan(&source.top_level_subdirs, &args.target, mode);

    match mode {
        ScanMode::Full => {
            println!("Full scan mode: will scan the entire target tree");
        }
        ScanMode::Smart => {
            println!("Subdirectory scan plan:");
            if let Some(to_scan) = plan.subdirs_to_scan.as_ref() {
                for subdir in to_scan {
                    println!("  + {} (will scan on target)", subdir);
                }
            }
            for subdir in &plan.missing_on_target {
                let missing_files = source
                    .files
                    .values()
                    .filter(|f| {
                        f.top_level_dir()
                            .map(|d| d.to_lowercase() == subdir.to_lowercase())
                            .unwrap_or(false)
                    })
                    .count();
                println!(
                    "  - {} (not found on target, {} files will be marked as missing)",
                    subdir, missing_files
                );
            }
            if !plan.skipped_target_subdirs.is_empty() {
                println!();
                println!(
                    "Target subdirectories never traversed: {}",
                    plan.skipped_target_subdirs.join(", ")
                );
            }
        }
    }

    println!();
    println!("{}", "=".repeat(60));
    println!("Dry run complete. Use the compare command to execute.");

    Ok(())
}
