/// stylelift: extract inline JSX styles into StyleSheet.create entries
///
/// Locates the inline `style={{...}}` object under a cursor offset, adds it
/// to the unit's StyleSheet.create registry under a collision-free name and
/// rewrites the attribute to reference the new entry. The file is modified
/// in place through an atomic write; dry runs print the plan instead.
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use stylelift::{Config, FileHost, Outcome, extract, run_extraction};
use tracing::info;

#[derive(Parser)]
#[command(name = "stylelift")]
#[command(about = "Extract inline JSX styles into StyleSheet.create entries", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the inline style under a cursor offset
    Extract {
        /// Source file (.tsx/.jsx/.ts/.js)
        #[arg(short, long)]
        file: PathBuf,

        /// Cursor position as a byte offset into the file
        #[arg(short, long)]
        offset: usize,

        /// Print the planned edits without touching the file
        #[arg(long)]
        dry_run: bool,

        /// Print the dry-run plan as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Optional log file path for debug logging
        #[arg(short, long)]
        log: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = match &cli.command {
        Commands::Extract { log, .. } => log.clone(),
    };
    init_logging(log_path.as_ref())?;

    match cli.command {
        Commands::Extract {
            file,
            offset,
            dry_run,
            json,
            log: _,
        } => run_extract(file, offset, dry_run, json),
    }
}

/// Initialize logging with optional file output
fn init_logging(log_path: Option<&PathBuf>) -> Result<()> {
    use tracing_subscriber::fmt::writer::MakeWriterExt;

    if let Some(log_file) = log_path {
        // With log file: info+ to file, warn+ to stderr
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        let file_appender = tracing_appender::rolling::never(
            log_file
                .parent()
                .unwrap_or_else(|| std::path::Path::new(".")),
            log_file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("stylelift.log"),
        );

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(file_appender.and(std::io::stderr.with_max_level(tracing::Level::WARN)))
            .init();
    } else {
        // No log file: warn+ to stderr only (unless RUST_LOG overrides)
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}

fn run_extract(file: PathBuf, offset: usize, dry_run: bool, json: bool) -> Result<()> {
    check_language(&file)?;

    let config = Config::default();

    if dry_run {
        let source = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        return preview(&source, offset, json, &config);
    }

    let mut host = FileHost::new(&file);
    match run_extraction(&mut host, offset, &config)? {
        Outcome::Planned(planned) => {
            info!("Extracted entry '{}' in {}", planned.name, file.display());
        }
        Outcome::NoOp(reason) => println!("Nothing to extract: {}", reason),
    }

    Ok(())
}

/// Only React-flavored units are eligible, matching the editor command's
/// original language gate.
fn check_language(file: &Path) -> Result<()> {
    let extension = file
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");
    match extension.to_lowercase().as_str() {
        "tsx" | "jsx" | "ts" | "js" => Ok(()),
        other => bail!(
            "Unsupported file type '.{}' - stylelift works on .tsx/.jsx/.ts/.js units",
            other
        ),
    }
}

fn preview(source: &str, offset: usize, json: bool, config: &Config) -> Result<()> {
    match extract(source, offset, config)? {
        Outcome::Planned(planned) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&planned)?);
                return Ok(());
            }
            println!("Would add style: {}", planned.name);
            for edit in &planned.plan.edits {
                if edit.range.start == edit.range.end {
                    println!("  insert at {}: {:?}", edit.range.start, edit.replacement);
                } else {
                    println!(
                        "  replace {}..{} with {:?}",
                        edit.range.start, edit.range.end, edit.replacement
                    );
                }
            }
            println!("(dry run - no changes applied)");
        }
        Outcome::NoOp(reason) => println!("Nothing to extract: {}", reason),
    }

    Ok(())
}
