//! Command-line interface for the splitter.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{
    parse_date, SplitterConfig, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_TITLE_LEN,
    DEFAULT_MIN_OUTLINE_ENTRIES,
};
use crate::dates::WeekSummary;
use crate::error::{Result, SplitterError};
use crate::report::{ErrorReport, OutputFormat, SplitReport};
use crate::splitter::{split_document_with, ExportMode};
use crate::splitting::BoundaryPolicy;

/// Paper Splitter - Split papers and proceedings into per-section PDFs.
#[derive(Parser)]
#[command(name = "paper-splitter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a PDF into one file per outline section (or fixed page chunks).
    Split(SplitArgs),

    /// Print this week's and next week's key dates.
    Week {
        /// Reference date in YYYY-MM-DD format (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Source PDF
    pub source: PathBuf,

    /// Directory to write section PDFs into
    pub output_dir: PathBuf,

    /// Directory relative paths are resolved against (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Pages per chunk when the outline is missing or too sparse
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Minimum usable outline entries before the outline is used
    #[arg(long, default_value_t = DEFAULT_MIN_OUTLINE_ENTRIES)]
    pub min_entries: usize,

    /// Only treat outline entries up to this depth as boundaries (0 = top level)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Maximum title length in output filenames
    #[arg(long, default_value_t = DEFAULT_MAX_TITLE_LEN)]
    pub title_len: usize,

    /// Output format of the report
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Plan sections without writing any files
    #[arg(long)]
    pub dry_run: bool,
}

impl SplitArgs {
    /// Build the splitter configuration from the arguments.
    pub fn to_config(&self) -> Result<SplitterConfig> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir()?,
        };

        let boundary = self
            .max_depth
            .map_or(BoundaryPolicy::AllLevels, BoundaryPolicy::MaxDepth);

        Ok(SplitterConfig::new(root)
            .with_chunk_size(self.chunk_size)
            .with_min_outline_entries(self.min_entries)
            .with_boundary(boundary)
            .with_max_title_len(self.title_len))
    }
}

/// Run the CLI.
///
/// Usage errors are reported as an error payload on stdout, like any other
/// failed split.
pub fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let message = e.to_string().trim().to_string();
                println!("{}", ErrorReport::new(&message).render(OutputFormat::Json)?);
                return Err(SplitterError::Usage(message));
            }
        },
    };

    match cli.command {
        Commands::Split(args) => split_command(&args),
        Commands::Week { date } => week_command(date.as_deref()),
    }
}

/// Execute the split command, printing a report or an error payload.
fn split_command(args: &SplitArgs) -> Result<()> {
    let (output, outcome) = render_outcome(run_split(args), args.format)?;
    println!("{output}");
    outcome
}

/// Render a split outcome as a report or, if the split or the report
/// rendering failed, as an error payload.
///
/// The outer `Err` is only returned when the error payload itself cannot be
/// rendered.
fn render_outcome(
    outcome: Result<SplitReport>,
    format: OutputFormat,
) -> Result<(String, Result<()>)> {
    match outcome.and_then(|report| report.render(format)) {
        Ok(rendered) => Ok((rendered, Ok(()))),
        Err(e) => Ok((ErrorReport::from(&e).render(format)?, Err(e))),
    }
}

fn run_split(args: &SplitArgs) -> Result<SplitReport> {
    let config = args.to_config()?;
    let mode = if args.dry_run {
        ExportMode::DryRun
    } else {
        ExportMode::Write
    };

    let pb = ProgressBar::new(0);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{pos}/{len}] {msg}")
            .expect("valid template"),
    );
    pb.set_message(format!("Reading {}", args.source.display()));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = split_document_with(
        &args.source,
        &args.output_dir,
        &config,
        mode,
        |ordinal, count, section| {
            pb.set_length(count as u64);
            pb.set_position(ordinal as u64 + 1);
            pb.set_message(section.title.clone());
        },
    );

    pb.finish_and_clear();
    result
}

/// Execute the week command.
fn week_command(date: Option<&str>) -> Result<()> {
    let summary = match date {
        Some(date) => WeekSummary::for_date(parse_date(date)?),
        None => WeekSummary::today(),
    };

    println!(
        "{} {} ({})",
        style("Today:").bold(),
        summary.today.format("%A, %B %d, %Y"),
        summary.today
    );
    println!();
    println!("{}", style("This Week:").bold());
    println!("  Monday:    {}", style(summary.this_week_monday).cyan());
    println!("  Sunday:    {}", style(summary.this_week_sunday).cyan());
    println!("  Tomorrow:  {}", style(summary.tomorrow).green());
    println!("  Days until Sunday: {}", summary.days_until_sunday);
    println!();
    println!("{}", style("Next Week:").bold());
    println!("  Monday:    {}", style(summary.next_week_monday).cyan());
    println!("  Sunday:    {}", style(summary.next_week_sunday).cyan());

    Ok(())
}
